//! Pass entry points.
//!
//! Every entry point allocates a fresh resolver over a clone of the union, runs the
//! resolve block once, and reads the outcome. Nothing outlives the call.

use unionkit_cases::Union;

use crate::resolver::{OtherwiseResolver, Resolver};

/// Raised by [`Resolve::map`] when no clause produced a result and no `otherwise`
/// clause was reached.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, thiserror::Error)]
#[error("missing otherwise clause in map")]
pub struct MissingOtherwiseClauseError;

/// Clause-based resolution of a union value.
pub trait Resolve<K> {
	/// Returns the first accepted result, or `default` if no clause produced one.
	fn map_or<R>(&self, default: R, resolve: impl FnOnce(&mut Resolver<K, R>)) -> R;

	/// Returns the accepted or `otherwise` result.
	///
	/// # Errors
	///
	/// [`MissingOtherwiseClauseError`] if the pass ended without a result.
	fn map<R>(
		&self,
		resolve: impl FnOnce(&mut OtherwiseResolver<K, R>),
	) -> Result<R, MissingOtherwiseClauseError>;

	/// Maps to another union of the same registry; the original if nothing fired.
	fn trans(&self, resolve: impl FnOnce(&mut OtherwiseResolver<K, Union<K>>)) -> Union<K>;

	/// Runs clauses for their side effects and returns the original union.
	///
	/// `change` clauses only affect what later clauses of the same pass observe.
	fn alter(&self, resolve: impl FnOnce(&mut OtherwiseResolver<K, ()>)) -> Union<K>;
}

impl<K> Resolve<K> for Union<K> {
	fn map_or<R>(&self, default: R, resolve: impl FnOnce(&mut Resolver<K, R>)) -> R {
		let mut resolver = Resolver::new(self.clone());
		resolve(&mut resolver);
		resolver.state.finish("map_or").unwrap_or(default)
	}

	fn map<R>(
		&self,
		resolve: impl FnOnce(&mut OtherwiseResolver<K, R>),
	) -> Result<R, MissingOtherwiseClauseError> {
		let mut resolver = OtherwiseResolver::new(self.clone());
		resolve(&mut resolver);
		finish_map(resolver)
	}

	fn trans(&self, resolve: impl FnOnce(&mut OtherwiseResolver<K, Union<K>>)) -> Union<K> {
		let mut resolver = OtherwiseResolver::new(self.clone());
		resolve(&mut resolver);
		resolver
			.into_inner()
			.state
			.finish("trans")
			.unwrap_or_else(|| self.clone())
	}

	fn alter(&self, resolve: impl FnOnce(&mut OtherwiseResolver<K, ()>)) -> Union<K> {
		let mut resolver = OtherwiseResolver::new(self.clone());
		resolve(&mut resolver);
		resolver.into_inner().state.finish("alter");
		self.clone()
	}
}

fn finish_map<K, R>(resolver: OtherwiseResolver<K, R>) -> Result<R, MissingOtherwiseClauseError> {
	let state = resolver.into_inner().state;
	let otherwise_seen = state.otherwise_seen();
	state.finish("map").ok_or_else(|| {
		tracing::debug!(otherwise_seen, "map pass ended without a result");
		MissingOtherwiseClauseError
	})
}

/// [`Resolve::map_or`] with an asynchronous resolve block.
pub async fn map_or_async<K, R, F>(union: &Union<K>, default: R, resolve: F) -> R
where
	F: AsyncFnOnce(&mut Resolver<K, R>),
{
	let mut resolver = Resolver::new(union.clone());
	resolve(&mut resolver).await;
	resolver.state.finish("map_or").unwrap_or(default)
}

/// [`Resolve::map`] with an asynchronous resolve block.
///
/// # Errors
///
/// [`MissingOtherwiseClauseError`] if the pass ended without a result.
pub async fn map_async<K, R, F>(union: &Union<K>, resolve: F) -> Result<R, MissingOtherwiseClauseError>
where
	F: AsyncFnOnce(&mut OtherwiseResolver<K, R>),
{
	let mut resolver = OtherwiseResolver::new(union.clone());
	resolve(&mut resolver).await;
	finish_map(resolver)
}

/// [`Resolve::trans`] with an asynchronous resolve block.
pub async fn trans_async<K, F>(union: &Union<K>, resolve: F) -> Union<K>
where
	F: AsyncFnOnce(&mut OtherwiseResolver<K, Union<K>>),
{
	let mut resolver = OtherwiseResolver::new(union.clone());
	resolve(&mut resolver).await;
	resolver
		.into_inner()
		.state
		.finish("trans")
		.unwrap_or_else(|| union.clone())
}

/// [`Resolve::alter`] with an asynchronous resolve block.
pub async fn alter_async<K, F>(union: &Union<K>, resolve: F) -> Union<K>
where
	F: AsyncFnOnce(&mut OtherwiseResolver<K, ()>),
{
	let mut resolver = OtherwiseResolver::new(union.clone());
	resolve(&mut resolver).await;
	resolver.into_inner().state.finish("alter");
	union.clone()
}
