//! Clause receivers.
//!
//! # Role
//!
//! A [`Resolver`] is handed to the resolve block of a pass. Each clause method tests
//! the pass's current union against one case and, on a match, runs its body and
//! settles the returned [`Flow`].
//!
//! # Invariants
//!
//! - Once the pass is broken, `accept`, `change` and `execute` do nothing.
//! - `otherwise` is not gated by the broken flag: it runs whenever no result has been
//!   recorded, including after a bare `Break`.

use std::ops::{Deref, DerefMut};

use unionkit_cases::{UCase, Union};
use unionkit_optional::Optional;

use crate::flow::Flow;
use crate::state::ResolverState;

/// Clause receiver of a pass producing `R` over a union of registry `K`.
pub struct Resolver<K, R> {
	pub(crate) state: ResolverState<K, R>,
}

impl<K, R> Resolver<K, R> {
	pub(crate) fn new(union: Union<K>) -> Self {
		Self {
			state: ResolverState::new(union),
		}
	}

	/// The union clauses currently test against. `change` clauses replace it.
	#[inline]
	pub fn current(&self) -> &Union<K> {
		&self.state.current
	}

	/// True once a clause has produced the pass's result.
	#[inline]
	pub fn is_resolved(&self) -> bool {
		self.state.has_value()
	}

	#[inline]
	pub fn is_broken(&self) -> bool {
		self.state.is_broken()
	}

	fn matching<C: UCase<K>>(&self, case: &C) -> Optional<C::Item> {
		if self.state.is_broken() {
			return Optional::None;
		}
		case.unwrap(&self.state.current)
	}

	fn matching_literal<C>(&self, case: &C, literal: &C::Item) -> Optional<C::Item>
	where
		C: UCase<K>,
		C::Item: PartialEq,
	{
		self.matching(case).take_if_some(|item| item == literal)
	}

	/// Runs `body` if the current union belongs to `case`. `Flow::Value` becomes the
	/// pass result and ends the pass.
	pub fn accept<C: UCase<K>>(&mut self, case: &C, body: impl FnOnce(C::Item) -> Flow<R>) -> &mut Self {
		if let Optional::Some(item) = self.matching(case) {
			let flow = body(item);
			self.state.settle(flow, ResolverState::accept_and_break);
		}
		self
	}

	/// Like [`accept`](Self::accept), but only for the item equal to `literal`.
	pub fn accept_literal<C>(
		&mut self,
		case: &C,
		literal: &C::Item,
		body: impl FnOnce(C::Item) -> Flow<R>,
	) -> &mut Self
	where
		C: UCase<K>,
		C::Item: PartialEq,
	{
		if let Optional::Some(item) = self.matching_literal(case, literal) {
			let flow = body(item);
			self.state.settle(flow, ResolverState::accept_and_break);
		}
		self
	}

	/// Replaces the current union with the one `body` returns. The pass continues.
	pub fn change<C: UCase<K>>(
		&mut self,
		case: &C,
		body: impl FnOnce(C::Item) -> Flow<Union<K>>,
	) -> &mut Self {
		if let Optional::Some(item) = self.matching(case) {
			let flow = body(item);
			self.state.settle(flow, |state, union| state.current = union);
		}
		self
	}

	pub fn change_literal<C>(
		&mut self,
		case: &C,
		literal: &C::Item,
		body: impl FnOnce(C::Item) -> Flow<Union<K>>,
	) -> &mut Self
	where
		C: UCase<K>,
		C::Item: PartialEq,
	{
		if let Optional::Some(item) = self.matching_literal(case, literal) {
			let flow = body(item);
			self.state.settle(flow, |state, union| state.current = union);
		}
		self
	}

	/// Runs `body` for its side effects. Only `Flow::Break` affects the pass.
	pub fn execute<C, F>(&mut self, case: &C, body: impl FnOnce(C::Item) -> F) -> &mut Self
	where
		C: UCase<K>,
		F: Into<Flow<()>>,
	{
		if let Optional::Some(item) = self.matching(case) {
			let flow = body(item).into();
			self.state.settle(flow, |_, ()| {});
		}
		self
	}

	pub fn execute_literal<C, F>(
		&mut self,
		case: &C,
		literal: &C::Item,
		body: impl FnOnce(C::Item) -> F,
	) -> &mut Self
	where
		C: UCase<K>,
		C::Item: PartialEq,
		F: Into<Flow<()>>,
	{
		if let Optional::Some(item) = self.matching_literal(case, literal) {
			let flow = body(item).into();
			self.state.settle(flow, |_, ()| {});
		}
		self
	}

	/// [`accept`](Self::accept) with an asynchronous body.
	pub async fn accept_async<C, F>(&mut self, case: &C, body: F) -> &mut Self
	where
		C: UCase<K>,
		F: AsyncFnOnce(C::Item) -> Flow<R>,
	{
		if let Optional::Some(item) = self.matching(case) {
			let flow = body(item).await;
			self.state.settle(flow, ResolverState::accept_and_break);
		}
		self
	}

	/// [`change`](Self::change) with an asynchronous body.
	pub async fn change_async<C, F>(&mut self, case: &C, body: F) -> &mut Self
	where
		C: UCase<K>,
		F: AsyncFnOnce(C::Item) -> Flow<Union<K>>,
	{
		if let Optional::Some(item) = self.matching(case) {
			let flow = body(item).await;
			self.state.settle(flow, |state, union| state.current = union);
		}
		self
	}

	/// [`execute`](Self::execute) with an asynchronous body.
	pub async fn execute_async<C, F, T>(&mut self, case: &C, body: F) -> &mut Self
	where
		C: UCase<K>,
		F: AsyncFnOnce(C::Item) -> T,
		T: Into<Flow<()>>,
	{
		if let Optional::Some(item) = self.matching(case) {
			let flow = body(item).await.into();
			self.state.settle(flow, |_, ()| {});
		}
		self
	}
}

/// Resolver of passes that accept an `otherwise` fallback.
pub struct OtherwiseResolver<K, R> {
	inner: Resolver<K, R>,
}

impl<K, R> OtherwiseResolver<K, R> {
	pub(crate) fn new(union: Union<K>) -> Self {
		Self {
			inner: Resolver::new(union),
		}
	}

	pub(crate) fn into_inner(self) -> Resolver<K, R> {
		self.inner
	}

	/// Produces the result from the current union if no clause has produced one yet.
	pub fn otherwise(&mut self, body: impl FnOnce(&Union<K>) -> R) -> &mut Self {
		let state = &mut self.inner.state;
		state.mark_otherwise();
		if !state.has_value() {
			let value = body(&state.current);
			state.accept_and_break(value);
		}
		self
	}

	/// [`otherwise`](Self::otherwise) with an asynchronous body.
	pub async fn otherwise_async<F>(&mut self, body: F) -> &mut Self
	where
		F: AsyncFnOnce(&Union<K>) -> R,
	{
		let state = &mut self.inner.state;
		state.mark_otherwise();
		if !state.has_value() {
			let value = body(&state.current).await;
			state.accept_and_break(value);
		}
		self
	}
}

impl<K, R> Deref for OtherwiseResolver<K, R> {
	type Target = Resolver<K, R>;

	fn deref(&self) -> &Resolver<K, R> {
		&self.inner
	}
}

impl<K, R> DerefMut for OtherwiseResolver<K, R> {
	fn deref_mut(&mut self) -> &mut Resolver<K, R> {
		&mut self.inner
	}
}
