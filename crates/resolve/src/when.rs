//! Per-case queries.
//!
//! Each query tests a union against one case and runs its block only on a match. There
//! is no pass and no break/continue: a query is a plain conditional.

use unionkit_cases::{UCase, Union};
use unionkit_optional::Optional;

use crate::morph::Morph;

/// Per-case queries and morphs on union values.
pub trait UnionExt<K> {
	/// Runs `block` on a borrowed item if the union belongs to `case`.
	fn run_when<C: UCase<K>, R>(&self, case: &C, block: impl FnOnce(&C::Item) -> R) -> Optional<R>;

	/// Runs `block` on the owned item if the union belongs to `case`.
	fn let_when<C: UCase<K>, R>(&self, case: &C, block: impl FnOnce(C::Item) -> R) -> Optional<R>;

	/// Side effect on the owned item; returns `self` for chaining.
	fn also_when<C: UCase<K>>(&self, case: &C, block: impl FnOnce(C::Item)) -> &Self;

	/// Side effect on a borrowed item; returns `self` for chaining.
	fn apply_when<C: UCase<K>>(&self, case: &C, block: impl FnOnce(&C::Item)) -> &Self;

	/// The item, if the union belongs to `case` and `predicate` holds.
	fn take_if_when<C: UCase<K>>(
		&self,
		case: &C,
		predicate: impl FnOnce(&C::Item) -> bool,
	) -> Optional<C::Item>;

	/// The item, if the union belongs to `case` and `predicate` does not hold.
	fn take_unless_when<C: UCase<K>>(
		&self,
		case: &C,
		predicate: impl FnOnce(&C::Item) -> bool,
	) -> Optional<C::Item>;

	/// Runs `block` with a mutable current-union slot and returns its result.
	fn morph<R>(&self, block: impl FnOnce(&mut Morph<K>) -> R) -> R;

	/// Runs `block` for its effect on the current slot and returns the final union.
	fn morph_self(&self, block: impl FnOnce(&mut Morph<K>)) -> Union<K>;
}

impl<K> UnionExt<K> for Union<K> {
	fn run_when<C: UCase<K>, R>(&self, case: &C, block: impl FnOnce(&C::Item) -> R) -> Optional<R> {
		case.unwrap(self).run_some(block)
	}

	fn let_when<C: UCase<K>, R>(&self, case: &C, block: impl FnOnce(C::Item) -> R) -> Optional<R> {
		case.unwrap(self).let_some(block)
	}

	fn also_when<C: UCase<K>>(&self, case: &C, block: impl FnOnce(C::Item)) -> &Self {
		if let Optional::Some(item) = case.unwrap(self) {
			block(item);
		}
		self
	}

	fn apply_when<C: UCase<K>>(&self, case: &C, block: impl FnOnce(&C::Item)) -> &Self {
		if let Optional::Some(item) = case.unwrap(self) {
			block(&item);
		}
		self
	}

	fn take_if_when<C: UCase<K>>(
		&self,
		case: &C,
		predicate: impl FnOnce(&C::Item) -> bool,
	) -> Optional<C::Item> {
		case.unwrap(self).take_if_some(predicate)
	}

	fn take_unless_when<C: UCase<K>>(
		&self,
		case: &C,
		predicate: impl FnOnce(&C::Item) -> bool,
	) -> Optional<C::Item> {
		case.unwrap(self).take_unless_some(predicate)
	}

	fn morph<R>(&self, block: impl FnOnce(&mut Morph<K>) -> R) -> R {
		let mut morph = Morph::new(self.clone());
		block(&mut morph)
	}

	fn morph_self(&self, block: impl FnOnce(&mut Morph<K>)) -> Union<K> {
		let mut morph = Morph::new(self.clone());
		block(&mut morph);
		morph.into_current()
	}
}

/// [`UnionExt::morph`] with an asynchronous block.
pub async fn morph_async<K, R, F>(union: &Union<K>, block: F) -> R
where
	F: AsyncFnOnce(&mut Morph<K>) -> R,
{
	let mut morph = Morph::new(union.clone());
	block(&mut morph).await
}
