//! Receiver-style traversal with a mutable current union.
//!
//! A [`Morph`] derefs to its current union, so every [`UnionExt`](crate::UnionExt)
//! query reads the latest value. The `change_*` methods replace it.

use std::ops::Deref;

use unionkit_cases::{NestedCase, UCase, Union};
use unionkit_optional::Optional;

/// Mutable current-union slot of a morph.
pub struct Morph<K> {
	current: Union<K>,
}

impl<K> Morph<K> {
	pub(crate) fn new(current: Union<K>) -> Self {
		Self { current }
	}

	#[inline]
	pub fn current(&self) -> &Union<K> {
		&self.current
	}

	pub fn set_current(&mut self, union: Union<K>) {
		self.current = union;
	}

	/// A clone of the current union.
	pub fn get(&self) -> Union<K> {
		self.current.clone()
	}

	pub fn into_current(self) -> Union<K> {
		self.current
	}

	/// Replaces the current union if it belongs to `case`.
	pub fn change_when<C: UCase<K>>(&mut self, case: &C, block: impl FnOnce(C::Item) -> Union<K>) -> &mut Self {
		if let Optional::Some(item) = case.unwrap(&self.current) {
			self.current = block(item);
		}
		self
	}

	/// Descends into a nested case with a sub-morph over the child union; the block's
	/// result replaces the current union.
	pub fn change_by_morph<C, N>(&mut self, case: &C, block: impl FnOnce(&mut Morph<N>) -> Union<K>) -> &mut Self
	where
		C: UCase<K, Item = Union<N>>,
	{
		if let Optional::Some(nested) = case.unwrap(&self.current) {
			let mut sub = Morph::new(nested);
			self.current = block(&mut sub);
		}
		self
	}

	/// Descends into a nested case, lets `block` mutate the child's current union, then
	/// wraps the result back under the same case.
	///
	/// If the case refuses the mutated child (a constrained case whose predicate no
	/// longer holds), the current union is left as it was.
	pub fn change_by_morphing_case<C, N>(&mut self, case: &C, block: impl FnOnce(&mut Morph<N>)) -> &mut Self
	where
		C: NestedCase<K, N>,
	{
		if let Optional::Some(nested) = case.unwrap(&self.current) {
			let mut sub = Morph::new(nested);
			block(&mut sub);
			match case.rewrap(sub.into_current()) {
				Optional::Some(union) => self.current = union,
				Optional::None => {
					tracing::trace!(case = case.name(), "morphed child rejected by its case; keeping current");
				}
			}
		}
		self
	}
}

impl<K> Deref for Morph<K> {
	type Target = Union<K>;

	fn deref(&self) -> &Union<K> {
		&self.current
	}
}
