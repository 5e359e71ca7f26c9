use std::fmt;
use std::marker::PhantomData;

use crate::repr::{self, RawUnion};
use crate::value::Value;

/// A payload known to belong to one of the cases of registry `K`.
///
/// Obtained from [`MatchCases::wrap`](crate::MatchCases::wrap) or from a case
/// handle's `wrap`. Immutable; cloning shares the underlying payload.
pub struct Union<K> {
	raw: RawUnion,
	_cases: PhantomData<fn() -> K>,
}

impl<K> Union<K> {
	pub(crate) fn from_raw(raw: RawUnion) -> Self {
		Self {
			raw,
			_cases: PhantomData,
		}
	}

	pub(crate) fn wrap_value(value: Value) -> Self {
		Self::from_raw(repr::wrap(value))
	}

	/// Removes this union's own layer. The result may itself be a nested union.
	#[inline]
	pub fn unwrap(&self) -> &Value {
		repr::unwrap(&self.raw)
	}

	/// Strips every nested layer down to the terminal payload.
	#[inline]
	pub fn unwrap_completely(&self) -> &Value {
		repr::unwrap_completely(&self.raw)
	}

	#[inline]
	pub fn as_raw(&self) -> &RawUnion {
		&self.raw
	}

	pub fn into_raw(self) -> RawUnion {
		self.raw
	}

	/// Erases the registry tag, keeping the layer.
	pub fn into_value(self) -> Value {
		Value::from_raw(self.raw)
	}
}

impl<K> Clone for Union<K> {
	fn clone(&self) -> Self {
		Self::from_raw(self.raw.clone())
	}
}

impl<K> PartialEq for Union<K> {
	fn eq(&self, other: &Self) -> bool {
		self.raw == other.raw
	}
}

impl<K> fmt::Debug for Union<K> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_tuple("Union").field(self.unwrap()).finish()
	}
}

impl<K> From<Union<K>> for Value {
	fn from(union: Union<K>) -> Self {
		union.into_value()
	}
}
