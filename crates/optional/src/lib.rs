//! Two-variant optional used as the result of speculative case matches.
//!
//! [`Optional`] mirrors [`Option`] but carries the small combinator vocabulary the
//! union crates are written against (`run_some`, `take_if_some`, ...). Conversions
//! to and from [`Option`] are free, so callers can switch to the standard library
//! combinators whenever that reads better.

use thiserror::Error;

/// Raised by [`Optional::get_or_throw`] on [`Optional::None`].
#[derive(Debug, Error, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[error("no value present")]
pub struct EmptyOptionalError;

/// A value that is either present ([`Optional::Some`]) or absent ([`Optional::None`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Optional<T> {
	/// A present value.
	Some(T),
	/// No value.
	None,
}

impl<T> Default for Optional<T> {
	fn default() -> Self {
		Self::None
	}
}

impl<T> Optional<T> {
	/// Returns the value, or [`EmptyOptionalError`] when empty.
	pub fn get_or_throw(self) -> Result<T, EmptyOptionalError> {
		match self {
			Self::Some(value) => Ok(value),
			Self::None => Err(EmptyOptionalError),
		}
	}

	/// Converts into the standard library [`Option`].
	#[inline]
	pub fn to_nullable(self) -> Option<T> {
		match self {
			Self::Some(value) => Some(value),
			Self::None => None,
		}
	}

	#[inline]
	pub fn is_some(&self) -> bool {
		matches!(self, Self::Some(_))
	}

	#[inline]
	pub fn is_none(&self) -> bool {
		!self.is_some()
	}

	/// Borrows the contained value.
	pub fn as_ref(&self) -> Optional<&T> {
		match self {
			Self::Some(value) => Optional::Some(value),
			Self::None => Optional::None,
		}
	}

	/// Returns the value, or the result of `default` when empty.
	pub fn or_else(self, default: impl FnOnce() -> T) -> T {
		match self {
			Self::Some(value) => value,
			Self::None => default(),
		}
	}

	/// Maps the value by reference, leaving `self` untouched.
	pub fn run_some<R>(&self, block: impl FnOnce(&T) -> R) -> Optional<R> {
		match self {
			Self::Some(value) => Optional::Some(block(value)),
			Self::None => Optional::None,
		}
	}

	/// Maps the value by move.
	pub fn let_some<R>(self, block: impl FnOnce(T) -> R) -> Optional<R> {
		match self {
			Self::Some(value) => Optional::Some(block(value)),
			Self::None => Optional::None,
		}
	}

	/// Chains another fallible step.
	pub fn flat_map<R>(self, block: impl FnOnce(T) -> Optional<R>) -> Optional<R> {
		match self {
			Self::Some(value) => block(value),
			Self::None => Optional::None,
		}
	}

	/// Runs `block` on the value for its side effects.
	pub fn also_some(self, block: impl FnOnce(&T)) -> Self {
		if let Self::Some(value) = &self {
			block(value);
		}
		self
	}

	/// Runs `block` with mutable access to the value.
	pub fn apply_some(mut self, block: impl FnOnce(&mut T)) -> Self {
		if let Self::Some(value) = &mut self {
			block(value);
		}
		self
	}

	/// Keeps the value only if `predicate` holds.
	pub fn take_if_some(self, predicate: impl FnOnce(&T) -> bool) -> Self {
		match self {
			Self::Some(value) if predicate(&value) => Self::Some(value),
			_ => Self::None,
		}
	}

	/// Keeps the value only if `predicate` does not hold.
	pub fn take_unless_some(self, predicate: impl FnOnce(&T) -> bool) -> Self {
		match self {
			Self::Some(value) if !predicate(&value) => Self::Some(value),
			_ => Self::None,
		}
	}
}

impl<T> Optional<Optional<T>> {
	/// Collapses one level of nesting.
	pub fn flatten(self) -> Optional<T> {
		match self {
			Self::Some(inner) => inner,
			Self::None => Optional::None,
		}
	}
}

impl<T> From<Option<T>> for Optional<T> {
	fn from(value: Option<T>) -> Self {
		match value {
			Some(value) => Self::Some(value),
			None => Self::None,
		}
	}
}

impl<T> From<Optional<T>> for Option<T> {
	fn from(value: Optional<T>) -> Self {
		value.to_nullable()
	}
}

impl<T> IntoIterator for Optional<T> {
	type Item = T;
	type IntoIter = std::option::IntoIter<T>;

	fn into_iter(self) -> Self::IntoIter {
		self.to_nullable().into_iter()
	}
}
