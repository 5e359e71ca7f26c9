use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

use unionkit_optional::Optional;

use super::{CaseEntry, CaseInfo, UCase};
use crate::engine::WrapCache;
use crate::union::Union;
use crate::value::{Payload, Value};

pub(crate) type TypeCast<T> = Box<dyn Fn(&Value) -> Optional<T> + Send + Sync>;
pub(crate) type IsCase<T> = Box<dyn Fn(&T) -> bool + Send + Sync>;

/// Shared entry of object and instance cases: a coarse cast plus a fine predicate.
pub(crate) struct PlainEntry<T> {
	info: CaseInfo,
	type_cast: TypeCast<T>,
	is_case: IsCase<T>,
}

impl<T> PlainEntry<T> {
	pub(crate) fn new(info: CaseInfo, type_cast: TypeCast<T>, is_case: IsCase<T>) -> Self {
		Self {
			info,
			type_cast,
			is_case,
		}
	}

	#[inline]
	pub(crate) fn info(&self) -> &CaseInfo {
		&self.info
	}

	pub(crate) fn cast(&self, value: &Value) -> Optional<T> {
		(self.type_cast)(value.terminal()).take_if_some(|item| (self.is_case)(item))
	}

	#[inline]
	pub(crate) fn is_case(&self, item: &T) -> bool {
		(self.is_case)(item)
	}
}

impl<T: Send + Sync + 'static> CaseEntry for PlainEntry<T> {
	fn info(&self) -> &CaseInfo {
		&self.info
	}

	fn discriminate(&self, terminal: &Value, _cache: &mut WrapCache) -> Option<Value> {
		self.cast(terminal).is_some().then(|| terminal.clone())
	}
}

/// Case matching every value of type `T`.
pub struct InstanceCase<K, T> {
	entry: Arc<PlainEntry<T>>,
	_cases: PhantomData<fn() -> K>,
}

impl<K, T> InstanceCase<K, T> {
	pub(crate) fn new(entry: Arc<PlainEntry<T>>) -> Self {
		Self {
			entry,
			_cases: PhantomData,
		}
	}
}

impl<K, T: Payload> InstanceCase<K, T> {
	pub fn wrap(&self, value: T) -> Union<K> {
		Union::wrap_value(Value::new(value))
	}
}

impl<K, T: Send + Sync + 'static> UCase<K> for InstanceCase<K, T> {
	type Item = T;

	fn info(&self) -> &CaseInfo {
		self.entry.info()
	}

	fn cast(&self, value: &Value) -> Optional<T> {
		self.entry.cast(value)
	}
}

/// Instance case narrowed by a predicate over the cast value.
pub struct WhenCase<K, T> {
	entry: Arc<PlainEntry<T>>,
	_cases: PhantomData<fn() -> K>,
}

impl<K, T> WhenCase<K, T> {
	pub(crate) fn new(entry: Arc<PlainEntry<T>>) -> Self {
		Self {
			entry,
			_cases: PhantomData,
		}
	}
}

impl<K, T: Payload> WhenCase<K, T> {
	/// Wraps `value` if the predicate accepts it.
	pub fn wrap(&self, value: T) -> Optional<Union<K>> {
		if !self.entry.is_case(&value) {
			return Optional::None;
		}
		Optional::Some(Union::wrap_value(Value::new(value)))
	}
}

impl<K, T: Send + Sync + 'static> UCase<K> for WhenCase<K, T> {
	type Item = T;

	fn info(&self) -> &CaseInfo {
		self.entry.info()
	}

	fn cast(&self, value: &Value) -> Optional<T> {
		self.entry.cast(value)
	}
}

/// Case recognised by a custom cast from the erased payload.
///
/// The stored payload is whatever the cast accepted, which need not be a `T`, so
/// `wrap` takes the erased value and fails when the cast rejects it. The predicate of
/// an `instance_by_when` registration is part of the cast.
pub struct CastCase<K, T> {
	entry: Arc<PlainEntry<T>>,
	_cases: PhantomData<fn() -> K>,
}

impl<K, T> CastCase<K, T> {
	pub(crate) fn new(entry: Arc<PlainEntry<T>>) -> Self {
		Self {
			entry,
			_cases: PhantomData,
		}
	}
}

impl<K, T: Send + Sync + 'static> CastCase<K, T> {
	/// Wraps the terminal payload of `value` if this case accepts it.
	pub fn wrap_value(&self, value: &Value) -> Optional<Union<K>> {
		let terminal = value.terminal();
		if self.entry.cast(terminal).is_none() {
			return Optional::None;
		}
		Optional::Some(Union::wrap_value(terminal.clone()))
	}

	pub fn wrap<V: Payload>(&self, value: V) -> Optional<Union<K>> {
		self.wrap_value(&Value::new(value))
	}
}

impl<K, T: Send + Sync + 'static> UCase<K> for CastCase<K, T> {
	type Item = T;

	fn info(&self) -> &CaseInfo {
		self.entry.info()
	}

	fn cast(&self, value: &Value) -> Optional<T> {
		self.entry.cast(value)
	}
}

macro_rules! plain_handle_impls {
	($handle:ident) => {
		impl<K, T> Clone for $handle<K, T> {
			fn clone(&self) -> Self {
				Self::new(self.entry.clone())
			}
		}

		impl<K, T> fmt::Debug for $handle<K, T> {
			fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
				f.debug_tuple(stringify!($handle))
					.field(self.entry.info())
					.finish()
			}
		}

		impl<K, T> fmt::Display for $handle<K, T> {
			fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
				fmt::Display::fmt(self.entry.info(), f)
			}
		}
	};
}

plain_handle_impls!(InstanceCase);
plain_handle_impls!(WhenCase);
plain_handle_impls!(CastCase);
