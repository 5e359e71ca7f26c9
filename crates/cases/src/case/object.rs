use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

use unionkit_optional::Optional;

use super::{CaseInfo, PlainEntry, UCase};
use crate::union::Union;
use crate::value::{Payload, Value};

/// Case holding one fixed literal. Matches values equal to it.
pub struct ObjectCase<K, T> {
	entry: Arc<PlainEntry<T>>,
	literal: T,
	_cases: PhantomData<fn() -> K>,
}

impl<K, T> ObjectCase<K, T> {
	pub(crate) fn new(entry: Arc<PlainEntry<T>>, literal: T) -> Self {
		Self {
			entry,
			literal,
			_cases: PhantomData,
		}
	}

	#[inline]
	pub fn literal(&self) -> &T {
		&self.literal
	}
}

impl<K, T: Payload + Clone> ObjectCase<K, T> {
	/// The union holding this case's literal.
	pub fn wrap(&self) -> Union<K> {
		Union::wrap_value(Value::new(self.literal.clone()))
	}
}

impl<K, T: Send + Sync + 'static> UCase<K> for ObjectCase<K, T> {
	type Item = T;

	fn info(&self) -> &CaseInfo {
		self.entry.info()
	}

	fn cast(&self, value: &Value) -> Optional<T> {
		self.entry.cast(value)
	}
}

impl<K, T: Clone> Clone for ObjectCase<K, T> {
	fn clone(&self) -> Self {
		Self::new(self.entry.clone(), self.literal.clone())
	}
}

impl<K, T: fmt::Debug> fmt::Debug for ObjectCase<K, T> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("ObjectCase")
			.field("info", self.entry.info())
			.field("literal", &self.literal)
			.finish()
	}
}

impl<K, T> fmt::Display for ObjectCase<K, T> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		fmt::Display::fmt(self.entry.info(), f)
	}
}
