//! Type-erased payloads.
//!
//! Every value tested against a registry travels as a [`Value`]: a shared, immutable
//! handle to some [`Payload`]. Union layers are themselves payloads (a [`RawUnion`]
//! stored inside a [`Value`]), which is what lets the engine peel nested unions down
//! to their terminal payload.

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use crate::repr::{self, RawUnion};

/// Anything that can be stored in a union.
///
/// Implemented for every `'static + Send + Sync + Debug + PartialEq` type. Erased
/// equality is what makes literal cases and union equality work without knowing the
/// concrete type at the call site.
pub trait Payload: Any + Send + Sync + fmt::Debug {
	fn as_any(&self) -> &dyn Any;

	/// Compares against another erased payload. Values of different types are never equal.
	fn eq_payload(&self, other: &dyn Payload) -> bool;

	fn type_name(&self) -> &'static str;
}

impl<V> Payload for V
where
	V: Any + Send + Sync + fmt::Debug + PartialEq,
{
	fn as_any(&self) -> &dyn Any {
		self
	}

	fn eq_payload(&self, other: &dyn Payload) -> bool {
		other
			.as_any()
			.downcast_ref::<V>()
			.is_some_and(|other| self == other)
	}

	fn type_name(&self) -> &'static str {
		std::any::type_name::<V>()
	}
}

/// Shared handle to an erased payload.
///
/// Cloning is an `Arc` bump. A `Value` never directly contains another `Value`, and
/// union handles passed to [`Value::new`] are stored as their erased layer.
#[derive(Clone)]
pub struct Value(Arc<dyn Payload>);

impl Value {
	pub fn new<V: Payload>(value: V) -> Self {
		let any: &dyn Any = &value;
		if let Some(existing) = any.downcast_ref::<Value>() {
			return existing.clone();
		}
		if let Some(layer) = repr::as_wrapper(any) {
			return Self::from_raw(layer);
		}
		Self(Arc::new(value))
	}

	pub(crate) fn from_raw(raw: RawUnion) -> Self {
		Self(Arc::new(raw))
	}

	#[inline]
	pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
		(*self.0).as_any().downcast_ref::<T>()
	}

	#[inline]
	pub fn is<T: Any>(&self) -> bool {
		(*self.0).as_any().is::<T>()
	}

	/// Name of the stored payload's concrete type.
	pub fn type_name(&self) -> &'static str {
		(*self.0).type_name()
	}

	/// Returns the union layer if this value is one.
	#[inline]
	pub fn as_raw_union(&self) -> Option<&RawUnion> {
		self.downcast_ref::<RawUnion>()
	}

	/// Strips every union layer and returns the terminal payload.
	pub fn terminal(&self) -> &Value {
		let mut current = self;
		while let Some(layer) = current.as_raw_union() {
			current = repr::unwrap(layer);
		}
		current
	}

	/// True if both handles point at the same allocation.
	#[inline]
	pub fn ptr_eq(&self, other: &Value) -> bool {
		Arc::ptr_eq(&self.0, &other.0)
	}
}

impl PartialEq for Value {
	fn eq(&self, other: &Self) -> bool {
		self.ptr_eq(other) || (*self.0).eq_payload(&*other.0)
	}
}

impl fmt::Debug for Value {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		fmt::Debug::fmt(&*self.0, f)
	}
}
