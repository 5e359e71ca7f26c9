//! Physical representation of union layers.
//!
//! # Role
//!
//! A union layer is a tagged cell around one [`Value`]. The rest of the crate only
//! touches layers through four primitives: [`wrap`], [`unwrap`], [`unwrap_completely`]
//! and [`is_wrapper_type`].
//!
//! # Invariants
//!
//! - Every `Union<K>` type whose registry has been created is present in the wrapper
//!   table, so [`Value::new`] stores it as a layer instead of an opaque payload.

use std::any::{Any, TypeId};
use std::sync::LazyLock;

use parking_lot::RwLock;
use rustc_hash::FxHashMap;

use crate::union::Union;
use crate::value::Value;

/// One erased union layer.
#[derive(Clone, Debug, PartialEq)]
pub struct RawUnion {
	value: Value,
}

/// Puts `value` behind one union layer.
#[inline]
pub fn wrap(value: Value) -> RawUnion {
	RawUnion { value }
}

/// Removes exactly one layer.
#[inline]
pub fn unwrap(raw: &RawUnion) -> &Value {
	&raw.value
}

/// Removes every layer down to the first non-union payload.
#[inline]
pub fn unwrap_completely(raw: &RawUnion) -> &Value {
	raw.value.terminal()
}

/// True if `T` is a union handle type (or the erased layer itself).
pub fn is_wrapper_type<T: Any>() -> bool {
	let id = TypeId::of::<T>();
	id == TypeId::of::<RawUnion>() || WRAPPER_TYPES.read().contains_key(&id)
}

type Extractor = fn(&dyn Any) -> Option<RawUnion>;

static WRAPPER_TYPES: LazyLock<RwLock<FxHashMap<TypeId, Extractor>>> =
	LazyLock::new(|| RwLock::new(FxHashMap::default()));

/// Records `Union<K>` as a wrapper type. Idempotent.
pub(crate) fn register_wrapper_type<K: 'static>() {
	WRAPPER_TYPES
		.write()
		.entry(TypeId::of::<Union<K>>())
		.or_insert(extract_layer::<K>);
}

fn extract_layer<K: 'static>(any: &dyn Any) -> Option<RawUnion> {
	any.downcast_ref::<Union<K>>()
		.map(|union| union.as_raw().clone())
}

/// Returns the layer carried by `any` if it is a known wrapper type.
pub(crate) fn as_wrapper(any: &dyn Any) -> Option<RawUnion> {
	if let Some(raw) = any.downcast_ref::<RawUnion>() {
		return Some(raw.clone());
	}
	let extract = *WRAPPER_TYPES.read().get(&any.type_id())?;
	extract(any)
}
