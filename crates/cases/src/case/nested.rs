use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

use unionkit_optional::Optional;

use super::{CaseEntry, CaseInfo, UCase};
use crate::engine::WrapCache;
use crate::registry::RegistryCore;
use crate::union::Union;
use crate::value::Value;

pub(crate) type UnionPredicate<C> = Box<dyn Fn(&Union<C>) -> bool + Send + Sync>;

/// Entry of a case delegating to a child match registry.
pub(crate) struct NestedEntry<C> {
	info: CaseInfo,
	child: Arc<RegistryCore>,
	predicate: Option<UnionPredicate<C>>,
}

impl<C> NestedEntry<C> {
	pub(crate) fn new(
		info: CaseInfo,
		child: Arc<RegistryCore>,
		predicate: Option<UnionPredicate<C>>,
	) -> Self {
		Self {
			info,
			child,
			predicate,
		}
	}

	#[inline]
	pub(crate) fn info(&self) -> &CaseInfo {
		&self.info
	}

	fn accepts(&self, union: &Union<C>) -> bool {
		self.predicate
			.as_ref()
			.is_none_or(|predicate| predicate(union))
	}

	/// Resolves the child through `cache`; the predicate runs on every call, hit or not.
	fn resolve(&self, terminal: &Value, cache: &mut WrapCache) -> Option<Union<C>> {
		let union = Union::from_raw(cache.resolve(&self.child, terminal)?);
		self.accepts(&union).then_some(union)
	}

	pub(crate) fn cast(&self, value: &Value) -> Optional<Union<C>> {
		self.resolve(value.terminal(), &mut WrapCache::default())
			.into()
	}
}

impl<C: 'static> CaseEntry for NestedEntry<C> {
	fn info(&self) -> &CaseInfo {
		&self.info
	}

	fn discriminate(&self, terminal: &Value, cache: &mut WrapCache) -> Option<Value> {
		self.resolve(terminal, cache).map(Union::into_value)
	}

	fn nested(&self) -> Option<&Arc<RegistryCore>> {
		Some(&self.child)
	}
}

/// A nested case that can put a child union back under its parent registry.
pub trait NestedCase<K, C>: UCase<K, Item = Union<C>> {
	/// Wraps `union` under this case, or `None` if the case rejects it.
	fn rewrap(&self, union: Union<C>) -> Optional<Union<K>>;
}

/// Case matching anything the child registry `C` can wrap.
pub struct UnionCase<K, C> {
	entry: Arc<NestedEntry<C>>,
	_cases: PhantomData<fn() -> K>,
}

impl<K, C> UnionCase<K, C> {
	pub(crate) fn new(entry: Arc<NestedEntry<C>>) -> Self {
		Self {
			entry,
			_cases: PhantomData,
		}
	}

	pub fn wrap(&self, union: Union<C>) -> Union<K> {
		Union::wrap_value(union.into_value())
	}
}

impl<K, C: 'static> UCase<K> for UnionCase<K, C> {
	type Item = Union<C>;

	fn info(&self) -> &CaseInfo {
		self.entry.info()
	}

	fn cast(&self, value: &Value) -> Optional<Union<C>> {
		self.entry.cast(value)
	}
}

impl<K, C: 'static> NestedCase<K, C> for UnionCase<K, C> {
	fn rewrap(&self, union: Union<C>) -> Optional<Union<K>> {
		Optional::Some(self.wrap(union))
	}
}

/// Union case narrowed by a predicate over the child union.
pub struct UnionWhenCase<K, C> {
	entry: Arc<NestedEntry<C>>,
	_cases: PhantomData<fn() -> K>,
}

impl<K, C> UnionWhenCase<K, C> {
	pub(crate) fn new(entry: Arc<NestedEntry<C>>) -> Self {
		Self {
			entry,
			_cases: PhantomData,
		}
	}

	/// Wraps `union` if the predicate accepts it.
	pub fn wrap(&self, union: Union<C>) -> Optional<Union<K>> {
		if !self.entry.accepts(&union) {
			return Optional::None;
		}
		Optional::Some(Union::wrap_value(union.into_value()))
	}
}

impl<K, C: 'static> UCase<K> for UnionWhenCase<K, C> {
	type Item = Union<C>;

	fn info(&self) -> &CaseInfo {
		self.entry.info()
	}

	fn cast(&self, value: &Value) -> Optional<Union<C>> {
		self.entry.cast(value)
	}
}

impl<K, C: 'static> NestedCase<K, C> for UnionWhenCase<K, C> {
	fn rewrap(&self, union: Union<C>) -> Optional<Union<K>> {
		self.wrap(union)
	}
}

macro_rules! nested_handle_impls {
	($handle:ident) => {
		impl<K, C> Clone for $handle<K, C> {
			fn clone(&self) -> Self {
				Self::new(self.entry.clone())
			}
		}

		impl<K, C> fmt::Debug for $handle<K, C> {
			fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
				f.debug_struct(stringify!($handle))
					.field("info", self.entry.info())
					.field("nested", &self.entry.child.label)
					.finish()
			}
		}

		impl<K, C> fmt::Display for $handle<K, C> {
			fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
				fmt::Display::fmt(self.entry.info(), f)
			}
		}
	};
}

nested_handle_impls!(UnionCase);
nested_handle_impls!(UnionWhenCase);
