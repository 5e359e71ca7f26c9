//! Case descriptors and their typed handles.
//!
//! # Role
//!
//! A registry stores its cases as erased [`CaseEntry`] objects so that it can walk them
//! in declaration order without knowing their item types. The typed handles returned by
//! registration (`ObjectCase`, `InstanceCase`, `WhenCase`, `CastCase`, `UnionCase`,
//! `UnionWhenCase`) share the same entry and expose the typed side: `cast`, `unwrap`, `wrap`.
//!
//! # Invariants
//!
//! - A plain case stores the terminal payload it was matched against, never its cast.
//! - A nested case stores the child union layer, so one [`Union::unwrap`] yields the
//!   child union and [`Union::unwrap_completely`] yields the terminal payload.

use std::fmt;
use std::sync::Arc;

use unionkit_optional::Optional;

use crate::engine::WrapCache;
use crate::registry::RegistryCore;
use crate::union::Union;
use crate::value::Value;

mod instance;
mod nested;
mod object;

pub(crate) use instance::PlainEntry;
pub use instance::{CastCase, InstanceCase, WhenCase};
pub(crate) use nested::NestedEntry;
pub use nested::{NestedCase, UnionCase, UnionWhenCase};
pub use object::ObjectCase;

/// Which constructor declared a case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CaseKind {
	/// A fixed literal, matched by equality.
	Object,
	/// Any value of a type, or of a custom cast.
	Instance,
	/// An instance narrowed by a predicate.
	InstanceWhen,
	/// Anything a nested match registry accepts.
	Union,
	/// A nested union narrowed by a predicate.
	UnionWhen,
}

impl CaseKind {
	pub const fn as_str(self) -> &'static str {
		match self {
			Self::Object => "ObjectCase",
			Self::Instance => "InstanceCase",
			Self::InstanceWhen => "InstanceWhenCase",
			Self::Union => "UnionCase",
			Self::UnionWhen => "UnionWhenCase",
		}
	}

	#[inline]
	pub const fn is_nested(self) -> bool {
		matches!(self, Self::Union | Self::UnionWhen)
	}
}

impl fmt::Display for CaseKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// Public metadata of one case.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CaseInfo {
	pub(crate) registry: &'static str,
	pub(crate) name: Arc<str>,
	pub(crate) ordinal: usize,
	pub(crate) kind: CaseKind,
}

impl CaseInfo {
	/// Label of the owning registry.
	#[inline]
	pub fn registry(&self) -> &'static str {
		self.registry
	}

	#[inline]
	pub fn name(&self) -> &str {
		&self.name
	}

	/// Declaration index within the owning registry.
	#[inline]
	pub fn ordinal(&self) -> usize {
		self.ordinal
	}

	#[inline]
	pub fn kind(&self) -> CaseKind {
		self.kind
	}
}

impl fmt::Display for CaseInfo {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(
			f,
			"{}.{}(name={}, ordinal={})",
			self.registry, self.kind, self.name, self.ordinal
		)
	}
}

/// Erased view of a case used by the discrimination engine.
pub(crate) trait CaseEntry: Send + Sync {
	fn info(&self) -> &CaseInfo;

	/// Returns the layer this case stores if `terminal` belongs to it.
	fn discriminate(&self, terminal: &Value, cache: &mut WrapCache) -> Option<Value>;

	/// The child registry of a nested case.
	fn nested(&self) -> Option<&Arc<RegistryCore>> {
		None
	}
}

/// Typed access to one case of registry `K`.
pub trait UCase<K>: Send + Sync {
	/// What a successful match hands to the caller.
	type Item;

	fn info(&self) -> &CaseInfo;

	fn name(&self) -> &str {
		self.info().name()
	}

	fn ordinal(&self) -> usize {
		self.info().ordinal()
	}

	/// Tests `value` against this case alone, after stripping union layers.
	///
	/// Declaration order is not consulted: a value may satisfy several cases even
	/// though the registry would wrap it under the first one.
	fn cast(&self, value: &Value) -> Optional<Self::Item>;

	/// Returns the item if `union`'s terminal payload satisfies this case.
	fn unwrap(&self, union: &Union<K>) -> Optional<Self::Item> {
		self.cast(union.unwrap_completely())
	}

	fn matches(&self, union: &Union<K>) -> bool {
		self.unwrap(union).is_some()
	}
}

