//! Runtime-discriminated unions.
//!
//! Depend on this crate rather than the individual `unionkit-*` crates.
//!
//! # Sub-crates
//!
//! - `unionkit-optional` - [`Optional`], the explicit presence type returned by every
//!   fallible lookup
//! - `unionkit-cases` - case registries, union values and the discrimination engine
//! - `unionkit-resolve` - resolution passes, per-case queries and morphs
//!
//! ```ignore
//! use unionkit::prelude::*;
//!
//! struct Animal;
//!
//! let animals = MatchCases::<Animal>::new("Animal");
//! let bird = animals.instance::<Bird>("BIRD")?;
//! let zebra = animals.instance::<Zebra>("ZEBRA")?;
//!
//! let union = animals.wrap(Bird { age: 2 }).get_or_throw()?;
//! let age = union.map(|r| {
//! 	r.accept(&bird, |b| Flow::Value(b.age));
//! 	r.otherwise(|_| 10);
//! })?;
//! ```

pub mod prelude;

pub use unionkit_cases::{
	CaseInfo, CaseKind, CastCase, DiscernCases, Flavor, InstanceCase, MatchCases, NestedCase,
	ObjectCase, Payload, RawUnion, RegistryError, RegistryId, UCase, UCases, Union, UnionCase,
	UnionWhenCase, Value, WhenCase, WrapAs, repr,
};
pub use unionkit_optional::{EmptyOptionalError, Optional};
pub use unionkit_resolve::{
	Flow, MissingOtherwiseClauseError, Morph, OtherwiseResolver, Resolve, Resolver, UnionExt,
	alter_async, map_async, map_or_async, morph_async, trans_async,
};
