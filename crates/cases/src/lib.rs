//! Runtime-discriminated unions: case registries, union values and the engine that
//! decides which case a value belongs to.
//!
//! A registry ([`MatchCases`] or [`DiscernCases`]) is an ordered list of named cases.
//! Each case recognises values with a typed cast plus a predicate. Wrapping a value
//! tries the cases in declaration order and the first one to accept it wins. Cases can
//! nest other match registries, in which case the child's result is memoised for the
//! duration of one wrap.
//!
//! ```ignore
//! struct Shape;
//!
//! let cases = MatchCases::<Shape>::new("Shape");
//! let circle = cases.instance::<Circle>("CIRCLE")?;
//! let unit = cases.obj("UNIT", Square(1))?;
//!
//! let union = cases.wrap(Circle { r: 2.0 }).get_or_throw()?;
//! assert!(circle.matches(&union));
//! ```

mod case;
mod engine;
mod error;
mod registry;
pub mod repr;
mod union;
mod value;

pub use case::{
	CaseInfo, CaseKind, CastCase, InstanceCase, NestedCase, ObjectCase, UCase, UnionCase,
	UnionWhenCase, WhenCase,
};
pub use error::RegistryError;
pub use registry::{DiscernCases, Flavor, MatchCases, RegistryId, UCases, WrapAs};
pub use repr::RawUnion;
pub use union::Union;
pub use value::{Payload, Value};

#[cfg(test)]
mod tests;
