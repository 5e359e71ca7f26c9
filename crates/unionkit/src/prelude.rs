//! Prelude for unionkit.
//!
//! Re-exports the registry types, case traits and resolution traits needed to declare
//! a union and work with its values.

pub use unionkit_cases::{
	DiscernCases, MatchCases, NestedCase, Payload, UCase, Union, Value, WrapAs,
};
pub use unionkit_optional::Optional;
pub use unionkit_resolve::{Flow, Resolve, UnionExt};
