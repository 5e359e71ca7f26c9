//! Resolution over union values.
//!
//! Two styles share the case handles of `unionkit-cases`:
//!
//! - **Passes** ([`Resolve`]): a resolve block declares clauses in order. `accept`
//!   produces the result, `change` swaps the union later clauses see, `execute` runs side
//!   effects and `otherwise` is the fallback. Clause bodies return a [`Flow`] that can
//!   skip the clause or end the pass.
//! - **Queries and morphs** ([`UnionExt`]): one-case conditionals, plus a mutable
//!   current-union slot ([`Morph`]) that can descend into nested cases.
//!
//! Every pass owns its state; nested passes never observe each other's signals.

mod flow;
mod morph;
mod pass;
mod resolver;
mod state;
mod when;

pub use flow::Flow;
pub use morph::Morph;
pub use pass::{MissingOtherwiseClauseError, Resolve, alter_async, map_async, map_or_async, trans_async};
pub use resolver::{OtherwiseResolver, Resolver};
pub use when::{UnionExt, morph_async};
