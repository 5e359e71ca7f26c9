//! Discrimination engine.
//!
//! # Role
//!
//! Finds the first case of a registry accepting a terminal payload, descending into
//! nested registries through a per-call [`WrapCache`].
//!
//! # Invariants
//!
//! - Cases are tried strictly in declaration order; the first acceptance wins.
//! - Within one top-level wrap, each registry is discriminated at most once. Only the
//!   child's own result is cached; constrained cases re-check their predicate per use.
//! - A registry re-entered while it is still being evaluated yields no match, so a
//!   cyclic walk terminates.

use rustc_hash::FxHashMap;

use crate::case::CaseInfo;
use crate::registry::{RegistryCore, RegistryId};
use crate::repr::{self, RawUnion};
use crate::value::Value;

enum Slot {
	Pending,
	Done(Option<RawUnion>),
}

/// Memo of registry results for one top-level wrap of one terminal payload.
#[derive(Default)]
pub(crate) struct WrapCache {
	slots: FxHashMap<RegistryId, Slot>,
}

impl WrapCache {
	/// Wraps `terminal` under `core`, reusing an earlier result from this pass.
	pub(crate) fn resolve(&mut self, core: &RegistryCore, terminal: &Value) -> Option<RawUnion> {
		match self.slots.get(&core.id) {
			Some(Slot::Done(hit)) => {
				tracing::trace!(registry = core.label, matched = hit.is_some(), "wrap cache hit");
				return hit.clone();
			}
			Some(Slot::Pending) => {
				tracing::trace!(registry = core.label, "registry re-entered during its own wrap");
				return None;
			}
			None => {}
		}

		self.slots.insert(core.id, Slot::Pending);
		let result = discriminate(core, terminal, self).map(|(_, layer)| repr::wrap(layer));
		self.slots.insert(core.id, Slot::Done(result.clone()));
		result
	}
}

/// Returns the first case of `core` accepting `terminal` and the layer it stores.
pub(crate) fn discriminate(
	core: &RegistryCore,
	terminal: &Value,
	cache: &mut WrapCache,
) -> Option<(CaseInfo, Value)> {
	let snap = core.snapshot();
	for entry in snap.cases.iter() {
		if let Some(layer) = entry.discriminate(terminal, cache) {
			let info = entry.info();
			tracing::trace!(
				registry = core.label,
				case = info.name(),
				ordinal = info.ordinal(),
				payload = terminal.type_name(),
				"case matched"
			);
			return Some((info.clone(), layer));
		}
	}
	None
}
