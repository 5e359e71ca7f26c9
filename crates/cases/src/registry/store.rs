//! Shared registry state with snapshot publication.
//!
//! # Role
//!
//! Readers load an immutable [`Snapshot`] without locking. Registration serialises on
//! a writer mutex, validates the new case against the current snapshot, then publishes
//! an extended copy.
//!
//! # Invariants
//!
//! - `cases[i].info().ordinal() == i` and `by_name` agrees with `cases`.
//! - No registry reaches itself through nested union cases.
//! - Once sealed, a registry never publishes another snapshot.

use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use arc_swap::ArcSwap;
use parking_lot::Mutex;
use rustc_hash::{FxHashMap, FxHashSet};

use crate::case::{CaseEntry, CaseInfo, CaseKind};
use crate::error::RegistryError;

/// Process-unique registry identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RegistryId(u64);

impl RegistryId {
	fn next() -> Self {
		static NEXT: AtomicU64 = AtomicU64::new(0);
		Self(NEXT.fetch_add(1, Ordering::Relaxed))
	}
}

/// Matching discipline of a registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Flavor {
	/// Total over every value; usable standalone and as a nested case.
	Match,
	/// Only distinguishes its own cases; never wrapped standalone.
	Discern,
}

impl fmt::Display for Flavor {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(match self {
			Self::Match => "match",
			Self::Discern => "discern",
		})
	}
}

#[derive(Clone, Default)]
pub(crate) struct Snapshot {
	pub(crate) cases: Vec<Arc<dyn CaseEntry>>,
	pub(crate) by_name: FxHashMap<Arc<str>, usize>,
}

impl Snapshot {
	#[cfg(any(debug_assertions, feature = "registry-contracts"))]
	fn assert_consistent(&self, label: &str) {
		assert_eq!(
			self.by_name.len(),
			self.cases.len(),
			"{label}: name map and case list disagree"
		);
		for (index, case) in self.cases.iter().enumerate() {
			let info = case.info();
			assert_eq!(info.ordinal(), index, "{label}: ordinal drift on {}", info.name());
			assert_eq!(
				self.by_name.get(info.name()),
				Some(&index),
				"{label}: name map out of date for {}",
				info.name()
			);
		}
	}
}

pub(crate) struct RegistryCore {
	pub(crate) id: RegistryId,
	pub(crate) label: &'static str,
	pub(crate) flavor: Flavor,
	snap: ArcSwap<Snapshot>,
	write: Mutex<()>,
	sealed: AtomicBool,
}

impl RegistryCore {
	pub(crate) fn new(label: &'static str, flavor: Flavor) -> Self {
		let core = Self {
			id: RegistryId::next(),
			label,
			flavor,
			snap: ArcSwap::from_pointee(Snapshot::default()),
			write: Mutex::new(()),
			sealed: AtomicBool::new(false),
		};
		tracing::debug!(registry = label, %flavor, id = core.id.0, "created registry");
		core
	}

	#[inline]
	pub(crate) fn snapshot(&self) -> Arc<Snapshot> {
		self.snap.load_full()
	}

	pub(crate) fn len(&self) -> usize {
		self.snap.load().cases.len()
	}

	pub(crate) fn seal(&self) {
		let _guard = self.write.lock();
		if !self.sealed.swap(true, Ordering::AcqRel) {
			tracing::debug!(registry = self.label, cases = self.len(), "sealed registry");
		}
	}

	#[inline]
	pub(crate) fn is_sealed(&self) -> bool {
		self.sealed.load(Ordering::Acquire)
	}

	/// Appends a case built by `make` and publishes the extended snapshot.
	///
	/// `nested` is the child registry of a union case; it is checked for recursion
	/// before anything is published.
	pub(crate) fn register<E>(
		&self,
		name: &str,
		kind: CaseKind,
		nested: Option<&RegistryCore>,
		make: impl FnOnce(CaseInfo) -> E,
	) -> Result<Arc<E>, RegistryError>
	where
		E: CaseEntry + 'static,
	{
		let _guard = self.write.lock();

		if self.is_sealed() {
			tracing::debug!(registry = self.label, case = name, "rejected case: registry sealed");
			return Err(RegistryError::Sealed {
				registry: self.label,
				name: name.to_owned(),
			});
		}

		let old = self.snapshot();
		if old.by_name.contains_key(name) {
			tracing::debug!(registry = self.label, case = name, "rejected case: duplicate name");
			return Err(RegistryError::DuplicateCaseName {
				registry: self.label,
				name: name.to_owned(),
			});
		}

		if let Some(child) = nested
			&& reaches(child, self.id, &mut FxHashSet::default())
		{
			tracing::debug!(
				registry = self.label,
				case = name,
				nested = child.label,
				"rejected case: recursive union"
			);
			return Err(RegistryError::RecursiveUnionDefinition {
				registry: self.label,
				name: name.to_owned(),
				nested: child.label,
			});
		}

		let info = CaseInfo {
			registry: self.label,
			name: Arc::from(name),
			ordinal: old.cases.len(),
			kind,
		};
		let entry = Arc::new(make(info.clone()));

		let mut next = Snapshot::clone(&old);
		next.by_name.insert(info.name.clone(), info.ordinal);
		next.cases.push(entry.clone() as Arc<dyn CaseEntry>);

		#[cfg(any(debug_assertions, feature = "registry-contracts"))]
		next.assert_consistent(self.label);

		self.snap.store(Arc::new(next));
		tracing::debug!(
			registry = self.label,
			case = name,
			ordinal = info.ordinal,
			%kind,
			"registered case"
		);
		Ok(entry)
	}
}

/// True if `target` is `node` or is nested anywhere below it.
fn reaches(node: &RegistryCore, target: RegistryId, visited: &mut FxHashSet<RegistryId>) -> bool {
	if node.id == target {
		return true;
	}
	if !visited.insert(node.id) {
		return false;
	}
	let snap = node.snapshot();
	snap.cases
		.iter()
		.filter_map(|case| case.nested())
		.any(|child| reaches(child, target, visited))
}

impl fmt::Debug for RegistryCore {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("RegistryCore")
			.field("id", &self.id)
			.field("label", &self.label)
			.field("flavor", &self.flavor)
			.field("len", &self.len())
			.field("sealed", &self.is_sealed())
			.finish()
	}
}
