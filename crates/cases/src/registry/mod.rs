//! Case registries.
//!
//! [`UCases`] is the ordered, append-only set of cases of one union type. It comes in
//! two flavours: [`MatchCases`], which can wrap arbitrary values standalone, and
//! [`DiscernCases`], which can only build unions through its case handles. Only match
//! registries may be nested as union cases.

use std::any::TypeId;
use std::fmt;
use std::marker::PhantomData;
use std::ops::Deref;
use std::sync::Arc;

use rustc_hash::FxHashMap;
use unionkit_optional::Optional;

mod store;

pub(crate) use self::store::RegistryCore;
pub use self::store::{Flavor, RegistryId};
use crate::case::{
	CaseInfo, CaseKind, CastCase, InstanceCase, NestedEntry, ObjectCase, PlainEntry, UnionCase,
	UnionWhenCase, WhenCase,
};
use crate::engine::{self, WrapCache};
use crate::error::RegistryError;
use crate::repr;
use crate::union::Union;
use crate::value::{Payload, Value};

/// Ordered set of cases of the union type tagged `K`.
///
/// `K` is usually the type that owns the registry and its case handles. Registration
/// methods take `&self`, so a registry can live in a `static` and be filled in by its
/// initialiser.
pub struct UCases<K> {
	core: Arc<RegistryCore>,
	_cases: PhantomData<fn() -> K>,
}

impl<K: 'static> UCases<K> {
	fn with_flavor(label: &'static str, flavor: Flavor) -> Self {
		repr::register_wrapper_type::<K>();
		Self {
			core: Arc::new(RegistryCore::new(label, flavor)),
			_cases: PhantomData,
		}
	}
}

impl<K> UCases<K> {
	#[inline]
	pub fn label(&self) -> &'static str {
		self.core.label
	}

	#[inline]
	pub fn flavor(&self) -> Flavor {
		self.core.flavor
	}

	#[inline]
	pub fn id(&self) -> RegistryId {
		self.core.id
	}

	pub fn len(&self) -> usize {
		self.core.len()
	}

	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}

	/// Case metadata in declaration order.
	pub fn cases(&self) -> Vec<CaseInfo> {
		self.core
			.snapshot()
			.cases
			.iter()
			.map(|case| case.info().clone())
			.collect()
	}

	pub fn name_to_case(&self) -> FxHashMap<Arc<str>, CaseInfo> {
		self.core
			.snapshot()
			.cases
			.iter()
			.map(|case| {
				let info = case.info();
				(info.name.clone(), info.clone())
			})
			.collect()
	}

	pub fn case_named(&self, name: &str) -> Option<CaseInfo> {
		let snap = self.core.snapshot();
		let index = *snap.by_name.get(name)?;
		Some(snap.cases[index].info().clone())
	}

	/// The case `union` belongs to: the first one accepting its terminal payload.
	pub fn which(&self, union: &Union<K>) -> Optional<CaseInfo> {
		engine::discriminate(
			&self.core,
			union.unwrap_completely(),
			&mut WrapCache::default(),
		)
		.map(|(info, _)| info)
		.into()
	}

	/// Freezes the registry. Later registrations fail with [`RegistryError::Sealed`].
	pub fn seal(&self) {
		self.core.seal();
	}

	pub fn is_sealed(&self) -> bool {
		self.core.is_sealed()
	}

	/// Registers a case holding `literal`.
	pub fn obj<T>(&self, name: &str, literal: T) -> Result<ObjectCase<K, T>, RegistryError>
	where
		T: Payload + Clone + PartialEq,
	{
		self.reject_wrapper_type::<T>(name)?;
		let expected = literal.clone();
		let entry = self.core.register(name, CaseKind::Object, None, |info| {
			PlainEntry::new(
				info,
				Box::new(downcast_cloned::<T>),
				Box::new(move |item: &T| *item == expected),
			)
		})?;
		Ok(ObjectCase::new(entry, literal))
	}

	/// Registers a case matching every value of type `T`.
	///
	/// Union handle types are refused once a registry for them exists. A `Union<L>`
	/// registered before `L`'s registry is created (an unforced `LazyLock`, say) slips
	/// through and is matched as an ordinary payload.
	pub fn instance<T>(&self, name: &str) -> Result<InstanceCase<K, T>, RegistryError>
	where
		T: Payload + Clone,
	{
		self.reject_wrapper_type::<T>(name)?;
		let entry = self.core.register(name, CaseKind::Instance, None, |info| {
			PlainEntry::new(info, Box::new(downcast_cloned::<T>), Box::new(|_: &T| true))
		})?;
		Ok(InstanceCase::new(entry))
	}

	/// Registers an instance case recognised by a custom cast.
	///
	/// Use this where the concrete type alone does not identify the case, for example
	/// a list of one element type stored as a list of erased values.
	pub fn instance_by<T, F>(&self, name: &str, to_type: F) -> Result<CastCase<K, T>, RegistryError>
	where
		T: Send + Sync + 'static,
		F: Fn(&Value) -> Optional<T> + Send + Sync + 'static,
	{
		let entry = self.core.register(name, CaseKind::Instance, None, |info| {
			PlainEntry::new(info, Box::new(to_type), Box::new(|_: &T| true))
		})?;
		Ok(CastCase::new(entry))
	}

	/// Registers an instance case narrowed by `is_case`.
	pub fn instance_when<T, P>(&self, name: &str, is_case: P) -> Result<WhenCase<K, T>, RegistryError>
	where
		T: Payload + Clone,
		P: Fn(&T) -> bool + Send + Sync + 'static,
	{
		self.reject_wrapper_type::<T>(name)?;
		let entry = self.core.register(name, CaseKind::InstanceWhen, None, |info| {
			PlainEntry::new(info, Box::new(downcast_cloned::<T>), Box::new(is_case))
		})?;
		Ok(WhenCase::new(entry))
	}

	/// Registers a case with both a custom cast and a predicate.
	pub fn instance_by_when<T, F, P>(
		&self,
		name: &str,
		to_type: F,
		is_case: P,
	) -> Result<CastCase<K, T>, RegistryError>
	where
		T: Send + Sync + 'static,
		F: Fn(&Value) -> Optional<T> + Send + Sync + 'static,
		P: Fn(&T) -> bool + Send + Sync + 'static,
	{
		let entry = self.core.register(name, CaseKind::InstanceWhen, None, |info| {
			PlainEntry::new(info, Box::new(to_type), Box::new(is_case))
		})?;
		Ok(CastCase::new(entry))
	}

	/// Registers a case matching anything `cases` can wrap.
	pub fn union<C: 'static>(
		&self,
		name: &str,
		cases: &MatchCases<C>,
	) -> Result<UnionCase<K, C>, RegistryError> {
		let child = cases.core.clone();
		let entry = self
			.core
			.register(name, CaseKind::Union, Some(&*cases.core), |info| {
				NestedEntry::new(info, child, None)
			})?;
		Ok(UnionCase::new(entry))
	}

	/// Registers a nested case that also requires `is_case` to accept the child union.
	pub fn union_when<C, P>(
		&self,
		name: &str,
		cases: &MatchCases<C>,
		is_case: P,
	) -> Result<UnionWhenCase<K, C>, RegistryError>
	where
		C: 'static,
		P: Fn(&Union<C>) -> bool + Send + Sync + 'static,
	{
		let child = cases.core.clone();
		let entry = self
			.core
			.register(name, CaseKind::UnionWhen, Some(&*cases.core), |info| {
				NestedEntry::new(info, child, Some(Box::new(is_case)))
			})?;
		Ok(UnionWhenCase::new(entry))
	}

	/// Refuses `Value` and every union handle type known to the wrapper table.
	///
	/// The table is filled as registries are created, so this check depends on
	/// creation order; see [`UCases::instance`].
	fn reject_wrapper_type<T: 'static>(&self, name: &str) -> Result<(), RegistryError> {
		if !repr::is_wrapper_type::<T>() && TypeId::of::<T>() != TypeId::of::<Value>() {
			return Ok(());
		}
		let type_name = std::any::type_name::<T>();
		tracing::debug!(
			registry = self.core.label,
			case = name,
			type_name,
			"rejected case: union type registered as instance"
		);
		Err(RegistryError::InvalidCaseRegistration {
			registry: self.core.label,
			name: name.to_owned(),
			type_name,
		})
	}
}

fn downcast_cloned<T: Clone + 'static>(value: &Value) -> Optional<T> {
	value.downcast_ref::<T>().cloned().into()
}

impl<K> Clone for UCases<K> {
	fn clone(&self) -> Self {
		Self {
			core: self.core.clone(),
			_cases: PhantomData,
		}
	}
}

impl<K> fmt::Debug for UCases<K> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		fmt::Debug::fmt(&*self.core, f)
	}
}

/// Registry that can wrap arbitrary values on its own.
pub struct MatchCases<K>(UCases<K>);

impl<K: 'static> MatchCases<K> {
	pub fn new(label: &'static str) -> Self {
		Self(UCases::with_flavor(label, Flavor::Match))
	}
}

impl<K> MatchCases<K> {
	/// Wraps `value` under the first case accepting it.
	///
	/// Union layers are stripped first, so re-wrapping a union of another registry
	/// tests its terminal payload.
	pub fn wrap<V: Payload>(&self, value: V) -> Optional<Union<K>> {
		self.wrap_value(&Value::new(value))
	}

	pub fn wrap_value(&self, value: &Value) -> Optional<Union<K>> {
		WrapCache::default()
			.resolve(&self.0.core, value.terminal())
			.map(Union::from_raw)
			.into()
	}

	pub fn can_wrap<V: Payload>(&self, value: V) -> bool {
		self.wrap(value).is_some()
	}

	pub fn can_wrap_value(&self, value: &Value) -> bool {
		self.wrap_value(value).is_some()
	}
}

impl<K> Deref for MatchCases<K> {
	type Target = UCases<K>;

	fn deref(&self) -> &UCases<K> {
		&self.0
	}
}

impl<K> Clone for MatchCases<K> {
	fn clone(&self) -> Self {
		Self(self.0.clone())
	}
}

impl<K> fmt::Debug for MatchCases<K> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_tuple("MatchCases").field(&self.0).finish()
	}
}

/// Registry that only distinguishes its own cases.
///
/// It has no standalone `wrap`; unions are built with its case handles. It cannot be
/// nested as a union case because nesting requires a [`MatchCases`].
pub struct DiscernCases<K>(UCases<K>);

impl<K: 'static> DiscernCases<K> {
	pub fn new(label: &'static str) -> Self {
		Self(UCases::with_flavor(label, Flavor::Discern))
	}
}

impl<K> Deref for DiscernCases<K> {
	type Target = UCases<K>;

	fn deref(&self) -> &UCases<K> {
		&self.0
	}
}

impl<K> Clone for DiscernCases<K> {
	fn clone(&self) -> Self {
		Self(self.0.clone())
	}
}

impl<K> fmt::Debug for DiscernCases<K> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_tuple("DiscernCases").field(&self.0).finish()
	}
}

/// Receiver-side spelling of [`MatchCases::wrap`].
pub trait WrapAs: Payload + Sized {
	fn wrap_as<K>(self, cases: &MatchCases<K>) -> Optional<Union<K>> {
		cases.wrap(self)
	}

	fn can_wrap_as<K>(self, cases: &MatchCases<K>) -> bool {
		cases.can_wrap(self)
	}
}

impl<V: Payload> WrapAs for V {}
