use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, LazyLock};

use pretty_assertions::assert_eq;
use proptest::prelude::*;
use unionkit_optional::Optional;

use crate::*;

#[derive(Debug, Clone, PartialEq)]
struct Bird {
	name: &'static str,
	age: u32,
}

#[derive(Debug, Clone, PartialEq)]
struct Zebra {
	name: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Cat;

fn case_name<K>(cases: &UCases<K>, union: &Union<K>) -> Option<String> {
	cases.which(union).to_nullable().map(|info| info.name().to_owned())
}

#[test]
fn ordinals_follow_declaration_order() {
	struct Zoo;
	let cases = MatchCases::<Zoo>::new("Zoo");
	let bird = cases.instance::<Bird>("BIRD").unwrap();
	let zebra = cases.instance_when("ZEBRA", |z: &Zebra| !z.name.is_empty()).unwrap();
	let cat = cases.obj("CAT", Cat).unwrap();

	assert_eq!(bird.ordinal(), 0);
	assert_eq!(zebra.ordinal(), 1);
	assert_eq!(cat.ordinal(), 2);
	assert_eq!(cases.len(), 3);

	let rendered: Vec<String> = cases.cases().iter().map(ToString::to_string).collect();
	assert_eq!(
		rendered,
		vec![
			"Zoo.InstanceCase(name=BIRD, ordinal=0)",
			"Zoo.InstanceWhenCase(name=ZEBRA, ordinal=1)",
			"Zoo.ObjectCase(name=CAT, ordinal=2)",
		]
	);
	assert_eq!(cat.to_string(), "Zoo.ObjectCase(name=CAT, ordinal=2)");

	let by_name = cases.name_to_case();
	assert_eq!(by_name.len(), 3);
	assert_eq!(by_name["ZEBRA"].kind(), CaseKind::InstanceWhen);
	assert_eq!(cases.case_named("BIRD").map(|info| info.ordinal()), Some(0));
	assert_eq!(cases.case_named("EMU"), None);
}

#[test]
fn duplicate_case_name_is_rejected() {
	struct Zoo;
	let cases = MatchCases::<Zoo>::new("Zoo");
	cases.instance::<Bird>("BIRD").unwrap();

	let err = cases.instance::<Zebra>("BIRD").unwrap_err();
	assert_eq!(
		err,
		RegistryError::DuplicateCaseName {
			registry: "Zoo",
			name: "BIRD".to_owned(),
		}
	);
	assert_eq!(cases.len(), 1);
}

#[test]
fn first_declared_match_wins() {
	struct Aviary;
	let cases = MatchCases::<Aviary>::new("Aviary");
	let chick = cases.instance_when("CHICK", |b: &Bird| b.age < 1).unwrap();
	let bird = cases.instance::<Bird>("BIRD").unwrap();

	let young = cases.wrap(Bird { name: "Pip", age: 0 }).get_or_throw().unwrap();
	let old = cases.wrap(Bird { name: "Rex", age: 4 }).get_or_throw().unwrap();

	assert_eq!(case_name(&cases, &young).as_deref(), Some("CHICK"));
	assert_eq!(case_name(&cases, &old).as_deref(), Some("BIRD"));

	// A case matches on its own terms even when an earlier case would win the wrap.
	assert!(bird.matches(&young));
	assert!(!chick.matches(&old));
}

#[test]
fn unmatched_value_is_none() {
	struct Zoo;
	let cases = MatchCases::<Zoo>::new("Zoo");
	cases.instance::<Bird>("BIRD").unwrap();

	assert!(cases.wrap(42u8).is_none());
	assert!(!cases.can_wrap("bird"));
	assert!(cases.can_wrap(Bird { name: "Tweety", age: 2 }));
}

#[test]
fn plain_cases_round_trip() {
	struct Zoo;
	let cases = MatchCases::<Zoo>::new("Zoo");
	let bird = cases.instance::<Bird>("BIRD").unwrap();
	let zebra = cases.instance::<Zebra>("ZEBRA").unwrap();

	let tweety = Bird { name: "Tweety", age: 2 };
	let union = cases.wrap(tweety.clone()).get_or_throw().unwrap();
	assert_eq!(bird.unwrap(&union), Optional::Some(tweety.clone()));
	assert_eq!(zebra.unwrap(&union), Optional::None);
	assert_eq!(union, bird.wrap(tweety));
}

#[test]
fn object_case_matches_by_equality() {
	struct Palette;
	let cases = MatchCases::<Palette>::new("Palette");
	let red = cases.obj("RED", "red").unwrap();
	let green = cases.obj("GREEN", "green").unwrap();

	assert_eq!(cases.wrap("red").get_or_throw().unwrap(), red.wrap());
	assert!(green.matches(&green.wrap()));
	assert!(!red.matches(&green.wrap()));
	assert!(cases.wrap("mauve").is_none());
	assert_eq!(red.literal(), &"red");
}

#[test]
fn when_case_wrap_respects_predicate() {
	struct Ages;
	let cases = MatchCases::<Ages>::new("Ages");
	let adult = cases.instance_when("ADULT", |age: &u32| *age >= 18).unwrap();

	assert!(adult.wrap(30).is_some());
	assert!(adult.wrap(12).is_none());
}

struct Number;
struct Color;

struct Numbers {
	cases: MatchCases<Number>,
	int: InstanceCase<Number, i32>,
	long: InstanceCase<Number, i64>,
}

static NUMBERS: LazyLock<Numbers> = LazyLock::new(|| {
	let cases = MatchCases::new("Number");
	let int = cases.instance("INT").unwrap();
	let long = cases.instance("LONG").unwrap();
	Numbers { cases, int, long }
});

#[test]
fn nested_union_keeps_one_layer_per_registry() {
	let colors = MatchCases::<Color>::new("Color");
	let number = colors.union("NUMBER", &NUMBERS.cases).unwrap();
	let red = colors.obj("RED", "red").unwrap();

	let five = colors.wrap(5i32).get_or_throw().unwrap();
	assert_eq!(case_name(&colors, &five).as_deref(), Some("NUMBER"));
	assert!(five.unwrap().as_raw_union().is_some());
	assert_eq!(five.unwrap_completely(), &Value::new(5i32));

	let inner = number.unwrap(&five).get_or_throw().unwrap();
	assert_eq!(inner, NUMBERS.int.wrap(5));
	assert_eq!(NUMBERS.int.unwrap(&inner), Optional::Some(5));
	assert!(!NUMBERS.long.matches(&inner));
	assert!(!red.matches(&five));

	// Re-wrapping a union of the child strips it down to the terminal payload first.
	let rewrapped = colors.wrap(NUMBERS.int.wrap(5)).get_or_throw().unwrap();
	assert_eq!(rewrapped, five);
	assert_eq!(number.wrap(NUMBERS.int.wrap(5)), five);
}

#[test]
fn union_case_rejects_what_the_child_rejects() {
	struct Tagged;
	let tagged = MatchCases::<Tagged>::new("Tagged");
	let positive = tagged
		.union_when("POSITIVE", &NUMBERS.cases, |n: &Union<Number>| {
			NUMBERS.int.unwrap(n).take_if_some(|v| *v > 0).is_some()
		})
		.unwrap();

	assert!(tagged.wrap(3i32).is_some());
	assert!(tagged.wrap(-3i32).is_none());
	assert!(tagged.wrap("three").is_none());
	assert!(positive.wrap(NUMBERS.int.wrap(-1)).is_none());
	assert!(positive.rewrap(NUMBERS.int.wrap(1)).is_some());
}

#[test]
fn registry_cannot_nest_itself() {
	struct Loop;
	let cases = MatchCases::<Loop>::new("Loop");
	let err = cases.union("SELF", &cases).unwrap_err();
	assert_eq!(
		err,
		RegistryError::RecursiveUnionDefinition {
			registry: "Loop",
			name: "SELF".to_owned(),
			nested: "Loop",
		}
	);
	assert!(cases.is_empty());
}

#[test]
fn mutual_and_transitive_nesting_is_rejected() {
	struct A;
	struct B;
	struct C;
	let a = MatchCases::<A>::new("A");
	let b = MatchCases::<B>::new("B");
	let c = MatchCases::<C>::new("C");

	a.union("B", &b).unwrap();
	assert!(matches!(
		b.union("A", &a),
		Err(RegistryError::RecursiveUnionDefinition { registry: "B", .. })
	));

	b.union("C", &c).unwrap();
	assert!(matches!(
		c.union_when("A", &a, |_| true),
		Err(RegistryError::RecursiveUnionDefinition { registry: "C", nested: "A", .. })
	));
}

#[test]
fn diamond_nesting_is_allowed() {
	struct Top;
	struct Left;
	struct Right;
	struct Shared;
	let shared = MatchCases::<Shared>::new("Shared");
	shared.instance::<i32>("INT").unwrap();
	let left = MatchCases::<Left>::new("Left");
	left.union("SHARED", &shared).unwrap();
	let right = MatchCases::<Right>::new("Right");
	right.union("SHARED", &shared).unwrap();
	let top = MatchCases::<Top>::new("Top");
	top.union("LEFT", &left).unwrap();
	top.union("RIGHT", &right).unwrap();

	let union = top.wrap(7i32).get_or_throw().unwrap();
	assert_eq!(case_name(&top, &union).as_deref(), Some("LEFT"));
}

#[test]
fn union_types_cannot_be_plain_instances() {
	struct Inner;
	struct Outer;
	let _inner = MatchCases::<Inner>::new("Inner");
	let outer = MatchCases::<Outer>::new("Outer");

	assert!(repr::is_wrapper_type::<Union<Inner>>());
	assert!(repr::is_wrapper_type::<RawUnion>());
	assert!(!repr::is_wrapper_type::<i32>());

	let err = outer.instance::<Union<Inner>>("INNER").unwrap_err();
	assert!(matches!(err, RegistryError::InvalidCaseRegistration { registry: "Outer", .. }));
	assert!(matches!(
		outer.instance::<Value>("ANY"),
		Err(RegistryError::InvalidCaseRegistration { .. })
	));
	assert!(outer.is_empty());
}

#[test]
fn wrapper_types_are_known_once_their_registry_exists() {
	struct Later;
	struct Early;
	let early = MatchCases::<Early>::new("Early");

	assert!(!repr::is_wrapper_type::<Union<Later>>());
	assert!(early.instance::<Union<Later>>("BEFORE").is_ok());

	let _later = MatchCases::<Later>::new("Later");
	assert!(repr::is_wrapper_type::<Union<Later>>());
	assert!(matches!(
		early.instance::<Union<Later>>("AFTER"),
		Err(RegistryError::InvalidCaseRegistration { .. })
	));
}

#[test]
fn sealed_registry_refuses_new_cases() {
	struct Frozen;
	let cases = MatchCases::<Frozen>::new("Frozen");
	cases.instance::<i32>("INT").unwrap();
	cases.seal();

	assert!(cases.is_sealed());
	assert_eq!(
		cases.instance::<i64>("LONG").unwrap_err(),
		RegistryError::Sealed {
			registry: "Frozen",
			name: "LONG".to_owned(),
		}
	);
	assert!(cases.can_wrap(1i32));
}

#[test]
fn concurrent_registration_loses_no_case() {
	struct Crowd;
	let cases = MatchCases::<Crowd>::new("Crowd");
	let shared_wins = AtomicUsize::new(0);

	std::thread::scope(|scope| {
		for thread in 0..8 {
			let cases = &cases;
			let shared_wins = &shared_wins;
			scope.spawn(move || {
				for i in 0..16 {
					cases.instance::<i32>(&format!("T{thread}_{i}")).unwrap();
				}
				if cases.instance::<i32>("SHARED").is_ok() {
					shared_wins.fetch_add(1, Ordering::SeqCst);
				}
			});
		}
	});

	assert_eq!(shared_wins.load(Ordering::SeqCst), 1);
	assert_eq!(cases.len(), 8 * 16 + 1);
	let ordinals: Vec<usize> = cases.cases().iter().map(CaseInfo::ordinal).collect();
	assert_eq!(ordinals, (0..cases.len()).collect::<Vec<_>>());

	let by_name = cases.name_to_case();
	assert_eq!(by_name.len(), cases.len());
	for thread in 0..8 {
		for i in 0..16 {
			assert!(by_name.contains_key(format!("T{thread}_{i}").as_str()));
		}
	}
}

#[test]
fn cast_cases_wrap_what_their_cast_accepts() {
	struct Flock;
	let birds_of = |value: &Value| -> Optional<Vec<Bird>> {
		let Some(items) = value.downcast_ref::<Vec<Value>>() else {
			return Optional::None;
		};
		items
			.iter()
			.map(|item| item.downcast_ref::<Bird>().cloned())
			.collect::<Option<Vec<Bird>>>()
			.into()
	};
	let cases = MatchCases::<Flock>::new("Flock");
	let pair = cases
		.instance_by_when("PAIR", birds_of, |birds: &Vec<Bird>| birds.len() == 2)
		.unwrap();
	let birds = cases.instance_by("BIRDS", birds_of).unwrap();

	let josh = Bird { name: "Josh", age: 2 };
	let joe = Bird { name: "Joe", age: 3 };
	let raw = vec![Value::new(josh.clone()), Value::new(joe.clone())];

	let flock = birds.wrap(raw.clone()).get_or_throw().unwrap();
	assert_eq!(birds.unwrap(&flock), Optional::Some(vec![josh.clone(), joe.clone()]));
	assert_eq!(pair.unwrap(&flock), Optional::Some(vec![josh.clone(), joe]));
	assert_eq!(case_name(&cases, &flock).as_deref(), Some("PAIR"));
	assert_eq!(flock, cases.wrap(raw).get_or_throw().unwrap());

	let single = vec![Value::new(josh.clone())];
	assert!(pair.wrap(single.clone()).is_none());
	assert!(birds.wrap(single).is_some());
	assert_eq!(birds.wrap(vec![josh]), Optional::None);
	assert_eq!(birds.to_string(), "Flock.InstanceCase(name=BIRDS, ordinal=1)");
}

#[test]
fn registry_identity_and_layers() {
	struct Here;
	let here = MatchCases::<Here>::new("Here");
	let elsewhere = MatchCases::<Here>::new("Elsewhere");
	assert_eq!(here.id(), here.clone().id());
	assert_ne!(here.id(), elsewhere.id());

	let number = here.union("NUMBER", &NUMBERS.cases).unwrap();
	let int = here.instance::<i32>("INT").unwrap();
	assert!(number.info().kind().is_nested());
	assert!(!int.info().kind().is_nested());

	let union = number.wrap(NUMBERS.int.wrap(4));
	let raw = union.as_raw().clone();
	assert_eq!(union.into_raw(), raw);
	assert_eq!(repr::unwrap_completely(&raw).downcast_ref::<i32>(), Some(&4));
}

#[test]
fn child_is_discriminated_once_per_wrap() {
	struct Child;
	struct Parent;
	let casts = Arc::new(AtomicUsize::new(0));
	let checks = Arc::new(AtomicUsize::new(0));

	let child = MatchCases::<Child>::new("Child");
	let counter = casts.clone();
	child
		.instance_by::<i32, _>("INT", move |value: &Value| {
			counter.fetch_add(1, Ordering::SeqCst);
			value.downcast_ref::<i32>().copied().into()
		})
		.unwrap();

	let parent = MatchCases::<Parent>::new("Parent");
	let counter = checks.clone();
	parent
		.union_when("NEVER", &child, move |_: &Union<Child>| {
			counter.fetch_add(1, Ordering::SeqCst);
			false
		})
		.unwrap();
	let any = parent.union("ANY", &child).unwrap();

	let union = parent.wrap(9i32).get_or_throw().unwrap();
	assert_eq!(casts.load(Ordering::SeqCst), 1);
	assert_eq!(checks.load(Ordering::SeqCst), 1);
	assert!(any.matches(&union));
}

#[test]
fn constrained_cases_recheck_their_predicate() {
	struct Child;
	struct Parent;
	let casts = Arc::new(AtomicUsize::new(0));
	let checks = Arc::new(AtomicUsize::new(0));

	let child = MatchCases::<Child>::new("Child");
	let counter = casts.clone();
	child
		.instance_by::<i32, _>("INT", move |value: &Value| {
			counter.fetch_add(1, Ordering::SeqCst);
			value.downcast_ref::<i32>().copied().into()
		})
		.unwrap();

	let parent = MatchCases::<Parent>::new("Parent");
	for (name, verdict) in [("FIRST", false), ("SECOND", true)] {
		let counter = checks.clone();
		parent
			.union_when(name, &child, move |_: &Union<Child>| {
				counter.fetch_add(1, Ordering::SeqCst);
				verdict
			})
			.unwrap();
	}

	let union = parent.wrap(9i32).get_or_throw().unwrap();
	assert_eq!(casts.load(Ordering::SeqCst), 1);
	assert_eq!(checks.load(Ordering::SeqCst), 2);
	assert_eq!(case_name(&parent, &union).as_deref(), Some("SECOND"));
}

#[test]
fn discern_registry_builds_unions_through_handles() {
	struct Shade;
	let shades = DiscernCases::<Shade>::new("Shade");
	let number = shades.union("NUMBER", &NUMBERS.cases).unwrap();
	let blue = shades.obj("BLUE", "blue").unwrap();

	assert_eq!(shades.flavor(), Flavor::Discern);
	let two = number.wrap(NUMBERS.long.wrap(2));
	assert_eq!(case_name(&shades, &two).as_deref(), Some("NUMBER"));
	assert_eq!(case_name(&shades, &blue.wrap()).as_deref(), Some("BLUE"));
	assert_eq!(
		number.unwrap(&two).flat_map(|n| NUMBERS.long.unwrap(&n)),
		Optional::Some(2)
	);
}

#[test]
fn values_never_nest() {
	let three = Value::new(3i32);
	let again = Value::new(three.clone());
	assert!(again.ptr_eq(&three));
	assert!(!again.is::<Value>());
	assert_eq!(again.downcast_ref::<i32>(), Some(&3));
	assert_ne!(Value::new(3i64), three);

	let union = NUMBERS.int.wrap(3);
	let erased = Value::new(union.clone());
	assert!(erased.as_raw_union().is_some());
	assert_eq!(erased.terminal(), &three);
	assert_eq!(erased, union.into_value());
}

#[test]
fn wrap_as_mirrors_registry_wrap() {
	let union = 11i64.wrap_as(&NUMBERS.cases).get_or_throw().unwrap();
	assert!(NUMBERS.long.matches(&union));
	assert!(!"eleven".can_wrap_as(&NUMBERS.cases));
}

struct Parity;

struct Parities {
	cases: MatchCases<Parity>,
	any: InstanceCase<Parity, i32>,
}

static PARITIES: LazyLock<Parities> = LazyLock::new(|| {
	let cases = MatchCases::new("Parity");
	cases.instance_when("EVEN", |n: &i32| n % 2 == 0).unwrap();
	let any = cases.instance("ANY").unwrap();
	Parities { cases, any }
});

proptest! {
	#[test]
	fn earlier_case_wins_for_every_value(n in any::<i32>()) {
		let union = PARITIES.cases.wrap(n).get_or_throw().unwrap();
		let expected = if n % 2 == 0 { "EVEN" } else { "ANY" };
		let name = case_name(&PARITIES.cases, &union);
		prop_assert_eq!(name.as_deref(), Some(expected));
		prop_assert_eq!(PARITIES.any.unwrap(&union), Optional::Some(n));
	}
}
