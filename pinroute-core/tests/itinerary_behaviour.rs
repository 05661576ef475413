#![expect(
    clippy::expect_used,
    reason = "behaviour tests use expect for readable failures"
)]

//! Behavioural tests for editing an [`Itinerary`].

use std::cell::RefCell;
use std::collections::BTreeSet;

use geo::Coord;
use pinroute_core::{Criterion, Itinerary, ItineraryError, VisitOrder};
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};

#[derive(Debug, Default)]
struct ItineraryWorld {
    itinerary: RefCell<Itinerary>,
    outcome: RefCell<Option<Result<(), ItineraryError>>>,
}

#[fixture]
fn world() -> ItineraryWorld {
    ItineraryWorld::default()
}

#[given("an itinerary with four destinations")]
fn given_four(world: &ItineraryWorld) {
    let mut itinerary = world.itinerary.borrow_mut();
    for (label, x) in [("Depot", -0.12), ("Bakery", -0.10), ("Market", -0.09), ("Pier", -0.07)] {
        itinerary.push(label, Coord { x, y: 51.5 });
    }
}

#[given("destination {index} is pinned")]
fn given_pinned(world: &ItineraryWorld, index: usize) {
    world
        .itinerary
        .borrow_mut()
        .set_fixed(index, true)
        .expect("destination should exist");
}

#[when("destination {from} is moved to position {to}")]
fn when_moved(world: &ItineraryWorld, from: usize, to: usize) {
    let outcome = world.itinerary.borrow_mut().move_destination(from, to);
    world.outcome.replace(Some(outcome));
}

#[when("the reversed order is applied")]
fn when_reversed(world: &ItineraryWorld) {
    let mut itinerary = world.itinerary.borrow_mut();
    let reversed: Vec<usize> = (0..itinerary.len()).rev().collect();
    let order = VisitOrder::new(reversed, itinerary.len()).expect("reversal is a permutation");
    let outcome = itinerary.apply_order(&order);
    world.outcome.replace(Some(outcome));
}

#[when("destination {index} is toggled")]
fn when_toggled(world: &ItineraryWorld, index: usize) {
    let outcome = world.itinerary.borrow_mut().toggle_fixed(index).map(|_| ());
    world.outcome.replace(Some(outcome));
}

#[then("the snapshot pins only position {position}")]
fn then_pins_only(world: &ItineraryWorld, position: usize) {
    let outcome = world.outcome.borrow();
    assert_eq!(*outcome, Some(Ok(())), "edit should succeed");
    let request = world.itinerary.borrow().snapshot(Criterion::Distance);
    assert_eq!(request.fixed, BTreeSet::from([position]));
}

#[then("an index out of range error is reported")]
fn then_out_of_range(world: &ItineraryWorld) {
    let outcome = world.outcome.borrow();
    assert!(
        matches!(
            *outcome,
            Some(Err(ItineraryError::IndexOutOfRange { len: 4, .. }))
        ),
        "expected IndexOutOfRange, got {outcome:?}"
    );
}

#[scenario(path = "tests/features/itinerary.feature", index = 0)]
fn pin_follows_drag(world: ItineraryWorld) {
    let _ = world;
}

#[scenario(path = "tests/features/itinerary.feature", index = 1)]
fn pin_follows_optimised_order(world: ItineraryWorld) {
    let _ = world;
}

#[scenario(path = "tests/features/itinerary.feature", index = 2)]
fn toggle_missing_destination(world: ItineraryWorld) {
    let _ = world;
}
