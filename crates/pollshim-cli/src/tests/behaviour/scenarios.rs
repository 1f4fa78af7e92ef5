//! Scenario bindings for the pollshim CLI feature file.

use std::cell::RefCell;

use rstest::fixture;
use rstest_bdd_macros::scenario;

use super::super::support::TestWorld;

/// Fixture providing the shared BDD world.
#[fixture]
fn world() -> RefCell<TestWorld> {
    RefCell::new(TestWorld::default())
}

#[scenario(
    path = "tests/features/pollshim_cli.feature",
    name = "Stream mode patches stdin to stdout"
)]
fn stream_mode(world: RefCell<TestWorld>) {
    drop(world);
}

#[scenario(
    path = "tests/features/pollshim_cli.feature",
    name = "File mode patches the file in place"
)]
fn file_mode(world: RefCell<TestWorld>) {
    drop(world);
}

#[scenario(
    path = "tests/features/pollshim_cli.feature",
    name = "Check mode leaves the file alone"
)]
fn check_mode(world: RefCell<TestWorld>) {
    drop(world);
}

#[scenario(
    path = "tests/features/pollshim_cli.feature",
    name = "Missing markers fail without output"
)]
fn missing_markers(world: RefCell<TestWorld>) {
    drop(world);
}
