//! Scenario bindings for the `pollshim-patcher` BDD feature file.

use std::cell::RefCell;

use rstest::fixture;
use rstest_bdd_macros::scenario;

use super::TestWorld;

/// Fixture providing the shared BDD world.
#[fixture]
fn world() -> RefCell<TestWorld> {
    super::world()
}

#[scenario(
    path = "tests/features/glue_patch.feature",
    name = "Proxied poll return gains a bounded wait"
)]
fn proxied_return_gains_wait(world: RefCell<TestWorld>) {
    drop(world);
}

#[scenario(
    path = "tests/features/glue_patch.feature",
    name = "Custom timeout is written into the wait"
)]
fn custom_timeout(world: RefCell<TestWorld>) {
    drop(world);
}

#[scenario(
    path = "tests/features/glue_patch.feature",
    name = "Older toolchain output uses the sys-poll variant"
)]
fn sys_poll_variant(world: RefCell<TestWorld>) {
    drop(world);
}

#[scenario(
    path = "tests/features/glue_patch.feature",
    name = "Mismatched variant reports the missing function marker"
)]
fn mismatched_variant(world: RefCell<TestWorld>) {
    drop(world);
}

#[scenario(
    path = "tests/features/glue_patch.feature",
    name = "Glue without a proxied return reports the missing return marker"
)]
fn missing_return(world: RefCell<TestWorld>) {
    drop(world);
}

#[scenario(
    path = "tests/features/glue_patch.feature",
    name = "Patched output cannot be patched again"
)]
fn repatch_fails(world: RefCell<TestWorld>) {
    drop(world);
}
