//! Test suites for the pollshim CLI runtime.

mod support;
