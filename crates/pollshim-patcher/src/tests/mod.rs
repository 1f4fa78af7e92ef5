//! Test suites for the glue patcher.
