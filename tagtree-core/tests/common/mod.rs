//! Test infrastructure for the tagtree parser
//!
//! Provides fixture loading, stochastic test generation, and tree comparison helpers.

#![allow(dead_code)]

mod loader;
mod harness;
mod spec;

pub use loader::{TestCase, ExpectedError, load_fixtures_by_name};
pub use harness::{run_test, run_with_variations, error_name};
pub use generators::Gen;
pub use spec::ElementSpec;
