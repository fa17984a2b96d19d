//! rmake - configure and build the rocFFT library through CMake
//!
//! This crate translates a small set of build flags into CMake configure
//! arguments and drives the configure-then-build sequence for the host
//! platform.

pub mod builder;
pub mod ops;
pub mod util;

/// Test utilities and mocks for rmake unit tests.
#[cfg(test)]
pub mod test_support;

pub use builder::{BuildContext, CommandSpec, Platform};
pub use ops::rmake_build::{BuildOptions, BuildPlan};
pub use util::errors::RmakeError;
