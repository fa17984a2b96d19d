//! Shared utilities

pub mod config;
pub mod env;
pub mod errors;
pub mod fs;
pub mod os_info;
pub mod process;

pub use config::Config;
pub use env::Environment;
pub use errors::RmakeError;
pub use os_info::PlatformInfo;
