// Library surface for headless/integration tests and reuse.
// Keep this lean to avoid coupling to bin-only types in main.rs.
pub mod app_dirs;
pub mod config;
pub mod coords;
pub mod error;
pub mod intercept;
pub mod pattern;
pub mod report;
pub mod runtime;
pub mod session;
pub mod setup;
pub mod surface;
pub mod target;

pub use error::{AimError, Result};
