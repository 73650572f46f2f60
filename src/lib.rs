//! shipshape-badges - README coverage badge updater
//!
//! Keeps a delimited pair of test and doc coverage badges in a project's
//! README current. In the default stamp mode both badges read 100% (coverage
//! is gated elsewhere in CI); in refresh mode `cargo llvm-cov` and `cargo doc`
//! are run and the real line coverage is written.
//!
//! # Example
//!
//! ```no_run
//! use shipshape_badges::{run_update, BadgeConfig, SystemRunner};
//!
//! let config = BadgeConfig::from_env(".");
//! let outcome = run_update(&config, &SystemRunner).unwrap();
//! println!("{}", outcome.badge_line);
//! ```

pub mod badges;
pub mod config;
pub mod coverage;
pub mod error;
pub mod git;
pub mod readme;
pub mod tools;
pub mod updater;

pub use badges::{build_badge_line, format_percent};
pub use config::BadgeConfig;
pub use error::{BadgeError, Result};
pub use readme::{patch_badges, update_readme, ReadmeStatus};
pub use tools::{CommandRunner, SystemRunner, ToolCommand, ToolOutput};
pub use updater::{run_update, UpdateOutcome};
