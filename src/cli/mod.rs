//! CLI definition and handler

use anyhow::Result;
use clap::Parser;
use console::style;
use shipshape_badges::config::{REFRESH_ENV, SKIP_GIT_ADD_ENV};
use shipshape_badges::{run_update, BadgeConfig, BadgeError, ReadmeStatus, SystemRunner};
use std::path::PathBuf;

/// Refresh the coverage badges in a project's README
///
/// By default both badges are stamped at 100%. Set SHIPSHAPE_REFRESH_BADGES=1
/// (or pass --refresh) to measure coverage with cargo llvm-cov and cargo doc.
#[derive(Parser, Debug)]
#[command(name = "shipshape-badges")]
#[command(
    version,
    about = "Regenerate README test and doc coverage badges",
    after_help = "\
Environment:
  SHIPSHAPE_REFRESH_BADGES=1|true|yes   Measure coverage instead of stamping 100%
  SHIPSHAPE_SKIP_GIT_ADD=1|true|yes     Do not `git add` the README after updating it

Examples:
  shipshape-badges                     Stamp 100% badges into ./README.md
  shipshape-badges --refresh           Run coverage tooling and write real numbers
  shipshape-badges --check             Exit 1 if the badges are out of date"
)]
pub struct Cli {
    /// Repository root (README.md and the cargo workspace live here)
    #[arg(long, default_value = ".")]
    pub root: PathBuf,

    /// README to patch (default: <root>/README.md)
    #[arg(long)]
    pub readme: Option<PathBuf>,

    /// Measure coverage instead of stamping 100% (same as SHIPSHAPE_REFRESH_BADGES=1)
    #[arg(long)]
    pub refresh: bool,

    /// Do not stage the README after updating it (same as SHIPSHAPE_SKIP_GIT_ADD=1)
    #[arg(long)]
    pub skip_git_add: bool,

    /// Only check whether the README is current; never write or stage
    #[arg(long)]
    pub check: bool,

    /// Log level (error, warn, info, debug, trace); RUST_LOG takes precedence
    #[arg(long, default_value = "warn", value_parser = ["error", "warn", "info", "debug", "trace"])]
    pub log_level: String,
}

impl Cli {
    /// Environment first, then CLI switches on top
    pub fn config(&self) -> BadgeConfig {
        let mut config = BadgeConfig::from_env(&self.root)
            .with_refresh(self.refresh)
            .with_skip_git_add(self.skip_git_add)
            .with_check(self.check);
        if let Some(readme) = &self.readme {
            config = config.with_readme(readme);
        }
        config
    }
}

pub fn run(cli: Cli) -> Result<()> {
    let config = cli.config();
    tracing::debug!(
        "{}={} {}={} root={}",
        REFRESH_ENV,
        config.refresh,
        SKIP_GIT_ADD_ENV,
        config.skip_git_add,
        config.root.display()
    );

    let outcome = run_update(&config, &SystemRunner)?;
    let readme = config.readme.display();

    match outcome.readme {
        ReadmeStatus::Updated => {
            println!(
                "{} Updated coverage badges in {} (test {}%, doc {}%)",
                style("✓").green(),
                style(&readme).cyan(),
                outcome.test_percent,
                outcome.doc_percent
            );
            if outcome.staged {
                println!("  Staged {}", readme);
            }
        }
        ReadmeStatus::Unchanged => {
            println!(
                "{} Coverage badges in {} already up to date",
                style("✓").green(),
                style(&readme).cyan()
            );
        }
        ReadmeStatus::Stale => {
            return Err(BadgeError::ReadmeStale {
                path: config.readme.clone(),
            }
            .into());
        }
    }

    Ok(())
}
