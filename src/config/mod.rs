//! Run configuration
//!
//! Loaded once at startup, with priority:
//! 1. CLI flags (can only switch a behaviour on)
//! 2. Environment variables
//! 3. Defaults (stamp mode, stage the README)

use std::path::{Path, PathBuf};

/// Enables real coverage computation instead of fixed 100% badges
pub const REFRESH_ENV: &str = "SHIPSHAPE_REFRESH_BADGES";
/// Suppresses `git add` after the README is rewritten
pub const SKIP_GIT_ADD_ENV: &str = "SHIPSHAPE_SKIP_GIT_ADD";

pub const README_FILE: &str = "README.md";

const TRUTHY: [&str; 3] = ["1", "true", "yes"];

/// Whether an environment value is one of the truthy tokens (case-insensitive)
pub fn is_truthy(value: &str) -> bool {
    TRUTHY.iter().any(|t| value.eq_ignore_ascii_case(t))
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BadgeConfig {
    /// Repository root; tools run here
    pub root: PathBuf,
    pub readme: PathBuf,
    /// Run coverage tooling instead of stamping 100%
    pub refresh: bool,
    pub skip_git_add: bool,
    /// Compare only, never write or stage
    pub check: bool,
}

impl BadgeConfig {
    /// Defaults for a repository rooted at `root`.
    ///
    /// A relative root is resolved against the current directory so that the
    /// README and report paths stay valid for tools run from inside `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        let root = std::path::absolute(&root).unwrap_or(root);
        Self {
            readme: root.join(README_FILE),
            root,
            refresh: false,
            skip_git_add: false,
            check: false,
        }
    }

    /// Defaults overlaid with the process environment
    pub fn from_env(root: impl Into<PathBuf>) -> Self {
        Self::from_lookup(root, |key| std::env::var(key).ok())
    }

    /// Defaults overlaid with variables from `lookup`
    pub fn from_lookup<F>(root: impl Into<PathBuf>, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let flag = |key: &str| lookup(key).is_some_and(|v| is_truthy(&v));
        let mut config = Self::new(root);
        config.refresh = flag(REFRESH_ENV);
        config.skip_git_add = flag(SKIP_GIT_ADD_ENV);
        config
    }

    /// Point at a different README; relative paths resolve against the root
    pub fn with_readme(mut self, readme: &Path) -> Self {
        self.readme = if readme.is_absolute() {
            readme.to_path_buf()
        } else {
            self.root.join(readme)
        };
        self
    }

    pub fn with_refresh(mut self, refresh: bool) -> Self {
        self.refresh |= refresh;
        self
    }

    pub fn with_skip_git_add(mut self, skip: bool) -> Self {
        self.skip_git_add |= skip;
        self
    }

    pub fn with_check(mut self, check: bool) -> Self {
        self.check = check;
        self
    }
}
