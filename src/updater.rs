//! Badge update pipeline
//!
//! One linear pass per invocation: percentages (measured or stamped) ->
//! badge line -> README patch -> optional `git add`.

use crate::badges::{build_badge_line, FULL_PERCENT};
use crate::config::BadgeConfig;
use crate::coverage::{compute_doc_coverage, compute_test_coverage};
use crate::error::Result;
use crate::git::stage_file;
use crate::readme::{update_readme, ReadmeStatus};
use crate::tools::CommandRunner;
use tracing::info;

/// What a run produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateOutcome {
    pub test_percent: String,
    pub doc_percent: String,
    pub badge_line: String,
    pub readme: ReadmeStatus,
    pub staged: bool,
}

/// Run the full badge update described by `config`
pub fn run_update(config: &BadgeConfig, runner: &dyn CommandRunner) -> Result<UpdateOutcome> {
    let (test_percent, doc_percent) = if config.refresh {
        info!("Refreshing coverage badges from cargo llvm-cov and cargo doc");
        let test = compute_test_coverage(runner, &config.root)?;
        let doc = compute_doc_coverage(runner, &config.root)?;
        (test, doc)
    } else {
        info!("Stamping fixed {}% coverage badges", FULL_PERCENT);
        (FULL_PERCENT.to_string(), FULL_PERCENT.to_string())
    };

    let badge_line = build_badge_line(&test_percent, &doc_percent);
    let readme = update_readme(&config.readme, &badge_line, !config.check)?;
    info!("{}: {:?}", config.readme.display(), readme);

    let staged = readme == ReadmeStatus::Updated && !config.skip_git_add;
    if staged {
        stage_file(runner, &config.root, &config.readme)?;
    }

    Ok(UpdateOutcome {
        test_percent,
        doc_percent,
        badge_line,
        readme,
        staged,
    })
}
