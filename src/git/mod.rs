//! Git staging of the refreshed README

use crate::error::Result;
use crate::tools::{run_checked, CommandRunner, ToolCommand};
use std::path::Path;
use tracing::info;

/// `git add <path>` from `root`; a non-zero exit is fatal
pub fn stage_file(runner: &dyn CommandRunner, root: &Path, path: &Path) -> Result<()> {
    let command = ToolCommand::new("git add", "git")
        .arg("add")
        .arg(path.to_string_lossy())
        .current_dir(root);
    run_checked(runner, &command)?;
    info!("Staged {}", path.display());
    Ok(())
}
