//! cargo-llvm-cov JSON export parsing
//!
//! Only the summary totals of the first export entry are read:
//!
//! ```json
//! {"data": [{"totals": {"lines": {"percent": 100.0},
//!                       "branches": {"count": 12, "covered": 12, "percent": 100.0}}}]}
//! ```

use crate::error::{BadgeError, Result};
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Default, Deserialize)]
pub struct CoverageExport {
    #[serde(default)]
    pub data: Vec<ExportEntry>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ExportEntry {
    #[serde(default)]
    pub totals: Totals,
}

#[derive(Debug, Default, Deserialize)]
pub struct Totals {
    #[serde(default)]
    pub lines: LineSummary,
    pub branches: Option<BranchSummary>,
}

#[derive(Debug, Default, Deserialize)]
pub struct LineSummary {
    pub percent: Option<f64>,
}

#[derive(Debug, Default, Deserialize)]
pub struct BranchSummary {
    pub count: Option<u64>,
    pub covered: Option<u64>,
    pub percent: Option<f64>,
    /// Keys we do not read (e.g. `notcovered`); their presence still means
    /// a branch summary was emitted
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl BranchSummary {
    fn is_empty(&self) -> bool {
        self.count.is_none()
            && self.covered.is_none()
            && self.percent.is_none()
            && self.extra.is_empty()
    }
}

impl CoverageExport {
    pub fn from_json(json: &str, path: &Path) -> Result<Self> {
        serde_json::from_str(json).map_err(|source| BadgeError::ReportParse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path).map_err(|e| BadgeError::io(path, e))?;
        Self::from_json(&json, path)
    }

    /// Validate the totals and return the aggregate line percentage.
    ///
    /// Branch coverage must be complete: exact counts win when both are
    /// present, otherwise the aggregate percentage must reach 100.
    pub fn line_percent(&self) -> Result<f64> {
        let totals = self
            .data
            .first()
            .map(|entry| &entry.totals)
            .ok_or_else(|| BadgeError::coverage("Coverage payload missing data section."))?;

        let lines_percent = totals
            .lines
            .percent
            .ok_or_else(|| BadgeError::coverage("Line coverage percent missing."))?;

        let branches = totals
            .branches
            .as_ref()
            .filter(|b| !b.is_empty())
            .ok_or_else(|| {
                BadgeError::coverage("Branch coverage missing. Ensure --branch is enabled.")
            })?;

        match (branches.covered, branches.count) {
            (Some(covered), Some(count)) => {
                if covered != count {
                    return Err(BadgeError::coverage(format!(
                        "Branch coverage {}/{} below 100%.",
                        covered, count
                    )));
                }
            }
            _ => {
                let percent = branches.percent.ok_or_else(|| {
                    BadgeError::coverage("Branch coverage summary missing percent.")
                })?;
                if percent < 100.0 {
                    return Err(BadgeError::coverage(format!(
                        "Branch coverage {:.2}% below 100%.",
                        percent
                    )));
                }
            }
        }

        Ok(lines_percent)
    }
}
