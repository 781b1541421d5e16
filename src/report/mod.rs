pub mod commits;
pub mod files;
pub mod languages;
pub mod projects;
pub mod select;
pub mod summary;

use crate::aggregate::{aggregate_commits, CommitOrder};
use crate::cli::CommonArgs;
use crate::loader::load_lines;
use crate::model::CommitSummary;
use crate::util::parse_cutoff;
use crate::window::{filter_until, TimeSlider};
use anyhow::Context;
use chrono::{DateTime, FixedOffset, Utc};
use std::path::PathBuf;
use tracing::debug;

/// Loaded commits plus the cutoff chosen on the command line.
pub struct Dataset {
    pub data_path: PathBuf,
    pub commits: Vec<CommitSummary>,
    pub cutoff: Option<DateTime<FixedOffset>>,
}

impl Dataset {
    pub fn load(common: &CommonArgs, order: CommitOrder, show_progress: bool) -> anyhow::Result<Self> {
        let lines = load_lines(&common.data, show_progress)
            .with_context(|| format!("Failed to load {}", common.data.display()))?;
        let commits = aggregate_commits(lines, &common.commit_url, order);
        debug!(commits = commits.len(), "aggregated commits");

        let cutoff = resolve_cutoff(common, &commits)?;
        Ok(Self {
            data_path: common.data.clone(),
            commits,
            cutoff,
        })
    }

    /// Commits at or before the cutoff.
    pub fn visible(&self) -> Vec<&CommitSummary> {
        filter_until(&self.commits, self.cutoff.as_ref())
    }

    pub fn data_path_string(&self) -> String {
        self.data_path.to_string_lossy().to_string()
    }
}

/// `--until` wins over `--progress`; slider position 100 means no cutoff.
pub fn resolve_cutoff(
    common: &CommonArgs,
    commits: &[CommitSummary],
) -> anyhow::Result<Option<DateTime<FixedOffset>>> {
    if let Some(until) = &common.until {
        let cutoff = parse_cutoff(until, Utc::now()).context("Failed to resolve cutoff")?;
        return Ok(Some(cutoff));
    }
    match (common.progress, TimeSlider::for_commits(commits)) {
        (Some(p), Some(slider)) if p < 100 => Ok(Some(slider.cutoff_at(p as f64))),
        _ => Ok(None),
    }
}

/// Spinners only make sense when a human is watching stderr.
pub(crate) fn wants_progress(machine_output: bool) -> bool {
    !machine_output && console::Term::stderr().is_term()
}

pub(crate) fn describe_cutoff(cutoff: Option<&DateTime<FixedOffset>>) -> String {
    match cutoff {
        Some(t) => format!("up to {}", t.format("%Y-%m-%d %H:%M %:z")),
        None => "any time".to_string(),
    }
}
