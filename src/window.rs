use crate::model::CommitSummary;
use crate::scale::{PlotArea, ScatterScales, TimeScale};
use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Commits at or before `cutoff`, in their original order. No cutoff
/// keeps everything.
pub fn filter_until<'a>(
    commits: &'a [CommitSummary],
    cutoff: Option<&DateTime<FixedOffset>>,
) -> Vec<&'a CommitSummary> {
    commits
        .iter()
        .filter(|c| cutoff.map_or(true, |t| c.datetime <= *t))
        .collect()
}

/// Rectangle in plot screen-space, normalized so `x0 <= x1` and `y0 <= y1`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Brush {
    pub x0: f64,
    pub y0: f64,
    pub x1: f64,
    pub y1: f64,
}

impl Brush {
    pub fn new(a: (f64, f64), b: (f64, f64)) -> Self {
        Self {
            x0: a.0.min(b.0),
            y0: a.1.min(b.1),
            x1: a.0.max(b.0),
            y1: a.1.max(b.1),
        }
    }

    pub fn contains(&self, (x, y): (f64, f64)) -> bool {
        x >= self.x0 && x <= self.x1 && y >= self.y0 && y <= self.y1
    }

    pub fn corners(&self) -> [f64; 4] {
        [self.x0, self.y0, self.x1, self.y1]
    }
}

impl FromStr for Brush {
    type Err = String;

    /// Parses `x0,y0,x1,y1`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<f64> = s
            .split(',')
            .map(|p| p.trim().parse::<f64>())
            .collect::<Result<_, _>>()
            .map_err(|e| format!("invalid brush '{s}': {e}"))?;
        match parts.as_slice() {
            [x0, y0, x1, y1] if parts.iter().all(|v| v.is_finite()) => {
                Ok(Brush::new((*x0, *y0), (*x1, *y1)))
            }
            _ => Err(format!("invalid brush '{s}': expected x0,y0,x1,y1")),
        }
    }
}

/// Commits whose plotted position falls inside the brush, edges included.
/// No brush selects nothing.
pub fn select_in_brush<'a>(
    commits: &[&'a CommitSummary],
    brush: Option<&Brush>,
    scales: &ScatterScales,
) -> Vec<&'a CommitSummary> {
    let Some(brush) = brush else {
        return Vec::new();
    };
    commits
        .iter()
        .copied()
        .filter(|c| brush.contains(scales.project(c)))
        .collect()
}

/// Brush selection over the visible commits, with scales fitted to those
/// same commits so it agrees with what is plotted.
pub fn select_visible<'a>(
    visible: &[&'a CommitSummary],
    brush: Option<&Brush>,
    area: PlotArea,
) -> Vec<&'a CommitSummary> {
    match ScatterScales::for_commits(visible.iter().copied(), area) {
        Some(scales) => select_in_brush(visible, brush, &scales),
        None => Vec::new(),
    }
}

/// The selection itself, or every commit when nothing is selected.
pub fn selection_or_all<'a>(
    selection: &[&'a CommitSummary],
    all: &[&'a CommitSummary],
) -> Vec<&'a CommitSummary> {
    if selection.is_empty() {
        all.to_vec()
    } else {
        selection.to_vec()
    }
}

/// "N commits selected", or "No commits selected".
pub fn selection_label(count: usize) -> String {
    if count == 0 {
        "No commits selected".to_string()
    } else {
        format!("{count} commits selected")
    }
}

/// Maps a 0–100 slider position onto the commit timeline.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeSlider {
    scale: TimeScale,
}

impl TimeSlider {
    pub const MAX: f64 = 100.0;

    pub fn for_commits(commits: &[CommitSummary]) -> Option<Self> {
        TimeScale::over(commits, (0.0, Self::MAX)).map(|scale| Self { scale })
    }

    /// The cutoff instant for `progress`; 100 is the last commit.
    pub fn cutoff_at(&self, progress: f64) -> DateTime<FixedOffset> {
        let (start, end) = self.scale.domain();
        let progress = if progress.is_nan() { Self::MAX } else { progress.clamp(0.0, Self::MAX) };
        if progress >= Self::MAX {
            end
        } else if progress <= 0.0 {
            start
        } else {
            self.scale.invert(progress)
        }
    }

    pub fn progress_of(&self, t: &DateTime<FixedOffset>) -> f64 {
        self.scale.apply(t).clamp(0.0, Self::MAX)
    }

    pub fn filter<'a>(&self, commits: &'a [CommitSummary], progress: f64) -> Vec<&'a CommitSummary> {
        let cutoff = self.cutoff_at(progress);
        filter_until(commits, Some(&cutoff))
    }
}
