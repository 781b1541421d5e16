use crate::aggregate::flatten_lines;
use crate::model::{CommitSummary, FileLength, Summary, TimeOfDay};
use chrono::Timelike;
use clap::ValueEnum;
use std::collections::{HashMap, HashSet};
use std::fmt;

/// Which hours feed the "most active time of day" mean.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum HourSource {
    /// Mean whole local hour over every line
    #[default]
    Lines,
    /// Mean fractional hour over commits
    Commits,
}

impl fmt::Display for HourSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HourSource::Lines => f.write_str("lines"),
            HourSource::Commits => f.write_str("commits"),
        }
    }
}

pub fn summarize(commits: &[&CommitSummary], hours: HourSource) -> Summary {
    let lines = flatten_lines(commits);

    let files: HashSet<&str> = lines.iter().map(|l| l.file.as_str()).collect();
    let days: HashSet<_> = lines.iter().map(|l| l.date).collect();

    Summary {
        commits: commits.len(),
        total_lines: lines.len(),
        files: files.len(),
        time_of_day: mean_hour(commits, hours).map(TimeOfDay::from_hour),
        longest_file: longest_file(commits),
        days_worked: days.len(),
    }
}

pub fn mean_hour(commits: &[&CommitSummary], hours: HourSource) -> Option<f64> {
    let values: Vec<f64> = match hours {
        HourSource::Lines => flatten_lines(commits)
            .into_iter()
            .map(|l| l.datetime.hour() as f64)
            .collect(),
        HourSource::Commits => commits.iter().map(|c| c.hour_frac).collect(),
    };
    if values.is_empty() {
        None
    } else {
        Some(values.iter().sum::<f64>() / values.len() as f64)
    }
}

/// The file with the most lines; the first one seen wins a tie.
pub fn longest_file(commits: &[&CommitSummary]) -> Option<FileLength> {
    let mut order: Vec<&str> = Vec::new();
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for line in flatten_lines(commits) {
        let count = counts.entry(line.file.as_str()).or_insert_with(|| {
            order.push(line.file.as_str());
            0
        });
        *count += 1;
    }

    let mut best: Option<FileLength> = None;
    for file in order {
        let lines = counts[file];
        if best.as_ref().map_or(true, |b| lines > b.lines) {
            best = Some(FileLength {
                file: file.to_string(),
                lines,
            });
        }
    }
    best
}
