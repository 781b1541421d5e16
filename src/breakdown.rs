use crate::aggregate::flatten_lines;
use crate::model::{Breakdown, CommitSummary, LanguageShare};
use crate::window::selection_or_all;
use std::collections::HashMap;

/// Line counts per language for the selected commits, falling back to
/// `all` when the selection is empty.
pub fn language_breakdown(selection: &[&CommitSummary], all: &[&CommitSummary]) -> Breakdown {
    let commits = selection_or_all(selection, all);
    let lines = flatten_lines(&commits);

    let mut order: Vec<&str> = Vec::new();
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for line in &lines {
        let count = counts.entry(line.kind.as_str()).or_insert_with(|| {
            order.push(line.kind.as_str());
            0
        });
        *count += 1;
    }

    let total = lines.len();
    let languages = order
        .into_iter()
        .map(|language| {
            let count = counts[language];
            let proportion = count as f64 / total as f64;
            LanguageShare {
                language: language.to_string(),
                lines: count,
                proportion,
                percent: format_percent(proportion),
            }
        })
        .collect();

    Breakdown {
        total_lines: total,
        languages,
    }
}

/// Percentage with one decimal place and trailing zeros trimmed.
pub fn format_percent(proportion: f64) -> String {
    let fixed = format!("{:.1}", proportion * 100.0);
    let trimmed = fixed.trim_end_matches('0').trim_end_matches('.');
    format!("{trimmed}%")
}
