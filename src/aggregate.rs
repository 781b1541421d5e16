use crate::model::{CommitSummary, LineRecord};
use chrono::Timelike;
use clap::ValueEnum;
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum CommitOrder {
    /// Order in which commit ids first appear in the data
    #[default]
    FirstSeen,
    /// Ascending by commit timestamp
    Chronological,
}

/// Group line records into one summary per commit id.
pub fn aggregate_commits(
    lines: Vec<LineRecord>,
    base_url: &str,
    order: CommitOrder,
) -> Vec<CommitSummary> {
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut groups: Vec<Vec<LineRecord>> = Vec::new();

    for line in lines {
        match index.get(&line.commit) {
            Some(&i) => groups[i].push(line),
            None => {
                index.insert(line.commit.clone(), groups.len());
                groups.push(vec![line]);
            }
        }
    }

    let mut commits: Vec<CommitSummary> = groups
        .into_iter()
        .filter_map(|lines| summarize_group(lines, base_url))
        .collect();

    if order == CommitOrder::Chronological {
        commits.sort_by(|a, b| a.datetime.cmp(&b.datetime));
    }

    commits
}

fn summarize_group(lines: Vec<LineRecord>, base_url: &str) -> Option<CommitSummary> {
    let first = lines.first()?;
    let datetime = first.datetime;
    Some(CommitSummary {
        id: first.commit.clone(),
        url: format!("{base_url}{}", first.commit),
        author: first.author.clone(),
        date: first.date,
        time: first.time.clone(),
        timezone: first.timezone.clone(),
        datetime,
        hour_frac: hour_frac(&datetime),
        total_lines: lines.len(),
        lines,
    })
}

/// Decimal hour of day in the timestamp's own offset.
pub fn hour_frac<T: Timelike>(t: &T) -> f64 {
    t.hour() as f64 + t.minute() as f64 / 60.0
}

/// Every line owned by the given commits, in commit order.
pub fn flatten_lines<'a>(commits: &[&'a CommitSummary]) -> Vec<&'a LineRecord> {
    commits.iter().flat_map(|c| c.lines.iter()).collect()
}


#[cfg(test)]
mod tests {
    use super::fixtures::line;
    use super::*;
    use crate::model::DEFAULT_COMMIT_URL;
    use pretty_assertions::assert_eq;

    #[test]
    fn groups_lines_by_commit() {
        let lines = vec![
            line("abc123", "a.js", "js", 3, 10, 0),
            line("abc123", "a.js", "js", 3, 10, 0),
            line("abc123", "a.css", "css", 3, 10, 0),
        ];
        let commits = aggregate_commits(lines, DEFAULT_COMMIT_URL, CommitOrder::FirstSeen);
        assert_eq!(commits.len(), 1);
        let c = &commits[0];
        assert_eq!(c.id, "abc123");
        assert_eq!(c.total_lines, 3);
        assert_eq!(c.lines.len(), 3);
        assert_eq!(c.url, format!("{DEFAULT_COMMIT_URL}abc123"));
    }

    #[test]
    fn hour_frac_uses_local_wall_clock() {
        let commits = aggregate_commits(
            vec![line("c1", "a.js", "js", 5, 21, 30)],
            "https://example.test/commit/",
            CommitOrder::FirstSeen,
        );
        assert_eq!(commits[0].hour_frac, 21.5);
        assert_eq!(commits[0].url, "https://example.test/commit/c1");
    }

    #[test]
    fn first_seen_order_is_preserved() {
        let lines = vec![
            line("late", "a.js", "js", 20, 9, 0),
            line("early", "b.js", "js", 2, 9, 0),
            line("late", "a.js", "js", 20, 9, 0),
        ];
        let ids: Vec<_> = aggregate_commits(lines, "", CommitOrder::FirstSeen)
            .into_iter()
            .map(|c| c.id)
            .collect();
        assert_eq!(ids, vec!["late", "early"]);
    }

    #[test]
    fn chronological_order_sorts_by_datetime() {
        let lines = vec![
            line("late", "a.js", "js", 20, 9, 0),
            line("early", "b.js", "js", 2, 9, 0),
            line("middle", "b.js", "js", 10, 9, 0),
        ];
        let ids: Vec<_> = aggregate_commits(lines, "", CommitOrder::Chronological)
            .into_iter()
            .map(|c| c.id)
            .collect();
        assert_eq!(ids, vec!["early", "middle", "late"]);
    }

    #[test]
    fn empty_input_gives_no_commits() {
        assert!(aggregate_commits(Vec::new(), "", CommitOrder::FirstSeen).is_empty());
    }

    #[test]
    fn flatten_follows_commit_order() {
        let commits = aggregate_commits(
            vec![
                line("c1", "a.js", "js", 1, 9, 0),
                line("c2", "b.js", "js", 2, 9, 0),
                line("c1", "c.js", "js", 1, 9, 0),
            ],
            "",
            CommitOrder::FirstSeen,
        );
        let refs: Vec<_> = commits.iter().collect();
        let files: Vec<_> = flatten_lines(&refs).into_iter().map(|l| l.file.as_str()).collect();
        assert_eq!(files, vec!["a.js", "c.js", "b.js"]);
    }
}
