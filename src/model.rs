use chrono::{DateTime, FixedOffset, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

pub const SCHEMA_VERSION: u32 = 1;

pub const DEFAULT_COMMIT_URL: &str = "https://github.com/nadinemarcus/DSC209R_portfolio/commit/";

/// One line of source code as touched by one commit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineRecord {
    pub file: String,
    pub line: u32,
    pub depth: u32,
    pub length: u32,
    #[serde(rename = "type")]
    pub kind: String,
    pub author: String,
    pub commit: String,
    pub date: NaiveDate,
    pub time: String,
    pub timezone: String,
    pub datetime: DateTime<FixedOffset>,
}

/// One commit, derived from the lines that share its id.
///
/// `lines` is owned by the summary but is left out of serialization,
/// equality and the `Debug` output.
#[derive(Clone, Serialize, Deserialize)]
pub struct CommitSummary {
    pub id: String,
    pub url: String,
    pub author: String,
    pub date: NaiveDate,
    pub time: String,
    pub timezone: String,
    pub datetime: DateTime<FixedOffset>,
    pub hour_frac: f64,
    pub total_lines: usize,
    #[serde(skip)]
    pub lines: Vec<LineRecord>,
}

impl CommitSummary {
    pub fn short_id(&self) -> String {
        self.id.chars().take(8).collect()
    }
}

impl PartialEq for CommitSummary {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
            && self.url == other.url
            && self.author == other.author
            && self.date == other.date
            && self.time == other.time
            && self.timezone == other.timezone
            && self.datetime == other.datetime
            && self.hour_frac == other.hour_frac
            && self.total_lines == other.total_lines
    }
}

impl fmt::Debug for CommitSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommitSummary")
            .field("id", &self.id)
            .field("url", &self.url)
            .field("author", &self.author)
            .field("date", &self.date)
            .field("time", &self.time)
            .field("timezone", &self.timezone)
            .field("datetime", &self.datetime)
            .field("hour_frac", &self.hour_frac)
            .field("total_lines", &self.total_lines)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimeOfDay {
    Night,
    Morning,
    Afternoon,
    Evening,
}

impl TimeOfDay {
    pub fn from_hour(hour: f64) -> Self {
        if hour < 6.0 {
            TimeOfDay::Night
        } else if hour < 12.0 {
            TimeOfDay::Morning
        } else if hour < 17.0 {
            TimeOfDay::Afternoon
        } else {
            TimeOfDay::Evening
        }
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TimeOfDay::Night => "Night",
            TimeOfDay::Morning => "Morning",
            TimeOfDay::Afternoon => "Afternoon",
            TimeOfDay::Evening => "Evening",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileLength {
    pub file: String,
    pub lines: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    pub commits: usize,
    pub total_lines: usize,
    pub files: usize,
    pub time_of_day: Option<TimeOfDay>,
    pub longest_file: Option<FileLength>,
    pub days_worked: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LanguageShare {
    pub language: String,
    pub lines: usize,
    pub proportion: f64,
    pub percent: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Breakdown {
    pub total_lines: usize,
    pub languages: Vec<LanguageShare>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileUnit {
    pub name: String,
    pub lines: usize,
    pub types: Vec<(String, usize)>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummaryOutput {
    pub version: u32,
    pub generated_at: DateTime<Utc>,
    pub data_path: String,
    pub cutoff: Option<DateTime<FixedOffset>>,
    pub hours: String,
    pub summary: Summary,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommitsOutput {
    pub version: u32,
    pub generated_at: DateTime<Utc>,
    pub data_path: String,
    pub cutoff: Option<DateTime<FixedOffset>>,
    pub commits: Vec<CommitSummary>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SelectionOutput {
    pub version: u32,
    pub generated_at: DateTime<Utc>,
    pub data_path: String,
    pub cutoff: Option<DateTime<FixedOffset>>,
    pub brush: [f64; 4],
    pub selected: Vec<CommitSummary>,
    pub breakdown: Breakdown,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BreakdownOutput {
    pub version: u32,
    pub generated_at: DateTime<Utc>,
    pub data_path: String,
    pub cutoff: Option<DateTime<FixedOffset>>,
    pub breakdown: Breakdown,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FilesOutput {
    pub version: u32,
    pub generated_at: DateTime<Utc>,
    pub data_path: String,
    pub cutoff: Option<DateTime<FixedOffset>>,
    pub files: Vec<FileUnit>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn line(commit: &str) -> LineRecord {
        let tz = FixedOffset::west_opt(8 * 3600).unwrap();
        LineRecord {
            file: "src/main.js".into(),
            line: 1,
            depth: 0,
            length: 10,
            kind: "js".into(),
            author: "nadine".into(),
            commit: commit.into(),
            date: NaiveDate::from_ymd_opt(2024, 1, 31).unwrap(),
            time: "14:27:03-08:00".into(),
            timezone: "-08:00".into(),
            datetime: tz.with_ymd_and_hms(2024, 1, 31, 14, 27, 3).unwrap(),
        }
    }

    fn summary(lines: Vec<LineRecord>) -> CommitSummary {
        let first = lines[0].clone();
        CommitSummary {
            id: first.commit.clone(),
            url: format!("{DEFAULT_COMMIT_URL}{}", first.commit),
            author: first.author,
            date: first.date,
            time: first.time,
            timezone: first.timezone,
            datetime: first.datetime,
            hour_frac: 14.45,
            total_lines: lines.len(),
            lines,
        }
    }

    #[test]
    fn time_of_day_buckets() {
        assert_eq!(TimeOfDay::from_hour(0.0), TimeOfDay::Night);
        assert_eq!(TimeOfDay::from_hour(5.99), TimeOfDay::Night);
        assert_eq!(TimeOfDay::from_hour(6.0), TimeOfDay::Morning);
        assert_eq!(TimeOfDay::from_hour(11.375), TimeOfDay::Morning);
        assert_eq!(TimeOfDay::from_hour(12.0), TimeOfDay::Afternoon);
        assert_eq!(TimeOfDay::from_hour(17.0), TimeOfDay::Evening);
        assert_eq!(TimeOfDay::Afternoon.to_string(), "Afternoon");
    }

    #[test]
    fn commit_lines_are_not_serialized() {
        let c = summary(vec![line("abc123"), line("abc123")]);
        let v = serde_json::to_value(&c).unwrap();
        assert!(v.get("lines").is_none());
        assert_eq!(v["total_lines"], 2);
        assert_eq!(v["id"], "abc123");
    }

    #[test]
    fn commit_equality_ignores_lines() {
        let a = summary(vec![line("abc123")]);
        let mut b = a.clone();
        b.lines.clear();
        assert_eq!(a, b);
        assert!(!format!("{a:?}").contains("src/main.js"));
    }

    #[test]
    fn line_type_is_renamed() {
        let v = serde_json::to_value(line("abc123")).unwrap();
        assert_eq!(v["type"], "js");
        assert!(v.get("kind").is_none());
    }
}
