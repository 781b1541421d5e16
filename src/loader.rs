use crate::error::{LocError, Result};
use crate::model::LineRecord;
use chrono::{DateTime, FixedOffset, NaiveDate};
use indicatif::{ProgressBar, ProgressStyle};
use serde::Deserialize;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use tracing::{debug, info};

/// A `loc.csv` row before validation. Every column is optional here so
/// that missing fields surface as `MalformedRow` rather than CSV errors.
#[derive(Debug, Deserialize)]
struct RawRow {
    file: Option<String>,
    commit: Option<String>,
    author: Option<String>,
    date: Option<String>,
    time: Option<String>,
    timezone: Option<String>,
    line: Option<String>,
    depth: Option<String>,
    length: Option<String>,
    #[serde(rename = "type")]
    kind: Option<String>,
    datetime: Option<String>,
}

/// Load line records from a `loc.csv` file.
pub fn load_lines<P: AsRef<Path>>(path: P, show_progress: bool) -> Result<Vec<LineRecord>> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| LocError::unavailable(path, e))?;

    let pb = if show_progress {
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        pb.set_message(format!("Loading {}...", path.display()));
        Some(pb)
    } else {
        None
    };

    let result = read_lines(BufReader::new(file));

    if let Some(pb) = pb {
        match &result {
            Ok(lines) => pb.finish_with_message(format!("Loaded {} lines", lines.len())),
            Err(_) => pb.finish_and_clear(),
        }
    }

    let lines = result?;
    info!(path = %path.display(), rows = lines.len(), "loaded line records");
    Ok(lines)
}

/// Parse line records from any CSV source with a header row.
pub fn read_lines<R: Read>(reader: R) -> Result<Vec<LineRecord>> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut lines = Vec::new();
    for (idx, raw) in rdr.deserialize::<RawRow>().enumerate() {
        let row = idx + 1;
        let raw = raw.map_err(|e| match e.position() {
            Some(pos) => LocError::malformed(pos.record() as usize, e.to_string()),
            None => LocError::Csv(e),
        })?;
        lines.push(parse_row(row, raw)?);
    }

    debug!(rows = lines.len(), "parsed loc rows");
    Ok(lines)
}

fn parse_row(row: usize, raw: RawRow) -> Result<LineRecord> {
    let file = required(row, "file", raw.file)?;
    let commit = required(row, "commit", raw.commit)?;
    let author = required(row, "author", raw.author)?;
    let date_str = required(row, "date", raw.date)?;
    let time = required(row, "time", raw.time)?;
    let timezone = required(row, "timezone", raw.timezone)?;
    let kind = required(row, "type", raw.kind)?;

    let line = parse_count(row, "line", raw.line)?;
    if line == 0 {
        return Err(LocError::malformed(row, "line must be at least 1"));
    }
    let depth = parse_count(row, "depth", raw.depth)?;
    let length = parse_count(row, "length", raw.length)?;

    let date = NaiveDate::parse_from_str(&date_str, "%Y-%m-%d")
        .map_err(|e| LocError::malformed(row, format!("invalid date '{date_str}': {e}")))?;

    let datetime = match raw.datetime.filter(|s| !s.is_empty()) {
        Some(s) => DateTime::parse_from_rfc3339(&s)
            .map_err(|e| LocError::malformed(row, format!("invalid datetime '{s}': {e}")))?,
        None => midnight_at(&date_str, &timezone)
            .map_err(|e| LocError::malformed(row, e.to_string()))?,
    };

    Ok(LineRecord {
        file,
        line,
        depth,
        length,
        kind,
        author,
        commit,
        date,
        time,
        timezone,
        datetime,
    })
}

/// Rebuild a timestamp as `date + "T00:00" + timezone`.
pub fn midnight_at(date: &str, timezone: &str) -> Result<DateTime<FixedOffset>> {
    let offset = if timezone.eq_ignore_ascii_case("z") {
        "+00:00"
    } else {
        timezone
    };
    let composed = format!("{date}T00:00{offset}");
    DateTime::parse_from_str(&composed, "%Y-%m-%dT%H:%M%:z")
        .map_err(|e| LocError::InvalidDate(format!("'{composed}': {e}")))
}

fn required(row: usize, field: &str, value: Option<String>) -> Result<String> {
    match value {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(LocError::malformed(row, format!("missing field '{field}'"))),
    }
}

fn parse_count(row: usize, field: &str, value: Option<String>) -> Result<u32> {
    let v = required(row, field, value)?;
    v.parse::<u32>()
        .map_err(|_| LocError::malformed(row, format!("field '{field}' is not a non-negative integer: '{v}'")))
}
