use crate::error::{LocError, Result};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use tracing::info;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    #[serde(default)]
    pub title: String,
    #[serde(deserialize_with = "year_as_string")]
    pub year: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Project {
    /// Every field value joined by newlines, lowercased.
    fn haystack(&self) -> String {
        let mut parts = vec![self.title.clone(), self.year.clone()];
        parts.extend(self.extra.values().map(value_text));
        parts.join("\n").to_lowercase()
    }
}

fn value_text(v: &Value) -> String {
    match v {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn year_as_string<'de, D: Deserializer<'de>>(d: D) -> std::result::Result<String, D::Error> {
    match Value::deserialize(d)? {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        other => Err(serde::de::Error::custom(format!(
            "year must be a string or number, got {other}"
        ))),
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YearSlice {
    pub year: String,
    pub count: usize,
    pub proportion: f64,
}

pub fn load_projects<P: AsRef<Path>>(path: P) -> Result<Vec<Project>> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| LocError::unavailable(path, e))?;
    let projects = read_projects(BufReader::new(file))?;
    info!(path = %path.display(), projects = projects.len(), "loaded projects");
    Ok(projects)
}

pub fn read_projects<R: Read>(reader: R) -> Result<Vec<Project>> {
    Ok(serde_json::from_reader(reader)?)
}

/// Case-insensitive match against all of a project's values.
pub fn search<'a>(projects: &'a [Project], query: &str) -> Vec<&'a Project> {
    let query = query.trim().to_lowercase();
    projects
        .iter()
        .filter(|p| query.is_empty() || p.haystack().contains(&query))
        .collect()
}

pub fn filter_year<'a>(projects: &[&'a Project], year: &str) -> Vec<&'a Project> {
    projects.iter().copied().filter(|p| p.year == year).collect()
}

/// Project count per year, in the order years first appear.
pub fn year_rollup(projects: &[&Project]) -> Vec<YearSlice> {
    let mut order: Vec<&str> = Vec::new();
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for p in projects {
        let count = counts.entry(p.year.as_str()).or_insert_with(|| {
            order.push(p.year.as_str());
            0
        });
        *count += 1;
    }

    let total = projects.len();
    order
        .into_iter()
        .map(|year| {
            let count = counts[year];
            YearSlice {
                year: year.to_string(),
                count,
                proportion: count as f64 / total as f64,
            }
        })
        .collect()
}
