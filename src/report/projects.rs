use crate::breakdown::format_percent;
use crate::model::SCHEMA_VERSION;
use crate::projects::{filter_year, load_projects, search, Project, YearSlice};
use anyhow::Context;
use chrono::{DateTime, Utc};
use console::style;
use serde::Serialize;
use std::path::Path;

#[derive(Serialize)]
struct ProjectsOutput<'a> {
    version: u32,
    generated_at: DateTime<Utc>,
    query: Option<&'a str>,
    year: Option<&'a str>,
    years: Vec<YearSlice>,
    projects: Vec<&'a Project>,
}

pub fn exec(path: &Path, query: Option<&str>, year: Option<&str>, json: bool) -> anyhow::Result<()> {
    let projects = load_projects(path)
        .with_context(|| format!("Failed to load projects from {}", path.display()))?;

    // Slices follow the search, not the year filter.
    let matching = search(&projects, query.unwrap_or(""));
    let years = crate::projects::year_rollup(&matching);
    let listed = match year {
        Some(y) => filter_year(&matching, y),
        None => matching,
    };

    if json {
        let output = ProjectsOutput {
            version: SCHEMA_VERSION,
            generated_at: Utc::now(),
            query,
            year,
            years,
            projects: listed,
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    println!("{}", style("Projects by year").bold());
    println!("{}", "─".repeat(30));
    for s in &years {
        let marker = if Some(s.year.as_str()) == year { "◄" } else { "" };
        println!(
            "{:<8} {:>4} {:>8} {}",
            s.year,
            style(s.count).cyan(),
            format_percent(s.proportion),
            style(marker).yellow()
        );
    }
    println!();
    for p in &listed {
        println!("{} {}", style(&p.year).dim(), style(&p.title).bold());
        if let Some(desc) = p.extra.get("description").and_then(|d| d.as_str()) {
            println!("     {desc}");
        }
    }
    if listed.is_empty() {
        println!("No projects match");
    }
    Ok(())
}
