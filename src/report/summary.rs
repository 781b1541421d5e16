use super::{describe_cutoff, wants_progress, Dataset};
use crate::aggregate::CommitOrder;
use crate::cli::CommonArgs;
use crate::model::{Summary, SummaryOutput, SCHEMA_VERSION};
use crate::stats::{summarize, HourSource};
use chrono::Utc;
use console::style;

pub fn exec(common: CommonArgs, hours: HourSource, json: bool, ndjson: bool) -> anyhow::Result<()> {
    let data = Dataset::load(&common, CommitOrder::FirstSeen, wants_progress(json || ndjson))?;
    let summary = summarize(&data.visible(), hours);

    if json {
        output_json(&summary, &data, hours)?;
    } else if ndjson {
        println!("{}", serde_json::to_string(&summary)?);
    } else {
        output_table(&summary, &data);
    }
    Ok(())
}

fn output_json(summary: &Summary, data: &Dataset, hours: HourSource) -> anyhow::Result<()> {
    let output = SummaryOutput {
        version: SCHEMA_VERSION,
        generated_at: Utc::now(),
        data_path: data.data_path_string(),
        cutoff: data.cutoff,
        hours: hours.to_string(),
        summary: summary.clone(),
    };
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn output_table(summary: &Summary, data: &Dataset) {
    println!("{} ({})", style("Summary").bold(), describe_cutoff(data.cutoff.as_ref()));
    println!("{}", "─".repeat(40));
    println!("{:<26} {}", "Commits", style(summary.commits).cyan());
    println!("{:<26} {}", "Total LOC", style(summary.total_lines).cyan());
    println!("{:<26} {}", "Number of files", style(summary.files).cyan());
    println!(
        "{:<26} {}",
        "Most active time of day",
        style(
            summary
                .time_of_day
                .map(|t| t.to_string())
                .unwrap_or_else(|| "-".to_string())
        )
        .yellow()
    );
    match &summary.longest_file {
        Some(f) => println!("{:<26} {} ({})", "Max lines", style(f.lines).green(), f.file),
        None => println!("{:<26} -", "Max lines"),
    }
    println!("{:<26} {}", "Days worked", style(summary.days_worked).cyan());
}
