use super::{describe_cutoff, wants_progress, Dataset};
use crate::aggregate::CommitOrder;
use crate::cli::CommonArgs;
use crate::model::{CommitSummary, CommitsOutput, SCHEMA_VERSION};
use chrono::Utc;
use console::style;

const TABLE_LIMIT: usize = 50;

pub fn exec(common: CommonArgs, order: CommitOrder, json: bool, ndjson: bool) -> anyhow::Result<()> {
    let data = Dataset::load(&common, order, wants_progress(json || ndjson))?;
    let visible = data.visible();

    if json {
        output_json(&visible, &data)?;
    } else if ndjson {
        output_ndjson(&visible)?;
    } else {
        output_table(&visible, &data);
    }
    Ok(())
}

fn output_json(commits: &[&CommitSummary], data: &Dataset) -> anyhow::Result<()> {
    let output = CommitsOutput {
        version: SCHEMA_VERSION,
        generated_at: Utc::now(),
        data_path: data.data_path_string(),
        cutoff: data.cutoff,
        commits: commits.iter().map(|&c| c.clone()).collect(),
    };
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn output_ndjson(commits: &[&CommitSummary]) -> anyhow::Result<()> {
    for c in commits {
        println!("{}", serde_json::to_string(c)?);
    }
    Ok(())
}

pub(crate) fn print_commit_rows(commits: &[&CommitSummary]) {
    println!(
        "{:<10} {:<20} {:<26} {:>6} {:>7}",
        style("Commit").bold(),
        style("Author").bold(),
        style("Date").bold(),
        style("Hour").bold(),
        style("Lines").bold()
    );
    println!("{}", "─".repeat(73));
    for c in commits.iter().take(TABLE_LIMIT) {
        println!(
            "{:<10} {:<20} {:<26} {:>6.2} {:>7}",
            c.short_id(),
            crate::util::truncate(&c.author, 20),
            c.datetime.format("%a %b %e %Y %H:%M"),
            c.hour_frac,
            c.total_lines
        );
    }
    if commits.len() > TABLE_LIMIT {
        println!("\n... and {} more commits", commits.len() - TABLE_LIMIT);
    }
}

fn output_table(commits: &[&CommitSummary], data: &Dataset) {
    println!(
        "{} {} ({})",
        style(commits.len()).cyan(),
        style("commits").bold(),
        describe_cutoff(data.cutoff.as_ref())
    );
    print_commit_rows(commits);
}
