use super::{describe_cutoff, wants_progress, Dataset};
use crate::aggregate::CommitOrder;
use crate::breakdown::language_breakdown;
use crate::cli::CommonArgs;
use crate::model::{Breakdown, BreakdownOutput, SCHEMA_VERSION};
use chrono::Utc;
use console::style;

pub fn exec(common: CommonArgs, json: bool) -> anyhow::Result<()> {
    let data = Dataset::load(&common, CommitOrder::FirstSeen, wants_progress(json))?;
    let visible = data.visible();
    let breakdown = language_breakdown(&visible, &visible);

    if json {
        let output = BreakdownOutput {
            version: SCHEMA_VERSION,
            generated_at: Utc::now(),
            data_path: data.data_path_string(),
            cutoff: data.cutoff,
            breakdown,
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        println!("{} ({})", style("Languages").bold(), describe_cutoff(data.cutoff.as_ref()));
        print_breakdown(&breakdown);
    }
    Ok(())
}

pub(crate) fn print_breakdown(breakdown: &Breakdown) {
    if breakdown.languages.is_empty() {
        println!("No lines to break down");
        return;
    }
    println!(
        "{:<16} {:>8} {:>8}",
        style("Language").bold(),
        style("Lines").bold(),
        style("Share").bold()
    );
    println!("{}", "─".repeat(34));
    for l in &breakdown.languages {
        println!("{:<16} {:>8} {:>8}", l.language, l.lines, style(&l.percent).green());
    }
}
