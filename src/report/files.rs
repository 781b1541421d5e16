use super::{describe_cutoff, wants_progress, Dataset};
use crate::aggregate::CommitOrder;
use crate::cli::CommonArgs;
use crate::files::file_units;
use crate::model::{FileUnit, FilesOutput, SCHEMA_VERSION};
use chrono::Utc;
use console::style;

pub fn exec(common: CommonArgs, limit: Option<usize>, json: bool, ndjson: bool) -> anyhow::Result<()> {
    let data = Dataset::load(&common, CommitOrder::FirstSeen, wants_progress(json || ndjson))?;
    let mut units = file_units(&data.visible());
    if let Some(limit) = limit {
        units.truncate(limit);
    }

    if json {
        let output = FilesOutput {
            version: SCHEMA_VERSION,
            generated_at: Utc::now(),
            data_path: data.data_path_string(),
            cutoff: data.cutoff,
            files: units,
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else if ndjson {
        for u in &units {
            println!("{}", serde_json::to_string(u)?);
        }
    } else {
        output_table(&units, &data);
    }
    Ok(())
}

fn output_table(units: &[FileUnit], data: &Dataset) {
    println!("{} ({})", style("Files").bold(), describe_cutoff(data.cutoff.as_ref()));
    println!("{:<50} {:>7}  {}", style("File").bold(), style("Lines").bold(), style("Types").bold());
    println!("{}", "─".repeat(80));
    for u in units {
        let types = u
            .types
            .iter()
            .map(|(kind, n)| format!("{kind}:{n}"))
            .collect::<Vec<_>>()
            .join(" ");
        println!("{:<50} {:>7}  {}", crate::util::truncate(&u.name, 50), u.lines, style(types).dim());
    }
}
