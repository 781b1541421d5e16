use super::commits::print_commit_rows;
use super::languages::print_breakdown;
use super::{wants_progress, Dataset};
use crate::aggregate::CommitOrder;
use crate::breakdown::language_breakdown;
use crate::cli::CommonArgs;
use crate::model::{SelectionOutput, SCHEMA_VERSION};
use crate::scale::PlotArea;
use crate::window::{select_visible, selection_label, Brush};
use chrono::Utc;
use console::style;

pub fn exec(common: CommonArgs, brush: Brush, json: bool) -> anyhow::Result<()> {
    let data = Dataset::load(&common, CommitOrder::Chronological, wants_progress(json))?;
    let visible = data.visible();

    let selected = select_visible(&visible, Some(&brush), PlotArea::default());
    let breakdown = language_breakdown(&selected, &visible);

    if json {
        let output = SelectionOutput {
            version: SCHEMA_VERSION,
            generated_at: Utc::now(),
            data_path: data.data_path_string(),
            cutoff: data.cutoff,
            brush: brush.corners(),
            selected: selected.iter().map(|&c| c.clone()).collect(),
            breakdown,
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    println!("{}", style(selection_label(selected.len())).bold());
    if selected.is_empty() {
        return Ok(());
    }
    print_commit_rows(&selected);
    println!();
    print_breakdown(&breakdown);
    Ok(())
}
