use ratatui::layout::{Constraint, Rect};
use ratatui::style::{Color, Style};
use ratatui::widgets::{Block, Borders, Cell, Paragraph, Row, Table};
use ratatui::Frame;

use super::super::draw::{enhanced_intensity_bar, get_intensity_color};
use super::super::state::Derived;
use super::header_cell;

/// Files in the visible window, longest first, with a per-type line tally.
pub fn draw_files_view(f: &mut Frame, area: Rect, derived: &Derived) {
    let title = format!("Files ({} lines of {} files)", derived.summary.total_lines, derived.files.len());
    if derived.files.is_empty() {
        let placeholder = Paragraph::new("No data").block(Block::default().title(title).borders(Borders::ALL));
        f.render_widget(placeholder, area);
        return;
    }

    let max_lines = derived.files.first().map(|u| u.lines).unwrap_or(0);
    let rows: Vec<Row> = derived
        .files
        .iter()
        .take(area.height.saturating_sub(3) as usize)
        .map(|unit| {
            let types = unit
                .types
                .iter()
                .map(|(kind, n)| format!("{kind}:{n}"))
                .collect::<Vec<_>>()
                .join(" ");
            Row::new(vec![
                Cell::from(crate::util::truncate(&unit.name, 48)),
                Cell::from(format!("{:>6}", unit.lines)),
                Cell::from(enhanced_intensity_bar(unit.lines, max_lines))
                    .style(get_intensity_color(unit.lines, max_lines)),
                Cell::from(types).style(Style::default().fg(Color::Gray)),
            ])
        })
        .collect();

    let table = Table::new(
        rows,
        [
            Constraint::Percentage(50),
            Constraint::Length(7),
            Constraint::Length(4),
            Constraint::Min(10),
        ],
    )
    .header(Row::new([
        header_cell("File", Color::Yellow),
        header_cell("Lines", Color::Green),
        header_cell("", Color::Green),
        header_cell("Types", Color::Cyan),
    ]))
    .block(Block::default().title(title).borders(Borders::ALL));
    f.render_widget(table, area);
}
