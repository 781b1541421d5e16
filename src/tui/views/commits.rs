use std::collections::BTreeSet;

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState, Wrap};
use ratatui::Frame;

use super::super::draw::{enhanced_intensity_bar, get_intensity_color};
use super::super::layout::visible_window;
use super::super::state::{Derived, TuiState};
use super::header_cell;
use crate::model::CommitSummary;

/// Render the commit list next to a detail card for the commit under the cursor.
pub fn draw_commits_view(f: &mut Frame, area: Rect, derived: &Derived, state: &TuiState) {
    let outer = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(1)])
        .split(area);
    let inner = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(65), Constraint::Percentage(35)])
        .split(outer[0]);

    let listed = &derived.listed;
    let title = if state.search_query.is_empty() {
        format!("Commits ({} of {})", listed.len(), derived.visible.len())
    } else {
        format!(
            "Commits matching '{}' ({} of {})",
            state.search_query,
            listed.len(),
            derived.visible.len()
        )
    };

    if listed.is_empty() {
        let empty = Paragraph::new("No commits in view").block(Block::default().title(title).borders(Borders::ALL));
        f.render_widget(empty, outer[0]);
    } else {
        let height = inner[0].height.saturating_sub(3) as usize;
        let selected = state.commit_selected.min(listed.len() - 1);
        let (start, end) = visible_window(listed.len(), selected, height);
        let max_lines = listed.iter().map(|c| c.total_lines).max().unwrap_or(0);

        let rows: Vec<Row> = listed[start..end]
            .iter()
            .enumerate()
            .map(|(offset, c)| {
                let is_selected = start + offset == selected;
                let id_cell = if is_selected {
                    Cell::from(format!("{} ◄", c.short_id())).style(
                        Style::default()
                            .fg(Color::Yellow)
                            .add_modifier(Modifier::BOLD),
                    )
                } else {
                    Cell::from(c.short_id()).style(Style::default().fg(Color::Cyan))
                };
                Row::new(vec![
                    id_cell,
                    Cell::from(c.datetime.format("%Y-%m-%d %H:%M").to_string()),
                    Cell::from(c.author.clone()).style(Style::default().fg(Color::Magenta)),
                    Cell::from(format!("{:>6}", c.total_lines)),
                    Cell::from(enhanced_intensity_bar(c.total_lines, max_lines))
                        .style(get_intensity_color(c.total_lines, max_lines)),
                ])
            })
            .collect();

        let mut table_state = TableState::default();
        table_state.select(Some(selected - start));

        let table = Table::new(
            rows,
            [
                Constraint::Length(11),
                Constraint::Length(17),
                Constraint::Percentage(30),
                Constraint::Length(7),
                Constraint::Length(4),
            ],
        )
        .header(Row::new([
            header_cell("Commit", Color::Yellow),
            header_cell("When", Color::Yellow),
            header_cell("Author", Color::Yellow),
            header_cell("Lines", Color::Yellow),
            header_cell("", Color::Yellow),
        ]))
        .block(Block::default().title(title).borders(Borders::ALL));
        f.render_stateful_widget(table, inner[0], &mut table_state);

        draw_commit_card(f, inner[1], listed[selected]);
    }

    let hint = if state.search_mode {
        format!("Search: {}_", state.search_query)
    } else if let Some((message, _)) = &state.status_message {
        message.clone()
    } else {
        "j/k move  / search  c copy link  tab switch view  h help".to_string()
    };
    f.render_widget(Paragraph::new(hint).style(Style::default().fg(Color::Gray)), outer[1]);
}

/// The fields a hover tooltip would show for one commit.
fn draw_commit_card(f: &mut Frame, area: Rect, commit: &CommitSummary) {
    let label = Style::default().fg(Color::White);
    let files: BTreeSet<&str> = commit.lines.iter().map(|l| l.file.as_str()).collect();
    let info = vec![
        Line::from(Span::styled(
            "Commit",
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled("ID: ", label),
            Span::styled(commit.id.clone(), Style::default().fg(Color::Cyan)),
        ]),
        Line::from(vec![
            Span::styled("Link: ", label),
            Span::styled(commit.url.clone(), Style::default().fg(Color::Blue)),
        ]),
        Line::from(vec![
            Span::styled("Date: ", label),
            Span::styled(commit.datetime.format("%A, %B %-d, %Y").to_string(), Style::default().fg(Color::Green)),
        ]),
        Line::from(vec![
            Span::styled("Time: ", label),
            Span::styled(commit.datetime.format("%-I:%M %p").to_string(), Style::default().fg(Color::Green)),
        ]),
        Line::from(vec![
            Span::styled("Author: ", label),
            Span::styled(commit.author.clone(), Style::default().fg(Color::Magenta)),
        ]),
        Line::from(vec![
            Span::styled("Lines edited: ", label),
            Span::raw(commit.total_lines.to_string()),
        ]),
        Line::from(vec![
            Span::styled("Files: ", label),
            Span::raw(files.len().to_string()),
        ]),
    ];

    let card = Paragraph::new(info)
        .block(
            Block::default()
                .title("Info")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Blue)),
        )
        .wrap(Wrap { trim: true });
    f.render_widget(card, area);
}
