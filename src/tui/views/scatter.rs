use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::canvas::{Canvas, Points, Rectangle};
use ratatui::widgets::{Block, Borders, Gauge, Paragraph, Wrap};
use ratatui::Frame;

use super::super::draw::intensity_color;
use super::super::state::{Derived, TuiState};
use crate::scale::PlotArea;
use crate::window::selection_label;

const BUCKET_COLORS: [Color; 5] = [Color::Blue, Color::Cyan, Color::Green, Color::Yellow, Color::Red];

/// Commits by date and hour of day, with the brush, the slider and the stats panel.
pub fn draw_scatter_view(f: &mut Frame, area: Rect, derived: &Derived, state: &TuiState) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(70), Constraint::Percentage(30)])
        .split(area);
    let left = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(3)])
        .split(columns[0]);

    draw_plot(f, left[0], derived, state);
    draw_slider(f, left[1], derived, state);
    draw_side_panel(f, columns[1], derived, state);
}

fn draw_plot(f: &mut Frame, area: Rect, derived: &Derived, state: &TuiState) {
    let plot = PlotArea::default();
    let title = if state.brush_mode {
        "Commits by time of day [brush: arrows move, space marks, esc clears]"
    } else {
        "Commits by time of day"
    };
    let block = Block::default().borders(Borders::ALL).title(title);

    let Some(scales) = derived.scales else {
        f.render_widget(Paragraph::new("No commits in view").block(block), area);
        return;
    };

    // Canvas y grows upward; screen y grows downward.
    let flip = |(x, y): (f64, f64)| (x, plot.height - y);

    let max_lines = derived.visible.iter().map(|c| c.total_lines).max().unwrap_or(0);
    let mut buckets: Vec<Vec<(f64, f64)>> = vec![Vec::new(); BUCKET_COLORS.len()];
    for c in &derived.visible {
        let color = intensity_color(c.total_lines, max_lines);
        let idx = BUCKET_COLORS.iter().position(|b| *b == color).unwrap_or(0);
        buckets[idx].push(flip(scales.project(c)));
    }
    let selected: Vec<(f64, f64)> = derived
        .selected
        .iter()
        .map(|c| flip(scales.project(c)))
        .collect();
    let brush = state.active_brush();
    let cursor = flip(state.cursor);
    let brush_mode = state.brush_mode;

    let canvas = Canvas::default()
        .block(block)
        .x_bounds([0.0, plot.width])
        .y_bounds([0.0, plot.height])
        .paint(move |ctx| {
            for hour in [0.0, 6.0, 12.0, 18.0, 24.0] {
                let (_, y) = flip((0.0, scales.y.apply(hour)));
                ctx.print(0.0, y, Span::styled(format!("{hour:02}"), Style::default().fg(Color::DarkGray)));
            }
            for (coords, color) in buckets.iter().zip(BUCKET_COLORS) {
                ctx.draw(&Points {
                    coords: coords.as_slice(),
                    color,
                });
            }
            ctx.layer();
            ctx.draw(&Points {
                coords: selected.as_slice(),
                color: Color::Magenta,
            });
            if let Some(b) = brush {
                let [x0, y0, x1, y1] = b.corners();
                ctx.draw(&Rectangle {
                    x: x0,
                    y: plot.height - y1,
                    width: x1 - x0,
                    height: y1 - y0,
                    color: Color::White,
                });
            }
            if brush_mode {
                ctx.print(cursor.0, cursor.1, Span::styled("+", Style::default().fg(Color::Yellow)));
            }
        });
    f.render_widget(canvas, area);
}

fn draw_slider(f: &mut Frame, area: Rect, derived: &Derived, state: &TuiState) {
    let label = match &derived.cutoff {
        Some(t) => t.format("%b %-d, %Y %-I:%M %p").to_string(),
        None => "any time".to_string(),
    };
    let gauge = Gauge::default()
        .block(Block::default().borders(Borders::ALL).title("Show commits until [←/→]"))
        .gauge_style(Style::default().fg(Color::Cyan))
        .percent(state.progress as u16)
        .label(label);
    f.render_widget(gauge, area);
}

fn draw_side_panel(f: &mut Frame, area: Rect, derived: &Derived, state: &TuiState) {
    let bold = Style::default().add_modifier(Modifier::BOLD);
    let summary = &derived.summary;
    let mut lines = vec![
        Line::from(Span::styled("Summary", bold.fg(Color::Yellow))),
        Line::from(format!("Commits:      {}", summary.commits)),
        Line::from(format!("Lines:        {}", summary.total_lines)),
        Line::from(format!("Files:        {}", summary.files)),
        Line::from(format!("Days worked:  {}", summary.days_worked)),
        Line::from(format!(
            "Time of day:  {} ({})",
            summary
                .time_of_day
                .map(|t| t.to_string())
                .unwrap_or_else(|| "-".to_string()),
            state.hours
        )),
    ];
    if let Some(longest) = &summary.longest_file {
        lines.push(Line::from(format!(
            "Longest:      {} ({})",
            crate::util::truncate(&longest.file, 24),
            longest.lines
        )));
    }

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(selection_label(derived.selected.len()), bold.fg(Color::Magenta))));
    let breakdown_title = if derived.selected.is_empty() {
        "Languages (all visible)"
    } else {
        "Languages (selection)"
    };
    lines.push(Line::from(Span::styled(breakdown_title, bold.fg(Color::Green))));
    for share in &derived.breakdown.languages {
        lines.push(Line::from(vec![
            Span::raw(format!("{:<10}", share.language)),
            Span::raw(format!("{:>6} lines ", share.lines)),
            Span::styled(share.percent.clone(), Style::default().fg(Color::Green)),
        ]));
    }

    if let Some((message, _)) = &state.status_message {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(message.clone(), Style::default().fg(Color::Gray))));
    }

    let panel = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title("Stats"))
        .wrap(Wrap { trim: true });
    f.render_widget(panel, area);
}
