use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use ratatui::Frame;

use crate::tui::centered_rect;

/// Draw the modal help overlay listing the key bindings.
pub fn draw_help_overlay(f: &mut Frame, area: Rect) {
    let block = Block::default().title("Help").borders(Borders::ALL);
    let help_area = centered_rect(70, 80, area);

    f.render_widget(Clear, help_area);

    let help_text = vec![
        Line::from(vec![Span::styled(
            "locscope - Help",
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )]),
        Line::from(""),
        section("Time window:"),
        Line::from("  ←/→ or [/]  Move the cutoff slider by 1"),
        Line::from("  {/}         Move the cutoff slider by 10"),
        Line::from("  Home/End    Earliest commit / any time"),
        Line::from("  Mouse       Scroll wheel moves the slider"),
        Line::from(""),
        section("Brush (Scatter view):"),
        Line::from("  b           Start brushing"),
        Line::from("  arrows      Move the cursor (Shift for larger steps)"),
        Line::from("  Space/Enter Mark first corner, then second corner"),
        Line::from("  Esc         Clear the brush"),
        Line::from(""),
        section("Views:"),
        Line::from("  Tab         Next view (Scatter/Commits/Files)"),
        Line::from("  Shift+Tab   Previous view"),
        Line::from("  m           Time of day from lines / from commits"),
        Line::from(""),
        section("Commits:"),
        Line::from("  j/k or ↑/↓  Move selection"),
        Line::from("  PgUp/PgDn   Move by 10 commits"),
        Line::from("  /           Filter by id, author or file"),
        Line::from("  c           Copy commit link"),
        Line::from(""),
        section("General:"),
        Line::from("  h, F1       Toggle this help"),
        Line::from("  q           Quit application"),
        Line::from(""),
        Line::from(""),
        Line::from(vec![Span::styled(
            "Press 'h' or 'Esc' to close this help",
            Style::default().fg(Color::Gray),
        )]),
    ];

    let help_paragraph = Paragraph::new(help_text)
        .block(block)
        .wrap(ratatui::widgets::Wrap { trim: true });
    f.render_widget(help_paragraph, help_area);
}

fn section(title: &'static str) -> Line<'static> {
    Line::from(vec![Span::styled(
        title,
        Style::default()
            .fg(Color::Green)
            .add_modifier(Modifier::BOLD),
    )])
}
