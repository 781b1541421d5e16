use ratatui::style::{Color, Modifier, Style};

const LEVELS: [&str; 8] = ["▁", "▂", "▃", "▄", "▅", "▆", "▇", "█"];

/// Returns a compact bar of fixed width (3) based on value/max.
pub fn enhanced_intensity_bar(value: usize, max: usize) -> String {
    const WIDTH: usize = 3;
    if max == 0 {
        return "▁▁▁".to_string();
    }

    let ratio = value as f64 / max as f64;
    let filled = ((ratio * WIDTH as f64).round() as usize).min(WIDTH);
    let intensity_idx = ((ratio * (LEVELS.len() - 1) as f64).round() as usize)
        .min(LEVELS.len() - 1);

    let bar_char = LEVELS[intensity_idx];
    bar_char.repeat(filled) + &"░".repeat(WIDTH - filled)
}

/// Colour for a commit dot by its size relative to the largest commit.
pub fn intensity_color(value: usize, max: usize) -> Color {
    if max == 0 {
        return Color::White;
    }

    let ratio = value as f64 / max as f64;
    if ratio > 0.8 {
        Color::Red
    } else if ratio > 0.6 {
        Color::Yellow
    } else if ratio > 0.4 {
        Color::Green
    } else if ratio > 0.2 {
        Color::Cyan
    } else {
        Color::Blue
    }
}

pub fn get_intensity_color(value: usize, max: usize) -> Style {
    let color = intensity_color(value, max);
    match color {
        Color::Red | Color::Yellow => Style::default().fg(color).add_modifier(Modifier::BOLD),
        _ => Style::default().fg(color),
    }
}
