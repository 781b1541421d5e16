use std::io;
use std::time::Duration;

use anyhow::Context;
use crossterm::event::{poll, read, DisableMouseCapture, EnableMouseCapture, Event};
use crossterm::execute;
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Borders, Tabs};
use ratatui::Terminal;
use tracing::info;

use super::events::{handle_key_events, handle_mouse_event};
use super::state::{Explorer, TuiState, ViewMode};
use super::views::{draw_commits_view, draw_files_view, draw_help_overlay, draw_scatter_view};
use crate::aggregate::CommitOrder;
use crate::cli::CommonArgs;
use crate::report::{wants_progress, Dataset};
use crate::stats::HourSource;

const STATUS_TTL: Duration = Duration::from_secs(3);

pub fn run(common: &CommonArgs, hours: HourSource) -> anyhow::Result<()> {
    let data = Dataset::load(common, CommitOrder::Chronological, wants_progress(false))?;
    let until = common.until.as_ref().and(data.cutoff);
    let explorer = Explorer::new(data.commits);
    info!(commits = explorer.commits.len(), "starting explorer");

    let mut state = TuiState {
        hours,
        progress: common.progress.unwrap_or(100),
        ..TuiState::default()
    };
    if let Some(cutoff) = until {
        state.pin_until(cutoff, explorer.slider.as_ref());
    }

    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnableMouseCapture)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;
    terminal.clear()?;

    let result = event_loop(&mut terminal, &explorer, &mut state);

    terminal.clear()?;
    execute!(terminal.backend_mut(), DisableMouseCapture)?;
    disable_raw_mode()?;
    result
}

fn event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    explorer: &Explorer,
    state: &mut TuiState,
) -> anyhow::Result<()> {
    loop {
        if state
            .status_message
            .as_ref()
            .is_some_and(|(_, at)| at.elapsed() > STATUS_TTL)
        {
            state.status_message = None;
        }

        let derived = explorer.derive(state);
        let view_state: &TuiState = state;
        terminal.draw(|f| {
            let size = f.size();
            if view_state.show_help {
                draw_help_overlay(f, size);
                return;
            }

            let chunks = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Length(3), Constraint::Min(0)])
                .split(size);

            let tabs = Tabs::new(ViewMode::TITLES.to_vec())
                .block(Block::default().borders(Borders::ALL).title("locscope"))
                .highlight_style(
                    Style::default()
                        .fg(Color::Yellow)
                        .add_modifier(Modifier::BOLD),
                )
                .select(view_state.tab_index);
            f.render_widget(tabs, chunks[0]);

            match view_state.view_mode {
                ViewMode::Scatter => draw_scatter_view(f, chunks[1], &derived, view_state),
                ViewMode::Commits => draw_commits_view(f, chunks[1], &derived, view_state),
                ViewMode::Files => draw_files_view(f, chunks[1], &derived),
            }
        })?;

        if poll(Duration::from_millis(200))? {
            match read()? {
                Event::Key(key_event) => {
                    if handle_key_events(key_event, state, explorer) {
                        return Ok(());
                    }
                }
                Event::Mouse(mouse_event) => handle_mouse_event(mouse_event, state, explorer),
                _ => {}
            }
        }
    }
}
