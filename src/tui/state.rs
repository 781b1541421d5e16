use crate::breakdown::language_breakdown;
use crate::files::file_units;
use crate::model::{Breakdown, CommitSummary, FileUnit, Summary};
use crate::scale::{PlotArea, ScatterScales};
use crate::stats::{summarize, HourSource};
use crate::window::{filter_until, select_visible, Brush, TimeSlider};
use chrono::{DateTime, FixedOffset};

/// Loaded data and the slider over its full time range. Built once.
pub struct Explorer {
    pub commits: Vec<CommitSummary>,
    pub slider: Option<TimeSlider>,
}

impl Explorer {
    pub fn new(commits: Vec<CommitSummary>) -> Self {
        let slider = TimeSlider::for_commits(&commits);
        Self { commits, slider }
    }

    /// The exact `until` instant when one is pinned, otherwise the slider
    /// position; `None` at 100 ("any time").
    pub fn cutoff(&self, state: &TuiState) -> Option<DateTime<FixedOffset>> {
        if let Some(until) = state.until {
            return Some(until);
        }
        if state.progress >= 100 {
            return None;
        }
        self.slider.map(|s| s.cutoff_at(state.progress as f64))
    }

    /// Everything the views need for the current interaction state.
    /// Scales are refitted to the visible commits, as `select` does.
    pub fn derive(&self, state: &TuiState) -> Derived<'_> {
        let cutoff = self.cutoff(state);
        let visible = filter_until(&self.commits, cutoff.as_ref());
        let scales = ScatterScales::for_commits(visible.iter().copied(), PlotArea::default());
        let selected = select_visible(&visible, state.active_brush().as_ref(), PlotArea::default());
        let summary = summarize(&visible, state.hours);
        let breakdown = language_breakdown(&selected, &visible);
        let files = file_units(&visible);
        let listed = state.filter_commits(&visible);
        Derived {
            cutoff,
            scales,
            visible,
            selected,
            listed,
            summary,
            breakdown,
            files,
        }
    }
}

pub struct Derived<'a> {
    pub cutoff: Option<DateTime<FixedOffset>>,
    pub scales: Option<ScatterScales>,
    pub visible: Vec<&'a CommitSummary>,
    pub selected: Vec<&'a CommitSummary>,
    pub listed: Vec<&'a CommitSummary>,
    pub summary: Summary,
    pub breakdown: Breakdown,
    pub files: Vec<FileUnit>,
}

#[derive(Clone, Copy, PartialEq, Debug)]
pub enum ViewMode {
    Scatter,
    Commits,
    Files,
}

impl ViewMode {
    pub const TITLES: [&'static str; 3] = ["Scatter", "Commits", "Files"];

    pub fn from_index(i: usize) -> Self {
        match i {
            1 => ViewMode::Commits,
            2 => ViewMode::Files,
            _ => ViewMode::Scatter,
        }
    }
}

pub const BRUSH_STEP: f64 = 10.0;

pub struct TuiState {
    pub tab_index: usize,
    pub view_mode: ViewMode,
    pub show_help: bool,
    pub progress: u8,
    /// Exact cutoff from `--until`; cleared once the slider moves.
    pub until: Option<DateTime<FixedOffset>>,
    pub hours: HourSource,
    pub brush_mode: bool,
    pub cursor: (f64, f64),
    pub anchor: Option<(f64, f64)>,
    pub brush: Option<Brush>,
    pub search_mode: bool,
    pub search_query: String,
    pub commit_selected: usize,
    pub status_message: Option<(String, std::time::Instant)>,
}

impl Default for TuiState {
    fn default() -> Self {
        let area = PlotArea::default();
        Self {
            tab_index: 0,
            view_mode: ViewMode::Scatter,
            show_help: false,
            progress: 100,
            until: None,
            hours: HourSource::Lines,
            brush_mode: false,
            cursor: (area.width / 2.0, area.height / 2.0),
            anchor: None,
            brush: None,
            search_mode: false,
            search_query: String::new(),
            commit_selected: 0,
            status_message: None,
        }
    }
}

impl TuiState {
    /// The committed brush, or the one being dragged out from the anchor.
    pub fn active_brush(&self) -> Option<Brush> {
        match self.anchor {
            Some(anchor) => Some(Brush::new(anchor, self.cursor)),
            None => self.brush,
        }
    }

    pub fn move_cursor(&mut self, dx: f64, dy: f64) {
        let area = PlotArea::default();
        self.cursor = (
            (self.cursor.0 + dx).clamp(0.0, area.width),
            (self.cursor.1 + dy).clamp(0.0, area.height),
        );
    }

    /// First press anchors a corner, second press completes the brush.
    pub fn brush_point(&mut self) {
        match self.anchor.take() {
            Some(anchor) => {
                self.brush = Some(Brush::new(anchor, self.cursor));
                self.brush_mode = false;
            }
            None => {
                self.anchor = Some(self.cursor);
                self.brush = None;
            }
        }
    }

    pub fn clear_brush(&mut self) {
        self.anchor = None;
        self.brush = None;
        self.brush_mode = false;
    }

    pub fn step_progress(&mut self, delta: i16) {
        self.set_progress((self.progress as i16 + delta).clamp(0, 100) as u8);
    }

    /// Pin an exact cutoff. The gauge shows the nearest slider position
    /// but filtering uses `cutoff` itself.
    pub fn pin_until(&mut self, cutoff: DateTime<FixedOffset>, slider: Option<&TimeSlider>) {
        if let Some(slider) = slider {
            self.progress = slider.progress_of(&cutoff).round() as u8;
        }
        self.until = Some(cutoff);
    }

    pub fn set_progress(&mut self, progress: u8) {
        self.progress = progress.min(100);
        self.until = None;
    }

    pub fn filter_commits<'a>(&self, commits: &[&'a CommitSummary]) -> Vec<&'a CommitSummary> {
        let query = self.search_query.to_lowercase();
        if query.is_empty() {
            return commits.to_vec();
        }
        commits
            .iter()
            .copied()
            .filter(|c| {
                c.id.to_lowercase().contains(&query)
                    || c.author.to_lowercase().contains(&query)
                    || c.lines.iter().any(|l| l.file.to_lowercase().contains(&query))
            })
            .collect()
    }

    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = Some((message.into(), std::time::Instant::now()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::{aggregate_commits, fixtures::line, CommitOrder};
    use pretty_assertions::assert_eq;

    fn explorer() -> Explorer {
        Explorer::new(aggregate_commits(
            vec![
                line("c1", "a.js", "js", 1, 2, 0),
                line("c2", "b.css", "css", 10, 9, 30),
                line("c3", "a.js", "js", 20, 20, 0),
            ],
            "",
            CommitOrder::Chronological,
        ))
    }

    #[test]
    fn slider_drives_visible_commits() {
        let ex = explorer();
        let mut state = TuiState::default();
        assert_eq!(ex.derive(&state).visible.len(), 3);
        assert_eq!(ex.derive(&state).cutoff, None);
        state.step_progress(-100);
        assert_eq!(state.progress, 0);
        assert_eq!(ex.derive(&state).visible.len(), 1);
        state.step_progress(120);
        assert_eq!(state.progress, 100);
    }

    #[test]
    fn brush_drag_then_commit() {
        let ex = explorer();
        let mut state = TuiState::default();
        state.brush_mode = true;
        state.cursor = (0.0, 0.0);
        state.brush_point();
        assert!(state.anchor.is_some());
        state.move_cursor(5000.0, 5000.0);
        assert_eq!(state.cursor, (1000.0, 600.0));
        assert_eq!(ex.derive(&state).selected.len(), 3);
        state.brush_point();
        assert!(!state.brush_mode);
        assert_eq!(state.anchor, None);
        assert_eq!(ex.derive(&state).selected.len(), 3);
        state.clear_brush();
        let d = ex.derive(&state);
        assert!(d.selected.is_empty());
        assert_eq!(d.breakdown.total_lines, 3);
    }

    fn spread_out() -> Explorer {
        Explorer::new(aggregate_commits(
            vec![
                line("c1", "a.js", "js", 1, 10, 0),
                line("c2", "a.js", "js", 10, 12, 0),
                line("c3", "b.css", "css", 30, 14, 0),
            ],
            "",
            CommitOrder::Chronological,
        ))
    }

    #[test]
    fn brush_matches_select_command_after_cutoff() {
        let ex = spread_out();
        let mut state = TuiState::default();
        state.pin_until(ex.commits[1].datetime, ex.slider.as_ref());
        state.brush = Some(Brush::new((900.0, 0.0), (1000.0, 600.0)));

        let d = ex.derive(&state);
        let ids: Vec<&str> = d.selected.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, ["c2"]);

        let visible = filter_until(&ex.commits, Some(&ex.commits[1].datetime));
        let cli = select_visible(&visible, state.brush.as_ref(), PlotArea::default());
        assert_eq!(d.selected, cli);
    }

    #[test]
    fn pinned_until_is_exact() {
        let ex = spread_out();
        let mut state = TuiState::default();

        let before_first = ex.commits[0].datetime - chrono::Duration::hours(1);
        state.pin_until(before_first, ex.slider.as_ref());
        assert_eq!(state.progress, 0);
        assert!(ex.derive(&state).visible.is_empty());

        // Between slider grid points: c2 must stay visible.
        let just_after_c2 = ex.commits[1].datetime + chrono::Duration::minutes(1);
        state.pin_until(just_after_c2, ex.slider.as_ref());
        assert_eq!(ex.derive(&state).visible.len(), 2);
        assert_eq!(ex.derive(&state).cutoff, Some(just_after_c2));

        state.step_progress(0);
        assert_eq!(state.until, None);
    }

    #[test]
    fn search_matches_author_id_and_file() {
        let ex = explorer();
        let mut state = TuiState::default();
        state.search_query = "B.CSS".into();
        let listed = ex.derive(&state).listed;
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].id, "c2");
        state.search_query = "nadine".into();
        assert_eq!(ex.derive(&state).listed.len(), 3);
    }
}
