use crate::model::CommitSummary;
use chrono::{DateTime, Duration, DurationRound, FixedOffset, Utc};

/// Linear map from a time interval onto a numeric range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeScale {
    start: DateTime<FixedOffset>,
    end: DateTime<FixedOffset>,
    range: (f64, f64),
}

impl TimeScale {
    pub fn new(start: DateTime<FixedOffset>, end: DateTime<FixedOffset>, range: (f64, f64)) -> Self {
        Self { start, end, range }
    }

    /// Scale over the `datetime` extent of `commits`, or `None` when empty.
    pub fn over<'a, I>(commits: I, range: (f64, f64)) -> Option<Self>
    where
        I: IntoIterator<Item = &'a CommitSummary>,
    {
        let mut extent: Option<(DateTime<FixedOffset>, DateTime<FixedOffset>)> = None;
        for c in commits {
            extent = Some(match extent {
                None => (c.datetime, c.datetime),
                Some((lo, hi)) => (lo.min(c.datetime), hi.max(c.datetime)),
            });
        }
        extent.map(|(lo, hi)| Self::new(lo, hi, range))
    }

    pub fn domain(&self) -> (DateTime<FixedOffset>, DateTime<FixedOffset>) {
        (self.start, self.end)
    }

    pub fn range(&self) -> (f64, f64) {
        self.range
    }

    /// Extend the domain outward to whole days in the domain's offset.
    pub fn nice(self) -> Self {
        let day = Duration::days(1);
        let start = self
            .start
            .duration_trunc(day)
            .unwrap_or(self.start);
        let end_floor = self.end.duration_trunc(day).unwrap_or(self.end);
        let end = if end_floor == self.end {
            self.end
        } else {
            end_floor + day
        };
        Self { start, end, ..self }
    }

    pub fn apply(&self, t: &DateTime<FixedOffset>) -> f64 {
        let (r0, r1) = self.range;
        let span = (self.end - self.start).num_milliseconds();
        if span == 0 {
            return (r0 + r1) / 2.0;
        }
        let frac = (*t - self.start).num_milliseconds() as f64 / span as f64;
        r0 + frac * (r1 - r0)
    }

    pub fn invert(&self, value: f64) -> DateTime<FixedOffset> {
        let (r0, r1) = self.range;
        if r1 == r0 {
            return self.start;
        }
        let frac = (value - r0) / (r1 - r0);
        let span = (self.end - self.start).num_milliseconds();
        let offset_ms = (span as f64 * frac).round() as i64;
        let ms = self.start.timestamp_millis() + offset_ms;
        DateTime::<Utc>::from_timestamp_millis(ms)
            .map(|t| t.with_timezone(self.end.offset()))
            .unwrap_or(self.end)
    }
}

/// Linear map between two numeric intervals.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearScale {
    domain: (f64, f64),
    range: (f64, f64),
}

impl LinearScale {
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
        Self { domain, range }
    }

    pub fn apply(&self, v: f64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        if d1 == d0 {
            return (r0 + r1) / 2.0;
        }
        r0 + (v - d0) / (d1 - d0) * (r1 - r0)
    }

    pub fn invert(&self, v: f64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        if r1 == r0 {
            return d0;
        }
        d0 + (v - r0) / (r1 - r0) * (d1 - d0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Margin {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

/// Screen-space geometry of the scatter plot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlotArea {
    pub width: f64,
    pub height: f64,
    pub margin: Margin,
}

impl Default for PlotArea {
    fn default() -> Self {
        Self {
            width: 1000.0,
            height: 600.0,
            margin: Margin {
                top: 10.0,
                right: 10.0,
                bottom: 30.0,
                left: 20.0,
            },
        }
    }
}

impl PlotArea {
    pub fn left(&self) -> f64 {
        self.margin.left
    }

    pub fn right(&self) -> f64 {
        self.width - self.margin.right
    }

    pub fn top(&self) -> f64 {
        self.margin.top
    }

    pub fn bottom(&self) -> f64 {
        self.height - self.margin.bottom
    }
}

/// The x (time) and y (hour of day) scales shared by plotting and brushing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScatterScales {
    pub area: PlotArea,
    pub x: TimeScale,
    pub y: LinearScale,
}

impl ScatterScales {
    pub fn for_commits<'a, I>(commits: I, area: PlotArea) -> Option<Self>
    where
        I: IntoIterator<Item = &'a CommitSummary>,
    {
        let x = TimeScale::over(commits, (area.left(), area.right()))?.nice();
        let y = LinearScale::new((0.0, 24.0), (area.bottom(), area.top()));
        Some(Self { area, x, y })
    }

    /// Screen position of a commit: x from its timestamp, y from its hour.
    pub fn project(&self, commit: &CommitSummary) -> (f64, f64) {
        (self.x.apply(&commit.datetime), self.y.apply(commit.hour_frac))
    }
}
