use std::fmt;

use chrono::{Datelike, Duration, Local, NaiveDate};
use tracing::{debug, warn};

use crate::models::AttendanceEntry;

const MONTH_NAMES: [&str; 12] = [
    "enero",
    "febrero",
    "marzo",
    "abril",
    "mayo",
    "junio",
    "julio",
    "agosto",
    "septiembre",
    "octubre",
    "noviembre",
    "diciembre",
];

pub trait Clock {
    fn today(&self) -> NaiveDate;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AttendanceFilter {
    #[default]
    All,
    ThisWeek,
    /// Zero-based month of the year, matched regardless of year.
    Month(u32),
}

impl AttendanceFilter {
    pub fn month(index: u32) -> Option<Self> {
        (index < 12).then_some(Self::Month(index))
    }

    pub fn current_month(clock: &impl Clock) -> Self {
        Self::Month(clock.today().month0())
    }

    pub fn matches(&self, entry: &AttendanceEntry, today: NaiveDate) -> bool {
        match self {
            Self::All => true,
            Self::ThisWeek => entry_date(entry).is_some_and(|date| date >= week_start(today)),
            Self::Month(index) => entry_date(entry).is_some_and(|date| date.month0() == *index),
        }
    }

    /// Entries passing the filter, in their original order.
    pub fn apply<'a>(
        &self,
        entries: &'a [AttendanceEntry],
        clock: &impl Clock,
    ) -> Vec<&'a AttendanceEntry> {
        let today = clock.today();
        let visible: Vec<&AttendanceEntry> = entries
            .iter()
            .filter(|entry| self.matches(entry, today))
            .collect();
        debug!(filter = %self, total = entries.len(), visible = visible.len(), "filtered attendance");
        visible
    }
}

impl fmt::Display for AttendanceFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.write_str("todos los registros"),
            Self::ThisWeek => f.write_str("esta semana"),
            Self::Month(index) => {
                let name = MONTH_NAMES.get(*index as usize).copied().unwrap_or("?");
                write!(f, "mes de {name}")
            }
        }
    }
}

fn entry_date(entry: &AttendanceEntry) -> Option<NaiveDate> {
    let date = parse_fecha(&entry.date);
    if date.is_none() {
        warn!(fecha = %entry.date, "skipping attendance entry with malformed date");
    }
    date
}

/// Parses a `DD-MM-YYYY` attendance date.
pub fn parse_fecha(raw: &str) -> Option<NaiveDate> {
    let mut parts = raw.trim().split('-');
    let day = parts.next()?.parse::<u32>().ok()?;
    let month = parts.next()?.parse::<u32>().ok()?;
    let year = parts.next()?.parse::<i32>().ok()?;
    if parts.next().is_some() {
        return None;
    }
    NaiveDate::from_ymd_opt(year, month, day)
}

/// Most recent Sunday on or before `today`.
pub fn week_start(today: NaiveDate) -> NaiveDate {
    today - Duration::days(i64::from(today.weekday().num_days_from_sunday()))
}
