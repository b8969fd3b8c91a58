use crate::persistence::Repository;
use chrono::{Datelike, Local, NaiveDate};
use std::collections::BTreeMap;

/// Current local calendar date; the join key between "now" and the
/// accumulator map
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Per-date accumulation of worked seconds.
///
/// Entries only ever grow: additive updates, no decrement operation.
/// Independent of the task collection. Saved through the injected
/// repository after every mutation, fire-and-forget.
pub struct CheckInStore {
    days: BTreeMap<NaiveDate, u64>,
    repo: Box<dyn Repository<BTreeMap<NaiveDate, u64>>>,
}

impl CheckInStore {
    /// Open the store, loading the saved snapshot if one exists.
    /// Any load failure falls back to an empty map.
    pub fn open(repo: Box<dyn Repository<BTreeMap<NaiveDate, u64>>>) -> Self {
        let days = repo.load().ok().flatten().unwrap_or_default();
        Self { days, repo }
    }

    /// Add worked seconds to the accumulator for `date`, creating the
    /// entry if absent
    pub fn add_work_time(&mut self, date: NaiveDate, seconds: u64) {
        *self.days.entry(date).or_insert(0) += seconds;
        let _ = self.repo.save(&self.days);
    }

    /// Accumulated seconds for a single date
    pub fn work_time(&self, date: NaiveDate) -> u64 {
        self.days.get(&date).copied().unwrap_or(0)
    }

    /// Total accumulated seconds across the given month
    pub fn monthly_total(&self, year: i32, month: u32) -> u64 {
        self.days
            .iter()
            .filter(|(date, _)| date.year() == year && date.month() == month)
            .map(|(_, seconds)| *seconds)
            .sum()
    }

    /// Number of dates in the given month with a strictly positive
    /// accumulator
    pub fn work_days(&self, year: i32, month: u32) -> usize {
        self.days
            .iter()
            .filter(|(date, seconds)| {
                date.year() == year && date.month() == month && **seconds > 0
            })
            .count()
    }
}
