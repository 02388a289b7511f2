//! Per-restart student workload bookkeeping.

use types::{DayCap, Weekday, WEEKDAYS};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Limits {
    /// Distinct weekdays a student may rehearse on.
    pub max_days: u32,
    /// Rehearsals a student may attend on one weekday.
    pub max_per_day: u32,
    pub day_cap: DayCap,
}

/// Rehearsal counts for one restart, indexed by roster position.
///
/// `total[s]` always equals the sum of `per_weekday[d][s]` over all days.
#[derive(Clone, Debug)]
pub struct Availability {
    limits: Limits,
    per_weekday: [Vec<u32>; WEEKDAYS],
    total: Vec<u32>,
}

impl Availability {
    pub fn new(students: usize, limits: Limits) -> Self {
        Self {
            limits,
            per_weekday: std::array::from_fn(|_| vec![0; students]),
            total: vec![0; students],
        }
    }

    pub fn is_available(&self, student: usize, day: Weekday) -> bool {
        let today = self.per_weekday[day.index()][student];
        if today >= self.limits.max_per_day {
            return false;
        }
        let used = self.days_used(student);
        match self.limits.day_cap {
            DayCap::Legacy => used < self.limits.max_days,
            DayCap::ExcludeCandidateDay => today > 0 || used < self.limits.max_days,
        }
    }

    pub fn record(&mut self, student: usize, day: Weekday) {
        self.per_weekday[day.index()][student] += 1;
        self.total[student] += 1;
    }

    pub fn days_used(&self, student: usize) -> u32 {
        self.per_weekday
            .iter()
            .filter(|day| day[student] > 0)
            .count() as u32
    }

    pub fn on_day(&self, day: Weekday, student: usize) -> u32 {
        self.per_weekday[day.index()][student]
    }

    pub fn total(&self, student: usize) -> u32 {
        self.total[student]
    }

    pub fn totals(&self) -> &[u32] {
        &self.total
    }

    pub fn is_consistent(&self) -> bool {
        (0..self.total.len()).all(|s| {
            self.total[s] == self.per_weekday.iter().map(|day| day[s]).sum::<u32>()
        })
    }
}
