use std::cmp::Reverse;

use tracing::debug;
use types::{OptimizeOutcome, RetainedResult, SearchStats};

use crate::ranking::rank;

/// The best `k` restart results seen so far.
///
/// An empty slot ranks below every real result, so even a zero-score restart
/// fills it. A full set only accepts a result strictly better than its weakest
/// entry, which is evicted (lowest slot index on ties).
#[derive(Clone, Debug)]
pub struct Retained {
    slots: Vec<Option<RetainedResult>>,
    distinct: bool,
    offered: u32,
}

impl Retained {
    pub fn new(k: usize, distinct: bool) -> Self {
        Self {
            slots: vec![None; k],
            distinct,
            offered: 0,
        }
    }

    fn weakest(&self) -> Option<usize> {
        self.slots
            .iter()
            .enumerate()
            .min_by_key(|(_, slot)| slot.as_ref().map(|r| r.score))
            .map(|(i, _)| i)
    }

    /// Returns the slot the result went into, if it was kept.
    pub fn offer(&mut self, candidate: RetainedResult) -> Option<usize> {
        self.offered += 1;
        if self.distinct {
            let key = candidate.assignment_key();
            if self.slots.iter().flatten().any(|r| r.assignment_key() == key) {
                return None;
            }
        }
        let idx = self.weakest()?;
        if let Some(current) = &self.slots[idx] {
            if candidate.score <= current.score {
                return None;
            }
        }
        debug!(slot = idx, score = candidate.score, "retained restart");
        self.slots[idx] = Some(candidate);
        Some(idx)
    }

    pub fn scores(&self) -> Vec<Option<u32>> {
        self.slots
            .iter()
            .map(|slot| slot.as_ref().map(|r| r.score))
            .collect()
    }

    pub fn slots(&self) -> &[Option<RetainedResult>] {
        &self.slots
    }

    /// Orders results best first, empty slots last, and ranks each one's students.
    pub fn into_outcome(self) -> OptimizeOutcome {
        let mut results = self.slots;
        results.sort_by_key(|slot| Reverse(slot.as_ref().map(|r| r.score)));
        let rankings = results
            .iter()
            .map(|slot| {
                slot.as_ref()
                    .map(|r| rank(&r.student_totals))
                    .unwrap_or_default()
            })
            .collect();
        let stats = SearchStats {
            restarts: self.offered,
            retained: results.iter().flatten().count(),
            best_score: results.first().and_then(|slot| slot.as_ref().map(|r| r.score)),
        };
        OptimizeOutcome {
            results,
            rankings,
            stats,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use types::{LengthClass, StudentTotal, Timeslot, Weekday};

    fn result(score: u32, tag: &str) -> RetainedResult {
        let mut slot = Timeslot::new(Weekday::Mon, LengthClass::Short, false);
        slot.song = Some(tag.into());
        slot.taken = true;
        RetainedResult {
            score,
            timeslots: vec![slot],
            student_totals: vec![
                StudentTotal {
                    student: "a".into(),
                    rehearsals: 1,
                },
                StudentTotal {
                    student: "b".into(),
                    rehearsals: score,
                },
            ],
            unscheduled: vec![],
        }
    }

    #[test]
    fn zero_score_fills_an_empty_slot() {
        let mut r = Retained::new(2, false);
        assert_eq!(r.offer(result(0, "x")), Some(0));
        assert_eq!(r.scores(), vec![Some(0), None]);
    }

    #[test]
    fn evicts_weakest_lowest_index_on_ties() {
        let mut r = Retained::new(3, false);
        for s in [4, 2, 2] {
            r.offer(result(s, "x"));
        }
        assert_eq!(r.offer(result(2, "y")), None);
        assert_eq!(r.offer(result(3, "y")), Some(1));
        assert_eq!(r.scores(), vec![Some(4), Some(3), Some(2)]);
        assert_eq!(r.offer(result(5, "z")), Some(2));
    }

    #[test]
    fn distinct_skips_identical_assignment() {
        let mut r = Retained::new(2, true);
        assert!(r.offer(result(3, "x")).is_some());
        assert!(r.offer(result(3, "x")).is_none());
        assert!(r.offer(result(1, "y")).is_some());
    }

    #[test]
    fn outcome_is_best_first_with_empty_last() {
        let mut r = Retained::new(3, false);
        r.offer(result(1, "x"));
        r.offer(result(6, "y"));
        let out = r.into_outcome();
        assert_eq!(out.results[0].as_ref().map(|x| x.score), Some(6));
        assert_eq!(out.results[1].as_ref().map(|x| x.score), Some(1));
        assert!(out.results[2].is_none());
        assert_eq!(out.rankings[0][0].student.0, "b");
        assert_eq!(out.rankings[1][0].student.0, "a");
        assert!(out.rankings[2].is_empty());
        assert_eq!(
            out.stats,
            SearchStats {
                restarts: 2,
                retained: 2,
                best_score: Some(6)
            }
        );
    }
}
