//! Greedy song-to-timeslot assignment for a single restart.

use tracing::trace;
use types::{LengthClass, Song, Timeslot};

use crate::tracker::Availability;

/// A song with its students resolved to roster positions.
#[derive(Clone, Debug)]
pub struct PlannedSong<'a> {
    pub song: &'a Song,
    pub students: Vec<usize>,
}

/// Places songs in `order` into `slots`, scanning slots in `scan` order.
///
/// Returns the positions (into `songs`) of songs that found no slot.
pub fn assign(
    order: &[usize],
    songs: &[PlannedSong<'_>],
    slots: &mut [Timeslot],
    scan: &[usize],
    tracker: &mut Availability,
) -> Vec<usize> {
    let mut dropped = Vec::new();
    for &si in order {
        let planned = &songs[si];
        match pick_slot(planned, slots, scan, tracker) {
            Some(ti) => place(planned, &mut slots[ti], tracker),
            None => {
                trace!(song = %planned.song.name, "no feasible timeslot");
                dropped.push(si);
            }
        }
    }
    dropped
}

fn pick_slot(
    planned: &PlannedSong<'_>,
    slots: &[Timeslot],
    scan: &[usize],
    tracker: &Availability,
) -> Option<usize> {
    let song = planned.song;
    let mut alternative: Option<usize> = None;
    for &ti in scan {
        let slot = &slots[ti];
        if slot.taken || slot.stage != song.stage {
            continue;
        }
        if planned
            .students
            .iter()
            .any(|&s| !tracker.is_available(s, slot.weekday))
        {
            continue;
        }
        if slot.length == song.length {
            return Some(ti);
        }
        if alternative.map_or(true, |ai| {
            better_alternative(song.length, slot.length, slots[ai].length)
        }) {
            alternative = Some(ti);
        }
    }
    alternative
}

/// Longer slots beat shorter ones, the tightest longer slot wins, and among
/// shorter slots the closest wins. Equal lengths keep the earlier scan.
fn better_alternative(want: LengthClass, candidate: LengthClass, current: LengthClass) -> bool {
    match (candidate > want, current > want) {
        (true, false) => true,
        (false, true) => false,
        (true, true) => candidate < current,
        (false, false) => candidate > current,
    }
}

fn place(planned: &PlannedSong<'_>, slot: &mut Timeslot, tracker: &mut Availability) {
    slot.song = Some(planned.song.name.clone());
    slot.taken = true;
    for &s in &planned.students {
        tracker.record(s, slot.weekday);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::roster::Roster;
    use crate::tracker::Limits;
    use types::{DayCap, Weekday};

    fn song(name: &str, length: LengthClass, stage: bool, students: &[&str]) -> Song {
        Song {
            name: name.into(),
            leader: String::new(),
            priority: 0,
            length,
            stage,
            students: students.iter().map(|&s| s.into()).collect(),
        }
    }

    fn limits(max_days: u32, max_per_day: u32) -> Limits {
        Limits {
            max_days,
            max_per_day,
            day_cap: DayCap::Legacy,
        }
    }

    fn run(songs: &[Song], slots: &mut [Timeslot], limits: Limits) -> (Vec<usize>, Availability) {
        let roster = Roster::from_songs(songs);
        let planned: Vec<_> = songs.iter().map(|s| roster.plan(s)).collect();
        let order: Vec<usize> = (0..songs.len()).collect();
        let scan: Vec<usize> = (0..slots.len()).collect();
        let mut tracker = Availability::new(roster.len(), limits);
        let dropped = assign(&order, &planned, slots, &scan, &mut tracker);
        (dropped, tracker)
    }

    #[test]
    fn exact_length_beats_earlier_alternative() {
        use LengthClass::*;
        let songs = vec![song("a", Medium, false, &["x"])];
        let mut slots = vec![
            Timeslot::new(Weekday::Mon, Long, false),
            Timeslot::new(Weekday::Tue, Medium, false),
        ];
        let (dropped, tracker) = run(&songs, &mut slots, limits(5, 5));
        assert!(dropped.is_empty());
        assert!(!slots[0].taken);
        assert_eq!(slots[1].song.as_deref(), Some("a"));
        assert_eq!(tracker.on_day(Weekday::Tue, 0), 1);
    }

    #[test]
    fn stage_flag_must_match() {
        use LengthClass::*;
        let songs = vec![song("a", Short, true, &["x"])];
        let mut slots = vec![Timeslot::new(Weekday::Mon, Short, false)];
        let (dropped, _) = run(&songs, &mut slots, limits(5, 5));
        assert_eq!(dropped, vec![0]);
        assert!(!slots[0].taken);
    }

    #[test]
    fn upsized_alternative_preferred_over_downsized() {
        use LengthClass::*;
        let songs = vec![song("a", Medium, false, &["x"])];
        let mut slots = vec![
            Timeslot::new(Weekday::Mon, Short, false),
            Timeslot::new(Weekday::Tue, Long, false),
        ];
        run(&songs, &mut slots, limits(5, 5));
        assert!(!slots[0].taken);
        assert!(slots[1].taken);
    }

    #[test]
    fn tightest_upsized_alternative_wins() {
        use LengthClass::*;
        let songs = vec![song("a", Short, false, &["x"])];
        let mut slots = vec![
            Timeslot::new(Weekday::Mon, Long, false),
            Timeslot::new(Weekday::Tue, Medium, false),
            Timeslot::new(Weekday::Wed, Medium, false),
        ];
        run(&songs, &mut slots, limits(5, 5));
        assert!(!slots[0].taken);
        assert!(slots[1].taken);
        assert!(!slots[2].taken);
    }

    #[test]
    fn downsized_slot_used_when_nothing_larger() {
        use LengthClass::*;
        let songs = vec![song("a", Long, false, &["x"])];
        let mut slots = vec![
            Timeslot::new(Weekday::Mon, Short, false),
            Timeslot::new(Weekday::Tue, Medium, false),
        ];
        let (dropped, _) = run(&songs, &mut slots, limits(5, 5));
        assert!(dropped.is_empty());
        assert!(slots[1].taken);
    }

    #[test]
    fn blocked_student_skips_day_and_never_double_books() {
        use LengthClass::*;
        let songs = vec![
            song("a", Short, false, &["x", "y"]),
            song("b", Short, false, &["y"]),
            song("c", Short, false, &["z"]),
        ];
        let mut slots = vec![
            Timeslot::new(Weekday::Mon, Short, false),
            Timeslot::new(Weekday::Mon, Short, false),
        ];
        let (dropped, tracker) = run(&songs, &mut slots, limits(5, 1));
        assert_eq!(dropped, vec![1]);
        assert_eq!(slots[0].song.as_deref(), Some("a"));
        assert_eq!(slots[1].song.as_deref(), Some("c"));
        assert_eq!(tracker.totals(), &[1, 1, 1]);
        assert!(tracker.is_consistent());
    }
}
