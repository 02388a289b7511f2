use sched_core::scoring::{fill_by_weekday, slots_on};
use std::fmt::{self, Write};
use types::{LengthClass, OptimizeOutcome, RetainedResult, StudentTotal, Timeslot, Weekday};

fn length_label(length: LengthClass) -> &'static str {
    match length {
        LengthClass::Short => "short",
        LengthClass::Medium => "medium",
        LengthClass::Long => "long",
    }
}

fn slot_label(t: &Timeslot) -> String {
    let mut label = length_label(t.length).to_string();
    if t.stage {
        label.push_str(", stage");
    }
    if !t.leader.is_empty() {
        label.push_str(", ");
        label.push_str(&t.leader);
    }
    label
}

/// Writes every retained schedule by weekday, followed by its student ranking.
pub fn render(outcome: &OptimizeOutcome, w: &mut impl Write) -> fmt::Result {
    let n = outcome.results.len();
    for (i, (result, ranking)) in outcome.results.iter().zip(&outcome.rankings).enumerate() {
        match result {
            Some(r) => render_one(i + 1, n, r, ranking, w)?,
            None => writeln!(w, "=== Schedule {} of {}: no restart recorded ===", i + 1, n)?,
        }
        writeln!(w)?;
    }
    writeln!(
        w,
        "{} restarts, {} schedules retained",
        outcome.stats.restarts, outcome.stats.retained
    )
}

fn render_one(
    pos: usize,
    n: usize,
    r: &RetainedResult,
    ranking: &[StudentTotal],
    w: &mut impl Write,
) -> fmt::Result {
    writeln!(
        w,
        "=== Schedule {} of {} (score {}/{}) ===",
        pos,
        n,
        r.score,
        r.timeslots.len()
    )?;
    let fill = fill_by_weekday(&r.timeslots);
    for day in Weekday::ALL {
        let (filled, total) = fill[day.index()];
        if total == 0 {
            continue;
        }
        writeln!(w, "{} ({}/{} filled)", day.name(), filled, total)?;
        for t in slots_on(&r.timeslots, day) {
            let song = t.song.as_deref().unwrap_or("[EMPTY]");
            writeln!(w, "  [{}] -> {}", slot_label(t), song)?;
        }
    }
    if !r.unscheduled.is_empty() {
        writeln!(w, "Unscheduled songs ({}):", r.unscheduled.len())?;
        for name in &r.unscheduled {
            writeln!(w, "  - {}", name)?;
        }
    }
    writeln!(w, "Student rehearsals:")?;
    for t in ranking {
        writeln!(w, "  {:<20} {}", t.student, t.rehearsals)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use types::SearchStats;

    #[test]
    fn renders_filled_and_empty_slots() {
        let mut filled = Timeslot::new(Weekday::Tue, LengthClass::Long, true);
        filled.leader = "Ms. Park".into();
        filled.song = Some("Finale".into());
        filled.taken = true;
        let empty = Timeslot::new(Weekday::Tue, LengthClass::Short, false);
        let ranking = vec![StudentTotal {
            student: "ana".into(),
            rehearsals: 1,
        }];
        let outcome = OptimizeOutcome {
            results: vec![
                Some(RetainedResult {
                    score: 1,
                    timeslots: vec![filled, empty],
                    student_totals: ranking.clone(),
                    unscheduled: vec!["Overture".into()],
                }),
                None,
            ],
            rankings: vec![ranking, vec![]],
            stats: SearchStats {
                restarts: 1,
                retained: 1,
                best_score: Some(1),
            },
        };
        let mut out = String::new();
        render(&outcome, &mut out).unwrap();
        assert!(out.contains("=== Schedule 1 of 2 (score 1/2) ==="));
        assert!(out.contains("Tuesday (1/2 filled)"));
        assert!(out.contains("  [long, stage, Ms. Park] -> Finale"));
        assert!(out.contains("  [short] -> [EMPTY]"));
        assert!(out.contains("  - Overture"));
        assert!(out.contains("=== Schedule 2 of 2: no restart recorded ==="));
        assert!(!out.contains("Monday"));
    }
}
