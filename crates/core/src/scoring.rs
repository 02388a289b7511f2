use types::{Timeslot, Weekday, WEEKDAYS};

/// Number of filled timeslots.
pub fn score(slots: &[Timeslot]) -> u32 {
    slots.iter().filter(|t| t.taken).count() as u32
}

/// Filled and total timeslots per weekday.
pub fn fill_by_weekday(slots: &[Timeslot]) -> [(u32, u32); WEEKDAYS] {
    let mut fill = [(0u32, 0u32); WEEKDAYS];
    for t in slots {
        let day = &mut fill[t.weekday.index()];
        day.1 += 1;
        if t.taken {
            day.0 += 1;
        }
    }
    fill
}

pub fn slots_on(slots: &[Timeslot], day: Weekday) -> impl Iterator<Item = &Timeslot> {
    slots.iter().filter(move |t| t.weekday == day)
}

#[cfg(test)]
mod tests {
    use super::*;
    use types::LengthClass;

    #[test]
    fn counts_taken_per_day() {
        let mut slots = vec![
            Timeslot::new(Weekday::Mon, LengthClass::Short, false),
            Timeslot::new(Weekday::Mon, LengthClass::Long, true),
            Timeslot::new(Weekday::Fri, LengthClass::Short, false),
        ];
        slots[1].taken = true;
        slots[1].song = Some("x".into());
        assert_eq!(score(&slots), 1);
        let fill = fill_by_weekday(&slots);
        assert_eq!(fill[0], (1, 2));
        assert_eq!(fill[4], (0, 1));
        assert_eq!(slots_on(&slots, Weekday::Mon).count(), 2);
    }
}
