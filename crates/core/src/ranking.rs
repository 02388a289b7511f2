use types::StudentTotal;

/// Sorts by rehearsal count, highest first; ties keep roster order.
pub fn rank(totals: &[StudentTotal]) -> Vec<StudentTotal> {
    let mut ranked = totals.to_vec();
    ranked.sort_by(|a, b| b.rehearsals.cmp(&a.rehearsals));
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;

    fn total(student: &str, rehearsals: u32) -> StudentTotal {
        StudentTotal {
            student: student.into(),
            rehearsals,
        }
    }

    #[test]
    fn descending_with_stable_ties() {
        let ranked = rank(&[total("a", 1), total("b", 3), total("c", 1), total("d", 0)]);
        let names: Vec<&str> = ranked.iter().map(|t| t.student.0.as_str()).collect();
        assert_eq!(names, ["b", "a", "c", "d"]);
    }
}
