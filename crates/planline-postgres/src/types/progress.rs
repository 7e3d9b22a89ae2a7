//! Derived completion percentages for the work breakdown.
//!
//! Completion is never stored. A project's percentage is derived from its
//! stages, a stage's from its tasks, always at read time, so the value can
//! never go stale.

/// Computes an integer completion percentage from child counts.
///
/// Returns `round(100 * completed / total)` as a value in `[0, 100]`, and
/// `0` when there are no children at all. Counts come straight from SQL
/// aggregates, hence the `i64` arguments; negative inputs are treated as
/// empty.
pub fn completion_percentage(completed: i64, total: i64) -> u8 {
    if total <= 0 {
        return 0;
    }
    let completed = completed.clamp(0, total);

    let ratio = completed as f64 / total as f64;
    (ratio * 100.0).round() as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_children_means_zero() {
        assert_eq!(completion_percentage(0, 0), 0);
        assert_eq!(completion_percentage(5, 0), 0);
    }

    #[test]
    fn one_of_four_stages_is_a_quarter() {
        assert_eq!(completion_percentage(1, 4), 25);
    }

    #[test]
    fn two_of_three_tasks_rounds_up() {
        // round(66.67) == 67
        assert_eq!(completion_percentage(2, 3), 67);
    }

    #[test]
    fn one_of_three_rounds_down() {
        // round(33.33) == 33
        assert_eq!(completion_percentage(1, 3), 33);
    }

    #[test]
    fn stays_within_bounds() {
        for total in 0..=20i64 {
            for completed in 0..=total {
                let pct = completion_percentage(completed, total);
                assert!(pct <= 100, "{completed}/{total} -> {pct}");
            }
        }
        assert_eq!(completion_percentage(7, 7), 100);
        // Overcounting cannot push past 100.
        assert_eq!(completion_percentage(9, 7), 100);
    }

    #[test]
    fn negative_counts_are_treated_as_empty() {
        assert_eq!(completion_percentage(-1, 4), 0);
        assert_eq!(completion_percentage(1, -4), 0);
    }
}
