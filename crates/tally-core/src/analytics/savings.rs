//! Savings pacing suggestions for unmet goals

use chrono::NaiveDate;

use crate::models::Goal;

use super::round2;
use super::types::SavingSuggestion;

/// Suggest a weekly savings pace for each goal that is not yet met
///
/// Goals with no end date are skipped: there is no deadline to pace
/// against. Past-due goals get an overdue notice instead of a pace.
pub fn saving_suggestions(goals: &[Goal], today: NaiveDate) -> Vec<SavingSuggestion> {
    let mut suggestions = Vec::new();

    for goal in goals {
        if !goal.target_amount.is_finite() || !goal.saved_amount.is_finite() {
            tracing::debug!(goal_id = goal.id, "skipping goal with non-finite amounts");
            continue;
        }
        if goal.target_amount <= goal.saved_amount {
            continue;
        }

        let remaining = goal.target_amount - goal.saved_amount;

        let end_date = match goal.end_date {
            Some(date) => date,
            None => continue,
        };

        let message = if end_date > today {
            let remaining_days = (end_date - today).num_days();
            let remaining_weeks = remaining_days as f64 / 7.0;
            if remaining_weeks > 0.0 {
                format!(
                    "To reach your goal of ${:.2} ('{}') by {}, try to save ${:.2} per week.",
                    goal.target_amount,
                    goal.name,
                    end_date.format("%Y-%m-%d"),
                    round2(remaining / remaining_weeks)
                )
            } else {
                // end_date > today guarantees remaining_days >= 1, but keep
                // the branch so a pacing message never divides by zero
                format!(
                    "Almost there! You need to save ${:.2} to reach your goal of '{}' by {}.",
                    round2(remaining),
                    goal.name,
                    end_date.format("%Y-%m-%d")
                )
            }
        } else {
            format!(
                "Your goal of ${:.2} ('{}') was due on {}. You still need to save ${:.2}.",
                goal.target_amount,
                goal.name,
                end_date.format("%Y-%m-%d"),
                round2(remaining)
            )
        };

        suggestions.push(SavingSuggestion {
            id: goal.id,
            title: goal.name.clone(),
            message,
        });
    }

    suggestions
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn goal(id: i64, target: f64, saved: f64, end_date: Option<NaiveDate>) -> Goal {
        Goal {
            id,
            user_id: 1,
            name: format!("Goal {}", id),
            target_amount: target,
            saved_amount: saved,
            end_date,
            created_at: chrono::Utc::now(),
        }
    }

    #[test]
    fn test_weekly_pace_suggestion() {
        // 800 remaining over 14 days = 2 weeks -> $400.00 per week
        let today = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
        let end = today + Duration::days(14);
        let goals = vec![goal(1, 1000.0, 200.0, Some(end))];

        let suggestions = saving_suggestions(&goals, today);

        assert_eq!(suggestions.len(), 1);
        assert_eq!(suggestions[0].id, 1);
        assert_eq!(
            suggestions[0].message,
            "To reach your goal of $1000.00 ('Goal 1') by 2024-03-29, try to save $400.00 per week."
        );
    }

    #[test]
    fn test_met_goal_skipped() {
        let today = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
        let end = today + Duration::days(30);
        let goals = vec![
            goal(1, 500.0, 500.0, Some(end)),
            goal(2, 500.0, 600.0, Some(end)),
        ];

        assert!(saving_suggestions(&goals, today).is_empty());
    }

    #[test]
    fn test_goal_without_end_date_skipped() {
        let today = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
        let goals = vec![goal(1, 500.0, 100.0, None)];

        assert!(saving_suggestions(&goals, today).is_empty());
    }

    #[test]
    fn test_overdue_goal_message() {
        let today = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
        let end = NaiveDate::from_ymd_opt(2024, 2, 1).unwrap();
        let goals = vec![goal(4, 750.0, 250.0, Some(end))];

        let suggestions = saving_suggestions(&goals, today);

        assert_eq!(suggestions.len(), 1);
        assert_eq!(
            suggestions[0].message,
            "Your goal of $750.00 ('Goal 4') was due on 2024-02-01. You still need to save $500.00."
        );
    }

    #[test]
    fn test_due_today_counts_as_overdue() {
        let today = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
        let goals = vec![goal(1, 100.0, 0.0, Some(today))];

        let suggestions = saving_suggestions(&goals, today);
        assert!(suggestions[0].message.contains("was due on 2024-03-15"));
    }

    #[test]
    fn test_non_finite_amounts_skipped() {
        let today = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
        let end = today + Duration::days(7);
        let goals = vec![
            goal(1, f64::NAN, 0.0, Some(end)),
            goal(2, 500.0, f64::INFINITY, Some(end)),
            goal(3, 500.0, 100.0, Some(end)),
        ];

        let suggestions = saving_suggestions(&goals, today);
        assert_eq!(suggestions.len(), 1);
        assert_eq!(suggestions[0].id, 3);
    }

    #[test]
    fn test_pace_rounds_to_cents() {
        // 100 remaining over 21 days = 3 weeks -> 33.333... -> $33.33
        let today = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
        let end = today + Duration::days(21);
        let goals = vec![goal(1, 100.0, 0.0, Some(end))];

        let suggestions = saving_suggestions(&goals, today);
        assert!(suggestions[0].message.contains("$33.33 per week"));
    }
}
