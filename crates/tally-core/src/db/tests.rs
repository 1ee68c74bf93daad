//! Database tests

use super::*;
use crate::models::*;

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    fn new_tx(title: Option<&str>, amount: f64, kind: TransactionKind, category: &str, d: &str) -> NewTransaction {
        NewTransaction {
            title: title.map(String::from),
            amount,
            kind,
            category: category.to_string(),
            date: date(d),
        }
    }

    fn setup() -> (Database, i64) {
        let db = Database::in_memory().unwrap();
        let user = db.create_user("alice").unwrap();
        (db, user.id)
    }

    #[test]
    fn test_in_memory_db() {
        let db = Database::in_memory().unwrap();
        let users = db.list_users().unwrap();
        assert!(users.is_empty());
    }

    #[test]
    fn test_create_user_generates_token() {
        let db = Database::in_memory().unwrap();
        let user = db.create_user("alice").unwrap();

        assert!(user.id > 0);
        assert_eq!(user.username, "alice");
        assert!(!user.token.is_empty());

        let found = db.get_user_by_token(&user.token).unwrap().unwrap();
        assert_eq!(found.id, user.id);
    }

    #[test]
    fn test_duplicate_username_rejected() {
        let db = Database::in_memory().unwrap();
        db.create_user("alice").unwrap();
        assert!(db.create_user("alice").is_err());
    }

    #[test]
    fn test_empty_username_rejected() {
        let db = Database::in_memory().unwrap();
        assert!(db.create_user("  ").is_err());
    }

    #[test]
    fn test_get_or_create_local_user_is_idempotent() {
        let db = Database::in_memory().unwrap();
        let first = db.get_or_create_local_user().unwrap();
        let second = db.get_or_create_local_user().unwrap();

        assert_eq!(first.id, second.id);
        assert_eq!(first.username, "local");
        assert_eq!(db.list_users().unwrap().len(), 1);
    }

    #[test]
    fn test_transaction_crud() {
        let (db, user_id) = setup();

        let id = db
            .insert_transaction(
                user_id,
                &new_tx(Some("Groceries"), 54.30, TransactionKind::Expense, "groceries", "2024-03-05"),
            )
            .unwrap();
        assert!(id > 0);

        let tx = db.get_transaction(user_id, id).unwrap().unwrap();
        assert_eq!(tx.title.as_deref(), Some("Groceries"));
        assert_eq!(tx.amount, 54.30);
        assert_eq!(tx.kind, TransactionKind::Expense);
        assert_eq!(tx.date, date("2024-03-05"));

        let updated = db
            .update_transaction(
                user_id,
                id,
                &new_tx(Some("Weekly groceries"), 60.0, TransactionKind::Expense, "groceries", "2024-03-06"),
            )
            .unwrap();
        assert!(updated);
        let tx = db.get_transaction(user_id, id).unwrap().unwrap();
        assert_eq!(tx.title.as_deref(), Some("Weekly groceries"));
        assert_eq!(tx.amount, 60.0);

        assert!(db.delete_transaction(user_id, id).unwrap());
        assert!(db.get_transaction(user_id, id).unwrap().is_none());
        assert!(!db.delete_transaction(user_id, id).unwrap());
    }

    #[test]
    fn test_negative_amount_rejected() {
        let (db, user_id) = setup();
        let result = db.insert_transaction(
            user_id,
            &new_tx(None, -5.0, TransactionKind::Expense, "misc", "2024-03-05"),
        );
        assert!(matches!(result, Err(crate::error::Error::InvalidData(_))));
    }

    #[test]
    fn test_transactions_scoped_to_owner() {
        let (db, alice) = setup();
        let bob = db.create_user("bob").unwrap().id;

        let id = db
            .insert_transaction(
                alice,
                &new_tx(Some("Coffee"), 4.0, TransactionKind::Expense, "coffee", "2024-03-05"),
            )
            .unwrap();

        assert!(db.get_transaction(bob, id).unwrap().is_none());
        assert!(!db.update_transaction(bob, id, &new_tx(None, 1.0, TransactionKind::Expense, "coffee", "2024-03-05")).unwrap());
        assert!(!db.delete_transaction(bob, id).unwrap());
        // Still there for the owner
        assert!(db.get_transaction(alice, id).unwrap().is_some());
    }

    #[test]
    fn test_list_transactions_filtered() {
        let (db, user_id) = setup();

        db.insert_transaction(user_id, &new_tx(Some("Pay"), 2000.0, TransactionKind::Income, "salary", "2024-03-01")).unwrap();
        db.insert_transaction(user_id, &new_tx(Some("Rent"), 900.0, TransactionKind::Expense, "rent", "2024-03-02")).unwrap();
        db.insert_transaction(user_id, &new_tx(Some("Food"), 50.0, TransactionKind::Expense, "groceries", "2024-03-03")).unwrap();

        let expenses = db
            .list_transactions(
                TransactionFilter::new(user_id).kind(Some(TransactionKind::Expense)),
                100,
                0,
            )
            .unwrap();
        assert_eq!(expenses.len(), 2);

        let rent = db
            .list_transactions(TransactionFilter::new(user_id).category(Some("rent")), 100, 0)
            .unwrap();
        assert_eq!(rent.len(), 1);
        assert_eq!(rent[0].title.as_deref(), Some("Rent"));

        let count = db
            .count_transactions(TransactionFilter::new(user_id).kind(Some(TransactionKind::Expense)))
            .unwrap();
        assert_eq!(count, 2);
    }

    #[test]
    fn test_list_transactions_excluded_categories() {
        let (db, user_id) = setup();

        db.insert_transaction(user_id, &new_tx(Some("Pay"), 2000.0, TransactionKind::Income, "salary", "2024-03-01")).unwrap();
        db.insert_transaction(user_id, &new_tx(Some("Rent"), 900.0, TransactionKind::Expense, "rent", "2024-03-02")).unwrap();
        db.insert_transaction(user_id, &new_tx(Some("Food"), 50.0, TransactionKind::Expense, "groceries", "2024-03-03")).unwrap();

        let excluded = ["rent", "salary"];
        let remaining = db
            .list_transactions(
                TransactionFilter::new(user_id).exclude_categories(Some(&excluded)),
                100,
                0,
            )
            .unwrap();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].category, "groceries");

        let count = db
            .count_transactions(TransactionFilter::new(user_id).exclude_categories(Some(&excluded)))
            .unwrap();
        assert_eq!(count, 1);

        // An empty exclusion list filters nothing out
        let all = db
            .list_transactions(
                TransactionFilter::new(user_id).exclude_categories(Some(&[])),
                100,
                0,
            )
            .unwrap();
        assert_eq!(all.len(), 3);
    }

    #[test]
    fn test_list_transactions_date_window_and_order() {
        let (db, user_id) = setup();

        db.insert_transaction(user_id, &new_tx(None, 10.0, TransactionKind::Expense, "a", "2024-02-28")).unwrap();
        db.insert_transaction(user_id, &new_tx(None, 20.0, TransactionKind::Expense, "b", "2024-03-01")).unwrap();
        db.insert_transaction(user_id, &new_tx(None, 30.0, TransactionKind::Expense, "c", "2024-03-15")).unwrap();

        let march = db
            .list_transactions(
                TransactionFilter::new(user_id)
                    .date_from(Some(date("2024-03-01")))
                    .date_before(Some(date("2024-04-01")))
                    .sort_order(Some("asc")),
                100,
                0,
            )
            .unwrap();
        assert_eq!(march.len(), 2);
        assert_eq!(march[0].date, date("2024-03-01"));
        assert_eq!(march[1].date, date("2024-03-15"));

        // Default order is newest first
        let all = db
            .list_transactions(TransactionFilter::new(user_id), 100, 0)
            .unwrap();
        assert_eq!(all[0].date, date("2024-03-15"));
    }

    #[test]
    fn test_transaction_snapshot_ordered_oldest_first() {
        let (db, user_id) = setup();

        db.insert_transaction(user_id, &new_tx(None, 30.0, TransactionKind::Expense, "c", "2024-03-15")).unwrap();
        db.insert_transaction(user_id, &new_tx(None, 10.0, TransactionKind::Expense, "a", "2024-01-10")).unwrap();
        db.insert_transaction(user_id, &new_tx(None, 20.0, TransactionKind::Income, "b", "2024-02-20")).unwrap();

        let snapshot = db.transaction_snapshot(user_id).unwrap();
        let dates: Vec<NaiveDate> = snapshot.iter().map(|t| t.date).collect();
        assert_eq!(dates, vec![date("2024-01-10"), date("2024-02-20"), date("2024-03-15")]);
    }

    #[test]
    fn test_goal_crud() {
        let (db, user_id) = setup();

        let id = db
            .insert_goal(
                user_id,
                &NewGoal {
                    name: "Vacation".to_string(),
                    target_amount: 1200.0,
                    saved_amount: 100.0,
                    end_date: Some(date("2024-08-01")),
                },
            )
            .unwrap();

        let goal = db.get_goal(user_id, id).unwrap().unwrap();
        assert_eq!(goal.name, "Vacation");
        assert_eq!(goal.target_amount, 1200.0);
        assert_eq!(goal.saved_amount, 100.0);
        assert_eq!(goal.end_date, Some(date("2024-08-01")));

        assert!(db.update_goal_saved_amount(user_id, id, 450.0).unwrap());
        let goal = db.get_goal(user_id, id).unwrap().unwrap();
        assert_eq!(goal.saved_amount, 450.0);

        assert!(db.delete_goal(user_id, id).unwrap());
        assert!(db.get_goal(user_id, id).unwrap().is_none());
    }

    #[test]
    fn test_goal_without_end_date() {
        let (db, user_id) = setup();
        let id = db
            .insert_goal(
                user_id,
                &NewGoal {
                    name: "Rainy day".to_string(),
                    target_amount: 500.0,
                    saved_amount: 0.0,
                    end_date: None,
                },
            )
            .unwrap();

        let goal = db.get_goal(user_id, id).unwrap().unwrap();
        assert!(goal.end_date.is_none());
    }

    #[test]
    fn test_goal_target_must_be_positive() {
        let (db, user_id) = setup();
        let result = db.insert_goal(
            user_id,
            &NewGoal {
                name: "Bad".to_string(),
                target_amount: 0.0,
                saved_amount: 0.0,
                end_date: None,
            },
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_subscriptions_ordered_by_due_date() {
        let (db, user_id) = setup();

        db.insert_subscription(
            user_id,
            &NewSubscription {
                title: "Streaming".to_string(),
                amount: 15.0,
                category: "entertainment".to_string(),
                due_date: date("2024-03-20"),
            },
        )
        .unwrap();
        db.insert_subscription(
            user_id,
            &NewSubscription {
                title: "Gym".to_string(),
                amount: 30.0,
                category: "health".to_string(),
                due_date: date("2024-03-05"),
            },
        )
        .unwrap();

        let subs = db.list_subscriptions(user_id).unwrap();
        assert_eq!(subs.len(), 2);
        assert_eq!(subs[0].title, "Gym");
        assert_eq!(subs[1].title, "Streaming");
    }

    #[test]
    fn test_bills_ordered_by_due_date() {
        let (db, user_id) = setup();

        db.insert_bill(
            user_id,
            &NewBill {
                title: "Electricity".to_string(),
                amount: 80.0,
                due_date: date("2024-03-25"),
            },
        )
        .unwrap();
        db.insert_bill(
            user_id,
            &NewBill {
                title: "Water".to_string(),
                amount: 25.0,
                due_date: date("2024-03-10"),
            },
        )
        .unwrap();

        let bills = db.list_bills(user_id).unwrap();
        assert_eq!(bills[0].title, "Water");
        assert_eq!(bills[1].title, "Electricity");
    }

    #[test]
    fn test_reminder_crud_and_completion_filter() {
        let (db, user_id) = setup();

        let id = db
            .insert_reminder(
                user_id,
                &NewReminder {
                    title: "Cancel trial".to_string(),
                    description: Some("Before it renews".to_string()),
                    due_date: date("2024-03-18"),
                },
            )
            .unwrap();

        let open = db.list_reminders(user_id, false).unwrap();
        assert_eq!(open.len(), 1);
        assert!(!open[0].is_completed);

        let updated = db
            .update_reminder(
                user_id,
                id,
                &ReminderUpdate {
                    title: None,
                    description: None,
                    due_date: None,
                    is_completed: Some(true),
                },
            )
            .unwrap()
            .unwrap();
        assert!(updated.is_completed);
        // Partial update leaves other fields alone
        assert_eq!(updated.title, "Cancel trial");

        assert!(db.list_reminders(user_id, false).unwrap().is_empty());
        assert_eq!(db.list_reminders(user_id, true).unwrap().len(), 1);

        assert!(db.delete_reminder(user_id, id).unwrap());
        assert!(db.get_reminder(user_id, id).unwrap().is_none());
    }

    #[test]
    fn test_update_missing_reminder_returns_none() {
        let (db, user_id) = setup();
        let result = db
            .update_reminder(
                user_id,
                999,
                &ReminderUpdate {
                    title: Some("nope".to_string()),
                    description: None,
                    due_date: None,
                    is_completed: None,
                },
            )
            .unwrap();
        assert!(result.is_none());
    }
}
