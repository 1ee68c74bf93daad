//! Domain models for Tally

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// A registered user
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub username: String,
    /// Bearer token for API authentication
    #[serde(skip_serializing)]
    pub token: String,
    pub created_at: DateTime<Utc>,
}

/// Whether a transaction adds to or subtracts from the user's balance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Income,
    Expense,
}

impl TransactionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Income => "income",
            Self::Expense => "expense",
        }
    }
}

impl std::str::FromStr for TransactionKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "income" => Ok(Self::Income),
            "expense" => Ok(Self::Expense),
            _ => Err(format!("Unknown transaction kind: {}", s)),
        }
    }
}

impl std::fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A dated, categorized monetary record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    pub id: i64,
    pub user_id: i64,
    /// Display title; falls back to a placeholder in derived output when absent
    pub title: Option<String>,
    /// Always non-negative; direction is carried by `kind`
    pub amount: f64,
    pub kind: TransactionKind,
    pub category: String,
    pub date: NaiveDate,
    pub created_at: DateTime<Utc>,
}

/// A new transaction to be inserted
#[derive(Debug, Clone, Deserialize)]
pub struct NewTransaction {
    pub title: Option<String>,
    pub amount: f64,
    pub kind: TransactionKind,
    pub category: String,
    pub date: NaiveDate,
}

/// A savings goal
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Goal {
    pub id: i64,
    pub user_id: i64,
    pub name: String,
    pub target_amount: f64,
    pub saved_amount: f64,
    pub end_date: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
}

/// A new goal to be inserted
#[derive(Debug, Clone, Deserialize)]
pub struct NewGoal {
    pub name: String,
    pub target_amount: f64,
    #[serde(default)]
    pub saved_amount: f64,
    pub end_date: Option<NaiveDate>,
}

/// A recurring subscription the user tracks manually
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Subscription {
    pub id: i64,
    pub user_id: i64,
    pub title: String,
    pub amount: f64,
    pub category: String,
    pub due_date: NaiveDate,
    pub created_at: DateTime<Utc>,
}

/// A new subscription to be inserted
#[derive(Debug, Clone, Deserialize)]
pub struct NewSubscription {
    pub title: String,
    pub amount: f64,
    pub category: String,
    pub due_date: NaiveDate,
}

/// An upcoming bill
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bill {
    pub id: i64,
    pub user_id: i64,
    pub title: String,
    pub amount: f64,
    pub due_date: NaiveDate,
    pub created_at: DateTime<Utc>,
}

/// A new bill to be inserted
#[derive(Debug, Clone, Deserialize)]
pub struct NewBill {
    pub title: String,
    pub amount: f64,
    pub due_date: NaiveDate,
}

/// A personal reminder
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Reminder {
    pub id: i64,
    pub user_id: i64,
    pub title: String,
    pub description: Option<String>,
    pub due_date: NaiveDate,
    pub is_completed: bool,
    pub created_at: DateTime<Utc>,
}

/// A new reminder to be inserted
#[derive(Debug, Clone, Deserialize)]
pub struct NewReminder {
    pub title: String,
    pub description: Option<String>,
    pub due_date: NaiveDate,
}

/// Fields that can be changed on an existing reminder
#[derive(Debug, Clone, Deserialize)]
pub struct ReminderUpdate {
    pub title: Option<String>,
    pub description: Option<String>,
    pub due_date: Option<NaiveDate>,
    pub is_completed: Option<bool>,
}
