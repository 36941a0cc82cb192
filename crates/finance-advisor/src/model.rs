//! Domain Models
//!
//! Request-scoped inputs (user, goals, investments, insurance) and the
//! advice items the engine produces. All money is `rust_decimal`.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

use crate::error::{AdvisorError, Result};

pub const HEALTH_INSURANCE: &str = "Health Insurance";
pub const TERM_LIFE_INSURANCE: &str = "Term Life Insurance";

/// Investments carrying this instrument name are insurance premiums and are
/// tracked through the insurance list instead
pub const INSURANCE_BUCKET: &str = "Insurance";

/// The person asking for advice
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct User {
    pub name: String,

    /// Monthly salary
    pub salary: Decimal,

    /// Current liquid savings
    pub savings: Decimal,

    pub age: u32,

    /// Monthly expenses
    pub expenses: Decimal,

    #[serde(default = "default_job_type")]
    pub job_type: String,

    #[serde(default)]
    pub dependents: u32,
}

fn default_job_type() -> String {
    "salaried".into()
}

impl User {
    pub fn monthly_savings(&self) -> Decimal {
        self.salary - self.expenses
    }

    pub fn annual_salary(&self) -> Decimal {
        self.salary * Decimal::from(12)
    }

    pub fn is_self_employed(&self) -> bool {
        self.job_type.eq_ignore_ascii_case("self-employed")
    }
}

/// A future savings target
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Goal {
    pub name: String,
    pub amount: Decimal,
    pub target_year: i32,

    #[serde(default)]
    pub saved_amount: Decimal,
}

impl Goal {
    /// Whole years until the target year; negative once it has passed
    pub fn years_left(&self, current_year: i32) -> i64 {
        i64::from(self.target_year) - i64::from(current_year)
    }

    pub fn remaining_amount(&self) -> Decimal {
        self.amount - self.saved_amount
    }

    /// Monthly saving that reaches the target by the target year.
    /// `None` once the target year has passed.
    pub fn monthly_saving_needed(&self, current_year: i32) -> Option<Decimal> {
        let years_left = self.years_left(current_year);
        if years_left <= 0 {
            return None;
        }
        let months = Decimal::from(years_left) * Decimal::from(12);
        Some(self.remaining_amount() / months)
    }

    pub fn mentions_retirement(&self) -> bool {
        self.name.to_lowercase().contains("retire")
    }
}

/// A holding in a named instrument
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Investment {
    /// Free text, ideally a key of the instrument table
    pub instrument_name: String,

    pub amount: Decimal,

    #[serde(default, rename = "type")]
    pub kind: String,
}

/// An insurance policy
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Insurance {
    #[serde(rename = "type")]
    pub kind: String,

    pub coverage: Decimal,

    /// Premium paid
    pub amount: Decimal,
}

/// Coverage per insurance type; a repeated type keeps its last entry
pub fn coverage_by_type(policies: &[Insurance]) -> HashMap<&str, Decimal> {
    policies.iter().map(|p| (p.kind.as_str(), p.coverage)).collect()
}

/// Everything the engine needs for one request
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct FinancialProfile {
    pub user: User,

    #[serde(default)]
    pub goals: Vec<Goal>,

    #[serde(default)]
    pub investments: Vec<Investment>,

    #[serde(default)]
    pub insurance: Vec<Insurance>,
}

/// Largest magnitude accepted for any money field. Keeps every derived
/// amount (annual salary, cover multiples, sums, goal projections) inside
/// the `Decimal` range.
pub const MAX_AMOUNT: Decimal = dec!(1000000000000000);

impl FinancialProfile {
    /// Reject money amounts whose magnitude exceeds [`MAX_AMOUNT`].
    /// Negative amounts (an overdraft, a refund) are accepted.
    pub fn validate(&self) -> Result<()> {
        let user = &self.user;
        for (field, value) in [
            ("user.salary", user.salary),
            ("user.savings", user.savings),
            ("user.expenses", user.expenses),
        ] {
            ensure_in_range(field, value)?;
        }
        for (i, goal) in self.goals.iter().enumerate() {
            ensure_in_range(&format!("goals[{i}].amount"), goal.amount)?;
            ensure_in_range(&format!("goals[{i}].saved_amount"), goal.saved_amount)?;
        }
        for (i, inv) in self.investments.iter().enumerate() {
            ensure_in_range(&format!("investments[{i}].amount"), inv.amount)?;
        }
        for (i, ins) in self.insurance.iter().enumerate() {
            ensure_in_range(&format!("insurance[{i}].coverage"), ins.coverage)?;
            ensure_in_range(&format!("insurance[{i}].amount"), ins.amount)?;
        }
        Ok(())
    }
}

fn ensure_in_range(field: &str, value: Decimal) -> Result<()> {
    if value.abs() > MAX_AMOUNT {
        return Err(AdvisorError::InvalidInput(format!(
            "{field} is out of range, got {value} (limit {MAX_AMOUNT})"
        )));
    }
    Ok(())
}

/// Advice category
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    #[serde(rename = "System Alert")]
    SystemAlert,
    #[serde(rename = "Cash Flow")]
    CashFlow,
    #[serde(rename = "Emergency Fund")]
    EmergencyFund,
    Investment,
    Goals,
    Risk,
}

impl Category {
    pub fn as_str(self) -> &'static str {
        match self {
            Category::SystemAlert => "System Alert",
            Category::CashFlow => "Cash Flow",
            Category::EmergencyFund => "Emergency Fund",
            Category::Investment => "Investment",
            Category::Goals => "Goals",
            Category::Risk => "Risk",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl Priority {
    pub fn as_str(self) -> &'static str {
        match self {
            Priority::High => "High",
            Priority::Medium => "Medium",
            Priority::Low => "Low",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One piece of advice
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdviceItem {
    pub category: Category,
    pub priority: Priority,

    /// Human-readable, may span several lines
    pub message: String,
}

impl AdviceItem {
    pub fn new(category: Category, priority: Priority, message: impl Into<String>) -> Self {
        Self { category, priority, message: message.into() }
    }
}

/// Advice bundled with the request summary it was computed for
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AdviceReport {
    pub user: User,
    pub goals: Vec<Goal>,
    pub monthly_savings: Decimal,
    pub advice: Vec<AdviceItem>,
}
