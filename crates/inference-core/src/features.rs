//! Model Inputs
//!
//! Goal categories, risk encoding and the fixed 7-column feature row the
//! instrument classifier was trained on.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{InferenceError, Result};

/// Number of columns in a [`FeatureRow`]
pub const FEATURE_COUNT: usize = 7;

/// Column order of the instrument classifier input
pub const FEATURE_NAMES: [&str; FEATURE_COUNT] = [
    "age",
    "salary",
    "savings",
    "risk_profile",
    "goal",
    "goal_amount",
    "years_to_goal",
];

/// Goal category predicted from free-text goal descriptions
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GoalCategory {
    Retirement,
    BuyAHouse,
    ChildEducation,
    EmergencyFund,
    TaxSaving,
    CarPurchase,
    TravelAbroad,
}

impl GoalCategory {
    pub const ALL: [GoalCategory; 7] = [
        GoalCategory::Retirement,
        GoalCategory::BuyAHouse,
        GoalCategory::ChildEducation,
        GoalCategory::EmergencyFund,
        GoalCategory::TaxSaving,
        GoalCategory::CarPurchase,
        GoalCategory::TravelAbroad,
    ];

    /// Label id used by the trained models
    pub fn id(self) -> i64 {
        match self {
            GoalCategory::Retirement => 0,
            GoalCategory::BuyAHouse => 1,
            GoalCategory::ChildEducation => 2,
            GoalCategory::EmergencyFund => 3,
            GoalCategory::TaxSaving => 4,
            GoalCategory::CarPurchase => 5,
            GoalCategory::TravelAbroad => 6,
        }
    }

    pub fn from_id(id: i64) -> Result<Self> {
        usize::try_from(id)
            .ok()
            .and_then(|i| Self::ALL.get(i).copied())
            .ok_or(InferenceError::UnknownGoalCategory(id))
    }

    pub fn label(self) -> &'static str {
        match self {
            GoalCategory::Retirement => "Retirement",
            GoalCategory::BuyAHouse => "Buy a House",
            GoalCategory::ChildEducation => "Child Education",
            GoalCategory::EmergencyFund => "Emergency Fund",
            GoalCategory::TaxSaving => "Tax Saving",
            GoalCategory::CarPurchase => "Car Purchase",
            GoalCategory::TravelAbroad => "Travel Abroad",
        }
    }
}

impl fmt::Display for GoalCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Ordinal risk tier accepted by the instrument classifier
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum RiskProfile {
    Low,
    Medium,
    High,
}

impl RiskProfile {
    pub fn ordinal(self) -> u8 {
        match self {
            RiskProfile::Low => 0,
            RiskProfile::Medium => 1,
            RiskProfile::High => 2,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            RiskProfile::Low => "Low",
            RiskProfile::Medium => "Medium",
            RiskProfile::High => "High",
        }
    }
}

impl FromStr for RiskProfile {
    type Err = InferenceError;

    /// Exact, case-sensitive match on the training labels
    fn from_str(s: &str) -> Result<Self> {
        match s {
            "Low" => Ok(RiskProfile::Low),
            "Medium" => Ok(RiskProfile::Medium),
            "High" => Ok(RiskProfile::High),
            other => Err(InferenceError::UnknownRiskProfile(other.to_string())),
        }
    }
}

/// Raw, unencoded inputs for one instrument prediction
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GoalFeatures {
    pub age: u32,

    /// Monthly salary
    pub salary: f64,

    /// Current liquid savings
    pub savings: f64,

    /// Risk label, one of Low / Medium / High
    pub risk_profile: String,

    /// Free-text goal description
    pub goal: String,

    pub goal_amount: f64,

    pub years_to_goal: i32,
}

/// Encoded model input, columns ordered as [`FEATURE_NAMES`]
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct FeatureRow(pub [f64; FEATURE_COUNT]);

impl FeatureRow {
    pub fn encode(features: &GoalFeatures, risk: RiskProfile, goal: GoalCategory) -> Self {
        Self([
            f64::from(features.age),
            features.salary,
            features.savings,
            f64::from(risk.ordinal()),
            goal.id() as f64,
            features.goal_amount,
            f64::from(features.years_to_goal),
        ])
    }

    pub fn values(&self) -> &[f64] {
        &self.0
    }
}
