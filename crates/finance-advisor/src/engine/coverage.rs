//! Insurance Coverage Rules
//!
//! Age- and salary-banded cover recommendations drive three rule groups:
//! emergency-fund sizing, insurance adequacy, and goal-driven nudges.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::Thresholds;
use crate::format::{amount, money};
use crate::model::{
    coverage_by_type, AdviceItem, Category, Goal, Insurance, Priority, User, HEALTH_INSURANCE,
    TERM_LIFE_INSURANCE,
};

/// Recommended health cover by age band
pub fn recommended_health_cover(age: u32) -> Decimal {
    if age < 30 {
        dec!(300000)
    } else if age <= 45 {
        dec!(500000)
    } else {
        dec!(700000)
    }
}

/// Recommended term cover: annual salary times a salary-banded multiple
pub fn recommended_term_cover(user: &User) -> Decimal {
    let multiple = if user.salary < dec!(30000) {
        dec!(8)
    } else if user.salary <= dec!(70000) {
        dec!(10)
    } else {
        dec!(12)
    };
    user.annual_salary() * multiple
}

/// Months of salary to hold in cash, starting from 3 and growing with each
/// coverage gap, self-employment and dependents
pub fn emergency_multiplier(
    health_gap: bool,
    term_gap: bool,
    self_employed: bool,
    has_dependents: bool,
) -> Decimal {
    let mut multiplier = dec!(3.0);
    if health_gap {
        multiplier += dec!(0.5);
    }
    if term_gap {
        multiplier += dec!(0.5);
    }
    if self_employed {
        multiplier += dec!(1.0);
    }
    if has_dependents {
        multiplier += dec!(0.5);
    }
    multiplier
}

/// A user's cover set against the recommendations
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CoverageAssessment {
    pub health_coverage: Decimal,
    pub recommended_health: Decimal,
    pub term_coverage: Decimal,
    pub recommended_term: Decimal,
}

impl CoverageAssessment {
    pub fn assess(user: &User, policies: &[Insurance]) -> Self {
        let by_type = coverage_by_type(policies);
        let assessment = Self {
            health_coverage: by_type.get(HEALTH_INSURANCE).copied().unwrap_or(Decimal::ZERO),
            recommended_health: recommended_health_cover(user.age),
            term_coverage: by_type.get(TERM_LIFE_INSURANCE).copied().unwrap_or(Decimal::ZERO),
            recommended_term: recommended_term_cover(user),
        };
        tracing::debug!(?assessment, "coverage assessed");
        assessment
    }

    pub fn health_gap(&self) -> bool {
        self.health_coverage < self.recommended_health
    }

    pub fn term_gap(&self) -> bool {
        self.term_coverage < self.recommended_term
    }

    pub fn emergency_multiplier(&self, user: &User) -> Decimal {
        emergency_multiplier(
            self.health_gap(),
            self.term_gap(),
            user.is_self_employed(),
            user.dependents > 0,
        )
    }

    pub(super) fn emergency_fund_advice(&self, user: &User) -> AdviceItem {
        let multiplier = self.emergency_multiplier(user);
        let target = (user.salary * multiplier).round();
        tracing::debug!(multiplier = %multiplier, target = %target, "emergency fund target");

        if user.savings < target {
            AdviceItem::new(
                Category::EmergencyFund,
                Priority::High,
                format!(
                    "Increase your emergency fund to at least {} (based on {:.1}× monthly salary, \
                     adjusted for insurance and dependents).",
                    money(target),
                    multiplier
                ),
            )
        } else {
            AdviceItem::new(
                Category::EmergencyFund,
                Priority::Low,
                format!(
                    "✅ Your emergency fund of {} meets the recommended {:.1}× salary buffer. Great job!",
                    money(user.savings),
                    multiplier
                ),
            )
        }
    }

    /// Missing cover is High, insufficient cover is Medium, adequate cover is silent
    pub(super) fn adequacy_advice(&self, user: &User) -> Vec<AdviceItem> {
        let mut items = Vec::new();

        if self.health_coverage <= Decimal::ZERO {
            items.push(AdviceItem::new(
                Category::Risk,
                Priority::High,
                "❌ You do not have health insurance. Please consider buying health coverage to protect \
                 your finances from medical emergencies.",
            ));
        } else if self.health_gap() {
            items.push(AdviceItem::new(
                Category::Risk,
                Priority::Medium,
                format!(
                    "Your health insurance ({}) is below the recommended {} for your age ({}). Consider increasing it.",
                    money(self.health_coverage),
                    money(self.recommended_health),
                    user.age
                ),
            ));
        }

        if self.term_coverage <= Decimal::ZERO {
            items.push(AdviceItem::new(
                Category::Risk,
                Priority::High,
                "❌ You lack term life insurance. Consider a plan to protect your family’s income in case of emergencies.",
            ));
        } else if self.term_gap() {
            items.push(AdviceItem::new(
                Category::Risk,
                Priority::Medium,
                format!(
                    "Your term insurance ({}) is below the recommended {} based on your salary ({}/month). \
                     Consider increasing it.",
                    money(self.term_coverage),
                    money(self.recommended_term),
                    amount(user.salary)
                ),
            ));
        }

        items
    }

    /// Cover reminders triggered by what the user is saving for
    pub(super) fn goal_nudges(
        &self,
        user: &User,
        goals: &[Goal],
        t: &Thresholds,
    ) -> Vec<AdviceItem> {
        let mut items = Vec::new();

        let plans_retirement = goals.iter().any(Goal::mentions_retirement);
        if plans_retirement
            && user.age > t.retirement_age
            && self.health_coverage < t.retirement_health_floor
        {
            items.push(AdviceItem::new(
                Category::Risk,
                Priority::High,
                format!(
                    "🛡️ Planning for retirement? Ensure your health insurance is {} or more to cover rising medical costs.",
                    money(t.retirement_health_floor)
                ),
            ));
        }

        if let Some(large) = goals.iter().find(|g| g.amount >= t.large_goal) {
            if self.term_gap() {
                items.push(AdviceItem::new(
                    Category::Risk,
                    Priority::High,
                    format!(
                        "📌 You have major financial goals like '{}'. Consider increasing term life cover beyond {}.",
                        large.name,
                        money(self.recommended_term)
                    ),
                ));
            }
        }

        items
    }
}
