//! Goal Planning
//!
//! Each goal is checked for feasibility against the user's income and,
//! when the target year is still ahead, matched with a predicted instrument.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::Serialize;

use inference_core::{GoalFeatures, InstrumentPredictor, Prediction, RiskProfile};

use super::Thresholds;
use crate::error::Result;
use crate::format::money;
use crate::instruments::InstrumentProfile;
use crate::model::{AdviceItem, Category, Goal, Priority, User};
use crate::projection::future_value;

/// How a single goal was judged
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum GoalOutcome {
    /// The target year is this year or earlier
    Passed,

    /// Needs more per month than the whole salary
    Infeasible { needed: Decimal, realistic_goal: Decimal },

    /// Needs more per month than is currently saved
    OverBudget { needed: Decimal },

    /// Affordable, with an instrument to save in
    Recommended {
        needed: Decimal,
        years_left: i64,
        prediction: Prediction,
        projected_value: Option<Decimal>,
    },
}

impl GoalOutcome {
    pub fn is_affordable(&self) -> bool {
        matches!(self, GoalOutcome::Recommended { .. })
    }
}

/// Per-goal advice plus the totals the summary alert is built from
#[derive(Debug, Default)]
pub struct GoalPlan {
    pub items: Vec<AdviceItem>,
    pub outcomes: Vec<GoalOutcome>,
    pub total_required_saving: Decimal,
    pub affordable_goals: usize,
}

impl GoalPlan {
    /// High alert when all goals together need more than is being saved
    pub fn summary_alert(&self, user: &User) -> Option<AdviceItem> {
        let monthly_savings = user.monthly_savings();
        if self.total_required_saving <= monthly_savings {
            return None;
        }

        let suggestion = match self.affordable_goals {
            0 => "Your current income does not support any of your financial goals. \
                  Start with emergency savings."
                .to_string(),
            1 => "You can comfortably handle only 1 of your financial goals at this time."
                .to_string(),
            n => format!("You can afford {n} goals. Consider prioritizing the most important one."),
        };

        Some(AdviceItem::new(
            Category::Goals,
            Priority::High,
            format!(
                "❗ Your total required savings for all goals is {}/month, but your actual monthly savings is only {}.\n\
                 💡 Suggestion: {suggestion}",
                money(self.total_required_saving),
                money(monthly_savings)
            ),
        ))
    }
}

fn goal_features(user: &User, goal: &Goal, years_left: i64) -> GoalFeatures {
    GoalFeatures {
        age: user.age,
        salary: user.salary.to_f64().unwrap_or_default(),
        savings: user.savings.to_f64().unwrap_or_default(),
        risk_profile: RiskProfile::High.as_str().to_string(),
        goal: goal.name.clone(),
        goal_amount: goal.amount.to_f64().unwrap_or_default(),
        years_to_goal: i32::try_from(years_left).unwrap_or(i32::MAX),
    }
}

/// Judge every goal in input order. Prediction errors abort the plan.
pub(super) async fn plan_goals(
    predictor: &InstrumentPredictor,
    user: &User,
    goals: &[Goal],
    current_year: i32,
    t: &Thresholds,
) -> Result<GoalPlan> {
    let mut plan = GoalPlan::default();
    let monthly_savings = user.monthly_savings();

    for goal in goals {
        let outcome = match goal.monthly_saving_needed(current_year) {
            None => GoalOutcome::Passed,
            Some(needed) => {
                let years_left = goal.years_left(current_year);
                plan.total_required_saving += needed;

                let prediction = predictor.predict(&goal_features(user, goal, years_left)).await?;

                if needed > user.salary {
                    let months = Decimal::from(years_left) * Decimal::from(12);
                    let realistic_goal = monthly_savings * months + goal.saved_amount;
                    GoalOutcome::Infeasible { needed, realistic_goal }
                } else if needed > monthly_savings {
                    GoalOutcome::OverBudget { needed }
                } else {
                    let months = u64::try_from(years_left).unwrap_or_default().saturating_mul(12);
                    let projected_value = future_value(needed, t.projection_rate, months);
                    plan.affordable_goals += 1;
                    GoalOutcome::Recommended { needed, years_left, prediction, projected_value }
                }
            }
        };

        tracing::debug!(goal = %goal.name, ?outcome, "goal planned");
        plan.items.push(goal_advice(goal, user, &outcome));
        plan.outcomes.push(outcome);
    }

    Ok(plan)
}

fn goal_advice(goal: &Goal, user: &User, outcome: &GoalOutcome) -> AdviceItem {
    match outcome {
        GoalOutcome::Passed => AdviceItem::new(
            Category::Goals,
            Priority::High,
            format!("Review goal '{}' – the target year has passed.", goal.name),
        ),
        GoalOutcome::Infeasible { needed, realistic_goal } => AdviceItem::new(
            Category::Goals,
            Priority::High,
            format!(
                "📌 Goal: {}\n\
                 ❗ Required monthly saving ({}) is more than your entire income ({}).\n\
                 💡 This goal is not feasible currently. Consider reducing the goal amount or extending the timeline.\n\
                 🔄 Based on your current savings, you could aim for a goal of {} instead.",
                goal.name,
                money(*needed),
                money(user.salary),
                money(*realistic_goal)
            ),
        ),
        GoalOutcome::OverBudget { needed } => AdviceItem::new(
            Category::Goals,
            Priority::High,
            format!(
                "📌 Goal: {}\n\
                 ❗ Required savings ({}/month) exceeds your current monthly savings ({}).\n\
                 💡 Consider reducing the goal amount or extending the timeline.",
                goal.name,
                money(*needed),
                money(user.monthly_savings())
            ),
        ),
        GoalOutcome::Recommended { needed, years_left, prediction, projected_value } => {
            let profile = InstrumentProfile::lookup(&prediction.instrument);
            let projected =
                (*projected_value).map_or_else(|| "beyond projection range".to_string(), money);
            AdviceItem::new(
                Category::Goals,
                Priority::Medium,
                format!(
                    "📌 Goal: {}\n\
                     🎯 Recommended Instrument: {instrument}\n\
                     🤖 Confidence: {:.1}%\n\
                     💰 Monthly Saving Required: {} for {years_left} years\n\
                     📊 Projected Value: {projected}\n\
                     📈 Expected Return Rate: {}\n\
                     🔍 {instrument} Overview:\n\
                     • Risk: {}\n\
                     • Lock-in: {}\n\
                     • Liquidity: {}\n\
                     • Tax Benefits: {}",
                    goal.name,
                    prediction.confidence,
                    money(*needed),
                    profile.expected_return(),
                    profile.risk(),
                    profile.lock_in(),
                    profile.liquidity(),
                    profile.tax_benefits(),
                    instrument = prediction.instrument,
                ),
            )
        }
    }
}
