//! Advice Engine
//!
//! Runs the rule sequence over a [`FinancialProfile`] and produces an
//! ordered advice list. Order is meaningful: the list reads as urgency
//! order, and two alerts are placed at fixed positions (0 and 1) instead
//! of being appended.

mod cash_flow;
mod coverage;
mod goals;
mod portfolio;

pub use coverage::{
    emergency_multiplier, recommended_health_cover, recommended_term_cover, CoverageAssessment,
};
pub use goals::{GoalOutcome, GoalPlan};
pub use portfolio::{AllocationBucket, AssetExposure};

use chrono::{Datelike, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::sync::Arc;

use inference_core::InstrumentPredictor;

use crate::error::Result;
use crate::model::{AdviceItem, AdviceReport, FinancialProfile};

/// Tunable limits of the rule set
#[derive(Clone, Debug)]
pub struct Thresholds {
    /// Monthly salary below which finances are flagged as unstable
    pub low_salary: Decimal,

    /// Share of the portfolio (%) above which a bucket is over-concentrated
    pub concentration_percent: Decimal,

    /// Annual return assumed for goal projections
    pub projection_rate: Decimal,

    /// Goal amount from which term cover is re-checked
    pub large_goal: Decimal,

    /// Health cover expected of anyone over 40 planning retirement
    pub retirement_health_floor: Decimal,

    /// Age above which the retirement health check applies
    pub retirement_age: u32,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            low_salary: dec!(10000),
            concentration_percent: dec!(70),
            projection_rate: dec!(0.07),
            large_goal: dec!(2000000),
            retirement_health_floor: dec!(500000),
            retirement_age: 40,
        }
    }
}

/// Ordered advice sequence with explicit positional inserts
#[derive(Debug, Default)]
pub struct AdviceList {
    items: Vec<AdviceItem>,
}

impl AdviceList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, item: AdviceItem) {
        self.items.push(item);
    }

    /// Put an item ahead of everything collected so far
    pub fn prepend(&mut self, item: AdviceItem) {
        self.items.insert(0, item);
    }

    /// Insert at `index`, or append when the list is shorter
    pub fn insert(&mut self, index: usize, item: AdviceItem) {
        let index = index.min(self.items.len());
        self.items.insert(index, item);
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn into_vec(self) -> Vec<AdviceItem> {
        self.items
    }
}

/// Rule engine over an instrument predictor
pub struct AdviceEngine {
    predictor: Arc<InstrumentPredictor>,
    thresholds: Thresholds,
    current_year: Option<i32>,
}

impl AdviceEngine {
    pub fn new(predictor: Arc<InstrumentPredictor>) -> Self {
        Self { predictor, thresholds: Thresholds::default(), current_year: None }
    }

    pub fn with_thresholds(mut self, thresholds: Thresholds) -> Self {
        self.thresholds = thresholds;
        self
    }

    /// Pin the year goals are measured from (defaults to the current UTC year)
    pub fn with_current_year(mut self, year: i32) -> Self {
        self.current_year = Some(year);
        self
    }

    pub fn thresholds(&self) -> &Thresholds {
        &self.thresholds
    }

    pub fn predictor(&self) -> &InstrumentPredictor {
        &self.predictor
    }

    fn current_year(&self) -> i32 {
        self.current_year.unwrap_or_else(|| Utc::now().year())
    }

    /// Produce the ordered advice list for one profile.
    /// Profiles failing [`FinancialProfile::validate`] are rejected up front.
    pub async fn generate_advice(&self, profile: &FinancialProfile) -> Result<Vec<AdviceItem>> {
        profile.validate()?;
        let FinancialProfile { user, goals, investments, insurance } = profile;
        let t = &self.thresholds;
        let mut advice = AdviceList::new();

        tracing::debug!(
            user = %user.name,
            goals = goals.len(),
            investments = investments.len(),
            policies = insurance.len(),
            "generating advice"
        );

        if investments.is_empty() && insurance.is_empty() {
            advice.push(cash_flow::onboarding_alert());
        }

        advice.push(cash_flow::savings_rate_advice(user));

        if user.salary < t.low_salary {
            advice.prepend(cash_flow::unstable_finances_alert());
        }

        let coverage = CoverageAssessment::assess(user, insurance);
        advice.push(coverage.emergency_fund_advice(user));

        advice.push(portfolio::diversification_advice(investments));
        match portfolio::total_investment(investments, insurance) {
            total if total.is_zero() => advice.push(portfolio::no_investments_alert()),
            total => {
                advice.push(portfolio::allocation_advice(investments, insurance, total, t));
                advice.push(portfolio::exposure_advice(investments, total));
            }
        }

        let plan = goals::plan_goals(&self.predictor, user, goals, self.current_year(), t).await?;
        let summary = plan.summary_alert(user);
        for item in plan.items {
            advice.push(item);
        }
        if let Some(alert) = summary {
            advice.insert(1, alert);
        }

        for item in coverage.adequacy_advice(user) {
            advice.push(item);
        }
        for item in coverage.goal_nudges(user, goals, t) {
            advice.push(item);
        }

        tracing::debug!(items = advice.len(), "advice generated");
        Ok(advice.into_vec())
    }

    /// Advice plus the request summary fields echoed back to the caller
    pub async fn report(&self, profile: FinancialProfile) -> Result<AdviceReport> {
        let advice = self.generate_advice(&profile).await?;
        let monthly_savings = profile.user.monthly_savings();
        Ok(AdviceReport {
            user: profile.user,
            goals: profile.goals,
            monthly_savings,
            advice,
        })
    }
}


#[cfg(test)]
mod tests {
    use super::testing::predictor;
    use super::*;
    use crate::model::{Category, Goal, Insurance, Investment, Priority, User, MAX_AMOUNT as MAX};

    const YEAR: i32 = 2025;

    fn user(salary: Decimal, expenses: Decimal, savings: Decimal) -> User {
        User {
            name: "Test".into(),
            salary,
            savings,
            age: 35,
            expenses,
            job_type: "salaried".into(),
            dependents: 0,
        }
    }

    fn profile(user: User) -> FinancialProfile {
        FinancialProfile { user, goals: Vec::new(), investments: Vec::new(), insurance: Vec::new() }
    }

    fn engine() -> AdviceEngine {
        AdviceEngine::new(predictor().0).with_current_year(YEAR)
    }

    #[test]
    fn test_advice_list_positions() {
        let mut list = AdviceList::new();
        list.insert(1, AdviceItem::new(Category::Goals, Priority::High, "a"));
        list.push(AdviceItem::new(Category::Risk, Priority::Low, "b"));
        list.prepend(AdviceItem::new(Category::SystemAlert, Priority::High, "c"));
        list.insert(1, AdviceItem::new(Category::Goals, Priority::High, "d"));

        let messages: Vec<_> = list.into_vec().into_iter().map(|i| i.message).collect();
        assert_eq!(messages, vec!["c", "d", "a", "b"]);
    }

    #[tokio::test]
    async fn test_new_user_scenario() {
        let profile = profile(user(dec!(50000), dec!(40000), dec!(20000)));
        let advice = engine().generate_advice(&profile).await.unwrap();

        assert_eq!(advice[0].category, Category::SystemAlert);
        assert_eq!(advice[0].priority, Priority::High);

        let cash = advice.iter().find(|a| a.category == Category::CashFlow).unwrap();
        assert_eq!(cash.priority, Priority::Low);
        assert!(cash.message.contains("20.0%"));
        assert!(cash.message.starts_with("Good!"));

        let emergency = advice.iter().find(|a| a.category == Category::EmergencyFund).unwrap();
        assert_eq!(emergency.priority, Priority::High);
        assert!(emergency.message.contains("₹200,000"));
        assert!(emergency.message.contains("4.0×"));

        let no_investments = advice
            .iter()
            .filter(|a| a.category == Category::Investment)
            .find(|a| a.priority == Priority::High)
            .unwrap();
        assert!(no_investments.message.contains("no investments"));

        let risks: Vec<_> = advice.iter().filter(|a| a.category == Category::Risk).collect();
        assert_eq!(risks.len(), 2);
        assert!(risks.iter().all(|r| r.priority == Priority::High));

        // nothing invested: no allocation or exposure breakdown
        assert!(!advice.iter().any(|a| a.message.contains("Allocation:")));
        assert!(!advice.iter().any(|a| a.message.contains("Asset Class Exposure")));
    }

    #[tokio::test]
    async fn test_excellent_savings_rate() {
        for (salary, expenses) in [(dec!(100000), dec!(65000)), (dec!(40000), dec!(1000))] {
            let advice = engine()
                .generate_advice(&profile(user(salary, expenses, dec!(0))))
                .await
                .unwrap();
            let cash = advice.iter().find(|a| a.category == Category::CashFlow).unwrap();
            assert_eq!(cash.priority, Priority::Low);
            assert!(cash.message.contains("Excellent"));
        }
    }

    #[tokio::test]
    async fn test_low_salary_alert_goes_first() {
        let advice = engine()
            .generate_advice(&profile(user(dec!(8000), dec!(7000), dec!(0))))
            .await
            .unwrap();

        assert_eq!(advice[0].category, Category::SystemAlert);
        assert!(advice[0].message.contains("unstable"));
        assert!(advice[1].message.contains("haven't started investing"));
        assert_eq!(advice[2].category, Category::CashFlow);
    }

    #[tokio::test]
    async fn test_affordable_retirement_goal() {
        let mut p = profile(user(dec!(50000), dec!(20000), dec!(100000)));
        p.goals.push(Goal {
            name: "Retirement".into(),
            amount: dec!(2000000),
            target_year: YEAR + 10,
            saved_amount: dec!(0),
        });

        let (predictor, model) = predictor();
        let engine = AdviceEngine::new(predictor).with_current_year(YEAR);
        let advice = engine.generate_advice(&p).await.unwrap();

        let goal = advice.iter().find(|a| a.category == Category::Goals).unwrap();
        assert_eq!(goal.priority, Priority::Medium);
        assert!(goal.message.contains("Recommended Instrument: NPS"));
        assert!(goal.message.contains("Confidence: 82.0%"));
        assert!(goal.message.contains("₹16,667"));
        assert!(goal.message.contains("₹2,901,574"));
        assert!(goal.message.contains("Until retirement"));
        assert_eq!(model.calls(), 1);

        // no summary alert: 16,667 < 30,000
        assert_eq!(advice.iter().filter(|a| a.category == Category::Goals).count(), 1);
    }

    #[tokio::test]
    async fn test_passed_goal_skips_prediction() {
        let mut p = profile(user(dec!(50000), dec!(20000), dec!(100000)));
        p.goals.push(Goal {
            name: "Wedding".into(),
            amount: dec!(500000),
            target_year: YEAR,
            saved_amount: dec!(0),
        });

        let (predictor, model) = predictor();
        let engine = AdviceEngine::new(predictor).with_current_year(YEAR);
        let advice = engine.generate_advice(&p).await.unwrap();

        let goal = advice.iter().find(|a| a.category == Category::Goals).unwrap();
        assert_eq!(goal.priority, Priority::High);
        assert!(goal.message.contains("target year has passed"));
        assert_eq!(model.calls(), 0);
    }

    #[tokio::test]
    async fn test_unaffordable_goals_summary_at_position_one() {
        let mut p = profile(user(dec!(50000), dec!(40000), dec!(0)));
        p.investments.push(Investment {
            instrument_name: "PPF".into(),
            amount: dec!(10000),
            kind: String::new(),
        });
        p.goals.push(Goal {
            name: "Buy a house".into(),
            amount: dec!(3000000),
            target_year: YEAR + 5,
            saved_amount: dec!(0),
        });

        let advice = engine().generate_advice(&p).await.unwrap();

        assert_eq!(advice[1].category, Category::Goals);
        assert_eq!(advice[1].priority, Priority::High);
        assert!(advice[1].message.contains("does not support any"));
    }

    #[tokio::test]
    async fn test_both_positional_alerts_together() {
        let mut p = profile(user(dec!(8000), dec!(7000), dec!(0)));
        p.goals.push(Goal {
            name: "Buy a house".into(),
            amount: dec!(600000),
            target_year: YEAR + 5,
            saved_amount: dec!(0),
        });

        let advice = engine().generate_advice(&p).await.unwrap();

        let categories: Vec<_> = advice.iter().map(|a| a.category).collect();
        assert_eq!(
            categories,
            vec![
                Category::SystemAlert,
                Category::Goals,
                Category::SystemAlert,
                Category::CashFlow,
                Category::EmergencyFund,
                Category::Investment,
                Category::Investment,
                Category::Goals,
                Category::Risk,
                Category::Risk,
            ]
        );
        assert!(advice[0].message.contains("unstable"));
        assert!(advice[1].message.contains("does not support any"));
        assert!(advice[2].message.contains("haven't started investing"));
        assert!(advice[7].message.contains("not feasible"));
    }

    #[tokio::test]
    async fn test_far_future_goal_does_not_overflow() {
        let mut p = profile(user(dec!(50000), dec!(20000), dec!(0)));
        p.goals.push(Goal {
            name: "Legacy".into(),
            amount: dec!(1200000),
            target_year: 300_000_000,
            saved_amount: dec!(0),
        });

        let advice = AdviceEngine::new(predictor().0)
            .with_current_year(2026)
            .generate_advice(&p)
            .await
            .unwrap();
        let goal = advice.iter().find(|a| a.category == Category::Goals).unwrap();
        assert!(goal.message.contains("for 299997974 years"));
    }

    #[tokio::test]
    async fn test_out_of_range_amounts_are_rejected() {
        let (predictor, model) = predictor();
        let engine = AdviceEngine::new(predictor).with_current_year(YEAR);

        let huge = profile(user(dec!(10000000000000000), dec!(20000), dec!(0)));
        let err = engine.generate_advice(&huge).await.unwrap_err();
        assert!(matches!(err, crate::AdvisorError::InvalidInput(_)));
        assert_eq!(model.calls(), 0);

        // at the limit every derived amount still fits
        let mut edge = profile(user(MAX, -MAX, MAX));
        edge.investments.push(Investment {
            instrument_name: "Gold".into(),
            amount: MAX,
            kind: String::new(),
        });
        edge.investments.push(Investment {
            instrument_name: "PPF".into(),
            amount: -MAX,
            kind: String::new(),
        });
        edge.insurance.push(Insurance {
            kind: "Term Life Insurance".into(),
            coverage: MAX,
            amount: MAX,
        });
        edge.goals.push(Goal {
            name: "Retirement".into(),
            amount: MAX,
            target_year: i32::MAX,
            saved_amount: -MAX,
        });
        assert!(engine.generate_advice(&edge).await.is_ok());
    }

    #[tokio::test]
    async fn test_negative_savings_still_advised() {
        let advice = engine()
            .generate_advice(&profile(user(dec!(50000), dec!(40000), dec!(-5000))))
            .await
            .unwrap();
        let emergency = advice.iter().find(|a| a.category == Category::EmergencyFund).unwrap();
        assert_eq!(emergency.priority, Priority::High);
    }

    #[tokio::test]
    async fn test_prediction_errors_propagate() {
        let mut p = profile(user(dec!(50000), dec!(20000), dec!(0)));
        p.goals.push(Goal {
            name: "Retirement".into(),
            amount: dec!(100000),
            target_year: YEAR + 3,
            saved_amount: dec!(0),
        });

        // empty label set: the top class cannot be decoded
        let (predictor, _) = super::testing::predictor_with_labels(&[]);
        let engine = AdviceEngine::new(predictor).with_current_year(YEAR);
        let err = engine.generate_advice(&p).await.unwrap_err();
        assert!(err.to_string().contains("Unknown instrument label"));
    }

    #[tokio::test]
    async fn test_report_echoes_summary() {
        let mut p = profile(user(dec!(60000), dec!(25000), dec!(300000)));
        p.insurance.push(Insurance {
            kind: "Health Insurance".into(),
            coverage: dec!(500000),
            amount: dec!(15000),
        });
        let report = engine().report(p).await.unwrap();
        assert_eq!(report.monthly_savings, dec!(35000));
        assert_eq!(report.user.name, "Test");
        assert!(!report.advice.is_empty());
    }
}
