//! Onboarding, savings rate and income stability rules.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::format::percent;
use crate::model::{AdviceItem, Category, Priority, User};
use crate::projection::share_percent;

pub(super) fn onboarding_alert() -> AdviceItem {
    AdviceItem::new(
        Category::SystemAlert,
        Priority::High,
        "🔰 You haven't started investing or bought any insurance. Begin by saving at least 10–20% of your income. \
         Then explore simple low-risk investments and basic insurance to protect your finances.",
    )
}

pub(super) fn unstable_finances_alert() -> AdviceItem {
    AdviceItem::new(
        Category::SystemAlert,
        Priority::High,
        "⚠️ Your current financial situation is unstable. Consider speaking to a financial advisor before investing.",
    )
}

/// Share of salary left after expenses, 0 when nothing is left
pub fn savings_rate(user: &User) -> Decimal {
    let monthly_savings = user.monthly_savings();
    if monthly_savings <= Decimal::ZERO {
        return Decimal::ZERO;
    }
    share_percent(monthly_savings, user.salary).unwrap_or(Decimal::ZERO)
}

pub(super) fn savings_rate_advice(user: &User) -> AdviceItem {
    if user.monthly_savings() <= Decimal::ZERO {
        tracing::debug!("savings rate: expenses exceed income");
        return AdviceItem::new(
            Category::CashFlow,
            Priority::High,
            "Your expenses exceed your income. Reduce spending or increase earnings to start saving.",
        );
    }

    let rate = savings_rate(user);
    let shown = percent(rate);
    tracing::debug!(rate = %rate, "savings rate");

    let (priority, message) = if rate < dec!(10) {
        (
            Priority::High,
            format!(
                "Your savings rate is just {shown}%. Try to reduce expenses or increase income to save at least 20% of your salary."
            ),
        )
    } else if rate < dec!(20) {
        (
            Priority::Medium,
            format!(
                "Your savings rate is {shown}%. Consider trimming discretionary expenses to reach a healthier target of 20%."
            ),
        )
    } else if rate < dec!(35) {
        (
            Priority::Low,
            format!("Good! Your savings rate is {shown}%. Keep maintaining or improving this trend."),
        )
    } else {
        (
            Priority::Low,
            format!("Excellent! Your savings rate is {shown}%. You're building wealth at a great pace."),
        )
    };

    AdviceItem::new(Category::CashFlow, priority, message)
}
