//! Portfolio Rules
//!
//! Diversification, allocation concentration and asset-class exposure.

use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::HashSet;

use super::Thresholds;
use crate::format::percent;
use crate::instruments::AssetClass;
use crate::model::{AdviceItem, Category, Insurance, Investment, Priority, INSURANCE_BUCKET};
use crate::projection::share_percent;

/// One allocation line: a named bucket, its amount and share of the total
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct AllocationBucket {
    pub name: String,
    pub amount: Decimal,
    pub percent: Decimal,
}

fn is_general(inv: &Investment) -> bool {
    inv.instrument_name != INSURANCE_BUCKET
}

fn premiums(insurance: &[Insurance]) -> Decimal {
    insurance.iter().map(|i| i.amount).sum()
}

/// Investments (minus those booked as "Insurance") plus all premiums
pub fn total_investment(investments: &[Investment], insurance: &[Insurance]) -> Decimal {
    let invested: Decimal = investments.iter().filter(|i| is_general(i)).map(|i| i.amount).sum();
    invested + premiums(insurance)
}

/// Amount per instrument in first-seen order, with a trailing "Insurance"
/// bucket for premiums. Empty when `total` is zero.
pub fn allocation(
    investments: &[Investment],
    insurance: &[Insurance],
    total: Decimal,
) -> Vec<AllocationBucket> {
    let mut amounts: Vec<(String, Decimal)> = Vec::new();
    for inv in investments.iter().filter(|i| is_general(i)) {
        match amounts.iter_mut().find(|(name, _)| *name == inv.instrument_name) {
            Some((_, amount)) => *amount += inv.amount,
            None => amounts.push((inv.instrument_name.clone(), inv.amount)),
        }
    }
    amounts.push((INSURANCE_BUCKET.to_string(), premiums(insurance)));

    amounts
        .into_iter()
        .filter_map(|(name, amount)| {
            share_percent(amount, total).map(|percent| AllocationBucket { name, amount, percent })
        })
        .collect()
}

/// Asset-class totals in first-seen order; unclassified instruments are left out
#[derive(Clone, Debug, Default, Serialize)]
pub struct AssetExposure {
    pub classes: Vec<(AssetClass, Decimal)>,
}

impl AssetExposure {
    pub fn from_investments(investments: &[Investment]) -> Self {
        let mut classes: Vec<(AssetClass, Decimal)> = Vec::new();
        for inv in investments {
            let Some(class) = AssetClass::of(&inv.instrument_name) else {
                continue;
            };
            match classes.iter_mut().find(|(c, _)| *c == class) {
                Some((_, amount)) => *amount += inv.amount,
                None => classes.push((class, inv.amount)),
            }
        }
        Self { classes }
    }

    /// Class holding the largest amount; the earliest one wins ties
    pub fn dominant(&self) -> Option<AssetClass> {
        let mut best: Option<(AssetClass, Decimal)> = None;
        for &(class, amount) in &self.classes {
            if best.is_none_or(|(_, b)| amount > b) {
                best = Some((class, amount));
            }
        }
        best.map(|(class, _)| class)
    }
}

pub(super) fn diversification_advice(investments: &[Investment]) -> AdviceItem {
    let distinct: HashSet<&str> = investments.iter().map(|i| i.instrument_name.as_str()).collect();
    tracing::debug!(distinct = distinct.len(), "diversification");

    if distinct.len() < 2 {
        AdviceItem::new(
            Category::Investment,
            Priority::Medium,
            "Consider diversifying your investments into more categories.",
        )
    } else {
        AdviceItem::new(
            Category::Investment,
            Priority::Low,
            "Your investments are well-diversified.",
        )
    }
}

pub(super) fn no_investments_alert() -> AdviceItem {
    AdviceItem::new(
        Category::Investment,
        Priority::High,
        "⚠️ You have no investments yet. Start investing a portion of your savings to build long-term wealth.",
    )
}

fn bullet_lines<'a>(lines: impl Iterator<Item = (&'a str, Decimal)>) -> String {
    lines
        .map(|(name, pct)| format!("• {name}: {}%", percent(pct)))
        .collect::<Vec<_>>()
        .join("\n")
}

pub(super) fn allocation_advice(
    investments: &[Investment],
    insurance: &[Insurance],
    total: Decimal,
    t: &Thresholds,
) -> AdviceItem {
    let buckets = allocation(investments, insurance, total);
    let concentrated = buckets.iter().any(|b| b.percent > t.concentration_percent);
    let breakdown = bullet_lines(buckets.iter().map(|b| (b.name.as_str(), b.percent)));
    tracing::debug!(buckets = buckets.len(), concentrated, "allocation");

    if concentrated {
        AdviceItem::new(
            Category::Investment,
            Priority::Medium,
            format!(
                "⚠️ Your investments are highly concentrated.\n🔍 Allocation:\n{breakdown}\n\
                 💡 Consider diversifying further to manage risk."
            ),
        )
    } else {
        AdviceItem::new(
            Category::Investment,
            Priority::Low,
            format!("✅ Your investment spread looks balanced.\n🔍 Allocation:\n{breakdown}"),
        )
    }
}

pub(super) fn exposure_advice(investments: &[Investment], total: Decimal) -> AdviceItem {
    let exposure = AssetExposure::from_investments(investments);
    let summary = bullet_lines(exposure.classes.iter().filter_map(|&(class, amount)| {
        share_percent(amount, total).map(|pct| (class.as_str(), pct))
    }));
    let dominant = exposure.dominant();
    tracing::debug!(?dominant, "asset exposure");

    let dominant_name = dominant.map_or("None", AssetClass::as_str);
    let (priority, suggestion) = if dominant == Some(AssetClass::Debt) {
        (Priority::Medium, "Consider adding equity instruments for long-term growth.")
    } else {
        (Priority::Low, "Your asset allocation looks reasonable.")
    };

    AdviceItem::new(
        Category::Investment,
        priority,
        format!(
            "📊 Asset Class Exposure:\n{summary}\n💡 Dominant class: {dominant_name}. {suggestion}"
        ),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn inv(name: &str, amount: Decimal) -> Investment {
        Investment { instrument_name: name.into(), amount, kind: String::new() }
    }

    fn premium(amount: Decimal) -> Insurance {
        Insurance { kind: "Health Insurance".into(), coverage: dec!(500000), amount }
    }

    #[test]
    fn test_total_excludes_insurance_named_investments() {
        let investments = [inv("PPF", dec!(1000)), inv("Insurance", dec!(5000))];
        assert_eq!(total_investment(&investments, &[premium(dec!(500))]), dec!(1500));
    }

    #[test]
    fn test_allocation_sums_to_hundred() {
        let investments = [
            inv("PPF", dec!(1000)),
            inv("Stocks", dec!(2500)),
            inv("PPF", dec!(500)),
            inv("Insurance", dec!(9999)),
            inv("Crypto", dec!(333)),
        ];
        let insurance = [premium(dec!(700)), premium(dec!(300))];
        let total = total_investment(&investments, &insurance);
        let buckets = allocation(&investments, &insurance, total);

        let names: Vec<_> = buckets.iter().map(|b| b.name.as_str()).collect();
        assert_eq!(names, vec!["PPF", "Stocks", "Crypto", "Insurance"]);
        assert_eq!(buckets[0].amount, dec!(1500));
        assert_eq!(buckets[3].amount, dec!(1000));

        let sum: Decimal = buckets.iter().map(|b| b.percent).sum();
        assert!((sum - dec!(100)).abs() < dec!(0.0000001), "{sum}");
    }

    #[test]
    fn test_concentration() {
        let t = Thresholds::default();
        let investments = [inv("Bank FD", dec!(8000)), inv("Stocks", dec!(2000))];
        let item = allocation_advice(&investments, &[], dec!(10000), &t);
        assert_eq!(item.priority, Priority::Medium);
        assert!(item.message.contains("• Bank FD: 80.0%"));
        assert!(item.message.contains("• Insurance: 0.0%"));

        let balanced = [inv("Bank FD", dec!(7000)), inv("Stocks", dec!(3000))];
        let item = allocation_advice(&balanced, &[], dec!(10000), &t);
        assert_eq!(item.priority, Priority::Low);
    }

    #[test]
    fn test_debt_dominant_exposure() {
        let investments = [
            inv("Bank FD", dec!(4000)),
            inv("Gold ETF", dec!(9000)),
            inv("Stocks", dec!(3000)),
            inv("Debt Mutual Fund", dec!(1000)),
        ];
        let exposure = AssetExposure::from_investments(&investments);
        assert_eq!(
            exposure.classes,
            vec![(AssetClass::Debt, dec!(5000)), (AssetClass::Equity, dec!(3000))]
        );
        assert_eq!(exposure.dominant(), Some(AssetClass::Debt));

        let item = exposure_advice(&investments, dec!(17000));
        assert_eq!(item.priority, Priority::Medium);
        assert!(item.message.contains("Dominant class: Debt"));
        assert!(!item.message.contains("Gold ETF"));
    }

    #[test]
    fn test_exposure_without_known_instruments() {
        let item = exposure_advice(&[inv("Gold ETF", dec!(100))], dec!(100));
        assert_eq!(item.priority, Priority::Low);
        assert!(item.message.contains("Dominant class: None"));
    }

    #[test]
    fn test_diversification() {
        assert_eq!(diversification_advice(&[]).priority, Priority::Medium);
        let same = [inv("PPF", dec!(1)), inv("PPF", dec!(2))];
        assert_eq!(diversification_advice(&same).priority, Priority::Medium);
        let two = [inv("PPF", dec!(1)), inv("NPS", dec!(2))];
        assert_eq!(diversification_advice(&two).priority, Priority::Low);
    }
}
