//! Plain-text rendering of an advice report.

use std::fmt::Write;

use crate::format::money;
use crate::model::AdviceReport;

/// Numbered advice list under a short user header
pub fn render_summary(report: &AdviceReport) -> String {
    let mut out = String::from("\n📊 AI Advisor Summary\n\n");
    let _ = writeln!(out, "👤 User: {}", report.user.name);
    let _ = writeln!(out, "💰 Monthly Savings: {}\n", money(report.monthly_savings));

    for (idx, item) in report.advice.iter().enumerate() {
        let _ = writeln!(
            out,
            "{}. [{}] ({}) - {}",
            idx + 1,
            item.category,
            item.priority,
            item.message
        );
    }
    out
}
