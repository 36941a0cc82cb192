//! # finance-advisor
//!
//! Rule-based personal finance advisor. A [`FinancialProfile`] goes in, an
//! ordered list of categorized, prioritized [`AdviceItem`]s comes out.
//!
//! ## Rule Order
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  1. Onboarding          no investments and no insurance     │
//! │  2. Cash flow           savings-rate tier                   │
//! │  3. Income stability    salary < 10,000 → moved to front    │
//! │  4. Emergency fund      3.0× to 5.5× monthly salary         │
//! │  5. Diversification     distinct instruments                │
//! │  6. Allocation          concentration > 70%                 │
//! │  7. Asset classes       Debt / Equity / Hybrid / Alt        │
//! │  8. Goals               feasibility + predicted instrument  │
//! │  9. Goals summary       inserted at position 1              │
//! │ 10. Insurance           health and term adequacy            │
//! │ 11. Nudges              retirement / large goals            │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! Step 8 is the only one that leaves the process: each open goal is sent
//! through an [`inference_core::InstrumentPredictor`].

pub mod engine;
pub mod error;
pub mod format;
pub mod instruments;
pub mod model;
pub mod projection;
pub mod report;

pub use engine::{AdviceEngine, GoalOutcome, Thresholds};
pub use error::{AdvisorError, Result};
pub use instruments::{AssetClass, InstrumentMetadata, InstrumentProfile};
pub use model::{
    AdviceItem, AdviceReport, Category, FinancialProfile, Goal, Insurance, Investment, Priority,
    User,
};
pub use report::render_summary;
