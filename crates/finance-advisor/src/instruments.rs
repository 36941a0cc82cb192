//! Instrument Reference Data
//!
//! Static, read-only descriptions of the instruments the advisor knows about
//! and the coarse asset class each one belongs to.

use once_cell::sync::Lazy;
use serde::Serialize;
use std::collections::HashMap;
use std::fmt;

/// Shown for any metadata field of an unknown instrument
pub const NOT_AVAILABLE: &str = "N/A";

/// Expected return quoted when the instrument is unknown
pub const DEFAULT_EXPECTED_RETURN: &str = "7% p.a.";

/// Descriptive attributes of an instrument
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct InstrumentMetadata {
    pub risk: &'static str,
    pub lock_in: &'static str,
    pub liquidity: &'static str,
    pub tax_benefits: &'static str,
    pub expected_return: &'static str,
}

const fn meta(
    risk: &'static str,
    lock_in: &'static str,
    liquidity: &'static str,
    tax_benefits: &'static str,
    expected_return: &'static str,
) -> InstrumentMetadata {
    InstrumentMetadata { risk, lock_in, liquidity, tax_benefits, expected_return }
}

#[rustfmt::skip]
const INSTRUMENTS: [(&str, InstrumentMetadata); 16] = [
    ("PPF", meta("Low", "15 years", "Low", "Yes (Sec 80C)", "7% p.a.")),
    ("Debt Mutual Fund", meta("Medium", "No lock-in", "High", "Partial (LTCG after 3 years)", "6–8% p.a.")),
    ("Equity Mutual Fund", meta("High", "No lock-in", "High", "No", "10–12% p.a.")),
    ("ELSS Mutual Fund", meta("High", "3 years", "Medium", "Yes (Sec 80C)", "10–12% p.a.")),
    ("Bank FD", meta("Low", "1–5 years", "Medium", "Interest taxable", "6–7% p.a.")),
    ("Post Office RD", meta("Low", "5 years", "Medium", "No", "6.5% p.a.")),
    ("Sovereign Gold Bonds", meta("Medium", "5–8 years", "Low", "Interest taxable", "6.5–7.5% p.a.")),
    ("ULIP", meta("Medium", "5 years", "Low", "Yes (Sec 80C)", "6–10% p.a.")),
    ("NPS", meta("Medium", "Until retirement", "Low", "Yes (Sec 80C + 80CCD)", "8–10% p.a.")),
    ("Real Estate Investment", meta("Medium", "5–10+ years", "Low", "Property capital gains", "Varies")),
    ("REITs", meta("Medium", "3+ years", "Medium", "No", "7–9% p.a.")),
    ("Gold ETF", meta("Medium", "No lock-in", "High", "LTCG tax on gains", "6–8% p.a.")),
    ("Index Fund", meta("High", "No lock-in", "High", "LTCG applicable", "10–12% p.a.")),
    ("Stocks", meta("Very High", "No lock-in", "High", "LTCG/STCG", "12–18% p.a.")),
    ("Crypto", meta("Very High", "No lock-in", "High", "30% flat tax in India", "Highly volatile")),
    ("Fixed Maturity Plan", meta("Low to Medium", "3–5 years", "Low", "Post 3 years – LTCG", "6–7.5% p.a.")),
];

static METADATA: Lazy<HashMap<&'static str, InstrumentMetadata>> =
    Lazy::new(|| INSTRUMENTS.iter().copied().collect());

/// Metadata for an exact instrument name
pub fn metadata(name: &str) -> Option<&'static InstrumentMetadata> {
    METADATA.get(name)
}

/// All known instrument names, in table order
pub fn instrument_names() -> impl Iterator<Item = &'static str> {
    INSTRUMENTS.iter().map(|(name, _)| *name)
}

/// Field-by-field view with the `N/A` fallbacks used in goal advice
#[derive(Clone, Copy, Debug)]
pub struct InstrumentProfile(Option<&'static InstrumentMetadata>);

impl InstrumentProfile {
    pub fn lookup(name: &str) -> Self {
        Self(metadata(name))
    }

    pub fn is_known(&self) -> bool {
        self.0.is_some()
    }

    pub fn risk(&self) -> &'static str {
        self.0.map_or(NOT_AVAILABLE, |m| m.risk)
    }

    pub fn lock_in(&self) -> &'static str {
        self.0.map_or(NOT_AVAILABLE, |m| m.lock_in)
    }

    pub fn liquidity(&self) -> &'static str {
        self.0.map_or(NOT_AVAILABLE, |m| m.liquidity)
    }

    pub fn tax_benefits(&self) -> &'static str {
        self.0.map_or(NOT_AVAILABLE, |m| m.tax_benefits)
    }

    pub fn expected_return(&self) -> &'static str {
        self.0.map_or(DEFAULT_EXPECTED_RETURN, |m| m.expected_return)
    }
}

/// Coarse bucket for exposure analysis
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum AssetClass {
    Debt,
    Equity,
    Hybrid,
    Alternative,
}

impl AssetClass {
    /// Bucket of an instrument; `None` for instruments outside the table
    pub fn of(instrument_name: &str) -> Option<Self> {
        match instrument_name {
            "Bank FD" | "Debt Mutual Fund" => Some(AssetClass::Debt),
            "Equity Mutual Fund" | "ELSS Mutual Fund" | "Stocks" => Some(AssetClass::Equity),
            "PPF" | "ULIP" | "NPS" => Some(AssetClass::Hybrid),
            "Sovereign Gold Bonds" | "Real Estate Investment" => Some(AssetClass::Alternative),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            AssetClass::Debt => "Debt",
            AssetClass::Equity => "Equity",
            AssetClass::Hybrid => "Hybrid",
            AssetClass::Alternative => "Alternative",
        }
    }
}

impl fmt::Display for AssetClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
