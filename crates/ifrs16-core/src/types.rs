use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// All monetary values. Wraps Decimal to prevent accidental f64 usage.
pub type Money = Decimal;

/// Rates expressed as decimals (0.05 = 5%). Never as percentages.
pub type Rate = Decimal;

/// Year fractions or counts
pub type Years = Decimal;

/// Currency code carried on journal entries. Formatting is a UI concern.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Currency {
    #[default]
    USD,
    GBP,
    EUR,
    NGN,
    Other(String),
}

/// How often a fixed lease payment falls due.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentFrequency {
    #[default]
    Monthly,
    Quarterly,
    Semiannual,
    Annual,
}

impl PaymentFrequency {
    /// Number of payment periods per calendar year.
    pub fn periods_per_year(self) -> u32 {
        match self {
            PaymentFrequency::Monthly => 12,
            PaymentFrequency::Quarterly => 4,
            PaymentFrequency::Semiannual => 2,
            PaymentFrequency::Annual => 1,
        }
    }

    /// Calendar months covered by one payment period.
    pub fn months_per_period(self) -> u32 {
        12 / self.periods_per_year()
    }

    /// Permissive parse of a free-text frequency label.
    /// Unrecognized input falls back to Monthly.
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_ascii_lowercase().as_str() {
            "quarterly" => PaymentFrequency::Quarterly,
            "semiannual" | "semi-annual" => PaymentFrequency::Semiannual,
            "annual" | "yearly" => PaymentFrequency::Annual,
            _ => PaymentFrequency::Monthly,
        }
    }
}

/// Whether payments fall at the start of each period (annuity-due) or the end.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentTiming {
    Advance,
    #[default]
    Arrears,
}
