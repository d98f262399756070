//! Contract-level input types consumed by the measurement engine.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::{Currency, Money, PaymentFrequency, PaymentTiming, Rate, Years};

/// Renewal option attached to a lease contract.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenewalOption {
    /// Additional years added to the term if exercised
    pub additional_years: Years,
    /// Likelihood of exercise (0–1)
    pub likelihood: Rate,
}

/// Early-termination option.
///
/// The exercise point arrives from contract storage as free text;
/// [`TerminationOption::exercise_point_years`] parses it once at the
/// boundary rather than inside calculation loops.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TerminationOption {
    /// Point at which the lease can be exited, in years from commencement
    pub exercise_point: String,
    /// Likelihood of exercise (0–1)
    pub likelihood: Rate,
}

impl TerminationOption {
    /// Permissive parse: empty or non-numeric input counts as 0 years.
    pub fn exercise_point_years(&self) -> Years {
        self.exercise_point
            .trim()
            .parse::<Decimal>()
            .unwrap_or(Decimal::ZERO)
    }
}

/// Residual value guarantee given by the lessee.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResidualValueGuarantee {
    /// Guaranteed amount payable at the end of the lease
    pub amount: Money,
    /// Whether payment under the guarantee is reasonably certain
    pub reasonably_certain: bool,
}

/// Full contractual input for one lease measurement.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeaseTerms {
    /// Description of the lease
    pub description: String,
    /// Commencement date of the lease
    pub commencement: NaiveDate,
    /// Fixed payment per period
    pub fixed_payment: Money,
    #[serde(default)]
    pub frequency: PaymentFrequency,
    #[serde(default)]
    pub timing: PaymentTiming,
    /// Annual incremental borrowing rate (0.05 = 5%)
    pub annual_rate: Rate,
    /// Non-cancellable term in years
    pub non_cancellable_years: Years,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub renewal: Option<RenewalOption>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub termination: Option<TerminationOption>,
    /// Initial direct costs incurred by the lessee
    #[serde(default)]
    pub initial_direct_costs: Money,
    /// Lease payments made before commencement
    #[serde(default)]
    pub prepayments: Money,
    /// Incentives received from the lessor
    #[serde(default)]
    pub incentives: Money,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub residual_value_guarantee: Option<ResidualValueGuarantee>,
    /// Fair value of the underlying asset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fair_value: Option<Money>,
    /// Carrying amount of the underlying asset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub carrying_amount: Option<Money>,
    /// Proceeds received in a sale-and-leaseback-like arrangement
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sale_proceeds: Option<Money>,
    /// Routes `calculate` to the modification path when set
    #[serde(default)]
    pub has_modification: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub modification: Option<LeaseModification>,
    /// Currency stamped on journal entries
    #[serde(default)]
    pub currency: Currency,
    /// Free-form contract attributes, carried through untouched
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extra_fields: Option<BTreeMap<String, serde_json::Value>>,
}

/// Kind of modification event raised against a contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModificationKind {
    Amendment,
    Termination,
}

/// Term values the user actually changed. Unset means "unchanged".
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ModifiedTerms {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fixed_payment: Option<Money>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub annual_rate: Option<Rate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timing: Option<PaymentTiming>,
}

/// A modification event against an existing contract.
///
/// Chronology (agreement_date ≤ effective_date, effective_date ≥
/// commencement) is validated by the caller before the engine is invoked.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeaseModification {
    /// Date the modified terms take effect
    pub effective_date: NaiveDate,
    /// Date the modification was agreed
    pub agreement_date: NaiveDate,
    pub kind: ModificationKind,
    /// Free-text reason recorded with the event
    #[serde(default)]
    pub reason: String,
    #[serde(default)]
    pub changes: ModifiedTerms,
}
