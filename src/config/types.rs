//! Configuration types for loan decisions.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from YAML configuration files. The `Default` impls
//! reproduce the shipped `config/default` files.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::{EmploymentStatus, RepaymentMethod};

/// Currency the approved amount is converted into.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrencyMetadata {
    /// ISO code of the target currency (e.g., "KRW").
    pub code: String,
    /// Word appended to amounts in reports (e.g., "원").
    pub unit: String,
}

/// Pipeline settings from `pipeline.yaml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelineSettings {
    /// Target currency units per source currency unit.
    pub exchange_rate: Decimal,
    /// Fixed term offered to every approved applicant.
    pub repayment_years: u32,
    /// Fixed repayment method offered to every approved applicant.
    pub repayment_method: RepaymentMethod,
    /// Target currency metadata.
    pub currency: CurrencyMetadata,
}

impl Default for PipelineSettings {
    fn default() -> Self {
        Self {
            exchange_rate: Decimal::new(133_021, 2),
            repayment_years: 5,
            repayment_method: RepaymentMethod::EqualInstallment,
            currency: CurrencyMetadata {
                code: "KRW".to_string(),
                unit: "원".to_string(),
            },
        }
    }
}

/// One row of a threshold rule table.
///
/// The tier matches when the evaluated value is strictly greater than
/// `above`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThresholdTier {
    /// Exclusive lower bound for the tier.
    pub above: Decimal,
    /// Percentage points added to the rate when the tier matches.
    pub adjustment: Decimal,
}

/// An ordered rule table: tiers are tried top to bottom, first match wins,
/// and `otherwise` applies when no tier matches.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThresholdTable {
    /// Tiers in evaluation order. The order is significant and is never sorted.
    pub tiers: Vec<ThresholdTier>,
    /// Adjustment when no tier matches.
    #[serde(default)]
    pub otherwise: Decimal,
}

impl ThresholdTable {
    fn from_pairs(pairs: &[(Decimal, Decimal)], otherwise: Decimal) -> Self {
        Self {
            tiers: pairs
                .iter()
                .map(|&(above, adjustment)| ThresholdTier { above, adjustment })
                .collect(),
            otherwise,
        }
    }
}

/// Adjustment per employment status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmploymentAdjustments {
    /// Adjustment for employed applicants.
    pub employed: Decimal,
    /// Adjustment for self-employed applicants.
    pub self_employed: Decimal,
    /// Adjustment for unemployed applicants.
    pub unemployed: Decimal,
}

impl EmploymentAdjustments {
    /// Returns the adjustment for the given status.
    pub fn for_status(&self, status: EmploymentStatus) -> Decimal {
        match status {
            EmploymentStatus::Employed => self.employed,
            EmploymentStatus::SelfEmployed => self.self_employed,
            EmploymentStatus::Unemployed => self.unemployed,
        }
    }
}

/// Interest rate rules from `rates.yaml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RatePolicy {
    /// Annual base rate in percent before adjustments.
    pub base_rate: Decimal,
    /// Credit score tiers, best first.
    pub credit_score: ThresholdTable,
    /// Debt-to-income tiers, worst first.
    pub dti_ratio: ThresholdTable,
    /// Employment status adjustments.
    pub employment: EmploymentAdjustments,
    /// Loan amount tiers.
    pub loan_amount: ThresholdTable,
}

impl Default for RatePolicy {
    fn default() -> Self {
        Self {
            base_rate: Decimal::new(40, 1),
            credit_score: ThresholdTable::from_pairs(
                &[
                    (Decimal::from(750), Decimal::new(-10, 1)),
                    (Decimal::from(700), Decimal::new(-5, 1)),
                    (Decimal::from(650), Decimal::ZERO),
                ],
                Decimal::new(10, 1),
            ),
            dti_ratio: ThresholdTable::from_pairs(
                &[
                    (Decimal::new(4, 1), Decimal::new(10, 1)),
                    (Decimal::new(35, 2), Decimal::new(5, 1)),
                    (Decimal::new(3, 1), Decimal::new(25, 2)),
                ],
                Decimal::ZERO,
            ),
            employment: EmploymentAdjustments {
                employed: Decimal::ZERO,
                self_employed: Decimal::new(5, 1),
                unemployed: Decimal::new(15, 1),
            },
            // Known defect kept as observed: the 50,000 tier is listed first,
            // so the 100,000 tier can never match.
            loan_amount: ThresholdTable::from_pairs(
                &[
                    (Decimal::from(50_000), Decimal::new(5, 1)),
                    (Decimal::from(100_000), Decimal::new(10, 1)),
                ],
                Decimal::ZERO,
            ),
        }
    }
}

/// The complete loan policy loaded from YAML files.
///
/// Aggregates the pipeline settings and the rate rules from a
/// configuration directory.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoanPolicy {
    /// Pipeline settings.
    settings: PipelineSettings,
    /// Interest rate rules.
    rates: RatePolicy,
}

impl LoanPolicy {
    /// Creates a new LoanPolicy from its component parts.
    pub fn new(settings: PipelineSettings, rates: RatePolicy) -> Self {
        Self { settings, rates }
    }

    /// Returns the pipeline settings.
    pub fn settings(&self) -> &PipelineSettings {
        &self.settings
    }

    /// Returns the interest rate rules.
    pub fn rates(&self) -> &RatePolicy {
        &self.rates
    }
}
