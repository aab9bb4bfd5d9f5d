//! The loan decision pipeline.
//!
//! Combines a classifier verdict with an applicant record: rejected
//! applications stop immediately; approved ones go through the approved
//! amount, interest rate, amortization and numeral steps in that order.

use std::time::Instant;

use chrono::Utc;
use rayon::prelude::*;
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::calculation::{
    calculate_amortization, calculate_interest_rate, determine_approved_amount,
    format_currency_numeral,
};
use crate::config::LoanPolicy;
use crate::error::{EngineError, EngineResult};
use crate::models::{
    ApplicantRecord, ApprovedLoan, AuditStep, AuditTrace, AuditWarning, DecisionResult,
    LoanApplication, LoanDecision, NumeralStrings, Verdict,
};

use super::Classifier;

/// Version recorded on every [`DecisionResult`].
pub const ENGINE_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Decides loan applications under a fixed policy.
///
/// The pipeline holds no mutable state; one instance can be shared across
/// threads and requests.
///
/// # Example
///
/// ```
/// use loan_engine::config::LoanPolicy;
/// use loan_engine::models::{ApplicantRecord, EmploymentStatus, LoanDecision, Verdict};
/// use loan_engine::pipeline::LoanDecisionPipeline;
/// use rust_decimal::Decimal;
///
/// let pipeline = LoanDecisionPipeline::new(LoanPolicy::default());
/// let applicant = ApplicantRecord {
///     credit_score: 780,
///     dti_ratio: Decimal::new(2, 1),
///     employment_status: EmploymentStatus::Employed,
///     requested_loan_amount: Decimal::from(10_000),
///     maximum_loan_limit: Decimal::from(12_000),
/// };
///
/// let decision = pipeline.decide(Verdict::Approved, &applicant).unwrap();
/// let loan = decision.approved().unwrap();
/// assert_eq!(loan.approved_amount, 13_302_100);
/// assert_eq!(loan.interest_rate, Decimal::from(3));
/// ```
#[derive(Debug, Clone, Default)]
pub struct LoanDecisionPipeline {
    policy: LoanPolicy,
}

impl LoanDecisionPipeline {
    /// Creates a pipeline for the given policy.
    pub fn new(policy: LoanPolicy) -> Self {
        Self { policy }
    }

    /// Returns the policy this pipeline applies.
    pub fn policy(&self) -> &LoanPolicy {
        &self.policy
    }

    /// Decides one applicant.
    ///
    /// A rejected verdict yields [`LoanDecision::Rejected`] whatever the
    /// record contains. An approved verdict computes the loan terms; the
    /// record is assumed to be validated.
    pub fn decide(&self, verdict: Verdict, applicant: &ApplicantRecord) -> EngineResult<LoanDecision> {
        self.decide_with_audit(verdict, applicant)
            .map(|(decision, _)| decision)
    }

    /// Decides one applicant and returns the audit trace of every step.
    pub fn decide_with_audit(
        &self,
        verdict: Verdict,
        applicant: &ApplicantRecord,
    ) -> EngineResult<(LoanDecision, AuditTrace)> {
        let start_time = Instant::now();
        let mut steps: Vec<AuditStep> = Vec::new();
        let mut warnings: Vec<AuditWarning> = Vec::new();

        steps.push(AuditStep {
            step_number: 1,
            rule_id: "classifier_verdict".to_string(),
            rule_name: "Classifier Verdict".to_string(),
            input: serde_json::json!({ "verdict": verdict }),
            output: serde_json::json!({ "continue": verdict.is_approved() }),
            reasoning: match verdict {
                Verdict::Approved => "Application approved; computing loan terms".to_string(),
                Verdict::Rejected => "Application rejected; no terms computed".to_string(),
            },
        });

        let decision = match verdict {
            Verdict::Rejected => LoanDecision::Rejected,
            Verdict::Approved => {
                let loan = self.approve(applicant, &mut steps, &mut warnings)?;
                LoanDecision::Approved(loan)
            }
        };

        let trace = AuditTrace {
            steps,
            warnings,
            duration_us: start_time.elapsed().as_micros() as u64,
        };

        Ok((decision, trace))
    }

    fn approve(
        &self,
        applicant: &ApplicantRecord,
        steps: &mut Vec<AuditStep>,
        warnings: &mut Vec<AuditWarning>,
    ) -> EngineResult<ApprovedLoan> {
        let settings = self.policy.settings();

        let amount = determine_approved_amount(applicant, settings.exchange_rate, 2)?;
        steps.push(amount.audit_step);

        // The amount tiers see the pre-conversion amount while amortization
        // runs on the converted one. Kept as observed.
        let rate = calculate_interest_rate(
            applicant.credit_score,
            applicant.dti_ratio,
            amount.base_amount,
            applicant.employment_status,
            self.policy.rates(),
            3,
        );
        steps.push(rate.audit_step);

        let amortization = calculate_amortization(
            Decimal::from(amount.converted_amount),
            rate.rate,
            settings.repayment_years,
            settings.repayment_method,
            4,
        )?;
        steps.push(amortization.audit_step);
        let schedule = amortization.schedule;

        let total_repayment = (Decimal::from(amount.converted_amount) + schedule.total_interest)
            .trunc()
            .to_u64()
            .ok_or_else(|| EngineError::CalculationError {
                message: "total repayment does not fit in a whole amount".to_string(),
            })?;

        let numerals = NumeralStrings {
            approved_amount: format_currency_numeral(amount.converted_amount),
            total_repayment: format_currency_numeral(total_repayment),
        };

        if numerals.approved_amount.is_empty() {
            warn!(
                approved_amount = amount.converted_amount,
                "Approved amount renders as empty numeral text"
            );
            warnings.push(AuditWarning {
                code: "EMPTY_NUMERAL".to_string(),
                message: "Approved amount is zero and has no numeral text".to_string(),
                severity: "medium".to_string(),
            });
        }

        steps.push(AuditStep {
            step_number: 5,
            rule_id: "numeral_rendering".to_string(),
            rule_name: "Numeral Rendering".to_string(),
            input: serde_json::json!({
                "approved_amount": amount.converted_amount,
                "total_repayment": total_repayment,
                "currency": settings.currency.code
            }),
            output: serde_json::json!({
                "approved_amount": numerals.approved_amount,
                "total_repayment": numerals.total_repayment
            }),
            reasoning: format!(
                "{} -> '{}', {} -> '{}'",
                amount.converted_amount,
                numerals.approved_amount,
                total_repayment,
                numerals.total_repayment
            ),
        });

        debug!(
            base_amount = %amount.base_amount,
            approved_amount = amount.converted_amount,
            interest_rate = %rate.rate,
            months = schedule.months,
            "Computed loan terms"
        );

        Ok(ApprovedLoan {
            approved_amount: amount.converted_amount,
            interest_rate: rate.rate,
            repayment_years: settings.repayment_years,
            schedule,
            total_repayment,
            numerals,
        })
    }

    /// Decides one applicant and wraps the outcome in a [`DecisionResult`].
    pub fn decide_application(
        &self,
        application_id: &str,
        verdict: Verdict,
        applicant: &ApplicantRecord,
    ) -> EngineResult<DecisionResult> {
        let (decision, audit_trace) = self.decide_with_audit(verdict, applicant)?;
        let decision_id = Uuid::new_v4();

        match &decision {
            LoanDecision::Approved(loan) => info!(
                decision_id = %decision_id,
                application_id = %application_id,
                approved_amount = loan.approved_amount,
                interest_rate = %loan.interest_rate,
                duration_us = audit_trace.duration_us,
                "Application approved"
            ),
            LoanDecision::Rejected => info!(
                decision_id = %decision_id,
                application_id = %application_id,
                "Application rejected"
            ),
        }

        Ok(DecisionResult {
            decision_id,
            timestamp: Utc::now(),
            engine_version: ENGINE_VERSION.to_string(),
            application_id: application_id.to_string(),
            verdict,
            decision,
            audit_trace,
        })
    }

    /// Classifies an application and decides it.
    pub fn evaluate<C: Classifier + ?Sized>(
        &self,
        classifier: &C,
        application: &LoanApplication,
    ) -> EngineResult<DecisionResult> {
        let verdict = classifier.classify(application);
        self.decide_application(&application.id, verdict, &application.applicant)
    }

    /// Classifies and decides a batch of applications in parallel.
    ///
    /// Results are returned in input order; one failing application does
    /// not affect the others.
    pub fn evaluate_batch<C: Classifier + ?Sized>(
        &self,
        classifier: &C,
        applications: &[LoanApplication],
    ) -> Vec<EngineResult<DecisionResult>> {
        applications
            .par_iter()
            .map(|application| self.evaluate(classifier, application))
            .collect()
    }
}
