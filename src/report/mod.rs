//! Applicant-facing Korean report text.
//!
//! Approved decisions list the amount (in figures and numeral text), rate,
//! term, repayment method, monthly auto-debit and totals. Rejected decisions
//! carry a short notice, optionally followed by an explanation section.
//! Amounts are suffixed with the configured currency unit.

mod explain;

pub use explain::{
    Explainer, Explanation, FACTOR_DISPLAY_THRESHOLD, FeatureContribution, TOP_FACTORS,
};

use std::fmt::Write;

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;

use crate::config::CurrencyMetadata;
use crate::models::{ApprovedLoan, InstallmentRow, LoanApplication, LoanDecision};

const SEPARATOR_WIDTH: usize = 40;

const THANKS: &str = "이용해주셔서 감사합니다.";

/// Formats a whole amount with comma thousands separators.
///
/// ```
/// use loan_engine::report::format_won;
///
/// assert_eq!(format_won(13_302_100), "13,302,100");
/// assert_eq!(format_won(999), "999");
/// ```
pub fn format_won(amount: u64) -> String {
    let digits = amount.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

fn whole_won(amount: Decimal) -> u64 {
    amount.trunc().to_u64().unwrap_or(0)
}

/// Renders the report for one decided application.
///
/// For rejected applications the explanation section is only rendered when
/// an explainer is passed in and it returns an explanation.
pub fn render_report(
    application: &LoanApplication,
    decision: &LoanDecision,
    currency: &CurrencyMetadata,
    explainer: Option<&dyn Explainer>,
) -> String {
    let body = match decision {
        LoanDecision::Approved(loan) => render_approval(loan, currency),
        LoanDecision::Rejected => {
            let explanation = explainer.and_then(|explainer| explainer.explain(application));
            render_rejection(explanation.as_ref())
        }
    };

    let separator = "-".repeat(SEPARATOR_WIDTH);
    format!("{}\n{}{}\n", separator, body, separator)
}

/// Renders the approval notice and loan terms.
pub fn render_approval(loan: &ApprovedLoan, currency: &CurrencyMetadata) -> String {
    let schedule = &loan.schedule;
    let unit = &currency.unit;
    let mut out = String::new();

    let _ = writeln!(out, "고객님의 대출신청이 승인되었습니다.\n");
    let _ = writeln!(
        out,
        "대출 승인 금액: {}{unit}(금 {}{unit})",
        format_won(loan.approved_amount),
        loan.numerals.approved_amount
    );
    let _ = writeln!(out, "적용 금리: 연 {:.2}%,", loan.interest_rate);
    let _ = writeln!(
        out,
        "대출 기간: {}년 ({}개월)",
        loan.repayment_years, schedule.months
    );
    let _ = writeln!(out, "상환 방식: {}\n", schedule.method.korean_name());

    match schedule.monthly_payment {
        Some(payment) => {
            let _ = writeln!(
                out,
                "대출 상환 일정에 따라 '매월 1일' '지정된 계좌'로 부터 '{}개월' 간 '{}{unit}'이 '자동이체'됩니다.",
                schedule.months,
                format_won(whole_won(payment))
            );
        }
        None => {
            let _ = writeln!(
                out,
                "대출 상환 일정에 따라 '매월 1일' '지정된 계좌'로 부터 '{}개월' 간 {} 일정에 따른 금액이 '자동이체'됩니다.",
                schedule.months,
                schedule.method.korean_name()
            );
        }
    }

    let _ = writeln!(
        out,
        "상환 기간 중 납부 예정 총 이자 금액은 {}{unit} 이며,",
        format_won(whole_won(schedule.total_interest))
    );
    let _ = writeln!(
        out,
        "총 상환 예정 금액은 {}{unit}(금 {}{unit}) 입니다.",
        format_won(loan.total_repayment),
        loan.numerals.total_repayment
    );
    let _ = writeln!(out, "\n{}", THANKS);
    out
}

/// Renders a month-by-month repayment table.
///
/// Amounts are truncated to whole units, like the rest of the report.
pub fn render_installment_plan(rows: &[InstallmentRow], currency: &CurrencyMetadata) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:>4} {:>16} {:>16} {:>16} {:>18}",
        "회차", "상환액", "원금", "이자", "잔액"
    );

    for row in rows {
        let _ = writeln!(
            out,
            "{:>4} {:>16} {:>16} {:>16} {:>18}",
            row.month,
            format!("{}{}", format_won(whole_won(row.payment)), currency.unit),
            format!("{}{}", format_won(whole_won(row.principal)), currency.unit),
            format!("{}{}", format_won(whole_won(row.interest)), currency.unit),
            format!(
                "{}{}",
                format_won(whole_won(row.remaining_balance.max(Decimal::ZERO))),
                currency.unit
            ),
        );
    }
    out
}

/// Renders the rejection notice, with the explanation when one is given.
pub fn render_rejection(explanation: Option<&Explanation>) -> String {
    let mut out = String::from("고객님의 대출신청이 거절되었습니다.\n");

    match explanation {
        None => {
            let _ = writeln!(out, "\n대출신청을 종료합니다.\n\n{}", THANKS);
        }
        Some(explanation) => {
            out.push_str(&render_explanation(explanation));
        }
    }
    out
}

/// Renders the score line and, for low scores, the top factors.
pub fn render_explanation(explanation: &Explanation) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "\n=== 고객님의 대출 심사 점수는 {:.2}점 입니다. ===\n",
        explanation.loan_score
    );

    if explanation.shows_factors() {
        let _ = writeln!(out, "대출 심사 주요 항목 평가는 다음과 같습니다.\n");

        let _ = writeln!(out, "* 대출 가능성 상승 요인");
        for (i, factor) in explanation.top_positive.iter().enumerate() {
            let _ = writeln!(
                out,
                "{}. {}: {:.2}% 상승",
                i + 1,
                factor.feature,
                factor.contribution * 100.0
            );
        }

        let _ = writeln!(out, "\n* 대출 가능성 하락 요인");
        for (i, factor) in explanation.top_negative.iter().enumerate() {
            let _ = writeln!(
                out,
                "{}. {}: {:.2}% 하락",
                i + 1,
                factor.feature,
                factor.contribution * 100.0
            );
        }
    }

    let _ = writeln!(
        out,
        "\n대출 심사 상세 내역 확인 서비스를 종료합니다.\n\n{}",
        THANKS
    );
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        ApplicantRecord, EmploymentStatus, NumeralStrings, RepaymentMethod, RepaymentSchedule,
        Verdict,
    };
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn create_test_loan() -> ApprovedLoan {
        ApprovedLoan {
            approved_amount: 13_302_100,
            interest_rate: dec("3.5"),
            repayment_years: 5,
            schedule: RepaymentSchedule {
                method: RepaymentMethod::EqualInstallment,
                months: 60,
                total_interest: dec("1217204.65"),
                monthly_payment: Some(dec("241988.41")),
            },
            total_repayment: 14_519_304,
            numerals: NumeralStrings {
                approved_amount: "일천삼백삼십만이천일백".to_string(),
                total_repayment: "일천사백오십일만구천삼백사".to_string(),
            },
        }
    }

    fn create_test_application() -> LoanApplication {
        LoanApplication {
            id: "1".to_string(),
            applicant: ApplicantRecord {
                credit_score: 610,
                dti_ratio: dec("0.45"),
                employment_status: EmploymentStatus::Unemployed,
                requested_loan_amount: dec("60000"),
                maximum_loan_limit: dec("80000"),
            },
            recorded_status: Some(Verdict::Rejected),
        }
    }

    fn won() -> CurrencyMetadata {
        CurrencyMetadata {
            code: "KRW".to_string(),
            unit: "원".to_string(),
        }
    }

    struct StubExplainer(Option<Explanation>);

    impl Explainer for StubExplainer {
        fn explain(&self, _: &LoanApplication) -> Option<Explanation> {
            self.0.clone()
        }
    }

    #[test]
    fn test_format_won() {
        assert_eq!(format_won(0), "0");
        assert_eq!(format_won(1_000), "1,000");
        assert_eq!(format_won(100_000), "100,000");
        assert_eq!(format_won(1_234_567_890), "1,234,567,890");
    }

    #[test]
    fn test_approval_lists_terms() {
        let text = render_approval(&create_test_loan(), &won());

        assert!(text.starts_with("고객님의 대출신청이 승인되었습니다.\n"));
        assert!(text.contains("대출 승인 금액: 13,302,100원(금 일천삼백삼십만이천일백원)"));
        assert!(text.contains("적용 금리: 연 3.50%,"));
        assert!(text.contains("대출 기간: 5년 (60개월)"));
        assert!(text.contains("상환 방식: 원리금 균등 상환"));
        assert!(text.contains("'60개월' 간 '241,988원'이 '자동이체'됩니다."));
        assert!(text.contains("총 이자 금액은 1,217,204원 이며,"));
        assert!(text.contains("총 상환 예정 금액은 14,519,304원(금 일천사백오십일만구천삼백사원) 입니다."));
    }

    #[test]
    fn test_equal_principal_has_no_fixed_payment_line() {
        let mut loan = create_test_loan();
        loan.schedule.method = RepaymentMethod::EqualPrincipal;
        loan.schedule.monthly_payment = None;

        let text = render_approval(&loan, &won());
        assert!(text.contains("상환 방식: 원금 균등 상환"));
        assert!(text.contains("원금 균등 상환 일정에 따른 금액이 '자동이체'됩니다."));
    }

    #[test]
    fn test_rejection_without_explainer() {
        let text = render_report(
            &create_test_application(),
            &LoanDecision::Rejected,
            &won(),
            None,
        );

        assert!(text.contains("고객님의 대출신청이 거절되었습니다."));
        assert!(text.contains("대출신청을 종료합니다."));
        assert!(!text.contains("심사 점수"));
    }

    #[test]
    fn test_rejection_with_low_score_lists_factors() {
        let explanation = Explanation::from_contributions(
            0.1,
            vec![
                FeatureContribution::new("Credit Score", -0.25),
                FeatureContribution::new("Income", 0.05),
            ],
        );
        let explainer = StubExplainer(Some(explanation));

        let text = render_report(
            &create_test_application(),
            &LoanDecision::Rejected,
            &won(),
            Some(&explainer),
        );

        assert!(text.contains("대출 심사 점수는 10.00점 입니다."));
        assert!(text.contains("1. Income: 5.00% 상승"));
        assert!(text.contains("1. Credit Score: -25.00% 하락"));
        assert!(text.contains("대출 심사 상세 내역 확인 서비스를 종료합니다."));
    }

    #[test]
    fn test_high_score_omits_factor_lists() {
        let explanation = Explanation::from_contributions(
            0.7,
            vec![FeatureContribution::new("Credit Score", -0.1)],
        );
        let text = render_explanation(&explanation);

        assert!(text.contains("60.00점"));
        assert!(!text.contains("하락 요인"));
    }

    #[test]
    fn test_explainer_returning_none_falls_back_to_notice() {
        let explainer = StubExplainer(None);
        let text = render_report(
            &create_test_application(),
            &LoanDecision::Rejected,
            &won(),
            Some(&explainer),
        );
        assert!(text.contains("대출신청을 종료합니다."));
    }

    #[test]
    fn test_report_is_framed_by_separators() {
        let text = render_report(
            &create_test_application(),
            &LoanDecision::Approved(create_test_loan()),
            &won(),
            None,
        );
        let separator = "-".repeat(40);
        assert!(text.starts_with(&separator));
        assert!(text.trim_end().ends_with(&separator));
    }

    #[test]
    fn test_configured_unit_replaces_won() {
        let dollars = CurrencyMetadata {
            code: "USD".to_string(),
            unit: " USD".to_string(),
        };
        let text = render_approval(&create_test_loan(), &dollars);

        assert!(text.contains("대출 승인 금액: 13,302,100 USD(금 일천삼백삼십만이천일백 USD)"));
        assert!(text.contains("'241,988 USD'이 '자동이체'됩니다."));
        assert!(text.contains("총 이자 금액은 1,217,204 USD 이며,"));
        assert!(!text.contains("원("));
    }

    #[test]
    fn test_installment_plan_table() {
        let rows = vec![
            InstallmentRow {
                month: 1,
                payment: dec("241988.41"),
                principal: dec("203189.19"),
                interest: dec("38799.22"),
                remaining_balance: dec("13098910.81"),
            },
            InstallmentRow {
                month: 60,
                payment: dec("241988.41"),
                principal: dec("241284.67"),
                interest: dec("703.74"),
                remaining_balance: dec("-0.000001"),
            },
        ];

        let text = render_installment_plan(&rows, &won());
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 3);
        assert!(lines[0].contains("회차"));
        assert!(lines[1].contains("241,988원"));
        assert!(lines[1].contains("13,098,910원"));
        assert!(lines[2].trim_start().starts_with("60"));
        assert!(lines[2].trim_end().ends_with(" 0원"));
    }
}
