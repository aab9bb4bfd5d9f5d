//! Feature-attribution explanations for rejected applications.
//!
//! The engine does not compute attributions itself. An [`Explainer`]
//! supplies per-feature contributions for an application and
//! [`Explanation::from_contributions`] turns them into a score and the
//! strongest factors either way.

use serde::{Deserialize, Serialize};

use crate::models::LoanApplication;

/// Scores below this show the top factors in the report.
pub const FACTOR_DISPLAY_THRESHOLD: f64 = 50.0;

/// Number of factors listed on each side.
pub const TOP_FACTORS: usize = 3;

/// Produces an explanation for one application.
pub trait Explainer: Send + Sync {
    /// Returns `None` when no explanation is available for the application.
    fn explain(&self, application: &LoanApplication) -> Option<Explanation>;
}

/// One feature's contribution to the approval probability.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureContribution {
    /// Column name of the feature, e.g. `Credit Score`.
    pub feature: String,
    /// Signed contribution as a probability delta.
    pub contribution: f64,
}

impl FeatureContribution {
    /// Creates a contribution entry.
    pub fn new(feature: impl Into<String>, contribution: f64) -> Self {
        Self {
            feature: feature.into(),
            contribution,
        }
    }
}

/// A scored explanation with the strongest factors on each side.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Explanation {
    /// `|expected_value + sum(contributions)| x 100`.
    pub loan_score: f64,
    /// Up to three positive contributions, largest first.
    pub top_positive: Vec<FeatureContribution>,
    /// Up to three negative contributions, most negative first.
    pub top_negative: Vec<FeatureContribution>,
}

impl Explanation {
    /// Builds an explanation from a baseline and per-feature contributions.
    ///
    /// Zero contributions belong to neither side.
    ///
    /// # Example
    ///
    /// ```
    /// use loan_engine::report::{Explanation, FeatureContribution};
    ///
    /// let explanation = Explanation::from_contributions(
    ///     0.4,
    ///     vec![
    ///         FeatureContribution::new("Credit Score", -0.2),
    ///         FeatureContribution::new("Income", 0.05),
    ///     ],
    /// );
    /// assert!((explanation.loan_score - 25.0).abs() < 1e-9);
    /// assert_eq!(explanation.top_positive[0].feature, "Income");
    /// assert_eq!(explanation.top_negative[0].feature, "Credit Score");
    /// ```
    pub fn from_contributions(expected_value: f64, contributions: Vec<FeatureContribution>) -> Self {
        let total: f64 = contributions.iter().map(|c| c.contribution).sum();
        let loan_score = ((expected_value + total) * 100.0).abs();

        let (mut top_positive, mut top_negative): (Vec<_>, Vec<_>) = contributions
            .into_iter()
            .filter(|c| c.contribution != 0.0)
            .partition(|c| c.contribution > 0.0);

        // Stable sorts keep input order among ties.
        top_positive.sort_by(|a, b| b.contribution.total_cmp(&a.contribution));
        top_negative.sort_by(|a, b| a.contribution.total_cmp(&b.contribution));
        top_positive.truncate(TOP_FACTORS);
        top_negative.truncate(TOP_FACTORS);

        Self {
            loan_score,
            top_positive,
            top_negative,
        }
    }

    /// Whether the report lists the individual factors.
    pub fn shows_factors(&self) -> bool {
        self.loan_score < FACTOR_DISPLAY_THRESHOLD
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn contributions(values: &[(&str, f64)]) -> Vec<FeatureContribution> {
        values
            .iter()
            .map(|(feature, value)| FeatureContribution::new(*feature, *value))
            .collect()
    }

    #[test]
    fn test_score_is_absolute_percentage() {
        let explanation =
            Explanation::from_contributions(0.1, contributions(&[("A", -0.3), ("B", 0.05)]));
        assert!((explanation.loan_score - 15.0).abs() < 1e-9);
        assert!(explanation.shows_factors());
    }

    #[test]
    fn test_high_score_hides_factors() {
        let explanation = Explanation::from_contributions(0.5, contributions(&[("A", 0.1)]));
        assert!((explanation.loan_score - 60.0).abs() < 1e-9);
        assert!(!explanation.shows_factors());
    }

    #[test]
    fn test_top_three_each_side() {
        let explanation = Explanation::from_contributions(
            0.2,
            contributions(&[
                ("Income", 0.02),
                ("Credit Score", -0.15),
                ("Loan Amount", 0.07),
                ("Debt-to-Income Ratio", -0.04),
                ("Employment Status", 0.0),
                ("Bank Account Balance", 0.01),
                ("Education Level", 0.03),
                ("Existing Loan Balance", -0.01),
                ("Marital Status", -0.02),
            ]),
        );

        let positives: Vec<&str> = explanation
            .top_positive
            .iter()
            .map(|c| c.feature.as_str())
            .collect();
        let negatives: Vec<&str> = explanation
            .top_negative
            .iter()
            .map(|c| c.feature.as_str())
            .collect();

        assert_eq!(positives, vec!["Loan Amount", "Education Level", "Income"]);
        assert_eq!(
            negatives,
            vec!["Credit Score", "Debt-to-Income Ratio", "Marital Status"]
        );
    }

    #[test]
    fn test_fewer_than_three_factors() {
        let explanation = Explanation::from_contributions(0.0, contributions(&[("A", -0.1)]));
        assert!(explanation.top_positive.is_empty());
        assert_eq!(explanation.top_negative.len(), 1);
    }
}
