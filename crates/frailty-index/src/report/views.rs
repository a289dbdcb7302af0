use crate::scoring::{
    FrailtyCategory, ScoreBreakdown, ScoreResult, TermContribution, HIGH_FRAILTY_THRESHOLD,
    MEDIUM_FRAILTY_THRESHOLD,
};
use serde::{Deserialize, Serialize};

/// Decimal places reported by the HTTP endpoint.
pub const VIEW_DECIMALS: i32 = 4;

pub const HIGH_FRAILTY_WARNING: &str = "Individuals with a frailty index \u{2265} 0.2 have an increased risk of adverse outcomes, including higher likelihoods of hospital and nursing home admissions and mortality.";

/// Response body of `POST /calculate_frailty`.
///
/// The category is always derived from the unrounded probability.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreView {
    pub probability: f64,
    pub category: String,
}

impl From<&ScoreResult> for ScoreView {
    fn from(result: &ScoreResult) -> Self {
        Self {
            probability: round_to(result.probability, VIEW_DECIMALS),
            category: result.category.label().to_string(),
        }
    }
}

/// What the interactive surfaces print after a calculation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScoreDisplay {
    pub probability: String,
    pub category: &'static str,
    pub warning: Option<&'static str>,
}

impl ScoreDisplay {
    pub fn from_result(result: &ScoreResult) -> Self {
        let warning =
            (result.probability >= HIGH_FRAILTY_THRESHOLD).then_some(HIGH_FRAILTY_WARNING);
        Self {
            probability: format!("{:.2}", result.probability),
            category: result.category.label(),
            warning,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct BreakdownView {
    pub resolved_age: u8,
    pub linear_predictor: f64,
    pub contributions: Vec<TermContribution>,
    #[serde(flatten)]
    pub score: ScoreView,
}

impl From<&ScoreBreakdown> for BreakdownView {
    fn from(breakdown: &ScoreBreakdown) -> Self {
        Self {
            resolved_age: breakdown.resolved_age,
            linear_predictor: breakdown.linear_predictor,
            contributions: breakdown.contributions.clone(),
            score: ScoreView::from(&breakdown.result),
        }
    }
}

/// Threshold legend shown above the form.
#[derive(Debug, Clone, Serialize)]
pub struct CategoryBand {
    pub category: FrailtyCategory,
    pub label: &'static str,
    pub range: String,
}

impl CategoryBand {
    pub fn legend() -> Vec<Self> {
        FrailtyCategory::ordered()
            .into_iter()
            .map(|category| {
                let range = match category {
                    FrailtyCategory::Low => format!("Probability < {MEDIUM_FRAILTY_THRESHOLD:.2}"),
                    FrailtyCategory::Medium => format!(
                        "Probability {MEDIUM_FRAILTY_THRESHOLD:.2} - {HIGH_FRAILTY_THRESHOLD:.2}"
                    ),
                    FrailtyCategory::High => {
                        format!("Probability \u{2265} {HIGH_FRAILTY_THRESHOLD:.2}")
                    }
                };
                Self {
                    category,
                    label: category.label(),
                    range,
                }
            })
            .collect()
    }
}

pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}
