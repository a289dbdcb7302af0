//! Claims-based frailty index.
//!
//! [`score`] is the single scoring entry point shared by every surface. It is
//! pure: the same [`IndicatorRecord`] always yields the same [`ScoreResult`].

mod coefficients;

use serde::{Deserialize, Serialize};

pub use coefficients::{
    AGE_BAND_YEARS, AGE_COEFFICIENT, DEFAULT_AGE, HIGH_FRAILTY_THRESHOLD, MAX_AGE,
    MEDIUM_FRAILTY_THRESHOLD, NORMALIZATION_CONSTANT,
};
use coefficients::{LinearTerm, LINEAR_TERMS};

/// Binary clinical or demographic flag contributing a fixed weight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Indicator {
    ImpairedMobility,
    Depression,
    #[serde(rename = "chf")]
    CongestiveHeartFailure,
    Parkinson,
    WhiteRace,
    Arthritis,
    CognitiveImpairment,
    CharlsonComorbidity,
    Stroke,
    Paranoia,
    SkinUlcer,
    Pneumonia,
    MaleSex,
    SoftTissueInfection,
    Mycoses,
    #[serde(rename = "admission_past_6mo")]
    AdmissionPast6Months,
    Gout,
    Falls,
    MusculoskeletalProblems,
    #[serde(rename = "uti")]
    UrinaryTractInfection,
}

impl Indicator {
    pub const COUNT: usize = 20;

    pub const fn ordered() -> [Self; Self::COUNT] {
        [
            Self::ImpairedMobility,
            Self::Depression,
            Self::CongestiveHeartFailure,
            Self::Parkinson,
            Self::WhiteRace,
            Self::Arthritis,
            Self::CognitiveImpairment,
            Self::CharlsonComorbidity,
            Self::Stroke,
            Self::Paranoia,
            Self::SkinUlcer,
            Self::Pneumonia,
            Self::MaleSex,
            Self::SoftTissueInfection,
            Self::Mycoses,
            Self::AdmissionPast6Months,
            Self::Gout,
            Self::Falls,
            Self::MusculoskeletalProblems,
            Self::UrinaryTractInfection,
        ]
    }

    /// Form field carrying the flag on the wire.
    pub const fn field_name(self) -> &'static str {
        match self {
            Self::ImpairedMobility => "impaired_mobility",
            Self::Depression => "depression",
            Self::CongestiveHeartFailure => "chf",
            Self::Parkinson => "parkinson",
            Self::WhiteRace => "white_race",
            Self::Arthritis => "arthritis",
            Self::CognitiveImpairment => "cognitive_impairment",
            Self::CharlsonComorbidity => "charlson_comorbidity",
            Self::Stroke => "stroke",
            Self::Paranoia => "paranoia",
            Self::SkinUlcer => "skin_ulcer",
            Self::Pneumonia => "pneumonia",
            Self::MaleSex => "male_sex",
            Self::SoftTissueInfection => "soft_tissue_infection",
            Self::Mycoses => "mycoses",
            Self::AdmissionPast6Months => "admission_past_6mo",
            Self::Gout => "gout",
            Self::Falls => "falls",
            Self::MusculoskeletalProblems => "musculoskeletal_problems",
            Self::UrinaryTractInfection => "uti",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::ImpairedMobility => "Impaired Mobility",
            Self::Depression => "Depression",
            Self::CongestiveHeartFailure => "Congestive Heart Failure",
            Self::Parkinson => "Parkinson Disease",
            Self::WhiteRace => "White Race",
            Self::Arthritis => "Arthritis (any type)",
            Self::CognitiveImpairment => "Cognitive Impairment",
            Self::CharlsonComorbidity => "Charlson Comorbidity Index (>0)",
            Self::Stroke => "Stroke",
            Self::Paranoia => "Paranoia",
            Self::SkinUlcer => "Chronic Skin Ulcer",
            Self::Pneumonia => "Pneumonia",
            Self::MaleSex => "Male Sex",
            Self::SoftTissueInfection => "Skin & Soft Tissue Infection",
            Self::Mycoses => "Mycoses",
            Self::AdmissionPast6Months => "Admission in Past 6 Months",
            Self::Gout => "Gout or Other Crystal-Induced Arthropathy",
            Self::Falls => "Falls",
            Self::MusculoskeletalProblems => "Musculoskeletal Problems",
            Self::UrinaryTractInfection => "Urinary Tract Infection",
        }
    }

    pub fn from_field_name(name: &str) -> Option<Self> {
        Self::ordered()
            .into_iter()
            .find(|indicator| indicator.field_name() == name)
    }

    const fn index(self) -> usize {
        self as usize
    }
}

/// Fixed-shape scoring input: one flag per [`Indicator`] plus the age in years.
///
/// An age of 0 means "unspecified" and is scored as [`DEFAULT_AGE`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct IndicatorRecord {
    flags: [bool; Indicator::COUNT],
    age: u8,
}

impl IndicatorRecord {
    pub fn new(age: u8) -> Self {
        Self {
            flags: [false; Indicator::COUNT],
            age,
        }
    }

    pub fn with(mut self, indicator: Indicator) -> Self {
        self.set(indicator, true);
        self
    }

    pub fn set(&mut self, indicator: Indicator, present: bool) {
        self.flags[indicator.index()] = present;
    }

    pub fn is_present(&self, indicator: Indicator) -> bool {
        self.flags[indicator.index()]
    }

    pub fn present(&self) -> impl Iterator<Item = Indicator> + '_ {
        Indicator::ordered()
            .into_iter()
            .filter(|indicator| self.is_present(*indicator))
    }

    pub fn age(&self) -> u8 {
        self.age
    }

    pub fn set_age(&mut self, age: u8) {
        self.age = age;
    }

    /// Age used for scoring after the unspecified-age substitution.
    pub fn resolved_age(&self) -> u8 {
        if self.age == 0 {
            DEFAULT_AGE
        } else {
            self.age
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FrailtyCategory {
    Low,
    Medium,
    High,
}

impl FrailtyCategory {
    pub const fn ordered() -> [Self; 3] {
        [Self::Low, Self::Medium, Self::High]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Low => "Low Frailty",
            Self::Medium => "Medium Frailty",
            Self::High => "High Frailty",
        }
    }

    /// Half-open bands: `[.., 0.12)`, `[0.12, 0.20)`, `[0.20, ..]`.
    pub fn classify(probability: f64) -> Self {
        if probability < MEDIUM_FRAILTY_THRESHOLD {
            Self::Low
        } else if probability < HIGH_FRAILTY_THRESHOLD {
            Self::Medium
        } else {
            Self::High
        }
    }
}

/// Unrounded index value and its category.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreResult {
    pub probability: f64,
    pub category: FrailtyCategory,
}

impl ScoreResult {
    pub fn from_probability(probability: f64) -> Self {
        Self {
            probability,
            category: FrailtyCategory::classify(probability),
        }
    }

    pub fn is_high_risk(&self) -> bool {
        self.category == FrailtyCategory::High
    }
}

/// A single term that moved the linear predictor.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TermContribution {
    pub term: &'static str,
    pub label: &'static str,
    pub coefficient: f64,
    pub contribution: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScoreBreakdown {
    pub resolved_age: u8,
    pub linear_predictor: f64,
    pub contributions: Vec<TermContribution>,
    pub result: ScoreResult,
}

/// Scores a record. Total and side-effect free.
pub fn score(record: &IndicatorRecord) -> ScoreResult {
    let linear_predictor = accumulate(record, |_| {});
    ScoreResult::from_probability(linear_predictor / NORMALIZATION_CONSTANT)
}

/// Same computation as [`score`], also reporting each contributing term.
pub fn score_breakdown(record: &IndicatorRecord) -> ScoreBreakdown {
    let mut contributions = Vec::new();
    let linear_predictor = accumulate(record, |term| contributions.push(term));

    ScoreBreakdown {
        resolved_age: record.resolved_age(),
        linear_predictor,
        contributions,
        result: ScoreResult::from_probability(linear_predictor / NORMALIZATION_CONSTANT),
    }
}

fn accumulate(record: &IndicatorRecord, mut on_term: impl FnMut(TermContribution)) -> f64 {
    let age = f64::from(record.resolved_age());
    let mut linear_predictor = 0.0;

    for term in LINEAR_TERMS {
        let contribution = match term {
            LinearTerm::Flag(indicator) if record.is_present(indicator) => TermContribution {
                term: indicator.field_name(),
                label: indicator.label(),
                coefficient: indicator.coefficient(),
                contribution: indicator.coefficient(),
            },
            LinearTerm::Flag(_) => continue,
            LinearTerm::Age => TermContribution {
                term: "age",
                label: "Age (per 5 years)",
                coefficient: AGE_COEFFICIENT,
                contribution: AGE_COEFFICIENT * age / AGE_BAND_YEARS,
            },
        };

        linear_predictor += contribution.contribution;
        on_term(contribution);
    }

    linear_predictor
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_names_round_trip() {
        for indicator in Indicator::ordered() {
            assert_eq!(
                Indicator::from_field_name(indicator.field_name()),
                Some(indicator)
            );
        }
        assert_eq!(Indicator::from_field_name("age"), None);
    }

    #[test]
    fn serde_names_match_field_names() {
        for indicator in Indicator::ordered() {
            let encoded = serde_json::to_value(indicator).expect("indicator serializes");
            assert_eq!(encoded.as_str(), Some(indicator.field_name()));
        }
    }

    #[test]
    fn unspecified_age_resolves_to_default() {
        assert_eq!(IndicatorRecord::new(0).resolved_age(), DEFAULT_AGE);
        assert_eq!(IndicatorRecord::new(81).resolved_age(), 81);
    }

    #[test]
    fn record_tracks_flags_in_canonical_order() {
        let record = IndicatorRecord::new(70)
            .with(Indicator::UrinaryTractInfection)
            .with(Indicator::ImpairedMobility);
        let present: Vec<_> = record.present().collect();
        assert_eq!(
            present,
            vec![Indicator::ImpairedMobility, Indicator::UrinaryTractInfection]
        );
    }

    #[test]
    fn classify_uses_half_open_bands() {
        assert_eq!(FrailtyCategory::classify(0.0), FrailtyCategory::Low);
        assert_eq!(FrailtyCategory::classify(0.1199999), FrailtyCategory::Low);
        assert_eq!(FrailtyCategory::classify(0.12), FrailtyCategory::Medium);
        assert_eq!(FrailtyCategory::classify(0.1999999), FrailtyCategory::Medium);
        assert_eq!(FrailtyCategory::classify(0.20), FrailtyCategory::High);
        assert_eq!(FrailtyCategory::classify(1.4), FrailtyCategory::High);
    }

    #[test]
    fn breakdown_agrees_with_score() {
        let record = IndicatorRecord::new(0)
            .with(Indicator::WhiteRace)
            .with(Indicator::Falls)
            .with(Indicator::Depression);
        let breakdown = score_breakdown(&record);

        assert_eq!(breakdown.result, score(&record));
        assert_eq!(breakdown.resolved_age, 72);
        let terms: Vec<_> = breakdown.contributions.iter().map(|c| c.term).collect();
        assert_eq!(terms, vec!["depression", "white_race", "age", "falls"]);
    }
}
