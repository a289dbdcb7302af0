use super::Indicator;

/// Age substituted when a caller leaves the age unspecified (supplied as 0).
pub const DEFAULT_AGE: u8 = 72;

/// Upper bound accepted by the intake boundaries.
pub const MAX_AGE: u8 = 115;

/// Weight applied per five years of age.
pub const AGE_COEFFICIENT: f64 = 0.09;
pub const AGE_BAND_YEARS: f64 = 5.0;

/// Divisor mapping the linear predictor onto the published index scale.
pub const NORMALIZATION_CONSTANT: f64 = 6.92;

/// Lowest probability classified as medium frailty.
pub const MEDIUM_FRAILTY_THRESHOLD: f64 = 0.12;
/// Lowest probability classified as high frailty.
pub const HIGH_FRAILTY_THRESHOLD: f64 = 0.20;

/// One additive term of the linear predictor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LinearTerm {
    Flag(Indicator),
    Age,
}

/// Accumulation order of the linear predictor. Floating-point sums are not
/// associative, so reproducing published values depends on this order.
pub(crate) const LINEAR_TERMS: [LinearTerm; 21] = [
    LinearTerm::Flag(Indicator::ImpairedMobility),
    LinearTerm::Flag(Indicator::Depression),
    LinearTerm::Flag(Indicator::CongestiveHeartFailure),
    LinearTerm::Flag(Indicator::Parkinson),
    LinearTerm::Flag(Indicator::WhiteRace),
    LinearTerm::Flag(Indicator::Arthritis),
    LinearTerm::Flag(Indicator::CognitiveImpairment),
    LinearTerm::Flag(Indicator::CharlsonComorbidity),
    LinearTerm::Flag(Indicator::Stroke),
    LinearTerm::Flag(Indicator::Paranoia),
    LinearTerm::Flag(Indicator::SkinUlcer),
    LinearTerm::Flag(Indicator::Pneumonia),
    LinearTerm::Flag(Indicator::MaleSex),
    LinearTerm::Flag(Indicator::SoftTissueInfection),
    LinearTerm::Flag(Indicator::Mycoses),
    LinearTerm::Age,
    LinearTerm::Flag(Indicator::AdmissionPast6Months),
    LinearTerm::Flag(Indicator::Gout),
    LinearTerm::Flag(Indicator::Falls),
    LinearTerm::Flag(Indicator::MusculoskeletalProblems),
    LinearTerm::Flag(Indicator::UrinaryTractInfection),
];

impl Indicator {
    /// Fixed regression weight. `WhiteRace` and `MaleSex` are the only
    /// protective (negative) terms.
    pub const fn coefficient(self) -> f64 {
        match self {
            Self::ImpairedMobility => 1.24,
            Self::Depression => 0.54,
            Self::CongestiveHeartFailure => 0.50,
            Self::Parkinson => 0.50,
            Self::WhiteRace => -0.49,
            Self::Arthritis => 0.43,
            Self::CognitiveImpairment => 0.33,
            Self::CharlsonComorbidity => 0.31,
            Self::Stroke => 0.28,
            Self::Paranoia => 0.24,
            Self::SkinUlcer => 0.23,
            Self::Pneumonia => 0.21,
            Self::MaleSex => -0.19,
            Self::SoftTissueInfection => 0.18,
            Self::Mycoses => 0.14,
            Self::AdmissionPast6Months => 0.09,
            Self::Gout => 0.08,
            Self::Falls => 0.08,
            Self::MusculoskeletalProblems => 0.05,
            Self::UrinaryTractInfection => 0.05,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn linear_terms_cover_every_indicator_once() {
        for indicator in Indicator::ordered() {
            let occurrences = LINEAR_TERMS
                .iter()
                .filter(|term| **term == LinearTerm::Flag(indicator))
                .count();
            assert_eq!(occurrences, 1, "{indicator:?} should appear exactly once");
        }
        assert_eq!(
            LINEAR_TERMS
                .iter()
                .filter(|term| **term == LinearTerm::Age)
                .count(),
            1
        );
    }

    #[test]
    fn only_race_and_sex_are_protective() {
        let protective: Vec<_> = Indicator::ordered()
            .into_iter()
            .filter(|indicator| indicator.coefficient() < 0.0)
            .collect();
        assert_eq!(protective, vec![Indicator::WhiteRace, Indicator::MaleSex]);
    }
}
