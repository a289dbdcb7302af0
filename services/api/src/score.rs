use clap::Args;
use frailty_index::error::AppError;
use frailty_index::intake::parse_age;
use frailty_index::report::{BreakdownView, CategoryBand, ScoreDisplay, ScoreView};
use frailty_index::scoring::{score_breakdown, Indicator, IndicatorRecord, ScoreBreakdown};

#[derive(Args, Debug, Default)]
pub(crate) struct ScoreArgs {
    /// Indicator present for the patient, by form field name (repeatable)
    #[arg(long = "indicator", short = 'i', value_parser = parse_indicator)]
    pub(crate) indicators: Vec<Indicator>,
    /// Age in years (0-115). 0 leaves the age unspecified and scores as 72.
    #[arg(long, default_value_t = 0, value_parser = parse_age_arg)]
    pub(crate) age: u8,
    /// Print the rounded JSON view returned by POST /calculate_frailty
    #[arg(long)]
    pub(crate) json: bool,
    /// Show every term contributing to the linear predictor
    #[arg(long)]
    pub(crate) explain: bool,
    /// List accepted indicator names and exit
    #[arg(long)]
    pub(crate) list: bool,
}

impl ScoreArgs {
    pub(crate) fn record(&self) -> IndicatorRecord {
        self.indicators
            .iter()
            .copied()
            .fold(IndicatorRecord::new(self.age), IndicatorRecord::with)
    }
}

pub(crate) fn run_score(args: ScoreArgs) -> Result<(), AppError> {
    if args.list {
        for indicator in Indicator::ordered() {
            println!(
                "{:<26} {:>6.2}  {}",
                indicator.field_name(),
                indicator.coefficient(),
                indicator.label()
            );
        }
        return Ok(());
    }

    let breakdown = score_breakdown(&args.record());

    if args.json {
        let rendered = if args.explain {
            serde_json::to_string_pretty(&BreakdownView::from(&breakdown))
        } else {
            serde_json::to_string_pretty(&ScoreView::from(&breakdown.result))
        };
        match rendered {
            Ok(json) => println!("{json}"),
            Err(err) => println!("Score payload unavailable: {err}"),
        }
        return Ok(());
    }

    for line in render_score(&breakdown, args.explain) {
        println!("{line}");
    }
    Ok(())
}

pub(crate) fn render_score(breakdown: &ScoreBreakdown, explain: bool) -> Vec<String> {
    let display = ScoreDisplay::from_result(&breakdown.result);
    let mut lines = vec!["Claims-based Frailty Index".to_string()];

    for band in CategoryBand::legend() {
        lines.push(format!("- {}: {}", band.label, band.range));
    }

    lines.push(String::new());
    lines.push(format!("Frailty Index Probability: {}", display.probability));
    lines.push(format!("Frailty Risk Category: {}", display.category));

    if let Some(warning) = display.warning {
        lines.push(format!("Note: {warning}"));
    }

    if explain {
        lines.push(String::new());
        lines.push(format!(
            "Linear predictor {:.4} (age scored as {})",
            breakdown.linear_predictor, breakdown.resolved_age
        ));
        for term in &breakdown.contributions {
            lines.push(format!("- {}: {:+.4}", term.label, term.contribution));
        }
    }

    lines
}

fn parse_indicator(raw: &str) -> Result<Indicator, String> {
    Indicator::from_field_name(raw.trim()).ok_or_else(|| {
        let known: Vec<_> = Indicator::ordered()
            .into_iter()
            .map(Indicator::field_name)
            .collect();
        format!("unknown indicator '{raw}' (expected one of: {})", known.join(", "))
    })
}

fn parse_age_arg(raw: &str) -> Result<u8, String> {
    parse_age(raw).map_err(|err| err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_collects_flags_and_age() {
        let args = ScoreArgs {
            indicators: vec![Indicator::Depression, Indicator::Falls],
            age: 0,
            ..ScoreArgs::default()
        };
        let record = args.record();
        assert!(record.is_present(Indicator::Depression));
        assert!(record.is_present(Indicator::Falls));
        assert_eq!(record.resolved_age(), 72);
    }

    #[test]
    fn render_shows_two_decimal_probability() {
        let breakdown = score_breakdown(&IndicatorRecord::new(0));
        let lines = render_score(&breakdown, false);

        assert!(lines.contains(&"Frailty Index Probability: 0.19".to_string()));
        assert!(lines.contains(&"Frailty Risk Category: Medium Frailty".to_string()));
        assert!(!lines.iter().any(|line| line.starts_with("Note:")));
    }

    #[test]
    fn render_warns_and_explains_high_frailty() {
        let breakdown =
            score_breakdown(&IndicatorRecord::new(72).with(Indicator::ImpairedMobility));
        let lines = render_score(&breakdown, true);

        assert!(lines.contains(&"Frailty Risk Category: High Frailty".to_string()));
        assert!(lines.iter().any(|line| line.starts_with("Note:")));
        assert!(lines.contains(&"- Impaired Mobility: +1.2400".to_string()));
        assert!(lines
            .iter()
            .any(|line| line.starts_with("Linear predictor 2.5360")));
    }

    #[test]
    fn parse_indicator_lists_known_names_on_error() {
        assert_eq!(parse_indicator("gout"), Ok(Indicator::Gout));
        let message = parse_indicator("asthma").expect_err("unknown");
        assert!(message.contains("admission_past_6mo"));
    }
}
