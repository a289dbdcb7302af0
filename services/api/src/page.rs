//! Server-rendered interactive form.

use frailty_index::report::{CategoryBand, ScoreDisplay};
use frailty_index::scoring::{Indicator, IndicatorRecord, MAX_AGE};

/// Indicators rendered in the left column; the rest go right, with the age
/// input after mycoses.
const LEFT_COLUMN: usize = 8;
const AGE_AFTER: Indicator = Indicator::Mycoses;

#[derive(Debug, Default)]
pub(crate) struct FormPage {
    pub(crate) record: IndicatorRecord,
    pub(crate) outcome: Option<ScoreDisplay>,
    pub(crate) error: Option<String>,
}

impl FormPage {
    pub(crate) fn render(&self) -> String {
        let mut html = String::with_capacity(4096);
        html.push_str(
            "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
             <title>Claims-based Frailty Index App</title>\n</head>\n<body>\n\
             <h1>Claims-based Frailty Index App</h1>\n",
        );

        html.push_str(
            "<section id=\"overview\">\n<h3>Overview</h3>\n<p>This app calculates a frailty \
             index based on key comorbidities and demographic factors using a regression \
             model derived from claims data. Patients are classified into frailty risk \
             categories as follows:</p>\n<ul>\n",
        );
        for band in CategoryBand::legend() {
            html.push_str(&format!(
                "<li><strong>{}</strong>: {}</li>\n",
                band.label,
                escape(&band.range)
            ));
        }
        html.push_str("</ul>\n</section>\n");

        html.push_str("<h2>Frailty Risk Indicators</h2>\n<form method=\"post\" action=\"/\">\n");
        let indicators = Indicator::ordered();
        let (left, right) = indicators.split_at(LEFT_COLUMN);

        html.push_str("<div class=\"column\">\n");
        for indicator in left {
            self.push_checkbox(&mut html, *indicator);
        }
        html.push_str("</div>\n<div class=\"column\">\n");
        for indicator in right {
            self.push_checkbox(&mut html, *indicator);
            if *indicator == AGE_AFTER {
                html.push_str(&format!(
                    "<label>Age <input type=\"number\" name=\"age\" min=\"0\" max=\"{MAX_AGE}\" \
                     step=\"1\" value=\"{}\"></label><br>\n",
                    self.record.age()
                ));
            }
        }
        html.push_str("</div>\n<button type=\"submit\">Calculate Frailty Index</button>\n</form>\n");

        if let Some(error) = &self.error {
            html.push_str(&format!(
                "<p class=\"error\" role=\"alert\">{}</p>\n",
                escape(error)
            ));
        }

        if let Some(outcome) = &self.outcome {
            html.push_str("<section id=\"result\">\n");
            html.push_str(&format!(
                "<h3>Frailty Index Probability: {}</h3>\n<h3>Frailty Risk Category: {}</h3>\n",
                outcome.probability, outcome.category
            ));
            if let Some(warning) = outcome.warning {
                html.push_str(&format!(
                    "<p class=\"warning\">\u{26a0}\u{fe0f} <strong>Note</strong>: {}</p>\n",
                    escape(warning)
                ));
            }
            html.push_str("</section>\n");
        }

        html.push_str("</body>\n</html>\n");
        html
    }

    fn push_checkbox(&self, html: &mut String, indicator: Indicator) {
        let checked = if self.record.is_present(indicator) {
            " checked"
        } else {
            ""
        };
        html.push_str(&format!(
            "<label><input type=\"checkbox\" name=\"{}\" value=\"on\"{checked}> {}</label><br>\n",
            indicator.field_name(),
            escape(indicator.label())
        ));
    }
}

fn escape(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }
    escaped
}
