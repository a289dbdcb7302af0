//! Claims-based frailty index: fixed-weight scoring plus the shared intake,
//! views and service plumbing used by the HTTP and interactive surfaces.

pub mod config;
pub mod error;
pub mod intake;
pub mod report;
pub mod scoring;
pub mod telemetry;

pub use intake::{FormIntake, ValidationError};
pub use report::{ScoreDisplay, ScoreView};
pub use scoring::{
    score, score_breakdown, FrailtyCategory, Indicator, IndicatorRecord, ScoreBreakdown,
    ScoreResult,
};
