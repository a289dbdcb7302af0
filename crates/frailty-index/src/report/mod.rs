pub mod views;

pub use views::{
    round_to, BreakdownView, CategoryBand, ScoreDisplay, ScoreView, HIGH_FRAILTY_WARNING,
};
