//! Derived run-rate metrics for a chase in progress.
//!
//! `overs_left` uses cricket's "overs.balls" notation: "2.3" is two overs
//! and three balls remaining, i.e. 2.5 overs. The current run rate is
//! measured over the overs already bowled (`INNINGS_OVERS - overs_left`),
//! the required run rate over the overs remaining.
//!
//! A malformed overs string never fails the calculation: both rates fall
//! back to 0 and the overs fields are left empty.

use super::match_state::MatchState;

/// Length of a T20 innings.
pub const INNINGS_OVERS: f64 = 20.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DerivedMetrics {
    /// Overs remaining as a decimal. `None` when `overs_left` did not parse.
    pub overs_float: Option<f64>,
    pub overs_faced: Option<f64>,
    pub current_run_rate: f64,
    pub required_run_rate: f64,
    pub runs_left: i64,
}

impl DerivedMetrics {
    pub fn compute(overs_left: &str, current_score: u32, target_runs: u32) -> Self {
        let runs_left = target_runs as i64 - current_score as i64;

        let Some(overs_float) = overs_to_float(overs_left) else {
            return Self {
                overs_float: None,
                overs_faced: None,
                current_run_rate: 0.0,
                required_run_rate: 0.0,
                runs_left,
            };
        };

        let overs_faced = INNINGS_OVERS - overs_float;
        let current_run_rate = if overs_faced > 0.0 {
            round2(current_score as f64 / overs_faced)
        } else {
            0.0
        };
        let required_run_rate = if overs_float > 0.0 {
            round2(runs_left as f64 / overs_float)
        } else {
            0.0
        };

        Self {
            overs_float: Some(overs_float),
            overs_faced: Some(overs_faced),
            current_run_rate,
            required_run_rate,
            runs_left,
        }
    }

    /// True when no overs have been bowled (or overs did not parse) and the
    /// current rate is the zero fallback rather than a computed value.
    pub fn current_rate_defaulted(&self) -> bool {
        !self.overs_faced.is_some_and(|faced| faced > 0.0)
    }

    /// True when no overs remain (or overs did not parse).
    pub fn required_rate_defaulted(&self) -> bool {
        !self.overs_float.is_some_and(|left| left > 0.0)
    }

    pub fn from_match(state: &MatchState) -> Self {
        Self::compute(&state.overs_left, state.current_score, state.target_runs)
    }
}

/// "O.B" -> O + B/6. Balls are not range-checked: "3.9" is 4.5 overs and
/// "3.-2" is 2.67.
pub fn overs_to_float(overs: &str) -> Option<f64> {
    let (whole, balls) = overs.split_once('.')?;
    if balls.contains('.') {
        return None;
    }
    let whole: i64 = whole.trim().parse().ok()?;
    let balls: i64 = balls.trim().parse().ok()?;
    Some(whole as f64 + balls as f64 / 6.0)
}

/// Overs parsing for commentary: accepts "2,3" as well as "2.3" and treats
/// anything unparseable as zero overs left.
pub fn overs_to_float_lenient(overs: &str) -> f64 {
    overs_to_float(&overs.replace(',', ".")).unwrap_or(0.0)
}

/// Two decimal places, ties to even on the exact binary value. `{:.2}`
/// formatting rounds that way, so 8.625 becomes 8.62, not 8.63.
fn round2(x: f64) -> f64 {
    format!("{:.2}", x).parse().unwrap_or(x)
}
