use crate::error::PredictionError;

/// One submission's worth of match inputs, as entered on the form.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchState {
    pub batting_team: String,
    pub bowling_team: String,
    pub venue: String,
    pub toss_winner: String,
    pub toss_decision: String,
    /// Overs remaining in "overs.balls" notation, e.g. "2.3".
    pub overs_left: String,
    pub wickets_left: u8,
    pub current_score: u32,
    pub target_runs: u32,
}

impl MatchState {
    pub fn validate(&self) -> Result<(), PredictionError> {
        if self.batting_team == self.bowling_team {
            return Err(PredictionError::InvalidMatch(format!(
                "{} cannot bat and bowl",
                self.batting_team
            )));
        }
        if !(1..=10).contains(&self.wickets_left) {
            return Err(PredictionError::InvalidMatch(format!(
                "wickets left must be 1-10, got {}",
                self.wickets_left
            )));
        }
        if self.target_runs == 0 {
            return Err(PredictionError::InvalidMatch(
                "target must be at least 1 run".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
pub(crate) fn sample_state() -> MatchState {
    MatchState {
        batting_team: "Mumbai Indians".to_string(),
        bowling_team: "Chennai Super Kings".to_string(),
        venue: "Wankhede".to_string(),
        toss_winner: "Mumbai Indians".to_string(),
        toss_decision: "field".to_string(),
        overs_left: "2.3".to_string(),
        wickets_left: 3,
        current_score: 150,
        target_runs: 180,
    }
}
