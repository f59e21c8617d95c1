use super::match_state::MatchState;
use super::metrics::DerivedMetrics;
use crate::error::PredictionError;
use crate::model::encoder::{CategoricalField, EncoderSet};
use crate::model::{Classifier, ModelArtifacts};

pub const FEATURE_COUNT: usize = 9;

/// Column order the classifier was trained on. Do not reorder.
pub const FEATURE_NAMES: [&str; FEATURE_COUNT] = [
    "batting_team",
    "bowling_team",
    "venue",
    "toss_winner",
    "toss_decision",
    "overs_left",
    "wickets_left",
    "current_run_rate",
    "required_run_rate",
];

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeatureVector([f64; FEATURE_COUNT]);

impl FeatureVector {
    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PredictionResult {
    pub winner: String,
    /// True when the classifier picked the chasing side.
    pub batting_team_wins: bool,
}

/// Encodes a match into a feature row and asks the classifier who wins.
pub struct Predictor {
    classifier: Box<dyn Classifier>,
    encoders: EncoderSet,
}

impl Predictor {
    pub fn new(classifier: Box<dyn Classifier>, encoders: EncoderSet) -> anyhow::Result<Self> {
        if classifier.n_features() != FEATURE_COUNT {
            anyhow::bail!(
                "classifier expects {} features, match rows have {}",
                classifier.n_features(),
                FEATURE_COUNT
            );
        }
        Ok(Self { classifier, encoders })
    }

    pub fn from_artifacts(artifacts: ModelArtifacts) -> anyhow::Result<Self> {
        Self::new(Box::new(artifacts.classifier), artifacts.encoders)
    }

    fn encode(&self, field: CategoricalField, label: &str) -> Result<f64, PredictionError> {
        self.encoders
            .encode(field, label)
            .map(|code| code as f64)
            .ok_or_else(|| PredictionError::UnknownCategory {
                field: field.name(),
                label: label.to_string(),
            })
    }

    pub fn features(
        &self,
        state: &MatchState,
        metrics: &DerivedMetrics,
    ) -> Result<FeatureVector, PredictionError> {
        let overs_left = metrics
            .overs_float
            .ok_or_else(|| PredictionError::MalformedOvers(state.overs_left.clone()))?;

        Ok(FeatureVector([
            self.encode(CategoricalField::BattingTeam, &state.batting_team)?,
            self.encode(CategoricalField::BowlingTeam, &state.bowling_team)?,
            self.encode(CategoricalField::Venue, &state.venue)?,
            self.encode(CategoricalField::TossWinner, &state.toss_winner)?,
            self.encode(CategoricalField::TossDecision, &state.toss_decision)?,
            overs_left,
            state.wickets_left as f64,
            metrics.current_run_rate,
            metrics.required_run_rate,
        ]))
    }

    pub fn predict(
        &self,
        state: &MatchState,
        metrics: &DerivedMetrics,
    ) -> Result<PredictionResult, PredictionError> {
        state.validate()?;
        let features = self.features(state, metrics)?;
        tracing::debug!(features = ?features.as_slice(), "feature row");

        let label = self.classifier.predict(features.as_slice())?;
        winner_for_label(label, state)
    }
}

/// 0 -> bowling side, 1 -> batting side.
fn winner_for_label(label: i64, state: &MatchState) -> Result<PredictionResult, PredictionError> {
    match label {
        0 => Ok(PredictionResult {
            winner: state.bowling_team.clone(),
            batting_team_wins: false,
        }),
        1 => Ok(PredictionResult {
            winner: state.batting_team.clone(),
            batting_team_wins: true,
        }),
        other => Err(PredictionError::Classifier(format!(
            "unexpected label {}",
            other
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{TEAMS, TOSS_DECISIONS, VENUES};
    use crate::engine::match_state::sample_state;
    use crate::model::encoder::CategoricalEncoder;
    use std::collections::HashMap;
    use std::sync::{Arc, Mutex};

    /// Returns a fixed label and remembers the last row it saw.
    struct FixedLabel {
        label: i64,
        seen: Arc<Mutex<Vec<f64>>>,
    }

    impl Classifier for FixedLabel {
        fn n_features(&self) -> usize {
            FEATURE_COUNT
        }

        fn predict(&self, features: &[f64]) -> Result<i64, PredictionError> {
            *self.seen.lock().unwrap() = features.to_vec();
            Ok(self.label)
        }
    }

    struct Failing;

    impl Classifier for Failing {
        fn n_features(&self) -> usize {
            FEATURE_COUNT
        }

        fn predict(&self, _features: &[f64]) -> Result<i64, PredictionError> {
            Err(PredictionError::Classifier("model exploded".to_string()))
        }
    }

    fn encoders(venues: &[&str]) -> EncoderSet {
        let list = |xs: &[&str]| {
            CategoricalEncoder::new(xs.iter().map(|s| s.to_string()).collect()).unwrap()
        };
        let mut map = HashMap::new();
        map.insert(CategoricalField::BattingTeam, list(TEAMS));
        map.insert(CategoricalField::BowlingTeam, list(TEAMS));
        map.insert(CategoricalField::Venue, list(venues));
        map.insert(CategoricalField::TossWinner, list(TEAMS));
        map.insert(CategoricalField::TossDecision, list(TOSS_DECISIONS));
        EncoderSet::new(map).unwrap()
    }

    fn predictor(label: i64) -> (Predictor, Arc<Mutex<Vec<f64>>>) {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let classifier = FixedLabel { label, seen: seen.clone() };
        let p = Predictor::new(Box::new(classifier), encoders(&["Wankhede"])).unwrap();
        (p, seen)
    }

    #[test]
    fn test_feature_order() {
        let (p, seen) = predictor(1);
        let state = sample_state();
        let metrics = DerivedMetrics::from_match(&state);
        p.predict(&state, &metrics).unwrap();

        let row = seen.lock().unwrap().clone();
        // TEAMS order: CSK = 0, MI = 5; toss "field" = 1
        assert_eq!(row, vec![5.0, 0.0, 0.0, 5.0, 1.0, 2.5, 3.0, 8.57, 12.0]);
    }

    #[test]
    fn test_label_mapping_for_every_pair() {
        let (bowl_wins, _) = predictor(0);
        let (bat_wins, _) = predictor(1);
        for batting in TEAMS {
            for bowling in TEAMS.iter().filter(|t| *t != batting) {
                let mut state = sample_state();
                state.batting_team = batting.to_string();
                state.bowling_team = bowling.to_string();
                let metrics = DerivedMetrics::from_match(&state);

                let r = bowl_wins.predict(&state, &metrics).unwrap();
                assert_eq!(r.winner, *bowling);
                assert!(!r.batting_team_wins);

                let r = bat_wins.predict(&state, &metrics).unwrap();
                assert_eq!(r.winner, *batting);
                assert!(r.batting_team_wins);
            }
        }
    }

    #[test]
    fn test_unknown_venue() {
        let (p, _) = predictor(1);
        let mut state = sample_state();
        state.venue = VENUES[0].to_string();
        let metrics = DerivedMetrics::from_match(&state);
        match p.predict(&state, &metrics) {
            Err(PredictionError::UnknownCategory { field, label }) => {
                assert_eq!(field, "venue");
                assert_eq!(label, VENUES[0]);
            }
            other => panic!("expected UnknownCategory, got {other:?}"),
        }
    }

    #[test]
    fn test_malformed_overs_halts_prediction() {
        let (p, _) = predictor(1);
        let mut state = sample_state();
        state.overs_left = "two".to_string();
        let metrics = DerivedMetrics::from_match(&state);
        assert!(matches!(
            p.predict(&state, &metrics),
            Err(PredictionError::MalformedOvers(_))
        ));
    }

    #[test]
    fn test_unexpected_label() {
        let (p, _) = predictor(2);
        let state = sample_state();
        let metrics = DerivedMetrics::from_match(&state);
        assert!(matches!(
            p.predict(&state, &metrics),
            Err(PredictionError::Classifier(_))
        ));
    }

    #[test]
    fn test_classifier_failure_surfaces() {
        let p = Predictor::new(Box::new(Failing), encoders(&["Wankhede"])).unwrap();
        let state = sample_state();
        let metrics = DerivedMetrics::from_match(&state);
        let err = p.predict(&state, &metrics).unwrap_err();
        assert!(err.to_string().contains("model exploded"));
    }

    #[test]
    fn test_invalid_state_rejected_before_encoding() {
        let (p, seen) = predictor(1);
        let mut state = sample_state();
        state.bowling_team = state.batting_team.clone();
        let metrics = DerivedMetrics::from_match(&state);
        assert!(matches!(
            p.predict(&state, &metrics),
            Err(PredictionError::InvalidMatch(_))
        ));
        assert!(seen.lock().unwrap().is_empty());
    }
}
