use super::form::MatchForm;
use crate::commentary::Commentary;
use crate::engine::DerivedMetrics;
use crate::error::PredictionError;
use crate::pipeline::PredictionStage;
use std::collections::VecDeque;

const MAX_LOGS: usize = 200;

#[derive(Debug, Clone)]
pub struct AppState {
    pub form: MatchForm,
    /// Live readout, recomputed on every edit.
    pub metrics: DerivedMetrics,
    pub prediction: Option<PredictionStage>,
    pub prediction_error: Option<String>,
    pub commentary: Option<Commentary>,
    pub commentating: bool,
    pub logs: VecDeque<LogEntry>,
}

#[derive(Debug, Clone)]
pub struct LogEntry {
    pub time: String,
    pub level: String,
    pub message: String,
}

impl AppState {
    pub fn new() -> Self {
        let form = MatchForm::new();
        let metrics = form.metrics();
        Self {
            form,
            metrics,
            prediction: None,
            prediction_error: None,
            commentary: None,
            commentating: false,
            logs: VecDeque::with_capacity(MAX_LOGS),
        }
    }

    pub fn push_log(&mut self, level: &str, message: String) {
        let time = chrono::Local::now().format("%H:%M:%S%.3f").to_string();
        if self.logs.len() >= MAX_LOGS {
            self.logs.pop_front();
        }
        self.logs.push_back(LogEntry {
            time,
            level: level.to_string(),
            message,
        });
    }

    pub fn refresh_metrics(&mut self) {
        self.metrics = self.form.metrics();
    }

    /// Clear the previous outcome before a new submission.
    pub fn begin_submission(&mut self) {
        self.prediction = None;
        self.prediction_error = None;
        self.commentary = None;
        self.commentating = false;
    }

    pub fn record_prediction_error(&mut self, err: &PredictionError) {
        self.push_log("ERROR", format!("Prediction Error: {}", err));
        self.prediction_error = Some(format!("Prediction Error: {}", err));
    }

    pub fn record_prediction(&mut self, stage: PredictionStage) {
        self.push_log("INFO", format!("Predicted winner: {}", stage.prediction.winner));
        self.prediction = Some(stage);
        self.commentating = true;
    }

    pub fn record_commentary(&mut self, commentary: Commentary) {
        if commentary.generated {
            self.push_log("INFO", format!("Commentary ready ({} tone)", commentary.tone));
        } else {
            self.push_log("WARN", commentary.text.clone());
        }
        self.commentary = Some(commentary);
        self.commentating = false;
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{CommentaryTone, PredictionResult};

    fn stage() -> PredictionStage {
        PredictionStage {
            metrics: DerivedMetrics::compute("2.3", 150, 180),
            prediction: PredictionResult {
                winner: "Mumbai Indians".to_string(),
                batting_team_wins: true,
            },
        }
    }

    #[test]
    fn test_log_ring_is_bounded() {
        let mut state = AppState::new();
        for i in 0..(MAX_LOGS + 5) {
            state.push_log("INFO", format!("line {i}"));
        }
        assert_eq!(state.logs.len(), MAX_LOGS);
        assert_eq!(state.logs.front().unwrap().message, "line 5");
    }

    #[test]
    fn test_submission_lifecycle() {
        let mut state = AppState::new();
        state.record_prediction(stage());
        assert!(state.commentating);
        state.record_commentary(Commentary {
            tone: CommentaryTone::Nervous,
            text: "⚠️ nope".to_string(),
            generated: false,
        });
        assert!(!state.commentating);
        assert_eq!(state.logs.back().unwrap().level, "WARN");
        // prediction still shown alongside the warning
        assert!(state.prediction.is_some());

        state.begin_submission();
        assert!(state.prediction.is_none());
        assert!(state.commentary.is_none());
    }

    #[test]
    fn test_prediction_error_is_shown() {
        let mut state = AppState::new();
        state.record_prediction_error(&PredictionError::MalformedOvers("x".to_string()));
        assert!(state.prediction_error.as_deref().unwrap().starts_with("Prediction Error:"));
        assert!(state.prediction.is_none());
    }
}
