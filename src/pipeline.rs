use crate::commentary::{self, Commentary, CommentaryRequest, CompletionApi};
use crate::engine::{DerivedMetrics, MatchState, PredictionResult, Predictor};
use crate::error::PredictionError;
use std::sync::Arc;
use std::time::Instant;

/// Output of the prediction half of a submission.
#[derive(Debug, Clone, PartialEq)]
pub struct PredictionStage {
    pub metrics: DerivedMetrics,
    pub prediction: PredictionResult,
}

/// A completed submission: prediction plus commentary (or its warning).
#[derive(Debug, Clone, PartialEq)]
pub struct Submission {
    pub stage: PredictionStage,
    pub commentary: Commentary,
}

/// Predict-then-comment for one match state. Holds only read-only shared
/// handles, so one pipeline serves every submission.
#[derive(Clone)]
pub struct Pipeline {
    predictor: Arc<Predictor>,
    api: Arc<dyn CompletionApi>,
}

impl Pipeline {
    pub fn new(predictor: Arc<Predictor>, api: Arc<dyn CompletionApi>) -> Self {
        Self { predictor, api }
    }

    pub fn predict(&self, state: &MatchState) -> Result<PredictionStage, PredictionError> {
        let metrics = DerivedMetrics::from_match(state);
        match self.predictor.predict(state, &metrics) {
            Ok(prediction) => {
                tracing::info!(
                    batting = %state.batting_team,
                    bowling = %state.bowling_team,
                    overs_left = %state.overs_left,
                    crr = metrics.current_run_rate,
                    rrr = metrics.required_run_rate,
                    winner = %prediction.winner,
                    "prediction"
                );
                Ok(PredictionStage { metrics, prediction })
            }
            Err(e) => {
                tracing::error!(
                    batting = %state.batting_team,
                    bowling = %state.bowling_team,
                    error = %e,
                    "prediction failed"
                );
                Err(e)
            }
        }
    }

    pub async fn commentate(&self, state: &MatchState, stage: &PredictionStage) -> Commentary {
        let request = CommentaryRequest::new(state, &stage.metrics, &stage.prediction);
        let started = Instant::now();
        let commentary = commentary::generate(self.api.as_ref(), &request).await;
        tracing::debug!(
            elapsed_ms = started.elapsed().as_millis() as u64,
            generated = commentary.generated,
            "commentary round-trip"
        );
        commentary
    }

    /// Both halves, sequentially. A prediction error skips commentary.
    pub async fn submit(&self, state: &MatchState) -> Result<Submission, PredictionError> {
        let stage = self.predict(state)?;
        let commentary = self.commentate(state, &stage).await;
        Ok(Submission { stage, commentary })
    }
}
