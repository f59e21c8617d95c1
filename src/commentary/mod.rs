pub mod groq;
pub mod prompt;
pub mod types;

use crate::engine::metrics::overs_to_float_lenient;
use crate::engine::tone::{self, ToneInputs};
use crate::engine::{CommentaryTone, DerivedMetrics, MatchState, PredictionResult};
use crate::error::CommentaryError;
use async_trait::async_trait;
use types::ChatMessage;

/// Shown in place of commentary when the API answers with a non-200 status.
pub const STATUS_WARNING: &str =
    "⚠️ Failed to generate commentary. Please check your API key or usage limit.";

/// A chat-completion backend: messages in, generated text out.
#[async_trait]
pub trait CompletionApi: Send + Sync {
    async fn complete(&self, messages: &[ChatMessage]) -> Result<String, CommentaryError>;
}

/// Match figures the commentator is given.
#[derive(Debug, Clone, PartialEq)]
pub struct CommentaryRequest {
    pub batting_team: String,
    pub bowling_team: String,
    pub current_score: u32,
    pub target_runs: u32,
    pub required_run_rate: f64,
    pub current_run_rate: f64,
    /// Rates that fell back to zero rather than being computed.
    pub required_run_rate_defaulted: bool,
    pub current_run_rate_defaulted: bool,
    pub wickets_left: u8,
    /// As typed on the form, e.g. "2.3" or "2,3".
    pub overs_left: String,
    pub venue: String,
    pub predicted_winner: String,
}

impl CommentaryRequest {
    pub fn new(state: &MatchState, metrics: &DerivedMetrics, prediction: &PredictionResult) -> Self {
        Self {
            batting_team: state.batting_team.clone(),
            bowling_team: state.bowling_team.clone(),
            current_score: state.current_score,
            target_runs: state.target_runs,
            required_run_rate: metrics.required_run_rate,
            current_run_rate: metrics.current_run_rate,
            required_run_rate_defaulted: metrics.required_rate_defaulted(),
            current_run_rate_defaulted: metrics.current_rate_defaulted(),
            wickets_left: state.wickets_left,
            overs_left: state.overs_left.clone(),
            venue: state.venue.clone(),
            predicted_winner: prediction.winner.clone(),
        }
    }

    pub fn tone(&self) -> CommentaryTone {
        tone::classify(&ToneInputs {
            wickets_left: self.wickets_left,
            overs_left: overs_to_float_lenient(&self.overs_left),
            runs_left: self.target_runs as i64 - self.current_score as i64,
            required_run_rate: self.required_run_rate,
            current_run_rate: self.current_run_rate,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Commentary {
    pub tone: CommentaryTone,
    /// Generated paragraph, or a warning if generation failed.
    pub text: String,
    pub generated: bool,
}

/// User-facing replacement text for a failed completion.
pub fn warning_for(err: &CommentaryError) -> String {
    match err {
        CommentaryError::Status(_) => STATUS_WARNING.to_string(),
        other => format!("⚠️ Commentary generation failed: {}", other),
    }
}

/// Classify the tone, ask the API for a paragraph, and fall back to a
/// warning string on any failure. Never errors.
pub async fn generate(api: &dyn CompletionApi, request: &CommentaryRequest) -> Commentary {
    let tone = request.tone();
    let messages = prompt::messages(request, tone);

    match api.complete(&messages).await {
        Ok(text) => {
            tracing::info!(%tone, chars = text.len(), "commentary generated");
            Commentary { tone, text, generated: true }
        }
        Err(err) => {
            tracing::warn!(%tone, error = %err, "commentary generation failed");
            Commentary { tone, text: warning_for(&err), generated: false }
        }
    }
}
