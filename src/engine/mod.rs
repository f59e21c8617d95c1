pub mod match_state;
pub mod metrics;
pub mod predictor;
pub mod tone;

pub use match_state::MatchState;
pub use metrics::DerivedMetrics;
pub use predictor::{PredictionResult, Predictor};
pub use tone::CommentaryTone;
