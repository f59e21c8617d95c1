pub mod encoder;
pub mod forest;

use crate::config::ModelConfig;
use crate::error::PredictionError;
use anyhow::{Context, Result};
use encoder::EncoderSet;
use forest::RandomForest;

/// A trained binary classifier over a fixed-width numeric feature row.
pub trait Classifier: Send + Sync {
    fn n_features(&self) -> usize;
    fn predict(&self, features: &[f64]) -> Result<i64, PredictionError>;
}

/// Everything read from the model directory at startup.
pub struct ModelArtifacts {
    pub classifier: RandomForest,
    pub encoders: EncoderSet,
}

impl ModelArtifacts {
    pub fn load(config: &ModelConfig) -> Result<Self> {
        let classifier_path = config.classifier_path();
        let classifier = RandomForest::load(&classifier_path)
            .with_context(|| format!("loading classifier from {}", config.dir.display()))?;
        let encoders = EncoderSet::load(|field| config.encoder_path(field))
            .with_context(|| format!("loading label encoders from {}", config.dir.display()))?;

        tracing::info!(
            path = %classifier_path.display(),
            trees = classifier.n_trees(),
            features = classifier.n_features(),
            "model artifacts loaded"
        );
        Ok(Self { classifier, encoders })
    }
}
