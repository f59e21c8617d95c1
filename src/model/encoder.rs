use anyhow::{Context, Result};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;

/// The categorical inputs, in feature-vector order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CategoricalField {
    BattingTeam,
    BowlingTeam,
    Venue,
    TossWinner,
    TossDecision,
}

impl CategoricalField {
    pub const ALL: [CategoricalField; 5] = [
        CategoricalField::BattingTeam,
        CategoricalField::BowlingTeam,
        CategoricalField::Venue,
        CategoricalField::TossWinner,
        CategoricalField::TossDecision,
    ];

    /// Column name used in artifact file names and error messages.
    pub fn name(self) -> &'static str {
        match self {
            CategoricalField::BattingTeam => "batting_team",
            CategoricalField::BowlingTeam => "bowling_team",
            CategoricalField::Venue => "venue",
            CategoricalField::TossWinner => "toss_winner",
            CategoricalField::TossDecision => "toss_decision",
        }
    }
}

/// Label -> integer code. A label's code is its position in `classes`.
#[derive(Debug, Clone)]
pub struct CategoricalEncoder {
    classes: Vec<String>,
    codes: HashMap<String, usize>,
}

#[derive(Deserialize)]
struct EncoderFile {
    classes: Vec<String>,
}

impl CategoricalEncoder {
    pub fn new(classes: Vec<String>) -> Result<Self> {
        let mut codes = HashMap::with_capacity(classes.len());
        for (code, label) in classes.iter().enumerate() {
            if codes.insert(label.clone(), code).is_some() {
                anyhow::bail!("duplicate encoder class {:?}", label);
            }
        }
        Ok(Self { classes, codes })
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let file: EncoderFile =
            serde_json::from_str(json).context("failed to parse label encoder JSON")?;
        Self::new(file.classes)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read label encoder: {}", path.display()))?;
        Self::from_json(&content).with_context(|| format!("in {}", path.display()))
    }

    pub fn transform(&self, label: &str) -> Option<usize> {
        self.codes.get(label).copied()
    }

    pub fn classes(&self) -> &[String] {
        &self.classes
    }
}

/// One encoder per categorical field.
#[derive(Debug, Clone)]
pub struct EncoderSet {
    encoders: HashMap<CategoricalField, CategoricalEncoder>,
}

impl EncoderSet {
    /// Fails unless every field in `CategoricalField::ALL` has an encoder.
    pub fn new(encoders: HashMap<CategoricalField, CategoricalEncoder>) -> Result<Self> {
        if let Some(missing) = CategoricalField::ALL.iter().find(|f| !encoders.contains_key(*f)) {
            anyhow::bail!("no label encoder for {}", missing.name());
        }
        Ok(Self { encoders })
    }

    /// Loads `path_for(field)` for each field.
    pub fn load(path_for: impl Fn(&str) -> std::path::PathBuf) -> Result<Self> {
        let mut encoders = HashMap::new();
        for field in CategoricalField::ALL {
            let path = path_for(field.name());
            let encoder = CategoricalEncoder::load(&path)?;
            tracing::debug!(field = field.name(), classes = encoder.classes().len(), "loaded label encoder");
            encoders.insert(field, encoder);
        }
        Self::new(encoders)
    }

    pub fn encode(&self, field: CategoricalField, label: &str) -> Option<usize> {
        self.encoders.get(&field).and_then(|e| e.transform(label))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encoder(labels: &[&str]) -> CategoricalEncoder {
        CategoricalEncoder::new(labels.iter().map(|s| s.to_string()).collect()).unwrap()
    }

    #[test]
    fn test_transform_uses_class_position() {
        let enc = CategoricalEncoder::from_json(r#"{"classes": ["bat", "field"]}"#).unwrap();
        assert_eq!(enc.transform("bat"), Some(0));
        assert_eq!(enc.transform("field"), Some(1));
        assert_eq!(enc.transform("bowl"), None);
    }

    #[test]
    fn test_duplicate_classes_rejected() {
        let err = CategoricalEncoder::new(vec!["a".into(), "b".into(), "a".into()]).unwrap_err();
        assert!(err.to_string().contains("duplicate"));
    }

    #[test]
    fn test_malformed_json_rejected() {
        assert!(CategoricalEncoder::from_json(r#"{"labels": []}"#).is_err());
        assert!(CategoricalEncoder::from_json("not json").is_err());
    }

    #[test]
    fn test_encoder_set_requires_every_field() {
        let mut map = HashMap::new();
        map.insert(CategoricalField::BattingTeam, encoder(&["A"]));
        let err = EncoderSet::new(map).unwrap_err();
        assert!(err.to_string().contains("bowling_team"));
    }

    #[test]
    fn test_encoder_set_encode() {
        let map = CategoricalField::ALL
            .iter()
            .map(|f| (*f, encoder(&["x", f.name()])))
            .collect();
        let set = EncoderSet::new(map).unwrap();
        assert_eq!(set.encode(CategoricalField::Venue, "venue"), Some(1));
        assert_eq!(set.encode(CategoricalField::Venue, "x"), Some(0));
        assert_eq!(set.encode(CategoricalField::Venue, "toss_winner"), None);
    }
}
