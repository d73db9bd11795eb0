// trained text classifiers - loaded once from json artifacts, read-only after that

use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;

pub const DEPARTMENT_ARTIFACT: &str = "department_model.json";
pub const RISK_ARTIFACT: &str = "risk_model.json";

#[derive(Error, Debug)]
pub enum ModelError {
    #[error("artifact not found: {}", path.display())]
    NotFound { path: PathBuf },

    #[error("cannot read artifact {}: {source}", path.display())]
    Unreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("incompatible artifact format in {}: {source}", path.display())]
    Format {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid artifact {}: {reason}", path.display())]
    Invalid { path: PathBuf, reason: String },

    #[error("models are not loaded")]
    Unavailable,

    #[error("inference failed: {0}")]
    Inference(String),
}

/// A classifier output label. Always trimmed and non-empty.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Label(String);

impl Label {
    pub fn new(raw: impl AsRef<str>) -> Result<Self, ModelError> {
        let trimmed = raw.as_ref().trim();
        if trimmed.is_empty() {
            return Err(ModelError::Inference(
                "classifier returned an empty label".to_string(),
            ));
        }
        Ok(Self(trimmed.to_string()))
    }

    // only for labels that are compiled in
    pub(crate) fn known(raw: &'static str) -> Self {
        Self(raw.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Free text in, one label out.
///
/// Implementations must be safe to share between request handlers; they are
/// never mutated after construction.
pub trait Classifier: Send + Sync {
    fn predict(&self, text: &str) -> Result<Label, ModelError>;

    fn predict_batch(&self, texts: &[&str]) -> Result<Vec<Label>, ModelError> {
        texts.iter().map(|text| self.predict(text)).collect()
    }
}

/// Bag-of-words linear classifier exported from the training pipeline.
///
/// `coefficients[label][term]` is the weight of one occurrence of `term`
/// towards `label`; the label with the highest `intercept + sum` wins.
#[derive(Debug, Clone, Deserialize)]
pub struct LinearTextClassifier {
    #[serde(default)]
    name: String,
    labels: Vec<String>,
    vocabulary: HashMap<String, usize>,
    coefficients: Vec<Vec<f64>>,
    intercepts: Vec<f64>,
}

impl LinearTextClassifier {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ModelError> {
        let path = path.as_ref();

        let raw = std::fs::read(path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => ModelError::NotFound {
                path: path.to_path_buf(),
            },
            _ => ModelError::Unreadable {
                path: path.to_path_buf(),
                source: e,
            },
        })?;

        Self::parse(&raw, path)
    }

    pub fn from_json(raw: &str) -> Result<Self, ModelError> {
        Self::parse(raw.as_bytes(), Path::new("<inline>"))
    }

    // non-utf8 bytes surface as a json error, same as any other bad format
    fn parse(raw: &[u8], path: &Path) -> Result<Self, ModelError> {
        let mut model: Self = serde_json::from_slice(raw).map_err(|e| ModelError::Format {
            path: path.to_path_buf(),
            source: e,
        })?;

        model.validate().map_err(|reason| ModelError::Invalid {
            path: path.to_path_buf(),
            reason,
        })?;

        Ok(model)
    }

    // shape checks so predict never indexes out of bounds
    fn validate(&mut self) -> Result<(), String> {
        if self.labels.is_empty() {
            return Err("no labels".to_string());
        }

        let mut seen = HashSet::new();
        for label in &mut self.labels {
            let trimmed = label.trim();
            if trimmed.is_empty() {
                return Err("empty label".to_string());
            }
            if !seen.insert(trimmed.to_string()) {
                return Err(format!("duplicate label '{trimmed}'"));
            }
            *label = trimmed.to_string();
        }

        let n_labels = self.labels.len();
        let n_terms = self.vocabulary.len();

        if self.coefficients.len() != n_labels {
            return Err(format!(
                "expected {n_labels} coefficient rows, got {}",
                self.coefficients.len()
            ));
        }
        if self.intercepts.len() != n_labels {
            return Err(format!(
                "expected {n_labels} intercepts, got {}",
                self.intercepts.len()
            ));
        }

        for (i, row) in self.coefficients.iter().enumerate() {
            if row.len() != n_terms {
                return Err(format!(
                    "coefficient row {i} has {} entries, vocabulary has {n_terms}",
                    row.len()
                ));
            }
        }

        if let Some((term, idx)) = self.vocabulary.iter().find(|(_, idx)| **idx >= n_terms) {
            return Err(format!("term '{term}' has out of range index {idx}"));
        }

        let all_finite = self
            .coefficients
            .iter()
            .flatten()
            .chain(&self.intercepts)
            .all(|v| v.is_finite());
        if !all_finite {
            return Err("non-finite weight".to_string());
        }

        Ok(())
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }
}

impl Classifier for LinearTextClassifier {
    fn predict(&self, text: &str) -> Result<Label, ModelError> {
        let mut scores = self.intercepts.clone();

        for token in tokenize(text) {
            if let Some(&idx) = self.vocabulary.get(&token) {
                for (score, row) in scores.iter_mut().zip(&self.coefficients) {
                    *score += row[idx];
                }
            }
        }

        // ties go to the earlier label
        let mut best: Option<(usize, f64)> = None;
        for (i, score) in scores.into_iter().enumerate() {
            match best {
                Some((_, top)) if top >= score => {}
                _ => best = Some((i, score)),
            }
        }

        let (idx, _) = best.ok_or_else(|| ModelError::Inference("no labels".to_string()))?;
        Label::new(&self.labels[idx])
    }
}

// lowercase words of two or more alphanumeric chars
pub fn tokenize(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|t| t.chars().count() >= 2)
        .map(str::to_string)
        .collect()
}

fn load_artifact(path: &Path) -> Result<LinearTextClassifier, ModelError> {
    let model = LinearTextClassifier::load(path)?;
    tracing::info!(
        name = model.name(),
        labels = model.labels().len(),
        path = %path.display(),
        "classifier loaded"
    );
    Ok(model)
}

#[derive(Clone)]
struct Models {
    department: Arc<dyn Classifier>,
    risk: Arc<dyn Classifier>,
}

/// Both classifiers, or neither.
#[derive(Clone, Default)]
pub struct ModelStore {
    models: Option<Models>,
}

impl ModelStore {
    pub fn new(department: Arc<dyn Classifier>, risk: Arc<dyn Classifier>) -> Self {
        Self {
            models: Some(Models { department, risk }),
        }
    }

    pub fn fallback() -> Self {
        Self::default()
    }

    pub fn try_load(dir: impl AsRef<Path>) -> Result<Self, ModelError> {
        let dir = dir.as_ref();
        let department = load_artifact(&dir.join(DEPARTMENT_ARTIFACT))?;
        let risk = load_artifact(&dir.join(RISK_ARTIFACT))?;

        Ok(Self::new(Arc::new(department), Arc::new(risk)))
    }

    /// Load both artifacts from `dir`, degrading to the fallback store if
    /// either one fails.
    pub fn load(dir: impl AsRef<Path>) -> Self {
        match Self::try_load(dir) {
            Ok(store) => store,
            Err(e) => {
                tracing::warn!(error = %e, "classifiers unavailable, using fallback labels");
                Self::fallback()
            }
        }
    }

    pub fn is_loaded(&self) -> bool {
        self.models.is_some()
    }

    pub fn predict_department(&self, text: &str) -> Result<Label, ModelError> {
        let models = self.models.as_ref().ok_or(ModelError::Unavailable)?;
        models.department.predict(text)
    }

    pub fn predict_risk(&self, text: &str) -> Result<Label, ModelError> {
        let models = self.models.as_ref().ok_or(ModelError::Unavailable)?;
        models.risk.predict(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokenize_drops_short_and_punctuation() {
        assert_eq!(
            tokenize("Chest-pain, a BAD one!"),
            vec!["chest", "pain", "bad", "one"]
        );
        assert!(tokenize("").is_empty());
    }

    #[test]
    fn test_label_is_trimmed() {
        assert_eq!(Label::new("  High ").unwrap().as_str(), "High");
        assert!(Label::new("   ").is_err());
    }

    #[test]
    fn test_labels_trimmed_on_load() {
        let model = LinearTextClassifier::from_json(
            r#"{"labels":[" Low ","High"],"vocabulary":{},"coefficients":[[],[]],"intercepts":[0.0,0.0]}"#,
        )
        .unwrap();
        assert_eq!(model.labels(), ["Low", "High"]);
    }
}
