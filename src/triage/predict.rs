// prediction service - classify a symptom, log it, return the labels

use crate::Error;
use serde::Serialize;

use super::db::{Db, NewRecord, timestamp_now};
use super::model::{Label, ModelStore};

pub const FALLBACK_DEPARTMENT: &str = "General Medicine";
pub const FALLBACK_RISK: &str = "Low";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Prediction {
    pub department: Label,
    pub risk: Label,
}

impl Prediction {
    pub fn fallback() -> Self {
        Self {
            department: Label::known(FALLBACK_DEPARTMENT),
            risk: Label::known(FALLBACK_RISK),
        }
    }
}

#[derive(Clone)]
pub struct Predictor {
    models: ModelStore,
    db: Db,
}

impl Predictor {
    pub fn new(models: ModelStore, db: Db) -> Self {
        Self { models, db }
    }

    pub fn db(&self) -> &Db {
        &self.db
    }

    /// Label `symptom` and append exactly one log row.
    ///
    /// A classifier error is returned as-is; nothing is written in that case.
    pub async fn predict(&self, symptom: &str) -> Result<Prediction, Error> {
        let prediction = if self.models.is_loaded() {
            Prediction {
                department: self.models.predict_department(symptom)?,
                risk: self.models.predict_risk(symptom)?,
            }
        } else {
            Prediction::fallback()
        };

        let id = self
            .db
            .append(&NewRecord {
                symptom,
                department: prediction.department.as_str(),
                risk: prediction.risk.as_str(),
                timestamp: timestamp_now(),
            })
            .await?;

        tracing::debug!(
            id,
            department = %prediction.department,
            risk = %prediction.risk,
            "prediction logged"
        );

        Ok(prediction)
    }
}
