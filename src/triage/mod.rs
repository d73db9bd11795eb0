// core logic - classifiers, interaction log, prediction and chat

mod chat;
mod db;
mod model;
mod predict;

pub use chat::{Chat, DEFAULT_REPLY};
pub use db::{Db, NewRecord, SymptomRecord, timestamp_now};
pub use model::{
    Classifier, DEPARTMENT_ARTIFACT, Label, LinearTextClassifier, ModelError, ModelStore,
    RISK_ARTIFACT, tokenize,
};
pub use predict::{FALLBACK_DEPARTMENT, FALLBACK_RISK, Prediction, Predictor};
