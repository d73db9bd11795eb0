// medtriage library - symptom triage and canned health chat over http

pub mod cli;
mod error;
mod output;
mod server;
mod triage;

pub use error::Error;
pub use output::Output;
pub use server::{BANNER, Server};
pub use triage::{
    Chat, Classifier, DEFAULT_REPLY, DEPARTMENT_ARTIFACT, Db, FALLBACK_DEPARTMENT, FALLBACK_RISK,
    Label, LinearTextClassifier, ModelError, ModelStore, NewRecord, Prediction, Predictor,
    RISK_ARTIFACT, SymptomRecord, timestamp_now, tokenize,
};
