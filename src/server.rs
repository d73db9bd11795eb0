// http server mode - /, /predict and /chat

use axum::{
    Json, Router,
    extract::State,
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::triage::{Chat, Prediction, Predictor};
use crate::Error;

pub const BANNER: &str = "AI Health Backend Running Successfully 🚀";

struct AppState {
    predictor: Predictor,
}

#[derive(Deserialize)]
struct PredictRequest {
    symptom: String,
}

#[derive(Deserialize)]
struct ChatRequest {
    message: String,
}

#[derive(Serialize)]
struct ChatResponse {
    reply: &'static str,
}

#[derive(Serialize)]
struct HomeResponse {
    message: &'static str,
}

pub struct Server;

impl Server {
    pub fn router(predictor: Predictor) -> Router {
        let state = Arc::new(AppState { predictor });

        // any origin, method and header, with credentials
        Router::new()
            .route("/", get(home))
            .route("/predict", post(predict))
            .route("/chat", post(chat))
            .layer(TraceLayer::new_for_http())
            .layer(CorsLayer::very_permissive())
            .with_state(state)
    }

    pub async fn run(predictor: Predictor, host: &str, port: u16) -> Result<(), Error> {
        let app = Self::router(predictor);

        let addr = format!("{host}:{port}");
        let listener = tokio::net::TcpListener::bind(&addr)
            .await
            .map_err(|e| Error::Server(format!("cannot bind {addr}: {e}")))?;

        tracing::info!("server running at http://{addr}");

        axum::serve(listener, app)
            .await
            .map_err(|e| Error::Server(e.to_string()))?;

        Ok(())
    }
}

async fn home() -> Json<HomeResponse> {
    Json(HomeResponse { message: BANNER })
}

async fn predict(
    State(state): State<Arc<AppState>>,
    Json(req): Json<PredictRequest>,
) -> Result<Json<Prediction>, Error> {
    let prediction = state.predictor.predict(&req.symptom).await?;
    Ok(Json(prediction))
}

async fn chat(Json(req): Json<ChatRequest>) -> Json<ChatResponse> {
    Json(ChatResponse {
        reply: Chat::reply(&req.message),
    })
}
