use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use minddrift_core::{GameService, PredictionSource, QuestionBatch};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::ApiError;

#[derive(Debug, Deserialize)]
pub struct AnswersRequest {
    pub answers: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct ConfirmRequest {
    pub answers: Vec<String>,
    pub prediction: String,
    pub html_content: String,
}

#[derive(Debug, Serialize)]
pub struct QuestionsResponse {
    pub questions: QuestionBatch,
}

#[derive(Debug, Serialize)]
pub struct PredictResponse {
    pub source: PredictionSource,
    pub prediction: String,
    pub html_code: String,
    pub url: String,
}

#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub status: &'static str,
}

pub async fn health() -> Json<StatusResponse> {
    Json(StatusResponse { status: "ok" })
}

pub async fn start_game(State(game): State<GameService>) -> Json<QuestionsResponse> {
    Json(QuestionsResponse {
        questions: game.start_game(),
    })
}

pub async fn predict(
    State(game): State<GameService>,
    payload: Result<Json<AnswersRequest>, JsonRejection>,
) -> Result<Json<PredictResponse>, ApiError> {
    let Json(req) = payload?;
    let result = game.predict(&req.answers).await?;
    debug!(source = result.source.as_str(), url = %result.url, "predict served");

    Ok(Json(PredictResponse {
        source: result.source,
        prediction: result.label,
        html_code: result.document,
        url: result.url,
    }))
}

pub async fn continue_game(
    State(game): State<GameService>,
    payload: Result<Json<AnswersRequest>, JsonRejection>,
) -> Result<Json<QuestionsResponse>, ApiError> {
    let Json(req) = payload?;
    Ok(Json(QuestionsResponse {
        questions: game.continue_game(&req.answers).await,
    }))
}

pub async fn confirm_success(
    State(game): State<GameService>,
    payload: Result<Json<ConfirmRequest>, JsonRejection>,
) -> Result<Json<StatusResponse>, ApiError> {
    let Json(req) = payload?;
    game.confirm_success(req.answers, req.prediction, req.html_content)
        .await?;
    Ok(Json(StatusResponse { status: "saved" }))
}
