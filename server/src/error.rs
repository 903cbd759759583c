use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

#[derive(Serialize, Debug)]
struct ErrorBody {
    detail: String,
}

/// Any failure while serving a page. Always rendered as a 500 whose `detail`
/// is the full error chain.
#[derive(Debug)]
pub struct AppError(miette::Report);

impl AppError {
    pub fn detail(&self) -> String {
        self.0
            .chain()
            .map(|e| e.to_string())
            .collect::<Vec<_>>()
            .join(": ")
    }
}

impl From<miette::Report> for AppError {
    fn from(report: miette::Report) -> Self {
        Self(report)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let detail = self.detail();
        tracing::error!(%detail, "Request failed");

        (StatusCode::INTERNAL_SERVER_ERROR, Json(ErrorBody { detail })).into_response()
    }
}
