use axum::{
    extract::{Query, RawQuery, State},
    response::{Html, Redirect},
    routing::get,
    Router,
};
use debate::Exchange;
use serde::Deserialize;
use tower_http::trace::TraceLayer;

pub use crate::error::AppError;

mod error;
pub mod templates;

#[derive(Deserialize, Debug, Clone)]
pub struct TopicRequest {
    pub message: String,
}

pub fn app(exchange: Exchange) -> Router {
    Router::new()
        .route("/", get(form))
        .route("/ask", get(ask_redirect))
        .route("/ask/", get(ask))
        .layer(TraceLayer::new_for_http())
        .with_state(exchange)
}

async fn form() -> Html<&'static str> {
    Html(templates::FORM.source())
}

async fn ask(
    State(exchange): State<Exchange>,
    Query(TopicRequest { message }): Query<TopicRequest>,
) -> Result<Html<String>, AppError> {
    let result = exchange.run(&message).await?;

    Ok(Html(templates::render_exchange(&message, &result)))
}

async fn ask_redirect(RawQuery(query): RawQuery) -> Redirect {
    match query {
        Some(query) => Redirect::temporary(&format!("/ask/?{query}")),
        None => Redirect::temporary("/ask/"),
    }
}
