use std::sync::Arc;

use axum::extract::{Form, Query, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::routing::{get, post};
use axum::Router;
use tower_http::trace::TraceLayer;

use crate::pages::generate::{GenerateForm, GenerateQuery};
use crate::pages::result::ResultQuery;
use crate::pages::subscription::{CheckoutForm, SubscriptionQuery};
use crate::pages::{self, Page};
use crate::state::AppState;

type S = Arc<AppState>;

pub fn build_router(state: S) -> Router {
    Router::new()
        .route("/", get(home))
        .route("/gerar", get(generate_form).post(generate_submit))
        .route("/resultado", get(result))
        .route("/assinatura", get(subscription))
        .route("/assinatura/checkout", post(checkout))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

impl IntoResponse for Page {
    fn into_response(self) -> Response {
        match self {
            Page::Html(body) => Html(body).into_response(),
            Page::Redirect(location) => Redirect::to(&location).into_response(),
            Page::Failure(message) => (StatusCode::INTERNAL_SERVER_ERROR, message).into_response(),
        }
    }
}

// ── Home ────────────────────────────────────────────────────────────────────

async fn home() -> Page {
    pages::home::show()
}

// ── Generation ──────────────────────────────────────────────────────────────

async fn generate_form(State(state): State<S>, Query(query): Query<GenerateQuery>) -> Page {
    pages::generate::show(&state, &query)
}

async fn generate_submit(State(state): State<S>, Form(form): Form<GenerateForm>) -> Page {
    pages::generate::submit(&state, &form).await
}

// ── Result ──────────────────────────────────────────────────────────────────

async fn result(State(state): State<S>, Query(query): Query<ResultQuery>) -> Page {
    pages::result::show(&state, &query)
}

// ── Subscription ────────────────────────────────────────────────────────────

async fn subscription(State(state): State<S>, Query(query): Query<SubscriptionQuery>) -> Page {
    pages::subscription::show(&state, &query).await
}

async fn checkout(State(state): State<S>, Form(form): Form<CheckoutForm>) -> Page {
    pages::subscription::checkout(&state, &form).await
}
