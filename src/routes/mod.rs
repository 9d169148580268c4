pub mod submit;

use axum::Router;
use axum::routing::{MethodRouter, post};

use crate::state::SharedState;

pub fn submit_routes() -> Router<SharedState> {
    Router::new()
        .route("/api/submit", submit_methods())
        .route("/", submit_methods())
}

fn submit_methods() -> MethodRouter<SharedState> {
    post(submit::submit)
        .options(submit::preflight)
        .fallback(submit::method_not_allowed)
}
