//! Local stand-in for the `siteverify` endpoint, used by tests.

use axum::{
    Form, Json, Router,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
};
use serde_json::{Value, json};
use std::collections::HashMap;
use std::time::Duration;
use tokio::net::TcpListener;

/// Secret the `Echo` stub accepts
pub const SECRET: &str = "test-secret";

/// What the stub answers with
#[derive(Clone)]
pub enum StubReply {
    /// Fixed JSON body
    Json(Value),
    /// Fixed raw body with status 200
    Raw(&'static str),
    /// Empty body with the given status
    Status(StatusCode),
    /// Successful answer after sleeping
    Delay(Duration),
    /// `success` iff the secret matches [`SECRET`], `action` echoes the token
    Echo,
}

/// Serve `reply` on an ephemeral port and return the endpoint URL.
pub async fn spawn(reply: StubReply) -> String {
    let app = Router::new().route(
        "/siteverify",
        post(move |Form(form): Form<HashMap<String, String>>| {
            let reply = reply.clone();
            async move { answer(reply, form).await }
        }),
    );

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    format!("http://{addr}/siteverify")
}

/// A URL nothing is listening on.
pub async fn unreachable_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}/siteverify")
}

async fn answer(reply: StubReply, form: HashMap<String, String>) -> Response {
    match reply {
        StubReply::Json(body) => Json(body).into_response(),
        StubReply::Raw(body) => (StatusCode::OK, body).into_response(),
        StubReply::Status(status) => status.into_response(),
        StubReply::Delay(delay) => {
            tokio::time::sleep(delay).await;
            Json(json!({ "success": true, "score": 0.9, "action": "submit" })).into_response()
        }
        StubReply::Echo => {
            let secret_ok = form.get("secret").map(String::as_str) == Some(SECRET);
            let token = form.get("response").cloned().unwrap_or_default();
            Json(json!({ "success": secret_ok, "score": 1.0, "action": token })).into_response()
        }
    }
}
