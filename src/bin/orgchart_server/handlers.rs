use super::*;

pub(super) async fn healthz() -> Json<Value> {
    Json(serde_json::json!({"status": "ok"}))
}

pub(super) async fn require_bearer(
    State(state): State<Arc<AppState>>,
    req: axum::extract::Request,
    next: Next,
) -> Response {
    let Some(value) = req.headers().get(header::AUTHORIZATION) else {
        return unauthorized();
    };
    let Ok(value) = value.to_str() else {
        return unauthorized();
    };
    let Some(token) = value.strip_prefix("Bearer ") else {
        return unauthorized();
    };
    if token != state.token {
        return unauthorized();
    }
    next.run(req).await
}

pub(super) async fn people_chart(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Response {
    let Ok(id) = id.parse::<i64>() else {
        return not_found();
    };
    if state.failing.contains(&id) {
        tracing::info!(id, "serving configured failure");
        return internal_error("configured failure");
    }
    let Some(node) = state.employees.get(&id) else {
        return not_found();
    };

    tracing::debug!(id, depth = state.depth, "serving people chart");
    Json(serde_json::json!({
        "status": "OK",
        "tree": truncate(node, state.depth),
    }))
    .into_response()
}
