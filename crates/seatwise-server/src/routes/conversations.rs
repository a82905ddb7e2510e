//! Conversation routes — create (with customer existence check) and query.

use std::sync::Arc;

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::post;
use axum::{Json, Router};
use serde_json::{json, Value};

use seatwise_core::{Conversation, ConversationQuery, Error};
use seatwise_store::tables;

use crate::routes::error_response;
use crate::state::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/conversation", post(add_conversation).get(get_conversations))
}

async fn add_conversation(
    State(state): State<Arc<AppState>>,
    Json(conversation): Json<Conversation>,
) -> impl IntoResponse {
    // Rating bounds are checked before any store interaction.
    if let Err(err) = conversation.validate() {
        return error_response(err);
    }

    // The referenced customer must already exist.
    let filters = [("id", conversation.customer_id.to_string())];
    match state.store.select(tables::CUSTOMERS, &filters).await {
        Ok(rows) if rows.is_empty() => {
            return error_response(Error::NotFound(format!(
                "customer {} not found",
                conversation.customer_id
            )));
        }
        Ok(_) => {}
        Err(err) => return error_response(err),
    }

    let record = match serde_json::to_value(&conversation) {
        Ok(value) => value,
        Err(err) => return error_response(err.into()),
    };
    match state.store.insert(tables::CONVERSATIONS, record).await {
        Ok(created) => {
            let conversation_id = created
                .get("conversation_id")
                .or_else(|| created.get("id"))
                .cloned()
                .unwrap_or(Value::Null);
            (
                StatusCode::OK,
                Json(json!({
                    "success": true,
                    "message": "Conversation added successfully",
                    "conversation_id": conversation_id,
                })),
            )
        }
        Err(err) => error_response(err),
    }
}

async fn get_conversations(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ConversationQuery>,
) -> impl IntoResponse {
    let mut filters: Vec<(&str, String)> = Vec::new();
    if let Some(customer_id) = query.customer_id {
        filters.push(("customer_id", customer_id.to_string()));
    }
    if let Some(conversation_id) = query.conversation_id {
        filters.push(("conversation_id", conversation_id.to_string()));
    }

    match state.store.select(tables::CONVERSATIONS, &filters).await {
        Ok(rows) if rows.is_empty() => {
            error_response(Error::NotFound("no conversations found".into()))
        }
        Ok(rows) => (
            StatusCode::OK,
            Json(json!({ "success": true, "conversations": rows })),
        ),
        Err(err) => error_response(err),
    }
}
