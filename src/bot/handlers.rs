use axum::{extract::State, Json};
use std::sync::Arc;
use tracing::{info, instrument};

use super::{BotReply, BotService, InboundMessage};
use crate::quotes::QuoteService;
use crate::reminder::{today_outcome, ReminderOutcome};
use crate::shared::{AppError, AppState};
use crate::stats::StatsService;

/// HTTP handler for chat messages forwarded by the gateway
///
/// POST /messages
/// Returns the reply text and reaction the gateway should post
#[instrument(name = "handle_message", skip(state, message), fields(channel_id = %message.channel_id))]
pub async fn handle_message(
    State(state): State<AppState>,
    Json(message): Json<InboundMessage>,
) -> Result<Json<BotReply>, AppError> {
    // Use injected repositories from app state
    let service = BotService::new(
        Arc::new(StatsService::new(Arc::clone(&state.result_repository))),
        Arc::new(QuoteService::new(Arc::clone(&state.quote_repository))),
    );
    let reply = service.handle_message(&message, state.clock.now()).await?;

    if !reply.is_empty() {
        info!(
            has_reply = reply.reply.is_some(),
            reaction = ?reply.reaction,
            "Message answered"
        );
    }

    Ok(Json(reply))
}

/// HTTP handler previewing today's reminder
///
/// GET /reminder
#[instrument(name = "preview_reminder", skip(state))]
pub async fn preview_reminder(
    State(state): State<AppState>,
) -> Result<Json<ReminderOutcome>, AppError> {
    let outcome = today_outcome(state.result_repository.as_ref(), state.clock.now()).await?;
    Ok(Json(outcome))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::current_issue_number;
    use crate::shared::{test_utils::AppStateBuilder, FixedClock};
    use crate::stats::{InMemoryResultRepository, ResultRepository, Scope};
    use chrono::{TimeZone, Utc};
    use axum::{
        body::Body,
        http::{Request, StatusCode},
        Router,
    };
    use tower::ServiceExt; // for `oneshot`

    #[tokio::test]
    async fn test_handle_message_returns_reply() {
        let app_state = AppStateBuilder::new().build();

        let app = Router::new()
            .route("/messages", axum::routing::post(handle_message))
            .with_state(app_state);

        let request_body = r#"{
            "guild_id": "guild",
            "channel_id": "channel",
            "author": {"id": "1", "display_name": "Alice"},
            "content": "!failquotes"
        }"#;
        let request = Request::builder()
            .method("POST")
            .uri("/messages")
            .header("content-type", "application/json")
            .body(Body::from(request_body))
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let reply: BotReply = serde_json::from_slice(&body).unwrap();
        assert!(reply.reply.unwrap().starts_with("!failquotes handles"));
        assert!(reply.reaction.is_none());
    }

    #[tokio::test]
    async fn test_preview_reminder_with_no_players() {
        let app_state = AppStateBuilder::new()
            .with_result_repository(Arc::new(InMemoryResultRepository::new()))
            .build();

        let app = Router::new()
            .route("/reminder", axum::routing::get(preview_reminder))
            .with_state(app_state);

        let request = Request::builder()
            .uri("/reminder")
            .body(Body::empty())
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["outcome"], "everyone_done");
    }

    #[tokio::test]
    async fn test_handlers_read_the_injected_clock() {
        let now = Utc.with_ymd_and_hms(2025, 9, 15, 23, 59, 0).unwrap();
        let results = Arc::new(InMemoryResultRepository::new());
        let app_state = AppStateBuilder::new()
            .with_result_repository(results.clone())
            .with_clock(Arc::new(FixedClock(now)))
            .build();

        let app = Router::new()
            .route("/messages", axum::routing::post(handle_message))
            .route("/reminder", axum::routing::get(preview_reminder))
            .with_state(app_state);

        let today = current_issue_number(now);
        for (user_id, issue) in [("1", today), ("2", today - 1), ("3", today)] {
            let request_body = serde_json::json!({
                "guild_id": "guild",
                "channel_id": "channel",
                "author": {"id": user_id, "display_name": user_id},
                "content": format!("#Angle #{} 2/4", issue),
            });
            let request = Request::builder()
                .method("POST")
                .uri("/messages")
                .header("content-type", "application/json")
                .body(Body::from(request_body.to_string()))
                .unwrap();
            let response = app.clone().oneshot(request).await.unwrap();
            assert_eq!(response.status(), StatusCode::OK);
        }

        let stored = results.list_results_for_user("1", Scope::All).await.unwrap();
        assert_eq!(stored[0].season, 3);

        let request = Request::builder()
            .uri("/reminder")
            .body(Body::empty())
            .unwrap();
        let response = app.oneshot(request).await.unwrap();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["outcome"], "missing");
        assert_eq!(json["user_ids"], serde_json::json!(["2"]));
    }
}
