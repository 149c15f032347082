use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tower::ServiceExt;

use anglebot::{
    quotes::InMemoryQuoteRepository,
    router,
    stats::{InMemoryResultRepository, ResultRepository},
    AngleResult, AppState, BotReply, ChatUser, FixedClock, InboundMessage,
};

// ============================================================================
// Test Setup Infrastructure
// ============================================================================

pub struct TestApp {
    pub app: Router,
    pub result_repository: Arc<InMemoryResultRepository>,
    pub guild_id: String,
    /// Instant every request of this app is handled at
    pub now: DateTime<Utc>,
}

pub struct TestAppBuilder {
    results: Vec<AngleResult>,
    guild_id: String,
    now: DateTime<Utc>,
}

impl TestAppBuilder {
    pub fn new() -> Self {
        Self {
            results: vec![],
            guild_id: "guild-1".to_string(),
            now: Utc::now(),
        }
    }

    #[allow(dead_code)] // Not every test file seeds history
    pub fn with_results(mut self, results: Vec<AngleResult>) -> Self {
        self.results = results;
        self
    }

    pub fn build(self) -> TestApp {
        let result_repository = Arc::new(InMemoryResultRepository::with_results(self.results));
        let repository: Arc<dyn ResultRepository> = result_repository.clone();
        let app_state = AppState::new(repository, Arc::new(InMemoryQuoteRepository::new()))
            .with_clock(Arc::new(FixedClock(self.now)));

        TestApp {
            app: router(app_state),
            result_repository,
            guild_id: self.guild_id,
            now: self.now,
        }
    }
}

pub fn user(id: &str, display_name: &str) -> ChatUser {
    ChatUser {
        id: id.to_string(),
        display_name: display_name.to_string(),
        bot: false,
    }
}

impl TestApp {
    pub async fn send(&self, author: &ChatUser, content: &str) -> BotReply {
        self.send_with_mentions(author, content, vec![]).await
    }

    pub async fn send_with_mentions(
        &self,
        author: &ChatUser,
        content: &str,
        mentions: Vec<ChatUser>,
    ) -> BotReply {
        let message = InboundMessage {
            guild_id: self.guild_id.clone(),
            channel_id: "channel-1".to_string(),
            author: author.clone(),
            mentions,
            content: content.to_string(),
        };

        let request = Request::builder()
            .method("POST")
            .uri("/messages")
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_vec(&message).unwrap()))
            .unwrap();

        let body = self.request(request).await;
        serde_json::from_slice(&body).expect("reply should be valid JSON")
    }

    pub async fn reply_text(&self, author: &ChatUser, content: &str) -> String {
        self.send(author, content)
            .await
            .reply
            .expect("command should produce a reply")
    }

    pub async fn get_json(&self, uri: &str) -> serde_json::Value {
        let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
        let body = self.request(request).await;
        serde_json::from_slice(&body).expect("response should be valid JSON")
    }

    async fn request(&self, request: Request<Body>) -> Vec<u8> {
        let response = self.app.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap()
            .to_vec()
    }
}
