use std::sync::Arc;

use axum::{body::Bytes, http::HeaderMap, response::IntoResponse, routing::post, serve, Router};
use tokio::net::TcpListener;

use crate::slack::{
    gateway::SlackGateway,
    handler::{handle_command_request, handle_event_request},
};

use super::{server_environment::ServerEnvironment, signature::SlackRequestHeaders};

/// Runs this tool as an http server using the specified `ServerEnvironment`.
pub async fn run_http_server(environment: Arc<ServerEnvironment>) -> anyhow::Result<()> {
    let server = buddy_up_server(environment.clone());
    let listener = TcpListener::bind(environment.address()).await?;
    Ok(serve(listener, server).await?)
}

fn buddy_up_server<Gateway: SlackGateway + Send + Sync + 'static>(
    environment: Arc<ServerEnvironment<Gateway>>,
) -> Router<()> {
    let command_environment = environment.clone();
    Router::new()
        .route(
            "/commands",
            post(move |headers, body| post_slack_command(headers, body, command_environment)),
        )
        .route(
            "/events",
            post(move |headers, body| post_slack_event(headers, body, environment)),
        )
}

// NB: Both endpoints extract the raw body bytes rather than using the Form
// extractor, the slack signature covers the bytes exactly as they were sent.

async fn post_slack_command<Gateway: SlackGateway + Send + Sync>(
    headers: HeaderMap,
    body: Bytes,
    environment: Arc<ServerEnvironment<Gateway>>,
) -> impl IntoResponse {
    let headers = SlackRequestHeaders::from_header_map(&headers);
    handle_command_request(
        &body,
        &headers,
        environment.request_verifier(),
        environment.slack(),
    )
    .await
}

async fn post_slack_event<Gateway: SlackGateway + Send + Sync>(
    headers: HeaderMap,
    body: Bytes,
    environment: Arc<ServerEnvironment<Gateway>>,
) -> impl IntoResponse {
    let headers = SlackRequestHeaders::from_header_map(&headers);
    handle_event_request(
        &body,
        &headers,
        environment.request_verifier(),
        environment.slack(),
        environment.step_channels(),
    )
    .await
}

#[cfg(test)]
mod tests {
    use axum::http::{HeaderName, HeaderValue, StatusCode};
    use axum_test::{TestResponse, TestServer};
    use chrono::Utc;
    use serde_json::{json, Value};

    use crate::{
        http::{
            signature::{SLACK_SIGNATURE_HEADER, SLACK_TIMESTAMP_HEADER},
            test_support::{slack_signature, TEST_SIGNING_SECRET},
        },
        pairing::profile::MemberProfile,
        slack::{command::SlackCommandRequest, test_support::TestSlackGateway},
    };

    use super::*;

    struct TestApp {
        server: TestServer,
        environment: Arc<ServerEnvironment<TestSlackGateway>>,
    }

    impl TestApp {
        fn new(slack: TestSlackGateway) -> Self {
            let environment = Arc::new(ServerEnvironment::for_testing(slack, TEST_SIGNING_SECRET));
            Self {
                server: TestServer::new(buddy_up_server(environment.clone())).unwrap(),
                environment,
            }
        }

        fn two_member_channel(channel_id: &str) -> Self {
            Self::new(TestSlackGateway::with_channel(
                channel_id,
                vec![
                    MemberProfile::new("U1", "Alice", Some(-5), false),
                    MemberProfile::new("U2", "Bob", Some(9), false),
                ],
            ))
        }

        async fn post_signed(&self, path: &str, body: String) -> TestResponse {
            let timestamp = Utc::now().timestamp();
            let signature = slack_signature(TEST_SIGNING_SECRET, timestamp, body.as_bytes());
            self.server
                .post(path)
                .add_header(
                    HeaderName::from_static(SLACK_TIMESTAMP_HEADER),
                    HeaderValue::from_str(&timestamp.to_string()).unwrap(),
                )
                .add_header(
                    HeaderName::from_static(SLACK_SIGNATURE_HEADER),
                    HeaderValue::from_str(&signature).unwrap(),
                )
                .bytes(Bytes::from(body))
                .await
        }

        async fn post_unsigned(&self, path: &str, body: String) -> TestResponse {
            self.server.post(path).bytes(Bytes::from(body)).await
        }
    }

    fn command_body(command: &str, channel_id: &str) -> String {
        serde_urlencoded::to_string(SlackCommandRequest::new(
            command.to_string(),
            "".to_string(),
            channel_id.to_string(),
        ))
        .unwrap()
    }

    fn event_form_body(payload: &Value) -> String {
        serde_urlencoded::to_string([("payload", &payload.to_string())]).unwrap()
    }

    #[tokio::test]
    async fn signed_buddy_up_command_posts_the_pairing_announcement() {
        let app = TestApp::two_member_channel("C1");
        let resp = app
            .post_signed("/commands", command_body("/buddy_up", "C1"))
            .await;
        resp.assert_status_ok();
        resp.assert_json(&json!({ "status": "ok" }));
        let messages = app.environment.slack().posted_messages().await;
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].0, "C1")
    }

    #[tokio::test]
    async fn unsigned_command_is_forbidden() {
        let app = TestApp::two_member_channel("C1");
        let resp = app
            .post_unsigned("/commands", command_body("/buddy_up", "C1"))
            .await;
        resp.assert_status_forbidden();
        resp.assert_json(&json!({ "status": "invalid_request" }));
        assert!(app.environment.slack().member_fetches().await.is_empty())
    }

    #[tokio::test]
    async fn unknown_command_is_a_bad_request() {
        let app = TestApp::two_member_channel("C1");
        let resp = app
            .post_signed("/commands", command_body("/pair_up", "C1"))
            .await;
        resp.assert_status(StatusCode::BAD_REQUEST);
        resp.assert_json(&json!({ "status": "error", "message": "unknown_command" }))
    }

    #[tokio::test]
    async fn url_verification_handshake_is_echoed_without_a_signature() {
        let app = TestApp::two_member_channel("C1");
        let body = json!({ "type": "url_verification", "challenge": "abc" }).to_string();
        let resp = app.post_unsigned("/events", body).await;
        resp.assert_status_ok();
        resp.assert_json(&json!({ "challenge": "abc" }))
    }

    #[tokio::test]
    async fn workflow_configuration_then_execution_round_trip() {
        let app = TestApp::two_member_channel("C42");
        let config_body = event_form_body(&json!({
            "type": "view_submission",
            "view": {
                "callback_id": "buddy_up",
                "state": {
                    "values": {
                        "channel_input": {
                            "channel_select": { "selected_conversation": "C42" }
                        }
                    }
                }
            },
            "workflow_step": { "step_id": "s1", "workflow_step_edit_id": "e1" }
        }));
        let resp = app.post_signed("/events", config_body).await;
        resp.assert_status_ok();
        let execute_body = json!({
            "type": "event_callback",
            "event": {
                "type": "workflow_step_execute",
                "workflow_step": { "step_id": "s1", "workflow_step_execute_id": "x1" }
            }
        })
        .to_string();
        let resp = app.post_signed("/events", execute_body).await;
        resp.assert_status_ok();
        let slack = app.environment.slack();
        assert_eq!(slack.updated_steps().await.len(), 1);
        assert_eq!(slack.posted_messages().await.len(), 1);
        assert_eq!(slack.posted_messages().await[0].0, "C42");
        assert_eq!(slack.completed_steps().await.len(), 1)
    }
}
