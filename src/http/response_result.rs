use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::json;

use crate::slack::handler::SlackRequestStatus;

/// The JSON body of a response to a slack request.
#[derive(Debug, PartialEq, Eq, Serialize)]
pub struct StatusResponse {
    status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<String>,
}

impl StatusResponse {
    fn ok() -> Self {
        Self {
            status: "ok",
            message: None,
        }
    }

    fn error(message: String) -> Self {
        Self {
            status: "error",
            message: Some(message),
        }
    }

    fn invalid_request() -> Self {
        Self {
            status: "invalid_request",
            message: None,
        }
    }
}

impl IntoResponse for SlackRequestStatus {
    fn into_response(self) -> Response {
        match self {
            Self::Ok => (StatusCode::OK, Json(StatusResponse::ok())).into_response(),
            Self::Challenge(challenge) => {
                (StatusCode::OK, Json(json!({ "challenge": challenge }))).into_response()
            }
            Self::UnknownCommand => (
                StatusCode::BAD_REQUEST,
                Json(StatusResponse::error("unknown_command".to_string())),
            )
                .into_response(),
            Self::UnknownEvent => (
                StatusCode::BAD_REQUEST,
                Json(StatusResponse::error("unknown_event".to_string())),
            )
                .into_response(),
            Self::MissingPayload => (
                StatusCode::BAD_REQUEST,
                Json(StatusResponse::error("missing_payload".to_string())),
            )
                .into_response(),
            Self::InvalidRequest => (
                StatusCode::FORBIDDEN,
                Json(StatusResponse::invalid_request()),
            )
                .into_response(),
            Self::GatewayError(error) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(StatusResponse::error(error.to_string())),
            )
                .into_response(),
        }
    }
}
