use std::{
    error::Error,
    fmt::{Display, Formatter},
    future::Future,
};

use anyhow::Result;
use reqwest::{header::CONTENT_TYPE, Client};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::pairing::profile::MemberProfile;

/// A trait for the slack web api calls that this tool makes.
pub trait SlackGateway {
    /// The ids of the members of the channel with the specified id.
    fn channel_members(&self, channel_id: &str) -> impl Future<Output = Result<Vec<String>>> + Send;

    /// The profile of the user with the specified id.
    fn user_profile(&self, user_id: &str) -> impl Future<Output = Result<MemberProfile>> + Send;

    /// Posts a message with the specified text to a channel.
    fn post_message(&self, channel_id: &str, text: &str)
        -> impl Future<Output = Result<()>> + Send;

    /// Opens a modal or workflow step view in response to a user interaction.
    fn open_view(&self, trigger_id: &str, view: Value) -> impl Future<Output = Result<()>> + Send;

    /// Saves the inputs and outputs of a workflow step being configured.
    fn update_workflow_step(
        &self,
        workflow_step_edit_id: &str,
        inputs: Value,
        outputs: Value,
    ) -> impl Future<Output = Result<()>> + Send;

    /// Marks an executing workflow step as completed with the specified
    /// outputs.
    fn complete_workflow_step(
        &self,
        workflow_step_execute_id: &str,
        outputs: Value,
    ) -> impl Future<Output = Result<()>> + Send;
}

/// A `SlackGateway` that calls the slack web api over https.
pub struct SlackApiClient {
    http_client: Client,
    bot_token: String,
}

impl SlackApiClient {
    pub fn new(bot_token: String) -> Self {
        Self {
            http_client: Client::new(),
            bot_token,
        }
    }

    /// Calls the specified web api method and returns the body of a
    /// successful response.
    async fn call(&self, method: &str, body: Value) -> Result<Value> {
        let resp = self
            .http_client
            .post(format!("https://slack.com/api/{}", method))
            .header(CONTENT_TYPE, "application/json")
            .bearer_auth(&self.bot_token)
            .json(&body)
            .send()
            .await?;
        let resp = resp.json::<SlackCallResponse>().await?;
        if resp.ok {
            Ok(resp.body)
        } else {
            let message = resp.error.unwrap_or_else(|| "unknown_error".to_string());
            log::error!("A slack api error occurred calling {}: {}.", method, message);
            Err(anyhow::Error::new(SlackApiError {
                method: method.to_string(),
                message,
            }))
        }
    }
}

#[derive(Debug, Deserialize)]
struct SlackCallResponse {
    ok: bool,
    error: Option<String>,
    #[serde(flatten)]
    body: Value,
}

#[derive(Debug, Deserialize)]
struct MembersResponseBody {
    members: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct ProfileResponseBody {
    profile: UserProfileBody,
}

#[derive(Debug, Deserialize)]
struct UserProfileBody {
    real_name: Option<String>,
    tz_offset: Option<i64>,
    bot_id: Option<String>,
}

impl SlackGateway for SlackApiClient {
    async fn channel_members(&self, channel_id: &str) -> Result<Vec<String>> {
        let body = self
            .call("conversations.members", json!({ "channel": channel_id }))
            .await?;
        Ok(serde_json::from_value::<MembersResponseBody>(body)?.members)
    }

    async fn user_profile(&self, user_id: &str) -> Result<MemberProfile> {
        let body = self
            .call("users.profile.get", json!({ "user": user_id }))
            .await?;
        let profile = serde_json::from_value::<ProfileResponseBody>(body)?.profile;
        Ok(MemberProfile::new(
            user_id,
            &profile.real_name.unwrap_or_default(),
            profile.tz_offset,
            profile.bot_id.is_some(),
        ))
    }

    async fn post_message(&self, channel_id: &str, text: &str) -> Result<()> {
        self.call(
            "chat.postMessage",
            json!({ "channel": channel_id, "text": text }),
        )
        .await?;
        Ok(())
    }

    async fn open_view(&self, trigger_id: &str, view: Value) -> Result<()> {
        self.call(
            "views.open",
            json!({ "trigger_id": trigger_id, "view": view }),
        )
        .await?;
        Ok(())
    }

    async fn update_workflow_step(
        &self,
        workflow_step_edit_id: &str,
        inputs: Value,
        outputs: Value,
    ) -> Result<()> {
        self.call(
            "workflows.updateStep",
            json!({
                "workflow_step_edit_id": workflow_step_edit_id,
                "inputs": inputs,
                "outputs": outputs
            }),
        )
        .await?;
        Ok(())
    }

    async fn complete_workflow_step(
        &self,
        workflow_step_execute_id: &str,
        outputs: Value,
    ) -> Result<()> {
        self.call(
            "workflows.stepCompleted",
            json!({
                "workflow_step_execute_id": workflow_step_execute_id,
                "outputs": outputs
            }),
        )
        .await?;
        Ok(())
    }
}

/// An error returned by the slack web api.
#[derive(Debug)]
pub struct SlackApiError {
    method: String,
    message: String,
}

impl Display for SlackApiError {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "Slack API Error ({}): {}", self.method, self.message)
    }
}

impl Error for SlackApiError {}
