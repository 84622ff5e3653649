use std::collections::HashMap;

use serde::Deserialize;

use super::views::{CHANNEL_INPUT_BLOCK_ID, CHANNEL_SELECT_ACTION_ID};

/// An event payload sent from slack to this tool.
///
/// Slack sends events api payloads as raw JSON, and interactivity payloads
/// (shortcuts, view submissions, workflow step edits) form-encoded under a
/// `payload` field. Payloads with an unrecognized type decode to `Unknown`
/// rather than failing.
#[derive(Debug, PartialEq, Eq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SlackEvent {
    UrlVerification {
        challenge: String,
    },
    Shortcut {
        callback_id: String,
        trigger_id: String,
        user: SlackUserRef,
    },
    ViewSubmission {
        view: SubmittedView,
        workflow_step: Option<SubmittedWorkflowStep>,
    },
    WorkflowStepEdit {
        trigger_id: String,
        workflow_step: EditedWorkflowStep,
    },
    EventCallback {
        event: SlackChannelEvent,
    },
    #[serde(other)]
    Unknown,
}

impl SlackEvent {
    /// Decodes an event from the raw bytes of a request body.
    ///
    /// The raw bytes themselves are never re-encoded, signature verification
    /// must operate on the bytes as they were received.
    pub fn from_raw_body(raw_body: &[u8]) -> Option<Self> {
        if let Ok(event) = serde_json::from_slice::<Self>(raw_body) {
            return Some(event);
        }
        let form = serde_urlencoded::from_bytes::<InteractivityForm>(raw_body).ok()?;
        serde_json::from_str(&form.payload).ok()
    }
}

#[derive(Debug, Deserialize)]
struct InteractivityForm {
    payload: String,
}

/// An event wrapped in an events api callback envelope.
#[derive(Debug, PartialEq, Eq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SlackChannelEvent {
    WorkflowStepExecute {
        workflow_step: ExecutedWorkflowStep,
    },
    #[serde(other)]
    Unknown,
}

#[derive(Debug, PartialEq, Eq, Deserialize)]
pub struct SlackUserRef {
    pub id: String,
}

#[derive(Debug, PartialEq, Eq, Deserialize)]
pub struct SubmittedView {
    pub callback_id: String,
    pub state: SubmittedViewState,
}

/// The state values of a submitted view, keyed by block id and action id.
#[derive(Debug, PartialEq, Eq, Deserialize)]
pub struct SubmittedViewState {
    values: HashMap<String, HashMap<String, SubmittedViewValue>>,
}

#[derive(Debug, PartialEq, Eq, Deserialize)]
struct SubmittedViewValue {
    selected_conversation: Option<String>,
}

impl SubmittedViewState {
    /// The conversation picked in the channel input of the views opened by
    /// this tool.
    pub fn selected_channel_id(&self) -> Option<&str> {
        self.values
            .get(CHANNEL_INPUT_BLOCK_ID)?
            .get(CHANNEL_SELECT_ACTION_ID)?
            .selected_conversation
            .as_deref()
    }
}

/// The workflow step reference attached to a configuration view submission.
#[derive(Debug, PartialEq, Eq, Deserialize)]
pub struct SubmittedWorkflowStep {
    pub step_id: String,
    pub workflow_step_edit_id: String,
}

#[derive(Debug, PartialEq, Eq, Deserialize)]
pub struct EditedWorkflowStep {
    pub step_id: String,
}

/// The workflow step reference attached to an execute event.
#[derive(Debug, PartialEq, Eq, Deserialize)]
pub struct ExecutedWorkflowStep {
    pub step_id: String,
    pub workflow_step_execute_id: String,
}
