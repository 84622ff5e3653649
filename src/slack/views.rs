use serde_json::{json, Value};

/// The callback id of the buddy up global shortcut and workflow configuration
/// submission.
pub const BUDDY_UP_CALLBACK_ID: &str = "buddy_up";

/// The callback id of the ad-hoc channel selection modal.
pub const BUDDY_UP_MODAL_CALLBACK_ID: &str = "buddy_up_modal";

/// The callback id of the workflow step configuration view.
pub const BUDDY_UP_WORKFLOW_STEP_CALLBACK_ID: &str = "buddy_up_workflow_step";

/// The block id of the channel input in the views opened by this tool.
pub const CHANNEL_INPUT_BLOCK_ID: &str = "channel_input";

/// The action id of the conversations select element in the channel input.
pub const CHANNEL_SELECT_ACTION_ID: &str = "channel_select";

/// The modal for picking the channel to buddy up, opened from the global
/// shortcut.
pub fn channel_select_modal() -> Value {
    json!({
        "type": "modal",
        "callback_id": BUDDY_UP_MODAL_CALLBACK_ID,
        "title": { "type": "plain_text", "text": "Buddy Up" },
        "blocks": [
            {
                "type": "input",
                "block_id": CHANNEL_INPUT_BLOCK_ID,
                "label": { "type": "plain_text", "text": "Select a channel" },
                "element": {
                    "type": "conversations_select",
                    "action_id": CHANNEL_SELECT_ACTION_ID,
                    "placeholder": { "type": "plain_text", "text": "Select a channel" }
                }
            }
        ],
        "submit": { "type": "plain_text", "text": "Submit" }
    })
}

/// The workflow builder view for configuring the channel that a buddy up step
/// posts its pairs to.
pub fn workflow_step_config_view() -> Value {
    json!({
        "type": "workflow_step",
        "callback_id": BUDDY_UP_WORKFLOW_STEP_CALLBACK_ID,
        "blocks": [
            {
                "type": "input",
                "block_id": CHANNEL_INPUT_BLOCK_ID,
                "label": { "type": "plain_text", "text": "Channel", "emoji": true },
                "element": {
                    "type": "conversations_select",
                    "action_id": CHANNEL_SELECT_ACTION_ID,
                    "placeholder": { "type": "plain_text", "text": "Select a channel", "emoji": true }
                }
            }
        ]
    })
}

/// The inputs recorded on a workflow step when its configuration is saved.
pub fn saved_step_inputs(channel_id: &str) -> Value {
    json!({ "channel": { "value": channel_id } })
}

/// The outputs recorded on a workflow step when its configuration is saved.
pub fn saved_step_outputs() -> Value {
    json!([
        { "name": "message", "type": "text", "label": "Saved Workflow + Channel Link" }
    ])
}

/// The outputs reported when a buddy up workflow step finishes executing.
pub fn matched_step_outputs() -> Value {
    json!({ "message": { "value": "Pairs have been matched" } })
}
