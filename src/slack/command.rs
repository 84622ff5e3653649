use serde::{Deserialize, Serialize};
use strum_macros::{EnumString, IntoStaticStr};

/// The slack slash commands that this tool must respond to.
#[derive(Debug, PartialEq, Eq, EnumString, IntoStaticStr, Clone, Copy)]
pub enum BuddyUpSlackCommand {
    #[strum(serialize = "/buddy_up")]
    BuddyUp,
}

/// A slash command request from slack.
///
/// The command name is kept as a raw string since an unrecognized command must
/// be answered with an unknown command response rather than a decode failure.
#[derive(Debug, PartialEq, Eq, Deserialize, Serialize, Clone)]
pub struct SlackCommandRequest {
    command: String,
    text: String,
    channel_id: String,
}

impl SlackCommandRequest {
    pub fn new(command: String, text: String, channel_id: String) -> Self {
        Self {
            command,
            text,
            channel_id,
        }
    }

    pub fn command(&self) -> &str {
        &self.command
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn channel_id(&self) -> &str {
        &self.channel_id
    }
}
