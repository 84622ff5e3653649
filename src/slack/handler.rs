use std::str::FromStr;

use anyhow::Result;

use crate::{
    http::signature::{SlackRequestHeaders, SlackRequestVerifier},
    operations::match_members::MatchMembersStatus,
    workflow::channel_store::WorkflowChannelStore,
};

use super::{
    command::{BuddyUpSlackCommand, SlackCommandRequest},
    events::{SlackChannelEvent, SlackEvent},
    gateway::SlackGateway,
    views::{
        channel_select_modal, matched_step_outputs, saved_step_inputs, saved_step_outputs,
        workflow_step_config_view, BUDDY_UP_CALLBACK_ID,
    },
};

/// The terminal classification of an inbound slack request.
///
/// Every request resolves to exactly one of these, which the http layer maps
/// to a status code and JSON body.
#[derive(Debug)]
pub enum SlackRequestStatus {
    Ok,
    Challenge(String),
    UnknownCommand,
    UnknownEvent,
    MissingPayload,
    InvalidRequest,
    GatewayError(anyhow::Error),
}

/// Handles a request to the slash commands endpoint.
///
/// The raw body bytes are what the signature covers, so the command form is
/// only decoded after verification passes.
pub async fn handle_command_request(
    raw_body: &[u8],
    headers: &SlackRequestHeaders,
    verifier: &SlackRequestVerifier,
    slack: &impl SlackGateway,
) -> SlackRequestStatus {
    if !verifier.is_valid_request(raw_body, headers) {
        return SlackRequestStatus::InvalidRequest;
    }
    let Ok(request) = serde_urlencoded::from_bytes::<SlackCommandRequest>(raw_body) else {
        return SlackRequestStatus::MissingPayload;
    };
    let Ok(command) = BuddyUpSlackCommand::from_str(request.command()) else {
        log::info!("Received unrecognized command {}.", request.command());
        return SlackRequestStatus::UnknownCommand;
    };
    match command {
        BuddyUpSlackCommand::BuddyUp => {
            log::info!(
                "Received {} in channel {} (text {:?}).",
                request.command(),
                request.channel_id(),
                request.text()
            );
            respond_to_match_result(
                MatchMembersStatus::from_channel_members(request.channel_id(), slack).await,
            )
        }
    }
}

/// Handles a request to the events endpoint.
pub async fn handle_event_request(
    raw_body: &[u8],
    headers: &SlackRequestHeaders,
    verifier: &SlackRequestVerifier,
    slack: &impl SlackGateway,
    step_channels: &impl WorkflowChannelStore,
) -> SlackRequestStatus {
    let Some(event) = SlackEvent::from_raw_body(raw_body) else {
        return SlackRequestStatus::MissingPayload;
    };
    // Slack sends the url verification handshake before signing is configured
    // for the endpoint, it is the one payload answered without a signature.
    if let SlackEvent::UrlVerification { challenge } = &event {
        return SlackRequestStatus::Challenge(challenge.clone());
    }
    if !verifier.is_valid_request(raw_body, headers) {
        return SlackRequestStatus::InvalidRequest;
    }
    match event {
        SlackEvent::Shortcut {
            callback_id,
            trigger_id,
            user,
        } if callback_id == BUDDY_UP_CALLBACK_ID => {
            log::info!("Opening a channel select modal for user {}.", user.id);
            respond_to_gateway_result(slack.open_view(&trigger_id, channel_select_modal()).await)
        }
        SlackEvent::ViewSubmission {
            view,
            workflow_step,
        } if view.callback_id == BUDDY_UP_CALLBACK_ID => {
            let Some(step) = workflow_step else {
                return SlackRequestStatus::MissingPayload;
            };
            let Some(channel_id) = view.state.selected_channel_id() else {
                return SlackRequestStatus::MissingPayload;
            };
            step_channels.put(&step.step_id, channel_id).await;
            log::info!(
                "Bound channel {} to workflow step {}.",
                channel_id,
                step.step_id
            );
            respond_to_gateway_result(
                slack
                    .update_workflow_step(
                        &step.workflow_step_edit_id,
                        saved_step_inputs(channel_id),
                        saved_step_outputs(),
                    )
                    .await,
            )
        }
        SlackEvent::ViewSubmission { view, .. } => {
            let Some(channel_id) = view.state.selected_channel_id() else {
                return SlackRequestStatus::MissingPayload;
            };
            respond_to_match_result(
                MatchMembersStatus::from_channel_members(channel_id, slack).await,
            )
        }
        SlackEvent::WorkflowStepEdit {
            trigger_id,
            workflow_step,
        } => {
            log::info!(
                "Opening the configuration view for workflow step {}.",
                workflow_step.step_id
            );
            respond_to_gateway_result(
                slack
                    .open_view(&trigger_id, workflow_step_config_view())
                    .await,
            )
        }
        SlackEvent::EventCallback {
            event: SlackChannelEvent::WorkflowStepExecute { workflow_step },
        } => {
            // A pairing failure must not fail the event acknowledgement, the
            // step still completes so the workflow does not hang.
            match step_channels.get(&workflow_step.step_id).await {
                Some(channel_id) => {
                    let result = MatchMembersStatus::from_channel_members(&channel_id, slack).await;
                    if let Err(error) = result {
                        log::error!(
                            "Failed to match members in channel {}: {}.",
                            channel_id,
                            error
                        );
                    }
                }
                None => {
                    log::error!(
                        "No channel is bound to workflow step {}.",
                        workflow_step.step_id
                    );
                }
            }
            respond_to_gateway_result(
                slack
                    .complete_workflow_step(
                        &workflow_step.workflow_step_execute_id,
                        matched_step_outputs(),
                    )
                    .await,
            )
        }
        _ => SlackRequestStatus::UnknownEvent,
    }
}

fn respond_to_gateway_result(result: Result<()>) -> SlackRequestStatus {
    match result {
        Ok(()) => SlackRequestStatus::Ok,
        Err(error) => SlackRequestStatus::GatewayError(error),
    }
}

fn respond_to_match_result(result: Result<MatchMembersStatus>) -> SlackRequestStatus {
    match result {
        Ok(_) => SlackRequestStatus::Ok,
        Err(error) => {
            log::error!("Failed to match members: {}.", error);
            SlackRequestStatus::GatewayError(error)
        }
    }
}
