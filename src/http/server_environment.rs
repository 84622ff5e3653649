use std::env;

use crate::{
    slack::gateway::SlackApiClient, workflow::channel_store::InMemoryWorkflowChannelStore,
};

use super::signature::SlackRequestVerifier;

/// A data type containing necessary structs for server operations.
pub struct ServerEnvironment<Gateway = SlackApiClient> {
    slack: Gateway,
    request_verifier: SlackRequestVerifier,
    step_channels: InMemoryWorkflowChannelStore,
    address: &'static str,
}

impl ServerEnvironment {
    /// The production environment.
    pub fn prod() -> Self {
        Self::from_process_env("0.0.0.0:3000")
    }

    /// The development environment.
    pub fn dev() -> Self {
        Self::from_process_env("127.0.0.1:3002")
    }

    /// Returns the current environment.
    ///
    /// If the BUDDY_UP_ENV environment variable is "dev", then the development
    /// environment is used. Otherwise, the production environment is used.
    pub fn current() -> Self {
        if env::var("BUDDY_UP_ENV").is_ok_and(|e| e == "dev") {
            log::info!("Using dev ServerEnvironment.");
            Self::dev()
        } else {
            log::info!("Using production ServerEnvironment.");
            Self::prod()
        }
    }

    fn from_process_env(address: &'static str) -> Self {
        Self {
            slack: SlackApiClient::new(credential_env_var("SLACK_BOT_TOKEN")),
            request_verifier: SlackRequestVerifier::new(credential_env_var(
                "SLACK_SIGNING_SECRET",
            )),
            step_channels: InMemoryWorkflowChannelStore::new(),
            address,
        }
    }
}

/// Reads a credential environment variable, falling back to an empty value.
///
/// A missing credential is reported at startup rather than crashing, requests
/// that depend on it simply fail verification or gateway calls at runtime.
fn credential_env_var(name: &str) -> String {
    env::var(name).unwrap_or_else(|_| {
        log::warn!("{} is not set, requests that depend on it will fail.", name);
        String::new()
    })
}

impl<Gateway> ServerEnvironment<Gateway> {
    #[cfg(test)]
    pub fn for_testing(slack: Gateway, signing_secret: &str) -> Self {
        Self {
            slack,
            request_verifier: SlackRequestVerifier::new(signing_secret.to_string()),
            step_channels: InMemoryWorkflowChannelStore::new(),
            address: "127.0.0.1:0",
        }
    }

    pub fn slack(&self) -> &Gateway {
        &self.slack
    }

    pub fn request_verifier(&self) -> &SlackRequestVerifier {
        &self.request_verifier
    }

    pub fn step_channels(&self) -> &InMemoryWorkflowChannelStore {
        &self.step_channels
    }

    pub fn address(&self) -> &str {
        self.address
    }
}
