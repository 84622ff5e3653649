use std::collections::HashMap;

use anyhow::{Error, Result};
use serde_json::Value;
use tokio::sync::Mutex;

use crate::{pairing::profile::MemberProfile, utils::test_error::TestError};

use super::gateway::SlackGateway;

/// A `SlackGateway` that serves canned channel rosters and records every
/// outbound call.
pub struct TestSlackGateway {
    members_by_channel: HashMap<String, Vec<String>>,
    profiles: HashMap<String, MemberProfile>,
    member_fetches: Mutex<Vec<String>>,
    posted_messages: Mutex<Vec<(String, String)>>,
    opened_views: Mutex<Vec<(String, Value)>>,
    updated_steps: Mutex<Vec<(String, Value, Value)>>,
    completed_steps: Mutex<Vec<(String, Value)>>,
}

impl TestSlackGateway {
    pub fn new(members_by_channel: HashMap<String, Vec<String>>, profiles: Vec<MemberProfile>) -> Self {
        Self {
            members_by_channel,
            profiles: profiles
                .into_iter()
                .map(|profile| (profile.id().to_string(), profile))
                .collect(),
            member_fetches: Mutex::new(vec![]),
            posted_messages: Mutex::new(vec![]),
            opened_views: Mutex::new(vec![]),
            updated_steps: Mutex::new(vec![]),
            completed_steps: Mutex::new(vec![]),
        }
    }

    /// A gateway for a single channel containing the specified members.
    pub fn with_channel(channel_id: &str, profiles: Vec<MemberProfile>) -> Self {
        let member_ids = profiles
            .iter()
            .map(|profile| profile.id().to_string())
            .collect::<Vec<String>>();
        Self::new(
            HashMap::from([(channel_id.to_string(), member_ids)]),
            profiles,
        )
    }

    /// The channel ids that membership was fetched for, in call order.
    pub async fn member_fetches(&self) -> Vec<String> {
        self.member_fetches.lock().await.clone()
    }

    pub async fn posted_messages(&self) -> Vec<(String, String)> {
        self.posted_messages.lock().await.clone()
    }

    pub async fn opened_views(&self) -> Vec<(String, Value)> {
        self.opened_views.lock().await.clone()
    }

    pub async fn updated_steps(&self) -> Vec<(String, Value, Value)> {
        self.updated_steps.lock().await.clone()
    }

    pub async fn completed_steps(&self) -> Vec<(String, Value)> {
        self.completed_steps.lock().await.clone()
    }

    pub async fn call_count(&self) -> usize {
        self.posted_messages.lock().await.len()
            + self.opened_views.lock().await.len()
            + self.updated_steps.lock().await.len()
            + self.completed_steps.lock().await.len()
    }
}

impl SlackGateway for TestSlackGateway {
    async fn channel_members(&self, channel_id: &str) -> Result<Vec<String>> {
        let mut fetches = self.member_fetches.lock().await;
        fetches.push(channel_id.to_string());
        self.members_by_channel
            .get(channel_id)
            .cloned()
            .ok_or_else(|| Error::new(TestError))
    }

    async fn user_profile(&self, user_id: &str) -> Result<MemberProfile> {
        self.profiles
            .get(user_id)
            .cloned()
            .ok_or_else(|| Error::new(TestError))
    }

    async fn post_message(&self, channel_id: &str, text: &str) -> Result<()> {
        let mut messages = self.posted_messages.lock().await;
        messages.push((channel_id.to_string(), text.to_string()));
        Ok(())
    }

    async fn open_view(&self, trigger_id: &str, view: Value) -> Result<()> {
        let mut views = self.opened_views.lock().await;
        views.push((trigger_id.to_string(), view));
        Ok(())
    }

    async fn update_workflow_step(
        &self,
        workflow_step_edit_id: &str,
        inputs: Value,
        outputs: Value,
    ) -> Result<()> {
        let mut steps = self.updated_steps.lock().await;
        steps.push((workflow_step_edit_id.to_string(), inputs, outputs));
        Ok(())
    }

    async fn complete_workflow_step(
        &self,
        workflow_step_execute_id: &str,
        outputs: Value,
    ) -> Result<()> {
        let mut steps = self.completed_steps.lock().await;
        steps.push((workflow_step_execute_id.to_string(), outputs));
        Ok(())
    }
}

/// A `SlackGateway` where every call fails.
pub struct FailingSlackGateway;

impl SlackGateway for FailingSlackGateway {
    async fn channel_members(&self, _: &str) -> Result<Vec<String>> {
        Err(Error::new(TestError))
    }

    async fn user_profile(&self, _: &str) -> Result<MemberProfile> {
        Err(Error::new(TestError))
    }

    async fn post_message(&self, _: &str, _: &str) -> Result<()> {
        Err(Error::new(TestError))
    }

    async fn open_view(&self, _: &str, _: Value) -> Result<()> {
        Err(Error::new(TestError))
    }

    async fn update_workflow_step(&self, _: &str, _: Value, _: Value) -> Result<()> {
        Err(Error::new(TestError))
    }

    async fn complete_workflow_step(&self, _: &str, _: Value) -> Result<()> {
        Err(Error::new(TestError))
    }
}
