use anyhow::Result;

use crate::{
    pairing::engine::BuddyPairing,
    slack::gateway::SlackGateway,
};

/// The status of matching the members of a channel into buddy pairs.
#[derive(Debug, PartialEq, Eq)]
pub enum MatchMembersStatus {
    Matched(BuddyPairing),
    NoMembersToMatch,
}

impl MatchMembersStatus {
    /// Pairs the human members of the channel with the specified id and
    /// announces the resulting pairs in that channel.
    ///
    /// Profiles are fetched fresh on every invocation, membership or timezone
    /// changes since a previous run are always picked up.
    pub async fn from_channel_members(
        channel_id: &str,
        slack: &impl SlackGateway,
    ) -> Result<Self> {
        log::info!("Matching members in channel {}.", channel_id);
        let member_ids = slack.channel_members(channel_id).await?;
        let mut profiles = Vec::with_capacity(member_ids.len());
        for member_id in member_ids {
            let profile = slack.user_profile(&member_id).await?;
            log::debug!("Fetched the profile of {} ({}).", profile.name(), member_id);
            profiles.push(profile);
        }
        log::info!("{} member profiles found.", profiles.len());
        let pairing = BuddyPairing::from_profiles(profiles);
        if pairing.is_empty() {
            return Ok(Self::NoMembersToMatch);
        }
        log::info!(
            "Sending the announcement for {} pairs to slack.",
            pairing.pairs().len()
        );
        slack.post_message(channel_id, &pairing.message_text()).await?;
        Ok(Self::Matched(pairing))
    }
}
