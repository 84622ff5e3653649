use std::collections::VecDeque;

use super::profile::MemberProfile;

/// A grouping of channel members into 1-1 buddy pairs.
#[derive(Debug, PartialEq, Eq)]
pub struct BuddyPairing {
    pairs: Vec<(MemberProfile, MemberProfile)>,
    leftover: Option<MemberProfile>,
}

impl BuddyPairing {
    /// Pairs the specified members such that the timezone spread within each
    /// pair is approximately maximized.
    ///
    /// Bot members are excluded, and members without a reported timezone are
    /// treated as UTC. The remaining members are sorted by timezone offset,
    /// then the earliest and latest remaining members are repeatedly paired
    /// until at most one member remains. Members with equal offsets keep
    /// their channel membership order.
    pub fn from_profiles(profiles: Vec<MemberProfile>) -> Self {
        let mut members = profiles
            .into_iter()
            .filter(|profile| !profile.is_bot())
            .collect::<Vec<MemberProfile>>();
        members.sort_by_key(|profile| profile.timezone_offset().unwrap_or(0));
        let mut members = VecDeque::from(members);
        let mut pairs = Vec::with_capacity(members.len() / 2);
        while members.len() > 1 {
            if let (Some(earliest), Some(latest)) = (members.pop_front(), members.pop_back()) {
                pairs.push((earliest, latest));
            }
        }
        Self {
            pairs,
            leftover: members.pop_front(),
        }
    }

    pub fn pairs(&self) -> &[(MemberProfile, MemberProfile)] {
        &self.pairs
    }

    /// The member that could not be paired when the channel has an odd number
    /// of members.
    pub fn leftover(&self) -> Option<&MemberProfile> {
        self.leftover.as_ref()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty() && self.leftover.is_none()
    }

    /// Renders the announcement message for this pairing.
    ///
    /// The first member of each pair is in charge of scheduling the 1-1.
    pub fn message_text(&self) -> String {
        let mut text = String::new();
        for (scheduler, buddy) in &self.pairs {
            text.push_str(&format!(
                "* <@{}> matched with <@{}>. <@{}>, you are in charge of scheduling the 1-1.\n",
                scheduler.id(),
                buddy.id(),
                scheduler.id()
            ));
        }
        if let Some(member) = &self.leftover {
            text.push_str(&format!(
                "* <@{}> couldn't be paired with anyone.\n",
                member.id()
            ));
        }
        text
    }
}
