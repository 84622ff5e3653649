/// A profile of a member in a slack channel.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct MemberProfile {
    id: String,
    name: String,
    timezone_offset: Option<i64>,
    is_bot: bool,
}

impl MemberProfile {
    pub fn new(id: &str, name: &str, timezone_offset: Option<i64>, is_bot: bool) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            timezone_offset,
            is_bot,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The member's UTC offset, `None` when slack does not report one.
    pub fn timezone_offset(&self) -> Option<i64> {
        self.timezone_offset
    }

    pub fn is_bot(&self) -> bool {
        self.is_bot
    }
}
