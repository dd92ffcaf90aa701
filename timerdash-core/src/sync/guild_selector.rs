// File: timerdash-core/src/sync/guild_selector.rs

use timerdash_common::models::GuildId;

/// Decides which guild the dashboard shows after each status refresh.
///
/// 1. no active timers: the configured default guild
/// 2. the previously shown guild, if it still has a timer
/// 3. otherwise the lexicographically smallest active guild id
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GuildSelector {
    default_guild: Option<GuildId>,
}

impl GuildSelector {
    pub fn new(default_guild: Option<GuildId>) -> Self {
        Self { default_guild }
    }

    pub fn default_guild(&self) -> Option<&GuildId> {
        self.default_guild.as_ref()
    }

    pub fn select<'a, I>(&self, prior: Option<&str>, active: I) -> Option<GuildId>
    where
        I: IntoIterator<Item = &'a GuildId>,
    {
        let mut first: Option<&GuildId> = None;
        for guild in active {
            if prior == Some(guild.as_str()) {
                return Some(guild.clone());
            }
            if first.is_none_or(|f| guild < f) {
                first = Some(guild);
            }
        }
        match first {
            Some(guild) => Some(guild.clone()),
            None => self.default_guild.clone(),
        }
    }
}
