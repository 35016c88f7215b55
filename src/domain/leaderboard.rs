//! Loyalty leaderboard projection and ranking rules.

use serde::{Deserialize, Serialize};

use crate::domain::{entities::UserRecord, types::UserType};

/// Upper bound on leaderboard length.
pub const LEADERBOARD_LIMIT: usize = 20;

/// Public projection of a user shown on the homepage leaderboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub id: i64,
    pub username: String,
    pub full_name: String,
    pub profile_picture: Option<String>,
    pub loyalty_points: i32,
}

impl LeaderboardEntry {
    pub fn display_name(&self) -> &str {
        let trimmed = self.full_name.trim();
        if trimmed.is_empty() {
            &self.username
        } else {
            trimmed
        }
    }
}

impl From<UserRecord> for LeaderboardEntry {
    fn from(user: UserRecord) -> Self {
        Self {
            id: user.id,
            username: user.username,
            full_name: user.full_name,
            profile_picture: user.profile_picture,
            loyalty_points: user.loyalty_points,
        }
    }
}

/// Selection applied to users before ranking.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LeaderboardQuery {
    pub user_type: UserType,
    pub active_only: bool,
    pub limit: usize,
}

impl Default for LeaderboardQuery {
    fn default() -> Self {
        Self {
            user_type: UserType::Customer,
            active_only: true,
            limit: LEADERBOARD_LIMIT,
        }
    }
}

impl LeaderboardQuery {
    pub fn admits(&self, user: &UserRecord) -> bool {
        user.user_type == self.user_type && (!self.active_only || user.is_active)
    }
}

/// Filter, order by descending loyalty points and cap the candidate users.
///
/// Ties keep the order in which the store returned them.
pub fn rank<I>(query: &LeaderboardQuery, users: I) -> Vec<LeaderboardEntry>
where
    I: IntoIterator<Item = UserRecord>,
{
    let mut entries: Vec<LeaderboardEntry> = users
        .into_iter()
        .filter(|user| query.admits(user))
        .map(LeaderboardEntry::from)
        .collect();
    entries.sort_by(|a, b| b.loyalty_points.cmp(&a.loyalty_points));
    entries.truncate(query.limit.min(LEADERBOARD_LIMIT));
    entries
}
