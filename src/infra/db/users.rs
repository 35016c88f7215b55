use async_trait::async_trait;

use crate::{
    application::repos::{RepoError, UsersRepo},
    domain::{
        entities::UserRecord,
        leaderboard::{LEADERBOARD_LIMIT, LeaderboardQuery},
        types::UserType,
    },
};

use super::{PostgresRepositories, map_sqlx_error};

#[derive(sqlx::FromRow)]
struct UserRow {
    id: i64,
    username: String,
    full_name: String,
    profile_picture: Option<String>,
    loyalty_points: i32,
    user_type: UserType,
    is_active: bool,
}

impl From<UserRow> for UserRecord {
    fn from(row: UserRow) -> Self {
        Self {
            id: row.id,
            username: row.username,
            full_name: row.full_name,
            profile_picture: row.profile_picture,
            loyalty_points: row.loyalty_points,
            user_type: row.user_type,
            is_active: row.is_active,
        }
    }
}

#[async_trait]
impl UsersRepo for PostgresRepositories {
    async fn list_leaderboard(
        &self,
        query: &LeaderboardQuery,
    ) -> Result<Vec<UserRecord>, RepoError> {
        let limit = query.limit.min(LEADERBOARD_LIMIT);
        let limit = i64::try_from(limit)
            .map_err(|_| RepoError::from_persistence("leaderboard limit out of range"))?;

        let rows = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, username, full_name, profile_picture, loyalty_points, user_type, is_active
            FROM users
            WHERE user_type = $1 AND (is_active OR NOT $2)
            ORDER BY loyalty_points DESC, id ASC
            LIMIT $3
            "#,
        )
        .bind(query.user_type)
        .bind(query.active_only)
        .bind(limit)
        .fetch_all(self.pool())
        .await
        .map_err(map_sqlx_error)?;

        Ok(rows.into_iter().map(UserRecord::from).collect())
    }
}
