//! User store implementation
//!
//! Read-only PostgreSQL queries over the `users` table: active seat count
//! and the system administrator list.

use async_trait::async_trait;
use seatguard_core::{
    models::{User, UserRole, SYSTEM_ADMIN_ROLE_ID},
    traits::{Pagination, UserStore},
    AppError, AppResult,
};
use sqlx::{PgPool, Row};
use tracing::{debug, error, instrument};

/// PostgreSQL implementation of UserStore
pub struct PgUserStore {
    pool: PgPool,
}

impl PgUserStore {
    /// Create a new user store
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Pattern matching one role token inside the space-padded roles column
    fn role_pattern(role: &str) -> String {
        format!("% {} %", role)
    }
}

#[async_trait]
impl UserStore for PgUserStore {
    #[instrument(skip(self))]
    async fn count_active_users(&self) -> AppResult<i64> {
        let result: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM users WHERE delete_at = 0")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                error!("Database error counting active users: {}", e);
                AppError::SeatCount(format!("Failed to count users: {}", e))
            })?;

        debug!("Active user count: {}", result.0);

        Ok(result.0)
    }

    #[instrument(skip(self))]
    async fn list_admins(&self, page: &Pagination) -> AppResult<Vec<User>> {
        debug!(
            "Listing system admins with limit {} offset {}",
            page.limit(),
            page.offset()
        );

        let rows = sqlx::query(
            r#"
            SELECT id, username, email, locale, roles, delete_at
            FROM users
            WHERE delete_at = 0
              AND ' ' || roles || ' ' LIKE $1
            ORDER BY username
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(Self::role_pattern(SYSTEM_ADMIN_ROLE_ID))
        .bind(page.limit())
        .bind(page.offset())
        .map(|row: sqlx::postgres::PgRow| User {
            id: row.get("id"),
            username: row.get("username"),
            email: row.get("email"),
            locale: row.get("locale"),
            roles: UserRole::parse_list(row.get("roles")),
            delete_at: row.get("delete_at"),
        })
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            error!("Database error listing system admins: {}", e);
            AppError::AdminLookup(format!("Failed to fetch administrators: {}", e))
        })?;

        Ok(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_pattern() {
        assert_eq!(
            PgUserStore::role_pattern(SYSTEM_ADMIN_ROLE_ID),
            "% system_admin %"
        );
    }

    #[tokio::test]
    #[ignore] // Requires database
    async fn test_list_admins_first_page() {
        let url = std::env::var("DATABASE_URL")
            .unwrap_or_else(|_| "postgresql://localhost/seatguard".to_string());
        let pool = PgPool::connect(&url).await.unwrap();
        let store = PgUserStore::new(pool);

        let admins = store.list_admins(&Pagination::default()).await.unwrap();
        assert!(admins.len() <= 100);
        assert!(admins.iter().all(|u| u.is_active() && u.is_system_admin()));
    }
}
