//! Recipient resolution
//!
//! Turns the user store's administrator list into notification recipients.
//! Only the first page is fetched; administrators beyond it are not notified.

use seatguard_core::{models::AdminRecipient, traits::Pagination, traits::UserStore, AppResult};
use std::sync::Arc;
use tracing::{debug, instrument, warn};

use crate::constants::ADMIN_PAGE_SIZE;

/// Resolves the administrators a notification goes to
pub struct RecipientResolver<U: UserStore> {
    users: Arc<U>,
    page: Pagination,
}

impl<U: UserStore> RecipientResolver<U> {
    /// Create a resolver fetching the first `ADMIN_PAGE_SIZE` administrators
    pub fn new(users: Arc<U>) -> Self {
        Self {
            users,
            page: Pagination::first(ADMIN_PAGE_SIZE),
        }
    }

    /// Override how many administrators are fetched
    pub fn with_page_size(mut self, per_page: i64) -> Self {
        self.page = Pagination::first(per_page);
        self
    }

    pub fn page_size(&self) -> i64 {
        self.page.per_page
    }

    /// Fetch the current administrator recipients
    ///
    /// # Errors
    ///
    /// Propagates the user store's error unchanged; the caller must abort
    /// the notification attempt.
    #[instrument(skip(self))]
    pub async fn resolve_admins(&self) -> AppResult<Vec<AdminRecipient>> {
        let admins = self.users.list_admins(&self.page).await?;

        if admins.len() as i64 >= self.page.per_page {
            warn!(
                "Administrator list filled the page of {}, later administrators are not notified",
                self.page.per_page
            );
        }
        debug!("Resolved {} administrator recipients", admins.len());

        Ok(admins.into_iter().map(AdminRecipient::from).collect())
    }
}
