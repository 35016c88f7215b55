use std::sync::Arc;

use thiserror::Error;
use tracing::info;

use crate::application::repos::{MessagesRepo, RepoError};
use crate::domain::contact::{ContactSubmission, ContactValidationError};
use crate::domain::entities::CustomerMessageRecord;

const SOURCE: &str = "application::contact::ContactService";

#[derive(Debug, Error)]
pub enum ContactError {
    #[error(transparent)]
    Invalid(#[from] ContactValidationError),
    #[error(transparent)]
    Repo(#[from] RepoError),
}

#[derive(Clone)]
pub struct ContactService {
    messages: Arc<dyn MessagesRepo>,
}

impl ContactService {
    pub fn new(messages: Arc<dyn MessagesRepo>) -> Self {
        Self { messages }
    }

    /// Validate and store a message. Nothing is written when validation fails.
    pub async fn submit(
        &self,
        submission: &ContactSubmission,
    ) -> Result<CustomerMessageRecord, ContactError> {
        let message = submission.validate()?;
        let stored = self.messages.create_message(message).await?;
        info!(
            target = SOURCE,
            message_id = stored.id,
            subject = %stored.subject,
            "customer message received"
        );
        Ok(stored)
    }
}
