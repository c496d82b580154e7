use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use super::dispatch::{
    BroadcastDispatcher, DispatchOptions, DispatchOutcome, JobQueue, MessagePayload, QueueError,
    Recipient,
};
use super::matching::{select_recipients, BroadcastCriteria};
use super::preferences::{
    AgentDirectory, AgentId, BroadcastCategory, CoverageRepository, PreferenceRepository,
    PriceError, RepositoryError,
};

/// Inbound broadcast submission.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BroadcastRequest {
    pub category: BroadcastCategory,
    pub subject: String,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub criteria: Option<BroadcastCriteria>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reply_to: Option<String>,
    #[serde(default)]
    pub send_copy_to_self: bool,
    #[serde(default)]
    pub preview_only: bool,
}

/// Outcome summary returned to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BroadcastResponse {
    pub success: bool,
    pub recipient_count: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub queued: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Error raised by the broadcast service.
#[derive(Debug, thiserror::Error)]
pub enum BroadcastError {
    #[error("subject must not be empty")]
    EmptySubject,
    #[error("message must not be empty")]
    EmptyMessage,
    #[error(transparent)]
    Price(#[from] PriceError),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
    #[error(transparent)]
    Queue(#[from] QueueError),
}

/// Service composing the preference store, coverage store, agent directory,
/// and dispatcher into the broadcast operation.
pub struct BroadcastService<P, C, D, Q> {
    preferences: Arc<P>,
    coverage: Arc<C>,
    directory: Arc<D>,
    dispatcher: BroadcastDispatcher<Q>,
}

impl<P, C, D, Q> BroadcastService<P, C, D, Q>
where
    P: PreferenceRepository + 'static,
    C: CoverageRepository + 'static,
    D: AgentDirectory + 'static,
    Q: JobQueue + 'static,
{
    pub fn new(preferences: Arc<P>, coverage: Arc<C>, directory: Arc<D>, queue: Arc<Q>) -> Self {
        Self {
            preferences,
            coverage,
            directory,
            dispatcher: BroadcastDispatcher::new(queue),
        }
    }

    /// Match recipients for one broadcast, then either report the candidate
    /// count (`preview_only`) or queue the delivery batch.
    pub fn broadcast(
        &self,
        sender: &AgentId,
        request: BroadcastRequest,
    ) -> Result<BroadcastResponse, BroadcastError> {
        validate_request(&request)?;
        let criteria = request.criteria.clone().unwrap_or_default();
        criteria.validate()?;

        let all_preferences = self.preferences.all()?;
        let coverage_rows = if criteria.has_geography() {
            self.coverage.all()?
        } else {
            Vec::new()
        };

        let matched = select_recipients(
            sender,
            request.category,
            &criteria,
            &all_preferences,
            &coverage_rows,
        );
        let recipient_count = matched.len();

        if request.preview_only {
            return Ok(BroadcastResponse {
                success: true,
                recipient_count,
                queued: None,
                message: Some(format!(
                    "{recipient_count} agent(s) currently match these criteria"
                )),
            });
        }

        if matched.is_empty() {
            return Ok(BroadcastResponse {
                success: true,
                recipient_count: 0,
                queued: Some(0),
                message: Some("no recipients matched the selected criteria".to_string()),
            });
        }

        // Failed directory lookups drop out of the batch; the rest proceeds.
        let mut recipients = Vec::with_capacity(matched.len());
        let mut unresolved = 0usize;
        for agent_id in &matched {
            match self.directory.email_for(agent_id) {
                Ok(Some(email)) => recipients.push(Recipient {
                    agent_id: agent_id.clone(),
                    email,
                }),
                Ok(None) => {
                    unresolved += 1;
                    warn!(agent = %agent_id.0, "matched agent has no directory address");
                }
                Err(err) => {
                    unresolved += 1;
                    warn!(agent = %agent_id.0, error = %err, "directory lookup failed");
                }
            }
        }

        let sender_email = if request.send_copy_to_self {
            match self.directory.email_for(sender) {
                Ok(address) => address,
                Err(err) => {
                    warn!(agent = %sender.0, error = %err, "sender address lookup failed; skipping copy");
                    None
                }
            }
        } else {
            None
        };

        let payload = MessagePayload {
            subject: request.subject.clone(),
            body: request.message.clone(),
            reply_to: request.reply_to.clone(),
        };
        let options = DispatchOptions {
            send_copy_to_self: request.send_copy_to_self,
            sender_email,
        };

        let outcome = self.dispatcher.enqueue(&recipients, &payload, &options)?;
        let queued = match outcome {
            DispatchOutcome::NoRecipients => 0,
            DispatchOutcome::Queued { recipients, .. } => recipients,
        };

        info!(
            category = request.category.label(),
            recipient_count, queued, "broadcast processed"
        );

        let message = if unresolved > 0 {
            Some(format!(
                "{unresolved} matched agent(s) had no resolvable address and were skipped"
            ))
        } else {
            None
        };

        Ok(BroadcastResponse {
            success: true,
            recipient_count,
            queued: Some(queued),
            message,
        })
    }
}

fn validate_request(request: &BroadcastRequest) -> Result<(), BroadcastError> {
    if request.subject.trim().is_empty() {
        return Err(BroadcastError::EmptySubject);
    }
    if request.message.trim().is_empty() {
        return Err(BroadcastError::EmptyMessage);
    }
    Ok(())
}
