//! Delivery-job construction and the atomic batch handoff to the queue.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::info;
use validator::ValidateEmail;

use super::preferences::AgentId;

/// One outbound delivery attempt. Immutable once constructed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BroadcastJob {
    pub recipient_email: String,
    pub subject: String,
    pub body: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reply_to: Option<String>,
    pub is_sender_copy: bool,
}

/// Outbound queue contract: the whole batch queues or none of it does.
pub trait JobQueue: Send + Sync {
    fn submit(&self, jobs: Vec<BroadcastJob>) -> Result<(), QueueError>;
}

/// Queue submission failure; fatal for the call, the caller decides whether
/// to retry the whole batch.
#[derive(Debug, thiserror::Error)]
pub enum QueueError {
    #[error("job queue unavailable: {0}")]
    Unavailable(String),
    #[error("job queue rejected the batch: {0}")]
    Rejected(String),
}

/// A matched recipient resolved to a delivery address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Recipient {
    pub agent_id: AgentId,
    pub email: String,
}

/// The caller's message, shared by every job in the batch.
#[derive(Debug, Clone)]
pub struct MessagePayload {
    pub subject: String,
    pub body: String,
    pub reply_to: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct DispatchOptions {
    pub send_copy_to_self: bool,
    /// Address for the sender copy; without one the copy is skipped.
    pub sender_email: Option<String>,
}

/// Result of one batch enqueue. An empty match is a normal outcome, not an
/// error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchOutcome {
    NoRecipients,
    Queued {
        recipients: usize,
        sender_copy: bool,
    },
}

/// Builds the per-recipient job batch and submits it in one shot.
pub struct BroadcastDispatcher<Q> {
    queue: Arc<Q>,
}

impl<Q> BroadcastDispatcher<Q>
where
    Q: JobQueue + 'static,
{
    pub fn new(queue: Arc<Q>) -> Self {
        Self { queue }
    }

    /// Produce one job per recipient, plus the optional labeled sender copy,
    /// and submit the whole batch at once.
    ///
    /// An ill-formed reply-to address is dropped from every job rather than
    /// failing the broadcast.
    pub fn enqueue(
        &self,
        recipients: &[Recipient],
        message: &MessagePayload,
        options: &DispatchOptions,
    ) -> Result<DispatchOutcome, QueueError> {
        if recipients.is_empty() {
            return Ok(DispatchOutcome::NoRecipients);
        }

        let reply_to = message
            .reply_to
            .as_deref()
            .filter(|address| address.validate_email())
            .map(str::to_string);

        let mut jobs: Vec<BroadcastJob> = recipients
            .iter()
            .map(|recipient| BroadcastJob {
                recipient_email: recipient.email.clone(),
                subject: message.subject.clone(),
                body: message.body.clone(),
                reply_to: reply_to.clone(),
                is_sender_copy: false,
            })
            .collect();

        let mut sender_copy = false;
        if options.send_copy_to_self {
            if let Some(sender_email) = &options.sender_email {
                jobs.push(BroadcastJob {
                    recipient_email: sender_email.clone(),
                    subject: message.subject.clone(),
                    body: annotate_sender_copy(&message.body, recipients.len()),
                    reply_to: reply_to.clone(),
                    is_sender_copy: true,
                });
                sender_copy = true;
            }
        }

        self.queue.submit(jobs)?;
        info!(
            recipients = recipients.len(),
            sender_copy, "broadcast batch queued"
        );

        Ok(DispatchOutcome::Queued {
            recipients: recipients.len(),
            sender_copy,
        })
    }
}

/// The recipient count on the copy is display-only context for the sender.
fn annotate_sender_copy(body: &str, recipient_count: usize) -> String {
    format!("Copy of your broadcast, delivered to {recipient_count} matching agent(s).\n\n{body}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingQueue {
        batches: Mutex<Vec<Vec<BroadcastJob>>>,
    }

    impl RecordingQueue {
        fn batches(&self) -> Vec<Vec<BroadcastJob>> {
            self.batches.lock().expect("queue mutex poisoned").clone()
        }
    }

    impl JobQueue for RecordingQueue {
        fn submit(&self, jobs: Vec<BroadcastJob>) -> Result<(), QueueError> {
            self.batches.lock().expect("queue mutex poisoned").push(jobs);
            Ok(())
        }
    }

    struct FailingQueue;

    impl JobQueue for FailingQueue {
        fn submit(&self, _jobs: Vec<BroadcastJob>) -> Result<(), QueueError> {
            Err(QueueError::Unavailable("connection refused".to_string()))
        }
    }

    fn recipients(count: usize) -> Vec<Recipient> {
        (0..count)
            .map(|index| Recipient {
                agent_id: AgentId(format!("agent-{index}")),
                email: format!("agent-{index}@brokerage.example"),
            })
            .collect()
    }

    fn message(reply_to: Option<&str>) -> MessagePayload {
        MessagePayload {
            subject: "Buyer looking in Cambridge".to_string(),
            body: "Pre-approved buyer, three beds, $600k.".to_string(),
            reply_to: reply_to.map(str::to_string),
        }
    }

    #[test]
    fn one_job_per_recipient() {
        let queue = Arc::new(RecordingQueue::default());
        let dispatcher = BroadcastDispatcher::new(queue.clone());

        let outcome = dispatcher
            .enqueue(&recipients(3), &message(None), &DispatchOptions::default())
            .expect("batch queues");

        assert_eq!(
            outcome,
            DispatchOutcome::Queued {
                recipients: 3,
                sender_copy: false
            }
        );
        let batches = queue.batches();
        assert_eq!(batches.len(), 1);
        assert_eq!(batches[0].len(), 3);
        assert!(batches[0].iter().all(|job| !job.is_sender_copy));
    }

    #[test]
    fn sender_copy_is_labeled_and_annotated() {
        let queue = Arc::new(RecordingQueue::default());
        let dispatcher = BroadcastDispatcher::new(queue.clone());
        let options = DispatchOptions {
            send_copy_to_self: true,
            sender_email: Some("sender@brokerage.example".to_string()),
        };

        dispatcher
            .enqueue(&recipients(2), &message(None), &options)
            .expect("batch queues");

        let batch = queue.batches().remove(0);
        assert_eq!(batch.len(), 3);
        let copy = batch.last().expect("copy job present");
        assert!(copy.is_sender_copy);
        assert_eq!(copy.recipient_email, "sender@brokerage.example");
        assert!(copy.body.contains("2 matching agent(s)"));
        // The original body is preserved beneath the annotation.
        assert!(copy.body.contains("Pre-approved buyer"));
    }

    #[test]
    fn copy_without_sender_address_is_skipped() {
        let queue = Arc::new(RecordingQueue::default());
        let dispatcher = BroadcastDispatcher::new(queue.clone());
        let options = DispatchOptions {
            send_copy_to_self: true,
            sender_email: None,
        };

        let outcome = dispatcher
            .enqueue(&recipients(2), &message(None), &options)
            .expect("batch queues");

        assert_eq!(
            outcome,
            DispatchOutcome::Queued {
                recipients: 2,
                sender_copy: false
            }
        );
        assert_eq!(queue.batches()[0].len(), 2);
    }

    #[test]
    fn well_formed_reply_to_is_carried_on_every_job() {
        let queue = Arc::new(RecordingQueue::default());
        let dispatcher = BroadcastDispatcher::new(queue.clone());

        dispatcher
            .enqueue(
                &recipients(2),
                &message(Some("replies@brokerage.example")),
                &DispatchOptions::default(),
            )
            .expect("batch queues");

        let batch = queue.batches().remove(0);
        assert!(batch
            .iter()
            .all(|job| job.reply_to.as_deref() == Some("replies@brokerage.example")));
    }

    #[test]
    fn invalid_reply_to_is_omitted_not_fatal() {
        let queue = Arc::new(RecordingQueue::default());
        let dispatcher = BroadcastDispatcher::new(queue.clone());

        dispatcher
            .enqueue(
                &recipients(1),
                &message(Some("not-an-address")),
                &DispatchOptions::default(),
            )
            .expect("batch still queues");

        assert!(queue.batches()[0][0].reply_to.is_none());
    }

    #[test]
    fn empty_recipient_set_queues_nothing() {
        let queue = Arc::new(RecordingQueue::default());
        let dispatcher = BroadcastDispatcher::new(queue.clone());

        let outcome = dispatcher
            .enqueue(&[], &message(None), &DispatchOptions::default())
            .expect("empty match is not an error");

        assert_eq!(outcome, DispatchOutcome::NoRecipients);
        assert!(queue.batches().is_empty());
    }

    #[test]
    fn queue_failure_is_surfaced_whole_batch() {
        let dispatcher = BroadcastDispatcher::new(Arc::new(FailingQueue));

        let result = dispatcher.enqueue(&recipients(2), &message(None), &DispatchOptions::default());

        assert!(matches!(result, Err(QueueError::Unavailable(_))));
    }
}
