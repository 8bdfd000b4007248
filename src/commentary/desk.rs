//! Fire-and-forget commentary dispatch.

use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::sync::Arc;
use std::thread::JoinHandle;
use std::time::Duration;

use super::Commentator;
use crate::core::{CommentaryError, GameState};

/// Sequence number of a commentary request.
pub type Ticket = u64;

/// A finished commentary request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CommentaryReply {
    pub ticket: Ticket,
    pub text: String,
    /// True when the commentator failed and the fallback text was used.
    pub fallback: bool,
}

/// One queued request for the worker.
struct Job {
    ticket: Ticket,
    snapshot: GameState,
    action: String,
}

/// Runs a [`Commentator`] off the game thread.
///
/// A single worker thread, started with the desk, takes requests in order
/// from a job channel and answers on a reply channel. The caller never waits
/// on the commentator. Dropping the desk closes the job channel; the worker
/// finishes the request it is on and exits.
pub struct CommentaryDesk {
    jobs: Sender<Job>,
    replies_tx: Sender<CommentaryReply>,
    replies: Receiver<CommentaryReply>,
    fallback: String,
    worker: JoinHandle<()>,
    next_ticket: Ticket,
    in_flight: usize,
}

impl CommentaryDesk {
    pub fn new(commentator: Arc<dyn Commentator>, fallback: impl Into<String>) -> Self {
        let fallback = fallback.into();
        let (jobs, job_rx) = mpsc::channel::<Job>();
        let (replies_tx, replies) = mpsc::channel::<CommentaryReply>();

        let worker_fallback = fallback.clone();
        let worker_tx = replies_tx.clone();
        let worker = std::thread::spawn(move || {
            for job in job_rx {
                let reply = answer(commentator.as_ref(), job, &worker_fallback);
                if worker_tx.send(reply).is_err() {
                    break;
                }
            }
            tracing::trace!("commentary worker stopped");
        });

        Self {
            jobs,
            replies_tx,
            replies,
            fallback,
            worker,
            next_ticket: 0,
            in_flight: 0,
        }
    }

    /// Queue a request and return its ticket immediately.
    pub fn request(&mut self, snapshot: GameState, action: impl Into<String>) -> Ticket {
        let ticket = self.next_ticket;
        self.next_ticket += 1;
        self.in_flight += 1;

        let job = Job {
            ticket,
            snapshot,
            action: action.into(),
        };
        if self.jobs.send(job).is_err() {
            // The worker is gone (the commentator panicked); answer here.
            tracing::warn!(ticket, "commentary worker unavailable, using fallback");
            let _ = self.replies_tx.send(CommentaryReply {
                ticket,
                text: self.fallback.clone(),
                fallback: true,
            });
        } else {
            tracing::trace!(ticket, "commentary requested");
        }
        ticket
    }

    /// Take a reply if one has arrived.
    pub fn try_recv(&mut self) -> Option<CommentaryReply> {
        let reply = self.replies.try_recv().ok()?;
        self.in_flight = self.in_flight.saturating_sub(1);
        Some(reply)
    }

    /// Wait up to `timeout` for the next reply.
    pub fn recv_timeout(&mut self, timeout: Duration) -> Option<CommentaryReply> {
        match self.replies.recv_timeout(timeout) {
            Ok(reply) => {
                self.in_flight = self.in_flight.saturating_sub(1);
                Some(reply)
            }
            Err(RecvTimeoutError::Timeout | RecvTimeoutError::Disconnected) => None,
        }
    }

    /// Requests started but not yet received.
    #[must_use]
    pub fn in_flight(&self) -> usize {
        self.in_flight
    }
}

impl std::fmt::Debug for CommentaryDesk {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CommentaryDesk")
            .field("fallback", &self.fallback)
            .field("worker", &self.worker.thread().id())
            .field("next_ticket", &self.next_ticket)
            .field("in_flight", &self.in_flight)
            .finish_non_exhaustive()
    }
}

/// Run one job, substituting `fallback` for any failure.
fn answer(commentator: &dyn Commentator, job: Job, fallback: &str) -> CommentaryReply {
    let ticket = job.ticket;
    match non_empty(commentator.comment(&job.snapshot, &job.action)) {
        Ok(text) => CommentaryReply {
            ticket,
            text,
            fallback: false,
        },
        Err(err) => {
            tracing::warn!(ticket, %err, "commentary failed, using fallback");
            CommentaryReply {
                ticket,
                text: fallback.to_string(),
                fallback: true,
            }
        }
    }
}

/// Trim a reply; blank text counts as [`CommentaryError::Empty`].
fn non_empty(result: Result<String, CommentaryError>) -> Result<String, CommentaryError> {
    let text = result?;
    let text = text.trim();
    if text.is_empty() {
        Err(CommentaryError::Empty)
    } else {
        Ok(text.to_string())
    }
}
