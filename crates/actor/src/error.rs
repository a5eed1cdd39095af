//! Error taxonomy for actor operations.

use std::time::Duration;

use thiserror::Error;

/// Errors surfaced by actor operations and actor task completion.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ActorError {
	/// `same()` was resolved with no installed behavior to keep, either as the
	/// actor's first behavior or as the output of a setup.
	#[error("`same` resolved with no current behavior to keep")]
	InvalidBehaviorTransition,

	/// No reply arrived before the ask deadline.
	#[error("no reply within {timeout:?}")]
	AskTimeout {
		/// The deadline that elapsed.
		timeout: Duration,
	},

	/// The target mailbox no longer accepts messages.
	#[error("actor mailbox closed")]
	MailboxClosed,

	/// A setup initializer or receive handler returned an error.
	#[error("behavior failed: {0:#}")]
	Behavior(anyhow::Error),

	/// A setup initializer or receive handler panicked.
	#[error("behavior panicked: {0}")]
	Panicked(String),

	/// The actor task could not be joined for a reason other than a panic.
	#[error("actor task failed to join: {0}")]
	JoinFailed(String),
}

impl ActorError {
	/// Returns `true` for errors that end an actor, as opposed to errors
	/// reported to the caller of one operation.
	pub fn is_actor_failure(&self) -> bool {
		matches!(
			self,
			Self::InvalidBehaviorTransition | Self::Behavior(_) | Self::Panicked(_) | Self::JoinFailed(_)
		)
	}
}

/// Result alias for actor operations.
pub type Result<T, E = ActorError> = std::result::Result<T, E>;
