use std::time::Duration;

use crate::actor_ref::ActorRef;
use crate::error::{ActorError, Result};
use crate::mailbox::{Mailbox, MailboxReceiver};

/// Sends a request built around a one-shot reply ref and waits for the reply.
///
/// `build` receives a fresh [`ActorRef`] that accepts exactly one message, and
/// returns the request to deliver to `target`. The call resolves with the first
/// reply, or fails with [`ActorError::AskTimeout`] if none arrives within
/// `timeout`. Once the call returns (or its future is dropped) the reply ref is
/// closed, so late replies fail with [`ActorError::MailboxClosed`].
///
/// Nothing is sent until the returned future is first polled. To have a request
/// in flight while doing other work, drive both together, e.g. with `tokio::join!`.
pub async fn ask<T, R, F>(target: &ActorRef<T>, timeout: Duration, build: F) -> Result<R>
where
	F: FnOnce(ActorRef<R>) -> T,
{
	let mailbox = Mailbox::handoff();
	let slot = ReplySlot(mailbox.receiver());
	target.tell(build(ActorRef::new(mailbox.sender())))?;

	match tokio::time::timeout(timeout, slot.0.recv()).await {
		Ok(Some(reply)) => Ok(reply),
		Ok(None) => Err(ActorError::MailboxClosed),
		Err(_) => {
			tracing::debug!(timeout = ?timeout, "actor.ask.timeout");
			Err(ActorError::AskTimeout { timeout })
		}
	}
}

/// Closes and empties the reply mailbox on every exit path.
struct ReplySlot<R>(MailboxReceiver<R>);

impl<R> Drop for ReplySlot<R> {
	fn drop(&mut self) {
		self.0.close();
		self.0.clear();
	}
}
