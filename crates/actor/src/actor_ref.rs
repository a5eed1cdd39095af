use std::fmt;
use std::hash::{Hash, Hasher};

use crate::error::{ActorError, Result};
use crate::mailbox::{MailboxSendError, MailboxSender};

/// Capability to enqueue messages into one actor's mailbox.
///
/// Holding a ref does not keep the actor alive or give control over it. Once
/// the actor stops, every ref to it rejects further messages. Two refs are equal
/// when they feed the same mailbox.
pub struct ActorRef<T> {
	tx: MailboxSender<T>,
}

impl<T> ActorRef<T> {
	pub(crate) fn new(tx: MailboxSender<T>) -> Self {
		Self { tx }
	}

	/// Enqueues `msg` and returns without waiting for it to be processed.
	///
	/// Messages from one caller to one target are received in send order.
	/// Fails with [`ActorError::MailboxClosed`] once the target has stopped.
	pub fn tell(&self, msg: T) -> Result<()> {
		self.tx.send(msg).map_err(|MailboxSendError::Closed| ActorError::MailboxClosed)
	}

	/// Returns `true` once the target no longer accepts messages.
	pub fn is_closed(&self) -> bool {
		self.tx.is_closed()
	}
}

impl<T> Clone for ActorRef<T> {
	fn clone(&self) -> Self {
		Self { tx: self.tx.clone() }
	}
}

impl<T> PartialEq for ActorRef<T> {
	fn eq(&self, other: &Self) -> bool {
		self.tx.same_mailbox(&other.tx)
	}
}

impl<T> Eq for ActorRef<T> {}

impl<T> Hash for ActorRef<T> {
	fn hash<H: Hasher>(&self, state: &mut H) {
		self.tx.addr().hash(state);
	}
}

impl<T> fmt::Debug for ActorRef<T> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("ActorRef")
			.field("mailbox", &format_args!("{:#x}", self.tx.addr()))
			.field("kind", &self.tx.kind())
			.field("closed", &self.is_closed())
			.finish()
	}
}
