use std::collections::VecDeque;
use std::sync::Arc;

use parking_lot::Mutex;
use tokio::sync::Notify;

/// Capacity mode for a mailbox.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum MailboxKind {
	/// Unbounded FIFO queue; sends never wait.
	Unbounded,
	/// Single handoff slot: the first accepted message seals the mailbox.
	Handoff,
}

/// Mailbox send error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum MailboxSendError {
	/// Mailbox is closed.
	Closed,
}

struct MailboxState<T> {
	queue: VecDeque<T>,
	closed: bool,
}

struct MailboxInner<T> {
	kind: MailboxKind,
	state: Mutex<MailboxState<T>>,
	notify_recv: Notify,
}

/// Multi-producer mailbox sender.
pub(crate) struct MailboxSender<T> {
	inner: Arc<MailboxInner<T>>,
}

/// Mailbox receiver. Cloned receivers compete for messages.
pub(crate) struct MailboxReceiver<T> {
	inner: Arc<MailboxInner<T>>,
}

/// Actor message queue shared by any number of senders and receivers.
///
/// The lock guards only queue bookkeeping and is never held across an await.
pub(crate) struct Mailbox<T> {
	inner: Arc<MailboxInner<T>>,
}

impl<T> Clone for MailboxSender<T> {
	fn clone(&self) -> Self {
		Self {
			inner: Arc::clone(&self.inner),
		}
	}
}

impl<T> Clone for MailboxReceiver<T> {
	fn clone(&self) -> Self {
		Self {
			inner: Arc::clone(&self.inner),
		}
	}
}

impl<T> Mailbox<T> {
	fn with_kind(kind: MailboxKind) -> Self {
		Self {
			inner: Arc::new(MailboxInner {
				kind,
				state: Mutex::new(MailboxState {
					queue: VecDeque::new(),
					closed: false,
				}),
				notify_recv: Notify::new(),
			}),
		}
	}

	/// Creates an unbounded FIFO mailbox.
	pub fn unbounded() -> Self {
		Self::with_kind(MailboxKind::Unbounded)
	}

	/// Creates a single-delivery mailbox for replies.
	pub fn handoff() -> Self {
		Self::with_kind(MailboxKind::Handoff)
	}

	/// Returns a sender handle.
	pub fn sender(&self) -> MailboxSender<T> {
		MailboxSender {
			inner: Arc::clone(&self.inner),
		}
	}

	/// Returns a receiver handle.
	pub fn receiver(&self) -> MailboxReceiver<T> {
		MailboxReceiver {
			inner: Arc::clone(&self.inner),
		}
	}
}

impl<T> MailboxSender<T> {
	/// Enqueues one message without waiting.
	pub fn send(&self, msg: T) -> Result<(), MailboxSendError> {
		let mut state = self.inner.state.lock();
		if state.closed {
			return Err(MailboxSendError::Closed);
		}
		state.queue.push_back(msg);
		if self.inner.kind == MailboxKind::Handoff {
			state.closed = true;
		}
		drop(state);
		self.inner.notify_recv.notify_one();
		Ok(())
	}

	/// Returns `true` once sends are refused.
	pub fn is_closed(&self) -> bool {
		self.inner.state.lock().closed
	}

	/// Returns `true` if both senders feed the same mailbox.
	pub fn same_mailbox(&self, other: &Self) -> bool {
		Arc::ptr_eq(&self.inner, &other.inner)
	}

	/// Stable address of the underlying mailbox, for hashing.
	pub fn addr(&self) -> usize {
		Arc::as_ptr(&self.inner) as *const () as usize
	}

	/// Returns the mailbox capacity mode.
	pub fn kind(&self) -> MailboxKind {
		self.inner.kind
	}
}

impl<T> MailboxReceiver<T> {
	/// Receives one message. Returns `None` once the mailbox is closed and drained.
	///
	/// Cancel-safe: a message is only removed from the queue by a call that returns it.
	/// Each call spends tokio's cooperative budget, so a receiver whose queue never
	/// empties still yields to the scheduler.
	pub async fn recv(&self) -> Option<T> {
		tokio::task::consume_budget().await;
		loop {
			// Register before checking state so neither `notify_one` from a send
			// nor `notify_waiters` from a close can slip between check and await.
			let notified = self.inner.notify_recv.notified();
			tokio::pin!(notified);
			notified.as_mut().enable();

			{
				let mut state = self.inner.state.lock();
				if let Some(msg) = state.queue.pop_front() {
					return Some(msg);
				}
				if state.closed {
					return None;
				}
			}
			notified.await;
		}
	}

	/// Refuses further sends. Already queued messages stay receivable.
	pub fn close(&self) {
		self.inner.state.lock().closed = true;
		self.inner.notify_recv.notify_waiters();
	}

	/// Drops every queued message.
	pub fn clear(&self) {
		let drained = std::mem::take(&mut self.inner.state.lock().queue);
		drop(drained);
	}

	/// Returns current queue length.
	pub fn len(&self) -> usize {
		self.inner.state.lock().queue.len()
	}
}
