use std::future::Future;

use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tokio_util::task::TaskTracker;

/// One node of the cancellation tree.
///
/// Cancellation flows down through child tokens; joining flows up because a
/// task tracked by this node only completes after shutting down its own node.
#[derive(Debug, Clone)]
pub(crate) struct Scope {
	cancel: CancellationToken,
	tasks: TaskTracker,
}

impl Scope {
	/// Creates the top node of a fresh tree.
	pub fn root() -> Self {
		Self {
			cancel: CancellationToken::new(),
			tasks: TaskTracker::new(),
		}
	}

	/// Creates a child node cancelled whenever this node is.
	pub fn child(&self) -> Self {
		Self {
			cancel: self.cancel.child_token(),
			tasks: TaskTracker::new(),
		}
	}

	/// Returns true when cancellation is requested.
	pub fn is_cancelled(&self) -> bool {
		self.cancel.is_cancelled()
	}

	/// Requests cancellation of this node and every descendant.
	pub fn cancel(&self) {
		self.cancel.cancel();
	}

	/// Future resolving when cancellation is requested.
	pub async fn cancelled(&self) {
		self.cancel.cancelled().await;
	}

	/// Spawns a task owned by this node.
	pub fn spawn<F>(&self, fut: F) -> JoinHandle<F::Output>
	where
		F: Future + Send + 'static,
		F::Output: Send + 'static,
	{
		tracing::trace!(pending = self.tasks.len(), "actor.scope.spawn");
		self.tasks.spawn_on(fut, &crate::spawn::runtime_handle())
	}

	/// Waits for every task owned by this node without requesting cancellation.
	pub async fn join(&self) {
		self.tasks.close();
		self.tasks.wait().await;
	}

	/// Cancels this node, then waits for every task it owns.
	pub async fn shutdown(&self) {
		self.cancel();
		self.join().await;
	}
}
