use std::future::Future;
use std::sync::OnceLock;

use tokio::task::JoinHandle;

/// Returns the ambient tokio runtime handle, or a lazily-built global runtime
/// when called from outside of one.
pub(crate) fn runtime_handle() -> tokio::runtime::Handle {
	if let Ok(handle) = tokio::runtime::Handle::try_current() {
		return handle;
	}

	static GLOBAL_RT: OnceLock<tokio::runtime::Runtime> = OnceLock::new();
	let runtime = GLOBAL_RT.get_or_init(|| {
		tokio::runtime::Builder::new_multi_thread()
			.enable_all()
			.thread_name("troupe-actor-global")
			.build()
			.expect("failed to build troupe-actor global tokio runtime")
	});
	runtime.handle().clone()
}

/// Spawns an untracked task on the actor runtime handle.
pub(crate) fn spawn<F>(fut: F) -> JoinHandle<F::Output>
where
	F: Future + Send + 'static,
	F::Output: Send + 'static,
{
	tracing::trace!("actor.task.spawn");
	runtime_handle().spawn(fut)
}
