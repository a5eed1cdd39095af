use std::sync::Arc;

use crate::actor_ref::ActorRef;
use crate::behavior::Behavior;
use crate::config::ActorSystemConfig;
use crate::context::ActorContext;
use crate::mailbox::Mailbox;
use crate::runtime::{Inbox, supervise};
use crate::scope::Scope;

/// Spawns a pool of workers competing for messages on one shared mailbox.
///
/// Each message sent to the returned ref is handled by exactly one worker. The
/// workers live in their own scope under `parent`; once all of them have exited
/// the shared mailbox is closed and emptied.
///
/// # Panics
///
/// Panics if `pool_size` is zero.
pub(crate) fn spawn_router<T>(
	parent: &Scope,
	name: String,
	path: String,
	pool_size: usize,
	behavior: Behavior<T>,
	config: Arc<ActorSystemConfig>,
) -> ActorRef<T>
where
	T: Send + 'static,
{
	assert!(pool_size > 0, "router pool size must be > 0");

	let mailbox = Mailbox::unbounded();
	let router_ref = ActorRef::new(mailbox.sender());
	let pool = parent.child();
	tracing::debug!(router = %path, pool_size, "actor.router.spawn");

	for index in 0..pool_size {
		let ctx = ActorContext::new(
			router_ref.clone(),
			format!("{name}-{index}"),
			format!("{path}/{index}"),
			pool.child(),
			Arc::clone(&config),
		);
		pool.spawn(supervise(ctx, mailbox.receiver(), behavior.clone(), Inbox::Shared));
	}

	let rx = mailbox.receiver();
	parent.spawn(async move {
		pool.join().await;
		rx.close();
		let dropped = rx.len();
		rx.clear();
		tracing::debug!(router = %path, dropped, "actor.router.exit");
	});

	router_ref
}
