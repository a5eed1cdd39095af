use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use crate::actor_ref::ActorRef;
use crate::behavior::Behavior;
use crate::config::ActorSystemConfig;
use crate::error::Result;
use crate::scope::Scope;

/// Per-actor handle passed to setup initializers and receive handlers.
///
/// Carries the actor's identity and its node in the cancellation tree. Cloning
/// is cheap; every clone refers to the same actor.
pub struct ActorContext<T> {
	inner: Arc<ContextInner<T>>,
}

struct ContextInner<T> {
	self_ref: ActorRef<T>,
	name: String,
	path: String,
	scope: Scope,
	config: Arc<ActorSystemConfig>,
}

impl<T> Clone for ActorContext<T> {
	fn clone(&self) -> Self {
		Self {
			inner: Arc::clone(&self.inner),
		}
	}
}

impl<T> fmt::Debug for ActorContext<T> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("ActorContext")
			.field("path", &self.inner.path)
			.field("cancelled", &self.is_cancelled())
			.finish()
	}
}

impl<T> ActorContext<T> {
	pub(crate) fn new(self_ref: ActorRef<T>, name: String, path: String, scope: Scope, config: Arc<ActorSystemConfig>) -> Self {
		Self {
			inner: Arc::new(ContextInner {
				self_ref,
				name,
				path,
				scope,
				config,
			}),
		}
	}

	/// Ref to this actor's own mailbox. Router workers share the router's ref.
	pub fn self_ref(&self) -> &ActorRef<T> {
		&self.inner.self_ref
	}

	/// Diagnostic name given at spawn time.
	pub fn name(&self) -> &str {
		&self.inner.name
	}

	/// Slash-separated path from the system root, e.g. `/system/orders/worker`.
	pub fn path(&self) -> &str {
		&self.inner.path
	}

	/// Configuration of the owning system.
	pub fn config(&self) -> &ActorSystemConfig {
		&self.inner.config
	}

	/// Returns `true` once an ancestor (or this actor's own stop) has cancelled this actor.
	pub fn is_cancelled(&self) -> bool {
		self.inner.scope.is_cancelled()
	}

	pub(crate) fn scope(&self) -> &Scope {
		&self.inner.scope
	}

	/// Spawns a child actor and returns its ref without waiting for it to start.
	///
	/// The child is stopped, and waited for, when this actor stops.
	pub fn spawn<U>(&self, name: impl Into<String>, behavior: Behavior<U>) -> ActorRef<U>
	where
		U: Send + 'static,
	{
		let name = name.into();
		let path = format!("{}/{name}", self.inner.path);
		let (actor_ref, _task) = crate::runtime::spawn_actor(&self.inner.scope, name, path, behavior, Arc::clone(&self.inner.config));
		actor_ref
	}

	/// Spawns `pool_size` workers running `behavior` over one shared mailbox and
	/// returns the ref feeding that mailbox.
	///
	/// # Panics
	///
	/// Panics if `pool_size` is zero.
	pub fn router<U>(&self, name: impl Into<String>, pool_size: usize, behavior: Behavior<U>) -> ActorRef<U>
	where
		U: Send + 'static,
	{
		let name = name.into();
		let path = format!("{}/{name}", self.inner.path);
		crate::router::spawn_router(&self.inner.scope, name, path, pool_size, behavior, Arc::clone(&self.inner.config))
	}

	/// [`ask`](crate::ask) with the system's default timeout.
	pub async fn ask<U, R, F>(&self, target: &ActorRef<U>, build: F) -> Result<R>
	where
		F: FnOnce(ActorRef<R>) -> U,
	{
		crate::ask::ask(target, self.inner.config.ask_timeout, build).await
	}

	/// [`ask`](crate::ask) with an explicit timeout.
	pub async fn ask_with_timeout<U, R, F>(&self, target: &ActorRef<U>, timeout: Duration, build: F) -> Result<R>
	where
		F: FnOnce(ActorRef<R>) -> U,
	{
		crate::ask::ask(target, timeout, build).await
	}
}

#[cfg(test)]
impl<T> ActorContext<T> {
	/// Context backed by a fresh mailbox and a root scope, with no running actor.
	pub(crate) fn detached(name: &str) -> (Self, crate::mailbox::MailboxReceiver<T>) {
		let mailbox = crate::mailbox::Mailbox::unbounded();
		let ctx = Self::new(
			ActorRef::new(mailbox.sender()),
			name.to_string(),
			format!("/test/{name}"),
			Scope::root(),
			Arc::new(ActorSystemConfig::default()),
		);
		(ctx, mailbox.receiver())
	}
}
