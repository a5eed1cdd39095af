use std::sync::Arc;

use tokio::task::JoinHandle;

use crate::actor_ref::ActorRef;
use crate::behavior::Behavior;
use crate::config::ActorSystemConfig;
use crate::error::{ActorError, Result};
use crate::runtime::{ActorExit, join_error, spawn_actor};
use crate::scope::Scope;

/// Owner of one actor tree.
///
/// Starts the root actor at the top of a fresh cancellation tree. The tree
/// lives until [`shutdown`](Self::shutdown) or [`terminated`](Self::terminated)
/// is awaited, or until the handle is dropped, which cancels it without waiting.
pub struct ActorSystem<T> {
	root: ActorRef<T>,
	scope: Scope,
	config: Arc<ActorSystemConfig>,
	task: Option<JoinHandle<Result<ActorExit>>>,
}

impl<T> ActorSystem<T>
where
	T: Send + 'static,
{
	/// Starts `behavior` as the root actor with default configuration.
	pub fn new(behavior: Behavior<T>) -> Self {
		Self::with_config(ActorSystemConfig::default(), behavior)
	}

	/// Starts `behavior` as the root actor, named and configured by `config`.
	pub fn with_config(config: ActorSystemConfig, behavior: Behavior<T>) -> Self {
		let config = Arc::new(config);
		let scope = Scope::root();
		let name = config.name.clone();
		let path = format!("/{name}");
		tracing::info!(system = %name, "actor.system.start");
		let (root, task) = spawn_actor(&scope, name, path, behavior, Arc::clone(&config));
		Self {
			root,
			scope,
			config,
			task: Some(task),
		}
	}

	/// Ref to the root actor.
	pub fn root(&self) -> &ActorRef<T> {
		&self.root
	}

	/// System name; also the root actor's name and the first path segment.
	pub fn name(&self) -> &str {
		&self.config.name
	}

	/// Configuration shared with every actor in the tree.
	pub fn config(&self) -> &ActorSystemConfig {
		&self.config
	}

	/// Spawns another top-level actor, a sibling of the root, at `/<system>/<name>`.
	pub fn spawn<U>(&self, name: impl Into<String>, behavior: Behavior<U>) -> ActorRef<U>
	where
		U: Send + 'static,
	{
		let name = name.into();
		let path = format!("/{}/{name}", self.config.name);
		spawn_actor(&self.scope, name, path, behavior, Arc::clone(&self.config)).0
	}

	/// Waits for the root actor to end on its own, then stops everything else in
	/// the tree and returns the root actor's result.
	pub async fn terminated(mut self) -> Result<ActorExit> {
		let outcome = self.join_root().await;
		self.scope.shutdown().await;
		tracing::info!(system = %self.config.name, "actor.system.terminated");
		outcome
	}

	/// Cancels the whole tree, waits for every actor to finish, and returns the
	/// root actor's result.
	pub async fn shutdown(mut self) -> Result<ActorExit> {
		self.scope.cancel();
		let outcome = self.join_root().await;
		self.scope.join().await;
		tracing::info!(system = %self.config.name, "actor.system.shutdown");
		outcome
	}

	async fn join_root(&mut self) -> Result<ActorExit> {
		match self.task.take() {
			Some(task) => task.await.map_err(join_error)?,
			None => Err(ActorError::JoinFailed("root actor already joined".to_string())),
		}
	}
}

impl<T> Drop for ActorSystem<T> {
	fn drop(&mut self) {
		self.scope.cancel();
	}
}
