//! Actor execution loop and task lifecycle.
//!
//! Each actor is two tasks: an outer task owned by the parent's scope, and an
//! inner task running the behavior loop. The outer task observes how the inner
//! one ended (including panics), then closes the mailbox and shuts down the
//! actor's own scope, so teardown runs on every exit path.

use std::sync::Arc;

use tokio::task::{JoinError, JoinHandle};

use crate::actor_ref::ActorRef;
use crate::behavior::{Behavior, BehaviorKind, ReceiveFn};
use crate::config::ActorSystemConfig;
use crate::context::ActorContext;
use crate::error::{ActorError, Result};
use crate::mailbox::{Mailbox, MailboxReceiver};
use crate::scope::Scope;

/// How an actor ended without failing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActorExit {
	/// The behavior returned `stopped()`.
	Stopped,
	/// The mailbox was closed and drained, e.g. a sibling router worker stopped.
	MailboxClosed,
	/// An ancestor stopped, or the system shut down.
	Cancelled,
}

/// Who else reads from an actor's mailbox.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Inbox {
	/// Only this actor; pending messages are dropped at teardown.
	Owned,
	/// Shared with sibling router workers, which may still drain it.
	Shared,
}

enum Resolved<T> {
	Receive(Arc<ReceiveFn<T>>),
	Exit(ActorExit),
}

/// Spawns one actor under `parent` and returns its ref and task handle.
pub(crate) fn spawn_actor<T>(
	parent: &Scope,
	name: String,
	path: String,
	behavior: Behavior<T>,
	config: Arc<ActorSystemConfig>,
) -> (ActorRef<T>, JoinHandle<Result<ActorExit>>)
where
	T: Send + 'static,
{
	let mailbox = Mailbox::unbounded();
	let actor_ref = ActorRef::new(mailbox.sender());
	let ctx = ActorContext::new(actor_ref.clone(), name, path, parent.child(), config);
	tracing::debug!(actor = %ctx.path(), "actor.spawn");
	let task = parent.spawn(supervise(ctx, mailbox.receiver(), behavior, Inbox::Owned));
	(actor_ref, task)
}

/// Runs one actor to completion, then tears down its mailbox and descendants.
pub(crate) async fn supervise<T>(ctx: ActorContext<T>, rx: MailboxReceiver<T>, behavior: Behavior<T>, inbox: Inbox) -> Result<ActorExit>
where
	T: Send + 'static,
{
	let outcome = match crate::spawn::spawn(run_behavior(ctx.clone(), rx.clone(), behavior)).await {
		Ok(outcome) => outcome,
		Err(err) => Err(join_error(err)),
	};

	rx.close();
	let pending = rx.len();
	if inbox == Inbox::Owned {
		rx.clear();
	}
	ctx.scope().shutdown().await;

	match &outcome {
		Ok(exit) => tracing::debug!(actor = %ctx.path(), exit = ?exit, pending, "actor.exit"),
		Err(err) => tracing::warn!(actor = %ctx.path(), error = %err, pending, "actor.failed"),
	}
	outcome
}

/// Drives the behavior state machine until it stops, fails, or is cancelled.
pub(crate) async fn run_behavior<T>(ctx: ActorContext<T>, rx: MailboxReceiver<T>, initial: Behavior<T>) -> Result<ActorExit>
where
	T: Send + 'static,
{
	let mut handler = match resolve(&ctx, initial).await? {
		Resolved::Receive(handler) => handler,
		Resolved::Exit(exit) => return Ok(exit),
	};

	loop {
		let msg = tokio::select! {
			biased;
			_ = ctx.scope().cancelled() => return Ok(ActorExit::Cancelled),
			msg = rx.recv() => match msg {
				Some(msg) => msg,
				None => return Ok(ActorExit::MailboxClosed),
			},
		};

		let next = tokio::select! {
			biased;
			_ = ctx.scope().cancelled() => return Ok(ActorExit::Cancelled),
			res = handler(ctx.clone(), msg) => res.map_err(ActorError::Behavior)?,
		};
		if next.is_same() {
			continue;
		}

		handler = match resolve(&ctx, next).await? {
			Resolved::Receive(handler) => handler,
			Resolved::Exit(exit) => return Ok(exit),
		};
	}
}

/// Resolves a behavior to a receive handler, running any setup chain on the way.
///
/// Callers handle `same()` returned by a receive handler before resolving, so
/// reaching `same()` here means there is nothing installed to keep.
async fn resolve<T>(ctx: &ActorContext<T>, mut next: Behavior<T>) -> Result<Resolved<T>>
where
	T: Send + 'static,
{
	loop {
		match next.into_kind() {
			BehaviorKind::Setup(init) => {
				next = tokio::select! {
					biased;
					_ = ctx.scope().cancelled() => return Ok(Resolved::Exit(ActorExit::Cancelled)),
					res = init(ctx.clone()) => res.map_err(ActorError::Behavior)?,
				};
			}
			BehaviorKind::Receive(handler) => return Ok(Resolved::Receive(handler)),
			BehaviorKind::Stopped => return Ok(Resolved::Exit(ActorExit::Stopped)),
			BehaviorKind::Same => return Err(ActorError::InvalidBehaviorTransition),
		}
	}
}

pub(crate) fn join_error(err: JoinError) -> ActorError {
	if err.is_panic() {
		let msg = join_error_panic_message(err).unwrap_or_else(|| "non-string panic payload".to_string());
		ActorError::Panicked(msg)
	} else {
		ActorError::JoinFailed(err.to_string())
	}
}

/// Extracts the panic payload text from a join error, if the task panicked with one.
pub(crate) fn join_error_panic_message(err: JoinError) -> Option<String> {
	let payload = err.try_into_panic().ok()?;
	if let Some(s) = payload.downcast_ref::<&'static str>() {
		return Some((*s).to_string());
	}
	payload.downcast_ref::<String>().cloned()
}
