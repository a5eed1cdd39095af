//! Behavior values: how an actor responds to its next message.
//!
//! A behavior is one of four tags. [`setup`] runs once with the actor's context
//! and yields the first real behavior; [`receive`] consumes one message and
//! yields the next behavior; [`same`] keeps whatever is installed; [`stopped`]
//! ends the actor. Only a `receive` behavior is ever installed as current.

use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use crate::context::ActorContext;

/// Boxed future returned by behavior closures.
pub(crate) type BoxFuture<T> = Pin<Box<dyn Future<Output = T> + Send + 'static>>;

/// Output of one setup or handler invocation.
pub type Transition<T> = anyhow::Result<Behavior<T>>;

pub(crate) type SetupFn<T> = dyn Fn(ActorContext<T>) -> BoxFuture<Transition<T>> + Send + Sync;
pub(crate) type ReceiveFn<T> = dyn Fn(ActorContext<T>, T) -> BoxFuture<Transition<T>> + Send + Sync;

pub(crate) enum BehaviorKind<T> {
	Setup(Arc<SetupFn<T>>),
	Receive(Arc<ReceiveFn<T>>),
	Same,
	Stopped,
}

/// State-transition description of an actor, parameterized over its message type.
///
/// Cloning is cheap and shares the underlying closures, so one behavior can
/// seed every worker of a router.
pub struct Behavior<T> {
	kind: BehaviorKind<T>,
}

impl<T> Behavior<T> {
	/// Returns `true` for the keep-current sentinel.
	pub fn is_same(&self) -> bool {
		matches!(self.kind, BehaviorKind::Same)
	}

	/// Returns `true` for the stop sentinel.
	pub fn is_stopped(&self) -> bool {
		matches!(self.kind, BehaviorKind::Stopped)
	}

	pub(crate) fn into_kind(self) -> BehaviorKind<T> {
		self.kind
	}

	fn tag(&self) -> &'static str {
		match self.kind {
			BehaviorKind::Setup(_) => "setup",
			BehaviorKind::Receive(_) => "receive",
			BehaviorKind::Same => "same",
			BehaviorKind::Stopped => "stopped",
		}
	}
}

impl<T> Clone for Behavior<T> {
	fn clone(&self) -> Self {
		let kind = match &self.kind {
			BehaviorKind::Setup(init) => BehaviorKind::Setup(Arc::clone(init)),
			BehaviorKind::Receive(handler) => BehaviorKind::Receive(Arc::clone(handler)),
			BehaviorKind::Same => BehaviorKind::Same,
			BehaviorKind::Stopped => BehaviorKind::Stopped,
		};
		Self { kind }
	}
}

impl<T> fmt::Debug for Behavior<T> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_tuple("Behavior").field(&self.tag()).finish()
	}
}

/// Builds a behavior from an initializer that runs once, before any message is
/// received, and yields the behavior to continue with.
pub fn setup<T, F, Fut>(init: F) -> Behavior<T>
where
	T: Send + 'static,
	F: Fn(ActorContext<T>) -> Fut + Send + Sync + 'static,
	Fut: Future<Output = Transition<T>> + Send + 'static,
{
	let init: Arc<SetupFn<T>> = Arc::new(move |ctx: ActorContext<T>| -> BoxFuture<Transition<T>> { Box::pin(init(ctx)) });
	Behavior {
		kind: BehaviorKind::Setup(init),
	}
}

/// Builds a behavior that handles one message with access to the actor context.
pub fn receive<T, F, Fut>(handler: F) -> Behavior<T>
where
	T: Send + 'static,
	F: Fn(ActorContext<T>, T) -> Fut + Send + Sync + 'static,
	Fut: Future<Output = Transition<T>> + Send + 'static,
{
	let handler: Arc<ReceiveFn<T>> =
		Arc::new(move |ctx: ActorContext<T>, msg: T| -> BoxFuture<Transition<T>> { Box::pin(handler(ctx, msg)) });
	Behavior {
		kind: BehaviorKind::Receive(handler),
	}
}

/// Like [`receive`], for handlers that only need the message.
pub fn receive_message<T, F, Fut>(handler: F) -> Behavior<T>
where
	T: Send + 'static,
	F: Fn(T) -> Fut + Send + Sync + 'static,
	Fut: Future<Output = Transition<T>> + Send + 'static,
{
	receive(move |_ctx, msg| handler(msg))
}

/// Keeps the currently installed behavior.
pub fn same<T>() -> Behavior<T> {
	Behavior { kind: BehaviorKind::Same }
}

/// Stops the actor.
pub fn stopped<T>() -> Behavior<T> {
	Behavior {
		kind: BehaviorKind::Stopped,
	}
}
