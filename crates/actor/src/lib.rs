#![cfg_attr(test, allow(unused_crate_dependencies))]
//! In-process typed actors on tokio.
//!
//! An actor owns a private mailbox and handles one message at a time. How it
//! handles the next message is described by a [`Behavior`]; each handler call
//! returns the behavior for the message after it.
//!
//! # Main Types
//!
//! - [`ActorSystem`] - Owns one actor tree and its root actor
//! - [`ActorRef`] - Send-only handle to an actor's mailbox
//! - [`ActorContext`] - Passed to behaviors; spawns children, routers and asks
//! - [`Behavior`] - Built with [`setup`], [`receive`], [`receive_message`], [`same`], [`stopped`]
//!
//! # Lifecycle
//!
//! Actors form a tree. Stopping an actor, whether by returning [`stopped`],
//! failing, or being cancelled, stops every descendant and waits for them:
//!
//! ```text
//! /system                  root actor
//! ├── /system/orders       ctx.spawn("orders", ..)
//! │   └── /system/orders/pricing
//! └── /system/workers      ctx.router("workers", 3, ..)
//!     ├── /system/workers/0
//!     ├── /system/workers/1
//!     └── /system/workers/2
//! ```

pub mod actor_ref;
mod ask;
pub mod behavior;
pub mod config;
pub mod context;
pub mod error;
mod mailbox;
mod router;
mod runtime;
mod scope;
mod spawn;
mod system;

pub use actor_ref::ActorRef;
pub use ask::ask;
pub use behavior::{Behavior, Transition, receive, receive_message, same, setup, stopped};
pub use config::{ActorSystemConfig, DEFAULT_ASK_TIMEOUT};
pub use context::ActorContext;
pub use error::{ActorError, Result};
pub use runtime::ActorExit;
pub use system::ActorSystem;
