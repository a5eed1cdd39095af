use std::time::Duration;

use pretty_assertions::assert_eq;
use tokio::sync::mpsc;
use troupe_actor::{
	ActorContext, ActorError, ActorExit, ActorSystem, ActorSystemConfig, Behavior, receive_message, same, setup, stopped,
};

use crate::common::{LiveCount, collect, descendants, forward_to, init_tracing, tracked};

const DEPTH: usize = 2;
const FANOUT: usize = 3;

async fn wait_for_live(live: &LiveCount, n: usize) {
	tokio::time::timeout(Duration::from_secs(1), async {
		while live.get() != n {
			tokio::task::yield_now().await;
		}
	})
	.await
	.unwrap_or_else(|_| panic!("expected {n} live actors, have {}", live.get()));
}

/// Root that grows two tracked subtrees, then ends the way `on_message` says.
fn parent_of_subtrees<F, Fut>(live: LiveCount, on_message: F) -> Behavior<()>
where
	F: Fn(()) -> Fut + Clone + Send + Sync + 'static,
	Fut: std::future::Future<Output = troupe_actor::Transition<()>> + Send + 'static,
{
	setup(move |ctx: ActorContext<()>| {
		let live = live.clone();
		let on_message = on_message.clone();
		async move {
			ctx.spawn("left", tracked(live.clone(), DEPTH, FANOUT));
			ctx.spawn("right", tracked(live, DEPTH, FANOUT));
			Ok(receive_message(on_message))
		}
	})
}

fn subtree_total() -> usize {
	2 * (1 + descendants(DEPTH, FANOUT))
}

#[tokio::test]
async fn stop_waits_for_every_descendant() {
	init_tracing();
	let live = LiveCount::default();
	let system = ActorSystem::new(parent_of_subtrees(live.clone(), |()| async { Ok(stopped()) }));
	wait_for_live(&live, subtree_total()).await;

	system.root().tell(()).unwrap();
	assert_eq!(system.terminated().await.unwrap(), ActorExit::Stopped);
	assert_eq!(live.get(), 0);
}

#[tokio::test]
async fn handler_error_still_tears_down_children() {
	let live = LiveCount::default();
	let system = ActorSystem::new(parent_of_subtrees(live.clone(), |()| async { Err(anyhow::anyhow!("giving up")) }));
	wait_for_live(&live, subtree_total()).await;

	system.root().tell(()).unwrap();
	assert!(matches!(system.terminated().await, Err(ActorError::Behavior(_))));
	assert_eq!(live.get(), 0);
}

async fn panic_on_message(_: ()) -> troupe_actor::Transition<()> {
	panic!("root exploded")
}

#[tokio::test]
async fn panic_still_tears_down_children() {
	let live = LiveCount::default();
	let system = ActorSystem::new(parent_of_subtrees(live.clone(), panic_on_message));
	wait_for_live(&live, subtree_total()).await;

	system.root().tell(()).unwrap();
	assert!(matches!(system.terminated().await, Err(ActorError::Panicked(_))));
	assert_eq!(live.get(), 0);
}

#[tokio::test]
async fn shutdown_cancels_and_joins_the_tree() {
	let live = LiveCount::default();
	let system = ActorSystem::new(parent_of_subtrees(live.clone(), |()| async { Ok(same()) }));
	let extra = system.spawn("extra", tracked(live.clone(), 1, 2));
	wait_for_live(&live, subtree_total() + 3).await;

	assert_eq!(system.shutdown().await.unwrap(), ActorExit::Cancelled);
	assert_eq!(live.get(), 0);
	assert!(extra.is_closed());
}

#[tokio::test]
async fn child_failure_does_not_reach_the_parent() {
	let (child_tx, mut child_rx) = mpsc::unbounded_channel();
	let (sink_tx, mut sink_rx) = mpsc::unbounded_channel();

	let system = ActorSystem::new(setup(move |ctx: ActorContext<u32>| {
		let child_tx = child_tx.clone();
		let sink_tx = sink_tx.clone();
		async move {
			let child = ctx.spawn("fragile", receive_message(|_: ()| async { Err(anyhow::anyhow!("child broke")) }));
			child.tell(())?;
			let _ = child_tx.send(child);
			Ok(forward_to(sink_tx))
		}
	}));

	let child = collect(&mut child_rx, 1, Duration::from_secs(1)).await.remove(0);
	tokio::time::timeout(Duration::from_secs(1), async {
		while !child.is_closed() {
			tokio::task::yield_now().await;
		}
	})
	.await
	.unwrap();

	system.root().tell(7).unwrap();
	assert_eq!(collect(&mut sink_rx, 1, Duration::from_secs(1)).await, vec![7]);
	assert!(!system.root().is_closed());
}

#[tokio::test]
async fn paths_follow_the_spawn_tree() {
	let (tx, mut rx) = mpsc::unbounded_channel();
	let report = move |tx: mpsc::UnboundedSender<String>| {
		setup(move |ctx: ActorContext<()>| {
			let _ = tx.send(format!("{} {}", ctx.name(), ctx.path()));
			async { Ok(receive_message(|()| async { Ok(same()) })) }
		})
	};

	let nested = tx.clone();
	let system = ActorSystem::with_config(
		ActorSystemConfig::default().with_name("shop"),
		setup(move |ctx: ActorContext<()>| {
			let nested = nested.clone();
			async move {
				ctx.spawn(
					"orders",
					setup(move |ctx: ActorContext<()>| {
						let _ = nested.send(format!("{} {}", ctx.name(), ctx.path()));
						ctx.spawn("pricing", report(nested.clone()));
						async { Ok(receive_message(|()| async { Ok(same()) })) }
					}),
				);
				Ok(receive_message(|()| async { Ok(same()) }))
			}
		}),
	);
	system.spawn("audit", report(tx));

	let mut seen = collect(&mut rx, 3, Duration::from_secs(1)).await;
	seen.sort();
	assert_eq!(seen, vec!["audit /shop/audit", "orders /shop/orders", "pricing /shop/orders/pricing"]);
}
