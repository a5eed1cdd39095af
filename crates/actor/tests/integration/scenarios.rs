use std::time::Duration;

use pretty_assertions::assert_eq;
use tokio::sync::mpsc;
use troupe_actor::{ActorContext, ActorSystem, Behavior, receive_message, same, setup};

use crate::common::{Answer, CounterCommand, Question, collect, counter, forward_to, happy, init_tracing};

#[tokio::test(start_paused = true)]
async fn delayed_increments_are_applied_before_get_value() {
	init_tracing();
	let system = ActorSystem::new(counter(0));
	let (tx, mut rx) = mpsc::unbounded_channel();
	let sink = system.spawn("sink", forward_to(tx));

	system.root().tell(CounterCommand::Increment(1)).unwrap();
	system.root().tell(CounterCommand::Increment(1)).unwrap();
	system.root().tell(CounterCommand::GetValue(sink)).unwrap();

	assert_eq!(collect(&mut rx, 1, Duration::from_secs(5)).await, vec![2]);
}

#[tokio::test]
async fn reset_between_reads() {
	init_tracing();
	let system = ActorSystem::new(counter(0));
	let (tx, mut rx) = mpsc::unbounded_channel();
	let sink = system.spawn("sink", forward_to(tx));

	let root = system.root();
	root.tell(CounterCommand::Increment(10)).unwrap();
	root.tell(CounterCommand::GetValue(sink.clone())).unwrap();
	root.tell(CounterCommand::Reset).unwrap();
	root.tell(CounterCommand::GetValue(sink)).unwrap();

	assert_eq!(collect(&mut rx, 2, Duration::from_secs(1)).await, vec![10, 0]);
}

#[tokio::test]
async fn ask_returns_the_happy_answer() {
	let system = ActorSystem::new(happy());

	let answer = troupe_actor::ask(system.root(), Duration::from_secs(1), |reply_to| Question {
		reply_to,
		content: "Hey?".to_string(),
	})
	.await
	.unwrap();
	assert_eq!(answer, Answer("Hey? Be happy!".to_string()));
}

/// Root actor that drives two counters and a happy actor from its setup, then
/// reports every value it receives.
fn driver(report: mpsc::UnboundedSender<String>) -> Behavior<i64> {
	setup(move |ctx: ActorContext<i64>| {
		let report = report.clone();
		async move {
			let counter1 = ctx.spawn("counter1", counter(0));
			let counter2 = ctx.spawn("counter2", counter(0));
			let happy = ctx.spawn("happy", happy());

			let me = ctx.self_ref().clone();
			counter2.tell(CounterCommand::Increment(1))?;
			counter2.tell(CounterCommand::Increment(1))?;
			counter2.tell(CounterCommand::GetValue(me.clone()))?;

			counter1.tell(CounterCommand::Increment(10))?;
			counter1.tell(CounterCommand::GetValue(me.clone()))?;
			counter1.tell(CounterCommand::Reset)?;
			counter1.tell(CounterCommand::GetValue(me))?;

			let answer = ctx
				.ask(&happy, |reply_to| Question {
					reply_to,
					content: "Hey?".to_string(),
				})
				.await?;
			let _ = report.send(format!("answer: {}", answer.0));

			Ok(receive_message(move |value: i64| {
				let _ = report.send(format!("value: {value}"));
				async { Ok(same()) }
			}))
		}
	})
}

#[tokio::test(start_paused = true)]
async fn driver_sees_answer_and_all_counter_values() {
	init_tracing();
	let (tx, mut rx) = mpsc::unbounded_channel();
	let system = ActorSystem::new(driver(tx));

	let reports = collect(&mut rx, 4, Duration::from_secs(10)).await;
	assert_eq!(reports[0], "answer: Hey? Be happy!");

	// counter1 finishes long before counter2's delayed increments.
	assert_eq!(reports[1..].to_vec(), vec!["value: 10", "value: 0", "value: 2"]);

	assert_eq!(system.shutdown().await.unwrap(), troupe_actor::ActorExit::Cancelled);
}
