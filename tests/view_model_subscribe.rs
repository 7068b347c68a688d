mod common;

use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tokio::sync::mpsc;

use common::{settle, ListState};
use listforge::observer::ObserverContext;
use listforge::view_model::{ViewModel, ViewModelOptions};

#[tokio::test(start_paused = true)]
async fn selector_fires_once_per_distinct_value() {
    let view_model = ViewModel::new(ListState::default());
    let seen = Arc::new(Mutex::new(Vec::new()));

    let sink = Arc::clone(&seen);
    view_model.select_subscribe(|s: &ListState| s.strings.len(), move |len| sink.lock().push(len));
    settle().await;

    // s0 -> s1 leaves the selected value unchanged, s1 -> s2 changes it.
    view_model.set_state(|s| s.counter = 1);
    view_model.state().await.expect("state");
    settle().await;
    view_model.set_state(|s| s.strings.push("x".into()));
    view_model.state().await.expect("state");
    settle().await;

    assert_eq!(*seen.lock(), vec![1]);
}

#[tokio::test(start_paused = true)]
async fn subscription_sees_nothing_for_the_initial_state() {
    let view_model = ViewModel::new(ListState::with_strings(3));
    let seen = Arc::new(Mutex::new(Vec::new()));

    let sink = Arc::clone(&seen);
    view_model.select_subscribe(|s: &ListState| s.strings.clone(), move |v| sink.lock().push(v));
    settle().await;

    assert!(seen.lock().is_empty());
    assert_eq!(view_model.active_subscriptions(), 1);
}

#[tokio::test(start_paused = true)]
async fn pair_selector_fires_when_either_changes() {
    let view_model = ViewModel::new(ListState::default());
    let seen = Arc::new(Mutex::new(Vec::new()));

    let sink = Arc::clone(&seen);
    view_model.select_subscribe2(
        |s: &ListState| s.counter,
        |s: &ListState| s.strings.len(),
        move |counter, len| sink.lock().push((counter, len)),
    );
    settle().await;

    view_model.set_state(|s| s.counter = 2);
    view_model.state().await.expect("state");
    settle().await;
    view_model.set_state(|s| s.strings.push("y".into()));
    view_model.state().await.expect("state");
    settle().await;

    assert_eq!(*seen.lock(), vec![(2, 0), (2, 1)]);
}

#[tokio::test(start_paused = true)]
async fn queued_callbacks_wait_for_the_observer() {
    let (observer, mut queue) = ObserverContext::queue();
    let view_model = ViewModel::with_options(
        ListState::default(),
        ViewModelOptions {
            observer,
            ..ViewModelOptions::default()
        },
    );
    let seen = Arc::new(Mutex::new(Vec::new()));

    let sink = Arc::clone(&seen);
    view_model.select_subscribe(|s: &ListState| s.counter, move |c| sink.lock().push(c));
    settle().await;

    view_model.set_state(|s| s.counter = 7);
    view_model.state().await.expect("state");
    settle().await;

    assert!(seen.lock().is_empty());
    assert_eq!(queue.run_pending(), 1);
    assert_eq!(*seen.lock(), vec![7]);
}

#[tokio::test(start_paused = true)]
async fn dispose_releases_every_subscription() {
    let view_model = ViewModel::new(ListState::default());
    let seen = Arc::new(Mutex::new(Vec::new()));

    for _ in 0..3 {
        let sink = Arc::clone(&seen);
        view_model.select_subscribe(|s: &ListState| s.counter, move |c| sink.lock().push(c));
    }
    settle().await;
    assert_eq!(view_model.active_subscriptions(), 3);

    view_model.dispose();
    settle().await;
    view_model.set_state(|s| s.counter = 3);
    view_model.state().await.expect("state");
    settle().await;

    assert_eq!(view_model.active_subscriptions(), 0);
    assert!(seen.lock().is_empty());
}

async fn first_change_after_subscribing(view_model: &ViewModel<ListState>) -> Option<i64> {
    let (tx, mut rx) = mpsc::unbounded_channel();
    view_model.select_subscribe(
        |s: &ListState| s.counter,
        move |c| {
            let _ = tx.send(c);
        },
    );
    view_model.set_state(|s| s.counter += 1);
    view_model.state().await.expect("state");
    tokio::time::timeout(Duration::from_secs(1), rx.recv())
        .await
        .ok()
        .flatten()
}

#[tokio::test]
async fn write_queued_right_after_subscribing_is_delivered() {
    let view_model = ViewModel::new(ListState::default());
    assert_eq!(first_change_after_subscribing(&view_model).await, Some(1));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn write_queued_right_after_subscribing_is_delivered_across_workers() {
    for _ in 0..50 {
        let view_model = ViewModel::new(ListState::default());
        assert_eq!(first_change_after_subscribing(&view_model).await, Some(1));
        view_model.dispose();
    }
}

#[tokio::test(start_paused = true)]
async fn pair_subscription_sees_a_write_queued_right_after() {
    let view_model = ViewModel::new(ListState::default());
    let seen = Arc::new(Mutex::new(Vec::new()));

    let sink = Arc::clone(&seen);
    view_model.select_subscribe2(
        |s: &ListState| s.counter,
        |s: &ListState| s.strings.len(),
        move |counter, len| sink.lock().push((counter, len)),
    );
    view_model.set_state(|s| s.strings.push("now".into()));
    view_model.state().await.expect("state");
    settle().await;

    assert_eq!(*seen.lock(), vec![(0, 1)]);
}
