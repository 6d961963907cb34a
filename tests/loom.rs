#![allow(missing_docs)]
#![cfg(feature = "loom")]

use loom::{
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
    },
    thread,
};
use rand::{SeedableRng, rngs::SmallRng};
use rdv::{
    channel::{SendError, channel},
    config::ExecutorConfig,
    executor::Executor,
    select::{Select, Selected},
    task::Increment,
};

fn bounded() -> loom::model::Builder {
    let mut builder = loom::model::Builder::new();
    builder.preemption_bound = Some(3);
    builder
}

#[test]
fn loom_send_returns_only_after_pickup() {
    loom::model(|| {
        let (tx, rx) = channel();
        let delivered = Arc::new(AtomicBool::new(false));
        let sender = {
            let delivered = delivered.clone();
            thread::spawn(move || {
                tx.send(7u32).unwrap();
                delivered.store(true, Ordering::Relaxed);
            })
        };

        // Nothing has been taken yet, so the sender cannot have returned.
        assert!(!delivered.load(Ordering::Relaxed));
        assert_eq!(rx.recv(), Ok(7));
        sender.join().unwrap();
        assert!(delivered.load(Ordering::Relaxed));
    });
}

#[test]
fn loom_two_senders_each_deliver_exactly_once() {
    bounded().check(|| {
        let (tx, rx) = channel();
        let senders: Vec<_> = [1u32, 2]
            .into_iter()
            .map(|value| {
                let tx = tx.clone();
                thread::spawn(move || tx.send(value).unwrap())
            })
            .collect();
        drop(tx);

        let mut got = vec![rx.recv().unwrap(), rx.recv().unwrap()];
        got.sort_unstable();
        assert_eq!(got, [1, 2]);
        for sender in senders {
            sender.join().unwrap();
        }
        // Every sender is gone, so no third value can appear.
        assert!(rx.recv().is_err());
    });
}

#[test]
fn loom_receiver_drop_hands_value_back() {
    loom::model(|| {
        let (tx, rx) = channel();
        let sender = thread::spawn(move || tx.send(5u32));
        drop(rx);
        assert_eq!(sender.join().unwrap(), Err(SendError(5)));
    });
}

#[test]
fn loom_executor_collects_every_result() {
    bounded().check(|| {
        let executor = Executor::setup(Increment, &ExecutorConfig::default()).unwrap();
        let mut results = executor.execute([10, -805]).unwrap();
        results.sort_unstable();
        assert_eq!(results, [-804, 11]);
    });
}

#[test]
fn loom_select_resolves_the_ready_channel() {
    bounded().check(|| {
        let (_tx_a, rx_a) = channel::<u32>();
        let (tx_b, rx_b) = channel::<u32>();
        let sender = thread::spawn(move || tx_b.send(3).unwrap());

        let mut select = Select::with_rng(SmallRng::seed_from_u64(7));
        select.recv(&rx_a);
        let b = select.recv(&rx_b);
        assert_eq!(select.select(), Ok(Selected { index: b, value: 3 }));
        sender.join().unwrap();
    });
}
