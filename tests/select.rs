#![allow(missing_docs)]
#![cfg(not(feature = "loom"))]

use rand::{SeedableRng, rngs::SmallRng};
use rdv::{
    channel::{Receiver, Sender, channel},
    select::{Select, SelectError, Selected},
};
use std::{thread, time::Duration};

fn pairs(n: usize) -> (Vec<Sender<usize>>, Vec<Receiver<usize>>) {
    (0..n).map(|_| channel()).unzip()
}

#[test]
fn at_most_one_ready_resolves_to_it() {
    let (senders, receivers) = pairs(3);
    for round in 0..9 {
        let ready = round % 3;
        let tx = senders[ready].clone();
        let sender = thread::spawn(move || tx.send(round).unwrap());

        let mut select = Select::new();
        for rx in &receivers {
            select.recv(rx);
        }
        assert_eq!(
            select.select(),
            Ok(Selected {
                index: ready,
                value: round
            })
        );
        sender.join().unwrap();
    }
}

#[test]
fn ready_channels_are_chosen_fairly() {
    const ROUNDS: usize = 600;
    let (senders, receivers) = pairs(2);
    // Both channels always have a sender parked with a value.
    let workers: Vec<_> = senders
        .into_iter()
        .enumerate()
        .map(|(idx, tx)| thread::spawn(move || while tx.send(idx).is_ok() {}))
        .collect();

    let mut select = Select::with_rng(SmallRng::seed_from_u64(42));
    for rx in &receivers {
        select.recv(rx);
    }
    let mut hits = [0usize; 2];
    for _ in 0..ROUNDS {
        let Selected { index, value } = select.select().unwrap();
        assert_eq!(index, value);
        hits[index] += 1;
    }
    // Neither side starves.
    assert!(hits.iter().all(|&h| h > ROUNDS / 10), "hits: {hits:?}");

    drop(select);
    drop(receivers);
    for worker in workers {
        worker.join().unwrap();
    }
}

#[test]
fn every_channel_disconnected_ends_the_wait() {
    let (senders, receivers) = pairs(3);
    let closer = thread::spawn(move || {
        thread::sleep(Duration::from_millis(20));
        drop(senders);
    });
    let mut select = Select::new();
    for rx in &receivers {
        select.recv(rx);
    }
    assert_eq!(select.select(), Err(SelectError));
    closer.join().unwrap();
}
