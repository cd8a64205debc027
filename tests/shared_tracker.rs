use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;

use key_edge_core::{RawKeySink, SharedKeyEdgeTracker};

fn init_tracing() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}

#[test]
fn concurrent_repeats_fire_one_edge_per_key() {
    init_tracing();
    let tracker = SharedKeyEdgeTracker::<usize, u32>::new();
    let edges = Arc::new(Mutex::new(Vec::new()));

    let log = Arc::clone(&edges);
    tracker.subscribe(move |_, key| {
        log.lock().unwrap().push(*key);
        Ok(())
    });

    thread::scope(|s| {
        for worker in 0..8 {
            let tracker = tracker.clone();
            s.spawn(move || {
                for _ in 0..200 {
                    for key in 0..4 {
                        tracker.on_raw_key_down(&worker, key).unwrap();
                    }
                }
            });
        }
    });

    let mut seen = edges.lock().unwrap().clone();
    seen.sort_unstable();
    assert_eq!(seen, vec![0, 1, 2, 3]);
    assert_eq!(tracker.tracked_keys(), 4);
}

#[test]
fn release_from_another_thread_rearms_edge() {
    init_tracing();
    let tracker = SharedKeyEdgeTracker::<(), char>::new();
    let hits = Arc::new(AtomicUsize::new(0));

    let counter = Arc::clone(&hits);
    tracker.subscribe(move |_, _| {
        counter.fetch_add(1, Ordering::SeqCst);
        Ok(())
    });

    tracker.on_raw_key_down(&(), 'q').unwrap();
    let other = tracker.clone();
    thread::spawn(move || assert!(other.on_raw_key_up(&(), 'q')))
        .join()
        .unwrap();
    assert!(!tracker.is_down(&'q'));

    tracker.on_raw_key_down(&(), 'q').unwrap();
    assert_eq!(hits.load(Ordering::SeqCst), 2);
}

#[test]
fn unsubscribe_stops_future_notifications() {
    init_tracing();
    let tracker = SharedKeyEdgeTracker::<(), u8>::new();
    let hits = Arc::new(AtomicUsize::new(0));

    let counter = Arc::clone(&hits);
    let id = tracker.subscribe(move |_, _| {
        counter.fetch_add(1, Ordering::SeqCst);
        Ok(())
    });

    tracker.on_raw_key_down(&(), 1).unwrap();
    assert!(tracker.unsubscribe(id));
    assert_eq!(tracker.subscriber_count(), 0);
    tracker.on_raw_key_down(&(), 2).unwrap();

    assert_eq!(hits.load(Ordering::SeqCst), 1);
}

#[test]
fn shared_tracker_works_through_the_sink_trait() {
    init_tracing();
    let mut tracker = SharedKeyEdgeTracker::<(), u16>::new();

    let raw: [(u16, bool); 5] = [(30, true), (30, true), (30, false), (30, true), (31, true)];
    let mut edges = 0;
    for (key, down) in raw {
        if tracker.dispatch(&(), key, down).unwrap() {
            edges += 1;
        }
    }

    assert_eq!(edges, 3);
    let mut held = tracker.keys_down();
    held.sort_unstable();
    assert_eq!(held, vec![30, 31]);

    tracker.release_all();
    assert!(tracker.keys_down().is_empty());
}
