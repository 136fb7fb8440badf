//! Integration tests for the producer/consumer gate.

mod helpers;

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use courier_core::config::GateConfig;
use courier_core::error::{AppError, ErrorKind};
use courier_sync::{GateError, SyncGate};

#[test]
fn test_producers_never_block() {
    let gate = SyncGate::default();
    let start = Instant::now();
    for _ in 0..10_000 {
        gate.producer().confirm().expect("confirm");
    }
    assert!(start.elapsed() < Duration::from_secs(5));
    assert_eq!(gate.available(), 10_000);
}

#[test]
fn test_one_item_wakes_one_consumer() {
    let gate = Arc::new(SyncGate::default());
    let served = Arc::new(AtomicUsize::new(0));

    let handles: Vec<_> = (0..3)
        .map(|_| {
            let gate = Arc::clone(&gate);
            let served = Arc::clone(&served);
            thread::spawn(move || {
                let lock = gate.consumer();
                if lock.is_ok() {
                    lock.confirm().expect("confirm");
                    served.fetch_add(1, Ordering::SeqCst);
                }
            })
        })
        .collect();

    helpers::wait_for_consumers(&gate, 3);
    gate.producer().confirm().expect("produce");

    let deadline = Instant::now() + Duration::from_secs(5);
    while served.load(Ordering::SeqCst) < 1 {
        assert!(Instant::now() < deadline, "no consumer served");
        thread::sleep(Duration::from_millis(1));
    }
    helpers::wait_for_consumers(&gate, 2);
    assert_eq!(served.load(Ordering::SeqCst), 1);

    gate.stop();
    for handle in handles {
        handle.join().expect("join");
    }
    assert_eq!(served.load(Ordering::SeqCst), 1);
    assert_eq!(gate.consumers(), 0);
}

#[test]
fn test_cancelled_claim_passes_to_next_consumer() {
    let gate = Arc::new(SyncGate::default());
    let (done_tx, done_rx) = mpsc::channel();

    for _ in 0..2 {
        let gate = Arc::clone(&gate);
        let done_tx = done_tx.clone();
        thread::spawn(move || {
            // Untimed: only the dropped lock's hand-off can wake the second
            // consumer.
            let lock = gate.consumer();
            let ok = lock.is_ok();
            drop(lock);
            let _ = done_tx.send(ok);
        });
    }

    helpers::wait_for_consumers(&gate, 2);
    gate.producer().confirm().expect("produce");

    for _ in 0..2 {
        let ok = done_rx
            .recv_timeout(Duration::from_secs(5))
            .expect("second consumer was never woken");
        assert!(ok);
    }
    assert_eq!(gate.available(), 1);
    assert_eq!(gate.consumers(), 0);
}

#[test]
fn test_timeout_leaves_no_waiters() {
    let gate = Arc::new(SyncGate::default());
    let handles: Vec<_> = (0..4)
        .map(|_| {
            let gate = Arc::clone(&gate);
            thread::spawn(move || {
                let start = Instant::now();
                let lock = gate.consumer_timeout(Duration::from_millis(20));
                (lock.is_timed_out(), start.elapsed())
            })
        })
        .collect();

    for handle in handles {
        let (timed_out, elapsed) = handle.join().expect("join");
        assert!(timed_out);
        assert!(elapsed >= Duration::from_millis(20));
    }
    assert_eq!(gate.consumers(), 0);
}

#[test]
fn test_stop_during_mixed_load() {
    let gate = Arc::new(SyncGate::from_config(&GateConfig::default()));
    let consumed = Arc::new(AtomicUsize::new(0));

    let consumers: Vec<_> = (0..4)
        .map(|_| {
            let gate = Arc::clone(&gate);
            let consumed = Arc::clone(&consumed);
            thread::spawn(move || {
                loop {
                    let lock = gate.consumer();
                    if lock.is_stopped() {
                        break;
                    }
                    lock.confirm().expect("confirm");
                    consumed.fetch_add(1, Ordering::SeqCst);
                }
            })
        })
        .collect();

    for _ in 0..100 {
        gate.producer().confirm().expect("produce");
    }
    while gate.available() > 0 {
        thread::sleep(Duration::from_millis(1));
    }
    gate.stop();

    for handle in consumers {
        handle.join().expect("join");
    }
    assert_eq!(consumed.load(Ordering::SeqCst), 100);
    assert!(gate.is_stopped());
}

#[test]
fn test_gate_errors_map_to_app_errors() {
    let gate = SyncGate::default();
    gate.stop();

    let err: AppError = gate
        .consumer()
        .into_ready()
        .map(|_| ())
        .expect_err("stopped")
        .into();
    assert_eq!(err.kind, ErrorKind::Stopped);

    let err: AppError = GateError::LockProtocol.into();
    assert_eq!(err.kind, ErrorKind::Protocol);
}
