//! Integration tests for the session registry.

mod helpers;

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::thread;

use courier_core::error::{AppError, ErrorKind};
use courier_core::events::SessionEvent;
use courier_core::types::id::SessionId;
use courier_session::{EventObserver, Session, SessionError, SessionObserver, SessionRegistry};

use helpers::TestRegistry;

#[test]
fn test_suspend_then_resume_on_new_connection() {
    let t = TestRegistry::new(8);
    let mut session = t
        .registry
        .open(helpers::handler("conn-1"), 60, "client-a")
        .expect("open");
    let id = session.id();
    session.detach();

    t.registry.suspend(session);
    t.advance_secs(30);

    let mut resumed = t.registry.resume(&id).expect("resume");
    resumed.attach(helpers::handler("conn-2"));

    assert_eq!(resumed.id(), id);
    assert_eq!(resumed.name(), "client-a");
    assert_eq!(resumed.ack_interval(), 8);
    assert!(resumed.handler().is_some());
    assert!(t.registry.is_active(&id));
    assert!(!t.registry.is_suspended(&id));
}

#[test]
fn test_resume_twice_fails_second_time() {
    let t = TestRegistry::new(0);
    let session = t.registry.open(helpers::handler("c"), 60, "a").expect("open");
    let id = session.id();
    t.registry.suspend(session);

    let _owner = t.registry.resume(&id).expect("first resume");
    let err = t.registry.resume(&id).expect_err("second resume");
    assert_eq!(err, SessionError::NotFound(id));

    let app: AppError = err.into();
    assert_eq!(app.kind, ErrorKind::NotFound);
}

#[test]
fn test_expiry_after_timeout() {
    let t = TestRegistry::new(0);
    let session = t.registry.open(helpers::handler("c"), 10, "a").expect("open");
    let id = session.id();
    t.registry.suspend(session);

    t.advance_secs(11);
    assert_eq!(t.registry.erase_expired(), 1);
    assert_eq!(
        t.registry.resume(&id).expect_err("expired"),
        SessionError::NotFound(id)
    );
    assert_eq!(t.registry.active_count(), 0);
    assert_eq!(t.registry.suspended_count(), 0);
}

#[test]
fn test_id_never_in_both_sets() {
    let t = TestRegistry::new(0);
    let mut ids = Vec::new();
    let mut owned = Vec::new();
    for i in 0..10 {
        let session = t
            .registry
            .open(helpers::handler("c"), 60, format!("s{i}"))
            .expect("open");
        ids.push(session.id());
        owned.push(session);
    }

    for session in owned.drain(..5) {
        t.registry.suspend(session);
    }
    for id in &ids {
        assert_ne!(t.registry.is_active(id), t.registry.is_suspended(id));
    }

    let resumed = t.registry.resume(&ids[0]).expect("resume");
    for id in &ids {
        assert_ne!(t.registry.is_active(id), t.registry.is_suspended(id));
    }

    drop(resumed);
    drop(owned);
    assert_eq!(t.registry.active_count(), 0);
    assert_eq!(t.registry.suspended_count(), 4);
}

#[test]
fn test_concurrent_open_suspend_resume() {
    let registry = Arc::new(SessionRegistry::new(0));

    thread::scope(|s| {
        for worker in 0..8 {
            let registry = &registry;
            s.spawn(move || {
                for round in 0..50 {
                    let session = registry
                        .open(helpers::handler("worker"), 60, format!("w{worker}-{round}"))
                        .expect("open");
                    let id = session.id();
                    registry.suspend(session);
                    let session = registry.resume(&id).expect("resume");
                    assert!(registry.is_active(&id));
                    drop(session);
                    assert!(!registry.is_active(&id));
                }
            });
        }
    });

    assert_eq!(registry.active_count(), 0);
    assert_eq!(registry.suspended_count(), 0);
}

/// Counts open notifications made while `open` is still running.
struct OpenCounter {
    registry: std::sync::Weak<SessionRegistry>,
    calls: AtomicUsize,
}

impl SessionObserver for OpenCounter {
    fn opened(&self, session: &Session) {
        self.calls.fetch_add(1, Ordering::SeqCst);
        // Observers run under the registry lock, so only the session
        // itself may be inspected here.
        assert!(self.registry.upgrade().is_some());
        assert!(!session.name().is_empty());
    }
}

#[test]
fn test_observer_called_before_open_returns() {
    let registry = Arc::new(SessionRegistry::new(0));
    let observer = Arc::new(OpenCounter {
        registry: Arc::downgrade(&registry),
        calls: AtomicUsize::new(0),
    });
    registry.add(observer.clone());

    let _a = registry.open(helpers::handler("c"), 60, "a").expect("open");
    assert_eq!(observer.calls.load(Ordering::SeqCst), 1);
    let _b = registry.open(helpers::handler("c"), 60, "b").expect("open");
    assert_eq!(observer.calls.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn test_event_observer_publishes_lifecycle() {
    let t = TestRegistry::new(0);
    let events = EventObserver::new(16);
    let mut rx = events.subscribe();
    t.registry.add(Arc::new(events));

    let session = t.registry.open(helpers::handler("c"), 5, "evt").expect("open");
    let id: SessionId = session.id();
    t.registry.suspend(session);
    t.advance_secs(5);
    t.registry.erase_expired();

    let mut kinds = Vec::new();
    for _ in 0..3 {
        let event = rx.recv().await.expect("event");
        assert_eq!(event.payload.session_id(), id);
        kinds.push(event.payload);
    }

    assert!(matches!(kinds[0], SessionEvent::Opened { ref name, timeout_seconds: 5, .. } if name == "evt"));
    assert!(matches!(kinds[1], SessionEvent::Suspended { .. }));
    assert!(matches!(kinds[2], SessionEvent::Expired { .. }));
}
