//! Session registry: creates, suspends, resumes, and expires sessions.

use std::collections::HashSet;
use std::fmt;
use std::sync::{Arc, Weak};

use parking_lot::Mutex;
use tracing::{debug, info, warn};

use courier_core::config::SessionConfig;
use courier_core::traits::{Clock, IdGenerator, SystemClock, UuidGenerator};
use courier_core::types::id::SessionId;

use crate::error::SessionError;
use crate::session::handler::SessionHandler;
use crate::session::state::Session;

use super::observer::SessionObserver;
use super::tracker::SessionTracker;

/// Collections guarded by the registry lock.
#[derive(Default)]
struct RegistryState {
    /// Ids of sessions currently owned by a caller.
    active: HashSet<SessionId>,
    /// Sessions owned by the registry, waiting to be resumed or to expire.
    suspended: Vec<Session>,
    observers: Vec<Arc<dyn SessionObserver>>,
}

impl RegistryState {
    /// Moves every expired session out of `suspended`. The caller drops
    /// them after releasing the lock.
    fn take_expired(&mut self, now: std::time::Instant) -> Vec<Session> {
        let (expired, live): (Vec<_>, Vec<_>) = std::mem::take(&mut self.suspended)
            .into_iter()
            .partition(|session| session.is_expired(now));
        self.suspended = live;

        for session in &expired {
            for observer in &self.observers {
                observer.expired(&session.id());
            }
            info!(session_id = %session.id(), name = %session.name(), "Suspended session expired");
        }
        expired
    }
}

/// Lock-protected state shared with the sessions the registry creates.
struct RegistryShared {
    state: Mutex<RegistryState>,
}

impl SessionTracker for RegistryShared {
    fn erase(&self, id: &SessionId) {
        if self.state.lock().active.remove(id) {
            debug!(session_id = %id, "Active session erased");
        }
    }
}

/// Creates and manages [`Session`] objects.
///
/// Every operation runs under one mutex. Observers are invoked while that
/// mutex is held.
pub struct SessionRegistry {
    shared: Arc<RegistryShared>,
    ack: u32,
    sweep_on_resume: bool,
    clock: Arc<dyn Clock>,
    ids: Arc<dyn IdGenerator>,
}

impl SessionRegistry {
    /// Creates a registry handing `ack` to every new session.
    pub fn new(ack: u32) -> Self {
        Self::with_parts(ack, Arc::new(SystemClock), Arc::new(UuidGenerator))
    }

    /// Creates a registry with an injected clock and id generator.
    pub fn with_parts(ack: u32, clock: Arc<dyn Clock>, ids: Arc<dyn IdGenerator>) -> Self {
        Self {
            shared: Arc::new(RegistryShared {
                state: Mutex::new(RegistryState::default()),
            }),
            ack,
            sweep_on_resume: true,
            clock,
            ids,
        }
    }

    /// Creates a registry from configuration.
    pub fn from_config(config: &SessionConfig) -> Self {
        let mut registry = Self::new(config.ack_interval);
        registry.sweep_on_resume = config.sweep_on_resume;
        registry
    }

    /// Sets whether [`resume`](Self::resume) sweeps expired sessions first.
    pub fn with_sweep_on_resume(mut self, enabled: bool) -> Self {
        self.sweep_on_resume = enabled;
        self
    }

    /// Acknowledgement interval given to new sessions.
    pub fn ack_interval(&self) -> u32 {
        self.ack
    }

    /// Opens a new active session. The caller takes ownership.
    pub fn open(
        &self,
        handler: Arc<dyn SessionHandler>,
        timeout_seconds: u32,
        name: impl Into<String>,
    ) -> Result<Session, SessionError> {
        let id = self.ids.generate();
        let mut state = self.shared.state.lock();

        if state.active.contains(&id) || state.suspended.iter().any(|s| s.id() == id) {
            warn!(session_id = %id, "Identifier generator produced a duplicate id");
            return Err(SessionError::Duplicate(id));
        }

        let session = Session::new(
            id,
            handler,
            timeout_seconds,
            name.into(),
            self.ack,
            self.tracker(),
        );
        state.active.insert(id);

        for observer in &state.observers {
            observer.opened(&session);
        }

        info!(
            session_id = %id,
            name = %session.name(),
            timeout_seconds,
            "Session opened"
        );
        Ok(session)
    }

    /// Suspends a session and starts its timeout. The registry takes
    /// ownership.
    pub fn suspend(&self, mut session: Session) {
        let now = self.clock.now();
        let mut state = self.shared.state.lock();

        state.active.remove(&session.id());
        session.start_timer(now);

        for observer in &state.observers {
            observer.suspended(&session);
        }

        info!(
            session_id = %session.id(),
            timeout_seconds = session.timeout_seconds(),
            "Session suspended"
        );
        state.suspended.push(session);
    }

    /// Resumes a suspended session. The caller takes ownership.
    ///
    /// Fails with [`SessionError::NotFound`] if no suspended session has
    /// this id or its timeout has elapsed.
    pub fn resume(&self, id: &SessionId) -> Result<Session, SessionError> {
        let now = self.clock.now();
        let mut state = self.shared.state.lock();

        let expired = if self.sweep_on_resume {
            state.take_expired(now)
        } else {
            Vec::new()
        };

        let position = state
            .suspended
            .iter()
            .position(|session| session.id() == *id && !session.is_expired(now));

        let result = match position {
            Some(index) => {
                let mut session = state.suspended.swap_remove(index);
                session.clear_timer();
                state.active.insert(session.id());

                for observer in &state.observers {
                    observer.resumed(&session);
                }

                info!(session_id = %id, "Session resumed");
                Ok(session)
            }
            None => {
                debug!(session_id = %id, "Resume requested for unknown or expired session");
                Err(SessionError::NotFound(*id))
            }
        };

        drop(state);
        drop(expired);
        result
    }

    /// Destroys every suspended session whose timeout has elapsed.
    ///
    /// Returns the number of sessions removed.
    pub fn erase_expired(&self) -> usize {
        let now = self.clock.now();
        let expired = self.shared.state.lock().take_expired(now);
        let count = expired.len();
        drop(expired);

        if count > 0 {
            debug!(count, "Swept expired sessions");
        }
        count
    }

    /// Registers an observer. Sessions already open are not replayed.
    pub fn add(&self, observer: Arc<dyn SessionObserver>) {
        self.shared.state.lock().observers.push(observer);
    }

    /// Number of sessions owned by callers.
    pub fn active_count(&self) -> usize {
        self.shared.state.lock().active.len()
    }

    /// Number of sessions parked in the registry.
    pub fn suspended_count(&self) -> usize {
        self.shared.state.lock().suspended.len()
    }

    /// True if `id` is owned by a caller.
    pub fn is_active(&self, id: &SessionId) -> bool {
        self.shared.state.lock().active.contains(id)
    }

    /// True if `id` is parked in the registry (expired or not).
    pub fn is_suspended(&self, id: &SessionId) -> bool {
        self.shared
            .state
            .lock()
            .suspended
            .iter()
            .any(|session| session.id() == *id)
    }

    fn tracker(&self) -> Weak<dyn SessionTracker> {
        let shared: Arc<dyn SessionTracker> = self.shared.clone();
        Arc::downgrade(&shared)
    }
}

impl fmt::Debug for SessionRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.shared.state.lock();
        f.debug_struct("SessionRegistry")
            .field("ack", &self.ack)
            .field("active", &state.active.len())
            .field("suspended", &state.suspended.len())
            .field("observers", &state.observers.len())
            .finish()
    }
}
