//! Timer engine for the Pomodoro Timer.
//!
//! This module provides the core timer functionality:
//! - start / pause / reset / manual session override
//! - Countdown with tokio::time::interval, one task per countdown
//! - Auto-transition between sessions on natural expiry
//! - Long break after 4 work sessions

use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};

use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Duration, Instant, MissedTickBehavior};
use tracing::{debug, info};

use crate::types::{SessionType, TimerEvent, TimerState, WORK_SESSIONS_PER_LONG_BREAK};

use super::store::{Signal, StateStore, Subscription, SubscriptionId};

/// Interval between countdown ticks.
pub const TICK_INTERVAL: Duration = Duration::from_secs(1);

// ============================================================================
// Transition rule
// ============================================================================

/// Picks the session that follows a naturally expired one.
///
/// Takes the work-session counter before expiry and returns the next session
/// type with the updated counter.
pub fn next_session(current: SessionType, work_sessions: u32) -> (SessionType, u32) {
    match current {
        SessionType::Work => {
            let completed = work_sessions + 1;
            if completed >= WORK_SESSIONS_PER_LONG_BREAK {
                (SessionType::LongBreak, 0)
            } else {
                (SessionType::ShortBreak, completed)
            }
        }
        SessionType::ShortBreak => (SessionType::Work, work_sessions),
        // A manually selected long break also clears the counter
        SessionType::LongBreak => (SessionType::Work, 0),
    }
}

// ============================================================================
// Engine internals
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TickOutcome {
    Continue,
    Finished,
    Stale,
}

#[derive(Debug)]
struct Countdown {
    generation: u64,
    handle: JoinHandle<()>,
}

#[derive(Debug, Default)]
struct Core {
    /// Consecutive work sessions since the last long break
    work_sessions: u32,
    /// Bumped for every countdown started
    generation: u64,
    countdown: Option<Countdown>,
}

impl Core {
    fn cancel_countdown(&mut self) {
        if let Some(countdown) = self.countdown.take() {
            countdown.handle.abort();
            debug!(generation = countdown.generation, "Countdown cancelled");
        }
    }

    fn is_current(&self, generation: u64) -> bool {
        self.countdown
            .as_ref()
            .is_some_and(|countdown| countdown.generation == generation)
    }
}

#[derive(Debug)]
struct Shared {
    core: Mutex<Core>,
    state: StateStore<TimerState>,
    session_ended: Signal<()>,
    events: Signal<TimerEvent>,
}

impl Shared {
    fn lock_core(&self) -> MutexGuard<'_, Core> {
        self.core.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn publish(&self, state: TimerState) {
        self.state.replace(state);
        self.events.emit(TimerEvent::StateChanged(state));
    }

    fn pause_locked(&self, core: &mut Core) {
        core.cancel_countdown();
        self.publish(self.state.get().with_running(false));
    }

    fn tick(&self, generation: u64) -> TickOutcome {
        let mut core = self.lock_core();
        if !core.is_current(generation) {
            return TickOutcome::Stale;
        }

        let state = self.state.get().decremented();
        self.publish(state);

        if !state.is_expired() {
            return TickOutcome::Continue;
        }

        // Our own task; it exits as soon as we return
        core.countdown = None;

        self.session_ended.emit(());
        self.events.emit(TimerEvent::SessionEnded);

        let (next, work_sessions) = next_session(state.session_type, core.work_sessions);
        core.work_sessions = work_sessions;
        info!(
            finished = state.session_type.as_str(),
            next = next.as_str(),
            work_sessions,
            "Session completed"
        );
        self.publish(TimerState::for_session(next, work_sessions));

        TickOutcome::Finished
    }
}

async fn run_countdown(shared: Weak<Shared>, generation: u64) {
    let mut ticker = interval_at(Instant::now() + TICK_INTERVAL, TICK_INTERVAL);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        ticker.tick().await;

        let Some(shared) = shared.upgrade() else {
            break;
        };
        if shared.tick(generation) != TickOutcome::Continue {
            break;
        }
    }
}

// ============================================================================
// TimerEngine
// ============================================================================

/// Owns the Pomodoro state and drives the countdown.
///
/// All operations are synchronous. The countdown itself runs as a task on the
/// runtime the engine was created with; at most one such task is live at any
/// time.
#[derive(Debug)]
pub struct TimerEngine {
    shared: Arc<Shared>,
    runtime: Handle,
}

impl TimerEngine {
    /// Creates an engine whose countdowns run on `runtime`.
    pub fn new(runtime: Handle) -> Self {
        Self::with_state(runtime, TimerState::initial())
    }

    /// Creates an engine resuming from `state`, paused.
    fn with_state(runtime: Handle, state: TimerState) -> Self {
        Self {
            shared: Arc::new(Shared {
                core: Mutex::new(Core {
                    work_sessions: state.completed_work_sessions,
                    ..Core::default()
                }),
                state: StateStore::new(state.with_running(false)),
                session_ended: Signal::new(),
                events: Signal::new(),
            }),
            runtime,
        }
    }

    /// Creates an engine on the current tokio runtime.
    ///
    /// # Panics
    ///
    /// Panics when called outside a tokio runtime.
    pub fn on_current_runtime() -> Self {
        Self::new(Handle::current())
    }

    /// Starts or resumes the countdown.
    ///
    /// Does nothing if the timer is already running or no time is left.
    pub fn start(&self) {
        let mut core = self.shared.lock_core();
        let current = self.shared.state.get();

        if current.is_running || current.time_remaining == 0 {
            debug!(
                is_running = current.is_running,
                time_remaining = current.time_remaining,
                "Ignoring start"
            );
            return;
        }

        core.cancel_countdown();
        core.generation += 1;
        let generation = core.generation;

        self.shared.publish(current.with_running(true));

        let handle = self
            .runtime
            .spawn(run_countdown(Arc::downgrade(&self.shared), generation));
        core.countdown = Some(Countdown { generation, handle });

        info!(
            session = current.session_type.as_str(),
            time_remaining = current.time_remaining,
            "Countdown started"
        );
    }

    /// Pauses the countdown, keeping the remaining time.
    pub fn pause(&self) {
        let mut core = self.shared.lock_core();
        self.shared.pause_locked(&mut core);
        debug!("Timer paused");
    }

    /// Stops the countdown and restores the full duration of the current
    /// session type.
    pub fn reset(&self) {
        let mut core = self.shared.lock_core();
        self.shared.pause_locked(&mut core);
        self.shared.publish(self.shared.state.get().restarted());
        debug!("Timer reset");
    }

    /// Switches to `session_type` at its full duration, paused.
    pub fn set_session(&self, session_type: SessionType) {
        let mut core = self.shared.lock_core();
        self.shared.pause_locked(&mut core);
        self.shared
            .publish(TimerState::for_session(session_type, core.work_sessions));
        debug!(session = session_type.as_str(), "Session set manually");
    }

    /// Returns the current snapshot.
    pub fn state(&self) -> TimerState {
        self.shared.state.get()
    }

    /// Subscribes to snapshots, starting with the current one.
    pub fn subscribe(&self) -> Subscription<TimerState> {
        self.shared.state.subscribe()
    }

    /// Subscribes to session-end notifications.
    pub fn session_ended(&self) -> Subscription<()> {
        self.shared.session_ended.subscribe()
    }

    /// Subscribes to the ordered stream of snapshots and session ends.
    pub fn events(&self) -> Subscription<TimerEvent> {
        self.shared.events.subscribe()
    }

    /// Removes a subscription created by any of the subscribe methods.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.shared.state.unsubscribe(id)
            || self.shared.session_ended.unsubscribe(id)
            || self.shared.events.unsubscribe(id)
    }

    /// Returns true while a countdown task is registered.
    pub fn has_active_countdown(&self) -> bool {
        self.shared.lock_core().countdown.is_some()
    }
}

impl Drop for TimerEngine {
    fn drop(&mut self) {
        self.shared.lock_core().cancel_countdown();
    }
}

// ============================================================================
// Tests
// ============================================================================
