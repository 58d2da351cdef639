//! Drain-and-restart state machine
//!
//! A soft restart announces the shutdown, gives dependent subsystems a fixed
//! drain budget to flush their state, and restarts when the budget runs out.
//! Subsystems that need time register as pending and acknowledge when done;
//! once nothing is pending the remaining countdown is cut to the fast-path
//! delay. A subsystem that never acknowledges only delays the restart until
//! the budget expires.
//!
//! [`ShutdownState`] is the pure bookkeeping. The firmware crate keeps it
//! behind a mutex and drives it from event callbacks and the one-second tick.

/// Countdown parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShutdownTimings {
    /// Ceiling on the time subsystems get to drain
    pub drain_budget_secs: u32,
    /// Countdown once every pending subsystem has acknowledged
    pub fast_path_secs: u32,
    /// Period of countdown progress log lines
    pub progress_interval_secs: u32,
}

impl ShutdownTimings {
    pub const fn new() -> Self {
        Self {
            drain_budget_secs: 60,
            fast_path_secs: 2,
            progress_interval_secs: 5,
        }
    }
}

impl Default for ShutdownTimings {
    fn default() -> Self {
        Self::new()
    }
}

/// Coordinator lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShutdownPhase {
    /// Not shutting down
    Idle,
    /// `system.shuttingdown` is being delivered
    Announcing,
    /// Waiting for pending subsystems, bounded by the drain budget
    AwaitingAcks,
    /// Nothing pending; short countdown to restart
    CountingDown,
    /// Countdown expired; `system.shutdown` is being delivered
    ShuttingDown,
    /// Hardware restart issued
    Restarted,
}

/// What a one-second tick did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// No shutdown in progress
    Idle,
    /// Countdown decremented, nothing to report
    Counting,
    /// Countdown reached a progress interval
    Progress { remaining: u32, pending: i32 },
    /// One second left
    RestartImminent,
    /// Countdown reached zero; final shutdown must run now
    Expired,
}

/// Pending-subsystem counter and countdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShutdownState {
    pending: i32,
    countdown: u32,
    phase: ShutdownPhase,
    timings: ShutdownTimings,
}

impl ShutdownState {
    pub const fn new(timings: ShutdownTimings) -> Self {
        Self {
            pending: 0,
            countdown: 0,
            phase: ShutdownPhase::Idle,
            timings,
        }
    }

    /// Start a drain: clear the pending count and arm the full budget.
    ///
    /// Calling this while already draining re-arms the budget. A zero budget
    /// is treated as one second; the countdown must be armed to ever expire.
    pub fn begin(&mut self) {
        self.pending = 0;
        self.countdown = self.timings.drain_budget_secs.max(1);
        self.phase = ShutdownPhase::Announcing;
    }

    /// The shutdown announcement has been delivered to every subscriber.
    pub fn announced(&mut self) {
        if self.phase != ShutdownPhase::Announcing {
            return;
        }
        if self.pending <= 0 {
            self.shorten();
            self.phase = ShutdownPhase::CountingDown;
        } else {
            self.phase = ShutdownPhase::AwaitingAcks;
        }
    }

    /// A subsystem needs time before the restart.
    pub fn register_pending(&mut self) {
        self.pending = self.pending.saturating_add(1);
        if self.phase == ShutdownPhase::CountingDown {
            self.phase = ShutdownPhase::AwaitingAcks;
        }
    }

    /// A subsystem finished its work. Returns true if this shortened the
    /// countdown.
    pub fn acknowledge(&mut self) -> bool {
        self.pending = self.pending.saturating_sub(1);
        if self.pending != 0 || !self.is_shutting_down() {
            return false;
        }
        if self.phase == ShutdownPhase::AwaitingAcks {
            self.phase = ShutdownPhase::CountingDown;
        }
        self.shorten()
    }

    /// Advance the countdown by one second.
    pub fn tick(&mut self) -> TickOutcome {
        if self.countdown == 0 {
            return TickOutcome::Idle;
        }
        self.countdown -= 1;

        match self.countdown {
            0 => {
                self.phase = ShutdownPhase::ShuttingDown;
                TickOutcome::Expired
            }
            1 => TickOutcome::RestartImminent,
            remaining if remaining % self.timings.progress_interval_secs.max(1) == 0 => {
                TickOutcome::Progress {
                    remaining,
                    pending: self.pending,
                }
            }
            _ => TickOutcome::Counting,
        }
    }

    /// The hardware restart has been issued.
    pub fn restarted(&mut self) {
        self.countdown = 0;
        self.phase = ShutdownPhase::Restarted;
    }

    pub fn is_shutting_down(&self) -> bool {
        self.countdown > 0
    }

    pub fn pending(&self) -> i32 {
        self.pending
    }

    pub fn countdown(&self) -> u32 {
        self.countdown
    }

    pub fn phase(&self) -> ShutdownPhase {
        self.phase
    }

    pub fn timings(&self) -> ShutdownTimings {
        self.timings
    }

    fn shorten(&mut self) -> bool {
        let fast_path = self.timings.fast_path_secs.max(1);
        if self.countdown > fast_path {
            self.countdown = fast_path;
            true
        } else {
            false
        }
    }
}

impl Default for ShutdownState {
    fn default() -> Self {
        Self::new(ShutdownTimings::default())
    }
}
