//! Page navigation state machine.
//!
//! ```text
//! Idle --request(Sequential)--> Exiting --kickoff--> Swapped --settle--> Idle
//! Idle --request(Direct)-----------------------> Swapped --settle--> Idle
//! ```
//!
//! Requests made outside `Idle` are dropped. Delays run on a [`TimerQueue`] that
//! the owner drives through [`TransitionController::advance`].

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::config::TransitionConfig;
use crate::pages::{PageCatalog, PageId};
use crate::scheduler::{TimerHandle, TimerQueue};

use super::phase::{AnimationPhase, Direction, TransitionMode};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransitionState {
    Idle,
    /// Old page still current while it plays its exit animation
    Exiting { target: PageId },
    /// New page current; waiting for the enter animation to settle
    Swapped,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
    Swap,
    Settle,
}

/// Why a request was dropped
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RejectReason {
    SamePage,
    Busy,
    UnknownPage,
    /// Advance on the last page or Retreat on the first
    AtBoundary,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestOutcome {
    Started {
        from: PageId,
        to: PageId,
        mode: TransitionMode,
        direction: Direction,
    },
    Rejected(RejectReason),
}

impl RequestOutcome {
    pub fn is_started(&self) -> bool {
        matches!(self, Self::Started { .. })
    }
}

/// Lifecycle notifications for the rendering layer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum NavigatorEvent {
    TransitionStarted {
        from: PageId,
        to: PageId,
        mode: TransitionMode,
        direction: Direction,
    },
    PageSwapped {
        from: PageId,
        to: PageId,
    },
    TransitionSettled {
        current: PageId,
    },
}

/// Page-level output boundary
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavigationSnapshot {
    pub current_page: PageId,
    pub previous_page: Option<PageId>,
    pub is_transitioning: bool,
    pub mode: TransitionMode,
    /// Direction of the active (or most recent) transition
    pub direction: Option<Direction>,
    pub phase: AnimationPhase,
}

#[derive(Debug)]
pub struct TransitionController {
    config: TransitionConfig,
    current: PageId,
    previous: Option<PageId>,
    state: TransitionState,
    mode: TransitionMode,
    direction: Option<Direction>,
    timers: TimerQueue<Step>,
    pending: Option<TimerHandle>,
    outbox: Vec<NavigatorEvent>,
}

impl TransitionController {
    pub fn new(config: TransitionConfig, initial: PageId) -> Self {
        Self {
            config,
            current: initial,
            previous: None,
            state: TransitionState::Idle,
            mode: TransitionMode::default(),
            direction: None,
            timers: TimerQueue::new(),
            pending: None,
            outbox: Vec::new(),
        }
    }

    pub fn current(&self) -> &PageId {
        &self.current
    }

    pub fn previous(&self) -> Option<&PageId> {
        self.previous.as_ref()
    }

    pub fn state(&self) -> &TransitionState {
        &self.state
    }

    pub fn is_transitioning(&self) -> bool {
        self.state != TransitionState::Idle
    }

    pub fn phase(&self) -> AnimationPhase {
        match (&self.state, self.direction) {
            (TransitionState::Exiting { .. }, Some(direction)) => AnimationPhase::exiting(direction),
            (TransitionState::Swapped, Some(direction)) => AnimationPhase::entering(direction),
            _ => AnimationPhase::Idle,
        }
    }

    /// Begin navigating to `target`
    pub fn request(
        &mut self,
        catalog: &PageCatalog,
        target: &PageId,
        mode: TransitionMode,
        now: Duration,
    ) -> RequestOutcome {
        let Some(to_order) = catalog.order_of(target) else {
            debug!(target = %target, "Navigation rejected: unknown page");
            return RequestOutcome::Rejected(RejectReason::UnknownPage);
        };
        if target == &self.current {
            debug!(target = %target, "Navigation rejected: already current");
            return RequestOutcome::Rejected(RejectReason::SamePage);
        }
        if self.is_transitioning() {
            debug!(target = %target, current = %self.current, "Navigation rejected: transition in progress");
            return RequestOutcome::Rejected(RejectReason::Busy);
        }

        let from_order = catalog.order_of(&self.current).unwrap_or(to_order);
        let direction = Direction::between(from_order, to_order);
        let from = self.current.clone();

        self.timers.cancel_slot(&mut self.pending);
        self.previous = Some(from.clone());
        self.mode = mode;
        self.direction = Some(direction);
        self.outbox.push(NavigatorEvent::TransitionStarted {
            from: from.clone(),
            to: target.clone(),
            mode,
            direction,
        });

        match mode {
            TransitionMode::Direct => {
                self.swap_to(target.clone());
                self.pending = Some(
                    self.timers
                        .schedule(now + self.config.transition_settle(), Step::Settle),
                );
            }
            TransitionMode::Sequential => {
                self.state = TransitionState::Exiting {
                    target: target.clone(),
                };
                self.pending = Some(
                    self.timers
                        .schedule(now + self.config.sequential_kickoff(), Step::Swap),
                );
            }
        }

        info!(from = %from, to = %target, ?mode, ?direction, "Page transition started");
        RequestOutcome::Started {
            from,
            to: target.clone(),
            mode,
            direction,
        }
    }

    /// Run every step due at or before `now`
    pub fn advance(&mut self, now: Duration) {
        while let Some(fired) = self.timers.pop_next_due(now) {
            if self.pending == Some(fired.handle) {
                self.pending = None;
            }
            match fired.payload {
                Step::Swap => {
                    let TransitionState::Exiting { target } = &self.state else {
                        continue;
                    };
                    let target = target.clone();
                    self.swap_to(target);
                    // chain from the deadline, not from `now`, so late draining
                    // does not stretch the transition
                    self.pending = Some(
                        self.timers
                            .schedule(fired.deadline + self.config.transition_settle(), Step::Settle),
                    );
                }
                Step::Settle => {
                    if self.state != TransitionState::Swapped {
                        continue;
                    }
                    self.previous = None;
                    self.state = TransitionState::Idle;
                    debug!(current = %self.current, "Page transition settled");
                    self.outbox.push(NavigatorEvent::TransitionSettled {
                        current: self.current.clone(),
                    });
                }
            }
        }
    }

    fn swap_to(&mut self, target: PageId) {
        let from = std::mem::replace(&mut self.current, target);
        self.state = TransitionState::Swapped;
        self.outbox.push(NavigatorEvent::PageSwapped {
            from,
            to: self.current.clone(),
        });
    }

    /// Drain lifecycle events produced since the last call
    pub fn take_events(&mut self) -> Vec<NavigatorEvent> {
        std::mem::take(&mut self.outbox)
    }

    pub fn next_deadline(&self) -> Option<Duration> {
        self.timers.next_deadline()
    }

    pub fn snapshot(&self) -> NavigationSnapshot {
        NavigationSnapshot {
            current_page: self.current.clone(),
            previous_page: self.previous.clone(),
            is_transitioning: self.is_transitioning(),
            mode: self.mode,
            direction: self.direction,
            phase: self.phase(),
        }
    }
}
