use std::collections::HashMap;
use std::time::{Duration, Instant};

use tracing::debug;

use crate::errors::{GraphWalkError, Result};
use crate::types::{StepKind, TraversalStep, VisitState};

/// Scheduler lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchedulerState {
    Idle,
    Running,
}

/// Notifications emitted while a step sequence plays out.
#[derive(Debug, Clone, PartialEq)]
pub enum SchedulerEvent {
    /// A node's visit state changed.
    VisitState { node_id: String, state: VisitState },
    /// The observed frontier snapshot was replaced.
    Frontier { frontier: Vec<String> },
    /// The final step was delivered; `order` is the full visit order.
    Completed { order: Vec<String> },
}

/// Observer callback invoked for every scheduler event.
pub type EventSink = Box<dyn FnMut(&SchedulerEvent)>;

/// Replays a precomputed step sequence over time.
///
/// Cooperative and single-threaded: the host drives delivery by calling
/// `poll`/`poll_at` (timed) or `step` (manual), and each delivery fully
/// applies its state changes before control returns. Steps are delivered
/// strictly in sequence order, each at most once. `stop` and `reset` are
/// synchronous — once they return, no further events fire.
pub struct StepScheduler {
    state: SchedulerState,
    steps: Vec<TraversalStep>,
    cursor: usize,
    tick_interval: Duration,
    next_due: Option<Instant>,
    current: Option<String>,
    visit_states: HashMap<String, VisitState>,
    frontier: Vec<String>,
    visited_order: Vec<String>,
    observers: Vec<EventSink>,
}

impl StepScheduler {
    pub fn new() -> Self {
        Self {
            state: SchedulerState::Idle,
            steps: Vec::new(),
            cursor: 0,
            tick_interval: Duration::from_millis(800),
            next_due: None,
            current: None,
            visit_states: HashMap::new(),
            frontier: Vec::new(),
            visited_order: Vec::new(),
            observers: Vec::new(),
        }
    }

    /// Registers an observer for visit-state, frontier, and completion
    /// events.
    pub fn subscribe(&mut self, sink: EventSink) {
        self.observers.push(sink);
    }

    pub fn state(&self) -> SchedulerState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == SchedulerState::Running
    }

    /// Visit state for a node; nodes never touched by the run are
    /// `Unvisited`.
    pub fn visit_state(&self, node_id: &str) -> VisitState {
        self.visit_states.get(node_id).copied().unwrap_or_default()
    }

    /// The most recently observed frontier snapshot.
    pub fn frontier(&self) -> &[String] {
        &self.frontier
    }

    /// Nodes finalized so far, in delivery order.
    pub fn visited_order(&self) -> &[String] {
        &self.visited_order
    }

    /// Starts replaying `steps`, delivering step 0 immediately and each
    /// subsequent step `tick_interval` after the previous delivery.
    ///
    /// Fails with `AlreadyRunning` while a run is in progress, leaving that
    /// run unaffected. An empty sequence completes immediately.
    pub fn start(&mut self, steps: Vec<TraversalStep>, tick_interval: Duration) -> Result<()> {
        if self.is_running() {
            return Err(GraphWalkError::AlreadyRunning);
        }

        self.clear_run_state();
        self.steps = steps;
        self.tick_interval = tick_interval;

        if self.steps.is_empty() {
            debug!("empty step sequence, completing immediately");
            let events = vec![SchedulerEvent::Completed { order: Vec::new() }];
            self.emit(&events);
            return Ok(());
        }

        debug!(
            steps = self.steps.len(),
            interval_ms = tick_interval.as_millis() as u64,
            "run started"
        );
        self.state = SchedulerState::Running;
        let events = self.deliver_next();
        if self.is_running() {
            self.next_due = Some(Instant::now() + self.tick_interval);
        }
        self.emit(&events);
        Ok(())
    }

    /// Delivers every step whose due time has passed as of `now`.
    ///
    /// This is the single suspension point: between due times the scheduler
    /// holds no control and can be cancelled. A late poll catches up one step
    /// per elapsed interval, still strictly in order.
    pub fn poll_at(&mut self, now: Instant) {
        while self.is_running() {
            let Some(due) = self.next_due else { break };
            if due > now {
                break;
            }
            let events = self.deliver_next();
            if self.is_running() {
                self.next_due = Some(due + self.tick_interval);
            }
            self.emit(&events);
        }
    }

    /// `poll_at` with the current time.
    pub fn poll(&mut self) {
        self.poll_at(Instant::now());
    }

    /// Manually advances by exactly one step, ignoring the tick cadence.
    ///
    /// Returns `true` if a step was delivered.
    pub fn step(&mut self) -> bool {
        if !self.is_running() {
            return false;
        }
        let events = self.deliver_next();
        if self.is_running() {
            self.next_due = Some(Instant::now() + self.tick_interval);
        }
        self.emit(&events);
        true
    }

    /// Halts playback. Safe to call from any state (no-op when idle); the
    /// visual state of the partial run stays in place for inspection.
    pub fn stop(&mut self) {
        if self.is_running() {
            debug!(delivered = self.cursor, "run stopped");
        }
        self.state = SchedulerState::Idle;
        self.next_due = None;
    }

    /// `stop` plus clearing the step sequence, visit states, frontier, and
    /// visit order — a fresh idle scheduler.
    pub fn reset(&mut self) {
        self.stop();
        self.clear_run_state();
        self.steps = Vec::new();
    }

    fn clear_run_state(&mut self) {
        self.cursor = 0;
        self.current = None;
        self.visit_states.clear();
        self.frontier.clear();
        self.visited_order.clear();
        self.next_due = None;
    }

    /// Applies the next step's state changes and returns the events to emit.
    fn deliver_next(&mut self) -> Vec<SchedulerEvent> {
        let Some(step) = self.steps.get(self.cursor).cloned() else {
            // A sequence whose last step was not flagged final still ends.
            self.state = SchedulerState::Idle;
            self.next_due = None;
            return vec![SchedulerEvent::Completed {
                order: self.visited_order.clone(),
            }];
        };
        self.cursor += 1;

        let mut events = Vec::new();
        match step.kind {
            StepKind::Visit => {
                if let Some(previous) = self.current.take() {
                    self.set_visit_state(previous, VisitState::Visited, &mut events);
                }
                self.set_visit_state(step.node_id.clone(), VisitState::Current, &mut events);
                self.current = Some(step.node_id.clone());
                self.visited_order.push(step.node_id.clone());
            }
            StepKind::Enqueue => {
                self.set_visit_state(step.node_id.clone(), VisitState::Visiting, &mut events);
            }
        }

        self.frontier = step.frontier.clone();
        events.push(SchedulerEvent::Frontier {
            frontier: self.frontier.clone(),
        });

        if step.is_final {
            if let Some(current) = self.current.take() {
                self.set_visit_state(current, VisitState::Visited, &mut events);
            }
            self.state = SchedulerState::Idle;
            self.next_due = None;
            debug!(visited = self.visited_order.len(), "run completed");
            events.push(SchedulerEvent::Completed {
                order: self.visited_order.clone(),
            });
        }

        events
    }

    fn set_visit_state(
        &mut self,
        node_id: String,
        state: VisitState,
        events: &mut Vec<SchedulerEvent>,
    ) {
        self.visit_states.insert(node_id.clone(), state);
        events.push(SchedulerEvent::VisitState { node_id, state });
    }

    fn emit(&mut self, events: &[SchedulerEvent]) {
        for sink in &mut self.observers {
            for event in events {
                sink(event);
            }
        }
    }
}

impl Default for StepScheduler {
    fn default() -> Self {
        Self::new()
    }
}
