use std::time::{Duration, Instant};

use tracing::debug;

use crate::config::EngineConfig;
use crate::errors::{GraphWalkError, Result};
use crate::graph::model::{EdgeToggle, GraphModel};
use crate::graph::traversal::compute_graph_steps;
use crate::scheduler::{EventSink, SchedulerState, StepScheduler};
use crate::store::{GraphSnapshot, TreeSnapshot};
use crate::tree::model::TreeModel;
use crate::tree::traversal::compute_tree_steps;
use crate::types::{ChildSide, GraphAlgorithm, Position, TreeTraversal, VisitState};

/// Interactive editing and playback context for one graph.
///
/// Owns the model and the scheduler, and enforces the structural freeze:
/// every mutation fails with `TraversalActive` while a run is in progress,
/// so a traversal never reads a structure it no longer matches.
pub struct GraphSession {
    model: GraphModel,
    scheduler: StepScheduler,
    config: EngineConfig,
}

impl GraphSession {
    /// A session over an empty graph.
    pub fn new() -> Self {
        Self::with_model(GraphModel::new())
    }

    pub fn with_model(model: GraphModel) -> Self {
        Self {
            model,
            scheduler: StepScheduler::new(),
            config: EngineConfig::default(),
        }
    }

    pub fn with_config(model: GraphModel, config: EngineConfig) -> Self {
        Self {
            model,
            scheduler: StepScheduler::new(),
            config,
        }
    }

    /// Read-only view of the structure.
    pub fn model(&self) -> &GraphModel {
        &self.model
    }

    pub fn is_traversing(&self) -> bool {
        self.scheduler.is_running()
    }

    pub fn scheduler_state(&self) -> SchedulerState {
        self.scheduler.state()
    }

    pub fn visit_state(&self, node_id: &str) -> VisitState {
        self.scheduler.visit_state(node_id)
    }

    pub fn frontier(&self) -> &[String] {
        self.scheduler.frontier()
    }

    pub fn visited_order(&self) -> &[String] {
        self.scheduler.visited_order()
    }

    fn ensure_editable(&self) -> Result<()> {
        if self.scheduler.is_running() {
            return Err(GraphWalkError::TraversalActive);
        }
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Mutations (rejected while a traversal is running)
    // -----------------------------------------------------------------------

    pub fn add_node(&mut self, id: &str, position: Position) -> Result<()> {
        self.ensure_editable()?;
        self.model.add_node(id, position)
    }

    pub fn remove_node(&mut self, id: &str) -> Result<()> {
        self.ensure_editable()?;
        self.model.remove_node(id)
    }

    pub fn toggle_edge(&mut self, a: &str, b: &str) -> Result<EdgeToggle> {
        self.ensure_editable()?;
        self.model.toggle_edge(a, b)
    }

    pub fn set_position(&mut self, id: &str, position: Position) -> Result<()> {
        self.ensure_editable()?;
        self.model.set_position(id, position)
    }

    // -----------------------------------------------------------------------
    // Playback
    // -----------------------------------------------------------------------

    /// Computes the full step sequence for `algorithm` from `start_id` and
    /// starts replaying it at the configured graph cadence.
    pub fn run(&mut self, algorithm: GraphAlgorithm, start_id: &str) -> Result<()> {
        let tick = self.config.graph_tick();
        self.run_with_tick(algorithm, start_id, tick)
    }

    /// `run` with an explicit tick interval.
    pub fn run_with_tick(
        &mut self,
        algorithm: GraphAlgorithm,
        start_id: &str,
        tick: Duration,
    ) -> Result<()> {
        if self.scheduler.is_running() {
            return Err(GraphWalkError::AlreadyRunning);
        }
        let steps = compute_graph_steps(&self.model, algorithm, start_id)?;
        debug!(
            algorithm = algorithm.as_str(),
            start = start_id,
            steps = steps.len(),
            "graph traversal starting"
        );
        self.scheduler.start(steps, tick)
    }

    pub fn stop(&mut self) {
        self.scheduler.stop();
    }

    pub fn reset(&mut self) {
        self.scheduler.reset();
    }

    pub fn poll(&mut self) {
        self.scheduler.poll();
    }

    pub fn poll_at(&mut self, now: Instant) {
        self.scheduler.poll_at(now);
    }

    pub fn step(&mut self) -> bool {
        self.scheduler.step()
    }

    pub fn subscribe(&mut self, sink: EventSink) {
        self.scheduler.subscribe(sink);
    }

    // -----------------------------------------------------------------------
    // Persistence
    // -----------------------------------------------------------------------

    /// Captures the current structure as a named snapshot.
    pub fn snapshot(&self, name: &str) -> GraphSnapshot {
        GraphSnapshot::capture(name, &self.model)
    }

    /// Replaces the structure from a snapshot and clears any finished run's
    /// visual state. Refused while a traversal is running.
    pub fn restore(&mut self, snapshot: &GraphSnapshot) -> Result<()> {
        self.ensure_editable()?;
        let model = snapshot.to_model()?;
        self.scheduler.reset();
        self.model = model;
        Ok(())
    }
}

impl Default for GraphSession {
    fn default() -> Self {
        Self::new()
    }
}

/// Interactive editing and playback context for one binary tree.
///
/// Mirrors `GraphSession`: mutations are rejected while a traversal is
/// running, and playback always starts from the tree's root.
pub struct TreeSession {
    model: TreeModel,
    scheduler: StepScheduler,
    config: EngineConfig,
}

impl TreeSession {
    /// A session over an empty tree.
    pub fn new() -> Self {
        Self::with_model(TreeModel::new())
    }

    pub fn with_model(model: TreeModel) -> Self {
        Self {
            model,
            scheduler: StepScheduler::new(),
            config: EngineConfig::default(),
        }
    }

    pub fn with_config(model: TreeModel, config: EngineConfig) -> Self {
        Self {
            model,
            scheduler: StepScheduler::new(),
            config,
        }
    }

    /// Read-only view of the structure.
    pub fn model(&self) -> &TreeModel {
        &self.model
    }

    pub fn is_traversing(&self) -> bool {
        self.scheduler.is_running()
    }

    pub fn scheduler_state(&self) -> SchedulerState {
        self.scheduler.state()
    }

    pub fn visit_state(&self, node_id: &str) -> VisitState {
        self.scheduler.visit_state(node_id)
    }

    pub fn frontier(&self) -> &[String] {
        self.scheduler.frontier()
    }

    pub fn visited_order(&self) -> &[String] {
        self.scheduler.visited_order()
    }

    fn ensure_editable(&self) -> Result<()> {
        if self.scheduler.is_running() {
            return Err(GraphWalkError::TraversalActive);
        }
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Mutations (rejected while a traversal is running)
    // -----------------------------------------------------------------------

    pub fn add_node(&mut self, value: &str, position: Position) -> Result<String> {
        self.ensure_editable()?;
        Ok(self.model.add_node(value, position))
    }

    pub fn remove_node(&mut self, id: &str) -> Result<()> {
        self.ensure_editable()?;
        self.model.remove_node(id)
    }

    pub fn connect(&mut self, parent_id: &str, child_id: &str, side: ChildSide) -> Result<()> {
        self.ensure_editable()?;
        self.model.connect(parent_id, child_id, side)
    }

    pub fn set_position(&mut self, id: &str, position: Position) -> Result<()> {
        self.ensure_editable()?;
        self.model.set_position(id, position)
    }

    // -----------------------------------------------------------------------
    // Playback
    // -----------------------------------------------------------------------

    /// Computes the full step sequence for `traversal` from the root and
    /// starts replaying it at the configured tree cadence.
    ///
    /// An empty tree yields an empty sequence, which completes immediately.
    pub fn run(&mut self, traversal: TreeTraversal) -> Result<()> {
        let tick = self.config.tree_tick();
        self.run_with_tick(traversal, tick)
    }

    /// `run` with an explicit tick interval.
    pub fn run_with_tick(&mut self, traversal: TreeTraversal, tick: Duration) -> Result<()> {
        if self.scheduler.is_running() {
            return Err(GraphWalkError::AlreadyRunning);
        }
        let steps = compute_tree_steps(&self.model, traversal);
        debug!(
            traversal = traversal.as_str(),
            steps = steps.len(),
            "tree traversal starting"
        );
        self.scheduler.start(steps, tick)
    }

    pub fn stop(&mut self) {
        self.scheduler.stop();
    }

    pub fn reset(&mut self) {
        self.scheduler.reset();
    }

    pub fn poll(&mut self) {
        self.scheduler.poll();
    }

    pub fn poll_at(&mut self, now: Instant) {
        self.scheduler.poll_at(now);
    }

    pub fn step(&mut self) -> bool {
        self.scheduler.step()
    }

    pub fn subscribe(&mut self, sink: EventSink) {
        self.scheduler.subscribe(sink);
    }

    // -----------------------------------------------------------------------
    // Persistence
    // -----------------------------------------------------------------------

    /// Captures the current structure as a named snapshot.
    pub fn snapshot(&self, name: &str) -> TreeSnapshot {
        TreeSnapshot::capture(name, &self.model)
    }

    /// Replaces the structure from a snapshot and clears any finished run's
    /// visual state. Refused while a traversal is running.
    pub fn restore(&mut self, snapshot: &TreeSnapshot) -> Result<()> {
        self.ensure_editable()?;
        let model = snapshot.to_model()?;
        self.scheduler.reset();
        self.model = model;
        Ok(())
    }
}

impl Default for TreeSession {
    fn default() -> Self {
        Self::new()
    }
}
