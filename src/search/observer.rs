//! Progress hooks for exhaustive tree expansion

use super::tree::TreeStats;

/// Observer notified while a [`GameTree`](super::GameTree) is expanded.
///
/// Every method has an empty default, so implementors only override the
/// events they care about.
pub trait TreeObserver {
    /// Called after all nodes at `depth` have been created.
    fn on_level(&mut self, _depth: usize, _nodes: usize) {}

    /// Called once when expansion stops.
    fn on_finish(&mut self, _stats: &TreeStats) {}
}

/// Observer that ignores every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpObserver;

impl TreeObserver for NoOpObserver {}

/// Observer that records the size of each level (useful in tests and for
/// post-run reporting).
#[derive(Debug, Clone, Default)]
pub struct LevelRecorder {
    pub levels: Vec<(usize, usize)>,
    pub finished: Option<TreeStats>,
}

impl TreeObserver for LevelRecorder {
    fn on_level(&mut self, depth: usize, nodes: usize) {
        self.levels.push((depth, nodes));
    }

    fn on_finish(&mut self, stats: &TreeStats) {
        self.finished = Some(stats.clone());
    }
}
