//! Per-tick spatial index over agent locations.
//!
//! # Rebuild, don't update
//!
//! Every agent may move every tick, so the index is thrown away and
//! bulk-loaded again from the full location set at the start of each tick
//! (`O(N log N)`, cheaper than `N` removals plus `N` inserts).  Entries hold
//! the agent's [`AgentId`] and the location it had when the index was built;
//! they never point back into the population, so callers resolve ids against
//! their own arena and see live agent state through stale index positions.
//!
//! # Queries
//!
//! [`SpatialIndex::within`] returns every entry whose indexed location is at
//! Euclidean distance `<= radius` from the query point (closed ball).

use rstar::{PointDistance, RTree, RTreeObject, AABB};

use ss_core::{AgentId, Point2};

// ── R-tree entry ──────────────────────────────────────────────────────────────

/// Entry stored in the R-tree: a 2-D `[x, y]` point with the owning agent.
#[derive(Clone, Debug)]
struct AgentEntry {
    point: [f64; 2],
    id: AgentId,
}

impl RTreeObject for AgentEntry {
    type Envelope = AABB<[f64; 2]>;
    fn envelope(&self) -> Self::Envelope {
        AABB::from_point(self.point)
    }
}

impl PointDistance for AgentEntry {
    fn distance_2(&self, point: &[f64; 2]) -> f64 {
        let dx = self.point[0] - point[0];
        let dy = self.point[1] - point[1];
        dx * dx + dy * dy
    }
}

// ── SpatialIndex ──────────────────────────────────────────────────────────────

/// Radius-query index over a snapshot of agent locations.
#[derive(Default)]
pub struct SpatialIndex {
    tree: RTree<AgentEntry>,
}

impl SpatialIndex {
    /// An index with no entries.  Every query returns nothing.
    pub fn new() -> Self {
        Self { tree: RTree::new() }
    }

    /// Build an index from `(id, location)` pairs.
    pub fn from_locations<I>(locations: I) -> Self
    where
        I: IntoIterator<Item = (AgentId, Point2)>,
    {
        let mut index = Self::new();
        index.rebuild(locations);
        index
    }

    /// Discard the current entries and bulk-load `locations`.
    pub fn rebuild<I>(&mut self, locations: I)
    where
        I: IntoIterator<Item = (AgentId, Point2)>,
    {
        let entries: Vec<AgentEntry> = locations
            .into_iter()
            .map(|(id, p)| AgentEntry { point: p.to_array(), id })
            .collect();
        self.tree = RTree::bulk_load(entries);
    }

    pub fn len(&self) -> usize {
        self.tree.size()
    }

    pub fn is_empty(&self) -> bool {
        self.tree.size() == 0
    }

    /// Iterator over the agents indexed within `radius` of `center`
    /// (boundary inclusive).  Order is unspecified.
    pub fn within(&self, center: Point2, radius: f64) -> impl Iterator<Item = AgentId> + '_ {
        self.tree
            .locate_within_distance(center.to_array(), radius * radius)
            .map(|e| e.id)
    }

    /// Same as [`within`](Self::within), collected and sorted by id so the
    /// result is deterministic.
    pub fn within_sorted(&self, center: Point2, radius: f64) -> Vec<AgentId> {
        let mut ids: Vec<AgentId> = self.within(center, radius).collect();
        ids.sort_unstable();
        ids
    }

    /// The indexed agent closest to `center`, if any.
    pub fn nearest(&self, center: Point2) -> Option<AgentId> {
        self.tree.nearest_neighbor(&center.to_array()).map(|e| e.id)
    }
}
