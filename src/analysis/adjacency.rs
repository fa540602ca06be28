use slotmap::SlotMap;
use tracing::{debug, info};

use crate::math::{GeometricPoint, SpatialGrid};
use crate::mesh::Mesh;

use super::AnalysisParams;

slotmap::new_key_type! {
    /// Unique identifier for a distinct vertex in an [`AdjacencyMap`].
    pub struct VertexId;
}

/// A distinct vertex position and the positions it shares a triangle with.
#[derive(Debug, Clone)]
pub struct VertexEntry {
    /// Canonical position: the first corner seen at this location.
    pub position: GeometricPoint,
    /// Neighboring positions, pairwise distinct under the map's tolerance.
    pub neighbors: Vec<GeometricPoint>,
    pub(super) ordinal: usize,
}

impl VertexEntry {
    /// Position of this entry in first-seen order.
    #[must_use]
    pub fn ordinal(&self) -> usize {
        self.ordinal
    }

    /// Returns `true` if a neighbor within `tolerance` of `point` is already recorded.
    #[must_use]
    pub fn has_neighbor(&self, point: &GeometricPoint, tolerance: f32) -> bool {
        self.neighbors.iter().any(|n| n.approx_eq(point, tolerance))
    }
}

/// Undirected vertex adjacency of a triangle mesh, keyed by approximate position.
///
/// Corners closer than the tolerance collapse into a single entry regardless
/// of which triangle or buffer slot they came from. Entries iterate in the
/// order their positions were first encountered.
#[derive(Debug, Clone)]
pub struct AdjacencyMap {
    tolerance: f32,
    entries: SlotMap<VertexId, VertexEntry>,
    order: Vec<VertexId>,
    grid: SpatialGrid<VertexId>,
}

impl AdjacencyMap {
    /// Creates an empty map using the tolerance from `params`.
    #[must_use]
    pub fn new(params: AnalysisParams) -> Self {
        Self {
            tolerance: params.tolerance,
            entries: SlotMap::with_key(),
            order: Vec::new(),
            grid: SpatialGrid::new(params.tolerance),
        }
    }

    /// The tolerance used to merge positions.
    #[must_use]
    pub fn tolerance(&self) -> f32 {
        self.tolerance
    }

    /// Number of distinct vertices.
    #[must_use]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Returns `true` if no vertices have been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Returns the entry for `id`, if present.
    #[must_use]
    pub fn get(&self, id: VertexId) -> Option<&VertexEntry> {
        self.entries.get(id)
    }

    /// Finds the first-seen entry within tolerance of `point`.
    ///
    /// Only the grid cells around `point` are searched, but the result is the
    /// same as scanning every entry in first-seen order.
    #[must_use]
    pub fn find(&self, point: &GeometricPoint) -> Option<VertexId> {
        if !point.is_finite() {
            // Non-finite distances never compare within tolerance.
            return None;
        }
        self.grid
            .neighborhood(point)
            .filter_map(|id| self.entries.get(id).map(|entry| (id, entry)))
            .filter(|(_, entry)| entry.position.approx_eq(point, self.tolerance))
            .min_by_key(|(_, entry)| entry.ordinal)
            .map(|(id, _)| id)
    }

    /// Returns the neighbors recorded for the vertex at `point`.
    #[must_use]
    pub fn neighbors_of(&self, point: &GeometricPoint) -> Option<&[GeometricPoint]> {
        self.find(point)
            .and_then(|id| self.entries.get(id))
            .map(|entry| entry.neighbors.as_slice())
    }

    /// Iterates over all entries in first-seen order.
    pub fn iter(&self) -> impl Iterator<Item = (VertexId, &VertexEntry)> + '_ {
        self.order
            .iter()
            .filter_map(|&id| self.entries.get(id).map(|entry| (id, entry)))
    }

    /// Records that `corner` shares a triangle with each of `others`.
    ///
    /// Opens a new entry when no existing one lies within tolerance of
    /// `corner`. Candidates already present, or coincident with the vertex
    /// itself, are skipped.
    pub(crate) fn relate(
        &mut self,
        corner: GeometricPoint,
        others: [GeometricPoint; 2],
    ) -> VertexId {
        let id = match self.find(&corner) {
            Some(id) => id,
            None => self.open_entry(corner),
        };

        let tolerance = self.tolerance;
        if let Some(entry) = self.entries.get_mut(id) {
            for other in others {
                let is_self = other.approx_eq(&entry.position, tolerance)
                    || other.approx_eq(&corner, tolerance);
                if !is_self && !entry.has_neighbor(&other, tolerance) {
                    entry.neighbors.push(other);
                }
            }
        }
        id
    }

    fn open_entry(&mut self, position: GeometricPoint) -> VertexId {
        let id = self.entries.insert(VertexEntry {
            position,
            neighbors: Vec::with_capacity(6),
            ordinal: self.order.len(),
        });
        self.order.push(id);
        if position.is_finite() {
            self.grid.insert(&position, id);
        }
        id
    }
}

/// Builds the vertex adjacency of a mesh.
///
/// Every triangle relates each of its corners to the other two. Corners are
/// matched by approximate position, so coincident corners from different
/// triangles share one entry. Always rebuilds from scratch.
pub struct AnalyzeVertices {
    params: AnalysisParams,
}

impl AnalyzeVertices {
    /// Creates a new `AnalyzeVertices` operation.
    #[must_use]
    pub fn new(params: AnalysisParams) -> Self {
        Self { params }
    }

    /// Executes the analysis, returning the adjacency of `mesh`.
    #[must_use]
    pub fn execute(&self, mesh: &Mesh) -> AdjacencyMap {
        debug!(
            vertices = mesh.vertices().len(),
            tolerance = self.params.tolerance,
            "building vertex adjacency"
        );

        let mut map = AdjacencyMap::new(self.params);
        for tri in mesh.triangles() {
            let [a, b, c] = tri.corners();
            map.relate(a, [b, c]);
            map.relate(b, [a, c]);
            map.relate(c, [a, b]);
        }

        info!(
            distinct = map.len(),
            cells = map.grid.occupied_cells(),
            "vertex adjacency built"
        );
        map
    }
}
