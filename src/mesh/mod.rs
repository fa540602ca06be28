mod triangle;

pub use triangle::Triangle;

use std::fmt;

use tracing::warn;

use crate::analysis::{
    AdjacencyMap, AnalysisParams, AnalyzeVertices, CriticalPoints, FindCriticalPoints,
};
use crate::math::GeometricPoint;

/// Debug colors assigned to the first, second and third corner of every triangle.
pub const CORNER_COLORS: [[f32; 3]; 3] = [[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]];

/// A triangle soup with derived adjacency and critical points.
///
/// Corners are appended as given and never deduplicated, so the vertex and
/// index buffers always hold three entries per triangle. Deduplication only
/// happens inside the adjacency built by [`Mesh::analyze_vertices`].
///
/// ```text
/// add_triangle (xN)  ->  analyze_vertices  ->  find_critical_points
/// ```
#[derive(Debug, Clone, Default)]
pub struct Mesh {
    vertices: Vec<GeometricPoint>,
    triangle_indices: Vec<u32>,
    face_colors: Vec<f32>,
    params: AnalysisParams,
    adjacency: Option<AdjacencyMap>,
    stale: bool,
    critical: CriticalPoints,
}

impl Mesh {
    /// Creates an empty mesh with default analysis parameters.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the analysis parameters used by [`Mesh::analyze_vertices`].
    #[must_use]
    pub fn with_params(mut self, params: AnalysisParams) -> Self {
        self.params = params;
        self
    }

    /// Builds a mesh from a sequence of triangles.
    #[must_use]
    pub fn from_triangles<I>(triangles: I) -> Self
    where
        I: IntoIterator<Item = Triangle>,
    {
        let mut mesh = Self::new();
        for tri in triangles {
            mesh.add_triangle(tri);
        }
        mesh
    }

    /// The analysis parameters in effect.
    #[must_use]
    pub fn params(&self) -> AnalysisParams {
        self.params
    }

    /// Appends a triangle's three corners with the fixed debug palette.
    pub fn add_triangle(&mut self, triangle: Triangle) {
        for (corner, color) in triangle.corners().into_iter().zip(CORNER_COLORS) {
            self.add_vertex(corner, color);
        }
    }

    /// Appends a single corner with its color.
    ///
    /// Three consecutive calls form one triangle. Indices are `u32`, so a
    /// mesh holds at most `u32::MAX + 1` corners; further corners are
    /// dropped with a warning.
    pub fn add_vertex(&mut self, point: GeometricPoint, color: [f32; 3]) {
        let Some(index) = next_index(self.vertices.len()) else {
            warn!(corners = self.vertices.len(), "index buffer full, corner dropped");
            return;
        };
        self.vertices.push(point);
        self.triangle_indices.push(index);
        self.face_colors.extend_from_slice(&color);
        if self.adjacency.is_some() {
            self.stale = true;
        }
    }

    /// Vertex positions, one per inserted corner.
    #[must_use]
    pub fn vertices(&self) -> &[GeometricPoint] {
        &self.vertices
    }

    /// Triangle index buffer; each consecutive triple is one face.
    #[must_use]
    pub fn triangle_indices(&self) -> &[u32] {
        &self.triangle_indices
    }

    /// Flat RGB colors, one triple per vertex.
    #[must_use]
    pub fn face_colors(&self) -> &[f32] {
        &self.face_colors
    }

    /// Number of complete triangles.
    #[must_use]
    pub fn triangle_count(&self) -> usize {
        self.triangle_indices.len() / 3
    }

    /// Returns `true` if the mesh has no triangles.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.triangle_count() == 0
    }

    /// Returns triangle `index`, if it exists.
    #[must_use]
    pub fn triangle(&self, index: usize) -> Option<Triangle> {
        let start = index.checked_mul(3)?;
        let corners = self.triangle_indices.get(start..start.checked_add(3)?)?;
        self.triangle_from_indices(corners)
    }

    /// Iterates over all complete triangles in insertion order.
    pub fn triangles(&self) -> impl Iterator<Item = Triangle> + '_ {
        self.triangle_indices
            .chunks_exact(3)
            .filter_map(|corners| self.triangle_from_indices(corners))
    }

    fn triangle_from_indices(&self, corners: &[u32]) -> Option<Triangle> {
        let vertex = |i: usize| self.vertices.get(*corners.get(i)? as usize).copied();
        Some(Triangle::new(vertex(0)?, vertex(1)?, vertex(2)?))
    }

    /// Rebuilds the vertex adjacency from every triangle.
    ///
    /// Any previous adjacency is discarded.
    pub fn analyze_vertices(&mut self) -> &AdjacencyMap {
        let map = AnalyzeVertices::new(self.params).execute(self);
        self.stale = false;
        self.adjacency.insert(map)
    }

    /// Classifies vertices of the current adjacency as minima or maxima.
    ///
    /// Call [`Mesh::analyze_vertices`] first. Without an adjacency, or on an
    /// empty mesh, the result is empty.
    pub fn find_critical_points(&mut self) -> &CriticalPoints {
        self.critical = if let Some(adjacency) = &self.adjacency {
            if self.stale {
                warn!("classifying with an adjacency built before the latest triangles");
            }
            FindCriticalPoints::new().execute(adjacency)
        } else {
            warn!("critical points requested before vertex analysis");
            CriticalPoints::default()
        };
        &self.critical
    }

    /// The adjacency from the last [`Mesh::analyze_vertices`] call.
    #[must_use]
    pub fn adjacency(&self) -> Option<&AdjacencyMap> {
        self.adjacency.as_ref()
    }

    /// Returns `true` if triangles were added after the last analysis.
    #[must_use]
    pub fn is_stale(&self) -> bool {
        self.stale
    }

    /// Results of the last [`Mesh::find_critical_points`] call.
    #[must_use]
    pub fn critical_points(&self) -> &CriticalPoints {
        &self.critical
    }

    /// Local minima of the height field.
    #[must_use]
    pub fn minima(&self) -> &[GeometricPoint] {
        &self.critical.minima
    }

    /// Local maxima of the height field.
    #[must_use]
    pub fn maxima(&self) -> &[GeometricPoint] {
        &self.critical.maxima
    }

    /// Saddle points. Always empty.
    #[must_use]
    pub fn saddles(&self) -> &[GeometricPoint] {
        &self.critical.saddles
    }
}

/// Index buffer entry for the corner stored at `len`, if it fits in `u32`.
fn next_index(len: usize) -> Option<u32> {
    u32::try_from(len).ok()
}

impl fmt::Display for Mesh {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} triangles, {} vertices",
            self.triangle_count(),
            self.vertices.len()
        )?;
        if let Some(adjacency) = &self.adjacency {
            write!(f, ", {} unique", adjacency.len())?;
        }
        write!(
            f,
            ", {} minima, {} maxima",
            self.critical.minima.len(),
            self.critical.maxima.len()
        )
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn p(x: f32, y: f32, z: f32) -> GeometricPoint {
        GeometricPoint::new(x, y, z)
    }

    fn holds(list: &[GeometricPoint], q: &GeometricPoint) -> bool {
        list.iter().any(|x| x.approx_eq(q, 1e-5))
    }

    fn two_triangles() -> Mesh {
        Mesh::from_triangles([
            Triangle::new(p(0.0, 0.0, 0.0), p(1.0, 0.0, 0.0), p(0.0, 1.0, 0.0)),
            Triangle::new(p(1.0, 0.0, 0.0), p(0.0, 1.0, 0.0), p(1.0, 1.0, 2.0)),
        ])
    }

    #[test]
    fn buffers_grow_three_per_triangle() {
        let mut mesh = Mesh::new();
        for t in 0..5u8 {
            let z = f32::from(t);
            mesh.add_triangle(Triangle::new(p(0.0, 0.0, z), p(1.0, 0.0, z), p(0.0, 1.0, z)));
            let n = usize::from(t) + 1;
            assert_eq!(mesh.vertices().len(), 3 * n);
            assert_eq!(mesh.triangle_indices().len(), 3 * n);
            assert_eq!(mesh.face_colors().len(), 9 * n);
            assert_eq!(mesh.triangle_count(), n);
        }
    }

    #[test]
    fn duplicate_corners_are_kept() {
        let mesh = two_triangles();
        assert_eq!(mesh.vertices().len(), 6);
        assert_eq!(mesh.triangle_indices(), &[0_u32, 1, 2, 3, 4, 5]);
    }

    #[test]
    fn corners_get_palette_colors() {
        let mesh = two_triangles();
        assert_eq!(
            &mesh.face_colors()[..9],
            &[1.0_f32, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0]
        );
        assert_eq!(&mesh.face_colors()[9..], &mesh.face_colors()[..9]);
    }

    #[test]
    fn degenerate_triangles_are_accepted() {
        let mut mesh = Mesh::new();
        mesh.add_triangle(Triangle::new(p(1.0, 1.0, 1.0), p(1.0, 1.0, 1.0), p(1.0, 1.0, 1.0)));
        assert_eq!(mesh.triangle_count(), 1);
        assert_eq!(mesh.analyze_vertices().len(), 1);
    }

    #[test]
    fn triangle_lookup_round_trips() {
        let mesh = two_triangles();
        let t = mesh.triangle(1).unwrap();
        assert!(t.v2.approx_eq(&p(1.0, 1.0, 2.0), 1e-5));
        assert!(mesh.triangle(2).is_none());
        assert!(mesh.triangle(usize::MAX).is_none());
        assert!(mesh.triangle(usize::MAX / 3).is_none());
        assert!(Mesh::new().triangle(usize::MAX).is_none());
        assert_eq!(mesh.triangles().count(), 2);
    }

    #[test]
    fn corner_indices_stop_at_u32_range() {
        assert_eq!(next_index(0), Some(0));
        assert_eq!(next_index(u32::MAX as usize), Some(u32::MAX));
        assert_eq!(next_index(u32::MAX as usize + 1), None);
    }

    #[test]
    fn shared_edge_end_to_end() {
        let mut mesh = two_triangles();
        let (a, b, c, d) = (
            p(0.0, 0.0, 0.0),
            p(1.0, 0.0, 0.0),
            p(0.0, 1.0, 0.0),
            p(1.0, 1.0, 2.0),
        );

        let adjacency = mesh.analyze_vertices();
        assert_eq!(adjacency.len(), 4);
        let around_b = adjacency.neighbors_of(&b).unwrap();
        assert_eq!(around_b.len(), 3);
        for q in [a, c, d] {
            assert!(holds(around_b, &q));
        }

        mesh.find_critical_points();
        assert!(holds(mesh.maxima(), &d));
        assert!(!holds(mesh.minima(), &d));
        assert!(holds(mesh.minima(), &a));
        assert!(mesh.saddles().is_empty());
    }

    #[test]
    fn tolerance_merge_end_to_end() {
        let mut mesh = Mesh::from_triangles([
            Triangle::new(p(0.0, 0.0, 0.0), p(1.0, 0.0, 0.0), p(0.0, 1.0, 0.0)),
            Triangle::new(p(0.0, 0.0, 0.000_001), p(0.0, -1.0, 0.0), p(-1.0, 0.0, 0.0)),
        ]);
        assert_eq!(mesh.analyze_vertices().len(), 5);
        mesh.find_critical_points();
        // The merged origin sees one lower and one higher neighbor.
        assert!(!holds(mesh.minima(), &p(0.0, 0.0, 0.0)));
        assert!(!holds(mesh.maxima(), &p(0.0, 0.0, 0.0)));
    }

    #[test]
    fn analysis_is_idempotent() {
        let mut mesh = two_triangles();
        let first = mesh.analyze_vertices().clone();
        let second = mesh.analyze_vertices();

        assert_eq!(first.len(), second.len());
        for (_, entry) in first.iter() {
            let other = second.neighbors_of(&entry.position).unwrap();
            assert_eq!(other.len(), entry.neighbors.len());
            for n in &entry.neighbors {
                assert!(holds(other, n));
            }
        }
    }

    #[test]
    fn reanalysis_picks_up_new_triangles() {
        let mut mesh = two_triangles();
        mesh.analyze_vertices();
        mesh.add_triangle(Triangle::new(p(1.0, 1.0, 2.0), p(2.0, 5.0, 2.0), p(1.0, 0.0, 0.0)));
        assert!(mesh.is_stale());

        assert_eq!(mesh.analyze_vertices().len(), 5);
        assert!(!mesh.is_stale());
        mesh.find_critical_points();
        assert!(holds(mesh.maxima(), &p(2.0, 5.0, 2.0)));
        // D now has a higher neighbor and drops out.
        assert!(!holds(mesh.maxima(), &p(1.0, 1.0, 2.0)));
    }

    #[test]
    fn empty_mesh_classifies_to_nothing() {
        let mut mesh = Mesh::new();
        assert!(mesh.is_empty());
        mesh.analyze_vertices();
        let points = mesh.find_critical_points();
        assert!(points.minima.is_empty());
        assert!(points.maxima.is_empty());
    }

    #[test]
    fn classification_before_analysis_is_empty() {
        let mut mesh = two_triangles();
        assert!(mesh.find_critical_points().minima.is_empty());
        assert!(mesh.adjacency().is_none());
    }

    #[test]
    fn custom_params_flow_into_analysis() {
        let params = AnalysisParams::new(0.1).unwrap();
        let mut mesh = Mesh::from_triangles([
            Triangle::new(p(0.0, 0.0, 0.0), p(1.0, 0.0, 0.0), p(0.0, 1.0, 0.0)),
            Triangle::new(p(0.05, 0.0, 0.0), p(0.0, -1.0, 0.0), p(-1.0, 0.0, 0.0)),
        ])
        .with_params(params);
        assert_eq!(mesh.analyze_vertices().len(), 5);
        approx::assert_relative_eq!(mesh.adjacency().unwrap().tolerance(), 0.1);
    }

    #[test]
    fn display_summarizes_pipeline() {
        let mut mesh = two_triangles();
        assert_eq!(mesh.to_string(), "2 triangles, 6 vertices, 0 minima, 0 maxima");
        mesh.analyze_vertices();
        mesh.find_critical_points();
        assert_eq!(
            mesh.to_string(),
            "2 triangles, 6 vertices, 4 unique, 2 minima, 2 maxima"
        );
    }
}
