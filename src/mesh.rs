//! Dual-mesh graph capability
//!
//! The terrain pipeline runs over a planar dual mesh of regions (polygonal
//! cells), corners (the triangles dual to three regions) and directed sides
//! (half-edges between two regions, bordering two corners). The mesh itself is
//! built elsewhere; this trait is the read-only query surface the pipeline
//! needs.

/// Read-only oracle over a closed planar dual mesh.
///
/// Element ids are dense indices: regions in `0..num_regions()`, corners in
/// `0..num_corners()`, sides in `0..num_sides()`. Ghost elements (the
/// synthetic region outside the map boundary and the corners/sides that wrap
/// the hull around it) are ordered after the solid elements, so
/// `0..num_solid_*()` enumerates exactly the real map.
///
/// Adjacency queries write into a caller-supplied scratch buffer so traversal
/// loops can reuse one allocation. The enumeration order must be the same
/// every time for a given mesh value; the pipeline's reproducibility depends
/// on it.
///
/// Implementations must describe a structurally valid closed mesh: every side
/// has an opposite, and side/corner/region references are mutually consistent.
/// The pipeline does not validate this and misbehaves on a broken mesh.
pub trait MeshGraph {
    fn num_regions(&self) -> usize;
    fn num_corners(&self) -> usize;
    fn num_sides(&self) -> usize;

    /// Regions excluding the ghost region.
    fn num_solid_regions(&self) -> usize;
    /// Corners excluding the ghost-wrapping corners.
    fn num_solid_corners(&self) -> usize;
    /// Sides excluding the sides of ghost-wrapping corners.
    fn num_solid_sides(&self) -> usize;

    /// Side length of the square map, in map units. Positions returned by
    /// `region_x`/`region_y` fall inside `[0, map_size]` for solid elements.
    fn map_size(&self) -> f32;

    fn region_x(&self, r: usize) -> f32;
    fn region_y(&self, r: usize) -> f32;
    fn corner_x(&self, t: usize) -> f32;
    fn corner_y(&self, t: usize) -> f32;

    /// Regions sharing a side with `r`.
    fn regions_around_region(&self, r: usize, out: &mut Vec<usize>);
    /// Corners incident to `r`, each exactly once.
    fn corners_around_region(&self, r: usize, out: &mut Vec<usize>);
    /// The three outgoing sides of corner `t`.
    fn sides_around_corner(&self, t: usize, out: &mut Vec<usize>);

    /// Region the directed side starts from.
    fn side_begin_region(&self, s: usize) -> usize;
    /// Region the directed side points into.
    fn side_end_region(&self, s: usize) -> usize;
    /// Corner the side belongs to.
    fn side_inner_corner(&self, s: usize) -> usize;
    /// Corner on the far side, across the shared edge.
    fn side_outer_corner(&self, s: usize) -> usize;
    /// The same undirected edge traversed the other way.
    fn side_opposite(&self, s: usize) -> usize;

    /// True for solid regions on the outermost ring of the map.
    fn is_boundary_region(&self, r: usize) -> bool;
    /// True only for the ghost region.
    fn is_ghost_region(&self, r: usize) -> bool;
    /// Id of the ghost region, the flood-fill seed for ocean classification.
    fn ghost_region(&self) -> usize;
}
