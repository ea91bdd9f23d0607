//! A uniform grid bucketing 2D triangles by their bounding boxes.

use crate::math::{Point2, Real};

/// A uniform grid over `[0, resolution]²` hashing triangles by their 2D
/// axis-aligned bounding boxes.
///
/// Built once over a set of triangles projected to a plane; each cell
/// records the index of every triangle whose bounding box overlaps it.
/// Lookups return candidate supersets that the caller narrows with an exact
/// point-in-triangle test. Read-only after construction.
pub struct TriangleHashGrid {
    resolution: usize,
    cells: Vec<Vec<u32>>,
}

impl TriangleHashGrid {
    /// Builds the grid from triangles given as `[a, b, c]` 2D vertex triples.
    ///
    /// Each triangle is registered in every cell its bounding box overlaps,
    /// both ends inclusive, so a degenerate (zero-width or zero-height) box
    /// still spans at least one cell. Boxes are clamped to the grid, which
    /// keeps triangles lying outside `[0, resolution]²` findable from the
    /// nearest border cells.
    pub fn new(triangles: &[[Point2<Real>; 3]], resolution: usize) -> Self {
        assert!(resolution > 0, "the grid resolution must be positive");
        let mut cells = vec![Vec::new(); resolution * resolution];

        for (tid, tri) in triangles.iter().enumerate() {
            let (mut mins, mut maxs) = (tri[0], tri[0]);
            for pt in &tri[1..] {
                mins = mins.coords.inf(&pt.coords).into();
                maxs = maxs.coords.sup(&pt.coords).into();
            }

            let x0 = Self::cell_coord(mins.x, resolution);
            let x1 = Self::cell_coord(maxs.x, resolution);
            let y0 = Self::cell_coord(mins.y, resolution);
            let y1 = Self::cell_coord(maxs.y, resolution);

            for x in x0..=x1 {
                for y in y0..=y1 {
                    cells[x * resolution + y].push(tid as u32);
                }
            }
        }

        TriangleHashGrid { resolution, cells }
    }

    /// The grid resolution (cells per axis).
    #[inline]
    pub fn resolution(&self) -> usize {
        self.resolution
    }

    #[inline]
    fn cell_coord(x: Real, resolution: usize) -> usize {
        (x.floor().max(0.0) as usize).min(resolution - 1)
    }

    /// The indices of the triangles registered in the cell containing `pt`.
    ///
    /// Returns an empty slice for points outside `[0, resolution]²`; callers
    /// are expected to have rejected those already.
    #[inline]
    pub fn cell_triangles(&self, pt: &Point2<Real>) -> &[u32] {
        if pt.x < 0.0 || pt.y < 0.0 {
            return &[];
        }

        let (x, y) = (pt.x as usize, pt.y as usize);
        if x >= self.resolution || y >= self.resolution {
            return &[];
        }

        &self.cells[x * self.resolution + y]
    }

    /// Batched candidate lookup.
    ///
    /// Emits one `(point index, triangle index)` pair for every triangle
    /// registered in the cell of every query point, grouped by point. The
    /// result is a superset of the truly overlapping pairs; no overlapping
    /// pair is ever omitted.
    pub fn query(&self, points: &[Point2<Real>]) -> (Vec<u32>, Vec<u32>) {
        let mut point_indices = Vec::new();
        let mut triangle_indices = Vec::new();

        for (pid, pt) in points.iter().enumerate() {
            for tid in self.cell_triangles(pt) {
                point_indices.push(pid as u32);
                triangle_indices.push(*tid);
            }
        }

        (point_indices, triangle_indices)
    }
}
