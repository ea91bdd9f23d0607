//! Point-in-solid queries against a triangle mesh.

use crate::math::{Point, Point2, Real};
use crate::partitioning::TriangleHashGrid;
use crate::query::point::point_in_triangle2d;
use crate::shape::TriMesh;
use crate::utils::Rescale;

/// Point-in-solid queries against a closed triangle mesh.
///
/// Built once per mesh: all triangles are mapped into the working cube
/// `[0.5, resolution − 0.5]³` and hashed by their XY projections. A query
/// point is classified by counting the surface crossings of the vertical
/// (Z-axis) ray through it: an odd number of crossings above the point means
/// the point is inside. The crossings below the point provide an independent
/// parity that must agree for a watertight, non-self-intersecting mesh; a
/// disagreement is logged once per batch and the above-parity wins.
pub struct TriMeshContainment {
    resolution: usize,
    rescale: Rescale,
    triangles: Vec<[Point<Real>; 3]>,
    grid: TriangleHashGrid,
}

impl TriMeshContainment {
    /// The default working-cube (and hash grid) resolution.
    pub const DEFAULT_RESOLUTION: usize = 512;

    /// Builds the containment structure with the default working resolution.
    pub fn new(mesh: &TriMesh) -> Self {
        Self::with_resolution(mesh, Self::DEFAULT_RESOLUTION)
    }

    /// Builds the containment structure with `resolution` hash cells per axis.
    pub fn with_resolution(mesh: &TriMesh, resolution: usize) -> Self {
        let aabb = mesh.local_aabb();
        let rescale = Rescale::to_working_cube(&aabb, resolution);

        let triangles: Vec<[Point<Real>; 3]> = mesh
            .triangles()
            .map(|tri| [tri.a, tri.b, tri.c].map(|pt| rescale.apply(&pt)))
            .collect();

        let projected: Vec<[Point2<Real>; 3]> =
            triangles.iter().map(|tri| tri.map(|pt| pt.xy())).collect();
        let grid = TriangleHashGrid::new(&projected, resolution);

        TriMeshContainment {
            resolution,
            rescale,
            triangles,
            grid,
        }
    }

    /// The working-cube resolution this structure was built with.
    #[inline]
    pub fn resolution(&self) -> usize {
        self.resolution
    }

    /// Classifies a single point. See [`TriMeshContainment::contains_points`].
    pub fn contains_point(&self, pt: &Point<Real>) -> bool {
        self.contains_points(std::slice::from_ref(pt))[0]
    }

    /// Classifies every point, returning one inside flag per point.
    pub fn contains_points(&self, points: &[Point<Real>]) -> Vec<bool> {
        self.classify_points(points).contains
    }

    /// Classifies every point, also reporting the parity self-check.
    ///
    /// Points falling outside the mesh bounding box are rejected without
    /// touching the hash grid. Triangles whose projection is degenerate, and
    /// triangles edge-on to the Z axis, contribute no crossing; points
    /// landing exactly on a projected edge are resolved by the strict
    /// exclusion rule of [`point_in_triangle2d`]. None of these degeneracies
    /// raises an error.
    pub fn classify_points(&self, points: &[Point<Real>]) -> PointClassification {
        let mut contains = vec![false; points.len()];
        let bound = self.resolution as Real;

        // Rescale, and cull everything outside the working cube: such points
        // are outside the mesh bounding box, hence outside the mesh.
        let kept: Vec<(usize, Point<Real>)> = points
            .iter()
            .enumerate()
            .filter_map(|(i, pt)| {
                let p = self.rescale.apply(pt);
                let inside_cube = p.x >= 0.0
                    && p.x <= bound
                    && p.y >= 0.0
                    && p.y <= bound
                    && p.z >= 0.0
                    && p.z <= bound;
                inside_cube.then_some((i, p))
            })
            .collect();

        if kept.is_empty() {
            return PointClassification {
                contains,
                num_parity_mismatches: 0,
            };
        }

        let mut num_above = vec![0u32; kept.len()];
        let mut num_below = vec![0u32; kept.len()];

        for (k, (_, p)) in kept.iter().enumerate() {
            let p2 = p.xy();

            for tid in self.grid.cell_triangles(&p2) {
                let [t1, t2, t3] = &self.triangles[*tid as usize];

                if !point_in_triangle2d(&p2, &t1.xy(), &t2.xy(), &t3.xy()) {
                    continue;
                }

                let normal = (t3 - t1).cross(&(t2 - t1));
                if normal.z == 0.0 {
                    // Edge-on to the ray: no depth crossing.
                    continue;
                }

                // Signed intersection depth of the vertical ray with the
                // triangle plane, scaled by |normal.z| to avoid a division.
                let alpha = normal.xy().dot(&(t1.xy() - p2));
                let depth = t1.z * normal.z.abs() + alpha * normal.z.signum();

                if depth >= p.z * normal.z.abs() {
                    num_above[k] += 1;
                } else {
                    num_below[k] += 1;
                }
            }
        }

        let mut num_mismatches = 0usize;
        for (k, (i, _)) in kept.iter().enumerate() {
            let odd_above = num_above[k] % 2 == 1;
            let odd_below = num_below[k] % 2 == 1;
            if odd_above != odd_below {
                num_mismatches += 1;
            }
            contains[*i] = odd_above;
        }

        if num_mismatches > 0 {
            log::warn!(
                "up/down crossing parities disagree for {num_mismatches} of {} points; \
                 the mesh is probably not watertight",
                points.len()
            );
        }

        PointClassification {
            contains,
            num_parity_mismatches: num_mismatches,
        }
    }
}

/// The result of a batched containment classification.
pub struct PointClassification {
    /// One inside flag per query point.
    pub contains: Vec<bool>,
    /// How many points saw their up- and down-crossing parities disagree.
    ///
    /// Always zero for a watertight, non-self-intersecting mesh. Nonzero
    /// counts are logged, and each such point is resolved in favor of the
    /// up-crossing parity.
    pub num_parity_mismatches: usize,
}
