use crate::math::Real;

/// Storage axis order of a [`VoxelGrid`]'s `(i, j, k)` indices.
///
/// The order is fixed at construction and must be preserved through
/// serialization: the binvox payload always iterates the model's `x` axis
/// slowest and its `y` axis fastest (`xzy`), so the codec transposes
/// `Xyz`-ordered grids on the fly and leaves `Xzy`-ordered grids as-is.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum AxisOrder {
    /// `(i, j, k)` means `(x, y, z)`.
    Xyz,
    /// `(i, j, k)` means `(x, z, y)`.
    Xzy,
}

/// A cubic boolean occupancy grid with geometric placement metadata.
///
/// `translate` and `scale` map voxel index space back onto the source model:
/// the center of voxel `(i, j, k)` sits at
/// `translate + scale · ((i + 0.5)/res, (j + 0.5)/res, (k + 0.5)/res)`.
///
/// Written once by the voxelizers, then read-only.
#[derive(Clone, Debug, PartialEq)]
pub struct VoxelGrid {
    resolution: usize,
    axis_order: AxisOrder,
    translate: [Real; 3],
    scale: Real,
    data: Vec<bool>,
}

impl VoxelGrid {
    /// Creates an empty grid of `resolution³` voxels with identity placement.
    pub fn new(resolution: usize, axis_order: AxisOrder) -> Self {
        VoxelGrid {
            resolution,
            axis_order,
            translate: [0.0; 3],
            scale: 1.0,
            data: vec![false; resolution * resolution * resolution],
        }
    }

    /// Rebuilds a grid from values flattened in `xzy` traversal order.
    ///
    /// The result is `Xyz`-ordered. `data` must hold exactly `resolution³`
    /// values.
    pub fn from_flat_xzy(resolution: usize, data: &[bool]) -> Self {
        assert_eq!(data.len(), resolution * resolution * resolution);
        let mut grid = Self::new(resolution, AxisOrder::Xyz);

        let mut flat = data.iter();
        for i in 0..resolution {
            for k in 0..resolution {
                for j in 0..resolution {
                    grid.set(i, j, k, *flat.next().unwrap());
                }
            }
        }

        grid
    }

    /// The number of voxels along each axis.
    #[inline]
    pub fn resolution(&self) -> usize {
        self.resolution
    }

    /// The axis order of this grid's indices.
    #[inline]
    pub fn axis_order(&self) -> AxisOrder {
        self.axis_order
    }

    /// The translation part of this grid's placement.
    #[inline]
    pub fn translate(&self) -> [Real; 3] {
        self.translate
    }

    /// The uniform scale part of this grid's placement.
    #[inline]
    pub fn scale(&self) -> Real {
        self.scale
    }

    /// Overwrites the placement metadata.
    pub fn set_placement(&mut self, translate: [Real; 3], scale: Real) {
        self.translate = translate;
        self.scale = scale;
    }

    #[inline]
    fn index(&self, i: usize, j: usize, k: usize) -> usize {
        (i * self.resolution + j) * self.resolution + k
    }

    /// The value of voxel `(i, j, k)`.
    #[inline]
    pub fn get(&self, i: usize, j: usize, k: usize) -> bool {
        self.data[self.index(i, j, k)]
    }

    /// Sets the value of voxel `(i, j, k)`.
    #[inline]
    pub fn set(&mut self, i: usize, j: usize, k: usize, value: bool) {
        let idx = self.index(i, j, k);
        self.data[idx] = value;
    }

    /// The number of occupied voxels.
    pub fn num_occupied(&self) -> usize {
        self.data.iter().filter(|v| **v).count()
    }

    /// OR-merges `other` into `self`.
    ///
    /// Panics if the two grids differ in resolution or axis order.
    pub fn union_with(&mut self, other: &VoxelGrid) {
        assert_eq!(self.resolution, other.resolution);
        assert_eq!(self.axis_order, other.axis_order);
        for (dst, src) in self.data.iter_mut().zip(&other.data) {
            *dst |= *src;
        }
    }

    /// Does this grid cover every voxel occupied in `other`?
    pub fn is_superset_of(&self, other: &VoxelGrid) -> bool {
        self.resolution == other.resolution
            && self.axis_order == other.axis_order
            && self
                .data
                .iter()
                .zip(&other.data)
                .all(|(own, theirs)| *own || !theirs)
    }

    /// The grid values flattened in the `xzy` traversal order of the binvox
    /// payload.
    pub fn flatten_xzy(&self) -> Vec<bool> {
        match self.axis_order {
            // Stored y-fastest: visit x, z, y instead.
            AxisOrder::Xyz => {
                let mut flat = Vec::with_capacity(self.data.len());
                for i in 0..self.resolution {
                    for k in 0..self.resolution {
                        for j in 0..self.resolution {
                            flat.push(self.get(i, j, k));
                        }
                    }
                }
                flat
            }
            // Storage already matches the payload order.
            AxisOrder::Xzy => self.data.clone(),
        }
    }
}
