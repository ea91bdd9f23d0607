//! Non-persistent geometric queries.

pub use self::intersection_test::intersection_test_aabb_triangle;
pub use self::point::{point_in_triangle2d, PointClassification, TriMeshContainment};

pub mod intersection_test;
pub mod point;
