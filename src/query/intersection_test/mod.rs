//! Pairwise shape intersection tests.

pub use self::intersection_test_aabb_triangle::intersection_test_aabb_triangle;

mod intersection_test_aabb_triangle;
