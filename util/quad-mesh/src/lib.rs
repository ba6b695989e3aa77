pub mod buffer;
pub mod mesh;
pub mod vertex;

pub use buffer::{
	QuadMeshBuffer, QuadWindow, INDICES_PER_QUAD, TRIANGLES_PER_QUAD, VERTICES_PER_QUAD,
};
pub use mesh::VertexStream;
pub use vertex::Vertex;

use bevy::math::bounding::Aabb3d;
use bevy::prelude::*;

/// Axis-aligned cube centered at the origin with the given half extent.
pub fn centered_cube(half_extent: f32) -> Aabb3d {
	Aabb3d::new(Vec3::ZERO, Vec3::splat(half_extent))
}
