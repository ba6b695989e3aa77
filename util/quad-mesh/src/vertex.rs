use bevy::prelude::*;

/// A single vertex as written by a quad generator.
///
/// The tangent's w component is reserved and generators currently leave the whole tangent zeroed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vertex {
	pub position: Vec3,
	pub normal: Vec3,
	pub tangent: Vec4,
	pub tex_coord0: Vec2,
}

impl Vertex {
	pub fn new(position: Vec3, normal: Vec3, tex_coord0: Vec2) -> Self {
		Self { position, normal, tangent: Vec4::ZERO, tex_coord0 }
	}

	pub fn with_tangent(mut self, tangent: Vec4) -> Self {
		self.tangent = tangent;
		self
	}
}

impl Default for Vertex {
	fn default() -> Self {
		Self { position: Vec3::ZERO, normal: Vec3::ZERO, tangent: Vec4::ZERO, tex_coord0: Vec2::ZERO }
	}
}
