use crate::config::SegmentConfig;
use crate::error::ConfigurationError;
use bevy::math::bounding::Aabb3d;
use bevy::prelude::*;
use quad_mesh::{centered_cube, QuadMeshBuffer, QuadWindow, Vertex};
use rayon::prelude::*;
use std::f32::consts::PI;

/// Torus-arc mesh generator.
///
/// Each quad is a pure function of its index and the config, so quads can be computed
/// on any worker in any order and the result is identical to a sequential run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TorusSegmentGenerator {
	config: SegmentConfig,
	u_step: f32,
	v_step: f32,
}

impl TorusSegmentGenerator {
	pub fn new(config: SegmentConfig) -> Result<Self, ConfigurationError> {
		config.validate()?;

		// indices are 32-bit, every vertex must stay addressable
		let vertex_count = config.quad_count() * quad_mesh::VERTICES_PER_QUAD;
		if vertex_count > u32::MAX as usize {
			return Err(ConfigurationError::TooManyVertices(vertex_count));
		}

		if config.pipe_radius >= config.curve_radius {
			log::warn!(
				"Pipe radius {} is not smaller than curve radius {}, the segment will intersect itself",
				config.pipe_radius,
				config.curve_radius
			);
		}

		Ok(Self {
			config,
			u_step: config.ring_distance / config.curve_radius,
			v_step: 2.0 * PI / config.pipe_segment_count as f32,
		})
	}

	pub fn config(&self) -> &SegmentConfig {
		&self.config
	}

	/// Angular step along the curve axis, in radians.
	pub fn u_step(&self) -> f32 {
		self.u_step
	}

	/// Angular step around the cross-section, in radians.
	pub fn v_step(&self) -> f32 {
		self.v_step
	}

	pub fn quad_count(&self) -> usize {
		self.config.quad_count()
	}

	pub fn vertex_count(&self) -> usize {
		self.quad_count() * quad_mesh::VERTICES_PER_QUAD
	}

	pub fn index_count(&self) -> usize {
		self.quad_count() * quad_mesh::INDICES_PER_QUAD
	}

	/// Outer radius of the torus.
	pub fn radius(&self) -> f32 {
		self.config.curve_radius + self.config.pipe_radius
	}

	/// Conservative bound derived from the config alone.
	pub fn bounds(&self) -> Aabb3d {
		centered_cube(self.radius())
	}

	/// Point on the torus at curve angle `u` and cross-section angle `v`, both in radians.
	pub fn point(&self, u: f32, v: f32) -> Vec3 {
		let r = self.config.curve_radius + self.config.pipe_radius * v.cos();
		Vec3::new(r * u.sin(), r * u.cos(), self.config.pipe_radius * v.sin())
	}

	/// Computes one quad's four vertices and two triangles.
	///
	/// Quads are laid out cross-section first: `v = index % pipe_segment_count`, `u = index / pipe_segment_count`.
	pub fn execute(&self, quad: &mut QuadWindow) {
		let index = quad.index();
		let pipe_segment_count = self.config.pipe_segment_count as usize;
		let v = (index % pipe_segment_count) as f32;
		let u = (index / pipe_segment_count) as f32;

		let p0 = self.point(u * self.u_step, v * self.v_step);
		let p1 = self.point((u + 1.0) * self.u_step, v * self.v_step);
		let p2 = self.point(u * self.u_step, (v + 1.0) * self.v_step);
		let p3 = self.point((u + 1.0) * self.u_step, (v + 1.0) * self.v_step);

		// flat shading: the whole quad shares the normal at p0
		let normal = (p2 - p0).cross(p1 - p0).normalize();

		quad.set_vertex(0, &Vertex::new(p0, normal, Vec2::new(0.0, 0.0)));
		quad.set_vertex(1, &Vertex::new(p1, normal, Vec2::new(0.0, 1.0)));
		quad.set_vertex(2, &Vertex::new(p2, normal, Vec2::new(1.0, 0.0)));
		quad.set_vertex(3, &Vertex::new(p3, normal, Vec2::new(1.0, 1.0)));

		quad.set_triangle(0, [0, 1, 2]);
		quad.set_triangle(1, [1, 3, 2]);
	}

	/// Fills `buffer` in parallel. The buffer must be sized exactly for this config.
	///
	/// Sizing is checked before any quad is written, so a rejected buffer is left untouched.
	pub fn generate_into(&self, buffer: &mut QuadMeshBuffer) -> Result<(), ConfigurationError> {
		if buffer.vertex_count() != self.vertex_count() || buffer.index_count() != self.index_count()
		{
			return Err(ConfigurationError::BufferSizeMismatch {
				expected_vertices: self.vertex_count(),
				actual_vertices: buffer.vertex_count(),
				expected_indices: self.index_count(),
				actual_indices: buffer.index_count(),
			});
		}

		buffer.set_bounds(self.bounds());
		self.fill(buffer);

		Ok(())
	}

	/// Allocates a correctly sized buffer and fills it.
	pub fn generate(&self) -> QuadMeshBuffer {
		let mut buffer = QuadMeshBuffer::new(self.quad_count(), self.bounds());
		self.fill(&mut buffer);
		buffer
	}

	fn fill(&self, buffer: &mut QuadMeshBuffer) {
		let start_time = std::time::Instant::now();
		buffer.quads_mut().for_each(|mut quad| self.execute(&mut quad));
		let duration = start_time.elapsed();
		log::debug!("Generated {} quads in {:?}", self.quad_count(), duration);
	}
}
