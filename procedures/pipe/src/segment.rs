pub mod align;

use crate::config::{PipeSettings, SegmentConfig};
use crate::decoration::{Decoration, DecorationGenerator};
use crate::error::PipeError;
use crate::generator::TorusSegmentGenerator;
use bevy::prelude::*;
use quad_mesh::QuadMeshBuffer;
use rand::{Rng, RngCore};

/// The randomized part of a segment's shape.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CurveParams {
	pub curve_radius: f32,
	pub curve_segment_count: u32,
}

impl CurveParams {
	pub fn new(curve_radius: f32, curve_segment_count: u32) -> Self {
		Self { curve_radius, curve_segment_count }
	}

	/// Draws both parameters uniformly from the settings' inclusive ranges.
	pub fn draw(settings: &PipeSettings, rng: &mut dyn RngCore) -> Result<Self, PipeError> {
		settings.validate()?;

		let curve_radius = rng.random_range(settings.min_curve_radius..=settings.max_curve_radius);
		let curve_segment_count = rng
			.random_range(settings.min_curve_segment_count..=settings.max_curve_segment_count);

		Ok(Self { curve_radius, curve_segment_count })
	}
}

/// One torus-arc piece of the tunnel.
///
/// A segment starts empty, gets its curve and mesh from [`PipeSegment::generate`],
/// and is placed after its predecessor with [`PipeSegment::align_with`].
/// Regeneration replaces the mesh and drops any decorations wholesale.
#[derive(Component, Debug, Clone)]
pub struct PipeSegment {
	settings: PipeSettings,
	config: Option<SegmentConfig>,
	mesh: Option<QuadMeshBuffer>,
	relative_rotation: f32,
	transform: Transform,
	decorations: Vec<Decoration>,
}

impl PipeSegment {
	pub fn new(settings: PipeSettings) -> Self {
		Self {
			settings,
			config: None,
			mesh: None,
			relative_rotation: 0.0,
			transform: Transform::IDENTITY,
			decorations: Vec::new(),
		}
	}

	/// Draws a new curve, rebuilds the mesh, then lets one randomly chosen generator decorate the segment.
	///
	/// Decorations only run when the settings enable items and at least one generator is given.
	pub fn generate(
		&mut self,
		rng: &mut dyn RngCore,
		generators: &[Box<dyn DecorationGenerator>],
	) -> Result<(), PipeError> {
		let curve = CurveParams::draw(&self.settings, rng)?;
		self.generate_with(curve)?;

		if self.settings.enable_items && !generators.is_empty() {
			let generator = &generators[rng.random_range(0..generators.len())];
			let decorations = generator.generate_decorations(self, rng);
			log::debug!("Decorated segment with {} items", decorations.len());
			self.decorations = decorations;
		}

		Ok(())
	}

	/// Same as [`PipeSegment::generate`] without any decorations.
	pub fn generate_bare(&mut self, rng: &mut dyn RngCore) -> Result<(), PipeError> {
		self.generate(rng, &[])
	}

	/// Rebuilds the mesh from fixed curve parameters.
	pub fn generate_with(&mut self, curve: CurveParams) -> Result<(), PipeError> {
		let config = self.settings.segment_config(curve.curve_radius, curve.curve_segment_count);
		let generator = TorusSegmentGenerator::new(config)?;

		self.decorations.clear();
		self.mesh = Some(generator.generate());
		self.config = Some(config);

		log::debug!(
			"Generated segment with curve radius {}, {} rings, curve angle {}",
			config.curve_radius,
			config.curve_segment_count,
			config.curve_angle()
		);

		Ok(())
	}

	pub fn settings(&self) -> &PipeSettings {
		&self.settings
	}

	pub fn is_generated(&self) -> bool {
		self.config.is_some()
	}

	/// The generator input of the last generation.
	pub fn config(&self) -> Option<&SegmentConfig> {
		self.config.as_ref()
	}

	pub fn curve_radius(&self) -> Option<f32> {
		self.config.map(|config| config.curve_radius)
	}

	pub fn curve_segment_count(&self) -> Option<u32> {
		self.config.map(|config| config.curve_segment_count)
	}

	/// Angle swept along the curve, in degrees.
	pub fn curve_angle(&self) -> Option<f32> {
		self.config.map(|config| config.curve_angle())
	}

	pub fn pipe_radius(&self) -> f32 {
		self.settings.pipe_radius
	}

	/// Twist around the junction applied by the last alignment, in degrees.
	pub fn relative_rotation(&self) -> f32 {
		self.relative_rotation
	}

	/// Placement in the frame shared with the predecessor.
	pub fn transform(&self) -> Transform {
		self.transform
	}

	pub fn set_transform(&mut self, transform: Transform) {
		self.transform = transform;
	}

	pub fn mesh(&self) -> Option<&QuadMeshBuffer> {
		self.mesh.as_ref()
	}

	/// Hands the finished buffer over to a consumer. The segment keeps its curve and placement.
	pub fn take_mesh(&mut self) -> Option<QuadMeshBuffer> {
		self.mesh.take()
	}

	pub fn decorations(&self) -> &[Decoration] {
		&self.decorations
	}

	/// Vertex positions of the first ring, one per cross-section facet, in local space.
	///
	/// Computed from the curve alone, so the rings stay available after the mesh is handed off.
	pub fn entry_ring(&self) -> Option<Vec<Vec3>> {
		self.ring_at(0)
	}

	/// Vertex positions of the last ring, one per cross-section facet, in local space.
	pub fn exit_ring(&self) -> Option<Vec<Vec3>> {
		self.ring_at(self.config?.curve_segment_count)
	}

	fn ring_at(&self, ring: u32) -> Option<Vec<Vec3>> {
		let generator = TorusSegmentGenerator::new(self.config?).ok()?;
		let u = ring as f32 * generator.u_step();
		let facets = self.config?.pipe_segment_count;
		Some((0..facets).map(|v| generator.point(u, v as f32 * generator.v_step())).collect())
	}

	/// Maps a local point into the frame shared with the predecessor.
	pub fn world_point(&self, local: Vec3) -> Vec3 {
		self.transform.transform_point(local)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::error::ConfigurationError;
	use rand::SeedableRng;
	use rand_pcg::Pcg64;

	struct LabelGenerator {
		label: &'static str,
	}

	impl LabelGenerator {
		fn new(label: &'static str) -> Self {
			Self { label }
		}
	}

	impl DecorationGenerator for LabelGenerator {
		fn generate_decorations(
			&self,
			segment: &PipeSegment,
			_rng: &mut dyn RngCore,
		) -> Vec<Decoration> {
			// segment is fully built by the time decorations run
			assert!(segment.mesh().is_some());
			vec![Decoration::new(self.label, Transform::from_xyz(0.0, 1.0, 0.0))]
		}
	}

	fn settings() -> PipeSettings {
		PipeSettings::new()
			.with_pipe_segment_count(8)
			.with_ring_distance(0.5)
			.with_curve_radius_range(4.0, 8.0)
			.with_curve_segment_count_range(3, 12)
	}

	#[test]
	fn test_new_segment_is_empty() {
		let segment = PipeSegment::new(settings());
		assert!(!segment.is_generated());
		assert!(segment.mesh().is_none());
		assert_eq!(segment.curve_angle(), None);
		assert_eq!(segment.transform(), Transform::IDENTITY);
	}

	#[test]
	fn test_generate_draws_within_ranges() -> anyhow::Result<()> {
		let mut rng = Pcg64::seed_from_u64(7);
		let mut segment = PipeSegment::new(settings());

		for _ in 0..50 {
			segment.generate_bare(&mut rng)?;
			let radius = segment.curve_radius().expect("generated");
			let count = segment.curve_segment_count().expect("generated");
			assert!((4.0..=8.0).contains(&radius));
			assert!((3..=12).contains(&count));

			let mesh = segment.mesh().expect("generated");
			assert_eq!(mesh.vertex_count(), count as usize * 8 * 4);
			assert_eq!(mesh.index_count(), count as usize * 8 * 6);
		}
		Ok(())
	}

	#[test]
	fn test_curve_angle_scenario() -> anyhow::Result<()> {
		let mut segment = PipeSegment::new(settings());
		segment.generate_with(CurveParams::new(5.0, 10))?;

		let angle = segment.curve_angle().expect("generated");
		assert!((angle - 57.29578).abs() < 1e-3);
		Ok(())
	}

	#[test]
	fn test_generate_with_fixed_draws_is_bit_identical() -> anyhow::Result<()> {
		let mut first = PipeSegment::new(settings());
		let mut second = PipeSegment::new(settings());
		first.generate(&mut Pcg64::seed_from_u64(99), &[])?;
		second.generate(&mut Pcg64::seed_from_u64(99), &[])?;

		assert_eq!(first.config(), second.config());
		assert_eq!(first.mesh(), second.mesh());
		Ok(())
	}

	#[test]
	fn test_invalid_settings_keep_previous_mesh() -> anyhow::Result<()> {
		let mut segment = PipeSegment::new(settings());
		segment.generate_with(CurveParams::new(5.0, 4))?;

		let result = segment.generate_with(CurveParams::new(-1.0, 4));
		assert!(matches!(result, Err(PipeError::Configuration(_))));
		assert_eq!(segment.curve_radius(), Some(5.0));
		assert!(segment.mesh().is_some());
		Ok(())
	}

	#[test]
	fn test_unbounded_settings_fail_before_drawing() {
		let mut rng = Pcg64::seed_from_u64(1);
		let mut segment =
			PipeSegment::new(settings().with_curve_radius_range(4.0, f32::INFINITY));

		let result = segment.generate_bare(&mut rng);
		assert!(matches!(
			result,
			Err(PipeError::Configuration(ConfigurationError::NonFiniteRange { .. }))
		));
		assert!(!segment.is_generated());
	}

	#[test]
	fn test_decorations_replace_previous() -> anyhow::Result<()> {
		let mut rng = Pcg64::seed_from_u64(3);
		let generators: Vec<Box<dyn DecorationGenerator>> =
			vec![Box::new(LabelGenerator::new("a")), Box::new(LabelGenerator::new("b"))];

		let mut segment = PipeSegment::new(settings());
		segment.generate(&mut rng, &generators)?;
		assert_eq!(segment.decorations().len(), 1);

		// regeneration drops the previous decorations before adding new ones
		segment.generate(&mut rng, &generators)?;
		assert_eq!(segment.decorations().len(), 1);

		segment.generate_bare(&mut rng)?;
		assert!(segment.decorations().is_empty());
		Ok(())
	}

	#[test]
	fn test_decorations_respect_enable_items() -> anyhow::Result<()> {
		let mut rng = Pcg64::seed_from_u64(3);
		let generator = LabelGenerator::new("a");
		let generators: Vec<Box<dyn DecorationGenerator>> = vec![Box::new(generator)];

		let mut segment = PipeSegment::new(settings().with_enable_items(false));
		segment.generate(&mut rng, &generators)?;
		assert!(segment.decorations().is_empty());
		Ok(())
	}

	#[test]
	fn test_take_mesh_keeps_curve() -> anyhow::Result<()> {
		let mut segment = PipeSegment::new(settings());
		segment.generate_with(CurveParams::new(6.0, 5))?;

		let mesh = segment.take_mesh().expect("generated");
		assert_eq!(mesh.quad_count(), 40);
		assert!(segment.mesh().is_none());
		assert_eq!(segment.curve_radius(), Some(6.0));
		Ok(())
	}

	#[test]
	fn test_rings_sit_on_segment_ends() -> anyhow::Result<()> {
		let mut segment = PipeSegment::new(settings());
		segment.generate_with(CurveParams::new(5.0, 10))?;

		let entry = segment.entry_ring().expect("generated");
		let exit = segment.exit_ring().expect("generated");
		assert_eq!(entry.len(), 8);
		assert_eq!(exit.len(), 8);

		// entry ring lies in the x = 0 plane around (0, R, 0)
		for point in &entry {
			assert!(point.x.abs() < 1e-6);
			assert!(((*point - Vec3::new(0.0, 5.0, 0.0)).length() - 1.0).abs() < 1e-5);
		}

		// exit ring surrounds the curve point at the full sweep
		let sweep = 1.0_f32;
		let exit_center = Vec3::new(5.0 * sweep.sin(), 5.0 * sweep.cos(), 0.0);
		for point in &exit {
			assert!(((*point - exit_center).length() - 1.0).abs() < 1e-4);
		}
		Ok(())
	}

	#[test]
	fn test_rings_match_mesh_vertices() -> anyhow::Result<()> {
		let mut segment = PipeSegment::new(settings());
		segment.generate_with(CurveParams::new(6.5, 7))?;

		let entry = segment.entry_ring().expect("generated");
		let exit = segment.exit_ring().expect("generated");
		let mesh = segment.take_mesh().expect("generated");
		let last_ring = 6 * 8;

		for v in 0..8 {
			assert_eq!(entry[v], Vec3::from_array(mesh.positions()[v * 4]));
			assert_eq!(exit[v], Vec3::from_array(mesh.positions()[(last_ring + v) * 4 + 1]));
		}

		// still known once the mesh is gone
		assert_eq!(segment.exit_ring(), Some(exit));
		Ok(())
	}
}
