use crate::error::{AlignmentError, PipeError, PoolError};
use crate::pool::SegmentPool;
use crate::segment::PipeSegment;
use bevy::prelude::*;
use rand::RngCore;

/// Progress of a traveller moving forward through the tunnel.
///
/// Rather than moving the traveller, the tunnel is rotated around the current segment's curve center
/// (`system_transform`) and the whole world is twisted by the accumulated relative rotations
/// (`world_transform`), so the traveller stays near the origin.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TunnelTraversal {
	started: bool,
	distance_traveled: f32,
	system_rotation: f32,
	world_rotation: f32,
	delta_to_rotation: f32,
	curve_angle: f32,
	curve_radius: f32,
}

impl TunnelTraversal {
	pub fn new() -> Self {
		Self::default()
	}

	/// Resets all progress and enters the first segment the pool produces.
	pub fn start<P: SegmentPool + ?Sized>(
		&mut self,
		pool: &mut P,
		rng: &mut dyn RngCore,
	) -> Result<(), PipeError> {
		*self = Self::default();
		let segment = pool.produce_first_segment(rng)?;
		self.enter(segment)?;
		self.started = true;
		Ok(())
	}

	/// Moves `delta` units of arc length forward.
	///
	/// At most one segment boundary is crossed per call: when the end of the current segment is reached
	/// the next one is pulled from the pool and the overshoot is carried into it, so a later call keeps
	/// crossing if the overshoot is longer than that segment. Negative and non-finite deltas, and deltas
	/// too large to turn into a finite rotation, are ignored. Returns whether a boundary was crossed.
	pub fn advance<P: SegmentPool + ?Sized>(
		&mut self,
		delta: f32,
		pool: &mut P,
		rng: &mut dyn RngCore,
	) -> Result<bool, PipeError> {
		if !self.started {
			return Err(PoolError::NotStarted.into());
		}

		let rotation = delta * self.delta_to_rotation;
		if !delta.is_finite() || !rotation.is_finite() {
			log::warn!("Ignoring non-finite traversal step {}", delta);
			return Ok(false);
		}
		if delta > 0.0 {
			self.distance_traveled += delta;
			self.system_rotation += rotation;
		}

		if self.system_rotation < self.curve_angle {
			return Ok(false);
		}

		// overflow carried as distance, the next segment may curve differently
		let remaining = (self.system_rotation - self.curve_angle) / self.delta_to_rotation;
		let segment = pool.produce_next_segment(rng)?;
		self.enter(segment)?;
		self.system_rotation = remaining * self.delta_to_rotation;

		log::debug!(
			"Entered next segment at distance {}, world rotation {}",
			self.distance_traveled,
			self.world_rotation
		);

		Ok(true)
	}

	fn enter(&mut self, segment: &PipeSegment) -> Result<(), AlignmentError> {
		let config = segment.config().ok_or(AlignmentError::SegmentNotGenerated)?;

		self.curve_radius = config.curve_radius;
		self.curve_angle = config.curve_angle();
		self.delta_to_rotation = 360.0 / (std::f32::consts::TAU * config.curve_radius);
		self.world_rotation = (self.world_rotation + segment.relative_rotation()).rem_euclid(360.0);

		Ok(())
	}

	pub fn is_started(&self) -> bool {
		self.started
	}

	/// Total arc length travelled since `start`.
	pub fn distance_traveled(&self) -> f32 {
		self.distance_traveled
	}

	/// Progress along the current segment's curve, in degrees.
	pub fn system_rotation(&self) -> f32 {
		self.system_rotation
	}

	/// Accumulated twist of all entered segments, in degrees within `[0, 360)`.
	pub fn world_rotation(&self) -> f32 {
		self.world_rotation
	}

	/// Curve angle of the current segment, in degrees.
	pub fn curve_angle(&self) -> f32 {
		self.curve_angle
	}

	/// Placement of the tunnel root: pivoted about the current curve center.
	pub fn system_transform(&self) -> Transform {
		Transform::from_xyz(0.0, -self.curve_radius, 0.0)
			.with_rotation(Quat::from_rotation_z(self.system_rotation.to_radians()))
	}

	/// Twist applied to the whole world around the travel direction.
	pub fn world_transform(&self) -> Transform {
		Transform::from_rotation(Quat::from_rotation_x(self.world_rotation.to_radians()))
	}
}
