use super::PipeSegment;
use crate::error::{AlignmentError, PipeError};
use bevy::prelude::*;
use rand::{Rng, RngCore};

impl PipeSegment {
	/// Attaches this segment to the exit ring of `predecessor` with a random twist.
	///
	/// The twist facet is drawn from `[0, curve_segment_count)` and wrapped onto the cross-section,
	/// so the twist is always a whole number of facets in `[0, 360)` degrees.
	pub fn align_with(
		&mut self,
		predecessor: &PipeSegment,
		rng: &mut dyn RngCore,
	) -> Result<(), PipeError> {
		if !predecessor.is_generated() {
			return Err(AlignmentError::PredecessorNotGenerated.into());
		}
		let curve_segment_count =
			self.curve_segment_count().ok_or(AlignmentError::SegmentNotGenerated)?;

		let facet = rng.random_range(0..curve_segment_count);
		self.align_with_twist(predecessor, facet)?;
		Ok(())
	}

	/// Attaches this segment to the exit ring of `predecessor`, twisted by `facet` cross-section facets.
	///
	/// The resulting transform lives in the predecessor's parent frame and has unit scale.
	pub fn align_with_twist(
		&mut self,
		predecessor: &PipeSegment,
		facet: u32,
	) -> Result<(), AlignmentError> {
		let previous = *predecessor.config().ok_or(AlignmentError::PredecessorNotGenerated)?;
		let config = *self.config().ok_or(AlignmentError::SegmentNotGenerated)?;

		let facet_angle = 360.0 / config.pipe_segment_count as f32;
		self.relative_rotation = (facet % config.pipe_segment_count) as f32 * facet_angle;

		// composed in the predecessor's local frame, order matters
		let mut local = Transform::from_rotation(Quat::from_rotation_z(
			(-previous.curve_angle()).to_radians(),
		));
		local.translation += local.rotation * Vec3::Y * previous.curve_radius;
		local.rotate_local_x(self.relative_rotation.to_radians());
		local.translation += local.rotation * Vec3::NEG_Y * config.curve_radius;

		let mut transform = predecessor.transform().mul_transform(local);
		transform.scale = Vec3::ONE;
		self.set_transform(transform);

		log::debug!(
			"Aligned segment with twist {} at {:?}",
			self.relative_rotation,
			transform.translation
		);

		Ok(())
	}
}
