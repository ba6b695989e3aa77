use crate::error::ConfigurationError;
use serde::{Deserialize, Serialize};

/// Parameters of one torus arc.
///
/// `pipe_radius < curve_radius` keeps the torus from intersecting itself, but it is not enforced.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SegmentConfig {
	/// Radius of the circle the tunnel curves along.
	pub curve_radius: f32,
	/// Radius of the tube's circular cross-section.
	pub pipe_radius: f32,
	/// Arc length between consecutive rings along the curve.
	pub ring_distance: f32,
	/// Number of rings (quads along the curve axis).
	pub curve_segment_count: u32,
	/// Number of facets around the cross-section.
	pub pipe_segment_count: u32,
}

impl Default for SegmentConfig {
	fn default() -> Self {
		Self {
			curve_radius: 5.0,
			pipe_radius: 1.0,
			ring_distance: 0.5,
			curve_segment_count: 10,
			pipe_segment_count: 8,
		}
	}
}

impl SegmentConfig {
	pub fn validate(&self) -> Result<(), ConfigurationError> {
		if !(self.curve_radius > 0.0) {
			return Err(ConfigurationError::NonPositiveCurveRadius(self.curve_radius));
		}
		if !(self.pipe_radius > 0.0) {
			return Err(ConfigurationError::NonPositivePipeRadius(self.pipe_radius));
		}
		if !(self.ring_distance > 0.0) {
			return Err(ConfigurationError::NonPositiveRingDistance(self.ring_distance));
		}
		if self.curve_segment_count == 0 {
			return Err(ConfigurationError::ZeroCurveSegments);
		}
		if self.pipe_segment_count < 3 {
			return Err(ConfigurationError::TooFewPipeSegments(self.pipe_segment_count));
		}
		Ok(())
	}

	pub fn quad_count(&self) -> usize {
		self.curve_segment_count as usize * self.pipe_segment_count as usize
	}

	/// Angle swept by the whole segment along the curve, in degrees.
	pub fn curve_angle(&self) -> f32 {
		(self.ring_distance / self.curve_radius) * self.curve_segment_count as f32
			* (360.0 / std::f32::consts::TAU)
	}
}

/// Tunables for a pipe segment: the fixed tube shape plus the ranges its curve is drawn from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipeSettings {
	pub pipe_radius: f32,
	pub pipe_segment_count: u32,
	pub ring_distance: f32,
	pub min_curve_radius: f32,
	pub max_curve_radius: f32,
	pub min_curve_segment_count: u32,
	pub max_curve_segment_count: u32,
	/// Whether decoration generators run after the mesh is built.
	pub enable_items: bool,
}

impl Default for PipeSettings {
	fn default() -> Self {
		Self {
			pipe_radius: 1.0,
			pipe_segment_count: 20,
			ring_distance: 1.0,
			min_curve_radius: 4.0,
			max_curve_radius: 20.0,
			min_curve_segment_count: 4,
			max_curve_segment_count: 12,
			enable_items: true,
		}
	}
}

impl PipeSettings {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn with_pipe_radius(mut self, pipe_radius: f32) -> Self {
		self.pipe_radius = pipe_radius;
		self
	}

	pub fn with_pipe_segment_count(mut self, pipe_segment_count: u32) -> Self {
		self.pipe_segment_count = pipe_segment_count;
		self
	}

	pub fn with_ring_distance(mut self, ring_distance: f32) -> Self {
		self.ring_distance = ring_distance;
		self
	}

	pub fn with_curve_radius_range(mut self, min: f32, max: f32) -> Self {
		self.min_curve_radius = min;
		self.max_curve_radius = max;
		self
	}

	pub fn with_curve_segment_count_range(mut self, min: u32, max: u32) -> Self {
		self.min_curve_segment_count = min;
		self.max_curve_segment_count = max;
		self
	}

	pub fn with_enable_items(mut self, enable_items: bool) -> Self {
		self.enable_items = enable_items;
		self
	}

	/// Checks the ranges and that every config drawn from them would be valid.
	pub fn validate(&self) -> Result<(), ConfigurationError> {
		if !self.min_curve_radius.is_finite() || !self.max_curve_radius.is_finite() {
			return Err(ConfigurationError::NonFiniteRange {
				name: "curve radius",
				min: self.min_curve_radius,
				max: self.max_curve_radius,
			});
		}
		if self.min_curve_radius > self.max_curve_radius {
			return Err(ConfigurationError::InvertedRange {
				name: "curve radius",
				min: self.min_curve_radius,
				max: self.max_curve_radius,
			});
		}
		if self.min_curve_segment_count > self.max_curve_segment_count {
			return Err(ConfigurationError::InvertedRange {
				name: "curve segment count",
				min: self.min_curve_segment_count as f32,
				max: self.max_curve_segment_count as f32,
			});
		}

		// the lower bounds are the tightest case for both checks
		self.segment_config(self.min_curve_radius, self.min_curve_segment_count).validate()
	}

	/// The generator input for a drawn curve.
	pub fn segment_config(&self, curve_radius: f32, curve_segment_count: u32) -> SegmentConfig {
		SegmentConfig {
			curve_radius,
			pipe_radius: self.pipe_radius,
			ring_distance: self.ring_distance,
			curve_segment_count,
			pipe_segment_count: self.pipe_segment_count,
		}
	}
}
