use crate::segment::PipeSegment;
use bevy::prelude::*;
use rand::RngCore;

/// A child object placed on a segment, in the segment's local space.
#[derive(Debug, Clone, PartialEq)]
pub struct Decoration {
	pub label: String,
	pub transform: Transform,
}

impl Decoration {
	pub fn new(label: impl Into<String>, transform: Transform) -> Self {
		Self { label: label.into(), transform }
	}
}

/// Populates a freshly generated segment with decorations.
///
/// Runs at most once per generation, after the mesh is built.
pub trait DecorationGenerator: Send + Sync {
	fn generate_decorations(&self, segment: &PipeSegment, rng: &mut dyn RngCore)
		-> Vec<Decoration>;
}
