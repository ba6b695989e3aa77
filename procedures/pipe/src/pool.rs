use crate::config::PipeSettings;
use crate::decoration::DecorationGenerator;
use crate::error::{PipeError, PoolError};
use crate::segment::PipeSegment;
use bevy::prelude::*;
use rand::RngCore;
use std::time::Instant;

/// Source of segments for a tunnel that is only ever walked forward.
pub trait SegmentPool {
	/// Builds the initial tunnel and returns the segment to start on.
	fn produce_first_segment(&mut self, rng: &mut dyn RngCore) -> Result<&PipeSegment, PipeError>;

	/// Moves one segment forward and returns the new segment to play on.
	fn produce_next_segment(&mut self, rng: &mut dyn RngCore) -> Result<&PipeSegment, PipeError>;
}

/// Fixed-size ring of segments that recycles the segment left behind.
///
/// The segment being played on is always at index 1, with one segment behind it and the rest ahead.
/// After every production all transforms are rebased so the current segment sits at the origin
/// with no rotation, which keeps coordinates bounded however far the tunnel goes.
pub struct SegmentRing {
	segments: Vec<PipeSegment>,
	generators: Vec<Box<dyn DecorationGenerator>>,
	empty_segment_count: usize,
	started: bool,
}

impl SegmentRing {
	pub fn new(settings: PipeSettings, segment_count: usize) -> Result<Self, PipeError> {
		if segment_count < 2 {
			return Err(PoolError::TooFewSegments(segment_count).into());
		}
		settings.validate()?;

		Ok(Self {
			segments: (0..segment_count).map(|_| PipeSegment::new(settings.clone())).collect(),
			generators: Vec::new(),
			empty_segment_count: 1,
			started: false,
		})
	}

	pub fn with_generators(mut self, generators: Vec<Box<dyn DecorationGenerator>>) -> Self {
		self.generators = generators;
		self
	}

	/// Segments up to and including this index are left undecorated when the tunnel is first built.
	pub fn with_empty_segment_count(mut self, empty_segment_count: usize) -> Self {
		self.empty_segment_count = empty_segment_count;
		self
	}

	pub fn is_started(&self) -> bool {
		self.started
	}

	/// The segment being played on, once the tunnel is built.
	pub fn current(&self) -> Option<&PipeSegment> {
		if self.started {
			self.segments.get(1)
		} else {
			None
		}
	}

	/// All segments in tunnel order, oldest first.
	pub fn segments(&self) -> &[PipeSegment] {
		&self.segments
	}

	pub fn segment_mut(&mut self, index: usize) -> Option<&mut PipeSegment> {
		self.segments.get_mut(index)
	}

	/// Regenerates the segment at `index` and attaches it to the one before it.
	fn rebuild(&mut self, index: usize, decorate: bool, rng: &mut dyn RngCore) -> Result<(), PipeError> {
		let (head, tail) = self.segments.split_at_mut(index);
		let segment = &mut tail[0];

		if decorate {
			segment.generate(rng, &self.generators)?;
		} else {
			segment.generate_bare(rng)?;
		}

		match head.last() {
			Some(predecessor) => segment.align_with(predecessor, rng)?,
			None => segment.set_transform(Transform::IDENTITY),
		}

		Ok(())
	}

	/// Re-expresses every transform relative to the segment at `origin`.
	fn rebase(&mut self, origin: usize) {
		let anchor = self.segments[origin].transform();
		let inverse_rotation = anchor.rotation.inverse();

		for segment in self.segments.iter_mut() {
			let transform = segment.transform();
			segment.set_transform(Transform {
				translation: inverse_rotation * (transform.translation - anchor.translation),
				rotation: (inverse_rotation * transform.rotation).normalize(),
				scale: Vec3::ONE,
			});
		}
	}
}

impl SegmentPool for SegmentRing {
	fn produce_first_segment(&mut self, rng: &mut dyn RngCore) -> Result<&PipeSegment, PipeError> {
		let start = Instant::now();

		for index in 0..self.segments.len() {
			self.rebuild(index, index > self.empty_segment_count, rng)?;
		}
		self.rebase(1);
		self.started = true;

		log::info!(
			"Built tunnel of {} segments in {:?}",
			self.segments.len(),
			start.elapsed()
		);

		Ok(&self.segments[1])
	}

	fn produce_next_segment(&mut self, rng: &mut dyn RngCore) -> Result<&PipeSegment, PipeError> {
		if !self.started {
			return Err(PoolError::NotStarted.into());
		}

		self.segments.rotate_left(1);
		let last = self.segments.len() - 1;
		self.rebuild(last, true, rng)?;
		self.rebase(1);

		log::debug!("Recycled segment into slot {}", last);

		Ok(&self.segments[1])
	}
}
