use thiserror::Error;

/// Invalid inputs caught before any generation work is dispatched.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigurationError {
	#[error("curve radius must be positive, got {0}")]
	NonPositiveCurveRadius(f32),
	#[error("pipe radius must be positive, got {0}")]
	NonPositivePipeRadius(f32),
	#[error("ring distance must be positive, got {0}")]
	NonPositiveRingDistance(f32),
	#[error("curve segment count must be at least 1")]
	ZeroCurveSegments,
	#[error("pipe segment count must be at least 3, got {0}")]
	TooFewPipeSegments(u32),
	#[error("invalid {name} range: min {min} is greater than max {max}")]
	InvertedRange { name: &'static str, min: f32, max: f32 },
	#[error("invalid {name} range: bounds {min} and {max} must be finite")]
	NonFiniteRange { name: &'static str, min: f32, max: f32 },
	#[error("segment needs {0} vertices, more than 32-bit indices can address")]
	TooManyVertices(usize),
	#[error(
		"buffer holds {actual_vertices} vertices and {actual_indices} indices, \
		 config requires {expected_vertices} and {expected_indices}"
	)]
	BufferSizeMismatch {
		expected_vertices: usize,
		actual_vertices: usize,
		expected_indices: usize,
		actual_indices: usize,
	},
}

/// Caller errors when attaching a segment to its predecessor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AlignmentError {
	#[error("predecessor segment has not been generated")]
	PredecessorNotGenerated,
	#[error("segment has not been generated")]
	SegmentNotGenerated,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PoolError {
	#[error("segment pool needs at least 2 segments, got {0}")]
	TooFewSegments(usize),
	#[error("next segment requested before the first segment was produced")]
	NotStarted,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum PipeError {
	#[error(transparent)]
	Configuration(#[from] ConfigurationError),
	#[error(transparent)]
	Alignment(#[from] AlignmentError),
	#[error(transparent)]
	Pool(#[from] PoolError),
}
