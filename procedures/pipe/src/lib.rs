pub mod config;
pub mod decoration;
pub mod error;
pub mod generator;
pub mod pool;
pub mod render;
pub mod segment;
pub mod traversal;

pub use config::{PipeSettings, SegmentConfig};
pub use decoration::{Decoration, DecorationGenerator};
pub use error::{AlignmentError, ConfigurationError, PipeError, PoolError};
pub use generator::TorusSegmentGenerator;
pub use pool::{SegmentPool, SegmentRing};
pub use quad_mesh;
pub use render::spawn_segment;
pub use segment::{CurveParams, PipeSegment};
pub use traversal::TunnelTraversal;

// Typical use:
// - build a SegmentRing from PipeSettings, with any DecorationGenerators
// - start a TunnelTraversal on it and advance it every frame
// - spawn_segment each segment the ring produces under a shared root entity
