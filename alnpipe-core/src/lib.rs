//! alnpipe Core Library
//!
//! Alignment record model, m5/pre parsers, gap normalization, edge trimming,
//! and the bounded hand-off queue between producer and consumer threads.

pub mod types;
pub mod seq;
pub mod io;
pub mod normalize;
pub mod queue;
pub mod pipeline;

// Re-export commonly used types and functions
pub use types::{Alignment, GroupBy, Strand};
pub use io::{AlnFormat, AlnReader, ParseError};
pub use normalize::{normalize_gaps, trim_edges};
pub use queue::{BoundedQueue, PushError};
pub use pipeline::{run_producer, PipelineConfig};

/// Version information for the alnpipe core library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
