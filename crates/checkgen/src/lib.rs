//! Generation of FileCheck assertions from SSA IR listings.
//!
//! Given the textual dump of a module, [`generate_checks`] produces `CHECK`
//! lines that match the dump literally while abstracting SSA value names
//! into FileCheck variables (`%[[VAL_0:.*]]` on definition, `%[[VAL_0]]` on
//! later uses). [`generate_checks_with_source`] additionally weaves the
//! checks back into the original test file, segment by segment.

pub mod banner;
pub mod config;
pub mod error;
pub mod line;
pub mod namer;
pub mod processor;
pub mod source;

pub use banner::Banner;
pub use config::CheckGenConfig;
pub use error::{CheckGenError, Result};
pub use namer::{Binding, ScopeNamer};
pub use processor::{LineProcessor, OutputSegment};
pub use source::split_source_segments;

use tracing::debug;

/// Generate check lines for every top-level construct of `input`.
pub fn generate_checks(input: &str, config: &CheckGenConfig) -> Result<String> {
    let mut processor = LineProcessor::new(config);
    processor.process_input(input)?;
    debug!(segments = processor.segments().len(), "generated checks");
    Ok(processor.finish())
}

/// Generate check lines for `input` and interleave them with the segments of
/// `source`, the test file the listing was produced from.
///
/// ## Errors
/// Fails with [`CheckGenError::SegmentMismatch`] when `source` does not split
/// into as many segments as checks were generated.
pub fn generate_checks_with_source(
    input: &str,
    source: &str,
    config: &CheckGenConfig,
) -> Result<String> {
    let mut processor = LineProcessor::new(config);
    processor.process_input(input)?;

    let source_segments = split_source_segments(
        source,
        &config.source_delim_regex,
        &config.check_prefix,
        processor.banner(),
    )?;
    debug!(
        generated = processor.segments().len(),
        source = source_segments.len(),
        "interleaving checks with source"
    );
    processor.finish_interleaved(&source_segments)
}
