//! One ingest path per source kind.
//!
//! Error reporting is deliberately asymmetric. CSV ingest reports every
//! rejected row in `ParseOutcome::errors`. Text-layout and OCR grid ingest
//! drop lines and cells that do not match without reporting them, because
//! their heuristics cannot tell malformed data from page furniture. Tests and
//! callers must not expect errors from those paths.

pub mod csv;
pub mod grid;
pub mod line_sequence;
pub mod positional;
pub mod text_layout;

use crate::extraction::Fragment;
use crate::model::ParseOutcome;
use crate::options::{ExtractOptions, GridStrategyKind};

pub use csv::parse_csv;
pub use line_sequence::LineSequenceGrid;
pub use positional::GeometricGrid;
pub use text_layout::parse_text;

/// A way of rebuilding the day × period grid from one page of OCR fragments.
pub trait GridStrategy: Send + Sync {
    fn name(&self) -> &'static str;

    fn reconstruct(&self, fragments: &[Fragment]) -> ParseOutcome;
}

/// The grid strategy selected by `options`.
pub fn grid_strategy(options: &ExtractOptions) -> Box<dyn GridStrategy> {
    match options.grid_strategy {
        GridStrategyKind::Geometric => Box::new(GeometricGrid::new(options)),
        GridStrategyKind::LineSequence => Box::new(LineSequenceGrid),
    }
}

/// Rebuild entries from one page of fragments.
pub fn parse_fragments(fragments: &[Fragment], options: &ExtractOptions) -> ParseOutcome {
    let strategy = grid_strategy(options);
    tracing::debug!(
        strategy = strategy.name(),
        fragments = fragments.len(),
        "reconstructing grid"
    );
    strategy.reconstruct(fragments)
}
