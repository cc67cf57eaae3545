//! Read-only queries over a built grid.
//!
//! - [`StairIndex`]: shared stair coordinates per floor pair
//! - [`ExitDetector`]: doors with a clear line to the perimeter
//! - [`sample_heuristic_field`]: sparse heuristic lattice for inspection

mod exits;
mod heuristic_field;
mod stairs;

pub use exits::{ExitCandidate, ExitDetector, detect_exits};
pub use heuristic_field::{HeuristicSample, finite_range, sample_heuristic_field};
pub use stairs::StairIndex;
