//! Monitoring stations: candidate types, payload decoding, and
//! nearest-station selection.

mod payload;
mod resolver;
mod types;

pub use payload::parse_candidates;
pub use resolver::nearest;
pub use types::{PayloadError, RawReading, StationCandidate, StationDetails, StationError};
