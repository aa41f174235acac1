//! Nearest-station selection.

use super::types::{StationCandidate, StationError};
use crate::coord::{distance_km, Coordinate};

/// Selects the candidate closest to `origin`.
///
/// Returns the chosen candidate together with its great-circle distance in
/// kilometers. When several candidates are exactly equidistant the one that
/// appears first in `candidates` wins, so results are reproducible.
///
/// # Errors
///
/// Returns [`StationError::EmptyCandidateSet`] when `candidates` is empty.
///
/// # Example
///
/// ```
/// use airwatch::coord::Coordinate;
/// use airwatch::station::{nearest, RawReading, StationCandidate, StationDetails};
///
/// let station = |id: &str, lat: f64, lon: f64| StationCandidate {
///     id: id.to_string(),
///     coordinate: Coordinate::new(lat, lon),
///     reading: RawReading {
///         pm25: Some(10.0),
///         humidity: None,
///         details: StationDetails::default(),
///     },
/// };
///
/// let candidates = vec![station("far", 15.5, 100.5), station("near", 15.0, 100.48)];
/// let (chosen, _km) = nearest(Coordinate::new(14.99, 100.47), &candidates).unwrap();
/// assert_eq!(chosen.id, "near");
/// ```
pub fn nearest(
    origin: Coordinate,
    candidates: &[StationCandidate],
) -> Result<(&StationCandidate, f64), StationError> {
    let mut best: Option<(&StationCandidate, f64)> = None;

    for candidate in candidates {
        let distance = distance_km(origin, candidate.coordinate);
        // Strict comparison keeps the first of equidistant candidates
        match best {
            Some((_, best_distance)) if distance >= best_distance => {}
            _ => best = Some((candidate, distance)),
        }
    }

    best.ok_or(StationError::EmptyCandidateSet)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::station::{RawReading, StationDetails};
    use proptest::prelude::*;

    fn station(id: &str, lat: f64, lon: f64) -> StationCandidate {
        StationCandidate {
            id: id.to_string(),
            coordinate: Coordinate::new(lat, lon),
            reading: RawReading {
                pm25: Some(20.0),
                humidity: None,
                details: StationDetails::default(),
            },
        }
    }

    #[test]
    fn test_empty_candidates_fail() {
        let result = nearest(Coordinate::new(0.0, 0.0), &[]);
        assert_eq!(result.unwrap_err(), StationError::EmptyCandidateSet);
    }

    #[test]
    fn test_single_candidate_is_chosen() {
        let candidates = vec![station("only", 10.0, 10.0)];
        let (chosen, distance) = nearest(Coordinate::new(10.0, 10.0), &candidates).unwrap();
        assert_eq!(chosen.id, "only");
        assert_eq!(distance, 0.0);
    }

    #[test]
    fn test_picks_closest() {
        let origin = Coordinate::new(14.9907, 100.4780);
        let candidates = vec![
            station("a", 15.2, 100.6),
            station("b", 14.99, 100.49),
            station("c", 14.5, 100.0),
        ];
        let (chosen, distance) = nearest(origin, &candidates).unwrap();
        assert_eq!(chosen.id, "b");
        assert!(distance < 2.0);
    }

    #[test]
    fn test_tie_prefers_first_occurrence() {
        // Mirror images across the origin meridian are exactly equidistant
        let origin = Coordinate::new(0.0, 0.0);
        let candidates = vec![station("east", 0.0, 0.5), station("west", 0.0, -0.5)];
        let (chosen, _) = nearest(origin, &candidates).unwrap();
        assert_eq!(chosen.id, "east");

        let reversed = vec![station("west", 0.0, -0.5), station("east", 0.0, 0.5)];
        let (chosen, _) = nearest(origin, &reversed).unwrap();
        assert_eq!(chosen.id, "west");
    }

    proptest! {
        /// Property: reversing candidate order doesn't change the winner
        /// unless the two best candidates are exactly tied.
        #[test]
        fn prop_order_independent(
            points in prop::collection::vec((-60.0f64..60.0f64, -170.0f64..170.0f64), 1..12),
            origin_lat in -60.0f64..60.0f64,
            origin_lon in -170.0f64..170.0f64,
        ) {
            let origin = Coordinate::new(origin_lat, origin_lon);
            let candidates: Vec<StationCandidate> = points
                .iter()
                .enumerate()
                .map(|(i, (lat, lon))| station(&i.to_string(), *lat, *lon))
                .collect();
            let mut reversed = candidates.clone();
            reversed.reverse();

            let (forward, d_forward) = nearest(origin, &candidates).unwrap();
            let (backward, d_backward) = nearest(origin, &reversed).unwrap();

            prop_assert_eq!(d_forward, d_backward);
            if forward.id != backward.id {
                // Only allowed when both are at the exact same distance
                let d_other = distance_km(origin, backward.coordinate);
                prop_assert_eq!(d_forward, d_other);
            }
        }

        /// Property: the chosen distance is the minimum over all candidates.
        #[test]
        fn prop_chosen_is_minimum(
            points in prop::collection::vec((-60.0f64..60.0f64, -170.0f64..170.0f64), 1..12),
            origin_lat in -60.0f64..60.0f64,
            origin_lon in -170.0f64..170.0f64,
        ) {
            let origin = Coordinate::new(origin_lat, origin_lon);
            let candidates: Vec<StationCandidate> = points
                .iter()
                .enumerate()
                .map(|(i, (lat, lon))| station(&i.to_string(), *lat, *lon))
                .collect();

            let (_, chosen) = nearest(origin, &candidates).unwrap();
            for candidate in &candidates {
                prop_assert!(chosen <= distance_km(origin, candidate.coordinate));
            }
        }
    }
}
