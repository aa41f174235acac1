//! Where the query origin comes from.
//!
//! Acquiring a position (GPS, IP lookup, user input) sits behind
//! [`LocationSource`]. [`FallbackLocation`] wraps a primary source and
//! substitutes a configured coordinate when it fails.

use std::future::Future;
use std::pin::Pin;

use thiserror::Error;
use tracing::{info, warn};

use crate::coord::Coordinate;

/// Default fallback origin (Hat Yai, Thailand).
pub const DEFAULT_FALLBACK: Coordinate = Coordinate::new(7.1897, 100.5954);

/// Errors from acquiring a position.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LocationError {
    /// The source could not produce a position
    #[error("Location unavailable: {0}")]
    Unavailable(String),

    /// The user or platform refused access
    #[error("Location access denied")]
    Denied,
}

/// Boxed future returned by [`LocationSource::locate`].
pub type LocateFuture<'a> = Pin<Box<dyn Future<Output = Result<Coordinate, LocationError>> + Send + 'a>>;

/// A provider of the current position.
pub trait LocationSource: Send + Sync {
    fn locate(&self) -> LocateFuture<'_>;
}

/// Always reports the same coordinate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedLocation(pub Coordinate);

impl LocationSource for FixedLocation {
    fn locate(&self) -> LocateFuture<'_> {
        let coordinate = self.0;
        Box::pin(async move { Ok(coordinate) })
    }
}

/// Tries a primary source, then falls back to a fixed coordinate.
///
/// Never fails: with no primary, or when the primary errors, the fallback
/// coordinate is returned and the substitution is logged.
pub struct FallbackLocation {
    primary: Option<Box<dyn LocationSource>>,
    fallback: Coordinate,
}

impl FallbackLocation {
    pub fn new(primary: Option<Box<dyn LocationSource>>, fallback: Coordinate) -> Self {
        Self { primary, fallback }
    }

    /// Fallback only, for callers with no position source.
    pub fn fallback_only(fallback: Coordinate) -> Self {
        Self::new(None, fallback)
    }

    pub fn fallback(&self) -> Coordinate {
        self.fallback
    }

    /// Returns the primary source's position, or the fallback.
    pub async fn locate(&self) -> Coordinate {
        let Some(primary) = &self.primary else {
            info!(fallback = %self.fallback, "No location source, using fallback");
            return self.fallback;
        };

        match primary.locate().await {
            Ok(coordinate) => coordinate,
            Err(e) => {
                warn!(error = %e, fallback = %self.fallback, "Location source failed, using fallback");
                self.fallback
            }
        }
    }
}

impl LocationSource for FallbackLocation {
    fn locate(&self) -> LocateFuture<'_> {
        Box::pin(async move { Ok(FallbackLocation::locate(self).await) })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FailingLocation(LocationError);

    impl LocationSource for FailingLocation {
        fn locate(&self) -> LocateFuture<'_> {
            let err = self.0.clone();
            Box::pin(async move { Err(err) })
        }
    }

    #[tokio::test]
    async fn test_fixed_location() {
        let here = Coordinate::new(13.7563, 100.5018);
        assert_eq!(FixedLocation(here).locate().await, Ok(here));
    }

    #[tokio::test]
    async fn test_primary_wins_when_it_works() {
        let here = Coordinate::new(13.7563, 100.5018);
        let source = FallbackLocation::new(Some(Box::new(FixedLocation(here))), DEFAULT_FALLBACK);
        assert_eq!(source.locate().await, here);
    }

    #[tokio::test]
    async fn test_failure_uses_fallback() {
        let source = FallbackLocation::new(
            Some(Box::new(FailingLocation(LocationError::Denied))),
            DEFAULT_FALLBACK,
        );
        assert_eq!(source.locate().await, DEFAULT_FALLBACK);
    }

    #[tokio::test]
    async fn test_no_primary_uses_fallback() {
        let source = FallbackLocation::fallback_only(DEFAULT_FALLBACK);
        assert_eq!(source.locate().await, Coordinate::new(7.1897, 100.5954));
    }

    #[tokio::test]
    async fn test_fallback_as_source_never_errors() {
        let source: Box<dyn LocationSource> = Box::new(FallbackLocation::new(
            Some(Box::new(FailingLocation(LocationError::Unavailable(
                "no fix".to_string(),
            )))),
            DEFAULT_FALLBACK,
        ));
        assert_eq!(source.locate().await, Ok(DEFAULT_FALLBACK));
    }
}
