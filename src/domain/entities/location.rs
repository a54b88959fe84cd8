//! Location entity produced by the location lookup.

/// A location resolved from a postal code.
///
/// An empty `city` is the "not found" value some location services return
/// with a successful status. It is passed through unchanged; the weather
/// lookup is expected to reject it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Location {
    pub city: String,
}

impl Location {
    pub fn new(city: impl Into<String>) -> Self {
        Self { city: city.into() }
    }

    /// Returns `true` when the lookup produced no city name.
    pub fn is_empty(&self) -> bool {
        self.city.trim().is_empty()
    }
}
