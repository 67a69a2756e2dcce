use std::num::NonZeroUsize;

use crate::config::ConfigError;

/// Eviction bound of a [`HistoryStore`](super::HistoryStore).
///
/// A zero capacity is rejected at construction, so a store can never be
/// unbounded or unable to hold its newest entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MaxHistorySize(NonZeroUsize);

impl MaxHistorySize {
    pub const DEFAULT: usize = 50;

    pub fn new(value: usize) -> Result<Self, ConfigError> {
        NonZeroUsize::new(value)
            .map(Self)
            .ok_or(ConfigError::ZeroCapacity)
    }

    pub fn get(&self) -> usize {
        self.0.get()
    }
}

impl Default for MaxHistorySize {
    fn default() -> Self {
        Self(NonZeroUsize::new(Self::DEFAULT).unwrap_or(NonZeroUsize::MIN))
    }
}

impl TryFrom<usize> for MaxHistorySize {
    type Error = ConfigError;

    fn try_from(value: usize) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl std::fmt::Display for MaxHistorySize {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_zero() {
        assert_eq!(MaxHistorySize::new(0), Err(ConfigError::ZeroCapacity));
    }

    #[test]
    fn default_is_fifty() {
        assert_eq!(MaxHistorySize::default().get(), 50);
    }

    #[test]
    fn accepts_positive_values() {
        assert_eq!(MaxHistorySize::try_from(3).unwrap().get(), 3);
    }
}
