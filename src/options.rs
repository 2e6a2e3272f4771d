//! Scanner configuration.

/// Index and alignment values stop growing once they reach this value.
/// Digits beyond it are still consumed; the clamped value is used as-is.
pub const DEFAULT_NUMERIC_LIMIT: usize = 1_000_000;

/// Options for a scan. Cheap to copy; pass by reference to the `_with` entry points.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct ScanOptions {
    numeric_limit: usize,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self::new()
    }
}

impl ScanOptions {
    pub const fn new() -> Self {
        Self {
            numeric_limit: DEFAULT_NUMERIC_LIMIT,
        }
    }

    /// Set the clamp for index and alignment values.
    /// A limit of 0 is raised to 1 so index 0 stays representable.
    pub const fn with_numeric_limit(mut self, limit: usize) -> Self {
        self.numeric_limit = if limit == 0 { 1 } else { limit };
        self
    }

    #[inline]
    pub fn numeric_limit(&self) -> usize {
        self.numeric_limit
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_limit() {
        assert_eq!(ScanOptions::default().numeric_limit(), DEFAULT_NUMERIC_LIMIT);
        assert_eq!(ScanOptions::new().with_numeric_limit(42).numeric_limit(), 42);
        assert_eq!(ScanOptions::new().with_numeric_limit(0).numeric_limit(), 1);
    }
}
