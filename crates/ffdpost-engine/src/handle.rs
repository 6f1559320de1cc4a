//! Opaque handles to engine-side datasets.

use std::fmt;

/// Identifies a dataset held by the engine (loaded file, slice, or tracer
/// output).
///
/// Handles are engine-scoped: a handle from one engine instance means nothing
/// to another. The pipeline threads the current handle through its stages
/// explicitly instead of relying on the engine's ambient "active source".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DatasetHandle(u32);

impl DatasetHandle {
    /// Creates a handle; backends call this when they register a dataset.
    pub(crate) fn new(id: u32) -> Self {
        Self(id)
    }

    /// The raw engine-side id.
    pub fn id(self) -> u32 {
        self.0
    }
}

impl fmt::Display for DatasetHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "dataset#{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_handle_identity() {
        let a = DatasetHandle::new(1);
        let b = DatasetHandle::new(1);
        let c = DatasetHandle::new(2);
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_eq!(a.to_string(), "dataset#1");
    }
}
