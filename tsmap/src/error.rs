/// Errors raised while building a map.
///
/// Lookups never fail: a missing key is reported as `None`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MapError {
    #[error("capacity must be at least 1 bucket")]
    ZeroCapacity,

    #[error("failed to allocate {capacity} buckets")]
    AllocationFailed { capacity: usize },
}
