use thiserror::Error;

/// Recoverable failures of [`crate::VectorMap`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// The key is not stored in the map.
    #[error("key not found")]
    KeyNotFound,
    /// The buffer could not grow by `additional` entries.
    #[error("failed to reserve room for {additional} more entries")]
    Reserve { additional: usize },
}

/// Fatal path of `at` on a missing key.
///
/// Panics by default. With the `abort-on-missing-key` feature the process is aborted, for
/// targets built without unwinding.
#[cold]
#[inline(never)]
pub(crate) fn key_not_found() -> ! {
    #[cfg(feature = "abort-on-missing-key")]
    {
        log::error!("VectorMap::at: key not found, aborting");
        std::process::abort()
    }

    #[cfg(not(feature = "abort-on-missing-key"))]
    {
        panic!("VectorMap::at: key not found")
    }
}
