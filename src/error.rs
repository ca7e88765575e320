// error.rs — Crate-wide error type.
//
// Every failure here is a local, synchronous programming error reported to
// the immediate caller. Nothing is retried and no partial state is kept.

use thiserror::Error;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Why a canvas or gradient field could not be allocated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AllocationFailure {
    /// One of the dimensions is zero.
    EmptyExtent,
    /// The element count does not fit in `usize`.
    Overflow,
    /// The allocator refused the reservation.
    OutOfMemory,
}

impl std::fmt::Display for AllocationFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AllocationFailure::EmptyExtent => write!(f, "extent must be positive"),
            AllocationFailure::Overflow => write!(f, "element count overflows usize"),
            AllocationFailure::OutOfMemory => write!(f, "allocation failed"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    #[error("cannot allocate {width}×{height}: {reason}")]
    Allocation {
        width: usize,
        height: usize,
        reason: AllocationFailure,
    },

    #[error("pixel ({x},{y}) out of bounds for {width}×{height} canvas")]
    OutOfBounds {
        x: usize,
        y: usize,
        width: usize,
        height: usize,
    },

    #[error("noise evaluated before the gradient field was seeded")]
    NotSeeded,

    /// The four lattice corners around `(x, y)` are not all inside the field.
    #[error("noise coordinate ({x},{y}) outside {width}×{height} gradient lattice")]
    OutsideLattice {
        x: f64,
        y: f64,
        width: usize,
        height: usize,
    },

    #[error("invalid fractal configuration: {0}")]
    InvalidConfig(&'static str),
}

/// Reserve exactly `len` default-initialized elements, mapping every failure
/// onto `Error::Allocation`.
pub(crate) fn try_alloc<T: Clone + Default>(
    len: Option<usize>,
    width: usize,
    height: usize,
) -> Result<Vec<T>> {
    let fail = |reason| Error::Allocation { width, height, reason };
    if width == 0 || height == 0 {
        return Err(fail(AllocationFailure::EmptyExtent));
    }
    let len = len.ok_or_else(|| fail(AllocationFailure::Overflow))?;
    let mut data = Vec::new();
    data.try_reserve_exact(len)
        .map_err(|_| fail(AllocationFailure::OutOfMemory))?;
    data.resize(len, T::default());
    Ok(data)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_try_alloc_zero_extent() {
        let r: Result<Vec<u8>> = try_alloc(Some(0), 0, 4);
        assert_eq!(
            r.unwrap_err(),
            Error::Allocation { width: 0, height: 4, reason: AllocationFailure::EmptyExtent }
        );
    }

    #[test]
    fn test_try_alloc_overflow() {
        let r: Result<Vec<u8>> = try_alloc(None, usize::MAX, 3);
        assert!(matches!(
            r,
            Err(Error::Allocation { reason: AllocationFailure::Overflow, .. })
        ));
    }

    #[test]
    fn test_display_mentions_coordinates() {
        let e = Error::OutOfBounds { x: 4, y: 1, width: 4, height: 4 };
        assert_eq!(e.to_string(), "pixel (4,1) out of bounds for 4×4 canvas");
    }
}
