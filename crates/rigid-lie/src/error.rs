/// An error type for the Lie group constructors.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum LieError {
    /// A dynamically-sized vector did not have the dimension of the tangent space.
    #[error("dimension mismatch: expected a vector of length {expected}, got {actual}")]
    DimensionMismatch {
        /// The required vector length.
        expected: usize,
        /// The length of the vector that was provided.
        actual: usize,
    },
}

impl LieError {
    /// Returns `Ok(())` if `actual` equals `expected`, otherwise a [`LieError::DimensionMismatch`].
    pub(crate) fn check_dimension(expected: usize, actual: usize) -> Result<(), Self> {
        if expected != actual {
            return Err(Self::DimensionMismatch { expected, actual });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_dimension() {
        assert_eq!(LieError::check_dimension(3, 3), Ok(()));
        assert_eq!(
            LieError::check_dimension(6, 5),
            Err(LieError::DimensionMismatch {
                expected: 6,
                actual: 5
            })
        );
    }

    #[test]
    fn test_error_message() {
        let err = LieError::DimensionMismatch {
            expected: 3,
            actual: 4,
        };
        assert_eq!(
            err.to_string(),
            "dimension mismatch: expected a vector of length 3, got 4"
        );
    }
}
