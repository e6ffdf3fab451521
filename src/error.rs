use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised by the transforms and the robust statistics.
///
/// Degenerate coordinate parameters (a zero pixel size, zero pixels) are not errors,
/// they produce non-finite coordinates instead.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// An array's length along `axis` disagrees with what the other arguments imply
    #[error("shape mismatch for `{argument}` on axis {axis}: expected {expected}, got {actual}")]
    ShapeMismatch {
        argument: &'static str,
        axis: usize,
        expected: usize,
        actual: usize,
    },

    /// An argument that must hold at least one element was empty
    #[error("`{argument}` must not be empty")]
    Empty { argument: &'static str },

    /// Sigma clipping left too few values to estimate a spread
    #[error("sigma clipping kept {kept} values, at least 2 are needed")]
    TooFewKept { kept: usize },
}

/// Fails with `ShapeMismatch` unless `actual == expected`.
pub(crate) fn check_len(
    argument: &'static str,
    axis: usize,
    expected: usize,
    actual: usize,
) -> Result<()> {
    if expected == actual {
        Ok(())
    } else {
        Err(Error::ShapeMismatch {
            argument,
            axis,
            expected,
            actual,
        })
    }
}
