use core::fmt;

/// Errors returned while assembling an attribute database.
///
/// Attribute accesses never fail with an `Error`; they report an
/// [`AccessResult`](att/enum.AccessResult.html) instead.
#[derive(Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum Error {
    /// The services describe more attributes than the database table can hold.
    ///
    /// Increase the capacity parameter of the `Database`.
    TooManyAttributes,

    /// The services describe more attributes than there are 16-bit handles.
    HandleSpaceExhausted,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Error::TooManyAttributes => "attribute table capacity exceeded",
            Error::HandleSpaceExhausted => "more attributes than attribute handles",
        })
    }
}
