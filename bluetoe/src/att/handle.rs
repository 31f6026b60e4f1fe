//! Attribute handles.

use core::fmt;

/// A 16-bit handle uniquely identifying an attribute in the database.
///
/// Handles are assigned consecutively starting at `0x0001`. The `0x0000` handle (`NULL`) is
/// invalid and must not be used.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct Handle(u16);

impl Handle {
    /// The `0x0000` handle is not used for actual attributes, but as a special placeholder when no
    /// attribute handle is valid (eg. when a notification could not be located).
    pub const NULL: Self = Handle(0x0000);

    /// The handle of the first attribute in a database.
    pub const FIRST: Self = Handle(0x0001);

    /// Create an attribute handle from a raw u16.
    pub const fn from_raw(raw: u16) -> Self {
        Handle(raw)
    }

    /// Returns the raw 16-bit integer representing this handle.
    pub const fn as_u16(&self) -> u16 {
        self.0
    }

    /// Returns the handle of the attribute at the 0-based table position `index`.
    ///
    /// Returns `None` if the resulting handle would not fit in 16 bits.
    pub fn from_index(index: usize) -> Option<Self> {
        if index < usize::from(u16::max_value()) {
            Some(Handle(index as u16 + 1))
        } else {
            None
        }
    }

    /// Returns the 0-based table position of this handle, or `None` for `NULL`.
    pub fn as_index(&self) -> Option<usize> {
        match self.0 {
            0 => None,
            n => Some(usize::from(n) - 1),
        }
    }

    /// Returns the handle `n` positions after `self`.
    pub(crate) fn offset(&self, n: usize) -> Self {
        Handle(self.0.wrapping_add(n as u16))
    }

    /// Returns whether this is the `NULL` handle.
    pub fn is_null(&self) -> bool {
        self.0 == 0
    }
}

impl fmt::Debug for Handle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#06X}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_mapping() {
        assert_eq!(Handle::from_index(0), Some(Handle::FIRST));
        assert_eq!(Handle::from_index(2).map(|h| h.as_u16()), Some(3));
        assert_eq!(Handle::from_index(0xFFFE).map(|h| h.as_u16()), Some(0xFFFF));
        assert_eq!(Handle::from_index(0xFFFF), None);

        assert_eq!(Handle::NULL.as_index(), None);
        assert_eq!(Handle::from_raw(3).as_index(), Some(2));
        assert_eq!(Handle::FIRST.offset(4).as_u16(), 5);
    }

    #[test]
    fn debug() {
        assert_eq!(format!("{:?}", Handle::from_raw(0x2A)), "0x002A");
    }
}
