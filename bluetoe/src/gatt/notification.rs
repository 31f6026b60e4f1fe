//! Locating the value a notification or indication is sent for.

use crate::att::{Attribute, Handle};

/// Everything needed to push a notification or indication for a characteristic value.
#[derive(Debug, Copy, Clone)]
pub struct NotificationData<'a> {
    handle: Handle,
    value_attribute: Option<Attribute<'a>>,
    client_config_index: usize,
}

impl<'a> NotificationData<'a> {
    /// Result of a failed lookup.
    pub fn invalid() -> Self {
        Self {
            handle: Handle::NULL,
            value_attribute: None,
            client_config_index: 0,
        }
    }

    pub fn new(handle: Handle, value_attribute: Attribute<'a>, client_config_index: usize) -> Self {
        Self {
            handle,
            value_attribute: Some(value_attribute),
            client_config_index,
        }
    }

    /// Returns whether the lookup found a characteristic.
    pub fn is_valid(&self) -> bool {
        !self.handle.is_null()
    }

    /// Handle of the characteristic value, `Handle::NULL` if invalid.
    pub fn handle(&self) -> Handle {
        self.handle
    }

    /// The characteristic value attribute, used to read the value to push.
    pub fn value_attribute(&self) -> Option<Attribute<'a>> {
        self.value_attribute
    }

    /// Index of the characteristic's client configuration slot.
    ///
    /// Meaningless if the data is invalid.
    pub fn client_config_index(&self) -> usize {
        self.client_config_index
    }
}
