//! Client Characteristic Configuration.
//!
//! Every characteristic that can notify or indicate gets a *Client Characteristic Configuration
//! Descriptor* and a configuration slot. Slots are numbered consecutively across the database, so
//! a connection stores its configuration in a plain array with one entry per slot.

use {
    super::NotificationData,
    crate::att::{AccessArgs, AccessKind, AccessResult, AttributeAccess, AttributeLocation},
    bitflags::bitflags,
    byteorder::{ByteOrder, LittleEndian},
};

bitflags! {
    /// Value of a Client Characteristic Configuration Descriptor.
    pub struct ClientConfig: u16 {
        const NOTIFICATION = 0x0001;
        const INDICATION   = 0x0002;
    }
}

/// The configuration slots of a single connection.
#[derive(Debug)]
pub struct ClientConfigs<'c> {
    slots: &'c mut [ClientConfig],
}

impl<'c> ClientConfigs<'c> {
    pub fn new(slots: &'c mut [ClientConfig]) -> Self {
        Self { slots }
    }

    /// A view without any slots. Configuration descriptors read as `0` and reject writes.
    pub fn none() -> Self {
        Self { slots: &mut [] }
    }

    pub fn has_slot(&self, index: usize) -> bool {
        index < self.slots.len()
    }

    /// Returns the configuration stored in slot `index`, or an empty one if there is no such slot.
    pub fn flags(&self, index: usize) -> ClientConfig {
        self.slots
            .get(index)
            .copied()
            .unwrap_or_else(ClientConfig::empty)
    }

    /// Stores `flags` in slot `index`. Returns `false` if there is no such slot.
    pub fn set(&mut self, index: usize, flags: ClientConfig) -> bool {
        match self.slots.get_mut(index) {
            Some(slot) => {
                *slot = flags;
                true
            }
            None => false,
        }
    }
}

/// Configuration storage owned by a connection.
///
/// `N` must be at least the database's number of client configurations.
#[derive(Debug, Copy, Clone)]
pub struct ConnectionConfig<const N: usize> {
    slots: [ClientConfig; N],
}

impl<const N: usize> ConnectionConfig<N> {
    /// Creates a configuration with notifications and indications disabled everywhere.
    pub fn new() -> Self {
        Self {
            slots: [ClientConfig::empty(); N],
        }
    }

    /// Returns a view of the slots to pass along with an access.
    pub fn configs(&mut self) -> ClientConfigs<'_> {
        ClientConfigs::new(&mut self.slots)
    }

    pub fn flags(&self, index: usize) -> ClientConfig {
        self.slots
            .get(index)
            .copied()
            .unwrap_or_else(ClientConfig::empty)
    }

    /// Returns whether the client enabled notifications for the located characteristic.
    pub fn notifications_enabled(&self, data: &NotificationData<'_>) -> bool {
        data.is_valid()
            && self
                .flags(data.client_config_index())
                .contains(ClientConfig::NOTIFICATION)
    }

    /// Returns whether the client enabled indications for the located characteristic.
    pub fn indications_enabled(&self, data: &NotificationData<'_>) -> bool {
        data.is_valid()
            && self
                .flags(data.client_config_index())
                .contains(ClientConfig::INDICATION)
    }

    /// Resets all slots, eg. when the connection is closed.
    pub fn clear(&mut self) {
        self.slots = [ClientConfig::empty(); N];
    }
}

impl<const N: usize> Default for ConnectionConfig<N> {
    fn default() -> Self {
        Self::new()
    }
}

/// Accessor of a Client Characteristic Configuration Descriptor.
///
/// Reads and writes the 2-byte little-endian value in the connection's slot. Written bits the
/// characteristic does not support are dropped.
#[derive(Debug)]
pub struct ClientConfigDescriptor {
    supported: ClientConfig,
}

impl ClientConfigDescriptor {
    pub fn new(supported: ClientConfig) -> Self {
        Self { supported }
    }

    pub fn supported(&self) -> ClientConfig {
        self.supported
    }

    pub(crate) fn support(&mut self, flags: ClientConfig) {
        self.supported |= flags;
    }
}

impl AttributeAccess for ClientConfigDescriptor {
    fn access(&self, args: &mut AccessArgs<'_>, location: AttributeLocation) -> AccessResult {
        let index = match location.client_config_index {
            Some(index) => index,
            None if args.kind().is_write() => return AccessResult::WriteNotPermitted,
            None => return AccessResult::ReadNotPermitted,
        };

        let mut value = [0; 2];
        LittleEndian::write_u16(&mut value, args.client_configs().flags(index).bits());

        if !args.kind().is_write() {
            return args.read_slice(&value);
        }
        if !args.client_configs().has_slot(index) {
            return AccessResult::WriteNotPermitted;
        }

        let result = args.write_with(value.len(), |offset, data| {
            value[offset..offset + data.len()].copy_from_slice(data)
        });

        if args.kind() == AccessKind::Write && args.buffer_size() > 0 {
            let flags = ClientConfig::from_bits_truncate(LittleEndian::read_u16(&value));
            args.client_configs().set(index, flags & self.supported);
        }

        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::att::Handle;

    fn location(index: usize) -> AttributeLocation {
        AttributeLocation {
            handle: Handle::from_raw(4),
            client_config_index: Some(index),
        }
    }

    #[test]
    fn read_slot() {
        let mut config = ConnectionConfig::<2>::new();
        config.configs().set(1, ClientConfig::INDICATION);
        let cccd = ClientConfigDescriptor::new(ClientConfig::all());

        let mut buf = [0xFF; 4];
        let mut args = AccessArgs::read(&mut buf, 0).with_client_configs(config.configs());
        assert_eq!(cccd.access(&mut args, location(1)), AccessResult::Success);
        assert_eq!(args.output(), &[0x02, 0x00]);

        let mut buf = [0xFF; 4];
        let mut args = AccessArgs::read(&mut buf, 0);
        assert_eq!(cccd.access(&mut args, location(1)), AccessResult::Success);
        assert_eq!(args.output(), &[0x00, 0x00]);
    }

    #[test]
    fn write_slot() {
        let mut config = ConnectionConfig::<2>::new();
        let cccd = ClientConfigDescriptor::new(ClientConfig::NOTIFICATION);

        let mut args = AccessArgs::write(&[0x03, 0x00], 0).with_client_configs(config.configs());
        assert_eq!(cccd.access(&mut args, location(0)), AccessResult::Success);
        drop(args);

        assert_eq!(config.flags(0), ClientConfig::NOTIFICATION);
        assert_eq!(config.flags(1), ClientConfig::empty());

        config.clear();
        assert_eq!(config.flags(0), ClientConfig::empty());
    }

    #[test]
    fn write_without_slot() {
        let cccd = ClientConfigDescriptor::new(ClientConfig::NOTIFICATION);
        let mut args = AccessArgs::write(&[0x01, 0x00], 0);
        assert_eq!(
            cccd.access(&mut args, location(0)),
            AccessResult::WriteNotPermitted
        );

        let mut config = ConnectionConfig::<1>::new();
        let mut args = AccessArgs::write(&[0x01, 0x00], 0).with_client_configs(config.configs());
        assert_eq!(
            cccd.access(&mut args, location(3)),
            AccessResult::WriteNotPermitted
        );
    }

    #[test]
    fn check_write_keeps_slot() {
        let mut config = ConnectionConfig::<1>::new();
        config.configs().set(0, ClientConfig::NOTIFICATION);
        let cccd = ClientConfigDescriptor::new(ClientConfig::all());

        let mut args = AccessArgs::check_write(0).with_client_configs(config.configs());
        assert_eq!(cccd.access(&mut args, location(0)), AccessResult::Success);
        drop(args);
        assert_eq!(config.flags(0), ClientConfig::NOTIFICATION);
    }
}
