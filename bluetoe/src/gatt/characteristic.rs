//! Characteristics.
//!
//! A characteristic contributes the following attributes, in this order:
//!
//! * The *Characteristic Declaration* (`0x2803`), whose value is
//!   `[properties:1][value handle:2][value UUID:2 or 16]`.
//! * The *Characteristic Value*, typed with the characteristic's UUID and backed by a
//!   [`ValueStorage`].
//! * A *Client Characteristic Configuration Descriptor* (`0x2902`) if the characteristic can
//!   notify or indicate.
//! * A *Characteristic User Description* (`0x2901`) if the characteristic has a name.
//!
//! [`ValueStorage`]: ../trait.ValueStorage.html

use {
    super::{
        AttributeList, ClientConfig, ClientConfigDescriptor, NotificationData, Origin, ValueId,
        ValueStorage, CHARACTERISTIC, CHARACTERISTIC_USER_DESCRIPTION,
        CLIENT_CHARACTERISTIC_CONFIGURATION,
    },
    crate::att::{
        AccessArgs, AccessKind, AccessResult, AttUuid, Attribute, AttributeAccess,
        AttributeLocation,
    },
    bitflags::bitflags,
    byteorder::{ByteOrder, LittleEndian},
};

bitflags! {
    /// Characteristic properties, as announced in the characteristic declaration.
    pub struct Properties: u8 {
        const BROADCAST    = 0x01;
        const READ         = 0x02;
        const WRITE_NO_RSP = 0x04;
        const WRITE        = 0x08;
        const NOTIFY       = 0x10;
        const INDICATE     = 0x20;
        const AUTH_WRITES  = 0x40;
        const EXTENDED     = 0x80;
    }
}

/// A characteristic bound to application-owned storage.
///
/// Built from a UUID and a storage with a few builder methods:
///
/// ```
/// use bluetoe::gatt::{BoundValue, Characteristic, Properties};
/// use bluetoe::uuid::Uuid16;
/// use std::cell::Cell;
///
/// let level = Cell::new(100u8);
/// let battery_level = Characteristic::new(Uuid16(0x2A19), BoundValue::new(&level))
///     .no_write_access()
///     .notify()
///     .name("Battery Level");
///
/// assert_eq!(battery_level.properties(), Properties::READ | Properties::NOTIFY);
/// ```
#[derive(Debug)]
pub struct Characteristic<'a, S> {
    declaration: CharacteristicDeclaration,
    value: CharacteristicValue<S>,
    client_config: Option<ClientConfigDescriptor>,
    description: Option<UserDescription<'a>>,
}

impl<'a, S: ValueStorage> Characteristic<'a, S> {
    /// Creates a characteristic of type `uuid` whose value is kept in `storage`.
    ///
    /// The value is readable unless the storage forbids it, and writable if the storage allows it.
    pub fn new(uuid: impl Into<AttUuid>, storage: S) -> Self {
        let uuid = uuid.into();
        let mut characteristic = Self {
            declaration: CharacteristicDeclaration {
                properties: Properties::empty(),
                uuid,
            },
            value: CharacteristicValue {
                uuid,
                storage,
                readable: S::READABLE,
                writable: S::WRITABLE,
            },
            client_config: None,
            description: None,
        };
        characteristic.update_properties();
        characteristic
    }

    /// Removes read access to the value.
    pub fn no_read_access(mut self) -> Self {
        self.value.readable = false;
        self.update_properties();
        self
    }

    /// Removes write access to the value.
    pub fn no_write_access(mut self) -> Self {
        self.value.writable = false;
        self.update_properties();
        self
    }

    /// Allows the client to subscribe to notifications.
    pub fn notify(self) -> Self {
        self.subscribable(ClientConfig::NOTIFICATION)
    }

    /// Allows the client to subscribe to indications.
    pub fn indicate(self) -> Self {
        self.subscribable(ClientConfig::INDICATION)
    }

    /// Adds a *Characteristic User Description* with the text `name`.
    pub fn name(mut self, name: &'a str) -> Self {
        self.description = Some(UserDescription(name));
        self
    }

    fn subscribable(mut self, flags: ClientConfig) -> Self {
        self.client_config
            .get_or_insert_with(|| ClientConfigDescriptor::new(ClientConfig::empty()))
            .support(flags);
        self.update_properties();
        self
    }

    fn update_properties(&mut self) {
        let mut properties = Properties::empty();
        properties.set(Properties::READ, self.value.readable);
        properties.set(Properties::WRITE, self.value.writable);

        if let Some(descriptor) = &self.client_config {
            let supported = descriptor.supported();
            properties.set(
                Properties::NOTIFY,
                supported.contains(ClientConfig::NOTIFICATION),
            );
            properties.set(
                Properties::INDICATE,
                supported.contains(ClientConfig::INDICATION),
            );
        }

        self.declaration.properties = properties;
    }

    pub fn uuid(&self) -> AttUuid {
        self.value.uuid
    }

    pub fn properties(&self) -> Properties {
        self.declaration.properties
    }

    pub fn storage(&self) -> &S {
        &self.value.storage
    }

    fn location(&self, index: usize, origin: Origin) -> AttributeLocation {
        AttributeLocation {
            handle: origin.handle_at(index),
            client_config_index: self
                .client_config
                .as_ref()
                .map(|_| origin.first_client_config),
        }
    }
}

impl<S: ValueStorage> AttributeList for Characteristic<'_, S> {
    fn number_of_attributes(&self) -> usize {
        2 + self.client_config.iter().count() + self.description.iter().count()
    }

    fn number_of_client_configs(&self) -> usize {
        self.client_config.iter().count()
    }

    fn attribute_at(&self, index: usize, origin: Origin) -> Attribute<'_> {
        let location = self.location(index, origin);
        let mut descriptors = self
            .client_config
            .as_ref()
            .map(|d| (CLIENT_CHARACTERISTIC_CONFIGURATION, d as &dyn AttributeAccess))
            .into_iter()
            .chain(
                self.description
                    .as_ref()
                    .map(|d| (CHARACTERISTIC_USER_DESCRIPTION, d as &dyn AttributeAccess)),
            );

        match index {
            0 => Attribute::new(CHARACTERISTIC, &self.declaration, location),
            1 => Attribute::new(self.value.uuid.attribute_type(), &self.value, location),
            _ => match descriptors.nth(index - 2) {
                Some((uuid, accessor)) => Attribute::new(uuid, accessor, location),
                None => panic!("attribute index out of range"),
            },
        }
    }

    fn find_notification_data(&self, value: ValueId, origin: Origin) -> NotificationData<'_> {
        if self.client_config.is_some() && self.value.storage.identity() == value {
            NotificationData::new(
                origin.handle_at(1),
                self.attribute_at(1, origin),
                origin.first_client_config,
            )
        } else {
            NotificationData::invalid()
        }
    }
}

/// Accessor of a characteristic declaration.
#[derive(Debug)]
pub struct CharacteristicDeclaration {
    properties: Properties,
    uuid: AttUuid,
}

impl AttributeAccess for CharacteristicDeclaration {
    fn access(&self, args: &mut AccessArgs<'_>, location: AttributeLocation) -> AccessResult {
        let mut value = [0; 19];
        value[0] = self.properties.bits();
        LittleEndian::write_u16(&mut value[1..3], location.handle.offset(1).as_u16());
        let len = 3 + self.uuid.encode_le(&mut value[3..]);

        args.read_slice(&value[..len])
    }
}

/// Accessor of a characteristic value.
#[derive(Debug)]
pub struct CharacteristicValue<S> {
    uuid: AttUuid,
    storage: S,
    readable: bool,
    writable: bool,
}

impl<S: ValueStorage> AttributeAccess for CharacteristicValue<S> {
    fn access(&self, args: &mut AccessArgs<'_>, _location: AttributeLocation) -> AccessResult {
        let storage = &self.storage;
        let kind = args.kind();

        if kind.is_write() {
            if !self.writable {
                return AccessResult::WriteNotPermitted;
            }
            return args.write_with(storage.size(), |offset, data| storage.write(offset, data));
        }

        // The type stays discoverable even if the value can't be read.
        if kind == AccessKind::Compare128BitUuid {
            args.compare_128bit_uuid_with(&self.uuid)
        } else if !self.readable {
            AccessResult::ReadNotPermitted
        } else {
            args.read_with(storage.size(), |offset, out| storage.read(offset, out))
        }
    }
}

/// Accessor of a *Characteristic User Description*.
#[derive(Debug)]
pub struct UserDescription<'a>(&'a str);

impl AttributeAccess for UserDescription<'_> {
    fn access(&self, args: &mut AccessArgs<'_>, _location: AttributeLocation) -> AccessResult {
        args.read_slice(self.0.as_bytes())
    }
}

#[cfg(test)]
mod tests {
    use {
        super::*,
        crate::{
            att::Handle,
            gatt::{BoundValue, ConstValue},
            uuid::{Uuid128, Uuid16},
        },
        core::cell::Cell,
    };

    fn read(attribute: &Attribute<'_>, buf: &mut [u8]) -> (AccessResult, usize) {
        let mut args = AccessArgs::read(buf, 0);
        let result = attribute.access(&mut args);
        (result, args.buffer_size())
    }

    #[test]
    fn attribute_counts() {
        let cell = Cell::new(0u8);
        let plain = Characteristic::new(Uuid16(0x2A00), BoundValue::new(&cell));
        assert_eq!(plain.number_of_attributes(), 2);
        assert_eq!(plain.number_of_client_configs(), 0);

        let full = Characteristic::new(Uuid16(0x2A00), BoundValue::new(&cell))
            .notify()
            .indicate()
            .name("full");
        assert_eq!(full.number_of_attributes(), 4);
        assert_eq!(full.number_of_client_configs(), 1);
        assert_eq!(full.attribute_at(2, Origin::START).uuid, Uuid16(0x2902));
        assert_eq!(full.attribute_at(3, Origin::START).uuid, Uuid16(0x2901));

        let named = Characteristic::new(Uuid16(0x2A00), BoundValue::new(&cell)).name("n");
        assert_eq!(named.number_of_attributes(), 3);
        assert_eq!(named.attribute_at(2, Origin::START).uuid, Uuid16(0x2901));
    }

    #[test]
    fn declaration_16bit() {
        let cell = Cell::new(0u32);
        let c = Characteristic::new(Uuid16(0x2A19), BoundValue::new(&cell));
        let origin = Origin::START.skip(4);
        let declaration = c.attribute_at(0, origin);
        assert_eq!(declaration.uuid, Uuid16(0x2803));
        assert_eq!(declaration.handle(), Handle::from_raw(5));

        let mut buf = [0; 32];
        assert_eq!(read(&declaration, &mut buf), (AccessResult::Success, 5));
        assert_eq!(&buf[..5], &[0x0A, 0x06, 0x00, 0x19, 0x2A]);

        let mut buf = [0; 4];
        assert_eq!(read(&declaration, &mut buf), (AccessResult::ReadTruncated, 4));

        let mut args = AccessArgs::write(&[0], 0);
        assert_eq!(declaration.access(&mut args), AccessResult::WriteNotPermitted);
    }

    #[test]
    fn declaration_128bit() {
        let uuid = Uuid128::from_fields(0xF0426E52, 0x4450, 0x4F3B, 0xB058, 0x5BAB1191D92A);
        let value = [1u8, 2, 3];
        let c = Characteristic::new(uuid, ConstValue::new(&value)).notify();
        assert_eq!(c.properties(), Properties::READ | Properties::NOTIFY);

        let mut buf = [0; 32];
        let declaration = c.attribute_at(0, Origin::START);
        assert_eq!(read(&declaration, &mut buf), (AccessResult::Success, 19));
        assert_eq!(&buf[..3], &[0x12, 0x02, 0x00]);
        assert_eq!(&buf[3..19], &uuid.to_le_bytes());

        let value = c.attribute_at(1, Origin::START);
        assert_eq!(value.uuid, crate::att::INTERNAL_128BIT_UUID);

        let wire = uuid.to_le_bytes();
        let mut args = AccessArgs::compare_128bit_uuid(&wire);
        assert_eq!(value.access(&mut args), AccessResult::UuidEqual);
    }

    #[test]
    fn write_then_read() {
        let cell = Cell::new([0u8; 4]);
        let c = Characteristic::new(Uuid16(0x2A00), BoundValue::new(&cell));
        let value = c.attribute_at(1, Origin::START);

        let mut args = AccessArgs::write(&[0xDE, 0xAD, 0xBE, 0xEF], 0);
        assert_eq!(value.access(&mut args), AccessResult::Success);
        assert_eq!(cell.get(), [0xDE, 0xAD, 0xBE, 0xEF]);

        let mut buf = [0; 4];
        assert_eq!(read(&value, &mut buf), (AccessResult::Success, 4));
        assert_eq!(buf, [0xDE, 0xAD, 0xBE, 0xEF]);

        let mut args = AccessArgs::write(&[1, 2, 3, 4, 5, 6, 7, 8], 0);
        assert_eq!(value.access(&mut args), AccessResult::WriteOverflow);
        assert_eq!(cell.get(), [1, 2, 3, 4]);

        let mut buf = [0; 2];
        assert_eq!(read(&value, &mut buf), (AccessResult::ReadTruncated, 2));
        assert_eq!(buf, [1, 2]);
    }

    #[test]
    fn no_read_access() {
        let cell = Cell::new(7u8);
        let c = Characteristic::new(Uuid16(0x2A00), BoundValue::new(&cell)).no_read_access();
        assert_eq!(c.properties(), Properties::WRITE);
        let value = c.attribute_at(1, Origin::START);

        for capacity in 0..3 {
            let mut buf = [0; 2];
            let mut args = AccessArgs::read(&mut buf[..capacity], 0);
            assert_eq!(value.access(&mut args), AccessResult::ReadNotPermitted);
        }

        let mut args = AccessArgs::compare_value(&[7], 0);
        assert_eq!(value.access(&mut args), AccessResult::ReadNotPermitted);

        let mut args = AccessArgs::write(&[9], 0);
        assert_eq!(value.access(&mut args), AccessResult::Success);
        assert_eq!(cell.get(), 9);
    }

    #[test]
    fn no_read_access_128bit_type() {
        let uuid = Uuid128::from_fields(0xF0426E52, 0x4450, 0x4F3B, 0xB058, 0x5BAB1191D92A);
        let other = Uuid128::from_fields(0xF0426E52, 0x4450, 0x4F3B, 0xB058, 0x5BAB1191D92B);
        let cell = Cell::new(7u8);
        let c = Characteristic::new(uuid, BoundValue::new(&cell)).no_read_access();
        let value = c.attribute_at(1, Origin::START);

        let uuid_bytes = uuid.to_le_bytes();
        let mut args = AccessArgs::compare_128bit_uuid(&uuid_bytes);
        assert_eq!(value.access(&mut args), AccessResult::UuidEqual);
        let other_bytes = other.to_le_bytes();
        let mut args = AccessArgs::compare_128bit_uuid(&other_bytes);
        assert_eq!(value.access(&mut args), AccessResult::Success);

        let mut args = AccessArgs::compare_value(&[7], 0);
        assert_eq!(value.access(&mut args), AccessResult::ReadNotPermitted);
        let mut buf = [0; 1];
        assert_eq!(read(&value, &mut buf).0, AccessResult::ReadNotPermitted);
    }

    #[test]
    fn no_write_access() {
        let cell = Cell::new(7u8);
        let read_only = Characteristic::new(Uuid16(0x2A00), BoundValue::new(&cell)).no_write_access();
        let constant = Characteristic::new(Uuid16(0x2A01), ConstValue::new(&7u8));
        assert_eq!(read_only.properties(), Properties::READ);
        assert_eq!(constant.properties(), Properties::READ);

        for c in &[read_only.attribute_at(1, Origin::START), constant.attribute_at(1, Origin::START)] {
            let mut args = AccessArgs::write(&[9], 0);
            assert_eq!(c.access(&mut args), AccessResult::WriteNotPermitted);
            let mut args = AccessArgs::check_write(0);
            assert_eq!(c.access(&mut args), AccessResult::WriteNotPermitted);

            let mut args = AccessArgs::compare_value(&[7], 0);
            assert_eq!(c.access(&mut args), AccessResult::ValueEqual);
        }
        assert_eq!(cell.get(), 7);
    }

    #[test]
    fn user_description() {
        let cell = Cell::new(0u8);
        let c = Characteristic::new(Uuid16(0x2A00), BoundValue::new(&cell)).name("Level");
        let description = c.attribute_at(2, Origin::START);

        let mut buf = [0; 16];
        assert_eq!(read(&description, &mut buf), (AccessResult::Success, 5));
        assert_eq!(&buf[..5], b"Level");

        let mut args = AccessArgs::write(b"x", 0);
        assert_eq!(description.access(&mut args), AccessResult::WriteNotPermitted);
    }

    #[test]
    fn notification_lookup() {
        let a = Cell::new(0u8);
        let b = Cell::new(0u8);
        let c = Characteristic::new(Uuid16(0x2A00), BoundValue::new(&a)).notify();
        let origin = Origin {
            first_handle: Handle::from_raw(10),
            first_client_config: 3,
        };

        let data = c.find_notification_data(ValueId::of(&a), origin);
        assert!(data.is_valid());
        assert_eq!(data.handle(), Handle::from_raw(11));
        assert_eq!(data.client_config_index(), 3);
        assert_eq!(data.value_attribute().map(|a| a.uuid), Some(Uuid16(0x2A00)));

        assert!(!c.find_notification_data(ValueId::of(&b), origin).is_valid());

        let silent = Characteristic::new(Uuid16(0x2A00), BoundValue::new(&a));
        assert!(!silent.find_notification_data(ValueId::of(&a), origin).is_valid());
    }
}
