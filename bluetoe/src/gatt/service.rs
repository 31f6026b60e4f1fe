//! Primary and secondary services.

use {
    super::{AttributeList, NotificationData, Origin, ValueId, PRIMARY_SERVICE, SECONDARY_SERVICE},
    crate::att::{AccessArgs, AccessResult, AttUuid, Attribute, AttributeAccess, AttributeLocation},
};

/// A collection of data and associated behaviors to accomplish a particular function or feature.
///
/// There are two types of services:
/// * Primary services expose the primary usable functionality of a device
/// * Secondary services are only intended to be referenced from another service or higher level
///   specification
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ServiceType {
    Primary,
    Secondary,
}

/// A service declaration followed by the attributes of its characteristics.
///
/// `L` is a list of characteristics: a single `Characteristic`, a tuple of them, an array, a
/// slice or `()`.
#[derive(Debug)]
pub struct Service<L> {
    declaration: ServiceDeclaration,
    characteristics: L,
}

impl<L: AttributeList> Service<L> {
    /// Creates a primary service.
    pub fn new(uuid: impl Into<AttUuid>, characteristics: L) -> Self {
        Self::with_type(uuid.into(), ServiceType::Primary, characteristics)
    }

    /// Creates a secondary service.
    pub fn secondary(uuid: impl Into<AttUuid>, characteristics: L) -> Self {
        Self::with_type(uuid.into(), ServiceType::Secondary, characteristics)
    }

    fn with_type(uuid: AttUuid, service_type: ServiceType, characteristics: L) -> Self {
        Self {
            declaration: ServiceDeclaration { uuid, service_type },
            characteristics,
        }
    }

    pub fn uuid(&self) -> AttUuid {
        self.declaration.uuid
    }

    pub fn service_type(&self) -> ServiceType {
        self.declaration.service_type
    }

    pub fn characteristics(&self) -> &L {
        &self.characteristics
    }
}

impl<L: AttributeList> AttributeList for Service<L> {
    fn number_of_attributes(&self) -> usize {
        1 + self.characteristics.number_of_attributes()
    }

    fn number_of_client_configs(&self) -> usize {
        self.characteristics.number_of_client_configs()
    }

    fn attribute_at(&self, index: usize, origin: Origin) -> Attribute<'_> {
        if index == 0 {
            let uuid = match self.declaration.service_type {
                ServiceType::Primary => PRIMARY_SERVICE,
                ServiceType::Secondary => SECONDARY_SERVICE,
            };
            let location = AttributeLocation {
                handle: origin.first_handle,
                client_config_index: None,
            };
            return Attribute::new(uuid, &self.declaration, location);
        }

        self.characteristics
            .attribute_at(index - 1, origin.skip(1))
    }

    fn find_notification_data(&self, value: ValueId, origin: Origin) -> NotificationData<'_> {
        self.characteristics
            .find_notification_data(value, origin.skip(1))
    }
}

/// Accessor of a service declaration. Its value is the service UUID.
#[derive(Debug)]
pub struct ServiceDeclaration {
    uuid: AttUuid,
    service_type: ServiceType,
}

impl AttributeAccess for ServiceDeclaration {
    fn access(&self, args: &mut AccessArgs<'_>, _location: AttributeLocation) -> AccessResult {
        let mut value = [0; 16];
        let len = self.uuid.encode_le(&mut value);
        args.read_slice(&value[..len])
    }
}

#[cfg(test)]
mod tests {
    use {
        super::*,
        crate::{
            att::Handle,
            gatt::{BoundValue, Characteristic},
            uuid::{Uuid128, Uuid16},
        },
        core::cell::Cell,
    };

    const SERVICE: Uuid128 =
        Uuid128::from_fields(0xF0426E52, 0x4450, 0x4F3B, 0xB058, 0x5BAB1191D92A);

    #[test]
    fn attribute_count() {
        let a = Cell::new(0u8);
        let b = Cell::new(0u16);
        let characteristics = (
            Characteristic::new(Uuid16(0x2A00), BoundValue::new(&a)).notify(),
            Characteristic::new(Uuid16(0x2A01), BoundValue::new(&b)).name("b"),
        );
        let expected = 1
            + characteristics.0.number_of_attributes()
            + characteristics.1.number_of_attributes();

        let service = Service::new(SERVICE, characteristics);
        assert_eq!(service.number_of_attributes(), expected);
        assert_eq!(service.number_of_attributes(), 7);
        assert_eq!(service.number_of_client_configs(), 1);

        let empty = Service::new(Uuid16(0x1800), ());
        assert_eq!(empty.number_of_attributes(), 1);
    }

    #[test]
    fn declaration_read() {
        let service = Service::new(SERVICE, ());
        let declaration = service.attribute_at(0, Origin::START);
        assert_eq!(declaration.uuid, Uuid16(0x2800));
        assert_eq!(declaration.handle(), Handle::FIRST);

        let mut buf = [0; 32];
        let mut args = AccessArgs::read(&mut buf, 0);
        assert_eq!(declaration.access(&mut args), AccessResult::Success);
        assert_eq!(args.output(), &SERVICE.to_le_bytes());

        for capacity in 0..16 {
            let mut buf = [0; 16];
            let mut args = AccessArgs::read(&mut buf[..capacity], 0);
            assert_eq!(declaration.access(&mut args), AccessResult::ReadTruncated);
            assert_eq!(args.output(), &SERVICE.to_le_bytes()[..capacity]);
        }

        let mut args = AccessArgs::write(&[0; 16], 0);
        assert_eq!(declaration.access(&mut args), AccessResult::WriteNotPermitted);
    }

    #[test]
    fn secondary_16bit() {
        let service = Service::secondary(Uuid16(0x180F), ());
        assert_eq!(service.service_type(), ServiceType::Secondary);
        let declaration = service.attribute_at(0, Origin::START);
        assert_eq!(declaration.uuid, Uuid16(0x2801));

        let mut buf = [0; 16];
        let mut args = AccessArgs::read(&mut buf, 0);
        assert_eq!(declaration.access(&mut args), AccessResult::Success);
        assert_eq!(args.output(), &[0x0F, 0x18]);
    }

    #[test]
    fn characteristics_follow_declaration() {
        let a = Cell::new(0u8);
        let service = Service::new(
            Uuid16(0x180F),
            Characteristic::new(Uuid16(0x2A19), BoundValue::new(&a)).notify(),
        );
        let origin = Origin::START.skip(9);

        let uuids = [0x2800, 0x2803, 0x2A19, 0x2902];
        for (index, uuid) in uuids.iter().enumerate() {
            let attribute = service.attribute_at(index, origin);
            assert_eq!(attribute.uuid, Uuid16(*uuid));
            assert_eq!(attribute.handle().as_u16(), 10 + index as u16);
        }

        let data = service.find_notification_data(ValueId::of(&a), origin);
        assert_eq!(data.handle(), Handle::from_raw(12));
    }
}
