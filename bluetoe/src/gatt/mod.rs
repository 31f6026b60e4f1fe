//! Implementation of the Generic Attribute Profile (GATT).
//!
//! GATT describes a service framework that uses the Attribute Protocol for discovery and
//! interaction. A GATT server is described by nesting [`Characteristic`]s inside [`Service`]s;
//! a [`Database`] flattens that description into a table addressed by attribute handle.
//!
//! ```
//! use bluetoe::att::{AccessArgs, AccessResult, AttributeProvider};
//! use bluetoe::gatt::{BoundValue, Characteristic, Database, Service};
//! use bluetoe::uuid::Uuid16;
//! use std::cell::Cell;
//!
//! let level = Cell::new(87u8);
//! let services = Service::new(
//!     Uuid16(0x180F),
//!     Characteristic::new(Uuid16(0x2A19), BoundValue::new(&level)).no_write_access(),
//! );
//! let db = Database::<_, 8>::new(&services).unwrap();
//!
//! let mut buf = [0; 4];
//! let mut args = AccessArgs::read(&mut buf, 0);
//! assert_eq!(db.attribute_at(2).access(&mut args), AccessResult::Success);
//! assert_eq!(args.output(), &[87]);
//! ```
//!
//! [`Characteristic`]: struct.Characteristic.html
//! [`Service`]: struct.Service.html
//! [`Database`]: struct.Database.html

mod characteristic;
mod client_config;
mod database;
mod list;
mod notification;
mod service;
mod value;

use crate::uuid::Uuid16;

pub use self::characteristic::{
    Characteristic, CharacteristicDeclaration, CharacteristicValue, Properties, UserDescription,
};
pub use self::client_config::{ClientConfig, ClientConfigDescriptor, ClientConfigs, ConnectionConfig};
pub use self::database::Database;
pub use self::list::{AttributeList, Origin};
pub use self::notification::NotificationData;
pub use self::service::{Service, ServiceDeclaration, ServiceType};
pub use self::value::{BoundValue, ConstValue, ValueId, ValueStorage};

/// Type of a primary service declaration.
pub const PRIMARY_SERVICE: Uuid16 = Uuid16(0x2800);
/// Type of a secondary service declaration.
pub const SECONDARY_SERVICE: Uuid16 = Uuid16(0x2801);
/// Type of a characteristic declaration.
pub const CHARACTERISTIC: Uuid16 = Uuid16(0x2803);
/// Type of a characteristic user description descriptor.
pub const CHARACTERISTIC_USER_DESCRIPTION: Uuid16 = Uuid16(0x2901);
/// Type of a client characteristic configuration descriptor.
pub const CLIENT_CHARACTERISTIC_CONFIGURATION: Uuid16 = Uuid16(0x2902);
