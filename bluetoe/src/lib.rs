//! A compile-time configured GATT attribute database for BLE peripherals.
//!
//! Bluetoe assembles services and characteristics into one flat table of attributes, addressed by
//! attribute handle, without allocating. The table is built once; afterwards every access is a
//! bounded-time lookup followed by a call into the attribute's accessor.
//!
//! # Using the database
//!
//! Describe the server by nesting [`Characteristic`]s inside [`Service`]s. Characteristic values
//! stay owned by the application and are bound to characteristics by reference. A [`Database`]
//! flattens the description and implements [`AttributeProvider`], the interface used by an ATT
//! server:
//!
//! ```
//! use bluetoe::att::{AccessArgs, AccessResult, AttributeProvider, Handle};
//! use bluetoe::gatt::{BoundValue, Characteristic, ConnectionConfig, Database, Service, ValueId};
//! use bluetoe::uuid::Uuid16;
//! use std::cell::Cell;
//!
//! let temperature = Cell::new(0i16);
//! let services = Service::new(
//!     Uuid16(0x181A),
//!     Characteristic::new(Uuid16(0x2A6E), BoundValue::new(&temperature))
//!         .no_write_access()
//!         .notify(),
//! );
//! let db = Database::<_, 4>::new(&services).unwrap();
//! let mut config = ConnectionConfig::<1>::new();
//!
//! // The client subscribes by writing the configuration descriptor.
//! let cccd = db.attribute(Handle::from_raw(4)).unwrap();
//! let mut args = AccessArgs::write(&[0x01, 0x00], 0).with_client_configs(config.configs());
//! assert_eq!(cccd.access(&mut args), AccessResult::Success);
//!
//! // The application updates the value and looks up where to push it.
//! temperature.set(2150);
//! let data = db.find_notification_data(ValueId::of(&temperature));
//! assert_eq!(data.handle(), Handle::from_raw(3));
//! assert!(config.notifications_enabled(&data));
//! ```
//!
//! The link layer, L2CAP and the ATT PDU codec are not part of this crate; they consume the
//! database through [`AttributeProvider`].
//!
//! [`Characteristic`]: gatt/struct.Characteristic.html
//! [`Service`]: gatt/struct.Service.html
//! [`Database`]: gatt/struct.Database.html
//! [`AttributeProvider`]: att/trait.AttributeProvider.html

// We're `#[no_std]`, except when we're testing
#![cfg_attr(not(test), no_std)]
// Deny a few warnings in doctests, since rustdoc `allow`s many warnings by default
#![doc(test(attr(deny(unused_imports, unused_must_use))))]
#![warn(rust_2018_idioms)]
// The claims of this lint are dubious, disable it
#![allow(clippy::trivially_copy_pass_by_ref)]

#[macro_use]
mod log;
#[macro_use]
mod utils;
pub mod att;
mod error;
pub mod gatt;
pub mod uuid;

pub use self::error::Error;
