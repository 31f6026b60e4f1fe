//! Attributes and the protocol used to access them.
//!
//! The Attribute Protocol (ATT) transports accesses to a server's attributes. This module holds
//! the server-side representation of those attributes; decoding PDUs and framing responses is the
//! job of the transport that owns the database.
//!
//! # Attributes
//!
//! The attribute table hosts a list of *Attributes*, which consist of the following:
//!
//! * A 16-bit *Attribute Handle* ([`Handle`]) uniquely identifying the attribute. It is the
//!   1-based position of the attribute in the table.
//! * A 16-bit UUID identifying the attribute type. Attributes with a 128-bit type store
//!   [`INTERNAL_128BIT_UUID`] and answer *compare 128-bit UUID* accesses instead.
//! * An accessor implementing [`AttributeAccess`], which reads, writes and compares the
//!   attribute's value and enforces its permissions.
//!
//! [`Handle`]: struct.Handle.html
//! [`INTERNAL_128BIT_UUID`]: constant.INTERNAL_128BIT_UUID.html
//! [`AttributeAccess`]: trait.AttributeAccess.html

mod access;
mod handle;
mod uuid;

use {
    crate::{
        gatt::{NotificationData, ValueId},
        uuid::Uuid16,
    },
    core::fmt,
};

pub use self::access::{AccessArgs, AccessKind, AccessResult};
pub use self::handle::Handle;
pub use self::uuid::{AttUuid, INTERNAL_128BIT_UUID};

enum_with_unknown! {
    /// Error codes that can be sent from the ATT server to the client in response to a request.
    ///
    /// Used as the payload of `ErrorRsp` PDUs.
    #[derive(Copy, Clone, Debug, PartialEq, Eq)]
    pub enum ErrorCode(u8) {
        /// Attempted to use a `Handle` that isn't valid on this server.
        InvalidHandle = 0x01,
        /// Attribute isn't readable.
        ReadNotPermitted = 0x02,
        /// Attribute isn't writable.
        WriteNotPermitted = 0x03,
        /// Attribute PDU is invalid.
        InvalidPdu = 0x04,
        /// Authentication needed before attribute can be read/written.
        InsufficientAuthentication = 0x05,
        /// Server doesn't support this operation.
        RequestNotSupported = 0x06,
        /// Offset was past the end of the attribute.
        InvalidOffset = 0x07,
        /// Authorization needed before attribute can be read/written.
        InsufficientAuthorization = 0x08,
        /// Too many "prepare write" requests have been queued.
        PrepareQueueFull = 0x09,
        /// No attribute found within the specified attribute handle range.
        AttributeNotFound = 0x0A,
        /// Attribute can't be read/written using *Read Key Blob* request.
        AttributeNotLong = 0x0B,
        /// The encryption key in use is too weak to access an attribute.
        InsufficientEncryptionKeySize = 0x0C,
        /// Attribute value has an incorrect length for the operation.
        InvalidAttributeValueLength = 0x0D,
        /// Request has encountered an "unlikely" error and could not be completed.
        UnlikelyError = 0x0E,
        /// Attribute cannot be read/written without an encrypted connection.
        InsufficientEncryption = 0x0F,
        /// Attribute type is an invalid grouping attribute according to a higher-layer spec.
        UnsupportedGroupType = 0x10,
        /// Server didn't have enough resources to complete a request.
        InsufficientResources = 0x11,
    }
}

/// Where an attribute ended up in the flattened table.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct AttributeLocation {
    /// Handle of the attribute.
    pub handle: Handle,
    /// Client configuration slot of the characteristic the attribute belongs to, if it has one.
    pub client_config_index: Option<usize>,
}

/// Access behaviour of an attribute.
///
/// Implementations answer every access with exactly one `AccessResult` and never panic. They are
/// told the location of the attribute they serve, so a single declaration can refer to the
/// handle of its neighbours.
pub trait AttributeAccess {
    fn access(&self, args: &mut AccessArgs<'_>, location: AttributeLocation) -> AccessResult;
}

/// An entry of the attribute table.
///
/// Attributes are immutable and cheap to copy. All mutable state lives in storage owned by the
/// application and reached through the accessor.
#[derive(Copy, Clone)]
pub struct Attribute<'a> {
    /// The 16-bit type of the attribute, eg. "Primary Service" (`0x2800`).
    pub uuid: Uuid16,
    accessor: &'a dyn AttributeAccess,
    location: AttributeLocation,
}

impl<'a> Attribute<'a> {
    pub fn new(uuid: Uuid16, accessor: &'a dyn AttributeAccess, location: AttributeLocation) -> Self {
        Self {
            uuid,
            accessor,
            location,
        }
    }

    /// Performs an access on this attribute.
    pub fn access(&self, args: &mut AccessArgs<'_>) -> AccessResult {
        self.accessor.access(args, self.location)
    }

    pub fn handle(&self) -> Handle {
        self.location.handle
    }

    pub fn location(&self) -> AttributeLocation {
        self.location
    }
}

impl fmt::Debug for Attribute<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Attribute")
            .field("handle", &self.location.handle)
            .field("uuid", &self.uuid)
            .field("client_config_index", &self.location.client_config_index)
            .finish()
    }
}

/// Trait for attribute sets that can be hosted by an ATT server.
///
/// The transport resolves an incoming handle with [`attribute`](#method.attribute) and pushes
/// notifications with the help of [`find_notification_data`](#tymethod.find_notification_data).
pub trait AttributeProvider {
    /// Number of attributes, which is also the highest valid handle.
    fn number_of_attributes(&self) -> usize;

    /// Number of client configuration slots a connection needs.
    fn number_of_client_configs(&self) -> usize;

    /// Returns the attribute at the 0-based table position `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index` is not below `number_of_attributes()`.
    fn attribute_at(&self, index: usize) -> Attribute<'_>;

    /// Returns the attribute identified by `handle`, or `None` if there is no such attribute.
    fn attribute(&self, handle: Handle) -> Option<Attribute<'_>> {
        match handle.as_index() {
            Some(index) if index < self.number_of_attributes() => Some(self.attribute_at(index)),
            _ => None,
        }
    }

    /// Locates the characteristic bound to the value identified by `value`.
    ///
    /// Returns an invalid `NotificationData` if no notifying or indicating characteristic is
    /// bound to that value.
    fn find_notification_data(&self, value: ValueId) -> NotificationData<'_>;
}
