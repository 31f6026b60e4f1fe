use {
    crate::uuid::{Uuid128, Uuid16, Uuid32},
    core::{cmp::PartialEq, fmt},
};

/// Attribute type stored for attributes whose type is a 128-bit UUID.
///
/// The attribute table only stores 16-bit types. An attribute with this type must be asked for
/// its full UUID via a *compare 128-bit UUID* access.
pub const INTERNAL_128BIT_UUID: Uuid16 = Uuid16(0x0001);

/// ATT protocol UUID (either a 16 or a 128-bit UUID).
///
/// 32-bit UUIDs are not supported by ATT and must be converted to 128-bit UUIDs.
#[derive(Copy, Clone, Eq)]
pub enum AttUuid {
    Uuid16(Uuid16),
    Uuid128(Uuid128),
}

impl AttUuid {
    /// Returns the 16-bit type stored in the attribute table for this UUID.
    ///
    /// 128-bit UUIDs are replaced by [`INTERNAL_128BIT_UUID`](constant.INTERNAL_128BIT_UUID.html).
    pub fn attribute_type(&self) -> Uuid16 {
        match self {
            AttUuid::Uuid16(uuid) => *uuid,
            AttUuid::Uuid128(_) => INTERNAL_128BIT_UUID,
        }
    }

    /// Number of bytes this UUID occupies on the wire (2 or 16).
    pub fn encoded_len(&self) -> usize {
        match self {
            AttUuid::Uuid16(_) => 2,
            AttUuid::Uuid128(_) => 16,
        }
    }

    /// Writes the little-endian wire form of this UUID to the start of `out`.
    ///
    /// Returns the number of bytes written. `out` must hold at least
    /// [`encoded_len`](#method.encoded_len) bytes.
    pub fn encode_le(&self, out: &mut [u8]) -> usize {
        match self {
            AttUuid::Uuid16(uuid) => {
                out[..2].copy_from_slice(&uuid.0.to_le_bytes());
                2
            }
            AttUuid::Uuid128(uuid) => {
                out[..16].copy_from_slice(&uuid.to_le_bytes());
                16
            }
        }
    }
}

impl PartialEq for AttUuid {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            // 16-bit UUIDs can be compared directly
            (AttUuid::Uuid16(a), AttUuid::Uuid16(b)) => a == b,

            // All other combinations need to convert to 128-bit UUIDs
            (AttUuid::Uuid128(a), b) | (b, AttUuid::Uuid128(a)) => {
                let b: Uuid128 = (*b).into();
                *a == b
            }
        }
    }
}

impl PartialEq<Uuid16> for AttUuid {
    fn eq(&self, other: &Uuid16) -> bool {
        self == &Self::from(*other)
    }
}

impl PartialEq<Uuid128> for AttUuid {
    fn eq(&self, other: &Uuid128) -> bool {
        self == &Self::from(*other)
    }
}

impl From<Uuid16> for AttUuid {
    fn from(uu: Uuid16) -> Self {
        AttUuid::Uuid16(uu)
    }
}

impl From<Uuid32> for AttUuid {
    fn from(uu: Uuid32) -> Self {
        AttUuid::Uuid128(uu.into())
    }
}

impl From<Uuid128> for AttUuid {
    fn from(uu: Uuid128) -> Self {
        AttUuid::Uuid128(uu)
    }
}

impl From<::uuid::Uuid> for AttUuid {
    fn from(uu: ::uuid::Uuid) -> Self {
        AttUuid::Uuid128(uu.into())
    }
}

impl From<AttUuid> for Uuid128 {
    fn from(uu: AttUuid) -> Self {
        match uu {
            AttUuid::Uuid16(u) => u.into(),
            AttUuid::Uuid128(u) => u,
        }
    }
}

impl fmt::Debug for AttUuid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttUuid::Uuid16(u) => u.fmt(f),
            AttUuid::Uuid128(u) => u.fmt(f),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mixed_width_equality() {
        let short = AttUuid::from(Uuid16(0x2A19));
        let long = AttUuid::from(Uuid128::from(Uuid16(0x2A19)));
        assert_eq!(short, long);
        assert_eq!(long, Uuid16(0x2A19));
        assert_ne!(short, AttUuid::from(Uuid16(0x2A1A)));
    }

    #[test]
    fn attribute_type() {
        assert_eq!(AttUuid::from(Uuid16(0x2A19)).attribute_type(), Uuid16(0x2A19));
        let custom = Uuid128::from_fields(0xF0426E52, 0x4450, 0x4F3B, 0xB058, 0x5BAB1191D92A);
        assert_eq!(AttUuid::from(custom).attribute_type(), INTERNAL_128BIT_UUID);
    }

    #[test]
    fn encode() {
        let mut buf = [0; 16];
        assert_eq!(AttUuid::from(Uuid16(0x2A19)).encode_le(&mut buf), 2);
        assert_eq!(&buf[..2], &[0x19, 0x2A]);

        let custom = Uuid128::from_fields(0xF0426E52, 0x4450, 0x4F3B, 0xB058, 0x5BAB1191D92A);
        assert_eq!(AttUuid::from(custom).encode_le(&mut buf), 16);
        assert_eq!(buf, custom.to_le_bytes());
    }
}
