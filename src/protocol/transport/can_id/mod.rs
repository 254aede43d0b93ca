//! Packing and unpacking of the 11-bit and 29-bit CAN identifiers used by GMLAN.
//!
//! ```text
//! Extended (29 bits, stored in a u32):
//!   pad(3) | priority(3) | arbitration(13) | sender(13)
//! Standard (11 bits, stored in a u16):
//!   pad(5) | arbitration(11)
//! ```
//!
//! Fields are masked to their width; out-of-range values are silently truncated.
use crate::protocol::lookups::StandardArbId;
use embedded_can::{ExtendedId, Id, StandardId};

/// Raw values below this threshold are standard (11-bit) identifiers.
pub const EXTENDED_THRESHOLD: u32 = 0x800;

const PRIORITY_MASK: u32 = 0x07;
const ARBITRATION_MASK: u32 = 0x1FFF;
const SENDER_MASK: u32 = 0x1FFF;
const STANDARD_MASK: u32 = 0x7FF;

//==================================================================================CAN_ID
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
/// GMLAN identifier in one of its two wire shapes.
pub enum CanId {
    /// 11-bit identifier holding only an arbitration id.
    Standard { arbitration: u16 },
    /// 29-bit identifier: priority, arbitration id and sending ECU.
    Extended {
        priority: u8,
        arbitration: u16,
        sender: u16,
    },
}

impl CanId {
    /// Standard identifier, arbitration masked to 11 bits.
    pub const fn standard(arbitration: u16) -> Self {
        CanId::Standard {
            arbitration: arbitration & STANDARD_MASK as u16,
        }
    }

    /// Extended identifier, every field masked to its width.
    pub const fn extended(priority: u8, arbitration: u16, sender: u16) -> Self {
        CanId::Extended {
            priority: priority & PRIORITY_MASK as u8,
            arbitration: arbitration & ARBITRATION_MASK as u16,
            sender: sender & SENDER_MASK as u16,
        }
    }

    /// Unpacks a raw identifier. Values below `0x800` are standard, the rest
    /// are read as 29-bit extended identifiers.
    pub const fn decode(raw: u32) -> Self {
        if raw < EXTENDED_THRESHOLD {
            CanId::Standard {
                arbitration: (raw & STANDARD_MASK) as u16,
            }
        } else {
            Self::unpack_extended(raw)
        }
    }

    const fn unpack_extended(raw: u32) -> Self {
        CanId::Extended {
            priority: ((raw >> 26) & PRIORITY_MASK) as u8,
            arbitration: ((raw >> 13) & ARBITRATION_MASK) as u16,
            sender: (raw & SENDER_MASK) as u16,
        }
    }

    /// Packs the identifier as a 29-bit word. Standard identifiers are
    /// written with a zero priority and sender.
    pub const fn encode_extended(&self) -> u32 {
        let (priority, arbitration, sender) = match *self {
            CanId::Standard { arbitration } => (0, arbitration, 0),
            CanId::Extended {
                priority,
                arbitration,
                sender,
            } => (priority, arbitration, sender),
        };
        ((priority as u32 & PRIORITY_MASK) << 26)
            | ((arbitration as u32 & ARBITRATION_MASK) << 13)
            | (sender as u32 & SENDER_MASK)
    }

    /// Packs the arbitration id as an 11-bit word (5 zero padding bits).
    pub const fn encode_standard(&self) -> u16 {
        (self.arbitration() as u32 & STANDARD_MASK) as u16
    }

    /// Wire value matching the identifier's own shape.
    pub const fn raw(&self) -> u32 {
        match self {
            CanId::Standard { .. } => self.encode_standard() as u32,
            CanId::Extended { .. } => self.encode_extended(),
        }
    }

    /// Low byte of the wire value, used to pair requests with responses.
    pub const fn low_byte(&self) -> u8 {
        (self.raw() & 0xFF) as u8
    }

    pub const fn is_extended(&self) -> bool {
        matches!(self, CanId::Extended { .. })
    }

    /// Arbitration id, present in both shapes.
    pub const fn arbitration(&self) -> u16 {
        match *self {
            CanId::Standard { arbitration } | CanId::Extended { arbitration, .. } => arbitration,
        }
    }

    /// Priority (3 bits), extended identifiers only.
    pub const fn priority(&self) -> Option<u8> {
        match *self {
            CanId::Standard { .. } => None,
            CanId::Extended { priority, .. } => Some(priority),
        }
    }

    /// Sending ECU (13 bits), extended identifiers only.
    pub const fn sender(&self) -> Option<u16> {
        match *self {
            CanId::Standard { .. } => None,
            CanId::Extended { sender, .. } => Some(sender),
        }
    }
}

impl From<StandardArbId> for CanId {
    fn from(id: StandardArbId) -> Self {
        CanId::standard(id as u16)
    }
}

//==================================================================================EMBEDDED_CAN
impl From<CanId> for Id {
    fn from(id: CanId) -> Self {
        match id {
            CanId::Standard { .. } => {
                Id::Standard(StandardId::new(id.encode_standard()).unwrap_or(StandardId::ZERO))
            }
            CanId::Extended { .. } => {
                Id::Extended(ExtendedId::new(id.encode_extended()).unwrap_or(ExtendedId::ZERO))
            }
        }
    }
}

impl From<Id> for CanId {
    /// The embedded-can tag wins over the numeric threshold: an extended id
    /// with a small raw value still unpacks into the three extended fields.
    fn from(id: Id) -> Self {
        match id {
            Id::Standard(id) => CanId::standard(id.as_raw()),
            Id::Extended(id) => CanId::unpack_extended(id.as_raw()),
        }
    }
}
