//! In-memory representation of a classic CAN data frame as seen by GMLAN.
use crate::protocol::transport::can_id::CanId;
use crate::protocol::transport::PADDING_BYTE;
use embedded_can::{Frame, Id};

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
/// Raw GMLAN frame as read from or written to the CAN bus.
pub struct CanFrame {
    /// Standard or extended identifier.
    pub id: CanId,
    /// Payload buffer. Classic CAN frames always provide eight bytes.
    pub data: [u8; 8],
    /// Number of valid payload bytes (Data Length Code, 0 to 8).
    pub len: usize,
}

impl CanFrame {
    /// Full eight-byte frame, the shape every transport frame takes on the wire.
    pub const fn new(id: CanId, data: [u8; 8]) -> Self {
        Self { id, data, len: 8 }
    }

    /// Copy up to eight bytes and pad the rest of the frame with [`PADDING_BYTE`].
    pub fn padded(id: CanId, bytes: &[u8]) -> Self {
        let mut data = [PADDING_BYTE; 8];
        let len = bytes.len().min(8);
        data[..len].copy_from_slice(&bytes[..len]);
        Self::new(id, data)
    }

    /// Convert a frame received from any `embedded-can` driver.
    ///
    /// Returns `None` for remote frames, which never carry transport data.
    pub fn from_frame<F: Frame>(frame: &F) -> Option<Self> {
        if frame.is_remote_frame() {
            return None;
        }
        <Self as Frame>::new(frame.id(), frame.data())
    }
}

impl Frame for CanFrame {
    fn new(id: impl Into<Id>, data: &[u8]) -> Option<Self> {
        if data.len() > 8 {
            return None;
        }
        let mut buffer = [0; 8];
        buffer[..data.len()].copy_from_slice(data);
        Some(Self {
            id: CanId::from(id.into()),
            data: buffer,
            len: data.len(),
        })
    }

    /// GMLAN never uses remote frames.
    fn new_remote(_id: impl Into<Id>, _dlc: usize) -> Option<Self> {
        None
    }

    fn is_extended(&self) -> bool {
        self.id.is_extended()
    }

    fn is_remote_frame(&self) -> bool {
        false
    }

    fn id(&self) -> Id {
        Id::from(self.id)
    }

    fn dlc(&self) -> usize {
        self.len
    }

    fn data(&self) -> &[u8] {
        &self.data[..self.len.min(8)]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_can::StandardId;

    #[test]
    /// Short payloads are padded to eight bytes.
    fn test_padded_frame() {
        let frame = CanFrame::padded(CanId::standard(0x241), &[0x01, 0x3E]);
        assert_eq!(frame.len, 8);
        assert_eq!(frame.data, [0x01, 0x3E, 0xAA, 0xAA, 0xAA, 0xAA, 0xAA, 0xAA]);
    }

    #[test]
    /// Payloads over eight bytes are truncated.
    fn test_padded_frame_truncates() {
        let frame = CanFrame::padded(CanId::standard(0x241), &[7; 12]);
        assert_eq!(frame.data, [7; 8]);
    }

    #[test]
    fn test_embedded_can_frame() {
        let id = StandardId::new(0x641).unwrap();
        let frame = <CanFrame as Frame>::new(id, &[0x02, 0x7E, 0x00]).unwrap();
        assert_eq!(frame.id, CanId::standard(0x641));
        assert_eq!(frame.dlc(), 3);
        assert_eq!(frame.data(), &[0x02, 0x7E, 0x00]);
        assert!(!frame.is_extended());
        assert!(<CanFrame as Frame>::new(id, &[0; 9]).is_none());
        assert!(CanFrame::new_remote(id, 0).is_none());
    }

    #[test]
    fn test_from_frame() {
        let original = CanFrame::new(CanId::extended(4, 0x068, 0x060), [1; 8]);
        let copy = CanFrame::from_frame(&original).unwrap();
        assert_eq!(copy, original);
        assert!(copy.is_extended());
    }
}
