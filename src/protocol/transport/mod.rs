//! GMLAN transport layer: CAN frame representation, 11/29-bit identifier
//! codec, the segmented-transfer state machine, and bus abstraction traits.
//!
//! ## Framing constants
//!
//! Every transport frame is a full eight-byte classic CAN frame. Unused bytes
//! are filled with [`PADDING_BYTE`].

pub mod can_frame;
pub mod can_id;
pub mod segmented;
pub mod traits;

/// Filler written into the unused tail of every transmitted frame.
pub const PADDING_BYTE: u8 = 0xAA;

/// Largest payload a segmented transfer can declare (12-bit length field).
pub const MAX_TRANSFER_LEN: usize = 0xFFF;

/// Recommended delay between two consecutive segments of one transfer (ms).
///
/// The flow-control frame sent by GMLAN ECUs requests no separation time, but
/// embedded CAN controllers with shallow TX queues (three-frame buffers are
/// common) drop frames when a whole transfer is queued back to back.
///
/// - **0 ms**: Bus-speed bursts, for desktop adapters with deep queues.
/// - **1 ms**: Default; keeps small TX buffers from saturating.
/// - **5 ms**: Conservative choice for the 33.3 kbit/s single-wire bus.
pub const CONSECUTIVE_FRAME_DELAY_MS: u32 = 1;
