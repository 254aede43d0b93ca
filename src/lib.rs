//! `gmlan-tp` library: the transport layer of General Motors' GMLAN
//! diagnostic bus in a `no_std` environment. The crate exposes the CAN
//! identifier codec, the segmented-transfer state machine (segmentation,
//! flow control, reassembly), the GMLAN constant tables, and async bus traits
//! to drive transfers over any CAN driver.
#![no_std]
//==================================================================================
/// State-machine misuse and bus errors.
pub mod error;
/// GMLAN protocol implementation: lookup tables and CAN transport.
pub mod protocol;
//==================================================================================
