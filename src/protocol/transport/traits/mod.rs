//! Abstraction traits used by the transport layer (CAN bus, timer, request
//! driver) and a channel-backed bus for firmware tasks.
pub mod can_bus;
pub mod channel_bus;
pub mod gmlan_timer;
pub mod request_sender;
