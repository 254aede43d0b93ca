//! Frame-level access to a GMLAN bus, as seen by [`RequestSender`].
//!
//! Implementors only move padded 8-byte frames; PCI handling, flow control and
//! response matching stay in [`SegmentedTransfer`]. The crate ships
//! [`ChannelBus`](super::channel_bus::ChannelBus) for firmware that keeps the
//! CAN peripheral in its own task.
//!
//! [`RequestSender`]: super::request_sender::RequestSender
//! [`SegmentedTransfer`]: crate::protocol::transport::segmented::SegmentedTransfer
use crate::protocol::transport::can_frame::CanFrame;
use futures_util::Future;

/// Contract to send and receive CAN frames asynchronously.
pub trait CanBus {
    type Error: core::fmt::Debug;
    /// Emit a frame on the bus. Asynchronous to accommodate non-blocking drivers.
    fn send<'a>(
        &'a mut self,
        frame: &'a CanFrame,
    ) -> impl Future<Output = Result<(), Self::Error>> + 'a;
    /// Retrieve the next available frame. Asynchronously waits until data arrives.
    fn recv<'a>(&'a mut self) -> impl Future<Output = Result<CanFrame, Self::Error>> + 'a;
}
