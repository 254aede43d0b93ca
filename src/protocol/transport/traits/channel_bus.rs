//! [`CanBus`] implementation backed by a pair of [`embassy_sync::channel::Channel`]s.
//!
//! Firmware usually owns the CAN peripheral in a dedicated task; that task
//! pushes received frames into one channel and drains the other to the
//! transmitter. A `ChannelBus` built from the opposite ends lets any other task
//! run transfers without touching the driver. No allocation is performed; the
//! channels are provided by the caller.
use core::convert::Infallible;

use embassy_sync::{
    blocking_mutex::raw::RawMutex,
    channel::{Receiver, Sender},
};

use crate::protocol::transport::can_frame::CanFrame;
use crate::protocol::transport::traits::can_bus::CanBus;

/// Bus endpoint: frames to transmit go into `tx`, received frames come out of `rx`.
pub struct ChannelBus<'ch, M: RawMutex, const N: usize> {
    tx: Sender<'ch, M, CanFrame, N>,
    rx: Receiver<'ch, M, CanFrame, N>,
}

impl<'ch, M: RawMutex, const N: usize> ChannelBus<'ch, M, N> {
    pub fn new(tx: Sender<'ch, M, CanFrame, N>, rx: Receiver<'ch, M, CanFrame, N>) -> Self {
        Self { tx, rx }
    }
}

impl<'ch, M: RawMutex, const N: usize> CanBus for ChannelBus<'ch, M, N> {
    /// Channels wait for room instead of failing.
    type Error = Infallible;

    async fn send<'a>(&'a mut self, frame: &'a CanFrame) -> Result<(), Self::Error> {
        self.tx.send(frame.clone()).await;
        Ok(())
    }

    async fn recv(&mut self) -> Result<CanFrame, Self::Error> {
        Ok(self.rx.receive().await)
    }
}
