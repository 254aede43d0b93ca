//! `CanBus` extension driving one [`SegmentedTransfer`] over the bus: frames
//! go out while the transfer has something to send, received frames are fed
//! back until the transfer reaches a terminal state.
//!
//! No timeout is applied here. A silent ECU leaves `execute` waiting on
//! [`CanBus::recv`]; wrap the call (or the bus) in a timeout when needed.
//!
//! # Consecutive segment pacing
//!
//! A delay of [`CONSECUTIVE_FRAME_DELAY_MS`] is awaited before every
//! consecutive segment so shallow TX queues are not flooded.
use crate::{
    error::{ExchangeError, TransferError},
    protocol::transport::segmented::{SegmentedTransfer, TransferState},
    protocol::transport::traits::{can_bus::CanBus, gmlan_timer::GmlanTimer},
    protocol::transport::CONSECUTIVE_FRAME_DELAY_MS,
};

/// Trait extending `CanBus` with a request/response driver.
pub trait RequestSender: CanBus {
    /// Run `transfer` to completion on this bus.
    ///
    /// Handles:
    /// - **Unsegmented requests**: one frame, then wait for the response.
    /// - **Segmented requests**: first segment, wait for flow control, consecutive segments.
    /// - **Segmented responses**: flow control is answered automatically.
    /// - **Response pending**: absorbed by the transfer, the driver keeps listening.
    ///
    /// # Errors
    ///
    /// Returns:
    /// - [`ExchangeError::Send`] / [`ExchangeError::Receive`] when the bus fails
    /// - [`ExchangeError::Rejected`] when the ECU sends a terminal negative response
    /// - [`ExchangeError::Transfer`] when the transfer was already finished
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// use gmlan_tp::protocol::{
    ///     lookups::StandardArbId,
    ///     transport::{segmented::SegmentedTransfer, traits::request_sender::RequestSender},
    /// };
    ///
    /// let request = [0x1A, 0x90]; // read VIN
    /// let mut transfer = SegmentedTransfer::request(StandardArbId::ToBcm.into(), &request)?;
    /// can_bus.execute(&mut transfer, &mut timer).await?;
    /// let vin = transfer.response();
    /// ```
    fn execute<'a, 'p, T: GmlanTimer>(
        &'a mut self,
        transfer: &'a mut SegmentedTransfer<'p>,
        timer: &'a mut T,
    ) -> impl core::future::Future<Output = Result<TransferState, ExchangeError<Self::Error>>> + 'a;
}

impl<C: CanBus> RequestSender for C {
    fn execute<'a, 'p, T: GmlanTimer>(
        &'a mut self,
        transfer: &'a mut SegmentedTransfer<'p>,
        timer: &'a mut T,
    ) -> impl core::future::Future<Output = Result<TransferState, ExchangeError<Self::Error>>> + 'a
    {
        async move {
            loop {
                match transfer.state() {
                    TransferState::Completed => return Ok(TransferState::Completed),
                    TransferState::Error => {
                        return Err(match transfer.negative_response() {
                            Some(response) => ExchangeError::Rejected(response),
                            None => ExchangeError::Transfer(TransferError::Finished {
                                state: TransferState::Error,
                            }),
                        });
                    }
                    TransferState::Ready | TransferState::Sending => {
                        if transfer.state() == TransferState::Sending {
                            timer.delay_ms(CONSECUTIVE_FRAME_DELAY_MS).await;
                        }
                        let frame = transfer.produce_next_frame()?;
                        self.send(&frame).await.map_err(ExchangeError::Send)?;
                    }
                    TransferState::SendFlowControl => {
                        let frame = transfer.produce_flow_control()?;
                        self.send(&frame).await.map_err(ExchangeError::Send)?;
                    }
                    TransferState::AwaitingFlowControl | TransferState::AwaitingReply => {
                        let frame = self.recv().await.map_err(ExchangeError::Receive)?;
                        let _outcome = transfer.consume_frame(&frame)?;

                        #[cfg(feature = "defmt")]
                        defmt::trace!("Frame {:?} -> {:?}", frame.id, _outcome);
                    }
                }
            }
        }
    }
}
