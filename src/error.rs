//! Error definitions shared across library modules.
//! Protocol outcomes (negative responses, malformed lengths) are carried by the
//! transfer state; the types below only describe API misuse and bus failures.
use crate::protocol::lookups::NegativeResponseCode;
use crate::protocol::transport::segmented::TransferState;
use thiserror_no_std::Error;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
/// Errors raised by the segmented-transfer state machine.
pub enum TransferError {
    /// The transfer reached `Completed` or `Error`; no further transition exists.
    #[error("Transfer already finished in state {state:?}")]
    Finished { state: TransferState },
    /// The operation is not valid in the current state.
    #[error("{operation} is not valid in state {state:?}")]
    UnexpectedState {
        state: TransferState,
        operation: &'static str,
    },
    /// Payload cannot be described by the 12-bit segmented length field.
    #[error("Payload of {len} bytes exceeds the {max} bytes a segmented transfer can carry")]
    PayloadTooLong { len: usize, max: usize },
}

/// Negative response returned by an ECU: `0x7F <service> <code>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct NegativeResponse {
    /// Service id of the rejected request.
    pub service: u8,
    /// Raw negative response code.
    pub code: u8,
}

impl core::fmt::Display for NegativeResponse {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "service {:#04X}, code {:#04X}", self.service, self.code)
    }
}

impl NegativeResponse {
    /// Decoded response code, when it is one of the known values.
    pub fn known_code(&self) -> Option<NegativeResponseCode> {
        NegativeResponseCode::try_from(self.code).ok()
    }
}

//==================================================================================EXCHANGE_ERROR
#[derive(Debug, Error)]
/// Errors encountered while driving a transfer over a CAN bus.
pub enum ExchangeError<E: core::fmt::Debug> {
    /// CAN layer refused or failed to send the frame.
    #[error("CAN bus send error: {0:?}")]
    Send(E),
    /// Unable to receive frames from the bus.
    #[error("CAN bus receive error: {0:?}")]
    Receive(E),
    /// The state machine rejected the call.
    #[error(transparent)]
    Transfer(#[from] TransferError),
    /// The ECU answered with a terminal negative response.
    #[error("Request rejected: {0}")]
    Rejected(NegativeResponse),
}
