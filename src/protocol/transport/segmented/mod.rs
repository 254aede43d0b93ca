//! GMLAN segmented transfer: frames one outbound request into CAN frames and
//! reassembles the inbound response, following the flow-control handshake.
//!
//! ```text
//! byte 0 high nibble (PCI) | low nibble      | bytes 1..8
//! 0x0 unsegmented          | length (0..7)   | payload
//! 0x1 first segment        | length bits 8-11| length bits 0-7, 6 payload bytes
//! 0x2 consecutive segment  | sequence (0..15)| 7 payload bytes
//! 0x3 flow control         | 0               | reserved (zero)
//! ```
//!
//! The state machine never blocks and never touches the bus: the caller moves
//! frames between it and the CAN driver, in bus order, one transfer at a time.
use crate::error::{NegativeResponse, TransferError};
use crate::protocol::lookups::{Pci, ServiceId};
use crate::protocol::transport::can_frame::CanFrame;
use crate::protocol::transport::can_id::CanId;
use crate::protocol::transport::{MAX_TRANSFER_LEN, PADDING_BYTE};

//==================================================================================Constants
/// Payload bytes carried by an unsegmented frame.
const UNSEGMENTED_CAPACITY: usize = 7;
/// Payload bytes carried by a first-segment frame.
const FIRST_SEGMENT_CAPACITY: usize = 6;
/// Payload bytes carried by a consecutive-segment frame.
const CONSECUTIVE_SEGMENT_CAPACITY: usize = 7;
/// Classic CAN data length.
const FRAME_LEN: usize = 8;

//==================================================================================Enums
/// Lifecycle of a transfer. `Completed` and `Error` are terminal.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TransferState {
    /// Nothing sent yet.
    Ready,
    /// The peer granted flow control; consecutive segments may go out.
    Sending,
    /// First segment sent, waiting for the peer's flow-control frame.
    AwaitingFlowControl,
    /// Request fully sent, waiting for the response.
    AwaitingReply,
    /// A first segment arrived; a flow-control frame must be sent next.
    SendFlowControl,
    /// Exchange finished; the response, if any, is complete.
    Completed,
    /// The peer answered with a terminal negative response.
    Error,
}

impl TransferState {
    pub const fn is_terminal(self) -> bool {
        matches!(self, TransferState::Completed | TransferState::Error)
    }
}

/// Effect of one received frame on the transfer.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FrameOutcome {
    /// Frame addressed elsewhere, of an unexpected kind, or malformed.
    Ignored,
    /// Consecutive segment stored; more segments are expected.
    FragmentConsumed,
    /// The ECU is still processing the request; keep waiting.
    ResponsePending,
    /// First segment stored; call [`SegmentedTransfer::produce_flow_control`].
    FlowControlRequired,
    /// Peer accepted the first segment; resume [`SegmentedTransfer::produce_next_frame`].
    ClearToSend,
    /// Response fully reassembled.
    Completed,
    /// Terminal negative response.
    Rejected(NegativeResponse),
}

//==================================================================================SegmentedTransfer
/// One request/response exchange on a single identifier.
///
/// The outbound payload is borrowed for the lifetime of the transfer; the
/// response is reassembled into an internal buffer sized for the largest
/// length a first segment can declare.
#[derive(Debug, Clone)]
pub struct SegmentedTransfer<'a> {
    id: CanId,
    outbound: &'a [u8],
    inbound: [u8; MAX_TRANSFER_LEN],
    inbound_len: usize,
    state: TransferState,
    tx_progress: usize,
    tx_sequence: u8,
    rx_expected_len: Option<usize>,
    negative_response: Option<NegativeResponse>,
    await_response: bool,
    flow_control: bool,
}

impl<'a> SegmentedTransfer<'a> {
    /// Prepare a transfer of `payload` on `id`.
    ///
    /// * `await_response` – stay in `AwaitingReply` after the last frame instead of completing
    /// * `flow_control` – use transport framing; when `false` the payload is sent raw in a
    ///   single frame and truncated to eight bytes
    ///
    /// Fails when a framed payload cannot be described by the 12-bit length field.
    pub fn new(
        id: CanId,
        payload: &'a [u8],
        await_response: bool,
        flow_control: bool,
    ) -> Result<Self, TransferError> {
        if flow_control && payload.len() > MAX_TRANSFER_LEN {
            return Err(TransferError::PayloadTooLong {
                len: payload.len(),
                max: MAX_TRANSFER_LEN,
            });
        }
        Ok(Self {
            id,
            outbound: payload,
            inbound: [0; MAX_TRANSFER_LEN],
            inbound_len: 0,
            state: TransferState::Ready,
            tx_progress: 0,
            tx_sequence: 0,
            rx_expected_len: None,
            negative_response: None,
            await_response,
            flow_control,
        })
    }

    /// Framed request expecting a response: the usual diagnostic exchange.
    pub fn request(id: CanId, payload: &'a [u8]) -> Result<Self, TransferError> {
        Self::new(id, payload, true, true)
    }

    /// Transfer with nothing to send that starts directly in `AwaitingReply`,
    /// for nodes that only receive on `id`.
    pub fn listen(id: CanId) -> Self {
        Self {
            id,
            outbound: &[],
            inbound: [0; MAX_TRANSFER_LEN],
            inbound_len: 0,
            state: TransferState::AwaitingReply,
            tx_progress: 0,
            tx_sequence: 0,
            rx_expected_len: None,
            negative_response: None,
            await_response: true,
            flow_control: true,
        }
    }

    //==================================================================================Accessors
    pub fn id(&self) -> CanId {
        self.id
    }

    pub fn state(&self) -> TransferState {
        self.state
    }

    pub fn is_finished(&self) -> bool {
        self.state.is_terminal()
    }

    /// Bytes reassembled so far.
    pub fn response(&self) -> &[u8] {
        &self.inbound[..self.inbound_len]
    }

    /// Length declared by the peer, once its first frame arrived.
    pub fn expected_len(&self) -> Option<usize> {
        self.rx_expected_len
    }

    /// Outbound bytes already placed into frames.
    pub fn bytes_sent(&self) -> usize {
        self.tx_progress
    }

    /// Negative response that moved the transfer to `Error`.
    pub fn negative_response(&self) -> Option<NegativeResponse> {
        self.negative_response
    }

    //==================================================================================Outbound
    /// Build the next outbound frame. Valid in `Ready` and `Sending`.
    pub fn produce_next_frame(&mut self) -> Result<CanFrame, TransferError> {
        self.ensure_active()?;
        if !matches!(self.state, TransferState::Ready | TransferState::Sending) {
            return Err(TransferError::UnexpectedState {
                state: self.state,
                operation: "produce_next_frame",
            });
        }

        let total_len = self.outbound.len();

        // Raw mode: one frame, no PCI, no segmentation.
        if !self.flow_control {
            let frame = CanFrame::padded(self.id, self.outbound);
            self.tx_progress = total_len.min(FRAME_LEN);
            self.finish_sending();
            return Ok(frame);
        }

        let mut data = [PADDING_BYTE; FRAME_LEN];

        if total_len <= UNSEGMENTED_CAPACITY {
            data[0] = Pci::Unsegmented.with_nibble(total_len as u8);
            data[1..1 + total_len].copy_from_slice(self.outbound);
            self.tx_progress = total_len;
            self.finish_sending();
        } else if self.tx_progress == 0 {
            data[0] = Pci::FirstSegment.with_nibble((total_len >> 8) as u8);
            data[1] = (total_len & 0xFF) as u8;
            data[2..].copy_from_slice(&self.outbound[..FIRST_SEGMENT_CAPACITY]);
            self.tx_progress = FIRST_SEGMENT_CAPACITY;
            // The first consecutive segment carries sequence number 1.
            self.tx_sequence = 1;
            self.transition(TransferState::AwaitingFlowControl);
        } else {
            let remaining = total_len - self.tx_progress;
            let chunk = remaining.min(CONSECUTIVE_SEGMENT_CAPACITY);
            data[0] = Pci::ConsecutiveSegment.with_nibble(self.tx_sequence);
            data[1..1 + chunk]
                .copy_from_slice(&self.outbound[self.tx_progress..self.tx_progress + chunk]);
            self.tx_progress += chunk;
            self.tx_sequence = (self.tx_sequence + 1) & 0x0F;

            #[cfg(feature = "defmt")]
            defmt::trace!(
                "Consecutive segment: {}/{} bytes sent",
                self.tx_progress,
                total_len
            );

            if self.tx_progress == total_len {
                self.finish_sending();
            }
        }

        Ok(CanFrame::new(self.id, data))
    }

    /// Build the flow-control frame granting the peer permission to send its
    /// consecutive segments. Valid in `SendFlowControl`.
    pub fn produce_flow_control(&mut self) -> Result<CanFrame, TransferError> {
        self.ensure_active()?;
        if self.state != TransferState::SendFlowControl {
            return Err(TransferError::UnexpectedState {
                state: self.state,
                operation: "produce_flow_control",
            });
        }

        let mut data = [0; FRAME_LEN];
        data[0] = Pci::FlowControl.with_nibble(0);
        self.transition(TransferState::AwaitingReply);
        Ok(CanFrame::new(self.id, data))
    }

    //==================================================================================Inbound
    /// Feed one received frame into the transfer.
    ///
    /// Frames match when the low byte of their identifier equals the low byte
    /// of the transfer's identifier, so a request on `0x241` accepts its
    /// response on `0x641`.
    pub fn consume_frame(&mut self, frame: &CanFrame) -> Result<FrameOutcome, TransferError> {
        self.ensure_active()?;

        if frame.id.low_byte() != self.id.low_byte() {
            return Ok(FrameOutcome::Ignored);
        }

        let data = &frame.data[..frame.len.min(FRAME_LEN)];
        let pci = match data.first().map(|&byte| Pci::from_first_byte(byte)) {
            Some(Ok(pci)) => pci,
            _ => return Ok(FrameOutcome::Ignored),
        };

        #[cfg(feature = "defmt")]
        defmt::trace!("RX {:?} frame in state {:?}", pci, self.state);

        let outcome = match (self.state, pci) {
            (TransferState::AwaitingFlowControl, Pci::FlowControl) => {
                self.transition(TransferState::Sending);
                FrameOutcome::ClearToSend
            }
            (TransferState::AwaitingReply, Pci::Unsegmented) => self.consume_unsegmented(data),
            (TransferState::AwaitingReply, Pci::FirstSegment) => self.consume_first_segment(data),
            (TransferState::AwaitingReply, Pci::ConsecutiveSegment) => {
                self.consume_consecutive_segment(data)
            }
            _ => FrameOutcome::Ignored,
        };

        Ok(outcome)
    }

    fn consume_unsegmented(&mut self, data: &[u8]) -> FrameOutcome {
        let payload = &data[1..];
        let len = ((data[0] & 0x0F) as usize)
            .min(UNSEGMENTED_CAPACITY)
            .min(payload.len());

        if payload.first() == Some(&u8::from(ServiceId::NegativeResponse)) {
            let response = NegativeResponse {
                service: payload.get(1).copied().unwrap_or(0),
                code: payload.get(2).copied().unwrap_or(0),
            };

            if matches!(response.known_code(), Some(code) if code.is_transient()) {
                #[cfg(feature = "defmt")]
                defmt::debug!(
                    "Response pending for service {:#X}, still waiting",
                    response.service
                );
                return FrameOutcome::ResponsePending;
            }

            #[cfg(feature = "defmt")]
            defmt::warn!(
                "Negative response: service {:#X}, code {:#X}",
                response.service,
                response.code
            );

            self.start_inbound(len);
            self.append(&payload[..len]);
            self.negative_response = Some(response);
            self.transition(TransferState::Error);
            return FrameOutcome::Rejected(response);
        }

        self.start_inbound(len);
        self.append(&payload[..len]);
        self.transition(TransferState::Completed);
        FrameOutcome::Completed
    }

    fn consume_first_segment(&mut self, data: &[u8]) -> FrameOutcome {
        let len_high = (data[0] & 0x0F) as usize;
        let len_low = data.get(1).copied().unwrap_or(0) as usize;
        let declared = (len_high << 8) | len_low;

        let present = data.get(2..).unwrap_or(&[]);
        let copy_len = declared.min(present.len());

        self.start_inbound(declared);
        self.append(&present[..copy_len]);

        // Declared length already covered by this frame: nothing else to wait for.
        if declared <= present.len() {
            #[cfg(feature = "defmt")]
            defmt::debug!(
                "First segment declares {} bytes, {} present: completing early",
                declared,
                present.len()
            );
            self.transition(TransferState::Completed);
            return FrameOutcome::Completed;
        }

        self.transition(TransferState::SendFlowControl);
        FrameOutcome::FlowControlRequired
    }

    fn consume_consecutive_segment(&mut self, data: &[u8]) -> FrameOutcome {
        // TODO: compare the sequence nibble with the expected counter once a
        // policy for dropped or reordered segments is agreed on.
        let expected = match self.rx_expected_len {
            Some(expected) if self.inbound_len < expected => expected,
            _ => return FrameOutcome::Ignored,
        };

        let present = &data[1..];
        let copy_len = (expected - self.inbound_len).min(present.len());
        self.append(&present[..copy_len]);

        if self.inbound_len == expected {
            self.transition(TransferState::Completed);
            FrameOutcome::Completed
        } else {
            FrameOutcome::FragmentConsumed
        }
    }

    //==================================================================================Helpers
    fn ensure_active(&self) -> Result<(), TransferError> {
        if self.state.is_terminal() {
            return Err(TransferError::Finished { state: self.state });
        }
        Ok(())
    }

    fn finish_sending(&mut self) {
        if self.await_response {
            self.transition(TransferState::AwaitingReply);
        } else {
            self.transition(TransferState::Completed);
        }
    }

    /// A new inbound message starts: drop what a previous one left behind.
    fn start_inbound(&mut self, expected_len: usize) {
        self.inbound_len = 0;
        self.rx_expected_len = Some(expected_len.min(MAX_TRANSFER_LEN));
    }

    fn append(&mut self, bytes: &[u8]) {
        let room = MAX_TRANSFER_LEN - self.inbound_len;
        let copy_len = bytes.len().min(room);
        self.inbound[self.inbound_len..self.inbound_len + copy_len]
            .copy_from_slice(&bytes[..copy_len]);
        self.inbound_len += copy_len;
    }

    fn transition(&mut self, next: TransferState) {
        #[cfg(feature = "defmt")]
        defmt::debug!("Transfer {:?}: {:?} -> {:?}", self.id, self.state, next);
        self.state = next;
    }
}
