//! GMLAN constant tables: well-known arbitration identifiers, diagnostic
//! service ids, negative response codes, PCI kinds and bus speeds.
//!
//! Each table is a `#[repr]` enum convertible to its raw value; decoding goes
//! through `TryFrom` and hands back the rejected value on failure.

//==================================================================================STANDARD_ARB_ID
/// 11-bit arbitration identifiers used on the GMLAN diagnostic bus.
///
/// Requests go out on `0x24x`, multi-frame responses come back on `0x64x`:
/// the low byte identifies the ECU in both directions.
#[repr(u16)]
#[derive(Debug, PartialEq, Eq, Copy, Clone)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StandardArbId {
    InitialWakeUpRequest = 0x100,
    RequestToAllNodes = 0x101,
    DiagnosticRequest = 0x102,
    ToReservedRequest = 0x240,
    ToBcm = 0x241,
    ToTdm = 0x242,
    ToEbcm = 0x243,
    ToEhu = 0x244,
    ToSic = 0x246,
    ToSdc = 0x247,
    ToIpc = 0x24C,
    ToHvac = 0x251,
    ToRfa = 0x258,
    SingleFrameFromReservedResponse = 0x540,
    MultiFrameFromReservedResponse = 0x640,
    MultiFrameFromBcm = 0x641,
    MultiFrameFromTdm = 0x642,
    MultiFrameFromEbcm = 0x643,
    MultiFrameFromEhu = 0x644,
    MultiFrameFromSic = 0x646,
    MultiFrameFromSdc = 0x647,
    MultiFrameFromIpc = 0x64C,
    MultiFrameFromHvac = 0x651,
    MultiFrameFromRfa = 0x658,
    TesterToAllObdEcus = 0x7DF,
    TesterToEcm = 0x7E0,
    TesterToSpecificObdEcu = 0x7E1,
    EcmToTester = 0x7E8,
    SpecificObdEcuToTester = 0x7E9,
}

#[derive(Debug, PartialEq, Eq)]
pub struct InvalidStandardArbId(pub u16);

impl From<StandardArbId> for u16 {
    fn from(id: StandardArbId) -> Self {
        id as u16
    }
}

impl TryFrom<u16> for StandardArbId {
    type Error = InvalidStandardArbId;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        use StandardArbId::*;
        match value {
            0x100 => Ok(InitialWakeUpRequest),
            0x101 => Ok(RequestToAllNodes),
            0x102 => Ok(DiagnosticRequest),
            0x240 => Ok(ToReservedRequest),
            0x241 => Ok(ToBcm),
            0x242 => Ok(ToTdm),
            0x243 => Ok(ToEbcm),
            0x244 => Ok(ToEhu),
            0x246 => Ok(ToSic),
            0x247 => Ok(ToSdc),
            0x24C => Ok(ToIpc),
            0x251 => Ok(ToHvac),
            0x258 => Ok(ToRfa),
            0x540 => Ok(SingleFrameFromReservedResponse),
            0x640 => Ok(MultiFrameFromReservedResponse),
            0x641 => Ok(MultiFrameFromBcm),
            0x642 => Ok(MultiFrameFromTdm),
            0x643 => Ok(MultiFrameFromEbcm),
            0x644 => Ok(MultiFrameFromEhu),
            0x646 => Ok(MultiFrameFromSic),
            0x647 => Ok(MultiFrameFromSdc),
            0x64C => Ok(MultiFrameFromIpc),
            0x651 => Ok(MultiFrameFromHvac),
            0x658 => Ok(MultiFrameFromRfa),
            0x7DF => Ok(TesterToAllObdEcus),
            0x7E0 => Ok(TesterToEcm),
            0x7E1 => Ok(TesterToSpecificObdEcu),
            0x7E8 => Ok(EcmToTester),
            0x7E9 => Ok(SpecificObdEcuToTester),
            other => Err(InvalidStandardArbId(other)),
        }
    }
}

//==================================================================================PCI
/// Protocol Control Information: high nibble of byte 0 of every transport frame.
#[repr(u8)]
#[derive(Debug, PartialEq, Eq, Copy, Clone)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Pci {
    Unsegmented = 0x0,
    FirstSegment = 0x1,
    ConsecutiveSegment = 0x2,
    FlowControl = 0x3,
}

#[derive(Debug, PartialEq, Eq)]
pub struct InvalidPci(pub u8);

impl Pci {
    /// Extract the PCI kind from the first byte of a frame.
    pub fn from_first_byte(byte: u8) -> Result<Self, InvalidPci> {
        Self::try_from(byte >> 4)
    }

    /// First byte of a frame carrying this PCI and the given low nibble.
    pub const fn with_nibble(self, nibble: u8) -> u8 {
        ((self as u8) << 4) | (nibble & 0x0F)
    }
}

impl From<Pci> for u8 {
    fn from(pci: Pci) -> Self {
        pci as u8
    }
}

impl TryFrom<u8> for Pci {
    type Error = InvalidPci;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0x0 => Ok(Pci::Unsegmented),
            0x1 => Ok(Pci::FirstSegment),
            0x2 => Ok(Pci::ConsecutiveSegment),
            0x3 => Ok(Pci::FlowControl),
            other => Err(InvalidPci(other)),
        }
    }
}

//==================================================================================SERVICE_ID
/// Diagnostic service identifiers (first payload byte of a request).
#[repr(u8)]
#[derive(Debug, PartialEq, Eq, Copy, Clone)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ServiceId {
    ClearDtc = 0x04,
    StartDiagnosticSession = 0x10,
    RequestFailureRecords = 0x12,
    ReadDataByIdentifier = 0x1A,
    ReturnToNormalOperation = 0x20,
    ReadDataByParameterId = 0x22,
    ReadMemoryByAddress = 0x23,
    SecurityAccess = 0x27,
    DisableNormalCommunication = 0x28,
    DynamicallyDefineMessage = 0x2C,
    DefinePidByAddress = 0x2D,
    RequestDownload = 0x34,
    TransferData = 0x36,
    WriteDataByIdentifier = 0x3B,
    TesterPresent = 0x3E,
    NegativeResponse = 0x7F,
    ReportProgrammedState = 0xA2,
    ProgrammingMode = 0xA5,
    ReadDtcByStatus = 0xA9,
    ReadDataByPacketIdentifier = 0xAA,
    DeviceControl = 0xAE,
}

#[derive(Debug, PartialEq, Eq)]
pub struct InvalidServiceId(pub u8);

impl ServiceId {
    /// Service id an ECU echoes back in a positive response (`sid + 0x40`).
    pub const fn positive_response(self) -> u8 {
        (self as u8).wrapping_add(0x40)
    }
}

impl From<ServiceId> for u8 {
    fn from(sid: ServiceId) -> Self {
        sid as u8
    }
}

impl TryFrom<u8> for ServiceId {
    type Error = InvalidServiceId;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        use ServiceId::*;
        match value {
            0x04 => Ok(ClearDtc),
            0x10 => Ok(StartDiagnosticSession),
            0x12 => Ok(RequestFailureRecords),
            0x1A => Ok(ReadDataByIdentifier),
            0x20 => Ok(ReturnToNormalOperation),
            0x22 => Ok(ReadDataByParameterId),
            0x23 => Ok(ReadMemoryByAddress),
            0x27 => Ok(SecurityAccess),
            0x28 => Ok(DisableNormalCommunication),
            0x2C => Ok(DynamicallyDefineMessage),
            0x2D => Ok(DefinePidByAddress),
            0x34 => Ok(RequestDownload),
            0x36 => Ok(TransferData),
            0x3B => Ok(WriteDataByIdentifier),
            0x3E => Ok(TesterPresent),
            0x7F => Ok(NegativeResponse),
            0xA2 => Ok(ReportProgrammedState),
            0xA5 => Ok(ProgrammingMode),
            0xA9 => Ok(ReadDtcByStatus),
            0xAA => Ok(ReadDataByPacketIdentifier),
            0xAE => Ok(DeviceControl),
            other => Err(InvalidServiceId(other)),
        }
    }
}

//==================================================================================NEGATIVE_RESPONSE_CODE
/// Third byte of a `0x7F` negative response.
#[repr(u8)]
#[derive(Debug, PartialEq, Eq, Copy, Clone)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum NegativeResponseCode {
    GeneralReject = 0x10,
    ServiceNotSupported = 0x11,
    SubFunctionNotSupported = 0x12,
    IncorrectMessageLength = 0x13,
    BusyRepeatRequest = 0x21,
    ConditionsNotCorrect = 0x22,
    RequestSequenceError = 0x24,
    RequestOutOfRange = 0x31,
    SecurityAccessDenied = 0x33,
    InvalidKey = 0x35,
    ExceededNumberOfAttempts = 0x36,
    RequiredTimeDelayNotExpired = 0x37,
    UploadDownloadNotAccepted = 0x70,
    GeneralProgrammingFailure = 0x72,
    /// Request received, response pending: the ECU keeps working on it.
    ResponsePending = 0x78,
    ServiceNotSupportedInActiveSession = 0x80,
}

#[derive(Debug, PartialEq, Eq)]
pub struct InvalidNegativeResponseCode(pub u8);

impl NegativeResponseCode {
    /// Only "response pending" leaves the request alive.
    pub const fn is_transient(self) -> bool {
        matches!(self, NegativeResponseCode::ResponsePending)
    }
}

impl From<NegativeResponseCode> for u8 {
    fn from(code: NegativeResponseCode) -> Self {
        code as u8
    }
}

impl TryFrom<u8> for NegativeResponseCode {
    type Error = InvalidNegativeResponseCode;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        use NegativeResponseCode::*;
        match value {
            0x10 => Ok(GeneralReject),
            0x11 => Ok(ServiceNotSupported),
            0x12 => Ok(SubFunctionNotSupported),
            0x13 => Ok(IncorrectMessageLength),
            0x21 => Ok(BusyRepeatRequest),
            0x22 => Ok(ConditionsNotCorrect),
            0x24 => Ok(RequestSequenceError),
            0x31 => Ok(RequestOutOfRange),
            0x33 => Ok(SecurityAccessDenied),
            0x35 => Ok(InvalidKey),
            0x36 => Ok(ExceededNumberOfAttempts),
            0x37 => Ok(RequiredTimeDelayNotExpired),
            0x70 => Ok(UploadDownloadNotAccepted),
            0x72 => Ok(GeneralProgrammingFailure),
            0x78 => Ok(ResponsePending),
            0x80 => Ok(ServiceNotSupportedInActiveSession),
            other => Err(InvalidNegativeResponseCode(other)),
        }
    }
}

//==================================================================================BAUD_RATE
/// GMLAN bus speeds.
#[repr(u32)]
#[derive(Debug, PartialEq, Eq, Copy, Clone)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BaudRate {
    /// Single-wire low-speed bus, normal mode.
    LowSpeedNormal = 33_333,
    /// Single-wire low-speed bus, high-voltage wake-up / fast mode.
    LowSpeedFast = 83_333,
    MediumSpeed = 95_200,
    /// Dual-wire high-speed bus (powertrain, diagnostics).
    HighSpeed = 500_000,
}

impl BaudRate {
    pub const fn bits_per_second(self) -> u32 {
        self as u32
    }
}

#[cfg(test)]
#[path = "tests.rs"]
mod tests;
