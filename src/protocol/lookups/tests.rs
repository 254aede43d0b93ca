//! Lookup table conversions.
use super::*;

#[test]
/// Request and response ids of the same ECU share their low byte.
fn test_request_response_pairs_share_low_byte() {
    let pairs = [
        (StandardArbId::ToBcm, StandardArbId::MultiFrameFromBcm),
        (StandardArbId::ToIpc, StandardArbId::MultiFrameFromIpc),
        (StandardArbId::ToHvac, StandardArbId::MultiFrameFromHvac),
        (StandardArbId::ToRfa, StandardArbId::MultiFrameFromRfa),
    ];
    for (request, response) in pairs {
        assert_eq!(u16::from(request) & 0xFF, u16::from(response) & 0xFF);
    }
}

#[test]
fn test_arb_id_try_from() {
    assert_eq!(StandardArbId::try_from(0x7E8), Ok(StandardArbId::EcmToTester));
    assert_eq!(
        StandardArbId::try_from(0x123),
        Err(InvalidStandardArbId(0x123))
    );
}

#[test]
/// PCI kind comes from the high nibble only.
fn test_pci_from_first_byte() {
    assert_eq!(Pci::from_first_byte(0x07), Ok(Pci::Unsegmented));
    assert_eq!(Pci::from_first_byte(0x1F), Ok(Pci::FirstSegment));
    assert_eq!(Pci::from_first_byte(0x2A), Ok(Pci::ConsecutiveSegment));
    assert_eq!(Pci::from_first_byte(0x30), Ok(Pci::FlowControl));
    assert_eq!(Pci::from_first_byte(0x45), Err(InvalidPci(0x4)));
    assert_eq!(Pci::ConsecutiveSegment.with_nibble(0x1F), 0x2F);
}

#[test]
fn test_service_ids() {
    assert_eq!(ServiceId::try_from(0x7F), Ok(ServiceId::NegativeResponse));
    assert_eq!(ServiceId::try_from(0x01), Err(InvalidServiceId(0x01)));
    assert_eq!(ServiceId::ReadDataByParameterId.positive_response(), 0x62);
    assert_eq!(u8::from(ServiceId::TesterPresent), 0x3E);
}

#[test]
/// Response pending is the only transient negative response.
fn test_negative_response_codes() {
    assert_eq!(
        NegativeResponseCode::try_from(0x78),
        Ok(NegativeResponseCode::ResponsePending)
    );
    assert!(NegativeResponseCode::ResponsePending.is_transient());
    assert!(!NegativeResponseCode::RequestOutOfRange.is_transient());
    assert!(!NegativeResponseCode::BusyRepeatRequest.is_transient());
}

#[test]
fn test_baud_rates() {
    assert_eq!(BaudRate::LowSpeedNormal.bits_per_second(), 33_333);
    assert_eq!(BaudRate::HighSpeed.bits_per_second(), 500_000);
}
