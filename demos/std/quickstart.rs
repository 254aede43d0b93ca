//! Drive a GMLAN request by hand: the tester asks the BCM for its VIN and the
//! BCM answers with a segmented response. Frames are moved between the two
//! state machines the way a CAN driver loop would.
use gmlan_tp::protocol::lookups::{ServiceId, StandardArbId};
use gmlan_tp::protocol::transport::segmented::{FrameOutcome, SegmentedTransfer, TransferState};

fn main() {
    println!("=== GMLAN quickstart: read VIN from the BCM ===\n");

    let request: [u8; 2] = [ServiceId::ReadDataByIdentifier.into(), 0x90];
    let mut tester = SegmentedTransfer::request(StandardArbId::ToBcm.into(), &request)
        .expect("two bytes always fit");

    // Tester -> BCM: unsegmented request.
    let frame = tester.produce_next_frame().expect("tester is ready");
    println!("TX {:03X} {:02X?}", frame.id.raw(), frame.data);

    // BCM side: positive response 0x5A 0x90 followed by the VIN.
    let mut response = vec![ServiceId::ReadDataByIdentifier.positive_response(), 0x90];
    response.extend_from_slice(b"1G1ZT53826F109149");
    let mut bcm = SegmentedTransfer::new(
        StandardArbId::MultiFrameFromBcm.into(),
        &response,
        false,
        true,
    )
    .expect("response fits in a segmented transfer");

    while tester.state() != TransferState::Completed {
        match bcm.state() {
            TransferState::Ready | TransferState::Sending => {
                let frame = bcm.produce_next_frame().expect("BCM has data to send");
                println!("RX {:03X} {:02X?}", frame.id.raw(), frame.data);

                let outcome = tester.consume_frame(&frame).expect("tester is waiting");
                if outcome == FrameOutcome::FlowControlRequired {
                    let flow_control = tester.produce_flow_control().expect("flow control due");
                    println!("TX {:03X} {:02X?}", flow_control.id.raw(), flow_control.data);
                    bcm.consume_frame(&flow_control).expect("BCM awaits flow control");
                }
            }
            other => panic!("BCM stalled in {other:?}"),
        }
    }

    let vin = &tester.response()[2..];
    println!("\nVIN: {}", String::from_utf8_lossy(vin));
}
