//! Transfers driven through `ChannelBus`, the embassy-sync channel endpoint a
//! firmware task would hand to application code.
mod helpers;

use embassy_sync::blocking_mutex::raw::NoopRawMutex;
use embassy_sync::channel::Channel;
use gmlan_tp::protocol::lookups::StandardArbId;
use gmlan_tp::protocol::transport::{
    can_frame::CanFrame,
    segmented::{SegmentedTransfer, TransferState},
    traits::{can_bus::CanBus, channel_bus::ChannelBus, request_sender::RequestSender},
};
use helpers::{answer_request, NoDelay};

#[tokio::test]
/// Tester and ECU exchange a segmented response over two channels.
async fn test_exchange_over_channels() {
    let to_ecu: Channel<NoopRawMutex, CanFrame, 4> = Channel::new();
    let to_tester: Channel<NoopRawMutex, CanFrame, 4> = Channel::new();

    let mut tester = ChannelBus::new(to_ecu.sender(), to_tester.receiver());
    let mut ecu = ChannelBus::new(to_tester.sender(), to_ecu.receiver());

    let request: [u8; 2] = [0x1A, 0x90];
    let response: Vec<u8> = (0..64).collect();

    let tester_side = async {
        let mut transfer =
            SegmentedTransfer::request(StandardArbId::ToHvac.into(), &request).unwrap();
        let state = tester.execute(&mut transfer, &mut NoDelay).await.unwrap();
        assert_eq!(state, TransferState::Completed);
        transfer.response().to_vec()
    };
    let ecu_side = answer_request(
        &mut ecu,
        StandardArbId::MultiFrameFromHvac.into(),
        &[],
        &response,
    );

    let (received, ecu_saw) = tokio::join!(tester_side, ecu_side);
    assert_eq!(received, response);
    assert_eq!(ecu_saw, request);
}

#[tokio::test]
/// Frames keep their identifier and payload through the channel.
async fn test_channel_bus_round_trip() {
    let channel: Channel<NoopRawMutex, CanFrame, 2> = Channel::new();
    let mut bus = ChannelBus::new(channel.sender(), channel.receiver());

    let mut transfer =
        SegmentedTransfer::new(StandardArbId::RequestToAllNodes.into(), &[0x3E], false, true)
            .unwrap();
    let frame = transfer.produce_next_frame().unwrap();

    bus.send(&frame).await.unwrap();
    let received = bus.recv().await.unwrap();
    assert_eq!(received, frame);
    assert_eq!(received.data, [0x01, 0x3E, 0xAA, 0xAA, 0xAA, 0xAA, 0xAA, 0xAA]);
}
