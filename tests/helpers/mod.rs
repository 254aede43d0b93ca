/// Test doubles to simulate the CAN bus, the timer and a responding ECU.
use gmlan_tp::protocol::transport::{
    can_frame::CanFrame,
    can_id::CanId,
    segmented::SegmentedTransfer,
    traits::{can_bus::CanBus, gmlan_timer::GmlanTimer, request_sender::RequestSender},
};
use std::sync::Arc;
use tokio::sync::{mpsc, Mutex};
use tokio::time::{sleep, Duration};

#[derive(Clone)]
#[allow(dead_code)]
/// In-memory CAN bus reproducing the `CanBus` trait behavior.
pub struct MockCanBus {
    tx: mpsc::UnboundedSender<CanFrame>,
    rx: Arc<Mutex<mpsc::UnboundedReceiver<CanFrame>>>,
}

#[allow(dead_code)]
impl MockCanBus {
    /// Construct a pair of interconnected buses (tester ↔ ECU).
    pub fn create_pair() -> (Self, Self) {
        let (tester_tx, ecu_rx) = mpsc::unbounded_channel();
        let (ecu_tx, tester_rx) = mpsc::unbounded_channel();

        let tester_bus = Self {
            tx: tester_tx,
            rx: Arc::new(Mutex::new(tester_rx)),
        };

        let ecu_bus = Self {
            tx: ecu_tx,
            rx: Arc::new(Mutex::new(ecu_rx)),
        };

        (tester_bus, ecu_bus)
    }
}

impl CanBus for MockCanBus {
    type Error = ();

    async fn send<'a>(&'a mut self, frame: &'a CanFrame) -> Result<(), Self::Error> {
        self.tx.send(frame.clone()).map_err(|_| ())?;
        Ok(())
    }

    async fn recv(&mut self) -> Result<CanFrame, Self::Error> {
        let mut rx = self.rx.lock().await;
        rx.recv().await.ok_or(())
    }
}

#[allow(dead_code)]
/// Timer based on `tokio::time::sleep` to drive delays in tests.
pub struct MockTimer;

impl GmlanTimer for MockTimer {
    async fn delay_ms(&mut self, millis: u32) {
        sleep(Duration::from_millis(millis as u64)).await;
    }
}

#[allow(dead_code)]
/// Timer that never waits.
pub struct NoDelay;

impl GmlanTimer for NoDelay {
    async fn delay_ms(&mut self, _millis: u32) {}
}

#[allow(dead_code)]
/// ECU behaviour: receive one request on `id`, then send each frame payload of
/// `interim` raw (response pending frames) followed by `response` with
/// transport framing. Returns the request it received.
pub async fn answer_request<B: CanBus>(
    bus: &mut B,
    id: CanId,
    interim: &[[u8; 8]],
    response: &[u8],
) -> Vec<u8> {
    let mut timer = NoDelay;

    let mut request = SegmentedTransfer::listen(id);
    bus.execute(&mut request, &mut timer)
        .await
        .expect("ECU must receive the request");

    for frame in interim {
        let mut raw = SegmentedTransfer::new(id, frame, false, false).unwrap();
        bus.execute(&mut raw, &mut timer).await.unwrap();
    }

    let mut answer = SegmentedTransfer::new(id, response, false, true).unwrap();
    bus.execute(&mut answer, &mut timer)
        .await
        .expect("ECU must send the response");

    request.response().to_vec()
}
