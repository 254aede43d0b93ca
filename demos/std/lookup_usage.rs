use gmlan_tp::protocol::lookups::*;
use gmlan_tp::protocol::transport::can_id::CanId;

fn main() {
    println!("=== Well-known arbitration ids ===\n");

    for raw in [0x241u16, 0x641, 0x7E0, 0x7E8, 0x123] {
        match StandardArbId::try_from(raw) {
            Ok(id) => println!("{raw:#05X}: {id:?} (low byte {:#04X})", CanId::from(id).low_byte()),
            Err(InvalidStandardArbId(other)) => println!("{other:#05X}: not a known GMLAN id"),
        }
    }

    println!("\n=== Decoding a negative response ===\n");
    let frame = [0x03, 0x7F, 0x27, 0x35];
    let service = ServiceId::try_from(frame[2]);
    let code = NegativeResponseCode::try_from(frame[3]);
    println!("service: {service:?}");
    println!("code: {code:?}");
    if let Ok(code) = code {
        println!("transient: {}", code.is_transient());
    }

    println!("\n=== 29-bit header ===\n");
    let header = CanId::decode(0x100D_0060);
    println!("{header:?} -> {:#010X}", header.encode_extended());

    println!("\n=== Bus speeds ===\n");
    for rate in [
        BaudRate::LowSpeedNormal,
        BaudRate::LowSpeedFast,
        BaudRate::MediumSpeed,
        BaudRate::HighSpeed,
    ] {
        println!("{rate:?}: {} bit/s", rate.bits_per_second());
    }
}
