//! Spec §8 scenario S4: a validated FrSkyX packet updates exactly one
//! hopping-table slot, and a later packet for the same slot with a worse
//! (higher) LQI must not overwrite the already-stored reading.

use ground_lib::transmitter::{FrSkyXTransmitter, Transmitter, TransmitterRegistry};

/// Builds a raw FrSkyX transmitter-record payload (post chip-level framing):
/// `idx`/`channel`/`lqi` occupy the hop-table fields `parse_data` reads, and
/// a non-zero packet-type byte (offset 7) skips RC-channel parsing since
/// this scenario only exercises the hop table.
fn frskyx_payload(idx: u8, channel: u8, lqi: u8) -> Vec<u8> {
    let mut buf = vec![0u8; 32];
    buf[4] = idx;
    buf[7] = 1;
    let len = buf.len();
    buf[len - 2] = channel;
    buf[len - 3] = lqi & 0x7F;
    buf
}

#[test]
fn s4_validated_packet_sets_one_slot_and_worse_lqi_does_not_overwrite() {
    let mut tx = FrSkyXTransmitter::new([0x01, 0x02], false, None);
    tx.parse_data(&frskyx_payload(7, 42, 50));
    assert_eq!(tx.channels[7], (42, 50));

    // A later packet for the same index with a higher (worse) lqi must
    // leave the stored reading untouched.
    tx.parse_data(&frskyx_payload(7, 99, 60));
    assert_eq!(tx.channels[7], (42, 50), "higher lqi must not overwrite a lower one");

    // Every other slot remains unknown.
    let known: Vec<_> = tx
        .channels
        .iter()
        .enumerate()
        .filter(|(_, (c, _))| *c >= 0)
        .map(|(i, _)| i)
        .collect();
    assert_eq!(known, vec![7]);
}

#[test]
fn registry_merges_repeated_observations_of_the_same_frskyx_id() {
    let mut registry = TransmitterRegistry::new();
    let a = FrSkyXTransmitter::new([0xAA, 0xBB], false, Some(&frskyx_payload(0, 10, 20)));
    let b = FrSkyXTransmitter::new([0xAA, 0xBB], false, Some(&frskyx_payload(1, 11, 30)));
    registry.add_or_merge(Transmitter::FrSkyX(a));
    registry.add_or_merge(Transmitter::FrSkyX(b));

    assert_eq!(registry.len(), 1);
    let tx = registry.iter().next().unwrap();
    assert_eq!(tx.recv_cnt(), 2);
    match tx {
        Transmitter::FrSkyX(frsky) => {
            assert_eq!(frsky.channels[0], (10, 20));
            assert_eq!(frsky.channels[1], (11, 30));
        }
        Transmitter::Dsm(_) => panic!("expected a FrSkyX transmitter"),
    }
}
