//! Spec §8 scenarios S1/S2: decoding and merging DSM2 packets through the
//! full `protocol::dsm2::parse` -> `DsmTransmitter` -> `TransmitterRegistry`
//! pipeline.
//!
//! The CYRF6936 CRC field sits inside the very byte range it protects (the
//! chip runs the CRC forward across the whole packet body, including the two
//! bytes the field itself occupies), so a valid packet's CRC bytes are a
//! fixed point of that forward pass rather than something a test can just
//! pick. Each helper below searches for that fixed point at a handful of
//! candidate seeds and gives up loudly if none of them land on one.

use ground_lib::crc::cyrf6936::{find_crc_seed, forward_crc};
use ground_lib::protocol::dsm2;
use ground_lib::transmitter::{DsmTransmitter, Transmitter, TransmitterRegistry};

const SEED_ATTEMPTS: u32 = 64;

/// Builds a 24-byte DSM2 packet on `channel` with self-consistent,
/// unambiguously-recoverable CRC bytes, plus the seed that produced them.
fn build_dsm2_packet(channel: u8, mfg: [u8; 2]) -> (Vec<u8>, u16) {
    let pn_row = channel % 5;
    let mut buf = vec![0u8; 24];
    buf[1] = mfg[0];
    buf[2] = mfg[1];
    buf[19] = channel;
    buf[20] = pn_row << 4;

    for seed in 0..SEED_ATTEMPTS {
        let seed = seed as u16;
        for crc_field in 0u32..=0xFFFF {
            buf[17] = (crc_field >> 8) as u8;
            buf[18] = crc_field as u8;
            if forward_crc(&buf[..20], seed) != crc_field as u16 {
                continue;
            }
            if find_crc_seed(&buf[..20], crc_field as u16).len() == 1 {
                return (buf, seed);
            }
        }
    }
    panic!("no self-consistent, unambiguous dsm2 packet found for channel {channel}");
}

#[test]
fn s1_unique_packet_creates_exactly_one_transmitter_with_the_recovered_id() {
    let (buf, seed) = build_dsm2_packet(5, [0x10, 0x20]);
    let candidate = dsm2::parse(&buf).expect("well-formed, unambiguous packet must parse");
    assert!(!candidate.dsmx);
    assert_eq!(
        candidate.id,
        [(seed & 0xFF) as u8, (seed >> 8) as u8, !0x10u8, !0x20u8]
    );

    let mut registry = TransmitterRegistry::new();
    let tx = DsmTransmitter::new(candidate.id, candidate.dsmx, Some(&buf));
    registry.add_or_merge(Transmitter::Dsm(tx));
    assert_eq!(registry.len(), 1);
}

#[test]
fn s2_second_packet_from_the_same_transmitter_merges_and_scores_40_or_100() {
    let mfg = [0x10, 0x20];
    let (buf1, _) = build_dsm2_packet(5, mfg);
    let (buf2, _) = build_dsm2_packet(10, mfg);

    let c1 = dsm2::parse(&buf1).expect("first packet parses");
    let mut registry = TransmitterRegistry::new();
    registry.add_or_merge(Transmitter::Dsm(DsmTransmitter::new(c1.id, c1.dsmx, Some(&buf1))));

    let c2 = dsm2::parse(&buf2).expect("second packet parses");
    registry.add_or_merge(Transmitter::Dsm(DsmTransmitter::new(c2.id, c2.dsmx, Some(&buf2))));

    assert_eq!(registry.len(), 1, "same manufacturer bytes must merge into one entry");
    let tx = registry.iter().next().unwrap();
    assert_eq!(tx.recv_cnt(), 2);
    match tx {
        Transmitter::Dsm(dsm) => {
            assert_eq!(dsm.channels.len(), 2);
            assert!(
                dsm.header.hackable == 40 || dsm.header.hackable == 100,
                "hackable was {}",
                dsm.header.hackable
            );
        }
        Transmitter::FrSkyX(_) => panic!("expected a DSM transmitter"),
    }
}
