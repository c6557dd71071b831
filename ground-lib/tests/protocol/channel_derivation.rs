//! Property 2 (spec §8): `calc_channels` is a pure, deterministic function
//! whose output is bucketed 8/7/8 across the three sub-bands, duplicate-free,
//! and parity-consistent with the id it was derived from.

use ground_lib::protocol::dsmx::calc_channels;

const REQUIRED_ID: [u8; 4] = [0x12, 0x34, 0x56, 0x78];

#[test]
fn required_case_matches_the_documented_bucketing_and_parity() {
    let a = calc_channels(REQUIRED_ID);
    let b = calc_channels(REQUIRED_ID);
    assert_eq!(a, b, "calc_channels must be a pure function of its id");
    assert_eq!(a.len(), 23);

    let low = a.iter().filter(|&&c| (3..28).contains(&c)).count();
    let mid = a.iter().filter(|&&c| (28..52).contains(&c)).count();
    let high = a.iter().filter(|&&c| (52..77).contains(&c)).count();
    assert_eq!((low, mid, high), (8, 7, 8));

    let unique: std::collections::HashSet<_> = a.iter().collect();
    assert_eq!(unique.len(), a.len(), "no channel may repeat");

    let packed = u32::from_be_bytes(REQUIRED_ID);
    let seed = !packed;
    for &c in &a {
        assert_eq!((c as u32 ^ seed) & 1, 1, "parity check failed for channel {c}");
    }
}

#[test]
fn distinct_ids_generally_produce_distinct_hop_sets() {
    let a = calc_channels([0x01, 0x02, 0x03, 0x04]);
    let b = calc_channels([0xAA, 0xBB, 0xCC, 0xDD]);
    assert_ne!(a, b);
}
