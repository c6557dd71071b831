//! Property 5 (spec §8): after scheduling, the union of channel slices
//! assigned to a chip equals that chip's own `channel_count()`, slices are
//! pairwise disjoint, and every probe ends up assigned to exactly one chip.
//! Exercised here as a black-box test through the public `schedule()`
//! entry point with the real `Cyrf6936`/`Cc2500` chip abstractions, rather
//! than the in-module `FixedTimeChip` test double.

use ground_lib::{schedule, Cc2500, ChipId, Cyrf6936, Probe, RfChip};

fn probe(port: &str, board: u8) -> Probe {
    let mut p = Probe::discovered(port.into());
    p.board = board;
    p
}

#[test]
fn slices_are_exhaustive_disjoint_and_every_probe_gets_one_chip() {
    let cyrf = Cyrf6936::new();
    let cc2500 = Cc2500::new();
    let chips: Vec<(ChipId, &dyn RfChip)> =
        vec![(ChipId::Cyrf6936, &cyrf), (ChipId::Cc2500, &cc2500)];

    // A mix of single-chip (committed in phase 1) and dual-chip (free,
    // placed in phase 2 by pressure) probes.
    let probes = vec![
        probe("/dev/ttyUSB0", 1),
        probe("/dev/ttyUSB1", 1),
        probe("/dev/ttyUSB2", 2),
        probe("/dev/ttyUSB3", 2),
    ];

    let assignments = schedule(&probes, &chips);
    assert_eq!(assignments.len(), probes.len(), "every probe must be assigned exactly once");

    let ports: std::collections::HashSet<_> = assignments.iter().map(|a| a.port.clone()).collect();
    assert_eq!(ports.len(), probes.len(), "no probe may be assigned twice");

    for (chip_id, chip) in &chips {
        let mut ranges: Vec<(usize, usize)> = assignments
            .iter()
            .filter(|a| a.chip_id == *chip_id)
            .map(|a| a.channel_range)
            .collect();
        ranges.sort();

        let mut covered = 0usize;
        for (start, end) in &ranges {
            assert_eq!(*start, covered, "{chip_id:?} slices must be contiguous and disjoint");
            covered = *end;
        }
        assert_eq!(covered, chip.channel_count(), "{chip_id:?} slices must cover every channel");
    }
}

#[test]
fn single_chip_probes_are_committed_to_their_only_chip() {
    let cyrf = Cyrf6936::new();
    let cc2500 = Cc2500::new();
    let chips: Vec<(ChipId, &dyn RfChip)> =
        vec![(ChipId::Cyrf6936, &cyrf), (ChipId::Cc2500, &cc2500)];

    let probes = vec![probe("/dev/ttyUSB0", 1)];
    let assignments = schedule(&probes, &chips);

    assert_eq!(assignments.len(), 1);
    assert_eq!(assignments[0].chip_id, ChipId::Cyrf6936);
    assert_eq!(assignments[0].channel_range, (0, cyrf.channel_count()));
}
