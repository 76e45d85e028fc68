use pretty_assertions::assert_eq;

use super::*;
use crate::test_support::KernelWriter;

fn pos(value: u32) -> TokenPosition {
    TokenPosition::new(value)
}

// === TokenPosition ===

#[test]
fn bias_round_trip() {
    for p in [0, 1, 127, 5000, MAX_FOUR_BYTE - 1] {
        assert_eq!(TokenPosition::from_biased(p + 1), pos(p));
    }
    assert_eq!(TokenPosition::from_biased(0), TokenPosition::NO_SOURCE);
}

#[test]
fn widest_position_fits() {
    assert_eq!(pos(MAX_FOUR_BYTE).value(), 0x3FFF_FFFF);
    assert_eq!(TokenPosition::from_biased(MAX_FOUR_BYTE).value(), 0x3FFF_FFFE);
}

#[test]
#[cfg(debug_assertions)]
#[should_panic(expected = "token position exceeds 30 bits")]
fn position_past_wire_width_is_rejected() {
    let _ = TokenPosition::new(MAX_FOUR_BYTE + 1);
}

#[test]
fn sentinel_orders_below_real_positions() {
    assert!(TokenPosition::NO_SOURCE < pos(0));
    assert!(TokenPosition::NO_SOURCE.is_no_source());
    assert!(!TokenPosition::NO_SOURCE.is_real());
    assert!(pos(0).is_real());
    assert_eq!(TokenPosition::default(), TokenPosition::NO_SOURCE);
}

#[test]
fn debug_output() {
    assert_eq!(format!("{:?}", pos(12)), "TokenPosition(12)");
    assert_eq!(
        format!("{:?}", TokenPosition::NO_SOURCE),
        "TokenPosition(NoSource)"
    );
}

// === PositionRange ===

#[test]
fn record_tracks_min_and_max() {
    let mut range = PositionRange::UNSET;
    for p in [5, 2, 8] {
        range.record(pos(p));
    }
    range.record(TokenPosition::NO_SOURCE);
    assert_eq!(range, PositionRange { min: pos(2), max: pos(8) });
}

#[test]
fn sentinels_alone_leave_min_unset() {
    let mut range = PositionRange::UNSET;
    range.record(TokenPosition::NO_SOURCE);
    range.record(TokenPosition::NO_SOURCE);
    assert!(range.is_unset());
    assert_eq!(range, PositionRange::UNSET);
}

#[test]
fn first_real_position_replaces_unset_min() {
    let mut range = PositionRange::UNSET;
    range.record(TokenPosition::NO_SOURCE);
    range.record(pos(40));
    assert_eq!(range.min, pos(40));
}

#[test]
fn merge_into_unset_takes_other() {
    let mut range = PositionRange::UNSET;
    range.merge(PositionRange { min: pos(3), max: pos(9) });
    assert_eq!(range, PositionRange { min: pos(3), max: pos(9) });
}

#[test]
fn merge_unset_is_identity() {
    let mut range = PositionRange { min: pos(3), max: pos(9) };
    range.merge(PositionRange::UNSET);
    assert_eq!(range, PositionRange { min: pos(3), max: pos(9) });
}

#[test]
fn merge_widens_both_ends() {
    let mut range = PositionRange { min: pos(4), max: pos(6) };
    range.merge(PositionRange { min: pos(1), max: pos(10) });
    assert_eq!(range, PositionRange { min: pos(1), max: pos(10) });
}

// === PositionScope ===

#[test]
fn scope_starts_unset_and_restores_outer() {
    let bytes = KernelWriter::new().position(10).position(3).finish();
    let mut reader = Reader::new(&bytes);
    reader.read_position().unwrap();

    {
        let mut scope = reader.position_scope();
        assert_eq!(scope.snapshot_positions(), PositionRange::UNSET);
        assert_eq!(scope.outer(), PositionRange { min: pos(10), max: pos(10) });
        scope.read_position().unwrap();
        assert_eq!(scope.max_position(), pos(3));
    }

    // Region max 3 does not lower the outer max of 10.
    assert_eq!(reader.max_position(), pos(10));
    assert_eq!(reader.min_position(), pos(3));
}

#[test]
fn scope_raises_outer_max() {
    let bytes = KernelWriter::new().position(10).position(15).finish();
    let mut reader = Reader::new(&bytes);
    reader.read_position().unwrap();

    let (_, region) = reader.with_position_scope(Reader::read_position);
    assert_eq!(region, PositionRange { min: pos(15), max: pos(15) });
    assert_eq!(reader.max_position(), pos(15));
    assert_eq!(reader.min_position(), pos(10));
}

#[test]
fn scope_with_only_sentinels_keeps_outer_min() {
    let bytes = KernelWriter::new().position(7).no_position().finish();
    let mut reader = Reader::new(&bytes);
    reader.read_position().unwrap();

    let (_, region) = reader.with_position_scope(Reader::read_position);
    assert!(region.is_unset());
    assert_eq!(reader.snapshot_positions(), PositionRange { min: pos(7), max: pos(7) });
}

#[test]
fn scope_inside_unset_outer() {
    let bytes = KernelWriter::new().position(20).position(11).finish();
    let mut reader = Reader::new(&bytes);

    let (result, _) = reader.with_position_scope(|r| {
        r.read_position()?;
        r.read_position()
    });
    assert_eq!(result, Ok(pos(11)));
    assert_eq!(reader.snapshot_positions(), PositionRange { min: pos(11), max: pos(20) });
}

#[test]
fn nested_scopes_are_transparent() {
    let bytes = KernelWriter::new()
        .position(50)
        .position(30)
        .position(80)
        .position(40)
        .finish();

    let mut flat = Reader::new(&bytes);
    for _ in 0..4 {
        flat.read_position().unwrap();
    }

    let mut nested = Reader::new(&bytes);
    nested.read_position().unwrap();
    let ((_, inner), outer) = nested.with_position_scope(|r| {
        r.read_position().unwrap();
        let inner = r.with_position_scope(|r| r.read_position().unwrap());
        r.read_position().unwrap();
        inner
    });

    assert_eq!(inner, PositionRange { min: pos(80), max: pos(80) });
    assert_eq!(outer, PositionRange { min: pos(30), max: pos(80) });
    assert_eq!(nested.snapshot_positions(), flat.snapshot_positions());
}

#[test]
fn scope_merges_on_early_return() {
    fn failing_region(reader: &mut Reader<'_>) -> crate::Result<()> {
        let mut scope = reader.position_scope();
        scope.read_position()?;
        scope.read_position()?; // runs off the end
        Ok(())
    }

    let bytes = KernelWriter::new().position(10).position(25).finish();
    let mut reader = Reader::new(&bytes);
    reader.read_position().unwrap();

    assert!(failing_region(&mut reader).is_err());
    assert_eq!(reader.snapshot_positions(), PositionRange { min: pos(10), max: pos(25) });
}

// === Property tests ===

#[allow(
    clippy::disallowed_types,
    reason = "proptest macros internally use Arc"
)]
mod proptest_positions {
    use super::super::{PositionRange, TokenPosition};
    use proptest::prelude::*;

    fn position() -> impl Strategy<Value = TokenPosition> {
        prop_oneof![
            1 => Just(TokenPosition::NO_SOURCE),
            4 => (0u32..10_000).prop_map(TokenPosition::new),
        ]
    }

    fn record_all(range: &mut PositionRange, positions: &[TokenPosition]) {
        for &p in positions {
            range.record(p);
        }
    }

    proptest! {
        #[test]
        fn split_and_merge_matches_flat(
            before in proptest::collection::vec(position(), 0..16),
            inside in proptest::collection::vec(position(), 0..16),
        ) {
            let mut flat = PositionRange::UNSET;
            record_all(&mut flat, &before);
            record_all(&mut flat, &inside);

            let mut outer = PositionRange::UNSET;
            record_all(&mut outer, &before);
            let mut region = PositionRange::UNSET;
            record_all(&mut region, &inside);
            region.merge(outer);

            prop_assert_eq!(region, flat);
        }

        #[test]
        fn min_is_smallest_real(positions in proptest::collection::vec(position(), 0..32)) {
            let mut range = PositionRange::UNSET;
            record_all(&mut range, &positions);
            let smallest = positions.iter().copied().filter(|p| p.is_real()).min();
            prop_assert_eq!(range.min, smallest.unwrap_or(TokenPosition::NO_SOURCE));
        }
    }
}
