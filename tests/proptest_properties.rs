use proptest::prelude::*;
use seqdiff::differ::{LineTag, ndiff, restore, Side};
use seqdiff::matcher::{SequenceMatcher, Tag};
use seqdiff::pairs::{PairEvent, mdiff};

fn small_seq() -> impl Strategy<Value = Vec<u8>> {
    proptest::collection::vec(0u8..5, 0..48)
}

fn lines() -> impl Strategy<Value = Vec<String>> {
    proptest::collection::vec("[ab \t#]{0,5}\n", 0..16)
}

proptest! {
    #[test]
    fn prop_opcodes_partition_both_inputs(a in small_seq(), b in small_seq()) {
        let mut sm = SequenceMatcher::new(&a, &b);
        let mut rebuilt_a = Vec::new();
        let mut rebuilt_b = Vec::new();
        for op in sm.opcodes() {
            if op.tag != Tag::Insert {
                rebuilt_a.extend_from_slice(&a[op.i1..op.i2]);
            }
            if op.tag != Tag::Delete {
                rebuilt_b.extend_from_slice(&b[op.j1..op.j2]);
            }
            if op.tag == Tag::Equal {
                prop_assert_eq!(&a[op.i1..op.i2], &b[op.j1..op.j2]);
            }
        }
        prop_assert_eq!(&rebuilt_a, &a);
        prop_assert_eq!(&rebuilt_b, &b);
    }

    #[test]
    fn prop_matching_blocks_are_valid(a in small_seq(), b in small_seq()) {
        let mut sm = SequenceMatcher::new(&a, &b);
        let blocks = sm.matching_blocks().to_vec();
        let (last, body) = blocks.split_last().unwrap();
        prop_assert_eq!((last.a, last.b, last.size), (a.len(), b.len(), 0));
        for m in body {
            prop_assert!(m.size > 0);
            prop_assert_eq!(&a[m.a..m.a_end()], &b[m.b..m.b_end()]);
        }
        for pair in blocks.windows(2) {
            prop_assert!(pair[0].a_end() <= pair[1].a);
            prop_assert!(pair[0].b_end() <= pair[1].b);
        }
    }

    #[test]
    fn prop_bounds_are_symmetric_and_ordered(a in small_seq(), b in small_seq()) {
        let mut ab = SequenceMatcher::new(&a, &b);
        let mut ba = SequenceMatcher::new(&b, &a);
        prop_assert_eq!(ab.real_quick_ratio(), ba.real_quick_ratio());
        prop_assert_eq!(ab.quick_ratio(), ba.quick_ratio());

        let (exact, quick, real_quick) = (ab.ratio(), ab.quick_ratio(), ab.real_quick_ratio());
        prop_assert!((0.0..=1.0).contains(&exact));
        prop_assert!(exact <= quick);
        prop_assert!(quick <= real_quick);
    }

    #[test]
    fn prop_ratio_of_a_sequence_with_itself_is_one(a in small_seq()) {
        let mut sm = SequenceMatcher::new(&a, &a);
        prop_assert_eq!(sm.ratio(), 1.0);
    }

    #[test]
    fn prop_opcodes_are_idempotent(a in small_seq(), b in small_seq()) {
        let mut sm = SequenceMatcher::new(&a, &b);
        let first = sm.opcodes().to_vec();
        let second = sm.opcodes().to_vec();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn prop_junk_never_changes_partition(a in small_seq(), b in small_seq()) {
        let mut sm = SequenceMatcher::new(&a, &b).with_junk(|x: &u8| *x == 0);
        let codes = sm.opcodes().to_vec();
        let last = codes.last().map_or((0, 0), |op| (op.i2, op.j2));
        prop_assert_eq!(last, (a.len(), b.len()));
    }

    #[test]
    fn prop_restore_recovers_both_inputs(a in lines(), b in lines()) {
        let delta = ndiff(&a, &b);
        let from: Vec<&str> = restore(&delta, Side::From).collect();
        let to: Vec<&str> = restore(&delta, Side::To).collect();
        prop_assert_eq!(from, a.iter().map(String::as_str).collect::<Vec<_>>());
        prop_assert_eq!(to, b.iter().map(String::as_str).collect::<Vec<_>>());
    }

    #[test]
    fn prop_hints_follow_a_changed_line(a in lines(), b in lines()) {
        let delta = ndiff(&a, &b);
        for (i, line) in delta.iter().enumerate() {
            if line.tag == LineTag::Hint {
                prop_assert!(i > 0);
                prop_assert!(matches!(delta[i - 1].tag, LineTag::Delete | LineTag::Insert));
                prop_assert!(line.text.trim_end().chars().any(|c| matches!(c, '^' | '-' | '+')));
            }
        }
    }

    #[test]
    fn prop_pairs_number_every_line_once(a in lines(), b in lines()) {
        let mut from = Vec::new();
        let mut to = Vec::new();
        for event in mdiff(&a, &b, None) {
            let PairEvent::Pair(pair) = event else {
                prop_assert!(false, "separator without context");
                continue;
            };
            from.extend(pair.from.number);
            to.extend(pair.to.number);
        }
        prop_assert_eq!(from, (1..=a.len()).collect::<Vec<_>>());
        prop_assert_eq!(to, (1..=b.len()).collect::<Vec<_>>());
    }

    #[test]
    fn prop_context_window_keeps_every_change(a in lines(), b in lines(), context in 0usize..4) {
        let all = mdiff(&a, &b, None).filter(|e| matches!(e, PairEvent::Pair(p) if p.changed)).count();
        let windowed = mdiff(&a, &b, Some(context))
            .filter(|e| matches!(e, PairEvent::Pair(p) if p.changed))
            .count();
        prop_assert_eq!(all, windowed);
    }
}

#[test]
fn empty_inputs_boundary() {
    let empty: [u8; 0] = [];
    let mut sm = SequenceMatcher::new(&empty, &empty);
    assert_eq!(sm.ratio(), 1.0);
    let blocks = sm.matching_blocks();
    assert_eq!(blocks.len(), 1);
    assert_eq!((blocks[0].a, blocks[0].b, blocks[0].size), (0, 0, 0));
    assert!(sm.opcodes().is_empty());
}
