#![no_main]
use libfuzzer_sys::fuzz_target;
use seqdiff::matcher::{SequenceMatcher, Tag};
use seqdiff::matcher::opcodes::check_partition;

fuzz_target!(|data: &[u8]| {
    if data.is_empty() {
        return;
    }

    // First byte: split point and autojunk flag.
    let flags = data[0];
    let payload = &data[1..];
    let split = (flags as usize >> 1).min(payload.len());
    let (a, b) = payload.split_at(split);

    let mut sm = SequenceMatcher::new(a, b).with_autojunk(flags & 1 != 0);
    let codes = sm.opcodes().to_vec();
    check_partition(&codes, a.len(), b.len()).unwrap();

    for op in &codes {
        if op.tag == Tag::Equal {
            assert_eq!(a[op.i1..op.i2], b[op.j1..op.j2]);
        }
    }

    let ratio = sm.ratio();
    assert!(ratio <= sm.quick_ratio());
    assert!(sm.quick_ratio() <= sm.real_quick_ratio());
});
