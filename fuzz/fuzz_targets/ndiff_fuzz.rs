#![no_main]
use libfuzzer_sys::fuzz_target;
use seqdiff::differ::{ndiff, restore, Side};
use seqdiff::pairs::{PairEvent, mdiff};
use seqdiff::text::split_lines;

fuzz_target!(|data: &[u8]| {
    // Split the input at the first 0xff byte into two texts.
    let split = data.iter().position(|&b| b == 0xff).unwrap_or(data.len() / 2);
    let (left, right) = data.split_at(split);
    let right = right.strip_prefix(&[0xff]).unwrap_or(right);
    let from_text = String::from_utf8_lossy(left);
    let to_text = String::from_utf8_lossy(right);
    let from = split_lines(&from_text);
    let to = split_lines(&to_text);

    // The delta must reproduce both inputs.
    let delta = ndiff(&from, &to);
    assert_eq!(restore(&delta, Side::From).collect::<Vec<_>>(), from);
    assert_eq!(restore(&delta, Side::To).collect::<Vec<_>>(), to);

    // Pairing numbers every line of each side exactly once.
    let mut from_rows = 0;
    let mut to_rows = 0;
    for event in mdiff(&from, &to, None) {
        if let PairEvent::Pair(pair) = event {
            from_rows += usize::from(pair.from.number.is_some());
            to_rows += usize::from(pair.to.number.is_some());
        }
    }
    assert_eq!((from_rows, to_rows), (from.len(), to.len()));
});
