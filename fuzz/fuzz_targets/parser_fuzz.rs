#![no_main]
use libfuzzer_sys::fuzz_target;

const SUBCOMMANDS: [&str; 6] = ["unified", "context", "ndiff", "side-by-side", "ratio", "close"];

// The first byte picks a subcommand so most inputs reach its own flags.
fuzz_target!(|data: &[u8]| {
    let Some((&pick, rest)) = data.split_first() else {
        return;
    };
    let mut args = vec![SUBCOMMANDS[usize::from(pick) % SUBCOMMANDS.len()].to_string()];
    args.extend(
        String::from_utf8_lossy(rest)
            .split_whitespace()
            .take(24)
            .map(str::to_string),
    );
    seqdiff::cli::fuzz_try_parse_args(&args);
});
