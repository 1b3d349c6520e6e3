// Command line front end for seqdiff.
//
// Subcommands map one-to-one onto the library entry points: the two classic
// diff formats, the annotated line delta, a side-by-side view over the pair
// stream, similarity ratios and closest-match lookup. Exit status follows
// diff(1): 0 when the inputs are the same, 1 when they differ, 2 on trouble.

use std::io::{self, BufWriter, Read, Write};
use std::path::{Path, PathBuf};
use std::process;

use clap::{ArgAction, Args, Parser, Subcommand, ValueHint};

use crate::close::{self, CloseOptions};
use crate::differ::{Differ, LineTag, is_character_junk, is_line_junk};
use crate::format::{self, FormatOptions};
use crate::matcher::SequenceMatcher;
use crate::pairs::{self, LinePair, MARK_END, MARK_START, PairEvent, SideLine};
use crate::text::{decode_text, split_lines};

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

const EXIT_SAME: i32 = 0;
const EXIT_DIFFERENT: i32 = 1;
const EXIT_TROUBLE: i32 = 2;

const DEFAULT_CONTEXT: usize = 3;
const DEFAULT_COLUMN_WIDTH: usize = 40;

const BUF_SIZE: usize = 64 * 1024;

const NO_NEWLINE: &str = "\\ No newline at end of file\n";

// ---------------------------------------------------------------------------
// Clap CLI definition
// ---------------------------------------------------------------------------

/// Sequence comparison and human-readable diffs.
#[derive(Parser, Debug)]
#[command(
    name = "seqdiff",
    version,
    about = "Compare files line by line and words by similarity",
    arg_required_else_help = true
)]
struct Cli {
    #[command(subcommand)]
    command: Cmd,

    /// Quiet mode (report through the exit status only).
    #[arg(short = 'q', long, global = true, conflicts_with = "verbose")]
    quiet: bool,

    /// Verbose mode (use multiple times for more detail).
    #[arg(short = 'v', long, global = true, action = ArgAction::Count)]
    verbose: u8,

    /// Output stats as JSON to stderr.
    #[arg(long = "json", global = true)]
    json_output: bool,
}

#[derive(Subcommand, Debug)]
enum Cmd {
    /// Unified diff of two files.
    Unified(FormatArgs),
    /// Context diff of two files.
    Context(FormatArgs),
    /// Line delta with intraline change markers.
    Ndiff(NdiffArgs),
    /// Two-column view with line numbers.
    SideBySide(SideBySideArgs),
    /// Similarity ratios of two files.
    Ratio(RatioArgs),
    /// Closest matches to a word among candidates.
    Close(CloseArgs),
}

#[derive(Args, Debug)]
struct InputArgs {
    /// First file ("-" for stdin).
    #[arg(value_hint = ValueHint::FilePath)]
    from: PathBuf,

    /// Second file ("-" for stdin).
    #[arg(value_hint = ValueHint::FilePath)]
    to: PathBuf,
}

#[derive(Args, Debug)]
struct FormatArgs {
    #[command(flatten)]
    inputs: InputArgs,

    /// Unchanged lines shown around each change.
    #[arg(long, short = 'n', default_value_t = DEFAULT_CONTEXT)]
    context: usize,

    /// Header label for the first file (default: its path).
    #[arg(long = "from-label")]
    from_label: Option<String>,

    /// Header label for the second file (default: its path).
    #[arg(long = "to-label")]
    to_label: Option<String>,
}

#[derive(Args, Debug)]
struct NdiffArgs {
    #[command(flatten)]
    inputs: InputArgs,

    /// Treat blank lines and lone `#` lines as junk.
    #[arg(long)]
    linejunk: bool,
}

#[derive(Args, Debug)]
struct SideBySideArgs {
    #[command(flatten)]
    inputs: InputArgs,

    /// Only show pairs within this many lines of a change.
    #[arg(long, short = 'n')]
    context: Option<usize>,

    /// Width of each text column.
    #[arg(long, short = 'w', default_value_t = DEFAULT_COLUMN_WIDTH)]
    width: usize,
}

#[derive(Args, Debug)]
struct RatioArgs {
    #[command(flatten)]
    inputs: InputArgs,

    /// Compare characters instead of lines.
    #[arg(long)]
    chars: bool,

    /// Do not treat very frequent elements as junk.
    #[arg(long = "no-autojunk")]
    no_autojunk: bool,
}

#[derive(Args, Debug)]
struct CloseArgs {
    /// Word to look up.
    word: String,

    /// Candidate words.
    candidates: Vec<String>,

    /// Read more candidates from a file, one per line.
    #[arg(long = "candidates-file", value_hint = ValueHint::FilePath)]
    candidates_file: Option<PathBuf>,

    /// Maximum number of matches.
    #[arg(short = 'n', long = "max", default_value_t = 3)]
    n: usize,

    /// Minimum similarity in [0, 1].
    #[arg(long, default_value_t = 0.6)]
    cutoff: f64,
}

// ---------------------------------------------------------------------------
// Resolved command + options (flattened from Cli)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Unified,
    Context,
    Ndiff,
    SideBySide,
    Ratio,
    Close,
}

impl Command {
    fn name(self) -> &'static str {
        match self {
            Self::Unified => "unified",
            Self::Context => "context",
            Self::Ndiff => "ndiff",
            Self::SideBySide => "side-by-side",
            Self::Ratio => "ratio",
            Self::Close => "close",
        }
    }
}

struct Options {
    command: Command,
    quiet: bool,
    verbose: u8,
    json_output: bool,
    from_file: PathBuf,
    to_file: PathBuf,
    from_label: Option<String>,
    to_label: Option<String>,
    /// `None` shows every pair (side-by-side only).
    context: Option<usize>,
    width: usize,
    linejunk: bool,
    chars: bool,
    autojunk: bool,
    word: String,
    candidates: Vec<String>,
    candidates_file: Option<PathBuf>,
    n: usize,
    cutoff: f64,
}

impl Options {
    fn base(command: Command, quiet: bool, verbose: u8, json_output: bool) -> Self {
        Self {
            command,
            quiet,
            verbose,
            json_output,
            from_file: PathBuf::new(),
            to_file: PathBuf::new(),
            from_label: None,
            to_label: None,
            context: Some(DEFAULT_CONTEXT),
            width: DEFAULT_COLUMN_WIDTH,
            linejunk: false,
            chars: false,
            autojunk: true,
            word: String::new(),
            candidates: Vec::new(),
            candidates_file: None,
            n: CloseOptions::default().n,
            cutoff: CloseOptions::default().cutoff,
        }
    }

    fn with_inputs(mut self, inputs: InputArgs) -> Self {
        self.from_file = inputs.from;
        self.to_file = inputs.to;
        self
    }

    fn chatty(&self) -> bool {
        self.verbose > 0 && !self.quiet
    }
}

fn resolve_options(cli: Cli) -> Options {
    let quiet = cli.quiet;
    let verbose = cli.verbose.min(2);
    let json_output = cli.json_output;
    let base = |command| Options::base(command, quiet, verbose, json_output);

    match cli.command {
        Cmd::Unified(args) => resolve_format(base(Command::Unified), args),
        Cmd::Context(args) => resolve_format(base(Command::Context), args),
        Cmd::Ndiff(args) => Options {
            linejunk: args.linejunk,
            ..base(Command::Ndiff).with_inputs(args.inputs)
        },
        Cmd::SideBySide(args) => Options {
            context: args.context,
            width: args.width,
            ..base(Command::SideBySide).with_inputs(args.inputs)
        },
        Cmd::Ratio(args) => Options {
            chars: args.chars,
            autojunk: !args.no_autojunk,
            ..base(Command::Ratio).with_inputs(args.inputs)
        },
        Cmd::Close(args) => Options {
            word: args.word,
            candidates: args.candidates,
            candidates_file: args.candidates_file,
            n: args.n,
            cutoff: args.cutoff,
            ..base(Command::Close)
        },
    }
}

fn resolve_format(opts: Options, args: FormatArgs) -> Options {
    Options {
        from_label: args.from_label,
        to_label: args.to_label,
        context: Some(args.context),
        ..opts.with_inputs(args.inputs)
    }
}

#[cfg(any(test, feature = "fuzzing"))]
pub fn fuzz_try_parse_args(args: &[String]) {
    let argv: Vec<String> = std::iter::once("seqdiff".to_string())
        .chain(args.iter().cloned())
        .collect();
    if let Ok(cli) = Cli::try_parse_from(argv) {
        let _ = resolve_options(cli);
    }
}

// ---------------------------------------------------------------------------
// Build library options from CLI options
// ---------------------------------------------------------------------------

fn build_format_options(opts: &Options) -> FormatOptions {
    let label = |given: &Option<String>, path: &Path| {
        given
            .clone()
            .unwrap_or_else(|| path.display().to_string())
    };
    FormatOptions {
        from_file: label(&opts.from_label, &opts.from_file),
        to_file: label(&opts.to_label, &opts.to_file),
        context: opts.context.unwrap_or(DEFAULT_CONTEXT),
        ..FormatOptions::default()
    }
}

fn build_close_options(opts: &Options) -> CloseOptions {
    CloseOptions {
        n: opts.n,
        cutoff: opts.cutoff,
    }
}

// ---------------------------------------------------------------------------
// Input / output helpers
// ---------------------------------------------------------------------------

fn read_lines(path: &Path) -> Result<Vec<String>, String> {
    let bytes = if path == Path::new("-") {
        let mut buf = Vec::new();
        io::stdin()
            .lock()
            .read_to_end(&mut buf)
            .map_err(|e| format!("stdin: {e}"))?;
        buf
    } else {
        std::fs::read(path).map_err(|e| format!("{}: {e}", path.display()))?
    };
    let text = decode_text(&bytes).map_err(|e| format!("{}: {e}", path.display()))?;
    Ok(split_lines(&text).into_iter().map(str::to_string).collect())
}

fn read_pair(opts: &Options) -> Option<(Vec<String>, Vec<String>)> {
    if opts.from_file == Path::new("-") && opts.to_file == Path::new("-") {
        eprintln!("seqdiff: only one input may be read from stdin");
        return None;
    }
    let read = |path: &Path| {
        read_lines(path)
            .map_err(|e| eprintln!("seqdiff: {e}"))
            .ok()
    };
    let from = read(&opts.from_file)?;
    let to = read(&opts.to_file)?;
    if opts.chatty() {
        eprintln!(
            "seqdiff: {}: from {} lines, to {} lines",
            opts.command.name(),
            from.len(),
            to.len()
        );
    }
    Some((from, to))
}

/// Write lines to stdout. With `mark_eof`, a line missing its newline is
/// terminated and followed by the usual marker.
fn write_lines<I, S>(lines: I, mark_eof: bool) -> io::Result<()>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut out = BufWriter::with_capacity(BUF_SIZE, io::stdout().lock());
    for line in lines {
        let line = line.as_ref();
        out.write_all(line.as_bytes())?;
        if !line.ends_with('\n') {
            out.write_all(b"\n")?;
            if mark_eof {
                out.write_all(NO_NEWLINE.as_bytes())?;
            }
        }
    }
    out.flush()
}

fn emit<I, S>(opts: &Options, lines: I, mark_eof: bool) -> bool
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    if opts.quiet {
        return true;
    }
    match write_lines(lines, mark_eof) {
        Ok(()) => true,
        Err(e) => {
            eprintln!("seqdiff: write error: {e}");
            false
        }
    }
}

fn print_json(value: &serde_json::Value) {
    match serde_json::to_string_pretty(value) {
        Ok(text) => eprintln!("{text}"),
        Err(e) => eprintln!("seqdiff: json error: {e}"),
    }
}

fn status(same: bool) -> i32 {
    if same { EXIT_SAME } else { EXIT_DIFFERENT }
}

// ---------------------------------------------------------------------------
// Unified / context commands
// ---------------------------------------------------------------------------

fn cmd_format(opts: &Options) -> i32 {
    let Some((from, to)) = read_pair(opts) else {
        return EXIT_TROUBLE;
    };
    let format_opts = build_format_options(opts);
    let lines = match opts.command {
        Command::Context => format::context_diff(&from, &to, &format_opts),
        _ => format::unified_diff(&from, &to, &format_opts),
    };
    let hunks = lines
        .iter()
        .filter(|l| l.starts_with("@@ ") || l.starts_with("***************"))
        .count();

    if !emit(opts, &lines, true) {
        return EXIT_TROUBLE;
    }

    if opts.chatty() {
        eprintln!("seqdiff: {}: hunks: {hunks}", opts.command.name());
    }
    if opts.json_output {
        print_json(&serde_json::json!({
            "command": opts.command.name(),
            "from_lines": from.len(),
            "to_lines": to.len(),
            "context": format_opts.context,
            "hunks": hunks,
        }));
    }

    status(hunks == 0)
}

// ---------------------------------------------------------------------------
// Ndiff command
// ---------------------------------------------------------------------------

fn cmd_ndiff(opts: &Options) -> i32 {
    let Some((from, to)) = read_pair(opts) else {
        return EXIT_TROUBLE;
    };
    let mut differ = Differ::new().with_charjunk(&is_character_junk);
    if opts.linejunk {
        differ = differ.with_linejunk(&is_line_junk);
    }
    let delta = differ.compare(&from, &to);

    let count = |tag: LineTag| delta.iter().filter(|l| l.tag == tag).count();
    let (deleted, inserted, hints) = (
        count(LineTag::Delete),
        count(LineTag::Insert),
        count(LineTag::Hint),
    );

    if !emit(opts, delta.iter().map(ToString::to_string), false) {
        return EXIT_TROUBLE;
    }

    if opts.chatty() {
        eprintln!("seqdiff: ndiff: deleted: {deleted}, inserted: {inserted}, hints: {hints}");
    }
    if opts.json_output {
        print_json(&serde_json::json!({
            "command": "ndiff",
            "from_lines": from.len(),
            "to_lines": to.len(),
            "deleted": deleted,
            "inserted": inserted,
            "hints": hints,
        }));
    }

    status(deleted == 0 && inserted == 0)
}

// ---------------------------------------------------------------------------
// Side-by-side command
// ---------------------------------------------------------------------------

/// Replace span delimiters with brackets and drop the line ending.
fn show_spans(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars();
    while let Some(c) = chars.next() {
        match c {
            MARK_START => {
                chars.next();
                out.push('[');
            }
            MARK_END => out.push(']'),
            '\n' | '\r' => {}
            '\t' => out.push(' '),
            c => out.push(c),
        }
    }
    out
}

fn cell(side: &SideLine, width: usize) -> String {
    let number = side.number.map_or_else(String::new, |n| n.to_string());
    let text: String = show_spans(&side.text).chars().take(width).collect();
    format!("{number:>5} {text:<width$}")
}

/// One row: `<` only on the left, `>` only on the right, `|` changed.
fn render_row(pair: &LinePair, width: usize) -> String {
    let gutter = match (pair.changed, pair.from.is_blank(), pair.to.is_blank()) {
        (false, _, _) => ' ',
        (true, false, true) => '<',
        (true, true, false) => '>',
        (true, _, _) => '|',
    };
    let row = format!("{} {gutter} {}", cell(&pair.from, width), cell(&pair.to, width));
    format!("{}\n", row.trim_end())
}

fn cmd_side_by_side(opts: &Options) -> i32 {
    let Some((from, to)) = read_pair(opts) else {
        return EXIT_TROUBLE;
    };

    let mut rows = Vec::new();
    let (mut changed, mut separators) = (0usize, 0usize);
    for event in pairs::mdiff(&from, &to, opts.context) {
        match event {
            PairEvent::Pair(pair) => {
                changed += usize::from(pair.changed);
                rows.push(render_row(&pair, opts.width));
            }
            PairEvent::Separator => {
                separators += 1;
                rows.push(format!("{:-<w$}\n", "", w = 2 * opts.width + 15));
            }
        }
    }

    if !emit(opts, &rows, false) {
        return EXIT_TROUBLE;
    }

    if opts.chatty() {
        eprintln!("seqdiff: side-by-side: rows: {}, changed: {changed}", rows.len());
    }
    if opts.json_output {
        print_json(&serde_json::json!({
            "command": "side-by-side",
            "from_lines": from.len(),
            "to_lines": to.len(),
            "rows": rows.len() - separators,
            "changed": changed,
            "separators": separators,
        }));
    }

    status(changed == 0)
}

// ---------------------------------------------------------------------------
// Ratio command
// ---------------------------------------------------------------------------

/// Ratios plus the number of distinct elements autojunk set aside.
fn ratios<T: Eq + std::hash::Hash>(
    a: &[T],
    b: &[T],
    autojunk: bool,
) -> (f64, f64, f64, usize) {
    let mut sm = SequenceMatcher::new(a, b).with_autojunk(autojunk);
    let popular = sm.junk().popular().count();
    (sm.ratio(), sm.quick_ratio(), sm.real_quick_ratio(), popular)
}

fn cmd_ratio(opts: &Options) -> i32 {
    let Some((from, to)) = read_pair(opts) else {
        return EXIT_TROUBLE;
    };
    let (ratio, quick, real_quick, popular) = if opts.chars {
        let a: Vec<char> = from.iter().flat_map(|l| l.chars()).collect();
        let b: Vec<char> = to.iter().flat_map(|l| l.chars()).collect();
        ratios(&a, &b, opts.autojunk)
    } else {
        ratios(&from, &to, opts.autojunk)
    };

    let report = [
        format!("ratio {ratio:.6}\n"),
        format!("quick_ratio {quick:.6}\n"),
        format!("real_quick_ratio {real_quick:.6}\n"),
    ];
    if !emit(opts, &report, false) {
        return EXIT_TROUBLE;
    }

    if opts.json_output {
        print_json(&serde_json::json!({
            "command": "ratio",
            "unit": if opts.chars { "chars" } else { "lines" },
            "autojunk": opts.autojunk,
            "ratio": ratio,
            "quick_ratio": quick,
            "real_quick_ratio": real_quick,
            "popular": popular,
        }));
    }

    status(from == to)
}

// ---------------------------------------------------------------------------
// Close command
// ---------------------------------------------------------------------------

fn cmd_close(opts: &Options) -> i32 {
    let mut candidates = opts.candidates.clone();
    if let Some(path) = &opts.candidates_file {
        match read_lines(path) {
            Ok(lines) => candidates.extend(
                lines
                    .iter()
                    .map(|l| l.trim_end_matches(['\n', '\r']).to_string())
                    .filter(|l| !l.is_empty()),
            ),
            Err(e) => {
                eprintln!("seqdiff: {e}");
                return EXIT_TROUBLE;
            }
        }
    }

    let close_opts = build_close_options(opts);
    #[cfg(feature = "parallel")]
    let found = close::get_close_matches_parallel(&opts.word, &candidates, &close_opts);
    #[cfg(not(feature = "parallel"))]
    let found = close::get_close_matches(&opts.word, &candidates, &close_opts);

    let found = match found {
        Ok(found) => found,
        Err(e) => {
            eprintln!("seqdiff: close: {e}");
            return EXIT_TROUBLE;
        }
    };

    if !emit(opts, &found, false) {
        return EXIT_TROUBLE;
    }

    if opts.chatty() {
        eprintln!(
            "seqdiff: close: {} of {} candidates matched",
            found.len(),
            candidates.len()
        );
    }
    if opts.json_output {
        print_json(&serde_json::json!({
            "command": "close",
            "word": opts.word,
            "candidates": candidates.len(),
            "n": close_opts.n,
            "cutoff": close_opts.cutoff,
            "matches": found,
        }));
    }

    status(!found.is_empty())
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

/// Main CLI entry point. Parses arguments via clap, dispatches commands.
pub fn run() -> ! {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .format_timestamp(None)
        .format_target(false)
        .init();

    // clap exits with status 2 on usage errors, matching EXIT_TROUBLE.
    let cli = Cli::parse();
    let opts = resolve_options(cli);

    let exit_code = match opts.command {
        Command::Unified | Command::Context => cmd_format(&opts),
        Command::Ndiff => cmd_ndiff(&opts),
        Command::SideBySide => cmd_side_by_side(&opts),
        Command::Ratio => cmd_ratio(&opts),
        Command::Close => cmd_close(&opts),
    };

    process::exit(exit_code);
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_opts(args: &[&str]) -> Options {
        let argv: Vec<String> = std::iter::once("seqdiff".to_string())
            .chain(args.iter().map(|s| s.to_string()))
            .collect();
        let cli = Cli::try_parse_from(argv).expect("cli parse failed");
        resolve_options(cli)
    }

    fn numbered(number: usize, text: &str) -> SideLine {
        SideLine {
            number: Some(number),
            text: text.to_string(),
        }
    }

    #[test]
    fn unified_subcommand_maps_correctly() {
        let opts = parse_opts(&[
            "unified",
            "--context",
            "5",
            "--from-label",
            "old",
            "a.txt",
            "b.txt",
        ]);
        assert_eq!(opts.command, Command::Unified);
        assert_eq!(opts.context, Some(5));
        assert_eq!(opts.from_file, PathBuf::from("a.txt"));
        assert_eq!(opts.to_file, PathBuf::from("b.txt"));

        let format_opts = build_format_options(&opts);
        assert_eq!(format_opts.from_file, "old");
        assert_eq!(format_opts.to_file, "b.txt");
        assert_eq!(format_opts.context, 5);
        assert_eq!(format_opts.line_term, "\n");
    }

    #[test]
    fn context_defaults() {
        let opts = parse_opts(&["context", "a", "b"]);
        assert_eq!(opts.command, Command::Context);
        assert_eq!(opts.context, Some(DEFAULT_CONTEXT));
    }

    #[test]
    fn side_by_side_context_is_optional() {
        let full = parse_opts(&["side-by-side", "a", "b"]);
        assert_eq!(full.command, Command::SideBySide);
        assert_eq!(full.context, None);
        assert_eq!(full.width, DEFAULT_COLUMN_WIDTH);

        let windowed = parse_opts(&["side-by-side", "-n", "2", "-w", "20", "a", "b"]);
        assert_eq!(windowed.context, Some(2));
        assert_eq!(windowed.width, 20);
    }

    #[test]
    fn ratio_and_ndiff_flags() {
        let ratio = parse_opts(&["ratio", "--chars", "--no-autojunk", "a", "b"]);
        assert!(ratio.chars);
        assert!(!ratio.autojunk);

        let ndiff = parse_opts(&["ndiff", "--linejunk", "a", "b"]);
        assert_eq!(ndiff.command, Command::Ndiff);
        assert!(ndiff.linejunk);
    }

    #[test]
    fn close_subcommand_maps_correctly() {
        let opts = parse_opts(&["close", "appel", "ape", "apple", "--max", "2", "--cutoff", "0.7"]);
        assert_eq!(opts.command, Command::Close);
        assert_eq!(opts.word, "appel");
        assert_eq!(opts.candidates, vec!["ape", "apple"]);
        let close_opts = build_close_options(&opts);
        assert_eq!(close_opts.n, 2);
        assert_eq!(close_opts.cutoff, 0.7);
    }

    #[test]
    fn global_flags() {
        let opts = parse_opts(&["--json", "--quiet", "ndiff", "a", "b"]);
        assert!(opts.json_output);
        assert!(opts.quiet);
        assert!(!opts.chatty());
    }

    #[test]
    fn verbose_is_capped() {
        let opts = parse_opts(&["-v", "-v", "-v", "ratio", "a", "b"]);
        assert_eq!(opts.verbose, 2);
        assert!(opts.chatty());
    }

    #[test]
    fn quiet_conflicts_with_verbose() {
        let argv = ["seqdiff", "-q", "-v", "ratio", "a", "b"];
        assert!(Cli::try_parse_from(argv).is_err());
    }

    #[test]
    fn missing_inputs_are_rejected() {
        assert!(Cli::try_parse_from(["seqdiff", "unified", "a"]).is_err());
        assert!(Cli::try_parse_from(["seqdiff"]).is_err());
    }

    #[test]
    fn spans_render_as_brackets() {
        assert_eq!(show_spans("o\0^n\u{1}e\n"), "o[n]e");
        assert_eq!(show_spans("\0-two\n\u{1}"), "[two]");
        assert_eq!(show_spans("a\tb\r\n"), "a b");
    }

    #[test]
    fn row_gutters() {
        let same = LinePair {
            from: numbered(1, "x\n"),
            to: numbered(1, "x\n"),
            changed: false,
        };
        assert_eq!(render_row(&same, 3), format!("    1 x{}1 x\n", " ".repeat(9)));

        let deleted = LinePair {
            from: numbered(2, "\0-gone\n\u{1}"),
            to: SideLine::blank(),
            changed: true,
        };
        assert_eq!(render_row(&deleted, 6), "    2 [gone] <\n");

        let inserted = LinePair {
            from: SideLine::blank(),
            to: numbered(3, "\0+new\n\u{1}"),
            changed: true,
        };
        assert!(render_row(&inserted, 5).contains(" > "));
    }

    #[test]
    fn fuzz_entry_tolerates_garbage() {
        fuzz_try_parse_args(&["--bogus".to_string()]);
        fuzz_try_parse_args(&["close".to_string(), "w".to_string()]);
    }
}
