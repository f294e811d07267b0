use std::env;
use std::path::Path;
use std::process;
use std::time::Duration;

use serde::Serialize;

use chords::playback::{AudioSupport, HeadlessHandle, VirtualTimer};
use chords::{Chord, ChordContext, NoteOptions, Spelling};

const USAGE: &str = "Usage: chords <root> <chord-type> [--invert N] [--octave N] [--interval MS] [--config FILE] [--json] [--play]
       chords --list [--config FILE]";

/// Length given to every headless sample in a dry run
const DRY_RUN_SAMPLE_LENGTH: Duration = Duration::from_secs(2);

#[derive(Default)]
struct Args {
    list: bool,
    json: bool,
    play: bool,
    config: Option<String>,
    invert: usize,
    octave: Option<u8>,
    interval: Option<u64>,
    positional: Vec<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct NotesReport<'a> {
    chord: &'a Chord,
    root: String,
    display_name: String,
    invert: usize,
    notes: Vec<&'static str>,
    formatted: String,
}

fn fail(message: &str) -> ! {
    eprintln!("{}", message);
    process::exit(1);
}

fn parse_number<T: std::str::FromStr>(flag: &str, value: Option<&String>) -> T {
    let value = match value {
        Some(value) => value,
        None => fail(&format!("Missing value for {}\n{}", flag, USAGE)),
    };
    match value.parse() {
        Ok(number) => number,
        Err(_) => fail(&format!("Invalid value for {}: {}", flag, value)),
    }
}

fn parse_args(raw: &[String]) -> Args {
    let mut args = Args::default();
    let mut iter = raw.iter();

    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--list" => args.list = true,
            "--json" => args.json = true,
            "--play" => args.play = true,
            "--invert" => args.invert = parse_number("--invert", iter.next()),
            "--octave" => args.octave = Some(parse_number("--octave", iter.next())),
            "--interval" => args.interval = Some(parse_number("--interval", iter.next())),
            "--config" => match iter.next() {
                Some(path) => args.config = Some(path.clone()),
                None => fail(&format!("Missing value for --config\n{}", USAGE)),
            },
            flag if flag.starts_with("--") => fail(&format!("Unknown option: {}\n{}", flag, USAGE)),
            _ => args.positional.push(arg.clone()),
        }
    }

    args
}

fn main() {
    let raw: Vec<String> = env::args().skip(1).collect();

    if raw.is_empty() {
        fail(USAGE);
    }

    let args = parse_args(&raw);

    let ctx = match &args.config {
        Some(path) => match ChordContext::load(Path::new(path)) {
            Ok(ctx) => ctx,
            Err(e) => fail(&format!("Error: {}", e)),
        },
        None => ChordContext::new(),
    };

    if args.list {
        list(&ctx);
        return;
    }

    if args.positional.len() != 2 {
        fail(USAGE);
    }
    let root = &args.positional[0];
    let chord = match ctx.chord(&args.positional[1]) {
        Ok(chord) => chord,
        Err(e) => fail(&format!("Error: {}", e)),
    };

    if args.play {
        dry_run(&ctx, chord, root, &args);
    } else {
        print_notes(chord, root, &args);
    }
}

fn list(ctx: &ChordContext) {
    for chord in ctx.registry().iter() {
        let intervals: Vec<String> = chord.intervals().iter().map(|i| i.to_string()).collect();
        println!(
            "{:<10} {:<16} {:<8} {}",
            chord.id(),
            intervals.join(" "),
            chord.short_name(),
            chord.long_name()
        );
    }
}

fn print_notes(chord: &Chord, root: &str, args: &Args) {
    let options = NoteOptions::inverted(args.invert);

    let notes = match chord.note_names(root, options) {
        Ok(notes) => notes,
        Err(e) => fail(&format!("Error: {}", e)),
    };
    let formatted = notes.join(", ").to_uppercase();

    if !args.json {
        println!("{}", formatted);
        return;
    }

    let display_name = match chord.display_name(root, Spelling::Sharp) {
        Ok(name) => name,
        Err(e) => fail(&format!("Error: {}", e)),
    };
    let report = NotesReport {
        chord,
        root: root.to_lowercase(),
        display_name,
        invert: args.invert,
        notes,
        formatted,
    };
    match serde_json::to_string_pretty(&report) {
        Ok(json) => println!("{}", json),
        Err(e) => fail(&format!("Error serializing report: {}", e)),
    }
}

/// Schedule the chord on silent samples and run the virtual clock to the end.
fn dry_run(ctx: &ChordContext, chord: &Chord, root: &str, args: &Args) {
    let mut options = ctx.playback_options().with_invert(args.invert);
    if let Some(octave) = args.octave {
        options = options.with_octave(octave);
    }
    if let Some(interval) = args.interval {
        options = options.with_time_interval(Duration::from_millis(interval));
    }

    let library = match ctx.load_samples(AudioSupport::all(), |_, _| {
        HeadlessHandle::new(DRY_RUN_SAMPLE_LENGTH)
    }) {
        Ok(library) => library,
        Err(e) => fail(&format!("Error: {}", e)),
    };
    let mut scheduler = ctx.scheduler(library, VirtualTimer::new());

    let plan = match scheduler.play(chord, root, &options) {
        Ok(plan) => plan,
        Err(e) => fail(&format!("Error: {}", e)),
    };

    let mut started = 0;
    while let Some(due) = scheduler.timer().next_due() {
        let step = due.saturating_sub(scheduler.timer().now());
        started += scheduler.advance(step);
    }

    if args.json {
        match serde_json::to_string_pretty(&plan) {
            Ok(json) => println!("{}", json),
            Err(e) => fail(&format!("Error serializing schedule: {}", e)),
        }
        return;
    }

    for note in &plan.notes {
        let path = scheduler
            .provider()
            .path(&note.key)
            .map(|path| path.display().to_string())
            .unwrap_or_default();
        println!("+{:>4}ms  {:<4} {}", note.offset_ms, note.key.to_string(), path);
    }
    for key in &plan.skipped {
        println!("  skipped {} (no sample)", key);
    }
    eprintln!("{} of {} notes started", started, plan.notes.len() + plan.skipped.len());
}
