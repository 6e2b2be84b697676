use std::{
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use clap::{Parser, Subcommand};

use versesync::{CueSheet, CueTable};

#[derive(Parser, Debug)]
#[command(name = "versesync", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Parse and validate a cue sheet.
    Validate(ValidateArgs),
    /// Print the active lyric and images at a given time as JSON.
    At(AtArgs),
    /// Walk the timeline and print every cue transition.
    Simulate(SimulateArgs),
}

#[derive(Parser, Debug)]
struct ValidateArgs {
    /// Input cue sheet JSON.
    #[arg(long = "in")]
    in_path: PathBuf,
}

#[derive(Parser, Debug)]
struct AtArgs {
    /// Input cue sheet JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Timeline position in seconds.
    #[arg(long)]
    time: f64,
}

#[derive(Parser, Debug)]
struct SimulateArgs {
    /// Input cue sheet JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Stop time in seconds (default: end of the last cue).
    #[arg(long)]
    until: Option<f64>,

    /// Step in seconds.
    #[arg(long, default_value_t = 0.5)]
    step: f64,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    match cli.cmd {
        Command::Validate(args) => cmd_validate(args),
        Command::At(args) => cmd_at(args),
        Command::Simulate(args) => cmd_simulate(args),
    }
}

fn read_sheet(path: &Path) -> anyhow::Result<CueSheet> {
    let f = File::open(path).with_context(|| format!("open cue sheet '{}'", path.display()))?;
    let r = BufReader::new(f);
    let sheet: CueSheet = serde_json::from_reader(r).with_context(|| "parse cue sheet JSON")?;
    Ok(sheet)
}

fn cmd_validate(args: ValidateArgs) -> anyhow::Result<()> {
    let sheet = read_sheet(&args.in_path)?;
    let table = CueTable::compile(&sheet)?;
    eprintln!(
        "ok: {} templates, {} lyric cues, {} image cues, ends at {:.1}s",
        sheet.templates.len(),
        table.lyrics().len(),
        table.images().len(),
        table.end_secs()
    );
    Ok(())
}

fn cmd_at(args: AtArgs) -> anyhow::Result<()> {
    let sheet = read_sheet(&args.in_path)?;
    let table = CueTable::compile(&sheet)?;

    let out = serde_json::json!({
        "time_secs": args.time,
        "lyric": table.lyric_at(args.time),
        "images": table.images_at(args.time),
    });
    println!("{}", serde_json::to_string_pretty(&out)?);
    Ok(())
}

fn cmd_simulate(args: SimulateArgs) -> anyhow::Result<()> {
    anyhow::ensure!(args.step > 0.0, "--step must be > 0");

    let sheet = read_sheet(&args.in_path)?;
    let table = CueTable::compile(&sheet)?;
    let until = args.until.unwrap_or_else(|| table.end_secs());

    let mut last_lyric: Option<usize> = None;
    let mut active_images: Vec<usize> = Vec::new();

    let mut t = 0.0;
    while t <= until {
        let lyric = table.lyric_at(t);
        let lyric_id = lyric.map(|c| c.id);
        if lyric_id != last_lyric {
            if let Some(cue) = lyric {
                println!("{t:>7.1}s  lyric #{}: {:?}", cue.id, cue.text);
            }
            last_lyric = lyric_id;
        }

        let now_active: Vec<usize> = table.images_at(t).iter().map(|c| c.id).collect();
        for cue in table.images_at(t) {
            if !active_images.contains(&cue.id) {
                println!("{t:>7.1}s  image #{} enters: {}", cue.id, cue.image);
            }
        }
        for id in &active_images {
            if !now_active.contains(id) {
                println!("{t:>7.1}s  image #{id} leaves");
            }
        }
        active_images = now_active;

        t += args.step;
    }

    Ok(())
}
