//! `oric-tape`: reconstructs an Oric BASIC tape program from a WAV capture
//! and audits the decode in a terminal UI. Owns everything the core
//! decoding pipeline (`oric_tape_core`) declares out of scope: the WAV
//! reader, argument parsing, logging setup, the textual summary, and the
//! ratatui UI (see `SPEC_FULL.md` §0, §10-14).

mod error;
mod summary;
mod ui;
mod wav;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use log::LevelFilter;

/// Reconstructs an Oric BASIC tape program from a 44.1kHz/16-bit/stereo
/// WAV capture.
#[derive(Parser, Debug)]
#[command(name = "oric-tape", version, about)]
struct Cli {
    /// Path to the WAV file to decode.
    wav_path: PathBuf,

    /// Print the summary and exit without entering the terminal UI.
    #[arg(long)]
    no_ui: bool,

    /// Raise the log level (-v for debug, -vv for trace).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => LevelFilter::Info,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_env("ORICTAPE_LOG")
        .init();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{err}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    let audio = wav::read_wav_file(&cli.wav_path)?;
    summary::print_audio_found(audio.left.len(), audio.sample_rate);

    let model = oric_tape_core::decode(&audio.left);
    summary::print_summary(&model);

    if !cli.no_ui {
        ui::run(&model)?;
    }

    Ok(())
}
