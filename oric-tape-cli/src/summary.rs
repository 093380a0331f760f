//! Textual summary printed after a successful decode (§6 "CLI"), reusing
//! the original's per-stream/per-program reporting (`orictape.go`'s `main`,
//! `readBitStreams`) and its checksum/unclear hex-grid coloring
//! (`CLR_R`/`CLR_Y` in `orictape.go`), expressed with the `colored` crate
//! rather than hand-rolled ANSI escapes.

use colored::Colorize;
use oric_tape_core::{Model, Program};

/// Prints "Found N seconds of audio (N samples)", matching `wavfile.go`.
pub fn print_audio_found(sample_count: usize, sample_rate: u32) {
    println!(
        "Found {} seconds of audio ({} samples)",
        sample_count as u32 / sample_rate,
        sample_count
    );
}

/// Prints the per-stream and per-program report that `orictape.go`'s `main`
/// prints before entering the UI. The stream and program counts are
/// reported separately (as `readBitStreams`/`readPrograms` do in the
/// original): a stream that never acquires byte sync is dropped by
/// `decode()` before it becomes a `Program`, so `model.stream_count` can be
/// larger than `model.programs.len()`.
pub fn print_summary(model: &Model) {
    println!("Found {} stream(s):", model.stream_count);
    for (i, program) in model.programs.iter().enumerate() {
        let stream = &program.stream;
        println!(
            " {}) Starting at {}s found stream of length {}s",
            i,
            stream.first_sample / 44100,
            (stream.last_sample - stream.first_sample) / 44100
        );
    }

    println!("Found {} program(s)", model.programs.len());
    for program in &model.programs {
        println!("Program: {:?}", program.name);
        print_byte_grid(program);
        println!();

        for line in &program.lines {
            if line.len_err {
                println!("{}", line.text.red());
            } else {
                println!("{}", line.text);
            }
        }
    }

    println!("\n**done**");
}

fn print_byte_grid(program: &Program) {
    for byte in &program.bytes {
        let hex = format!("{:02x}", byte.value);
        if byte.chk_err {
            print!(" {}", hex.red());
        } else if byte.unclear {
            print!(" {}", hex.yellow());
        } else {
            print!(" {hex}");
        }
    }
}
