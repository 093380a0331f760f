//! Decoding pipeline for Oric tape captures.
//!
//! Four stages run strictly forward over an in-memory sample buffer:
//! [`bits::BitExtractor`] segments samples into bit streams, [`bytes::ByteAssembler`]
//! frames each stream's bits into bytes, [`program::ProgramParser`] detokenizes
//! a byte sequence into a program name and line list, and [`provenance::ProvenanceModel`]
//! answers cross-layer range queries over the finished [`model::Model`].
//!
//! # Preserved quirks
//!
//! A handful of behaviors look like bugs on first read and are not:
//!
//! - [`bytes`]: `chk_err` fires when the parity bit **equals** the low bit of
//!   the data-bit sum, not when it disagrees.
//! - [`bits`]: the outer stream-search loop discards its bit buffer and
//!   restarts on every short, uninteresting run; it only finalizes a stream
//!   on a genuine no-signal gap (or hitting the 8820-bit cap).
//! - [`program`]: the first line's declared length seeds `correction_offset`
//!   rather than being checked against it, so `lines[0].len_err` is always
//!   `false` by construction.
//!
//! All three are carried over from the system being reverse-engineered here.
//! Do not "fix" them.

pub mod bits;
pub mod bytes;
pub mod error;
pub mod keywords;
pub mod model;
pub mod program;
pub mod provenance;

pub use error::{Error, Result};
pub use model::{Bit, BitStream, Byte, Line, Model, Program};
pub use provenance::ProvenanceModel;

use bits::BitExtractor;
use bytes::ByteAssembler;
use program::ProgramParser;

/// Runs the full pipeline over a sample buffer: segments bit streams, frames
/// each into bytes, and detokenizes each byte sequence into a program.
///
/// Streams whose byte sequence comes out empty (sync never found) are
/// dropped rather than surfaced as zero-byte programs.
pub fn decode(samples: &[i16]) -> Model {
    let streams = BitExtractor::extract_all(samples);
    log::debug!("segmented {} bit stream(s)", streams.len());
    let stream_count = streams.len();

    let mut programs = Vec::new();
    for stream in streams {
        let bytes = ByteAssembler::assemble(&stream);
        if bytes.is_empty() {
            log::debug!("discarding stream with no framed bytes");
            continue;
        }

        let parsed = ProgramParser::parse(&bytes);
        log::debug!(
            "program {:?}: {} bytes, {} lines",
            parsed.name,
            bytes.len(),
            parsed.lines.len()
        );

        programs.push(Program {
            name: parsed.name,
            stream,
            bytes,
            lines: parsed.lines,
        });
    }

    Model::new(stream_count, programs)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_input_decodes_to_no_programs() {
        let model = decode(&[]);
        assert!(model.programs.is_empty());
    }

    #[test]
    fn flat_silence_alone_decodes_to_no_programs() {
        // An all-zero buffer never reaches a genuine no-signal gap, so the
        // cycle scanner keeps classifying spurious short (value 1) cycles
        // until it runs off the end of the buffer. A bit stream of all 1s
        // never shifts the sync register to 0x16, so no bytes are ever
        // framed and the stream is discarded.
        let model = decode(&[0i16; 2000]);
        assert!(model.programs.is_empty());
        // The stream itself was still segmented; it just never became a
        // program. `stream_count` must keep that distinction visible.
        assert_eq!(model.stream_count, 1);
    }
}
