//! End-to-end test: synthesizes a raw sample buffer encoding a small tape
//! capture (bit-sync, byte-sync, header, and one program line) and runs it
//! through the full [`oric_tape_core::decode`] pipeline.

use oric_tape_core::decode;

/// Turns a sequence of logical bit values into a raw sample buffer: each `1`
/// becomes a short (20-sample) min-max-min cycle, each `0` a long
/// (24-sample) one, matching the encoding [`oric_tape_core::bits`] expects.
fn waveform_of(bits: &[u8]) -> Vec<i16> {
    let mut samples = vec![0i16; 2];
    for &bit in bits {
        let period = if bit == 1 { 20 } else { 24 };
        let half = period / 2;
        for i in 0..half {
            samples.push(-1000 + (2000 * i / half) as i16);
        }
        for i in 0..(period - half) {
            samples.push(1000 - (2000 * i / (period - half)) as i16);
        }
    }
    samples.extend(std::iter::repeat(0i16).take(400));
    samples
}

/// LSB-first bits for one framed byte: a start bit, a one-run of `ones`
/// terminated by 0, the 8 data bits of `value`, then a parity bit chosen so
/// `chk_err` comes out false under the as-shipped predicate
/// (`parity == sum & 1`, so parity must DISAGREE with the sum's low bit to
/// read as clean).
fn framed_byte(value: u8) -> Vec<u8> {
    let mut bits = vec![1u8, 1, 0]; // start, one-run of length 1, terminator
    let sum: u32 = (0..8).map(|i| ((value >> i) & 1) as u32).sum();
    for i in 0..8 {
        bits.push((value >> i) & 1);
    }
    bits.push((sum as u8 & 1) ^ 1);
    bits
}

fn sync_bits() -> Vec<u8> {
    (0..8).map(|i| (0x16u8 >> i) & 1).collect()
}

/// A handful of throwaway short cycles so the cycle scanner's threshold has
/// settled (see the skip-first-two-cycles note in the bits module tests)
/// before the bits that matter begin.
fn settling_bits() -> Vec<u8> {
    vec![1u8; 4]
}

#[test]
fn decodes_a_minimal_single_line_program_end_to_end() {
    let mut bits = settling_bits();
    bits.extend(sync_bits());

    let mut bytes: Vec<u8> = vec![0x16, 0x16, 0x16, 0x16, 0x24];
    bytes.extend([0u8, 0, 0, 0, 0, 0, 0, 0, 0]); // 9-byte header, offset 2 = 0
    bytes.extend(b"HI\0");
    // Next-line pointer value is irrelevant here: it's the program's first
    // line, so its len_err/expected_last_byte are always overridden.
    bytes.extend([0x12, 0x00]);
    bytes.extend([10, 0]); // line number 10
    bytes.push(b'A');
    bytes.push(0); // line terminator
    bytes.extend([0x00, 0x00]); // end of program

    for &b in &bytes {
        bits.extend(framed_byte(b));
    }

    let samples = waveform_of(&bits);
    let model = decode(&samples);

    assert_eq!(model.programs.len(), 1);
    let program = &model.programs[0];
    assert_eq!(program.name, "HI");
    assert_eq!(program.lines.len(), 1);
    assert_eq!(program.lines[0].text, "10 A");
    assert!(!program.lines[0].len_err);
    assert!(program.bytes.iter().all(|b| !b.chk_err));
}

#[test]
fn non_basic_header_yields_program_with_no_lines() {
    let mut bits = settling_bits();
    bits.extend(sync_bits());

    let mut bytes: Vec<u8> = vec![0x16, 0x16, 0x16, 0x16, 0x24];
    bytes.extend([0u8, 0, 0x01, 0, 0, 0, 0, 0, 0]); // offset 2 = 1: not BASIC
    bytes.extend(b"BIN\0");

    for &b in &bytes {
        bits.extend(framed_byte(b));
    }

    let samples = waveform_of(&bits);
    let model = decode(&samples);

    assert_eq!(model.programs.len(), 1);
    assert!(model.programs[0].lines.is_empty());
}
