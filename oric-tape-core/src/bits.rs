//! Zero-crossing cycle segmentation: turns a sample sequence into one or
//! more [`BitStream`]s. See the module-level algorithm notes below; the
//! exact cycle-detection math is load-bearing and must not be "cleaned up"
//! (see the crate root docs on preserved quirks).

use crate::model::{Bit, BitStream};

const SHORT: i32 = 20;
const LONG: i32 = 24;
const NO_SIGNAL: i32 = 46;

/// Cap on the number of bits a single stream-search attempt will accumulate
/// before the outer retry loop gives up resetting and accepts what it has.
/// 8820 samples is 0.2s at 44.1kHz.
const BIT_CAP: usize = 8820;

/// Cycle-by-cycle result of [`CycleScanner::step`].
enum CycleStep {
    Bit(Bit),
    NoSignal,
}

/// Rolling state for one cycle (min -> max -> min) of the tape waveform.
/// Re-architected from the original's closure-captured locals into a small
/// struct with a single `step` method, per this crate's usual pattern for
/// stateful readers (see [`crate::bytes::ByteAssembler`]).
struct CycleScanner {
    max_index: usize,
    above_index: usize,
    /// Carried across cycles: the crossover threshold for the "below" half
    /// of a cycle is computed from the *previous* cycle's max, not this
    /// cycle's. This is intentional, not a bug, and must be preserved.
    max_val: i32,
}

impl CycleScanner {
    fn new(start: usize) -> Self {
        CycleScanner { max_index: start, above_index: start, max_val: 0 }
    }

    /// Window of up to 20 samples, clamped to end-of-input.
    fn window(samples: &[i16], after: usize) -> &[i16] {
        let end = (after + 1 + 20).min(samples.len());
        let start = (after + 1).min(samples.len());
        &samples[start..end]
    }

    fn step(&mut self, samples: &[i16]) -> CycleStep {
        let prev_above_index = self.above_index;

        // 1. Find the minimum in the window just after the previous max.
        let window1 = Self::window(samples, self.max_index);
        let mut min_val = i32::MAX;
        let mut min_off = 0usize;
        for (i, &v) in window1.iter().enumerate() {
            let v = v as i32;
            if v < min_val {
                min_val = v;
                min_off = i;
            }
        }
        if window1.is_empty() {
            // Degenerate window at the very end of input: nothing left to
            // classify as a cycle. Force the outer scan to stop retrying.
            self.max_index = samples.len();
            return CycleStep::NoSignal;
        }
        let min_index = self.max_index + 1 + min_off;

        // 2. Recompute the threshold with the *old* max and the new min,
        // and find the first sample at-or-below it in the SAME window.
        let threshold = (self.max_val + min_val) / 2;
        let mut below_off = min_off;
        for (i, &v) in window1.iter().enumerate() {
            if (v as i32) <= threshold {
                below_off = i;
                break;
            }
        }
        let below_index = self.max_index + 1 + below_off;
        let length_below = (below_index - self.above_index) as i32;

        // 3. Find the maximum in the window just after the new min.
        let window2 = Self::window(samples, min_index);
        let mut max_val = i32::MIN;
        let mut max_off = 0usize;
        for (i, &v) in window2.iter().enumerate() {
            let v = v as i32;
            if v > max_val {
                max_val = v;
                max_off = i;
            }
        }
        if window2.is_empty() {
            self.max_index = samples.len();
            return CycleStep::NoSignal;
        }
        let max_index = min_index + 1 + max_off;

        // 4. Recompute the threshold with the new max/min, find the first
        // sample at-or-above it in the SAME window.
        let threshold = (max_val + min_val) / 2;
        let mut above_off = max_off;
        for (i, &v) in window2.iter().enumerate() {
            if (v as i32) >= threshold {
                above_off = i;
                break;
            }
        }
        let above_index = min_index + 1 + above_off;
        let length_above = (above_index - below_index) as i32;

        self.max_index = max_index;
        self.max_val = max_val;
        self.above_index = above_index;

        let length = length_below + length_above;
        if length > NO_SIGNAL {
            return CycleStep::NoSignal;
        }

        let (value, unclear) = if length >= LONG {
            (0, false)
        } else if length <= SHORT {
            (1, false)
        } else if (length_below - length_above).abs() <= (LONG - SHORT) / 2 {
            (0, true)
        } else {
            (1, true)
        };

        CycleStep::Bit(Bit {
            value,
            l1: length_below,
            l2: length_above,
            first_sample: prev_above_index,
            last_sample: above_index - 1,
            unclear,
        })
    }
}

/// Segments samples into bit streams and frames; see [`crate::bits`] module
/// docs for the exact cycle-detection algorithm.
pub struct BitExtractor;

impl BitExtractor {
    /// Extracts one [`BitStream`] starting at `start`, and the number of
    /// samples consumed. Returns `None`/`0` once no further stream can be
    /// produced (no progress was possible from `start`).
    ///
    /// The outer retry loop re-initializes and discards accumulated bits on
    /// every clean no-signal termination, advancing `start` past the
    /// discarded run, until either the buffer has grown to at least
    /// [`BIT_CAP`] bits or the input is exhausted. Short, "uninteresting"
    /// runs between two gaps are silently skipped this way; see the crate
    /// root docs.
    pub fn extract_one(samples: &[i16], start: usize) -> (Option<BitStream>, usize) {
        let len = samples.len();
        let mut scanner = CycleScanner::new(start);
        let mut bits: Vec<Bit> = Vec::new();
        let mut first_sample = start;
        let mut min_val = i16::MAX;
        let mut max_val = i16::MIN;

        while scanner.max_index < len && bits.len() < BIT_CAP {
            bits.clear();
            first_sample = scanner.above_index;
            min_val = i16::MAX;
            max_val = i16::MIN;

            while scanner.max_index < len {
                match scanner.step(samples) {
                    CycleStep::NoSignal => break,
                    CycleStep::Bit(bit) => {
                        for i in bit.first_sample..=bit.last_sample {
                            let v = samples[i];
                            if v < min_val {
                                min_val = v;
                            }
                            if v > max_val {
                                max_val = v;
                            }
                        }
                        bits.push(bit);
                    }
                }
            }
        }

        let last_sample = scanner.above_index;
        let samples_read = last_sample - start;
        if samples_read == 0 {
            return (None, 0);
        }

        log::debug!(
            "extracted bit stream [{first_sample}, {last_sample}], {} bits",
            bits.len()
        );

        let stream_samples = samples[first_sample..last_sample.min(len)].to_vec();
        if min_val > max_val {
            // No cycle was ever classified (an all-flat or empty run).
            min_val = 0;
            max_val = 0;
        }

        (
            Some(BitStream {
                first_sample,
                last_sample,
                samples: stream_samples,
                min_val,
                max_val,
                bits,
            }),
            samples_read,
        )
    }

    /// Repeatedly calls [`Self::extract_one`] until no further samples are
    /// consumed, producing an ordered list of streams.
    pub fn extract_all(samples: &[i16]) -> Vec<BitStream> {
        let mut streams = Vec::new();
        let mut start = 0usize;
        loop {
            let (stream, consumed) = Self::extract_one(samples, start);
            match stream {
                Some(s) if consumed > 0 => {
                    streams.push(s);
                    start += consumed;
                }
                _ => break,
            }
        }
        streams
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Builds a synthetic sample buffer made of cycles of the given period
    /// (in samples), alternating a clean sine-ish min/max/min shape so the
    /// extractor's threshold crossings are unambiguous.
    fn cycles(periods: &[i32]) -> Vec<i16> {
        let mut samples = vec![0i16; 2];
        for &period in periods {
            let half = period / 2;
            for i in 0..half {
                samples.push(-1000 + (2000 * i / half) as i16);
            }
            for i in 0..(period - half) {
                samples.push(1000 - (2000 * i / (period - half)) as i16);
            }
        }
        // Trailing silence so the stream terminates cleanly with a
        // no-signal gap, rather than running off the end of input.
        samples.extend(std::iter::repeat(0i16).take(200));
        samples
    }

    #[test]
    fn short_cycles_are_ones() {
        let samples = cycles(&[20; 40]);
        let (stream, consumed) = BitExtractor::extract_one(&samples, 0);
        assert!(consumed > 0);
        let stream = stream.unwrap();
        assert!(stream.bits.len() >= 12);
        // Skip the first couple of cycles: the scanner's threshold is seeded
        // with max_val = 0, so the very first classification can be skewed
        // before it settles.
        for bit in stream.bits.iter().skip(2).take(10) {
            assert_eq!(bit.value, 1);
            assert!(!bit.unclear);
        }
    }

    #[test]
    fn long_cycles_are_zeros() {
        let samples = cycles(&[24; 40]);
        let (stream, _) = BitExtractor::extract_one(&samples, 0);
        let stream = stream.unwrap();
        for bit in stream.bits.iter().skip(2).take(10) {
            assert_eq!(bit.value, 0);
            assert!(!bit.unclear);
        }
    }

    #[test]
    fn empty_input_yields_no_streams() {
        let samples: Vec<i16> = Vec::new();
        let streams = BitExtractor::extract_all(&samples);
        assert!(streams.is_empty());
    }

    #[test]
    fn too_short_to_form_a_cycle_yields_nothing() {
        let samples = vec![0i16; 1];
        let (stream, consumed) = BitExtractor::extract_one(&samples, 0);
        assert!(stream.is_none());
        assert_eq!(consumed, 0);
    }
}
