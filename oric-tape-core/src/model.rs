//! Plain-record data model. Every entity below is a value type; ownership of
//! each vector lies with its [`Program`]. Layer-to-layer linkage is by
//! inclusive index range, never by back-reference (see [`crate::provenance`]).

/// One decoded bit, produced by [`crate::bits::BitExtractor`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bit {
    /// `0` or `1`.
    pub value: u8,
    /// Sample count of the low half-cycle that produced this bit.
    pub l1: i32,
    /// Sample count of the high half-cycle that produced this bit.
    pub l2: i32,
    /// Inclusive sample range, in the same coordinate space as the owning
    /// stream's `first_sample`/`last_sample`.
    pub first_sample: usize,
    pub last_sample: usize,
    /// Set when classification fell through to the tie-breaking heuristic.
    pub unclear: bool,
}

/// A contiguous run of bits extracted between two "no signal" gaps.
#[derive(Debug, Clone)]
pub struct BitStream {
    /// Bounds within the original sample sequence.
    pub first_sample: usize,
    pub last_sample: usize,
    /// The samples spanning `[first_sample, last_sample]`, owned by value
    /// (the UI needs them for waveform rendering; see the crate's
    /// concurrency notes).
    pub samples: Vec<i16>,
    /// Observed signal extremes across the stream.
    pub min_val: i16,
    pub max_val: i16,
    pub bits: Vec<Bit>,
}

impl BitStream {
    /// Sample value at an absolute index within `[first_sample, last_sample]`.
    pub fn sample_at(&self, absolute_index: usize) -> i16 {
        self.samples[absolute_index - self.first_sample]
    }
}

/// One assembled byte, produced by [`crate::bytes::ByteAssembler`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Byte {
    pub value: u8,
    /// Inclusive bit-index range into the owning stream's `bits`.
    pub first_bit: usize,
    pub last_bit: usize,
    /// OR of `unclear` across this byte's 8 data bits.
    pub unclear: bool,
    /// Set when the decoded parity bit equals the low bit of the running
    /// data-bit sum. See [`crate::bytes`] module docs for why this is the
    /// predicate, not its negation.
    pub chk_err: bool,
}

/// One decoded BASIC program line, produced by [`crate::program::ProgramParser`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    /// Concatenation of `elements`.
    pub text: String,
    /// The line-number-with-trailing-space element, then one entry per
    /// literal character or expanded keyword.
    pub elements: Vec<String>,
    /// Inclusive byte-index range into the program's `bytes`.
    pub first_byte: usize,
    pub last_byte: usize,
    /// Byte index the preceding next-line pointer implied this line should
    /// end at.
    pub expected_last_byte: usize,
    pub len_err: bool,
}

/// One decoded BASIC tape file.
#[derive(Debug, Clone)]
pub struct Program {
    pub name: String,
    pub stream: BitStream,
    pub bytes: Vec<Byte>,
    pub lines: Vec<Line>,
}

/// Ordered sequence of decoded programs. Indexing is stable for the model's
/// lifetime.
#[derive(Debug, Clone, Default)]
pub struct Model {
    /// Number of [`BitStream`]s [`crate::bits::BitExtractor`] segmented out
    /// of the sample buffer, before any were dropped for never acquiring
    /// byte sync. Kept distinct from `programs.len()` so the CLI summary can
    /// report the two figures `orictape.go`'s `main` reports separately
    /// ("Read N streams" / "Read N programs"): a capture can segment several
    /// streams (leader noise, extra silence gaps) that never decode into a
    /// program.
    pub stream_count: usize,
    pub programs: Vec<Program>,
}

impl Model {
    pub fn new(stream_count: usize, programs: Vec<Program>) -> Self {
        Model { stream_count, programs }
    }
}
