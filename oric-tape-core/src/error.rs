use thiserror::Error;

/// Errors raised by [`crate::ProvenanceModel`] query methods.
///
/// The three decoding stages (`BitExtractor`, `ByteAssembler`, `ProgramParser`)
/// never return `Err`: a sync pattern that is never found, a stream that ends
/// mid-byte, or a non-BASIC header all recover by producing an empty or
/// partial result (see the module docs on each stage). This type exists only
/// for queries that are handed an index out of range of the model they are
/// querying.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    #[error("program index {0} out of range")]
    ProgramOutOfRange(usize),
    #[error("byte index {0} out of range for program with {1} bytes")]
    ByteOutOfRange(usize, usize),
    #[error("bit index {0} out of range for stream with {1} bits")]
    BitOutOfRange(usize, usize),
    #[error("line index {0} out of range for program with {1} lines")]
    LineOutOfRange(usize, usize),
}

pub type Result<T> = std::result::Result<T, Error>;
