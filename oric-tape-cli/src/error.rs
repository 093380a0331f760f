use thiserror::Error;

/// Fatal errors from the CLI's external collaborators (WAV reading, process
/// setup). Everything the decoding pipeline itself can go wrong recovers
/// in place instead (see `oric_tape_core::Error`); this type is the §7.1
/// "Fatal (abort)" class.
#[derive(Error, Debug)]
pub enum CliError {
    #[error("Only 44.1khz 16 bit stereo wav files supported")]
    UnsupportedWav,
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, CliError>;
