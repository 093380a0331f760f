//! Fixed-format RIFF/WAV reader (the `SampleSource` external collaborator
//! from spec §6). Reads the 44-byte header field-by-field with
//! `byteorder`, validates the single combined format check from the
//! original (`wavfile.go`), and returns only the left channel's samples.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use byteorder::{LittleEndian, ReadBytesExt};

use crate::error::{CliError, Result};

/// Samples for one channel of a decoded WAV file, plus the sample rate the
/// format check guarantees (always 44100 here, kept for clarity at call
/// sites rather than a bare magic number).
pub struct WavAudio {
    pub left: Vec<i16>,
    pub sample_rate: u32,
}

fn read_sig<R: Read>(reader: &mut R) -> std::io::Result<[u8; 4]> {
    let mut sig = [0u8; 4];
    reader.read_exact(&mut sig)?;
    Ok(sig)
}

/// Reads and validates the 44-byte RIFF header, then the interleaved L/R
/// sample data that follows it. Any header mismatch against "RIFF, PCM tag
/// 1, 2 channels, 44100 Hz, 16 bits per sample" is reported as a single
/// combined error, exactly as `wavfile.go` does.
pub fn read_wav_file(path: &Path) -> Result<WavAudio> {
    let mut file = File::open(path)?;

    let sig = read_sig(&mut file)?;
    let _riff_size = file.read_u32::<LittleEndian>()?;
    let _wave_sig = read_sig(&mut file)?;
    let _fmt_sig = read_sig(&mut file)?;
    let _fmt_size = file.read_u32::<LittleEndian>()?;
    let tag = file.read_u16::<LittleEndian>()?;
    let channels = file.read_u16::<LittleEndian>()?;
    let freq = file.read_u32::<LittleEndian>()?;
    let _bytes_per_sec = file.read_u32::<LittleEndian>()?;
    let _bytes_per_sample = file.read_u16::<LittleEndian>()?;
    let bits_per_sample = file.read_u16::<LittleEndian>()?;
    let _data_sig = read_sig(&mut file)?;
    let data_len = file.read_u32::<LittleEndian>()?;

    if &sig != b"RIFF" || tag != 1 || channels != 2 || freq != 44100 || bits_per_sample != 16 {
        return Err(CliError::UnsupportedWav);
    }

    let samples_to_read = data_len / 4;
    let mut left = Vec::with_capacity(samples_to_read as usize);
    let mut data = vec![0u8; data_len as usize];
    file.read_exact(&mut data)?;

    for chunk in data.chunks_exact(4) {
        left.push(i16::from_le_bytes([chunk[0], chunk[1]]));
    }

    log::debug!(
        "read {} samples ({} seconds) from {}",
        left.len(),
        left.len() as u32 / 44100,
        path.display()
    );

    Ok(WavAudio { left, sample_rate: freq })
}
