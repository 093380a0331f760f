//! Read-only cross-layer query surface over a decoded [`Model`].
//!
//! Every entity links to its neighbors through inclusive index ranges, not
//! owning back-references (see [`crate::model`]), so walking "what sample
//! range backs this byte" or "what line owns this bit" means following those
//! ranges through the intermediate layers. This module centralizes that
//! walk instead of leaving callers to reimplement it.

use crate::error::{Error, Result};
use crate::model::{Bit, Byte, Line, Model};

/// Borrows a [`Model`] and answers range/parent queries across its layers.
pub struct ProvenanceModel<'a> {
    model: &'a Model,
}

impl<'a> ProvenanceModel<'a> {
    pub fn new(model: &'a Model) -> Self {
        ProvenanceModel { model }
    }

    fn program(&self, program: usize) -> Result<&'a crate::model::Program> {
        self.model
            .programs
            .get(program)
            .ok_or(Error::ProgramOutOfRange(program))
    }

    fn byte(&self, program: usize, byte: usize) -> Result<&'a Byte> {
        let p = self.program(program)?;
        p.bytes
            .get(byte)
            .ok_or(Error::ByteOutOfRange(byte, p.bytes.len()))
    }

    fn bit(&self, program: usize, bit: usize) -> Result<&'a Bit> {
        let p = self.program(program)?;
        p.stream
            .bits
            .get(bit)
            .ok_or(Error::BitOutOfRange(bit, p.stream.bits.len()))
    }

    fn line(&self, program: usize, line: usize) -> Result<&'a Line> {
        let p = self.program(program)?;
        p.lines
            .get(line)
            .ok_or(Error::LineOutOfRange(line, p.lines.len()))
    }

    /// A byte's `[first_bit, last_bit]` range.
    pub fn byte_bit_range(&self, program: usize, byte: usize) -> Result<(usize, usize)> {
        let b = self.byte(program, byte)?;
        Ok((b.first_bit, b.last_bit))
    }

    /// A byte's sample range, spanning its first bit's first sample through
    /// its last bit's last sample.
    pub fn byte_sample_range(&self, program: usize, byte: usize) -> Result<(usize, usize)> {
        let b = self.byte(program, byte)?;
        let first = self.bit(program, b.first_bit)?;
        let last = self.bit(program, b.last_bit)?;
        Ok((first.first_sample, last.last_sample))
    }

    /// A line's `[first_byte, last_byte]` range.
    pub fn line_byte_range(&self, program: usize, line: usize) -> Result<(usize, usize)> {
        let l = self.line(program, line)?;
        Ok((l.first_byte, l.last_byte))
    }

    /// A line's bit range, derived through its byte range.
    pub fn line_bit_range(&self, program: usize, line: usize) -> Result<(usize, usize)> {
        let (first_byte, last_byte) = self.line_byte_range(program, line)?;
        let first = self.byte(program, first_byte)?;
        let last = self.byte(program, last_byte)?;
        Ok((first.first_bit, last.last_bit))
    }

    /// A line's sample range, derived through its byte and bit ranges.
    pub fn line_sample_range(&self, program: usize, line: usize) -> Result<(usize, usize)> {
        let (first_byte, last_byte) = self.line_byte_range(program, line)?;
        let (start, _) = self.byte_sample_range(program, first_byte)?;
        let (_, end) = self.byte_sample_range(program, last_byte)?;
        Ok((start, end))
    }

    /// A bit's sample range.
    pub fn bit_sample_range(&self, program: usize, bit: usize) -> Result<(usize, usize)> {
        let b = self.bit(program, bit)?;
        Ok((b.first_sample, b.last_sample))
    }

    /// The byte that frames the given bit index, if any byte's
    /// `[first_bit, last_bit]` range contains it.
    pub fn bit_parent_byte(&self, program: usize, bit: usize) -> Result<Option<usize>> {
        let p = self.program(program)?;
        if bit >= p.stream.bits.len() {
            return Err(Error::BitOutOfRange(bit, p.stream.bits.len()));
        }
        Ok(p.bytes
            .iter()
            .position(|b| b.first_bit <= bit && bit <= b.last_bit))
    }

    /// The line whose `[first_byte, last_byte]` range contains the byte that
    /// frames the given bit, if any.
    pub fn bit_parent_line(&self, program: usize, bit: usize) -> Result<Option<usize>> {
        let Some(byte) = self.bit_parent_byte(program, bit)? else {
            return Ok(None);
        };
        let p = self.program(program)?;
        Ok(p.lines
            .iter()
            .position(|l| l.first_byte <= byte && byte <= l.last_byte))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{BitStream, Program};

    fn bit(value: u8, first: usize, last: usize) -> Bit {
        Bit { value, l1: 0, l2: 0, first_sample: first, last_sample: last, unclear: false }
    }

    fn sample_model() -> Model {
        let bits = vec![
            bit(1, 0, 1),
            bit(0, 2, 3),
            bit(1, 4, 5),
            bit(0, 6, 7),
        ];
        let byte = Byte { value: 0xAA, first_bit: 0, last_bit: 3, unclear: false, chk_err: false };
        let line = Line {
            text: "10 A".into(),
            elements: vec!["10 ".into(), "A".into()],
            first_byte: 0,
            last_byte: 0,
            expected_last_byte: 0,
            len_err: false,
        };
        let stream = BitStream {
            first_sample: 0,
            last_sample: 8,
            samples: vec![0; 8],
            min_val: 0,
            max_val: 0,
            bits,
        };
        let program = Program {
            name: "HI".into(),
            stream,
            bytes: vec![byte],
            lines: vec![line],
        };
        Model::new(1, vec![program])
    }

    #[test]
    fn byte_sample_range_spans_its_bits() {
        let model = sample_model();
        let pm = ProvenanceModel::new(&model);
        assert_eq!(pm.byte_sample_range(0, 0).unwrap(), (0, 7));
    }

    #[test]
    fn line_ranges_derive_through_bytes_and_bits() {
        let model = sample_model();
        let pm = ProvenanceModel::new(&model);
        assert_eq!(pm.line_byte_range(0, 0).unwrap(), (0, 0));
        assert_eq!(pm.line_bit_range(0, 0).unwrap(), (0, 3));
        assert_eq!(pm.line_sample_range(0, 0).unwrap(), (0, 7));
    }

    #[test]
    fn bit_parent_lookup_resolves_byte_then_line() {
        let model = sample_model();
        let pm = ProvenanceModel::new(&model);
        assert_eq!(pm.bit_parent_byte(0, 2).unwrap(), Some(0));
        assert_eq!(pm.bit_parent_line(0, 2).unwrap(), Some(0));
    }

    #[test]
    fn out_of_range_program_is_reported() {
        let model = sample_model();
        let pm = ProvenanceModel::new(&model);
        assert_eq!(pm.byte_bit_range(5, 0), Err(Error::ProgramOutOfRange(5)));
    }

    #[test]
    fn out_of_range_bit_is_reported() {
        let model = sample_model();
        let pm = ProvenanceModel::new(&model);
        assert_eq!(pm.bit_sample_range(0, 99), Err(Error::BitOutOfRange(99, 4)));
    }
}
