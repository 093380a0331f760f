//! Tape-header and tokenized-program parsing over an assembled byte
//! sequence: locates the header sync, consumes the fixed header, reads the
//! program name, then walks the tokenized line list.

use crate::keywords::{render_token, KEYWORDS};
use crate::model::{Byte, Line};

/// Header-sync marker: a run of more than three [`SYNC_RUN_BYTE`] bytes
/// followed by a single [`HEADER_SYNC_BYTE`].
const SYNC_RUN_BYTE: u8 = 0x16;
const HEADER_SYNC_BYTE: u8 = 0x24;
const HEADER_LEN: usize = 9;

/// Sequential cursor over a program's assembled bytes. Re-architected from
/// the original's closure-captured `nextByte` local, in the same style as
/// [`crate::bytes::BitReader`].
struct ByteCursor<'a> {
    bytes: &'a [Byte],
    next: usize,
}

impl<'a> ByteCursor<'a> {
    fn new(bytes: &'a [Byte]) -> Self {
        ByteCursor { bytes, next: 0 }
    }

    fn next_value(&mut self) -> Option<u8> {
        let byte = self.bytes.get(self.next)?;
        self.next += 1;
        Some(byte.value)
    }

    fn position(&self) -> usize {
        self.next
    }
}

/// Parses a program's name and tokenized line list out of its bytes.
pub struct ProgramParser;

/// Outcome of parsing one program: the name (empty if sync/header parsing
/// failed before a name could be read) and the line list (empty if the
/// header rejected the tape as non-BASIC, or if sync was never found).
pub struct ParsedProgram {
    pub name: String,
    pub lines: Vec<Line>,
}

impl ProgramParser {
    pub fn parse(bytes: &[Byte]) -> ParsedProgram {
        let mut cursor = ByteCursor::new(bytes);
        let empty = ParsedProgram { name: String::new(), lines: Vec::new() };

        if !Self::find_sync(&mut cursor) {
            log::debug!("header sync not found in {} bytes", bytes.len());
            return empty;
        }
        log::debug!("header sync acquired at byte {}", cursor.position());

        let mut header = [0u8; HEADER_LEN];
        for slot in header.iter_mut() {
            let Some(b) = cursor.next_value() else { return empty };
            *slot = b;
        }
        if header[2] != 0x00 {
            log::debug!("header byte[2] = {:#04x}, not a BASIC tape", header[2]);
            return empty;
        }

        let Some(name) = Self::read_name(&mut cursor) else {
            return ParsedProgram { name: String::new(), lines: Vec::new() };
        };

        let mut lines = Self::read_lines(&mut cursor);
        if let Some(first) = lines.first_mut() {
            // The first line's declared length seeds `correction_offset`
            // rather than being checked against it, so it can never itself
            // disagree. See the crate root docs.
            first.len_err = false;
            first.expected_last_byte = first.last_byte;
        }

        ParsedProgram { name, lines }
    }

    fn find_sync(cursor: &mut ByteCursor) -> bool {
        let mut run = 0u32;
        loop {
            let Some(b) = cursor.next_value() else { return false };
            if b == SYNC_RUN_BYTE {
                run += 1;
            } else if b == HEADER_SYNC_BYTE && run > 3 {
                return true;
            } else {
                run = 0;
            }
        }
    }

    fn read_name(cursor: &mut ByteCursor) -> Option<String> {
        let mut name = String::new();
        loop {
            let b = cursor.next_value()?;
            if b == 0 {
                return Some(name);
            }
            name.push(b as char);
        }
    }

    fn read_lines(cursor: &mut ByteCursor) -> Vec<Line> {
        let mut lines = Vec::new();
        // Cumulative adjustment keeping the tape's absolute next-line
        // pointers meaningful once an earlier line's declared length has
        // disagreed with where it actually ended.
        let mut correction_offset: i64 = 0;

        loop {
            let first_byte = cursor.position();
            let Some(lo) = cursor.next_value() else { break };
            let Some(hi) = cursor.next_value() else { break };
            let pointer_raw = lo as u32 + 256 * hi as u32;
            if pointer_raw == 0 {
                break;
            }
            let next_line_start = pointer_raw as i64 - correction_offset;

            let Some(n_lo) = cursor.next_value() else { break };
            let Some(n_hi) = cursor.next_value() else { break };
            let line_number = n_lo as u32 + 256 * n_hi as u32;

            let mut elements = vec![format!("{} ", line_number)];
            let mut ended = false;
            loop {
                let Some(b) = cursor.next_value() else { break };
                if b == 0 {
                    ended = true;
                    break;
                } else if b < 128 {
                    elements.push((b as char).to_string());
                } else if (b - 128) as usize >= KEYWORDS.len() {
                    elements.push("?".to_string());
                } else {
                    elements.push(render_token(b));
                }
            }
            if !ended {
                // Stream exhausted mid-line: this line is incomplete and is
                // dropped, matching "parsing stops, returning whatever lines
                // were complete".
                break;
            }

            let last_byte = cursor.position() - 1;
            let actual_next = cursor.position() as i64;
            let expected_last_byte = (next_line_start - 1).max(0) as usize;
            let len_err = next_line_start != actual_next;

            correction_offset += next_line_start - last_byte as i64 - 1;

            let text = elements.concat();
            log::trace!(
                "parsed line [{first_byte}, {last_byte}]: {text:?}{}",
                if len_err { " (len_err)" } else { "" }
            );

            lines.push(Line {
                text,
                elements,
                first_byte,
                last_byte,
                expected_last_byte,
                len_err,
            });
        }

        lines
    }
}
