//! Cursor/scroll state for the terminal UI, ported from `ui.go`'s package
//! globals (`hexCursor`, `basicCursorLine`, `hexSelStart`/`hexSelEnd`,
//! `hexStart`/`basicStart`, ...) into a single owned struct. The two-way
//! cursor sync (`moveHexCursor` / `moveBasicCursor`) and the
//! cumulative-element-length walk that picks which `Line` element is
//! highlighted (`ui.go` lines 446-467) are preserved as described in
//! `SPEC_FULL.md` §13.

use oric_tape_core::{Model, Program};

/// One program's cursor/scroll state, plus a reference to the whole model
/// so Page-Up/Page-Down can switch which program is displayed (the
/// original hard-coded `programs[1]`; this lets every decoded program be
/// reached, per §13).
pub struct App<'a> {
    model: &'a Model,
    pub program_index: usize,

    pub hex_cursor: usize,
    pub hex_sel_start: usize,
    pub hex_sel_end: usize,
    pub hex_start: usize,
    pub hex_cols: usize,
    pub hex_height: usize,

    /// `-1` before the first line, `lines.len()` after the last, matching
    /// the original's sentinel range.
    pub basic_cursor_line: i64,
    pub basic_cursor_l: usize,
    pub basic_cursor_r: usize,
    pub basic_start: usize,
    pub basic_height: usize,

    pub hex_err_status: Option<String>,
    pub hex_warn_status: Option<String>,
    pub basic_err_status: Option<String>,

    pub should_quit: bool,
}

impl<'a> App<'a> {
    pub fn new(model: &'a Model) -> Self {
        let mut app = App {
            model,
            program_index: 0,
            hex_cursor: 0,
            hex_sel_start: 0,
            hex_sel_end: 0,
            hex_start: 0,
            hex_cols: 16,
            hex_height: 8,
            basic_cursor_line: -1,
            basic_cursor_l: 0,
            basic_cursor_r: 0,
            basic_start: 0,
            basic_height: 8,
            hex_err_status: None,
            hex_warn_status: None,
            basic_err_status: None,
            should_quit: false,
        };
        app.reset_selection();
        app
    }

    pub fn current_program(&self) -> &'a Program {
        &self.model.programs[self.program_index]
    }

    pub fn model(&self) -> &'a Model {
        self.model
    }

    pub fn program_count(&self) -> usize {
        self.model.programs.len()
    }

    /// Resets cursors to the start of the current program, with the BASIC
    /// selection covering everything before the first line (or everything,
    /// if there are no lines), matching `displayUI`'s initial `hexSelEnd`.
    fn reset_selection(&mut self) {
        self.hex_cursor = 0;
        self.hex_start = 0;
        self.basic_cursor_line = -1;
        self.basic_start = 0;
        self.hex_err_status = None;
        self.hex_warn_status = None;
        self.basic_err_status = None;

        let program = self.current_program();
        self.hex_sel_start = 0;
        self.hex_sel_end = match program.lines.first() {
            Some(first) => first.first_byte.saturating_sub(1),
            None => program.bytes.len().saturating_sub(1),
        };
    }

    pub fn next_program(&mut self) {
        if self.program_index + 1 < self.program_count() {
            self.program_index += 1;
            self.reset_selection();
        }
    }

    pub fn prev_program(&mut self) {
        if self.program_index > 0 {
            self.program_index -= 1;
            self.reset_selection();
        }
    }

    /// Recomputes layout-dependent bounds (`hexCols`, pane heights) from a
    /// freshly measured terminal size, mirroring `resetSize`.
    pub fn resize(&mut self, width: u16, height: u16) {
        let width = width.max(1) as usize;
        let height = height.max(1) as usize;
        self.hex_cols = (width / 3).max(1);

        let used = 4 /* wave */ + 1 /* hex header */;
        self.hex_height = ((height.saturating_sub(used).saturating_sub(1)) / 2).max(1);
        let used = used + self.hex_height + 1 /* basic header */;
        self.basic_height = (height.saturating_sub(used).saturating_sub(1)).max(1);
    }

    /// Moves the hex cursor by one byte (arrow keys / Ctrl-B / Ctrl-F) or
    /// one row (Up/Down), clamping at the program's byte bounds. Ported
    /// from `moveHexCursor`.
    pub fn move_hex_cursor(&mut self, delta: i64) {
        let byte_count = self.current_program().bytes.len() as i64;
        let new_cursor = self.hex_cursor as i64 + delta;
        if new_cursor < 0 || new_cursor >= byte_count {
            return;
        }
        self.hex_cursor = new_cursor as usize;

        let (chk_err, unclear) = {
            let byte = &self.current_program().bytes[self.hex_cursor];
            (byte.chk_err, byte.unclear)
        };
        self.hex_err_status = chk_err.then(|| "Byte checksum error".to_string());
        self.hex_warn_status = unclear.then(|| "Byte unclear".to_string());

        self.rescroll_hex();

        if self.hex_cursor > self.hex_sel_end {
            while self.hex_cursor > self.hex_sel_end {
                let next = self.basic_cursor_line + 1;
                self.move_basic_cursor(next);
            }
        } else if self.hex_cursor < self.hex_sel_start {
            while self.hex_cursor < self.hex_sel_start {
                let prev = self.basic_cursor_line - 1;
                self.move_basic_cursor(prev);
            }
        } else {
            let current = self.basic_cursor_line;
            self.move_basic_cursor(current);
        }
    }

    fn rescroll_hex(&mut self) {
        let byte_count = self.current_program().bytes.len() as i64;
        let cols = self.hex_cols.max(1) as i64;
        let height = self.hex_height.max(1) as i64;
        let cursor = self.hex_cursor as i64;
        let start = self.hex_start as i64;

        if cursor > start + (height - 2).max(0) * cols {
            let max_start = ((byte_count / cols - height + 1).max(0)) * cols;
            let candidate = ((cursor - (height - 2).max(0) * cols) / cols) * cols;
            self.hex_start = max_start.min(candidate).max(0) as usize;
        } else if cursor < start + cols {
            self.hex_start = (((cursor / cols) - 1).max(0) * cols) as usize;
        }
    }

    /// Moves the BASIC cursor to `new_line` (a line index, or -1/len for
    /// "before first"/"after last"), updating the hex selection range and
    /// which element within the line is highlighted. Ported from
    /// `moveBasicCursor`.
    pub fn move_basic_cursor(&mut self, new_line: i64) {
        let line_count = self.current_program().lines.len() as i64;
        if new_line < -1 || new_line > line_count {
            return;
        }

        if self.basic_cursor_line != new_line {
            self.basic_cursor_line = new_line;

            if new_line < 0 {
                self.hex_sel_start = 0;
                self.hex_sel_end = self
                    .current_program()
                    .lines
                    .first()
                    .map(|l| l.first_byte.saturating_sub(1))
                    .unwrap_or(0);
            } else if new_line >= line_count {
                let program = self.current_program();
                self.hex_sel_start = program
                    .lines
                    .last()
                    .map(|l| l.last_byte + 1)
                    .unwrap_or(0);
                self.hex_sel_end = program.bytes.len().saturating_sub(1);
            } else {
                let line = &self.current_program().lines[new_line as usize];
                self.hex_sel_start = line.first_byte;
                self.hex_sel_end = line.last_byte;
            }

            self.rescroll_basic();

            self.basic_err_status = if new_line >= 0 && new_line < line_count {
                let line = &self.current_program().lines[new_line as usize];
                if line.len_err {
                    Some(format!(
                        "Line length error (expected {} bytes, found {} bytes)",
                        line.expected_last_byte as i64 - line.first_byte as i64 + 1,
                        line.last_byte as i64 - line.first_byte as i64 + 1,
                    ))
                } else {
                    None
                }
            } else {
                None
            };
        }

        if new_line >= 0 && new_line < line_count {
            let line = &self.current_program().lines[new_line as usize];
            let hc = self.hex_cursor as i64 - self.hex_sel_start as i64;
            if hc == 0 || hc == 1 {
                self.basic_cursor_l = 0;
                self.basic_cursor_r = 0;
            } else if hc == 2 || hc == 3 {
                self.basic_cursor_l = 1;
                self.basic_cursor_r = line.elements[0].len().saturating_sub(1);
            } else if hc - 3 < line.elements.len() as i64 {
                self.basic_cursor_l = 1;
                let mut i = 0usize;
                while (i as i64) < hc - 3 {
                    self.basic_cursor_l += line.elements[i].len();
                    i += 1;
                }
                self.basic_cursor_r = self.basic_cursor_l + line.elements[i].len().saturating_sub(1);
            } else {
                self.basic_cursor_l = line.text.len() + 1;
                self.basic_cursor_r = self.basic_cursor_l;
            }
        }
    }

    fn rescroll_basic(&mut self) {
        let line_count = self.current_program().lines.len() as i64;
        let height = self.basic_height.max(1) as i64;
        let line = self.basic_cursor_line;
        let start = self.basic_start as i64;

        if line > start + height - 2 {
            self.basic_start = (line - height + 2).min((line_count - height).max(0)).max(0) as usize;
        } else if line < start {
            self.basic_start = (line - 1).max(0) as usize;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use oric_tape_core::{Bit, BitStream, Byte, Line};

    fn sample_model() -> Model {
        let bits: Vec<Bit> = (0..40)
            .map(|i| Bit { value: (i % 2) as u8, l1: 0, l2: 0, first_sample: i * 2, last_sample: i * 2 + 1, unclear: false })
            .collect();
        let bytes: Vec<Byte> = (0..3)
            .map(|i| Byte { value: i as u8, first_bit: i * 10, last_bit: i * 10 + 9, unclear: false, chk_err: false })
            .collect();
        let lines = vec![
            Line { text: "10 A".into(), elements: vec!["10 ".into(), "A".into()], first_byte: 0, last_byte: 0, expected_last_byte: 0, len_err: false },
            Line { text: "20 B".into(), elements: vec!["20 ".into(), "B".into()], first_byte: 1, last_byte: 1, expected_last_byte: 1, len_err: true },
        ];
        let stream = BitStream { first_sample: 0, last_sample: 80, samples: vec![0; 80], min_val: 0, max_val: 0, bits };
        let program = Program { name: "HI".into(), stream, bytes, lines };
        Model::new(1, vec![program])
    }

    #[test]
    fn moving_hex_cursor_into_second_line_updates_basic_cursor() {
        let model = sample_model();
        let mut app = App::new(&model);
        app.resize(80, 24);
        app.move_hex_cursor(1);
        assert_eq!(app.hex_cursor, 1);
        assert_eq!(app.basic_cursor_line, 1);
    }

    #[test]
    fn len_err_line_sets_basic_err_status() {
        let model = sample_model();
        let mut app = App::new(&model);
        app.resize(80, 24);
        app.move_basic_cursor(1);
        assert!(app.basic_err_status.is_some());
    }

    #[test]
    fn program_switch_resets_cursor() {
        let mut programs_model = sample_model();
        programs_model.programs.push(programs_model.programs[0].clone());
        let mut app = App::new(&programs_model);
        app.resize(80, 24);
        app.move_hex_cursor(1);
        app.next_program();
        assert_eq!(app.program_index, 1);
        assert_eq!(app.hex_cursor, 0);
        assert_eq!(app.basic_cursor_line, -1);
    }

    #[test]
    fn cursor_never_goes_out_of_range() {
        let model = sample_model();
        let mut app = App::new(&model);
        app.resize(80, 24);
        app.move_hex_cursor(-100);
        assert_eq!(app.hex_cursor, 0);
        app.move_hex_cursor(100);
        assert_eq!(app.hex_cursor, 0);
    }
}
