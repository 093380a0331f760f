//! Frame rendering for the four stacked panes described in `SPEC_FULL.md`
//! §13: waveform (Braille canvas), hex-pane header, hex byte grid,
//! BASIC-pane header, BASIC listing, status bar. Colors mirror `ui.go`'s
//! `ColorRed`/`ColorYellow`/`ColorCyan` usage; the model itself carries only
//! the semantic flags (`unclear`, `chk_err`, `len_err`), per §9.

use oric_tape_core::ProvenanceModel;
use ratatui::prelude::*;
use ratatui::symbols;
use ratatui::widgets::canvas::{Canvas, Points};
use ratatui::widgets::{Block, Borders, Paragraph};

use super::app::App;

const SEL_BG: Color = Color::White;
const CURSOR_BG: Color = Color::Cyan;

pub fn draw<B: Backend>(f: &mut Frame<B>, app: &mut App) {
    let size = f.size();
    app.resize(size.width, size.height);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4),
            Constraint::Length(1),
            Constraint::Length(app.hex_height as u16),
            Constraint::Length(1),
            Constraint::Min(1),
            Constraint::Length(1),
        ])
        .split(size);

    draw_waveform(f, app, chunks[0]);
    draw_hex_header(f, app, chunks[1]);
    draw_hex_grid(f, app, chunks[2]);
    draw_basic_header(f, app, chunks[3]);
    draw_basic_listing(f, app, chunks[4]);
    draw_status(f, chunks[5]);
}

fn draw_waveform<B: Backend>(f: &mut Frame<B>, app: &App, area: Rect) {
    let program = app.current_program();
    let provenance = ProvenanceModel::new(app.model());

    let Ok((first, last)) = provenance.byte_sample_range(app.program_index, app.hex_cursor) else {
        f.render_widget(Block::default().borders(Borders::NONE), area);
        return;
    };

    let points: Vec<(f64, f64)> = (first..=last)
        .map(|s| (s as f64, program.stream.sample_at(s) as f64))
        .collect();

    let unclear = program
        .bytes
        .get(app.hex_cursor)
        .map(|b| b.unclear)
        .unwrap_or(false);
    let color = if unclear { Color::Yellow } else { Color::Gray };

    let (y_min, y_max) = if program.stream.min_val < program.stream.max_val {
        (program.stream.min_val as f64, program.stream.max_val as f64)
    } else {
        (-1.0, 1.0)
    };

    let canvas = Canvas::default()
        .marker(symbols::Marker::Braille)
        .x_bounds([first as f64, last.max(first + 1) as f64])
        .y_bounds([y_min, y_max])
        .paint(move |ctx| {
            ctx.draw(&Points { coords: &points, color });
        });
    f.render_widget(canvas, area);
}

fn draw_hex_header<B: Backend>(f: &mut Frame<B>, app: &App, area: Rect) {
    let mut spans = Vec::new();
    if let Some(err) = &app.hex_err_status {
        spans.push(Span::styled(err.clone(), Style::default().fg(Color::Red)));
        spans.push(Span::raw(" "));
    }
    if let Some(warn) = &app.hex_warn_status {
        spans.push(Span::styled(warn.clone(), Style::default().fg(Color::Yellow)));
    }
    let title = format!(
        "program {}/{}: {:?}",
        app.program_index + 1,
        app.program_count(),
        app.current_program().name
    );
    f.render_widget(
        Paragraph::new(Line::from(spans))
            .block(Block::default().borders(Borders::BOTTOM).title(title)),
        area,
    );
}

fn draw_hex_grid<B: Backend>(f: &mut Frame<B>, app: &App, area: Rect) {
    let program = app.current_program();
    let cols = app.hex_cols.max(1);
    let mut lines = Vec::new();

    for row in 0..app.hex_height {
        let mut spans = Vec::new();
        for col in 0..cols {
            let i = app.hex_start + row * cols + col;
            if i >= program.bytes.len() {
                spans.push(Span::raw("   "));
                continue;
            }
            let byte = &program.bytes[i];
            let mut style = Style::default();
            if byte.chk_err {
                style = style.fg(Color::Red);
            } else if byte.unclear {
                style = style.fg(Color::Yellow);
            }
            if i == app.hex_cursor {
                style = style.bg(CURSOR_BG);
            } else if i >= app.hex_sel_start && i <= app.hex_sel_end {
                style = style.bg(SEL_BG);
            }
            spans.push(Span::styled(format!("{:02x} ", byte.value), style));
        }
        lines.push(Line::from(spans));
    }

    f.render_widget(Paragraph::new(lines), area);
}

fn draw_basic_header<B: Backend>(f: &mut Frame<B>, app: &App, area: Rect) {
    let spans = match &app.basic_err_status {
        Some(err) => vec![Span::styled(err.clone(), Style::default().fg(Color::Red))],
        None => vec![],
    };
    f.render_widget(
        Paragraph::new(Line::from(spans)).block(Block::default().borders(Borders::BOTTOM)),
        area,
    );
}

fn draw_basic_listing<B: Backend>(f: &mut Frame<B>, app: &App, area: Rect) {
    let program = app.current_program();
    let mut lines = Vec::new();

    for row in 0..app.basic_height {
        let i = app.basic_start + row;
        let Some(line) = program.lines.get(i) else {
            lines.push(Line::raw(""));
            continue;
        };

        let base_fg = if line.len_err { Color::Red } else { Color::Reset };
        let base_bg = if i as i64 == app.basic_cursor_line { SEL_BG } else { Color::Reset };

        let mut spans = Vec::new();
        let bytes = line.text.as_bytes();
        let mut pos = 0usize;
        while pos < bytes.len() {
            let in_cursor_range = i as i64 == app.basic_cursor_line
                && pos >= app.basic_cursor_l
                && pos <= app.basic_cursor_r;
            let mut style = Style::default().fg(base_fg).bg(base_bg);
            if in_cursor_range {
                style = style.bg(CURSOR_BG);
            }
            spans.push(Span::styled(bytes[pos..pos + 1].iter().map(|&b| b as char).collect::<String>(), style));
            pos += 1;
        }
        lines.push(Line::from(spans));
    }

    f.render_widget(Paragraph::new(lines), area);
}

fn draw_status<B: Backend>(f: &mut Frame<B>, area: Rect) {
    let status = " Arrows/Ctrl-B/Ctrl-F: move byte  [/]: switch program  q/Esc: quit";
    f.render_widget(
        Paragraph::new(status).style(Style::default().fg(Color::White).bg(Color::Blue)),
        area,
    );
}
