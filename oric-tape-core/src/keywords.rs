//! Oric BASIC keyword table, indexed by `token_byte - 128`.

pub const KEYWORDS: &[&str] = &[
    "END", "EDIT", "STORE", "RECALL", "TRON", "TROFF", "POP", "PLOT", "PULL", "LORES", "DOKE",
    "REPEAT", "UNTIL", "FOR", "LLIST", "LPRINT", "NEXT", "DATA", "INPUT", "DIM", "CLS", "READ",
    "LET", "GOTO", "RUN", "IF", "RESTORE", "GOSUB", "RETURN", "REM", "HIMEM", "GRAB", "RELEASE",
    "TEXT", "HIRES", "SHOOT", "EXPLODE", "ZAP", "PING", "SOUND", "MUSIC", "PLAY", "CURSET",
    "CURMOV", "DRAW", "CIRCLE", "PATTERN", "FILL", "CHAR", "PAPER", "INK", "STOP", "ON", "WAIT",
    "CLOAD", "CSAVE", "DEF", "POKE", "PRINT", "CONT", "LIST", "CLEAR", "GET", "CALL", "!", "NEW",
    "TAB(", "TO", "FN", "SPC(", "@", "AUTO", "ELSE", "THEN", "NOT", "STEP", "+", "-", "*", "/",
    "^", "AND", "OR", ">", "=", "<", "SGN", "INT", "ABS", "USR", "FRE", "POS", "HEX$", "&", "SQR",
    "RND", "LN", "EXP", "COS", "SIN", "TAN", "ATN", "PEEK", "DEEK", "LOG", "LEN", "STR$", "VAL",
    "ASC", "CHR$", "PI", "TRUE", "FALSE", "KEY$", "SCRN", "POINT", "LEFT$", "RIGHT$", "MID$",
];

/// Renders a keyword token byte (`>= 128`) to the text that appears in a
/// decoded line, or a visible placeholder for a byte with no matching entry.
pub fn render_token(token: u8) -> String {
    let index = (token - 128) as usize;
    match KEYWORDS.get(index) {
        Some(&kw) => kw.to_string(),
        None => "?".to_string(),
    }
}
