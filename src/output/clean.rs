//! Normalization of tool output before it reaches disk.
//!
//! External tools occasionally emit Unicode line/paragraph separators,
//! zero-width characters and stray control bytes. Editors and downstream
//! LLM tooling handle these poorly, so text files are normalized to plain
//! LF-terminated printable text.

const LINE_SEPARATOR: char = '\u{2028}';
const PARAGRAPH_SEPARATOR: char = '\u{2029}';

/// Characters removed outright by [`clean_text_content`].
const ZERO_WIDTH: [char; 4] = ['\u{200B}', '\u{200C}', '\u{200D}', '\u{FEFF}'];

/// Replace Unicode separators, strip zero-width characters and normalize
/// line endings to LF.
pub fn clean_text_content(content: &str) -> String {
    let content = content.replace([LINE_SEPARATOR, PARAGRAPH_SEPARATOR], "\n");
    let content = content.replace(ZERO_WIDTH, "");
    content.replace("\r\n", "\n").replace('\r', "\n")
}

/// [`clean_text_content`] plus removal of non-printable characters.
///
/// Newlines, tabs and spaces are kept. Any other whitespace becomes a plain
/// space; remaining control and format characters are dropped.
pub fn clean_text_for_file(content: &str) -> String {
    let cleaned = clean_text_content(content);
    let mut out = String::with_capacity(cleaned.len());

    for c in cleaned.chars() {
        if c == '\n' || c == '\t' || c == ' ' || is_printable(c) {
            out.push(c);
        } else if c.is_whitespace() {
            out.push(' ');
        }
    }

    out
}

/// JSON-safe variant: only the separators are touched, and they become the
/// escaped sequence `\n` so string literals stay valid.
pub fn clean_json_text(content: &str) -> String {
    content.replace([LINE_SEPARATOR, PARAGRAPH_SEPARATOR], "\\n")
}

fn is_printable(c: char) -> bool {
    !(c.is_control() || c.is_whitespace() || is_format(c) || is_private_use(c))
}

// Unicode general category Cf (the ranges that appear in practice).
fn is_format(c: char) -> bool {
    matches!(
        c,
        '\u{00AD}'
            | '\u{0600}'..='\u{0605}'
            | '\u{061C}'
            | '\u{06DD}'
            | '\u{070F}'
            | '\u{180E}'
            | '\u{200B}'..='\u{200F}'
            | '\u{202A}'..='\u{202E}'
            | '\u{2060}'..='\u{2064}'
            | '\u{2066}'..='\u{206F}'
            | '\u{FEFF}'
            | '\u{FFF9}'..='\u{FFFB}'
            | '\u{110BD}'
            | '\u{1BCA0}'..='\u{1BCA3}'
            | '\u{1D173}'..='\u{1D17A}'
            | '\u{E0001}'
            | '\u{E0020}'..='\u{E007F}'
    )
}

fn is_private_use(c: char) -> bool {
    matches!(c, '\u{E000}'..='\u{F8FF}' | '\u{F0000}'..='\u{FFFFD}' | '\u{100000}'..='\u{10FFFD}')
}
