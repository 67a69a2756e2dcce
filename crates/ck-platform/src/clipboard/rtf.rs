//! Plain-text extraction from RTF documents.
//!
//! Good enough for previews and dedup: groups that hold no visible text
//! (font and colour tables, pictures, `\*` destinations) are dropped, and
//! paragraph/tab/unicode control words are mapped to characters. Code page
//! escapes (`\'hh`) are read as Latin-1.

const HIDDEN_DESTINATIONS: &[&str] = &[
    "fonttbl",
    "colortbl",
    "stylesheet",
    "info",
    "pict",
    "header",
    "footer",
    "listtable",
    "listoverridetable",
];

pub fn rtf_to_plain_text(rtf: &str) -> String {
    let mut out = String::new();
    let mut chars = rtf.chars().peekable();
    let mut hidden_stack: Vec<bool> = Vec::new();
    let mut hidden = false;

    while let Some(c) = chars.next() {
        match c {
            '{' => hidden_stack.push(hidden),
            '}' => hidden = hidden_stack.pop().unwrap_or(false),
            '\r' | '\n' => {}
            '\\' => match chars.peek().copied() {
                Some(symbol @ ('\\' | '{' | '}')) => {
                    chars.next();
                    if !hidden {
                        out.push(symbol);
                    }
                }
                Some('\'') => {
                    chars.next();
                    let hex: String = chars.by_ref().take(2).collect();
                    if !hidden {
                        if let Ok(byte) = u8::from_str_radix(&hex, 16) {
                            out.push(char::from(byte));
                        }
                    }
                }
                Some('*') => {
                    chars.next();
                    hidden = true;
                }
                Some('~') => {
                    chars.next();
                    if !hidden {
                        out.push('\u{a0}');
                    }
                }
                Some(letter) if letter.is_ascii_alphabetic() => {
                    let mut word = String::new();
                    while let Some(ch) = chars.next_if(|ch| ch.is_ascii_alphabetic()) {
                        word.push(ch);
                    }
                    let mut param = String::new();
                    if let Some(minus) = chars.next_if_eq(&'-') {
                        param.push(minus);
                    }
                    while let Some(digit) = chars.next_if(|ch| ch.is_ascii_digit()) {
                        param.push(digit);
                    }
                    // A single space terminates the control word.
                    chars.next_if_eq(&' ');

                    if hidden {
                        continue;
                    }
                    match word.as_str() {
                        "par" | "line" => out.push('\n'),
                        "tab" => out.push('\t'),
                        "u" => {
                            if let Some(ch) = unicode_escape(&param) {
                                out.push(ch);
                            }
                            // Skip the ANSI fallback character.
                            chars.next_if(|ch| !matches!(*ch, '\\' | '{' | '}'));
                        }
                        other if HIDDEN_DESTINATIONS.contains(&other) => hidden = true,
                        _ => {}
                    }
                }
                Some(_) => {
                    chars.next();
                }
                None => {}
            },
            _ => {
                if !hidden {
                    out.push(c);
                }
            }
        }
    }

    out.trim_end_matches('\n').to_string()
}

fn unicode_escape(param: &str) -> Option<char> {
    let value: i32 = param.parse().ok()?;
    // Values above 32767 are written as negative 16-bit integers.
    let code = if value < 0 { value + 65_536 } else { value };
    char::from_u32(u32::try_from(code).ok()?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_header_tables_and_formatting() {
        let rtf = r"{\rtf1\ansi\deff0{\fonttbl{\f0 Helvetica;}}{\colortbl;\red255\green0\blue0;}\f0\fs24 Hello \b bold\b0  world\par}";
        assert_eq!(rtf_to_plain_text(rtf), "Hello bold world");
    }

    #[test]
    fn maps_paragraphs_and_tabs() {
        let rtf = r"{\rtf1 one\par two\tab three\line four}";
        assert_eq!(rtf_to_plain_text(rtf), "one\ntwo\tthree\nfour");
    }

    #[test]
    fn decodes_escapes() {
        let rtf = r"{\rtf1 caf\'e9 \{braces\} back\\slash \u8364? euro}";
        assert_eq!(rtf_to_plain_text(rtf), "café {braces} back\\slash € euro");
    }

    #[test]
    fn skips_starred_destinations() {
        let rtf = r"{\rtf1{\*\generator Writer;}visible}";
        assert_eq!(rtf_to_plain_text(rtf), "visible");
    }

    #[test]
    fn negative_unicode_values_wrap() {
        assert_eq!(unicode_escape("-3913"), Some('\u{f0b7}'));
        assert_eq!(unicode_escape("not a number"), None);
    }
}
