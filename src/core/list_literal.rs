//! Decoding of list-valued CSV cells such as `['a.edu', 'b.edu']`.
//!
//! The directory file stores `domains` and `web_pages` as serialized list
//! literals. A strict decoder handles well-formed literals; anything else goes
//! through a bracket/quote stripping split on `", "`. Either way the caller
//! gets a `Vec<String>`.

use std::iter::Peekable;
use std::str::Chars;

/// 解碼結果與是否走了 fallback 路徑
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decoded {
    pub items: Vec<String>,
    pub used_fallback: bool,
}

pub fn decode_list(text: &str) -> Decoded {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Decoded {
            items: Vec::new(),
            used_fallback: false,
        };
    }

    match decode_strict(trimmed) {
        Some(items) => Decoded {
            items,
            used_fallback: false,
        },
        None => Decoded {
            items: decode_fallback(trimmed),
            used_fallback: true,
        },
    }
}

/// Parses a list literal of quoted strings. Returns `None` for anything that
/// is not exactly such a literal (bare words, numbers, unterminated quotes).
pub fn decode_strict(text: &str) -> Option<Vec<String>> {
    let mut chars = text.trim().chars().peekable();
    if chars.next()? != '[' {
        return None;
    }

    let mut items = Vec::new();
    loop {
        skip_whitespace(&mut chars);
        match chars.peek()? {
            ']' => {
                chars.next();
                break;
            }
            '\'' | '"' => {
                items.push(parse_quoted(&mut chars)?);
                skip_whitespace(&mut chars);
                match chars.next()? {
                    ',' => continue,
                    ']' => break,
                    _ => return None,
                }
            }
            _ => return None,
        }
    }

    // 右括號之後不能有其他內容
    if chars.next().is_some() {
        return None;
    }
    Some(items)
}

pub fn decode_fallback(text: &str) -> Vec<String> {
    let stripped: String = text
        .trim()
        .trim_matches(|c| c == '[' || c == ']')
        .chars()
        .filter(|c| *c != '\'' && *c != '"')
        .collect();

    stripped
        .split(", ")
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Inverse of [`decode_strict`], used by the CSV export.
pub fn encode_list(items: &[String]) -> String {
    let quoted: Vec<String> = items
        .iter()
        .map(|item| format!("'{}'", item.replace('\\', "\\\\").replace('\'', "\\'")))
        .collect();
    format!("[{}]", quoted.join(", "))
}

fn skip_whitespace(chars: &mut Peekable<Chars<'_>>) {
    while chars.peek().is_some_and(|c| c.is_whitespace()) {
        chars.next();
    }
}

fn parse_quoted(chars: &mut Peekable<Chars<'_>>) -> Option<String> {
    let quote = chars.next()?;
    let mut out = String::new();

    loop {
        match chars.next()? {
            c if c == quote => return Some(out),
            '\n' => return None,
            '\\' => match chars.next()? {
                '\\' => out.push('\\'),
                '\'' => out.push('\''),
                '"' => out.push('"'),
                'n' => out.push('\n'),
                't' => out.push('\t'),
                'r' => out.push('\r'),
                '\n' => {}
                'x' => out.push(parse_hex(chars, 2)?),
                'u' => out.push(parse_hex(chars, 4)?),
                'U' => out.push(parse_hex(chars, 8)?),
                other => {
                    out.push('\\');
                    out.push(other);
                }
            },
            c => out.push(c),
        }
    }
}

fn parse_hex(chars: &mut Peekable<Chars<'_>>, digits: usize) -> Option<char> {
    let mut value = 0u32;
    for _ in 0..digits {
        value = value * 16 + chars.next()?.to_digit(16)?;
    }
    char::from_u32(value)
}
