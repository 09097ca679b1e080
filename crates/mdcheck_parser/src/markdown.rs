//! Block-level Markdown parser.
//!
//! Produces the lightweight structural token tree the lint engine queries:
//! headings, code blocks, block quotes, list items, tables, HTML blocks,
//! thematic breaks, and paragraphs. Inline structure is not modeled; checks
//! that care about inline content read the raw lines directly.
//!
//! Positions are 1-based and match `source.lines()`, the same split the
//! document snapshot uses.

use mdcheck_token::{Location, Position, Token, TokenData, TokenKind};

use crate::{ParseError, Parser};

/// Block quotes nested beyond this depth abort the parse.
const MAX_QUOTE_DEPTH: usize = 64;

/// Block-level Markdown parser.
#[derive(Debug, Default)]
pub struct MarkdownParser;

impl MarkdownParser {
    /// Creates a new parser.
    pub fn new() -> Self {
        Self
    }
}

/// One input line, tracking where its text begins in the original document
/// so tokens nested inside block quotes keep original coordinates.
#[derive(Debug, Clone, Copy)]
struct Line<'s> {
    /// 1-based line number in the original document.
    number: u32,
    /// 1-based column of `text`'s first character in the original document.
    column: u32,
    text: &'s str,
}

impl Parser for MarkdownParser {
    fn name(&self) -> &str {
        "markdown"
    }

    fn extensions(&self) -> &[&str] {
        &["md", "markdown"]
    }

    fn parse(&self, source: &str) -> Result<Token, ParseError> {
        let raw: Vec<&str> = source.lines().collect();
        let lines: Vec<Line> = raw
            .iter()
            .enumerate()
            .map(|(idx, &text)| Line {
                number: idx as u32 + 1,
                column: 1,
                text,
            })
            .collect();

        let children = parse_blocks(&lines, 0)?;

        let last_width = raw.last().map(|l| l.chars().count() as u32).unwrap_or(0);
        let line_count = raw.len().max(1) as u32;
        Ok(Token::with_children(
            TokenKind::Document,
            source,
            Location::lines(1, line_count, last_width),
            children,
        ))
    }
}

fn parse_blocks(lines: &[Line], depth: usize) -> Result<Vec<Token>, ParseError> {
    let mut tokens = Vec::new();
    let mut i = 0;

    while i < lines.len() {
        let line = lines[i];
        if is_blank(line.text) {
            i += 1;
            continue;
        }

        // Fenced code runs to the matching close fence, or to end of input
        // when unclosed.
        if let Some((marker, length, info)) = fence_open(line.text) {
            let mut end = i + 1;
            while end < lines.len() && !fence_close(lines[end].text, marker, length) {
                end += 1;
            }
            let close = end.min(lines.len() - 1);
            tokens.push(make_token(TokenKind::FencedCode, &lines[i..=close]).with_data(
                TokenData::Fence {
                    marker,
                    length,
                    info,
                },
            ));
            i = close + 1;
            continue;
        }

        if let Some((level, closed)) = atx_heading(line.text) {
            tokens.push(
                make_token(TokenKind::AtxHeading, &lines[i..=i])
                    .with_data(TokenData::Heading { level, closed }),
            );
            i += 1;
            continue;
        }

        if thematic_break(line.text) {
            tokens.push(make_token(TokenKind::HorizontalRule, &lines[i..=i]));
            i += 1;
            continue;
        }

        if line.text.trim_start().starts_with('>') {
            if depth >= MAX_QUOTE_DEPTH {
                return Err(ParseError::NestingTooDeep {
                    line: line.number,
                    max: MAX_QUOTE_DEPTH,
                });
            }
            let mut end = i;
            while end < lines.len() && lines[end].text.trim_start().starts_with('>') {
                end += 1;
            }
            let span = &lines[i..end];
            let inner: Vec<Line> = span.iter().map(strip_quote_marker).collect();
            let children = parse_blocks(&inner, depth + 1)?;
            tokens.push(make_parent(TokenKind::BlockQuote, span, children));
            i = end;
            continue;
        }

        if html_start(line.text) {
            let mut end = i;
            while end < lines.len() && !is_blank(lines[end].text) {
                end += 1;
            }
            tokens.push(make_token(TokenKind::HtmlFlow, &lines[i..end]));
            i = end;
            continue;
        }

        if let Some((marker, ordered)) = list_marker(line.text) {
            let indent = leading_spaces(line.text);
            let mut end = i + 1;
            while end < lines.len() {
                let next = lines[end].text;
                if is_blank(next) {
                    // A blank stays inside the item only when followed by
                    // further-indented continuation text.
                    let continues = lines
                        .get(end + 1)
                        .is_some_and(|l| !is_blank(l.text) && leading_spaces(l.text) > indent);
                    if continues {
                        end += 1;
                        continue;
                    }
                    break;
                }
                if leading_spaces(next) > indent {
                    end += 1;
                    continue;
                }
                break;
            }
            tokens.push(
                make_token(TokenKind::ListItem, &lines[i..end])
                    .with_data(TokenData::ListMarker { marker, ordered }),
            );
            i = end;
            continue;
        }

        if leading_spaces(line.text) >= 4 {
            let mut end = i + 1;
            while end < lines.len()
                && (is_blank(lines[end].text) || leading_spaces(lines[end].text) >= 4)
            {
                end += 1;
            }
            while end > i + 1 && is_blank(lines[end - 1].text) {
                end -= 1;
            }
            tokens.push(make_token(TokenKind::IndentedCode, &lines[i..end]));
            i = end;
            continue;
        }

        if line.text.contains('|')
            && lines
                .get(i + 1)
                .is_some_and(|l| l.text.contains('|') && table_separator(l.text))
        {
            let mut end = i;
            while end < lines.len() && !is_blank(lines[end].text) && lines[end].text.contains('|') {
                tokens.push(make_token(TokenKind::TableRow, &lines[end..=end]));
                end += 1;
            }
            i = end;
            continue;
        }

        // Paragraph, possibly promoted to a setext heading by an underline.
        let start = i;
        let mut end = i + 1;
        let mut setext: Option<u8> = None;
        while end < lines.len() {
            let next = lines[end].text;
            if is_blank(next) {
                break;
            }
            if let Some(level) = setext_underline(next) {
                setext = Some(level);
                end += 1;
                break;
            }
            if interrupts_paragraph(next) {
                break;
            }
            end += 1;
        }
        match setext {
            Some(level) => tokens.push(
                make_token(TokenKind::SetextHeading, &lines[start..end]).with_data(
                    TokenData::Heading {
                        level,
                        closed: false,
                    },
                ),
            ),
            None => tokens.push(make_token(TokenKind::Paragraph, &lines[start..end])),
        }
        i = end;
    }

    Ok(tokens)
}

/// Builds a leaf token covering the given non-empty line span.
fn make_token(kind: TokenKind, span: &[Line]) -> Token {
    make_parent(kind, span, Vec::new())
}

/// Builds a token covering the given non-empty line span with children.
fn make_parent(kind: TokenKind, span: &[Line], children: Vec<Token>) -> Token {
    let first = span[0];
    let last = span[span.len() - 1];
    let text: String = span
        .iter()
        .map(|l| l.text)
        .collect::<Vec<_>>()
        .join("\n");
    let width = last.text.chars().count() as u32;
    Token::with_children(
        kind,
        text,
        Location::new(
            Position::new(first.number, first.column),
            Position::new(last.number, last.column + width),
        ),
        children,
    )
}

/// Removes a leading `>` marker (plus one optional following space),
/// shifting the line's column accordingly.
fn strip_quote_marker<'s>(line: &Line<'s>) -> Line<'s> {
    let text = line.text;
    let indent = text.len() - text.trim_start_matches([' ', '\t']).len();
    let mut consumed = indent;
    if text[consumed..].starts_with('>') {
        consumed += 1;
        if text[consumed..].starts_with(' ') {
            consumed += 1;
        }
    }
    Line {
        number: line.number,
        column: line.column + consumed as u32,
        text: &text[consumed..],
    }
}

fn is_blank(text: &str) -> bool {
    text.trim().is_empty()
}

fn leading_spaces(text: &str) -> usize {
    text.len() - text.trim_start_matches(' ').len()
}

fn atx_heading(text: &str) -> Option<(u8, bool)> {
    let indent = leading_spaces(text);
    if indent > 3 {
        return None;
    }
    let rest = &text[indent..];
    let level = rest.chars().take_while(|&c| c == '#').count();
    if level == 0 || level > 6 {
        return None;
    }
    let after = &rest[level..];
    if !(after.is_empty() || after.starts_with(' ') || after.starts_with('\t')) {
        return None;
    }
    let content = after.trim();
    let closed = !content.is_empty() && content.ends_with('#');
    Some((level as u8, closed))
}

fn fence_open(text: &str) -> Option<(char, u8, Option<String>)> {
    let indent = leading_spaces(text);
    if indent > 3 {
        return None;
    }
    let rest = &text[indent..];
    let marker = rest.chars().next()?;
    if marker != '`' && marker != '~' {
        return None;
    }
    let length = rest.chars().take_while(|&c| c == marker).count();
    if length < 3 {
        return None;
    }
    let info = rest[length..].trim();
    if marker == '`' && info.contains('`') {
        return None;
    }
    let info = (!info.is_empty()).then(|| info.to_string());
    Some((marker, length as u8, info))
}

fn fence_close(text: &str, marker: char, length: u8) -> bool {
    let rest = text.trim();
    !rest.is_empty()
        && rest.chars().all(|c| c == marker)
        && rest.chars().count() >= length as usize
}

fn thematic_break(text: &str) -> bool {
    let mut marker = None;
    let mut count = 0;
    for c in text.trim().chars() {
        match c {
            ' ' | '\t' => {}
            '-' | '*' | '_' => {
                match marker {
                    None => marker = Some(c),
                    Some(m) if m == c => {}
                    Some(_) => return false,
                }
                count += 1;
            }
            _ => return false,
        }
    }
    count >= 3
}

fn setext_underline(text: &str) -> Option<u8> {
    if leading_spaces(text) > 3 {
        return None;
    }
    let t = text.trim();
    if t.is_empty() {
        None
    } else if t.bytes().all(|b| b == b'=') {
        Some(1)
    } else if t.bytes().all(|b| b == b'-') {
        Some(2)
    } else {
        None
    }
}

fn list_marker(text: &str) -> Option<(char, bool)> {
    let indent = leading_spaces(text);
    if indent > 3 {
        return None;
    }
    let rest = &text[indent..];
    let first = rest.chars().next()?;
    if matches!(first, '-' | '*' | '+') {
        let after = &rest[1..];
        return (after.is_empty() || after.starts_with(' ')).then_some((first, false));
    }
    if first.is_ascii_digit() {
        let digits = rest.chars().take_while(|c| c.is_ascii_digit()).count();
        if digits <= 9 {
            let after = &rest[digits..];
            if let Some(punct) = after.chars().next()
                && matches!(punct, '.' | ')')
            {
                let tail = &after[1..];
                if tail.is_empty() || tail.starts_with(' ') {
                    return Some((punct, true));
                }
            }
        }
    }
    None
}

fn table_separator(text: &str) -> bool {
    let t = text.trim();
    t.contains('-') && t.chars().all(|c| matches!(c, '|' | '-' | ':' | ' ' | '\t'))
}

fn html_start(text: &str) -> bool {
    let t = text.trim_start();
    let Some(rest) = t.strip_prefix('<') else {
        return false;
    };
    rest.chars()
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || matches!(c, '/' | '!' | '?'))
}

fn interrupts_paragraph(text: &str) -> bool {
    atx_heading(text).is_some()
        || fence_open(text).is_some()
        || thematic_break(text)
        || text.trim_start().starts_with('>')
        || html_start(text)
        || list_marker(text).is_some()
}
