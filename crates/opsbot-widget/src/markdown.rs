//! Minimal markdown for chat bubbles.
//!
//! Only four constructs are recognized, in this precedence: fenced code
//! blocks, inline code, bold and line breaks. Text is scanned left to right;
//! when a construct fails to match at a position a single literal character
//! is emitted and scanning resumes at the next one. All text is HTML-escaped
//! before markup is added.

use std::fmt::Write;

const FENCE: &str = "```";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Span {
    CodeBlock {
        language: Option<String>,
        code: String,
    },
    InlineCode(String),
    /// Holds only `Text`, `InlineCode` and `LineBreak`
    Bold(Vec<Span>),
    Text(String),
    LineBreak,
}

/// Render chat text to HTML
pub fn render_markdown(text: &str) -> String {
    render_html(&parse(text))
}

pub fn parse(text: &str) -> Vec<Span> {
    let mut spans = Vec::new();
    for segment in split_fenced(text) {
        match segment {
            Segment::Fenced { language, code } => spans.push(Span::CodeBlock {
                language: language.map(str::to_string),
                code: code.to_string(),
            }),
            Segment::Prose(prose) => spans.extend(group_inline(&inline_atoms(prose))),
        }
    }
    spans
}

pub fn render_html(spans: &[Span]) -> String {
    let mut out = String::new();
    for span in spans {
        render_span(&mut out, span);
    }
    out
}

/// Escape HTML to prevent XSS
pub fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

fn render_span(out: &mut String, span: &Span) {
    match span {
        Span::CodeBlock { language, code } => {
            match language {
                // Tags are restricted to [A-Za-z0-9_] by the scanner
                Some(language) => {
                    let _ = write!(out, r#"<pre><code class="language-{}">"#, language);
                }
                None => out.push_str("<pre><code>"),
            }
            out.push_str(&escape_html(code));
            out.push_str("</code></pre>");
        }
        Span::InlineCode(code) => {
            out.push_str("<code>");
            out.push_str(&escape_html(code).replace('\n', "<br>"));
            out.push_str("</code>");
        }
        Span::Bold(inner) => {
            out.push_str("<strong>");
            for span in inner {
                render_span(out, span);
            }
            out.push_str("</strong>");
        }
        Span::Text(text) => out.push_str(&escape_html(text)),
        Span::LineBreak => out.push_str("<br>"),
    }
}

// ============================================================================
// Fenced code blocks
// ============================================================================

enum Segment<'a> {
    Fenced {
        language: Option<&'a str>,
        code: &'a str,
    },
    Prose(&'a str),
}

fn split_fenced(text: &str) -> Vec<Segment<'_>> {
    let mut segments = Vec::new();
    let mut prose_start = 0;
    let mut search_from = 0;

    while let Some(offset) = text[search_from..].find(FENCE) {
        let open = search_from + offset;
        match match_fence(text, open) {
            Some((language, code, end)) => {
                if open > prose_start {
                    segments.push(Segment::Prose(&text[prose_start..open]));
                }
                segments.push(Segment::Fenced { language, code });
                prose_start = end;
                search_from = end;
            }
            None => search_from = open + 1,
        }
    }

    if prose_start < text.len() {
        segments.push(Segment::Prose(&text[prose_start..]));
    }
    segments
}

/// Match "```", an optional word tag, a newline, then everything up to the
/// next "```". Returns the tag, the body and the end offset of the block.
fn match_fence(text: &str, open: usize) -> Option<(Option<&str>, &str, usize)> {
    let after_open = open + FENCE.len();
    let rest = &text[after_open..];
    let tag_len = rest
        .bytes()
        .take_while(|b| b.is_ascii_alphanumeric() || *b == b'_')
        .count();
    let body = rest[tag_len..].strip_prefix('\n')?;
    let close = body.find(FENCE)?;

    let language = (tag_len > 0).then(|| &rest[..tag_len]);
    let body_start = after_open + tag_len + 1;
    Some((language, &body[..close], body_start + close + FENCE.len()))
}

// ============================================================================
// Inline code and bold
// ============================================================================

enum Atom<'a> {
    Char(char),
    Code(&'a str),
}

fn inline_atoms(prose: &str) -> Vec<Atom<'_>> {
    let mut atoms = Vec::new();
    let mut rest = prose;

    while let Some(c) = rest.chars().next() {
        if c == '`' {
            if let Some(close) = rest[1..].find('`') {
                if close > 0 {
                    atoms.push(Atom::Code(&rest[1..1 + close]));
                    rest = &rest[close + 2..];
                    continue;
                }
            }
        }
        atoms.push(Atom::Char(c));
        rest = &rest[c.len_utf8()..];
    }
    atoms
}

fn is_star(atom: &Atom<'_>) -> bool {
    matches!(atom, Atom::Char('*'))
}

/// Index of the closing "**" for a bold run opening at `open`
fn bold_close(atoms: &[Atom<'_>], open: usize) -> Option<usize> {
    let opens = atoms.get(open).is_some_and(is_star) && atoms.get(open + 1).is_some_and(is_star);
    if !opens {
        return None;
    }

    let len = atoms[open + 2..]
        .iter()
        .take_while(|atom| match atom {
            Atom::Char(c) => *c != '*',
            Atom::Code(code) => !code.contains('*'),
        })
        .count();
    if len == 0 {
        return None;
    }

    let close = open + 2 + len;
    let closes = atoms.get(close).is_some_and(is_star) && atoms.get(close + 1).is_some_and(is_star);
    closes.then_some(close)
}

fn group_inline(atoms: &[Atom<'_>]) -> Vec<Span> {
    let mut spans = Vec::new();
    let mut i = 0;

    while i < atoms.len() {
        match bold_close(atoms, i) {
            Some(close) => {
                let mut inner = Vec::new();
                for atom in &atoms[i + 2..close] {
                    push_atom(&mut inner, atom);
                }
                spans.push(Span::Bold(inner));
                i = close + 2;
            }
            None => {
                push_atom(&mut spans, &atoms[i]);
                i += 1;
            }
        }
    }
    spans
}

fn push_atom(spans: &mut Vec<Span>, atom: &Atom<'_>) {
    match atom {
        Atom::Char('\n') => spans.push(Span::LineBreak),
        Atom::Char(c) => match spans.last_mut() {
            Some(Span::Text(text)) => text.push(*c),
            _ => spans.push(Span::Text(c.to_string())),
        },
        Atom::Code(code) => spans.push(Span::InlineCode(code.to_string())),
    }
}
