// src/markup.rs
//
// Lenient, byte-faithful HTML fragment tokenizer.
//
// - Only start tags are reported; everything else (text, end tags, comments, doctype,
//   processing instructions) is stepped over without being copied or rebuilt.
// - '<' opens a start tag only when followed by an ASCII letter, so escaped text such as
//   "&lt;img&gt;" and stray "<" or "< img" stay text.
// - Tag ends follow attribute quoting: '>' inside a quoted value does not end the tag,
//   while a quote inside an unquoted value or a name is an ordinary character.
// - An unterminated tag or comment turns the rest of the input into text; `<!-->` and
//   `<!--->` are complete empty comments.
// - RAW-TEXT elements (script, style, textarea, title, xmp, iframe, noembed, noframes):
//   their content is skipped up to the matching end tag; tags inside are not reported.
// - Positions are byte offsets into the input. Every delimiter is ASCII, so offsets
//   always fall on UTF-8 boundaries of a &str input.

use crate::error::Result;
use memchr::{memchr, memmem};
use std::ops::Range;

/// Check that a raw fragment is UTF-8 and borrow it as text.
pub fn decode_fragment(bytes: &[u8]) -> Result<&str> {
    Ok(std::str::from_utf8(bytes)?)
}

/* =============================== Core sets =============================== */

fn is_raw_text(name: &[u8]) -> bool {
    matches_ignore_ascii_case(
        name,
        &[
            b"script", b"style", b"textarea", b"title", b"xmp", b"iframe", b"noembed",
            b"noframes",
        ],
    )
}

/* ============================ Utility predicates ========================= */

#[inline]
fn is_ws(b: u8) -> bool {
    b == b' ' || b == b'\t' || b == b'\n' || b == b'\r' || b == 0x0c
}

#[inline]
fn ends_tag_name(b: u8) -> bool {
    is_ws(b) || b == b'/' || b == b'>'
}

#[inline]
fn ends_attr_name(b: u8) -> bool {
    ends_tag_name(b) || b == b'='
}

fn matches_ignore_ascii_case(name: &[u8], set: &[&[u8]]) -> bool {
    set.iter().any(|&s| name.eq_ignore_ascii_case(s))
}

/* ============================ Attribute scan ============================= */

/// One attribute of a start tag, as byte ranges into the tag.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Attribute {
    /// The attribute name.
    pub name: Range<usize>,
    /// The value without its quotes; `None` for a bare attribute like `hidden`.
    pub value: Option<Range<usize>>,
    /// Name, `=`, and value including quotes.
    pub span: Range<usize>,
}

impl Attribute {
    pub fn is_named(&self, tag: &[u8], name: &str) -> bool {
        tag[self.name.clone()].eq_ignore_ascii_case(name.as_bytes())
    }
}

/// Index just past the tag name of a tag opening at `lt`.
fn tag_name_end(s: &[u8], lt: usize) -> usize {
    let mut i = lt + 1;
    while i < s.len() && !ends_tag_name(s[i]) {
        i += 1;
    }
    i
}

struct TagWalk {
    attrs: Vec<Attribute>,
    /// Index of the closing '>', `None` when the tag runs to the end of input.
    end: Option<usize>,
}

/// Walk a tag opening at `lt` attribute by attribute.
///
/// Grammar: [name] ( '=' [value] )?. A quote opens a value only right after
/// '=' (and optional whitespace); anywhere else it is an ordinary character,
/// so `title=don't` is an unquoted value. An unquoted value stops at
/// whitespace or '>'. Slashes and whitespace between attributes are skipped.
fn walk_tag(s: &[u8], lt: usize) -> TagWalk {
    let n = s.len();
    let mut attrs = Vec::new();
    let mut i = tag_name_end(s, lt);

    loop {
        while i < n && (is_ws(s[i]) || s[i] == b'/') {
            i += 1;
        }
        if i >= n {
            return TagWalk { attrs, end: None };
        }
        if s[i] == b'>' {
            return TagWalk { attrs, end: Some(i) };
        }

        // attribute name; a leading '=' belongs to the name
        let name_start = i;
        i += 1;
        while i < n && !ends_attr_name(s[i]) {
            i += 1;
        }
        let name = name_start..i;

        let mut j = i;
        while j < n && is_ws(s[j]) {
            j += 1;
        }

        let mut value = None;
        if j < n && s[j] == b'=' {
            j += 1;
            while j < n && is_ws(s[j]) {
                j += 1;
            }
            if j < n && (s[j] == b'"' || s[j] == b'\'') {
                let value_start = j + 1;
                let Some(off) = memchr(s[j], &s[value_start..]) else {
                    return TagWalk { attrs, end: None };
                };
                value = Some(value_start..value_start + off);
                i = value_start + off + 1;
            } else {
                let value_start = j;
                while j < n && !is_ws(s[j]) && s[j] != b'>' {
                    j += 1;
                }
                value = Some(value_start..j);
                i = j;
            }
        }

        attrs.push(Attribute {
            name,
            value,
            span: name_start..i,
        });
    }
}

/// Find the '>' closing a tag that opens at `lt`, following attribute quoting.
pub fn find_tag_end(s: &[u8], lt: usize) -> Option<usize> {
    walk_tag(s, lt).end
}

/// Scan the attributes of a raw start tag `<name ...>`.
pub fn parse_attributes(tag: &[u8]) -> Vec<Attribute> {
    if tag.len() < 2 {
        return Vec::new();
    }
    walk_tag(tag, 0).attrs
}

/// Where a new attribute goes: right after the last attribute, or after the
/// tag name when there is none. Keeps any ` /` or `/` before `>` in place.
pub fn attribute_insert_point(tag: &[u8], attrs: &[Attribute]) -> usize {
    match attrs.last() {
        Some(last) => last.span.end,
        None => tag_name_end(tag, 0),
    }
}

/* ========================= Comments and raw text ========================= */

/// Index just past the end of a comment that opens at `i`.
///
/// `<!-->` and `<!--->` are complete (empty) comments.
fn comment_end(s: &[u8], i: usize) -> Option<usize> {
    // Assumes s[i..].starts_with("<!--")
    let body = i + 4;
    if s[body..].starts_with(b">") {
        return Some(body + 1);
    }
    if s[body..].starts_with(b"->") {
        return Some(body + 2);
    }
    memmem::find(&s[body..], b"-->").map(|off| body + off + 3)
}

/// Index of the `</name` end tag closing a raw-text element whose content
/// starts at `i`, or the input length when it never closes.
fn raw_text_end(src: &[u8], i: usize, name: &[u8]) -> usize {
    let n = src.len();
    let mut j = i;
    while let Some(pos) = memchr(b'<', &src[j..]).map(|off| j + off) {
        let name_start = pos + 2;
        let name_end = name_start + name.len();
        if name_end <= n
            && src[pos + 1] == b'/'
            && src[name_start..name_end].eq_ignore_ascii_case(name)
            && (name_end == n || ends_tag_name(src[name_end]))
        {
            return pos;
        }
        j = pos + 1;
    }
    n
}

/* ============================== Start tags ============================== */

/// A start tag found in the input.
#[derive(Clone, Copy, Debug)]
pub struct StartTag<'a> {
    /// Byte offset of `<`.
    pub start: usize,
    /// The raw tag bytes, `<` through `>`.
    pub raw: &'a [u8],
    pub name: &'a [u8],
}

impl StartTag<'_> {
    /// Byte offset just past `>`.
    pub fn end(&self) -> usize {
        self.start + self.raw.len()
    }

    pub fn is(&self, name: &str) -> bool {
        self.name.eq_ignore_ascii_case(name.as_bytes())
    }
}

/// Iterate over the start tags of `src` in document order.
pub fn start_tags(src: &[u8]) -> StartTags<'_> {
    StartTags { src, pos: 0 }
}

pub struct StartTags<'a> {
    src: &'a [u8],
    pos: usize,
}

impl<'a> Iterator for StartTags<'a> {
    type Item = StartTag<'a>;

    fn next(&mut self) -> Option<StartTag<'a>> {
        let src = self.src;
        let n = src.len();

        while self.pos < n {
            let Some(lt) = memchr(b'<', &src[self.pos..]).map(|off| self.pos + off) else {
                self.pos = n;
                break;
            };
            let next = src.get(lt + 1).copied().unwrap_or(0);
            let after = src.get(lt + 2).copied().unwrap_or(0);

            // Comments
            if src[lt..].starts_with(b"<!--") {
                self.pos = comment_end(src, lt).unwrap_or(n);
                continue;
            }

            // End tags carry attributes like start tags
            if next == b'/' && after.is_ascii_alphabetic() {
                self.pos = find_tag_end(src, lt).map_or(n, |end| end + 1);
                continue;
            }

            // Doctype, CDATA, processing instructions, `</>` and `</ x>`: up to the first '>'
            if next == b'!' || next == b'?' || next == b'/' {
                self.pos = memchr(b'>', &src[lt..]).map_or(n, |off| lt + off + 1);
                continue;
            }

            if !next.is_ascii_alphabetic() {
                // literal '<'
                self.pos = lt + 1;
                continue;
            }

            let Some(end) = find_tag_end(src, lt) else {
                // Unterminated tag to EOF; treat literally
                self.pos = n;
                break;
            };
            let raw = &src[lt..=end];
            let name = &src[lt + 1..tag_name_end(src, lt)];

            // A '/' before '>' does not stop raw-text content
            self.pos = if is_raw_text(name) {
                raw_text_end(src, end + 1, name)
            } else {
                end + 1
            };
            tracing::trace!(start = lt, len = raw.len(), "start tag");

            return Some(StartTag {
                start: lt,
                raw,
                name,
            });
        }
        None
    }
}
