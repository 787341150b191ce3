//! Locating an owner's region inside a shared configuration file.
//!
//! A region is the run of lines between two sentinel comments carrying the
//! owner identifier:
//!
//! ```text
//! ### Managed by shorewall-tenant app ID: <id> ###
//! ...owner's records...
//! ### End of shorewall-tenant app ID: <id> ###
//! ```
//!
//! The locator walks the buffer once, front to back, and stops at the first
//! end marker that follows a start marker. The first anomaly it meets is the
//! one reported.

use std::ops::Range;
use thiserror::Error;

use crate::owner::OwnerId;

const START_PREFIX: &str = "### Managed by shorewall-tenant app ID: ";
const END_PREFIX: &str = "### End of shorewall-tenant app ID: ";
const SUFFIX: &str = " ###";

/// Start sentinel line for `owner`, without newline.
pub fn start_marker(owner: &OwnerId) -> String {
    format!("{START_PREFIX}{owner}{SUFFIX}")
}

/// End sentinel line for `owner`, without newline.
pub fn end_marker(owner: &OwnerId) -> String {
    format!("{END_PREFIX}{owner}{SUFFIX}")
}

/// Inconsistent sentinel markers for one owner.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MalformedRegion {
    #[error("end marker for {owner} on line {line} without a preceding start marker")]
    DanglingEnd { owner: OwnerId, line: usize },

    #[error("start marker for {owner} on line {line} is never closed")]
    Unterminated { owner: OwnerId, line: usize },
}

/// Byte window of an owner's region.
///
/// When `found` is false the owner has no region yet and `start == end ==`
/// the buffer length, i.e. new content is appended at end of file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Region {
    pub start: usize,
    pub end: usize,
    pub found: bool,
}

impl Region {
    /// The whole buffer as a single, already existing region.
    pub fn whole(len: usize) -> Self {
        Self {
            start: 0,
            end: len,
            found: true,
        }
    }

    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// A line of a buffer with its byte position.
struct Line<'a> {
    number: usize,
    /// Offset of the first byte of the line.
    start: usize,
    /// Offset just past the line terminator.
    next: usize,
    text: &'a [u8],
}

/// Forward-only cursor over the lines of a buffer.
struct LineCursor<'a> {
    buf: &'a [u8],
    pos: usize,
    number: usize,
}

impl<'a> LineCursor<'a> {
    fn new(buf: &'a [u8]) -> Self {
        Self {
            buf,
            pos: 0,
            number: 0,
        }
    }
}

impl<'a> Iterator for LineCursor<'a> {
    type Item = Line<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.pos >= self.buf.len() {
            return None;
        }
        let rest = &self.buf[self.pos..];
        let (text, consumed) = match rest.iter().position(|&b| b == b'\n') {
            Some(i) => (&rest[..i], i + 1),
            None => (rest, rest.len()),
        };
        let line = Line {
            number: self.number + 1,
            start: self.pos,
            next: self.pos + consumed,
            text,
        };
        self.pos += consumed;
        self.number += 1;
        Some(line)
    }
}

fn contains(haystack: &[u8], needle: &[u8]) -> bool {
    haystack.windows(needle.len()).any(|w| w == needle)
}

/// Find the region belonging to `owner` in `buf`.
pub fn locate(owner: &OwnerId, buf: &[u8]) -> Result<Region, MalformedRegion> {
    let start_marker = start_marker(owner);
    let end_marker = end_marker(owner);

    let mut start: Option<(usize, usize)> = None;
    for line in LineCursor::new(buf) {
        if contains(line.text, start_marker.as_bytes()) {
            start = Some((line.next, line.number));
        } else if contains(line.text, end_marker.as_bytes()) {
            let Some((region_start, _)) = start else {
                return Err(MalformedRegion::DanglingEnd {
                    owner: *owner,
                    line: line.number,
                });
            };
            return Ok(Region {
                start: region_start,
                end: line.start,
                found: true,
            });
        }
    }

    match start {
        Some((_, line)) => Err(MalformedRegion::Unterminated {
            owner: *owner,
            line,
        }),
        None => Ok(Region {
            start: buf.len(),
            end: buf.len(),
            found: false,
        }),
    }
}

/// Surround `content` with the owner's sentinel lines.
pub fn wrap(owner: &OwnerId, content: &[u8]) -> Vec<u8> {
    let start = start_marker(owner);
    let end = end_marker(owner);

    let mut out = Vec::with_capacity(start.len() + content.len() + end.len() + 3);
    out.extend_from_slice(start.as_bytes());
    out.push(b'\n');
    out.extend_from_slice(content);
    if !content.is_empty() && !content.ends_with(b"\n") {
        out.push(b'\n');
    }
    out.extend_from_slice(end.as_bytes());
    out.push(b'\n');
    out
}
