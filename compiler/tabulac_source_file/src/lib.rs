//! Contains the code related to the source code input.

use std::{
    cmp::Ordering,
    fmt::Debug,
    fs::File,
    io::Read,
    ops::Range,
    path::PathBuf,
};

use getset::Getters;
use thiserror::Error;

/// Represents an error that occurs when loading/creating a source file.
#[derive(Debug, Error)]
#[allow(missing_docs)]
pub enum Error {
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Utf8(#[from] std::str::Utf8Error),
}

/// Represents a source file input for the compiler.
///
/// The line byte ranges are computed once at construction so that byte
/// indices can be translated to [`Location`]s by binary search.
#[derive(Clone, PartialEq, Eq, Getters)]
pub struct SourceFile {
    content: String,

    /// Gets the full path to the source file.
    #[get = "pub"]
    full_path: PathBuf,

    /// The byte ranges for each line in the source file (including the
    /// newline)
    lines: Vec<Range<usize>>,
}

#[allow(clippy::missing_fields_in_debug)]
impl Debug for SourceFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SourceFile")
            .field("full_path", &self.full_path)
            .field("lines", &self.lines)
            .finish()
    }
}

impl SourceFile {
    /// Creates a new inline source file
    #[must_use]
    pub fn new(content: String, full_path: PathBuf) -> Self {
        let lines = get_line_byte_positions(&content);
        Self { content, full_path, lines }
    }

    /// Gets the content of the source file.
    #[must_use]
    #[allow(clippy::missing_const_for_fn)]
    pub fn content(&self) -> &str { &self.content }

    /// Gets the number of lines in the source file.
    #[must_use]
    pub fn line_count(&self) -> usize { self.lines.len() }

    /// Gets the line of the source file at the given line number.
    ///
    /// The line number starts at 0.
    #[must_use]
    pub fn get_line(&self, line: usize) -> Option<&str> {
        self.lines.get(line).map(|range| &self.content[range.clone()])
    }

    /// Determines in which line number the given byte index is located (0
    /// indexed).
    #[must_use]
    pub fn get_line_of_byte_index(
        &self,
        byte_index: ByteIndex,
    ) -> Option<usize> {
        // gets the line number by binary searching the line ranges
        self.lines
            .binary_search_by(|range| {
                if range.contains(&byte_index) {
                    Ordering::Equal
                } else if byte_index < range.start {
                    Ordering::Greater
                } else {
                    Ordering::Less
                }
            })
            .ok()
    }

    /// Gets the [`Location`] of the given byte index.
    ///
    /// Returns [`None`] if the byte index doesn't land on a character
    /// boundary or is out of range.
    #[must_use]
    pub fn get_location(&self, byte_index: ByteIndex) -> Option<Location> {
        if !self.content.is_char_boundary(byte_index) {
            return None;
        }

        let line = self.get_line_of_byte_index(byte_index)?;

        let line_starting_byte_index = self.lines[line].start;
        let line_str = self.get_line(line)?;

        // gets the column number by iterating through the utf-8 characters
        let column = line_str
            .char_indices()
            .take_while(|(i, _)| *i + line_starting_byte_index < byte_index)
            .count();

        Some(Location { line, column })
    }

    /// Gets the string slice the given [`Span`] covers.
    ///
    /// Returns [`None`] if the span is out of range or doesn't land on
    /// character boundaries.
    #[must_use]
    pub fn get_span_str(&self, span: Span) -> Option<&str> {
        self.content.get(span.range())
    }

    /// Loads the source file from the given file path.
    ///
    /// # Errors
    /// - [`Error::Io`]: Error occurred when reading the file.
    /// - [`Error::Utf8`]: Error occurred when converting the read bytes to a
    ///   string.
    pub fn load(mut file: File, path: PathBuf) -> Result<Self, Error> {
        let mut bytes = Vec::new();
        file.read_to_end(&mut bytes)?;

        let string = String::from_utf8(bytes).map_err(|x| x.utf8_error())?;

        Ok(Self::new(string, path))
    }
}

/// Is an unsigned integer that represents a byte index in the source code.
pub type ByteIndex = usize;

/// Represents a range of characters in a source file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Span {
    /// Gets the start byte index of the span.
    pub start: ByteIndex,

    /// Gets the end byte index of the span (exclusive).
    pub end: ByteIndex,
}

impl Span {
    /// Creates a span from the given start and end byte indices in the
    /// source file.
    #[must_use]
    pub fn new(start: ByteIndex, end: ByteIndex) -> Self {
        assert!(start <= end, "start index is greater than end index");

        Self { start, end }
    }

    /// Joins the starting position of this span with the end position of the
    /// given span.
    #[must_use]
    pub fn join(&self, end: &Self) -> Self {
        assert!(
            self.start <= end.end,
            "start index is greater than end index"
        );

        Self { start: self.start, end: end.end }
    }

    /// Gets the byte range of the span.
    #[must_use]
    pub const fn range(&self) -> Range<ByteIndex> { self.start..self.end }

    /// Gets the length of the span in bytes.
    #[must_use]
    pub const fn len(&self) -> usize { self.end - self.start }

    /// Returns `true` if the span covers no bytes.
    #[must_use]
    pub const fn is_empty(&self) -> bool { self.start == self.end }
}

/// Is a struct pointing to a particular location in a source file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Location {
    /// The line number of the location (starts at 0).
    pub line: usize,

    /// The column number of the location (starts at 0).
    pub column: usize,
}

impl Location {
    /// Creates a new location with the given line and column numbers.
    #[must_use]
    pub const fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

/// Represents an element that is located within a source file.
pub trait SourceElement {
    /// Gets the span location of the element.
    fn span(&self) -> Span;
}

impl<T: SourceElement> SourceElement for Box<T> {
    fn span(&self) -> Span { self.as_ref().span() }
}

fn get_line_byte_positions(text: &str) -> Vec<Range<usize>> {
    let mut current_position = 0;
    let mut results = Vec::new();

    let mut skip = false;

    for (byte, char) in text.char_indices() {
        if skip {
            skip = false;
            continue;
        }

        // ordinary lf
        if char == '\n' {
            #[allow(clippy::range_plus_one)]
            results.push(current_position..byte + 1);

            current_position = byte + 1;
        }

        // crlf
        if char == '\r' {
            if text.as_bytes().get(byte + 1) == Some(&b'\n') {
                #[allow(clippy::range_plus_one)]
                results.push(current_position..byte + 2);

                current_position = byte + 2;

                skip = true;
            } else {
                #[allow(clippy::range_plus_one)]
                results.push(current_position..byte + 1);

                current_position = byte + 1;
            }
        }
    }

    results.push(current_position..text.len());

    results
}

#[cfg(test)]
mod tests;
