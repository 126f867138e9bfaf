//! Variable-length bytes vector and borrowed byte views.
//!
//! Cells never own their payload. Each cell is an `(segment, offset, len)`
//! triple into one of the vector's backing segments. Producers either append
//! into a shared arena segment, hand over a whole buffer per cell, or point
//! several cells at one buffer they supply.

use std::borrow::Cow;
use std::fmt;
use std::str::Utf8Error;

use super::{check_row, null_access, NullMask, VectorKind};

/// A non-owning `[offset, offset + len)` window into a backing buffer.
///
/// Equality compares the windowed bytes only, regardless of which buffer
/// they live in.
#[derive(Clone, Copy)]
pub struct ByteView<'a> {
    buffer: &'a [u8],
    offset: usize,
    len: usize,
}

impl<'a> ByteView<'a> {
    /// Creates a view into `buffer`.
    ///
    /// # Panics
    ///
    /// Panics if the window extends past the end of `buffer`.
    #[must_use]
    #[track_caller]
    pub fn new(buffer: &'a [u8], offset: usize, len: usize) -> Self {
        assert!(
            offset.checked_add(len).is_some_and(|end| end <= buffer.len()),
            "byte view [{offset}, {offset}+{len}) exceeds buffer of length {}",
            buffer.len()
        );
        ByteView {
            buffer,
            offset,
            len,
        }
    }

    /// The whole backing buffer, including bytes outside this view.
    #[must_use]
    pub fn buffer(&self) -> &'a [u8] {
        self.buffer
    }

    #[must_use]
    pub fn offset(&self) -> usize {
        self.offset
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The viewed bytes.
    #[inline]
    #[must_use]
    pub fn as_slice(&self) -> &'a [u8] {
        &self.buffer[self.offset..self.offset + self.len]
    }

    /// Returns true when the view covers its entire backing buffer.
    #[must_use]
    pub fn spans_buffer(&self) -> bool {
        self.len == self.buffer.len()
    }

    /// Returns the backing buffer itself when the view spans it, otherwise
    /// a compacted copy of the window. The result never contains bytes of
    /// neighboring cells.
    #[must_use]
    pub fn to_bytes(&self) -> Cow<'a, [u8]> {
        if self.spans_buffer() {
            Cow::Borrowed(self.buffer)
        } else {
            Cow::Owned(self.as_slice().to_vec())
        }
    }

    /// Decodes the window as UTF-8.
    ///
    /// # Errors
    ///
    /// Returns the decode error if the window is not valid UTF-8.
    pub fn to_str(&self) -> Result<&'a str, Utf8Error> {
        std::str::from_utf8(self.as_slice())
    }
}

impl PartialEq for ByteView<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl Eq for ByteView<'_> {}

impl fmt::Debug for ByteView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ByteView")
            .field("offset", &self.offset)
            .field("len", &self.len)
            .field("bytes", &String::from_utf8_lossy(self.as_slice()))
            .finish()
    }
}

/// Identifies a backing segment of a [`BytesVector`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SegmentId(usize);

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct Cell {
    segment: usize,
    offset: usize,
    len: usize,
}

#[derive(Debug, Clone, PartialEq)]
enum Encoding {
    Plain {
        segments: Vec<Vec<u8>>,
        cells: Vec<Cell>,
        arena: Option<usize>,
    },
    Dictionary {
        dictionary: Box<BytesVector>,
        ids: Vec<u32>,
    },
}

/// Variable-length binary/string values.
#[derive(Debug, Clone, PartialEq)]
pub struct BytesVector {
    encoding: Encoding,
    nulls: NullMask,
}

impl Default for BytesVector {
    fn default() -> Self {
        Self::new()
    }
}

impl BytesVector {
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        BytesVector {
            encoding: Encoding::Plain {
                segments: Vec::new(),
                cells: Vec::with_capacity(capacity),
                arena: None,
            },
            nulls: NullMask::new(),
        }
    }

    /// Creates a dictionary-encoded vector whose rows are ids into
    /// `dictionary`.
    #[must_use]
    pub fn dictionary_encoded(dictionary: BytesVector) -> Self {
        BytesVector {
            encoding: Encoding::Dictionary {
                dictionary: Box::new(dictionary),
                ids: Vec::new(),
            },
            nulls: NullMask::new(),
        }
    }

    /// Creates a plain vector where `None` marks a null row. Values are
    /// appended to one shared arena.
    pub fn from_options<'b>(values: impl IntoIterator<Item = Option<&'b [u8]>>) -> Self {
        let mut vector = Self::new();
        for value in values {
            match value {
                Some(bytes) => vector.append(bytes),
                None => vector.push_null(),
            }
        }
        vector
    }

    /// Creates a plain vector of non-null strings sharing one arena.
    pub fn from_strs<'b>(values: impl IntoIterator<Item = &'b str>) -> Self {
        Self::from_options(values.into_iter().map(|s| Some(s.as_bytes())))
    }

    #[must_use]
    pub fn is_dictionary_encoded(&self) -> bool {
        matches!(self.encoding, Encoding::Dictionary { .. })
    }

    /// The dictionary of a dictionary-encoded vector.
    #[must_use]
    pub fn dictionary(&self) -> Option<&BytesVector> {
        match &self.encoding {
            Encoding::Dictionary { dictionary, .. } => Some(dictionary),
            Encoding::Plain { .. } => None,
        }
    }

    /// Copies `bytes` into the shared arena segment as a new cell.
    ///
    /// # Panics
    ///
    /// Panics if the vector is dictionary-encoded.
    #[track_caller]
    pub fn append(&mut self, bytes: &[u8]) {
        let (segments, cells, arena) = self.plain_mut();
        let segment = *arena.get_or_insert_with(|| {
            segments.push(Vec::new());
            segments.len() - 1
        });
        let buffer = &mut segments[segment];
        let offset = buffer.len();
        buffer.extend_from_slice(bytes);
        cells.push(Cell {
            segment,
            offset,
            len: bytes.len(),
        });
    }

    /// Takes ownership of `buffer` as a cell that spans it entirely.
    ///
    /// # Panics
    ///
    /// Panics if the vector is dictionary-encoded.
    #[track_caller]
    pub fn push_buffer(&mut self, buffer: Vec<u8>) {
        let len = buffer.len();
        let segment = self.add_segment(buffer);
        self.push_view(segment, 0, len);
    }

    /// Registers a backing buffer that later cells can point into with
    /// [`BytesVector::push_view`].
    ///
    /// # Panics
    ///
    /// Panics if the vector is dictionary-encoded.
    #[track_caller]
    pub fn add_segment(&mut self, buffer: Vec<u8>) -> SegmentId {
        let (segments, _, _) = self.plain_mut();
        segments.push(buffer);
        SegmentId(segments.len() - 1)
    }

    /// Adds a cell viewing `[offset, offset + len)` of a registered segment.
    ///
    /// # Panics
    ///
    /// Panics if the vector is dictionary-encoded or the window exceeds the
    /// segment.
    #[track_caller]
    pub fn push_view(&mut self, segment: SegmentId, offset: usize, len: usize) {
        let (segments, cells, _) = self.plain_mut();
        let buffer_len = segments[segment.0].len();
        assert!(
            offset.checked_add(len).is_some_and(|end| end <= buffer_len),
            "cell [{offset}, {offset}+{len}) exceeds segment of length {buffer_len}"
        );
        cells.push(Cell {
            segment: segment.0,
            offset,
            len,
        });
    }

    /// Adds a row holding dictionary entry `id`. Null rows go through
    /// [`BytesVector::push_null`], never through a null dictionary entry.
    ///
    /// # Panics
    ///
    /// Panics if the vector is not dictionary-encoded, `id` is not a
    /// dictionary entry, or the entry is null.
    #[track_caller]
    pub fn push_id(&mut self, id: u32) {
        match &mut self.encoding {
            Encoding::Dictionary { dictionary, ids } => {
                assert!(
                    (id as usize) < dictionary.len(),
                    "dictionary id {id} out of bounds for dictionary of length {}",
                    dictionary.len()
                );
                assert!(
                    !dictionary.is_null_at(id as usize),
                    "dictionary id {id} refers to a null entry"
                );
                ids.push(id);
            }
            Encoding::Plain { .. } => panic!("push_id on a plain bytes vector"),
        }
    }

    pub fn push_null(&mut self) {
        let row = self.len();
        self.nulls.set_null(row);
        match &mut self.encoding {
            Encoding::Plain { cells, .. } => cells.push(Cell::default()),
            Encoding::Dictionary { ids, .. } => ids.push(0),
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        match &self.encoding {
            Encoding::Plain { cells, .. } => cells.len(),
            Encoding::Dictionary { ids, .. } => ids.len(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[inline]
    #[must_use]
    pub fn is_null_at(&self, row: usize) -> bool {
        self.nulls.is_null(row)
    }

    /// Returns a view of the cell at `row`.
    ///
    /// Dictionary-encoded rows resolve to a view of their dictionary entry.
    ///
    /// # Panics
    ///
    /// Panics if `row` is out of bounds or null.
    #[inline]
    #[must_use]
    #[track_caller]
    pub fn get_bytes(&self, row: usize) -> ByteView<'_> {
        check_row(row, self.len());
        if self.nulls.is_null(row) {
            null_access(VectorKind::Bytes, row);
        }
        match &self.encoding {
            Encoding::Plain {
                segments, cells, ..
            } => {
                let cell = cells[row];
                ByteView::new(&segments[cell.segment], cell.offset, cell.len)
            }
            Encoding::Dictionary { dictionary, ids } => dictionary.get_bytes(ids[row] as usize),
        }
    }

    #[must_use]
    pub fn nulls(&self) -> &NullMask {
        &self.nulls
    }

    /// Clears all rows and backing segments. A dictionary-encoded vector
    /// keeps its dictionary.
    pub fn reset(&mut self) {
        match &mut self.encoding {
            Encoding::Plain {
                segments,
                cells,
                arena,
            } => {
                segments.clear();
                cells.clear();
                *arena = None;
            }
            Encoding::Dictionary { ids, .. } => ids.clear(),
        }
        self.nulls.clear();
    }

    #[track_caller]
    fn plain_mut(&mut self) -> (&mut Vec<Vec<u8>>, &mut Vec<Cell>, &mut Option<usize>) {
        match &mut self.encoding {
            Encoding::Plain {
                segments,
                cells,
                arena,
            } => (segments, cells, arena),
            Encoding::Dictionary { .. } => {
                panic!("plain cell write on a dictionary-encoded bytes vector")
            }
        }
    }
}
