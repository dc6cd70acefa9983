//! Input sequences, orientation normalization and the broadcast frame.
//!
//! Sequences are stored 1-indexed: index 0 holds a sentinel that is never
//! compared and stands for "no character consumed yet". After normalization
//! the dominant sequence is never shorter than the secondary one, and the
//! [`Orientation`] tag records whether the input order had to be reversed.

use std::io::{BufRead, BufReader, Read};
use std::path::Path;

use crate::error::{LcsError, Which};
use crate::group::Collective;
use crate::shape::DiagonalShape;

const SENTINEL: u8 = b'/';
const FRAME_HEADER_LEN: usize = 1 + 8 + 8;

/// A 1-indexed character sequence with a sentinel at index 0.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sequence {
    data: Vec<u8>,
}

impl Sequence {
    pub fn new(chars: &[u8]) -> Self {
        let mut data = Vec::with_capacity(chars.len() + 1);
        data.push(SENTINEL);
        data.extend_from_slice(chars);
        Self { data }
    }

    /// Number of characters, excluding the sentinel.
    #[inline]
    pub fn len(&self) -> usize {
        self.data.len() - 1
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Character at 1-based index `i`; index 0 is the sentinel.
    #[inline]
    pub fn at(&self, i: usize) -> u8 {
        self.data[i]
    }

    /// The characters without the sentinel.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.data[1..]
    }
}

/// Whether the dominant sequence is the first input or the second.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    /// The first input is the dominant (row) sequence.
    AsGiven,
    /// The inputs were swapped: the second input is the dominant sequence.
    Swapped,
}

impl Orientation {
    #[inline]
    pub fn is_swapped(self) -> bool {
        matches!(self, Orientation::Swapped)
    }

    /// Whether a backtrack step over a mismatch should try the row
    /// predecessor first. Rows consume the first input unless swapped.
    #[inline]
    pub fn prefers_row_step(self) -> bool {
        !self.is_swapped()
    }
}

/// The normalized pair of sequences, replicated read-only on every rank.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SequencePair {
    dominant: Sequence,
    secondary: Sequence,
    orientation: Orientation,
}

impl SequencePair {
    /// Normalize `first`/`second` so the longer one becomes dominant.
    pub fn new(first: &[u8], second: &[u8]) -> Self {
        if first.len() < second.len() {
            Self {
                dominant: Sequence::new(second),
                secondary: Sequence::new(first),
                orientation: Orientation::Swapped,
            }
        } else {
            Self {
                dominant: Sequence::new(first),
                secondary: Sequence::new(second),
                orientation: Orientation::AsGiven,
            }
        }
    }

    #[inline]
    pub fn dominant(&self) -> &Sequence {
        &self.dominant
    }

    #[inline]
    pub fn secondary(&self) -> &Sequence {
        &self.secondary
    }

    #[inline]
    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    pub fn shape(&self) -> DiagonalShape {
        DiagonalShape::new(self.dominant.len(), self.secondary.len())
    }

    /// The two sequences in their original input order.
    pub fn original(&self) -> (&[u8], &[u8]) {
        match self.orientation {
            Orientation::AsGiven => (self.dominant.as_bytes(), self.secondary.as_bytes()),
            Orientation::Swapped => (self.secondary.as_bytes(), self.dominant.as_bytes()),
        }
    }

    /// Serialize into a single broadcast frame:
    /// `[swapped u8][dominant_len u64 LE][secondary_len u64 LE][dominant][secondary]`.
    pub fn encode(&self) -> Vec<u8> {
        let d = self.dominant.as_bytes();
        let s = self.secondary.as_bytes();
        let mut frame = Vec::with_capacity(FRAME_HEADER_LEN + d.len() + s.len());
        frame.push(u8::from(self.orientation.is_swapped()));
        frame.extend_from_slice(&(d.len() as u64).to_le_bytes());
        frame.extend_from_slice(&(s.len() as u64).to_le_bytes());
        frame.extend_from_slice(d);
        frame.extend_from_slice(s);
        frame
    }

    pub fn decode(frame: &[u8]) -> Result<Self, LcsError> {
        if frame.len() < FRAME_HEADER_LEN {
            return Err(LcsError::Corrupt(format!(
                "frame has {} bytes, header needs {FRAME_HEADER_LEN}",
                frame.len()
            )));
        }
        let orientation = match frame[0] {
            0 => Orientation::AsGiven,
            1 => Orientation::Swapped,
            other => return Err(LcsError::Corrupt(format!("bad orientation tag {other}"))),
        };
        let read_len = |at: usize| -> Result<usize, LcsError> {
            let mut raw = [0u8; 8];
            raw.copy_from_slice(&frame[at..at + 8]);
            usize::try_from(u64::from_le_bytes(raw))
                .map_err(|_| LcsError::Corrupt("length exceeds address space".into()))
        };
        let d_len = read_len(1)?;
        let s_len = read_len(9)?;
        let body = &frame[FRAME_HEADER_LEN..];
        if d_len.checked_add(s_len) != Some(body.len()) {
            return Err(LcsError::Corrupt(format!(
                "declared {d_len}+{s_len} bytes, body has {}",
                body.len()
            )));
        }
        if d_len < s_len {
            return Err(LcsError::Corrupt("secondary longer than dominant".into()));
        }
        let (d, s) = body.split_at(d_len);
        Ok(Self {
            dominant: Sequence::new(d),
            secondary: Sequence::new(s),
            orientation,
        })
    }

    /// Replicate the coordinator's pair on every rank.
    ///
    /// The coordinator passes `Some(pair)`; every other rank passes `None`.
    pub fn share<C: Collective + ?Sized>(
        group: &C,
        pair: Option<SequencePair>,
    ) -> Result<SequencePair, LcsError> {
        let mut frame = match (&pair, group.is_coordinator()) {
            (Some(p), true) => p.encode(),
            _ => Vec::new(),
        };
        group.broadcast_bytes(&mut frame);
        match pair {
            Some(p) if group.is_coordinator() => Ok(p),
            _ => SequencePair::decode(&frame),
        }
    }
}

/// Read and normalize the sequence pair stored at `path`.
pub fn load_file(path: impl AsRef<Path>) -> Result<SequencePair, LcsError> {
    let path = path.as_ref();
    let file = std::fs::File::open(path).map_err(|source| LcsError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    parse(file).map_err(|err| match err {
        ParseError::Io(source) => LcsError::Open {
            path: path.to_path_buf(),
            source,
        },
        ParseError::Lcs(err) => err,
    })
}

enum ParseError {
    Io(std::io::Error),
    Lcs(LcsError),
}

impl From<std::io::Error> for ParseError {
    fn from(err: std::io::Error) -> Self {
        ParseError::Io(err)
    }
}

impl From<LcsError> for ParseError {
    fn from(err: LcsError) -> Self {
        ParseError::Lcs(err)
    }
}

/// Parse `height width`, then the first sequence line, then the second.
pub fn parse_str(input: &str) -> Result<SequencePair, LcsError> {
    parse(input.as_bytes()).map_err(|err| match err {
        ParseError::Io(err) => LcsError::Header(err.to_string()),
        ParseError::Lcs(err) => err,
    })
}

fn parse<R: Read>(reader: R) -> Result<SequencePair, ParseError> {
    let mut reader = BufReader::new(reader);
    let mut header = String::new();
    if reader.read_line(&mut header)? == 0 {
        return Err(LcsError::Header("input is empty".into()).into());
    }
    let mut fields = header.split_whitespace();
    let mut dimension = |name: &str| -> Result<usize, LcsError> {
        let field = fields
            .next()
            .ok_or_else(|| LcsError::Header(format!("missing {name}")))?;
        field
            .parse::<usize>()
            .map_err(|_| LcsError::Header(format!("{name} '{field}' is not a length")))
    };
    let height = dimension("height")?;
    let width = dimension("width")?;
    if fields.next().is_some() {
        return Err(LcsError::Header("trailing fields after width".into()).into());
    }

    let first = read_sequence(&mut reader, Which::First, height)?;
    let second = read_sequence(&mut reader, Which::Second, width)?;
    Ok(SequencePair::new(&first, &second))
}

fn read_sequence<R: BufRead>(
    reader: &mut R,
    which: Which,
    declared: usize,
) -> Result<Vec<u8>, ParseError> {
    let mut line = Vec::with_capacity(declared + 2);
    if reader.read_until(b'\n', &mut line)? == 0 {
        if declared == 0 {
            return Ok(line);
        }
        return Err(LcsError::Truncated { which }.into());
    }
    if line.last() == Some(&b'\n') {
        line.pop();
    }
    if line.last() == Some(&b'\r') {
        line.pop();
    }
    if line.len() != declared {
        return Err(LcsError::LengthMismatch {
            which,
            declared,
            actual: line.len(),
        }
        .into());
    }
    Ok(line)
}
