//! Prediction Trace Store.
//!
//! Parses the recorded access log of a prior run into the immutable,
//! chronologically ordered sequence of predictions the engine replays.
//!
//! Each line of the log is one recorded access:
//!
//! ```text
//! <tick>: <component>: <freeform prefix> <status> for <type> [<hex-lo>:<hex-hi>] <flags>
//! 2000: system.l2cache: access miss for ReadSharedReq [28540:2857f] IF
//! ```
//!
//! Only the tick, the status word, the request type (to drop eviction
//! traffic) and the lower bound of the address range are consumed. Lines that
//! cannot be parsed are rejected with a warning instead of being recorded
//! with placeholder fields.

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

use crate::common::constants::{CLEAN_EVICT, MISS_STATUS, WRITEBACK_PREFIX};
use crate::common::{ParseError, PhysAddr, Tick, TraceError};

/// One recorded access from the trace.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PredictionEntry {
    /// Tick at which the access was recorded in the prior run.
    pub recorded_tick: Tick,
    /// Accessed address (lower bound of the recorded range).
    pub addr: PhysAddr,
    /// Whether the prior run missed on this access.
    pub is_miss: bool,
}

impl PredictionEntry {
    /// Creates a new prediction entry.
    pub const fn new(recorded_tick: Tick, addr: u64, is_miss: bool) -> Self {
        Self {
            recorded_tick,
            addr: PhysAddr::new(addr),
            is_miss,
        }
    }
}

/// Classification of a single trace line.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TraceLine {
    /// A demand access that becomes a prediction.
    Access(PredictionEntry),
    /// Clean-eviction or write-back traffic; not a prediction.
    Eviction,
    /// Empty or whitespace-only line.
    Blank,
}

/// Line counts gathered while loading a trace.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TraceSummary {
    /// Lines read, including blank ones.
    pub lines: usize,
    /// Lines recorded as predictions.
    pub accepted: usize,
    /// Eviction lines dropped by the filter.
    pub filtered: usize,
    /// Malformed lines rejected.
    pub rejected: usize,
}

/// Immutable, trace-ordered prediction sequence.
///
/// Entries keep the order in which they appear in the log; recorded ticks are
/// assumed non-decreasing and are never re-sorted.
#[derive(Clone, Debug, Default)]
pub struct PredictionTrace {
    entries: Vec<PredictionEntry>,
    summary: TraceSummary,
}

impl PredictionTrace {
    /// Loads a prediction trace from a file.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the recorded access log.
    ///
    /// # Errors
    ///
    /// Returns `TraceError::Io` if the file cannot be opened or read.
    /// Malformed lines are not errors; see [`PredictionTrace::summary`].
    pub fn load(path: impl AsRef<Path>) -> Result<Self, TraceError> {
        let path = path.as_ref();
        let io_error = |source| TraceError::Io {
            path: path.to_path_buf(),
            source,
        };

        let file = File::open(path).map_err(io_error)?;
        let trace = Self::from_reader(BufReader::new(file)).map_err(io_error)?;

        tracing::info!(
            path = %path.display(),
            predictions = trace.summary.accepted,
            filtered = trace.summary.filtered,
            rejected = trace.summary.rejected,
            "loaded prediction trace"
        );
        Ok(trace)
    }

    /// Parses a prediction trace from any buffered reader.
    ///
    /// Invalid UTF-8 is replaced rather than failing the whole load; the
    /// affected line is then judged by the normal line rules.
    ///
    /// # Errors
    ///
    /// Propagates I/O errors from the reader.
    pub fn from_reader<R: BufRead>(mut reader: R) -> io::Result<Self> {
        let mut entries = Vec::new();
        let mut summary = TraceSummary::default();
        let mut buf = Vec::new();

        loop {
            buf.clear();
            if reader.read_until(b'\n', &mut buf)? == 0 {
                break;
            }
            summary.lines += 1;

            let line = String::from_utf8_lossy(&buf);
            match parse_line(&line) {
                Ok(TraceLine::Access(entry)) => entries.push(entry),
                Ok(TraceLine::Eviction) => summary.filtered += 1,
                Ok(TraceLine::Blank) => {}
                Err(reason) => {
                    summary.rejected += 1;
                    tracing::warn!(
                        line = summary.lines,
                        %reason,
                        text = line.trim_end(),
                        "rejecting malformed trace line"
                    );
                }
            }
        }

        summary.accepted = entries.len();
        Ok(Self { entries, summary })
    }

    /// Builds a trace directly from already-parsed entries.
    pub fn from_entries(entries: Vec<PredictionEntry>) -> Self {
        let summary = TraceSummary {
            lines: entries.len(),
            accepted: entries.len(),
            ..TraceSummary::default()
        };
        Self { entries, summary }
    }

    /// Number of predictions.
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the trace holds no predictions.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the prediction at `index`, or `None` past the end.
    #[inline]
    pub fn get(&self, index: usize) -> Option<&PredictionEntry> {
        self.entries.get(index)
    }

    /// All predictions in trace order.
    #[inline]
    pub fn entries(&self) -> &[PredictionEntry] {
        &self.entries
    }

    /// Iterates predictions in trace order.
    pub fn iter(&self) -> std::slice::Iter<'_, PredictionEntry> {
        self.entries.iter()
    }

    /// Line counts from loading.
    pub const fn summary(&self) -> TraceSummary {
        self.summary
    }
}

impl<'a> IntoIterator for &'a PredictionTrace {
    type Item = &'a PredictionEntry;
    type IntoIter = std::slice::Iter<'a, PredictionEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// Returns `true` for request types that represent eviction traffic.
fn is_eviction(name: &str) -> bool {
    name == CLEAN_EVICT || name.starts_with(WRITEBACK_PREFIX)
}

/// Parses one trace line.
///
/// # Arguments
///
/// * `line` - A single line of the recorded access log.
///
/// # Returns
///
/// `TraceLine::Access` for a demand access, `TraceLine::Eviction` for
/// clean-eviction/write-back traffic (by request type or component name), or
/// `TraceLine::Blank` for empty lines.
///
/// # Errors
///
/// Returns the first `ParseError` encountered, in field order.
pub fn parse_line(line: &str) -> Result<TraceLine, ParseError> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(TraceLine::Blank);
    }

    let (tick_text, rest) = line.split_once(':').ok_or(ParseError::MissingTick)?;
    let tick_text = tick_text.trim();
    if tick_text.is_empty() {
        return Err(ParseError::MissingTick);
    }
    let recorded_tick = tick_text
        .parse::<Tick>()
        .map_err(|reason| ParseError::InvalidTick {
            text: tick_text.to_string(),
            reason,
        })?;

    let (component, body) = rest.split_once(':').ok_or(ParseError::MissingComponent)?;
    let component = component.trim();
    if component.is_empty() {
        return Err(ParseError::MissingComponent);
    }

    // The status clause ends where the address range begins.
    let (clause, range) = match body.split_once('[') {
        Some((clause, range)) => (clause, Some(range)),
        None => (body, None),
    };
    let words: Vec<&str> = clause.split_whitespace().collect();
    let for_at = words
        .iter()
        .rposition(|word| *word == "for")
        .filter(|&at| at > 0)
        .ok_or(ParseError::MissingStatus)?;
    let status = words[for_at - 1];
    let kind = words
        .get(for_at + 1)
        .copied()
        .ok_or(ParseError::MissingStatus)?;

    if is_eviction(kind) || is_eviction(component) {
        return Ok(TraceLine::Eviction);
    }

    let lo = range
        .and_then(|range| range.split([':', ']']).next())
        .map(str::trim)
        .filter(|lo| !lo.is_empty())
        .ok_or(ParseError::MissingAddress)?;
    let digits = lo
        .strip_prefix("0x")
        .or_else(|| lo.strip_prefix("0X"))
        .unwrap_or(lo);
    let addr = u64::from_str_radix(digits, 16).map_err(|reason| ParseError::InvalidAddress {
        text: lo.to_string(),
        reason,
    })?;

    Ok(TraceLine::Access(PredictionEntry::new(
        recorded_tick,
        addr,
        status == MISS_STATUS,
    )))
}
