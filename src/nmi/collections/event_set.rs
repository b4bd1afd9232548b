// nmimgr/src/nmi/collections/event_set.rs

//! # Bounded Event Set
//!
//! A fixed-capacity, allocation-free set of event codes. It keeps the codes
//! in insertion order together with a 256-bit membership bitmap, so lookups
//! on the interrupt path are a single word test and the set carries its own
//! length (code 0 is an ordinary member, not an end marker).

use crate::nmi::ds::{EventCode, ParseError, EVENT_CODE_COUNT};
use arrayvec::ArrayVec;
use core::fmt;

/// Maximum number of codes an `EventSet` can hold.
pub const EVENT_SET_CAPACITY: usize = EVENT_CODE_COUNT;

const WORDS: usize = EVENT_CODE_COUNT / 64;

#[derive(Clone)]
pub struct EventSet {
    codes: ArrayVec<EventCode, EVENT_SET_CAPACITY>,
    present: [u64; WORDS],
}

impl EventSet {
    /// Creates an empty set.
    pub const fn new() -> Self {
        Self {
            codes: ArrayVec::new_const(),
            present: [0; WORDS],
        }
    }

    #[inline]
    const fn slot(code: EventCode) -> (usize, u64) {
        ((code >> 6) as usize, 1u64 << (code & 63))
    }

    /// Adds `code` to the set.
    ///
    /// Returns `Ok(true)` if the code was new, `Ok(false)` if it was already
    /// present.
    pub fn insert(&mut self, code: EventCode) -> Result<bool, ParseError> {
        if self.contains(code) {
            return Ok(false);
        }
        self.codes
            .try_push(code)
            .map_err(|_| ParseError::CapacityExceeded)?;
        let (word, bit) = Self::slot(code);
        self.present[word] |= bit;
        Ok(true)
    }

    /// Exact membership test. Constant time, no allocation.
    #[inline]
    pub fn contains(&self, code: EventCode) -> bool {
        let (word, bit) = Self::slot(code);
        self.present[word] & bit != 0
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    /// The codes in insertion order.
    pub fn as_slice(&self) -> &[EventCode] {
        &self.codes
    }

    pub fn iter(&self) -> core::iter::Copied<core::slice::Iter<'_, EventCode>> {
        self.codes.iter().copied()
    }

    /// Codes in ascending order, independent of insertion order.
    pub fn sorted(&self) -> impl Iterator<Item = EventCode> + '_ {
        (0..=EventCode::MAX).filter(move |&code| self.contains(code))
    }

    /// Codes present in both sets, ascending.
    pub fn intersection<'a>(&'a self, other: &'a EventSet) -> impl Iterator<Item = EventCode> + 'a {
        self.sorted().filter(move |&code| other.contains(code))
    }
}

impl Default for EventSet {
    fn default() -> Self {
        Self::new()
    }
}

/// Two sets are equal when they hold the same codes, whatever the order they
/// were inserted in.
impl PartialEq for EventSet {
    fn eq(&self, other: &Self) -> bool {
        self.present == other.present
    }
}

impl Eq for EventSet {}

impl fmt::Debug for EventSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

/// Renders the set as a compact range list, e.g. `0-2,5-13,255`.
impl fmt::Display for EventSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut run: Option<(EventCode, EventCode)> = None;
        let mut first = true;

        let mut flush = |f: &mut fmt::Formatter<'_>, (start, end): (EventCode, EventCode)| {
            if !first {
                f.write_str(",")?;
            }
            first = false;
            if start == end {
                write!(f, "{}", start)
            } else {
                write!(f, "{}-{}", start, end)
            }
        };

        for code in self.sorted() {
            run = match run {
                Some((start, end)) if end.checked_add(1) == Some(code) => Some((start, code)),
                Some(done) => {
                    flush(f, done)?;
                    Some((code, code))
                }
                None => Some((code, code)),
            };
        }
        if let Some(done) = run {
            flush(f, done)?;
        }
        Ok(())
    }
}
