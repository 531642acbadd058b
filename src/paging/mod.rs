//! Page replacement simulation.
//!
//! A reference string is replayed against a fixed number of frames. The resident
//! pages live in a [`FrameSet`] whose order encodes eviction priority: the head is
//! always the next victim. A [`Replacer`] decides how a hit reorders the set, which
//! is the only point where FIFO and LRU differ.

pub mod fifo;
pub mod lru;
pub mod reference;

use std::collections::VecDeque;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

use log::{debug, trace};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::value_err;

pub use fifo::FifoReplacer;
pub use lru::LruReplacer;
pub use reference::parse_reference_string;

pub type PageId = i64;

/// Resident pages in eviction order, head first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameSet {
    pages: VecDeque<PageId>,
    capacity: usize,
}

impl FrameSet {
    pub fn new(capacity: usize) -> Self {
        Self { pages: VecDeque::with_capacity(capacity), capacity }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.pages.len() >= self.capacity
    }

    pub fn contains(&self, page: PageId) -> bool {
        self.pages.contains(&page)
    }

    /// Admit a page at the tail. The caller makes room first.
    pub fn push_back(&mut self, page: PageId) {
        debug_assert!(!self.is_full(), "frame set overflow admitting page {page}");
        debug_assert!(!self.contains(page), "page {page} is already resident");
        self.pages.push_back(page);
    }

    pub fn pop_front(&mut self) -> Option<PageId> {
        self.pages.pop_front()
    }

    /// Move a resident page to the tail. Returns false if the page is not resident.
    pub fn move_to_back(&mut self, page: PageId) -> bool {
        let Some(index) = self.pages.iter().position(|&p| p == page) else {
            return false;
        };
        if let Some(page) = self.pages.remove(index) {
            self.pages.push_back(page);
        }
        true
    }

    /// Copy of the resident pages, head first.
    pub fn pages(&self) -> Vec<PageId> {
        self.pages.iter().copied().collect()
    }
}

/// Replacer decides which resident page to give up once all frames are in use.
pub trait Replacer {
    fn policy(&self) -> Policy;

    /// Record an access to a page that is already resident.
    fn record_hit(&self, frames: &mut FrameSet, page: PageId);

    /// Pick and remove the victim from a full frame set. Return None if nothing
    /// can be evicted.
    fn evict(&self, frames: &mut FrameSet) -> Option<PageId> {
        frames.pop_front()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Status {
    Hit,
    Miss,
}

impl Display for Status {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Status::Hit => f.pad("Hit"),
            Status::Miss => f.pad("Miss"),
        }
    }
}

/// Frame contents right after one reference was served.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessSnapshot {
    pub page: PageId,
    pub frames: Vec<PageId>,
    pub status: Status,
}

impl AccessSnapshot {
    /// Frame contents padded with `None` up to `capacity` slots.
    pub fn padded(&self, capacity: usize) -> Vec<Option<PageId>> {
        let mut slots: Vec<Option<PageId>> = self.frames.iter().copied().map(Some).collect();
        slots.resize(capacity.max(slots.len()), None);
        slots
    }
}

/// Replay `references` against `capacity` frames, returning the number of page
/// faults and one snapshot per reference.
pub fn replay<R: Replacer + ?Sized>(
    replacer: &R,
    references: &[PageId],
    capacity: usize,
) -> Result<(u64, Vec<AccessSnapshot>)> {
    if capacity == 0 {
        return Err(value_err!("frame count must be at least 1"));
    }
    debug!(
        "{}: replaying {} references over {} frames",
        replacer.policy(),
        references.len(),
        capacity
    );

    let mut frames = FrameSet::new(capacity);
    let mut faults = 0;
    let mut snapshots = Vec::with_capacity(references.len());
    for &page in references {
        let status = if frames.contains(page) {
            replacer.record_hit(&mut frames, page);
            Status::Hit
        } else {
            faults += 1;
            if frames.is_full() {
                let victim = replacer.evict(&mut frames);
                trace!("{}: page {} evicts {:?}", replacer.policy(), page, victim);
            }
            frames.push_back(page);
            Status::Miss
        };
        snapshots.push(AccessSnapshot { page, frames: frames.pages(), status });
    }
    Ok((faults, snapshots))
}

/// First in, first out replacement.
pub fn fifo(references: &[PageId], capacity: usize) -> Result<(u64, Vec<AccessSnapshot>)> {
    replay(&FifoReplacer, references, capacity)
}

/// Least recently used replacement.
pub fn lru(references: &[PageId], capacity: usize) -> Result<(u64, Vec<AccessSnapshot>)> {
    replay(&LruReplacer, references, capacity)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Policy {
    Fifo,
    Lru,
}

impl Policy {
    pub fn replacer(self) -> Box<dyn Replacer> {
        match self {
            Policy::Fifo => Box::new(FifoReplacer),
            Policy::Lru => Box::new(LruReplacer),
        }
    }

    pub fn simulate(self, references: &[PageId], capacity: usize) -> Result<PagingReport> {
        let (faults, steps) = replay(self.replacer().as_ref(), references, capacity)?;
        Ok(PagingReport { policy: self, capacity, faults, steps })
    }
}

impl Display for Policy {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Policy::Fifo => write!(f, "FIFO"),
            Policy::Lru => write!(f, "LRU"),
        }
    }
}

impl FromStr for Policy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "fifo" => Ok(Policy::Fifo),
            "lru" => Ok(Policy::Lru),
            other => Err(value_err!("unknown page replacement policy '{}'", other)),
        }
    }
}

/// Outcome of one paging run with the figures a caller displays.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PagingReport {
    pub policy: Policy,
    pub capacity: usize,
    pub faults: u64,
    pub steps: Vec<AccessSnapshot>,
}

impl PagingReport {
    pub fn references(&self) -> usize {
        self.steps.len()
    }

    pub fn hits(&self) -> u64 {
        self.steps.len() as u64 - self.faults
    }

    /// Hits over references, 0 for an empty reference string.
    pub fn hit_ratio(&self) -> f64 {
        if self.steps.is_empty() {
            return 0.0;
        }
        self.hits() as f64 / self.steps.len() as f64
    }
}

impl Display for PagingReport {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "{} with {} frames", self.policy, self.capacity)?;
        for (i, step) in self.steps.iter().enumerate() {
            let slots = step
                .padded(self.capacity)
                .iter()
                .map(|slot| slot.map_or_else(|| "-".to_string(), |page| page.to_string()))
                .collect::<Vec<_>>()
                .join(" ");
            writeln!(f, "{:>3} | {:>3} | {:<4} | {}", i + 1, step.page, step.status, slots)?;
        }
        write!(
            f,
            "faults: {}, hits: {}, hit ratio: {:.1}%",
            self.faults,
            self.hits(),
            self.hit_ratio() * 100.0
        )
    }
}
