use super::{FrameSet, PageId, Policy, Replacer};

/// LruReplacer evicts the least recently used page.
///
/// Every hit moves the page to the tail of the frame set, so the head is always the
/// page whose last access is the oldest.
#[derive(Debug, Clone, Copy, Default)]
pub struct LruReplacer;

impl Replacer for LruReplacer {
    fn policy(&self) -> Policy {
        Policy::Lru
    }

    fn record_hit(&self, frames: &mut FrameSet, page: PageId) {
        let moved = frames.move_to_back(page);
        debug_assert!(moved, "hit on page {page} which is not resident");
    }
}
