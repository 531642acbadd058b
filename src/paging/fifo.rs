use super::{FrameSet, PageId, Policy, Replacer};

/// FifoReplacer evicts the page that was loaded earliest. Hits do not affect the
/// order of the frame set.
#[derive(Debug, Clone, Copy, Default)]
pub struct FifoReplacer;

impl Replacer for FifoReplacer {
    fn policy(&self) -> Policy {
        Policy::Fifo
    }

    fn record_hit(&self, _frames: &mut FrameSet, _page: PageId) {}
}
