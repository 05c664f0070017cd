use std::task::Waker;

const NUM_WAKERS: usize = 32;

/// A collection of wakers gathered under the gate and fired after it is
/// released.
///
/// The first 32 wakers live inline; a batch larger than that (a drain
/// event on a big pool) spills into a heap vector.
pub(crate) struct WakeList {
    wakers: [Option<Waker>; NUM_WAKERS],
    count: usize,
    overflow: Vec<Waker>,
}

impl WakeList {
    /// Creates a new empty wake list.
    pub(crate) fn new() -> Self {
        Self {
            wakers: [const { None }; NUM_WAKERS],
            count: 0,
            overflow: Vec::new(),
        }
    }

    #[cfg(test)]
    pub(crate) fn is_empty(&self) -> bool {
        self.count == 0 && self.overflow.is_empty()
    }

    pub(crate) fn len(&self) -> usize {
        self.count + self.overflow.len()
    }

    pub(crate) fn push(&mut self, waker: Waker) {
        if self.count < NUM_WAKERS {
            self.wakers[self.count] = Some(waker);
            self.count += 1;
        } else {
            self.overflow.push(waker);
        }
    }

    /// Wakes every collected task and clears the list.
    ///
    /// Must be called with the gate released.
    pub(crate) fn wake_all(&mut self) {
        for slot in &mut self.wakers[..self.count] {
            if let Some(waker) = slot.take() {
                waker.wake();
            }
        }
        self.count = 0;

        for waker in self.overflow.drain(..) {
            waker.wake();
        }
    }
}

impl std::fmt::Debug for WakeList {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WakeList").field("len", &self.len()).finish()
    }
}
