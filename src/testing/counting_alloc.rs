use crate::polyfill::{AllocError, Allocator, Global};
use alloc::alloc::Layout;
use alloc::rc::Rc;
use core::cell::Cell;
use core::ptr::NonNull;

/// An allocator that forwards to [`Global`] while counting the blocks it hands out, and that
/// can be told to start refusing requests.
///
/// Clones share their counters, so a test can keep one handle while a collection owns another.
#[derive(Clone, Default, Debug)]
pub struct CountingAlloc {
    state: Rc<State>,
}

#[derive(Default, Debug)]
struct State {
    live: Cell<usize>,
    allocations: Cell<usize>,
    remaining: Cell<Option<usize>>,
}

impl CountingAlloc {
    pub fn new() -> Self {
        CountingAlloc::default()
    }

    /// Blocks currently allocated and not yet released.
    pub fn live(&self) -> usize {
        self.state.live.get()
    }

    /// Successful allocations over the allocator's lifetime.
    pub fn allocations(&self) -> usize {
        self.state.allocations.get()
    }

    /// Lets `n` more allocations succeed, then fails every one after.
    pub fn fail_after(&self, n: usize) {
        self.state.remaining.set(Some(n));
    }

    pub fn stop_failing(&self) {
        self.state.remaining.set(None);
    }
}

unsafe impl Allocator for CountingAlloc {
    fn allocate(&self, layout: Layout) -> Result<NonNull<[u8]>, AllocError> {
        match self.state.remaining.get() {
            Some(0) => return Err(AllocError),
            Some(n) => self.state.remaining.set(Some(n - 1)),
            None => {}
        }
        let block = Global.allocate(layout)?;
        self.state.live.set(self.live() + 1);
        self.state.allocations.set(self.allocations() + 1);
        Ok(block)
    }

    unsafe fn deallocate(&self, ptr: NonNull<u8>, layout: Layout) {
        self.state.live.set(self.live() - 1);
        unsafe { Global.deallocate(ptr, layout) }
    }
}
