//! Pending medicine injections
//!
//! Input code (a pointer handler, another thread) only ever enqueues; the
//! simulation drains the whole set once per tick by swapping it out under the
//! lock, so an injection lands either entirely in this tick or entirely in the
//! next.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use indexmap::IndexSet;

use crate::spatial::GridGeometry;

type Pending = IndexSet<usize>;

/// Cloneable handle for enqueueing injections from anywhere
#[derive(Clone)]
pub struct Injector {
    pending: Arc<Mutex<Pending>>,
    geometry: GridGeometry,
    positions: Arc<[[f32; 2]]>,
}

impl Injector {
    /// Queue an injection at a renderer-space point. Points off the grid clamp
    /// to the nearest edge cell. Returns the cell index that was queued.
    pub fn inject(&self, point: [f32; 2]) -> usize {
        let idx = self.geometry.grid_index(&self.positions, point);
        self.enqueue(idx);
        idx
    }

    pub(crate) fn enqueue(&self, idx: usize) {
        debug_assert!(idx < self.geometry.size());
        self.lock().insert(idx);
    }

    // A panic on another input thread leaves the set itself intact.
    fn lock(&self) -> MutexGuard<'_, Pending> {
        self.pending.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

pub struct InjectionQueue {
    handle: Injector,
}

impl InjectionQueue {
    pub fn new(geometry: GridGeometry, positions: Arc<[[f32; 2]]>) -> Self {
        Self {
            handle: Injector {
                pending: Arc::new(Mutex::new(Pending::new())),
                geometry,
                positions,
            },
        }
    }

    pub fn injector(&self) -> Injector {
        self.handle.clone()
    }

    #[inline]
    pub fn inject(&self, point: [f32; 2]) -> usize {
        self.handle.inject(point)
    }

    pub fn len(&self) -> usize {
        self.handle.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Take every pending index, in first-queued order, leaving the queue empty
    pub fn drain(&self) -> Pending {
        std::mem::take(&mut *self.handle.lock())
    }

    pub fn clear(&self) {
        self.handle.lock().clear();
    }
}
