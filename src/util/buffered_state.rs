//! Transaction/Buffer-Based Primitive
//!
//! A type of synchronization primitive used to share a common state where the reader can preempt
//! the writer. Particularly useful when you've got an interrupt that you cannot interrupt with a
//! critical section e.g. the gate control loop reading the compensation table that the strain loop
//! rewrites once per revolution group. This effectively provides eventual consistency on the
//! reads.
//!
//! The reader must run at a higher priority than the writer (or on the same context), and must not
//! hold a reference returned by [`StateReader::read`] across its own return. Under those rules the
//! buffer being read is never the one being written.

use core::{
    cell::UnsafeCell,
    ops::{Deref, DerefMut},
    sync::atomic::{AtomicUsize, Ordering},
};

pub struct BufferedState<T: Sized + Copy> {
    current: AtomicUsize,
    value: [UnsafeCell<T>; 2],
}

// Safety: access to each buffer is partitioned by `current`; see the module documentation.
unsafe impl<T: Copy + Send> Sync for BufferedState<T> {}

impl<T: Sized + Copy> BufferedState<T> {
    pub fn new(initial_state: T) -> Self {
        BufferedState {
            current: AtomicUsize::new(0),
            value: [UnsafeCell::new(initial_state), UnsafeCell::new(initial_state)],
        }
    }

    // Mutable borrow for the lifetime of both halves, so there can only ever be one writer.
    pub fn split(&mut self) -> (StateReader<'_, T>, StateWriter<'_, T>) {
        let state: &BufferedState<T> = self;
        (StateReader { state }, StateWriter { state })
    }

    // Get the published value without splitting. Requires exclusive access.
    pub fn get_mut(&mut self) -> &mut T {
        let current = *self.current.get_mut();
        self.value[current].get_mut()
    }

    fn published(&self) -> usize {
        match self.current.load(Ordering::Acquire) {
            0 => 0,
            _ => 1,
        }
    }
}

pub struct StateReader<'a, T: Copy> {
    state: &'a BufferedState<T>,
}

impl<'a, T: Copy> StateReader<'a, T> {
    pub fn read(&self) -> &T {
        let idx = self.state.published();
        // Safety: the writer only ever mutates the buffer that is not published.
        unsafe { &*self.state.value[idx].get() }
    }
}

unsafe impl<'a, T: Copy + Send> Send for StateReader<'a, T> {}

pub struct StateWriter<'a, T: Copy> {
    state: &'a BufferedState<T>,
}

unsafe impl<'a, T: Copy + Send> Send for StateWriter<'a, T> {}

impl<'a, T: Copy> StateWriter<'a, T> {
    // Read back what readers currently see.
    pub fn published(&self) -> &T {
        let idx = self.state.published();
        // Safety: the writer holds `&self`, so no guard into the back buffer is alive.
        unsafe { &*self.state.value[idx].get() }
    }

    // Start a new transaction. The back buffer is seeded with the published value, so the guard
    // starts from what readers currently see. Readers keep seeing the old value until the guard
    // is dropped.
    pub fn update(&mut self) -> StateGuard<'_, T> {
        let published = self.state.published();
        let target = published ^ 1;

        // Safety: `&mut self` guarantees this is the only guard, and readers never touch `target`
        // until it is published in `StateGuard::drop`.
        let data = unsafe { &mut *self.state.value[target].get() };
        *data = unsafe { *self.state.value[published].get() };

        StateGuard {
            data,
            current: &self.state.current,
            target,
        }
    }
}

pub struct StateGuard<'a, T: Copy> {
    data: &'a mut T,
    current: &'a AtomicUsize,
    target: usize,
}

impl<'a, T: Copy> Deref for StateGuard<'a, T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        self.data
    }
}

impl<'a, T: Copy> DerefMut for StateGuard<'a, T> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.data
    }
}

impl<'a, T: Copy> Drop for StateGuard<'a, T> {
    fn drop(&mut self) {
        // This is the atomic instruction that swaps the buffer pointer. Even if the writer is
        // preempted right before it, the reader only gets a slightly outdated copy.
        self.current.store(self.target, Ordering::Release);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reader_sees_old_value_until_guard_drops() {
        let mut state = BufferedState::new([0u32; 4]);
        let (reader, mut writer) = state.split();

        {
            let mut guard = writer.update();
            guard[2] = 7;
            assert_eq!(reader.read(), &[0, 0, 0, 0]);
        }
        assert_eq!(reader.read(), &[0, 0, 7, 0]);
    }

    #[test]
    fn update_starts_from_published_value() {
        let mut state = BufferedState::new(1u32);
        let (reader, mut writer) = state.split();

        *writer.update() += 1;
        *writer.update() += 1;
        *writer.update() += 1;
        assert_eq!(*reader.read(), 4);
        assert_eq!(*writer.published(), 4);
    }

    #[test]
    fn get_mut_returns_published_buffer() {
        let mut state = BufferedState::new(0u32);
        {
            let (_, mut writer) = state.split();
            *writer.update() = 9;
        }
        assert_eq!(*state.get_mut(), 9);
    }
}
