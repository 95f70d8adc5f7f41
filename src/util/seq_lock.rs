use core::{
    cell::UnsafeCell,
    fmt,
    ops::{Deref, DerefMut},
    sync::atomic::{fence, AtomicBool, AtomicUsize, Ordering},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WriteLockError;

impl fmt::Display for WriteLockError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("seqlock already held by another writer")
    }
}

pub struct SeqLockGuard<'a, T: Copy> {
    seqlock: &'a SeqLock<T>,
    seq: usize,
}

impl<'a, T: Copy> Deref for SeqLockGuard<'a, T> {
    type Target = T;
    #[inline]
    fn deref(&self) -> &Self::Target {
        // Safety: the writer flag is held, so this is the only mutable access.
        unsafe { &*self.seqlock.value.get() }
    }
}

impl<'a, T: Copy> DerefMut for SeqLockGuard<'a, T> {
    #[inline]
    fn deref_mut(&mut self) -> &mut T {
        // Safety: the writer flag is held, so this is the only mutable access.
        unsafe { &mut *self.seqlock.value.get() }
    }
}

// On drop, call the wrapped SeqLock with the original sequence number.
impl<'a, T: Copy> Drop for SeqLockGuard<'a, T> {
    fn drop(&mut self) {
        self.seqlock.finish_write(self.seq);
    }
}

// Read-optimized lock that allows writing to preempt reading. A reader never blocks a writer; it
// retries if a write happened while it was copying. Only a single writer can write to the contents
// of a SeqLock at a time.
pub struct SeqLock<T: Copy> {
    sequence: AtomicUsize,
    value: UnsafeCell<T>,
    writing: AtomicBool,
}

impl<T: Copy> SeqLock<T> {
    pub const fn new(initial_state: T) -> Self {
        SeqLock {
            sequence: AtomicUsize::new(0),
            value: UnsafeCell::new(initial_state),
            writing: AtomicBool::new(false),
        }
    }

    // Read the sequence, make a copy, and read the sequence again. If the sequence is the same and
    // even, no writer touched the value while it was copied.
    pub fn read(&self) -> T {
        loop {
            let seq1 = self.sequence.load(Ordering::Acquire);

            // Odd sequence: a writer is mid-update. Don't bother copying.
            if seq1 & 1 != 0 {
                core::hint::spin_loop();
                continue;
            }

            // Safety: `read_volatile` requires the pointer to be valid, aligned and initialized.
            // The UnsafeCell satisfies all three from construction. A concurrent write is detected
            // by the sequence check below and the copy is discarded.
            let stored_value = unsafe { core::ptr::read_volatile(self.value.get()) };

            fence(Ordering::Acquire);

            if seq1 == self.sequence.load(Ordering::Relaxed) {
                return stored_value;
            }
        }
    }

    // Number of completed writes.
    pub fn version(&self) -> usize {
        self.sequence.load(Ordering::Acquire) / 2
    }

    pub fn get_mut(&mut self) -> &mut T {
        self.value.get_mut()
    }

    // Attempt to lock the SeqLock for writing. If another writer holds it, returns immediately.
    pub fn try_lock_write(&self) -> Result<SeqLockGuard<'_, T>, WriteLockError> {
        self.writing
            .compare_exchange(false, true, Ordering::Acquire, Ordering::Relaxed)
            .map_err(|_| WriteLockError)?;
        let seq = self.sequence.fetch_add(1, Ordering::Acquire);
        fence(Ordering::Release);
        Ok(SeqLockGuard { seqlock: self, seq })
    }

    // Overwrite the whole value. Fails only if the single-writer discipline is broken.
    pub fn write(&self, value: T) -> Result<(), WriteLockError> {
        *self.try_lock_write()? = value;
        Ok(())
    }

    fn finish_write(&self, sequence: usize) {
        self.sequence.store(sequence.wrapping_add(2), Ordering::Release);
        self.writing.store(false, Ordering::Release);
    }
}

// With the above locking guarantees, we can make this both Send and Sync.
unsafe impl<T: Copy + Send> Send for SeqLock<T> {}
unsafe impl<T: Copy + Send> Sync for SeqLock<T> {}
