use std::sync::{Mutex, MutexGuard, PoisonError};

/// Serializes every decision that reads or writes the order book.
///
/// The binding, overlap and start-collision checks read assignments of every
/// machine sharing an order number, and number derivation reads all work
/// orders, so a per-machine section is not enough. A proposal holds the
/// guard from its first read to its final write.
#[derive(Debug, Default)]
pub(crate) struct OrderBookLock {
    inner: Mutex<()>,
}

impl OrderBookLock {
    /// Blocks until the order book is free. A lock poisoned by a panicking
    /// holder is recovered: the guarded value is `()`, and store writes are
    /// atomic, so there is no half-written state to protect.
    pub(crate) fn acquire(&self) -> MutexGuard<'_, ()> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn held_lock_blocks_second_acquire() {
        let lock = OrderBookLock::default();
        let guard = lock.acquire();
        assert!(lock.inner.try_lock().is_err());
        drop(guard);
        assert!(lock.inner.try_lock().is_ok());
    }

    #[test]
    fn poisoned_lock_is_recovered() {
        let lock = OrderBookLock::default();
        thread::scope(|s| {
            let panicked = s
                .spawn(|| {
                    let _guard = lock.acquire();
                    panic!("holder died");
                })
                .join();
            assert!(panicked.is_err());
        });
        assert!(lock.inner.is_poisoned());
        let _guard = lock.acquire();
    }
}
