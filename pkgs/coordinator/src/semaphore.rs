//! A counting semaphore, the one primitive the specification's concurrency
//! model (§5) requires that neither `std` nor `parking_lot` ship directly:
//! `cubes` and `solved` are both "acquire blocks until a permit exists"
//! counters released from a different thread than the one that acquires.

use parking_lot::{Condvar, Mutex};

pub struct CountingSemaphore {
    permits: Mutex<usize>,
    available: Condvar,
}

impl CountingSemaphore {
    pub fn new(initial: usize) -> Self {
        Self {
            permits: Mutex::new(initial),
            available: Condvar::new(),
        }
    }

    pub fn acquire(&self) {
        let mut permits = self.permits.lock();
        while *permits == 0 {
            self.available.wait(&mut permits);
        }
        *permits -= 1;
    }

    pub fn release(&self) {
        let mut permits = self.permits.lock();
        *permits += 1;
        self.available.notify_one();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;
    use std::time::Duration;

    #[test]
    fn acquire_blocks_until_a_release_happens() {
        let semaphore = Arc::new(CountingSemaphore::new(0));
        let worker = Arc::clone(&semaphore);
        let handle = thread::spawn(move || {
            thread::sleep(Duration::from_millis(20));
            worker.release();
        });
        semaphore.acquire();
        handle.join().unwrap();
    }

    #[test]
    fn permits_accumulate_across_multiple_releases() {
        let semaphore = CountingSemaphore::new(0);
        semaphore.release();
        semaphore.release();
        semaphore.acquire();
        semaphore.acquire();
    }
}
