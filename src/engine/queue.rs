//! Bounded single-producer/single-consumer sample queue.
//!
//! A thin blocking layer over an `rtrb` ring buffer. Dropping the sender
//! closes the queue for the receiver once it has drained what is left;
//! dropping the receiver makes every further `send` fail.

use std::{
    sync::atomic::{fence, Ordering},
    thread,
    time::Duration,
};

use rtrb::{Consumer, PopError, Producer, PushError, RingBuffer};

/// Returned by [`SampleSender::send`] when the receiving side is gone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Closed;

pub struct SampleSender {
    tx: Producer<f64>,
    capacity: usize,
}

pub struct SampleReceiver {
    rx: Consumer<f64>,
}

/// Create a queue with room for `capacity` samples.
pub fn bounded(capacity: usize) -> (SampleSender, SampleReceiver) {
    let (tx, rx) = RingBuffer::new(capacity);
    (SampleSender { tx, capacity }, SampleReceiver { rx })
}

impl SampleSender {
    /// Push one sample, waiting while the queue is full.
    pub fn send(&mut self, mut sample: f64) -> Result<(), Closed> {
        let mut backoff = Backoff::new();
        loop {
            match self.tx.push(sample) {
                Ok(()) => return Ok(()),
                Err(PushError::Full(rejected)) => {
                    if self.tx.is_abandoned() {
                        return Err(Closed);
                    }
                    sample = rejected;
                    backoff.wait();
                }
            }
        }
    }

    /// Push every sample of `samples`, stopping at the first failure.
    /// Returns how many samples went through.
    pub fn send_all<I>(&mut self, samples: I) -> Result<usize, (usize, Closed)>
    where
        I: IntoIterator<Item = f64>,
    {
        let mut sent = 0;
        for sample in samples {
            self.send(sample).map_err(|closed| (sent, closed))?;
            sent += 1;
        }
        Ok(sent)
    }

    pub fn is_closed(&self) -> bool {
        self.tx.is_abandoned()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl SampleReceiver {
    /// Pop the next sample, waiting while the queue is empty.
    ///
    /// `None` means the sender has been dropped and nothing is left.
    pub fn recv(&mut self) -> Option<f64> {
        let mut backoff = Backoff::new();
        loop {
            match self.rx.pop() {
                Ok(sample) => return Some(sample),
                Err(PopError::Empty) => {
                    if self.rx.is_abandoned() {
                        // `is_abandoned` is a relaxed load; the fence orders the
                        // final pop after the sender's last push.
                        fence(Ordering::Acquire);
                        return self.rx.pop().ok();
                    }
                    backoff.wait();
                }
            }
        }
    }

    pub fn is_closed(&self) -> bool {
        if !self.rx.is_abandoned() {
            return false;
        }
        fence(Ordering::Acquire);
        self.rx.is_empty()
    }

    pub fn iter(&mut self) -> impl Iterator<Item = f64> + '_ {
        std::iter::from_fn(move || self.recv())
    }
}

/// Spin, then yield, then sleep in short steps.
struct Backoff {
    step: u32,
}

impl Backoff {
    const SPIN_LIMIT: u32 = 6;
    const YIELD_LIMIT: u32 = 10;
    const SLEEP: Duration = Duration::from_micros(50);

    fn new() -> Self {
        Self { step: 0 }
    }

    fn wait(&mut self) {
        if self.step <= Self::SPIN_LIMIT {
            for _ in 0..1u32 << self.step {
                std::hint::spin_loop();
            }
        } else if self.step <= Self::YIELD_LIMIT {
            thread::yield_now();
        } else {
            thread::sleep(Self::SLEEP);
            return;
        }
        self.step += 1;
    }
}
