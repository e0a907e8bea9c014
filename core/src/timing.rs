//! Function-wrapping schedulers: delay, debounce, throttle, lazy, after, once.
//!
//! Wrappers that defer work ([`Delayed`], [`Debounce`], [`Lazy`]) own one
//! worker thread fed by a `crossbeam-channel`. Canceling drops pending work;
//! dropping the wrapper closes the channel and joins the worker, so no timer
//! outlives its handle. [`Throttle`], [`After`], and [`Once`] run the wrapped
//! closure on the calling thread; canceling a [`Throttle`] reopens its window.
//!
//! Every wrapper takes a plain closure, so they compose: a debounced closure
//! that calls a [`Throttle`] is still cancelable through the [`Debounce`].

use crossbeam_channel::{unbounded, Receiver, RecvTimeoutError, Sender};
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, OnceLock};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

/// Drop pending invocations.
pub trait Cancel {
    /// Discard anything scheduled but not yet run. Later calls still work.
    fn cancel(&self);
}

// ═══════════════════════════════════════════════════════════════════════════════
// Worker
// ═══════════════════════════════════════════════════════════════════════════════

enum Msg<A> {
    Call(A),
    Cancel,
}

/// One background thread and the sending half of its channel.
struct Worker<A> {
    name: &'static str,
    tx: Option<Sender<Msg<A>>>,
    handle: Option<JoinHandle<()>>,
}

impl<A: Send + 'static> Worker<A> {
    fn spawn<F>(name: &'static str, body: F) -> Self
    where
        F: FnOnce(Receiver<Msg<A>>) + Send + 'static,
    {
        let (tx, rx) = unbounded();
        let handle = thread::spawn(move || {
            log::trace!("{name} worker started");
            body(rx);
            log::trace!("{name} worker stopped");
        });
        Self {
            name,
            tx: Some(tx),
            handle: Some(handle),
        }
    }

    fn send(&self, msg: Msg<A>) {
        let delivered = self.tx.as_ref().is_some_and(|tx| tx.send(msg).is_ok());
        if !delivered {
            log::warn!("{} worker is gone; message dropped", self.name);
        }
    }
}

impl<A> Worker<A> {
    fn join(&mut self) {
        let Some(handle) = self.handle.take() else {
            return;
        };
        if handle.thread().id() == thread::current().id() {
            return;
        }
        if handle.join().is_err() {
            log::warn!("{} worker panicked", self.name);
        }
    }
}

impl<A> Drop for Worker<A> {
    fn drop(&mut self) {
        self.tx.take();
        self.join();
    }
}

/// `recv` with an optional deadline; no deadline blocks until a message or disconnect.
fn recv_until<A>(rx: &Receiver<Msg<A>>, deadline: Option<Instant>) -> Result<Msg<A>, RecvTimeoutError> {
    match deadline {
        Some(at) => rx.recv_deadline(at),
        None => rx.recv().map_err(|_| RecvTimeoutError::Disconnected),
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Delay
// ═══════════════════════════════════════════════════════════════════════════════

/// Handle to a call scheduled by [`delay`].
#[must_use = "dropping a `Delayed` cancels the call"]
pub struct Delayed {
    worker: Worker<()>,
    fired: Arc<AtomicBool>,
}

/// Run `f` once after `wait`, unless canceled first.
///
/// ```
/// use std::time::Duration;
/// use sucre::timing::delay;
///
/// let handle = delay(Duration::from_millis(5), || println!("later"));
/// assert!(handle.join());
/// ```
pub fn delay<F>(wait: Duration, f: F) -> Delayed
where
    F: FnOnce() + Send + 'static,
{
    let fired = Arc::new(AtomicBool::new(false));
    let flag = Arc::clone(&fired);
    let worker = Worker::spawn("delay", move |rx: Receiver<Msg<()>>| {
        match rx.recv_timeout(wait) {
            Err(RecvTimeoutError::Timeout) => {
                f();
                flag.store(true, Ordering::Release);
            }
            Ok(_) | Err(RecvTimeoutError::Disconnected) => log::trace!("delayed call canceled"),
        }
    });
    Delayed { worker, fired }
}

impl Delayed {
    /// Whether the call has run.
    #[must_use]
    pub fn fired(&self) -> bool {
        self.fired.load(Ordering::Acquire)
    }

    /// Wait for the worker to finish. Returns whether the call ran.
    #[must_use]
    pub fn join(mut self) -> bool {
        self.worker.join();
        self.fired()
    }
}

impl Cancel for Delayed {
    fn cancel(&self) {
        self.worker.send(Msg::Cancel);
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Debounce
// ═══════════════════════════════════════════════════════════════════════════════

/// Coalesces bursts of calls into one call with the last argument, made once
/// no call has arrived for `wait`.
///
/// ```
/// use std::sync::atomic::{AtomicUsize, Ordering};
/// use std::sync::Arc;
/// use std::time::Duration;
/// use sucre::timing::Debounce;
///
/// let hits = Arc::new(AtomicUsize::new(0));
/// let counter = Arc::clone(&hits);
/// let debounced = Debounce::new(Duration::from_millis(20), move |_: u32| {
///     counter.fetch_add(1, Ordering::SeqCst);
/// });
/// for i in 0..5 {
///     debounced.call(i);
/// }
/// std::thread::sleep(Duration::from_millis(200));
/// assert_eq!(hits.load(Ordering::SeqCst), 1);
/// ```
pub struct Debounce<A> {
    worker: Worker<A>,
}

impl<A: Send + 'static> Debounce<A> {
    /// Wrap `f`.
    pub fn new<F>(wait: Duration, mut f: F) -> Self
    where
        F: FnMut(A) + Send + 'static,
    {
        let worker = Worker::spawn("debounce", move |rx| {
            let mut pending: Option<A> = None;
            loop {
                let deadline = pending.as_ref().map(|_| Instant::now() + wait);
                match recv_until(&rx, deadline) {
                    Ok(Msg::Call(arg)) => pending = Some(arg),
                    Ok(Msg::Cancel) => pending = None,
                    Err(RecvTimeoutError::Timeout) => {
                        if let Some(arg) = pending.take() {
                            f(arg);
                        }
                    }
                    Err(RecvTimeoutError::Disconnected) => break,
                }
            }
        });
        Self { worker }
    }

    /// Schedule a call, replacing any pending one.
    pub fn call(&self, arg: A) {
        self.worker.send(Msg::Call(arg));
    }
}

impl<A: Send + 'static> Cancel for Debounce<A> {
    fn cancel(&self) {
        self.worker.send(Msg::Cancel);
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Throttle
// ═══════════════════════════════════════════════════════════════════════════════

/// Runs at most once per `interval`; calls inside the window are dropped.
pub struct Throttle<A, R> {
    interval: Duration,
    last: Mutex<Option<Instant>>,
    f: Box<dyn Fn(A) -> R + Send + Sync>,
}

impl<A, R> Throttle<A, R> {
    /// Wrap `f`.
    pub fn new<F>(interval: Duration, f: F) -> Self
    where
        F: Fn(A) -> R + Send + Sync + 'static,
    {
        Self {
            interval,
            last: Mutex::new(None),
            f: Box::new(f),
        }
    }

    /// Run `f` if the window is open, returning its result.
    pub fn call(&self, arg: A) -> Option<R> {
        {
            let mut last = self.last.lock();
            let open = last.is_none_or(|t| t.elapsed() >= self.interval);
            if !open {
                return None;
            }
            *last = Some(Instant::now());
        }
        Some((self.f)(arg))
    }
}

impl<A, R> Cancel for Throttle<A, R> {
    /// Reopen the window, so the next call runs immediately.
    fn cancel(&self) {
        *self.last.lock() = None;
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Lazy
// ═══════════════════════════════════════════════════════════════════════════════

/// Runs queued calls one per `interval`, in order.
///
/// At most `limit` calls wait in the queue; later calls are dropped until it
/// drains. A `limit` of zero means unbounded.
pub struct Lazy<A> {
    worker: Worker<A>,
}

impl<A: Send + 'static> Lazy<A> {
    /// Wrap `f`.
    pub fn new<F>(interval: Duration, limit: usize, mut f: F) -> Self
    where
        F: FnMut(A) + Send + 'static,
    {
        let worker = Worker::spawn("lazy", move |rx| {
            let mut queue: VecDeque<A> = VecDeque::new();
            let mut next_slot = Instant::now();
            loop {
                let deadline = (!queue.is_empty()).then_some(next_slot);
                match recv_until(&rx, deadline) {
                    Ok(Msg::Call(arg)) => {
                        if limit == 0 || queue.len() < limit {
                            queue.push_back(arg);
                        } else {
                            log::trace!("lazy queue full ({limit}); call dropped");
                        }
                    }
                    Ok(Msg::Cancel) => queue.clear(),
                    Err(RecvTimeoutError::Timeout) => {}
                    Err(RecvTimeoutError::Disconnected) => break,
                }
                if Instant::now() >= next_slot {
                    if let Some(arg) = queue.pop_front() {
                        f(arg);
                        next_slot = Instant::now() + interval;
                    }
                }
            }
        });
        Self { worker }
    }

    /// Queue a call.
    pub fn call(&self, arg: A) {
        self.worker.send(Msg::Call(arg));
    }
}

impl<A: Send + 'static> Cancel for Lazy<A> {
    fn cancel(&self) {
        self.worker.send(Msg::Cancel);
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// After / Once
// ═══════════════════════════════════════════════════════════════════════════════

/// Runs `f` on the `n`th call only; every other call is ignored.
pub struct After<A, R> {
    n: usize,
    calls: AtomicUsize,
    f: Box<dyn Fn(A) -> R + Send + Sync>,
}

impl<A, R> After<A, R> {
    /// Wrap `f`. An `n` of zero behaves like one.
    pub fn new<F>(n: usize, f: F) -> Self
    where
        F: Fn(A) -> R + Send + Sync + 'static,
    {
        Self {
            n,
            calls: AtomicUsize::new(0),
            f: Box::new(f),
        }
    }

    /// Count the call, and run `f` when the count is exactly `n`.
    pub fn call(&self, arg: A) -> Option<R> {
        let count = self.calls.fetch_add(1, Ordering::AcqRel) + 1;
        (count == self.n.max(1)).then(|| (self.f)(arg))
    }
}

/// Runs `f` on the first call; every later call returns the first result.
pub struct Once<A, R> {
    result: OnceLock<R>,
    f: Box<dyn Fn(A) -> R + Send + Sync>,
}

impl<A, R: Clone> Once<A, R> {
    /// Wrap `f`.
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(A) -> R + Send + Sync + 'static,
    {
        Self {
            result: OnceLock::new(),
            f: Box::new(f),
        }
    }

    /// The first call's result.
    pub fn call(&self, arg: A) -> R {
        self.result.get_or_init(|| (self.f)(arg)).clone()
    }
}
