//! Asynchronous pipeline: bounded queue plus one consumer thread

use super::{
    dispatcher::{panic_message, Dispatcher},
    error::{LoggerError, Result},
    in_flight::InFlight,
    level::Level,
    record::{Payload, Record},
};
use crossbeam_channel::{bounded, Receiver, SendError, Sender, TrySendError};
use parking_lot::{Mutex, RwLock};
use std::fmt;
use std::panic::Location;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

/// Default shutdown timeout for dispatcher cleanup (5 seconds)
///
/// Used when an [`AsyncDispatcher`] is dropped without an explicit
/// [`AsyncDispatcher::shutdown`].
pub const DEFAULT_SHUTDOWN_TIMEOUT: Duration = Duration::from_secs(5);

/// Lifecycle of an [`AsyncDispatcher`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatcherState {
    /// Queue accepts records and a consumer is running
    Open,
    /// Queue is closed; a consumer is still draining its backlog
    Closing,
    /// Every consumer has exited
    Closed,
}

impl fmt::Display for DispatcherState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DispatcherState::Open => write!(f, "Open"),
            DispatcherState::Closing => write!(f, "Closing"),
            DispatcherState::Closed => write!(f, "Closed"),
        }
    }
}

/// Decouples log calls from I/O.
///
/// `log` builds the record on the caller's thread and pushes it onto a
/// bounded FIFO queue; a single consumer thread pops records in order and
/// hands them to the wrapped [`Dispatcher`]. A full queue blocks the caller
/// until the consumer frees a slot, so records are never dropped.
///
/// # Example
///
/// ```
/// use rust_leveled_logger::prelude::*;
/// use std::panic::Location;
///
/// let capture = MemorySink::new();
/// let dispatcher = Dispatcher::new("worker");
/// dispatcher.add_handler(
///     Handler::new(Level::All, Level::Null, TemplateFormatter::new("{message}"), capture.clone())
///         .unwrap(),
/// );
///
/// let pipeline = AsyncDispatcher::new(dispatcher, 16).unwrap();
/// pipeline.log(Level::Info, Payload::message("queued"), Location::caller());
/// pipeline.wait();
/// assert_eq!(capture.lines(), vec!["queued"]);
/// ```
pub struct AsyncDispatcher {
    dispatcher: Arc<Dispatcher>,
    in_flight: Arc<InFlight>,
    queue: RwLock<Option<Sender<Record>>>,
    capacity: AtomicUsize,
    consumers: Mutex<Vec<JoinHandle<()>>>,
}

impl AsyncDispatcher {
    /// Wrap `dispatcher` and open a queue of `queue_size` records
    pub fn new(dispatcher: Dispatcher, queue_size: usize) -> Result<Self> {
        let pipeline = Self {
            dispatcher: Arc::new(dispatcher),
            in_flight: Arc::new(InFlight::new()),
            queue: RwLock::new(None),
            capacity: AtomicUsize::new(queue_size),
            consumers: Mutex::new(Vec::new()),
        };
        pipeline.open(queue_size)?;
        Ok(pipeline)
    }

    /// The synchronous dispatcher that performs the fan-out
    pub fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }

    pub fn name(&self) -> &str {
        self.dispatcher.name()
    }

    /// Allocate a fresh queue and start a consumer for it.
    ///
    /// A previously open queue is detached: its consumer writes the records
    /// already in it and exits, and nothing is moved to the new queue.
    pub fn open(&self, queue_size: usize) -> Result<()> {
        if queue_size == 0 {
            return Err(LoggerError::config(
                format!("logger '{}'", self.name()),
                "queue_size must be greater than zero",
            ));
        }
        let (sender, receiver) = bounded(queue_size);
        let dispatcher = Arc::clone(&self.dispatcher);
        let in_flight = Arc::clone(&self.in_flight);

        let handle = thread::Builder::new()
            .name(format!("{}-log-consumer", self.dispatcher.name()))
            .spawn(move || Self::consume(receiver, dispatcher, in_flight))
            .map_err(|e| {
                LoggerError::io_operation("spawning log consumer", self.name().to_string(), e)
            })?;

        let mut consumers = self.consumers.lock();
        consumers.retain(|h| !h.is_finished());
        consumers.push(handle);
        drop(consumers);

        self.capacity.store(queue_size, Ordering::Relaxed);
        // Dropping the previous sender lets the old consumer drain and exit
        let _previous = self.queue.write().replace(sender);
        Ok(())
    }

    /// Consumer loop: FIFO, one record at a time
    fn consume(receiver: Receiver<Record>, dispatcher: Arc<Dispatcher>, in_flight: Arc<InFlight>) {
        for record in receiver.iter() {
            dispatcher.write(&record);
            drop(record);

            // Flush once the backlog is momentarily empty so that a waiter
            // released by `done` sees buffered sinks on disk.
            if receiver.is_empty() {
                dispatcher.flush_quietly();
            }
            in_flight.done();
        }
        dispatcher.flush_quietly();
    }

    /// Enqueue a record, blocking while the queue is full.
    ///
    /// # Panics
    ///
    /// Panics when the dispatcher has been closed. Use [`try_log`] to get an
    /// error instead.
    ///
    /// [`try_log`]: AsyncDispatcher::try_log
    pub fn log(&self, level: Level, payload: Payload, location: &'static Location<'static>) {
        if let Err(e) = self.try_log(level, payload, location) {
            panic!("[LOGGER FATAL] {} (log call at {})", e, location);
        }
    }

    /// Enqueue a record, returning [`LoggerError::LoggerStopped`] after close
    pub fn try_log(
        &self,
        level: Level,
        payload: Payload,
        location: &'static Location<'static>,
    ) -> Result<()> {
        let sender = match self.queue.read().as_ref() {
            Some(sender) => sender.clone(),
            None => return Err(LoggerError::stopped(self.name())),
        };

        self.in_flight.add();
        let record = self.dispatcher.record(level, payload, location);
        self.enqueue(&sender, record)
    }

    fn enqueue(&self, sender: &Sender<Record>, record: Record) -> Result<()> {
        let metrics = self.dispatcher.metrics();
        let outcome = match sender.try_send(record) {
            Ok(()) => Ok(()),
            Err(TrySendError::Full(record)) => {
                metrics.record_queue_full();
                sender.send(record).map_err(|SendError(_)| ())
            }
            Err(TrySendError::Disconnected(_)) => Err(()),
        };

        match outcome {
            Ok(()) => {
                metrics.record_enqueued();
                Ok(())
            }
            Err(()) => {
                self.in_flight.done();
                Err(LoggerError::stopped(self.name()))
            }
        }
    }

    /// Block until every record accepted so far has been written.
    ///
    /// Records logged concurrently with this call may or may not be covered.
    pub fn wait(&self) {
        self.in_flight.wait();
    }

    /// Records accepted but not yet written to every handler
    pub fn pending(&self) -> usize {
        self.in_flight.pending()
    }

    /// Capacity of the current (or most recent) queue
    pub fn queue_capacity(&self) -> usize {
        self.capacity.load(Ordering::Relaxed)
    }

    /// Records currently buffered in the open queue
    pub fn queue_len(&self) -> usize {
        self.queue.read().as_ref().map_or(0, Sender::len)
    }

    /// Stop accepting records. Does not wait for the backlog.
    pub fn close(&self) {
        self.queue.write().take();
    }

    pub fn state(&self) -> DispatcherState {
        if self.queue.read().is_some() {
            return DispatcherState::Open;
        }
        if self.consumers.lock().iter().any(|h| !h.is_finished()) {
            DispatcherState::Closing
        } else {
            DispatcherState::Closed
        }
    }

    /// Wait up to `timeout` for every consumer to exit.
    ///
    /// Only meaningful after [`close`](AsyncDispatcher::close); returns
    /// `true` when all consumers finished in time.
    pub fn join(&self, timeout: Duration) -> bool {
        let start = Instant::now();
        let mut consumers = self.consumers.lock();

        loop {
            if consumers.iter().all(|h| h.is_finished()) {
                let mut clean = true;
                for handle in consumers.drain(..) {
                    if let Err(e) = handle.join() {
                        eprintln!(
                            "[LOGGER ERROR] Consumer of '{}' panicked: {}",
                            self.name(),
                            panic_message(e.as_ref())
                        );
                        clean = false;
                    }
                }
                return clean;
            }

            if start.elapsed() >= timeout {
                eprintln!(
                    "[LOGGER WARNING] Consumer of '{}' did not finish within {:?}. \
                     Some records may not have been written.",
                    self.name(),
                    timeout
                );
                return false;
            }

            // Small sleep to avoid busy-waiting
            thread::sleep(Duration::from_millis(10));
        }
    }

    /// Wait for the backlog, close the queue and join the consumers
    pub fn shutdown(&self, timeout: Duration) -> bool {
        if self.state() == DispatcherState::Open {
            self.wait();
        }
        self.close();
        self.join(timeout)
    }
}

impl Drop for AsyncDispatcher {
    fn drop(&mut self) {
        self.close();
        self.join(DEFAULT_SHUTDOWN_TIMEOUT);

        let failed = self.dispatcher.metrics().failed_writes();
        if failed > 0 {
            eprintln!(
                "[LOGGER WARNING] Logger '{}' shutting down with {} failed handler writes",
                self.name(),
                failed
            );
        }
    }
}

impl fmt::Debug for AsyncDispatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AsyncDispatcher")
            .field("dispatcher", &self.dispatcher)
            .field("state", &self.state())
            .field("queue_capacity", &self.queue_capacity())
            .field("pending", &self.pending())
            .finish()
    }
}
