//! Sync/async pipeline shared by both logger front ends

use super::{
    async_dispatcher::{AsyncDispatcher, DispatcherState},
    dispatcher::Dispatcher,
    error::{LoggerError, Result},
    handler::{Handler, HandlerId},
    level::Level,
    metrics::LoggerMetrics,
    record::Payload,
};
use std::panic::Location;

/// Either a synchronous dispatcher or an asynchronous one wrapping it
#[derive(Debug)]
pub enum Pipeline {
    Sync(Dispatcher),
    Async(AsyncDispatcher),
}

impl Pipeline {
    /// The dispatcher that performs the fan-out
    pub fn dispatcher(&self) -> &Dispatcher {
        match self {
            Pipeline::Sync(dispatcher) => dispatcher,
            Pipeline::Async(pipeline) => pipeline.dispatcher(),
        }
    }

    pub fn as_async(&self) -> Option<&AsyncDispatcher> {
        match self {
            Pipeline::Sync(_) => None,
            Pipeline::Async(pipeline) => Some(pipeline),
        }
    }

    pub fn is_async(&self) -> bool {
        matches!(self, Pipeline::Async(_))
    }

    /// Write (sync) or enqueue (async) one record.
    ///
    /// # Panics
    ///
    /// Panics when an async pipeline has been closed.
    pub fn dispatch(&self, level: Level, payload: Payload, location: &'static Location<'static>) {
        match self {
            Pipeline::Sync(dispatcher) => dispatcher.log(level, payload, location),
            Pipeline::Async(pipeline) => pipeline.log(level, payload, location),
        }
    }

    pub fn try_dispatch(
        &self,
        level: Level,
        payload: Payload,
        location: &'static Location<'static>,
    ) -> Result<()> {
        match self {
            Pipeline::Sync(dispatcher) => {
                dispatcher.log(level, payload, location);
                Ok(())
            }
            Pipeline::Async(pipeline) => pipeline.try_log(level, payload, location),
        }
    }

    pub fn add_handler(&self, handler: Handler) -> HandlerId {
        self.dispatcher().add_handler(handler)
    }

    pub fn remove_handler(&self, id: HandlerId) -> bool {
        self.dispatcher().remove_handler(id)
    }

    /// Block until queued records are written; no-op for sync pipelines
    pub fn wait(&self) {
        if let Pipeline::Async(pipeline) = self {
            pipeline.wait();
        }
    }

    /// Reopen the queue of an async pipeline
    pub fn open(&self, queue_size: usize) -> Result<()> {
        match self {
            Pipeline::Sync(dispatcher) => Err(LoggerError::config(
                dispatcher.name(),
                "open is only available on asynchronous loggers",
            )),
            Pipeline::Async(pipeline) => pipeline.open(queue_size),
        }
    }

    /// Close an async pipeline's queue; no-op for sync pipelines
    pub fn close(&self) {
        if let Pipeline::Async(pipeline) = self {
            pipeline.close();
        }
    }

    /// Lifecycle state; `None` for sync pipelines
    pub fn state(&self) -> Option<DispatcherState> {
        self.as_async().map(AsyncDispatcher::state)
    }

    pub fn flush(&self) -> Result<()> {
        self.dispatcher().flush()
    }

    pub fn metrics(&self) -> &LoggerMetrics {
        self.dispatcher().metrics()
    }
}

impl From<Dispatcher> for Pipeline {
    fn from(dispatcher: Dispatcher) -> Self {
        Pipeline::Sync(dispatcher)
    }
}

impl From<AsyncDispatcher> for Pipeline {
    fn from(pipeline: AsyncDispatcher) -> Self {
        Pipeline::Async(pipeline)
    }
}
