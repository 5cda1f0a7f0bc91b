//! Methods shared by the free-text and structured loggers

/// Expands, inside an `impl` block of a type with a `pipeline: Pipeline`
/// field, to the constructors, handler management, lifecycle, and leveled
/// logging methods of a logger front end.
///
/// Logging methods take `impl Into<$input>` and build the payload with
/// `$to_payload`.
macro_rules! front_end_methods {
    (@severity $input:ty, $arg:ident; $($method:ident => $level:ident,)+) => {
        $(
            #[inline]
            #[track_caller]
            pub fn $method(&self, $arg: impl Into<$input>) {
                self.log($crate::core::Level::$level, $arg);
            }
        )+
    };

    ($input:ty, $arg:ident => $to_payload:path) => {
        /// Synchronous logger with no handlers
        #[must_use]
        pub fn new(name: impl AsRef<str>) -> Self {
            Self {
                pipeline: $crate::core::Pipeline::Sync($crate::core::Dispatcher::new(name)),
            }
        }

        /// Asynchronous logger with a queue of `queue_size` records
        pub fn with_async(name: impl AsRef<str>, queue_size: usize) -> $crate::core::Result<Self> {
            Ok(Self {
                pipeline: $crate::core::Pipeline::Async($crate::core::AsyncDispatcher::new(
                    $crate::core::Dispatcher::new(name),
                    queue_size,
                )?),
            })
        }

        pub fn from_pipeline(pipeline: $crate::core::Pipeline) -> Self {
            Self { pipeline }
        }

        #[must_use]
        pub fn builder(name: impl Into<String>) -> $crate::core::LoggerBuilder {
            $crate::core::LoggerBuilder::new(name)
        }

        pub fn name(&self) -> &str {
            self.pipeline.dispatcher().name()
        }

        pub fn pipeline(&self) -> &$crate::core::Pipeline {
            &self.pipeline
        }

        pub fn add_handler(&self, handler: $crate::core::Handler) -> $crate::core::HandlerId {
            self.pipeline.add_handler(handler)
        }

        /// Remove a handler; unknown ids are ignored
        pub fn remove_handler(&self, id: $crate::core::HandlerId) -> bool {
            self.pipeline.remove_handler(id)
        }

        pub fn handler_count(&self) -> usize {
            self.pipeline.dispatcher().handler_count()
        }

        pub fn is_enabled(&self, level: $crate::core::Level) -> bool {
            self.pipeline.dispatcher().is_enabled(level)
        }

        /// # Panics
        ///
        /// Panics when called on a closed asynchronous logger.
        #[track_caller]
        pub fn log(&self, level: $crate::core::Level, $arg: impl Into<$input>) {
            self.pipeline
                .dispatch(level, $to_payload($arg), ::std::panic::Location::caller());
        }

        /// Like `log` but reports a closed logger as an error
        #[track_caller]
        pub fn try_log(
            &self,
            level: $crate::core::Level,
            $arg: impl Into<$input>,
        ) -> $crate::core::Result<()> {
            self.pipeline
                .try_dispatch(level, $to_payload($arg), ::std::panic::Location::caller())
        }

        front_end_methods!(@severity $input, $arg;
            trace => Trace,
            debug => Debug,
            verbose => Verbose,
            info => Info,
            notice => Notice,
            warning => Warning,
            severe => Severe,
            error => Error,
            alert => Alert,
            critical => Critical,
            emergency => Emergency,
        );

        /// Block until every queued record has been written
        pub fn wait(&self) {
            self.pipeline.wait();
        }

        /// Reopen the queue of an asynchronous logger
        pub fn open(&self, queue_size: usize) -> $crate::core::Result<()> {
            self.pipeline.open(queue_size)
        }

        /// Stop accepting records on an asynchronous logger
        pub fn close(&self) {
            self.pipeline.close();
        }

        pub fn state(&self) -> Option<$crate::core::DispatcherState> {
            self.pipeline.state()
        }

        pub fn flush(&self) -> $crate::core::Result<()> {
            self.pipeline.flush()
        }

        pub fn metrics(&self) -> &$crate::core::LoggerMetrics {
            self.pipeline.metrics()
        }
    };
}
