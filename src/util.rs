// Copyright 2023 Google LLC
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     https://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

/// Captures the logs emitted by this crate on the current thread, so that
/// tests can check them even when running in parallel.
#[cfg(test)]
pub mod log_tester {
    use log::{Level, LevelFilter, Metadata, Record};
    use std::cell::{Cell, RefCell};

    pub struct LogRecord {
        pub level: Level,
        pub target: String,
        pub message: String,
    }

    thread_local! {
        static CAPTURING: Cell<bool> = const { Cell::new(false) };
        static RECORDS: RefCell<Vec<LogRecord>> = const { RefCell::new(Vec::new()) };
    }

    /// Guard capturing logs on the current thread until it's dropped.
    pub struct ThreadLocalLogger;

    impl ThreadLocalLogger {
        pub fn start() -> Self {
            // Only the first call installs the logger, which is shared by all
            // the test threads.
            let _ = log::set_logger(&CapturingLogger);
            log::set_max_level(LevelFilter::Trace);
            let was_capturing = CAPTURING.replace(true);
            assert!(!was_capturing, "Logs are already captured on this thread");
            ThreadLocalLogger
        }

        /// Returns all the records captured so far, in order.
        pub fn into_iter(self) -> impl Iterator<Item = LogRecord> {
            RECORDS.take().into_iter()
        }

        /// Formats the records emitted by the given module, one line per
        /// record. Records from other modules are dropped.
        pub fn report(self, target: &str) -> String {
            self.into_iter()
                .filter(|record| record.target == target)
                .map(|record| format!("{} {}\n", record.level, record.message))
                .collect()
        }
    }

    impl Drop for ThreadLocalLogger {
        fn drop(&mut self) {
            CAPTURING.set(false);
            RECORDS.with_borrow_mut(|records| records.clear());
        }
    }

    struct CapturingLogger;

    impl log::Log for CapturingLogger {
        fn enabled(&self, metadata: &Metadata) -> bool {
            CAPTURING.get() && metadata.target().starts_with("schulze_rs")
        }

        fn log(&self, record: &Record) {
            if self.enabled(record.metadata()) {
                RECORDS.with_borrow_mut(|records| {
                    records.push(LogRecord {
                        level: record.level(),
                        target: record.target().to_owned(),
                        message: record.args().to_string(),
                    })
                });
            }
        }

        fn flush(&self) {}
    }
}
