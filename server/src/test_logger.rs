#![cfg(test)]

use std::sync::{Mutex, Once};

use log::{Log, Metadata, Record};

pub struct TestLogger {
    pub messages: Mutex<Vec<String>>,
}

pub static LOGGER: TestLogger = TestLogger {
    messages: Mutex::new(Vec::new()),
};

pub static INIT: Once = Once::new();

impl Log for TestLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            self.messages
                .lock()
                .unwrap()
                .push(format!("{} {}", record.level(), record.args()));
        }
    }

    fn flush(&self) {}
}
