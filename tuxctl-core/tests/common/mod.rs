//! Shared test fixtures

use std::sync::Mutex;

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use tuxctl_core::{Controller, ControllerConfig, Transport};

/// Transport that records every send
#[derive(Default)]
pub struct RecordingTransport {
    sent: Mutex<Vec<Vec<u8>>>,
}

impl RecordingTransport {
    /// Drain everything sent so far
    pub fn take(&self) -> Vec<Vec<u8>> {
        std::mem::take(&mut *self.sent.lock().unwrap())
    }
}

impl Transport for RecordingTransport {
    fn send(&self, bytes: &[u8]) {
        self.sent.lock().unwrap().push(bytes.to_vec());
    }
}

pub type TestController = Controller<CriticalSectionRawMutex, RecordingTransport>;

pub fn controller() -> TestController {
    Controller::new(RecordingTransport::default(), &ControllerConfig::default())
}
