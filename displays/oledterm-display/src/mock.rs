//! Recording transport for unit tests

use heapless::Vec;
use oledterm_hal::DisplayTransport;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    Select,
    Deselect,
    Command,
    Data,
    Byte(u8),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MockError;

/// Logs every transport call; optionally fails once `fail_after` calls
/// have succeeded
#[derive(Default)]
pub struct RecordingTransport {
    pub events: Vec<Event, 1024>,
    pub fail_after: Option<usize>,
}

impl RecordingTransport {
    pub fn failing_after(calls: usize) -> Self {
        Self {
            events: Vec::new(),
            fail_after: Some(calls),
        }
    }

    fn record(&mut self, event: Event) -> Result<(), MockError> {
        if let Some(limit) = self.fail_after {
            if self.events.len() >= limit {
                return Err(MockError);
            }
        }
        self.events.push(event).map_err(|_| MockError)
    }

    /// Bytes of each command-mode transaction, in order
    pub fn commands(&self) -> Vec<Vec<u8, 8>, 32> {
        let mut out = Vec::new();
        let mut current: Vec<u8, 8> = Vec::new();
        let mut command_mode = false;
        for event in &self.events {
            match *event {
                Event::Select => current.clear(),
                Event::Command => command_mode = true,
                Event::Data => command_mode = false,
                Event::Byte(b) if command_mode => {
                    let _ = current.push(b);
                }
                Event::Byte(_) => {}
                Event::Deselect => {
                    if command_mode {
                        let _ = out.push(current.clone());
                    }
                }
            }
        }
        out
    }

    /// Bytes of each data-mode transaction, concatenated
    pub fn data_bytes(&self) -> Vec<u8, 512> {
        let mut out = Vec::new();
        let mut data_mode = false;
        for event in &self.events {
            match *event {
                Event::Command => data_mode = false,
                Event::Data => data_mode = true,
                Event::Byte(b) if data_mode => {
                    let _ = out.push(b);
                }
                _ => {}
            }
        }
        out
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }
}

impl DisplayTransport for RecordingTransport {
    type Error = MockError;

    fn select_device(&mut self) -> Result<(), MockError> {
        self.record(Event::Select)
    }

    fn deselect_device(&mut self) -> Result<(), MockError> {
        self.record(Event::Deselect)
    }

    fn set_command_mode(&mut self) -> Result<(), MockError> {
        self.record(Event::Command)
    }

    fn set_data_mode(&mut self) -> Result<(), MockError> {
        self.record(Event::Data)
    }

    fn send_byte(&mut self, value: u8) -> Result<(), MockError> {
        self.record(Event::Byte(value))
    }
}
