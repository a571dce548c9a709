//! In-memory transport and delay for session tests

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;
use std::string::String;
use std::vec::Vec;

use flipdot_hal::{UartRx, UartTx};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MockError;

/// Everything a session did to its transport and delay, in order
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Entry {
    Drain(usize),
    Write(Vec<u8>),
    Flush,
    DelayMs(u32),
}

#[derive(Debug, Clone, Default)]
pub struct Log(Rc<RefCell<Vec<Entry>>>);

impl Log {
    fn push(&self, entry: Entry) {
        self.0.borrow_mut().push(entry);
    }

    pub fn clear(&self) {
        self.0.borrow_mut().clear();
    }

    pub fn entries(&self) -> Vec<Entry> {
        self.0.borrow().clone()
    }

    /// Every byte written, in order
    pub fn wire(&self) -> Vec<u8> {
        self.0
            .borrow()
            .iter()
            .filter_map(|e| match e {
                Entry::Write(bytes) => Some(bytes.as_slice()),
                _ => None,
            })
            .flatten()
            .copied()
            .collect()
    }

    /// Complete CRLF-terminated lines, terminator stripped
    pub fn lines(&self) -> Vec<String> {
        let wire = String::from_utf8(self.wire()).unwrap();
        let mut lines: Vec<String> = wire.split("\r\n").map(String::from).collect();
        // Whatever follows the last CRLF is not a complete line
        lines.pop();
        lines
    }

    pub fn delays(&self) -> Vec<u32> {
        self.0
            .borrow()
            .iter()
            .filter_map(|e| match e {
                Entry::DelayMs(ms) => Some(*ms),
                _ => None,
            })
            .collect()
    }
}

pub struct MockUart {
    log: Log,
    rx: VecDeque<u8>,
    reply: Vec<u8>,
    writes_left: Option<usize>,
    fail_reads: bool,
}

impl MockUart {
    pub fn new(log: &Log) -> Self {
        Self {
            log: log.clone(),
            rx: VecDeque::new(),
            reply: Vec::new(),
            writes_left: None,
            fail_reads: false,
        }
    }

    /// Bytes waiting as if the sign had sent them
    pub fn queue_rx(&mut self, bytes: &[u8]) {
        self.rx.extend(bytes);
    }

    /// Have the sign answer every flushed line with `bytes`
    pub fn reply_on_flush(&mut self, bytes: &[u8]) {
        self.reply = bytes.to_vec();
    }

    /// Let `n` more writes through, then fail every write
    pub fn fail_after_writes(&mut self, n: usize) {
        self.writes_left = Some(n);
    }

    pub fn fail_reads(&mut self) {
        self.fail_reads = true;
    }

    pub fn pending(&self) -> usize {
        self.rx.len()
    }
}

impl UartTx for MockUart {
    type Error = MockError;

    fn write_blocking(&mut self, data: &[u8]) -> Result<(), MockError> {
        if let Some(left) = self.writes_left.as_mut() {
            if *left == 0 {
                return Err(MockError);
            }
            *left -= 1;
        }
        self.log.push(Entry::Write(data.to_vec()));
        Ok(())
    }

    fn flush(&mut self) -> Result<(), MockError> {
        self.log.push(Entry::Flush);
        self.rx.extend(&self.reply);
        Ok(())
    }
}

impl UartRx for MockUart {
    type Error = MockError;

    fn bytes_available(&mut self) -> Result<usize, MockError> {
        Ok(self.rx.len())
    }

    fn read_byte(&mut self) -> Result<u8, MockError> {
        if self.fail_reads {
            return Err(MockError);
        }
        self.rx.pop_front().ok_or(MockError)
    }

    fn discard_pending(&mut self) -> Result<usize, MockError> {
        let mut n = 0;
        while self.bytes_available()? > 0 {
            self.read_byte()?;
            n += 1;
        }
        self.log.push(Entry::Drain(n));
        Ok(n)
    }
}

/// Records delays instead of sleeping; usable blocking and async
pub struct MockDelay {
    log: Log,
}

impl MockDelay {
    pub fn new(log: &Log) -> Self {
        Self { log: log.clone() }
    }
}

impl embedded_hal::delay::DelayNs for MockDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.log.push(Entry::DelayMs(ns / 1_000_000));
    }

    fn delay_ms(&mut self, ms: u32) {
        self.log.push(Entry::DelayMs(ms));
    }
}

impl embedded_hal_async::delay::DelayNs for MockDelay {
    async fn delay_ns(&mut self, ns: u32) {
        self.log.push(Entry::DelayMs(ns / 1_000_000));
    }

    async fn delay_ms(&mut self, ms: u32) {
        self.log.push(Entry::DelayMs(ms));
    }
}
