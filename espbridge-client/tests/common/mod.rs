use std::cell::RefCell;
use std::collections::VecDeque;
use std::io;
use std::rc::Rc;

use espbridge_client::{Timing, Transport};

/// Transport fed from a fixed script of response lines. Reads past the end
/// of the script behave like serial read timeouts, and every written line is
/// recorded in a shared log the test keeps a handle to.
pub struct ScriptedTransport {
    sent: Rc<RefCell<Vec<String>>>,
    responses: VecDeque<String>,
}

impl ScriptedTransport {
    pub fn new(responses: &[&str]) -> Self {
        Self {
            sent: Rc::new(RefCell::new(Vec::new())),
            responses: responses.iter().map(|line| line.to_string()).collect(),
        }
    }

    pub fn empty() -> Self {
        Self::new(&[])
    }

    pub fn sent_log(&self) -> Rc<RefCell<Vec<String>>> {
        Rc::clone(&self.sent)
    }
}

impl Transport for ScriptedTransport {
    fn write_all(&mut self, bytes: &[u8]) -> io::Result<()> {
        let text = String::from_utf8(bytes.to_vec())
            .map_err(|err| io::Error::new(io::ErrorKind::InvalidData, err))?;

        let mut sent = self.sent.borrow_mut();
        for line in text.lines() {
            sent.push(line.to_string());
        }

        Ok(())
    }

    fn read_line(&mut self) -> io::Result<String> {
        self.responses
            .pop_front()
            .ok_or_else(|| io::Error::new(io::ErrorKind::TimedOut, "no data"))
    }
}

/// Spec-shaped timing shrunk so exhausted windows elapse in milliseconds.
pub fn test_timing() -> Timing {
    Timing {
        settle_delay_ms: 0,
        command_delay_ms: 0,
        fast_window_ms: 20,
        slow_window_ms: 40,
    }
}
