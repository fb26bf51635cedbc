//! Output sink for `print` statements.
//!
//! The interpreter never writes to stdout directly; it goes through a
//! [`SharedPrintHandler`] chosen by the driver. The CLI installs the stdout
//! handler, tests install a buffer handler and assert on the capture.
//!
//! Enum dispatch instead of a trait object: the variant set is closed and
//! `print` is on the hot path.

use std::sync::Arc;

use parking_lot::Mutex;

/// Writes each printed line to process stdout.
#[derive(Default)]
pub struct StdoutPrintHandler;

impl StdoutPrintHandler {
    pub fn println(&self, msg: &str) {
        println!("{msg}");
    }
}

/// Captures printed lines into an in-memory buffer.
#[derive(Default)]
pub struct BufferPrintHandler {
    buffer: Mutex<String>,
}

impl BufferPrintHandler {
    pub fn new() -> Self {
        BufferPrintHandler::default()
    }

    pub fn println(&self, msg: &str) {
        let mut buf = self.buffer.lock();
        buf.push_str(msg);
        buf.push('\n');
    }

    /// Everything printed so far, newlines included.
    pub fn output(&self) -> String {
        self.buffer.lock().clone()
    }

    pub fn clear(&self) {
        self.buffer.lock().clear();
    }
}

/// Print destination, dispatched by variant.
pub enum PrintHandler {
    Stdout(StdoutPrintHandler),
    Buffer(BufferPrintHandler),
}

impl PrintHandler {
    /// Print one line, newline appended.
    pub fn println(&self, msg: &str) {
        match self {
            PrintHandler::Stdout(h) => h.println(msg),
            PrintHandler::Buffer(h) => h.println(msg),
        }
    }

    /// Captured output. Empty for the stdout handler, which does not
    /// capture.
    pub fn output(&self) -> String {
        match self {
            PrintHandler::Stdout(_) => String::new(),
            PrintHandler::Buffer(h) => h.output(),
        }
    }

    /// Discard captured output. No-op for stdout.
    pub fn clear(&self) {
        match self {
            PrintHandler::Stdout(_) => {}
            PrintHandler::Buffer(h) => h.clear(),
        }
    }
}

/// Handle shared between the driver and the interpreter.
pub type SharedPrintHandler = Arc<PrintHandler>;

/// The default handler: lines go to stdout.
pub fn stdout_handler() -> SharedPrintHandler {
    Arc::new(PrintHandler::Stdout(StdoutPrintHandler))
}

/// A capturing handler for tests and embedders.
pub fn buffer_handler() -> SharedPrintHandler {
    Arc::new(PrintHandler::Buffer(BufferPrintHandler::new()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn buffer_captures_lines_in_order() {
        let handler = buffer_handler();
        handler.println("one");
        handler.println("two");
        assert_eq!(handler.output(), "one\ntwo\n");
    }

    #[test]
    fn clear_empties_the_buffer() {
        let handler = BufferPrintHandler::new();
        handler.println("x");
        handler.clear();
        assert_eq!(handler.output(), "");
    }

    #[test]
    fn stdout_handler_captures_nothing() {
        let handler = stdout_handler();
        assert_eq!(handler.output(), "");
        handler.clear();
    }

    #[test]
    fn buffer_is_shareable_across_threads() {
        use std::thread;

        let handler = buffer_handler();
        let clone = Arc::clone(&handler);
        let t = thread::spawn(move || {
            for _ in 0..50 {
                clone.println("a");
            }
        });
        for _ in 0..50 {
            handler.println("b");
        }
        if t.join().is_err() {
            panic!("printer thread panicked");
        }
        assert_eq!(handler.output().lines().count(), 100);
    }
}
