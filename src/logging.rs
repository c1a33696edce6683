//! Diagnostics setup
//!
//! Log lines go to stderr, which is also where the full-screen prompt draws.
//! The subscriber therefore writes through a [`LogGate`]: while a prompt holds
//! the gate, formatted lines are buffered, and releasing it writes them out in
//! order once the terminal is restored.

use std::io::{self, Write};
use std::sync::{Arc, Mutex, MutexGuard, OnceLock, PoisonError};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::MakeWriter;

/// Environment variable holding the log filter
pub const LOG_ENV: &str = "AWS_SELECT_LOG";

const DEFAULT_FILTER: &str = "warn";

type Sink = Box<dyn Write + Send>;

struct GateState {
    sink: Sink,
    held: bool,
    pending: Vec<u8>,
}

/// A log sink that can be paused
#[derive(Clone)]
pub struct LogGate {
    state: Arc<Mutex<GateState>>,
}

impl LogGate {
    /// Gate in front of `sink`, initially open
    pub fn new(sink: impl Write + Send + 'static) -> Self {
        Self {
            state: Arc::new(Mutex::new(GateState {
                sink: Box::new(sink),
                held: false,
                pending: Vec::new(),
            })),
        }
    }

    /// The process-wide gate in front of stderr
    pub fn stderr() -> &'static Self {
        static STDERR: OnceLock<LogGate> = OnceLock::new();
        STDERR.get_or_init(|| Self::new(io::stderr()))
    }

    /// Buffer everything written from now on
    pub fn hold(&self) {
        self.lock().held = true;
    }

    /// Write out buffered lines and let new ones through
    ///
    /// # Errors
    ///
    /// Returns the sink's error if the buffered lines cannot be written. The
    /// gate is open afterwards either way.
    pub fn release(&self) -> io::Result<()> {
        let mut state = self.lock();
        state.held = false;
        let pending = std::mem::take(&mut state.pending);
        state.sink.write_all(&pending)?;
        state.sink.flush()
    }

    #[must_use]
    pub fn is_held(&self) -> bool {
        self.lock().held
    }

    fn lock(&self) -> MutexGuard<'_, GateState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Writer handed to the subscriber for one event
pub struct GateWriter {
    gate: LogGate,
}

impl Write for GateWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let mut state = self.gate.lock();
        if state.held {
            state.pending.extend_from_slice(buf);
            Ok(buf.len())
        } else {
            state.sink.write(buf)
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        let mut state = self.gate.lock();
        if state.held { Ok(()) } else { state.sink.flush() }
    }
}

impl<'a> MakeWriter<'a> for LogGate {
    type Writer = GateWriter;

    fn make_writer(&'a self) -> Self::Writer {
        GateWriter { gate: self.clone() }
    }
}

/// Filter from `AWS_SELECT_LOG`, then `configured`, then `warn`
#[must_use]
pub fn filter(configured: Option<&str>) -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_new(configured.unwrap_or(DEFAULT_FILTER)))
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Install the global subscriber writing through [`LogGate::stderr`]
pub fn init(configured: Option<&str>) {
    tracing_subscriber::fmt()
        .with_env_filter(filter(configured))
        .with_writer(LogGate::stderr().clone())
        .with_target(false)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Default)]
    struct Captured(Arc<Mutex<Vec<u8>>>);

    impl Captured {
        fn text(&self) -> String {
            String::from_utf8_lossy(&self.0.lock().unwrap()).to_string()
        }
    }

    impl Write for Captured {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn subscriber(gate: LogGate) -> impl tracing::Subscriber + Send + Sync {
        tracing_subscriber::fmt()
            .with_writer(gate)
            .with_ansi(false)
            .without_time()
            .with_target(false)
            .finish()
    }

    #[test]
    fn test_open_gate_writes_through() {
        let captured = Captured::default();
        let gate = LogGate::new(captured.clone());

        tracing::subscriber::with_default(subscriber(gate.clone()), || {
            tracing::warn!("recents file unreadable");
        });

        assert!(!gate.is_held());
        assert!(captured.text().contains("recents file unreadable"));
    }

    #[test]
    fn test_held_gate_buffers_until_release() {
        let captured = Captured::default();
        let gate = LogGate::new(captured.clone());

        tracing::subscriber::with_default(subscriber(gate.clone()), || {
            gate.hold();
            tracing::warn!("first while prompting");
            tracing::warn!("second while prompting");
            assert!(gate.is_held());
            assert_eq!(captured.text(), "");

            gate.release().unwrap();
            tracing::warn!("after prompt");
        });

        let text = captured.text();
        let first = text.find("first while prompting").unwrap();
        let second = text.find("second while prompting").unwrap();
        let after = text.find("after prompt").unwrap();
        assert!(first < second && second < after);
    }

    #[test]
    fn test_release_without_hold_is_harmless() {
        let captured = Captured::default();
        let gate = LogGate::new(captured.clone());

        gate.release().unwrap();
        assert_eq!(captured.text(), "");
    }
}
