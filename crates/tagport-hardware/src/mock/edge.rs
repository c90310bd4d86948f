//! Mock edge-triggered input line.

use tagport_core::Result;
use tagport_core::transport::{EdgeHandler, EdgeInput};

/// Simulated digital input line with edge-trigger registration.
///
/// A registered handler fires once per [`pulse`](MockEdgeLine::pulse),
/// standing in for the hardware falling edge. The line is `Send`, so a
/// test can drive it from a second thread to exercise the asynchronous
/// callback context.
///
/// # Examples
///
/// ```
/// use tagport_core::transport::EdgeInput;
/// use tagport_hardware::mock::MockEdgeLine;
///
/// let mut line = MockEdgeLine::new();
/// line.on_falling_edge(Box::new(|| println!("edge"))).unwrap();
/// line.pulse();
/// ```
#[derive(Default)]
pub struct MockEdgeLine {
    handler: Option<EdgeHandler>,
}

impl MockEdgeLine {
    /// Create a line with no handler wired.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a handler has been registered.
    pub fn is_wired(&self) -> bool {
        self.handler.is_some()
    }

    /// Simulate one falling edge. Does nothing if no handler is wired.
    pub fn pulse(&mut self) {
        if let Some(handler) = self.handler.as_mut() {
            handler();
        }
    }

    /// Simulate a burst of falling edges.
    pub fn pulse_n(&mut self, count: usize) {
        for _ in 0..count {
            self.pulse();
        }
    }
}

impl EdgeInput for MockEdgeLine {
    fn on_falling_edge(&mut self, handler: EdgeHandler) -> Result<()> {
        self.handler = Some(handler);
        Ok(())
    }
}

impl std::fmt::Debug for MockEdgeLine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MockEdgeLine")
            .field("wired", &self.is_wired())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn test_unwired_pulse_is_a_no_op() {
        let mut line = MockEdgeLine::new();
        assert!(!line.is_wired());
        line.pulse();
    }

    #[test]
    fn test_pulse_invokes_handler() {
        let count = Arc::new(AtomicUsize::new(0));
        let seen = Arc::clone(&count);

        let mut line = MockEdgeLine::new();
        line.on_falling_edge(Box::new(move || {
            seen.fetch_add(1, Ordering::SeqCst);
        }))
        .unwrap();
        assert!(line.is_wired());

        line.pulse();
        line.pulse_n(4);
        assert_eq!(count.load(Ordering::SeqCst), 5);
    }

    #[test]
    fn test_pulse_from_another_thread() {
        let count = Arc::new(AtomicUsize::new(0));
        let seen = Arc::clone(&count);

        let mut line = MockEdgeLine::new();
        line.on_falling_edge(Box::new(move || {
            seen.fetch_add(1, Ordering::SeqCst);
        }))
        .unwrap();

        let driver = std::thread::spawn(move || {
            line.pulse_n(26);
            line
        });
        let _line = driver.join().expect("driver thread panicked");

        assert_eq!(count.load(Ordering::SeqCst), 26);
    }
}
