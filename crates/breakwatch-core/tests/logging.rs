//! Registry events emitted through `tracing`.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use std::io;
use std::sync::{Arc, Mutex};

use breakwatch_core::{BreakerRegistry, ManualBreaker};

#[derive(Clone, Default)]
struct Captured(Arc<Mutex<Vec<u8>>>);

impl io::Write for Captured {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Captured {
    fn text(&self) -> String {
        String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
    }
}

fn capture<F: FnOnce()>(f: F) -> String {
    let out = Captured::default();
    let writer = out.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_ansi(false)
        .with_writer(move || writer.clone())
        .finish();
    tracing::subscriber::with_default(subscriber, f);
    out.text()
}

#[test]
fn lookup_emits_debug_event() {
    let reg = BreakerRegistry::new();
    reg.register("payments", Arc::new(ManualBreaker::default())).unwrap();

    let logs = capture(|| {
        assert!(reg.lookup("payments").is_some());
        assert!(reg.lookup("ghost").is_none());
    });

    assert!(logs.contains("circuit breaker lookup"), "{logs}");
    assert!(logs.contains("breaker=payments found=true"), "{logs}");
    assert!(logs.contains("breaker=ghost found=false"), "{logs}");
}

#[test]
fn duplicate_registration_is_warned() {
    let reg = BreakerRegistry::new();
    reg.register("payments", Arc::new(ManualBreaker::default())).unwrap();

    let logs = capture(|| {
        reg.register("payments", Arc::new(ManualBreaker::default()))
            .expect_err("must fail");
    });

    assert!(logs.contains("WARN"), "{logs}");
    assert!(logs.contains("duplicate circuit breaker registration rejected"), "{logs}");
}
