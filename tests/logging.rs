//! Debug logging is routed through `tracing` and gated by the debug flag.

use std::io;
use std::sync::{Arc, Mutex};
use switchyard::machine::Fsm;
use tracing_subscriber::fmt::MakeWriter;

/// A writer that captures log output for testing
#[derive(Clone, Default)]
struct CapturedLogs {
    logs: Arc<Mutex<Vec<u8>>>,
}

impl CapturedLogs {
    fn contents(&self) -> String {
        let logs = self.logs.lock().unwrap();
        String::from_utf8_lossy(&logs).to_string()
    }
}

impl io::Write for CapturedLogs {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.logs.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for CapturedLogs {
    type Writer = CapturedLogs;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

/// Run `f` with a thread-local subscriber and return what it logged.
fn with_tracing<F: FnOnce()>(f: F) -> String {
    let logs = CapturedLogs::default();
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::TRACE)
        .with_writer(logs.clone())
        .with_ansi(false)
        .without_time()
        .finish();

    tracing::subscriber::with_default(subscriber, f);
    logs.contents()
}

fn door() -> Fsm<&'static str, &'static str> {
    let mut fsm = Fsm::with_states(["closed", "open", "locked"])
        .unwrap()
        .named("door");
    fsm.add_transition("push", "closed", "open").unwrap();
    fsm.add_transition_with("lock", "open", || None).unwrap();
    fsm.add_transition("jam", "open", "broken").unwrap();
    fsm
}

#[test]
fn debug_flag_off_logs_nothing() {
    let output = with_tracing(|| {
        let fsm = door();
        fsm.dispatch("push").unwrap();
        fsm.dispatch("pull").unwrap();
    });

    assert!(output.is_empty(), "unexpected output: {output}");
}

#[test]
fn debug_flag_on_logs_each_decision() {
    let output = with_tracing(|| {
        let fsm = door();
        fsm.set_debug(true);

        fsm.dispatch("pull").unwrap();
        fsm.dispatch("push").unwrap();
        fsm.dispatch("lock").unwrap();
        fsm.dispatch("jam").unwrap_err();
    });

    assert!(output.contains("machine=door"));
    assert!(output.contains("event received"));
    assert!(output.contains("no transition"));
    assert!(output.contains(r#"transition="pull"@"closed""#));
    assert!(output.contains("state changed"));
    assert!(output.contains("transition declined"));
    assert!(output.contains("target state is not declared"));
    assert!(output.contains("WARN"));
}
