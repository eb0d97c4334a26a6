use crate::diag::diag_level::DiagLevel;

/// Destination for diagnostic messages.
///
/// The engine never writes to stdout or a file itself; everything it wants
/// to report goes through a sink supplied by the embedder. Sinks must be
/// cheap to call from the session's event path.
pub trait DiagSink: Send + Sync {
    fn log(&self, level: DiagLevel, msg: &str, target: &'static str);
}
