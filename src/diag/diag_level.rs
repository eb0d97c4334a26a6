/// Severity levels for diagnostic messages.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DiagLevel {
    /// Very fine-grained events, e.g. every meter block processed.
    Trace,
    /// Fine-grained events useful while debugging reconciliation.
    Debug,
    /// Coarse progress of a session (joined, peer added, mode switched).
    Info,
    /// Suspicious but tolerated input (unknown peer, malformed payload).
    Warn,
    /// Failures the session survives but the embedder should surface.
    Error,
}
