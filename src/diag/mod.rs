pub mod diag_level;
pub mod diag_macros;
pub mod diag_sink;
pub mod memory_diag_sink;
pub mod noop_diag_sink;

pub use diag_level::DiagLevel;
pub use diag_sink::DiagSink;
pub use memory_diag_sink::{DiagRecord, MemoryDiagSink};
pub use noop_diag_sink::NoopDiagSink;
