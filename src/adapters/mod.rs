// Adapters layer: concrete implementations for external systems (provider API, run log file).

pub mod log_file;
pub mod voipms;
