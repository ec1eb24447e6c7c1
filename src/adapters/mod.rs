// Adapters layer: concrete implementations for external systems (mail relay, file storage).

pub mod notifier;
pub mod storage;
