//! Session lifecycle: ports, state machine and consumer surface

pub mod callback;
pub mod consumer;
pub mod machine;
pub mod ports;
pub mod processed;

pub use callback::CallbackParams;
pub use consumer::SessionConsumer;
pub use machine::{SessionMachine, PROVIDER_REJECTED_FALLBACK};
pub use ports::*;
pub use processed::ProcessedCodes;
