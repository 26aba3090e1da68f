//! Application layer - Use cases and port interfaces
//!
//! Contains the core operations and trait definitions
//! for external system interactions.

pub mod generate;
pub mod ports;
pub mod publish;
pub mod records;

// Re-export use cases
pub use generate::{
    GenerateAudioUseCase, GenerateCallbacks, GenerateError, GenerateReport, GeneratedTip,
    GenerationStatus,
};
pub use publish::{
    PublishCallbacks, PublishError, PublishOutcome, PublishReport, PublishTarget,
    PublishTipsUseCase,
};
pub use records::ListTipsUseCase;
