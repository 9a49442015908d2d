//! Port traits defining external boundaries.
//!
//! Each trait represents a boundary between the application core and an
//! external system. Implementations live in `src/adapters/`.

pub mod design_generator;

pub use design_generator::{
    Candidate, DesignGenerator, GenerateFuture, GenerationRequest, GenerationResponse, Part,
};
