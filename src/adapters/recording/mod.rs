//! Recording adapters that capture interactions to cassettes.

pub mod design_generator;
