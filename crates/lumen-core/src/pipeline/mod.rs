//! Per-image pipeline components.
//!
//! - **discovery**: Find image files and plan input/output task pairs
//! - **decode**: Load an image into the canonical RGB buffer
//! - **encode**: Write a buffer into the mirrored output tree
//! - **processor**: Orchestrates decode → filters → encode for one task

pub mod decode;
pub mod discovery;
pub mod encode;
pub mod processor;

// Re-exports for convenient access
pub use decode::ImageDecoder;
pub use discovery::FileDiscovery;
pub use encode::ImageEncoder;
pub use processor::ImageProcessor;
