//! Introspector Core Types and Definitions
//!
//! This crate provides the foundational types for turning source-code
//! annotations into diagrams. It includes:
//!
//! - **Model**: The four element kinds ([`model::Case`], [`model::Component`],
//!   [`model::Call`], [`model::Note`]) unified by [`model::Element`]
//! - **Records**: The serde-friendly input contract handed over by an
//!   annotation extractor ([`record::AnnotationRecord`])
//! - **Errors**: Construction failures ([`error::ModelError`])

pub mod error;
pub mod model;
pub mod record;

pub use error::ModelError;
