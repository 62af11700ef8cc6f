//! Corkboard Core Types and Definitions
//!
//! This crate provides the foundational types shared by the Corkboard layout
//! engines and renderers. It includes:
//!
//! - **Colors**: Color handling with CSS color support ([`color::Color`])
//! - **Geometry**: Basic geometric types ([`geometry`] module)
//! - **Labels**: Annotation inputs and placements ([`label`] module)
//! - **Stickies**: Sticky note palette and sizing heuristics ([`sticky`] module)

pub mod color;
pub mod geometry;
pub mod label;
pub mod sticky;
