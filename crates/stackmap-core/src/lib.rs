//! stackmap Core Types and Definitions
//!
//! This crate provides the foundational types shared by the stackmap
//! renderers. It includes:
//!
//! - **Identifiers**: Efficient string-interned identifiers ([`identifier::Id`])
//! - **Colors**: Color handling with CSS color support ([`color::Color`])
//! - **Geometry**: Basic geometric types ([`geometry`] module)
//! - **Scene**: Surface-independent visual primitives ([`scene`] module)
//! - **Semantic**: Descriptor types for diagrams ([`semantic`] module)

pub mod color;
pub mod geometry;
pub mod identifier;
pub mod scene;
pub mod semantic;
