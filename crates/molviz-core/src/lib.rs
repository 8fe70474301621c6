//! Molviz Core Types and Definitions
//!
//! This crate provides the foundational types shared by the Molviz crates:
//!
//! - **Identifiers**: Opaque atom and bond handles ([`identifier`] module)
//! - **Colors**: Color handling with CSS color support ([`color::Color`])
//! - **Geometry**: Basic geometric types ([`geometry`] module)
//! - **Elements**: Periodic table lookups ([`element`] module)
//! - **Animation**: Time-varying scalar channels ([`animation::Animated`])
//! - **Draw**: Draw primitives, strokes and render layers ([`draw`] module)

pub mod animation;
pub mod color;
pub mod draw;
pub mod element;
pub mod geometry;
pub mod identifier;
