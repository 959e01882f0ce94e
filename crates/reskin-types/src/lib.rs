//! Foundation types for reskin.
//!
//! This crate contains the platform-agnostic types shared by all reskin
//! crates: colors, drawables, resource ids, theme attributes, feature
//! configuration, and error types.

pub mod color;
pub mod config;
pub mod error;
pub mod resource;

pub use color::{Color, parse_hex_color};
pub use config::{SkinConfig, SkinFeatures};
pub use error::{Result, SkinError};
pub use resource::{Drawable, ResourceId, ScreenId, ThemeAttr};
