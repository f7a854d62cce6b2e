#![warn(missing_docs)]

//! # Skinbar Styling
//!
//! Colors for the custom title bar and its menus.
//!
//! The menu engine never computes colors itself. It receives a [MenuStyle]
//! record and applies it uniformly to every rendered node:
//!
//! - **[MenuStyle](style::MenuStyle)**: the five colors used by menus
//! - **[ThemeConfig](config::ThemeConfig)**: resolves a style from `SKINBAR_THEME` or a file
//! - **[ThemeError](error::ThemeError)**: errors raised while loading styles
//!
//! ```rust
//! use skinbar_theme::config::ThemeConfig;
//!
//! let style = ThemeConfig::from_env_or_default().resolve_style().unwrap_or_default();
//! ```

/// Errors for style loading.
pub mod error;

/// Theme source configuration.
pub mod config;

/// The style record applied to menus.
pub mod style;

/// Hex serialization for colors.
pub mod serde_color;

pub use error::{ThemeError, ThemeResult};
pub use style::MenuStyle;
