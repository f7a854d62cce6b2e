#![warn(missing_docs)]

//! Core menu engine for skinbar => See `skinbar` crate.
//!
//! Renders a serialized menu description into a retained element tree and
//! drives the menubar state machine: keyboard navigation, mnemonics, hover
//! timers, submenu lifecycle and radio groups.

/// Contains the [ElementTree](dom::ElementTree) menus render into.
pub mod dom;

/// Contains the cancellable [TimerQueue](timer::TimerQueue) and [Debounce](timer::Debounce).
pub mod timer;

/// Contains the key model, accelerator formatting and mnemonic parsing.
pub mod keys;

/// Contains the [MenuConfig](config::MenuConfig) struct.
pub mod config;

/// Contains error types.
pub mod error;

/// Contains the command dispatch and icon resolution collaborators.
pub mod dispatch;

/// Contains menu descriptions, trees, items and submenus.
pub mod menu;

/// Contains the [MenuBar](menubar::MenuBar) controller.
pub mod menubar;

/// Contains the [TitleBar](titlebar::TitleBar) and window state mirror.
pub mod titlebar;

pub use vello::kurbo;
pub use vello::peniko;
