//! Menu trees and their building blocks.
//!
//! A [MenuDescription] is rendered into a [MenuTree]. Trees nest through
//! [SubmenuNode]s, each owning at most one open child tree.

pub mod commands;
pub mod constants;
pub mod context;
pub mod description;
pub mod item;
pub mod mnemonic;
pub mod position;
pub mod radio;
pub mod submenu;
pub mod tree;

pub use commands::CommandId;
pub use context::{FocusTarget, MenuEnv, MenuTimer, PointerEvent, SubmenuTimer, TreeOutcome};
pub use description::{LeafItem, LeafKind, MenuDescription, MenuIcon, MenuNode, SubmenuDescription};
pub use item::{ActionItem, MenuItemNode, SeparatorItem};
pub use mnemonic::{MnemonicHit, MnemonicIndex};
pub use position::{Anchor, Placement};
pub use radio::{radio_group, radio_group_bounds, update_radio_group};
pub use submenu::{SubmenuNode, SubmenuSignal};
pub use tree::MenuTree;
