//! Serialized menu description handed over by the host.
//!
//! The shape follows a native menu cloned to plain data: every node carries a
//! `type` tag (`normal`, `checkbox`, `radio`, `separator`, `submenu`).
//!
//! ```json
//! [{ "type": "submenu", "label": "&File", "submenu": [
//!     { "type": "normal", "label": "&New", "accelerator": "CmdOrCtrl+N", "commandId": 1 },
//!     { "type": "separator" },
//!     { "type": "normal", "label": "E&xit", "commandId": 2 }
//! ]}]
//! ```

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::{MenuError, MenuResult};
use crate::menu::commands::CommandId;

/// How a leaf reacts to activation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LeafKind {
    /// Plain command.
    #[default]
    Normal,
    /// Toggles its own checked state.
    Checkbox,
    /// Mutually exclusive within its separator-bounded run.
    Radio,
}

/// Icon attached to a leaf.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum MenuIcon {
    /// A glyph rendered as text.
    Text {
        /// The glyph.
        glyph: String,
    },
    /// A native image the host renders to a data URL on request.
    Image,
}

/// A command entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeafItem {
    /// Label, possibly containing an `&` mnemonic marker.
    pub label: String,
    /// Accelerator text such as `CmdOrCtrl+N`.
    pub accelerator: Option<String>,
    /// Optional icon.
    pub icon: Option<MenuIcon>,
    /// Normal, checkbox or radio.
    pub kind: LeafKind,
    /// Checked state for checkbox and radio leaves.
    pub checked: bool,
    /// Disabled leaves are rendered but not navigable.
    pub enabled: bool,
    /// Invisible leaves are rendered hidden and not navigable.
    pub visible: bool,
    /// Reported to the dispatcher on activation.
    pub command_id: CommandId,
}

/// A nested menu.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmenuDescription {
    /// Label, possibly containing an `&` mnemonic marker.
    pub label: String,
    /// Accelerator text.
    pub accelerator: Option<String>,
    /// Disabled submenus cannot be opened.
    pub enabled: bool,
    /// Invisible submenus are rendered hidden.
    pub visible: bool,
    /// Child nodes in display order.
    pub children: Vec<MenuNode>,
}

/// One node of a menu description.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawMenuNode", into = "RawMenuNode")]
pub enum MenuNode {
    /// A command entry.
    Leaf(LeafItem),
    /// A separator line.
    Separator,
    /// A nested menu.
    Submenu(SubmenuDescription),
}

impl MenuNode {
    fn new_leaf(kind: LeafKind, label: impl Into<String>, command: impl Into<CommandId>) -> Self {
        MenuNode::Leaf(LeafItem {
            label: label.into(),
            accelerator: None,
            icon: None,
            kind,
            checked: false,
            enabled: true,
            visible: true,
            command_id: command.into(),
        })
    }

    /// A plain command leaf.
    pub fn leaf(label: impl Into<String>, command: impl Into<CommandId>) -> Self {
        Self::new_leaf(LeafKind::Normal, label, command)
    }

    /// A checkbox leaf.
    pub fn checkbox(label: impl Into<String>, command: impl Into<CommandId>) -> Self {
        Self::new_leaf(LeafKind::Checkbox, label, command)
    }

    /// A radio leaf.
    pub fn radio(label: impl Into<String>, command: impl Into<CommandId>) -> Self {
        Self::new_leaf(LeafKind::Radio, label, command)
    }

    /// A separator.
    pub fn separator() -> Self {
        MenuNode::Separator
    }

    /// A nested menu.
    pub fn submenu(label: impl Into<String>, children: Vec<MenuNode>) -> Self {
        MenuNode::Submenu(SubmenuDescription {
            label: label.into(),
            accelerator: None,
            enabled: true,
            visible: true,
            children,
        })
    }

    /// Set the accelerator text.
    pub fn with_accelerator(mut self, accelerator: impl Into<String>) -> Self {
        match &mut self {
            MenuNode::Leaf(leaf) => leaf.accelerator = Some(accelerator.into()),
            MenuNode::Submenu(sub) => sub.accelerator = Some(accelerator.into()),
            MenuNode::Separator => {},
        }
        self
    }

    /// Set enabled state.
    pub fn with_enabled(mut self, enabled: bool) -> Self {
        match &mut self {
            MenuNode::Leaf(leaf) => leaf.enabled = enabled,
            MenuNode::Submenu(sub) => sub.enabled = enabled,
            MenuNode::Separator => {},
        }
        self
    }

    /// Set visibility.
    pub fn with_visible(mut self, visible: bool) -> Self {
        match &mut self {
            MenuNode::Leaf(leaf) => leaf.visible = visible,
            MenuNode::Submenu(sub) => sub.visible = visible,
            MenuNode::Separator => {},
        }
        self
    }

    /// Set checked state of a leaf.
    pub fn with_checked(mut self, checked: bool) -> Self {
        if let MenuNode::Leaf(leaf) = &mut self {
            leaf.checked = checked;
        }
        self
    }

    /// Attach an icon to a leaf.
    pub fn with_icon(mut self, icon: MenuIcon) -> Self {
        if let MenuNode::Leaf(leaf) = &mut self {
            leaf.icon = Some(icon);
        }
        self
    }

    /// The raw label, or an empty string for separators.
    pub fn label(&self) -> &str {
        match self {
            MenuNode::Leaf(leaf) => &leaf.label,
            MenuNode::Submenu(sub) => &sub.label,
            MenuNode::Separator => "",
        }
    }

    /// Check if this is a separator.
    pub fn is_separator(&self) -> bool {
        matches!(self, MenuNode::Separator)
    }
}

/// A whole menu: the top-level entries of the menubar.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MenuDescription {
    /// Top-level nodes in display order.
    pub items: Vec<MenuNode>,
}

impl MenuDescription {
    /// Wrap a list of nodes.
    pub fn new(items: Vec<MenuNode>) -> Self {
        Self { items }
    }

    /// Parse the host's JSON. `null` yields an empty menu.
    pub fn from_json(source: &str) -> MenuResult<Self> {
        let items: Option<Vec<MenuNode>> = serde_json::from_str(source)?;
        Ok(Self {
            items: items.unwrap_or_default(),
        })
    }

    /// Serialize back to the host's JSON shape.
    pub fn to_json(&self) -> MenuResult<String> {
        Ok(serde_json::to_string(&self.items)?)
    }

    /// Check that every command id is used by exactly one leaf.
    pub fn validate(&self) -> MenuResult<()> {
        fn walk(nodes: &[MenuNode], seen: &mut HashMap<CommandId, String>) -> MenuResult<()> {
            for node in nodes {
                match node {
                    MenuNode::Leaf(leaf) => {
                        if let Some(first) = seen.get(&leaf.command_id) {
                            return Err(MenuError::DuplicateCommand {
                                command: leaf.command_id,
                                first: first.clone(),
                                second: leaf.label.clone(),
                            });
                        }
                        seen.insert(leaf.command_id, leaf.label.clone());
                    },
                    MenuNode::Submenu(sub) => walk(&sub.children, seen)?,
                    MenuNode::Separator => {},
                }
            }
            Ok(())
        }

        walk(&self.items, &mut HashMap::new())
    }

    /// Find a leaf by command id anywhere in the tree.
    pub fn find_leaf(&self, command: CommandId) -> Option<&LeafItem> {
        fn find(nodes: &[MenuNode], command: CommandId) -> Option<&LeafItem> {
            nodes.iter().find_map(|node| match node {
                MenuNode::Leaf(leaf) if leaf.command_id == command => Some(leaf),
                MenuNode::Submenu(sub) => find(&sub.children, command),
                _ => None,
            })
        }

        find(&self.items, command)
    }
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawLeaf {
    #[serde(default)]
    label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    accelerator: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    icon: Option<MenuIcon>,
    #[serde(default)]
    checked: bool,
    #[serde(default = "default_true")]
    enabled: bool,
    #[serde(default = "default_true")]
    visible: bool,
    command_id: CommandId,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawSubmenu {
    #[serde(default)]
    label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    accelerator: Option<String>,
    #[serde(default = "default_true")]
    enabled: bool,
    #[serde(default = "default_true")]
    visible: bool,
    #[serde(default, alias = "children")]
    submenu: Option<Vec<MenuNode>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct RawSeparator {}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
enum RawMenuNode {
    Normal(RawLeaf),
    Checkbox(RawLeaf),
    Radio(RawLeaf),
    Separator(RawSeparator),
    Submenu(RawSubmenu),
}

impl RawLeaf {
    fn into_leaf(self, kind: LeafKind) -> LeafItem {
        LeafItem {
            label: self.label,
            accelerator: self.accelerator,
            icon: self.icon,
            kind,
            checked: self.checked,
            enabled: self.enabled,
            visible: self.visible,
            command_id: self.command_id,
        }
    }
}

impl From<RawMenuNode> for MenuNode {
    fn from(raw: RawMenuNode) -> Self {
        match raw {
            RawMenuNode::Normal(leaf) => MenuNode::Leaf(leaf.into_leaf(LeafKind::Normal)),
            RawMenuNode::Checkbox(leaf) => MenuNode::Leaf(leaf.into_leaf(LeafKind::Checkbox)),
            RawMenuNode::Radio(leaf) => MenuNode::Leaf(leaf.into_leaf(LeafKind::Radio)),
            RawMenuNode::Separator(_) => MenuNode::Separator,
            RawMenuNode::Submenu(sub) => MenuNode::Submenu(SubmenuDescription {
                label: sub.label,
                accelerator: sub.accelerator,
                enabled: sub.enabled,
                visible: sub.visible,
                children: sub.submenu.unwrap_or_default(),
            }),
        }
    }
}

impl From<MenuNode> for RawMenuNode {
    fn from(node: MenuNode) -> Self {
        match node {
            MenuNode::Leaf(leaf) => {
                let raw = RawLeaf {
                    label: leaf.label,
                    accelerator: leaf.accelerator,
                    icon: leaf.icon,
                    checked: leaf.checked,
                    enabled: leaf.enabled,
                    visible: leaf.visible,
                    command_id: leaf.command_id,
                };
                match leaf.kind {
                    LeafKind::Normal => RawMenuNode::Normal(raw),
                    LeafKind::Checkbox => RawMenuNode::Checkbox(raw),
                    LeafKind::Radio => RawMenuNode::Radio(raw),
                }
            },
            MenuNode::Separator => RawMenuNode::Separator(RawSeparator::default()),
            MenuNode::Submenu(sub) => RawMenuNode::Submenu(RawSubmenu {
                label: sub.label,
                accelerator: sub.accelerator,
                enabled: sub.enabled,
                visible: sub.visible,
                submenu: Some(sub.children),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FILE_MENU: &str = r#"[
        { "type": "submenu", "label": "&File", "submenu": [
            { "type": "normal", "label": "&New", "accelerator": "CmdOrCtrl+N", "commandId": 1 },
            { "type": "separator", "label": "" },
            { "type": "checkbox", "label": "Auto &Save", "checked": true, "commandId": 3 },
            { "type": "normal", "label": "E&xit", "enabled": false, "commandId": 2,
              "icon": { "kind": "image" } }
        ]}
    ]"#;

    #[test]
    fn test_parse_electron_shape() {
        let description = MenuDescription::from_json(FILE_MENU).unwrap();
        assert_eq!(description.items.len(), 1);

        let MenuNode::Submenu(file) = &description.items[0] else {
            panic!("expected a submenu");
        };
        assert_eq!(file.label, "&File");
        assert_eq!(file.children.len(), 4);
        assert!(file.children[1].is_separator());

        let MenuNode::Leaf(save) = &file.children[2] else {
            panic!("expected a leaf");
        };
        assert_eq!(save.kind, LeafKind::Checkbox);
        assert!(save.checked);
        assert!(save.enabled);

        let exit = description.find_leaf(CommandId(2)).unwrap();
        assert!(!exit.enabled);
        assert_eq!(exit.icon, Some(MenuIcon::Image));
    }

    #[test]
    fn test_null_is_empty() {
        assert!(MenuDescription::from_json("null").unwrap().items.is_empty());
        assert!(MenuDescription::from_json("[]").unwrap().items.is_empty());
        assert!(MenuDescription::from_json("{").is_err());
    }

    #[test]
    fn test_json_survives_reserialization() {
        let description = MenuDescription::from_json(FILE_MENU).unwrap();
        let json = description.to_json().unwrap();
        assert_eq!(MenuDescription::from_json(&json).unwrap(), description);
    }

    #[test]
    fn test_duplicate_command_ids_rejected() {
        let description = MenuDescription::new(vec![MenuNode::submenu(
            "Edit",
            vec![
                MenuNode::leaf("Copy", 7u32),
                MenuNode::submenu("More", vec![MenuNode::leaf("Copy Path", 7u32)]),
            ],
        )]);
        match description.validate() {
            Err(MenuError::DuplicateCommand { command, first, second }) => {
                assert_eq!(command, CommandId(7));
                assert_eq!(first, "Copy");
                assert_eq!(second, "Copy Path");
            },
            other => panic!("unexpected result: {:?}", other),
        }
    }
}
