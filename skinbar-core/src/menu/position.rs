//! Size estimates and submenu placement.
//!
//! Hosts may report real layout through [ElementTree::set_rect](crate::dom::ElementTree::set_rect).
//! Until they do, trees are laid out with the estimates below so that nested
//! submenus still have a trigger box to anchor on.

use vello::kurbo::{Point, Rect, Size};

use crate::keys::{format_accelerator, parse_mnemonic};
use crate::menu::constants::*;
use crate::menu::description::MenuNode;

/// Where a submenu ends up relative to its trigger.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    /// Top-left corner of the submenu container.
    pub origin: Point,
    /// Whether the submenu was anchored below the trigger instead of beside it.
    pub flipped: bool,
}

impl Placement {
    /// The container rectangle for a menu of `size`.
    pub fn rect(&self, size: Size) -> Rect {
        Rect::from_origin_size(self.origin, size)
    }
}

/// What a new menu tree is positioned against.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Anchor {
    /// A menubar button: the menu drops down below it.
    Below(Rect),
    /// A submenu trigger row: the menu opens beside it, or below when flipped.
    Beside(Rect),
    /// A fixed point, such as a context menu position.
    At(Point),
}

impl Anchor {
    /// Resolve the placement of a menu of `size`.
    pub fn place(self, size: Size, viewport_width: f64, flip_inset: f64) -> Placement {
        match self {
            Anchor::Below(button) => place_dropdown(button),
            Anchor::Beside(trigger) => place_submenu(trigger, size, viewport_width, flip_inset),
            Anchor::At(origin) => Placement {
                origin,
                flipped: false,
            },
        }
    }
}

/// Estimate the size of a menu showing `items`.
pub fn estimate_menu_size(items: &[MenuNode]) -> Size {
    let mut height = PADDING * 2.0;
    let mut width: f64 = MIN_WIDTH;

    for item in items {
        if item.is_separator() {
            height += SEPARATOR_HEIGHT;
            continue;
        }
        height += ITEM_HEIGHT;

        let text_width = parse_mnemonic(item.label()).display_text.chars().count() as f64
            * TEXT_CHAR_WIDTH;
        let shortcut_width = match item {
            MenuNode::Leaf(leaf) => leaf
                .accelerator
                .as_deref()
                .map(|accel| format_accelerator(accel).chars().count() as f64 * SHORTCUT_CHAR_WIDTH)
                .unwrap_or(0.0),
            _ => 0.0,
        };

        // check column on the left, arrow column on the right
        let total = text_width
            + PADDING * 2.0
            + MIN_TEXT_SHORTCUT_GAP
            + shortcut_width
            + CHECKMARK_ARROW_WIDTH * 2.0;
        width = width.max(total);
    }

    Size::new(width.min(MAX_WIDTH), height)
}

/// Rows of a menu laid out top to bottom inside `container`.
pub fn layout_rows(container: Rect, items: &[MenuNode]) -> Vec<Rect> {
    let mut y = container.y0 + PADDING;
    items
        .iter()
        .map(|item| {
            let height = if item.is_separator() {
                SEPARATOR_HEIGHT
            } else {
                ITEM_HEIGHT
            };
            let row = Rect::new(container.x0, y, container.x1, y + height);
            y += height;
            row
        })
        .collect()
}

/// Place a submenu next to its trigger row.
///
/// The submenu opens to the right of the trigger, top-aligned with it. When
/// that would cross the right edge of the viewport it is anchored below the
/// trigger instead, shifted right by `flip_inset`. The result is not revisited
/// after opening.
pub fn place_submenu(trigger: Rect, size: Size, viewport_width: f64, flip_inset: f64) -> Placement {
    if trigger.x1 + size.width > viewport_width {
        Placement {
            origin: Point::new(trigger.x0 + flip_inset, trigger.y1),
            flipped: true,
        }
    } else {
        Placement {
            origin: Point::new(trigger.x1, trigger.y0),
            flipped: false,
        }
    }
}

/// Place a top-level menu below its menubar button.
pub fn place_dropdown(button: Rect) -> Placement {
    Placement {
        origin: Point::new(button.x0, button.y1),
        flipped: false,
    }
}
