//! Radio group resolution.
//!
//! A radio group is the run of siblings between two separators. Bounds depend
//! only on separator positions, which do not change during a tree's life, so
//! the range computed on the first click is cached on every radio it covers.

use std::ops::Range;

use crate::menu::context::MenuEnv;
use crate::menu::description::LeafKind;
use crate::menu::item::MenuItemNode;

/// Checked states captured before a radio or checkbox update.
pub type CheckSnapshot = Vec<(usize, bool)>;

/// Half-open range of the separator-bounded run containing `index`.
pub fn radio_group_bounds<T>(siblings: &[T], index: usize, is_separator: impl Fn(&T) -> bool) -> Range<usize> {
    let index = index.min(siblings.len());
    let start = siblings[..index]
        .iter()
        .rposition(&is_separator)
        .map(|pos| pos + 1)
        .unwrap_or(0);
    let end = siblings[index..]
        .iter()
        .position(&is_separator)
        .map(|pos| index + pos)
        .unwrap_or(siblings.len());
    start..end
}

/// Radio group of the item at `index`, reusing any sibling's cached range.
pub fn radio_group(siblings: &[MenuItemNode], index: usize) -> Range<usize> {
    let cached = siblings
        .iter()
        .filter_map(|item| item.as_action().and_then(|action| action.radio_group()))
        .find(|range| range.contains(&index));

    match cached {
        Some(range) => range,
        None => radio_group_bounds(siblings, index, MenuItemNode::is_separator),
    }
}

/// Check the radio at `index` and uncheck every other radio of its group.
///
/// Runs on every click, including clicks on the radio that is already
/// checked. Returns the previous states so a rejected command can be undone.
pub fn update_radio_group(siblings: &mut [MenuItemNode], index: usize, env: &mut MenuEnv<'_>) -> CheckSnapshot {
    let group = radio_group(siblings, index);
    let mut snapshot = Vec::new();

    for i in group.clone() {
        let Some(action) = siblings.get_mut(i).and_then(MenuItemNode::as_action_mut) else {
            continue;
        };
        if action.kind() != LeafKind::Radio {
            continue;
        }
        snapshot.push((i, action.is_checked()));
        action.set_radio_group(group.clone());
        action.set_checked(env, i == index);
    }

    log::trace!("Radio group {:?} now selects {}", group, index);
    snapshot
}

/// Put back the checked states captured in `snapshot`.
pub fn restore_checked(siblings: &mut [MenuItemNode], snapshot: &CheckSnapshot, env: &mut MenuEnv<'_>) {
    for &(i, checked) in snapshot {
        if let Some(action) = siblings.get_mut(i).and_then(MenuItemNode::as_action_mut) {
            action.set_checked(env, checked);
        }
    }
}
