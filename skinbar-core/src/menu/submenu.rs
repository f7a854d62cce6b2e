// SPDX-License-Identifier: MIT OR Apache-2.0
//! Submenu triggers and their open/close scheduling.
//!
//! A [SubmenuNode] is a row that owns an optional nested [MenuTree]. It opens
//! on click, Enter or Right, and after the pointer rests on it for the show
//! delay. It closes on Escape or Left, when a sibling opens, and after focus
//! has stayed outside it for the hide delay.

use crate::dom::ElementId;
use crate::keys::parse_mnemonic;
use crate::menu::constants::{class, SUBMENU_GLYPH};
use crate::menu::context::{FocusTarget, MenuEnv, MenuTimer, SubmenuTimer};
use crate::menu::description::SubmenuDescription;
use crate::menu::position::Anchor;
use crate::menu::tree::MenuTree;
use crate::timer::{Debounce, TimerHandle};

/// What the owning tree should do after a submenu timer fired.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmenuSignal {
    /// Stale or irrelevant firing.
    Nothing,
    /// Open this submenu.
    Open,
    /// Close this submenu.
    Close,
}

/// A row owning a nested menu tree.
#[derive(Debug)]
pub struct SubmenuNode {
    element: ElementId,
    label: ElementId,
    description: SubmenuDescription,
    mnemonic: Option<char>,
    path: Vec<usize>,
    depth: usize,
    child: Option<Box<MenuTree>>,
    show_timer: Debounce,
    hide_timer: Debounce,
    pointer_over: bool,
}

impl SubmenuNode {
    /// Render the trigger row. The nested tree is only built when opened.
    pub fn render(env: &mut MenuEnv<'_>, description: SubmenuDescription, path: Vec<usize>, depth: usize) -> Self {
        let element = env.dom.create_with_class("li", class::ACTION_ITEM);
        env.dom.add_class(element, class::SUBMENU);
        env.dom.set_attribute(element, "role", "menuitem");
        env.dom.set_attribute(element, "aria-haspopup", "true");

        let check = env.dom.create_with_class("span", class::CHECK);
        env.dom.append_child(element, check);

        let parsed = parse_mnemonic(&description.label);
        let label = env.dom.create_with_class("span", class::LABEL);
        env.dom.set_text(label, parsed.display_text);
        if let Some(index) = parsed.mnemonic_index {
            env.dom.set_attribute(label, "data-mnemonic-index", index.to_string());
        }
        env.dom.append_child(element, label);

        let indicator = env.dom.create_with_class("span", class::SUBMENU_INDICATOR);
        env.dom.set_text(indicator, SUBMENU_GLYPH);
        env.dom.append_child(element, indicator);

        if !description.enabled {
            env.dom.add_class(element, class::DISABLED);
            env.dom.set_attribute(element, "aria-disabled", "true");
        }
        if !description.visible {
            env.dom.add_class(element, class::HIDDEN);
        }
        env.paint_row(element, false);

        Self {
            element,
            label,
            mnemonic: parsed.mnemonic,
            description,
            path,
            depth,
            child: None,
            show_timer: Debounce::new(env.config.submenu_show_delay()),
            hide_timer: Debounce::new(env.config.submenu_hide_delay()),
            pointer_over: false,
        }
    }

    /// The trigger row element.
    pub fn element(&self) -> ElementId {
        self.element
    }

    /// The label span.
    pub fn label_element(&self) -> ElementId {
        self.label
    }

    /// The description the nested tree is built from.
    pub fn description(&self) -> &SubmenuDescription {
        &self.description
    }

    /// Timer address of this node.
    pub fn path(&self) -> &[usize] {
        &self.path
    }

    /// Mnemonic letter of the label.
    pub fn mnemonic(&self) -> Option<char> {
        self.mnemonic
    }

    /// Whether the trigger can be navigated to and opened.
    pub fn is_focusable(&self) -> bool {
        self.description.enabled && self.description.visible
    }

    /// Whether the nested tree exists.
    pub fn is_open(&self) -> bool {
        self.child.is_some()
    }

    /// The nested tree, while open.
    pub fn child(&self) -> Option<&MenuTree> {
        self.child.as_deref()
    }

    /// Mutable access to the nested tree.
    pub fn child_mut(&mut self) -> Option<&mut MenuTree> {
        self.child.as_deref_mut()
    }

    /// Whether the hover timer is pending.
    pub fn is_show_pending(&self) -> bool {
        self.show_timer.is_armed()
    }

    /// Whether the focus-out timer is pending.
    pub fn is_hide_pending(&self) -> bool {
        self.hide_timer.is_armed()
    }

    /// Build the nested tree under the trigger and focus it.
    ///
    /// The owning tree must have closed any sibling submenu first.
    pub fn open(&mut self, env: &mut MenuEnv<'_>, target: FocusTarget) {
        self.show_timer.cancel(env.timers);
        if let Some(child) = self.child.as_deref_mut() {
            child.focus(env, target);
            return;
        }

        let trigger = env.dom.rect(self.element);
        let mut child = MenuTree::build(
            env,
            &self.description.children,
            self.element,
            self.path.clone(),
            self.depth,
            Anchor::Beside(trigger),
        );
        env.dom.add_class(self.element, class::OPEN);
        env.dom.set_attribute(self.element, "aria-expanded", "true");
        child.focus(env, target);
        log::debug!(
            "Opened submenu '{}' at depth {}",
            self.description.label,
            self.depth
        );
        self.child = Some(Box::new(child));
    }

    /// Tear down the nested tree. Returns false if it was not open.
    pub fn close(&mut self, env: &mut MenuEnv<'_>) -> bool {
        self.hide_timer.cancel(env.timers);
        let Some(child) = self.child.as_deref_mut() else {
            return false;
        };
        child.dispose(env);
        self.child = None;

        env.dom.remove_class(self.element, class::OPEN);
        env.dom.set_attribute(self.element, "aria-expanded", "false");
        log::debug!("Closed submenu '{}'", self.description.label);
        true
    }

    /// The pointer moved onto the trigger: start the hover delay.
    pub fn pointer_enter(&mut self, env: &mut MenuEnv<'_>) {
        self.pointer_over = true;
        if self.is_open() || !self.is_focusable() {
            return;
        }
        self.show_timer.arm(
            env.timers,
            MenuTimer {
                path: self.path.clone(),
                kind: SubmenuTimer::Show,
            },
        );
    }

    /// The pointer left the trigger: a pending hover open is dropped.
    pub fn pointer_leave(&mut self, env: &mut MenuEnv<'_>) {
        self.pointer_over = false;
        self.show_timer.cancel(env.timers);
    }

    /// Decide what a fired timer means for this node.
    pub fn on_timer(&mut self, env: &mut MenuEnv<'_>, handle: TimerHandle, kind: SubmenuTimer) -> SubmenuSignal {
        match kind {
            SubmenuTimer::Show => {
                if !self.show_timer.claim(handle) {
                    return SubmenuSignal::Nothing;
                }
                if self.pointer_over && !self.is_open() && self.is_focusable() {
                    SubmenuSignal::Open
                } else {
                    SubmenuSignal::Nothing
                }
            },
            SubmenuTimer::Hide => {
                if !self.hide_timer.claim(handle) {
                    return SubmenuSignal::Nothing;
                }
                if self.is_open() && !env.dom.has_focus_within(self.element) {
                    SubmenuSignal::Close
                } else {
                    SubmenuSignal::Nothing
                }
            },
        }
    }

    /// Track focus leaving or re-entering an open submenu.
    ///
    /// Focus outside arms the hide timer once; focus back inside cancels it.
    pub fn sync_focus(&mut self, env: &mut MenuEnv<'_>) {
        if !self.is_open() {
            return;
        }
        if env.dom.has_focus_within(self.element) {
            self.hide_timer.cancel(env.timers);
        } else if !self.hide_timer.is_armed() {
            self.hide_timer.arm(
                env.timers,
                MenuTimer {
                    path: self.path.clone(),
                    kind: SubmenuTimer::Hide,
                },
            );
        }
        if let Some(child) = self.child.as_deref_mut() {
            child.sync_focus(env);
        }
    }

    /// Re-apply the style to the trigger and the open tree.
    pub fn restyle(&mut self, env: &mut MenuEnv<'_>, selected: bool) {
        env.paint_row(self.element, selected);
        if let Some(child) = self.child.as_deref_mut() {
            child.restyle(env);
        }
    }

    /// Close the nested tree, cancel both timers and drop the row.
    pub fn dispose(&mut self, env: &mut MenuEnv<'_>) {
        self.close(env);
        self.show_timer.cancel(env.timers);
        self.pointer_over = false;
        env.dom.remove(self.element);
    }
}
