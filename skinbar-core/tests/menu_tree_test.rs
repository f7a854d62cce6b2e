use std::collections::HashMap;
use std::time::{Duration, Instant};

use skinbar_core::config::MenuConfig;
use skinbar_core::dom::{ElementId, ElementTree, Mutation};
use skinbar_core::error::DispatchError;
use skinbar_core::keys::{Key, Modifiers};
use skinbar_core::menu::constants::class;
use skinbar_core::menu::position::Anchor;
use skinbar_core::menu::{
    CommandId, FocusTarget, MenuEnv, MenuIcon, MenuNode, MenuTimer, MenuTree, PointerEvent,
    TreeOutcome,
};
use skinbar_core::timer::TimerQueue;
use skinbar_theme::MenuStyle;
use vello::kurbo::{Point, Rect, Size};

struct Harness {
    dom: ElementTree,
    timers: TimerQueue<MenuTimer>,
    style: MenuStyle,
    config: MenuConfig,
    dispatched: Vec<CommandId>,
    reject: Option<CommandId>,
    icon_urls: HashMap<CommandId, String>,
    resolved: Vec<CommandId>,
    start: Instant,
}

impl Harness {
    fn new() -> Self {
        let start = Instant::now();
        Self {
            dom: ElementTree::new(),
            timers: TimerQueue::new(start),
            style: MenuStyle::dark(),
            config: MenuConfig::default(),
            dispatched: Vec::new(),
            reject: None,
            icon_urls: HashMap::new(),
            resolved: Vec::new(),
            start,
        }
    }

    fn with_env<R>(&mut self, f: impl FnOnce(&mut MenuEnv<'_>) -> R) -> R {
        let dispatched = &mut self.dispatched;
        let reject = self.reject;
        let mut dispatcher = |command: CommandId| -> Result<(), DispatchError> {
            dispatched.push(command);
            if reject == Some(command) {
                Err(DispatchError::rejected(command, "rejected by test"))
            } else {
                Ok(())
            }
        };
        let resolved = &mut self.resolved;
        let urls = &self.icon_urls;
        let mut icons = |command: CommandId| -> Option<String> {
            resolved.push(command);
            urls.get(&command).cloned()
        };
        let mut env = MenuEnv {
            dom: &mut self.dom,
            timers: &mut self.timers,
            dispatcher: &mut dispatcher,
            icons: &mut icons,
            style: &self.style,
            config: &self.config,
            viewport: Size::new(800.0, 600.0),
        };
        f(&mut env)
    }

    fn build(&mut self, nodes: &[MenuNode]) -> MenuTree {
        let root = self.dom.root();
        self.with_env(|env| MenuTree::build(env, nodes, root, Vec::new(), 0, Anchor::At(Point::ZERO)))
    }

    fn key(&mut self, tree: &mut MenuTree, key: Key) -> TreeOutcome {
        let outcome = self.with_env(|env| tree.on_key(env, key, Modifiers::empty()));
        self.with_env(|env| tree.sync_focus(env));
        outcome
    }

    fn pointer(&mut self, tree: &mut MenuTree, target: ElementId, event: PointerEvent) -> TreeOutcome {
        let outcome = self.with_env(|env| tree.on_pointer(env, target, event));
        self.with_env(|env| tree.sync_focus(env));
        outcome
    }

    fn advance(&mut self, tree: &mut MenuTree, ms: u64) {
        let fired = self.timers.advance(self.start + Duration::from_millis(ms));
        for (handle, timer) in fired {
            self.with_env(|env| tree.on_timer(env, handle, &timer));
        }
        self.with_env(|env| tree.sync_focus(env));
    }
}

fn element(tree: &MenuTree, index: usize) -> ElementId {
    tree.item(index).map(|item| item.element()).unwrap()
}

fn checked(tree: &MenuTree, index: usize) -> bool {
    tree.item(index)
        .and_then(|item| item.as_action())
        .map(|action| action.is_checked())
        .unwrap()
}

#[test]
fn test_focus_next_skips_separators_and_inert_rows() {
    let mut h = Harness::new();
    let mut tree = h.build(&[
        MenuNode::separator(),
        MenuNode::leaf("Disabled", 1u32).with_enabled(false),
        MenuNode::leaf("First", 2u32),
        MenuNode::separator(),
        MenuNode::leaf("Invisible", 3u32).with_visible(false),
        MenuNode::leaf("Second", 4u32),
    ]);
    assert_eq!(tree.focused(), None);

    let mut visited = Vec::new();
    for _ in 0..5 {
        h.with_env(|env| tree.focus_next(env));
        visited.push(tree.focused());
    }
    assert_eq!(visited, vec![Some(2), Some(5), Some(2), Some(5), Some(2)]);

    h.with_env(|env| tree.focus_previous(env));
    assert_eq!(tree.focused(), Some(5));
    assert_eq!(h.dom.focused(), Some(element(&tree, 5)));
    assert!(h.dom.has_class(element(&tree, 5), class::FOCUSED));
    assert!(!h.dom.has_class(element(&tree, 2), class::FOCUSED));
}

#[test]
fn test_focus_scan_terminates_without_navigable_rows() {
    let mut h = Harness::new();
    let mut tree = h.build(&[
        MenuNode::separator(),
        MenuNode::leaf("Disabled", 1u32).with_enabled(false),
        MenuNode::separator(),
    ]);

    h.with_env(|env| tree.focus_next(env));
    assert_eq!(tree.focused(), None);
    assert_eq!(h.dom.focused(), Some(tree.container()));

    h.with_env(|env| tree.focus(env, FocusTarget::SelectFirst));
    assert_eq!(tree.focused(), None);
}

#[test]
fn test_default_focus_keeps_current_row() {
    let mut h = Harness::new();
    let mut tree = h.build(&[
        MenuNode::separator(),
        MenuNode::leaf("One", 1u32),
        MenuNode::leaf("Two", 2u32),
    ]);

    h.with_env(|env| tree.focus(env, FocusTarget::Default));
    assert_eq!(tree.focused(), Some(1));

    h.with_env(|env| tree.focus(env, FocusTarget::Index(2)));
    h.with_env(|env| tree.focus(env, FocusTarget::Default));
    assert_eq!(tree.focused(), Some(2));

    h.with_env(|env| tree.focus(env, FocusTarget::Index(0)));
    assert_eq!(tree.focused(), Some(2));
}

#[test]
fn test_home_and_end() {
    let mut h = Harness::new();
    let mut tree = h.build(&[
        MenuNode::leaf("One", 1u32),
        MenuNode::leaf("Two", 2u32),
        MenuNode::leaf("Three", 3u32).with_enabled(false),
    ]);
    h.key(&mut tree, Key::End);
    assert_eq!(tree.focused(), Some(1));
    h.key(&mut tree, Key::Home);
    assert_eq!(tree.focused(), Some(0));
}

#[test]
fn test_shared_mnemonic_cycles_through_owners() {
    let mut h = Harness::new();
    let mut tree = h.build(&[
        MenuNode::leaf("&New", 1u32),
        MenuNode::leaf("&Open", 2u32),
        MenuNode::leaf("&Next", 3u32),
        MenuNode::separator(),
        MenuNode::leaf("&Nothing", 4u32),
    ]);

    let mut focused = Vec::new();
    for _ in 0..4 {
        let outcome = h.key(&mut tree, Key::Character('n'));
        assert_eq!(outcome, TreeOutcome::Handled);
        focused.push(tree.focused());
    }
    assert_eq!(focused, vec![Some(0), Some(2), Some(4), Some(0)]);
    assert!(h.dispatched.is_empty());
}

#[test]
fn test_unique_mnemonic_activates() {
    let mut h = Harness::new();
    let mut tree = h.build(&[
        MenuNode::leaf("&Open", 1u32),
        MenuNode::leaf("E&xit", 2u32),
        MenuNode::leaf("&Disabled", 3u32).with_enabled(false),
    ]);

    assert_eq!(h.key(&mut tree, Key::Character('X')), TreeOutcome::Activated(CommandId(2)));
    assert_eq!(h.dispatched, vec![CommandId(2)]);

    assert_eq!(h.key(&mut tree, Key::Character('d')), TreeOutcome::Ignored);
    assert_eq!(h.key(&mut tree, Key::Character('q')), TreeOutcome::Ignored);

    let ctrl = h.with_env(|env| tree.on_key(env, Key::Character('o'), Modifiers::CONTROL));
    assert_eq!(ctrl, TreeOutcome::Ignored);
    assert_eq!(h.dispatched, vec![CommandId(2)]);
}

#[test]
fn test_radio_click_checks_exactly_one_in_group() {
    let mut h = Harness::new();
    let mut tree = h.build(&[
        MenuNode::radio("Small", 1u32),
        MenuNode::radio("Medium", 2u32).with_checked(true),
        MenuNode::separator(),
        MenuNode::radio("Other", 3u32).with_checked(true),
    ]);

    let row = element(&tree, 0);
    let outcome = h.pointer(&mut tree, row, PointerEvent::Click);
    assert_eq!(outcome, TreeOutcome::Activated(CommandId(1)));
    assert!(checked(&tree, 0));
    assert!(!checked(&tree, 1));
    assert!(checked(&tree, 3));

    // clicking the checked radio again leaves it checked
    let row = element(&tree, 0);
    h.pointer(&mut tree, row, PointerEvent::Click);
    assert!(checked(&tree, 0));
    assert!(!checked(&tree, 1));

    let group = tree.item(1).and_then(|item| item.as_action()).and_then(|a| a.radio_group());
    assert_eq!(group, Some(0..2));
    assert!(h.dom.has_class(element(&tree, 0), class::CHECKED));
    assert!(!h.dom.has_class(element(&tree, 1), class::CHECKED));
}

#[test]
fn test_rejected_command_restores_check_state() {
    let mut h = Harness::new();
    let mut tree = h.build(&[
        MenuNode::radio("Small", 1u32),
        MenuNode::radio("Medium", 2u32).with_checked(true),
        MenuNode::separator(),
        MenuNode::checkbox("Wrap", 3u32),
    ]);

    h.reject = Some(CommandId(1));
    let row = element(&tree, 0);
    h.pointer(&mut tree, row, PointerEvent::Click);
    assert!(!checked(&tree, 0));
    assert!(checked(&tree, 1));

    h.reject = Some(CommandId(3));
    let row = element(&tree, 3);
    h.pointer(&mut tree, row, PointerEvent::Click);
    assert!(!checked(&tree, 3));

    h.reject = None;
    let row = element(&tree, 3);
    h.pointer(&mut tree, row, PointerEvent::Click);
    assert!(checked(&tree, 3));
    assert_eq!(h.dispatched, vec![CommandId(1), CommandId(3), CommandId(3)]);
}

#[test]
fn test_inert_rows_never_dispatch() {
    let mut h = Harness::new();
    let mut tree = h.build(&[
        MenuNode::leaf("Disabled", 1u32).with_enabled(false),
        MenuNode::separator(),
        MenuNode::leaf("Hidden", 2u32).with_visible(false),
    ]);

    for index in 0..3 {
        let row = element(&tree, index);
        let outcome = h.pointer(&mut tree, row, PointerEvent::Click);
        assert_eq!(outcome, TreeOutcome::Handled);
    }
    assert!(h.dispatched.is_empty());
}

#[test]
fn test_opening_a_sibling_disposes_the_open_submenu_first() {
    let mut h = Harness::new();
    let mut tree = h.build(&[
        MenuNode::submenu("A", vec![MenuNode::leaf("a", 1u32)]),
        MenuNode::submenu("B", vec![MenuNode::leaf("b", 2u32)]),
    ]);

    h.with_env(|env| tree.open_submenu_at(env, 0, FocusTarget::SelectFirst));
    let first = tree.open_child().map(|child| child.container()).unwrap();
    h.dom.take_mutations();

    h.with_env(|env| tree.open_submenu_at(env, 1, FocusTarget::SelectFirst));
    let second = tree.open_child().map(|child| child.container()).unwrap();
    assert_eq!(tree.open_submenu(), Some(1));

    let mutations = h.dom.take_mutations();
    let detached = mutations
        .iter()
        .position(|m| matches!(m, Mutation::Detached { child, .. } if *child == first))
        .unwrap();
    let attached = mutations
        .iter()
        .position(|m| matches!(m, Mutation::Attached { child, .. } if *child == second))
        .unwrap();
    assert!(detached < attached);
    assert!(!h.dom.exists(first));
    assert!(tree.item(0).and_then(|item| item.as_submenu()).is_some_and(|s| !s.is_open()));
    assert_eq!(h.dom.find_by_class(tree.container(), class::MENU_CONTAINER).len(), 1);
}

#[test]
fn test_leaving_trigger_before_delay_never_opens() {
    let mut h = Harness::new();
    let mut tree = h.build(&[
        MenuNode::submenu("More", vec![MenuNode::leaf("a", 1u32)]),
        MenuNode::leaf("Other", 2u32),
    ]);
    let trigger = element(&tree, 0);

    h.pointer(&mut tree, trigger, PointerEvent::Enter);
    h.advance(&mut tree, 100);
    h.pointer(&mut tree, trigger, PointerEvent::Leave);
    h.dom.take_mutations();
    h.advance(&mut tree, 1000);

    assert_eq!(tree.open_submenu(), None);
    assert!(h.dom.find_by_class(trigger, class::MENU_CONTAINER).is_empty());
    assert!(h.dom.take_mutations().is_empty());
}

#[test]
fn test_hover_opens_after_delay_without_selection() {
    let mut h = Harness::new();
    let mut tree = h.build(&[
        MenuNode::submenu("More", vec![MenuNode::leaf("a", 1u32)]),
        MenuNode::leaf("Other", 2u32),
    ]);
    let trigger = element(&tree, 0);

    h.pointer(&mut tree, trigger, PointerEvent::Enter);
    h.advance(&mut tree, 200);
    assert_eq!(tree.open_submenu(), None);

    h.advance(&mut tree, 260);
    assert_eq!(tree.open_submenu(), Some(0));
    let child = tree.open_child().unwrap();
    assert_eq!(child.focused(), None);
    assert_eq!(h.dom.focused(), Some(child.container()));
    assert!(h.dom.has_class(trigger, class::OPEN));
}

#[test]
fn test_submenu_closes_after_focus_stays_outside() {
    let mut h = Harness::new();
    let mut tree = h.build(&[
        MenuNode::submenu("More", vec![MenuNode::leaf("a", 1u32)]),
        MenuNode::leaf("Other", 2u32),
    ]);
    let trigger = element(&tree, 0);
    let other = element(&tree, 1);

    h.pointer(&mut tree, trigger, PointerEvent::Enter);
    h.pointer(&mut tree, trigger, PointerEvent::Leave);
    h.pointer(&mut tree, trigger, PointerEvent::Enter);
    h.advance(&mut tree, 300);
    assert_eq!(tree.open_submenu(), Some(0));

    // t=300: focus moves to a sibling, hide fires at t=1050
    h.pointer(&mut tree, trigger, PointerEvent::Leave);
    h.pointer(&mut tree, other, PointerEvent::Enter);
    h.advance(&mut tree, 1000);
    assert_eq!(tree.open_submenu(), Some(0));

    h.advance(&mut tree, 1100);
    assert_eq!(tree.open_submenu(), None);
    assert!(!h.dom.has_class(trigger, class::OPEN));
}

#[test]
fn test_focus_returning_cancels_close() {
    let mut h = Harness::new();
    let mut tree = h.build(&[
        MenuNode::submenu("More", vec![MenuNode::leaf("a", 1u32)]),
        MenuNode::leaf("Other", 2u32),
    ]);
    let trigger = element(&tree, 0);
    let other = element(&tree, 1);

    h.pointer(&mut tree, trigger, PointerEvent::Enter);
    h.advance(&mut tree, 300);
    h.pointer(&mut tree, other, PointerEvent::Enter);
    h.advance(&mut tree, 600);

    let child_row = tree.open_child().map(|child| element(child, 0)).unwrap();
    h.pointer(&mut tree, child_row, PointerEvent::Enter);
    assert_eq!(tree.open_child().and_then(|child| child.focused()), Some(0));

    h.advance(&mut tree, 2000);
    assert_eq!(tree.open_submenu(), Some(0));
}

#[test]
fn test_keyboard_enters_and_leaves_submenus() {
    let mut h = Harness::new();
    let mut tree = h.build(&[
        MenuNode::leaf("Plain", 1u32),
        MenuNode::submenu(
            "More",
            vec![MenuNode::separator(), MenuNode::leaf("Inner", 2u32)],
        ),
    ]);

    h.key(&mut tree, Key::ArrowDown);
    assert_eq!(h.key(&mut tree, Key::ArrowRight), TreeOutcome::NavigateRight);
    assert_eq!(h.key(&mut tree, Key::ArrowLeft), TreeOutcome::NavigateLeft);

    h.key(&mut tree, Key::ArrowDown);
    assert_eq!(h.key(&mut tree, Key::ArrowRight), TreeOutcome::Handled);
    assert_eq!(tree.open_child().and_then(|child| child.focused()), Some(1));
    assert_eq!(tree.open_child().map(|child| child.depth()), Some(1));

    // Left inside the child closes it and focuses the trigger
    assert_eq!(h.key(&mut tree, Key::ArrowLeft), TreeOutcome::Handled);
    assert_eq!(tree.open_submenu(), None);
    assert_eq!(tree.focused(), Some(1));
    assert_eq!(h.dom.focused(), Some(element(&tree, 1)));

    // Escape inside the child only closes the child
    h.key(&mut tree, Key::Enter);
    assert_eq!(tree.open_submenu(), Some(1));
    assert_eq!(h.key(&mut tree, Key::Escape), TreeOutcome::Handled);
    assert_eq!(tree.open_submenu(), None);
    assert_eq!(h.key(&mut tree, Key::Escape), TreeOutcome::Cancel);

    // activating inside the child reaches the owner
    h.key(&mut tree, Key::Space);
    assert_eq!(h.key(&mut tree, Key::Enter), TreeOutcome::Activated(CommandId(2)));
}

#[test]
fn test_submenu_flips_below_near_right_edge() {
    let mut h = Harness::new();
    let mut tree = h.build(&[MenuNode::submenu("More", vec![MenuNode::leaf("a", 1u32)])]);
    let trigger = element(&tree, 0);
    h.dom.set_rect(trigger, Rect::new(700.0, 0.0, 790.0, 24.0));

    h.with_env(|env| tree.open_submenu_at(env, 0, FocusTarget::SelectFirst));
    let container = tree.open_child().map(|child| child.container()).unwrap();
    assert!(h.dom.has_class(container, class::FLIPPED));
    assert_eq!(h.dom.style(container, "left").and_then(|v| v.as_px()), Some(710.0));
    assert_eq!(h.dom.style(container, "top").and_then(|v| v.as_px()), Some(24.0));
}

#[test]
fn test_submenu_opens_beside_trigger() {
    let mut h = Harness::new();
    let mut tree = h.build(&[MenuNode::submenu("More", vec![MenuNode::leaf("a", 1u32)])]);
    let trigger = element(&tree, 0);
    let row = h.dom.rect(trigger);

    h.with_env(|env| tree.open_submenu_at(env, 0, FocusTarget::SelectFirst));
    let container = tree.open_child().map(|child| child.container()).unwrap();
    assert!(!h.dom.has_class(container, class::FLIPPED));
    assert_eq!(h.dom.style(container, "left").and_then(|v| v.as_px()), Some(row.x1));
    assert_eq!(h.dom.style(container, "top").and_then(|v| v.as_px()), Some(row.y0));
}

#[test]
fn test_dispose_twice_detaches_once() {
    let mut h = Harness::new();
    let mut tree = h.build(&[
        MenuNode::submenu("More", vec![MenuNode::leaf("a", 1u32)]),
        MenuNode::leaf("Other", 2u32),
    ]);
    let container = tree.container();
    let row = element(&tree, 0);
    h.pointer(&mut tree, row, PointerEvent::Enter);
    h.with_env(|env| tree.open_submenu_at(env, 0, FocusTarget::SelectFirst));
    h.dom.take_mutations();

    h.with_env(|env| tree.dispose(env));
    h.with_env(|env| tree.dispose(env));

    let detached = h
        .dom
        .take_mutations()
        .into_iter()
        .filter(|m| matches!(m, Mutation::Detached { child, .. } if *child == container))
        .count();
    assert_eq!(detached, 1);
    assert!(tree.is_disposed());
    assert!(!h.dom.exists(container));
    assert!(h.timers.is_empty());
    assert_eq!(h.dom.len(), 1);
}

#[test]
fn test_empty_tree_is_inert() {
    let mut h = Harness::new();
    let mut tree = h.build(&[]);
    assert!(tree.is_empty());

    assert_eq!(h.key(&mut tree, Key::ArrowDown), TreeOutcome::Handled);
    assert_eq!(tree.focused(), None);
    assert_eq!(h.key(&mut tree, Key::Enter), TreeOutcome::Ignored);
    assert_eq!(h.key(&mut tree, Key::Character('a')), TreeOutcome::Ignored);
}

#[test]
fn test_tab_follows_focus_after_release() {
    let mut h = Harness::new();
    let mut tree = h.build(&[MenuNode::leaf("One", 1u32), MenuNode::leaf("Two", 2u32)]);
    h.key(&mut tree, Key::ArrowDown);
    assert_eq!(tree.focused(), Some(0));

    // key-down leaves focus to the host
    assert_eq!(h.key(&mut tree, Key::Tab), TreeOutcome::Ignored);
    assert_eq!(tree.focused(), Some(0));

    let label = tree
        .item(1)
        .and_then(|item| item.as_action())
        .map(|action| action.label_element())
        .unwrap();
    h.dom.focus(label);
    h.with_env(|env| tree.resync_innermost(env));
    assert_eq!(tree.focused(), Some(1));
    assert!(h.dom.has_class(element(&tree, 1), class::FOCUSED));
    assert!(!h.dom.has_class(element(&tree, 0), class::FOCUSED));

    let root = h.dom.root();
    h.dom.focus(root);
    h.with_env(|env| tree.resync_innermost(env));
    assert_eq!(tree.focused(), None);
}

#[test]
fn test_tab_resync_targets_innermost_open_tree() {
    let mut h = Harness::new();
    let mut tree = h.build(&[
        MenuNode::leaf("Plain", 1u32),
        MenuNode::submenu(
            "More",
            vec![
                MenuNode::separator(),
                MenuNode::leaf("Inner", 2u32),
                MenuNode::leaf("Other", 3u32),
            ],
        ),
    ]);
    h.key(&mut tree, Key::ArrowDown);
    h.key(&mut tree, Key::ArrowDown);
    h.key(&mut tree, Key::ArrowRight);
    assert_eq!(tree.open_child().and_then(|child| child.focused()), Some(1));

    h.key(&mut tree, Key::Tab);
    let other = tree.open_child().map(|child| element(child, 2)).unwrap();
    h.dom.focus(other);
    h.with_env(|env| tree.resync_innermost(env));

    assert_eq!(tree.open_child().and_then(|child| child.focused()), Some(2));
    assert_eq!(tree.focused(), Some(1));
    assert_eq!(tree.open_submenu(), Some(1));
}

#[test]
fn test_rows_render_labels_and_keybindings() {
    let mut h = Harness::new();
    let tree = h.build(&[
        MenuNode::leaf("Save &As...", 1u32).with_accelerator("CmdOrCtrl+Shift+S"),
        MenuNode::checkbox("Wrap", 2u32).with_checked(true),
    ]);

    let save = tree.item(0).and_then(|item| item.as_action()).unwrap();
    assert_eq!(h.dom.text(save.label_element()), Some("Save As..."));
    assert_eq!(h.dom.attribute(save.label_element(), "data-mnemonic-index"), Some("5"));
    let keybinding = save.keybinding_element().unwrap();
    assert_eq!(h.dom.text(keybinding), Some("Ctrl+Shift+S"));

    let wrap = element(&tree, 1);
    assert!(h.dom.has_class(wrap, class::CHECKED));
    assert_eq!(h.dom.attribute(wrap, "aria-checked"), Some("true"));
    assert_eq!(tree.mnemonics().owners('a'), vec![0]);
}

#[test]
fn test_image_icons_resolve_through_host() {
    let mut h = Harness::new();
    h.icon_urls.insert(CommandId(1), "icons/save.png".to_string());
    let tree = h.build(&[
        MenuNode::leaf("Save", 1u32).with_icon(MenuIcon::Image),
        MenuNode::leaf("Print", 2u32).with_icon(MenuIcon::Image),
        MenuNode::leaf("Star", 3u32).with_icon(MenuIcon::Text { glyph: "*".into() }),
        MenuNode::leaf("Plain", 4u32),
    ]);

    // text glyphs and icon-less rows never ask the host
    assert_eq!(h.resolved, vec![CommandId(1), CommandId(2)]);

    let action = |index: usize| tree.item(index).and_then(|item| item.as_action()).unwrap();

    let saved = action(0).icon_element().unwrap();
    assert_eq!(h.dom.tag(saved), Some("img"));
    assert!(h.dom.has_class(saved, class::ICON));
    assert_eq!(h.dom.attribute(saved, "src"), Some("icons/save.png"));

    assert_eq!(action(1).icon_element(), None);
    assert!(h.dom.find_by_class(element(&tree, 1), class::ICON).is_empty());

    let star = action(2).icon_element().unwrap();
    assert_eq!(h.dom.tag(star), Some("span"));
    assert!(h.dom.has_class(star, class::ICON));
    assert_eq!(h.dom.text(star), Some("*"));

    assert_eq!(action(3).icon_element(), None);
}
