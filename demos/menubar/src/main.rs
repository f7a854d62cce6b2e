use std::cell::RefCell;
use std::rc::Rc;
use std::time::{Duration, Instant};

use skinbar::prelude::*;

const MENU: &str = r#"[
    { "type": "submenu", "label": "&File", "submenu": [
        { "type": "normal", "label": "&New File", "accelerator": "CmdOrCtrl+N", "commandId": 1 },
        { "type": "normal", "label": "New &Window", "accelerator": "CmdOrCtrl+Shift+N", "commandId": 2 },
        { "type": "separator" },
        { "type": "submenu", "label": "Open &Recent", "submenu": [
            { "type": "normal", "label": "document1.txt", "commandId": 3 },
            { "type": "normal", "label": "project.rs", "commandId": 4 }
        ]},
        { "type": "separator" },
        { "type": "normal", "label": "E&xit", "commandId": 5 }
    ]},
    { "type": "submenu", "label": "&View", "submenu": [
        { "type": "checkbox", "label": "&Word Wrap", "checked": true, "commandId": 10 },
        { "type": "separator" },
        { "type": "radio", "label": "&Small", "commandId": 11 },
        { "type": "radio", "label": "&Medium", "checked": true, "commandId": 12 },
        { "type": "radio", "label": "&Large", "commandId": 13 }
    ]},
    { "type": "normal", "label": "&About", "commandId": 20 }
]"#;

fn print_mutations(step: &str, titlebar: &mut TitleBar) {
    let menubar = titlebar.menubar_mut();
    let mutations = menubar.take_mutations();
    println!(
        "{step}: state={:?} open={:?} mutations={}",
        menubar.state(),
        menubar.open_menu(),
        mutations.len()
    );
    for mutation in mutations {
        match mutation {
            Mutation::Attached { parent, child } => {
                println!("  + {} -> {}", child.get(), parent.get())
            },
            Mutation::Detached { parent, child } => {
                println!("  - {} <- {}", child.get(), parent.get())
            },
        }
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let config = MenuConfig::load().unwrap_or_else(|err| {
        log::warn!("Falling back to default menu config: {}", err);
        MenuConfig::default()
    });

    let description = match std::env::args().nth(1) {
        Some(path) => MenuDescription::from_json(&std::fs::read_to_string(path)?)?,
        None => MenuDescription::from_json(MENU)?,
    };

    let activated = Rc::new(RefCell::new(Vec::new()));
    let mut registry = CommandRegistry::new();
    if let Some(leaf) = description.find_leaf(CommandId(13)) {
        log::info!("'{}' is rejected to show check rollback", leaf.label);
    }
    for command in [1u32, 2, 3, 4, 5, 10, 11, 12, 20] {
        let activated = activated.clone();
        registry.register(command, move || {
            activated.borrow_mut().push(CommandId(command));
            Ok(())
        });
    }
    registry.register(13u32, || {
        Err(DispatchError::rejected(CommandId(13), "large font unavailable"))
    });

    let start = Instant::now();
    let mut menubar = MenuBar::new(registry, start)
        .with_config(config)
        .with_viewport(Size::new(800.0, 600.0));
    if let Err(err) = menubar.load_style(&ThemeConfig::from_env_or_default()) {
        log::warn!("Keeping the default style: {}", err);
    }
    menubar.set_menu(&description)?;

    let mut titlebar = TitleBar::new(menubar);
    titlebar.set_title("skinbar demo");
    print_mutations("initial render", &mut titlebar);

    // Alt+F opens File with its first row selected
    let menubar = titlebar.menubar_mut();
    menubar.on_key_down(Key::Alt, Modifiers::ALT);
    menubar.on_key_down(Key::Character('f'), Modifiers::ALT);
    menubar.on_key_up(Key::Alt, Modifiers::empty());
    print_mutations("alt+f", &mut titlebar);

    // hover "Open Recent" and let the show delay elapse
    let menubar = titlebar.menubar_mut();
    let recent = menubar
        .open_tree()
        .and_then(|tree| tree.item(3))
        .map(|item| item.element());
    if let Some(recent) = recent {
        menubar.on_pointer_enter(recent);
        let now = start + Duration::from_millis(300);
        menubar.tick(now);
    }
    print_mutations("hover open recent", &mut titlebar);

    // back out to the menubar, move to View and pick "Large", which the registry rejects
    let menubar = titlebar.menubar_mut();
    menubar.on_key_down(Key::Escape, Modifiers::empty());
    menubar.on_key_down(Key::Escape, Modifiers::empty());
    menubar.on_key_down(Key::ArrowRight, Modifiers::empty());
    menubar.on_key_down(Key::ArrowDown, Modifiers::empty());
    menubar.on_key_down(Key::Character('l'), Modifiers::empty());
    print_mutations("view > large", &mut titlebar);

    titlebar.apply_window_state(WindowState {
        maximized: true,
        ..WindowState::default()
    });
    titlebar.on_window_resize(Size::new(1024.0, 768.0));
    print_mutations("maximize", &mut titlebar);

    println!("activated: {:?}", activated.borrow());
    Ok(())
}
