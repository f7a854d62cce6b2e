//! Outbound collaborators: command dispatch and icon resolution.
//!
//! The engine reports activations and asks for icons, but never runs
//! application logic itself.

use std::collections::HashMap;

use crate::error::DispatchError;
use crate::menu::commands::CommandId;

/// Receives the command id of every activated leaf.
pub trait CommandDispatcher {
    /// Run or forward the command.
    ///
    /// Returning an error rolls back the optimistic checkbox/radio update made
    /// for this activation.
    fn dispatch(&mut self, command: CommandId) -> Result<(), DispatchError>;
}

impl<F> CommandDispatcher for F
where
    F: FnMut(CommandId) -> Result<(), DispatchError>,
{
    fn dispatch(&mut self, command: CommandId) -> Result<(), DispatchError> {
        self(command)
    }
}

/// Renders non-text icons, keyed by the command id of their leaf.
pub trait IconResolver {
    /// A data URL for the icon, or `None` if there is nothing to show.
    fn resolve(&mut self, command: CommandId) -> Option<String>;
}

impl<F> IconResolver for F
where
    F: FnMut(CommandId) -> Option<String>,
{
    fn resolve(&mut self, command: CommandId) -> Option<String> {
        self(command)
    }
}

/// Resolver that never has an icon.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoIcons;

impl IconResolver for NoIcons {
    fn resolve(&mut self, _command: CommandId) -> Option<String> {
        None
    }
}

type Handler = Box<dyn FnMut() -> Result<(), DispatchError>>;

/// Routes command ids to registered callbacks.
pub struct CommandRegistry {
    handlers: HashMap<CommandId, Handler>,
}

impl CommandRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            handlers: HashMap::new(),
        }
    }

    /// Register the callback of a command, replacing any previous one.
    pub fn register<F>(&mut self, command: impl Into<CommandId>, handler: F)
    where
        F: FnMut() -> Result<(), DispatchError> + 'static,
    {
        self.handlers.insert(command.into(), Box::new(handler));
    }

    /// Builder form of [register](Self::register).
    pub fn with_handler<F>(mut self, command: impl Into<CommandId>, handler: F) -> Self
    where
        F: FnMut() -> Result<(), DispatchError> + 'static,
    {
        self.register(command, handler);
        self
    }

    /// Drop a callback. Returns whether one was registered.
    pub fn unregister(&mut self, command: CommandId) -> bool {
        self.handlers.remove(&command).is_some()
    }

    /// Check if a command has a registered callback.
    pub fn has_handler(&self, command: CommandId) -> bool {
        self.handlers.contains_key(&command)
    }

    /// All registered command ids, sorted.
    pub fn registered_commands(&self) -> Vec<CommandId> {
        let mut commands: Vec<_> = self.handlers.keys().copied().collect();
        commands.sort();
        commands
    }
}

impl Default for CommandRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for CommandRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CommandRegistry")
            .field("commands", &self.registered_commands())
            .finish()
    }
}

impl CommandDispatcher for CommandRegistry {
    fn dispatch(&mut self, command: CommandId) -> Result<(), DispatchError> {
        match self.handlers.get_mut(&command) {
            Some(handler) => handler(),
            None => Err(DispatchError::Unhandled(command)),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::rc::Rc;

    use super::*;

    #[test]
    fn test_registry_routes_commands() {
        let hits = Rc::new(Cell::new(0));
        let counter = hits.clone();
        let mut registry = CommandRegistry::new()
            .with_handler(1u32, move || {
                counter.set(counter.get() + 1);
                Ok(())
            })
            .with_handler(2u32, || Err(DispatchError::rejected(CommandId(2), "read-only")));

        assert!(registry.dispatch(CommandId(1)).is_ok());
        assert_eq!(hits.get(), 1);
        assert_eq!(
            registry.dispatch(CommandId(2)),
            Err(DispatchError::rejected(CommandId(2), "read-only"))
        );
        assert_eq!(
            registry.dispatch(CommandId(3)),
            Err(DispatchError::Unhandled(CommandId(3)))
        );
        assert_eq!(registry.registered_commands(), vec![CommandId(1), CommandId(2)]);
        assert!(registry.unregister(CommandId(1)));
        assert!(!registry.has_handler(CommandId(1)));
    }

    #[test]
    fn test_closures_implement_collaborators() {
        let mut seen = Vec::new();
        {
            let mut dispatcher = |command: CommandId| -> Result<(), DispatchError> {
                seen.push(command);
                Ok(())
            };
            let dispatcher: &mut dyn CommandDispatcher = &mut dispatcher;
            dispatcher.dispatch(CommandId(9)).unwrap();
        }
        assert_eq!(seen, vec![CommandId(9)]);

        let mut icons = |command: CommandId| Some(format!("data:image/png;base64,{}", command.to_u32()));
        assert_eq!(icons.resolve(CommandId(4)).as_deref(), Some("data:image/png;base64,4"));
        assert_eq!(NoIcons.resolve(CommandId(4)), None);
    }
}
