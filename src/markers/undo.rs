use super::{Marker, MarkerId};

/// Inverse of a registry edit, recorded when the edit happens.
#[derive(Debug, Clone, PartialEq)]
pub enum UndoCommand {
    /// Put a removed marker back at its old position in display order.
    AddMarker { marker: Marker, position: usize },
    RemoveMarker(MarkerId),
}

/// LIFO command history.
///
/// While an undo is being applied the command it replays would normally push
/// its own inverse. `begin_undo` arms a one-shot suppress flag so that push is
/// swallowed, and `end_undo` disarms it once the command has run.
#[derive(Debug, Clone)]
pub struct UndoRegistry<C = UndoCommand> {
    commands: Vec<C>,
    last_pop: Option<C>,
    suppress_next_push: bool,
}

impl<C> Default for UndoRegistry<C> {
    fn default() -> Self {
        Self {
            commands: Vec::new(),
            last_pop: None,
            suppress_next_push: false,
        }
    }
}

impl<C: Clone> UndoRegistry<C> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `false` when the push was swallowed by an in-flight undo.
    pub fn push_command(&mut self, command: C) -> bool {
        if self.suppress_next_push {
            self.suppress_next_push = false;
            return false;
        }
        self.commands.push(command);
        true
    }

    pub fn begin_undo(&mut self) -> Option<C> {
        let command = self.commands.pop()?;
        self.last_pop = Some(command.clone());
        self.suppress_next_push = true;
        Some(command)
    }

    pub fn end_undo(&mut self) {
        self.suppress_next_push = false;
    }

    pub fn is_undoing(&self) -> bool {
        self.suppress_next_push
    }

    pub fn flush(&mut self) {
        self.commands.clear();
    }

    pub fn last_pop(&self) -> Option<&C> {
        self.last_pop.as_ref()
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Oldest first; the last item is undone next.
    pub fn iter(&self) -> impl Iterator<Item = &C> {
        self.commands.iter()
    }
}
