use crate::divider::Divider;
use crate::error::{LayoutError, Result};
use crate::system::System;
use id_arena::{Arena, Id};
use std::collections::VecDeque;

/// Represents a reversible edit command
#[derive(Clone, Debug, PartialEq)]
pub enum EditCommand {
    /// Attach a divider to a system
    AddDivider { system: Id<System>, divider: Divider },
    /// Detach a divider from a system; the divider is kept for restoration
    RemoveDivider { system: Id<System>, divider: Divider },
}

fn system_mut(systems: &mut Arena<System>, id: Id<System>) -> Result<&mut System> {
    systems
        .get_mut(id)
        .ok_or(LayoutError::SystemMissing(id.index()))
}

impl EditCommand {
    /// Execute this command on the systems of a document
    pub fn execute(&self, systems: &mut Arena<System>) -> Result<()> {
        match self {
            EditCommand::AddDivider { system, divider } => {
                system_mut(systems, *system)?.set_divider(divider.clone());
            }
            EditCommand::RemoveDivider { system, divider } => {
                system_mut(systems, *system)?.take_divider(divider.side);
            }
        }
        Ok(())
    }

    /// Undo this command (reverse the operation)
    pub fn undo(&self, systems: &mut Arena<System>) -> Result<()> {
        match self {
            EditCommand::AddDivider { system, divider } => {
                system_mut(systems, *system)?.take_divider(divider.side);
            }
            EditCommand::RemoveDivider { system, divider } => {
                system_mut(systems, *system)?.set_divider(divider.clone());
            }
        }
        Ok(())
    }
}

/// Command history with undo and redo
#[derive(Clone, Debug)]
pub struct UndoStack {
    done: VecDeque<EditCommand>,
    undone: Vec<EditCommand>,
    /// Maximum number of commands to keep in history
    max_size: usize,
}

impl Default for UndoStack {
    fn default() -> Self {
        Self::new(100)
    }
}

impl UndoStack {
    pub fn new(max_size: usize) -> Self {
        UndoStack {
            done: VecDeque::default(),
            undone: Vec::default(),
            max_size,
        }
    }

    /// Execute a command and record it. Recording a new command discards
    /// anything that could have been redone.
    pub fn push(&mut self, command: EditCommand, systems: &mut Arena<System>) -> Result<()> {
        command.execute(systems)?;
        self.done.push_back(command);
        if self.done.len() > self.max_size {
            self.done.pop_front();
        }
        self.undone.clear();
        Ok(())
    }

    pub fn undo(&mut self, systems: &mut Arena<System>) -> Result<()> {
        let command = self.done.pop_back().ok_or(LayoutError::NothingToUndo)?;
        if let Err(e) = command.undo(systems) {
            self.done.push_back(command);
            return Err(e);
        }
        self.undone.push(command);
        Ok(())
    }

    pub fn redo(&mut self, systems: &mut Arena<System>) -> Result<()> {
        let command = self.undone.pop().ok_or(LayoutError::NothingToRedo)?;
        if let Err(e) = command.execute(systems) {
            self.undone.push(command);
            return Err(e);
        }
        self.done.push_back(command);
        Ok(())
    }

    pub fn can_undo(&self) -> bool {
        !self.done.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.undone.is_empty()
    }

    /// The most recent command, if any
    pub fn last(&self) -> Option<&EditCommand> {
        self.done.back()
    }

    pub fn len(&self) -> usize {
        self.done.len()
    }

    pub fn is_empty(&self) -> bool {
        self.done.is_empty()
    }
}
