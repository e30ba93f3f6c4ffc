use crate::divider::{Divider, DividerSide};
use crate::element::VOICES;
use crate::error::{LayoutError, Result};
use crate::page::Page;
use crate::staff::Staff;
use crate::style::Style;
use crate::system::System;
use crate::undo::{EditCommand, UndoStack};
use id_arena::{Arena, Id};

#[derive(Debug, Default)]
/// A document owns the staves, the systems and the pages of a score. Systems
/// and pages live in arenas; `system_order` and `page_order` give their
/// order in the document.
pub struct Document {
    pub style: Style,
    pub staves: Vec<Staff>,
    pub systems: Arena<System>,
    /// All collected systems, in timeline order
    pub system_order: Vec<Id<System>>,
    pub pages: Arena<Page>,
    pub page_order: Vec<Id<Page>>,
    /// Added to page indices when deciding whether a page is odd or even
    pub page_number_offset: i64,
    pub history: UndoStack,
}

impl Document {
    pub fn new(style: Style, staves: Vec<Staff>) -> Document {
        Document {
            style,
            staves,
            ..Document::default()
        }
    }

    /// Number of tracks across all staves
    pub fn ntracks(&self) -> usize {
        self.staves.len() * VOICES
    }

    /// Add a system to the end of the document's system list
    pub fn add_system(&mut self, system: System) -> Id<System> {
        let id = self.systems.alloc(system);
        self.system_order.push(id);
        id
    }

    /// Add a page to the end of the document
    pub fn add_page(&mut self, page: Page) -> Id<Page> {
        let id = self.pages.alloc(page);
        self.page_order.push(id);
        id
    }

    pub fn npages(&self) -> usize {
        self.page_order.len()
    }

    /// Get the page Id of a page at the given index. Returns [None] if
    /// `page_index >= self.page_order.len()`.
    pub fn id_of_page_index(&self, page_index: usize) -> Option<Id<Page>> {
        self.page_order.get(page_index).copied()
    }

    /// The page at the given index
    pub fn page(&self, page_index: usize) -> Option<&Page> {
        self.id_of_page_index(page_index)
            .and_then(|id| self.pages.get(id))
    }

    /// The systems placed on a page, in order
    pub fn systems_on_page(&self, page: Id<Page>) -> impl Iterator<Item = &System> {
        self.pages[page]
            .systems
            .iter()
            .map(move |id| &self.systems[*id])
    }

    /// Place a system at the end of a page
    pub fn append_system(&mut self, page: Id<Page>, system: Id<System>) {
        debug_assert!(
            !self.pages[page].contains(system),
            "system placed twice on one page"
        );
        self.pages[page].systems.push(system);
        self.systems[system].page = Some(page);
    }

    /// Drop all pages from `count` onward, detaching their systems
    pub fn truncate_pages(&mut self, count: usize) {
        if count >= self.page_order.len() {
            return;
        }
        for page in self.page_order.split_off(count) {
            for system in std::mem::take(&mut self.pages[page].systems) {
                if self.systems[system].page == Some(page) {
                    self.systems[system].page = None;
                }
            }
        }
    }

    /// Attach a divider to a system as an undoable edit
    pub fn add_divider(&mut self, system: Id<System>, divider: Divider) -> Result<()> {
        self.history
            .push(EditCommand::AddDivider { system, divider }, &mut self.systems)
    }

    /// Remove a divider from a system as an undoable edit. Removing a divider
    /// that is not there does nothing.
    pub fn undo_remove_divider(&mut self, system: Id<System>, side: DividerSide) -> Result<()> {
        let divider = self
            .systems
            .get(system)
            .ok_or(LayoutError::SystemMissing(system.index()))?
            .divider(side)
            .cloned();
        match divider {
            Some(divider) => self.history.push(
                EditCommand::RemoveDivider { system, divider },
                &mut self.systems,
            ),
            None => Ok(()),
        }
    }

    /// Revert the most recent edit
    pub fn undo(&mut self) -> Result<()> {
        self.history.undo(&mut self.systems)
    }

    /// Re-apply the most recently reverted edit
    pub fn redo(&mut self) -> Result<()> {
        self.history.redo(&mut self.systems)
    }
}
