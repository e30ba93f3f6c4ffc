use crate::document::Document;
use crate::page::Page;
use crate::style::Style;
use crate::system::System;
use id_arena::Id;
use std::collections::VecDeque;

/// Produces systems from content that has not been laid out yet
pub trait SystemCollector {
    /// The next system, or `None` once the content is exhausted
    fn next_system(&mut self, style: &Style) -> Option<System>;
}

impl<I: Iterator<Item = System>> SystemCollector for I {
    fn next_system(&mut self, _style: &Style) -> Option<System> {
        self.next()
    }
}

/// Where the systems placed on pages come from
pub enum SystemSource {
    /// Collect fresh systems from unconsumed content. Collected systems are
    /// added to the document's system list.
    Collect(Box<dyn SystemCollector>),
    /// Reuse systems already in the document's system list, starting at
    /// index `next`
    Replay { next: usize },
    /// Drain systems that were collected ahead of time. Drained systems are
    /// added to the document's system list.
    Drain(VecDeque<System>),
}

impl SystemSource {
    pub fn collect<C: SystemCollector + 'static>(collector: C) -> SystemSource {
        SystemSource::Collect(Box::new(collector))
    }

    /// The next system to place, allocated in the document if it is new
    pub(crate) fn next(&mut self, document: &mut Document) -> Option<Id<System>> {
        match self {
            SystemSource::Collect(collector) => {
                let system = collector.next_system(&document.style)?;
                Some(document.add_system(system))
            }
            SystemSource::Replay { next } => {
                let id = document.system_order.get(*next).copied()?;
                *next += 1;
                Some(id)
            }
            SystemSource::Drain(queue) => {
                let system = queue.pop_front()?;
                Some(document.add_system(system))
            }
        }
    }
}

impl std::fmt::Debug for SystemSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SystemSource::Collect(_) => f.write_str("Collect"),
            SystemSource::Replay { next } => write!(f, "Replay {{ next: {next} }}"),
            SystemSource::Drain(queue) => write!(f, "Drain({} pending)", queue.len()),
        }
    }
}

/// Pagination state threaded through the page allocation and collection of
/// one layout pass. Owned by the caller.
#[derive(Debug)]
pub struct LayoutContext {
    /// Index of the next page to allocate
    pub cur_page: usize,
    /// The page being filled
    pub page: Option<Id<Page>>,
    /// The system placed last
    pub prev_system: Option<Id<System>>,
    /// The system to place next
    pub cur_system: Option<Id<System>>,
    pub source: SystemSource,
}

impl LayoutContext {
    /// A context starting at the first page. The first system is taken from
    /// `source` right away.
    pub fn new(document: &mut Document, mut source: SystemSource) -> LayoutContext {
        let cur_system = source.next(document);
        LayoutContext {
            cur_page: 0,
            page: None,
            prev_system: None,
            cur_system,
            source,
        }
    }

    /// Whether there is still a system waiting to be placed
    pub fn has_more(&self) -> bool {
        self.cur_system.is_some()
    }
}
