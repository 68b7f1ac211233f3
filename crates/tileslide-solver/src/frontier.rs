use std::{collections::VecDeque, fmt::Debug};

use crate::{NodeId, PriorityQueue};

/// A node waiting in the frontier together with its priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrontierEntry {
    /// Node in the search's arena.
    pub node: NodeId,
    /// Priority `g + h` of the node.
    pub f: u32,
}

/// The set of discovered but not yet expanded nodes.
///
/// The frontier decides expansion order, and with it the search strategy.
pub trait Frontier: Debug + Send {
    /// Adds an entry.
    fn push(&mut self, entry: FrontierEntry);

    /// Removes the next entry to expand, or returns `None` if the frontier is
    /// empty.
    fn pop(&mut self) -> Option<FrontierEntry>;

    /// Returns the number of waiting entries.
    fn len(&self) -> usize;

    /// Returns `true` if no entry is waiting.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A boxed frontier.
pub type BoxedFrontier = Box<dyn Frontier>;

type EntryOrder = fn(&FrontierEntry, &FrontierEntry) -> bool;

fn lower_f(a: &FrontierEntry, b: &FrontierEntry) -> bool {
    a.f < b.f
}

/// Expands the entry with the lowest `f` first.
///
/// Entries with equal `f` leave in an unspecified order.
#[derive(Debug)]
pub struct PriorityFrontier {
    queue: PriorityQueue<FrontierEntry, EntryOrder>,
}

impl PriorityFrontier {
    /// Creates an empty frontier.
    #[must_use]
    pub fn new() -> Self {
        Self {
            queue: PriorityQueue::new(lower_f as EntryOrder),
        }
    }
}

impl Default for PriorityFrontier {
    fn default() -> Self {
        Self::new()
    }
}

impl Frontier for PriorityFrontier {
    fn push(&mut self, entry: FrontierEntry) {
        self.queue.push(entry);
    }

    fn pop(&mut self) -> Option<FrontierEntry> {
        self.queue.try_pop()
    }

    fn len(&self) -> usize {
        self.queue.len()
    }
}

/// Expands entries in insertion order.
#[derive(Debug, Default)]
pub struct FifoFrontier {
    queue: VecDeque<FrontierEntry>,
}

impl FifoFrontier {
    /// Creates an empty frontier.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl Frontier for FifoFrontier {
    fn push(&mut self, entry: FrontierEntry) {
        self.queue.push_back(entry);
    }

    fn pop(&mut self) -> Option<FrontierEntry> {
        self.queue.pop_front()
    }

    fn len(&self) -> usize {
        self.queue.len()
    }
}
