use std::fmt::{self, Debug};

/// A binary heap ordered by a caller-supplied predicate.
///
/// `has_priority(a, b)` returns `true` when `a` must leave the queue before `b`.
/// The predicate must be a strict weak order; items that compare equal in both
/// directions leave in an unspecified order (the queue is not stable).
///
/// # Examples
///
/// ```
/// use tileslide_solver::PriorityQueue;
///
/// let mut queue = PriorityQueue::new(|a: &u32, b: &u32| a < b);
/// for value in [5, 1, 4, 2] {
///     queue.push(value);
/// }
/// assert_eq!(queue.peek(), Some(&1));
/// assert_eq!(queue.pop(), 1);
/// assert_eq!(queue.pop(), 2);
/// assert_eq!(queue.len(), 2);
/// ```
pub struct PriorityQueue<T, F> {
    items: Vec<T>,
    has_priority: F,
}

impl<T, F> Debug for PriorityQueue<T, F>
where
    T: Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PriorityQueue")
            .field("items", &self.items)
            .finish_non_exhaustive()
    }
}

impl<T, F> PriorityQueue<T, F>
where
    F: Fn(&T, &T) -> bool,
{
    /// Creates an empty queue.
    #[must_use]
    pub fn new(has_priority: F) -> Self {
        Self {
            items: Vec::new(),
            has_priority,
        }
    }

    /// Creates an empty queue with room for `capacity` items.
    #[must_use]
    pub fn with_capacity(capacity: usize, has_priority: F) -> Self {
        Self {
            items: Vec::with_capacity(capacity),
            has_priority,
        }
    }

    /// Returns the number of queued items.
    #[must_use]
    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns `true` if the queue holds no items.
    #[must_use]
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns the highest-priority item without removing it.
    #[must_use]
    pub fn peek(&self) -> Option<&T> {
        self.items.first()
    }

    /// Inserts an item in O(log n).
    pub fn push(&mut self, item: T) {
        self.items.push(item);
        self.sift_up(self.items.len() - 1);
    }

    /// Removes and returns the highest-priority item in O(log n).
    ///
    /// # Panics
    ///
    /// Panics if the queue is empty. Use [`PriorityQueue::try_pop`] when emptiness
    /// is an expected condition.
    pub fn pop(&mut self) -> T {
        match self.try_pop() {
            Some(item) => item,
            None => panic!("pop called on an empty priority queue"),
        }
    }

    /// Removes and returns the highest-priority item, or `None` if the queue is
    /// empty.
    pub fn try_pop(&mut self) -> Option<T> {
        if self.items.is_empty() {
            return None;
        }
        let item = self.items.swap_remove(0);
        if !self.items.is_empty() {
            self.sift_down(0);
        }
        Some(item)
    }

    fn sift_up(&mut self, mut index: usize) {
        while index > 0 {
            let parent = (index - 1) / 2;
            if !(self.has_priority)(&self.items[index], &self.items[parent]) {
                break;
            }
            self.items.swap(index, parent);
            index = parent;
        }
    }

    fn sift_down(&mut self, mut index: usize) {
        let len = self.items.len();
        loop {
            let left = 2 * index + 1;
            let right = left + 1;
            let mut best = index;
            if left < len && (self.has_priority)(&self.items[left], &self.items[best]) {
                best = left;
            }
            if right < len && (self.has_priority)(&self.items[right], &self.items[best]) {
                best = right;
            }
            if best == index {
                break;
            }
            self.items.swap(index, best);
            index = best;
        }
    }
}
