use portable_atomic::{AtomicU64, Ordering};
use tileslide_core::Board;

use crate::{
    CancelToken, Search, SearchLimits, SearchOutcome, SearchStatus, SolverError, Strategy,
};

static NEXT_SEARCH_ID: AtomicU64 = AtomicU64::new(1);

/// Identifies one search started on a [`SearchHost`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display)]
#[display("#{_0}")]
pub struct SearchHandle(u64);

impl SearchHandle {
    fn next() -> Self {
        Self(NEXT_SEARCH_ID.fetch_add(1, Ordering::Relaxed))
    }
}

/// A notification produced by [`SearchHost::poll`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchEvent {
    /// A slice ran and the search is still going.
    Progress {
        /// Nodes expanded so far.
        nodes_explored: usize,
    },
    /// The search reached a terminal state. Emitted exactly once per search.
    Finished(SearchOutcome),
}

#[derive(Debug)]
struct ActiveSearch {
    handle: SearchHandle,
    cancel: CancelToken,
    search: Search,
}

/// Runs at most one search at a time in cooperative slices.
///
/// The host owns the running [`Search`]. Each [`SearchHost::poll`] advances it by
/// one slice of [`SearchLimits::slice`] steps, which lets a UI thread interleave
/// searching with rendering and input.
///
/// # Examples
///
/// ```
/// use tileslide_core::Board;
/// use tileslide_solver::{SearchEvent, SearchHost, Strategy};
///
/// let mut host = SearchHost::new();
/// let board: Board = "1,2,3,4,5,6,7,0,8".parse()?;
/// let _handle = host.start(board, Strategy::AStar)?;
///
/// let outcome = loop {
///     match host.poll() {
///         Some(SearchEvent::Finished(outcome)) => break outcome,
///         Some(SearchEvent::Progress { .. }) => {}
///         None => unreachable!("a search is running"),
///     }
/// };
/// assert!(outcome.is_solved());
/// assert!(host.poll().is_none());
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Default)]
pub struct SearchHost {
    limits: SearchLimits,
    active: Option<ActiveSearch>,
    last_status: Option<SearchStatus>,
}

impl SearchHost {
    /// Creates a host with default limits.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the limits applied to searches started afterwards.
    #[must_use]
    pub fn with_limits(mut self, limits: SearchLimits) -> Self {
        self.limits = limits;
        self
    }

    /// Returns the limits applied to new searches.
    #[must_use]
    pub fn limits(&self) -> &SearchLimits {
        &self.limits
    }

    /// Returns `true` while a search is running.
    #[must_use]
    pub fn is_searching(&self) -> bool {
        self.active.is_some()
    }

    /// Returns the handle of the running search.
    #[must_use]
    pub fn active_handle(&self) -> Option<SearchHandle> {
        self.active.as_ref().map(|active| active.handle)
    }

    /// Returns the status of the running search, or of the last finished one.
    ///
    /// A host that never ran a search is [`SearchStatus::Idle`].
    #[must_use]
    pub fn status(&self) -> SearchStatus {
        match &self.active {
            Some(active) => active.search.status(),
            None => self.last_status.unwrap_or(SearchStatus::Idle),
        }
    }

    /// Starts a search from `board`.
    ///
    /// # Errors
    ///
    /// Returns [`SolverError::AlreadySearching`] if a search is still running.
    pub fn start(&mut self, board: Board, strategy: Strategy) -> Result<SearchHandle, SolverError> {
        if let Some(active) = &self.active {
            log::warn!("rejected {strategy} search: search {} is still running", active.handle);
            return Err(SolverError::AlreadySearching {
                active: active.handle,
            });
        }

        let handle = SearchHandle::next();
        let cancel = CancelToken::new();
        let search = Search::new(board, strategy)
            .with_limits(self.limits)
            .with_cancel_token(cancel.clone());
        log::debug!("search {handle} started");
        self.active = Some(ActiveSearch {
            handle,
            cancel,
            search,
        });
        Ok(handle)
    }

    /// Validates a raw tile sequence and starts a search from it.
    ///
    /// # Errors
    ///
    /// Returns [`SolverError::InvalidBoard`] if the tiles do not form a valid
    /// board, and [`SolverError::AlreadySearching`] if a search is still running.
    pub fn start_with_tiles(
        &mut self,
        size: u8,
        tiles: Vec<u8>,
        strategy: Strategy,
    ) -> Result<SearchHandle, SolverError> {
        let board = Board::from_tiles(size, tiles)?;
        self.start(board, strategy)
    }

    /// Requests cancellation of the running search.
    ///
    /// The search stops at its next step; the following [`SearchHost::poll`]
    /// reports [`SearchOutcome::Aborted`].
    ///
    /// # Errors
    ///
    /// Returns [`SolverError::UnknownHandle`] if `handle` does not name the
    /// running search.
    pub fn cancel(&mut self, handle: SearchHandle) -> Result<(), SolverError> {
        match &self.active {
            Some(active) if active.handle == handle => {
                log::info!("cancelling search {handle}");
                active.cancel.cancel();
                Ok(())
            }
            _ => Err(SolverError::UnknownHandle { handle }),
        }
    }

    /// Advances the running search by one slice.
    ///
    /// Returns `None` when no search is running.
    pub fn poll(&mut self) -> Option<SearchEvent> {
        let mut active = self.active.take()?;
        active.search.run(self.limits.slice());
        match active.search.try_into_outcome() {
            Ok(outcome) => {
                log::debug!("search {} finished: {outcome}", active.handle);
                self.last_status = Some(outcome.status());
                Some(SearchEvent::Finished(outcome))
            }
            Err(search) => {
                let nodes_explored = search.nodes_explored();
                active.search = search;
                self.active = Some(active);
                Some(SearchEvent::Progress { nodes_explored })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drain(host: &mut SearchHost) -> (Vec<usize>, SearchOutcome) {
        let mut progress = Vec::new();
        loop {
            match host.poll() {
                Some(SearchEvent::Progress { nodes_explored }) => progress.push(nodes_explored),
                Some(SearchEvent::Finished(outcome)) => return (progress, outcome),
                None => panic!("host went idle without finishing"),
            }
        }
    }

    #[test]
    fn test_idle_host() {
        let mut host = SearchHost::new();
        assert_eq!(host.status(), SearchStatus::Idle);
        assert!(!host.is_searching());
        assert!(host.poll().is_none());
        assert_eq!(host.active_handle(), None);
    }

    #[test]
    fn test_rejects_second_start() {
        let mut host = SearchHost::new();
        let board: Board = "1,2,3,4,5,6,7,0,8".parse().unwrap();
        let first = host.start(board.clone(), Strategy::AStar).unwrap();
        assert_eq!(host.status(), SearchStatus::Searching);
        assert_eq!(
            host.start(board.clone(), Strategy::BreadthFirst),
            Err(SolverError::AlreadySearching { active: first })
        );

        let (_, outcome) = drain(&mut host);
        assert!(outcome.is_solved());
        assert_eq!(host.status(), SearchStatus::Solved);

        let second = host.start(board, Strategy::BreadthFirst).unwrap();
        assert_ne!(first, second);
    }

    #[test]
    fn test_progress_then_single_finish() {
        let limits = SearchLimits::default().with_max_nodes(250).with_slice(100);
        let mut host = SearchHost::new().with_limits(limits);
        let board: Board = "2,1,3,4,5,6,7,8,0".parse().unwrap();
        host.start(board, Strategy::BreadthFirst).unwrap();

        let (progress, outcome) = drain(&mut host);
        assert_eq!(progress, [100, 200]);
        assert!(outcome.is_exhausted());
        assert_eq!(outcome.nodes_explored(), 250);
        assert!(host.poll().is_none());
        assert_eq!(host.status(), SearchStatus::Exhausted);
    }

    #[test]
    fn test_cancel_reports_aborted() {
        let limits = SearchLimits::default().with_slice(50);
        let mut host = SearchHost::new().with_limits(limits);
        let board: Board = "2,1,3,4,5,6,7,8,0".parse().unwrap();
        let handle = host.start(board, Strategy::AStar).unwrap();

        assert_eq!(host.poll(), Some(SearchEvent::Progress { nodes_explored: 50 }));
        host.cancel(handle).unwrap();
        assert_eq!(
            host.poll(),
            Some(SearchEvent::Finished(SearchOutcome::Aborted {
                nodes_explored: 50
            }))
        );
        assert_eq!(host.status(), SearchStatus::Aborted);
        assert_eq!(
            host.cancel(handle),
            Err(SolverError::UnknownHandle { handle })
        );
    }

    #[test]
    fn test_start_with_invalid_tiles() {
        let mut host = SearchHost::new();
        let err = host
            .start_with_tiles(2, vec![1, 1, 0, 3], Strategy::AStar)
            .unwrap_err();
        assert!(matches!(err, SolverError::InvalidBoard(_)));
        assert!(!host.is_searching());

        host.start_with_tiles(2, vec![1, 2, 0, 3], Strategy::AStar)
            .unwrap();
        assert!(host.is_searching());
    }
}
