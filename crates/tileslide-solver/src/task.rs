use std::{
    future::Future,
    pin::Pin,
    task::{Context, Poll},
};

use crate::{Search, SearchOutcome};

/// A [`Future`] that drives a [`Search`] one slice per poll.
///
/// After each unfinished slice the task wakes itself and returns
/// [`Poll::Pending`], so an executor interleaves it with other work instead of
/// running the whole search in one poll.
///
/// # Panics
///
/// Polling the task again after it returned [`Poll::Ready`] panics.
///
/// # Examples
///
/// ```
/// use std::{
///     pin::pin,
///     task::{Context, Poll, Waker},
/// };
///
/// use tileslide_core::Board;
/// use tileslide_solver::{Search, SearchTask, Strategy};
///
/// let board: Board = "1,2,3,4,5,6,7,0,8".parse()?;
/// let mut task = pin!(SearchTask::new(Search::new(board, Strategy::AStar)));
/// let mut cx = Context::from_waker(Waker::noop());
///
/// let outcome = loop {
///     if let Poll::Ready(outcome) = task.as_mut().poll(&mut cx) {
///         break outcome;
///     }
/// };
/// assert_eq!(outcome.nodes_explored(), 2);
/// # Ok::<(), tileslide_core::BoardError>(())
/// ```
#[derive(Debug)]
pub struct SearchTask {
    search: Option<Search>,
}

impl SearchTask {
    /// Wraps a search.
    #[must_use]
    pub fn new(search: Search) -> Self {
        Self {
            search: Some(search),
        }
    }
}

impl From<Search> for SearchTask {
    fn from(search: Search) -> Self {
        Self::new(search)
    }
}

impl Future for SearchTask {
    type Output = SearchOutcome;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let Some(mut search) = self.search.take() else {
            panic!("SearchTask polled after completion");
        };
        search.run(search.limits().slice());
        match search.try_into_outcome() {
            Ok(outcome) => Poll::Ready(outcome),
            Err(search) => {
                self.search = Some(search);
                cx.waker().wake_by_ref();
                Poll::Pending
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::task::Waker;

    use tileslide_core::Board;

    use super::*;
    use crate::{CancelToken, SearchLimits, Strategy};

    fn poll_once(task: &mut SearchTask) -> Poll<SearchOutcome> {
        let mut cx = Context::from_waker(Waker::noop());
        Pin::new(task).poll(&mut cx)
    }

    #[test]
    fn test_yields_between_slices() {
        let board: Board = "2,1,3,4,5,6,7,8,0".parse().unwrap();
        let limits = SearchLimits::default().with_max_nodes(30).with_slice(10);
        let mut task = SearchTask::new(Search::new(board, Strategy::BreadthFirst).with_limits(limits));

        assert!(poll_once(&mut task).is_pending());
        assert!(poll_once(&mut task).is_pending());
        assert!(poll_once(&mut task).is_pending());
        let Poll::Ready(outcome) = poll_once(&mut task) else {
            panic!("search should end at the node cap");
        };
        assert!(outcome.is_exhausted());
        assert_eq!(outcome.nodes_explored(), 30);
    }

    #[test]
    fn test_cancelled_task_is_aborted() {
        let board: Board = "2,1,3,4,5,6,7,8,0".parse().unwrap();
        let token = CancelToken::new();
        let search = Search::new(board, Strategy::AStar)
            .with_limits(SearchLimits::default().with_slice(5))
            .with_cancel_token(token.clone());
        let mut task = SearchTask::from(search);

        assert!(poll_once(&mut task).is_pending());
        token.cancel();
        assert_eq!(
            poll_once(&mut task),
            Poll::Ready(SearchOutcome::Aborted { nodes_explored: 5 })
        );
    }

    #[test]
    #[should_panic(expected = "SearchTask polled after completion")]
    fn test_poll_after_completion_panics() {
        let search = Search::new(Board::solved(2).unwrap(), Strategy::AStar);
        let mut task = SearchTask::new(search);
        assert!(poll_once(&mut task).is_ready());
        let _ = poll_once(&mut task);
    }
}
