use std::{
    collections::HashSet,
    fmt::{self, Display},
};

use tileslide_core::{Board, BoardKey, Move};

use crate::{
    BoxedFrontier, CancelToken, FifoFrontier, FrontierEntry, NodeArena, PriorityFrontier,
    SearchNode, manhattan_distance,
};

/// The order in which a search expands states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, derive_more::Display)]
pub enum Strategy {
    /// Best-first search on `g + h` with the Manhattan-distance heuristic.
    #[default]
    #[display("A*")]
    AStar,
    /// Uninformed search in order of discovery.
    #[display("BFS")]
    BreadthFirst,
}

impl Strategy {
    /// All strategies.
    pub const ALL: [Self; 2] = [Self::AStar, Self::BreadthFirst];

    /// Returns the estimate of moves left used to order `board`.
    #[must_use]
    pub fn estimate(self, board: &Board) -> u32 {
        match self {
            Self::AStar => manhattan_distance(board),
            Self::BreadthFirst => 0,
        }
    }

    /// Creates an empty frontier matching this strategy.
    #[must_use]
    pub fn new_frontier(self) -> BoxedFrontier {
        match self {
            Self::AStar => Box::new(PriorityFrontier::new()),
            Self::BreadthFirst => Box::new(FifoFrontier::new()),
        }
    }
}

/// Tunables for a search run.
///
/// # Examples
///
/// ```
/// use tileslide_solver::SearchLimits;
///
/// let limits = SearchLimits::default().with_max_nodes(5_000).with_slice(250);
/// assert_eq!(limits.max_nodes(), 5_000);
/// assert_eq!(limits.slice(), 250);
/// assert_eq!(limits.progress_interval(), 1_000);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchLimits {
    max_nodes: usize,
    progress_interval: usize,
    slice: usize,
}

impl SearchLimits {
    /// Default cap on explored nodes.
    pub const DEFAULT_MAX_NODES: usize = 100_000;
    /// Default number of explored nodes between progress log lines.
    pub const DEFAULT_PROGRESS_INTERVAL: usize = 1_000;
    /// Default number of steps per cooperative slice.
    pub const DEFAULT_SLICE: usize = 1_000;

    /// Sets the cap on explored nodes. Reaching it ends the search as exhausted.
    #[must_use]
    pub fn with_max_nodes(mut self, max_nodes: usize) -> Self {
        self.max_nodes = max_nodes;
        self
    }

    /// Sets how many explored nodes pass between progress log lines.
    ///
    /// Zero is treated as one.
    #[must_use]
    pub fn with_progress_interval(mut self, interval: usize) -> Self {
        self.progress_interval = interval.max(1);
        self
    }

    /// Sets how many steps a cooperative slice performs before yielding.
    ///
    /// Zero is treated as one.
    #[must_use]
    pub fn with_slice(mut self, slice: usize) -> Self {
        self.slice = slice.max(1);
        self
    }

    /// Returns the cap on explored nodes.
    #[must_use]
    pub fn max_nodes(&self) -> usize {
        self.max_nodes
    }

    /// Returns the progress log interval.
    #[must_use]
    pub fn progress_interval(&self) -> usize {
        self.progress_interval
    }

    /// Returns the number of steps per slice.
    #[must_use]
    pub fn slice(&self) -> usize {
        self.slice
    }
}

impl Default for SearchLimits {
    fn default() -> Self {
        Self {
            max_nodes: Self::DEFAULT_MAX_NODES,
            progress_interval: Self::DEFAULT_PROGRESS_INTERVAL,
            slice: Self::DEFAULT_SLICE,
        }
    }
}

/// Where a search stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::IsVariant)]
pub enum SearchStatus {
    /// No search has been started.
    #[display("idle")]
    Idle,
    /// The search has more states to expand.
    #[display("searching")]
    Searching,
    /// The goal was reached.
    #[display("solved")]
    Solved,
    /// The frontier ran dry or the node cap was hit.
    #[display("exhausted")]
    Exhausted,
    /// The search was cancelled.
    #[display("aborted")]
    Aborted,
}

/// A move sequence that solves a board.
///
/// Displays as space-separated move tokens.
///
/// # Examples
///
/// ```
/// use tileslide_core::Board;
/// use tileslide_solver::{Strategy, solve};
///
/// let board: Board = "1,2,3,4,0,5,7,8,6".parse()?;
/// let solution = solve(&board, Strategy::AStar)
///     .into_solution()
///     .expect("board is two moves from solved");
/// assert_eq!(solution.to_string(), "R D");
/// assert!(board.replay(solution.moves().iter().copied())?.is_solved());
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Solution {
    moves: Vec<Move>,
    nodes_explored: usize,
}

impl Solution {
    /// Returns the moves in play order.
    #[must_use]
    pub fn moves(&self) -> &[Move] {
        &self.moves
    }

    /// Returns the number of moves.
    #[must_use]
    pub fn len(&self) -> usize {
        self.moves.len()
    }

    /// Returns `true` if the start board was already solved.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }

    /// Returns how many nodes the search expanded to find this solution.
    #[must_use]
    pub fn nodes_explored(&self) -> usize {
        self.nodes_explored
    }

    /// Consumes the solution and returns its moves.
    #[must_use]
    pub fn into_moves(self) -> Vec<Move> {
        self.moves
    }
}

impl Display for Solution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, mv) in self.moves.iter().enumerate() {
            if i != 0 {
                write!(f, " ")?;
            }
            write!(f, "{mv}")?;
        }
        Ok(())
    }
}

/// Why a search stopped without reaching the goal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum ExhaustReason {
    /// Every reachable state was expanded.
    #[display("frontier empty")]
    FrontierEmpty,
    /// The explored-node cap was reached.
    #[display("node limit reached")]
    NodeLimit,
}

/// The terminal result of a search.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::IsVariant)]
pub enum SearchOutcome {
    /// The goal was reached.
    Solved(Solution),
    /// The search stopped without reaching the goal.
    Exhausted {
        /// Nodes expanded before stopping.
        nodes_explored: usize,
        /// Which limit stopped the search.
        reason: ExhaustReason,
    },
    /// The search was cancelled. No partial path is reported.
    Aborted {
        /// Nodes expanded before cancellation was observed.
        nodes_explored: usize,
    },
}

impl SearchOutcome {
    /// Returns the number of nodes expanded.
    #[must_use]
    pub fn nodes_explored(&self) -> usize {
        match self {
            Self::Solved(solution) => solution.nodes_explored,
            Self::Exhausted { nodes_explored, .. } | Self::Aborted { nodes_explored } => {
                *nodes_explored
            }
        }
    }

    /// Returns the terminal status this outcome corresponds to.
    #[must_use]
    pub fn status(&self) -> SearchStatus {
        match self {
            Self::Solved(_) => SearchStatus::Solved,
            Self::Exhausted { .. } => SearchStatus::Exhausted,
            Self::Aborted { .. } => SearchStatus::Aborted,
        }
    }

    /// Returns the solution, if the goal was reached.
    #[must_use]
    pub fn solution(&self) -> Option<&Solution> {
        match self {
            Self::Solved(solution) => Some(solution),
            _ => None,
        }
    }

    /// Consumes the outcome and returns the solution, if the goal was reached.
    #[must_use]
    pub fn into_solution(self) -> Option<Solution> {
        match self {
            Self::Solved(solution) => Some(solution),
            _ => None,
        }
    }
}

impl Display for SearchOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Solved(solution) => write!(
                f,
                "solved in {} moves after exploring {} nodes",
                solution.len(),
                solution.nodes_explored
            ),
            Self::Exhausted {
                nodes_explored,
                reason,
            } => write!(f, "exhausted ({reason}) after exploring {nodes_explored} nodes"),
            Self::Aborted { nodes_explored } => {
                write!(f, "aborted after exploring {nodes_explored} nodes")
            }
        }
    }
}

/// The result of advancing a search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum SearchStep {
    /// The search can be advanced further.
    Pending,
    /// The search reached a terminal state.
    Finished,
}

#[derive(Debug)]
enum SearchState {
    Searching(Box<Workspace>),
    Finished(SearchOutcome),
}

/// Frontier, visited set and node storage owned by a running search.
#[derive(Debug)]
struct Workspace {
    arena: NodeArena,
    frontier: BoxedFrontier,
    visited: HashSet<BoardKey>,
}

impl Workspace {
    fn new(start: Board, strategy: Strategy) -> Self {
        let mut visited = HashSet::new();
        visited.insert(start.key());
        let h = strategy.estimate(&start);
        let mut arena = NodeArena::new();
        let root = arena.push(SearchNode::root(start, h));
        let mut frontier = strategy.new_frontier();
        frontier.push(FrontierEntry { node: root, f: h });
        Self {
            arena,
            frontier,
            visited,
        }
    }

    /// Expands one node, returning the outcome if the search is over.
    fn expand_next(
        &mut self,
        strategy: Strategy,
        limits: &SearchLimits,
        cancel: &CancelToken,
        nodes_explored: &mut usize,
    ) -> Option<SearchOutcome> {
        if cancel.is_cancelled() {
            return Some(SearchOutcome::Aborted {
                nodes_explored: *nodes_explored,
            });
        }
        if *nodes_explored >= limits.max_nodes() && !self.frontier.is_empty() {
            return Some(SearchOutcome::Exhausted {
                nodes_explored: *nodes_explored,
                reason: ExhaustReason::NodeLimit,
            });
        }
        let Some(entry) = self.frontier.pop() else {
            return Some(SearchOutcome::Exhausted {
                nodes_explored: *nodes_explored,
                reason: ExhaustReason::FrontierEmpty,
            });
        };
        *nodes_explored += 1;
        if *nodes_explored % limits.progress_interval() == 0 {
            log::debug!(
                "{strategy} explored {} nodes, frontier {}, depth {}",
                *nodes_explored,
                self.frontier.len(),
                self.arena[entry.node].g()
            );
        }

        let node = &self.arena[entry.node];
        if node.board().is_solved() {
            return Some(SearchOutcome::Solved(Solution {
                moves: self.arena.path_to(entry.node),
                nodes_explored: *nodes_explored,
            }));
        }

        let g = node.g() + 1;
        let successors: Vec<_> = node.board().successors().collect();
        for (mv, board) in successors {
            if !self.visited.insert(board.key()) {
                continue;
            }
            let h = strategy.estimate(&board);
            let child = self
                .arena
                .push(SearchNode::child(board, g, h, entry.node, mv));
            self.frontier.push(FrontierEntry {
                node: child,
                f: g + h,
            });
        }
        None
    }
}

/// A resumable search from one start board to the solved board.
///
/// Each [`Search::step`] expands at most one node. Callers that must stay
/// responsive advance the search in slices with [`Search::run`]; the search
/// keeps its frontier, visited set and node arena between calls and drops them
/// once it reaches a terminal state.
///
/// States are marked visited when first enqueued and are never reopened, so the
/// A* result is not guaranteed to be the shortest path. Breadth-first search
/// returns a shortest path.
///
/// # Examples
///
/// ```
/// use tileslide_core::{Board, Move};
/// use tileslide_solver::{Search, SearchOutcome, SearchStep, Strategy};
///
/// let board: Board = "1,2,3,4,5,6,7,0,8".parse()?;
/// let mut search = Search::new(board, Strategy::AStar);
/// while search.step().is_pending() {}
///
/// let Some(SearchOutcome::Solved(solution)) = search.outcome() else {
///     panic!("expected a solution");
/// };
/// assert_eq!(solution.moves(), [Move::Right]);
/// # Ok::<(), tileslide_core::BoardError>(())
/// ```
#[derive(Debug)]
pub struct Search {
    strategy: Strategy,
    limits: SearchLimits,
    cancel: CancelToken,
    nodes_explored: usize,
    state: SearchState,
}

impl Search {
    /// Starts a search from `start` with default limits.
    #[must_use]
    pub fn new(start: Board, strategy: Strategy) -> Self {
        log::info!(
            "starting {strategy} search on {size}x{size} board {start}",
            size = start.size()
        );
        Self {
            strategy,
            limits: SearchLimits::default(),
            cancel: CancelToken::new(),
            nodes_explored: 0,
            state: SearchState::Searching(Box::new(Workspace::new(start, strategy))),
        }
    }

    /// Replaces the search limits.
    #[must_use]
    pub fn with_limits(mut self, limits: SearchLimits) -> Self {
        self.limits = limits;
        self
    }

    /// Replaces the cancellation token.
    #[must_use]
    pub fn with_cancel_token(mut self, cancel: CancelToken) -> Self {
        self.cancel = cancel;
        self
    }

    /// Returns the strategy.
    #[must_use]
    pub fn strategy(&self) -> Strategy {
        self.strategy
    }

    /// Returns the limits.
    #[must_use]
    pub fn limits(&self) -> &SearchLimits {
        &self.limits
    }

    /// Returns a clone of the cancellation token observed by this search.
    #[must_use]
    pub fn cancel_token(&self) -> CancelToken {
        self.cancel.clone()
    }

    /// Returns the number of nodes expanded so far.
    #[must_use]
    pub fn nodes_explored(&self) -> usize {
        self.nodes_explored
    }

    /// Returns the current status.
    #[must_use]
    pub fn status(&self) -> SearchStatus {
        match &self.state {
            SearchState::Searching(_) => SearchStatus::Searching,
            SearchState::Finished(outcome) => outcome.status(),
        }
    }

    /// Returns `true` once the search reached a terminal state.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        matches!(self.state, SearchState::Finished(_))
    }

    /// Returns the outcome, if the search has finished.
    #[must_use]
    pub fn outcome(&self) -> Option<&SearchOutcome> {
        match &self.state {
            SearchState::Searching(_) => None,
            SearchState::Finished(outcome) => Some(outcome),
        }
    }

    /// Consumes a finished search and returns its outcome.
    ///
    /// # Errors
    ///
    /// Returns the search unchanged if it has not finished yet.
    pub fn try_into_outcome(self) -> Result<SearchOutcome, Self> {
        match self.state {
            SearchState::Finished(outcome) => Ok(outcome),
            SearchState::Searching(_) => Err(self),
        }
    }

    /// Performs one step.
    ///
    /// A step checks cancellation, then the frontier and the node cap, then
    /// expands the next node. Stepping a finished search does nothing.
    pub fn step(&mut self) -> SearchStep {
        let SearchState::Searching(workspace) = &mut self.state else {
            return SearchStep::Finished;
        };
        let outcome = workspace.expand_next(
            self.strategy,
            &self.limits,
            &self.cancel,
            &mut self.nodes_explored,
        );
        match outcome {
            Some(outcome) => {
                self.finish(outcome);
                SearchStep::Finished
            }
            None => SearchStep::Pending,
        }
    }

    /// Performs at most `budget` steps and returns control to the caller.
    pub fn run(&mut self, budget: usize) -> SearchStep {
        for _ in 0..budget {
            if self.step().is_finished() {
                return SearchStep::Finished;
            }
        }
        if self.is_finished() {
            SearchStep::Finished
        } else {
            SearchStep::Pending
        }
    }

    /// Runs the search to completion in slices of [`SearchLimits::slice`] steps.
    ///
    /// `on_progress` receives the explored-node count after every slice that
    /// leaves the search unfinished.
    pub fn run_to_end<F>(mut self, mut on_progress: F) -> SearchOutcome
    where
        F: FnMut(usize),
    {
        loop {
            self.run(self.limits.slice());
            match self.try_into_outcome() {
                Ok(outcome) => return outcome,
                Err(search) => {
                    on_progress(search.nodes_explored);
                    self = search;
                }
            }
        }
    }

    fn finish(&mut self, outcome: SearchOutcome) {
        log::info!("{} search {outcome}", self.strategy);
        self.state = SearchState::Finished(outcome);
    }
}

/// Runs a search with default limits to completion.
///
/// # Examples
///
/// ```
/// use tileslide_core::Board;
/// use tileslide_solver::{Strategy, solve};
///
/// let outcome = solve(&Board::solved(3)?, Strategy::BreadthFirst);
/// assert_eq!(outcome.solution().map(|s| s.len()), Some(0));
/// assert_eq!(outcome.nodes_explored(), 1);
/// # Ok::<(), tileslide_core::BoardError>(())
/// ```
#[must_use]
pub fn solve(board: &Board, strategy: Strategy) -> SearchOutcome {
    Search::new(board.clone(), strategy).run_to_end(|_| {})
}
