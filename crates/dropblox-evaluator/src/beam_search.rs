//! Multi-ply beam search over placements of the active piece and the preview queue.
//!
//! # Ply Expansion
//!
//! For every surviving candidate the active piece is first pushed to its canonical
//! position (as far up, then as far left, as legal). From there the search walks right
//! one column at a time and, in each column, tries the four rotations in order,
//! dropping the piece for each. A rotation or shift that would be illegal ends that
//! walk.
//!
//! Every child remembers the `(rights, rotations)` pair of its ply-0 ancestor, which is
//! the only decision actually sent to the game this turn.
//!
//! # Pruning
//!
//! Children are scored with a [`BoardEvaluator`] on their accumulated line-clear score,
//! sorted by descending value and truncated to the beam width. The sort is stable, so
//! ties go to the child generated first; expansion and scoring run in parallel but
//! keep generation order, which makes the search deterministic.
//!
//! # Termination
//!
//! The search stops after `depth` plies, after the first ply that ends past the time
//! budget, or when no candidate has a legal piece left to place. In every case the
//! answer is the head of the last pruned list.

use std::{cmp::Reverse, time::Instant};

use dropblox_engine::{Board, MoveCommand, PieceRotation};
use rayon::prelude::*;

use crate::{
    PlanError,
    board_evaluator::{BoardEvaluator, HeuristicEvaluator},
    move_plan::MovePlan,
    search_config::SearchConfig,
};

/// A board reached by the search, with the first move of its lineage.
#[derive(Debug, Clone)]
pub struct Candidate {
    board: Board,
    first_move: MovePlan,
    score: u64,
    value: i64,
}

impl Candidate {
    #[must_use]
    pub fn first_move(&self) -> MovePlan {
        self.first_move
    }

    /// Line-clear score accumulated over the whole lineage.
    #[must_use]
    pub fn score(&self) -> u64 {
        self.score
    }

    /// Heuristic value the candidate was ranked by.
    #[must_use]
    pub fn value(&self) -> i64 {
        self.value
    }
}

/// A dropped board that has not been scored yet.
struct Child {
    board: Board,
    first_move: MovePlan,
    score: u64,
}

#[derive(Debug, Clone)]
pub struct SearchOutcome {
    candidates: Vec<Candidate>,
    completed_plies: usize,
}

impl SearchOutcome {
    /// Returns the highest-ranked candidate of the last completed ply.
    #[must_use]
    pub fn best(&self) -> &Candidate {
        &self.candidates[0]
    }

    /// Returns the last pruned candidate list, best first. Never empty.
    #[must_use]
    pub fn candidates(&self) -> &[Candidate] {
        &self.candidates
    }

    #[must_use]
    pub fn completed_plies(&self) -> usize {
        self.completed_plies
    }
}

#[derive(Debug)]
pub struct BeamSearch<E = HeuristicEvaluator> {
    config: SearchConfig,
    evaluator: E,
}

impl BeamSearch {
    /// Creates a search that ranks boards with [`HeuristicEvaluator`] and the configured weights.
    #[must_use]
    pub fn new(config: SearchConfig) -> Self {
        let evaluator = HeuristicEvaluator::new(config.weights);
        Self::with_evaluator(config, evaluator)
    }
}

impl<E> BeamSearch<E>
where
    E: BoardEvaluator,
{
    /// Creates a search with a custom evaluator. `config.weights` is ignored.
    ///
    /// A depth or beam width of zero is treated as one.
    #[must_use]
    pub fn with_evaluator(mut config: SearchConfig, evaluator: E) -> Self {
        config.depth = config.depth.max(1);
        config.beam_width = config.beam_width.max(1);
        Self { config, evaluator }
    }

    /// Searches placements for the active piece of `board`.
    ///
    /// Fails if the active piece is illegal at its start position or if the preview
    /// queue is shorter than the search depth.
    pub fn search(&self, board: &Board) -> Result<SearchOutcome, PlanError> {
        if !board.check(&board.active_piece().reset_position()) {
            return Err(PlanError::InvalidStartPosition);
        }
        let depth = self.config.depth;
        let available = board.preview().len();
        if available < depth {
            return Err(PlanError::InsufficientPreview {
                required: depth,
                available,
            });
        }

        let started = Instant::now();
        let mut candidates = self.prune(expand(board, None)?);
        let mut completed_plies = 1;
        log::debug!("ply 0: kept {} candidates", candidates.len());

        while completed_plies < depth {
            if self
                .config
                .time_budget
                .is_some_and(|budget| started.elapsed() >= budget)
            {
                log::debug!("time budget exhausted after {completed_plies} plies");
                break;
            }

            let children = candidates
                .par_iter()
                .map(|candidate| expand(&candidate.board, Some(candidate)))
                .collect::<Result<Vec<_>, _>>()?;
            let frontier: Vec<Child> = children.into_iter().flatten().collect();
            if frontier.is_empty() {
                log::debug!("no candidate can place a piece at ply {completed_plies}");
                break;
            }

            let frontier_len = frontier.len();
            candidates = self.prune(frontier);
            log::debug!(
                "ply {completed_plies}: kept {} of {frontier_len} candidates",
                candidates.len()
            );
            completed_plies += 1;
        }

        let outcome = SearchOutcome {
            candidates,
            completed_plies,
        };
        let best = outcome.best();
        log::trace!(
            "best candidate: {:?} score={} value={}",
            best.first_move,
            best.score,
            best.value
        );
        Ok(outcome)
    }

    fn prune(&self, frontier: Vec<Child>) -> Vec<Candidate> {
        let mut ranked: Vec<Candidate> = frontier
            .into_par_iter()
            .map(|child| Candidate {
                value: self.evaluator.evaluate(child.board.grid(), child.score),
                board: child.board,
                first_move: child.first_move,
                score: child.score,
            })
            .collect();
        ranked.sort_by_key(|candidate| Reverse(candidate.value));
        ranked.truncate(self.config.beam_width);
        ranked
    }
}

/// Drops the active piece of `board` in every reachable column and rotation.
///
/// `lineage` is `None` at the root, where each child starts its own lineage.
fn expand(board: &Board, lineage: Option<&Candidate>) -> Result<Vec<Child>, PlanError> {
    let active = board.active_piece();
    if !board.check(active) {
        return Ok(vec![]);
    }

    let mut children = vec![];
    let mut shifted = Some(board.canonical_position(active));
    let mut rights = 0;
    while let Some(base) = shifted {
        let mut rotated = Some(base.clone());
        for rotations in 0..PieceRotation::COUNT {
            let Some(piece) = rotated else {
                break;
            };
            let outcome = board.drop_piece(&piece)?;
            let (first_move, score) = match lineage {
                Some(parent) => (parent.first_move, parent.score + outcome.score()),
                None => (MovePlan::new(rights, rotations), outcome.score()),
            };
            children.push(Child {
                board: outcome.board,
                first_move,
                score,
            });
            rotated = board.checked_apply(&piece, MoveCommand::Rotate);
        }
        shifted = board.checked_apply(&base, MoveCommand::Right);
        rights += 1;
    }
    Ok(children)
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use dropblox_engine::{Grid, PieceKind, PieceShape, Point};

    use super::*;

    fn monomino(center: Point) -> PieceShape {
        PieceShape::new(center, [Point::ORIGIN]).unwrap()
    }

    fn board_with(grid: Grid, active: PieceShape, preview: Vec<PieceShape>) -> Board {
        Board::new(grid, active, preview)
    }

    fn search(depth: usize) -> BeamSearch {
        BeamSearch::new(SearchConfig {
            depth,
            ..SearchConfig::default()
        })
    }

    #[test]
    fn test_fills_single_gap_and_clears_row() {
        let shape = monomino(Point::new(0, 5));
        let board = board_with(
            Grid::from_ascii("#####.######"),
            shape.clone(),
            vec![shape; 5],
        );
        for depth in [1, 3] {
            let outcome = search(depth).search(&board).unwrap();
            assert_eq!(outcome.completed_plies(), depth);
            assert_eq!(outcome.best().first_move(), MovePlan::new(5, 0));
            assert_eq!(outcome.best().score(), 1);

            let commands = outcome.best().first_move().commands(&board);
            assert_eq!(board.replay_commands(&commands).unwrap().cleared_lines, 1);
        }
    }

    #[test]
    fn test_offsets_are_counted_from_left_wall() {
        let shape = monomino(Point::new(5, 3));
        let board = board_with(
            Grid::from_ascii("###########."),
            shape.clone(),
            vec![shape],
        );
        let outcome = search(1).search(&board).unwrap();
        assert_eq!(outcome.best().first_move(), MovePlan::new(11, 0));
        assert_eq!(outcome.best().score(), 1);
        // Every column is tried in each of the four rotations.
        assert_eq!(outcome.candidates().len(), Grid::COLS * PieceRotation::COUNT);
    }

    #[test]
    fn test_ties_go_to_first_generated_child() {
        let shape = monomino(Point::new(0, 5));
        let board = board_with(Grid::EMPTY, shape.clone(), vec![shape]);
        let outcome = search(1).search(&board).unwrap();
        // Columns 0 and 11 are equally good; column 0 is generated first.
        assert_eq!(outcome.best().first_move(), MovePlan::new(0, 0));
        assert_eq!(outcome.candidates()[1].first_move(), MovePlan::new(0, 1));
    }

    #[test]
    fn test_search_is_deterministic() {
        let grid = Grid::from_ascii(
            r"
            ......#.....
            ##..####..#.
            ###.#####.##
            ",
        );
        let preview: Vec<_> = [PieceKind::T, PieceKind::S, PieceKind::I, PieceKind::O]
            .into_iter()
            .map(PieceKind::shape)
            .collect();
        let board = board_with(grid, PieceKind::L.shape(), preview);
        let search = search(4);

        let first = search.search(&board).unwrap();
        let second = search.search(&board).unwrap();
        let summary = |outcome: &SearchOutcome| {
            outcome
                .candidates()
                .iter()
                .map(|c| (c.first_move(), c.score(), c.value()))
                .collect::<Vec<_>>()
        };
        assert_eq!(summary(&first), summary(&second));
        assert_eq!(first.completed_plies(), 4);
    }

    #[test]
    fn test_prune_keeps_top_k_sorted() {
        let board = board_with(
            Grid::from_ascii("##.#..#.####"),
            PieceKind::T.shape(),
            vec![PieceKind::I.shape()],
        );
        let search = BeamSearch::new(SearchConfig {
            beam_width: 10,
            ..SearchConfig::default()
        });
        let frontier = expand(&board, None).unwrap();
        let frontier_len = frontier.len();
        assert!(frontier_len > 10);

        let kept = search.prune(frontier);
        assert_eq!(kept.len(), 10);
        assert!(kept.windows(2).all(|w| w[0].value() >= w[1].value()));

        let small = expand(&board, None).unwrap().into_iter().take(3).collect();
        assert_eq!(search.prune(small).len(), 3);
    }

    #[test]
    fn test_stops_when_every_lineage_tops_out() {
        let bar = PieceShape::new(Point::new(0, 5), (-5..5).map(|j| Point::new(0, j))).unwrap();
        let grid =
            Grid::from_rows((0..Grid::ROWS).map(|i| (0..Grid::COLS).map(move |j| i > 0 && j < 10)))
                .unwrap();
        let board = board_with(grid, bar.clone(), vec![bar; 5]);

        let outcome = search(5).search(&board).unwrap();
        assert_eq!(outcome.completed_plies(), 1);
        // The bar cannot rotate, so only its three columns are tried. Covering the
        // right edge costs holes but flattens the surface the most.
        assert_eq!(outcome.candidates().len(), 3);
        assert_eq!(outcome.best().first_move(), MovePlan::new(2, 0));
    }

    #[test]
    fn test_time_budget_completes_one_ply() {
        let shape = monomino(Point::new(0, 5));
        let board = board_with(Grid::EMPTY, shape.clone(), vec![shape; 5]);
        let search = BeamSearch::new(SearchConfig {
            time_budget: Some(Duration::ZERO),
            ..SearchConfig::default()
        });
        let outcome = search.search(&board).unwrap();
        assert_eq!(outcome.completed_plies(), 1);
    }

    #[test]
    fn test_rejects_invalid_input() {
        let shape = monomino(Point::new(0, 5));
        let board = board_with(Grid::EMPTY, shape.clone(), vec![shape.clone(), shape.clone()]);
        assert_eq!(
            search(5).search(&board).unwrap_err(),
            PlanError::InsufficientPreview {
                required: 5,
                available: 2
            }
        );

        let full_top = Grid::from_rows((0..Grid::ROWS).map(|i| [i == 0; Grid::COLS])).unwrap();
        let board = board_with(full_top, shape.clone(), vec![shape]);
        assert_eq!(
            search(1).search(&board).unwrap_err(),
            PlanError::InvalidStartPosition
        );
    }
}
