use std::cmp::Ordering;

#[cfg(feature = "parallel")]
use rayon::prelude::*;
use rustc_hash::FxHashSet;
use smallvec::SmallVec;
use stacker_core::{Board, Move, Piece};
use stacker_engine::{apply_move, enumerate, enumerate_with_spins, MoveList, ScoreTracker};
use stacker_eval::{evaluate, EvalContext};
use tracing::{debug, trace};

use crate::config::PlannerConfig;

type Path = SmallVec<[Move; 4]>;

/// One partial line of play: the board it leads to and its summed score.
#[derive(Clone, Debug)]
struct Node {
    board: Board,
    scoring: ScoreTracker,
    path: Path,
    score: f32,
}

impl Node {
    /// Boards that agree on occupancy and chain state play out identically.
    fn key(&self) -> ([u16; Board::HEIGHT], u32, bool) {
        (
            *self.board.rows(),
            self.scoring.combo,
            self.scoring.back_to_back,
        )
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct SearchResult {
    /// First move of the best line, the only one meant to be played.
    pub mv: Move,
    pub score: f32,
    pub path: Vec<Move>,
    /// Nodes generated over the whole search.
    pub nodes: usize,
    /// The line starts by putting the current piece on hold; `mv` places
    /// the piece that comes out.
    pub hold: bool,
}

pub struct BeamSearch {
    config: PlannerConfig,
}

impl BeamSearch {
    pub fn new(config: PlannerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &PlannerConfig {
        &self.config
    }

    /// Best first move for `current` followed by `next`, from a fresh score state.
    pub fn plan(&self, board: &Board, current: Piece, next: &[Piece]) -> Option<Move> {
        self.search(board, &ScoreTracker::default(), current, next)
            .map(|r| r.mv)
    }

    /// Beam search over `current` then `next`, at most `depth` pieces deep.
    /// Returns `None` only when `current` has no placement at all.
    pub fn search(
        &self,
        board: &Board,
        scoring: &ScoreTracker,
        current: Piece,
        next: &[Piece],
    ) -> Option<SearchResult> {
        self.search_to(board, scoring, current, next, self.depth_limit(next.len()))
    }

    /// Search both with and without holding `current`. The hold line plays
    /// `held`, or the first of `next` when the slot is empty. Both lines go
    /// equally deep and holding has to score strictly better to be chosen.
    pub fn search_with_hold(
        &self,
        board: &Board,
        scoring: &ScoreTracker,
        current: Piece,
        held: Option<Piece>,
        next: &[Piece],
    ) -> Option<SearchResult> {
        if !self.config.hold {
            return self.search(board, scoring, current, next);
        }
        let (swap, swap_next) = match held {
            Some(piece) => (piece, next),
            None => match next.split_first() {
                Some((&first, rest)) => (first, rest),
                None => return self.search(board, scoring, current, next),
            },
        };

        let depth_limit = self.depth_limit(next.len().min(swap_next.len()));
        let stay = self.search_to(board, scoring, current, next, depth_limit);
        let swapped = self
            .search_to(board, scoring, swap, swap_next, depth_limit)
            .map(|r| SearchResult { hold: true, ..r });

        match (stay, swapped) {
            (Some(stay), Some(swapped)) => {
                let nodes = stay.nodes + swapped.nodes;
                let mut best = if swapped.score > stay.score {
                    debug!(held = %current, piece = %swap, "hold wins");
                    swapped
                } else {
                    stay
                };
                best.nodes = nodes;
                Some(best)
            }
            (stay, swapped) => stay.or(swapped),
        }
    }

    fn depth_limit(&self, lookahead: usize) -> usize {
        self.config.depth.max(1).min(1 + lookahead)
    }

    fn search_to(
        &self,
        board: &Board,
        scoring: &ScoreTracker,
        current: Piece,
        next: &[Piece],
        depth_limit: usize,
    ) -> Option<SearchResult> {
        let width = self.config.beam_width.max(1);

        let mut beam = vec![Node {
            board: board.clone(),
            scoring: *scoring,
            path: Path::new(),
            score: 0.0,
        }];
        let mut nodes = 0;

        for depth in 0..depth_limit {
            let piece = if depth == 0 { current } else { next[depth - 1] };
            let mut expanded = self.expand_beam(&beam, piece, depth > 0);
            nodes += expanded.len();

            if expanded.is_empty() {
                debug!(piece = %piece, "no placement for current piece");
                return None;
            }

            // stable: ties keep discovery order
            expanded.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));
            let mut seen = FxHashSet::default();
            expanded.retain(|node| seen.insert(node.key()));
            expanded.truncate(width);

            trace!(
                depth,
                piece = %piece,
                kept = expanded.len(),
                best = expanded[0].score,
                "beam level"
            );
            beam = expanded;
        }

        let best = beam.into_iter().next()?;
        let mv = *best.path.first()?;
        debug!(
            piece = %mv.piece,
            rotation = ?mv.rotation,
            x = mv.x,
            y = mv.y,
            spin = mv.rotated(),
            score = best.score,
            nodes,
            "planned"
        );
        Some(SearchResult {
            mv,
            score: best.score,
            path: best.path.to_vec(),
            nodes,
            hold: false,
        })
    }

    fn expand_beam(&self, beam: &[Node], piece: Piece, carry: bool) -> Vec<Node> {
        #[cfg(feature = "parallel")]
        {
            if self.config.parallel && beam.len() > 1 {
                // collect keeps input order, so the result matches the sequential path
                return beam
                    .par_iter()
                    .map(|node| self.expand(node, piece, carry))
                    .collect::<Vec<_>>()
                    .into_iter()
                    .flatten()
                    .collect();
            }
        }

        beam.iter()
            .flat_map(|node| self.expand(node, piece, carry))
            .collect()
    }

    /// Children of `node` for every placement of `piece`. A node with no
    /// placement survives unchanged when `carry` is set.
    fn expand(&self, node: &Node, piece: Piece, carry: bool) -> Vec<Node> {
        let moves = self.candidates(&node.board, piece);
        if moves.is_empty() {
            return if carry { vec![node.clone()] } else { Vec::new() };
        }

        moves
            .iter()
            .map(|mv| {
                let (board, result) = apply_move(&node.board, mv);
                let mut scoring = node.scoring;
                scoring.apply_score(result.lines_cleared, result.tspin);
                let ctx = EvalContext {
                    lines_cleared: result.lines_cleared,
                    tspin: result.tspin,
                    combo: scoring.combo,
                };
                let step = evaluate(&board, &ctx, &self.config.weights);

                let mut path = node.path.clone();
                path.push(*mv);
                Node {
                    board,
                    scoring,
                    path,
                    score: node.score + step,
                }
            })
            .collect()
    }

    fn candidates(&self, board: &Board, piece: Piece) -> MoveList {
        if self.config.spins {
            enumerate_with_spins(board, piece)
        } else {
            enumerate(board, piece)
        }
    }
}

impl Default for BeamSearch {
    fn default() -> Self {
        Self::new(PlannerConfig::default())
    }
}
