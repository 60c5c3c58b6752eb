//! Candidate move generation
//!
//! Branching is restricted to empty cells near existing stones. Candidates
//! are ordered by a cheap local urgency score so that alpha-beta sees the
//! sharpest replies first; ordering never changes the value of a node.

use crate::board::{Board, Pos, Stone, DIRECTIONS};

use super::threat::find_winning_cell;

/// Default Chebyshev radius around existing stones
pub const DEFAULT_RADIUS: usize = 1;

/// Generates and orders candidate moves
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveGenerator {
    radius: usize,
    forcing_shortcut: bool,
}

impl Default for MoveGenerator {
    fn default() -> Self {
        Self {
            radius: DEFAULT_RADIUS,
            forcing_shortcut: false,
        }
    }
}

impl MoveGenerator {
    pub fn new(radius: usize, forcing_shortcut: bool) -> Self {
        Self {
            radius,
            forcing_shortcut,
        }
    }

    /// Candidate moves for `side`, deduplicated and ordered.
    ///
    /// - empty board: the center only
    /// - otherwise every empty cell within `radius` of a stone
    /// - nothing near any stone: every empty cell
    ///
    /// With the forcing shortcut on, a cell that wins for `side` (or else one
    /// that blocks the opponent's five) becomes the only candidate.
    pub fn candidates(&self, board: &Board, side: Stone) -> Vec<Pos> {
        if board.is_board_empty() {
            return vec![board.center()];
        }

        if self.forcing_shortcut {
            if let Some(pos) = find_winning_cell(board, side)
                .or_else(|| find_winning_cell(board, side.opponent()))
            {
                return vec![pos];
            }
        }

        let mut moves = self.neighbourhood(board);
        if moves.is_empty() {
            moves = board.empty_cells();
        }

        // Stable sort keeps row-major order among equal urgencies
        let mut scored: Vec<(i32, Pos)> = moves
            .into_iter()
            .map(|pos| (urgency(board, pos, side), pos))
            .collect();
        scored.sort_by(|a, b| b.0.cmp(&a.0));
        scored.into_iter().map(|(_, pos)| pos).collect()
    }

    /// Empty cells within `radius` of any stone, row-major
    fn neighbourhood(&self, board: &Board) -> Vec<Pos> {
        let size = board.size();
        let radius = self.radius as i32;
        let mut seen = vec![false; size * size];

        for pos in board.positions(Stone::Black).chain(board.positions(Stone::White)) {
            for dr in -radius..=radius {
                for dc in -radius..=radius {
                    let r = i32::from(pos.row) + dr;
                    let c = i32::from(pos.col) + dc;
                    if Pos::is_valid(r, c, size) {
                        #[allow(clippy::cast_sign_loss)]
                        let idx = r as usize * size + c as usize;
                        seen[idx] = true;
                    }
                }
            }
        }

        seen.iter()
            .enumerate()
            .filter(|&(_, &near)| near)
            .map(|(idx, _)| Pos::new((idx / size) as u8, (idx % size) as u8))
            .filter(|&pos| board.is_empty(pos))
            .collect()
    }
}

/// Local urgency of playing `pos` for `side`.
///
/// Stones in the 8-neighbourhood plus, per axis, the squared length of the
/// line either side would extend through `pos`. Own lines win ties.
fn urgency(board: &Board, pos: Pos, side: Stone) -> i32 {
    let size = board.size();
    let mut neighbours = 0;
    for dr in -1..=1 {
        for dc in -1..=1 {
            if (dr, dc) == (0, 0) {
                continue;
            }
            if pos
                .offset(dr, dc, 1, size)
                .map_or(false, |p| !board.is_empty(p))
            {
                neighbours += 1;
            }
        }
    }

    let mut lines = 0;
    for &(dr, dc) in &DIRECTIONS {
        let own = board.line_length(pos, dr, dc, side) as i32 - 1;
        let opp = board.line_length(pos, dr, dc, side.opponent()) as i32 - 1;
        lines += 3 * own * own + 2 * opp * opp;
    }
    neighbours + lines
}

/// Candidates with the default radius and no forcing shortcut
pub fn candidates(board: &Board, side: Stone) -> Vec<Pos> {
    MoveGenerator::default().candidates(board, side)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board_with(size: usize, black: &[(u8, u8)], white: &[(u8, u8)]) -> Board {
        let mut board = Board::new(size).unwrap();
        for &(r, c) in black {
            board.place(Pos::new(r, c), Stone::Black).unwrap();
        }
        for &(r, c) in white {
            board.place(Pos::new(r, c), Stone::White).unwrap();
        }
        board
    }

    fn sorted(mut moves: Vec<Pos>) -> Vec<Pos> {
        moves.sort();
        moves
    }

    #[test]
    fn test_empty_board_center() {
        assert_eq!(candidates(&Board::new(15).unwrap(), Stone::Black), vec![Pos::new(7, 7)]);
        assert_eq!(candidates(&Board::new(6).unwrap(), Stone::White), vec![Pos::new(3, 3)]);
    }

    #[test]
    fn test_radius_one_ring() {
        let board = board_with(9, &[(4, 4)], &[]);
        let moves = candidates(&board, Stone::White);
        assert_eq!(moves.len(), 8);
        for pos in &moves {
            assert!((i32::from(pos.row) - 4).abs() <= 1);
            assert!((i32::from(pos.col) - 4).abs() <= 1);
            assert!(board.is_empty(*pos));
        }
    }

    #[test]
    fn test_radius_two_and_corner_clipping() {
        let board = board_with(9, &[(0, 0)], &[]);
        let moves = MoveGenerator::new(2, false).candidates(&board, Stone::White);
        assert_eq!(moves.len(), 8);

        let board = board_with(9, &[(4, 4)], &[]);
        let moves = MoveGenerator::new(2, false).candidates(&board, Stone::White);
        assert_eq!(moves.len(), 24);
    }

    #[test]
    fn test_no_duplicates_for_overlapping_rings() {
        let board = board_with(9, &[(4, 4)], &[(4, 5)]);
        let moves = candidates(&board, Stone::Black);
        let unique = sorted(moves.clone());
        let mut deduped = unique.clone();
        deduped.dedup();
        assert_eq!(unique, deduped);
        assert_eq!(moves.len(), 10);
    }

    #[test]
    fn test_fallback_to_all_empty_cells() {
        // Radius zero never reaches an empty cell
        let board = board_with(5, &[(2, 2)], &[]);
        let moves = MoveGenerator::new(0, false).candidates(&board, Stone::White);
        assert_eq!(sorted(moves), board.empty_cells());
    }

    #[test]
    fn test_ordering_prefers_extending_lines() {
        let board = board_with(15, &[(7, 5), (7, 6), (7, 7)], &[(6, 6)]);
        let moves = candidates(&board, Stone::Black);
        assert!(moves[..2].contains(&Pos::new(7, 4)));
        assert!(moves[..2].contains(&Pos::new(7, 8)));
    }

    #[test]
    fn test_ordering_is_deterministic() {
        let board = board_with(9, &[(4, 4), (2, 2)], &[(3, 3)]);
        assert_eq!(candidates(&board, Stone::White), candidates(&board, Stone::White));
    }

    #[test]
    fn test_forcing_shortcut() {
        let board = board_with(9, &[(1, 1), (1, 2), (1, 3), (1, 4)], &[(5, 5)]);
        let gen = MoveGenerator::new(1, true);
        // Win for Black
        assert_eq!(gen.candidates(&board, Stone::Black), vec![Pos::new(1, 0)]);
        // Block for White
        assert_eq!(gen.candidates(&board, Stone::White), vec![Pos::new(1, 0)]);
        // Off by default
        assert!(candidates(&board, Stone::Black).len() > 1);
    }
}
