//! Tactical scanner: forced replies found before any tree search
//!
//! Three scans in priority order:
//! 1. a cell that completes five for the mover (win now)
//! 2. a cell that would complete five for the opponent (block the loss)
//! 3. a cell that stops an opponent three from growing into an open four
//!
//! Scans 1 and 2 walk the empty cells in row-major order and return the
//! first hit. Scan 3 collects every candidate and picks one at random.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::board::{Board, Pos, Stone, DIRECTIONS, WIN_LENGTH};

/// Reason a forcing move was chosen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ForcingKind {
    /// Completes five for the mover
    Win,
    /// Occupies the cell where the opponent would complete five
    Block,
    /// Caps an opponent three before it becomes an open four
    OpenFourBlock,
}

impl std::fmt::Display for ForcingKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            ForcingKind::Win => "win",
            ForcingKind::Block => "block",
            ForcingKind::OpenFourBlock => "open-four block",
        };
        f.write_str(s)
    }
}

/// A forcing move and why it was chosen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Forcing {
    pub pos: Pos,
    pub kind: ForcingKind,
}

/// Would a stone of `side` on the empty cell `pos` make five in a row?
///
/// The line through an empty cell already counts the cell itself, so no
/// stone has to be placed to answer this.
#[inline]
pub fn completes_five(board: &Board, pos: Pos, side: Stone) -> bool {
    board.is_legal(pos)
        && DIRECTIONS
            .iter()
            .any(|&(dr, dc)| board.line_length(pos, dr, dc, side) >= WIN_LENGTH)
}

/// First empty cell (row-major) where `side` completes five.
pub fn find_winning_cell(board: &Board, side: Stone) -> Option<Pos> {
    board
        .empty_cells()
        .into_iter()
        .find(|&pos| completes_five(board, pos, side))
}

/// Cells that block an opponent three from becoming an open four.
///
/// From every empty cell, each of the four axes is inspected over the next
/// four cells. When they hold exactly three `threat` stones and one empty
/// cell (no `mover` stone, not running off the board), that empty cell is a
/// blocking candidate. Result is deduplicated and row-major sorted.
pub fn open_four_blocks(board: &Board, mover: Stone) -> Vec<Pos> {
    let threat = mover.opponent();
    let size = board.size();
    let mut blocks = Vec::new();

    for origin in board.empty_cells() {
        'dirs: for &(dr, dc) in &DIRECTIONS {
            let mut count = 0;
            let mut gap = None;
            for step in 1..=4 {
                let Some(p) = origin.offset(dr, dc, step, size) else {
                    continue 'dirs;
                };
                match board.get(p) {
                    s if s == threat => count += 1,
                    Stone::Empty if gap.is_none() => gap = Some(p),
                    _ => continue 'dirs,
                }
            }
            if let (3, Some(p)) = (count, gap) {
                blocks.push(p);
            }
        }
    }

    blocks.sort_unstable();
    blocks.dedup();
    blocks
}

/// Run the three tactical scans for `mover`.
pub fn find_forcing_move<R: Rng + ?Sized>(
    board: &Board,
    mover: Stone,
    rng: &mut R,
) -> Option<Forcing> {
    if let Some(pos) = find_winning_cell(board, mover) {
        return Some(Forcing {
            pos,
            kind: ForcingKind::Win,
        });
    }
    if let Some(pos) = find_winning_cell(board, mover.opponent()) {
        return Some(Forcing {
            pos,
            kind: ForcingKind::Block,
        });
    }
    open_four_blocks(board, mover)
        .choose(rng)
        .map(|&pos| Forcing {
            pos,
            kind: ForcingKind::OpenFourBlock,
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

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

    #[test]
    fn test_completes_five() {
        let board = board_with(9, &[(2, 1), (2, 2), (2, 4), (2, 5)], &[]);
        assert!(completes_five(&board, Pos::new(2, 3), Stone::Black));
        assert!(!completes_five(&board, Pos::new(2, 3), Stone::White));
        assert!(!completes_five(&board, Pos::new(2, 6), Stone::Black));
        // Occupied cells never complete anything
        assert!(!completes_five(&board, Pos::new(2, 2), Stone::Black));
    }

    #[test]
    fn test_win_now_first_in_row_major_order() {
        let board = board_with(15, &[(5, 5), (5, 6), (5, 7), (5, 8)], &[(0, 0)]);
        let mut rng = StdRng::seed_from_u64(1);
        let forcing = find_forcing_move(&board, Stone::Black, &mut rng).unwrap();
        assert_eq!(forcing.kind, ForcingKind::Win);
        assert_eq!(forcing.pos, Pos::new(5, 4));
    }

    #[test]
    fn test_win_preferred_over_block() {
        let board = board_with(
            15,
            &[(1, 1), (1, 2), (1, 3), (1, 4)],
            &[(10, 1), (10, 2), (10, 3), (10, 4)],
        );
        let mut rng = StdRng::seed_from_u64(2);
        let forcing = find_forcing_move(&board, Stone::White, &mut rng).unwrap();
        assert_eq!(forcing.kind, ForcingKind::Win);
        assert_eq!(forcing.pos.row, 10);
    }

    #[test]
    fn test_block_loss() {
        // White four on the anti-diagonal, its upper end runs off the board
        let board = board_with(9, &[(8, 8)], &[(0, 8), (1, 7), (2, 6), (3, 5)]);
        let mut rng = StdRng::seed_from_u64(3);
        let forcing = find_forcing_move(&board, Stone::Black, &mut rng).unwrap();
        assert_eq!(
            forcing,
            Forcing {
                pos: Pos::new(4, 4),
                kind: ForcingKind::Block,
            }
        );
    }

    #[test]
    fn test_open_three_blocked_at_either_end() {
        let board = board_with(15, &[], &[(3, 3), (4, 4), (5, 5)]);
        assert_eq!(
            open_four_blocks(&board, Stone::Black),
            vec![Pos::new(2, 2), Pos::new(6, 6)]
        );

        for seed in 0..20 {
            let mut rng = StdRng::seed_from_u64(seed);
            let forcing = find_forcing_move(&board, Stone::Black, &mut rng).unwrap();
            assert_eq!(forcing.kind, ForcingKind::OpenFourBlock);
            assert!([Pos::new(2, 2), Pos::new(6, 6)].contains(&forcing.pos));
        }
    }

    #[test]
    fn test_split_three_blocks_gap() {
        // O O _ O seen from the empty cell before it
        let board = board_with(9, &[], &[(4, 1), (4, 2), (4, 4)]);
        let blocks = open_four_blocks(&board, Stone::Black);
        assert!(blocks.contains(&Pos::new(4, 3)));
    }

    #[test]
    fn test_mover_stone_or_edge_disqualifies() {
        // Capped by the mover's own stone
        let board = board_with(9, &[(4, 4)], &[(4, 1), (4, 2), (4, 3)]);
        assert!(!open_four_blocks(&board, Stone::Black)
            .iter()
            .any(|p| p.row == 4));

        // Window running off the board
        let board = board_with(5, &[], &[(0, 1), (0, 2), (0, 3)]);
        assert_eq!(open_four_blocks(&board, Stone::Black), vec![Pos::new(0, 4)]);
    }

    #[test]
    fn test_quiet_board_has_no_forcing_move() {
        let board = board_with(9, &[(4, 4)], &[(4, 5)]);
        let mut rng = StdRng::seed_from_u64(4);
        assert_eq!(find_forcing_move(&board, Stone::Black, &mut rng), None);
        assert_eq!(find_forcing_move(&Board::new(9).unwrap(), Stone::White, &mut rng), None);
    }
}
