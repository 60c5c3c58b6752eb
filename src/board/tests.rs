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

#[test]
fn test_stone_opponent() {
    assert_eq!(Stone::Black.opponent(), Stone::White);
    assert_eq!(Stone::White.opponent(), Stone::Black);
    assert_eq!(Stone::Empty.opponent(), Stone::Empty);
}

#[test]
fn test_stone_from_str() {
    assert_eq!("black".parse::<Stone>(), Ok(Stone::Black));
    assert_eq!("W".parse::<Stone>(), Ok(Stone::White));
    assert!("red".parse::<Stone>().is_err());
}

#[test]
fn test_pos_from_str() {
    assert_eq!("5,6".parse::<Pos>(), Ok(Pos::new(5, 6)));
    assert_eq!(" 0 , 19 ".parse::<Pos>(), Ok(Pos::new(0, 19)));
    assert!("5".parse::<Pos>().is_err());
    assert!("5,x".parse::<Pos>().is_err());
    assert!("20,0".parse::<Pos>().is_err());
}

#[test]
fn test_pos_ordering() {
    let pos1 = Pos::new(0, 0);
    let pos2 = Pos::new(0, 1);
    let pos3 = Pos::new(1, 0);

    assert!(pos1 < pos2);
    assert!(pos2 < pos3);
    assert!(pos1 < pos3);
}

#[test]
fn test_pos_offset_respects_size() {
    let pos = Pos::new(4, 4);
    assert_eq!(pos.offset(0, 1, 1, 5), None);
    assert_eq!(pos.offset(0, 1, 1, 6), Some(Pos::new(4, 5)));
    assert_eq!(pos.offset(-1, -1, 4, 5), Some(Pos::new(0, 0)));
    assert_eq!(pos.offset(-1, -1, 5, 5), None);
}

#[test]
fn test_board_size_validation() {
    assert_eq!(Board::new(4), Err(BoardError::InvalidSize { size: 4 }));
    assert_eq!(Board::new(21), Err(BoardError::InvalidSize { size: 21 }));
    assert_eq!(Board::new(5).unwrap().size(), 5);
    assert_eq!(Board::new(20).unwrap().size(), 20);
    assert_eq!(Board::default().size(), DEFAULT_BOARD_SIZE);
}

#[test]
fn test_center() {
    assert_eq!(Board::new(15).unwrap().center(), Pos::new(7, 7));
    assert_eq!(Board::new(6).unwrap().center(), Pos::new(3, 3));
}

#[test]
fn test_place_and_get() {
    let mut board = Board::new(15).unwrap();
    let pos = Pos::new(7, 7);

    assert!(board.is_legal(pos));
    board.place(pos, Stone::Black).unwrap();
    assert_eq!(board.get(pos), Stone::Black);
    assert!(!board.is_legal(pos));
    assert_eq!(board.stone_count(), 1);
}

#[test]
fn test_place_rejections_leave_board_unchanged() {
    let mut board = board_with(5, &[(2, 2)], &[]);
    let before = board.clone();

    assert_eq!(
        board.place(Pos::new(2, 2), Stone::White),
        Err(BoardError::Occupied { pos: Pos::new(2, 2) })
    );
    assert_eq!(
        board.place(Pos::new(5, 0), Stone::White),
        Err(BoardError::OutOfBounds {
            pos: Pos::new(5, 0),
            size: 5
        })
    );
    assert_eq!(
        board.place(Pos::new(0, 0), Stone::Empty),
        Err(BoardError::EmptyStone)
    );
    assert!(!board.apply(Pos::new(2, 2), Stone::Black));
    assert_eq!(board, before);
}

#[test]
fn test_undo_restores_empty() {
    let mut board = Board::new(9).unwrap();
    let pos = Pos::new(3, 4);
    assert!(board.apply(pos, Stone::White));
    board.undo(pos);
    assert!(board.is_empty(pos));
    assert!(board.is_board_empty());
}

#[test]
fn test_scoped_move_removes_stone_on_drop() {
    let mut board = board_with(9, &[(4, 4)], &[]);
    let before = board.clone();
    {
        let guard = board.scoped(Pos::new(4, 5), Stone::White).unwrap();
        assert_eq!(guard.get(Pos::new(4, 5)), Stone::White);
        assert_eq!(guard.stone_count(), 2);
    }
    assert_eq!(board, before);

    assert!(board.scoped(Pos::new(4, 4), Stone::White).is_none());
    assert_eq!(board, before);
}

#[test]
fn test_nested_scoped_moves_unwind() {
    let mut board = Board::new(7).unwrap();
    {
        let mut outer = board.scoped(Pos::new(0, 0), Stone::Black).unwrap();
        {
            let inner = outer.scoped(Pos::new(1, 1), Stone::White).unwrap();
            assert_eq!(inner.stone_count(), 2);
        }
        assert_eq!(outer.stone_count(), 1);
    }
    assert!(board.is_board_empty());
}

#[test]
fn test_is_full() {
    let mut board = Board::new(5).unwrap();
    for (i, pos) in board.empty_cells().into_iter().enumerate() {
        assert!(!board.is_full());
        let stone = if i % 2 == 0 { Stone::Black } else { Stone::White };
        board.place(pos, stone).unwrap();
    }
    assert!(board.is_full());
    assert!(board.empty_cells().is_empty());
}

#[test]
fn test_empty_cells_row_major() {
    let board = board_with(5, &[(0, 1)], &[(0, 0)]);
    let cells = board.empty_cells();
    assert_eq!(cells.len(), 23);
    assert_eq!(cells[0], Pos::new(0, 2));
    assert_eq!(cells[22], Pos::new(4, 4));
    assert!(cells.windows(2).all(|w| w[0] < w[1]));
}

#[test]
fn test_winner_at_every_direction() {
    let lines: [&[(u8, u8)]; 4] = [
        &[(2, 1), (2, 2), (2, 3), (2, 4), (2, 5)],
        &[(1, 3), (2, 3), (3, 3), (4, 3), (5, 3)],
        &[(0, 0), (1, 1), (2, 2), (3, 3), (4, 4)],
        &[(0, 6), (1, 5), (2, 4), (3, 3), (4, 2)],
    ];
    for stones in lines {
        let board = board_with(9, stones, &[]);
        for &(r, c) in stones {
            assert!(board.winner_at(Pos::new(r, c), Stone::Black));
            assert!(!board.winner_at(Pos::new(r, c), Stone::White));
        }
        assert_eq!(board.winner(), Some(Stone::Black));
    }
}

#[test]
fn test_four_is_not_a_win() {
    let board = board_with(9, &[(4, 0), (4, 1), (4, 2), (4, 3)], &[(4, 4)]);
    assert!(!board.winner_at(Pos::new(4, 3), Stone::Black));
    assert_eq!(board.winner(), None);
}

#[test]
fn test_overline_counts_as_win() {
    let board = board_with(9, &[(0, 0), (0, 1), (0, 2), (0, 3), (0, 4), (0, 5)], &[]);
    assert!(board.winner_at(Pos::new(0, 5), Stone::Black));
}

#[test]
fn test_no_wrap_around_edges() {
    // (0,3),(0,4) and (1,0),(1,1),(1,2) are adjacent by index on a 5x5 board
    let board = board_with(5, &[(0, 3), (0, 4), (1, 0), (1, 1), (1, 2)], &[]);
    assert_eq!(board.winner(), None);
}

#[test]
fn test_winner_white() {
    let board = board_with(6, &[], &[(0, 5), (1, 5), (2, 5), (3, 5), (4, 5)]);
    assert_eq!(board.winner(), Some(Stone::White));
}

#[test]
fn test_winning_line_ordered() {
    let board = board_with(9, &[(1, 1), (2, 2), (3, 3), (4, 4), (5, 5)], &[(0, 0)]);
    let line = board.winning_line(Pos::new(3, 3)).unwrap();
    assert_eq!(
        line,
        vec![
            Pos::new(1, 1),
            Pos::new(2, 2),
            Pos::new(3, 3),
            Pos::new(4, 4),
            Pos::new(5, 5)
        ]
    );
    assert_eq!(board.winning_line(Pos::new(0, 0)), None);
}

#[test]
fn test_display_rendering() {
    let board = board_with(5, &[(0, 0)], &[(4, 4)]);
    let text = board.to_string();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 6);
    assert_eq!(lines[0].trim(), "0  1  2  3  4");
    assert_eq!(lines[1], " 0  X  .  .  .  . ");
    assert_eq!(lines[5], " 4  .  .  .  .  O ");
}
