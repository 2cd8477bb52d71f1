//! Board tests - grid queries, row detection and compaction

use blockfall::core::Board;
use blockfall::types::{Color, BOARD_HEIGHT, BOARD_WIDTH};

#[test]
fn test_board_new_empty() {
    let board = Board::new();
    assert_eq!(board.width(), BOARD_WIDTH);
    assert_eq!(board.height(), BOARD_HEIGHT);

    for y in 0..BOARD_HEIGHT as i8 {
        for x in 0..BOARD_WIDTH as i8 {
            assert_eq!(board.get(x, y), Some(None), "cell ({x}, {y})");
            assert!(board.is_free(x, y));
        }
    }
}

#[test]
fn test_board_get_out_of_bounds() {
    let board = Board::new();
    assert_eq!(board.get(-1, 0), None);
    assert_eq!(board.get(0, -1), None);
    assert_eq!(board.get(BOARD_WIDTH as i8, 0), None);
    assert_eq!(board.get(0, BOARD_HEIGHT as i8), None);
    assert!(!board.is_free(-1, 5));
}

#[test]
#[should_panic(expected = "outside")]
fn test_occupied_query_out_of_range_panics() {
    Board::new().is_occupied(10, 0);
}

#[test]
fn test_place_marks_cells() {
    let mut board = Board::new();
    board.place(&[(0, 19), (1, 19), (9, 0)], Color::Blue);
    assert_eq!(board.get(0, 19), Some(Some(Color::Blue)));
    assert!(board.is_occupied(9, 0));
    assert_eq!(board.occupied_count(), 3);
}

#[test]
fn test_filled_rows_only_reports_candidates() {
    let board = Board::from_rows(
        &["##########", "#########.", "##########"],
        Color::Cyan,
    );
    assert_eq!(board.filled_rows([19, 18, 17]).as_slice(), &[17, 19]);
    assert_eq!(board.filled_rows([19]).as_slice(), &[19]);
    assert!(board.filled_rows([18, 5]).is_empty());
    // Duplicate candidates are reported once
    assert_eq!(board.filled_rows([19, 19]).as_slice(), &[19]);
}

#[test]
fn test_clear_and_compact_settles_surviving_rows() {
    let mut board = Board::from_rows(
        &["#.........", "##########", ".#........", "##########"],
        Color::Red,
    );
    let rows = board.filled_rows(16..20);
    assert_eq!(rows.as_slice(), &[17, 19]);

    board.clear_and_compact(&rows);
    let expected = Board::from_rows(&["#.........", ".#........"], Color::Red);
    assert_eq!(board, expected);
}

#[test]
fn test_clear_four_rows() {
    let mut board = Board::from_rows(
        &[
            "...#......",
            "##########",
            "##########",
            "##########",
            "##########",
        ],
        Color::Green,
    );
    let rows = board.filled_rows(15..20);
    assert_eq!(rows.len(), 4);
    board.clear_and_compact(&rows);
    assert_eq!(board.occupied_count(), 1);
    assert!(board.is_occupied(3, 19));
}

#[test]
fn test_rows_iterate_top_to_bottom() {
    let board = Board::from_rows(&["#........."], Color::Yellow);
    let rows: Vec<_> = board.rows().collect();
    assert_eq!(rows.len(), BOARD_HEIGHT as usize);
    assert_eq!(rows[19][0], Some(Color::Yellow));
    assert!(rows[0].iter().all(|c| c.is_none()));
}
