use serde::Serialize;

use crate::board::Board;
use crate::direction::Direction;

/// Outcome of resolving one move. `score_gained` sums the resulting value of
/// every merge performed during the turn.
#[derive(Debug, Serialize, Clone, Copy, PartialEq, Eq)]
pub struct MoveOutcome {
    pub moved: bool,
    pub score_gained: u32,
}

/// Cells a pass must visit, nearest the target wall first. Tiles already
/// against the wall have nowhere to go and are skipped; they still take part
/// as merge targets.
fn scan_order(direction: Direction, size: usize) -> Vec<(usize, usize)> {
    let mut order = Vec::with_capacity(size * size.saturating_sub(1));
    match direction {
        Direction::Left => {
            for row in 0..size {
                for col in 1..size {
                    order.push((row, col));
                }
            }
        }
        Direction::Right => {
            for row in 0..size {
                for col in (0..size.saturating_sub(1)).rev() {
                    order.push((row, col));
                }
            }
        }
        Direction::Up => {
            for col in 0..size {
                for row in 1..size {
                    order.push((row, col));
                }
            }
        }
        Direction::Down => {
            for col in 0..size {
                for row in (0..size.saturating_sub(1)).rev() {
                    order.push((row, col));
                }
            }
        }
    }
    order
}

/// Resolves one move against the board. Each visited tile slides one cell at
/// a time toward the wall; an equal, not-yet-merged neighbor ends the walk
/// with a merge, anything else ends it in place. Visiting wall-side tiles
/// first keeps settled tiles settled and caps every tile at one merge per
/// turn. When nothing moved the board is untouched.
pub fn resolve(board: &mut Board, direction: Direction) -> MoveOutcome {
    let (d_row, d_col) = direction.offset();
    let size = board.size() as i32;
    let mut moved = false;
    let mut score_gained = 0;

    for (row, col) in scan_order(direction, board.size()) {
        let Some(id) = board.tile_at(row, col) else {
            continue;
        };
        let (mut row, mut col) = (row as i32, col as i32);
        loop {
            let (next_row, next_col) = (row + d_row, col + d_col);
            if next_row < 0 || next_col < 0 || next_row >= size || next_col >= size {
                break;
            }
            let (next_row_u, next_col_u) = (next_row as usize, next_col as usize);
            match board.tile_at(next_row_u, next_col_u) {
                None => {
                    if !board.move_tile(id, next_row_u, next_col_u) {
                        break;
                    }
                    moved = true;
                    row = next_row;
                    col = next_col;
                }
                Some(neighbor) => {
                    if let Some(merged) = board.merge_tiles(id, neighbor) {
                        moved = true;
                        if let Some(tile) = board.tile(merged) {
                            score_gained += tile.value();
                        }
                    }
                    break;
                }
            }
        }
    }

    MoveOutcome { moved, score_gained }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    fn board_from(values: &[Vec<u32>]) -> Board {
        let mut board = Board::new(values.len());
        board.restore(values);
        board
    }

    fn total(board: &Board) -> u32 {
        board.tiles().map(|tile| tile.value()).sum()
    }

    #[test]
    fn pair_merges_toward_the_wall() {
        let mut board = board_from(&[
            vec![2, 2, 0, 0],
            vec![0, 0, 0, 0],
            vec![0, 0, 0, 0],
            vec![0, 0, 0, 0],
        ]);
        let outcome = resolve(&mut board, Direction::Left);
        assert!(outcome.moved);
        assert_eq!(outcome.score_gained, 4);
        assert_eq!(board.snapshot()[0], vec![4, 0, 0, 0]);
    }

    #[test]
    fn triple_merges_only_the_wall_side_pair() {
        let mut board = board_from(&[
            vec![2, 2, 2, 0],
            vec![0, 0, 0, 0],
            vec![0, 0, 0, 0],
            vec![0, 0, 0, 0],
        ]);
        let outcome = resolve(&mut board, Direction::Left);
        assert_eq!(board.snapshot()[0], vec![4, 2, 0, 0]);
        assert_eq!(outcome.score_gained, 4);
    }

    #[test]
    fn four_equal_tiles_merge_pairwise() {
        let mut board = board_from(&[
            vec![2, 2, 2, 2],
            vec![0, 0, 0, 0],
            vec![0, 0, 0, 0],
            vec![0, 0, 0, 0],
        ]);
        let outcome = resolve(&mut board, Direction::Left);
        assert_eq!(board.snapshot()[0], vec![4, 4, 0, 0]);
        assert_eq!(outcome.score_gained, 8);
    }

    #[test]
    fn merge_result_is_not_a_target_again_this_turn() {
        let mut board = board_from(&[
            vec![2, 2, 4, 0],
            vec![0, 0, 0, 0],
            vec![0, 0, 0, 0],
            vec![0, 0, 0, 0],
        ]);
        let outcome = resolve(&mut board, Direction::Left);
        assert_eq!(board.snapshot()[0], vec![4, 4, 0, 0]);
        assert_eq!(outcome.score_gained, 4);
    }

    #[test]
    fn blocked_line_slides_without_merging() {
        let mut board = board_from(&[
            vec![4, 0, 0, 2],
            vec![0, 0, 0, 0],
            vec![0, 0, 0, 0],
            vec![0, 0, 0, 0],
        ]);
        let outcome = resolve(&mut board, Direction::Left);
        assert!(outcome.moved);
        assert_eq!(outcome.score_gained, 0);
        assert_eq!(board.snapshot()[0], vec![4, 2, 0, 0]);
    }

    #[test]
    fn every_direction_resolves_its_own_axis() {
        let start = vec![
            vec![2, 0, 0, 2],
            vec![0, 0, 0, 0],
            vec![0, 0, 0, 0],
            vec![2, 0, 0, 2],
        ];

        let mut board = board_from(&start);
        resolve(&mut board, Direction::Right);
        assert_eq!(board.snapshot()[0], vec![0, 0, 0, 4]);
        assert_eq!(board.snapshot()[3], vec![0, 0, 0, 4]);

        let mut board = board_from(&start);
        resolve(&mut board, Direction::Up);
        assert_eq!(board.snapshot()[0], vec![4, 0, 0, 4]);

        let mut board = board_from(&start);
        resolve(&mut board, Direction::Down);
        assert_eq!(board.snapshot()[3], vec![4, 0, 0, 4]);
    }

    #[test]
    fn packed_board_with_no_pairs_never_moves() {
        let start = vec![
            vec![2, 4, 2, 4],
            vec![4, 2, 4, 2],
            vec![2, 4, 2, 4],
            vec![4, 2, 4, 2],
        ];
        for direction in Direction::iter() {
            let mut board = board_from(&start);
            let outcome = resolve(&mut board, direction);
            assert!(!outcome.moved, "moved {direction}");
            assert_eq!(outcome.score_gained, 0);
            assert_eq!(board.snapshot(), start);
        }
    }

    #[test]
    fn merges_conserve_the_tile_value_sum() {
        let start = vec![
            vec![2, 2, 4, 4],
            vec![8, 8, 2, 0],
            vec![0, 2, 2, 2],
            vec![4, 0, 4, 8],
        ];
        for direction in Direction::iter() {
            let mut board = board_from(&start);
            let before = total(&board);
            resolve(&mut board, direction);
            assert_eq!(total(&board), before, "sum changed for {direction}");
        }
    }

    #[test]
    fn single_tile_line_slides_to_the_wall() {
        let mut board = board_from(&[
            vec![0, 0, 0, 0],
            vec![0, 0, 2, 0],
            vec![0, 0, 0, 0],
            vec![0, 0, 0, 0],
        ]);
        let outcome = resolve(&mut board, Direction::Down);
        assert!(outcome.moved);
        assert_eq!(board.snapshot()[3], vec![0, 0, 2, 0]);
    }

    #[test]
    fn mergeable_pair_separated_by_gap_still_merges() {
        let mut board = board_from(&[
            vec![2, 0, 0, 2],
            vec![0, 0, 0, 0],
            vec![0, 0, 0, 0],
            vec![0, 0, 0, 0],
        ]);
        let outcome = resolve(&mut board, Direction::Left);
        assert_eq!(board.snapshot()[0], vec![4, 0, 0, 0]);
        assert_eq!(outcome.score_gained, 4);
    }
}
