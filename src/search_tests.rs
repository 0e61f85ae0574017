//! Cross-engine checks over the whole game tree.

use crate::core::{Board, GameResult, Marker, Move};
use crate::player::ai::eval::{DRAW, LOSS, WIN};
use crate::player::{AlphaBetaAI, DefaultOpponent, MinimaxAI, PlayerController};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::collections::HashSet;

/// Every position reachable from the empty board with X moving first.
fn reachable_positions() -> HashSet<Board> {
    fn walk(board: &mut Board, to_move: Marker, seen: &mut HashSet<Board>) {
        if !seen.insert(*board) || board.result().is_terminal() {
            return;
        }
        for mv in board.available_moves() {
            let mut placed = board.place_scoped(to_move, mv);
            walk(&mut placed, to_move.opponent(), seen);
        }
    }

    let mut seen = HashSet::new();
    walk(&mut Board::new(), Marker::X, &mut seen);
    seen
}

/// Plays `board` to the end, `x` and `o` choosing for their markers.
fn play_out(
    mut board: Board,
    x: &dyn PlayerController,
    o: &dyn PlayerController,
) -> (GameResult, Vec<Move>) {
    let mut line = Vec::new();
    while !board.result().is_terminal() {
        let side = board.side_to_move();
        let player = if side == Marker::X { x } else { o };
        let mv = player
            .choose_move(&mut board)
            .expect("automated players always answer");
        assert!(board.make_move(side, mv.row, mv.col), "illegal move {}", mv);
        line.push(mv);
    }
    (board.result(), line)
}

fn score_for(result: GameResult, hero: Marker) -> i32 {
    match result {
        GameResult::Win(m) if m == hero => WIN,
        GameResult::Win(_) => LOSS,
        _ => DRAW,
    }
}

#[test]
fn test_reachable_position_counts() {
    let positions = reachable_positions();
    assert_eq!(positions.len(), 5478);

    let terminal = positions
        .iter()
        .filter(|b| b.result().is_terminal())
        .count();
    let draws = positions.iter().filter(|b| b.check_draw()).count();
    assert_eq!(terminal, 958);
    assert_eq!(draws, 16);
}

#[test]
fn test_win_and_draw_partition_terminal_boards() {
    for board in reachable_positions() {
        let won = board.check_win().is_some();
        let drawn = board.check_draw();
        assert!(!(won && drawn), "both win and draw:\n{}", board);
        if board.available_moves().is_empty() {
            assert!(won || drawn, "full board neither won nor drawn:\n{}", board);
        }
        assert_eq!(board.result().is_terminal(), won || drawn);
    }
}

#[test]
fn test_alpha_beta_matches_minimax_everywhere() {
    for board in reachable_positions() {
        if board.result().is_terminal() {
            continue;
        }
        let side = board.side_to_move();
        let mm = MinimaxAI::new(side, "MM");
        let ab = AlphaBetaAI::new(side, "AB");

        let mut scratch = board;
        let (mm_move, mm_score) = mm.search(&mut scratch);
        assert_eq!(scratch, board, "minimax leaked a move");
        let (ab_move, ab_score) = ab.search(&mut scratch);
        assert_eq!(scratch, board, "alpha-beta leaked a move");

        assert_eq!(mm_move, ab_move, "engines disagree on\n{}", board);
        assert_eq!(mm_score, ab_score, "scores differ on\n{}", board);
        assert!(ab.last_nodes() <= mm.last_nodes());
    }
}

#[test]
fn test_self_play_reaches_the_searched_value() {
    // 初手・二手目までの全局面から最後まで指す
    let mut starts = vec![Board::new()];
    for first in Board::new().available_moves() {
        let mut one = Board::new();
        one.make_move(Marker::X, first.row, first.col);
        starts.push(one);
        for second in one.available_moves() {
            let mut two = one;
            two.make_move(Marker::O, second.row, second.col);
            starts.push(two);
        }
    }

    let ab_x = AlphaBetaAI::new(Marker::X, "AB-X");
    let ab_o = AlphaBetaAI::new(Marker::O, "AB-O");
    let mm_x = MinimaxAI::new(Marker::X, "MM-X");
    let mm_o = MinimaxAI::new(Marker::O, "MM-O");

    for board in starts {
        let side = board.side_to_move();
        let mut scratch = board;
        let (_, value) = AlphaBetaAI::new(side, "AB").search(&mut scratch);

        let (ab_result, ab_line) = play_out(board, &ab_x, &ab_o);
        let (mm_result, mm_line) = play_out(board, &mm_x, &mm_o);
        assert_eq!(ab_line, mm_line);
        assert_eq!(ab_result, mm_result);
        assert_eq!(score_for(ab_result, side), value);
    }
}

#[test]
fn test_optimal_vs_optimal_from_empty_board_draws() {
    let x = MinimaxAI::new(Marker::X, "MM-X");
    let o = AlphaBetaAI::new(Marker::O, "AB-O");
    let (result, line) = play_out(Board::new(), &x, &o);
    assert_eq!(result, GameResult::Draw);
    assert_eq!(line.len(), 9);
}

/// Walks every opponent reply while `hero` answers with alpha-beta, and
/// fails on any line the opponent wins.
fn assert_never_loses(board: &mut Board, to_move: Marker, hero: &AlphaBetaAI) {
    if let Some(winner) = board.check_win() {
        assert_eq!(winner, hero.marker(), "lost on\n{}", board);
        return;
    }
    if board.check_draw() {
        return;
    }
    if to_move == hero.marker() {
        let (mv, _) = hero.search(board);
        let mut placed = board.place_scoped(to_move, mv);
        assert_never_loses(&mut placed, to_move.opponent(), hero);
    } else {
        for mv in board.available_moves() {
            let mut placed = board.place_scoped(to_move, mv);
            assert_never_loses(&mut placed, to_move.opponent(), hero);
        }
    }
}

#[test]
fn test_alpha_beta_never_loses_to_any_opponent() {
    for marker in [Marker::X, Marker::O] {
        let hero = AlphaBetaAI::new(marker, "AB");
        assert_never_loses(&mut Board::new(), Marker::X, &hero);
    }
}

#[test]
fn test_minimax_never_loses_to_default() {
    for seed in 0..6 {
        for marker in [Marker::X, Marker::O] {
            let ai = MinimaxAI::new(marker, "MM");
            let default =
                DefaultOpponent::new(marker.opponent(), "Default", StdRng::seed_from_u64(seed));
            let ai: &dyn PlayerController = &ai;
            let default: &dyn PlayerController = &default;
            let (x, o) = if marker == Marker::X {
                (ai, default)
            } else {
                (default, ai)
            };
            let (result, _) = play_out(Board::new(), x, o);
            assert_ne!(result, GameResult::Win(marker.opponent()), "seed {}", seed);
        }
    }
}

#[test]
fn test_converts_forced_win() {
    // X: (0,0),(1,1) / O: (1,2),(2,1)、X の手番
    let board = Board::from_rows(&["X..", ".XO", ".O."]);
    assert_eq!(board.side_to_move(), Marker::X);

    let mm = MinimaxAI::new(Marker::X, "MM");
    let mut scratch = board;
    let (mv, score) = mm.search(&mut scratch);
    assert_eq!(score, WIN);
    assert_eq!(AlphaBetaAI::new(Marker::X, "AB").search(&mut scratch), (mv, score));

    // 最善の O に対しても、既定の相手に対しても勝ち切る
    let best_o = AlphaBetaAI::new(Marker::O, "AB-O");
    let (result, _) = play_out(board, &mm, &best_o);
    assert_eq!(result, GameResult::Win(Marker::X));

    for seed in 0..10 {
        let default = DefaultOpponent::new(Marker::O, "Default", StdRng::seed_from_u64(seed));
        let ab = AlphaBetaAI::new(Marker::X, "AB");
        let (result, _) = play_out(board, &ab, &default);
        assert_eq!(result, GameResult::Win(Marker::X));
    }
}

#[test]
fn test_default_blocks_then_engines_agree() {
    let original = Board::from_rows(&["XX.", "O..", "..."]);
    let mut board = original;
    let default = DefaultOpponent::new(Marker::O, "Default", StdRng::seed_from_u64(3));
    assert_eq!(default.choose_move(&mut board), Some(Move::new(0, 2)));

    // 最善手もブロック
    let ab = AlphaBetaAI::new(Marker::O, "AB");
    assert_eq!(ab.choose_move(&mut board), Some(Move::new(0, 2)));
    assert_eq!(board, original);
}
