//! Seeded random games checking board invariants after every move.

use catalog_chess::evaluation::constant;
use catalog_chess::{Board, BoardConfig, Color, PieceKind, Square};
use rand::prelude::*;

const GAMES: u64 = 24;
const PLIES: usize = 80;

fn checked_board() -> Board {
    Board::new().with_config(BoardConfig {
        check_consistency: true,
        ..BoardConfig::default()
    })
}

fn assert_cells_hold_their_own_records(board: &Board) {
    for square in Square::all() {
        if let Some(piece) = board.get_piece(square).unwrap() {
            assert_eq!(piece.square(), square);
        }
    }
    assert!(board.is_consistent());
}

#[test]
fn pseudo_legal_playouts_preserve_invariants() {
    for seed in 0..GAMES {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut board = checked_board();
        let mut color = Color::White;

        for _ in 0..PLIES {
            let rights_before: Vec<bool> = Color::ALL
                .iter()
                .flat_map(|&c| [board.queen_side_castle(c), board.king_side_castle(c)])
                .collect();

            let mut moves: Vec<_> = board.enumerate_moves(color, constant).collect();
            moves.extend(board.castling_moves(color));
            let Some((mv, expected)) = moves.choose(&mut rng).cloned() else {
                break;
            };

            board.make_move(&mv).unwrap();
            assert_eq!(board.to_json().unwrap(), expected.to_json().unwrap());

            assert_cells_hold_their_own_records(&board);
            assert_eq!(
                board.compute_score(Color::White),
                -board.compute_score(Color::Black)
            );

            let rights_after: Vec<bool> = Color::ALL
                .iter()
                .flat_map(|&c| [board.queen_side_castle(c), board.king_side_castle(c)])
                .collect();
            for (before, after) in rights_before.iter().zip(&rights_after) {
                assert!(*before || !*after, "castling right re-set (seed {seed})");
            }

            if let Some(target) = board.en_passant() {
                assert_eq!(target.kind(), PieceKind::Pawn);
                assert_eq!(target.color(), color);
                assert_eq!(target.square(), mv.destination);
            }

            color = color.opponent();
        }
    }
}

#[test]
fn legal_playouts_never_leave_the_mover_in_check() {
    for seed in 100..100 + GAMES / 2 {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut board = checked_board();
        let mut color = Color::White;

        for _ in 0..PLIES {
            let moves = board.legal_moves(color);
            let Some((mv, _)) = moves.choose(&mut rng) else {
                break;
            };
            board.make_move(mv).unwrap();
            assert!(!board.in_check(color), "{mv} left {color} in check (seed {seed})");
            assert!(board.king(color).is_some());
            color = color.opponent();
        }
    }
}

#[test]
fn copies_do_not_observe_later_moves() {
    let mut rng = StdRng::seed_from_u64(7);
    let mut board = Board::new();
    let mut snapshots = Vec::new();
    let mut color = Color::White;

    for _ in 0..30 {
        snapshots.push((board.copy(), board.to_json().unwrap()));
        let moves = board.legal_moves(color);
        let Some((mv, _)) = moves.choose(&mut rng) else {
            break;
        };
        board.make_move(mv).unwrap();
        color = color.opponent();
    }

    for (copy, json) in snapshots {
        assert_eq!(copy.to_json().unwrap(), json);
    }
}
