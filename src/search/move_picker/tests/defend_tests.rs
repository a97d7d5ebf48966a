//! Threat-defense stages: five, open four, combined four-three.

use std::collections::HashSet;

use super::drain;
use crate::board::Board;
use crate::movegen::{self, GenType, MoveBuffer};
use crate::search::history::{CounterMoveHistory, MainHistory};
use crate::search::move_picker::MovePicker;
use crate::types::{Color, Pattern4, Pos, Rule};

/// White four on row 7, blocked on the left; (11,7) is the only defense.
fn board_with_white_five_threat() -> Board {
    let mut board = Board::new(15, Rule::Freestyle);
    board.put_stone(Pos::new(6, 7), Color::Black);
    for x in 7..11 {
        board.put_stone(Pos::new(x, 7), Color::White);
    }
    board.set_side_to_move(Color::Black);
    board
}

/// White open three on row 7 plus a black diagonal three for VCF counters.
fn board_with_white_open_three() -> Board {
    let mut board = Board::new(15, Rule::Freestyle);
    for x in 7..10 {
        board.put_stone(Pos::new(x, 7), Color::White);
    }
    for d in 0..3 {
        board.put_stone(Pos::new(2 + d, 2 + d), Color::Black);
    }
    board.set_side_to_move(Color::Black);
    board
}

#[test]
fn test_defend_five_with_valid_tt_yields_only_tt() {
    let board = board_with_white_five_threat();
    let main_history = MainHistory::new();
    let counter_moves = CounterMoveHistory::new();
    let defense = Pos::new(11, 7);

    assert_eq!(board.cell(defense).pattern4(Color::White), Pattern4::AFive);

    let mut picker = MovePicker::new_main(
        Rule::Freestyle,
        &board,
        defense,
        &main_history,
        &counter_moves,
        &[],
    );

    // the TT move is the defense; generation is skipped afterwards
    assert_eq!(picker.next(), Some(defense));
    assert_eq!(picker.next(), None);
}

#[test]
fn test_defend_five_with_invalid_tt_generates_defense() {
    let board = board_with_white_five_threat();
    let main_history = MainHistory::new();
    let counter_moves = CounterMoveHistory::new();

    // a quiet cell does not satisfy the five-defense predicate
    let mut picker = MovePicker::new_main(
        Rule::Freestyle,
        &board,
        Pos::new(0, 0),
        &main_history,
        &counter_moves,
        &[],
    );

    assert_eq!(picker.tt_move(), Pos::NONE);
    assert_eq!(drain(&mut picker), vec![Pos::new(11, 7)]);
}

#[test]
fn test_defend_four_streams_defense_and_vcf_only() {
    let board = board_with_white_open_three();
    let main_history = MainHistory::new();
    let counter_moves = CounterMoveHistory::new();

    // closed-four defense point satisfies the TT predicate
    let tt = Pos::new(5, 7);
    assert!(board.cell(tt).pattern4(Color::White) >= Pattern4::EBlock4);

    let mut picker =
        MovePicker::new_main(Rule::Freestyle, &board, tt, &main_history, &counter_moves, &[]);

    assert_eq!(picker.next(), Some(tt));

    let mut expected = MoveBuffer::new();
    movegen::generate(&board, GenType::DefendFour, &mut expected);
    movegen::generate(&board, GenType::Vcf, &mut expected);
    let expected: HashSet<Pos> = expected.as_slice().iter().map(|m| m.pos).collect();

    let rest = drain(&mut picker);
    assert!(!rest.is_empty());
    for pos in &rest {
        assert!(expected.contains(pos), "{pos} is outside the defense/VCF set");
    }
    let yielded: HashSet<Pos> = rest.iter().copied().collect();
    assert_eq!(yielded.len(), rest.len(), "no duplicates");
    // everything but the TT move is streamed
    assert_eq!(yielded.len(), expected.len() - 1);
}

#[test]
fn test_defend_four_rejects_quiet_tt() {
    let board = board_with_white_open_three();
    let main_history = MainHistory::new();
    let counter_moves = CounterMoveHistory::new();

    let mut picker = MovePicker::new_main(
        Rule::Freestyle,
        &board,
        Pos::new(14, 14),
        &main_history,
        &counter_moves,
        &[],
    );
    assert_eq!(picker.tt_move(), Pos::NONE);

    let first = picker.next().expect("defense moves exist");
    assert_ne!(first, Pos::new(14, 14));
}

#[test]
fn test_defend_b4f3_streams_the_combined_threat_cell() {
    let mut board = Board::new(15, Rule::Freestyle);
    // white closed three on row 7 -> (10,7) makes a closed four
    board.put_stone(Pos::new(6, 7), Color::Black);
    for x in 7..10 {
        board.put_stone(Pos::new(x, 7), Color::White);
    }
    // white open two in column 10 -> (10,7) also makes an open three
    board.put_stone(Pos::new(10, 5), Color::White);
    board.put_stone(Pos::new(10, 6), Color::White);
    board.set_side_to_move(Color::Black);

    let threat = Pos::new(10, 7);
    assert_eq!(board.cell(threat).pattern4(Color::White), Pattern4::CBlock4Flex3);
    assert_eq!(board.p4_count(Color::White, Pattern4::AFive), 0);
    assert_eq!(board.p4_count(Color::White, Pattern4::BFlex4), 0);

    let main_history = MainHistory::new();
    let counter_moves = CounterMoveHistory::new();
    let mut picker = MovePicker::new_main(
        Rule::Freestyle,
        &board,
        Pos::NONE,
        &main_history,
        &counter_moves,
        &[],
    );

    let moves = drain(&mut picker);
    assert!(moves.contains(&threat), "the combined threat cell must be generated");
    for pos in &moves {
        assert!(
            board.cell(*pos).pattern4(Color::White) >= Pattern4::CBlock4Flex3
                || board.cell(*pos).pattern4(Color::Black) >= Pattern4::EBlock4,
            "{pos} is neither a defense nor a VCF counter"
        );
    }
}

#[test]
fn test_validate_opponent_c_move_gates() {
    // white threatens, black to move: white is never forbidden, the gate
    // stays open
    let mut board = Board::new(15, Rule::Renju);
    board.put_stone(Pos::new(6, 7), Color::Black);
    for x in 7..10 {
        board.put_stone(Pos::new(x, 7), Color::White);
    }
    board.put_stone(Pos::new(10, 5), Color::White);
    board.put_stone(Pos::new(10, 6), Color::White);
    board.set_side_to_move(Color::Black);

    assert!(movegen::validate_opponent_c_move(&board));
}
