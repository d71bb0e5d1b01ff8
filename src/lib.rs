//! Crate root module declarations for the snapshot chess rules engine.
//!
//! Exposes the incremental board model (bitboards, snapshots, pieces, teams),
//! move descriptions and generation helpers, the brute-force minimax search,
//! engine wrappers, and notation utilities (FEN, SAN, PGN, coordinates).

pub mod chess_errors;

pub mod game_state {
    pub mod bitboard;
    pub mod chess_rules;
    pub mod chess_types;
    pub mod game_state;
    pub mod piece;
    pub mod snapshot;
    pub mod square;
    pub mod team;
    pub mod undo_state;
}

pub mod moves {
    pub mod castle_moves;
    pub mod chess_move;
    pub mod pattern_moves;
    pub mod pawn_moves;
    pub mod sliding_moves;
}

pub mod move_generation {
    pub mod legal_move_generator;
    pub mod perft;
}

pub mod search {
    pub mod evaluation;
    pub mod minimax;
    pub mod threading;
}

pub mod engines {
    pub mod engine_minimax;
    pub mod engine_random;
    pub mod engine_trait;
}

pub mod utils {
    pub mod algebraic;
    pub mod fen_generator;
    pub mod fen_parser;
    pub mod long_algebraic;
    pub mod pgn;
    pub mod san;
}
