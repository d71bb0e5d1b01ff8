//! Search scores: material balance or a forced mate.
//!
//! Every evaluation maps to a white-relative rank so the two shapes compare on
//! one axis. A mate for white ranks above any material score, and the shorter
//! the mate the higher the rank; black's mates mirror this below zero.

use std::fmt;

use crate::game_state::chess_types::Color;

/// Rank of an immediate mate; longer mates rank lower by their distance.
const MATE_BASE: i64 = 1_000_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Evaluation {
    /// White material minus black material.
    Score(i32),
    /// `mating_team` forces mate `in_halfmoves` plies from here.
    Checkmate { mating_team: Color, in_halfmoves: u32 },
}

impl Evaluation {
    pub fn white_relative_rank(self) -> i64 {
        match self {
            Evaluation::Score(score) => i64::from(score),
            Evaluation::Checkmate {
                mating_team,
                in_halfmoves,
            } => i64::from(mating_team.sign()) * (MATE_BASE - i64::from(in_halfmoves)),
        }
    }

    /// Whether `team` strictly prefers `self` over `other`.
    pub fn is_preferred_by(self, team: Color, other: Evaluation) -> bool {
        let delta = self.white_relative_rank() - other.white_relative_rank();
        i64::from(team.sign()) * delta > 0
    }

    /// The same evaluation seen one ply earlier.
    pub fn one_ply_earlier(self) -> Self {
        match self {
            Evaluation::Checkmate {
                mating_team,
                in_halfmoves,
            } => Evaluation::Checkmate {
                mating_team,
                in_halfmoves: in_halfmoves + 1,
            },
            score => score,
        }
    }
}

/// `+3`, `0`, `-1`, or `+M2` / `-M1` with the mate counted in full moves.
impl fmt::Display for Evaluation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Evaluation::Score(score) if score > 0 => write!(f, "+{score}"),
            Evaluation::Score(score) => write!(f, "{score}"),
            Evaluation::Checkmate {
                mating_team,
                in_halfmoves,
            } => {
                let sign = match mating_team {
                    Color::White => '+',
                    Color::Black => '-',
                };
                write!(f, "{sign}M{}", in_halfmoves.div_ceil(2))
            }
        }
    }
}
