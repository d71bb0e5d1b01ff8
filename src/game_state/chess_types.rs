//! Small value types shared by every layer of the engine.
//!
//! Colors, piece kinds, castling wings and the castling-rights bitmask live
//! here together with the square alias and the `PieceRef` handle used by the
//! board to point into a team's piece arena.

pub use crate::game_state::game_state::GameState;
pub use crate::game_state::undo_state::UndoState;

/// Board square index (`0..=63`), `rank * 8 + file`.
pub type Square = u8;

/// Team colour. White moves towards rank 8.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    White,
    Black,
}

impl Color {
    pub const ALL: [Color; 2] = [Color::White, Color::Black];

    #[inline]
    pub const fn index(self) -> usize {
        match self {
            Color::White => 0,
            Color::Black => 1,
        }
    }

    #[inline]
    pub const fn opposite(self) -> Self {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }

    #[inline]
    pub const fn fen_char(self) -> char {
        match self {
            Color::White => 'w',
            Color::Black => 'b',
        }
    }

    #[inline]
    pub const fn name(self) -> &'static str {
        match self {
            Color::White => "white",
            Color::Black => "black",
        }
    }

    /// Rank delta of a single pawn step.
    #[inline]
    pub const fn pawn_direction(self) -> i8 {
        match self {
            Color::White => 1,
            Color::Black => -1,
        }
    }

    /// Rank from which pawns may advance two squares.
    #[inline]
    pub const fn pawn_start_rank(self) -> u8 {
        match self {
            Color::White => 1,
            Color::Black => 6,
        }
    }

    /// Rank on which pawns of this colour promote.
    #[inline]
    pub const fn promotion_rank(self) -> u8 {
        match self {
            Color::White => 7,
            Color::Black => 0,
        }
    }

    /// Rank holding the king and rooks at the start of a game.
    #[inline]
    pub const fn home_rank(self) -> u8 {
        match self {
            Color::White => 0,
            Color::Black => 7,
        }
    }

    /// Rank a pawn of this colour must stand on to capture en passant.
    #[inline]
    pub const fn en_passant_rank(self) -> u8 {
        match self {
            Color::White => 4,
            Color::Black => 3,
        }
    }

    /// `+1` for white, `-1` for black; turns a white-relative score into a
    /// team-relative one.
    #[inline]
    pub const fn sign(self) -> i32 {
        match self {
            Color::White => 1,
            Color::Black => -1,
        }
    }
}

/// Piece kind (colour is carried separately).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    King,
    Queen,
    Rook,
    Bishop,
    Knight,
    Pawn,
}

/// Promotion choices in the order they are generated.
pub const PROMOTION_KINDS: [PieceKind; 4] = [
    PieceKind::Queen,
    PieceKind::Rook,
    PieceKind::Bishop,
    PieceKind::Knight,
];

impl PieceKind {
    #[inline]
    pub const fn index(self) -> usize {
        match self {
            PieceKind::King => 0,
            PieceKind::Queen => 1,
            PieceKind::Rook => 2,
            PieceKind::Bishop => 3,
            PieceKind::Knight => 4,
            PieceKind::Pawn => 5,
        }
    }

    /// Material value counted into a team's running score.
    #[inline]
    pub const fn points(self) -> i32 {
        match self {
            PieceKind::King => 0,
            PieceKind::Queen => 9,
            PieceKind::Rook => 5,
            PieceKind::Bishop => 3,
            PieceKind::Knight => 3,
            PieceKind::Pawn => 1,
        }
    }

    /// Upper-case letter used by FEN and SAN.
    #[inline]
    pub const fn symbol(self) -> char {
        match self {
            PieceKind::King => 'K',
            PieceKind::Queen => 'Q',
            PieceKind::Rook => 'R',
            PieceKind::Bishop => 'B',
            PieceKind::Knight => 'N',
            PieceKind::Pawn => 'P',
        }
    }

    pub fn from_symbol(symbol: char) -> Option<Self> {
        match symbol.to_ascii_uppercase() {
            'K' => Some(PieceKind::King),
            'Q' => Some(PieceKind::Queen),
            'R' => Some(PieceKind::Rook),
            'B' => Some(PieceKind::Bishop),
            'N' => Some(PieceKind::Knight),
            'P' => Some(PieceKind::Pawn),
            _ => None,
        }
    }

    /// FEN letter for this kind on the given team.
    #[inline]
    pub fn fen_char(self, color: Color) -> char {
        match color {
            Color::White => self.symbol(),
            Color::Black => self.symbol().to_ascii_lowercase(),
        }
    }
}

/// Castling side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Wing {
    King,
    Queen,
}

impl Wing {
    pub const ALL: [Wing; 2] = [Wing::King, Wing::Queen];

    #[inline]
    pub const fn index(self) -> usize {
        match self {
            Wing::King => 0,
            Wing::Queen => 1,
        }
    }

    /// File of the rook that castles on this wing.
    #[inline]
    pub const fn rook_home_file(self) -> u8 {
        match self {
            Wing::King => 7,
            Wing::Queen => 0,
        }
    }

    #[inline]
    pub const fn king_target_file(self) -> u8 {
        match self {
            Wing::King => 6,
            Wing::Queen => 2,
        }
    }

    /// Also the square the king passes through.
    #[inline]
    pub const fn rook_target_file(self) -> u8 {
        match self {
            Wing::King => 5,
            Wing::Queen => 3,
        }
    }
}

/// File the king starts on for either team.
pub const KING_HOME_FILE: u8 = 4;

/// Castling rights bitmask, one bit per {team, wing}.
pub type CastlingRights = u8;

pub const CASTLE_WHITE_KINGSIDE: CastlingRights = 1 << 0;
pub const CASTLE_WHITE_QUEENSIDE: CastlingRights = 1 << 1;
pub const CASTLE_BLACK_KINGSIDE: CastlingRights = 1 << 2;
pub const CASTLE_BLACK_QUEENSIDE: CastlingRights = 1 << 3;
pub const CASTLE_NONE: CastlingRights = 0;

/// Rights bit for a team and wing.
#[inline]
pub const fn castling_flag(color: Color, wing: Wing) -> CastlingRights {
    match (color, wing) {
        (Color::White, Wing::King) => CASTLE_WHITE_KINGSIDE,
        (Color::White, Wing::Queen) => CASTLE_WHITE_QUEENSIDE,
        (Color::Black, Wing::King) => CASTLE_BLACK_KINGSIDE,
        (Color::Black, Wing::Queen) => CASTLE_BLACK_QUEENSIDE,
    }
}

/// Both rights bits of a team.
#[inline]
pub const fn castling_flags_for(color: Color) -> CastlingRights {
    castling_flag(color, Wing::King) | castling_flag(color, Wing::Queen)
}

/// Handle to a piece inside a team arena. Ids are stable for the lifetime of
/// the piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PieceRef {
    pub color: Color,
    pub id: usize,
}

impl PieceRef {
    #[inline]
    pub const fn new(color: Color, id: usize) -> Self {
        Self { color, id }
    }
}
