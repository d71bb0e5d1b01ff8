use crate::game_state::chess_types::PieceRef;
use crate::moves::chess_move::Move;

/// Per-move record of the variable-length changes `make_move` performed.
///
/// Fixed-shape state (rights, en passant file, last moved/captured piece,
/// moved flags, cached knowledge) is reverted through its own snapshot; this
/// record lists which pieces to pop and the prior clocks.
#[derive(Debug, Clone)]
pub struct UndoState {
    pub mv: Move,
    /// Castling rook.
    pub rook: Option<PieceRef>,
    /// Piece created by a promotion; removed again on unmake.
    pub promoted: Option<PieceRef>,
    /// Pieces whose knowledge snapshot was pushed, in push order.
    pub recomputed: Vec<PieceRef>,
    /// Pieces whose king-seer flag changed, in change order.
    pub seer_flips: Vec<PieceRef>,

    pub prev_half_move: u8,
    pub prev_full_move: u32,
}

impl UndoState {
    pub fn new(mv: Move, prev_half_move: u8, prev_full_move: u32) -> Self {
        Self {
            mv,
            rook: None,
            promoted: None,
            recomputed: Vec::new(),
            seer_flips: Vec::new(),
            prev_half_move,
            prev_full_move,
        }
    }
}
