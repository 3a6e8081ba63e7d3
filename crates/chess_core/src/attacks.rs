//! Check, pin and attacked-square detection by ray casting from a square.

use crate::{
    game_state::{Check, Pin},
    piece::{Color, PieceType},
    position::{Direction, ALL_DIRECTIONS, KNIGHT_JUMPS},
    GameState, Piece, Position,
};

/// Whether `piece`, found `distance` steps from a square along `direction`,
/// attacks that square along the ray. Knights are handled separately.
fn threatens_along(piece: Piece, direction: Direction, distance: i8) -> bool {
    match piece.piece_type {
        PieceType::Rook => direction.is_orthogonal(),
        PieceType::Bishop => direction.is_diagonal(),
        PieceType::Queen => true,
        PieceType::King => distance == 1,
        // The pawn sits one step diagonally behind the square it attacks.
        PieceType::Pawn => {
            distance == 1 && direction.col != 0 && direction.row == -piece.color.pawn_direction()
        }
        PieceType::Knight => false,
    }
}

impl GameState {
    /// Casts the eight rays and the knight pattern from the side to move's
    /// king. Returns `(in_check, pins, checks)`.
    pub(crate) fn check_for_pins_and_checks(&self) -> (bool, Vec<Pin>, Vec<Check>) {
        let color = self.side_to_move;
        let king = self.king_location(color);
        let mut pins = Vec::new();
        let mut checks = Vec::new();

        for direction in ALL_DIRECTIONS {
            let mut possible_pin = None;
            for distance in 1..8 {
                let Some(pos) = king.offset(direction, distance) else {
                    break;
                };
                let Some(piece) = self.board.get(pos) else {
                    continue;
                };

                if piece.color == color {
                    if possible_pin.is_some() {
                        break; // two friendly pieces, nothing pinned here
                    }
                    possible_pin = Some(pos);
                    continue;
                }

                if threatens_along(piece, direction, distance) {
                    match possible_pin {
                        None => checks.push(Check { square: pos, direction }),
                        Some(square) => pins.push(Pin { square, direction }),
                    }
                }
                break;
            }
        }

        for jump in KNIGHT_JUMPS {
            if let Some(pos) = king.offset(jump, 1) {
                if self.board.get(pos) == Some(Piece::new(PieceType::Knight, color.opposite())) {
                    checks.push(Check { square: pos, direction: jump });
                }
            }
        }

        (!checks.is_empty(), pins, checks)
    }

    /// True when any piece of `attacker` attacks `pos`.
    pub fn is_square_attacked(&self, pos: Position, attacker: Color) -> bool {
        self.is_square_attacked_ignoring(pos, attacker, None)
    }

    /// Same as [`GameState::is_square_attacked`], treating `ignore` as empty.
    /// Used for king destinations so the king cannot hide behind itself on
    /// the ray of the slider attacking it.
    pub(crate) fn is_square_attacked_ignoring(
        &self,
        pos: Position,
        attacker: Color,
        ignore: Option<Position>,
    ) -> bool {
        for direction in ALL_DIRECTIONS {
            for distance in 1..8 {
                let Some(target) = pos.offset(direction, distance) else {
                    break;
                };
                if Some(target) == ignore {
                    continue;
                }
                let Some(piece) = self.board.get(target) else {
                    continue;
                };
                if piece.color == attacker && threatens_along(piece, direction, distance) {
                    return true;
                }
                break;
            }
        }

        KNIGHT_JUMPS.iter().any(|&jump| {
            pos.offset(jump, 1)
                .and_then(|target| self.board.get(target))
                .is_some_and(|piece| piece.is(PieceType::Knight, attacker))
        })
    }

    pub fn is_in_check(&self, color: Color) -> bool {
        self.is_square_attacked(self.king_location(color), color.opposite())
    }
}
