use crate::GameState;

impl GameState {
    /// Counts leaf nodes of the legal move tree `depth` plies deep.
    pub fn perft(&mut self, depth: u32) -> u64 {
        if depth == 0 {
            return 1;
        }

        let moves = self.legal_moves();
        if depth == 1 {
            return moves.len() as u64;
        }

        let mut nodes = 0;
        for mv in moves {
            self.make_move(mv);
            nodes += self.perft(depth - 1);
            self.undo_move();
        }
        nodes
    }

    /// Per-root-move node counts, handy when comparing against another generator.
    pub fn divide(&mut self, depth: u32) -> Vec<(String, u64)> {
        let moves = self.legal_moves();
        let mut counts = Vec::with_capacity(moves.len());
        for mv in moves {
            self.make_move(mv);
            let nodes = self.perft(depth.saturating_sub(1));
            self.undo_move();
            counts.push((format!("{}{}", mv.from, mv.to), nodes));
        }
        counts
    }
}
