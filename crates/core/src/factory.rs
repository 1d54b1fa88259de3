//! Piece factory - uniformly random pieces from the fixed catalog
//!
//! Each draw picks one of the 7 kinds and one of the 6 markers, independently
//! and with replacement. The factory keeps no history; the session owns the
//! one-piece lookahead.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use crate::piece::Piece;
use crate::types::{Marker, PieceKind};

/// Anything that can hand the session its next freshly spawned piece.
pub trait PieceSource {
    fn next_piece(&mut self) -> Piece;
}

/// Uniform random piece generator.
#[derive(Debug, Clone)]
pub struct PieceFactory<R = StdRng> {
    rng: R,
}

impl PieceFactory<StdRng> {
    /// Deterministic factory: the same seed yields the same piece sequence.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Factory seeded from OS entropy.
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }
}

impl<R: Rng> PieceFactory<R> {
    /// Draw a new piece at its spawn position.
    pub fn next(&mut self) -> Piece {
        // Both slices are non-empty constants.
        let kind = *PieceKind::ALL
            .choose(&mut self.rng)
            .unwrap_or(&PieceKind::I);
        let marker = *Marker::ALL.choose(&mut self.rng).unwrap_or(&Marker::Red);
        Piece::new(kind, marker)
    }
}

impl<R: Rng> PieceSource for PieceFactory<R> {
    fn next_piece(&mut self) -> Piece {
        self.next()
    }
}

/// Repeats a fixed list of pieces forever (scripted setups, benchmarks).
#[derive(Debug, Clone)]
pub struct CyclingSource {
    pieces: Vec<Piece>,
    index: usize,
}

impl CyclingSource {
    /// Panics if `pieces` is empty.
    pub fn new(pieces: Vec<Piece>) -> Self {
        assert!(!pieces.is_empty(), "CyclingSource needs at least one piece");
        Self { pieces, index: 0 }
    }

    pub fn of_kinds(kinds: &[PieceKind], marker: Marker) -> Self {
        Self::new(kinds.iter().map(|&k| Piece::new(k, marker)).collect())
    }
}

impl PieceSource for CyclingSource {
    fn next_piece(&mut self) -> Piece {
        let piece = self.pieces[self.index];
        self.index = (self.index + 1) % self.pieces.len();
        piece
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cycling_source_wraps_around() {
        let mut source = CyclingSource::of_kinds(&[PieceKind::I, PieceKind::O], Marker::Cyan);
        let kinds: Vec<_> = (0..5).map(|_| source.next_piece().kind()).collect();
        assert_eq!(
            kinds,
            vec![PieceKind::I, PieceKind::O, PieceKind::I, PieceKind::O, PieceKind::I]
        );
    }

    #[test]
    fn seeded_factories_are_deterministic() {
        let mut a = PieceFactory::seeded(12345);
        let mut b = PieceFactory::seeded(12345);
        for _ in 0..100 {
            assert_eq!(a.next(), b.next());
        }
    }

    #[test]
    fn pieces_spawn_at_row_zero() {
        let mut factory = PieceFactory::seeded(7);
        for _ in 0..50 {
            assert_eq!(factory.next().row(), 0);
        }
    }

    #[test]
    fn every_kind_and_marker_shows_up() {
        let mut factory = PieceFactory::seeded(42);
        let mut kinds = [false; 7];
        let mut markers = [false; 6];

        for _ in 0..1000 {
            let piece = factory.next();
            let k = PieceKind::ALL.iter().position(|&k| k == piece.kind()).unwrap();
            let m = Marker::ALL.iter().position(|&m| m == piece.marker()).unwrap();
            kinds[k] = true;
            markers[m] = true;
        }

        assert!(kinds.iter().all(|&seen| seen));
        assert!(markers.iter().all(|&seen| seen));
    }

    #[test]
    fn marker_is_not_tied_to_kind() {
        let mut factory = PieceFactory::seeded(9);
        let mut i_markers = Vec::new();
        for _ in 0..2000 {
            let piece = factory.next();
            if piece.kind() == PieceKind::I && !i_markers.contains(&piece.marker()) {
                i_markers.push(piece.marker());
            }
        }
        assert!(i_markers.len() > 1);
    }
}
