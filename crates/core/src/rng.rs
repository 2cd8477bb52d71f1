//! RNG module - double-buffered 7-bag piece queue and the hold slot
//!
//! Each bag holds one of each kind (I, O, T, S, Z, J, L) in shuffled order. Two bags are kept
//! at all times so that six upcoming pieces can always be shown, even right before the current
//! bag runs out.
//!
//! The shuffle is driven by a small LCG so that a seed reproduces a whole game.

use crate::board::Board;
use crate::pieces::Piece;
use crate::types::{PieceKind, PIECE_KIND_COUNT, UPCOMING_COUNT};

/// Simple LCG (Linear Congruential Generator) RNG
/// Uses constants from Numerical Recipes
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    pub fn new(seed: u32) -> Self {
        // Avoid 0 seed which would produce all zeros
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    pub fn next_u32(&mut self) -> u32 {
        // (a * state + c) mod 2^32
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Random value in [0, max). The high bits of an LCG are the better ones.
    pub fn next_range(&mut self, max: u32) -> u32 {
        ((self.next_u32() as u64 * max as u64) >> 32) as u32
    }

    /// Fisher-Yates shuffle
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        for i in (1..slice.len()).rev() {
            let j = self.next_range((i + 1) as u32) as usize;
            slice.swap(i, j);
        }
    }
}

type Bag = [PieceKind; PIECE_KIND_COUNT];

/// Upcoming pieces plus the hold slot
#[derive(Debug, Clone)]
pub struct PieceQueue {
    current: Bag,
    /// Index of the head of `current`
    current_index: usize,
    next: Bag,
    held: Option<Piece>,
    rng: SimpleRng,
}

impl PieceQueue {
    pub fn new(seed: u32) -> Self {
        let mut rng = SimpleRng::new(seed);
        let current = Self::shuffled_bag(&mut rng);
        let next = Self::shuffled_bag(&mut rng);
        Self {
            current,
            current_index: 0,
            next,
            held: None,
            rng,
        }
    }

    fn shuffled_bag(rng: &mut SimpleRng) -> Bag {
        let mut bag = PieceKind::ALL;
        rng.shuffle(&mut bag);
        bag
    }

    /// Head of the current bag, without removing it
    pub fn peek_next(&self) -> PieceKind {
        self.current[self.current_index]
    }

    /// Remove and return the head. An emptied bag is replaced by the next one, and a fresh
    /// bag is shuffled in behind it.
    pub fn advance(&mut self) -> PieceKind {
        let kind = self.peek_next();
        self.current_index += 1;
        if self.current_index == PIECE_KIND_COUNT {
            self.current = self.next;
            self.current_index = 0;
            self.next = Self::shuffled_bag(&mut self.rng);
        }
        kind
    }

    /// Pieces left across both bags
    pub fn available(&self) -> usize {
        (PIECE_KIND_COUNT - self.current_index) + PIECE_KIND_COUNT
    }

    /// The next `N` kinds in queue order. Stack-only, no mutation.
    ///
    /// Panics if fewer than `N` pieces are buffered; the two-bag layout guarantees at least 8.
    pub fn upcoming<const N: usize>(&self) -> [PieceKind; N] {
        assert!(
            N <= self.available(),
            "piece queue underflow: {} requested, {} buffered",
            N,
            self.available()
        );
        let mut out = [PieceKind::I; N];
        let pending = self.current[self.current_index..]
            .iter()
            .chain(self.next.iter());
        for (slot, kind) in out.iter_mut().zip(pending) {
            *slot = *kind;
        }
        out
    }

    /// The six kinds shown to the player
    pub fn preview(&self) -> [PieceKind; UPCOMING_COUNT] {
        self.upcoming::<UPCOMING_COUNT>()
    }

    pub fn held(&self) -> Option<&Piece> {
        self.held.as_ref()
    }

    /// Put `falling` on hold, replacing it in place.
    ///
    /// With an empty slot the next queued piece takes over; otherwise the held piece comes
    /// back at the spawn position. Either replacement is marked held, so it cannot be held
    /// again before it locks. Returns false, untouched, if `falling` was already held.
    pub fn hold(&mut self, falling: &mut Piece, board: &Board) -> bool {
        if falling.already_held() {
            return false;
        }

        let incoming = match self.held.take() {
            Some(mut previous) => {
                previous.reset_to_spawn(board);
                previous
            }
            None => {
                let mut next = Piece::spawn(self.advance(), board);
                next.mark_held();
                next
            }
        };

        let mut outgoing = std::mem::replace(falling, incoming);
        outgoing.mark_held();
        outgoing.reset_to_spawn(board);
        self.held = Some(outgoing);
        true
    }
}

impl Default for PieceQueue {
    fn default() -> Self {
        Self::new(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_full_bag(drawn: &[PieceKind]) {
        assert_eq!(drawn.len(), PIECE_KIND_COUNT);
        for kind in PieceKind::ALL {
            assert_eq!(
                drawn.iter().filter(|&&k| k == kind).count(),
                1,
                "{kind:?} in {drawn:?}"
            );
        }
    }

    #[test]
    fn test_rng_deterministic() {
        let mut rng1 = SimpleRng::new(12345);
        let mut rng2 = SimpleRng::new(12345);
        for _ in 0..100 {
            assert_eq!(rng1.next_u32(), rng2.next_u32());
        }
    }

    #[test]
    fn test_next_range_bounds() {
        let mut rng = SimpleRng::new(7);
        for max in 1..=7 {
            for _ in 0..50 {
                assert!(rng.next_range(max) < max);
            }
        }
    }

    #[test]
    fn test_queue_draws_whole_bags() {
        let mut queue = PieceQueue::new(1);
        for _ in 0..20 {
            let drawn: Vec<PieceKind> = (0..PIECE_KIND_COUNT).map(|_| queue.advance()).collect();
            assert_full_bag(&drawn);
        }
    }

    #[test]
    fn test_peek_matches_advance() {
        let mut queue = PieceQueue::new(99);
        for _ in 0..30 {
            let peeked = queue.peek_next();
            assert_eq!(queue.advance(), peeked);
        }
    }

    #[test]
    fn test_preview_crosses_bag_boundary() {
        let mut queue = PieceQueue::new(3);
        for _ in 0..5 {
            queue.advance();
        }
        let preview = queue.preview();
        let drawn: Vec<PieceKind> = (0..UPCOMING_COUNT).map(|_| queue.advance()).collect();
        assert_eq!(preview.to_vec(), drawn);
    }

    #[test]
    fn test_available_never_below_eight() {
        let mut queue = PieceQueue::new(5);
        for _ in 0..50 {
            queue.advance();
            assert!(queue.available() >= 8);
        }
    }

    #[test]
    #[should_panic(expected = "underflow")]
    fn test_upcoming_underflow_panics() {
        let queue = PieceQueue::new(1);
        let _ = queue.upcoming::<15>();
    }

    #[test]
    fn test_hold_empty_slot_takes_next() {
        let board = Board::new();
        let mut queue = PieceQueue::new(11);
        let mut falling = Piece::spawn(queue.advance(), &board);
        let original = falling.kind;
        let next = queue.peek_next();

        assert!(queue.hold(&mut falling, &board));
        assert_eq!(falling.kind, next);
        assert!(falling.already_held());
        assert_eq!(queue.held().map(|p| p.kind), Some(original));

        // Second hold in the same life is rejected.
        let before = falling;
        assert!(!queue.hold(&mut falling, &board));
        assert_eq!(falling, before);
    }

    #[test]
    fn test_hold_swaps_with_held_piece() {
        let board = Board::new();
        let mut queue = PieceQueue::new(11);
        let mut falling = Piece::spawn(queue.advance(), &board);
        let first = falling.kind;
        assert!(queue.hold(&mut falling, &board));
        let second = falling.kind;

        // A fresh piece from the queue (as after a lock) may hold again.
        let mut fresh = Piece::spawn(queue.advance(), &board);
        fresh.gravity_step();
        let fresh_kind = fresh.kind;
        assert!(queue.hold(&mut fresh, &board));
        assert_eq!(fresh.kind, first);
        assert_eq!(fresh.cells(), Piece::spawn(first, &board).cells());
        assert_eq!(queue.held().map(|p| p.kind), Some(fresh_kind));
        assert_ne!(second, fresh_kind);
    }
}
