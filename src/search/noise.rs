use crate::board::Move;
use rand::rngs::SmallRng;
use rand::Rng;

/// Uniform pick among `moves`, `None` when there is nothing to pick.
///
/// The root walkers use this as their fallback answer before any child has been
/// scored, so the draw has to come from a seeded generator for tests to pin it.
pub fn choose_uniform(moves: &[Move], rng: &mut SmallRng) -> Option<Move> {
    if moves.is_empty() { return None; }
    Some(moves[rng.gen_range(0..moves.len())])
}
