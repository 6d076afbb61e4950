//! Dice generation: seeded pseudorandom rolls and a deterministic
//! event-keyed stream for reproducible matches.
//!
//! Event-keyed mode defines each roll by (match_seed, game_idx, turn_idx)
//! instead of evolving RNG state, so a replayed game sees identical dice
//! regardless of which moves either side picked earlier.

use rand::Rng;
use rand_chacha::ChaCha8Rng;
use rand_core::SeedableRng;

use crate::board::{Color, Dice};

/// Structural event key for deterministic dice generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EventKey {
    pub match_seed: u64,
    pub game_idx: u64,
    pub turn_idx: u32,
}

/// SplitMix64 step (fast, deterministic).
fn splitmix64_next(state: &mut u64) -> u64 {
    *state = state.wrapping_add(0x9E37_79B9_7F4A_7C15);
    let mut z = *state;
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

fn mix_seed(key: EventKey) -> u64 {
    // Fixed, stable mixing. Avoid std Hash/RandomState.
    let mut x = key.match_seed;
    x ^= key.game_idx.wrapping_mul(0xD6E8_FEB8_6659_FD93);
    x ^= (key.turn_idx as u64).wrapping_mul(0xA5A3_5625_E4F7_C1AD);
    let mut s = x;
    splitmix64_next(&mut s)
}

/// Deterministically generate the two raw dice for an event key.
pub fn roll_pair(key: EventKey) -> [u8; 2] {
    let mut state = mix_seed(key);
    let mut out = [0u8; 2];
    for o in &mut out {
        let r = splitmix64_next(&mut state);
        *o = ((r % 6) + 1) as u8;
    }
    out
}

/// Uniform die in 1..=6.
pub fn roll_die<R: Rng>(rng: &mut R) -> u8 {
    rng.gen_range(1..=6)
}

/// Roll a turn's dice; doubles expand to four moves of that value.
pub fn roll_turn<R: Rng>(rng: &mut R) -> Dice {
    Dice::from_roll(roll_die(rng), roll_die(rng))
}

/// How dice are generated for a game.
pub enum ChanceMode {
    /// Deterministic, event-keyed dice stream.
    EventKeyed { match_seed: u64, game_idx: u64 },
    /// Pseudorandom dice stream backed by a small PRNG.
    Rng { rng: Box<ChaCha8Rng> },
}

/// Per-game dice source: chance mode plus a turn counter.
pub struct TurnContext {
    chance: ChanceMode,
    turn_idx: u32,
}

impl TurnContext {
    pub fn new_event_keyed(match_seed: u64, game_idx: u64) -> Self {
        Self {
            chance: ChanceMode::EventKeyed {
                match_seed,
                game_idx,
            },
            turn_idx: 0,
        }
    }

    pub fn new_rng(seed: u64) -> Self {
        Self {
            chance: ChanceMode::Rng {
                rng: Box::new(ChaCha8Rng::seed_from_u64(seed)),
            },
            turn_idx: 0,
        }
    }

    fn pair(&mut self) -> [u8; 2] {
        let turn_idx = self.turn_idx;
        self.turn_idx += 1;
        match &mut self.chance {
            ChanceMode::EventKeyed {
                match_seed,
                game_idx,
            } => roll_pair(EventKey {
                match_seed: *match_seed,
                game_idx: *game_idx,
                turn_idx,
            }),
            ChanceMode::Rng { rng } => [rng.gen_range(1..=6), rng.gen_range(1..=6)],
        }
    }

    /// Dice for the next turn; doubles expand to four values.
    pub fn next_turn(&mut self) -> Dice {
        let [a, b] = self.pair();
        Dice::from_roll(a, b)
    }

    /// Opening roll-off: White and Black each roll one die, ties re-roll,
    /// and the higher die's owner starts the game playing that mixed
    /// pair. The first value of each pair is White's die.
    pub fn opening(&mut self) -> (Color, Dice) {
        loop {
            let [white_die, black_die] = self.pair();
            if white_die != black_die {
                let starter = if white_die > black_die {
                    Color::White
                } else {
                    Color::Black
                };
                return (starter, Dice::from_roll(white_die, black_die));
            }
        }
    }
}
