use std::collections::VecDeque;

use rand::{
    Rng, SeedableRng as _,
    distr::{Distribution, StandardUniform},
    seq::SliceRandom,
};
use rand_pcg::Pcg32;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::core::PieceKind;

/// Draws piece kinds with the 7-bag shuffle.
///
/// Every run of seven consecutive draws that starts on a bag boundary is a
/// permutation of all seven kinds, so no kind can stay absent for more than
/// twelve draws. The queue is refilled whenever it drops to seven entries,
/// which keeps at least one drawn-ahead piece available for previewing at
/// all times.
#[derive(Debug, Clone)]
pub struct PieceBag {
    rng: Pcg32,
    queue: VecDeque<PieceKind>,
}

impl Default for PieceBag {
    fn default() -> Self {
        Self::new()
    }
}

/// Seed for deterministic piece generation.
///
/// A 128-bit value that fixes the bag's shuffle sequence. Two bags built
/// from the same seed draw identical piece sequences, which makes sessions
/// replayable and tests deterministic.
///
/// Serializes as a 32-character lowercase hex string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BagSeed([u8; 16]);

impl From<u128> for BagSeed {
    fn from(value: u128) -> Self {
        Self(value.to_be_bytes())
    }
}

impl Serialize for BagSeed {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let num = u128::from_be_bytes(self.0);
        serializer.serialize_str(&format!("{num:032x}"))
    }
}

impl<'de> Deserialize<'de> for BagSeed {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let hex_str = String::deserialize(deserializer)?;
        if hex_str.len() != 32 {
            return Err(serde::de::Error::custom(format!(
                "invalid hex: expected 32 characters, got {}",
                hex_str.len()
            )));
        }
        let num = u128::from_str_radix(&hex_str, 16)
            .map_err(|e| serde::de::Error::custom(format!("invalid hex: {hex_str} ({e})")))?;
        Ok(Self(num.to_be_bytes()))
    }
}

impl Distribution<BagSeed> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> BagSeed {
        let mut seed = [0; 16];
        rng.fill(&mut seed);
        BagSeed(seed)
    }
}

impl PieceBag {
    /// Creates a bag with a random seed.
    #[must_use]
    pub fn new() -> Self {
        Self::with_seed(rand::rng().random())
    }

    /// Creates a bag with a fixed seed for deterministic draws.
    #[must_use]
    pub fn with_seed(seed: BagSeed) -> Self {
        let rng = Pcg32::from_seed(seed.0);
        let queue = VecDeque::with_capacity(PieceKind::LEN * 2);
        let mut this = Self { rng, queue };
        this.refill();
        this
    }

    /// Tops the queue up with shuffled seven-piece bags.
    ///
    /// Runs until more than seven entries remain, so after every draw the
    /// queue still holds a non-empty preview.
    fn refill(&mut self) {
        while self.queue.len() <= PieceKind::LEN {
            let mut bag = PieceKind::ALL;
            bag.shuffle(&mut self.rng);
            self.queue.extend(bag);
        }
    }

    /// Draws the next piece kind.
    pub fn draw(&mut self) -> PieceKind {
        self.refill();
        self.queue
            .pop_front()
            .expect("piece queue should never be empty")
    }

    /// The kind the next `draw` will return.
    #[must_use]
    pub fn peek_next(&self) -> PieceKind {
        *self
            .queue
            .front()
            .expect("piece queue should never be empty")
    }

    /// Upcoming kinds, nearest first.
    pub fn upcoming(&self) -> impl Iterator<Item = PieceKind> + '_ {
        self.queue.iter().copied()
    }
}
