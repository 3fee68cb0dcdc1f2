//src/rng.rs
use rand::{RngCore, SeedableRng};
use rand_pcg::Pcg32;

/// 会话共享的确定性RNG
///
/// Keeps the seed it was created from next to the live generator so a save
/// can record both and a load resumes the exact stream position.
#[derive(Debug, Clone, PartialEq)]
pub struct GameRng {
    rng: Pcg32,
    seed: u64,
}

impl GameRng {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed),
            seed,
        }
    }

    /// 使用随机种子创建
    pub fn from_entropy() -> Self {
        Self::new(rand::random())
    }

    /// Resumes a generator captured by [`GameRng::state`].
    pub fn from_state(seed: u64, state: Pcg32) -> Self {
        Self { rng: state, seed }
    }

    /// 创建时的种子
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Current generator, including its position in the stream.
    pub fn state(&self) -> &Pcg32 {
        &self.rng
    }
}

impl RngCore for GameRng {
    fn next_u32(&mut self) -> u32 {
        self.rng.next_u32()
    }

    fn next_u64(&mut self) -> u64 {
        self.rng.next_u64()
    }

    fn fill_bytes(&mut self, dst: &mut [u8]) {
        self.rng.fill_bytes(dst)
    }
}
