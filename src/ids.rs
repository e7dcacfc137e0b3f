//! Per-instance unique id generation.
//!
//! Every accordion tree owns one [`IdGenerator`]. Ids combine a random token,
//! drawn once when the generator is created, with a counter that only ever
//! grows, so two trees mounted on the same page never hand out the same id.

use rand::{Rng, SeedableRng, rngs::StdRng};

const TOKEN_ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";
const TOKEN_LEN: usize = 6;

#[derive(Debug, Clone)]
pub struct IdGenerator {
    token: String,
    counter: u64,
}

impl IdGenerator {
    /// Create a generator with a fresh token from the thread-local RNG.
    pub fn new() -> Self {
        Self::from_rng(&mut rand::rng())
    }

    /// Create a generator whose token is derived from a fixed seed.
    pub fn seeded(seed: u64) -> Self {
        Self::from_rng(&mut StdRng::seed_from_u64(seed))
    }

    /// Create a generator with an explicit token.
    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            counter: 0,
        }
    }

    fn from_rng<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let token = (0..TOKEN_LEN)
            .map(|_| TOKEN_ALPHABET[rng.random_range(0..TOKEN_ALPHABET.len())] as char)
            .collect::<String>();
        Self::with_token(token)
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    /// Number of ids handed out so far.
    pub fn issued(&self) -> u64 {
        self.counter
    }

    /// Return the next id for `prefix`, formatted `{prefix}-{token}-{n}`.
    pub fn next_id(&mut self, prefix: &str) -> String {
        self.counter += 1;
        format!("{}-{}-{}", prefix, self.token, self.counter)
    }
}

impl Default for IdGenerator {
    fn default() -> Self {
        Self::new()
    }
}
