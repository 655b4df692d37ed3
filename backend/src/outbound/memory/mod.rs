//! In-memory store adapters.
//!
//! Used when no database URL is configured and by the integration tests.
//! Each store keeps its state behind one `std::sync::Mutex`, so every
//! check-then-write sequence happens under a single guard.

mod ingredients;
mod tokens;
mod users;

pub use ingredients::InMemoryIngredientRepository;
pub use tokens::InMemoryTokenRepository;
pub use users::InMemoryUserRepository;

/// Message used when a previous holder panicked while holding a lock.
const POISONED: &str = "in-memory store lock poisoned";
