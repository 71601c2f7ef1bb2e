// Battle mode: rank a pool of municipalities by pairwise choices
//
// The session is a plain state machine with no I/O, so the CLI (or any
// other front end) drives it one decision at a time.

pub mod error;
pub mod plan;
pub mod pool;
pub mod session;

pub use plan::{estimated_comparisons, max_comparisons};
pub use pool::{DEFAULT_POOL_SIZE, POOL_SIZES, PoolConfig, medal, select_pool, share_text};
pub use session::{BattleSession, Progression, Side, sort_with};
