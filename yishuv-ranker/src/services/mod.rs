// Business logic services layer
//
// Pure logic shared by the CLI commands: battles, leaderboard queries,
// exports and favorites.

pub mod battle;
pub mod export;
pub mod favorites;
pub mod leaderboard;
