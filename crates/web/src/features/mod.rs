pub mod auth;
pub mod categories;
pub mod judges;
pub mod participants;
pub mod scoreboard;
pub mod scores;
pub mod stats;
