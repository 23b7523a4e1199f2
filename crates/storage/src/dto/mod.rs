pub mod auth;
pub mod category;
pub mod common;
pub mod judge;
pub mod participant;
pub mod score;
pub mod scoreboard;
pub mod stats;
