pub mod board;
pub mod rng;
pub mod session;
pub mod time;
