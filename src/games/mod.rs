pub mod roulette;
pub mod rps;
pub mod stats;
pub mod tictactoe;
