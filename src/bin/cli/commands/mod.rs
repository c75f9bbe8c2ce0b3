pub mod deck;
pub mod hints;
pub mod levels;
pub mod play;
pub mod review;
