pub mod board;
pub mod internal;
pub mod preferences;
pub mod transport;
