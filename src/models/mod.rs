pub mod internal;
pub mod transport;
