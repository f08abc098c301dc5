pub mod hex;
pub mod rotation;
