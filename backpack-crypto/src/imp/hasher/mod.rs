pub mod sha256;
pub mod sha512;
