pub mod badge;
pub mod macros;
