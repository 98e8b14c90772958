mod usuario;

pub use usuario::*;
