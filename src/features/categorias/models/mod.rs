mod categoria;

pub use categoria::*;
