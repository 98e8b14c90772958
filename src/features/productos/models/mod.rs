mod producto;

pub use producto::*;
