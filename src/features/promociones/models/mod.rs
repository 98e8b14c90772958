mod promocion;

pub use promocion::*;
