mod block;
mod galois;
mod rs;

pub use block::*;
pub use galois::*;
pub use rs::*;
