mod measurement;
mod metric;
mod payload;
mod position;

pub use measurement::*;
pub use metric::*;
pub use payload::*;
pub use position::*;
