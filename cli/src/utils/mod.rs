pub mod date;
pub mod format;
pub mod histogram;
pub mod logger;

pub use date::*;
pub use format::*;
pub use histogram::*;
pub use logger::*;
