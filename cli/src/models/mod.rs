pub mod forecast;
pub mod price_history;

pub use forecast::*;
pub use price_history::*;
