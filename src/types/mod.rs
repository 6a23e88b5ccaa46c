pub mod price;
pub mod sentiment;
pub mod signals;

pub use price::*;
pub use sentiment::*;
pub use signals::*;
