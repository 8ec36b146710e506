//! Data types for the ladder MM strategy.

mod intent;
mod level;
mod offer;
mod price;
mod side;

pub use intent::MutationIntent;
pub use level::{CapacityCaps, Level};
pub use offer::LiveOffer;
pub use price::{Price, PriceError, PRICE_DECIMALS};
pub use side::Side;
