//! Domain value types for concentrated-liquidity position math.
//!
//! Ticks, sqrt prices, decimal-scaled prices, tokens and positions. Every
//! type is an immutable newtype or plain struct with a validated
//! constructor, so an instance that exists is already well-formed.

mod amount;
mod decimals;
mod liquidity;
mod position;
mod price;
mod rounding;
mod sqrt_price;
mod tick;
mod token;
mod token_address;
mod token_pair;

pub use amount::TokenAmounts;
pub use decimals::Decimals;
pub use liquidity::Liquidity;
pub use position::{Position, PositionRange, RangePhase};
pub use price::{Price, PriceRange};
pub use rounding::Rounding;
pub use sqrt_price::{SqrtPriceX96, MAX_SQRT_RATIO, MIN_SQRT_RATIO, Q96};
pub use tick::{Tick, TickSpacing, MAX_TICK, MIN_TICK};
pub use token::Token;
pub use token_address::TokenAddress;
pub use token_pair::{base_is_token0, PairOrientation, QuoteSide, TokenPair};
