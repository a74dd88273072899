//! Integer math for concentrated-liquidity positions.
//!
//! | Module | Purpose |
//! |--------|---------|
//! | `full_math` | 512-bit `mul_div`, integer square root, `f64` display conversion |
//! | `checked` | [`CheckedArithmetic`] for `U256` and [`Liquidity`](crate::domain::Liquidity) |
//! | `tick_math` | Bit-exact tick ↔ sqrt-price conversion |
//! | `price_math` | Sqrt price ↔ decimal-scaled price ↔ tick |
//! | `liquidity_math` | Liquidity ↔ token amounts |
//!
//! Everything here is pure and deterministic; nothing logs.

mod checked;
mod full_math;
mod liquidity_math;
mod price_math;
mod tick_math;

#[cfg(test)]
#[allow(clippy::panic)]
mod proptest_properties;

pub use checked::CheckedArithmetic;
pub use full_math::{isqrt, isqrt_u512, mul_div, narrow, u256_to_f64, widen};
pub use liquidity_math::{
    get_amount0_delta, get_amount1_delta, get_liquidity_for_amount0, get_liquidity_for_amount1,
    get_liquidity_for_amounts, get_token_amounts_at_sqrt_price, get_token_amounts_from_liquidity,
};
pub use price_math::{
    nearest_usable_tick, price_to_f64, price_to_sqrt_price_x96, price_to_tick,
    sqrt_price_x96_to_price, sqrt_price_x96_to_raw_price, sqrt_ratio_x96_to_token0_per_token1,
    sqrt_ratio_x96_to_token1_per_token0, tick_to_price,
};
pub use tick_math::{sqrt_price_x96_to_tick, tick_to_sqrt_price_x96};
