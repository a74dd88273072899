//! Position valuation in quote-token terms.
//!
//! A position's value at a price is the quote-denominated sum of its two
//! token amounts, where the base-token amount is converted with that same
//! price. Amounts are derived at the price's exact sqrt ratio, not at a
//! quantized tick, so the value is continuous across range boundaries.

mod position_value;

pub use position_value::{
    calculate_position_value, calculate_position_value_at_price, token_amounts_in_quote,
    value_at_price, QuoteValue, Valuation,
};
