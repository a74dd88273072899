//! # CLMM Position Math
//!
//! Integer-exact math for Uniswap V3 style liquidity positions: price and
//! tick conversion, liquidity to token amounts, position valuation, PnL
//! curves and APR breakdowns.
//!
//! Every on-chain quantity is an EVM-width integer (`U256`, `u128`); only
//! APR percentages and display helpers use `f64`. Results match what the
//! pool contracts compute, to the wei.
//!
//! # Quick Start
//!
//! Add to your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! clmm-position-math = "0.1"
//! ```
//!
//! ## Value a position and chart its PnL
//!
//! ```rust
//! use clmm_position_math::analyzer::PositionAnalyzer;
//! use clmm_position_math::config::{CurveConfig, PoolSnapshot, PositionConfig};
//! use clmm_position_math::domain::{
//!     Decimals, Liquidity, RangePhase, Tick, TickSpacing, Token, TokenAddress,
//! };
//! use clmm_position_math::math::tick_to_sqrt_price_x96;
//! use clmm_position_math::traits::FromConfig;
//!
//! // 1. Describe the pool: USDC is token0 (lower address), WETH token1.
//! let usdc = Token::new(TokenAddress::from_bytes([1u8; 20]), Decimals::new(6).expect("valid"));
//! let weth = Token::new(TokenAddress::from_bytes([2u8; 20]), Decimals::new(18).expect("valid"));
//! let tick = Tick::new(200_000).expect("valid tick");
//! let sqrt = tick_to_sqrt_price_x96(tick).expect("valid sqrt");
//! let pool = PoolSnapshot::new(usdc, weth, TickSpacing::MEDIUM, tick, sqrt).expect("consistent");
//!
//! // 2. Describe the position, valued in USDC.
//! let position = PositionConfig::new(
//!     "42",
//!     Liquidity::new(1_000_000_000_000_000),
//!     Tick::new(199_980).expect("valid"),
//!     Tick::new(200_040).expect("valid"),
//!     true,
//! )
//! .expect("valid position");
//!
//! // 3. Analyze.
//! let analyzer = PositionAnalyzer::from_config(&(pool, position)).expect("aligned range");
//! assert_eq!(analyzer.phase(), RangePhase::InRange);
//! let value = analyzer.current_value().expect("value");
//! let curve = analyzer.curve_data(value, &CurveConfig::default()).expect("curve");
//! assert_eq!(curve.points.len(), CurveConfig::DEFAULT_SAMPLE_COUNT);
//! assert!(curve.range_indices.is_some());
//! ```
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐
//! │   Consumer    │  PoolSnapshot + PositionConfig (+ event history)
//! └──────┬───────┘
//!        │ from_config(&(pool, position))
//!        ▼
//! ┌──────────────┐
//! │   Analyzer    │  validates, orients base/quote
//! └──────┬───────┘
//!        │
//!        ├──────────────┬──────────────┐
//!        ▼              ▼              ▼
//! ┌────────────┐ ┌────────────┐ ┌────────────┐
//! │ Valuation  │ │   Curve    │ │    APR     │  value, PnL curve, APR
//! └─────┬──────┘ └─────┬──────┘ └─────┬──────┘
//!       └──────────────┼──────────────┘
//!                      ▼
//! ┌──────────────┐
//! │     Math      │  tick ↔ sqrt ↔ price, liquidity ↔ amounts
//! └──────────────┘
//! ```
//!
//! # Module Guide
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`domain`] | Newtype value types: [`Tick`](domain::Tick), [`SqrtPriceX96`](domain::SqrtPriceX96), [`Price`](domain::Price), [`Position`](domain::Position), etc. |
//! | [`math`] | Bit-exact tick math, 512-bit `mul_div`, price and liquidity conversions |
//! | [`valuation`] | Position value in quote-token units |
//! | [`curve`] | PnL curve sampling, chart markers, curve caches |
//! | [`apr`] | Cost-basis ledger, APR breakdown, PnL summary |
//! | [`config`] | Validated inputs: [`PoolSnapshot`](config::PoolSnapshot), [`PositionConfig`](config::PositionConfig), [`CurveConfig`](config::CurveConfig) |
//! | [`analyzer`] | [`PositionAnalyzer`](analyzer::PositionAnalyzer) tying it all together |
//! | [`traits`] | [`CurveCache`](traits::CurveCache) and [`FromConfig`](traits::FromConfig) |
//! | [`error`] | [`PositionMathError`](error::PositionMathError) unified error enum |
//! | [`prelude`] | Convenience re-exports for common types and traits |

pub mod analyzer;
pub mod apr;
pub mod config;
pub mod curve;
pub mod domain;
pub mod error;
pub mod math;
pub mod prelude;
pub mod serde_decimal;
pub mod traits;
pub mod valuation;
