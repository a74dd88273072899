//! Position report example (USDC/WETH, Uniswap V3 style).
//!
//! Values a concentrated-liquidity position, samples its PnL curve through
//! a cache and derives its APR from a short event history.
//!
//! # Run
//!
//! ```bash
//! RUST_LOG=debug cargo run --example position_report
//! ```

use alloy_primitives::U256;
use chrono::{Duration, Utc};
use clmm_position_math::analyzer::PositionAnalyzer;
use clmm_position_math::apr::PositionEvent;
use clmm_position_math::config::{CurveConfig, PoolSnapshot, PositionConfig};
use clmm_position_math::curve::InMemoryCurveCache;
use clmm_position_math::domain::{
    Decimals, Liquidity, Tick, TickSpacing, Token, TokenAddress, TokenAmounts,
};
use clmm_position_math::math::tick_to_sqrt_price_x96;
use clmm_position_math::traits::FromConfig;
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    println!("=== CLMM Position Report ===\n");

    // ── 1. Pool snapshot ───────────────────────────────────────────────
    //    USDC sorts first, so it is token0; WETH is token1.
    let usdc = Token::new(TokenAddress::from_bytes([1u8; 20]), Decimals::new(6)?);
    let weth = Token::new(TokenAddress::from_bytes([2u8; 20]), Decimals::new(18)?);
    let current_tick = Tick::new(200_000)?;
    let pool = PoolSnapshot::new(
        usdc,
        weth,
        TickSpacing::MEDIUM,
        current_tick,
        tick_to_sqrt_price_x96(current_tick)?,
    )?;
    println!("Pool: tick {current_tick}, spacing {}", pool.tick_spacing());

    // ── 2. Position, valued in USDC ────────────────────────────────────
    let position = PositionConfig::new(
        "42",
        Liquidity::new(1_000_000_000_000_000),
        Tick::new(199_980)?,
        Tick::new(200_040)?,
        true,
    )?;
    let analyzer = PositionAnalyzer::from_config(&(pool, position))?;

    let price = analyzer.current_price()?;
    let amounts = analyzer.token_amounts()?;
    let value = analyzer.current_value()?;
    println!("\n--- Position {} ---", analyzer.position_id());
    println!("  Range:       {}", analyzer.position().range());
    println!("  Phase:       {:?}", analyzer.phase());
    println!("  Price:       {} USDC/WETH", price.to_f64(usdc.decimals()));
    println!("  Holdings:    {amounts}");
    println!("  Value (raw): {value}");

    // ── 3. PnL curve, cached ───────────────────────────────────────────
    let cache = InMemoryCurveCache::with_capacity(64)?;
    let config = CurveConfig::new(9, 5_000, None)?;
    let curve = analyzer.curve_data_cached(&cache, value, &config)?;
    let again = analyzer.curve_data_cached(&cache, value, &config)?;
    println!(
        "\n--- PnL curve ({} samples, cached entries: {}) ---",
        curve.points.len(),
        cache.len()
    );
    for (i, point) in curve.points.iter().enumerate() {
        let marker = if i == curve.current_price_index { "*" } else { " " };
        println!(
            " {marker} {:>10.2}  value {:>12}  pnl {:>+8.3}%  {:?}",
            point.price().to_f64(usdc.decimals()),
            point.position_value(),
            point.pnl_percent(),
            point.phase(),
        );
    }
    println!(
        "  Second lookup served from cache: {}",
        std::sync::Arc::ptr_eq(&curve, &again)
    );

    // ── 4. APR from history ────────────────────────────────────────────
    let now = Utc::now();
    let opened = now - Duration::days(60);
    let history = [
        PositionEvent::increase(
            opened,
            Liquidity::new(1_000_000_000_000_000),
            amounts,
            Some(price),
        ),
        PositionEvent::collect(
            opened + Duration::days(30),
            TokenAmounts::new(U256::from(1_500_000u64), U256::ZERO),
            Some(price),
        ),
    ];
    let unclaimed = TokenAmounts::new(U256::from(900_000u64), U256::ZERO);
    let breakdown = analyzer.pnl_breakdown(&history, unclaimed, now)?;
    println!("\n--- APR ---");
    println!("  Realized:    {:?}", breakdown.realized_apr);
    println!("  Unrealized:  {:?}", breakdown.unrealized_apr);
    println!("  Total:       {:?}", breakdown.total_apr);
    println!("  Active days: {:.1}", breakdown.total_active_days);

    let pnl = analyzer.position_pnl(&history, unclaimed)?;
    println!("  Total PnL (raw USDC): {}", pnl.total_pnl);

    println!("\n=== Done ===");
    Ok(())
}
