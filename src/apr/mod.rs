//! APR and PnL from a position's event history.
//!
//! A [`CostBasisLedger`] replays deposits, withdrawals and fee collections
//! into a running cost basis and its time integral. [`compute_pnl_breakdown`]
//! turns that into realized, unrealized and blended APR, degrading single
//! metrics to `None` when history is missing. [`compute_position_pnl`]
//! reports absolute profit by source.

mod breakdown;
mod event;
mod ledger;
mod summary;

pub use breakdown::{
    annualized_apr, blended_apr, compute_pnl_breakdown, PnlBreakdown, SECONDS_PER_DAY,
};
pub use event::{EventKind, PositionEvent};
pub use ledger::CostBasisLedger;
pub use summary::{compute_position_pnl, PositionPnl};
