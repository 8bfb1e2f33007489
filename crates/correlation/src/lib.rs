//! `marketlens-correlation` — co-occurrence ranking for a target item
//! (`item_correlation`, `cross_sell_opportunities`).

pub mod correlate;

pub use correlate::{
    CorrelationConfig, CorrelationEntry, CrossSellConfig, cross_sell_opportunities,
    item_correlation,
};
