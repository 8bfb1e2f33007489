//! `marketlens-metrics` — aggregate basket KPIs and per-item velocity
//! (`basket_metrics`, `product_velocity`, `low_movement`).

pub mod metrics;

pub use metrics::{
    BasketMetrics, DEFAULT_LOW_MOVEMENT_THRESHOLD, DEFAULT_VELOCITY_LIMIT, ItemMovement,
    basket_metrics, item_movement, low_movement, product_velocity,
};
