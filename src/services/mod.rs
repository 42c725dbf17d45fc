pub mod api_client;
pub mod axis;
pub mod correlation;
pub mod kpi;
pub mod market_share;
pub mod monthly;
pub mod pivot;
