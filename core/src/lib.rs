pub mod freshness;
pub mod models;
pub mod reconcile;
pub mod state;
pub mod view;
