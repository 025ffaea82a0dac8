//! HTTP API handlers for medadmin-review

pub mod filters;
pub mod health;

pub use filters::{
    list_activity, list_experiments, summarize_activity_filters, summarize_experiment_filters,
};
pub use health::health_routes;
