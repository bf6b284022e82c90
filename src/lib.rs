pub mod builder;
pub mod config;
pub mod edge;
pub mod error;
pub mod junction;
pub mod mapper;
pub mod metrics;
pub mod plan;
pub mod rebalance;
pub mod reconcile;
pub mod records;
pub mod schema;
pub mod sites;
pub mod summary;
pub mod telemetry;

#[cfg(feature = "python")]
mod bindings;

pub use builder::{plan_with, FlowAssignment, FlowSolver, PlanBuilder};
pub use config::{Config, DatabaseConfig, LoggingConfig, ReconcileConfig};
pub use edge::{Edge, SiteType, Stage};
pub use error::FlowError;
pub use junction::{EdgeId, JunctionGroup, JunctionIndex};
pub use metrics::Metrics;
pub use plan::FlowPlan;
pub use rebalance::{junction_balances, JunctionBalance};
pub use reconcile::{reconcile, ReconcileReport, Reconciler, Reconciliation};
pub use records::{read_edges_csv, PlanRecords};
pub use sites::{ActiveSites, Network};
pub use summary::{summarize_sites, summary_frame, SiteSummary};
pub use telemetry::init_tracing;
