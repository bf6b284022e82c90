use std::collections::HashMap;
use std::path::PathBuf;

use pyo3::prelude::*;
use pyo3::types::PyModule;
use pyo3_polars::PyDataFrame;

use crate::config::{LoggingConfig, ReconcileConfig};
use crate::error::FlowError;
use crate::plan::FlowPlan;
use crate::reconcile::Reconciler;
use crate::records::{edges_to_frame, read_edges_csv};
use crate::schema;
use crate::sites::ActiveSites;
use crate::summary::{summarize_sites, summary_frame};
use crate::telemetry::init_tracing;

#[pyclass(name = "FlowModel")]
pub struct FlowModel {
    base_path: PathBuf,
    config: ReconcileConfig,
    plan: Option<FlowPlan>,
}

#[pymethods]
impl FlowModel {
    #[new]
    #[pyo3(signature = (base_path=".".to_string(), tolerance=None))]
    fn new(base_path: String, tolerance: Option<f64>) -> Self {
        let mut config = ReconcileConfig::default();
        if let Some(tolerance) = tolerance {
            config.tolerance = tolerance;
        }
        Self {
            base_path: PathBuf::from(base_path),
            config,
            plan: None,
        }
    }

    // ── Data loading ────────────────────────────────────────────────────────

    /// Load an edge table. Metrics are computed from the rows.
    fn load_edges(&mut self, edges: PyDataFrame) -> PyResult<()> {
        self.plan = Some(FlowPlan::from_edge_frame(&edges.0)?);
        Ok(())
    }

    /// Load an edge table from a CSV file relative to the base path.
    #[pyo3(signature = (filename=None))]
    fn load_csv(&mut self, filename: Option<&str>) -> PyResult<PyDataFrame> {
        let path = self.base_path.join(filename.unwrap_or("flow.csv"));
        let df = read_edges_csv(path)?;
        self.plan = Some(FlowPlan::from_edge_frame(&df)?);
        Ok(PyDataFrame(df))
    }

    // ── Queries ─────────────────────────────────────────────────────────────

    fn edges(&self) -> PyResult<PyDataFrame> {
        Ok(PyDataFrame(edges_to_frame(self.plan()?.edges())?))
    }

    fn metrics(&self) -> PyResult<HashMap<&'static str, f64>> {
        let m = self.plan()?.metrics();
        Ok(HashMap::from([
            (schema::metrics::TOTAL_AMOUNT, m.total_amount),
            (schema::metrics::TOTAL_COST, m.total_cost),
            (schema::metrics::TOTAL_CO2, m.total_co2_emissions),
        ]))
    }

    fn site_summary(&self) -> PyResult<PyDataFrame> {
        Ok(PyDataFrame(summary_frame(&summarize_sites(self.plan()?))?))
    }

    // ── Reconciliation ──────────────────────────────────────────────────────

    /// Return a new model whose plan is reconciled against `active_sites`.
    fn reconcile(&self, active_sites: Vec<String>) -> PyResult<FlowModel> {
        let active = ActiveSites::new(active_sites)?;
        let plan = Reconciler::new(self.config).reconcile(self.plan()?, &active)?;
        Ok(FlowModel {
            base_path: self.base_path.clone(),
            config: self.config,
            plan: Some(plan),
        })
    }

    /// Like `reconcile`, with the active sites taken from a frame column.
    #[pyo3(signature = (active_sites, column=None))]
    fn reconcile_frame(
        &self,
        active_sites: PyDataFrame,
        column: Option<&str>,
    ) -> PyResult<FlowModel> {
        let active =
            ActiveSites::from_column(&active_sites.0, column.unwrap_or(schema::active::SITE_ID))?;
        let plan = Reconciler::new(self.config).reconcile(self.plan()?, &active)?;
        Ok(FlowModel {
            base_path: self.base_path.clone(),
            config: self.config,
            plan: Some(plan),
        })
    }

    fn __len__(&self) -> usize {
        self.plan.as_ref().map_or(0, FlowPlan::len)
    }
}

impl FlowModel {
    fn plan(&self) -> Result<&FlowPlan, FlowError> {
        self.plan
            .as_ref()
            .ok_or_else(|| FlowError::NotLoaded("edges".into()))
    }
}

/// Route engine logs to stderr. `RUST_LOG` overrides `filter`.
#[pyfunction]
#[pyo3(signature = (filter="info".to_string(), json=false))]
fn init_logging(filter: String, json: bool) -> PyResult<()> {
    init_tracing(&LoggingConfig { filter, json })?;
    Ok(())
}

/// Export schema constants as Python submodules
fn add_schema_exports(m: &Bound<'_, PyModule>) -> PyResult<()> {
    // Edge
    let edge = PyModule::new(m.py(), "edge")?;
    for name in schema::edge::TEXT.iter().chain(schema::edge::NUMERIC.iter()) {
        edge.add(name.to_uppercase(), *name)?;
    }
    m.add_submodule(&edge)?;

    // Metrics
    let metrics = PyModule::new(m.py(), "metrics")?;
    metrics.add("TOTAL_AMOUNT", schema::metrics::TOTAL_AMOUNT)?;
    metrics.add("TOTAL_COST", schema::metrics::TOTAL_COST)?;
    metrics.add("TOTAL_CO2_EMISSIONS", schema::metrics::TOTAL_CO2)?;
    m.add_submodule(&metrics)?;

    // Stage
    let stage = PyModule::new(m.py(), "stage")?;
    stage.add("SUPPLY", schema::stage::SUPPLY)?;
    stage.add("DISTRIBUTION", schema::stage::DISTRIBUTION)?;
    m.add_submodule(&stage)?;

    // Active sites
    let active = PyModule::new(m.py(), "active")?;
    active.add("SITE_ID", schema::active::SITE_ID)?;
    m.add_submodule(&active)?;

    // Site summary
    let summary = PyModule::new(m.py(), "summary")?;
    summary.add("SITE_ID", schema::summary::SITE_ID)?;
    summary.add("SITE_NAME", schema::summary::SITE_NAME)?;
    summary.add("SITE_TYPE", schema::summary::SITE_TYPE)?;
    summary.add("INBOUND", schema::summary::INBOUND)?;
    summary.add("OUTBOUND", schema::summary::OUTBOUND)?;
    summary.add("COST", schema::summary::COST)?;
    summary.add("CO2_EMISSIONS", schema::summary::CO2)?;
    m.add_submodule(&summary)?;

    Ok(())
}

#[pymodule]
fn csc_flow(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<FlowModel>()?;
    m.add_function(wrap_pyfunction!(init_logging, m)?)?;
    add_schema_exports(m)?;
    Ok(())
}
