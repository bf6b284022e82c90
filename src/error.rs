use thiserror::Error;

#[derive(Error, Debug)]
pub enum FlowError {
    #[error("Flow imbalance at junction {junction}: outflow {outflow} exceeds inflow {inflow}")]
    Imbalance {
        junction: String,
        inflow: f64,
        outflow: f64,
    },

    #[error(
        "No adjusted amount for distribution edge {source_id} ({source_name}) -> \
         {target_id} ({target_name})"
    )]
    UnmatchedEdge {
        source_id: String,
        source_name: String,
        target_id: String,
        target_name: String,
    },

    #[error("Invalid active site input: {0}")]
    InvalidSite(String),

    #[error("Unknown site: {0}")]
    UnknownSite(String),

    #[error("Unknown vehicle: {company} / {name}")]
    UnknownVehicle { company: String, name: String },

    #[error("Not loaded: {0}")]
    NotLoaded(String),

    #[error("Missing column: {0}")]
    MissingColumn(String),

    #[error("InvalidData: {0}")]
    InvalidData(String),

    #[error("Polars error: {0}")]
    Polars(#[from] polars::error::PolarsError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config error: {0}")]
    Config(#[from] Box<figment::Error>),

    #[error("Telemetry: {0}")]
    Telemetry(String),
}

impl From<figment::Error> for FlowError {
    fn from(err: figment::Error) -> Self {
        FlowError::Config(Box::new(err))
    }
}

#[cfg(feature = "python")]
impl From<FlowError> for pyo3::PyErr {
    fn from(err: FlowError) -> pyo3::PyErr {
        pyo3::exceptions::PyRuntimeError::new_err(err.to_string())
    }
}
