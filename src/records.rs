//! Flat tabular form of a plan, for transport and storage.

use std::path::Path;

use polars::prelude::*;
use tracing::warn;

use crate::edge::Edge;
use crate::error::FlowError;
use crate::metrics::Metrics;
use crate::plan::FlowPlan;
use crate::schema::{edge, metrics};

/// Stored totals further than this from the recomputed ones get a warning.
const METRICS_TOLERANCE: f64 = 1e-6;

/// One row per edge plus a single-row metrics frame.
#[derive(Debug, Clone)]
pub struct PlanRecords {
    pub edges: DataFrame,
    pub metrics: DataFrame,
}

impl FlowPlan {
    pub fn to_record_form(&self) -> Result<PlanRecords, FlowError> {
        Ok(PlanRecords {
            edges: edges_to_frame(self.edges())?,
            metrics: metrics_to_frame(&self.metrics())?,
        })
    }

    /// Rebuild a plan. Metrics are recomputed from the edge rows; the
    /// stored metrics row is only checked against them.
    pub fn from_record_form(records: &PlanRecords) -> Result<Self, FlowError> {
        let plan = FlowPlan::new(edges_from_frame(&records.edges)?);
        let stored = metrics_from_frame(&records.metrics)?;
        if !stored.approx_eq(&plan.metrics(), METRICS_TOLERANCE) {
            warn!(
                stored_amount = stored.total_amount,
                stored_cost = stored.total_cost,
                recomputed_amount = plan.metrics().total_amount,
                recomputed_cost = plan.metrics().total_cost,
                "stored metrics disagree with edges, using recomputed totals"
            );
        }
        Ok(plan)
    }

    pub fn from_edge_frame(df: &DataFrame) -> Result<Self, FlowError> {
        Ok(FlowPlan::new(edges_from_frame(df)?))
    }
}

pub fn edges_to_frame(edges: &[Edge]) -> Result<DataFrame, FlowError> {
    let text = |name: &str, f: fn(&Edge) -> &str| -> Column {
        let values: Vec<&str> = edges.iter().map(f).collect();
        Column::new(name.into(), values)
    };
    let number = |name: &str, f: fn(&Edge) -> f64| -> Column {
        let values: Vec<f64> = edges.iter().map(f).collect();
        Column::new(name.into(), values)
    };

    let df = DataFrame::new(vec![
        text(edge::STAGE, |e| e.stage.as_str()),
        text(edge::SOURCE_ID, |e| e.source_id.as_str()),
        text(edge::SOURCE_NAME, |e| e.source_name.as_str()),
        text(edge::SOURCE_TYPE, |e| e.source_type.as_str()),
        number(edge::SOURCE_COST, |e| e.source_cost),
        number(edge::SOURCE_CO2, |e| e.source_co2),
        text(edge::TARGET_ID, |e| e.target_id.as_str()),
        text(edge::TARGET_NAME, |e| e.target_name.as_str()),
        text(edge::TARGET_TYPE, |e| e.target_type.as_str()),
        number(edge::TARGET_COST, |e| e.target_cost),
        number(edge::TARGET_CO2, |e| e.target_co2),
        text(edge::VEHICLE_COMPANY, |e| e.vehicle_company.as_str()),
        text(edge::VEHICLE_TYPE, |e| e.vehicle_type.as_str()),
        number(edge::AMOUNT, |e| e.amount),
        number(edge::TRANSPORT_COST, |e| e.transport_cost),
        number(edge::TRANSPORT_CO2, |e| e.transport_co2),
    ])?;

    Ok(df)
}

/// Parse edge rows. Numeric columns may arrive as any castable dtype.
pub fn edges_from_frame(df: &DataFrame) -> Result<Vec<Edge>, FlowError> {
    require_columns(df, &edge::TEXT)?;
    require_columns(df, &edge::NUMERIC)?;

    let stage = str_column(df, edge::STAGE)?;
    let source_id = str_column(df, edge::SOURCE_ID)?;
    let source_name = str_column(df, edge::SOURCE_NAME)?;
    let source_type = str_column(df, edge::SOURCE_TYPE)?;
    let target_id = str_column(df, edge::TARGET_ID)?;
    let target_name = str_column(df, edge::TARGET_NAME)?;
    let target_type = str_column(df, edge::TARGET_TYPE)?;
    let vehicle_company = str_column(df, edge::VEHICLE_COMPANY)?;
    let vehicle_type = str_column(df, edge::VEHICLE_TYPE)?;

    let source_cost = f64_column(df, edge::SOURCE_COST)?;
    let source_co2 = f64_column(df, edge::SOURCE_CO2)?;
    let target_cost = f64_column(df, edge::TARGET_COST)?;
    let target_co2 = f64_column(df, edge::TARGET_CO2)?;
    let amount = f64_column(df, edge::AMOUNT)?;
    let transport_cost = f64_column(df, edge::TRANSPORT_COST)?;
    let transport_co2 = f64_column(df, edge::TRANSPORT_CO2)?;

    let mut edges = Vec::with_capacity(df.height());
    for i in 0..df.height() {
        let amount = number_at(&amount, edge::AMOUNT, i)?;
        if amount < 0.0 {
            return Err(FlowError::InvalidData(format!(
                "Negative amount {amount} at row {i}"
            )));
        }

        edges.push(Edge {
            stage: text_at(stage, edge::STAGE, i)?.parse()?,
            source_id: text_at(source_id, edge::SOURCE_ID, i)?.to_string(),
            source_name: text_at(source_name, edge::SOURCE_NAME, i)?.to_string(),
            source_type: text_at(source_type, edge::SOURCE_TYPE, i)?.parse()?,
            source_cost: number_at(&source_cost, edge::SOURCE_COST, i)?,
            source_co2: number_at(&source_co2, edge::SOURCE_CO2, i)?,
            target_id: text_at(target_id, edge::TARGET_ID, i)?.to_string(),
            target_name: text_at(target_name, edge::TARGET_NAME, i)?.to_string(),
            target_type: text_at(target_type, edge::TARGET_TYPE, i)?.parse()?,
            target_cost: number_at(&target_cost, edge::TARGET_COST, i)?,
            target_co2: number_at(&target_co2, edge::TARGET_CO2, i)?,
            vehicle_company: text_at(vehicle_company, edge::VEHICLE_COMPANY, i)?.to_string(),
            vehicle_type: text_at(vehicle_type, edge::VEHICLE_TYPE, i)?.to_string(),
            amount,
            transport_cost: number_at(&transport_cost, edge::TRANSPORT_COST, i)?,
            transport_co2: number_at(&transport_co2, edge::TRANSPORT_CO2, i)?,
        });
    }

    Ok(edges)
}

pub fn metrics_to_frame(m: &Metrics) -> Result<DataFrame, FlowError> {
    let df = DataFrame::new(vec![
        Column::new(metrics::TOTAL_AMOUNT.into(), &[m.total_amount]),
        Column::new(metrics::TOTAL_COST.into(), &[m.total_cost]),
        Column::new(metrics::TOTAL_CO2.into(), &[m.total_co2_emissions]),
    ])?;
    Ok(df)
}

pub fn metrics_from_frame(df: &DataFrame) -> Result<Metrics, FlowError> {
    require_columns(df, &metrics::ALL)?;
    if df.height() != 1 {
        return Err(FlowError::InvalidData(format!(
            "Metrics frame must have exactly one row, found {}",
            df.height()
        )));
    }

    Ok(Metrics {
        total_amount: number_at(&f64_column(df, metrics::TOTAL_AMOUNT)?, metrics::TOTAL_AMOUNT, 0)?,
        total_cost: number_at(&f64_column(df, metrics::TOTAL_COST)?, metrics::TOTAL_COST, 0)?,
        total_co2_emissions: number_at(&f64_column(df, metrics::TOTAL_CO2)?, metrics::TOTAL_CO2, 0)?,
    })
}

/// Load an edge table from CSV.
///
/// Every column is read as a string; the numeric edge columns are then
/// stripped and cast to Float64. Column names are trimmed.
pub fn read_edges_csv(path: impl AsRef<Path>) -> Result<DataFrame, FlowError> {
    let mut df = CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(Some(0)) // all columns as String
        .try_into_reader_with_file_path(Some(path.as_ref().to_path_buf()))?
        .finish()?;

    let trimmed: Vec<String> = df
        .get_column_names_str()
        .iter()
        .map(|c| c.trim().to_string())
        .collect();
    df.set_column_names(trimmed.as_slice())?;

    require_columns(&df, &edge::TEXT)?;
    require_columns(&df, &edge::NUMERIC)?;

    let casts: Vec<Expr> = edge::NUMERIC
        .iter()
        .map(|name| {
            col(*name)
                .str()
                .strip_chars(lit(" \t\r\n"))
                .cast(DataType::Float64)
        })
        .collect();

    Ok(df.lazy().with_columns(casts).collect()?)
}

fn require_columns(df: &DataFrame, required: &[&str]) -> Result<(), FlowError> {
    for &col_name in required {
        if df.column(col_name).is_err() {
            return Err(FlowError::MissingColumn(col_name.to_string()));
        }
    }
    Ok(())
}

fn str_column<'a>(df: &'a DataFrame, name: &str) -> Result<&'a StringChunked, FlowError> {
    let column = df.column(name)?;
    column.str().map_err(|_| {
        FlowError::InvalidData(format!(
            "Column '{name}' has dtype {}, expected string",
            column.dtype()
        ))
    })
}

fn f64_column(df: &DataFrame, name: &str) -> Result<Float64Chunked, FlowError> {
    let column = df.column(name)?.cast(&DataType::Float64)?;
    Ok(column.f64()?.clone())
}

fn text_at<'a>(values: &'a StringChunked, name: &str, row: usize) -> Result<&'a str, FlowError> {
    values
        .get(row)
        .ok_or_else(|| FlowError::InvalidData(format!("Null {name} at row {row}")))
}

fn number_at(values: &Float64Chunked, name: &str, row: usize) -> Result<f64, FlowError> {
    match values.get(row) {
        Some(v) if v.is_finite() => Ok(v),
        Some(v) => Err(FlowError::InvalidData(format!(
            "Non-finite {name} {v} at row {row}"
        ))),
        None => Err(FlowError::InvalidData(format!("Null {name} at row {row}"))),
    }
}
