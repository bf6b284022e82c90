use std::collections::HashMap;

use polars::prelude::*;

use crate::edge::{Edge, SiteType, Stage};
use crate::error::FlowError;
use crate::plan::FlowPlan;
use crate::schema::summary;

/// Per-site throughput and attributed cost.
#[derive(Debug, Clone, PartialEq)]
pub struct SiteSummary {
    pub site_id: String,
    pub site_name: String,
    pub site_type: SiteType,
    pub inbound: f64,
    pub outbound: f64,
    pub cost: f64,
    pub co2: f64,
}

impl SiteSummary {
    fn new(site_id: &str, site_name: &str, site_type: SiteType) -> Self {
        Self {
            site_id: site_id.to_string(),
            site_name: site_name.to_string(),
            site_type,
            inbound: 0.0,
            outbound: 0.0,
            cost: 0.0,
            co2: 0.0,
        }
    }
}

/// One summary per site, in order of first appearance.
///
/// Costs are attributed the same way plan metrics count them: a supply
/// edge charges its farm and its warehouse, a distribution edge charges
/// only its restaurant. Transport is never attributed to a site.
pub fn summarize_sites(plan: &FlowPlan) -> Vec<SiteSummary> {
    let mut sites: Vec<SiteSummary> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    let mut slot = |id: &str, name: &str, site_type: SiteType| -> usize {
        *index.entry(id.to_string()).or_insert_with(|| {
            sites.push(SiteSummary::new(id, name, site_type));
            sites.len() - 1
        })
    };

    let mut updates: Vec<(usize, usize, &Edge)> = Vec::with_capacity(plan.len());
    for edge in plan.edges() {
        let source = slot(&edge.source_id, &edge.source_name, edge.source_type);
        let target = slot(&edge.target_id, &edge.target_name, edge.target_type);
        updates.push((source, target, edge));
    }

    for (source, target, edge) in updates {
        sites[source].outbound += edge.amount;
        sites[target].inbound += edge.amount;
        match edge.stage {
            Stage::Supply => {
                sites[source].cost += edge.source_cost;
                sites[source].co2 += edge.source_co2;
                sites[target].cost += edge.target_cost;
                sites[target].co2 += edge.target_co2;
            }
            Stage::Distribution => {
                sites[target].cost += edge.target_cost;
                sites[target].co2 += edge.target_co2;
            }
        }
    }

    sites
}

pub fn summary_frame(sites: &[SiteSummary]) -> Result<DataFrame, FlowError> {
    let ids: Vec<&str> = sites.iter().map(|s| s.site_id.as_str()).collect();
    let names: Vec<&str> = sites.iter().map(|s| s.site_name.as_str()).collect();
    let types: Vec<&str> = sites.iter().map(|s| s.site_type.as_str()).collect();
    let inbound: Vec<f64> = sites.iter().map(|s| s.inbound).collect();
    let outbound: Vec<f64> = sites.iter().map(|s| s.outbound).collect();
    let cost: Vec<f64> = sites.iter().map(|s| s.cost).collect();
    let co2: Vec<f64> = sites.iter().map(|s| s.co2).collect();

    let df = DataFrame::new(vec![
        Column::new(summary::SITE_ID.into(), ids),
        Column::new(summary::SITE_NAME.into(), names),
        Column::new(summary::SITE_TYPE.into(), types),
        Column::new(summary::INBOUND.into(), inbound),
        Column::new(summary::OUTBOUND.into(), outbound),
        Column::new(summary::COST.into(), cost),
        Column::new(summary::CO2.into(), co2),
    ])?;
    Ok(df)
}
