/// Column-name constants for the csc-flow record form.
/// Single source of truth - exported to Python via PyO3.

// ── Edge columns ────────────────────────────────────────────────────────────
pub mod edge {
    pub const STAGE: &str = "stage";
    pub const SOURCE_ID: &str = "source_id";
    pub const SOURCE_NAME: &str = "source_name";
    pub const SOURCE_TYPE: &str = "source_type";
    pub const SOURCE_COST: &str = "source_cost";
    pub const SOURCE_CO2: &str = "source_co2_emissions";
    pub const TARGET_ID: &str = "target_id";
    pub const TARGET_NAME: &str = "target_name";
    pub const TARGET_TYPE: &str = "target_type";
    pub const TARGET_COST: &str = "target_cost";
    pub const TARGET_CO2: &str = "target_co2_emissions";
    pub const VEHICLE_COMPANY: &str = "vehicle_company";
    pub const VEHICLE_TYPE: &str = "vehicle_type";
    pub const AMOUNT: &str = "amount";
    pub const TRANSPORT_COST: &str = "transport_cost";
    pub const TRANSPORT_CO2: &str = "transport_co2_emissions";

    pub const TEXT: [&str; 9] = [
        STAGE,
        SOURCE_ID,
        SOURCE_NAME,
        SOURCE_TYPE,
        TARGET_ID,
        TARGET_NAME,
        TARGET_TYPE,
        VEHICLE_COMPANY,
        VEHICLE_TYPE,
    ];

    pub const NUMERIC: [&str; 7] = [
        SOURCE_COST,
        SOURCE_CO2,
        TARGET_COST,
        TARGET_CO2,
        AMOUNT,
        TRANSPORT_COST,
        TRANSPORT_CO2,
    ];
}

// ── Metrics columns ─────────────────────────────────────────────────────────
pub mod metrics {
    pub const TOTAL_AMOUNT: &str = "total_amount";
    pub const TOTAL_COST: &str = "total_cost";
    pub const TOTAL_CO2: &str = "total_co2_emissions";

    pub const ALL: [&str; 3] = [TOTAL_AMOUNT, TOTAL_COST, TOTAL_CO2];
}

// ── Stage values ────────────────────────────────────────────────────────────
pub mod stage {
    pub const SUPPLY: &str = "supply";
    pub const DISTRIBUTION: &str = "distribution";
}

// ── Site type values ────────────────────────────────────────────────────────
pub mod site_type {
    pub const FARM: &str = "farm";
    pub const WAREHOUSE: &str = "warehouse";
    pub const RESTAURANT: &str = "restaurant";
}

// ── Site summary columns ────────────────────────────────────────────────────
pub mod summary {
    pub const SITE_ID: &str = "site_id";
    pub const SITE_NAME: &str = "site_name";
    pub const SITE_TYPE: &str = "site_type";
    pub const INBOUND: &str = "inbound";
    pub const OUTBOUND: &str = "outbound";
    pub const COST: &str = "cost";
    pub const CO2: &str = "co2_emissions";
}

// ── Active site columns ─────────────────────────────────────────────────────
pub mod active {
    pub const SITE_ID: &str = "site_id";
}
