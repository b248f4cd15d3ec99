//! Default data shared by the migrations and the in-memory provider

/// `(name, display_name, icon)`
pub const VEHICLE_TYPES: &[(&str, &str, &str)] =
    &[("motorcycle", "Motorcycle", "zap"), ("car", "Car", "car")];

/// A tier in storage units.
#[derive(Debug, Clone, Copy)]
pub struct SeedTier {
    pub min_distance_m: i64,
    pub max_distance_m: Option<i64>,
    pub base_fare_cents: i64,
    pub per_km_rate_cents: i64,
}

/// Schedule every seeded vehicle type starts with:
/// 0-2 km for 50.00 flat, 10.00/km up to 8 km, 12.00/km beyond.
pub const DEFAULT_SCHEDULE: &[SeedTier] = &[
    SeedTier {
        min_distance_m: 0,
        max_distance_m: Some(2_000),
        base_fare_cents: 5_000,
        per_km_rate_cents: 0,
    },
    SeedTier {
        min_distance_m: 2_000,
        max_distance_m: Some(8_000),
        base_fare_cents: 0,
        per_km_rate_cents: 1_000,
    },
    SeedTier {
        min_distance_m: 8_000,
        max_distance_m: None,
        base_fare_cents: 0,
        per_km_rate_cents: 1_200,
    },
];
