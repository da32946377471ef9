/// Gameplay tuning for the static planets.

#[derive(Debug, Clone, Copy)]
pub struct PlanetTuning {
    pub earth_radius: f64,
    pub earth_gravity: f64,

    pub moon_radius: f64,
    pub moon_gravity: f64,

    /// Horizontal distance from the earth's center to the moon's.
    pub moon_offset: f64,
}

impl Default for PlanetTuning {
    fn default() -> Self {
        Self {
            earth_radius: 40.0,
            earth_gravity: 800.0,
            moon_radius: 10.0,
            moon_gravity: 100.0,
            moon_offset: 500.0,
        }
    }
}
