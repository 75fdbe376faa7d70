use serde::{Deserialize, Serialize};

use crate::locator::offices::Office;

pub const EARTH_RADIUS_KM: f64 = 6371.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub latitude: f64,
    pub longitude: f64,
}

impl Position {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude }
    }

    pub fn is_valid(&self) -> bool {
        self.latitude.is_finite()
            && self.longitude.is_finite()
            && (-90.0..=90.0).contains(&self.latitude)
            && (-180.0..=180.0).contains(&self.longitude)
    }
}

impl From<&Office> for Position {
    fn from(office: &Office) -> Self {
        Self::new(office.latitude, office.longitude)
    }
}

/// Great-circle distance in kilometres.
pub fn haversine_km(from: Position, to: Position) -> f64 {
    let d_lat = (to.latitude - from.latitude).to_radians();
    let d_lon = (to.longitude - from.longitude).to_radians();
    let a = (d_lat / 2.0).sin().powi(2)
        + from.latitude.to_radians().cos()
            * to.latitude.to_radians().cos()
            * (d_lon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());
    EARTH_RADIUS_KM * c
}

#[derive(Debug, Clone, Copy)]
pub struct Nearest<'a> {
    pub office: &'a Office,
    pub distance_km: f64,
}

/// Linear scan keeping the strict minimum, so ties go to the earlier office.
pub fn nearest(from: Position, offices: &[Office]) -> Option<Nearest<'_>> {
    let mut best: Option<Nearest<'_>> = None;
    for office in offices {
        let distance_km = haversine_km(from, office.into());
        if best.map_or(true, |b| distance_km < b.distance_km) {
            best = Some(Nearest { office, distance_km });
        }
    }
    best
}
