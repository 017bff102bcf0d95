//! Duplicate detection for fuel stations reported by overlapping queries.

use geo::{Distance, Haversine, Point};

use super::PetrolPump;

/// Coordinates closer than this on both axes denote the same station.
const EXACT_EPSILON_DEGREES: f64 = 1e-5;
/// Named stations closer than this with matching names are the same station.
const NAMED_MATCH_METRES: f64 = 50.0;

/// Drop duplicates, keeping the first occurrence of every station.
///
/// Two records are duplicates when their coordinates agree within `1e-5`
/// degrees on both axes, or when they lie within 50 m of each other and both
/// carry the same name ignoring case and surrounding whitespace.
///
/// # Examples
/// ```
/// use fuelroute::domain::{Coordinate, PetrolPump, dedup_stations};
///
/// let pump = |name: &str| PetrolPump {
///     name: Some(name.to_owned()),
///     location: Coordinate::new(40.05, -74.05).expect("valid"),
///     address: None,
///     city: None,
///     state: None,
/// };
/// let kept = dedup_stations([pump("Shell"), pump("SHELL")]);
/// assert_eq!(kept.len(), 1);
/// assert_eq!(kept[0].name.as_deref(), Some("Shell"));
/// ```
pub fn dedup_stations(stations: impl IntoIterator<Item = PetrolPump>) -> Vec<PetrolPump> {
    let mut kept: Vec<PetrolPump> = Vec::new();
    for station in stations {
        if !kept.iter().any(|seen| is_same_station(seen, &station)) {
            kept.push(station);
        }
    }
    kept
}

fn is_same_station(a: &PetrolPump, b: &PetrolPump) -> bool {
    let d_lat = (a.location.latitude() - b.location.latitude()).abs();
    let d_lon = (a.location.longitude() - b.location.longitude()).abs();
    if d_lat <= EXACT_EPSILON_DEGREES && d_lon <= EXACT_EPSILON_DEGREES {
        return true;
    }
    names_match(a.name.as_deref(), b.name.as_deref()) && metres_between(a, b) <= NAMED_MATCH_METRES
}

fn names_match(a: Option<&str>, b: Option<&str>) -> bool {
    match (a, b) {
        (Some(a), Some(b)) => a.trim().to_lowercase() == b.trim().to_lowercase(),
        _ => false,
    }
}

fn metres_between(a: &PetrolPump, b: &PetrolPump) -> f64 {
    let point = |pump: &PetrolPump| Point::new(pump.location.longitude(), pump.location.latitude());
    Haversine.distance(point(a), point(b))
}
