//! The route plan returned to callers.

use super::{Coordinate, PetrolPump, SelectedRoute};

/// Which geometry a [`RoutePlan`] carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RouteGeometry {
    /// The Douglas–Peucker simplified path.
    #[default]
    Simplified,
    /// The full path as returned by the routing provider.
    Full,
}

/// A selected route annotated with the fuel stations found along it.
#[derive(Debug, Clone, PartialEq)]
pub struct RoutePlan {
    /// Index of the route in the provider's response.
    pub route_index: usize,
    /// Route geometry from start to destination.
    pub route: Vec<Coordinate>,
    /// Deduplicated fuel stations near the route.
    pub petrol_pumps: Vec<PetrolPump>,
}

impl RoutePlan {
    /// Combine the pipeline outputs into a plan. Pure; never fails.
    ///
    /// # Examples
    /// ```
    /// use fuelroute::domain::ports::RouteCandidate;
    /// use fuelroute::domain::{Coordinate, RouteGeometry, RoutePlan, SelectedRoute};
    ///
    /// let path = vec![
    ///     Coordinate::new(40.0, -74.0)?,
    ///     Coordinate::new(40.05, -74.05)?,
    ///     Coordinate::new(40.1, -74.1)?,
    /// ];
    /// let selected = SelectedRoute {
    ///     index: 0,
    ///     candidate: RouteCandidate {
    ///         provider_index: 0,
    ///         path: path.clone(),
    ///         distance_metres: 14_000.0,
    ///         duration_seconds: 900.0,
    ///     },
    /// };
    /// let simplified = vec![path[0], path[2]];
    /// let plan = RoutePlan::assemble(&selected, simplified, Vec::new(), RouteGeometry::Full);
    /// assert_eq!(plan.route, path);
    /// # Ok::<(), fuelroute::domain::CoordinateError>(())
    /// ```
    pub fn assemble(
        selected: &SelectedRoute,
        simplified: Vec<Coordinate>,
        petrol_pumps: Vec<PetrolPump>,
        geometry: RouteGeometry,
    ) -> Self {
        let route = match geometry {
            RouteGeometry::Simplified => simplified,
            RouteGeometry::Full => selected.candidate.path.clone(),
        };
        Self {
            route_index: selected.index,
            route,
            petrol_pumps,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::RouteCandidate;
    use rstest::rstest;

    fn point(lat: f64, lon: f64) -> Coordinate {
        Coordinate::new(lat, lon).expect("valid coordinate")
    }

    #[rstest]
    #[case(RouteGeometry::Simplified, 2)]
    #[case(RouteGeometry::Full, 4)]
    fn geometry_selects_route_points(#[case] geometry: RouteGeometry, #[case] expected: usize) {
        let path = vec![
            point(0.0, 0.0),
            point(0.0, 1.0),
            point(0.0, 2.0),
            point(0.0, 3.0),
        ];
        let selected = SelectedRoute {
            index: 3,
            candidate: RouteCandidate {
                provider_index: 3,
                path: path.clone(),
                distance_metres: 1.0,
                duration_seconds: 1.0,
            },
        };
        let pump = PetrolPump {
            name: None,
            location: point(0.0, 1.5),
            address: None,
            city: None,
            state: None,
        };

        let plan = RoutePlan::assemble(
            &selected,
            vec![path[0], path[3]],
            vec![pump.clone()],
            geometry,
        );
        assert_eq!(plan.route_index, 3);
        assert_eq!(plan.route.len(), expected);
        assert_eq!(plan.petrol_pumps, vec![pump]);
    }
}
