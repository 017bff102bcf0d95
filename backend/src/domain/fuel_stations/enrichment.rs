//! Best-effort address enrichment through reverse geocoding.

use std::sync::Arc;

use futures_util::{StreamExt, stream};
use tokio::time::Instant;
use tracing::{debug, warn};

use super::PetrolPump;
use crate::domain::ports::{AddressLookup, AddressParts};

/// Fills missing address fields of stations via an [`AddressLookup`].
#[derive(Clone)]
pub struct AddressEnricher {
    lookup: Arc<dyn AddressLookup>,
    concurrency: usize,
}

impl AddressEnricher {
    /// Build an enricher running at most `concurrency` lookups at once.
    pub fn new(lookup: Arc<dyn AddressLookup>, concurrency: usize) -> Self {
        Self {
            lookup,
            concurrency: concurrency.max(1),
        }
    }

    /// Enrich `stations`, preserving their order.
    ///
    /// Only stations lacking a field are looked up and only missing fields
    /// are filled. Lookup failures leave the station untouched.
    pub async fn enrich(&self, stations: Vec<PetrolPump>) -> Vec<PetrolPump> {
        self.enrich_all(stations, None).await
    }

    /// Like [`Self::enrich`], but no lookup runs past `deadline`.
    ///
    /// Stations whose lookup is cut short or never started keep the fields
    /// they already had.
    pub async fn enrich_until(
        &self,
        stations: Vec<PetrolPump>,
        deadline: Instant,
    ) -> Vec<PetrolPump> {
        self.enrich_all(stations, Some(deadline)).await
    }

    async fn enrich_all(
        &self,
        stations: Vec<PetrolPump>,
        deadline: Option<Instant>,
    ) -> Vec<PetrolPump> {
        stream::iter(stations)
            .map(|station| self.enrich_one(station, deadline))
            .buffered(self.concurrency)
            .collect()
            .await
    }

    async fn enrich_one(&self, mut station: PetrolPump, deadline: Option<Instant>) -> PetrolPump {
        if !station.lacks_address() {
            return station;
        }
        let lookup = self.lookup.reverse(station.location);
        let outcome = match deadline {
            Some(deadline) if deadline <= Instant::now() => None,
            Some(deadline) => tokio::time::timeout_at(deadline, lookup).await.ok(),
            None => Some(lookup.await),
        };
        match outcome {
            Some(Ok(parts)) => fill_missing(&mut station, parts),
            Some(Err(err)) => warn!(
                location = %station.location,
                error = %err,
                "reverse geocoding failed; keeping station without address"
            ),
            None => debug!(
                location = %station.location,
                "enrichment deadline reached; keeping station without address"
            ),
        }
        station
    }
}

fn fill_missing(station: &mut PetrolPump, parts: AddressParts) {
    let AddressParts {
        address,
        city,
        state,
    } = parts;
    if station.address.is_none() {
        station.address = address;
    }
    if station.city.is_none() {
        station.city = city;
    }
    if station.state.is_none() {
        station.state = state;
    }
}
