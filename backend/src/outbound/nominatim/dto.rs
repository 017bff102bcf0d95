//! DTOs for decoding Nominatim JSON responses.

use serde::Deserialize;

use crate::domain::Coordinate;
use crate::domain::ports::AddressParts;

/// One `/search` result. Nominatim encodes coordinates as strings.
#[derive(Debug, Deserialize)]
pub(super) struct SearchResultDto {
    pub(super) lat: String,
    pub(super) lon: String,
}

impl SearchResultDto {
    pub(super) fn into_coordinate(self) -> Result<Coordinate, String> {
        let parse = |raw: &str, axis: &str| {
            raw.trim()
                .parse::<f64>()
                .map_err(|err| format!("invalid {axis} '{raw}': {err}"))
        };
        let latitude = parse(&self.lat, "latitude")?;
        let longitude = parse(&self.lon, "longitude")?;
        Coordinate::new(latitude, longitude).map_err(|err| err.to_string())
    }
}

/// `/reverse` response; `error` is set when nothing is near the point.
#[derive(Debug, Deserialize)]
pub(super) struct ReverseResultDto {
    #[serde(default)]
    pub(super) address: Option<AddressDto>,
    #[serde(default)]
    pub(super) error: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub(super) struct AddressDto {
    house_number: Option<String>,
    road: Option<String>,
    city: Option<String>,
    town: Option<String>,
    village: Option<String>,
    hamlet: Option<String>,
    state: Option<String>,
}

impl ReverseResultDto {
    pub(super) fn into_address_parts(self) -> AddressParts {
        self.address
            .map(AddressDto::into_address_parts)
            .unwrap_or_default()
    }
}

impl AddressDto {
    fn into_address_parts(self) -> AddressParts {
        let address = match (clean(self.house_number), clean(self.road)) {
            (Some(number), Some(road)) => Some(format!("{number} {road}")),
            (None, Some(road)) => Some(road),
            (_, None) => None,
        };
        let city = clean(self.city)
            .or_else(|| clean(self.town))
            .or_else(|| clean(self.village))
            .or_else(|| clean(self.hamlet));
        AddressParts {
            address,
            city,
            state: clean(self.state),
        }
    }
}

fn clean(value: Option<String>) -> Option<String> {
    value
        .map(|raw| raw.trim().to_owned())
        .filter(|trimmed| !trimmed.is_empty())
}
