use serde::Serialize;

use crate::model::{Fare, Station};

/// One policy's cheapest route: the total fare and the stations visited,
/// source and destination inclusive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Journey {
    pub total: Fare,
    #[serde(rename = "path")]
    pub stations: Vec<Station>,
}

impl Journey {
    pub(crate) fn at_station(station: &Station) -> Self {
        Journey {
            total: Fare::ZERO,
            stations: vec![station.clone()],
        }
    }
}

/// Result of one point-to-point query, one journey per fare policy.
///
/// The journeys are computed independently over the same network; nothing
/// forces them onto the same route.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JourneyFares {
    #[serde(rename = "storedValueCard")]
    pub stored_value: Journey,
    #[serde(rename = "singleJourneyTicket")]
    pub single_journey: Journey,
}

impl JourneyFares {
    pub(crate) fn at_station(station: &Station) -> Self {
        JourneyFares {
            stored_value: Journey::at_station(station),
            single_journey: Journey::at_station(station),
        }
    }
}
