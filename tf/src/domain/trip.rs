//! TripPlan - the aggregate of all slots for one trip
//!
//! A TripPlan owns the four slot vectors plus the travel mode and trip
//! type, and computes overall completeness per mode. It is owned by a
//! session and mutated only through the slot registry accessors, never by
//! reaching into the vectors from outside.

use serde::{Deserialize, Serialize};

use super::segment::Segment;
use super::slot::SlotKind;

/// Which travel components the trip requires
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum TravelMode {
    /// Flights only
    FlightOnly,
    /// Ground transport only
    CarOnly,
    /// Flights and ground transport
    #[default]
    Both,
}

impl std::fmt::Display for TravelMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::FlightOnly => write!(f, "flight_only"),
            Self::CarOnly => write!(f, "car_only"),
            Self::Both => write!(f, "both"),
        }
    }
}

/// One-way or round trip
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum TripType {
    OneWay,
    #[default]
    RoundTrip,
}

impl std::fmt::Display for TripType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::OneWay => write!(f, "one_way"),
            Self::RoundTrip => write!(f, "round_trip"),
        }
    }
}

/// The aggregate travel state for one trip
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct TripPlan {
    /// Which components this trip requires
    #[serde(default)]
    pub mode: TravelMode,

    /// One-way or round trip
    #[serde(default)]
    pub trip_type: TripType,

    /// Outbound flight legs
    #[serde(default)]
    pub flights_outbound: Vec<Segment>,

    /// Inbound flight legs
    #[serde(default)]
    pub flights_inbound: Vec<Segment>,

    /// Hotel stays
    #[serde(default)]
    pub accommodation: Vec<Segment>,

    /// Transfers and car segments
    #[serde(default)]
    pub ground_transport: Vec<Segment>,
}

impl TripPlan {
    /// Create an empty plan for the given mode and trip type
    pub fn new(mode: TravelMode, trip_type: TripType) -> Self {
        Self {
            mode,
            trip_type,
            ..Self::default()
        }
    }

    /// Segments of one slot
    pub fn slot(&self, kind: SlotKind) -> &Vec<Segment> {
        match kind {
            SlotKind::FlightsOutbound => &self.flights_outbound,
            SlotKind::FlightsInbound => &self.flights_inbound,
            SlotKind::Accommodation => &self.accommodation,
            SlotKind::GroundTransport => &self.ground_transport,
        }
    }

    /// Mutable segments of one slot
    pub fn slot_mut(&mut self, kind: SlotKind) -> &mut Vec<Segment> {
        match kind {
            SlotKind::FlightsOutbound => &mut self.flights_outbound,
            SlotKind::FlightsInbound => &mut self.flights_inbound,
            SlotKind::Accommodation => &mut self.accommodation,
            SlotKind::GroundTransport => &mut self.ground_transport,
        }
    }

    /// Flights complete: outbound non-empty and fully confirmed; the
    /// inbound leg participates only when present
    fn flights_complete(&self) -> bool {
        !self.flights_outbound.is_empty()
            && self.flights_outbound.iter().all(Segment::is_complete)
            && self.flights_inbound.iter().all(Segment::is_complete)
    }

    /// Ground transport complete: non-empty and fully confirmed
    fn transport_complete(&self) -> bool {
        !self.ground_transport.is_empty()
            && self.ground_transport.iter().all(Segment::is_complete)
    }

    /// Overall completeness per travel mode
    ///
    /// An empty required slot is NOT complete: empty is indistinguishable
    /// from "not yet populated" under this model.
    pub fn is_complete(&self) -> bool {
        match self.mode {
            TravelMode::FlightOnly => self.flights_complete(),
            TravelMode::CarOnly => self.transport_complete(),
            TravelMode::Both => self.flights_complete() && self.transport_complete(),
        }
    }
}
