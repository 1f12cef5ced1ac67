//! Slot kinds and name resolution
//!
//! A slot is a named category of segments within a trip. Conversational
//! controllers address slots with loose names ("flights", "hotel",
//! "transfer"), so resolution is case-insensitive and alias-aware.

use serde::{Deserialize, Serialize};

use super::error::PlanError;

/// The four slot categories of a trip plan
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SlotKind {
    FlightsOutbound,
    FlightsInbound,
    Accommodation,
    GroundTransport,
}

impl SlotKind {
    /// Fixed iteration order for cross-slot sweeps
    pub const ALL: [SlotKind; 4] = [
        SlotKind::FlightsOutbound,
        SlotKind::FlightsInbound,
        SlotKind::Accommodation,
        SlotKind::GroundTransport,
    ];

    /// Canonical name of this slot kind
    pub fn as_str(self) -> &'static str {
        match self {
            Self::FlightsOutbound => "flights_outbound",
            Self::FlightsInbound => "flights_inbound",
            Self::Accommodation => "accommodation",
            Self::GroundTransport => "ground_transport",
        }
    }

    /// Resolve a slot name from a conversational controller
    ///
    /// Case-insensitive; bare "flights" means the outbound leg.
    pub fn resolve(name: &str) -> Result<Self, PlanError> {
        match name.trim().to_lowercase().as_str() {
            "flights_outbound" | "flights" | "flight" | "outbound" => Ok(Self::FlightsOutbound),
            "flights_inbound" | "inbound" | "return" => Ok(Self::FlightsInbound),
            "accommodation" | "hotel" | "hotels" | "stay" => Ok(Self::Accommodation),
            "ground_transport" | "transfer" | "transfers" | "transport" | "ground" | "car" => {
                Ok(Self::GroundTransport)
            }
            _ => Err(PlanError::UnknownSlot(name.to_string())),
        }
    }
}

impl std::fmt::Display for SlotKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_canonical_names() {
        for kind in SlotKind::ALL {
            assert_eq!(SlotKind::resolve(kind.as_str()).unwrap(), kind);
        }
    }

    #[test]
    fn test_resolve_aliases() {
        assert_eq!(SlotKind::resolve("flights").unwrap(), SlotKind::FlightsOutbound);
        assert_eq!(SlotKind::resolve("flight").unwrap(), SlotKind::FlightsOutbound);
        assert_eq!(SlotKind::resolve("hotel").unwrap(), SlotKind::Accommodation);
        assert_eq!(SlotKind::resolve("hotels").unwrap(), SlotKind::Accommodation);
        assert_eq!(SlotKind::resolve("transfer").unwrap(), SlotKind::GroundTransport);
        assert_eq!(SlotKind::resolve("transfers").unwrap(), SlotKind::GroundTransport);
        assert_eq!(SlotKind::resolve("transport").unwrap(), SlotKind::GroundTransport);
        assert_eq!(SlotKind::resolve("ground").unwrap(), SlotKind::GroundTransport);
    }

    #[test]
    fn test_resolve_is_case_insensitive_and_trims() {
        assert_eq!(SlotKind::resolve("  Flights ").unwrap(), SlotKind::FlightsOutbound);
        assert_eq!(SlotKind::resolve("HOTEL").unwrap(), SlotKind::Accommodation);
    }

    #[test]
    fn test_resolve_unknown_name_fails() {
        let err = SlotKind::resolve("cruise").unwrap_err();
        assert!(matches!(err, PlanError::UnknownSlot(name) if name == "cruise"));
    }

    #[test]
    fn test_serde_names_match_canonical() {
        let value = serde_json::to_value(SlotKind::GroundTransport).unwrap();
        assert_eq!(value, "ground_transport");
    }
}
