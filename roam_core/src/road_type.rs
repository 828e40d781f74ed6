use crate::error::NetworkError;

/// Classification of a road. Each type carries the reference speed used to
/// turn geographic distance into travel time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RoadType {
    Motorway,
    Trunk,
    Primary,
    Secondary,
    Tertiary,
    MotorwayLink,
    TrunkLink,
    PrimaryLink,
    SecondaryLink,
    Road,
    Unclassified,
    Residential,
    Unsurfaced,
    LivingStreet,
    Service,
}

impl RoadType {
    /// Reference speed in km/h.
    pub fn average_speed_kmh(self) -> f32 {
        match self {
            RoadType::Motorway => 110.0,
            RoadType::Trunk => 110.0,
            RoadType::Primary => 70.0,
            RoadType::Secondary => 60.0,
            RoadType::Tertiary => 50.0,
            RoadType::MotorwayLink => 50.0,
            RoadType::TrunkLink => 50.0,
            RoadType::PrimaryLink => 50.0,
            RoadType::SecondaryLink => 50.0,
            RoadType::Road => 40.0,
            RoadType::Unclassified => 40.0,
            RoadType::Residential => 30.0,
            RoadType::Unsurfaced => 30.0,
            RoadType::LivingStreet => 10.0,
            RoadType::Service => 5.0,
        }
    }

    /// The road type with the highest reference speed.
    pub fn fastest() -> RoadType {
        RoadType::Motorway
    }

    /// Looks up the road type for an OSM `highway` tag value. Names match
    /// case-insensitively; anything outside the enumeration fails with
    /// [`NetworkError::UnknownRoadType`].
    pub fn from_osm_name(name: &str) -> Result<RoadType, NetworkError> {
        match name.to_ascii_lowercase().as_str() {
            "motorway" => Ok(RoadType::Motorway),
            "trunk" => Ok(RoadType::Trunk),
            "primary" => Ok(RoadType::Primary),
            "secondary" => Ok(RoadType::Secondary),
            "tertiary" => Ok(RoadType::Tertiary),
            "motorway_link" => Ok(RoadType::MotorwayLink),
            "trunk_link" => Ok(RoadType::TrunkLink),
            "primary_link" => Ok(RoadType::PrimaryLink),
            "secondary_link" => Ok(RoadType::SecondaryLink),
            "road" => Ok(RoadType::Road),
            "unclassified" => Ok(RoadType::Unclassified),
            "residential" => Ok(RoadType::Residential),
            "unsurfaced" => Ok(RoadType::Unsurfaced),
            "living_street" => Ok(RoadType::LivingStreet),
            "service" => Ok(RoadType::Service),
            _ => Err(NetworkError::UnknownRoadType(name.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reference_speeds() {
        assert_eq!(RoadType::Motorway.average_speed_kmh(), 110.0);
        assert_eq!(RoadType::Tertiary.average_speed_kmh(), 50.0);
        assert_eq!(RoadType::LivingStreet.average_speed_kmh(), 10.0);
        assert_eq!(RoadType::Service.average_speed_kmh(), 5.0);
    }

    #[test]
    fn fastest_is_the_motorway() {
        assert_eq!(RoadType::fastest(), RoadType::Motorway);
    }

    #[test]
    fn osm_names_match_case_insensitively() {
        assert_eq!(
            RoadType::from_osm_name("motorway").unwrap(),
            RoadType::Motorway
        );
        assert_eq!(
            RoadType::from_osm_name("MOTORWAY").unwrap(),
            RoadType::Motorway
        );
        assert_eq!(
            RoadType::from_osm_name("Living_Street").unwrap(),
            RoadType::LivingStreet
        );
    }

    #[test]
    fn unknown_osm_names_are_rejected() {
        assert!(matches!(
            RoadType::from_osm_name("cycleway"),
            Err(NetworkError::UnknownRoadType(name)) if name == "cycleway"
        ));
    }
}
