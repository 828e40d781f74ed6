/// Mean radius of planet Earth in meters, used as a fast approximation.
const EARTH_RADIUS_MEAN_METERS: f64 = 6_371_000.0;

/// Factor between meters per second and kilometers per hour.
const MS_TO_KMH: f32 = 3.6;

/// A geographic position in degrees. Single precision is enough for road
/// network distances; the trigonometry runs in double precision.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoPoint {
    pub lat: f32,
    pub lon: f32,
}

impl GeoPoint {
    pub fn new(lat: f32, lon: f32) -> Self {
        GeoPoint { lat, lon }
    }

    /// Distance to `other` in meters.
    pub fn distance(&self, other: &GeoPoint) -> f32 {
        distance_equirect(self.lat, self.lon, other.lat, other.lon)
    }
}

/// Computes the distance between two positions in meters, approximating
/// the earth as an equirectangular projection.
pub fn distance_equirect(
    first_lat_deg: f32,
    first_lon_deg: f32,
    second_lat_deg: f32,
    second_lon_deg: f32,
) -> f32 {
    let first_lat = (first_lat_deg as f64).to_radians();
    let first_lon = (first_lon_deg as f64).to_radians();
    let second_lat = (second_lat_deg as f64).to_radians();
    let second_lon = (second_lon_deg as f64).to_radians();

    let x = (second_lon - first_lon) * ((first_lat + second_lat) / 2.0).cos();
    let y = second_lat - first_lat;
    ((x * x + y * y).sqrt() * EARTH_RADIUS_MEAN_METERS) as f32
}

/// Converts a speed in kilometers per hour to meters per second.
pub fn kmh_to_ms(kmh: f32) -> f32 {
    kmh / MS_TO_KMH
}

/// Time in seconds needed to travel `distance` meters at `speed_kmh`.
pub fn travel_time(distance: f32, speed_kmh: f32) -> f32 {
    distance / kmh_to_ms(speed_kmh)
}

#[cfg(test)]
mod tests {
    use super::*;

    // Opposite corners of the rectangle the saarland examples use.
    const FIRST: (f32, f32) = (49.20, 6.95);
    const SECOND: (f32, f32) = (49.25, 7.05);

    #[test]
    fn distance_across_the_rectangle() {
        let distance = distance_equirect(FIRST.0, FIRST.1, SECOND.0, SECOND.1);
        assert!((distance - 9_146.0).abs() < 50.0, "got {distance}");
    }

    #[test]
    fn distance_is_symmetric() {
        let there = distance_equirect(FIRST.0, FIRST.1, SECOND.0, SECOND.1);
        let back = distance_equirect(SECOND.0, SECOND.1, FIRST.0, FIRST.1);
        assert_eq!(there, back);
    }

    #[test]
    fn distance_of_identical_points_is_zero() {
        assert_eq!(distance_equirect(FIRST.0, FIRST.1, FIRST.0, FIRST.1), 0.0);
    }

    #[test]
    fn speed_conversion() {
        assert_eq!(kmh_to_ms(3.6), 1.0);
        assert_eq!(kmh_to_ms(110.0), 110.0 / 3.6);
    }

    #[test]
    fn travel_time_on_a_motorway() {
        let distance = distance_equirect(FIRST.0, FIRST.1, SECOND.0, SECOND.1);
        let time = travel_time(distance, 110.0);
        assert!((time - 299.3).abs() < 2.0, "got {time}");
    }
}
