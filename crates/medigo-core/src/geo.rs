//! Great-circle distance.

/// Mean Earth radius in km.
const EARTH_RADIUS_KM: f64 = 6371.0;

/// Haversine distance between two points in km, rounded to one decimal place.
pub fn distance_km(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let d_lat = (lat2 - lat1).to_radians();
    let d_lon = (lon2 - lon1).to_radians();

    let a = (d_lat / 2.0).sin().powi(2)
        + lat1.to_radians().cos() * lat2.to_radians().cos() * (d_lon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    round_one_decimal(EARTH_RADIUS_KM * c)
}

fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_identical_points() {
        assert_eq!(distance_km(4.0511, 9.7679, 4.0511, 9.7679), 0.0);
    }

    #[test]
    fn test_douala_to_yaounde() {
        // Roughly 200 km as the crow flies
        let d = distance_km(4.0511, 9.7679, 3.8480, 11.5021);
        assert!((d - 193.4).abs() < 2.0, "got {}", d);
    }

    #[test]
    fn test_one_degree_of_latitude() {
        let d = distance_km(0.0, 0.0, 1.0, 0.0);
        assert_eq!(d, 111.2);
    }

    #[test]
    fn test_rounded_to_one_decimal() {
        let d = distance_km(4.0511, 9.7679, 4.0611, 9.7779);
        assert_eq!(d, (d * 10.0).round() / 10.0);
    }

    proptest! {
        #[test]
        fn distance_is_symmetric(
            lat1 in -90.0..90.0f64,
            lon1 in -180.0..180.0f64,
            lat2 in -90.0..90.0f64,
            lon2 in -180.0..180.0f64,
        ) {
            prop_assert_eq!(distance_km(lat1, lon1, lat2, lon2), distance_km(lat2, lon2, lat1, lon1));
        }

        #[test]
        fn distance_to_self_is_zero(lat in -90.0..90.0f64, lon in -180.0..180.0f64) {
            prop_assert_eq!(distance_km(lat, lon, lat, lon), 0.0);
        }

        #[test]
        fn distance_is_bounded(
            lat1 in -90.0..90.0f64,
            lon1 in -180.0..180.0f64,
            lat2 in -90.0..90.0f64,
            lon2 in -180.0..180.0f64,
        ) {
            let d = distance_km(lat1, lon1, lat2, lon2);
            prop_assert!(d >= 0.0);
            prop_assert!(d <= 20015.1);
        }
    }
}
