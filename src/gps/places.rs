//! Coordinate-to-place mapping over static bounding boxes.

use crate::gps::nmea::GpsFix;

/// A named place: city and state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Place {
    pub city: String,
    pub state: String,
}

/// A rectangle in latitude/longitude space mapped to a place name.
#[derive(Debug, Clone)]
pub struct PlaceRegion {
    pub lat_min: f64,
    pub lat_max: f64,
    pub lon_min: f64,
    pub lon_max: f64,
    pub city: String,
    pub state: String,
}

impl PlaceRegion {
    fn contains(&self, lat: f64, lon: f64) -> bool {
        (self.lat_min..=self.lat_max).contains(&lat) && (self.lon_min..=self.lon_max).contains(&lon)
    }
}

/// Maps a fix to a named place by scanning an ordered region list.
///
/// First containing box wins; deterministic, no side effects.
#[derive(Debug, Clone)]
pub struct PlaceResolver {
    regions: Vec<PlaceRegion>,
}

impl PlaceResolver {
    /// Create a resolver with the built-in region table.
    pub fn new() -> Self {
        Self {
            regions: vec![
                PlaceRegion {
                    lat_min: 10.9,
                    lat_max: 11.2,
                    lon_min: 76.8,
                    lon_max: 77.1,
                    city: "कोयंबटूर".to_string(),
                    state: "तमिलनाडु".to_string(),
                },
                PlaceRegion {
                    lat_min: 12.9,
                    lat_max: 13.2,
                    lon_min: 80.1,
                    lon_max: 80.4,
                    city: "चेन्नई".to_string(),
                    state: "तमिलनाडु".to_string(),
                },
            ],
        }
    }

    /// Create a resolver with a custom ordered region list.
    pub fn with_regions(regions: Vec<PlaceRegion>) -> Self {
        Self { regions }
    }

    /// Resolve a fix to a place.
    ///
    /// Returns None when the fix is absent/invalid or falls in no box.
    pub fn resolve(&self, fix: &GpsFix) -> Option<Place> {
        if !fix.has_position() {
            return None;
        }
        let (lat, lon) = (fix.latitude?, fix.longitude?);

        self.regions
            .iter()
            .find(|region| region.contains(lat, lon))
            .map(|region| Place {
                city: region.city.clone(),
                state: region.state.clone(),
            })
    }
}

impl Default for PlaceResolver {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fix_at(lat: f64, lon: f64) -> GpsFix {
        GpsFix {
            latitude: Some(lat),
            longitude: Some(lon),
            valid: true,
        }
    }

    #[test]
    fn test_resolve_chennai() {
        let resolver = PlaceResolver::new();
        let place = resolver.resolve(&fix_at(13.05, 80.25)).unwrap();
        assert_eq!(place.city, "चेन्नई");
        assert_eq!(place.state, "तमिलनाडु");
    }

    #[test]
    fn test_resolve_coimbatore() {
        let resolver = PlaceResolver::new();
        let place = resolver.resolve(&fix_at(11.0, 76.95)).unwrap();
        assert_eq!(place.city, "कोयंबटूर");
        assert_eq!(place.state, "तमिलनाडु");
    }

    #[test]
    fn test_resolve_outside_all_regions() {
        let resolver = PlaceResolver::new();
        assert_eq!(resolver.resolve(&fix_at(0.0, 0.0)), None);
        assert_eq!(resolver.resolve(&fix_at(28.6, 77.2)), None);
    }

    #[test]
    fn test_resolve_no_fix() {
        let resolver = PlaceResolver::new();
        assert_eq!(resolver.resolve(&GpsFix::none()), None);

        let invalid = GpsFix {
            latitude: Some(13.05),
            longitude: Some(80.25),
            valid: false,
        };
        assert_eq!(resolver.resolve(&invalid), None);
    }

    #[test]
    fn test_resolve_boundary_is_inclusive() {
        let resolver = PlaceResolver::new();
        assert!(resolver.resolve(&fix_at(12.9, 80.1)).is_some());
        assert!(resolver.resolve(&fix_at(13.2, 80.4)).is_some());
    }

    #[test]
    fn test_first_matching_region_wins() {
        let overlapping = vec![
            PlaceRegion {
                lat_min: 0.0,
                lat_max: 90.0,
                lon_min: 0.0,
                lon_max: 180.0,
                city: "first".to_string(),
                state: "a".to_string(),
            },
            PlaceRegion {
                lat_min: 0.0,
                lat_max: 90.0,
                lon_min: 0.0,
                lon_max: 180.0,
                city: "second".to_string(),
                state: "b".to_string(),
            },
        ];
        let resolver = PlaceResolver::with_regions(overlapping);
        assert_eq!(resolver.resolve(&fix_at(10.0, 10.0)).unwrap().city, "first");
    }

    #[test]
    fn test_resolve_is_deterministic() {
        let resolver = PlaceResolver::new();
        let fix = fix_at(13.05, 80.25);
        assert_eq!(resolver.resolve(&fix), resolver.resolve(&fix));
    }
}
