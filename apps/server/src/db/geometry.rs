//! Polygon helpers for the area search
//!
//! Vertices are rendered to the native `polygon` text form and bound as
//! a parameter, never interpolated into SQL. The ring is implicitly
//! closed; the first vertex is not repeated.

use crate::models::Coordinate;

/// Axis-aligned bounding box used to prefilter candidates before the
/// exact containment check.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub min_latitude: f64,
    pub max_latitude: f64,
    pub min_longitude: f64,
    pub max_longitude: f64,
}

/// Render vertices as a polygon literal, `((lat,lon),(lat,lon),...)`.
pub fn polygon_literal(coordinates: &[Coordinate]) -> String {
    let points: Vec<String> = coordinates
        .iter()
        .map(|c| format!("({},{})", c.latitude, c.longitude))
        .collect();
    format!("({})", points.join(","))
}

/// Bounding box of the vertex set, `None` when the set is empty.
pub fn bounding_box(coordinates: &[Coordinate]) -> Option<BoundingBox> {
    let first = coordinates.first()?;
    let mut bbox = BoundingBox {
        min_latitude: first.latitude,
        max_latitude: first.latitude,
        min_longitude: first.longitude,
        max_longitude: first.longitude,
    };
    for c in &coordinates[1..] {
        bbox.min_latitude = bbox.min_latitude.min(c.latitude);
        bbox.max_latitude = bbox.max_latitude.max(c.latitude);
        bbox.min_longitude = bbox.min_longitude.min(c.longitude);
        bbox.max_longitude = bbox.max_longitude.max(c.longitude);
    }
    Some(bbox)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square() -> Vec<Coordinate> {
        vec![
            Coordinate {
                latitude: 35.0,
                longitude: 139.0,
            },
            Coordinate {
                latitude: 35.0,
                longitude: 140.0,
            },
            Coordinate {
                latitude: 36.0,
                longitude: 140.0,
            },
            Coordinate {
                latitude: 36.0,
                longitude: 139.0,
            },
        ]
    }

    #[test]
    fn polygon_literal_does_not_repeat_first_vertex() {
        let literal = polygon_literal(&square());
        assert_eq!(literal, "((35,139),(35,140),(36,140),(36,139))");
    }

    #[test]
    fn bounding_box_spans_all_vertices() {
        let bbox = bounding_box(&square()).unwrap();
        assert_eq!(bbox.min_latitude, 35.0);
        assert_eq!(bbox.max_latitude, 36.0);
        assert_eq!(bbox.min_longitude, 139.0);
        assert_eq!(bbox.max_longitude, 140.0);
    }

    #[test]
    fn bounding_box_of_empty_ring_is_none() {
        assert!(bounding_box(&[]).is_none());
    }

    #[test]
    fn single_vertex_ring_is_accepted() {
        let ring = [Coordinate {
            latitude: 35.5,
            longitude: 139.5,
        }];
        assert_eq!(polygon_literal(&ring), "((35.5,139.5))");
        let bbox = bounding_box(&ring).unwrap();
        assert_eq!(bbox.min_latitude, bbox.max_latitude);
        assert_eq!(bbox.min_longitude, bbox.max_longitude);
    }
}
