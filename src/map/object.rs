use std::num::ParseIntError;
use derive_more::*;
use glam::IVec2;
use super::Properties;

/// Integer point of a decoded polygon or polyline.
pub type Point = IVec2;

/// An `<objectgroup>` layer.
#[derive(Clone, Debug)]
pub struct ObjectGroup {
    pub id: u32,
    pub name: String,
    pub color: String,
    pub opacity: f32,
    pub visible: bool,
    pub properties: Properties,
    pub objects: Vec<Object>,
}

impl Default for ObjectGroup {
    fn default() -> Self {
        Self {
            id: Default::default(),
            name: Default::default(),
            color: Default::default(),
            opacity: 1.0,
            visible: true,
            properties: Default::default(),
            objects: Default::default(),
        }
    }
}

#[derive(Clone, Debug)]
pub struct Object {
    pub id: u32,
    pub name: String,
    pub kind: String,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub rotation: f64,
    /// Raw gid for tile objects, 0 otherwise.
    pub gid: u32,
    pub visible: bool,
    pub polygons: Vec<Polygon>,
    pub polylines: Vec<Polygon>,
    pub properties: Properties,
}

impl Default for Object {
    fn default() -> Self {
        Self {
            id: Default::default(),
            name: Default::default(),
            kind: Default::default(),
            x: Default::default(),
            y: Default::default(),
            width: Default::default(),
            height: Default::default(),
            rotation: Default::default(),
            gid: Default::default(),
            visible: true,
            polygons: Default::default(),
            polylines: Default::default(),
            properties: Default::default(),
        }
    }
}

/// A `<polygon>` or `<polyline>`, with its points still in text form.
#[derive(Clone, Eq, PartialEq, Default, Debug)]
pub struct Polygon {
    pub points: String,
}

impl Polygon {
    pub fn decode(&self) -> Result<Vec<Point>, PointsError> {
        decode_points(&self.points)
    }
}

/// Parses space separated `x,y` pairs.
/// An empty string is not a valid list and fails like any other malformed pair.
pub fn decode_points(points: &str) -> Result<Vec<Point>, PointsError> {
    points
        .split(' ')
        .map(|part| {
            let mut coords = part.split(',');
            let (Some(x), Some(y), None) = (coords.next(), coords.next(), coords.next()) else {
                return Err(PointsError::InvalidPointsField { part: String::from(part) });
            };
            Ok(Point::new(x.parse()?, y.parse()?))
        })
        .collect()
}

#[derive(Error, Display, From, Debug, Clone, Eq, PartialEq)]
pub enum PointsError {
    #[display(fmt="Invalid points field '{}'", part)]
    #[from(ignore)]
    InvalidPointsField { part: String },
    #[display(fmt="{}", _0)]
    ParseIntError(ParseIntError),
}

#[cfg(test)]
mod test {
    use crate::map::{decode_points, Point, PointsError, Polygon};

    #[test]
    fn triangle() {
        let polygon = Polygon { points: String::from("0,0 10,0 10,10") };
        let expected = vec![Point::new(0, 0), Point::new(10, 0), Point::new(10, 10)];
        assert_eq!(Ok(expected), polygon.decode());
    }

    #[test]
    fn negative() {
        assert_eq!(Ok(vec![Point::new(-3, 4)]), decode_points("-3,4"));
    }

    #[test]
    fn missing_coordinate() {
        let result = decode_points("0,0 10");
        assert_eq!(Err(PointsError::InvalidPointsField { part: String::from("10") }), result);
    }

    #[test]
    fn too_many_coordinates() {
        let result = decode_points("0,0,0");
        assert!(matches!(result, Err(PointsError::InvalidPointsField { .. })));
    }

    #[test]
    fn empty() {
        assert!(matches!(decode_points(""), Err(PointsError::InvalidPointsField { .. })));
    }

    #[test]
    fn double_space() {
        assert!(matches!(decode_points("0,0  1,1"), Err(PointsError::InvalidPointsField { .. })));
    }

    #[test]
    fn not_a_number() {
        assert!(matches!(decode_points("0,0 1.5,2"), Err(PointsError::ParseIntError(_))));
        assert!(matches!(decode_points("a,1"), Err(PointsError::ParseIntError(_))));
    }
}
