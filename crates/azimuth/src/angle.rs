use crate::geometry::{Point, Rect};
use derive_more::{Display, Into};
use strum::{Display as StrumDisplay, EnumIter, IntoEnumIterator};

/// Share of the dial's half-extent used for the indicator line.
pub const DIAL_RADIUS_FACTOR: f64 = 0.8;

/// Horizontal bearing in degrees: 0 is north, increasing clockwise.
///
/// Always lies in `[0, 360)`.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Display, Into)]
#[display("{_0:.0}°")]
pub struct Azimuth(f64);

impl Azimuth {
    pub const NORTH: Azimuth = Azimuth(0.0);
    pub const EAST: Azimuth = Azimuth(90.0);

    /// Wraps any finite angle into `[0, 360)`. Non-finite input maps to north.
    pub fn new(degrees: f64) -> Self {
        if !degrees.is_finite() {
            return Self::NORTH;
        }
        let wrapped = degrees.rem_euclid(360.0);
        // rem_euclid can round up to exactly 360 for tiny negative inputs
        if wrapped >= 360.0 {
            Self::NORTH
        } else {
            Self(wrapped)
        }
    }

    pub fn degrees(&self) -> f64 {
        self.0
    }

    pub fn cardinal(&self) -> Cardinal {
        Cardinal::from_azimuth(*self)
    }
}

/// Center and indicator radius of the dial, in viewport coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReferenceFrame {
    pub center: Point,
    pub radius: f64,
}

impl ReferenceFrame {
    pub fn new(center: Point, radius: f64) -> Self {
        Self { center, radius }
    }

    /// Derives the frame from the dial container's on-screen box.
    pub fn from_bounds(bounds: Rect) -> Self {
        Self {
            center: bounds.center(),
            radius: bounds.width.min(bounds.height) / 2.0 * DIAL_RADIUS_FACTOR,
        }
    }

    /// Point at `distance` from the center in the direction of `azimuth`.
    pub fn point_at(&self, azimuth: Azimuth, distance: f64) -> Point {
        let rad = (azimuth.degrees() - 90.0).to_radians();
        Point::new(
            self.center.x + distance * rad.cos(),
            self.center.y + distance * rad.sin(),
        )
    }

    /// Tip of the indicator line for `azimuth`.
    pub fn tip(&self, azimuth: Azimuth) -> Point {
        self.point_at(azimuth, self.radius)
    }
}

/// Bearing of `point` as seen from the frame center.
///
/// Only direction matters; distance and `frame.radius` are ignored. A point
/// exactly at the center yields 90° because `atan2(0, 0)` is 0.
pub fn convert(point: Point, frame: &ReferenceFrame) -> Azimuth {
    let (dx, dy) = (point.x - frame.center.x, point.y - frame.center.y);
    let raw = dy.atan2(dx).to_degrees();
    Azimuth::new((raw + 90.0 + 360.0) % 360.0)
}

/// The eight compass points, in clockwise order from north.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, StrumDisplay)]
pub enum Cardinal {
    #[strum(to_string = "North")]
    North,
    #[strum(to_string = "North-East")]
    NorthEast,
    #[strum(to_string = "East")]
    East,
    #[strum(to_string = "South-East")]
    SouthEast,
    #[strum(to_string = "South")]
    South,
    #[strum(to_string = "South-West")]
    SouthWest,
    #[strum(to_string = "West")]
    West,
    #[strum(to_string = "North-West")]
    NorthWest,
}

impl Cardinal {
    /// 45° bins centered on each point, upper bound inclusive: `(22.5, 67.5]`
    /// is north-east, and `(337.5, 360) ∪ [0, 22.5]` is north.
    pub fn from_azimuth(azimuth: Azimuth) -> Self {
        let deg = azimuth.degrees();
        let bin = ((deg - 22.5) / 45.0).ceil().rem_euclid(8.0) as usize;
        Self::iter().nth(bin).unwrap_or(Self::North)
    }

    pub fn abbreviation(&self) -> &'static str {
        match self {
            Self::North => "N",
            Self::NorthEast => "NE",
            Self::East => "E",
            Self::SouthEast => "SE",
            Self::South => "S",
            Self::SouthWest => "SW",
            Self::West => "W",
            Self::NorthWest => "NW",
        }
    }

    pub fn azimuth(&self) -> Azimuth {
        Azimuth::new(*self as usize as f64 * 45.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame() -> ReferenceFrame {
        ReferenceFrame::new(Point::new(200.0, 150.0), 140.0)
    }

    fn assert_close(actual: Azimuth, expected: f64) {
        assert!(
            (actual.degrees() - expected).abs() < 1e-9,
            "expected {expected}, got {}",
            actual.degrees()
        );
    }

    #[test]
    fn test_cardinal_directions() {
        let f = frame();
        assert_close(convert(Point::new(200.0, 50.0), &f), 0.0);
        assert_close(convert(Point::new(300.0, 150.0), &f), 90.0);
        assert_close(convert(Point::new(200.0, 250.0), &f), 180.0);
        assert_close(convert(Point::new(100.0, 150.0), &f), 270.0);
    }

    #[test]
    fn test_center_is_east() {
        let f = frame();
        assert_eq!(convert(f.center, &f), Azimuth::EAST);
    }

    #[test]
    fn test_distance_does_not_matter() {
        let f = frame();
        let near = convert(Point::new(201.0, 149.0), &f);
        let far = convert(Point::new(1200.0, -850.0), &f);
        assert_close(near, 45.0);
        assert_close(far, 45.0);
    }

    #[test]
    fn test_result_always_in_range() {
        let f = frame();
        for i in -40..=40 {
            for j in -40..=40 {
                let p = Point::new(200.0 + i as f64 * 7.3, 150.0 + j as f64 * 0.001);
                let az = convert(p, &f).degrees();
                assert!((0.0..360.0).contains(&az), "{az} out of range for {p:?}");
            }
        }
    }

    #[test]
    fn test_new_wraps_into_range() {
        assert_close(Azimuth::new(360.0), 0.0);
        assert_close(Azimuth::new(-90.0), 270.0);
        assert_close(Azimuth::new(725.0), 5.0);
        assert_eq!(Azimuth::new(-1e-20), Azimuth::NORTH);
        assert_eq!(Azimuth::new(f64::NAN), Azimuth::NORTH);
    }

    #[test]
    fn test_point_at_inverts_convert() {
        let f = frame();
        for deg in [0.0, 30.0, 90.0, 135.0, 200.0, 359.0] {
            let p = f.point_at(Azimuth::new(deg), 50.0);
            let back = convert(p, &f).degrees();
            let diff = (back - deg).abs();
            assert!(diff < 1e-9 || (360.0 - diff) < 1e-9, "{deg} -> {back}");
        }
    }

    #[test]
    fn test_from_bounds_uses_shorter_side() {
        let f = ReferenceFrame::from_bounds(Rect::new(10.0, 20.0, 350.0, 400.0));
        assert_eq!(f.center, Point::new(185.0, 220.0));
        assert!((f.radius - 140.0).abs() < 1e-9);
    }

    #[test]
    fn test_cardinal_bins() {
        let cases = [
            (0.0, Cardinal::North),
            (22.5, Cardinal::North),
            (22.6, Cardinal::NorthEast),
            (67.5, Cardinal::NorthEast),
            (90.0, Cardinal::East),
            (157.5, Cardinal::SouthEast),
            (180.0, Cardinal::South),
            (247.5, Cardinal::SouthWest),
            (270.0, Cardinal::West),
            (337.5, Cardinal::NorthWest),
            (337.6, Cardinal::North),
            (359.9, Cardinal::North),
        ];
        for (deg, expected) in cases {
            assert_eq!(Cardinal::from_azimuth(Azimuth::new(deg)), expected, "{deg}");
        }
    }

    #[test]
    fn test_cardinal_labels() {
        assert_eq!(Cardinal::SouthWest.to_string(), "South-West");
        assert_eq!(Cardinal::SouthWest.abbreviation(), "SW");
        assert_eq!(Cardinal::West.azimuth(), Azimuth::new(270.0));
        assert_eq!(Azimuth::new(44.6).to_string(), "45°");
    }
}
