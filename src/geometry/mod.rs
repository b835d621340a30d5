use num_traits::{Num, Signed, Float};


/// Manhattan distance
pub fn manhattan_distance<T>(x1: T, y1: T, x2: T, y2: T) -> T
where
    T: Num + Copy + Signed,
    {
    (x1 - x2).abs() + (y1 - y2).abs()
}

/// Euclidean distance
pub fn euclidean<T>(x1: T, y1: T, x2: T, y2: T) -> T
where
    T: Float,
    {
    ((x1 - x2).powi(2) + (y1 - y2).powi(2)).sqrt()
}


/// 2D Point
/// Position of a node, used by the named A* heuristics
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {

    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Grid distance to another point
    pub fn manhattan(&self, other: &Point) -> f64 {
        manhattan_distance(self.x, self.y, other.x, other.y)
    }

    /// Straight-line distance to another point
    pub fn euclidean(&self, other: &Point) -> f64 {
        euclidean(self.x, self.y, other.x, other.y)
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Self { x, y }
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manhattan_distance() {
        assert_eq!(manhattan_distance(0, 0, 2, 2), 4);
        assert_eq!(manhattan_distance(3i64, -1, -1, 2), 7);
        assert_eq!(manhattan_distance(0.5, 0.0, 0.0, 0.5), 1.0);
    }

    #[test]
    fn test_euclidean() {
        assert_eq!(euclidean(0.0, 0.0, 3.0, 4.0), 5.0);
        assert_eq!(euclidean(1.0f32, 1.0, 1.0, 1.0), 0.0);
    }

    #[test]
    fn test_point_distances() {
        let a = Point::new(0.0, 0.0);
        let b: Point = (3.0, 4.0).into();

        assert_eq!(a.euclidean(&b), 5.0);
        assert_eq!(a.manhattan(&b), 7.0);
        assert_eq!(b.manhattan(&a), a.manhattan(&b));
    }
}
