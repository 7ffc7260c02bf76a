//! The four facing directions entities can hold.

use glam::IVec2;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

pub const DIRECTIONS: [Direction; 4] = [Direction::Up, Direction::Down, Direction::Left, Direction::Right];

impl Direction {
    pub fn opposite(&self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    /// The unit vector for this direction. Up is negative Y.
    pub fn as_ivec2(&self) -> IVec2 {
        (*self).into()
    }

    /// The displacement covered in one tick at the given speed.
    pub fn offset(&self, speed: i32) -> IVec2 {
        self.as_ivec2() * speed
    }

    /// The horizontal direction facing along `dx`. Zero maps to `Left`.
    pub fn toward_x(dx: i32) -> Direction {
        if dx > 0 {
            Direction::Right
        } else {
            Direction::Left
        }
    }

    /// The vertical direction facing along `dy`. Zero maps to `Up`.
    pub fn toward_y(dy: i32) -> Direction {
        if dy > 0 {
            Direction::Down
        } else {
            Direction::Up
        }
    }
}

impl From<Direction> for IVec2 {
    fn from(dir: Direction) -> Self {
        match dir {
            Direction::Up => -IVec2::Y,
            Direction::Down => IVec2::Y,
            Direction::Left => -IVec2::X,
            Direction::Right => IVec2::X,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opposites_are_symmetric() {
        for dir in DIRECTIONS {
            assert_eq!(dir.opposite().opposite(), dir);
            assert_ne!(dir.opposite(), dir);
        }
    }

    #[test]
    fn test_offset_scales_unit_vector() {
        assert_eq!(Direction::Up.offset(4), IVec2::new(0, -4));
        assert_eq!(Direction::Down.offset(4), IVec2::new(0, 4));
        assert_eq!(Direction::Left.offset(3), IVec2::new(-3, 0));
        assert_eq!(Direction::Right.offset(3), IVec2::new(3, 0));
    }

    #[test]
    fn test_offset_zero_speed_is_stationary() {
        for dir in DIRECTIONS {
            assert_eq!(dir.offset(0), IVec2::ZERO);
        }
    }

    #[test]
    fn test_toward_axis() {
        assert_eq!(Direction::toward_x(10), Direction::Right);
        assert_eq!(Direction::toward_x(-10), Direction::Left);
        assert_eq!(Direction::toward_x(0), Direction::Left);
        assert_eq!(Direction::toward_y(10), Direction::Down);
        assert_eq!(Direction::toward_y(-10), Direction::Up);
        assert_eq!(Direction::toward_y(0), Direction::Up);
    }
}
