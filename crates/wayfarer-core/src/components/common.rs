//! Common components and small value types shared across entity kinds.

use hecs::Entity;
use serde::{Deserialize, Serialize};

/// 2D position vector
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Read the component on the given axis.
    pub fn axis(&self, axis: Axis) -> f32 {
        match axis {
            Axis::X => self.x,
            Axis::Y => self.y,
        }
    }

    /// Write the component on the given axis.
    pub fn set_axis(&mut self, axis: Axis, value: f32) {
        match axis {
            Axis::X => self.x = value,
            Axis::Y => self.y = value,
        }
    }
}

impl std::ops::Add for Vec2 {
    type Output = Self;
    fn add(self, other: Self) -> Self {
        Self {
            x: self.x + other.x,
            y: self.y + other.y,
        }
    }
}

impl std::ops::Sub for Vec2 {
    type Output = Self;
    fn sub(self, other: Self) -> Self {
        Self {
            x: self.x - other.x,
            y: self.y - other.y,
        }
    }
}

impl std::ops::Mul<f32> for Vec2 {
    type Output = Self;
    fn mul(self, scalar: f32) -> Self {
        Self {
            x: self.x * scalar,
            y: self.y * scalar,
        }
    }
}

/// A world axis a walk segment moves along.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Axis {
    X,
    Y,
}

/// Facing/animation direction. Closed set - every animation lookup goes
/// through this enum rather than a string key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];
}

/// Exhaustive direction-indexed table. Lookups cannot miss.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct DirectionMap<T> {
    pub up: T,
    pub down: T,
    pub left: T,
    pub right: T,
}

impl<T> DirectionMap<T> {
    pub fn get(&self, direction: Direction) -> &T {
        match direction {
            Direction::Up => &self.up,
            Direction::Down => &self.down,
            Direction::Left => &self.left,
            Direction::Right => &self.right,
        }
    }

    pub fn get_mut(&mut self, direction: Direction) -> &mut T {
        match direction {
            Direction::Up => &mut self.up,
            Direction::Down => &mut self.down,
            Direction::Left => &mut self.left,
            Direction::Right => &mut self.right,
        }
    }

    /// Build a table by evaluating `f` once per direction.
    pub fn from_fn(mut f: impl FnMut(Direction) -> T) -> Self {
        Self {
            up: f(Direction::Up),
            down: f(Direction::Down),
            left: f(Direction::Left),
            right: f(Direction::Right),
        }
    }
}

/// Spatial position component - where an entity sits in its room's
/// coordinate space.
///
/// `parent` is the room whose space `local` is expressed in. During a walk
/// the parent can change (the reparent-preserving-world-position step) while
/// the crew member's logical room on [`CrewMember`](super::CrewMember) stays
/// put until the plan's terminal step.
#[derive(Debug, Clone, Copy)]
pub struct Position {
    /// Local position within the parent room
    pub local: Vec2,
    /// The room entity this position is relative to
    pub parent: Entity,
}

impl Position {
    pub fn new(x: f32, y: f32, parent: Entity) -> Self {
        Self {
            local: Vec2::new(x, y),
            parent,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vec2_operations() {
        let a = Vec2::new(1.0, 2.0);
        let b = Vec2::new(4.0, 6.0);

        let sum = a + b;
        assert_eq!(sum.x, 5.0);
        assert_eq!(sum.y, 8.0);

        let diff = b - a;
        assert_eq!(diff.x, 3.0);
        assert_eq!(diff.y, 4.0);

        let scaled = a * 2.0;
        assert_eq!(scaled.x, 2.0);
        assert_eq!(scaled.y, 4.0);
    }

    #[test]
    fn test_vec2_axis_access() {
        let mut v = Vec2::new(1.0, 2.0);
        assert_eq!(v.axis(Axis::X), 1.0);
        assert_eq!(v.axis(Axis::Y), 2.0);

        v.set_axis(Axis::Y, 7.0);
        assert_eq!(v.y, 7.0);
        assert_eq!(v.x, 1.0);
    }

    #[test]
    fn test_direction_map_is_exhaustive() {
        let map = DirectionMap::from_fn(|d| d);
        for direction in Direction::ALL {
            assert_eq!(*map.get(direction), direction);
        }
    }

    #[test]
    fn test_direction_map_mutation() {
        let mut map: DirectionMap<u32> = DirectionMap::default();
        *map.get_mut(Direction::Left) = 9;
        assert_eq!(*map.get(Direction::Left), 9);
        assert_eq!(*map.get(Direction::Right), 0);
    }
}
