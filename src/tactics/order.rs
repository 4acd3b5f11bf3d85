//! Per-tick orders and the heading encoder

use bitflags::bitflags;

use crate::spatial::grid::Direction;

bitflags! {
    /// One tick's intended movement and fire action
    ///
    /// The encoder never sets more than one movement bit.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Order: u8 {
        const MOVE_UP = 1 << 0;
        const MOVE_DOWN = 1 << 1;
        const MOVE_LEFT = 1 << 2;
        const MOVE_RIGHT = 1 << 3;
        const SHOOT = 1 << 4;

        const MOVEMENT = Self::MOVE_UP.bits()
            | Self::MOVE_DOWN.bits()
            | Self::MOVE_LEFT.bits()
            | Self::MOVE_RIGHT.bits();
    }
}

impl Order {
    /// Movement bit for a heading
    pub fn for_heading(direction: Direction) -> Self {
        match direction {
            Direction::Up => Order::MOVE_UP,
            Direction::Down => Order::MOVE_DOWN,
            Direction::Left => Order::MOVE_LEFT,
            Direction::Right => Order::MOVE_RIGHT,
        }
    }

    /// Movement toward `direction`, optionally firing
    pub fn encode(direction: Direction, shoot: bool) -> Self {
        let order = Self::for_heading(direction);
        if shoot {
            order | Order::SHOOT
        } else {
            order
        }
    }

    /// Order that only fires
    pub fn shoot() -> Self {
        Order::SHOOT
    }

    /// Movement bits only
    pub fn movement(&self) -> Self {
        *self & Order::MOVEMENT
    }

    pub fn shoots(&self) -> bool {
        self.contains(Order::SHOOT)
    }

    /// Heading of the movement bit, if exactly one is set
    pub fn heading(&self) -> Option<Direction> {
        let movement = self.movement();
        if movement == Order::MOVE_UP {
            Some(Direction::Up)
        } else if movement == Order::MOVE_DOWN {
            Some(Direction::Down)
        } else if movement == Order::MOVE_LEFT {
            Some(Direction::Left)
        } else if movement == Order::MOVE_RIGHT {
            Some(Direction::Right)
        } else {
            None
        }
    }
}
