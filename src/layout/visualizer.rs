use crate::error::{Error, Result};
use crate::ir::Node;
use crate::numbering;

/// Displacement per two levels of depth.
pub const LEVEL_STEP: f32 = 50.0;

/// Axis a node is pushed along from its chapter origin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Slot {
    Origin,
    Vertical(usize),
    Horizontal(usize),
}

impl Slot {
    pub fn for_level(level: usize) -> Self {
        let units = level.div_ceil(2);
        match level {
            0 => Slot::Origin,
            odd if odd % 2 == 1 => Slot::Vertical(units),
            _ => Slot::Horizontal(units),
        }
    }

    /// Offset from the origin. Odd levels go down, even levels go right,
    /// and the distance grows by one step every two levels.
    pub fn displacement(self, step: f32) -> (f32, f32) {
        match self {
            Slot::Origin => (0.0, 0.0),
            Slot::Vertical(units) => (0.0, step * units as f32),
            Slot::Horizontal(units) => (step * units as f32, 0.0),
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct NodeVisualizer<'a> {
    node: &'a Node,
    origin_x: f32,
    origin_y: f32,
    step: f32,
}

impl<'a> NodeVisualizer<'a> {
    pub fn new(node: &'a Node, origin_x: f32, origin_y: f32) -> Self {
        Self {
            node,
            origin_x,
            origin_y,
            step: LEVEL_STEP,
        }
    }

    pub fn with_step(mut self, step: f32) -> Self {
        self.step = step;
        self
    }

    pub fn get_level(&self) -> Result<usize> {
        let number = self.node.number().ok_or_else(|| Error::MissingNumber {
            id: self.node.id().to_string(),
        })?;
        numbering::level(number)
    }

    pub fn get_position(&self) -> Result<(f32, f32)> {
        let (dx, dy) = Slot::for_level(self.get_level()?).displacement(self.step);
        Ok((self.origin_x + dx, self.origin_y + dy))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn position(number: &str) -> (f32, f32) {
        let node = Node::numbered("n", number);
        NodeVisualizer::new(&node, 10.0, 20.0).get_position().unwrap()
    }

    #[test]
    fn level_follows_numbering() {
        let node = Node::numbered("n", "3");
        assert_eq!(NodeVisualizer::new(&node, 0.0, 0.0).get_level().unwrap(), 0);
        let node = Node::numbered("n", "2.36");
        assert_eq!(NodeVisualizer::new(&node, 0.0, 0.0).get_level().unwrap(), 2);
    }

    #[test]
    fn zigzag_positions() {
        assert_eq!(position("3"), (10.0, 20.0));
        assert_eq!(position("42.1"), (10.0, 70.0));
        assert_eq!(position("42.12"), (60.0, 20.0));
        assert_eq!(position("42.123"), (10.0, 120.0));
        assert_eq!(position("42.1234"), (110.0, 20.0));
    }

    #[test]
    fn custom_step_scales_displacement() {
        let node = Node::numbered("n", "1.123");
        let visualizer = NodeVisualizer::new(&node, 0.0, 0.0).with_step(10.0);
        assert_eq!(visualizer.get_position().unwrap(), (0.0, 20.0));
    }

    #[test]
    fn missing_or_bad_number_is_an_error() {
        let node = Node::new("n", Default::default());
        assert!(NodeVisualizer::new(&node, 0.0, 0.0).get_level().is_err());
        let node = Node::numbered("n", "4..2");
        assert!(NodeVisualizer::new(&node, 0.0, 0.0).get_position().is_err());
    }
}
