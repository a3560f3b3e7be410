// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Validated analyzer input.

use brep_topology::Shape;

use crate::error::CheckError;

/// A shape handed to an analyzer, classified once at construction.
///
/// `Invalid` keeps the caller's shape so it can be handed back untouched.
#[derive(Debug, Clone)]
pub enum ShapeInput {
    Ready(Shape),
    Invalid(Shape),
}

impl ShapeInput {
    /// Classifies `shape`: null or empty shapes are invalid.
    pub fn new(shape: Shape) -> Self {
        if shape.is_null() {
            ShapeInput::Invalid(shape)
        } else {
            ShapeInput::Ready(shape)
        }
    }

    /// The held shape, whatever its classification.
    pub fn shape(&self) -> &Shape {
        match self {
            ShapeInput::Ready(shape) | ShapeInput::Invalid(shape) => shape,
        }
    }

    /// Hands the held shape back, whatever its classification.
    pub fn into_shape(self) -> Shape {
        match self {
            ShapeInput::Ready(shape) | ShapeInput::Invalid(shape) => shape,
        }
    }

    /// The shape if it can be analyzed.
    pub fn ready(&self) -> std::result::Result<&Shape, CheckError> {
        match self {
            ShapeInput::Ready(shape) => Ok(shape),
            ShapeInput::Invalid(_) => Err(CheckError::InvalidShape),
        }
    }

    /// Why the shape cannot be analyzed, if it cannot.
    pub fn error(&self) -> Option<CheckError> {
        self.ready().err()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use brep_topology::TopologyArena;

    #[test]
    fn null_and_empty_shapes_are_invalid() {
        assert_eq!(ShapeInput::new(Shape::null()).error(), Some(CheckError::InvalidShape));
        let empty = ShapeInput::new(Shape::new(TopologyArena::new()));
        assert!(matches!(empty, ShapeInput::Invalid(_)));
    }

    #[test]
    fn populated_shape_is_ready() {
        let mut arena = TopologyArena::new();
        arena.add_vertex(0.0, 0.0, 0.0);
        let shape = Shape::new(arena);

        let input = ShapeInput::new(shape.clone());
        assert!(input.ready().unwrap().is_same(&shape));
        assert_eq!(input.error(), None);
    }
}
