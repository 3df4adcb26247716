//! Shape fields that are either literal values or driven by a formula.

use serde::{Deserialize, Serialize};

use crate::geometry::{Point, points_angle};

/// A formula a target field may be bound to.
///
/// Formulas only reference the owning shape's own begin point, end point, width
/// and height, so they are evaluated locally and never form cycles across shapes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "formula", content = "factor", rename_all = "snake_case")]
pub enum Formula {
    /// Distance from the begin point to the end point
    BeginEndLength,
    /// Direction of the vector from the begin point to the end point
    BeginEndAngle,
    BeginX,
    BeginY,
    /// The shape width scaled by a factor
    WidthFactor(f64),
    /// The shape height scaled by a factor
    HeightFactor(f64),
    ShapeWidth,
    ShapeHeight,
}

/// Values a formula may read.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FormulaContext {
    pub begin: Point,
    pub end: Point,
    pub width: f64,
    pub height: f64,
}

impl Formula {
    /// Evaluates the formula against the owning shape.
    ///
    /// # Examples
    ///
    /// ```
    /// # use trellis_core::geometry::Point;
    /// # use trellis_core::target::{Formula, FormulaContext};
    /// let ctx = FormulaContext {
    ///     begin: Point::new(0.0, 0.0),
    ///     end: Point::new(3.0, 4.0),
    ///     width: 5.0,
    ///     height: 2.0,
    /// };
    /// assert_eq!(Formula::BeginEndLength.evaluate(&ctx), 5.0);
    /// assert_eq!(Formula::WidthFactor(0.25).evaluate(&ctx), 1.25);
    /// ```
    pub fn evaluate(&self, ctx: &FormulaContext) -> f64 {
        match self {
            Self::BeginEndLength => ctx.begin.distance(ctx.end),
            Self::BeginEndAngle => points_angle(ctx.begin, ctx.end),
            Self::BeginX => ctx.begin.x(),
            Self::BeginY => ctx.begin.y(),
            Self::WidthFactor(factor) => ctx.width * factor,
            Self::HeightFactor(factor) => ctx.height * factor,
            Self::ShapeWidth => ctx.width,
            Self::ShapeHeight => ctx.height,
        }
    }
}

/// A field holding either a literal value or a formula binding.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    Literal(f64),
    Derived(Formula),
}

impl Default for Field {
    fn default() -> Self {
        Self::Literal(0.0)
    }
}

impl Field {
    pub fn is_derived(&self) -> bool {
        matches!(self, Self::Derived(_))
    }

    /// The literal value, or `None` for a derived field.
    pub fn literal(&self) -> Option<f64> {
        match self {
            Self::Literal(value) => Some(*value),
            Self::Derived(_) => None,
        }
    }

    pub fn evaluate(&self, ctx: &FormulaContext) -> f64 {
        match self {
            Self::Literal(value) => *value,
            Self::Derived(formula) => formula.evaluate(ctx),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::f64::consts::FRAC_PI_2;

    use float_cmp::assert_approx_eq;

    use super::*;

    fn ctx() -> FormulaContext {
        FormulaContext {
            begin: Point::new(10.0, 10.0),
            end: Point::new(10.0, 30.0),
            width: 20.0,
            height: 6.0,
        }
    }

    #[test]
    fn test_begin_end_formulas() {
        let ctx = ctx();
        assert_approx_eq!(f64, Formula::BeginEndLength.evaluate(&ctx), 20.0);
        assert_approx_eq!(f64, Formula::BeginEndAngle.evaluate(&ctx), FRAC_PI_2);
        assert_eq!(Formula::BeginX.evaluate(&ctx), 10.0);
        assert_eq!(Formula::BeginY.evaluate(&ctx), 10.0);
    }

    #[test]
    fn test_size_formulas() {
        let ctx = ctx();
        assert_eq!(Formula::HeightFactor(0.5).evaluate(&ctx), 3.0);
        assert_eq!(Formula::ShapeWidth.evaluate(&ctx), 20.0);
        assert_eq!(Formula::ShapeHeight.evaluate(&ctx), 6.0);
    }

    #[test]
    fn test_field_literal_and_derived() {
        let literal = Field::Literal(4.0);
        assert!(!literal.is_derived());
        assert_eq!(literal.literal(), Some(4.0));
        assert_eq!(literal.evaluate(&ctx()), 4.0);

        let derived = Field::Derived(Formula::WidthFactor(0.1));
        assert!(derived.is_derived());
        assert_eq!(derived.literal(), None);
        assert_approx_eq!(f64, derived.evaluate(&ctx()), 2.0);
    }

    #[test]
    fn test_field_default_is_zero_literal() {
        assert_eq!(Field::default(), Field::Literal(0.0));
    }
}
