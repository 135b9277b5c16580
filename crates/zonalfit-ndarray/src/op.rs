//! Element-wise arithmetic operations.

use std::fmt;

use zonalfit_matrix::Scalar;

/// Arithmetic applied between an array element and an operand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArrayOp {
    Mul,
    Div,
    Add,
    Sub,
}

impl ArrayOp {
    /// `element <op> operand`.
    #[inline]
    pub fn apply<T: Scalar>(self, element: T, operand: T) -> T {
        match self {
            ArrayOp::Mul => element * operand,
            ArrayOp::Div => element / operand,
            ArrayOp::Add => element + operand,
            ArrayOp::Sub => element - operand,
        }
    }

    pub fn symbol(self) -> char {
        match self {
            ArrayOp::Mul => '*',
            ArrayOp::Div => '/',
            ArrayOp::Add => '+',
            ArrayOp::Sub => '-',
        }
    }
}

impl fmt::Display for ArrayOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply() {
        assert_eq!(ArrayOp::Mul.apply(3.0f64, 2.0), 6.0);
        assert_eq!(ArrayOp::Div.apply(3.0f64, 2.0), 1.5);
        assert_eq!(ArrayOp::Add.apply(3.0f32, 2.0), 5.0);
        assert_eq!(ArrayOp::Sub.apply(3.0f32, 2.0), 1.0);
        assert_eq!(ArrayOp::Div.to_string(), "/");
    }
}
