//! Rotation angles, numeric or symbolic.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A rotation angle in radians.
///
/// Angles may stay symbolic until a concrete value is bound; the synthesis
/// routines only ever negate them or pass them through.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Angle {
    /// A concrete value.
    Constant(f64),
    /// A named free parameter.
    Symbol(String),
    /// Negation.
    Neg(Box<Angle>),
    /// Sum of two angles.
    Add(Box<Angle>, Box<Angle>),
    /// Product of two angles.
    Mul(Box<Angle>, Box<Angle>),
}

impl Angle {
    /// Create a constant angle.
    pub fn constant(value: f64) -> Self {
        Angle::Constant(value)
    }

    /// Create a symbolic angle.
    pub fn symbol(name: impl Into<String>) -> Self {
        Angle::Symbol(name.into())
    }

    /// The zero angle.
    pub fn zero() -> Self {
        Angle::Constant(0.0)
    }

    /// Check whether the angle still contains a free symbol.
    pub fn is_symbolic(&self) -> bool {
        match self {
            Angle::Constant(_) => false,
            Angle::Symbol(_) => true,
            Angle::Neg(a) => a.is_symbolic(),
            Angle::Add(a, b) | Angle::Mul(a, b) => a.is_symbolic() || b.is_symbolic(),
        }
    }

    /// Evaluate to a number, if no symbols remain.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Angle::Constant(v) => Some(*v),
            Angle::Symbol(_) => None,
            Angle::Neg(a) => a.as_f64().map(|v| -v),
            Angle::Add(a, b) => Some(a.as_f64()? + b.as_f64()?),
            Angle::Mul(a, b) => Some(a.as_f64()? * b.as_f64()?),
        }
    }

    /// Substitute `value` for every occurrence of the symbol `name`.
    pub fn bind(&self, name: &str, value: f64) -> Self {
        match self {
            Angle::Symbol(s) if s == name => Angle::Constant(value),
            Angle::Constant(_) | Angle::Symbol(_) => self.clone(),
            Angle::Neg(a) => Angle::Neg(Box::new(a.bind(name, value))),
            Angle::Add(a, b) => Angle::Add(Box::new(a.bind(name, value)), Box::new(b.bind(name, value))),
            Angle::Mul(a, b) => Angle::Mul(Box::new(a.bind(name, value)), Box::new(b.bind(name, value))),
        }
    }

    /// Fold constant subexpressions and cancel double negations.
    pub fn simplify(&self) -> Self {
        if let Some(v) = self.as_f64() {
            return Angle::Constant(v);
        }
        match self {
            Angle::Neg(a) => match a.simplify() {
                Angle::Neg(inner) => *inner,
                other => Angle::Neg(Box::new(other)),
            },
            Angle::Add(a, b) => Angle::Add(Box::new(a.simplify()), Box::new(b.simplify())),
            Angle::Mul(a, b) => Angle::Mul(Box::new(a.simplify()), Box::new(b.simplify())),
            Angle::Constant(_) | Angle::Symbol(_) => self.clone(),
        }
    }
}

impl Default for Angle {
    fn default() -> Self {
        Angle::zero()
    }
}

impl fmt::Display for Angle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Angle::Constant(v) => write!(f, "{v}"),
            Angle::Symbol(name) => write!(f, "{name}"),
            Angle::Neg(a) => write!(f, "-({a})"),
            Angle::Add(a, b) => write!(f, "({a} + {b})"),
            Angle::Mul(a, b) => write!(f, "({a} * {b})"),
        }
    }
}

impl From<f64> for Angle {
    fn from(value: f64) -> Self {
        Angle::Constant(value)
    }
}

impl From<&str> for Angle {
    fn from(name: &str) -> Self {
        Angle::Symbol(name.to_string())
    }
}

impl std::ops::Neg for Angle {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Angle::Neg(Box::new(self))
    }
}

impl std::ops::Add for Angle {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Angle::Add(Box::new(self), Box::new(rhs))
    }
}

impl std::ops::Mul for Angle {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self::Output {
        Angle::Mul(Box::new(self), Box::new(rhs))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    #[test]
    fn test_constant() {
        let a = Angle::constant(1.5);
        assert!(!a.is_symbolic());
        assert_eq!(a.as_f64(), Some(1.5));
    }

    #[test]
    fn test_symbol_binds() {
        let a = Angle::symbol("theta");
        assert!(a.is_symbolic());
        assert_eq!(a.as_f64(), None);

        let bound = a.bind("theta", PI / 2.0);
        assert!(!bound.is_symbolic());
        assert!((bound.as_f64().unwrap() - PI / 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_negation_simplifies() {
        let twice = -(-Angle::symbol("a"));
        assert_eq!(twice.simplify(), Angle::symbol("a"));

        let folded = (-Angle::constant(0.25)).simplify();
        assert_eq!(folded, Angle::Constant(-0.25));
    }

    #[test]
    fn test_mixed_expression() {
        let e = Angle::constant(2.0) * Angle::symbol("t") + Angle::constant(1.0);
        assert!(e.is_symbolic());
        assert_eq!(e.bind("t", 3.0).as_f64(), Some(7.0));
        assert_eq!(format!("{e}"), "((2 * t) + 1)");
    }
}
