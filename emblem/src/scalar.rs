//! Numeric type parameter shared by every expression.
use std::fmt::{Debug, Display};

use num_traits::{Float, FloatConst};

/// Scalar values an [`Expression`](crate::expr::Expression) evaluates to.
///
/// Blanket-implemented for every floating point type that can be printed, in
/// practice `f32` and `f64`. The zero value ([`num_traits::Zero::zero`]) is
/// what evaluating an empty expression yields.
pub trait Scalar: Float + FloatConst + Debug + Display + 'static {}

impl<T: Float + FloatConst + Debug + Display + 'static> Scalar for T {}
