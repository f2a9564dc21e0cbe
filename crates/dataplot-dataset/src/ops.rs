//! Arithmetic operators on datasets
//!
//! Operations with a scalar cannot fail and return the dataset directly.
//! Operations between two datasets return a [`Result`], since the lengths
//! may not broadcast together.

use crate::dataset::PlotDataSet;
use crate::format::BinaryOp;
use crate::group::DataSet;
use dataplot_core::Result;
use std::ops::{Add, Div, Mul, Neg, Sub};

macro_rules! impl_binary_ops {
    ($ty:ty, $($trait:ident :: $method:ident => $op:expr),+ $(,)?) => {
        $(
            impl $trait<f64> for &$ty {
                type Output = $ty;

                fn $method(self, rhs: f64) -> $ty {
                    self.scalar_op($op, rhs)
                }
            }

            impl $trait<f64> for $ty {
                type Output = $ty;

                fn $method(self, rhs: f64) -> $ty {
                    (&self).$method(rhs)
                }
            }

            impl<'a> $trait<&'a $ty> for f64 {
                type Output = $ty;

                fn $method(self, rhs: &'a $ty) -> $ty {
                    rhs.rapply($op, self)
                }
            }

            impl $trait<$ty> for f64 {
                type Output = $ty;

                fn $method(self, rhs: $ty) -> $ty {
                    rhs.rapply($op, self)
                }
            }

            impl<'a> $trait<&'a $ty> for &$ty {
                type Output = Result<$ty>;

                fn $method(self, rhs: &'a $ty) -> Result<$ty> {
                    self.apply($op, rhs)
                }
            }
        )+
    };
}

impl_binary_ops!(
    PlotDataSet,
    Add::add => BinaryOp::Add,
    Sub::sub => BinaryOp::Sub,
    Mul::mul => BinaryOp::Mul,
    Div::div => BinaryOp::Div,
);

impl_binary_ops!(
    DataSet,
    Add::add => BinaryOp::Add,
    Sub::sub => BinaryOp::Sub,
    Mul::mul => BinaryOp::Mul,
    Div::div => BinaryOp::Div,
);

impl Neg for &PlotDataSet {
    type Output = PlotDataSet;

    fn neg(self) -> PlotDataSet {
        PlotDataSet::neg(self)
    }
}

impl Neg for PlotDataSet {
    type Output = PlotDataSet;

    fn neg(self) -> PlotDataSet {
        PlotDataSet::neg(&self)
    }
}

impl Neg for &DataSet {
    type Output = DataSet;

    fn neg(self) -> DataSet {
        DataSet::neg(self)
    }
}

impl Neg for DataSet {
    type Output = DataSet;

    fn neg(self) -> DataSet {
        DataSet::neg(&self)
    }
}
