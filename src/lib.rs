pub mod data;
pub mod error;
pub mod loss;
pub mod matrix;
pub mod network;
pub mod train;

pub use data::Dataset;
pub use error::{Error, Result};
pub use matrix::{Matrix, MatrixView, MatrixViewMut, Product};
pub use network::Network;

/// Assert that two matrices have the same shape and relatively equal elements.
/// Requires `approx::assert_relative_eq` in scope.
#[macro_export]
macro_rules! assert_rel_eq_arr2 {
    ($actual:expr, $expected:expr) => {
        assert_eq!($actual.shape(), $expected.shape());
        ndarray::Zip::from(&$actual)
            .and(&$expected)
            .for_each(|v, w| {
                assert_relative_eq!(v, w);
            });
    };
}
