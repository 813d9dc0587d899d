use ndarray::{ArrayBase, Data, Ix2, Zip};

use crate::error::{Error, Result};

/// Sum of squared differences between `output` and `target`.
/// Shapes must match; the sum is not divided by anything.
pub fn squared_error<S, T>(output: &ArrayBase<S, Ix2>, target: &ArrayBase<T, Ix2>) -> Result<f32>
where
    S: Data<Elem = f32>,
    T: Data<Elem = f32>,
{
    if output.dim() != target.dim() {
        return Err(Error::shape("squared_error", output.dim(), target.dim()));
    }

    Ok(Zip::from(output)
        .and(target)
        .fold(0.0, |sum, &output, &target| sum + (output - target).powi(2)))
}
