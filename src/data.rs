use std::ops::Range;

use ndarray::{s, Axis};

use crate::{
    error::{Error, Result},
    matrix::{self, Matrix, MatrixView},
};

/// Labeled data stored as one flat matrix whose rows are input features followed by target
/// features. `inputs()` and `targets()` are column-range views into the same storage, so both
/// step over whole dataset rows.
pub struct Dataset {
    table: Matrix,
    input_cols: usize,
}

impl Dataset {
    /// Build a dataset from row-major `values`, each row holding `input_cols` inputs followed by
    /// `target_cols` targets.
    pub fn new(input_cols: usize, target_cols: usize, values: Vec<f32>) -> Result<Self> {
        let width = input_cols
            .checked_add(target_cols)
            .filter(|&width| width > 0)
            .ok_or(Error::InvalidWidth {
                input_cols,
                target_cols,
            })?;
        if values.len() % width != 0 {
            // Report the shape the values would need to fill whole rows.
            let rows = values.len() / width + 1;
            return Err(Error::shape("dataset", (rows, width), (1, values.len())));
        }

        let rows = values.len() / width;
        let table = Matrix::from_shape_vec((rows, width), values)
            .map_err(|_| Error::shape("dataset", (rows, width), (1, rows * width)))?;
        Self::from_matrix(table, input_cols)
    }

    /// Wrap `table`, treating its first `input_cols` columns as inputs and the rest as targets.
    pub fn from_matrix(table: Matrix, input_cols: usize) -> Result<Self> {
        if input_cols > table.ncols() {
            return Err(Error::IndexOutOfRange {
                op: "dataset",
                index: input_cols,
                len: table.ncols(),
            });
        }
        Ok(Self { table, input_cols })
    }

    pub fn len(&self) -> usize {
        self.table.nrows()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn table(&self) -> MatrixView<'_> {
        self.table.view()
    }

    pub fn inputs(&self) -> MatrixView<'_> {
        self.table.slice(s![.., ..self.input_cols])
    }

    pub fn targets(&self) -> MatrixView<'_> {
        self.table.slice(s![.., self.input_cols..])
    }

    /// Inputs and targets of the rows in `range`, e.g. to hold out part of the data.
    pub fn rows(&self, range: Range<usize>) -> Result<(MatrixView<'_>, MatrixView<'_>)> {
        Ok(matrix::rows(&self.table, range)?.split_at(Axis(1), self.input_cols))
    }
}

#[cfg(test)]
mod tests {
    use crate::{assert_rel_eq_arr2, matrix::row_stride};

    use super::*;

    use approx::assert_relative_eq;
    use ndarray::arr2;

    fn or_dataset() -> Dataset {
        #[rustfmt::skip]
        let values = vec![
            0.0, 0.0, 0.0,
            0.0, 1.0, 1.0,
            1.0, 0.0, 1.0,
            1.0, 1.0, 1.0,
        ];
        Dataset::new(2, 1, values).unwrap()
    }

    #[test]
    fn split_into_views() {
        let data = or_dataset();
        assert_eq!(4, data.len());

        let inputs = data.inputs();
        let targets = data.targets();
        assert_eq!((4, 2), inputs.dim());
        assert_eq!((4, 1), targets.dim());
        assert_eq!(3, row_stride(&inputs));
        assert_eq!(3, row_stride(&targets));
        assert_rel_eq_arr2!(targets, arr2(&[[0.0], [1.0], [1.0], [1.0]]));
    }

    #[test]
    fn views_alias_the_table() {
        let data = or_dataset();
        let table = data.table();
        assert_eq!(table.as_ptr(), data.inputs().as_ptr());
        assert_eq!(table.as_ptr().wrapping_add(2), data.targets().as_ptr());
    }

    #[test]
    fn row_range() {
        let data = or_dataset();
        let (inputs, targets) = data.rows(1..3).unwrap();
        assert_rel_eq_arr2!(inputs, arr2(&[[0.0, 1.0], [1.0, 0.0]]));
        assert_rel_eq_arr2!(targets, arr2(&[[1.0], [1.0]]));
        assert_relative_eq!(1.0, targets[[0, 0]]);

        let (inputs, targets) = data.rows(3..4).unwrap();
        assert_eq!((1, 2), inputs.dim());
        assert_eq!(3, row_stride(&inputs));
        assert_eq!(3, row_stride(&targets));
        assert_eq!(data.table().as_ptr().wrapping_add(3 * 3 + 2), targets.as_ptr());

        assert!(matches!(
            data.rows(2..5),
            Err(Error::IndexOutOfRange { index: 5, len: 4, .. })
        ));
    }

    #[test]
    fn reject_ragged_values() {
        assert_eq!(
            Some(Error::shape("dataset", (2, 3), (1, 4))),
            Dataset::new(2, 1, vec![0.0; 4]).err()
        );
    }

    #[test]
    fn reject_zero_width_rows() {
        assert_eq!(
            Some(Error::InvalidWidth {
                input_cols: 0,
                target_cols: 0
            }),
            Dataset::new(0, 0, vec![1.0; 3]).err()
        );
    }

    #[test]
    fn reject_overflowing_width() {
        assert_eq!(
            Some(Error::InvalidWidth {
                input_cols: usize::MAX,
                target_cols: 1
            }),
            Dataset::new(usize::MAX, 1, Vec::new()).err()
        );
    }

    #[test]
    fn reject_too_many_input_columns() {
        assert!(matches!(
            Dataset::from_matrix(Matrix::zeros((2, 3)), 4),
            Err(Error::IndexOutOfRange { index: 4, len: 3, .. })
        ));
    }

    #[test]
    fn empty_dataset() {
        let data = Dataset::new(2, 1, Vec::new()).unwrap();
        assert!(data.is_empty());
        assert_eq!((0, 2), data.inputs().dim());
    }
}
