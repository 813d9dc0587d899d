//! Strided row-major `f32` matrices and the operations the network is built from.
//!
//! Owning matrices are `Array2<f32>`. Views are `ArrayView2` / `ArrayViewMut2` into a parent's
//! storage: they keep the parent's row stride, so a view of some columns of a wider row still
//! steps over the whole backing row. The borrow checker ties every view to its parent.
//!
//! All operations accept owning matrices and views alike, and validate shapes before writing.

use std::{mem::size_of, ops::Range};

use ndarray::{
    linalg::general_mat_mul, s, Array2, ArrayBase, ArrayView2, ArrayViewMut2, Data, DataMut, Ix2,
    ShapeBuilder, Zip,
};
use ndarray_rand::rand::Rng;
use ndarray_rand::rand_distr::{Distribution, Uniform};

use crate::error::{Error, Result};

/// Matrix owning its storage.
pub type Matrix = Array2<f32>;
/// Read-only view aliasing another matrix's storage.
pub type MatrixView<'a> = ArrayView2<'a, f32>;
/// Mutable view aliasing another matrix's storage.
pub type MatrixViewMut<'a> = ArrayViewMut2<'a, f32>;

/// How `dot` treats the existing contents of its destination.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Product {
    /// `dst = a * b`
    Overwrite,
    /// `dst += a * b`. The destination is not cleared first.
    Accumulate,
}

impl Product {
    fn beta(self) -> f32 {
        match self {
            Product::Overwrite => 0.0,
            Product::Accumulate => 1.0,
        }
    }
}

/// Allocate a zero-filled `(rows, cols)` matrix whose row stride equals `cols`.
pub fn alloc(rows: usize, cols: usize) -> Result<Matrix> {
    let failure = || Error::AllocationFailure { rows, cols };

    let len = rows.checked_mul(cols).ok_or_else(failure)?;
    len.checked_mul(size_of::<f32>())
        .filter(|&bytes| bytes <= isize::MAX as usize)
        .ok_or_else(failure)?;

    let mut storage = Vec::new();
    storage.try_reserve_exact(len).map_err(|_| failure())?;
    storage.resize(len, 0.0);
    Matrix::from_shape_vec((rows, cols), storage).map_err(|_| failure())
}

/// One-row view of row `index`, sharing storage and row stride with `a`.
pub fn row<S>(a: &ArrayBase<S, Ix2>, index: usize) -> Result<MatrixView<'_>>
where
    S: Data<Elem = f32>,
{
    check_index("row", index, a.nrows())?;
    keep_pitch("row", a.slice(s![index..index + 1, ..]), pitch(a))
}

/// Mutable one-row view of row `index`. Writes go to `a`'s storage.
pub fn row_mut<S>(a: &mut ArrayBase<S, Ix2>, index: usize) -> Result<MatrixViewMut<'_>>
where
    S: DataMut<Elem = f32>,
{
    check_index("row_mut", index, a.nrows())?;
    let pitch = pitch(a);
    keep_pitch_mut("row_mut", a.slice_mut(s![index..index + 1, ..]), pitch)
}

/// View of the rows in `range` over every column, sharing storage and row stride with `a`.
pub fn rows<S>(a: &ArrayBase<S, Ix2>, range: Range<usize>) -> Result<MatrixView<'_>>
where
    S: Data<Elem = f32>,
{
    check_range("rows", &range, a.nrows())?;
    keep_pitch("rows", a.slice(s![range, ..]), pitch(a))
}

/// View of the columns in `range` over every row. The row stride stays the parent's.
pub fn columns<S>(a: &ArrayBase<S, Ix2>, range: Range<usize>) -> Result<MatrixView<'_>>
where
    S: Data<Elem = f32>,
{
    check_range("columns", &range, a.ncols())?;
    keep_pitch("columns", a.slice(s![.., range]), pitch(a))
}

/// Number of elements between the starts of consecutive rows.
pub fn row_stride<S>(a: &ArrayBase<S, Ix2>) -> usize
where
    S: Data<Elem = f32>,
{
    a.strides()[0].unsigned_abs()
}

/// Element `(i, j)`.
pub fn at<S>(a: &ArrayBase<S, Ix2>, i: usize, j: usize) -> Result<f32>
where
    S: Data<Elem = f32>,
{
    check_index("at", i, a.nrows())?;
    check_index("at", j, a.ncols())?;
    Ok(a[[i, j]])
}

/// Copy `src` into `dst` element by element. Only the logical columns of `dst` are written,
/// never the padding between the end of a row and the next row start.
pub fn copy<S, T>(dst: &mut ArrayBase<S, Ix2>, src: &ArrayBase<T, Ix2>) -> Result<()>
where
    S: DataMut<Elem = f32>,
    T: Data<Elem = f32>,
{
    check_same_shape("copy", dst.dim(), src.dim())?;
    dst.assign(src);
    Ok(())
}

/// Matrix product of `a` and `b` written into `dst` according to `mode`.
///
/// Requires `a.ncols() == b.nrows()` and `dst` to be `(a.nrows(), b.ncols())`.
/// Contracts over the rows of `b`: `dst[i, j] = sum_k a[i, k] * b[k, j]`. Reading `b[j, k]`
/// instead, as if `b` were stored transposed, would leave `b`'s bounds whenever `b` is not
/// square, so `b` is never treated as pre-transposed.
pub fn dot<A, B, C>(
    a: &ArrayBase<A, Ix2>,
    b: &ArrayBase<B, Ix2>,
    dst: &mut ArrayBase<C, Ix2>,
    mode: Product,
) -> Result<()>
where
    A: Data<Elem = f32>,
    B: Data<Elem = f32>,
    C: DataMut<Elem = f32>,
{
    if a.ncols() != b.nrows() {
        return Err(Error::shape("dot", (a.ncols(), b.ncols()), b.dim()));
    }
    check_same_shape("dot", (a.nrows(), b.ncols()), dst.dim())?;

    general_mat_mul(1.0, a, b, mode.beta(), dst);
    Ok(())
}

/// `a += b`
pub fn sum<S, T>(a: &mut ArrayBase<S, Ix2>, b: &ArrayBase<T, Ix2>) -> Result<()>
where
    S: DataMut<Elem = f32>,
    T: Data<Elem = f32>,
{
    check_same_shape("sum", a.dim(), b.dim())?;
    Zip::from(a).and(b).for_each(|a, &b| *a += b);
    Ok(())
}

/// Clamp every negative element to zero, in place.
pub fn relu<S>(a: &mut ArrayBase<S, Ix2>)
where
    S: DataMut<Elem = f32>,
{
    a.mapv_inplace(|v| v.max(0.0));
}

/// Overwrite every element with an independent sample from `[0, 1)`.
pub fn randomize<S, R>(a: &mut ArrayBase<S, Ix2>, rng: &mut R)
where
    S: DataMut<Elem = f32>,
    R: Rng + ?Sized,
{
    let uniform = Uniform::new(0.0f32, 1.0);
    a.map_inplace(|v| *v = uniform.sample(&mut *rng));
}

pub fn fill<S>(a: &mut ArrayBase<S, Ix2>, value: f32)
where
    S: DataMut<Elem = f32>,
{
    a.fill(value);
}

// Row pitch a view of `a` must keep. A parent that is itself a single row may report 0.
fn pitch<S>(a: &ArrayBase<S, Ix2>) -> usize
where
    S: Data<Elem = f32>,
{
    row_stride(a).max(a.ncols())
}

// ndarray drops the stride of an axis sliced down to one element. Rebuild a single-row view
// over the same storage with the parent's pitch so `row_stride` keeps reporting it.
fn keep_pitch<'a>(
    op: &'static str,
    view: MatrixView<'a>,
    pitch: usize,
) -> Result<MatrixView<'a>> {
    if view.nrows() != 1 || view.ncols() == 0 {
        return Ok(view);
    }
    let cols = view.ncols();
    match view.to_slice() {
        Some(storage) => MatrixView::from_shape((1, cols).strides((pitch, 1)), storage)
            .map_err(|_| Error::shape(op, (1, cols), (1, storage.len()))),
        None => Ok(view),
    }
}

fn keep_pitch_mut<'a>(
    op: &'static str,
    view: MatrixViewMut<'a>,
    pitch: usize,
) -> Result<MatrixViewMut<'a>> {
    if view.nrows() != 1 || view.ncols() == 0 || !view.is_standard_layout() {
        return Ok(view);
    }
    let cols = view.ncols();
    let storage = view
        .into_slice()
        .ok_or_else(|| Error::shape(op, (1, cols), (1, 0)))?;
    let len = storage.len();
    MatrixViewMut::from_shape((1, cols).strides((pitch, 1)), storage)
        .map_err(|_| Error::shape(op, (1, cols), (1, len)))
}

fn check_range(op: &'static str, range: &Range<usize>, len: usize) -> Result<()> {
    if range.start > range.end {
        return Err(Error::IndexOutOfRange {
            op,
            index: range.start,
            len: range.end,
        });
    }
    if range.end > len {
        return Err(Error::IndexOutOfRange {
            op,
            index: range.end,
            len,
        });
    }
    Ok(())
}

fn check_index(op: &'static str, index: usize, len: usize) -> Result<()> {
    if index < len {
        Ok(())
    } else {
        Err(Error::IndexOutOfRange { op, index, len })
    }
}

fn check_same_shape(
    op: &'static str,
    expected: (usize, usize),
    actual: (usize, usize),
) -> Result<()> {
    if expected == actual {
        Ok(())
    } else {
        Err(Error::shape(op, expected, actual))
    }
}
