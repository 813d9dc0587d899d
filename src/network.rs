use ndarray::{ArrayBase, Data, Ix2};
use ndarray_rand::rand::Rng;

use crate::{
    error::{Error, Result},
    loss::squared_error,
    matrix::{self, alloc, dot, relu, row, sum, Matrix, MatrixView, MatrixViewMut, Product},
};

/// Fully connected feedforward network with ReLU after every layer.
///
/// Each layer `i` maps `activations[i]` to `activations[i + 1]` through `weights[i]` and
/// `biases[i]`. `activations[0]` is the input buffer and the last activation is the output.
/// Activations are scratch space: every forward pass overwrites them.
pub struct Network {
    weights: Vec<Matrix>,
    biases: Vec<Matrix>,
    activations: Vec<Matrix>,
}

impl Network {
    /// Allocate a network from layer sizes, input first.
    /// `[2, 2, 1]` is two inputs, one hidden layer of two units and one output.
    /// Parameters start at zero; call `randomize` or `fill` before use.
    pub fn new(layer_sizes: &[usize]) -> Result<Self> {
        if layer_sizes.len() < 2 {
            return Err(Error::TooFewLayers(layer_sizes.len()));
        }
        if let Some(index) = layer_sizes.iter().position(|&size| size == 0) {
            return Err(Error::EmptyLayer { index });
        }

        // One input row per forward pass.
        let rows = 1;
        let layer_count = layer_sizes.len() - 1;
        let mut weights = Vec::with_capacity(layer_count);
        let mut biases = Vec::with_capacity(layer_count);
        let mut activations = Vec::with_capacity(layer_count + 1);

        activations.push(alloc(rows, layer_sizes[0])?);
        for pair in layer_sizes.windows(2) {
            let (fan_in, fan_out) = (pair[0], pair[1]);
            weights.push(alloc(fan_in, fan_out)?);
            biases.push(alloc(rows, fan_out)?);
            activations.push(alloc(rows, fan_out)?);
        }

        Ok(Self {
            weights,
            biases,
            activations,
        })
    }

    pub fn layer_count(&self) -> usize {
        self.weights.len()
    }

    pub fn input_size(&self) -> usize {
        self.input().ncols()
    }

    pub fn output_size(&self) -> usize {
        self.output().ncols()
    }

    pub fn weights(&self) -> &[Matrix] {
        &self.weights
    }

    pub fn biases(&self) -> &[Matrix] {
        &self.biases
    }

    pub fn activations(&self) -> &[Matrix] {
        &self.activations
    }

    /// Mutable views of the weights and biases of layer `index`.
    /// Views cannot be reshaped, so the layer shapes stay consistent.
    pub fn layer_mut(&mut self, index: usize) -> Result<(MatrixViewMut<'_>, MatrixViewMut<'_>)> {
        let len = self.layer_count();
        match (self.weights.get_mut(index), self.biases.get_mut(index)) {
            (Some(weights), Some(biases)) => Ok((weights.view_mut(), biases.view_mut())),
            _ => Err(Error::IndexOutOfRange {
                op: "layer_mut",
                index,
                len,
            }),
        }
    }

    pub fn input(&self) -> MatrixView<'_> {
        self.activations[0].view()
    }

    pub fn output(&self) -> MatrixView<'_> {
        self.activations[self.layer_count()].view()
    }

    /// Fill every weight and bias with uniform samples from `[0, 1)`.
    pub fn randomize<R>(&mut self, rng: &mut R)
    where
        R: Rng + ?Sized,
    {
        for (weights, biases) in self.weights.iter_mut().zip(self.biases.iter_mut()) {
            matrix::randomize(weights, rng);
            matrix::randomize(biases, rng);
        }
    }

    /// Set every weight and bias to `value`.
    pub fn fill(&mut self, value: f32) {
        for (weights, biases) in self.weights.iter_mut().zip(self.biases.iter_mut()) {
            matrix::fill(weights, value);
            matrix::fill(biases, value);
        }
    }

    /// Copy one input row into the input buffer.
    pub fn load_input<S>(&mut self, input: &ArrayBase<S, Ix2>) -> Result<()>
    where
        S: Data<Elem = f32>,
    {
        matrix::copy(&mut self.activations[0], input)
    }

    /// Propagate the current input through every layer.
    pub fn forward(&mut self) -> Result<()> {
        for (i, (weights, biases)) in self.weights.iter().zip(&self.biases).enumerate() {
            let (done, rest) = self.activations.split_at_mut(i + 1);
            let (input, output) = (&done[i], &mut rest[0]);

            dot(input, weights, output, Product::Overwrite)?;
            sum(output, biases)?;
            relu(output);
        }
        Ok(())
    }

    /// Load `input`, run a forward pass and return the output row.
    pub fn predict<S>(&mut self, input: &ArrayBase<S, Ix2>) -> Result<MatrixView<'_>>
    where
        S: Data<Elem = f32>,
    {
        self.load_input(input)?;
        self.forward()?;
        Ok(self.output())
    }

    /// Mean squared error over a dataset: the squared error of every output element summed over
    /// all rows, divided by the number of rows.
    pub fn cost<S, T>(
        &mut self,
        inputs: &ArrayBase<S, Ix2>,
        targets: &ArrayBase<T, Ix2>,
    ) -> Result<f32>
    where
        S: Data<Elem = f32>,
        T: Data<Elem = f32>,
    {
        let n_rows = inputs.nrows();
        if inputs.ncols() != self.input_size() {
            return Err(Error::shape("cost", (n_rows, self.input_size()), inputs.dim()));
        }
        if targets.dim() != (n_rows, self.output_size()) {
            return Err(Error::shape("cost", (n_rows, self.output_size()), targets.dim()));
        }
        if n_rows == 0 {
            return Err(Error::IndexOutOfRange {
                op: "cost",
                index: 0,
                len: 0,
            });
        }

        let mut total = 0.0;
        for i in 0..n_rows {
            self.load_input(&row(inputs, i)?)?;
            self.forward()?;
            total += squared_error(&self.output(), &row(targets, i)?)?;
        }
        Ok(total / n_rows as f32)
    }
}
