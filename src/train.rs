//! Contract between a network and a trainer.
//!
//! Training itself is not provided. A trainer implements [`Backward`] and produces
//! [`Gradients`] shaped like the network parameters, which a parameter-update step consumes.

use ndarray::{ArrayBase, Data, Ix2};

use crate::{
    error::{Error, Result},
    matrix::{alloc, Matrix},
    network::Network,
};

/// One gradient matrix per weight matrix and per bias matrix, with matching shapes.
pub struct Gradients {
    pub weights: Vec<Matrix>,
    pub biases: Vec<Matrix>,
}

impl Gradients {
    /// Zero gradients shaped like the parameters of `network`.
    pub fn zeros_like(network: &Network) -> Result<Self> {
        let zeros = |params: &[Matrix]| {
            params
                .iter()
                .map(|p| alloc(p.nrows(), p.ncols()))
                .collect::<Result<Vec<_>>>()
        };
        Ok(Self {
            weights: zeros(network.weights())?,
            biases: zeros(network.biases())?,
        })
    }

    /// Check that every gradient has the shape of the parameter it belongs to.
    pub fn check_matches(&self, network: &Network) -> Result<()> {
        check_all(&self.weights, network.weights())?;
        check_all(&self.biases, network.biases())
    }
}

fn check_all(grads: &[Matrix], params: &[Matrix]) -> Result<()> {
    if grads.len() != params.len() {
        return Err(Error::IndexOutOfRange {
            op: "gradients",
            index: grads.len(),
            len: params.len(),
        });
    }
    for (grad, param) in grads.iter().zip(params) {
        if grad.dim() != param.dim() {
            return Err(Error::shape("gradients", param.dim(), grad.dim()));
        }
    }
    Ok(())
}

/// Gradient computation over a labeled dataset.
/// `inputs` and `targets` follow the same contract as [`Network::cost`].
pub trait Backward {
    fn backward<S, T>(
        &mut self,
        network: &mut Network,
        inputs: &ArrayBase<S, Ix2>,
        targets: &ArrayBase<T, Ix2>,
    ) -> Result<Gradients>
    where
        S: Data<Elem = f32>,
        T: Data<Elem = f32>;
}
