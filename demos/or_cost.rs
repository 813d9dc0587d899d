use ndarray_rand::rand::{rngs::StdRng, SeedableRng};
use stride::{Dataset, Network};

fn main() -> stride::Result<()> {
    #[rustfmt::skip]
    let data = Dataset::new(2, 1, vec![
        0.0, 0.0, 0.0,
        0.0, 1.0, 1.0,
        1.0, 0.0, 1.0,
        1.0, 1.0, 1.0,
    ])?;

    let seed = std::env::args()
        .nth(1)
        .and_then(|arg| arg.parse().ok())
        .unwrap_or(0);
    let mut network = Network::new(&[2, 2, 1])?;
    network.randomize(&mut StdRng::seed_from_u64(seed));

    for (i, weights) in network.weights().iter().enumerate() {
        println!("ws{}: {}", i, weights);
        println!("bs{}: {}", i, network.biases()[i]);
    }
    println!("cost: {}", network.cost(&data.inputs(), &data.targets())?);
    Ok(())
}
