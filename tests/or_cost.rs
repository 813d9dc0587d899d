use approx::assert_relative_eq;
use csv::ReaderBuilder;
use ndarray_rand::rand::{rngs::StdRng, SeedableRng};
use stride::{
    assert_rel_eq_arr2,
    matrix::{row, row_stride},
    Dataset, Network,
};

// Truth table of logical OR: two inputs then the target on each row.
const OR_TABLE: &str = "\
0,0,0
0,1,1
1,0,1
1,1,1
";

fn load_dataset(text: &str, input_cols: usize) -> Dataset {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .from_reader(text.as_bytes());
    let mut values = Vec::new();
    let mut width = 0;
    for record in reader.records() {
        let record = record.unwrap();
        width = record.len();
        values.extend(record.iter().map(|v| v.parse::<f32>().unwrap()));
    }
    Dataset::new(input_cols, width - input_cols, values).unwrap()
}

#[test]
fn dataset_views_share_row_stride() {
    let data = load_dataset(OR_TABLE, 2);
    let inputs = data.inputs();
    let targets = data.targets();
    assert_eq!(3, row_stride(&inputs));
    assert_eq!(3, row_stride(&targets));
    assert_eq!(3, row_stride(&row(&targets, 1).unwrap()));
    assert_eq!(3, row_stride(&row(&inputs, 3).unwrap()));
    assert_eq!(
        data.table().as_ptr().wrapping_add(3 + 2),
        row(&targets, 1).unwrap().as_ptr()
    );
    assert_rel_eq_arr2!(row(&inputs, 2).unwrap(), ndarray::arr2(&[[1.0, 0.0]]));
}

#[test]
fn cost_of_all_ones_network() {
    let data = load_dataset(OR_TABLE, 2);
    let mut net = Network::new(&[2, 2, 1]).unwrap();
    net.fill(1.0);

    let output = net.predict(&row(&data.inputs(), 3).unwrap()).unwrap();
    assert_rel_eq_arr2!(output, ndarray::arr2(&[[7.0]]));

    assert_relative_eq!(19.25, net.cost(&data.inputs(), &data.targets()).unwrap());
}

#[test]
fn cost_of_random_network_is_reproducible() {
    let data = load_dataset(OR_TABLE, 2);
    let cost = |seed| {
        let mut net = Network::new(&[2, 2, 1]).unwrap();
        net.randomize(&mut StdRng::seed_from_u64(seed));
        net.cost(&data.inputs(), &data.targets()).unwrap()
    };

    let first = cost(2024);
    println!("cost: {}", first);
    assert!(first.is_finite() && first >= 0.0);
    assert_eq!(first, cost(2024));
}

#[test]
fn held_out_rows() {
    let data = load_dataset(OR_TABLE, 2);
    let mut net = Network::new(&[2, 3, 1]).unwrap();
    net.fill(0.0);

    let (inputs, targets) = data.rows(1..4).unwrap();
    // Every prediction is 0 and every held out target is 1.
    assert_relative_eq!(1.0, net.cost(&inputs, &targets).unwrap());
}
