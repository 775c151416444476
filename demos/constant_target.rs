use layered_net::{BatchBackprop, Dataset, NeuralNet};

fn main() -> layered_net::Result<()> {
    tracing_subscriber::fmt().init();

    // Teach a 1 -> 3 -> 2 net to output (0.2, 0.8) regardless of input.
    let xs: Vec<Vec<f64>> = (0..8).map(|i| vec![i as f64 / 8.0]).collect();
    let ys = vec![vec![0.2, 0.8]; xs.len()];
    let train = Dataset::from_rows(&xs, &ys)?;

    let mut net = NeuralNet::new_with_seed(
        &[1, 3, 2],
        &[true, true, false],
        Box::new(BatchBackprop::default()),
        7,
    )?;
    net.set_training_data(train.clone())?;

    for round in 0..5 {
        net.learn(1.0, 200)?;
        let errors = net.validation(&train)?;
        let mean = errors.iter().sum::<f64>() / errors.len() as f64;
        println!(
            "round={round} loss={:?} mean_abs_error={mean:.5}",
            net.strategy().last_loss()
        );
    }

    for (l, weights) in net.graph().weights().iter().enumerate() {
        println!("connection layer {l}: {weights:.3?}");
    }
    Ok(())
}
