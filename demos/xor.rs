use layered_net::{BackpropConfig, Dataset, NetBuilder, OnlineBackprop, Shuffle};
use tracing_subscriber::EnvFilter;

fn main() -> layered_net::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    // Classic XOR dataset.
    let xs = vec![
        vec![0.0, 0.0],
        vec![0.0, 1.0],
        vec![1.0, 0.0],
        vec![1.0, 1.0],
    ];
    let ys = vec![vec![0.0], vec![1.0], vec![1.0], vec![0.0]];
    let train = Dataset::from_rows(&xs, &ys)?;

    // 2 -> 4 -> 1 network with bias units on the input and hidden layers.
    let strategy = OnlineBackprop::new(BackpropConfig {
        weight_decay: 0.0,
        shuffle: Shuffle::Seeded(0),
    })?;
    let mut net = NetBuilder::new(2, true)?
        .add_layer(4, true)?
        .add_layer(1, false)?
        .strategy(strategy)
        .build()?;
    println!("{}", net.graph().summary());

    let before: f64 = net.validation(&train)?.iter().sum();
    net.set_training_data(train.clone())?;
    net.learn(0.5, 10_000)?;
    let after: f64 = net.validation(&train)?.iter().sum();
    println!("total abs error: before={before:.4} after={after:.4}");

    let mut out = [0.0_f64; 1];
    for x in xs {
        net.predict_into(&x, &mut out)?;
        println!("x={x:?} y={:.4}", out[0]);
    }

    Ok(())
}
