use layered_net::activation::sigmoid;
use layered_net::{
    BackpropConfig, BatchBackprop, Dataset, Error, NetBuilder, NeuralNet, OnlineBackprop,
    ShapeMismatch, Shuffle,
};

fn xor() -> Dataset {
    Dataset::from_rows(
        &[
            vec![0.0, 0.0],
            vec![0.0, 1.0],
            vec![1.0, 0.0],
            vec![1.0, 1.0],
        ],
        &[vec![0.0], vec![1.0], vec![1.0], vec![0.0]],
    )
    .unwrap()
}

#[test]
fn two_two_one_with_unit_weights() {
    let mut net = NeuralNet::new(
        &[2, 2, 1],
        &[false, false, false],
        Box::new(OnlineBackprop::default()),
    )
    .unwrap();
    net.set_all_weights(&[vec![1.0; 4], vec![1.0; 2]]).unwrap();

    let out = net.predict(&[0.0, 0.0]).unwrap();
    assert_eq!(net.graph().layer_values(1), Some(vec![0.5, 0.5]));
    assert_eq!(out, vec![sigmoid(1.0)]);
    assert!((out[0] - 0.7311).abs() < 1e-4);
}

#[test]
fn zero_input_without_bias_gives_one_half_everywhere() {
    let mut net = NetBuilder::new(3, false)
        .unwrap()
        .add_layer(4, false)
        .unwrap()
        .add_layer(2, false)
        .unwrap()
        .build_with_seed(42)
        .unwrap();

    // Hidden values are all 0.5, but the outputs see non-zero weighted sums.
    net.predict(&[0.0, 0.0, 0.0]).unwrap();
    assert_eq!(net.graph().layer_values(1), Some(vec![0.5; 4]));

    let mut single = NetBuilder::new(3, false)
        .unwrap()
        .add_layer(2, false)
        .unwrap()
        .build_with_seed(42)
        .unwrap();
    assert_eq!(single.predict(&[0.0, 0.0, 0.0]).unwrap(), vec![0.5, 0.5]);
}

#[test]
fn validation_is_zero_for_an_exact_prediction() {
    let mut net = NeuralNet::new(
        &[2, 2, 1],
        &[true, false, false],
        Box::new(BatchBackprop::default()),
    )
    .unwrap();
    let y = net.predict(&[0.25, 0.75]).unwrap();
    let data = Dataset::from_rows(&[vec![0.25, 0.75]], &[y]).unwrap();
    assert_eq!(net.validation(&data).unwrap(), vec![0.0]);
}

#[test]
fn validation_returns_one_score_per_instance() {
    // More instances than output dimensions.
    let mut net = NeuralNet::new(
        &[2, 3, 1],
        &[true, true, false],
        Box::new(OnlineBackprop::default()),
    )
    .unwrap();
    let data = xor();
    let scores = net.validation(&data).unwrap();
    assert_eq!(scores.len(), data.len());
    for ((input, target), score) in data.iter().zip(&scores) {
        let y = net.predict(input).unwrap();
        assert_eq!(*score, (y[0] - target[0]).abs());
    }
}

#[test]
fn wide_output_layer_is_not_truncated() {
    let mut net = NeuralNet::new(
        &[1, 12],
        &[true, true],
        Box::new(OnlineBackprop::default()),
    )
    .unwrap();
    let out = net.predict(&[0.5]).unwrap();
    assert_eq!(out.len(), 12);
    assert!(out.iter().all(|&y| y > 0.0 && y < 1.0));
}

#[test]
fn rejected_weights_leave_the_net_unchanged() {
    let mut net = NeuralNet::new(
        &[2, 2, 1],
        &[true, false, false],
        Box::new(OnlineBackprop::default()),
    )
    .unwrap();
    let before = net.graph().weights();
    let y_before = net.predict(&[0.3, 0.6]).unwrap();

    let err = net
        .set_all_weights(&[vec![0.0; 6], vec![0.0; 1]])
        .unwrap_err();
    assert_eq!(
        err,
        Error::ShapeMismatch(ShapeMismatch::Edges {
            layer: 1,
            expected: 2,
            actual: 1
        })
    );
    assert_eq!(net.graph().weights(), before);
    assert_eq!(net.predict(&[0.3, 0.6]).unwrap(), y_before);
}

#[test]
fn dimension_errors_are_reported() {
    let mut net = NeuralNet::new(
        &[2, 1],
        &[true, false],
        Box::new(OnlineBackprop::default()),
    )
    .unwrap();
    assert!(matches!(
        net.predict(&[1.0]),
        Err(Error::DimensionMismatch(_))
    ));

    let data = Dataset::from_rows(&[vec![1.0, 0.0]], &[vec![1.0, 0.0]]).unwrap();
    assert!(matches!(
        net.validation(&data),
        Err(Error::DimensionMismatch(_))
    ));
    assert!(matches!(
        net.set_training_data(data),
        Err(Error::DimensionMismatch(_))
    ));
}

#[test]
fn malformed_topology_is_a_config_error() {
    let strategy = || Box::new(OnlineBackprop::default());
    assert!(matches!(
        NeuralNet::new(&[2, 1], &[true], strategy()),
        Err(Error::InvalidConfig(_))
    ));
    assert!(matches!(
        NeuralNet::new(&[2, 0, 1], &[true, true, false], strategy()),
        Err(Error::InvalidConfig(_))
    ));
    assert!(matches!(
        NeuralNet::new(&[], &[], strategy()),
        Err(Error::InvalidConfig(_))
    ));
}

#[test]
fn training_reduces_error_with_each_strategy() {
    let data = Dataset::from_rows(
        &[vec![0.0, 0.0], vec![0.0, 1.0], vec![1.0, 0.0], vec![1.0, 1.0]],
        &[vec![0.1], vec![0.1], vec![0.1], vec![0.1]],
    )
    .unwrap();

    let strategies: Vec<Box<dyn layered_net::LearningStrategy>> = vec![
        Box::new(OnlineBackprop::default()),
        Box::new(
            OnlineBackprop::new(BackpropConfig {
                weight_decay: 1e-4,
                shuffle: Shuffle::Seeded(7),
            })
            .unwrap(),
        ),
        Box::new(BatchBackprop::default()),
    ];

    for strategy in strategies {
        let mut net = NeuralNet::new(&[2, 3, 1], &[true, true, false], strategy).unwrap();
        let before: f64 = net.validation(&data).unwrap().iter().sum();

        net.set_training_data(data.clone()).unwrap();
        net.learn(0.5, 300).unwrap();

        let after: f64 = net.validation(&data).unwrap().iter().sum();
        assert!(
            after < before,
            "{}: before={before} after={after}",
            net.strategy().name()
        );
    }
}

#[test]
fn repeated_learning_continues_from_current_weights() {
    let mut a = NeuralNet::new(
        &[2, 3, 1],
        &[true, true, false],
        Box::new(BatchBackprop::default()),
    )
    .unwrap();
    let mut b = NeuralNet::new(
        &[2, 3, 1],
        &[true, true, false],
        Box::new(BatchBackprop::default()),
    )
    .unwrap();
    a.set_training_data(xor()).unwrap();
    b.set_training_data(xor()).unwrap();

    a.learn(0.3, 20).unwrap();
    a.learn(0.3, 20).unwrap();
    b.learn(0.3, 40).unwrap();

    assert_eq!(a.graph().weights(), b.graph().weights());
}

#[test]
fn seeded_shuffle_carries_over_between_learn_calls() {
    let xs: Vec<Vec<f64>> = (0..6).map(|i| vec![i as f64 / 5.0]).collect();
    let ys: Vec<Vec<f64>> = (0..6).map(|i| vec![((i * 7) % 6) as f64 / 6.0]).collect();
    let train = Dataset::from_rows(&xs, &ys).unwrap();
    let shuffled = || {
        let strategy = OnlineBackprop::new(BackpropConfig {
            weight_decay: 0.0,
            shuffle: Shuffle::Seeded(4),
        })
        .unwrap();
        NeuralNet::new(&[1, 3, 1], &[true, true, false], Box::new(strategy)).unwrap()
    };

    let mut a = shuffled();
    let mut b = shuffled();
    a.set_training_data(train.clone()).unwrap();
    b.set_training_data(train).unwrap();

    a.learn(0.5, 1).unwrap();
    a.learn(0.5, 1).unwrap();
    b.learn(0.5, 2).unwrap();

    assert_eq!(a.graph().weights(), b.graph().weights());
    assert_eq!(a.strategy().last_loss(), b.strategy().last_loss());
}
