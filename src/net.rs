use rand::Rng;
use tracing::info;

use crate::graph::DEFAULT_SEED;
use crate::strategy::validate_learning_args;
use crate::{Dataset, Error, Graph, LearningStrategy, Result};

/// A layered graph together with the strategy that trains it.
///
/// The net owns its [`Graph`], an installed [`LearningStrategy`] and the current
/// training data. [`NeuralNet::learn`] lends the live graph to the strategy;
/// [`NeuralNet::predict`] and [`NeuralNet::validation`] read the trained graph
/// back through forward propagation.
///
/// Every operation is a blocking, single-threaded call. Callers that share a net
/// across threads must guard the whole net with one lock, since both prediction
/// and learning rewrite graph state in several steps.
#[derive(Debug)]
pub struct NeuralNet {
    graph: Graph,
    strategy: Box<dyn LearningStrategy>,
    data: Option<Dataset>,
}

impl NeuralNet {
    /// Build a net whose initial weights come from [`DEFAULT_SEED`].
    pub fn new(
        sizes: &[usize],
        bias: &[bool],
        strategy: Box<dyn LearningStrategy>,
    ) -> Result<Self> {
        Self::new_with_seed(sizes, bias, strategy, DEFAULT_SEED)
    }

    pub fn new_with_seed(
        sizes: &[usize],
        bias: &[bool],
        strategy: Box<dyn LearningStrategy>,
        seed: u64,
    ) -> Result<Self> {
        Ok(Self::from_graph(
            Graph::new_with_seed(sizes, bias, seed)?,
            strategy,
        ))
    }

    pub fn new_with_rng<R: Rng + ?Sized>(
        sizes: &[usize],
        bias: &[bool],
        strategy: Box<dyn LearningStrategy>,
        rng: &mut R,
    ) -> Result<Self> {
        Ok(Self::from_graph(
            Graph::new_with_rng(sizes, bias, rng)?,
            strategy,
        ))
    }

    pub fn from_graph(graph: Graph, strategy: Box<dyn LearningStrategy>) -> Self {
        Self {
            graph,
            strategy,
            data: None,
        }
    }

    #[inline]
    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    #[inline]
    pub fn strategy(&self) -> &dyn LearningStrategy {
        self.strategy.as_ref()
    }

    #[inline]
    pub fn training_data(&self) -> Option<&Dataset> {
        self.data.as_ref()
    }

    #[inline]
    pub fn input_dim(&self) -> usize {
        self.graph.input_dim()
    }

    #[inline]
    pub fn output_dim(&self) -> usize {
        self.graph.output_dim()
    }

    /// Set the data used by the next [`NeuralNet::learn`] call.
    pub fn set_training_data(&mut self, data: Dataset) -> Result<()> {
        if data.is_empty() {
            return Err(Error::InvalidData(
                "train dataset must not be empty".to_owned(),
            ));
        }
        self.graph.check_dataset(&data)?;
        self.data = Some(data);
        Ok(())
    }

    /// Train the graph's weights with the installed strategy.
    pub fn learn(&mut self, learning_rate: f64, iterations: usize) -> Result<()> {
        validate_learning_args(learning_rate, iterations)?;
        let data = self
            .data
            .as_ref()
            .ok_or_else(|| Error::InvalidData("no training data set".to_owned()))?;

        info!(
            strategy = self.strategy.name(),
            learning_rate,
            iterations,
            instances = data.len(),
            "learning weights"
        );
        self.strategy.set_data(data, &self.graph)?;
        self.strategy
            .learn_weights(&mut self.graph, learning_rate, iterations)?;
        info!(
            strategy = self.strategy.name(),
            loss = self.strategy.last_loss(),
            "finished learning"
        );
        Ok(())
    }

    /// Forward-propagate `input` and return the output layer's values.
    pub fn predict(&mut self, input: &[f64]) -> Result<Vec<f64>> {
        self.graph.predict(input)
    }

    /// Like [`NeuralNet::predict`], writing into `out` (length `output_dim()`).
    pub fn predict_into(&mut self, input: &[f64], out: &mut [f64]) -> Result<()> {
        self.graph.predict_into(input, out)
    }

    /// Per-instance sums of absolute output errors, in dataset order.
    pub fn validation(&mut self, data: &Dataset) -> Result<Vec<f64>> {
        self.graph.validation(data)
    }

    /// Overwrite every weight. See [`Graph::set_all_weights`].
    pub fn set_all_weights<W: AsRef<[f64]>>(&mut self, weights: &[W]) -> Result<()> {
        self.graph.set_all_weights(weights)
    }
}
