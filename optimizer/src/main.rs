use std::{env, error::Error, num::NonZeroUsize, sync::Arc};

use log::info;
use ndarray::Array1;
use optimizer::{
    AggregationConfig, AsyncGradientsOptimizer, Delegated, GradientAggregator, LocalMean,
    OptimizerConfig,
};
use transfer::TransferConfig;
use worker::{
    RemoteWorker, SampleBatch, SgdLocalWorker, SimWorker, Weights, WorkerSet,
};

const NUM_WORKERS: usize = 4;
const NUM_STEPS: usize = 5;
const MODEL_SIZE: usize = 8;

/// Drives the async optimizer over simulated workers minimizing the
/// quadratic objective `0.5 * ||w - 1||^2`. Pass `--delegated` to route the
/// reduction through marker-reporting workers instead of local averaging.
#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    let aggregation = if env::args().any(|arg| arg == "--delegated") {
        AggregationConfig::Delegated
    } else {
        AggregationConfig::LocalMean
    };
    let config = OptimizerConfig {
        grads_per_step: 40,
        broadcast_interval: NonZeroUsize::new(2).ok_or("broadcast interval must be non-zero")?,
    };
    info!("starting optimizer demo: aggregation={aggregation:?}");

    match aggregation {
        AggregationConfig::LocalMean => run(build_workers(None), config, LocalMean).await,
        AggregationConfig::Delegated => {
            let transfer = TransferConfig {
                enable: true,
                ..TransferConfig::default()
            };
            run(build_workers(Some(transfer)), config, Delegated).await
        }
    }
}

fn build_workers(transfer: Option<TransferConfig>) -> WorkerSet {
    let initial: Weights = vec![Array1::zeros(MODEL_SIZE)];
    let local = SgdLocalWorker::new(initial, 0.1);

    let remotes = (0..NUM_WORKERS)
        .map(|id| {
            let mut sim = SimWorker::new(id, 10, |weights: &Weights, _batch: &SampleBatch| {
                weights.iter().map(|layer| layer.mapv(|w| w - 1.0)).collect()
            });
            if let Some(transfer) = &transfer {
                sim = sim.delegated(transfer.clone());
            }
            Arc::new(sim) as Arc<dyn RemoteWorker>
        })
        .collect();

    WorkerSet::new(Box::new(local), remotes)
}

async fn run<A: GradientAggregator>(
    workers: WorkerSet,
    config: OptimizerConfig,
    aggregator: A,
) -> Result<(), Box<dyn Error>> {
    let mut optimizer = AsyncGradientsOptimizer::new(workers, config, aggregator)?;

    for step in 0..NUM_STEPS {
        optimizer.step().await?;
        let stats = serde_json::to_string(&optimizer.stats())?;
        info!(step = step; "stats: {stats}");
    }

    let weights = optimizer.workers().local_worker().get_weights();
    info!("final weights: {:?}", weights[0]);

    Ok(())
}
