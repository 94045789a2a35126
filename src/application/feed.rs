use std::sync::Arc;
use std::time::Duration;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;

use crate::domain::ports::OrderSource;

use super::commands::{DashboardCommand, FeedEvent};

#[derive(Debug, Clone, PartialEq)]
pub struct FeedConfig {
    pub arrival_interval: Duration,
    pub arrival_probability: f64,
    pub progression_interval: Duration,
    pub progression_probability: f64,
    /// Seeds the dice rolls; `None` draws from OS entropy.
    pub seed: Option<u64>,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            arrival_interval: Duration::from_secs(20),
            arrival_probability: 0.2,
            progression_interval: Duration::from_secs(15),
            progression_probability: 0.1,
            seed: None,
        }
    }
}

/// Stops both feed timers when dropped.
///
/// Every event the feed queues carries this token, so events still queued
/// once it is cancelled are discarded by the dashboard.
#[derive(Debug)]
pub struct FeedGuard {
    token: CancellationToken,
    tasks: Vec<JoinHandle<()>>,
}

impl FeedGuard {
    pub fn is_stopped(&self) -> bool {
        self.token.is_cancelled()
    }

    /// Cancel the timers and wait for both to exit.
    pub async fn shutdown(mut self) {
        self.token.cancel();
        for task in std::mem::take(&mut self.tasks) {
            if let Err(e) = task.await {
                log::warn!("Feed timer ended abnormally: {}", e);
            }
        }
    }
}

impl Drop for FeedGuard {
    fn drop(&mut self) {
        self.token.cancel();
    }
}

/// Two independent timers standing in for external order traffic.
pub struct SimulatedFeed;

impl SimulatedFeed {
    /// Spawn the arrival and progression timers. Each fires one full
    /// interval after start, rolls its probability and, on success, queues
    /// a `FeedEvent` on `commands`.
    pub fn start(
        config: FeedConfig,
        source: Arc<dyn OrderSource>,
        commands: mpsc::Sender<DashboardCommand>,
        token: CancellationToken,
    ) -> FeedGuard {
        let (arrival_rng, progression_rng) = match config.seed {
            Some(seed) => (
                StdRng::seed_from_u64(seed),
                StdRng::seed_from_u64(seed.wrapping_add(1)),
            ),
            None => (StdRng::from_entropy(), StdRng::from_entropy()),
        };

        let arrivals = {
            let source = Arc::clone(&source);
            tokio::spawn(run_trigger(
                "arrival",
                config.arrival_interval,
                config.arrival_probability,
                arrival_rng,
                commands.clone(),
                token.clone(),
                move |_| match source.new_order() {
                    Ok(order) => Some(FeedEvent::Arrival(order)),
                    Err(e) => {
                        log::warn!("Could not synthesise an order: {}", e);
                        None
                    }
                },
            ))
        };

        let progressions = tokio::spawn(run_trigger(
            "progression",
            config.progression_interval,
            config.progression_probability,
            progression_rng,
            commands,
            token.clone(),
            move |rng| {
                Some(FeedEvent::Progression {
                    pick: rng.gen::<f64>(),
                    status: source.random_status(),
                })
            },
        ));

        log::info!(
            "Simulated feed started (arrivals every {:?} at p={}, progressions every {:?} at p={})",
            config.arrival_interval,
            config.arrival_probability,
            config.progression_interval,
            config.progression_probability
        );

        FeedGuard {
            token,
            tasks: vec![arrivals, progressions],
        }
    }
}

async fn run_trigger<F>(
    name: &'static str,
    period: Duration,
    probability: f64,
    mut rng: StdRng,
    commands: mpsc::Sender<DashboardCommand>,
    token: CancellationToken,
    mut make_event: F,
) where
    F: FnMut(&mut StdRng) -> Option<FeedEvent> + Send + 'static,
{
    let period = period.max(Duration::from_millis(1));
    let probability = sanitize_probability(name, probability);
    let mut ticker = interval_at(Instant::now() + period, period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            _ = token.cancelled() => break,
            _ = ticker.tick() => {}
        }

        if !rng.gen_bool(probability) {
            log::debug!("Feed {} tick: no event", name);
            continue;
        }
        let Some(event) = make_event(&mut rng) else {
            continue;
        };
        log::debug!("Feed {} tick: {:?}", name, event);
        let command = DashboardCommand::Feed {
            event,
            feed: token.clone(),
        };

        tokio::select! {
            _ = token.cancelled() => break,
            sent = commands.send(command) => {
                if sent.is_err() {
                    log::debug!("Dashboard gone, stopping feed {}", name);
                    break;
                }
            }
        }
    }
    log::debug!("Feed {} stopped", name);
}

/// `gen_bool` panics outside `[0, 1]`; NaN never fires.
fn sanitize_probability(name: &str, probability: f64) -> f64 {
    if probability.is_nan() {
        log::warn!("Feed {} probability is NaN, disabling it", name);
        return 0.0;
    }
    probability.clamp(0.0, 1.0)
}
