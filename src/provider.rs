// Monkey data provider: resolves the active list of monkeys for every
// call. That is the remote endpoint when one is configured and answers
// with usable data, otherwise the embedded seed list. Lookup and random
// selection are derived from that list. The provider is `Send + Sync`;
// share it behind an `Arc` when several tasks need it.

use crate::api::ApiClient;
use crate::config::Config;
use crate::error::{ProviderError, ProviderResult, RemoteError};
use crate::model::Monkey;
use crate::random::{IndexPicker, ThreadRngPicker};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

const DEFAULT_POPULATION: i64 = 100;

const SEED: [(&str, &str, i64); 6] = [
    ("Spider Monkey", "Central & South America", DEFAULT_POPULATION + 50),
    ("Howler Monkey", "Central & South America", DEFAULT_POPULATION + 30),
    ("Capuchin", "Central & South America", DEFAULT_POPULATION + 80),
    ("Baboon", "Africa", DEFAULT_POPULATION + 200),
    ("Golden Lion Tamarin", "Brazil", DEFAULT_POPULATION + 20),
    ("Squirrel Monkey", "Central & South America", DEFAULT_POPULATION + 120),
];

/// The embedded fallback list, in its fixed order.
pub fn seed_monkeys() -> Vec<Monkey> {
    SEED.iter()
        .map(|&(name, location, population)| Monkey::trusted(name, location, population))
        .collect()
}

/// How a single remote attempt ended.
#[derive(Debug)]
pub enum RemoteOutcome {
    Success(Vec<Monkey>),
    Unavailable(RemoteError),
    Cancelled,
}

/// Decide the result of a fetch from the remote outcome. Cancellation is
/// passed through; any other failure yields a copy of `seed`.
pub fn resolve(outcome: RemoteOutcome, seed: &[Monkey]) -> ProviderResult<Vec<Monkey>> {
    match outcome {
        RemoteOutcome::Success(monkeys) => Ok(monkeys),
        RemoteOutcome::Cancelled => Err(ProviderError::Cancelled),
        RemoteOutcome::Unavailable(err) => {
            warn!(error = %err, "remote source unavailable, using seed data");
            Ok(seed.to_vec())
        }
    }
}

/// Result of a successful random pick. `count` is the selection counter
/// value right after this pick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pick {
    pub monkey: Monkey,
    pub count: u64,
}

pub struct MonkeyProvider {
    api: Option<ApiClient>,
    seed: Arc<[Monkey]>,
    picker: Box<dyn IndexPicker>,
    selections: AtomicU64,
}

impl MonkeyProvider {
    /// Provider for `config`, using the built-in seed list and thread-local
    /// randomness.
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        let api = match &config.endpoint {
            Some(endpoint) => {
                info!(%endpoint, "remote monkey source enabled");
                Some(ApiClient::new(endpoint.clone(), config.timeout)?)
            }
            None => None,
        };
        Ok(Self::from_parts(api))
    }

    /// Provider that only ever serves the seed list.
    pub fn offline() -> Self {
        Self::from_parts(None)
    }

    fn from_parts(api: Option<ApiClient>) -> Self {
        MonkeyProvider {
            api,
            seed: seed_monkeys().into(),
            picker: Box::new(ThreadRngPicker),
            selections: AtomicU64::new(0),
        }
    }

    /// Replace the fallback list.
    pub fn with_seed(mut self, seed: Vec<Monkey>) -> Self {
        self.seed = seed.into();
        self
    }

    /// Replace the source of random indices.
    pub fn with_picker(mut self, picker: impl IndexPicker + 'static) -> Self {
        self.picker = Box::new(picker);
        self
    }

    /// All monkeys from the remote source, or a fresh copy of the seed list.
    ///
    /// Only cancellation is reported as an error; every remote failure
    /// falls back to the seed list.
    pub async fn fetch_all(&self, cancel: &CancellationToken) -> ProviderResult<Vec<Monkey>> {
        let Some(api) = &self.api else {
            if cancel.is_cancelled() {
                return Err(ProviderError::Cancelled);
            }
            return Ok(self.seed.to_vec());
        };

        let outcome = tokio::select! {
            biased;
            _ = cancel.cancelled() => RemoteOutcome::Cancelled,
            res = api.fetch_monkeys() => match res {
                Ok(monkeys) => RemoteOutcome::Success(monkeys),
                Err(err) => RemoteOutcome::Unavailable(err),
            },
        };

        let fell_back = matches!(outcome, RemoteOutcome::Unavailable(_));
        let monkeys = resolve(outcome, &self.seed)?;
        // A token cancelled after the select resolved with a soft failure
        // must not be answered with seed data.
        if fell_back && cancel.is_cancelled() {
            return Err(ProviderError::Cancelled);
        }
        Ok(monkeys)
    }

    /// First monkey whose name matches `name` ignoring case and
    /// surrounding whitespace. Blank input returns `None` without fetching.
    pub async fn find_by_name(
        &self,
        name: &str,
        cancel: &CancellationToken,
    ) -> ProviderResult<Option<Monkey>> {
        let query = name.trim();
        if query.is_empty() {
            return Ok(None);
        }
        let monkeys = self.fetch_all(cancel).await?;
        let found = monkeys.into_iter().find(|m| m.matches_name(query));
        debug!(query, found = found.is_some(), "lookup by name");
        Ok(found)
    }

    /// Pick one monkey uniformly at random and bump the selection counter.
    pub async fn pick_random(&self, cancel: &CancellationToken) -> ProviderResult<Pick> {
        let mut monkeys = self.fetch_all(cancel).await?;
        if monkeys.is_empty() {
            return Err(ProviderError::EmptyDataset);
        }
        let len = monkeys.len();
        let index = self.picker.pick(len);
        let count = self.selections.fetch_add(1, Ordering::SeqCst) + 1;
        // Clamp in case a picker ignores its range.
        let monkey = monkeys.swap_remove(index.min(len - 1));
        debug!(name = monkey.name(), count, "random pick");
        Ok(Pick { monkey, count })
    }

    /// Number of successful random picks so far.
    pub fn selection_count(&self) -> u64 {
        self.selections.load(Ordering::SeqCst)
    }
}
