use std::collections::HashMap;
use std::sync::Arc;

use serde::Serialize;
use tokio::task::JoinSet;
use taskfinder_protocol::{AnalysisMatch, Cluster, DatabaseInstance, InferenceResult, Task};

use crate::cluster_inference::ClusterNameInferencer;
use crate::config::SearchConfig;
use crate::environment::EnvironmentScorer;
use crate::error::{Result, SearchError};
use crate::naming::NamingScorer;
use crate::ranking::classify_and_sort;
use crate::source::{AnalysisSource, Inventory, NoAnalysis};

/// Which heuristic a fan-out phase scores with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Primary,
    Fallback,
}

impl Phase {
    const fn label(self) -> &'static str {
        match self {
            Self::Primary => "primary",
            Self::Fallback => "fallback",
        }
    }

    fn score(
        self,
        tasks: &[Task],
        cluster: &Cluster,
        database: &DatabaseInstance,
        analysis: &[AnalysisMatch],
    ) -> Vec<InferenceResult> {
        match self {
            Self::Primary => {
                EnvironmentScorer::score_against_instance(tasks, cluster, database, analysis)
            }
            Self::Fallback => NamingScorer::score_by_naming(tasks, cluster, database),
        }
    }
}

/// Ranked results plus a record of which clusters each phase visited.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SearchOutcome {
    pub results: Vec<InferenceResult>,
    pub primary_clusters: Vec<String>,
    pub fallback_clusters: Vec<String>,
    /// Clusters whose task listing failed; they contributed nothing.
    pub degraded_clusters: Vec<String>,
}

impl SearchOutcome {
    pub fn fallback_ran(&self) -> bool {
        !self.fallback_clusters.is_empty()
    }
}

#[derive(Default)]
struct PhaseOutput {
    results: Vec<InferenceResult>,
    visited: Vec<String>,
    degraded: Vec<String>,
}

/// Staged search for the tasks most likely to reach a database.
///
/// The flow is: load analysis hints, infer candidate clusters, fan out over
/// the top clusters with the environment heuristic, fan out over the next
/// clusters with the naming heuristic if that came back short, then rank.
/// Only a failed cluster listing aborts the search.
pub struct TaskFinder {
    inventory: Arc<dyn Inventory>,
    analysis: Arc<dyn AnalysisSource>,
    config: SearchConfig,
}

impl TaskFinder {
    pub fn new(inventory: Arc<dyn Inventory>) -> Self {
        Self {
            inventory,
            analysis: Arc::new(NoAnalysis),
            config: SearchConfig::default(),
        }
    }

    #[must_use]
    pub fn with_analysis(mut self, analysis: Arc<dyn AnalysisSource>) -> Self {
        self.analysis = analysis;
        self
    }

    pub fn with_config(mut self, config: SearchConfig) -> Result<Self> {
        config.validate()?;
        self.config = config;
        Ok(self)
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Candidate clusters for `database`, best first.
    pub async fn infer_clusters(&self, database: &DatabaseInstance) -> Result<Vec<Cluster>> {
        let clusters = self.list_clusters().await?;
        let lookup: HashMap<&str, &Cluster> =
            clusters.iter().map(|c| (c.name.as_str(), c)).collect();

        Ok(
            ClusterNameInferencer::infer(&database.identifier, &clusters)
                .iter()
                .filter_map(|name| lookup.get(name.as_str()).map(|c| (*c).clone()))
                .collect(),
        )
    }

    /// Ranked (cluster, task) candidates for `database`.
    pub async fn find(&self, database: &DatabaseInstance) -> Result<Vec<InferenceResult>> {
        Ok(self.search(database).await?.results)
    }

    pub async fn search(&self, database: &DatabaseInstance) -> Result<SearchOutcome> {
        let analysis = Arc::new(self.load_analysis().await);
        let candidates = self.infer_clusters(database).await?;

        log::debug!(
            "Search for '{}': {} candidate clusters, {} analysis hints",
            database.identifier,
            candidates.len(),
            analysis.len()
        );

        let primary: Vec<Cluster> = candidates
            .iter()
            .take(self.config.primary_width)
            .cloned()
            .collect();
        let mut pool = self
            .fan_out(primary, Phase::Primary, database, &analysis)
            .await;

        let mut fallback = PhaseOutput::default();
        if pool.results.len() < self.config.min_primary_results {
            let next: Vec<Cluster> = candidates
                .iter()
                .skip(self.config.primary_width)
                .take(self.config.fallback_width)
                .cloned()
                .collect();
            fallback = self
                .fan_out(next, Phase::Fallback, database, &analysis)
                .await;
        } else {
            log::debug!(
                "Primary phase yielded {} results; skipping fallback",
                pool.results.len()
            );
        }

        pool.results.append(&mut fallback.results);
        pool.degraded.append(&mut fallback.degraded);

        let results = classify_and_sort(pool.results);
        log::info!(
            "Found {} candidates for '{}' ({} live)",
            results.len(),
            database.identifier,
            results.iter().filter(|r| r.is_live()).count()
        );

        Ok(SearchOutcome {
            results,
            primary_clusters: pool.visited,
            fallback_clusters: fallback.visited,
            degraded_clusters: pool.degraded,
        })
    }

    async fn list_clusters(&self) -> Result<Vec<Cluster>> {
        self.inventory.list_clusters().await.map_err(|err| match err {
            SearchError::ClusterListing(_) => err,
            other => SearchError::cluster_listing(other.to_string()),
        })
    }

    async fn load_analysis(&self) -> Vec<AnalysisMatch> {
        match self.analysis.load_analysis_matches().await {
            Ok(matches) => matches,
            Err(err) => {
                log::warn!("Ignoring analysis hints: {err}");
                Vec::new()
            }
        }
    }

    /// Lists and scores every cluster concurrently, then merges in candidate
    /// order so the pool does not depend on completion order. The branches
    /// live in a `JoinSet`, so dropping the search aborts them.
    async fn fan_out(
        &self,
        clusters: Vec<Cluster>,
        phase: Phase,
        database: &DatabaseInstance,
        analysis: &Arc<Vec<AnalysisMatch>>,
    ) -> PhaseOutput {
        let mut output = PhaseOutput::default();
        if clusters.is_empty() {
            return output;
        }

        let names: Vec<String> = clusters.iter().map(|c| c.name.clone()).collect();
        let mut join = JoinSet::new();
        for (idx, cluster) in clusters.into_iter().enumerate() {
            let inventory = Arc::clone(&self.inventory);
            let analysis = Arc::clone(analysis);
            let database = database.clone();
            join.spawn(async move {
                let scored = inventory
                    .list_tasks_with_capability(&cluster)
                    .await
                    .map(|tasks| {
                        if tasks.is_empty() {
                            log::debug!("No capable tasks in {}", cluster.name);
                        }
                        phase.score(&tasks, &cluster, &database, &analysis)
                    });
                (idx, scored)
            });
        }

        let mut slots: Vec<Option<Result<Vec<InferenceResult>>>> =
            names.iter().map(|_| None).collect();
        while let Some(joined) = join.join_next().await {
            match joined {
                Ok((idx, scored)) => {
                    if let Some(slot) = slots.get_mut(idx) {
                        *slot = Some(scored);
                    }
                }
                Err(err) => log::warn!("{} phase search task failed: {err}", phase.label()),
            }
        }

        for (name, slot) in names.into_iter().zip(slots) {
            match slot {
                Some(Ok(mut results)) => {
                    log::debug!(
                        "{} phase: {} results from {}",
                        phase.label(),
                        results.len(),
                        name
                    );
                    output.results.append(&mut results);
                }
                Some(Err(err)) => {
                    log::warn!("Skipping cluster {name}: {err}");
                    output.degraded.push(name.clone());
                }
                None => {
                    log::warn!("Search task for cluster {name} did not finish");
                    output.degraded.push(name.clone());
                }
            }
            output.visited.push(name);
        }

        output
    }
}
