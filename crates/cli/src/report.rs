use taskfinder_search::{format_result, ClusterScore, SearchOutcome};

pub fn render_outcome(database: &str, outcome: &SearchOutcome, limit: Option<usize>) -> String {
    if outcome.results.is_empty() {
        return format!("No candidates found for {database}");
    }

    let shown = limit.unwrap_or(outcome.results.len());
    let mut out = format!("Candidates for {database}:\n");
    for (rank, result) in outcome.results.iter().take(shown).enumerate() {
        out.push_str(&format!("{:>3}. {}\n", rank + 1, format_result(result)));
        out.push_str(&format!("     {}\n", result.reason));
    }
    if outcome.results.len() > shown {
        out.push_str(&format!(
            "     ... {} more\n",
            outcome.results.len() - shown
        ));
    }
    if !outcome.degraded_clusters.is_empty() {
        out.push_str(&format!(
            "Skipped clusters: {}\n",
            outcome.degraded_clusters.join(", ")
        ));
    }
    out.trim_end().to_string()
}

pub fn render_clusters(database: &str, ranked: &[ClusterScore]) -> String {
    if ranked.is_empty() {
        return format!("No clusters resemble {database}");
    }

    let mut out = String::new();
    for (rank, cluster) in ranked.iter().enumerate() {
        out.push_str(&format!(
            "{:>3}. {} (score {})\n",
            rank + 1,
            cluster.name,
            cluster.score
        ));
    }
    out.trim_end().to_string()
}
