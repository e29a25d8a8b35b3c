use crate::config::schema::RowClustering;
use crate::model::Token;

/// Tokens judged to sit on the same visual line.
#[derive(Debug, Clone, PartialEq)]
pub struct RowCluster {
    pub mean_top: f64,
    /// Discovery order; the grid assembler re-sorts left to right.
    pub tokens: Vec<Token>,
    top_sum: f64,
}

impl RowCluster {
    fn open(token: Token) -> Self {
        Self {
            mean_top: token.top,
            top_sum: token.top,
            tokens: vec![token],
        }
    }

    fn push(&mut self, token: Token) {
        self.top_sum += token.top;
        self.tokens.push(token);
        self.mean_top = self.top_sum / self.tokens.len() as f64;
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

/// Group tokens into rows using the configured strategy.
pub fn cluster(tokens: &[Token], tolerance: f64, strategy: RowClustering) -> Vec<RowCluster> {
    match strategy {
        RowClustering::RunningMean => cluster_running_mean(tokens, tolerance),
        RowClustering::GapCut => cluster_gap_cut(tokens, tolerance),
    }
}

/// Running-mean clustering.
///
/// Tokens are visited by ascending `top`. Each joins the first cluster (in
/// discovery order) whose current mean `top` is within `tolerance`, which then
/// recomputes its mean. Membership therefore depends on visiting order: a
/// cluster's mean drifts as it grows. The scan is O(tokens x clusters).
pub fn cluster_running_mean(tokens: &[Token], tolerance: f64) -> Vec<RowCluster> {
    let mut clusters: Vec<RowCluster> = Vec::new();

    for token in sorted_by_top(tokens) {
        match clusters
            .iter_mut()
            .find(|c| (c.mean_top - token.top).abs() <= tolerance)
        {
            Some(c) => c.push(token),
            None => clusters.push(RowCluster::open(token)),
        }
    }

    clusters.sort_by(|a, b| a.mean_top.total_cmp(&b.mean_top));
    clusters
}

/// Single-linkage clustering on sorted `top` with a fixed gap cut.
///
/// Deterministic for any input order: a new row starts whenever the next
/// `top` is more than `tolerance` below the previous one.
pub fn cluster_gap_cut(tokens: &[Token], tolerance: f64) -> Vec<RowCluster> {
    let mut clusters: Vec<RowCluster> = Vec::new();
    let mut last_top: Option<f64> = None;

    for token in sorted_by_top(tokens) {
        let top = token.top;
        match (clusters.last_mut(), last_top) {
            (Some(c), Some(prev)) if top - prev <= tolerance => c.push(token),
            _ => clusters.push(RowCluster::open(token)),
        }
        last_top = Some(top);
    }

    clusters
}

fn sorted_by_top(tokens: &[Token]) -> Vec<Token> {
    let mut sorted: Vec<Token> = tokens.iter().filter(|t| !t.is_degenerate()).cloned().collect();
    sorted.sort_by(|a, b| a.top.total_cmp(&b.top));
    sorted
}
