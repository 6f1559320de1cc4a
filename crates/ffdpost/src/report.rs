//! Run report: what a pipeline run wrote where.

use std::path::PathBuf;

/// Files produced by one pipeline run.
#[derive(Debug, Clone, Default)]
pub struct PipelineReport {
    /// Screenshot files, in save order.
    pub images: Vec<PathBuf>,
    /// Probe tables, in extraction order.
    pub tables: Vec<PathBuf>,
}

impl PipelineReport {
    /// One-line human summary for logs.
    pub fn summary(&self) -> String {
        format!(
            "wrote {} image(s), {} table(s)",
            self.images.len(),
            self.tables.len()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary() {
        let mut report = PipelineReport::default();
        report.images.push(PathBuf::from("T.png"));
        assert_eq!(report.summary(), "wrote 1 image(s), 0 table(s)");
    }
}
