use citation_graph::layout::{LayoutReport, LayoutStatus};

use super::super::ViewModel;

impl ViewModel {
    pub(in crate::app) fn layout_status_text(report: &LayoutReport) -> String {
        match report.status {
            LayoutStatus::Positioned => {
                let mut text = format!(
                    "{} nodes | {} springs | {} passes",
                    report.nodes, report.springs, report.iterations
                );
                if report.skipped_edges > 0 {
                    text.push_str(&format!(" | {} unresolved", report.skipped_edges));
                }
                text
            }
            LayoutStatus::NotReady => "waiting for canvas".to_owned(),
            LayoutStatus::Empty => "no claims".to_owned(),
        }
    }

    pub(in crate::app) fn archive_summary_text(&self) -> String {
        format!(
            "{} claims | {} states | {} domains",
            self.corpus.len(),
            self.summaries.len(),
            self.corpus.domain_count()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report(status: LayoutStatus, skipped_edges: usize) -> LayoutReport {
        LayoutReport {
            status,
            nodes: 6,
            springs: 9,
            skipped_edges,
            iterations: 300,
        }
    }

    #[test]
    fn positioned_report_lists_counts() {
        let text = ViewModel::layout_status_text(&report(LayoutStatus::Positioned, 0));
        assert_eq!(text, "6 nodes | 9 springs | 300 passes");
    }

    #[test]
    fn unresolved_edges_are_mentioned_only_when_present() {
        let text = ViewModel::layout_status_text(&report(LayoutStatus::Positioned, 2));
        assert!(text.ends_with("| 2 unresolved"));
    }

    #[test]
    fn not_ready_report_has_placeholder_text() {
        let text = ViewModel::layout_status_text(&report(LayoutStatus::NotReady, 0));
        assert_eq!(text, "waiting for canvas");
    }
}
