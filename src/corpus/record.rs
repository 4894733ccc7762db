use std::collections::HashSet;
use std::sync::Arc;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Ruling {
    Validated,
    PartiallyValidated,
    Refuted,
}

impl Ruling {
    pub fn label(self) -> &'static str {
        match self {
            Self::Validated => "SURVIVED",
            Self::PartiallyValidated => "REVISE",
            Self::Refuted => "DESTROYED",
        }
    }

    /// Accepts the archive's verdict labels as well as the neutral names.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_uppercase().replace('-', "_").as_str() {
            "SURVIVED" | "VALIDATED" => Some(Self::Validated),
            "REVISE" | "PARTIAL" | "PARTIALLY_VALIDATED" => Some(Self::PartiallyValidated),
            "DESTROYED" | "REFUTED" => Some(Self::Refuted),
            _ => None,
        }
    }

    pub fn survived(self) -> bool {
        self != Self::Refuted
    }
}

/// One claim of the archive. Immutable once loaded.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Record {
    pub id: String,
    pub domain: String,
    pub cycle: u32,
    pub entity: String,
    pub ruling: Ruling,
    pub position: String,
}

#[derive(Clone, Debug)]
pub struct EntitySummary {
    pub name: String,
    pub domain: String,
    pub record_count: usize,
    pub validated: usize,
    pub partial: usize,
    pub refuted: usize,
    pub latest: Arc<Record>,
}

/// The full, fully resident record collection.
#[derive(Clone, Debug, Default)]
pub struct Corpus {
    records: Vec<Arc<Record>>,
}

impl Corpus {
    pub fn new(records: Vec<Record>) -> Self {
        Self {
            records: records.into_iter().map(Arc::new).collect(),
        }
    }

    pub fn records(&self) -> &[Arc<Record>] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn find(&self, id: &str) -> Option<&Arc<Record>> {
        self.records.iter().find(|record| record.id == id)
    }

    /// Records owned by `entity`, in corpus order.
    pub fn records_for(&self, entity: &str) -> Vec<Arc<Record>> {
        self.records
            .iter()
            .filter(|record| record.entity == entity)
            .cloned()
            .collect()
    }

    /// Entity names in order of first appearance.
    pub fn entities(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        self.records
            .iter()
            .map(|record| record.entity.as_str())
            .filter(|entity| seen.insert(*entity))
            .collect()
    }

    pub fn domain_count(&self) -> usize {
        self.records
            .iter()
            .map(|record| record.domain.as_str())
            .collect::<HashSet<_>>()
            .len()
    }

    pub fn summary(&self, entity: &str) -> Option<EntitySummary> {
        let records = self.records_for(entity);
        let first = records.first()?;

        let mut latest = Arc::clone(first);
        let mut validated = 0usize;
        let mut partial = 0usize;
        let mut refuted = 0usize;
        for record in &records {
            match record.ruling {
                Ruling::Validated => validated += 1,
                Ruling::PartiallyValidated => partial += 1,
                Ruling::Refuted => refuted += 1,
            }
            if record.cycle >= latest.cycle {
                latest = Arc::clone(record);
            }
        }

        Some(EntitySummary {
            name: entity.to_owned(),
            domain: first.domain.clone(),
            record_count: records.len(),
            validated,
            partial,
            refuted,
            latest,
        })
    }

    pub fn summaries(&self) -> Vec<EntitySummary> {
        self.entities()
            .into_iter()
            .filter_map(|entity| self.summary(entity))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: &str, entity: &str, cycle: u32, ruling: Ruling) -> Record {
        Record {
            id: id.to_owned(),
            domain: "Causation".to_owned(),
            cycle,
            entity: entity.to_owned(),
            ruling,
            position: String::new(),
        }
    }

    fn sample() -> Corpus {
        Corpus::new(vec![
            record("#1", "Causation_Alpha", 1, Ruling::Refuted),
            record("#2", "Causation_Beta", 1, Ruling::Refuted),
            record("#3", "Causation_Alpha", 2, Ruling::PartiallyValidated),
            record("#4", "Causation_Alpha", 3, Ruling::Validated),
        ])
    }

    #[test]
    fn ruling_parse_accepts_archive_and_neutral_labels() {
        assert_eq!(Ruling::parse("DESTROYED"), Some(Ruling::Refuted));
        assert_eq!(Ruling::parse("refuted"), Some(Ruling::Refuted));
        assert_eq!(Ruling::parse("REVISE"), Some(Ruling::PartiallyValidated));
        assert_eq!(
            Ruling::parse("partially-validated"),
            Some(Ruling::PartiallyValidated)
        );
        assert_eq!(Ruling::parse(" Survived "), Some(Ruling::Validated));
        assert_eq!(Ruling::parse("pending"), None);
    }

    #[test]
    fn records_for_keeps_corpus_order() {
        let corpus = sample();
        let ids = corpus
            .records_for("Causation_Alpha")
            .iter()
            .map(|record| record.id.clone())
            .collect::<Vec<_>>();
        assert_eq!(ids, ["#1", "#3", "#4"]);
        assert!(corpus.records_for("Nobody").is_empty());
    }

    #[test]
    fn entities_are_listed_once_in_first_appearance_order() {
        assert_eq!(sample().entities(), ["Causation_Alpha", "Causation_Beta"]);
    }

    #[test]
    fn summary_counts_rulings_and_picks_latest_cycle() {
        let summary = sample().summary("Causation_Alpha").expect("entity exists");
        assert_eq!(summary.record_count, 3);
        assert_eq!(summary.validated, 1);
        assert_eq!(summary.partial, 1);
        assert_eq!(summary.refuted, 1);
        assert_eq!(summary.latest.id, "#4");
        assert_eq!(summary.domain, "Causation");
    }

    #[test]
    fn summary_of_unknown_entity_is_none() {
        assert!(sample().summary("Nobody").is_none());
        assert!(Corpus::default().summaries().is_empty());
    }
}
