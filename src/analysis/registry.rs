use serde::Serialize;

use super::defect::{Category, Defect, DefectId, Finding, Severity};

/// One row of the UI defect list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListingEntry {
    pub id: DefectId,
    pub description: String,
    pub severity: Severity,
    pub category: Category,
}

/// Ordered, deduplicated defects of one analysis run.
///
/// Order is a stable sort on (category rank, primary geometry). The registry
/// is read-only once built and replaced wholesale by the next run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DefectRegistry {
    generation: u32,
    defects: Vec<Defect>,
}

impl DefectRegistry {
    /// Sorts, drops duplicates on the same primary geometry within a
    /// category (first finding wins), and numbers the survivors.
    ///
    /// Ordinals are `u32`. The face limit in `AnalysisConfig` keeps a run far
    /// below that; findings past `u32::MAX` would be dropped, not wrapped.
    #[must_use]
    pub fn build(mut findings: Vec<Finding>, generation: u32) -> Self {
        findings.sort_by_key(Finding::sort_key);
        findings.dedup_by(|later, earlier| later.sort_key() == earlier.sort_key());

        let defects = findings
            .into_iter()
            .enumerate()
            .map_while(|(ordinal, finding)| {
                let ordinal = u32::try_from(ordinal).ok()?;
                Some(Defect::from_finding(DefectId { generation, ordinal }, finding))
            })
            .collect();

        Self {
            generation,
            defects,
        }
    }

    #[must_use]
    pub fn generation(&self) -> u32 {
        self.generation
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.defects.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.defects.is_empty()
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Defect> {
        self.defects.get(index)
    }

    #[must_use]
    pub fn defects(&self) -> &[Defect] {
        &self.defects
    }

    pub fn iter(&self) -> impl Iterator<Item = &Defect> + '_ {
        self.defects.iter()
    }

    /// Position of `id` in this registry; `None` for ids from another run.
    #[must_use]
    pub fn index_of(&self, id: DefectId) -> Option<usize> {
        let index = id.ordinal as usize;
        (id.generation == self.generation && index < self.defects.len()).then_some(index)
    }

    #[must_use]
    pub fn count_category(&self, category: Category) -> usize {
        self.iter().filter(|d| d.category == category).count()
    }

    #[must_use]
    pub fn count_severity(&self, severity: Severity) -> usize {
        self.iter().filter(|d| d.severity == severity).count()
    }

    #[must_use]
    pub fn listing(&self) -> Vec<ListingEntry> {
        self.iter()
            .map(|d| ListingEntry {
                id: d.id,
                description: d.description.clone(),
                severity: d.severity,
                category: d.category,
            })
            .collect()
    }

    /// Equal defects in equal order, ignoring ids.
    #[must_use]
    pub fn same_content(&self, other: &Self) -> bool {
        self.len() == other.len()
            && self
                .iter()
                .zip(other.iter())
                .all(|(a, b)| a.same_content(b))
    }
}
