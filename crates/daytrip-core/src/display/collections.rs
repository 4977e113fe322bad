//! Collection wrapper types for displaying groups of domain objects.

use std::{fmt, ops::Index};

use crate::{models::PlanSummary, taxonomy::Taxonomy};

/// Newtype wrapper for displaying collections of plan summaries.
///
/// Handles empty collections gracefully.
///
/// # Examples
///
/// ```rust
/// use daytrip_core::{display::PlanSummaries, models::PlanSummary};
/// use jiff::civil::{date, time};
///
/// let summary = PlanSummary {
///     id: 1,
///     name: "Old town".to_string(),
///     date: date(2026, 5, 3),
///     start_time: time(10, 0, 0, 0),
///     origin_address: "Korenmarkt, Ghent".to_string(),
///     total_stops: 3,
///     total_distance_m: 2400,
///     total_duration_s: 1800,
/// };
///
/// let output = PlanSummaries(vec![summary]).to_string();
/// assert!(output.contains("Old town"));
/// ```
pub struct PlanSummaries(pub Vec<PlanSummary>);

impl PlanSummaries {
    /// Check if the collection is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Get the number of plan summaries in the collection.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Get a reference to the plan summary at the given index.
    pub fn get(&self, index: usize) -> Option<&PlanSummary> {
        self.0.get(index)
    }

    /// Get an iterator over the plan summaries.
    pub fn iter(&self) -> std::slice::Iter<'_, PlanSummary> {
        self.0.iter()
    }
}

impl Index<usize> for PlanSummaries {
    type Output = PlanSummary;

    fn index(&self, index: usize) -> &Self::Output {
        &self.0[index]
    }
}

impl IntoIterator for PlanSummaries {
    type Item = PlanSummary;
    type IntoIter = std::vec::IntoIter<Self::Item>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a PlanSummaries {
    type Item = &'a PlanSummary;
    type IntoIter = std::slice::Iter<'a, PlanSummary>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl fmt::Display for PlanSummaries {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            writeln!(f, "No plans found.")
        } else {
            for plan in &self.0 {
                write!(f, "{plan}")?;
            }
            Ok(())
        }
    }
}

/// Selectable interests, grouped by main category.
pub struct Categories<'a>(pub &'a Taxonomy);

impl fmt::Display for Categories<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "# Interests")?;
        for main in self.0.main_categories() {
            writeln!(f)?;
            writeln!(f, "## {} (`{}`)", main.label, main.key)?;
            writeln!(f)?;
            for sub in &main.sub_categories {
                writeln!(f, "- `{}` {} ({})", sub.path, sub.label, sub.environment)?;
            }
        }
        Ok(())
    }
}
