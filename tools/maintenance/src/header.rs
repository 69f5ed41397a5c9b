//! Spreadsheet header matching.
//!
//! Header cells are reduced to a canonical form and matched against a fixed
//! list of candidate labels per target field: exact matches first, across all
//! fields, then substring containment with the longest labels tried first. A
//! column is claimed by one field at most.

use std::collections::HashMap;

use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

/// Strip diacritics, lower-case, turn punctuation into spaces and collapse
/// whitespace. `"Sous-Préfecture "` becomes `"sous prefecture"`.
pub fn normalize_header(raw: &str) -> String {
    let folded: String = raw
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .map(|c| if c.is_alphanumeric() { c } else { ' ' })
        .collect::<String>()
        .to_lowercase();
    folded.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// A target field and the header labels that designate it, already normalized.
pub struct FieldSpec<F> {
    pub field: F,
    pub candidates: &'static [&'static str],
}

/// Column index per matched field.
#[derive(Debug)]
pub struct ColumnMap<F>(HashMap<F, usize>);

impl<F: Copy + Eq + std::hash::Hash> ColumnMap<F> {
    pub fn resolve(headers: &[String], specs: &[FieldSpec<F>]) -> Self {
        let normalized: Vec<String> = headers.iter().map(|h| normalize_header(h)).collect();
        let mut claimed = vec![false; normalized.len()];
        let mut columns = HashMap::new();

        let unclaimed = |claimed: &[bool], idx: usize| !claimed[idx] && !normalized[idx].is_empty();

        for spec in specs {
            let found = spec.candidates.iter().find_map(|candidate| {
                (0..normalized.len())
                    .find(|&idx| unclaimed(&claimed, idx) && normalized[idx] == *candidate)
            });
            if let Some(idx) = found {
                claimed[idx] = true;
                columns.insert(spec.field, idx);
            }
        }

        // Longest label first across every field, so "libelle" wins
        // "Libellé de la ligne" over the shorter "ligne".
        let mut by_length: Vec<(F, &str)> = specs
            .iter()
            .filter(|spec| !columns.contains_key(&spec.field))
            .flat_map(|spec| spec.candidates.iter().map(move |c| (spec.field, *c)))
            .collect();
        by_length.sort_by_key(|(_, candidate)| std::cmp::Reverse(candidate.len()));
        for (field, candidate) in by_length {
            if columns.contains_key(&field) {
                continue;
            }
            let found = (0..normalized.len())
                .find(|&idx| unclaimed(&claimed, idx) && normalized[idx].contains(candidate));
            if let Some(idx) = found {
                claimed[idx] = true;
                columns.insert(field, idx);
            }
        }

        Self(columns)
    }

    pub fn column(&self, field: F) -> Option<usize> {
        self.0.get(&field).copied()
    }

    /// Trimmed cell for `field`, `None` when the column is unmatched or the cell blank.
    pub fn cell<'a>(&self, row: &'a [String], field: F) -> Option<&'a str> {
        let value = row.get(self.column(field)?)?.trim();
        (!value.is_empty()).then_some(value)
    }
}
