//! Administrative division identity.

/// Composite identity of an administrative division row.
///
/// Two rows are the same division when region, département, chef-lieu,
/// sous-préfecture and commune match after trimming and lower-casing.
/// [`DivisionKey::stored`] is what the database compares.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DivisionKey {
    pub region: String,
    pub departement: String,
    pub chef_lieu: String,
    pub sous_prefecture: String,
    pub commune: String,
}

impl DivisionKey {
    pub fn new(
        region: &str,
        departement: &str,
        chef_lieu: &str,
        sous_prefecture: &str,
        commune: &str,
    ) -> Self {
        Self {
            region: normalize_part(region),
            departement: normalize_part(departement),
            chef_lieu: normalize_part(chef_lieu),
            sous_prefecture: normalize_part(sous_prefecture),
            commune: normalize_part(commune),
        }
    }

    /// Single-column form of the key, stored under a unique index.
    pub fn stored(&self) -> String {
        [
            self.region.as_str(),
            self.departement.as_str(),
            self.chef_lieu.as_str(),
            self.sous_prefecture.as_str(),
            self.commune.as_str(),
        ]
        .join(KEY_SEPARATOR)
    }
}

// ASCII unit separator, absent from place names.
const KEY_SEPARATOR: &str = "\u{1f}";

fn normalize_part(value: &str) -> String {
    value.trim().to_lowercase()
}
