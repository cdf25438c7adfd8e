/// Country names in the order the classifier was trained on.
pub const COUNTRIES: [&str; 5] = ["Australia", "Canada", "Germany", "UK", "US"];

/// Positional mapping from class index to display label.
#[derive(Debug, Clone)]
pub struct LabelTable {
    labels: Vec<String>,
}

impl Default for LabelTable {
    fn default() -> Self {
        Self::new(COUNTRIES)
    }
}

impl LabelTable {
    pub fn new<I, S>(labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        LabelTable {
            labels: labels.into_iter().map(Into::into).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Returns `None` for any index outside `[0, len)`.
    pub fn get(&self, index: i64) -> Option<&str> {
        usize::try_from(index)
            .ok()
            .and_then(|i| self.labels.get(i))
            .map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_table_is_countries() {
        let table = LabelTable::default();
        assert_eq!(table.len(), 5);
        assert_eq!(table.get(0), Some("Australia"));
        assert_eq!(table.get(2), Some("Germany"));
        assert_eq!(table.get(4), Some("US"));
    }

    #[test]
    fn test_out_of_range_indices() {
        let table = LabelTable::default();
        assert_eq!(table.get(5), None);
        assert_eq!(table.get(-1), None);
        assert_eq!(table.get(i64::MAX), None);
    }
}
