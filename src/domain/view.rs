use super::Transaction;

/// The active filter applied to the displayed list.
///
/// Both constraints are optional and combine with AND. Empty strings count as
/// "no constraint".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewFilter {
    /// `yyyy-mm` prefix matched against the ISO date string
    pub month: Option<String>,
    /// Case-insensitive substring matched against note or category
    pub search: Option<String>,
}

impl ViewFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_month(mut self, month: impl Into<String>) -> Self {
        self.month = Some(month.into());
        self
    }

    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }

    pub fn is_active(&self) -> bool {
        self.month_prefix().is_some() || self.needle().is_some()
    }

    fn month_prefix(&self) -> Option<&str> {
        self.month.as_deref().filter(|m| !m.is_empty())
    }

    fn needle(&self) -> Option<String> {
        self.search
            .as_deref()
            .filter(|s| !s.is_empty())
            .map(str::to_lowercase)
    }

    /// Returns true if the transaction passes both constraints.
    pub fn matches(&self, transaction: &Transaction) -> bool {
        let needle = self.needle();
        self.matches_month(transaction) && self.matches_search(transaction, needle.as_deref())
    }

    fn matches_month(&self, transaction: &Transaction) -> bool {
        match self.month_prefix() {
            // Lexical prefix on the date string, not a calendar comparison
            Some(prefix) => transaction.date_string().starts_with(prefix),
            None => true,
        }
    }

    fn matches_search(&self, transaction: &Transaction, needle: Option<&str>) -> bool {
        let Some(needle) = needle else {
            return true;
        };
        let in_note = transaction
            .note
            .as_deref()
            .is_some_and(|note| note.to_lowercase().contains(needle));
        in_note || transaction.category.to_lowercase().contains(needle)
    }
}

/// Apply the filter and sort the result newest first.
///
/// Records sharing a date keep their ledger order.
pub fn filter_and_sort(transactions: &[Transaction], filter: &ViewFilter) -> Vec<Transaction> {
    let needle = filter.needle();
    let mut list: Vec<Transaction> = transactions
        .iter()
        .filter(|t| filter.matches_month(t) && filter.matches_search(t, needle.as_deref()))
        .cloned()
        .collect();
    list.sort_by(|a, b| b.date.cmp(&a.date));
    list
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn sample() -> Vec<Transaction> {
        vec![
            Transaction::income(100000, "Salary", date("2024-03-01")).with_id("1"),
            Transaction::expense(2500, "Food", date("2024-03-15"))
                .with_note("Pizza night")
                .with_id("2"),
            Transaction::expense(1200, "Transport", date("2024-02-28")).with_id("3"),
            Transaction::expense(800, "Coffee", date("2024-04-02"))
                .with_note("with Sam")
                .with_id("4"),
            Transaction::expense(3000, "Groceries", date("2024-03-15")).with_id("5"),
        ]
    }

    fn ids(list: &[Transaction]) -> Vec<&str> {
        list.iter().map(|t| t.id.as_str()).collect()
    }

    fn assert_newest_first(list: &[Transaction]) {
        for pair in list.windows(2) {
            assert!(pair[0].date >= pair[1].date, "list is not sorted newest first");
        }
    }

    #[test]
    fn test_no_filter_sorts_everything() {
        let list = filter_and_sort(&sample(), &ViewFilter::new());

        assert_eq!(list.len(), 5);
        assert_newest_first(&list);
        // Ties keep ledger order
        assert_eq!(ids(&list), vec!["4", "2", "5", "1", "3"]);
    }

    #[test]
    fn test_month_filter_is_prefix_match() {
        let list = filter_and_sort(&sample(), &ViewFilter::new().with_month("2024-03"));

        assert_eq!(ids(&list), vec!["2", "5", "1"]);
        assert!(list.iter().all(|t| t.date_string().starts_with("2024-03")));
        assert_newest_first(&list);
    }

    #[test]
    fn test_month_filter_partial_prefix() {
        // Not calendar-aware: a bare year is a valid prefix too
        let list = filter_and_sort(&sample(), &ViewFilter::new().with_month("2024"));
        assert_eq!(list.len(), 5);

        let list = filter_and_sort(&sample(), &ViewFilter::new().with_month("2023-12"));
        assert!(list.is_empty());
    }

    #[test]
    fn test_search_matches_note_or_category_case_insensitively() {
        let by_note = filter_and_sort(&sample(), &ViewFilter::new().with_search("PIZZA"));
        assert_eq!(ids(&by_note), vec!["2"]);

        let by_category = filter_and_sort(&sample(), &ViewFilter::new().with_search("trans"));
        assert_eq!(ids(&by_category), vec!["3"]);

        // "sa" hits the Salary category and the "with Sam" note
        let both = filter_and_sort(&sample(), &ViewFilter::new().with_search("sa"));
        assert_eq!(ids(&both), vec!["4", "1"]);
    }

    #[test]
    fn test_filters_compose_with_and() {
        let filter = ViewFilter::new().with_month("2024-03").with_search("o");
        let list = filter_and_sort(&sample(), &filter);

        // Food (2024-03) and Groceries (2024-03); Coffee matches "o" but is April
        assert_eq!(ids(&list), vec!["2", "5"]);
    }

    #[test]
    fn test_empty_strings_mean_no_filter() {
        let filter = ViewFilter::new().with_month("").with_search("");
        assert!(!filter.is_active());
        assert_eq!(filter_and_sort(&sample(), &filter).len(), 5);
    }

    #[test]
    fn test_empty_ledger() {
        assert!(filter_and_sort(&[], &ViewFilter::new().with_month("2024-03")).is_empty());
    }

    #[test]
    fn test_matches_single_transaction() {
        let txn = &sample()[1];
        assert!(ViewFilter::new().with_month("2024-03").with_search("night").matches(txn));
        assert!(!ViewFilter::new().with_month("2024-04").matches(txn));
    }
}
