//! crates/baeumteo_core/src/filter.rs
//!
//! Order-preserving predicate filters over in-memory content collections.
//! Every filter accepts owned items or references, so results of one filter
//! can be fed straight into the next.

use crate::domain::{Cohort, ContentItem};
use std::borrow::Borrow;

/// Sentinel category key that matches every item.
pub const ALL_CATEGORIES: &str = "all";

/// Keeps the items whose applicability set contains `cohort`.
pub fn filter_by_cohort<I, T>(items: I, cohort: Cohort) -> Vec<T>
where
    I: IntoIterator<Item = T>,
    T: Borrow<ContentItem>,
{
    items
        .into_iter()
        .filter(|item| item.borrow().cohorts.contains(cohort))
        .collect()
}

/// Like [`filter_by_cohort`], with `None` meaning "all cohorts".
pub fn filter_by_optional_cohort<I, T>(items: I, cohort: Option<Cohort>) -> Vec<T>
where
    I: IntoIterator<Item = T>,
    T: Borrow<ContentItem>,
{
    match cohort {
        Some(cohort) => filter_by_cohort(items, cohort),
        None => items.into_iter().collect(),
    }
}

/// Case-insensitive substring match against title or summary.
pub fn matches_search(item: &ContentItem, query: &str) -> bool {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return true;
    }
    item.title.to_lowercase().contains(&needle) || item.summary.to_lowercase().contains(&needle)
}

pub fn filter_by_search<I, T>(items: I, query: &str) -> Vec<T>
where
    I: IntoIterator<Item = T>,
    T: Borrow<ContentItem>,
{
    items
        .into_iter()
        .filter(|item| matches_search(item.borrow(), query))
        .collect()
}

/// Maps the short category keys a client sends to the labels stored on items.
#[derive(Debug, Clone, Copy)]
pub struct CategoryTaxonomy {
    entries: &'static [(&'static str, &'static str)],
}

impl CategoryTaxonomy {
    pub const fn new(entries: &'static [(&'static str, &'static str)]) -> Self {
        Self { entries }
    }

    /// Resolves a key to its label. Unknown keys are treated as labels already.
    pub fn label_for<'a>(&self, key: &'a str) -> &'a str {
        self.entries
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(key))
            .map(|(_, label)| *label)
            .unwrap_or(key)
    }

    pub fn matches(&self, item: &ContentItem, key: &str) -> bool {
        let key = key.trim();
        if key.is_empty() || key.eq_ignore_ascii_case(ALL_CATEGORIES) {
            return true;
        }
        let label = self.label_for(key);
        item.category == label || item.category.starts_with(label)
    }
}

/// Topic taxonomy of the insight feed.
pub const INSIGHT_TOPICS: CategoryTaxonomy = CategoryTaxonomy::new(&[
    ("ai-tech", "AI 기술"),
    ("practical", "실용 가이드"),
    ("security", "보안"),
    ("productivity", "생산성"),
    ("finance", "재무"),
    ("health", "건강"),
]);

/// Taxonomy shared by learning cards and courses.
pub const LEARNING_CATEGORIES: CategoryTaxonomy = CategoryTaxonomy::new(&[
    ("ai-work", "AI 실무"),
    ("security", "보안"),
    ("life", "생활 팁"),
    ("startup", "창업"),
    ("health", "건강"),
]);

pub fn filter_by_category<I, T>(items: I, key: &str, taxonomy: &CategoryTaxonomy) -> Vec<T>
where
    I: IntoIterator<Item = T>,
    T: Borrow<ContentItem>,
{
    items
        .into_iter()
        .filter(|item| taxonomy.matches(item.borrow(), key))
        .collect()
}

/// The combined filter a content view applies: cohort, then category, then search.
#[derive(Debug, Clone, Default)]
pub struct ContentQuery {
    pub cohort: Option<Cohort>,
    pub category: Option<String>,
    pub search: Option<String>,
}

impl ContentQuery {
    pub fn apply<'a>(
        &self,
        items: &'a [ContentItem],
        taxonomy: &CategoryTaxonomy,
    ) -> Vec<&'a ContentItem> {
        let by_cohort = filter_by_optional_cohort(items, self.cohort);
        let by_category = match self.category.as_deref() {
            Some(key) => filter_by_category(by_cohort, key, taxonomy),
            None => by_cohort,
        };
        match self.search.as_deref() {
            Some(query) => filter_by_search(by_category, query),
            None => by_category,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{CohortSet, ContentDetails, ContentKind};

    fn insight(id: &str, title: &str, summary: &str, category: &str, cohorts: &[Cohort]) -> ContentItem {
        ContentItem {
            id: id.to_string(),
            kind: ContentKind::Insight,
            title: title.to_string(),
            summary: summary.to_string(),
            category: category.to_string(),
            tags: Vec::new(),
            cohorts: CohortSet::of(cohorts),
            details: ContentDetails::Insight {
                topic: String::new(),
                read_time: "3분".to_string(),
                published: "2시간 전".to_string(),
                source: "OpenAI Blog".to_string(),
                url: "https://perplexity.ai".to_string(),
            },
        }
    }

    fn sample() -> Vec<ContentItem> {
        vec![
            insight(
                "1",
                "ChatGPT-4의 새로운 음성 대화 기능",
                "OpenAI가 발표한 GPT-4의 음성 인터페이스는 자연스러운 대화가 가능합니다.",
                "AI 기술",
                &[Cohort::Forties, Cohort::Fifties],
            ),
            insight(
                "2",
                "중장년층을 위한 AI 활용 가이드",
                "50대 이상을 위한 실용적인 도구 활용법.",
                "실용 가이드",
                &[Cohort::Fifties, Cohort::Sixties, Cohort::Seventies],
            ),
            insight(
                "3",
                "최신 사기 수법과 예방법",
                "딥페이크 보이스피싱이 증가하고 있습니다.",
                "보안",
                &[Cohort::Sixties, Cohort::Seventies],
            ),
            insight("4", "노션으로 업무 효율 높이기", "문서 자동화와 회의록 요약.", "생산성", &[]),
        ]
    }

    fn ids(items: &[&ContentItem]) -> Vec<String> {
        items.iter().map(|i| i.id.clone()).collect()
    }

    #[test]
    fn cohort_filter_keeps_exactly_applicable_items_in_order() {
        let items = sample();
        for cohort in Cohort::ALL {
            let kept: Vec<&ContentItem> = filter_by_cohort(&items, cohort);
            let expected: Vec<&ContentItem> =
                items.iter().filter(|i| i.cohorts.contains(cohort)).collect();
            assert_eq!(kept, expected);
        }
        assert_eq!(ids(&filter_by_cohort(&items, Cohort::Sixties)), vec!["2", "3"]);
    }

    #[test]
    fn cohort_filter_is_idempotent() {
        let once: Vec<ContentItem> = filter_by_cohort(sample(), Cohort::Fifties);
        let twice: Vec<ContentItem> = filter_by_cohort(once.clone(), Cohort::Fifties);
        assert_eq!(once, twice);
    }

    #[test]
    fn cohort_filter_may_return_nothing() {
        let items = vec![sample().remove(3)];
        assert!(filter_by_cohort(&items, Cohort::Forties).is_empty());
    }

    #[test]
    fn optional_cohort_none_keeps_everything() {
        let items = sample();
        assert_eq!(filter_by_optional_cohort(&items, None).len(), items.len());
    }

    #[test]
    fn search_is_case_insensitive_over_title_and_summary() {
        let items = sample();
        // "ai" hits the first insight through "OpenAI" in its summary.
        let hits: Vec<&ContentItem> = filter_by_search(&items, "ai");
        assert_eq!(ids(&hits), vec!["1", "2"]);
        assert_eq!(ids(&filter_by_search(&items, "GPT")), vec!["1"]);
        assert_eq!(ids(&filter_by_search(&items, "보이스피싱")), vec!["3"]);
    }

    #[test]
    fn empty_search_matches_everything() {
        let items = sample();
        assert_eq!(filter_by_search(&items, "").len(), 4);
        assert_eq!(filter_by_search(&items, "   ").len(), 4);
    }

    #[test]
    fn category_all_sentinel_and_taxonomy_keys() {
        let items = sample();
        assert_eq!(filter_by_category(&items, "all", &INSIGHT_TOPICS).len(), 4);
        assert_eq!(ids(&filter_by_category(&items, "ai-tech", &INSIGHT_TOPICS)), vec!["1"]);
        assert_eq!(ids(&filter_by_category(&items, "security", &INSIGHT_TOPICS)), vec!["3"]);
    }

    #[test]
    fn category_unknown_key_is_compared_as_label_prefix() {
        let items = sample();
        assert_eq!(ids(&filter_by_category(&items, "AI", &INSIGHT_TOPICS)), vec!["1"]);
        assert!(filter_by_category(&items, "여행", &INSIGHT_TOPICS).is_empty());
    }

    #[test]
    fn query_composes_cohort_category_search() {
        let items = sample();
        let query = ContentQuery {
            cohort: Some(Cohort::Fifties),
            category: Some("practical".to_string()),
            search: Some("AI".to_string()),
        };
        assert_eq!(ids(&query.apply(&items, &INSIGHT_TOPICS)), vec!["2"]);

        let loose = ContentQuery {
            cohort: Some(Cohort::Fifties),
            ..ContentQuery::default()
        };
        assert_eq!(ids(&loose.apply(&items, &INSIGHT_TOPICS)), vec!["1", "2"]);
    }
}
