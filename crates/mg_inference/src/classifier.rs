use lazy_static::lazy_static;
use mg_core::Category;
use regex::Regex;

/// Keyword rules in evaluation order. Earlier rules win, so an article about
/// an AI startup's stock price is `tech`, not `business`.
const RULES: &[(Category, &[&str])] = &[
    (
        Category::Tech,
        &[
            "programming", "software", "coding", "developer", "javascript", "python", "ai",
            "artificial intelligence", "machine learning", "tech", "technology", "startup", "app",
            "website", "digital", "crypto", "blockchain", "computer",
        ],
    ),
    (
        Category::Business,
        &[
            "business", "finance", "money", "investment", "stock", "market", "economy", "company",
            "corporate", "sales", "marketing", "revenue", "profit",
        ],
    ),
    (
        Category::Politics,
        &[
            "politics", "government", "election", "policy", "president", "congress", "vote",
            "democracy", "republican", "democrat", "political",
        ],
    ),
    (
        Category::Sports,
        &[
            "sports", "football", "basketball", "baseball", "soccer", "tennis", "golf", "olympics",
            "athlete", "game", "match", "championship", "team",
        ],
    ),
    (
        Category::Entertainment,
        &[
            "movie", "film", "music", "celebrity", "hollywood", "entertainment", "tv", "show",
            "actor", "actress", "singer", "album", "concert",
        ],
    ),
    (
        Category::Science,
        &[
            "science", "research", "study", "experiment", "scientist", "discovery", "medical",
            "health", "climate", "space", "nasa", "biology", "chemistry", "physics",
        ],
    ),
    (
        Category::Health,
        &[
            "health", "medical", "doctor", "hospital", "medicine", "treatment", "disease",
            "wellness", "fitness", "nutrition", "covid", "pandemic",
        ],
    ),
];

lazy_static! {
    static ref DEFAULT_RULES: Vec<(Regex, Category)> = RULES
        .iter()
        .map(|(category, keywords)| (keyword_pattern(keywords), *category))
        .collect();
}

/// Whole-word alternation over `keywords`. Word boundaries are ASCII-only,
/// so a keyword next to an accented letter still counts as a whole word.
pub fn keyword_pattern(keywords: &[&str]) -> Regex {
    let alternation = keywords.iter().map(|k| regex::escape(k)).collect::<Vec<_>>().join("|");
    Regex::new(&format!(r"(?-u:\b)({})(?-u:\b)", alternation)).unwrap()
}

/// First-match-wins keyword classifier. Text matching no rule is `general`.
#[derive(Debug, Clone)]
pub struct CategoryClassifier {
    rules: Vec<(Regex, Category)>,
}

impl Default for CategoryClassifier {
    fn default() -> Self {
        Self {
            rules: DEFAULT_RULES.clone(),
        }
    }
}

impl CategoryClassifier {
    pub fn new(rules: Vec<(Regex, Category)>) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &[(Regex, Category)] {
        &self.rules
    }

    pub fn classify(&self, title: &str, content: &str) -> Category {
        let text = format!("{} {}", title, content).to_lowercase();
        self.rules
            .iter()
            .find(|(pattern, _)| pattern.is_match(&text))
            .map(|(_, category)| *category)
            .unwrap_or(Category::General)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rule_order() {
        let classifier = CategoryClassifier::default();
        let order: Vec<Category> = classifier.rules().iter().map(|(_, c)| *c).collect();
        assert_eq!(
            order,
            vec![
                Category::Tech,
                Category::Business,
                Category::Politics,
                Category::Sports,
                Category::Entertainment,
                Category::Science,
                Category::Health,
            ]
        );
    }

    #[test]
    fn test_classify_each_category() {
        let classifier = CategoryClassifier::default();
        let cases = [
            ("AI Breakthrough", "A new artificial intelligence model", Category::Tech),
            ("Markets rally", "Investors cheered the stock news", Category::Business),
            ("Senate showdown", "Congress prepares for the vote", Category::Politics),
            ("Final whistle", "The championship went to extra time", Category::Sports),
            ("Box office", "The movie opened to record crowds", Category::Entertainment),
            ("Mars mission", "NASA announces a discovery", Category::Science),
            ("Flu season", "The hospital is preparing for winter", Category::Health),
            ("Local bakery", "Bread prices unchanged this week", Category::General),
        ];
        for (title, content, expected) in cases {
            assert_eq!(classifier.classify(title, content), expected, "{}", title);
        }
    }

    #[test]
    fn test_earlier_rule_wins_ties() {
        let classifier = CategoryClassifier::default();
        assert_eq!(classifier.classify("Startup revenue doubles", "profit and software"), Category::Tech);
        // "health" is a science keyword and science is checked first
        assert_eq!(classifier.classify("Public health", "doctors warn"), Category::Science);
    }

    #[test]
    fn test_whole_words_only() {
        let classifier = CategoryClassifier::default();
        // "said" contains "ai", "gamer" contains "game"
        assert_eq!(classifier.classify("He said", "the gamer left"), Category::General);
        assert_eq!(classifier.classify("", ""), Category::General);
    }

    #[test]
    fn test_non_ascii_letters_are_word_boundaries() {
        let classifier = CategoryClassifier::default();
        assert_eq!(classifier.classify("Techübersicht 2024", ""), Category::Tech);
        assert_eq!(classifier.classify("Économie", "börsenmarket"), Category::General);
        assert_eq!(classifier.classify("Größte Fußball", "das finale im football"), Category::Sports);
    }

    #[test]
    fn test_case_insensitive_and_deterministic() {
        let classifier = CategoryClassifier::default();
        let first = classifier.classify("BLOCKCHAIN Weekly", "");
        assert_eq!(first, Category::Tech);
        for _ in 0..10 {
            assert_eq!(classifier.classify("BLOCKCHAIN Weekly", ""), first);
        }
    }

    #[test]
    fn test_custom_rules() {
        let classifier = CategoryClassifier::new(vec![(keyword_pattern(&["goal"]), Category::Sports)]);
        assert_eq!(classifier.classify("What a goal", ""), Category::Sports);
        assert_eq!(classifier.classify("AI", ""), Category::General);
    }
}
