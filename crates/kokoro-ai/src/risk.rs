//! Keyword-based crisis risk detection.
//!
//! Matching is plain case-sensitive substring containment: a keyword inside
//! a longer word still counts. There is no tokenization and no model call.

/// Built-in Japanese crisis-indicator phrases.
pub const DEFAULT_RISK_KEYWORDS: &[&str] = &[
    "死にたい",
    "自殺",
    "消えたい",
    "限界",
    "苦しい",
    "つらい",
    "もうダメ",
];

/// Immutable keyword set, built once at startup and shared read-only.
#[derive(Debug, Clone)]
pub struct RiskDetector {
    keywords: Vec<String>,
}

impl RiskDetector {
    /// Build a detector from `keywords`. Empty strings are dropped since they
    /// would match every input.
    pub fn new<I, S>(keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            keywords: keywords
                .into_iter()
                .map(Into::into)
                .filter(|k: &String| !k.is_empty())
                .collect(),
        }
    }

    /// True iff any keyword occurs in `text`.
    pub fn detect(&self, text: &str) -> bool {
        self.keywords.iter().any(|kw| text.contains(kw.as_str()))
    }

    /// Check one turn-cycle: the user's message and the model's reply together.
    pub fn detect_turn(&self, user_text: &str, model_text: &str) -> bool {
        self.detect(&combine(user_text, model_text))
    }

    /// Keywords found by [`detect_turn`](Self::detect_turn) over the same
    /// combined text.
    pub fn matched_turn(&self, user_text: &str, model_text: &str) -> Vec<&str> {
        self.matched(&combine(user_text, model_text))
    }

    /// Keywords present in `text`, in configured order.
    pub fn matched<'a>(&'a self, text: &str) -> Vec<&'a str> {
        self.keywords
            .iter()
            .filter(|kw| text.contains(kw.as_str()))
            .map(String::as_str)
            .collect()
    }

    pub fn keywords(&self) -> &[String] {
        &self.keywords
    }
}

fn combine(user_text: &str, model_text: &str) -> String {
    let mut combined = String::with_capacity(user_text.len() + model_text.len());
    combined.push_str(user_text);
    combined.push_str(model_text);
    combined
}

impl Default for RiskDetector {
    fn default() -> Self {
        Self::new(DEFAULT_RISK_KEYWORDS.iter().copied())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_each_default_keyword() {
        let detector = RiskDetector::default();
        for kw in DEFAULT_RISK_KEYWORDS {
            assert!(detector.detect(kw), "keyword should trigger: {kw}");
        }
    }

    #[test]
    fn clean_text_is_not_flagged() {
        let detector = RiskDetector::default();
        assert!(!detector.detect("最近眠れない"));
        assert!(!detector.detect("それは大変ですね"));
        assert!(!detector.detect(""));
    }

    #[test]
    fn keyword_embedded_in_sentence_triggers() {
        let detector = RiskDetector::default();
        assert!(detector.detect("もう限界です"));
        assert!(detector.detect("毎日がつらいと感じる"));
    }

    #[test]
    fn matching_is_case_sensitive() {
        let detector = RiskDetector::new(["Help"]);
        assert!(detector.detect("Help me"));
        assert!(!detector.detect("help me"));
    }

    #[test]
    fn substring_inside_larger_word_triggers() {
        let detector = RiskDetector::new(["end"]);
        assert!(detector.detect("weekend plans"));
    }

    #[test]
    fn empty_keywords_are_ignored() {
        let detector = RiskDetector::new(["", "限界"]);
        assert_eq!(detector.keywords().len(), 1);
        assert!(!detector.detect("anything"));
    }

    #[test]
    fn no_keywords_never_flags() {
        let detector = RiskDetector::new(Vec::<String>::new());
        assert!(!detector.detect("死にたい"));
    }

    #[test]
    fn concatenation_order_does_not_matter() {
        let detector = RiskDetector::default();
        let pairs = [
            ("もう限界です", "それは大変ですね"),
            ("最近眠れない", "苦しいですね"),
            ("最近眠れない", "それは大変ですね"),
        ];
        for (a, b) in pairs {
            assert_eq!(detector.detect_turn(a, b), detector.detect_turn(b, a));
        }
    }

    #[test]
    fn detect_turn_checks_both_sides() {
        let detector = RiskDetector::default();
        assert!(detector.detect_turn("もう限界です", "大丈夫ですか"));
        assert!(detector.detect_turn("こんにちは", "消えたいと思うことはありますか"));
        assert!(!detector.detect_turn("最近眠れない", "それは大変ですね"));
    }

    #[test]
    fn matched_lists_hits_in_order() {
        let detector = RiskDetector::default();
        assert_eq!(detector.matched("苦しい、もう限界"), vec!["限界", "苦しい"]);
        assert!(detector.matched("元気です").is_empty());
    }

    #[test]
    fn keyword_across_the_boundary_is_counted() {
        let detector = RiskDetector::new(["限界"]);
        assert!(detector.detect_turn("もう限", "界です"));
        assert_eq!(detector.matched_turn("もう限", "界です"), vec!["限界"]);
        assert!(detector.matched("もう限").is_empty());
        assert!(detector.matched("界です").is_empty());
    }

    #[test]
    fn matched_turn_agrees_with_detect_turn() {
        let detector = RiskDetector::default();
        for (a, b) in [("もう限界です", "はい"), ("こんにちは", "つらいですね"), ("眠れない", "大変ですね")] {
            assert_eq!(
                detector.detect_turn(a, b),
                !detector.matched_turn(a, b).is_empty()
            );
        }
    }
}
