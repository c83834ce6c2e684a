//! Compiled-in stopword sets for the two supported languages.

use std::collections::HashSet;

use once_cell::sync::Lazy;

static ENGLISH: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "a", "about", "above", "after", "again", "against", "all", "am", "an", "and", "any",
        "are", "as", "at", "be", "because", "been", "before", "being", "below", "between",
        "both", "but", "by", "can", "did", "do", "does", "doing", "down", "during", "each",
        "few", "for", "from", "further", "had", "has", "have", "having", "he", "her", "here",
        "hers", "him", "his", "how", "i", "if", "in", "into", "is", "it", "its", "just", "me",
        "more", "most", "my", "no", "nor", "not", "now", "of", "off", "on", "once", "only",
        "or", "other", "our", "out", "over", "own", "same", "she", "should", "so", "some",
        "such", "than", "that", "the", "their", "them", "then", "there", "these", "they",
        "this", "those", "through", "to", "too", "under", "until", "up", "very", "was", "we",
        "were", "what", "when", "where", "which", "while", "who", "whom", "why", "will",
        "with", "you", "your",
    ]
    .into_iter()
    .collect()
});

// Removal is substring based (Chinese has no word boundaries), so longer
// entries must be applied before their own substrings.
static CHINESE: Lazy<Vec<&'static str>> = Lazy::new(|| {
    let mut terms = vec![
        "因為", "所以", "但是", "可是", "如果", "雖然", "然後", "還有", "還是", "就是",
        "也是", "不是", "沒有", "我們", "你們", "他們", "她們", "自己", "這個", "那個",
        "這些", "那些", "這樣", "那樣", "什麼", "怎麼", "以及", "或是", "而且", "並且",
        "對於", "關於", "已經", "正在", "可以", "應該", "的", "了", "著", "過", "嗎",
        "吧", "呢", "啊", "喔", "唷", "囉", "與", "及", "而", "且", "或", "就", "都",
        "也", "很", "被", "把", "讓", "在", "是",
    ];
    terms.sort_by(|a, b| b.chars().count().cmp(&a.chars().count()));
    terms
});

/// Case-insensitive membership test against the English stopword set.
pub fn is_english_stopword(token: &str) -> bool {
    ENGLISH.contains(token.to_lowercase().as_str())
}

/// Chinese stopwords, longest first.
pub fn chinese_stopwords() -> &'static [&'static str] {
    &CHINESE
}
