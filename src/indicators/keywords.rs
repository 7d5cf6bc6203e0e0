use std::collections::BTreeSet;

/// Returns the keywords contained in `text`, compared case-insensitively.
///
/// Keywords are reported in their configured spelling. Empty keywords never
/// match.
pub fn scan_keywords<S: AsRef<str>>(text: &str, keywords: &[S]) -> BTreeSet<String> {
    let haystack = text.to_lowercase();
    let mut hits = BTreeSet::new();
    for keyword in keywords {
        let keyword: &str = keyword.as_ref();
        if !keyword.is_empty() && haystack.contains(&keyword.to_lowercase()) {
            hits.insert(keyword.to_string());
        }
    }
    hits
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matching_ignores_case() {
        let hits = scan_keywords(
            "contract userproofhub is ITeleporterReceiver { /* ava labs */ }",
            &["UserProofHub", "Ava Labs", "Zendity"],
        );
        assert_eq!(
            hits.into_iter().collect::<Vec<_>>(),
            vec!["Ava Labs".to_string(), "UserProofHub".to_string()]
        );
    }

    #[test]
    fn empty_keyword_is_ignored() {
        assert!(scan_keywords("anything", &[""]).is_empty());
    }
}
