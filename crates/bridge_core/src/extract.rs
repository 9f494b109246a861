use bridge_logging::bridge_debug;

use crate::patterns::PatternConfig;
use crate::types::{ExtractError, ExtractionResult, Strategy};

/// Locates the prompt inside converted text.
///
/// Strategies run in priority order and the first non-empty span wins:
/// - marker pair: lines strictly between the last start and last end marker
/// - start marker only: everything after the last start marker
/// - phrase: everything after the first line containing a phrase
/// - delimiter: everything after the last line equal to a delimiter
/// - keyword: the first line containing a keyword and everything after it
pub fn extract(text: &str, config: &PatternConfig) -> Result<ExtractionResult, ExtractError> {
    let lines: Vec<&str> = text.split('\n').collect();

    let found = by_markers(&lines, config)
        .or_else(|| by_phrase(&lines, &config.phrases))
        .or_else(|| by_delimiter(&lines, &config.delimiters))
        .or_else(|| by_keyword(&lines, &config.keywords));

    match found {
        Some(result) => {
            bridge_debug!(
                "prompt located by {} ({} bytes)",
                result.strategy,
                result.text.len()
            );
            Ok(result)
        }
        None => {
            bridge_debug!("no prompt found in {} lines", lines.len());
            Err(ExtractError::NotFound)
        }
    }
}

fn by_markers(lines: &[&str], config: &PatternConfig) -> Option<ExtractionResult> {
    let start = last_line_equal(lines, &config.start_marker)?;

    if let Some(end) = last_line_equal(lines, &config.end_marker) {
        if start < end {
            if let Some(text) = joined(&lines[start + 1..end]) {
                return Some(ExtractionResult::new(text, Strategy::MarkerPair));
            }
        }
    }

    joined(&lines[start + 1..]).map(|text| ExtractionResult::new(text, Strategy::MarkerStart))
}

fn by_phrase(lines: &[&str], phrases: &[String]) -> Option<ExtractionResult> {
    phrases.iter().find_map(|phrase| {
        let index = first_line_containing(lines, phrase)?;
        joined(&lines[index + 1..]).map(|text| ExtractionResult::new(text, Strategy::Phrase))
    })
}

fn by_delimiter(lines: &[&str], delimiters: &[String]) -> Option<ExtractionResult> {
    delimiters.iter().find_map(|delimiter| {
        let index = last_line_equal(lines, delimiter)?;
        joined(&lines[index + 1..]).map(|text| ExtractionResult::new(text, Strategy::Delimiter))
    })
}

fn by_keyword(lines: &[&str], keywords: &[String]) -> Option<ExtractionResult> {
    keywords.iter().find_map(|keyword| {
        let index = first_line_containing(lines, keyword)?;
        joined(&lines[index..]).map(|text| ExtractionResult::new(text, Strategy::Keyword))
    })
}

/// Index of the last line whose trimmed text equals `needle`.
fn last_line_equal(lines: &[&str], needle: &str) -> Option<usize> {
    if needle.is_empty() {
        return None;
    }
    lines.iter().rposition(|line| line.trim() == needle)
}

fn first_line_containing(lines: &[&str], needle: &str) -> Option<usize> {
    if needle.is_empty() {
        return None;
    }
    lines.iter().position(|line| line.contains(needle))
}

fn joined(lines: &[&str]) -> Option<String> {
    let text = lines.join("\n");
    let text = text.trim();
    (!text.is_empty()).then(|| text.to_owned())
}

#[cfg(test)]
mod tests {
    use super::extract;
    use crate::{ExtractError, Method, PatternConfig, Strategy};
    use pretty_assertions::assert_eq;

    fn config() -> PatternConfig {
        PatternConfig::markers_only()
            .with_phrases(["Prompt below"])
            .with_delimiters(["---", "==="])
            .with_keywords(["Goal:", "Scope:"])
    }

    #[test]
    fn marker_pair_returns_lines_between() {
        let text = "intro\n---SOP---\n  do X\n  then Y\n---EOP---\noutro";
        let result = extract(text, &config()).unwrap();
        assert_eq!(result.text, "do X\n  then Y");
        assert_eq!(result.method, Method::Marker);
        assert_eq!(result.strategy, Strategy::MarkerPair);
    }

    #[test]
    fn markers_match_after_trimming_and_last_occurrence_wins() {
        let text = "---SOP---\nold\n---EOP---\n  ---SOP---  \nnew\n ---EOP---";
        let result = extract(text, &config()).unwrap();
        assert_eq!(result.text, "new");
        assert_eq!(result.strategy, Strategy::MarkerPair);
    }

    #[test]
    fn marker_embedded_in_a_line_is_not_a_marker() {
        let text = "use ---SOP--- to start\nbody";
        assert_eq!(extract(text, &config()), Err(ExtractError::NotFound));
    }

    #[test]
    fn start_marker_alone_runs_to_end() {
        let text = "chat\n---SOP---\nline one\nline two\nline three\n";
        let result = extract(text, &config()).unwrap();
        assert_eq!(result.text, "line one\nline two\nline three");
        assert_eq!(result.method, Method::Marker);
        assert_eq!(result.strategy, Strategy::MarkerStart);
    }

    #[test]
    fn end_before_start_falls_back_to_start_only() {
        let text = "---EOP---\nnoise\n---SOP---\nprompt";
        let result = extract(text, &config()).unwrap();
        assert_eq!(result.text, "prompt");
        assert_eq!(result.strategy, Strategy::MarkerStart);
    }

    #[test]
    fn empty_marker_pair_uses_text_after_start() {
        let text = "---SOP---\n   \n---EOP---\nafter";
        let result = extract(text, &config()).unwrap();
        assert_eq!(result.text, "---EOP---\nafter");
        assert_eq!(result.strategy, Strategy::MarkerStart);
    }

    #[test]
    fn empty_marker_span_falls_through_to_fallbacks() {
        let text = "Goal: ship\n---SOP---\n \n";
        let result = extract(text, &config()).unwrap();
        assert_eq!(result.strategy, Strategy::Keyword);
        assert_eq!(result.text, "Goal: ship\n---SOP---");
    }

    #[test]
    fn marker_pair_beats_phrase() {
        let text = "Prompt below\nphrase body\n---SOP---\nmarked\n---EOP---";
        let result = extract(text, &config()).unwrap();
        assert_eq!(result.text, "marked");
        assert_eq!(result.method, Method::Marker);
    }

    #[test]
    fn phrase_excludes_its_own_line() {
        let text = "Here is the Prompt below, enjoy\nTask A\nTask B\n";
        let result = extract(text, &config()).unwrap();
        assert_eq!(result.text, "Task A\nTask B");
        assert_eq!(result.method, Method::Fallback);
        assert_eq!(result.strategy, Strategy::Phrase);
    }

    #[test]
    fn phrase_beats_keyword() {
        let text = "Goal: first\nPrompt below\nScope: second";
        let result = extract(text, &config()).unwrap();
        assert_eq!(result.strategy, Strategy::Phrase);
        assert_eq!(result.text, "Scope: second");
    }

    #[test]
    fn phrase_at_end_of_text_tries_next_strategy() {
        let text = "---\nafter delimiter\nPrompt below";
        let result = extract(text, &config()).unwrap();
        assert_eq!(result.strategy, Strategy::Delimiter);
        assert_eq!(result.text, "after delimiter\nPrompt below");
    }

    #[test]
    fn delimiter_uses_last_occurrence_in_configured_order() {
        let text = "===\nfirst\n---\nsecond\n---\nthird";
        let result = extract(text, &config()).unwrap();
        assert_eq!(result.text, "third");
        assert_eq!(result.strategy, Strategy::Delimiter);
    }

    #[test]
    fn trailing_delimiter_moves_on_to_the_next_one() {
        let text = "===\nafter equals\n---";
        let result = extract(text, &config()).unwrap();
        assert_eq!(result.text, "after equals\n---");
    }

    #[test]
    fn keyword_includes_its_own_line() {
        let text = "chatter\nScope: backend only\nGoal: faster builds";
        let result = extract(text, &config()).unwrap();
        assert_eq!(result.text, "Goal: faster builds");
        assert_eq!(result.strategy, Strategy::Keyword);
    }

    #[test]
    fn keywords_are_tried_in_configured_order() {
        let text = "chatter\nScope: backend only\nmore\nGoal: faster builds\nend";
        let result = extract(text, &config()).unwrap();
        assert_eq!(result.text, "Goal: faster builds\nend");
    }

    #[test]
    fn nothing_matches() {
        let text = "just some\nordinary answer";
        assert_eq!(extract(text, &config()), Err(ExtractError::NotFound));
        assert_eq!(extract("", &config()), Err(ExtractError::NotFound));
    }

    #[test]
    fn empty_patterns_never_match() {
        let config = PatternConfig::markers_only()
            .with_markers("", "")
            .with_phrases([""])
            .with_keywords([""]);
        assert_eq!(extract("\nanything\n", &config), Err(ExtractError::NotFound));
    }
}
