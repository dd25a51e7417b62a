use regex::Regex;

use metalift_common::{ComponentScores, ExtractedMetadata, Grade, ScoreResult};

use crate::keywords;

// Composite weights. Titles carry the most ranking signal, tags the least.
const TITLE_WEIGHT: f64 = 0.40;
const DESCRIPTION_WEIGHT: f64 = 0.35;
const TAGS_WEIGHT: f64 = 0.25;

// Title heuristics
const TITLE_MIN_LEN: usize = 30;
const TITLE_MAX_LEN: usize = 100;
const TITLE_LENGTH_BASE: f64 = 48.0;
const TITLE_OVERLONG_CREDIT: f64 = 30.0;
const TITLE_KEYWORD_BONUS: f64 = 8.0;
const TITLE_KEYWORD_CAP: usize = 3;
const TITLE_MIXED_CASE_BONUS: f64 = 8.0;
const TITLE_YEAR_BONUS: f64 = 12.0;
const TITLE_QUESTION_BONUS: f64 = 8.0;

// Description heuristics
const DESC_MIN_LEN: usize = 125;
const DESC_MAX_LEN: usize = 5000;
const DESC_OPTIMAL_LEN: usize = 250;
const DESC_LENGTH_BASE: f64 = 40.0;
const DESC_OVERLONG_CREDIT: f64 = 25.0;
const DESC_STRUCTURE_BONUS: f64 = 10.0;
const DESC_HASHTAG_LIMIT: usize = 15;
const DESC_HASHTAG_PENALTY: f64 = 5.0;

// Tag heuristics
const TAGS_MIN_COUNT: usize = 5;
const TAGS_MAX_COUNT: usize = 15;
const TAGS_OPTIMAL_RANGE: std::ops::RangeInclusive<usize> = 8..=12;
const TAGS_COUNT_BASE: f64 = 40.0;
const TAGS_OVERFULL_CREDIT: f64 = 25.0;
const TAGS_OPTIMAL_BONUS: f64 = 20.0;
const TAGS_DUPLICATE_PENALTY: f64 = 15.0;
const TAGS_AVG_LEN_BONUS: f64 = 20.0;
const TAGS_AVG_LEN_PENALTY: f64 = 10.0;
const TAGS_KEYWORD_BONUS: f64 = 20.0;

/// Suggestion cap for condensed UI surfaces.
pub const MAX_CONDENSED_SUGGESTIONS: usize = 5;

struct FieldAnalysis {
    score: u8,
    issues: Vec<String>,
}

/// Score an extracted snapshot. Pure and deterministic: no I/O, no clock,
/// identical input always yields an identical result.
pub fn score(metadata: &ExtractedMetadata) -> ScoreResult {
    let title = analyze_title(&metadata.title, metadata.fields_found.title);
    let description = analyze_description(&metadata.description, metadata.fields_found.description);
    let tags = analyze_tags(&metadata.tags, metadata.fields_found.tags);

    let overall = (f64::from(title.score) * TITLE_WEIGHT
        + f64::from(description.score) * DESCRIPTION_WEIGHT
        + f64::from(tags.score) * TAGS_WEIGHT)
        .round()
        .clamp(0.0, 100.0) as u8;

    let mut suggestions = Vec::new();
    let mut seen = std::collections::HashSet::new();
    for issue in title
        .issues
        .iter()
        .chain(description.issues.iter())
        .chain(tags.issues.iter())
    {
        if seen.insert(issue.clone()) {
            suggestions.push(issue.clone());
        }
    }

    // Cross-field strategy only once the two headline fields are both weak.
    if title.score < 70 && description.score < 70 {
        suggestions.push(
            "Rework the title and description together around one clear topic".to_string(),
        );
        suggestions.push(
            "Front-load the main keyword in both the title and the opening sentence".to_string(),
        );
    }

    let mut strengths = Vec::new();
    let mut weaknesses = Vec::new();
    for (name, value) in [
        ("Title", title.score),
        ("Description", description.score),
        ("Tags", tags.score),
    ] {
        if value >= 80 {
            strengths.push(format!("{name} is strong ({value}/100)"));
        } else if value < 50 {
            weaknesses.push(format!("{name} needs work ({value}/100)"));
        }
    }

    ScoreResult {
        overall_score: overall,
        grade: Grade::from_score(overall),
        component_scores: ComponentScores {
            title: title.score,
            description: description.score,
            tags: tags.score,
        },
        suggestions,
        strengths,
        weaknesses,
    }
}

fn analyze_title(title: &str, found: bool) -> FieldAnalysis {
    if !found {
        return FieldAnalysis {
            score: 0,
            issues: vec!["Title field could not be located on the page".to_string()],
        };
    }

    let trimmed = title.trim();
    if trimmed.is_empty() {
        return FieldAnalysis {
            score: 0,
            issues: vec!["Title is missing or invalid".to_string()],
        };
    }

    let mut score = 0.0;
    let mut issues = Vec::new();
    let len = trimmed.chars().count();

    if (TITLE_MIN_LEN..=TITLE_MAX_LEN).contains(&len) {
        score += TITLE_LENGTH_BASE;
    } else if len < TITLE_MIN_LEN {
        score += TITLE_LENGTH_BASE * len as f64 / TITLE_MIN_LEN as f64;
        issues.push(format!("Title is too short (under {TITLE_MIN_LEN} characters)"));
    } else {
        score += TITLE_OVERLONG_CREDIT;
        issues.push(format!("Title is too long (over {TITLE_MAX_LEN} characters)"));
    }

    let lower = trimmed.to_lowercase();
    let matches = keywords::curated_matches(&lower);
    if matches > 0 {
        score += TITLE_KEYWORD_BONUS * matches.min(TITLE_KEYWORD_CAP) as f64;
    } else {
        issues.push("Title has no high-impact keywords".to_string());
    }

    let has_upper = trimmed.chars().any(|c| c.is_uppercase());
    let has_lower = trimmed.chars().any(|c| c.is_lowercase());
    if has_upper && has_lower {
        score += TITLE_MIXED_CASE_BONUS;
    } else {
        issues.push("Use mixed case instead of all-caps or all-lowercase".to_string());
    }

    if contains_year_token(trimmed) {
        score += TITLE_YEAR_BONUS;
    } else {
        issues.push("Add the current year to signal freshness".to_string());
    }

    if trimmed.contains('?') {
        score += TITLE_QUESTION_BONUS;
    }

    FieldAnalysis {
        score: score.round().clamp(0.0, 100.0) as u8,
        issues,
    }
}

fn analyze_description(description: &str, found: bool) -> FieldAnalysis {
    if !found {
        return FieldAnalysis {
            score: 0,
            issues: vec!["Description field could not be located on the page".to_string()],
        };
    }

    let trimmed = description.trim();
    if trimmed.is_empty() {
        return FieldAnalysis {
            score: 0,
            issues: vec!["Description is missing or invalid".to_string()],
        };
    }

    let mut score = 0.0;
    let mut issues = Vec::new();
    let len = trimmed.chars().count();

    if (DESC_MIN_LEN..=DESC_MAX_LEN).contains(&len) {
        score += DESC_LENGTH_BASE;
    } else if len < DESC_MIN_LEN {
        score += DESC_LENGTH_BASE * len as f64 / DESC_MIN_LEN as f64;
        issues.push(format!(
            "Description is too short (under {DESC_MIN_LEN} characters)"
        ));
    } else {
        score += DESC_OVERLONG_CREDIT;
        issues.push(format!(
            "Description is too long (over {DESC_MAX_LEN} characters)"
        ));
    }

    if len >= DESC_OPTIMAL_LEN {
        score += DESC_STRUCTURE_BONUS;
    }

    if trimmed.matches("\n\n").count() >= 2 {
        score += DESC_STRUCTURE_BONUS;
    } else {
        issues.push("Break the description into paragraphs".to_string());
    }

    let sentences = trimmed
        .chars()
        .filter(|c| matches!(c, '.' | '!' | '?'))
        .count();
    if sentences >= 3 {
        score += DESC_STRUCTURE_BONUS;
    } else {
        issues.push("Write at least three full sentences".to_string());
    }

    let lower = trimmed.to_lowercase();
    if lower.contains("http://") || lower.contains("https://") || lower.contains("www.") {
        score += DESC_STRUCTURE_BONUS;
    } else {
        issues.push("Include a link to related content".to_string());
    }

    if keywords::has_call_to_action(&lower) {
        score += DESC_STRUCTURE_BONUS;
    } else {
        issues.push("Add a call to action (subscribe, like, comment)".to_string());
    }

    let hashtags = count_hashtags(trimmed);
    if hashtags == 0 {
        issues.push("Add a few hashtags".to_string());
    } else if hashtags <= DESC_HASHTAG_LIMIT {
        score += DESC_STRUCTURE_BONUS;
    } else {
        score -= DESC_HASHTAG_PENALTY;
        issues.push(format!(
            "Too many hashtags (keep it under {DESC_HASHTAG_LIMIT})"
        ));
    }

    FieldAnalysis {
        score: score.round().clamp(0.0, 100.0) as u8,
        issues,
    }
}

fn analyze_tags(tags: &str, found: bool) -> FieldAnalysis {
    if !found {
        return FieldAnalysis {
            score: 0,
            issues: vec!["Tags field could not be located on the page".to_string()],
        };
    }

    let entries: Vec<&str> = tags
        .split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .collect();

    if entries.is_empty() {
        return FieldAnalysis {
            score: 0,
            issues: vec!["Tags are missing or invalid".to_string()],
        };
    }

    let mut score = 0.0;
    let mut issues = Vec::new();
    let count = entries.len();

    if (TAGS_MIN_COUNT..=TAGS_MAX_COUNT).contains(&count) {
        score += TAGS_COUNT_BASE;
    } else if count < TAGS_MIN_COUNT {
        score += TAGS_COUNT_BASE * count as f64 / TAGS_MIN_COUNT as f64;
        issues.push(format!(
            "Add more tags (aim for {TAGS_MIN_COUNT}-{TAGS_MAX_COUNT})"
        ));
    } else {
        score += TAGS_OVERFULL_CREDIT;
        issues.push(format!("Too many tags (keep it under {TAGS_MAX_COUNT})"));
    }

    if TAGS_OPTIMAL_RANGE.contains(&count) {
        score += TAGS_OPTIMAL_BONUS;
    }

    let mut seen = std::collections::HashSet::new();
    let duplicates = entries
        .iter()
        .filter(|t| !seen.insert(t.to_lowercase()))
        .count();
    if duplicates > 0 {
        score -= TAGS_DUPLICATE_PENALTY;
        issues.push("Remove duplicate tags".to_string());
    }

    let avg_len =
        entries.iter().map(|t| t.chars().count()).sum::<usize>() as f64 / count as f64;
    if (3.0..=15.0).contains(&avg_len) {
        score += TAGS_AVG_LEN_BONUS;
    } else {
        score -= TAGS_AVG_LEN_PENALTY;
        issues.push("Keep tags between 3 and 15 characters".to_string());
    }

    let keyword_tags = entries
        .iter()
        .filter(|t| keywords::tag_has_keyword(&t.to_lowercase()))
        .count();
    match keyword_tags {
        0 => issues.push("Include keyword-rich tags".to_string()),
        1 => score += TAGS_KEYWORD_BONUS / 2.0,
        _ => score += TAGS_KEYWORD_BONUS,
    }

    FieldAnalysis {
        score: score.round().clamp(0.0, 100.0) as u8,
        issues,
    }
}

/// Whether the text carries a standalone 4-digit year token (19xx or 20xx).
pub fn contains_year_token(text: &str) -> bool {
    let year_re = Regex::new(r"\b(19|20)\d{2}\b").expect("valid regex");
    year_re.is_match(text)
}

fn count_hashtags(text: &str) -> usize {
    let hashtag_re = Regex::new(r"#\w+").expect("valid regex");
    hashtag_re.find_iter(text).count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use metalift_common::FieldsFound;

    fn meta(title: &str, description: &str, tags: &str) -> ExtractedMetadata {
        ExtractedMetadata {
            title: title.to_string(),
            description: description.to_string(),
            tags: tags.to_string(),
            fields_found: FieldsFound {
                title: true,
                description: true,
                tags: true,
            },
            source_url: "https://studio.example/edit/abc".to_string(),
            captured_at: Utc::now(),
        }
    }

    #[test]
    fn empty_fields_score_zero_with_missing_issues() {
        let result = score(&meta("", "", ""));

        assert_eq!(result.overall_score, 0);
        assert_eq!(result.grade, Grade::F);
        assert!(result
            .suggestions
            .iter()
            .any(|s| s == "Title is missing or invalid"));
        assert!(result
            .suggestions
            .iter()
            .any(|s| s == "Description is missing or invalid"));
        assert!(result
            .suggestions
            .iter()
            .any(|s| s == "Tags are missing or invalid"));
    }

    #[test]
    fn scoring_is_deterministic() {
        let input = meta(
            "How to Make Fresh Pasta at Home in 2025",
            "A walkthrough of pasta making.\n\nCovers dough, shaping, and sauces. \
             Subscribe for more! Visit https://example.com for the written recipe.\n\n#pasta #cooking",
            "pasta, cooking, italian food, recipes, kitchen, dough, sauce, dinner",
        );
        assert_eq!(score(&input), score(&input));
    }

    #[test]
    fn keywords_and_year_beat_a_plain_title() {
        // Both titles are exactly 60 characters.
        let keyword_title = "How to Plant a Balcony Herb Garden in 2025 and Keep It Alive";
        let plain_title = "Planting a Balcony Herb Garden and Keeping It Watered Nicely";
        assert_eq!(keyword_title.chars().count(), 60);
        assert_eq!(plain_title.chars().count(), 60);

        let with = score(&meta(keyword_title, "", ""));
        let without = score(&meta(plain_title, "", ""));

        assert!(
            with.component_scores.title > without.component_scores.title,
            "expected {} > {}",
            with.component_scores.title,
            without.component_scores.title
        );
    }

    #[test]
    fn empty_title_reports_exact_issue() {
        let result = score(&meta("", "fine description", "a, b"));
        assert_eq!(result.component_scores.title, 0);
        assert!(result
            .suggestions
            .iter()
            .any(|s| s == "Title is missing or invalid"));
    }

    #[test]
    fn not_found_is_distinguished_from_empty() {
        let mut input = meta("", "", "");
        input.fields_found = FieldsFound {
            title: false,
            description: true,
            tags: true,
        };

        let result = score(&input);
        assert_eq!(result.component_scores.title, 0);
        assert!(result
            .suggestions
            .iter()
            .any(|s| s == "Title field could not be located on the page"));
        assert!(!result
            .suggestions
            .iter()
            .any(|s| s == "Title is missing or invalid"));
    }

    #[test]
    fn well_formed_metadata_scores_high() {
        let description = format!(
            "Learn how to make fresh pasta from scratch with simple tools.\n\n\
             We cover mixing the dough, rolling it thin, and cutting classic shapes. \
             Every step is shown up close so you can follow along at home.\n\n\
             Full written recipe: https://example.com/pasta. \
             If this helped, subscribe and leave a comment below! #pasta #cooking #homemade"
        );
        let result = score(&meta(
            "How to Make Fresh Pasta at Home - Complete Guide 2025",
            &description,
            "pasta, cooking, italian, recipes, kitchen, dough, homemade, tutorial, dinner, guide",
        ));

        assert!(result.overall_score >= 85, "got {}", result.overall_score);
        assert!(matches!(result.grade, Grade::APlus | Grade::A));
        assert!(!result.strengths.is_empty());
        assert!(result.weaknesses.is_empty());
    }

    #[test]
    fn duplicate_tags_are_penalized() {
        let unique = score(&meta("", "", "pasta, cooking, dough, sauce, dinner"));
        let duped = score(&meta("", "", "pasta, cooking, dough, sauce, Pasta"));
        assert!(unique.component_scores.tags > duped.component_scores.tags);
        assert!(duped.suggestions.iter().any(|s| s == "Remove duplicate tags"));
    }

    #[test]
    fn weak_title_and_description_trigger_strategic_suggestions() {
        let result = score(&meta("hi", "short", "a, b"));
        assert!(result
            .suggestions
            .iter()
            .any(|s| s.contains("Rework the title and description together")));
    }

    #[test]
    fn hashtag_flood_is_penalized() {
        // Same base text, comfortably past the optimal-length threshold, so
        // only the hashtag term differs between the two scores.
        let base = "Covers mixing the dough, resting it properly, rolling it thin, and \
                    cutting classic shapes by hand. Every step is shown up close with \
                    timing notes, common mistakes, and fixes, so the method works the \
                    first time even in a small kitchen with basic tools and no pasta \
                    machine of any kind."
            .to_string();
        let modest = format!("{base} #one #two #three");
        let flood = format!(
            "{base} {}",
            (0..17).map(|i| format!("#t{i}")).collect::<Vec<_>>().join(" ")
        );
        let modest_score = score(&meta("", &modest, ""));
        let flood_score = score(&meta("", &flood, ""));
        assert!(
            modest_score.component_scores.description > flood_score.component_scores.description
        );
    }
}
