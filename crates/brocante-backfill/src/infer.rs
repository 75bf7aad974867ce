//! Pure inference helpers over listing text
//!
//! Matching is substring-based on lowercased text. Inference returns the
//! keyword exactly as listed in the table, so inferred values line up with
//! select options configured with the same spelling.

/// Infer an attribute value from listing text
///
/// Returns the first table keyword contained in the title or description,
/// title scanned first.
pub fn infer_value(keywords: &[&str], title: &str, description: &str) -> Option<String> {
    let title = title.to_lowercase();
    let description = description.to_lowercase();

    keywords
        .iter()
        .find(|keyword| title.contains(*keyword) || description.contains(*keyword))
        .map(|keyword| keyword.to_string())
}

/// Score sub-category keyword tables against listing text
///
/// The score of a sub-category is the summed character length of its
/// keywords found in the text; longer, more specific matches dominate.
/// The highest score wins; ties break lexicographically on the
/// sub-category name so re-runs are deterministic.
pub fn score_sub_categories<'a>(
    tables: &[(&'a str, &[&str])],
    text: &str,
) -> Option<&'a str> {
    let text = text.to_lowercase();

    tables
        .iter()
        .filter_map(|(name, keywords)| {
            let score: usize = keywords
                .iter()
                .filter(|keyword| text.contains(*keyword))
                .map(|keyword| keyword.chars().count())
                .sum();
            (score > 0).then_some((score, *name))
        })
        .max_by(|a, b| a.0.cmp(&b.0).then_with(|| b.1.cmp(a.1)))
        .map(|(_, name)| name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_infer_value_scans_title_then_description() {
        let keywords = &["essence", "diesel"];
        assert_eq!(
            infer_value(keywords, "Clio essence 2015", ""),
            Some("essence".to_string())
        );
        assert_eq!(
            infer_value(keywords, "Clio 2015", "moteur Diesel révisé"),
            Some("diesel".to_string())
        );
        assert_eq!(infer_value(keywords, "Clio 2015", "très propre"), None);
    }

    #[test]
    fn test_infer_value_is_case_insensitive() {
        let keywords = &["rouge"];
        assert_eq!(
            infer_value(keywords, "Vélo ROUGE", ""),
            Some("rouge".to_string())
        );
    }

    #[test]
    fn test_score_prefers_highest_keyword_mass() {
        let tables: Vec<(&str, &[&str])> = vec![
            ("Voitures", &["voiture", "berline"]),
            ("Motos", &["moto"]),
        ];
        // "berline" + "voiture" outweighs "moto"
        assert_eq!(
            score_sub_categories(&tables, "belle berline, voiture de fonction"),
            Some("Voitures")
        );
        assert_eq!(score_sub_categories(&tables, "moto récente"), Some("Motos"));
        assert_eq!(score_sub_categories(&tables, "rien à voir"), None);
    }

    #[test]
    fn test_score_tie_breaks_lexicographically() {
        let tables: Vec<(&str, &[&str])> = vec![
            ("Zebra", &["abcd"]),
            ("Alpha", &["wxyz"]),
        ];
        // Both match with score 4; the lexicographically-smaller name wins
        assert_eq!(
            score_sub_categories(&tables, "abcd wxyz"),
            Some("Alpha")
        );
        // Order of the table must not matter
        let reversed: Vec<(&str, &[&str])> = vec![
            ("Alpha", &["wxyz"]),
            ("Zebra", &["abcd"]),
        ];
        assert_eq!(
            score_sub_categories(&reversed, "abcd wxyz"),
            Some("Alpha")
        );
    }
}
