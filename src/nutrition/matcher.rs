//! Picks the food record that best fits a free-text dish name.
//!
//! Each searchable field gets a normalized distance in `[0, 1]` (0 is a perfect
//! match). A field only counts when its distance is within [`THRESHOLD`]; the
//! counted fields are folded into one composite score as `Π distance^weight`,
//! so a strong match on a heavy field pulls the composite towards 0 and
//! additional matching fields can only improve it. Lower composite wins;
//! equal composites are ordered by whole-string distance to the description,
//! so an exact description beats one that merely contains every query word.

use tracing::debug;

use super::types::FoodCandidate;

pub const THRESHOLD: f64 = 0.6;
pub const MIN_MATCH_LEN: usize = 2;

const DESCRIPTION_WEIGHT: f64 = 0.7;
const BRAND_WEIGHT: f64 = 0.2;
const INGREDIENTS_WEIGHT: f64 = 0.1;

// Stand-in for a perfect field match so the product stays informative.
const EPSILON: f64 = 1e-3;

/// Returns the best candidate for `query`.
///
/// A single candidate is returned as-is. When no candidate clears the
/// threshold the first one in source order is returned.
pub fn select_best<'a>(candidates: &'a [FoodCandidate], query: &str) -> Option<&'a FoodCandidate> {
    match candidates {
        [] => None,
        [only] => Some(only),
        _ => {
            let query = normalize(query);
            let mut ranked: Vec<(f64, f64, &FoodCandidate)> = candidates
                .iter()
                .filter_map(|c| {
                    let score = composite_score(c, &query)?;
                    let whole = normalized_levenshtein(&query, &normalize(&c.description));
                    Some((score, whole, c))
                })
                .collect();
            // stable: full ties keep source order
            ranked.sort_by(|a, b| a.0.total_cmp(&b.0).then(a.1.total_cmp(&b.1)));

            match ranked.first() {
                Some((score, _, best)) => {
                    debug!(fdc_id = best.id, score, "fuzzy match selected");
                    Some(*best)
                }
                None => {
                    debug!("no candidate cleared threshold, using first result");
                    candidates.first()
                }
            }
        }
    }
}

/// Composite score of a candidate, or `None` if no field matched.
pub fn composite_score(candidate: &FoodCandidate, normalized_query: &str) -> Option<f64> {
    let fields = [
        (Some(candidate.description.as_str()), DESCRIPTION_WEIGHT),
        (candidate.brand_name.as_deref(), BRAND_WEIGHT),
        (candidate.ingredients.as_deref(), INGREDIENTS_WEIGHT),
    ];

    let mut total = 1.0;
    let mut matched = false;
    for (field, weight) in fields {
        let Some(field) = field else { continue };
        let field = normalize(field);
        if field.chars().count() < MIN_MATCH_LEN {
            continue;
        }
        let distance = field_distance(normalized_query, &field);
        if distance <= THRESHOLD {
            matched = true;
            total *= distance.max(EPSILON).powf(weight);
        }
    }
    matched.then_some(total)
}

/// Distance between a query and one field: the better of a whole-string
/// comparison and a per-token comparison.
fn field_distance(query: &str, field: &str) -> f64 {
    let whole = normalized_levenshtein(query, field);

    let query_tokens = tokens(query);
    let field_tokens = tokens(field);
    if query_tokens.is_empty() || field_tokens.is_empty() {
        return whole;
    }

    // every query token against its closest field token
    let token_sum: f64 = query_tokens
        .iter()
        .map(|q| {
            field_tokens
                .iter()
                .map(|f| normalized_levenshtein(q, f))
                .fold(1.0, f64::min)
        })
        .sum();
    let by_token = token_sum / query_tokens.len() as f64;

    whole.min(by_token)
}

fn normalize(s: &str) -> String {
    s.trim().to_lowercase()
}

fn tokens(s: &str) -> Vec<&str> {
    s.split(|c: char| !c.is_alphanumeric())
        .filter(|t| !t.is_empty())
        .collect()
}

fn normalized_levenshtein(a: &str, b: &str) -> f64 {
    let longest = a.chars().count().max(b.chars().count());
    if longest == 0 {
        return 0.0;
    }
    levenshtein(a, b) as f64 / longest as f64
}

/// Classic two-row edit distance over chars.
fn levenshtein(a: &str, b: &str) -> usize {
    let b: Vec<char> = b.chars().collect();
    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr = vec![0; b.len() + 1];

    for (i, ca) in a.chars().enumerate() {
        curr[0] = i + 1;
        for (j, cb) in b.iter().enumerate() {
            let cost = usize::from(ca != *cb);
            curr[j + 1] = (prev[j] + cost).min(prev[j + 1] + 1).min(curr[j] + 1);
        }
        std::mem::swap(&mut prev, &mut curr);
    }
    prev[b.len()]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn food(id: u64, description: &str) -> FoodCandidate {
        FoodCandidate {
            id,
            description: description.into(),
            brand_name: None,
            ingredients: None,
            nutrients: vec![],
        }
    }

    #[test]
    fn levenshtein_basics() {
        assert_eq!(levenshtein("", ""), 0);
        assert_eq!(levenshtein("kitten", "sitting"), 3);
        assert_eq!(levenshtein("rice", ""), 4);
        assert_eq!(levenshtein("naïve", "naive"), 1);
    }

    #[test]
    fn empty_list_has_no_match() {
        assert!(select_best(&[], "anything").is_none());
    }

    #[test]
    fn single_candidate_is_returned_regardless_of_query() {
        let only = vec![food(7, "Lentil soup")];
        for query in ["lentil soup", "zzzz", "", "chocolate cake"] {
            assert_eq!(select_best(&only, query).map(|f| f.id), Some(7));
        }
    }

    #[test]
    fn exact_description_ranks_first() {
        let foods = vec![
            food(1, "Rice, white, cooked"),
            food(2, "Chicken curry"),
            food(3, "Chicken biryani"),
            food(4, "Biryani masala paste"),
        ];
        assert_eq!(select_best(&foods, "Chicken biryani").map(|f| f.id), Some(3));

        let score = composite_score(&foods[2], &normalize("Chicken biryani")).unwrap();
        assert!(score < 0.01, "score was {score}");
    }

    #[test]
    fn exact_description_beats_earlier_superset() {
        let foods = vec![
            food(1, "Chicken biryani masala paste"),
            food(2, "Chicken biryani"),
        ];
        assert_eq!(select_best(&foods, "Chicken biryani").map(|f| f.id), Some(2));
    }

    #[test]
    fn description_match_outranks_ingredients_only_match() {
        let mut tray = food(1, "Frozen meal tray");
        tray.ingredients = Some("paneer tikka, rice, spices".into());
        let tikka = food(2, "Paneer tikka masala");

        let query = normalize("paneer tikka");
        let tray_score = composite_score(&tray, &query).unwrap();
        let tikka_score = composite_score(&tikka, &query).unwrap();
        assert!(tikka_score < tray_score, "{tikka_score} vs {tray_score}");

        let foods = vec![tray, tikka];
        assert_eq!(select_best(&foods, "paneer tikka").map(|f| f.id), Some(2));
    }

    #[test]
    fn one_letter_brand_is_skipped_but_description_counts() {
        let mut branded = food(1, "Kale");
        branded.brand_name = Some("K".into());
        let plain = food(2, "Kale");

        assert_eq!(
            composite_score(&branded, "kale"),
            composite_score(&plain, "kale")
        );
        assert!(composite_score(&branded, "kale").is_some());
        // an exact hit on the one-letter brand still does not count
        let mut no_desc_match = food(3, "Swiss chard, raw");
        no_desc_match.brand_name = Some("k".into());
        assert!(composite_score(&no_desc_match, "k").is_none());
    }

    #[test]
    fn tolerates_typos() {
        let foods = vec![food(1, "Apple pie"), food(2, "Spaghetti bolognese")];
        assert_eq!(select_best(&foods, "spagheti bolognase").map(|f| f.id), Some(2));
    }

    #[test]
    fn falls_back_to_first_when_nothing_matches() {
        let foods = vec![food(10, "Broccoli, raw"), food(11, "Salmon, smoked")];
        assert_eq!(select_best(&foods, "xq").map(|f| f.id), Some(10));
        assert!(composite_score(&foods[0], "xq").is_none());
    }

    #[test]
    fn brand_name_breaks_description_ties() {
        let mut plain = food(1, "Granola bar");
        plain.brand_name = Some("Acme".into());
        let mut branded = food(2, "Granola bar");
        branded.brand_name = Some("Nature Valley".into());

        let foods = vec![plain, branded];
        assert_eq!(
            select_best(&foods, "nature valley granola bar").map(|f| f.id),
            Some(2)
        );
    }

    #[test]
    fn short_fields_are_ignored() {
        let mut f = food(1, "X");
        f.ingredients = Some("a".into());
        assert!(composite_score(&f, "x").is_none());
    }

    #[test]
    fn ties_keep_source_order() {
        let foods = vec![food(1, "Tea"), food(2, "Tea")];
        assert_eq!(select_best(&foods, "tea").map(|f| f.id), Some(1));
    }
}
