use crate::Result;
use crate::error::Error;

use super::constant;

/// Query names an API resource category plus the ordered filter pairs
/// narrowing it. Filter order is preserved so the rendered URL is the
/// same run to run.
#[derive(Debug, Clone)]
pub struct Query {
    category: String,
    filters: Vec<(String, String)>,
}

impl Query {
    /// Pair up filter keys and values. A length mismatch fails here,
    /// before any request is made.
    pub fn new(category: &str, keys: &[String], values: &[String]) -> Result<Query> {
        if keys.len() != values.len() {
            return Err(Error::Validation(format!(
                "got {} filter keys but {} filter values",
                keys.len(),
                values.len()
            )));
        }
        Ok(Query {
            category: category.to_string(),
            filters: keys.iter().cloned().zip(values.iter().cloned()).collect(),
        })
    }

    /// The first filter joins with `?`, the rest with `&`, in input
    /// order. No filters means no query string at all.
    pub fn url(&self) -> String {
        let mut url = constant::category_url(&self.category);
        for (n, (key, value)) in self.filters.iter().enumerate() {
            url.push(if n == 0 { '?' } else { '&' });
            url.push_str(key);
            url.push('=');
            url.push_str(value);
        }
        url
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn filters_render_in_input_order() {
        let query = Query::new(
            "games",
            &strings(&["year", "team"]),
            &strings(&["2022", "Alabama"]),
        )
        .unwrap();
        assert_eq!(
            query.url(),
            "https://api.collegefootballdata.com/games?year=2022&team=Alabama"
        );
    }

    #[test]
    fn one_question_mark_rest_ampersands() {
        let query = Query::new(
            "games",
            &strings(&["year", "team", "week"]),
            &strings(&["2022", "Alabama", "4"]),
        )
        .unwrap();
        let url = query.url();
        assert_eq!(url.matches('?').count(), 1);
        assert_eq!(url.matches('&').count(), 2);
    }

    #[test]
    fn no_filters_no_query_string() {
        let query = Query::new("teams", &[], &[]).unwrap();
        assert_eq!(query.url(), "https://api.collegefootballdata.com/teams");
    }

    #[test]
    fn mismatched_filter_lists_fail_fast() {
        let result = Query::new("games", &strings(&["year", "team"]), &strings(&["2022"]));
        assert!(matches!(result, Err(Error::Validation(_))));
    }
}
