//! Search query construction.

use crate::config::COMPANY_PLACEHOLDER;

/// Substitute `company` into each query template, keeping template order.
///
/// The company is not validated; an unknown name still gets every query.
///
/// # Arguments
///
/// * `templates` - Query templates containing `{company}`
/// * `company` - Company name, inserted verbatim
///
/// # Returns
///
/// One query per template.
pub fn build_queries(templates: &[String], company: &str) -> Vec<String> {
    templates
        .iter()
        .map(|template| template.replace(COMPANY_PLACEHOLDER, company))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{HarvestConfig, Profile};

    #[test]
    fn test_substitutes_company() {
        let templates = vec![
            "{company} system design interview questions".to_string(),
            "site:reddit.com {company} interview system design".to_string(),
        ];
        assert_eq!(
            build_queries(&templates, "PayPal"),
            vec![
                "PayPal system design interview questions".to_string(),
                "site:reddit.com PayPal interview system design".to_string(),
            ]
        );
    }

    #[test]
    fn test_enhanced_profile_builds_ten_queries() {
        let config = HarvestConfig::from_profile(Profile::Enhanced);
        let queries = build_queries(&config.sources[0].queries, "Mastercard");
        assert_eq!(queries.len(), 10);
        assert!(queries.iter().all(|q| q.contains("Mastercard")));
        assert!(queries.iter().any(|q| q.starts_with("site:glassdoor.com ")));
    }

    #[test]
    fn test_unknown_company_still_gets_queries() {
        let templates = vec!["{company} system design".to_string()];
        assert_eq!(build_queries(&templates, "Initech"), vec!["Initech system design"]);
    }
}
