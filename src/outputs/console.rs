//! Human-readable listing for the terminal.

use crate::models::ResultSet;
use std::fmt::Write;

/// Format the result set as an 80-column listing with right-aligned numbers.
///
/// # Arguments
///
/// * `results` - Harvested companies
///
/// # Returns
///
/// The listing text, headed by a banner and one section per company.
pub fn render_listing(results: &ResultSet) -> String {
    let mut out = String::new();
    writeln!(out, "\n{}", "=".repeat(80)).unwrap();
    writeln!(out, "SYSTEM DESIGN INTERVIEW QUESTIONS").unwrap();
    writeln!(out, "{}", "=".repeat(80)).unwrap();

    for harvest in &results.companies {
        writeln!(out, "\n{}", harvest.company.to_uppercase()).unwrap();
        writeln!(out, "{}", "-".repeat(50)).unwrap();
        for (i, title) in harvest.titles.iter().enumerate() {
            writeln!(out, "{:>2}. {}", i + 1, title).unwrap();
        }
    }
    out
}

/// Print [`render_listing`] to stdout.
pub fn print_results(results: &ResultSet) {
    print!("{}", render_listing(results));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CompanyHarvest;

    #[test]
    fn test_listing_pads_numbers() {
        let results = ResultSet {
            companies: vec![CompanyHarvest {
                company: "PayPal".into(),
                titles: (1..=10).map(|i| format!("Design thing {i}")).collect(),
                ..Default::default()
            }],
        };
        let listing = render_listing(&results);
        assert!(listing.contains("\nPAYPAL\n"));
        assert!(listing.contains("\n 1. Design thing 1\n"));
        assert!(listing.contains("\n10. Design thing 10\n"));
    }
}
