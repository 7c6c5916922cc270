    use super::*;

    #[test]
    fn test_parse_family_listing_sorted_and_deduplicated() {
        let listing = "TeX Gyre Termes\nDejaVu Sans\nTeX Gyre Termes\n";
        assert_eq!(
            parse_family_listing(listing),
            ["DejaVu Sans", "TeX Gyre Termes"]
        );
    }

    #[test]
    fn test_parse_family_listing_splits_aliases() {
        let listing = "DejaVu Sans,DejaVu Sans Condensed\nNoto Serif\n";
        assert_eq!(
            parse_family_listing(listing),
            ["DejaVu Sans", "DejaVu Sans Condensed", "Noto Serif"]
        );
    }

    #[test]
    fn test_parse_family_listing_skips_blank_entries() {
        let listing = "\n  \nFoo , \r\n";
        assert_eq!(parse_family_listing(listing), ["Foo"]);
    }

    #[test]
    fn test_parse_family_listing_empty() {
        assert!(parse_family_listing("").is_empty());
    }

    #[test]
    fn test_contains_family_ignores_case() {
        let families = vec!["DejaVu Sans".to_string(), "TeX Gyre Heros".to_string()];
        assert!(contains_family(&families, "tex gyre heros"));
        assert!(!contains_family(&families, "TeX Gyre Pagella"));
    }

    #[test]
    fn test_contains_family_false_for_empty_catalog() {
        assert!(!contains_family(&[], "TeX Gyre Heros"));
    }

    #[test]
    fn test_system_prober_missing_program() {
        assert!(!SystemProber.has_program("mdpdf-no-such-program-4f1c"));
    }
