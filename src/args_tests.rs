    use super::*;
    use crate::theme::Theme;

    fn argv(tokens: &[&str]) -> Vec<String> {
        tokens.iter().map(|t| t.to_string()).collect()
    }

    fn table() -> &'static FlagTable {
        use std::sync::LazyLock;
        static T: LazyLock<FlagTable> = LazyLock::new(FlagTable::from_cli);
        &T
    }

    fn lenient(tokens: &[&str]) -> ScannedArgs {
        scan(&argv(tokens), table(), UnknownArgPolicy::Warn)
    }

    fn parse(tokens: &[&str]) -> Result<Cli> {
        lenient(tokens).into_cli()
    }

    fn priority(tokens: &[&str]) -> Option<PriorityAction> {
        priority_action(&argv(tokens), table())
    }

    // ── Priority pre-scan ───────────────────────────────────────

    #[test]
    fn test_priority_help_beats_diagnostics() {
        assert_eq!(priority(&["--diagnostics", "--help"]), Some(PriorityAction::Help));
        assert_eq!(priority(&["-h", "--diagnostics"]), Some(PriorityAction::Help));
    }

    #[test]
    fn test_priority_diagnostics_beats_list_fonts() {
        assert_eq!(
            priority(&["--list-fonts", "--diagnostics"]),
            Some(PriorityAction::Diagnostics)
        );
    }

    #[test]
    fn test_priority_list_fonts_beats_version() {
        assert_eq!(priority(&["-V", "--list-fonts"]), Some(PriorityAction::ListFonts));
        assert_eq!(priority(&["--version"]), Some(PriorityAction::Version));
    }

    #[test]
    fn test_priority_ignores_input_validation() {
        // Two inputs and a conflicting theme/font would fail later; help still wins.
        assert_eq!(
            priority(&["a.md", "b.md", "-t", "heros", "-f", "Foo", "--help"]),
            Some(PriorityAction::Help)
        );
    }

    #[test]
    fn test_priority_none_for_plain_conversion() {
        assert_eq!(priority(&["doc.md", "-t", "heros"]), None);
    }

    #[test]
    fn test_priority_help_in_short_cluster() {
        assert_eq!(priority(&["-yh"]), Some(PriorityAction::Help));
    }

    #[test]
    fn test_priority_stops_at_double_dash() {
        assert_eq!(priority(&["--", "--help"]), None);
    }

    #[test]
    fn test_priority_long_prefix() {
        assert_eq!(priority(&["--diag"]), Some(PriorityAction::Diagnostics));
    }

    // ── Flag forms ──────────────────────────────────────────────

    #[test]
    fn test_parse_defaults() {
        let cli = parse(&["doc.md"]).expect("plain input should parse");
        assert_eq!(cli.input.as_deref(), Some("doc.md"));
        assert_eq!(cli.theme, Theme::Modern);
        assert_eq!(cli.lang, "en");
        assert_eq!(cli.font, None);
        assert_eq!(cli.output, None);
        assert!(!cli.yes);
    }

    #[test]
    fn test_parse_short_and_long_flags() {
        let cli = parse(&["-t", "heros", "--lang", "pt", "-o", "out.pdf", "--yes", "doc.md"])
            .expect("should parse");
        assert_eq!(cli.theme, Theme::Heros);
        assert_eq!(cli.lang, "pt");
        assert_eq!(cli.output.as_deref(), Some("out.pdf"));
        assert!(cli.yes);
    }

    #[test]
    fn test_parse_inline_values() {
        let cli = parse(&["--theme=pagella", "-les", "doc.md"]).expect("should parse");
        assert_eq!(cli.theme, Theme::Pagella);
        assert_eq!(cli.lang, "es");
    }

    #[test]
    fn test_parse_unique_long_prefix() {
        let cli = parse(&["--the", "termes", "--out", "x.pdf", "doc.md"]).expect("should parse");
        assert_eq!(cli.theme, Theme::Termes);
        assert_eq!(cli.output.as_deref(), Some("x.pdf"));
    }

    #[test]
    fn test_ambiguous_long_prefix_is_unknown() {
        // --ver matches both --verbose and --version.
        let scanned = lenient(&["--ver", "doc.md"]);
        assert_eq!(scanned.unknown, ["--ver"]);
    }

    #[test]
    fn test_parse_clustered_short_flags() {
        let scanned = lenient(&["-yvv", "doc.md"]);
        assert_eq!(scanned.verbosity(), 2);
        let cli = scanned.into_cli().expect("should parse");
        assert!(cli.yes);
        assert_eq!(cli.verbose, 2);
    }

    #[test]
    fn test_font_value_with_spaces() {
        let cli = parse(&["-f", "Noto Serif", "doc.md"]).expect("should parse");
        assert_eq!(cli.font.as_deref(), Some("Noto Serif"));
    }

    #[test]
    fn test_markdown_token_consumed_as_value_is_not_input() {
        let cli = parse(&["-o", "notes.md", "doc.md"]).expect("should parse");
        assert_eq!(cli.input.as_deref(), Some("doc.md"));
        assert_eq!(cli.output.as_deref(), Some("notes.md"));
    }

    #[test]
    fn test_value_starting_with_dash() {
        let cli = parse(&["-f", "-Weird", "doc.md"]).expect("should parse");
        assert_eq!(cli.font.as_deref(), Some("-Weird"));
    }

    #[test]
    fn test_markdown_extension_variants_are_inputs() {
        let scanned = lenient(&["README.MARKDOWN"]);
        assert_eq!(scanned.inputs, ["README.MARKDOWN"]);
    }

    #[test]
    fn test_no_input_parses_to_none() {
        let cli = parse(&["-t", "heros"]).expect("should parse");
        assert_eq!(cli.input, None);
    }

    // ── Errors and warnings ─────────────────────────────────────

    #[test]
    fn test_multiple_inputs_names_both() {
        match parse(&["a.md", "-y", "b.md"]) {
            Err(Error::MultipleInputs { first, second }) => {
                assert_eq!(first, "a.md");
                assert_eq!(second, "b.md");
            }
            other => panic!("expected MultipleInputs, got {other:?}"),
        }
    }

    #[test]
    fn test_multiple_inputs_message_mentions_both() {
        let err = parse(&["a.md", "b.md"]).expect_err("two inputs must fail");
        let message = err.to_string();
        assert!(message.contains("a.md") && message.contains("b.md"), "{message}");
    }

    #[test]
    fn test_unknown_flags_warn_and_continue() {
        let scanned = lenient(&["--bogus", "-x", "stray", "doc.md"]);
        assert_eq!(scanned.unknown, ["--bogus", "-x", "stray"]);
        let cli = scanned.into_cli().expect("unknown tokens are not fatal");
        assert_eq!(cli.input.as_deref(), Some("doc.md"));
    }

    #[test]
    fn test_unknown_flag_rejected_under_reject_policy() {
        let scanned = scan(&argv(&["--bogus", "doc.md"]), table(), UnknownArgPolicy::Reject);
        assert!(matches!(
            scanned.into_cli(),
            Err(Error::UnknownArgument(token)) if token == "--bogus"
        ));
    }

    #[test]
    fn test_strict_flag_upgrades_policy() {
        let scanned = lenient(&["--strict", "--bogus", "doc.md"]);
        assert_eq!(scanned.policy(), UnknownArgPolicy::Reject);
        assert!(matches!(scanned.into_cli(), Err(Error::UnknownArgument(_))));
    }

    #[test]
    fn test_unknown_short_cluster_commits_nothing() {
        let scanned = lenient(&["-yx", "doc.md"]);
        assert_eq!(scanned.unknown, ["-yx"]);
        let cli = scanned.into_cli().expect("should parse");
        assert!(!cli.yes, "a rejected cluster must not set any of its flags");
    }

    #[test]
    fn test_boolean_flag_with_inline_value_is_unknown() {
        let scanned = lenient(&["--yes=no", "doc.md"]);
        assert_eq!(scanned.unknown, ["--yes=no"]);
    }

    #[test]
    fn test_trailing_value_flag_is_missing_value() {
        assert!(matches!(
            parse(&["doc.md", "-o"]),
            Err(Error::MissingValue(flag)) if flag == "-o"
        ));
        assert!(matches!(
            parse(&["doc.md", "--theme"]),
            Err(Error::MissingValue(flag)) if flag == "--theme"
        ));
    }

    #[test]
    fn test_invalid_theme_is_invalid_argument() {
        match parse(&["-t", "comic", "doc.md"]) {
            Err(Error::InvalidArgument(message)) => {
                assert!(message.contains("comic"), "{message}");
                assert!(!message.starts_with("error:"), "{message}");
            }
            other => panic!("expected InvalidArgument, got {other:?}"),
        }
    }

    #[test]
    fn test_double_dash_accepts_non_markdown_input() {
        let scanned = lenient(&["--", "notes.txt"]);
        assert_eq!(scanned.inputs, ["notes.txt"]);
        assert!(scanned.unknown.is_empty());
        let cli = scanned.into_cli().expect("should parse");
        assert_eq!(cli.input.as_deref(), Some("notes.txt"));
    }

    #[test]
    fn test_non_markdown_before_double_dash_is_unknown() {
        let scanned = lenient(&["notes.txt"]);
        assert!(scanned.inputs.is_empty());
        assert_eq!(scanned.unknown, ["notes.txt"]);
    }

    #[test]
    fn test_double_dash_two_inputs_conflict() {
        let err = lenient(&["a.md", "--", "b.txt"]).into_cli().expect_err("two inputs");
        assert!(matches!(err, Error::MultipleInputs { .. }), "{err:?}");
    }

    #[test]
    fn test_collect_utf8_passes_plain_arguments() {
        let os = |s: &str| std::ffi::OsString::from(s);
        let raw = collect_utf8([os("-t"), os("heros"), os("doc.md")]).expect("all valid UTF-8");
        assert_eq!(raw, ["-t", "heros", "doc.md"]);
    }

    #[cfg(unix)]
    #[test]
    fn test_collect_utf8_rejects_invalid_bytes() {
        use std::ffi::OsString;
        use std::os::unix::ffi::OsStringExt;

        let bad = OsString::from_vec(vec![b'f', 0xff, b'.', b'm', b'd']);
        let err = collect_utf8([OsString::from("-y"), bad]).expect_err("invalid UTF-8");
        match err {
            Error::NonUtf8Argument(lossy) => assert!(lossy.ends_with(".md"), "{lossy}"),
            other => panic!("expected NonUtf8Argument, got {other:?}"),
        }
    }

    #[test]
    fn test_double_dash_makes_rest_positional() {
        let scanned = lenient(&["--", "-odd.md"]);
        assert_eq!(scanned.inputs, ["-odd.md"]);
        let cli = scanned.into_cli().expect("should parse");
        assert_eq!(cli.input.as_deref(), Some("-odd.md"));
    }
