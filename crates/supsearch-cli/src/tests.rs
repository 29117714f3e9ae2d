use super::*;

#[test]
fn parses_search_with_defaults() {
    let cli = Cli::try_parse_from(["supsearch", "search", "steel", "bolt"])
        .expect("expected valid cli args");
    assert!(cli.base_url.is_none());
    assert!(matches!(
        cli.command,
        Commands::Search { ref query, ref sort, format: OutputFormat::Table }
            if query == &["steel", "bolt"] && sort.is_empty()
    ));
}

#[test]
fn repeated_sort_flags_keep_order() {
    let cli = Cli::try_parse_from([
        "supsearch", "search", "bolt", "--sort", "price", "--sort", "price", "--sort", "name",
    ])
    .unwrap();
    let Commands::Search { sort, .. } = cli.command else {
        panic!("expected search command");
    };
    assert_eq!(sort, [SortArg::Price, SortArg::Price, SortArg::Name]);

    let state = sort
        .into_iter()
        .map(SortKey::from)
        .fold(supsearch_rank::SortState::default(), supsearch_rank::SortState::selected);
    assert_eq!(state.field, Some(SortKey::Name));
    assert_eq!(state.direction, supsearch_rank::SortDirection::Ascending);
}

#[test]
fn double_sort_flag_is_descending() {
    let cli = Cli::try_parse_from(["supsearch", "search", "bolt", "--sort", "rating", "--sort", "rating"])
        .unwrap();
    let Commands::Search { sort, .. } = cli.command else {
        panic!("expected search command");
    };
    let state = sort
        .into_iter()
        .map(SortKey::from)
        .fold(supsearch_rank::SortState::default(), supsearch_rank::SortState::selected);
    assert_eq!(state.label(), "rating ▼");
}

#[test]
fn unknown_sort_column_is_rejected() {
    assert!(Cli::try_parse_from(["supsearch", "search", "bolt", "--sort", "orders"]).is_err());
}

#[test]
fn format_and_base_url_flags() {
    let cli = Cli::try_parse_from([
        "supsearch",
        "search",
        "bolt",
        "--format",
        "json",
        "--base-url",
        "http://127.0.0.1:9000/api/v1/suppliers",
    ])
    .unwrap();
    assert_eq!(
        cli.base_url.as_deref(),
        Some("http://127.0.0.1:9000/api/v1/suppliers")
    );
    assert!(matches!(
        cli.command,
        Commands::Search {
            format: OutputFormat::Json,
            ..
        }
    ));
}

#[test]
fn search_without_query_parses() {
    // Blank queries are rejected by the session, not by argument parsing.
    let cli = Cli::try_parse_from(["supsearch", "search"]).unwrap();
    assert!(matches!(cli.command, Commands::Search { ref query, .. } if query.is_empty()));
}

#[test]
fn parses_shell_command() {
    let cli = Cli::try_parse_from(["supsearch", "shell", "--format", "cards"]).unwrap();
    assert!(matches!(
        cli.command,
        Commands::Shell {
            format: OutputFormat::Cards
        }
    ));
}

#[test]
fn subcommand_is_required() {
    assert!(Cli::try_parse_from(["supsearch"]).is_err());
}
