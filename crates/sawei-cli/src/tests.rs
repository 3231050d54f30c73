use super::*;

#[test]
fn no_command_is_none() {
    let cli = Cli::try_parse_from(["sawei"]).expect("expected valid cli args");
    assert!(cli.command.is_none());
}

#[test]
fn parses_build_defaults() {
    let cli = Cli::try_parse_from(["sawei", "build"]).unwrap();
    assert!(matches!(
        cli.command,
        Some(Commands::Build {
            scrape_dir: None,
            export: None,
            output: None,
            report: None,
            dry_run: false,
        })
    ));
}

#[test]
fn parses_build_with_paths_and_dry_run() {
    let cli = Cli::try_parse_from([
        "sawei",
        "build",
        "--scrape-dir",
        "/data/scrape",
        "--report",
        "out/report.json",
        "--dry-run",
    ])
    .unwrap();
    assert!(matches!(
        cli.command,
        Some(Commands::Build {
            scrape_dir: Some(ref dir),
            report: Some(_),
            dry_run: true,
            ..
        }) if dir == &PathBuf::from("/data/scrape")
    ));
}

#[test]
fn parses_query_filters() {
    let cli = Cli::try_parse_from([
        "sawei",
        "query",
        "--category",
        "Equipement_de_levage",
        "--min-price",
        "100",
        "--max-price",
        "500.50",
        "--sort",
        "price-asc",
        "--locale",
        "en",
    ])
    .unwrap();
    match cli.command {
        Some(Commands::Query {
            category,
            min_price,
            max_price,
            sort,
            locale,
            limit,
            ..
        }) => {
            assert_eq!(category.as_deref(), Some("Equipement_de_levage"));
            assert_eq!(min_price, Some(Decimal::from(100)));
            assert_eq!(max_price, Some(Decimal::new(50050, 2)));
            assert_eq!(sort, SortBy::PriceAsc);
            assert_eq!(locale, Locale::En);
            assert_eq!(limit, 20);
        }
        other => panic!("expected query command, got {other:?}"),
    }
}

#[test]
fn query_defaults_to_price_desc_in_french() {
    let cli = Cli::try_parse_from(["sawei", "query"]).unwrap();
    assert!(matches!(
        cli.command,
        Some(Commands::Query {
            sort: SortBy::PriceDesc,
            locale: Locale::Fr,
            ..
        })
    ));
}

#[test]
fn rejects_unknown_sort() {
    assert!(Cli::try_parse_from(["sawei", "query", "--sort", "cheapest"]).is_err());
}

#[test]
fn parses_search_with_positional_query() {
    let cli = Cli::try_parse_from(["sawei", "search", "cric hydraulique", "--limit", "5"]).unwrap();
    assert!(matches!(
        cli.command,
        Some(Commands::Search { ref query, limit: 5, .. }) if query == "cric hydraulique"
    ));
}

#[test]
fn parses_quote_currency_case_insensitively() {
    let cli = Cli::try_parse_from(["sawei", "quote", "10428", "--currency", "xaf"]).unwrap();
    assert!(matches!(
        cli.command,
        Some(Commands::Quote {
            ref product_id,
            currency: Currency::Xaf,
            ..
        }) if product_id == "10428"
    ));
}

#[test]
fn quote_requires_product_id() {
    assert!(Cli::try_parse_from(["sawei", "quote"]).is_err());
}

#[test]
fn parses_stats_with_catalogue_override() {
    let cli = Cli::try_parse_from(["sawei", "stats", "--catalogue", "x.json"]).unwrap();
    assert!(matches!(
        cli.command,
        Some(Commands::Stats { catalogue: Some(_) })
    ));
}
