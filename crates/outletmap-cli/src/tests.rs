use super::*;

#[test]
fn no_command_is_none() {
    let cli = Cli::try_parse_from(["outletmap-cli"]).expect("expected valid cli args");
    assert!(cli.command.is_none());
}

#[test]
fn parses_outlets_command() {
    let cli = Cli::try_parse_from(["outletmap-cli", "outlets"]).expect("expected valid cli args");
    assert!(matches!(cli.command, Some(Commands::Outlets)));
}

#[test]
fn parses_nearby_with_default_radius() {
    let cli = Cli::try_parse_from(["outletmap-cli", "nearby", "Subway Mid Valley"]).unwrap();
    assert!(matches!(
        cli.command,
        Some(Commands::Nearby { ref name, radius: None }) if name == "Subway Mid Valley"
    ));
}

#[test]
fn parses_nearby_with_radius() {
    let cli =
        Cli::try_parse_from(["outletmap-cli", "nearby", "Subway KLCC", "--radius", "1500"]).unwrap();
    match cli.command {
        Some(Commands::Nearby { name, radius }) => {
            assert_eq!(name, "Subway KLCC");
            assert!((radius.unwrap() - 1500.0).abs() < f64::EPSILON);
        }
        other => panic!("expected nearby, got {other:?}"),
    }
}

#[test]
fn nearby_requires_a_name() {
    assert!(Cli::try_parse_from(["outletmap-cli", "nearby"]).is_err());
}

#[test]
fn parses_search_with_empty_query() {
    let cli = Cli::try_parse_from(["outletmap-cli", "search", ""]).unwrap();
    assert!(matches!(
        cli.command,
        Some(Commands::Search { ref query }) if query.is_empty()
    ));
}

#[test]
fn parses_geojson_options() {
    let cli = Cli::try_parse_from([
        "outletmap-cli",
        "geojson",
        "--search",
        "Bangsar",
        "--nearby",
        "Subway Bangsar",
        "--output",
        "markers.geojson",
    ])
    .unwrap();
    match cli.command {
        Some(Commands::Geojson {
            search,
            nearby,
            output,
        }) => {
            assert_eq!(search.as_deref(), Some("Bangsar"));
            assert_eq!(nearby.as_deref(), Some("Subway Bangsar"));
            assert_eq!(output, Some(PathBuf::from("markers.geojson")));
        }
        other => panic!("expected geojson, got {other:?}"),
    }
}

#[test]
fn parses_shell_command() {
    let cli = Cli::try_parse_from(["outletmap-cli", "shell"]).unwrap();
    assert!(matches!(cli.command, Some(Commands::Shell)));
}

#[test]
fn base_url_flag_is_global() {
    let cli = Cli::try_parse_from([
        "outletmap-cli",
        "outlets",
        "--base-url",
        "http://localhost:9000/api",
    ])
    .unwrap();
    assert_eq!(cli.base_url.as_deref(), Some("http://localhost:9000/api"));
}

#[test]
fn base_url_is_unset_without_the_flag() {
    let cli = Cli::try_parse_from(["outletmap-cli", "outlets"]).unwrap();
    assert!(cli.base_url.is_none());
}
