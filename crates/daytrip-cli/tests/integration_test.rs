//! Integration tests comparing CLI output with the core Display impls
//!
//! In plain mode the CLI prints the same markdown the MCP server returns, so
//! checking it against the core `Display` output covers both interfaces.

use std::{path::Path, process::Command};

use daytrip_core::{
    Categories, Planner, PlannerBuilder, Taxonomy,
    gateway::Catalog,
    params::{BuildTrip, Id, ListPlans, SearchPlaces, WeatherQuery},
};
use tempfile::TempDir;

const CATALOG: &str = r#"{
    "locations": [
        { "query": "Bruges", "lat": 51.2089, "lon": 3.2242, "formatted_address": "Markt, 8000 Bruges" }
    ],
    "places": [
        { "id": "belfry", "name": "Belfort", "lat": 51.2085, "lon": 3.2245,
          "categories": ["tourism.sights"] },
        { "id": "groeninge", "name": "Groeningemuseum", "lat": 51.2053, "lon": 3.2271,
          "categories": ["entertainment.museum"] },
        { "id": "minnewater", "name": "Minnewater", "lat": 51.2005, "lon": 3.2254,
          "categories": ["leisure.park"] }
    ],
    "weather": [
        { "date": "2026-07-11", "temperature_c": 27.0, "uv_index": 8.0,
          "conditions": "sunny", "precipitation_likely": false }
    ]
}"#;

/// Helper function to create a test planner sharing the CLI's database
async fn create_test_planner() -> (Planner, TempDir) {
    let temp_dir = TempDir::new().expect("Failed to create temporary directory");
    std::fs::write(temp_dir.path().join("catalog.json"), CATALOG)
        .expect("Failed to write catalog");

    let planner = PlannerBuilder::new()
        .with_database_path(Some(temp_dir.path().join("test.db")))
        .with_catalog(
            Catalog::from_path(temp_dir.path().join("catalog.json"))
                .expect("Failed to load catalog"),
        )
        .build()
        .await
        .expect("Failed to create planner");

    (planner, temp_dir)
}

/// Run a CLI command and capture its output
fn run_cli_command(dir: &Path, args: &[&str]) -> String {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_dt"));
    cmd.env_remove("DAYTRIP_USER")
        .arg("--no-color")
        .arg("--database-file")
        .arg(dir.join("test.db"))
        .arg("--catalog")
        .arg(dir.join("catalog.json"))
        .args(["--user", "ana"])
        .args(args);

    let output = cmd.output().expect("Failed to run CLI command");
    assert!(
        output.status.success(),
        "CLI failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8(output.stdout).expect("Invalid UTF-8 in CLI output")
}

fn trip() -> BuildTrip {
    BuildTrip {
        search: SearchPlaces {
            user_id: "ana".to_string(),
            location: "Bruges".to_string(),
            date: "2026-07-11".to_string(),
            ..Default::default()
        },
        name: "Summer Saturday".to_string(),
        start_time: "09:30".to_string(),
        save: true,
        ..Default::default()
    }
}

#[tokio::test]
async fn test_show_plan_consistency() {
    let (planner, temp_dir) = create_test_planner().await;

    let draft = planner.plan_trip(&trip()).await.expect("Failed to build trip");
    let id = draft.plan.id.expect("Plan should be saved");

    let plan = planner.show_plan(&Id { id }).await.unwrap();
    let cli_output = run_cli_command(temp_dir.path(), &["plan", "show", &id.to_string()]);

    assert_eq!(cli_output, plan.to_string());
    assert!(cli_output.contains("Groeningemuseum"));
}

#[tokio::test]
async fn test_list_plans_consistency() {
    let (planner, temp_dir) = create_test_planner().await;
    planner.plan_trip(&trip()).await.unwrap();

    let summaries = planner
        .list_plans(&ListPlans {
            user_id: "ana".to_string(),
        })
        .await
        .unwrap();
    let cli_output = run_cli_command(temp_dir.path(), &["plan", "list"]);

    assert_eq!(cli_output, format!("# Plans for ana\n\n{summaries}"));
}

#[tokio::test]
async fn test_empty_list_consistency() {
    let (_planner, temp_dir) = create_test_planner().await;

    let cli_output = run_cli_command(temp_dir.path(), &["plan", "list"]);
    assert_eq!(cli_output, "# Plans for ana\n\nNo plans found.\n");
}

#[tokio::test]
async fn test_search_and_advice_consistency() {
    let (planner, temp_dir) = create_test_planner().await;

    let results = planner
        .search(&trip().search)
        .await
        .expect("Search failed");
    let cli_output = run_cli_command(
        temp_dir.path(),
        &["trip", "search", "Bruges", "--date", "2026-07-11"],
    );
    assert_eq!(cli_output, results.to_string());
    // hot dry day favours the park
    assert_eq!(results.places[0].place.id, "minnewater");

    let advice = planner
        .weather_advice(&WeatherQuery {
            location: "Bruges".to_string(),
            date: "2026-07-11".to_string(),
        })
        .await
        .unwrap();
    let cli_output = run_cli_command(
        temp_dir.path(),
        &["advise", "Bruges", "--date", "2026-07-11"],
    );
    assert_eq!(cli_output, advice.to_string());
    assert!(cli_output.contains("stay hydrated"));
}

#[test]
fn test_categories_consistency() {
    let temp_dir = TempDir::new().unwrap();
    std::fs::write(temp_dir.path().join("catalog.json"), CATALOG).unwrap();

    let cli_output = run_cli_command(temp_dir.path(), &["categories"]);
    assert_eq!(cli_output, Categories(&Taxonomy::standard()).to_string());
}
