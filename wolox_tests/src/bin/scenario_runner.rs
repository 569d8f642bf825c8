//! Scenario runner.
//!
//! Runs every built-in editor scenario headlessly, prints a summary, and
//! writes a JSON report to the directory given as the first argument
//! (default `test-reports`). Exits non-zero if any scenario fails.

use std::path::PathBuf;
use std::time::Instant;

use anyhow::Context;
use serde_json::json;
use tracing::info;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()),
        )
        .init();

    let output_dir = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("test-reports"));
    std::fs::create_dir_all(&output_dir)
        .with_context(|| format!("create {}", output_dir.display()))?;

    println!("wolox scenario runner");
    println!("=====================\n");

    let mut results = Vec::new();
    let mut failed = 0;
    for scenario in wolox_tests::scenarios() {
        let start = Instant::now();
        let outcome = (scenario.run)();
        let duration = start.elapsed();

        match &outcome {
            Ok(()) => println!("PASS {} {}", scenario.id, scenario.description),
            Err(e) => {
                failed += 1;
                println!("FAIL {} {}\n     {}", scenario.id, scenario.description, e);
            }
        }

        results.push(json!({
            "id": scenario.id,
            "description": scenario.description,
            "passed": outcome.is_ok(),
            "error": outcome.err(),
            "duration_us": duration.as_micros() as u64,
        }));
    }

    let total = results.len();
    println!("\nTotal: {total}  Passed: {}  Failed: {failed}", total - failed);

    let report_path = output_dir.join("scenarios.json");
    let report = json!({ "total": total, "failed": failed, "results": results });
    std::fs::write(&report_path, serde_json::to_string_pretty(&report)?)
        .with_context(|| format!("write {}", report_path.display()))?;
    info!(path = %report_path.display(), "Report saved");
    println!("Report saved to {}", report_path.display());

    if failed > 0 {
        std::process::exit(1);
    }
    Ok(())
}
