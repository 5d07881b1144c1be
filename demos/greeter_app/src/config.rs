// greeter_app/src/config.rs

use std::env;

#[derive(Debug, Clone)]
pub struct AppConfig {
  /// Name of the visitor to greet on startup.
  pub visitor_name: String,
  /// Whether the demo also exercises the validation-only probe run.
  pub run_probe: bool,
}

impl AppConfig {
  pub fn from_env() -> anyhow::Result<Self> {
    let visitor_name = env::var("GREETER_VISITOR").unwrap_or_else(|_| "Ben".to_string());
    let run_probe = env::var("GREETER_RUN_PROBE")
      .unwrap_or_else(|_| "true".to_string())
      .parse::<bool>()
      .map_err(|e| anyhow::anyhow!("Invalid GREETER_RUN_PROBE value: {e}"))?;

    tracing::info!("Application configuration loaded.");
    Ok(Self { visitor_name, run_probe })
  }
}
