//! The application's pipeline configurations, authored once and shared by
//! every invocation.

use aqueduct::{PipeConfiguration, RequiredInputValidator};

use crate::use_cases::greet::{GreetInteractor, NameChecker};

/// The full greet pipeline: required-input validation forced to the front,
/// then the name checker, then the interactor, with trace marks around the
/// whole run.
pub fn default_configuration() -> Vec<PipeConfiguration> {
  vec![
    PipeConfiguration::inserted::<RequiredInputValidator>().with_pre_hook(|| async {
      tracing::info!("pipeline starting");
    }),
    PipeConfiguration::new::<NameChecker>(),
    PipeConfiguration::new::<GreetInteractor>().with_post_hook(|| async {
      tracing::info!("pipeline finished");
    }),
  ]
}

/// Runs the checks only, leaving the interactor out. Useful for probing
/// whether a request would succeed without performing it.
pub fn validation_only_configuration() -> Vec<PipeConfiguration> {
  vec![
    PipeConfiguration::inserted::<RequiredInputValidator>(),
    PipeConfiguration::new::<NameChecker>(),
  ]
}
