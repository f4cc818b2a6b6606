/// Failures raised while turning a scan result into a journey.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RoutingError {
    #[error("scanner result must not be empty")]
    EmptyScannerResult,
}
