use crate::wire::HealthRes;

/// Health check shared by every TumorScope HTTP surface.
#[derive(Clone, Default)]
pub struct HealthService;

impl HealthService {
    pub fn new() -> Self {
        Self
    }

    /// Returns a `HealthRes` indicating the service is healthy.
    pub fn check_health() -> HealthRes {
        HealthRes {
            ok: true,
            message: "TumorScope is alive".into(),
        }
    }
}
