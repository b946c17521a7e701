use crate::messages::HealthRes;

/// Simple health service shared by the REST server and the runner
///
/// This service provides a standardised way to check the health status of the clinic system.
#[derive(Clone, Debug, Default)]
pub struct HealthService;

impl HealthService {
    /// Check health without creating an instance
    ///
    /// # Arguments
    /// * `clinic_name` - Display name of the clinic, echoed in the message.
    ///
    /// # Returns
    /// A `HealthRes` indicating the service is healthy.
    pub fn check_health(clinic_name: &str) -> HealthRes {
        HealthRes {
            ok: true,
            message: format!("{clinic_name} is alive"),
        }
    }
}
