//! Service configuration from environment variables

use anyhow::Result;

/// Default geofence radius in kilometers
pub const DEFAULT_ALLOWED_RADIUS_KM: f64 = 0.1;

/// Attendance service configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Address the HTTP server binds to
    pub bind_addr: String,
    /// Geofence radius in kilometers within which a check-in counts as present
    pub allowed_radius_km: f64,
}

impl AppConfig {
    /// Create a new AppConfig from environment variables
    ///
    /// # Environment Variables
    /// - `ATTENDANCE_BIND_ADDR`: listen address (default: 0.0.0.0:3000)
    /// - `ATTENDANCE_ALLOWED_RADIUS_KM`: geofence radius in km (default: 0.1)
    pub fn from_env() -> Result<Self> {
        let bind_addr =
            std::env::var("ATTENDANCE_BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".to_string());

        let allowed_radius_km = match std::env::var("ATTENDANCE_ALLOWED_RADIUS_KM") {
            Ok(raw) => {
                let parsed: f64 = raw.parse().map_err(|_| {
                    anyhow::anyhow!("ATTENDANCE_ALLOWED_RADIUS_KM must be a number, got {raw:?}")
                })?;
                if parsed <= 0.0 {
                    anyhow::bail!("ATTENDANCE_ALLOWED_RADIUS_KM must be positive");
                }
                parsed
            }
            Err(_) => DEFAULT_ALLOWED_RADIUS_KM,
        };

        Ok(AppConfig {
            bind_addr,
            allowed_radius_km,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn test_app_config_defaults() {
        unsafe {
            std::env::remove_var("ATTENDANCE_BIND_ADDR");
            std::env::remove_var("ATTENDANCE_ALLOWED_RADIUS_KM");
        }

        let config = AppConfig::from_env().unwrap();
        assert_eq!(config.bind_addr, "0.0.0.0:3000");
        assert_eq!(config.allowed_radius_km, DEFAULT_ALLOWED_RADIUS_KM);
    }

    #[test]
    #[serial]
    fn test_app_config_custom_radius() {
        unsafe {
            std::env::set_var("ATTENDANCE_ALLOWED_RADIUS_KM", "0.25");
        }

        let config = AppConfig::from_env().unwrap();
        assert_eq!(config.allowed_radius_km, 0.25);

        unsafe {
            std::env::remove_var("ATTENDANCE_ALLOWED_RADIUS_KM");
        }
    }

    #[test]
    #[serial]
    fn test_app_config_rejects_bad_radius() {
        unsafe {
            std::env::set_var("ATTENDANCE_ALLOWED_RADIUS_KM", "not-a-number");
        }
        assert!(AppConfig::from_env().is_err());

        unsafe {
            std::env::set_var("ATTENDANCE_ALLOWED_RADIUS_KM", "-1");
        }
        assert!(AppConfig::from_env().is_err());

        unsafe {
            std::env::remove_var("ATTENDANCE_ALLOWED_RADIUS_KM");
        }
    }
}
