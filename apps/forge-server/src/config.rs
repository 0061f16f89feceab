//! Application configuration loaded from environment variables.

use std::env;
use std::str::FromStr;
use std::time::Duration;

use forge_core::ports::RateLimitPolicy;
use forge_core::rate_limit::{CONTACT_POLICY, NEWSLETTER_POLICY};
use forge_infra::{JwtConfig, LoginThrottleConfig, MailConfig, MediaConfig};

#[cfg(feature = "postgres")]
use forge_infra::DatabaseConfig;
#[cfg(feature = "redis")]
use forge_infra::RedisRateLimitConfig;

/// Parse `key`, falling back to `default` when unset or malformed.
fn env_or<T: FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}

fn env_non_empty(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}

/// Fixed-window policies for the public forms, plus the sweep schedule.
#[derive(Debug, Clone)]
pub struct RateLimitSettings {
    pub contact: RateLimitPolicy,
    pub newsletter: RateLimitPolicy,
    /// Six-field cron expression for the stale entry sweep.
    pub sweep_cron: String,
}

impl Default for RateLimitSettings {
    fn default() -> Self {
        Self {
            contact: CONTACT_POLICY,
            newsletter: NEWSLETTER_POLICY,
            sweep_cron: "0 */10 * * * *".to_string(),
        }
    }
}

/// Build a policy from raw `*_MAX` / `*_WINDOW_SECS` values.
///
/// Unparseable values and a zero window keep the default.
fn policy_from(max: Option<String>, window_secs: Option<String>, default: RateLimitPolicy) -> RateLimitPolicy {
    let max_requests = max
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default.max_requests);
    let window = window_secs
        .and_then(|v| v.trim().parse::<u64>().ok())
        .filter(|secs| *secs > 0)
        .map(Duration::from_secs)
        .unwrap_or(default.window);
    RateLimitPolicy::new(max_requests, window)
}

impl RateLimitSettings {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            contact: policy_from(
                env::var("CONTACT_RATE_LIMIT_MAX").ok(),
                env::var("CONTACT_RATE_LIMIT_WINDOW_SECS").ok(),
                defaults.contact,
            ),
            newsletter: policy_from(
                env::var("NEWSLETTER_RATE_LIMIT_MAX").ok(),
                env::var("NEWSLETTER_RATE_LIMIT_WINDOW_SECS").ok(),
                defaults.newsletter,
            ),
            sweep_cron: env_non_empty("RATE_LIMIT_SWEEP_CRON").unwrap_or(defaults.sweep_cron),
        }
    }

    /// Entries older than this cannot affect any decision and may be dropped.
    pub fn longest_window(&self) -> Duration {
        self.contact.window.max(self.newsletter.window)
    }
}

/// Credentials of the admin account created on first start.
#[derive(Clone)]
pub struct AdminSeed {
    pub email: String,
    pub password: String,
}

impl std::fmt::Debug for AdminSeed {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminSeed")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    #[cfg(feature = "postgres")]
    pub database: Option<DatabaseConfig>,
    /// Set when `REDIS_URL` is present.
    #[cfg(feature = "redis")]
    pub redis: Option<RedisRateLimitConfig>,
    pub jwt: JwtConfig,
    pub rate_limits: RateLimitSettings,
    pub login_throttle: LoginThrottleConfig,
    pub media: MediaConfig,
    pub mail: MailConfig,
    /// Inbox that receives contact form notifications.
    pub contact_notify_email: Option<String>,
    pub admin_seed: Option<AdminSeed>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            #[cfg(feature = "postgres")]
            database: None,
            #[cfg(feature = "redis")]
            redis: None,
            jwt: JwtConfig::default(),
            rate_limits: RateLimitSettings::default(),
            login_throttle: LoginThrottleConfig::default(),
            media: MediaConfig::default(),
            mail: MailConfig::default(),
            contact_notify_email: None,
            admin_seed: None,
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let admin_seed = match (env_non_empty("ADMIN_EMAIL"), env_non_empty("ADMIN_PASSWORD")) {
            (Some(email), Some(password)) => Some(AdminSeed { email, password }),
            _ => None,
        };

        Self {
            host: env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: env_or("PORT", 8080),
            #[cfg(feature = "postgres")]
            database: DatabaseConfig::from_env(),
            #[cfg(feature = "redis")]
            redis: env_non_empty("REDIS_URL").map(|_| RedisRateLimitConfig::from_env()),
            jwt: JwtConfig::from_env(),
            rate_limits: RateLimitSettings::from_env(),
            login_throttle: LoginThrottleConfig::from_env(),
            media: MediaConfig::from_env(),
            mail: MailConfig::from_env(),
            contact_notify_email: env_non_empty("CONTACT_NOTIFY_EMAIL"),
            admin_seed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_policies() {
        let settings = RateLimitSettings::default();
        assert_eq!(settings.contact.max_requests, 5);
        assert_eq!(settings.contact.window, Duration::from_secs(900));
        assert_eq!(settings.newsletter.max_requests, 3);
        assert_eq!(settings.longest_window(), Duration::from_secs(3600));
    }

    #[test]
    fn test_zero_window_keeps_default() {
        let policy = policy_from(Some("8".to_string()), Some("0".to_string()), CONTACT_POLICY);
        assert_eq!(policy.max_requests, 8);
        assert_eq!(policy.window, CONTACT_POLICY.window);

        let policy = policy_from(None, Some(" 60 ".to_string()), NEWSLETTER_POLICY);
        assert_eq!(policy.max_requests, NEWSLETTER_POLICY.max_requests);
        assert_eq!(policy.window, Duration::from_secs(60));
    }

    #[test]
    fn test_admin_seed_debug_hides_password() {
        let seed = AdminSeed {
            email: "admin@example.com".to_string(),
            password: "hunter22".to_string(),
        };
        let printed = format!("{seed:?}");
        assert!(printed.contains("admin@example.com"));
        assert!(!printed.contains("hunter22"));
    }
}
