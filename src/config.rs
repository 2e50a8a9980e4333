use posts::Locale;
use prismic::PrismicConfig;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),
    #[error("invalid value for {name}: {message}")]
    InvalidValue { name: String, message: String },
}

/// Upper bound for the regeneration intervals (one year).
pub const MAX_REVALIDATE_SECS: u64 = 60 * 60 * 24 * 365;

/// Runtime configuration, read once at startup and passed down explicitly.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub prismic: PrismicConfig,
    pub locale: Locale,
    /// 1 in the default setup, so pagination shows up with few posts.
    pub home_page_size: usize,
    pub static_paths_page_size: usize,
    pub home_revalidate_secs: u64,
    pub post_revalidate_secs: u64,
    pub port: u16,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let endpoint = get("PRISMIC_API_ENDPOINT")
            .ok_or_else(|| ConfigError::MissingEnvVar("PRISMIC_API_ENDPOINT".to_string()))?;

        let locale = match get("BLOG_LOCALE") {
            Some(raw) => {
                raw.parse::<Locale>()
                    .map_err(|e: anyhow::Error| ConfigError::InvalidValue {
                        name: "BLOG_LOCALE".to_string(),
                        message: e.to_string(),
                    })?
            }
            None => Locale::PtBr,
        };

        Ok(Self {
            prismic: PrismicConfig {
                endpoint: endpoint.trim_end_matches('/').to_string(),
                access_token: get("PRISMIC_ACCESS_TOKEN"),
            },
            locale,
            home_page_size: parse_or(&get, "HOME_PAGE_SIZE", 1)?,
            static_paths_page_size: parse_or(&get, "STATIC_PATHS_PAGE_SIZE", 2)?,
            home_revalidate_secs: revalidate_secs(&get, "HOME_REVALIDATE_SECS", 60)?,
            post_revalidate_secs: revalidate_secs(&get, "POST_REVALIDATE_SECS", 60 * 5)?,
            port: parse_or(&get, "PORT", 3000)?,
        })
    }
}

fn parse_or<T, G>(get: &G, key: &str, default: T) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
    G: Fn(&str) -> Option<String>,
{
    match get(key) {
        None => Ok(default),
        Some(raw) => raw.trim().parse().map_err(|e: T::Err| ConfigError::InvalidValue {
            name: key.to_string(),
            message: format!("{} ({})", e, raw),
        }),
    }
}

fn revalidate_secs<G>(get: &G, key: &str, default: u64) -> Result<u64, ConfigError>
where
    G: Fn(&str) -> Option<String>,
{
    let secs = parse_or(get, key, default)?;
    if secs > MAX_REVALIDATE_SECS {
        return Err(ConfigError::InvalidValue {
            name: key.to_string(),
            message: format!("{} exceeds {}", secs, MAX_REVALIDATE_SECS),
        });
    }
    Ok(secs)
}
