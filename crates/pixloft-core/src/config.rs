//! Configuration module
//!
//! This module provides configuration structures for the proxy, the store
//! client, and the gallery flows. Everything is read from the environment;
//! there are no config files.

use std::env;
use std::path::PathBuf;

// Common constants
const DEFAULT_PORT: u16 = 5000;
const DEFAULT_MAX_IMAGE_SIZE_MB: usize = 5;
const DEFAULT_GALLERY_PAGE_SIZE: usize = 9;
const DEFAULT_POSTS_PAGE_SIZE: usize = 10;
const DEFAULT_CACHE_PATH: &str = ".pixloft/gallery_cache.json";

/// Connection settings for the external media store.
#[derive(Clone, Debug)]
pub struct StoreSettings {
    pub endpoint: String,
    pub project_id: String,
    pub api_key: Option<String>,
    pub bucket_id: String,
    pub database_id: String,
    pub media_collection_id: String,
    pub posts_collection_id: String,
}

/// Settings for the image proxy server.
#[derive(Clone, Debug)]
pub struct ProxySettings {
    pub server_port: u16,
    pub cors_origins: Vec<String>,
    /// Base URL under which the proxy is reachable; share links are built
    /// from it.
    pub public_base_url: String,
}

/// Settings for the gallery flows (pagination, upload limits, cache).
#[derive(Clone, Debug)]
pub struct GallerySettings {
    pub page_size: usize,
    pub posts_page_size: usize,
    pub max_image_size_bytes: usize,
    pub cache_path: PathBuf,
}

#[derive(Clone, Debug)]
pub struct AppSettings {
    pub store: StoreSettings,
    pub proxy: ProxySettings,
    pub gallery: GallerySettings,
    pub environment: String,
}

/// Application configuration.
#[derive(Clone, Debug)]
pub struct Config(pub Box<AppSettings>);

impl Config {
    fn settings(&self) -> &AppSettings {
        &self.0
    }

    /// Check if the application is running in production mode
    pub fn is_production(&self) -> bool {
        let env = self.settings().environment.to_lowercase();
        env == "production" || env == "prod"
    }

    pub fn from_env() -> Result<Self, anyhow::Error> {
        let settings = AppSettings::from_env()?;
        Ok(Config(Box::new(settings)))
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        self.settings().validate()
    }

    // Convenience getters for common fields
    pub fn store(&self) -> &StoreSettings {
        &self.settings().store
    }

    pub fn server_port(&self) -> u16 {
        self.settings().proxy.server_port
    }

    pub fn cors_origins(&self) -> &[String] {
        &self.settings().proxy.cors_origins
    }

    pub fn public_base_url(&self) -> &str {
        &self.settings().proxy.public_base_url
    }

    pub fn page_size(&self) -> usize {
        self.settings().gallery.page_size
    }

    pub fn posts_page_size(&self) -> usize {
        self.settings().gallery.posts_page_size
    }

    pub fn max_image_size_bytes(&self) -> usize {
        self.settings().gallery.max_image_size_bytes
    }

    pub fn cache_path(&self) -> &PathBuf {
        &self.settings().gallery.cache_path
    }

    pub fn environment(&self) -> &str {
        &self.settings().environment
    }
}

impl AppSettings {
    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();

        let environment = env::var("ENVIRONMENT")
            .or_else(|_| env::var("APP_ENV"))
            .unwrap_or_else(|_| "development".to_string());

        let cors_origins_str = env::var("CORS_ORIGINS").unwrap_or_else(|_| "*".to_string());
        let is_production =
            environment.to_lowercase() == "production" || environment.to_lowercase() == "prod";
        if is_production && cors_origins_str.trim() == "*" {
            return Err(anyhow::anyhow!(
                "CORS_ORIGINS cannot be '*' in production. Please specify explicit origins."
            ));
        }

        let cors_origins: Vec<String> = cors_origins_str
            .split(',')
            .map(|s| s.trim().to_string())
            .collect();

        let server_port: u16 = env::var("PORT")
            .unwrap_or_else(|_| DEFAULT_PORT.to_string())
            .parse()
            .map_err(|_| anyhow::anyhow!("PORT must be a valid number"))?;

        let max_image_size_mb = env::var("MAX_IMAGE_SIZE_MB")
            .unwrap_or_else(|_| DEFAULT_MAX_IMAGE_SIZE_MB.to_string())
            .parse::<usize>()
            .unwrap_or(DEFAULT_MAX_IMAGE_SIZE_MB);

        let store = StoreSettings {
            endpoint: env::var("STORE_ENDPOINT")
                .map_err(|_| anyhow::anyhow!("STORE_ENDPOINT must be set"))?
                .trim_end_matches('/')
                .to_string(),
            project_id: env::var("STORE_PROJECT_ID")
                .map_err(|_| anyhow::anyhow!("STORE_PROJECT_ID must be set"))?,
            api_key: env::var("STORE_API_KEY").ok().filter(|s| !s.is_empty()),
            bucket_id: env::var("STORE_BUCKET_ID")
                .map_err(|_| anyhow::anyhow!("STORE_BUCKET_ID must be set"))?,
            database_id: env::var("STORE_DATABASE_ID")
                .map_err(|_| anyhow::anyhow!("STORE_DATABASE_ID must be set"))?,
            media_collection_id: env::var("STORE_MEDIA_COLLECTION_ID")
                .map_err(|_| anyhow::anyhow!("STORE_MEDIA_COLLECTION_ID must be set"))?,
            posts_collection_id: env::var("STORE_POSTS_COLLECTION_ID")
                .map_err(|_| anyhow::anyhow!("STORE_POSTS_COLLECTION_ID must be set"))?,
        };

        let proxy = ProxySettings {
            server_port,
            cors_origins,
            public_base_url: env::var("PUBLIC_BASE_URL")
                .unwrap_or_else(|_| format!("http://localhost:{}", server_port))
                .trim_end_matches('/')
                .to_string(),
        };

        let gallery = GallerySettings {
            page_size: env::var("GALLERY_PAGE_SIZE")
                .unwrap_or_else(|_| DEFAULT_GALLERY_PAGE_SIZE.to_string())
                .parse()
                .unwrap_or(DEFAULT_GALLERY_PAGE_SIZE),
            posts_page_size: env::var("POSTS_PAGE_SIZE")
                .unwrap_or_else(|_| DEFAULT_POSTS_PAGE_SIZE.to_string())
                .parse()
                .unwrap_or(DEFAULT_POSTS_PAGE_SIZE),
            max_image_size_bytes: max_image_size_mb * 1024 * 1024,
            cache_path: env::var("GALLERY_CACHE_PATH")
                .unwrap_or_else(|_| DEFAULT_CACHE_PATH.to_string())
                .into(),
        };

        let settings = AppSettings {
            store,
            proxy,
            gallery,
            environment,
        };

        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        if !self.store.endpoint.starts_with("http://") && !self.store.endpoint.starts_with("https://")
        {
            return Err(anyhow::anyhow!(
                "STORE_ENDPOINT must be an http(s) URL, got '{}'",
                self.store.endpoint
            ));
        }

        for (name, value) in [
            ("STORE_PROJECT_ID", &self.store.project_id),
            ("STORE_BUCKET_ID", &self.store.bucket_id),
            ("STORE_DATABASE_ID", &self.store.database_id),
            ("STORE_MEDIA_COLLECTION_ID", &self.store.media_collection_id),
            ("STORE_POSTS_COLLECTION_ID", &self.store.posts_collection_id),
        ] {
            if value.trim().is_empty() {
                return Err(anyhow::anyhow!("{} must not be empty", name));
            }
        }

        if self.gallery.page_size == 0 {
            return Err(anyhow::anyhow!("GALLERY_PAGE_SIZE must be at least 1"));
        }

        if self.gallery.posts_page_size == 0 {
            return Err(anyhow::anyhow!("POSTS_PAGE_SIZE must be at least 1"));
        }

        if self.gallery.max_image_size_bytes == 0 {
            return Err(anyhow::anyhow!("MAX_IMAGE_SIZE_MB must be at least 1"));
        }

        Ok(())
    }
}
