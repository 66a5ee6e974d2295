//! Configuration management for the Lector server

use std::env;

#[derive(Debug, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub cors: CorsConfig,
    pub ocr: OcrConfig,
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
}

#[derive(Debug, Clone)]
pub struct CorsConfig {
    /// Origin allowed to call the API; unset means permissive (dev)
    pub allowed_origin: Option<String>,
}

#[derive(Debug, Clone)]
pub struct OcrConfig {
    /// Tesseract language code
    pub language: String,
    /// Rasterization resolution for scanned pages
    pub dpi: f32,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 8000,
            },
            database: DatabaseConfig {
                url: "sqlite:./lector.db".to_string(),
            },
            cors: CorsConfig {
                allowed_origin: None,
            },
            ocr: OcrConfig {
                language: "eng".to_string(),
                dpi: 150.0,
            },
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Config {
            server: ServerConfig {
                host: env::var("SERVER_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
                port: env::var("SERVER_PORT")
                    .unwrap_or_else(|_| "8000".to_string())
                    .parse()
                    .unwrap_or(8000),
            },
            database: DatabaseConfig {
                url: env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite:./lector.db".to_string()),
            },
            cors: CorsConfig {
                allowed_origin: env::var("CLIENT_URL").ok().filter(|s| !s.is_empty()),
            },
            ocr: OcrConfig {
                language: env::var("OCR_LANGUAGE").unwrap_or_else(|_| "eng".to_string()),
                dpi: env::var("OCR_DPI")
                    .unwrap_or_else(|_| "150".to_string())
                    .parse()
                    .unwrap_or(150.0),
            },
        }
    }
}
