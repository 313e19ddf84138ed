use anyhow::{Context, Result};
use registration::PaymentConfig;
use registration::payment::DEFAULT_QR_ENDPOINT;
use registration::upload::CloudinaryConfig;

const DEFAULT_CLOUDINARY_BASE_URL: &str = "https://api.cloudinary.com";

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub database_url: String,
    pub api_keys: String,
    pub cloudinary: CloudinaryConfig,
    pub payment: PaymentConfig,
}

fn var_or(name: &str, default: &str) -> String {
    std::env::var(name).unwrap_or_else(|_| default.to_string())
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let cloudinary = CloudinaryConfig {
            base_url: var_or("CLOUDINARY_BASE_URL", DEFAULT_CLOUDINARY_BASE_URL),
            cloud_name: std::env::var("CLOUDINARY_CLOUD_NAME")
                .context("Cannot load CLOUDINARY_CLOUD_NAME env variable")?,
            upload_preset: std::env::var("CLOUDINARY_UPLOAD_PRESET")
                .context("Cannot load CLOUDINARY_UPLOAD_PRESET env variable")?,
        };

        let payment = PaymentConfig::new(
            std::env::var("UPI_ID").context("Cannot load UPI_ID env variable")?,
            std::env::var("UPI_PAYEE_NAME").context("Cannot load UPI_PAYEE_NAME env variable")?,
        )
        .with_qr_endpoint(var_or("QR_ENDPOINT", DEFAULT_QR_ENDPOINT));

        Ok(Self {
            host: std::env::var("HOST").context("Cannot load HOST env variable")?,
            port: std::env::var("PORT")
                .context("PORT must be a number")?
                .parse()?,
            database_url: std::env::var("DATABASE_URL")
                .context("Cannot load DATABASE_URL env variable")?,
            api_keys: std::env::var("API_KEYS").unwrap_or_default(),
            cloudinary,
            payment,
        })
    }
}
