//! Default values for configuration fields.
//!
//! These functions are used by serde for default deserialization.

// ============================================================================
// Common Defaults
// ============================================================================

pub fn r#true() -> bool {
    true
}

// ============================================================================
// [base] Section Defaults
// ============================================================================

pub mod base {
    pub fn url() -> Option<String> {
        None
    }

    pub fn language() -> String {
        "en".into()
    }
}

// ============================================================================
// [build] Section Defaults
// ============================================================================

pub mod build {
    use std::path::PathBuf;

    pub fn root() -> Option<PathBuf> {
        None
    }

    pub fn output() -> PathBuf {
        "dist".into()
    }

    /// Redirect configs written by the webserver-config step, relative to the export root.
    pub fn redirect_configs() -> Vec<PathBuf> {
        [
            ".htaccess",
            "nginx.conf",
            "_redirects",
            "vercel.json",
            "netlify.toml",
        ]
        .into_iter()
        .map(PathBuf::from)
        .collect()
    }

    pub mod sitemap {
        use std::path::PathBuf;

        pub fn path() -> PathBuf {
            "sitemap.xml".into()
        }
    }
}
