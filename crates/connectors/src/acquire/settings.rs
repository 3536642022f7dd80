use std::{path::PathBuf, time::Duration};

/// Where the export lands and how long to wait for it.
#[derive(Debug, Clone)]
pub struct AcquireSettings {
    pub download_dir: PathBuf,
    pub file_prefix: String,
    pub file_extension: String,
    pub file_timeout: Duration,
    pub poll_interval: Duration,
}

impl AcquireSettings {
    /// Human readable glob of the files this acquirer consumes.
    pub fn pattern(&self) -> String {
        format!("{}*.{}", self.file_prefix, self.file_extension)
    }

    pub fn matches(&self, file_name: &str) -> bool {
        file_name.starts_with(&self.file_prefix)
            && file_name.len() > self.file_prefix.len() + self.file_extension.len()
            && file_name
                .rsplit_once('.')
                .is_some_and(|(_, ext)| ext == self.file_extension)
    }
}

impl Default for AcquireSettings {
    fn default() -> Self {
        AcquireSettings {
            download_dir: PathBuf::from("downloads"),
            file_prefix: "zaiko".to_string(),
            file_extension: "csv".to_string(),
            file_timeout: Duration::from_secs(30),
            poll_interval: Duration::from_secs(1),
        }
    }
}

/// Launch policy for the export session.
#[derive(Debug, Clone)]
pub struct SessionSettings {
    pub attempts: u32,
    pub retry_delay: Duration,
    pub timeout: Duration,
}

impl Default for SessionSettings {
    fn default() -> Self {
        SessionSettings {
            attempts: 3,
            retry_delay: Duration::from_secs(10),
            timeout: Duration::from_secs(300),
        }
    }
}
