//! Download references correlating a conversion with its later download.

use std::fmt;

use serde::{Serialize, Serializer};
use uuid::Uuid;

use crate::upload::sanitize_filename;

/// Route prefix under which references are served.
pub const DOWNLOAD_ROUTE_PREFIX: &str = "/api/download";

/// `{uuid}_{filename}`: names the staged output and, minus the
/// identifier, the filename offered to the requester.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DownloadReference {
    id: Uuid,
    file_name: String,
}

impl DownloadReference {
    /// Build a reference from its parts.
    pub fn new(id: Uuid, file_name: impl Into<String>) -> Self {
        Self {
            id,
            file_name: file_name.into(),
        }
    }

    /// Parse a reference received from a client.
    ///
    /// Returns `None` unless the identifier is a canonical UUID and the
    /// filename is already in sanitized form, so a parsed reference can
    /// never address anything outside the output directory.
    pub fn parse(raw: &str) -> Option<Self> {
        let (id_part, file_name) = raw.split_once('_')?;

        let id = Uuid::parse_str(id_part).ok()?;
        if id.to_string() != id_part {
            return None;
        }

        if file_name.is_empty() || sanitize_filename(file_name) != file_name {
            return None;
        }

        Some(Self::new(id, file_name))
    }

    /// The shared unique identifier.
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Filename without the identifier prefix.
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    /// URL path at which this reference is downloadable.
    pub fn download_url(&self) -> String {
        format!("{DOWNLOAD_ROUTE_PREFIX}/{self}")
    }
}

impl fmt::Display for DownloadReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{}", self.id, self.file_name)
    }
}

impl Serialize for DownloadReference {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
