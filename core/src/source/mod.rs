use std::{
    fmt::{Display, Formatter},
    path::PathBuf,
};

pub use self::directory::DirectorySource;
pub use self::memory::MemorySource;

pub mod directory;
pub mod memory;

/// The lifecycle status of a stored form instance. These are the four
/// statuses the instance store uses; records carrying any other status
/// string are not representable and therefore never plotted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// Saved but not yet finalized
    Incomplete,

    /// Finalized and ready for submission
    Complete,

    /// Submitted to the server
    Submitted,

    /// Submission was attempted and failed
    SubmissionFailed,
}

impl Status {
    /// Parses a status string as used by the instance store. Returns
    /// [`None`] for unknown status values.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "incomplete" => Some(Status::Incomplete),
            "complete" => Some(Status::Complete),
            "submitted" => Some(Status::Submitted),
            "submissionFailed" => Some(Status::SubmissionFailed),
            _ => None,
        }
    }

    /// Returns the status string as used by the instance store
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Incomplete => "incomplete",
            Status::Complete => "complete",
            Status::Submitted => "submitted",
            Status::SubmissionFailed => "submissionFailed",
        }
    }
}

impl Display for Status {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A stored form instance
#[derive(Debug, Clone, PartialEq)]
pub struct InstanceRecord {
    /// The store's record id
    pub id: i64,

    /// The id of the form this instance was filled from
    pub form_id: String,

    /// Path of the instance document
    pub file_path: PathBuf,

    /// The name shown to the user
    pub display_name: String,

    /// Lifecycle status
    pub status: Status,

    /// Reference URI of the source record, opened by overlay popups
    pub uri: String,
}

/// A stored form definition
#[derive(Debug, Clone, PartialEq)]
pub struct FormRecord {
    /// The form id instances refer to
    pub form_id: String,

    /// The form version, if the definition carries one
    pub version: Option<String>,

    /// Path of the form definition document
    pub file_path: PathBuf,
}

/// Read access to the instance store
pub trait InstancesSource {
    /// Returns all plotted instances, ordered by display name ascending
    fn plotted_instances(&self) -> Vec<InstanceRecord>;
}

/// Read access to the form-definition store
pub trait FormsSource {
    /// Returns the file path of the form definition with the given form id.
    /// If several definitions share the form id, the newest version wins.
    fn form_file(&self, form_id: &str) -> Option<PathBuf>;
}
