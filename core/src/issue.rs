/// Snapshot of one open issue as returned by the remote tracker.
///
/// Records are never patched after construction: every refresh produces a
/// fresh `Vec<IssueRecord>` in server response order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssueRecord {
    /// Identifier assigned by the remote service.
    pub id: u64,
    pub title: String,
    /// Free text; only the part before the first line break is displayed.
    pub body: String,
    /// Short name of the owning repository.
    pub repository_name: String,
}

impl IssueRecord {
    pub fn new(
        id: u64,
        title: impl Into<String>,
        body: impl Into<String>,
        repository_name: impl Into<String>,
    ) -> Self {
        Self {
            id,
            title: title.into(),
            body: body.into(),
            repository_name: repository_name.into(),
        }
    }
}
