/// Commit the working tree was described from.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct Commit {
    /// Abbreviated commit id, without the `g` git puts in front of it.
    pub hash: String,
    /// Commits on top of the most recent tag, 0 when there is no tag.
    pub commits_since: u64,
}

/// Version derived from `git describe --tags --dirty --always` output.
///
/// The distance to the last tag lives in [`Commit`], so a distance without a
/// commit id can't be expressed. `0.0.0` is both the default and what an
/// untagged repository describes as.
#[derive(Clone, Debug, Default, Eq, Hash, PartialEq)]
pub struct Version {
    pub major: u64,
    pub minor: u64,
    pub patch: u64,
    /// Free-form identifier between the tag and the commit, e.g.
    /// `alpha.3-special`.
    pub pre_release: Option<String>,
    pub commit: Option<Commit>,
    /// Working tree had uncommitted changes.
    pub dirty: bool,
}

impl Version {
    pub fn new(major: u64, minor: u64, patch: u64) -> Self {
        Self {
            major,
            minor,
            patch,
            ..Default::default()
        }
    }

    pub fn with_pre_release<S: Into<String>>(mut self, id: S) -> Self {
        self.pre_release = Some(id.into());
        self
    }

    pub fn with_commit<S: Into<String>>(
        mut self,
        hash: S,
        commits_since: u64,
    ) -> Self {
        self.commit = Some(Commit {
            hash: hash.into(),
            commits_since,
        });
        self
    }

    pub fn with_dirty(mut self, dirty: bool) -> Self {
        self.dirty = dirty;
        self
    }

    pub fn commit_hash(&self) -> Option<&str> {
        self.commit.as_ref().map(|commit| commit.hash.as_str())
    }

    pub fn commits_since(&self) -> u64 {
        self.commit.as_ref().map_or(0, |commit| commit.commits_since)
    }
}
