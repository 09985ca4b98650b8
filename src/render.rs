use std::fmt;

use crate::version::Version;

pub const DEFAULT_DIRTY_SUFFIX: &str = "dirty";

impl Version {
    /// Renders `major.minor.patch[-pre_release][+N.hash.dirty]`.
    ///
    /// Build metadata parts are only emitted when present, always in this
    /// order, since consumers pick them apart by position.
    pub fn render(&self, dirty_suffix: &str) -> String {
        let mut rendered =
            format!("{}.{}.{}", self.major, self.minor, self.patch);
        if let Some(pre_release) = &self.pre_release {
            rendered.push('-');
            rendered.push_str(pre_release);
        }

        let mut metadata = Vec::new();
        if let Some(commit) = &self.commit {
            if commit.commits_since != 0 {
                metadata.push(commit.commits_since.to_string());
            }
            metadata.push(commit.hash.clone());
        }
        if self.dirty {
            metadata.push(dirty_suffix.to_owned());
        }
        if !metadata.is_empty() {
            rendered.push('+');
            rendered.push_str(&metadata.join("."));
        }
        rendered
    }

    /// Preprocessor definitions for the version, one per line.
    ///
    /// Nothing is escaped: `name_prefix` and the rendered version must be
    /// valid inside a C identifier and string literal respectively.
    pub fn render_as_constants(
        &self,
        name_prefix: &str,
        dirty_suffix: &str,
    ) -> String {
        [
            format!("#define {}MAJOR {}", name_prefix, self.major),
            format!("#define {}MINOR {}", name_prefix, self.minor),
            format!("#define {}PATCH {}", name_prefix, self.patch),
            format!(
                "#define {}SEM_VER \"{}\"",
                name_prefix,
                self.render(dirty_suffix)
            ),
        ]
        .join("\n")
    }

    pub fn render_summary(&self, dirty_suffix: &str) -> String {
        format!(
            "Major: {}\nMinor: {}\nPatch: {}\nSemVer: {}",
            self.major,
            self.minor,
            self.patch,
            self.render(dirty_suffix)
        )
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render(DEFAULT_DIRTY_SUFFIX))
    }
}
