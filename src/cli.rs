use clap::Parser;

use crate::render::DEFAULT_DIRTY_SUFFIX;

#[derive(Parser, Debug)]
#[command(
    name = "git-versioner",
    about = "Turns `git describe --tags --dirty --always` output into a semantic version",
    long_about = None,
    version = env!("APP_VERSION"),
)]
pub struct Args {
    /// Describe output to parse; read from stdin when omitted
    pub describe: Option<String>,

    /// Build metadata part emitted for a dirty working tree
    #[arg(long, env = "GIT_VERSIONER_DIRTY_SUFFIX", default_value = DEFAULT_DIRTY_SUFFIX)]
    pub dirty_suffix: String,

    /// Print preprocessor definitions instead of the summary
    #[arg(long)]
    pub constants: bool,

    /// Prefix for constant names, e.g. `APP_` for `APP_MAJOR`
    #[arg(long, env = "GIT_VERSIONER_PREFIX", default_value = "")]
    pub prefix: String,
}

impl Args {
    pub fn render(&self, version: &crate::Version) -> String {
        if self.constants {
            version.render_as_constants(&self.prefix, &self.dirty_suffix)
        } else {
            version.render_summary(&self.dirty_suffix)
        }
    }
}
