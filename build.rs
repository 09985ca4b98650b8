// The parser and renderer are shared with the crate itself, so the tool
// reports its own version in exactly the format it produces.
#[allow(dead_code)]
#[path = "src/version.rs"]
mod version;

#[allow(dead_code)]
#[path = "src/describe.rs"]
mod describe;

#[allow(dead_code)]
#[path = "src/render.rs"]
mod render;

fn main() {
    // The resulting format is `major.minor.patch[-pre][+N.hash][.dirty]`,
    // see `Version::render`.
    //
    // `--tags` to take lightweight release tags into account too
    // `--match='*.*'` to skip tags that don't look like a version
    // `--always` is for fallback while there were no releases yet
    // `--dirty` adds "-dirty" suffix when there are uncommited changes
    //
    // Outside of a git checkout (e.g. a crates.io tarball) describe output
    // is unavailable and the fallback renders as `0.0.0`.
    let describe = git_version::git_version!(
        args = ["--tags", "--match=*.*", "--always", "--dirty"],
        fallback = "0.0.0"
    );
    let app_version = match describe::parse(describe) {
        Ok(version) => version.to_string(),
        Err(err) => {
            println!("cargo:warning=Unusable describe output: {}", err);
            describe.to_owned()
        }
    };
    println!("cargo:rustc-env=APP_VERSION={}", app_version);
}
