use std::ffi::OsString;
use std::path::{Path, PathBuf};

use crate::manifest::ShaderManifest;

const SOURCE_DIR: &str = "src";
const OUTPUT_DIR: &str = "bin";
const OUTPUT_EXTENSION: &str = "spv";

/// A single compiler run: `flags.. <input> -o <output>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub input: PathBuf,
    pub output: PathBuf,
    pub args: Vec<OsString>,
}

impl Invocation {
    pub fn new(root: Option<&Path>, entry: &str, flags: &[String]) -> Self {
        let input = under_root(root, SOURCE_DIR).join(entry);
        let output = under_root(root, OUTPUT_DIR).join(format!("{entry}.{OUTPUT_EXTENSION}"));

        let mut args: Vec<OsString> = flags.iter().map(OsString::from).collect();
        args.push(input.clone().into_os_string());
        args.push("-o".into());
        args.push(output.clone().into_os_string());

        Self {
            input,
            output,
            args,
        }
    }
}

/// One invocation per manifest entry, in manifest order.
pub fn plan(manifest: &ShaderManifest, root: Option<&Path>, flags: &[String]) -> Vec<Invocation> {
    manifest
        .entries()
        .iter()
        .map(|entry| Invocation::new(root, entry, flags))
        .collect()
}

fn under_root(root: Option<&Path>, dir: &str) -> PathBuf {
    match root {
        Some(root) => root.join(dir),
        None => PathBuf::from(dir),
    }
}
