use std::ffi::OsString;
use std::path::Path;

use anyhow::Context;
use clap::Parser;

use crate::compiler::Glslc;
use crate::manifest::Profile;

mod compiler;
mod driver;
mod invocation;
mod logging;
mod manifest;

/// Compile the built-in shader manifest to SPIR-V with glslc.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Directory holding the `src/` and `bin/` trees. Defaults to the
    /// current directory.
    root: Option<OsString>,

    /// Which shader set and compiler flags to use.
    #[arg(long, value_enum, default_value_t = Profile::Extended)]
    profile: Profile,

    /// Extra positional values are accepted and ignored.
    #[arg(hide = true)]
    _rest: Vec<OsString>,
}

impl Args {
    /// An empty root is the same as no root.
    fn root(&self) -> Option<&Path> {
        self.root
            .as_deref()
            .filter(|root| !root.is_empty())
            .map(Path::new)
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    logging::init().context("failed to initialise logging")?;

    let manifest = args.profile.manifest();
    let flags = args.profile.flags();
    log::debug!(
        "Profile {:?}: {} shaders, flags {:?}",
        args.profile,
        manifest.len(),
        flags
    );

    // Compiler failures are reported by glslc itself and never change the exit code.
    driver::build(
        &manifest,
        args.root(),
        &flags,
        &mut Glslc::default(),
    );

    Ok(())
}
