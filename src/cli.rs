use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "wadinfo")]
#[command(version)]
#[command(about = "Inspect DOOM WAD and PK3 archives and list their maps", long_about = None)]
#[command(after_help = "Examples:\n  \
  wadinfo doom2.wad                 summary of one IWAD\n  \
  wadinfo -l mods/*.pk3             full map list for every package\n  \
  wadinfo --json pwads/*.wad > out  machine-readable output")]
pub struct Cli {
    /// WAD or package files to inspect
    #[arg(value_name = "FILES", required = true)]
    pub files: Vec<PathBuf>,

    /// List every map instead of the first five
    #[arg(short = 'l', long = "list")]
    pub list: bool,

    /// Print results as a JSON array
    #[arg(long)]
    pub json: bool,

    /// Only report files that could not be read
    #[arg(short = 'q', long = "quiet")]
    pub quiet: bool,

    /// Log parser decisions to stderr
    #[arg(long)]
    pub debug: bool,
}

impl Cli {
    /// Default log filter when `RUST_LOG` is unset.
    pub fn log_filter(&self) -> &'static str {
        if self.debug { "wadinfo=debug" } else { "warn" }
    }
}
