mod commands;

use clap::{Parser, Subcommand, ValueEnum};

use projector_core::BackendKind;

#[derive(Parser)]
#[command(
    name = "projector",
    version,
    about = "Secondary projector window for multi-monitor presentations"
)]
struct Cli {
    /// Override the backend selected in config.toml
    #[arg(long, global = true, value_enum)]
    backend: Option<BackendArg>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum BackendArg {
    /// Native windowing for this platform
    Native,
    /// Stub backend that opens no windows
    Disabled,
}

impl From<BackendArg> for BackendKind {
    fn from(arg: BackendArg) -> Self {
        match arg {
            BackendArg::Native => BackendKind::Native,
            BackendArg::Disabled => BackendKind::Disabled,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Create the default configuration file
    Init,
    /// List the attached monitors
    Monitors,
    /// Open the secondary window and wait until it is closed
    Show(commands::show::ShowArgs),
    /// Answer JSON method calls read line by line from stdin
    Serve,
}

fn main() {
    let cli = Cli::parse();
    let backend = cli.backend.map(BackendKind::from);

    match cli.command {
        Commands::Init => commands::init::execute(),
        Commands::Monitors => commands::monitors::execute(backend),
        Commands::Show(args) => commands::show::execute(backend, &args),
        Commands::Serve => commands::serve::execute(backend),
    }
}
