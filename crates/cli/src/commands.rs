use clap::Subcommand;

#[derive(Subcommand)]
pub enum Commands {
    /// Compile a condition tree into a filter template
    Compile {
        #[arg(long, help = "Condition tree file (JSON)")]
        condition: String,

        #[arg(
            long,
            help = "If specified, writes the compiled condition to this file instead of stdout"
        )]
        output: Option<String>,
    },
    /// Resolve a compiled condition against runtime values
    Resolve {
        #[arg(long, help = "Compiled condition file (JSON)")]
        compiled: String,

        #[arg(long, help = "Binding file: a JSON object of variable name to value")]
        binding: String,
    },
    /// Compile a condition tree and resolve it in one step
    Check {
        #[arg(long, help = "Condition tree file (JSON); omit for an empty condition")]
        condition: Option<String>,

        #[arg(long, help = "Binding file: a JSON object of variable name to value")]
        binding: Option<String>,
    },
}
