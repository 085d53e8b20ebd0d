use clap::{Args, Parser, Subcommand};

#[derive(Debug, Clone, Parser)]
#[command(name = "numerologia")]
#[command(about = "Kabbalistic numerology maps and their interpretations")]
pub struct CliConfig {
    /// Path to TOML configuration file
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    #[arg(short, long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, global = true, help = "Emit logs as JSON lines")]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Compute a full numerology map
    Mapa(MapaArgs),
    /// Vibration of an address, plate or phone number
    Vibracao(VibracaoArgs),
    /// Compatibility between two people
    Compatibilidade(CompatibilidadeArgs),
    /// Compute maps for every row of a CSV file
    Lote(LoteArgs),
}

#[derive(Debug, Clone, Args)]
pub struct PessoaArgs {
    #[arg(long)]
    pub nome: String,

    /// Birth date, YYYY-MM-DD
    #[arg(long)]
    pub nascimento: String,
}

#[derive(Debug, Clone, Args)]
pub struct MapaArgs {
    #[command(flatten)]
    pub pessoa: PessoaArgs,

    /// Reference date for personal year/month/day, YYYY-MM-DD
    #[arg(long)]
    pub referencia: Option<String>,

    #[arg(long, help = "Include the per-word audit trail")]
    pub auditoria: bool,

    #[arg(long, help = "Resolve interpretation texts from the content store")]
    pub interpretar: bool,
}

#[derive(Debug, Clone, Args)]
pub struct VibracaoArgs {
    /// endereco, placa or telefone
    #[arg(long, default_value = "endereco")]
    pub tipo: String,

    #[arg(long)]
    pub texto: String,

    #[arg(long, help = "Resolve the interpretation text from the content store")]
    pub interpretar: bool,
}

#[derive(Debug, Clone, Args)]
pub struct CompatibilidadeArgs {
    #[arg(long)]
    pub nome_a: String,

    #[arg(long)]
    pub nascimento_a: String,

    #[arg(long)]
    pub nome_b: String,

    #[arg(long)]
    pub nascimento_b: String,
}

#[derive(Debug, Clone, Args)]
pub struct LoteArgs {
    /// Input CSV with columns nome,data_nascimento[,data_referencia]
    #[arg(long)]
    pub entrada: String,

    #[arg(long, default_value = "./mapas.csv")]
    pub saida: String,
}
