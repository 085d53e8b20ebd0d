use chrono::NaiveDate;
use clap::Parser;
use numerologia::adapters::build_store;
use numerologia::config::cli::{Command, CompatibilidadeArgs, LoteArgs, MapaArgs, VibracaoArgs};
use numerologia::core::derived::{
    compatibility_score, map_compatibility, string_vibration, DerivedKind,
};
use numerologia::core::mapa::{gerar_mapa_com_auditoria, gerar_mapa_numerologico};
use numerologia::domain::ports::{ConfigProvider, ContentStore};
use numerologia::utils::error::{ErrorSeverity, Result};
use numerologia::utils::logger;
use numerologia::utils::validation::{
    parse_date, validate_birth_date, validate_file_extension, validate_name, Validate,
};
use numerologia::{BatchRunner, CliConfig, ContentResolver, MapaNumerologico, TomlConfig};

#[tokio::main]
async fn main() {
    let cli = CliConfig::parse();

    let config = match &cli.config {
        Some(path) => match TomlConfig::from_file(path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("❌ Failed to load config file '{}': {}", path, e);
                eprintln!("💡 Make sure the file exists and is valid TOML format");
                std::process::exit(1);
            }
        },
        None => TomlConfig::default(),
    };

    if cli.log_json || config.json_logs() {
        logger::init_json_logger(config.log_level());
    } else {
        logger::init_cli_logger(cli.verbose, config.log_level());
    }

    tracing::info!("🚀 Starting numerologia CLI");
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    if let Err(e) = run(cli.command, &config).await {
        tracing::error!(
            "❌ Command failed: {} (Category: {:?}, Severity: {:?})",
            e,
            e.category(),
            e.severity()
        );
        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 Sugestão: {}", e.recovery_suggestion());

        let exit_code = match e.severity() {
            ErrorSeverity::Low => 0,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        };
        if exit_code > 0 {
            std::process::exit(exit_code);
        }
    }
}

fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

fn pessoa(nome: &str, nascimento: &str) -> Result<(String, NaiveDate)> {
    validate_name(nome)?;
    let nascimento = parse_date("nascimento", nascimento)?;
    validate_birth_date(nascimento, today())?;
    Ok((nome.to_string(), nascimento))
}

fn resolver(config: &TomlConfig) -> Result<ContentResolver<Box<dyn ContentStore>>> {
    let store = build_store(config)?;
    Ok(ContentResolver::new(store)
        .with_topics(config.topic_table())
        .with_retry(config.retry_once()))
}

fn print_json(value: &serde_json::Value) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

async fn run(command: Command, config: &TomlConfig) -> Result<()> {
    match command {
        Command::Mapa(args) => run_mapa(args, config).await,
        Command::Vibracao(args) => run_vibracao(args, config).await,
        Command::Compatibilidade(args) => run_compatibilidade(args),
        Command::Lote(args) => run_lote(args),
    }
}

async fn run_mapa(args: MapaArgs, config: &TomlConfig) -> Result<()> {
    let (nome, nascimento) = pessoa(&args.pessoa.nome, &args.pessoa.nascimento)?;
    let referencia = args
        .referencia
        .as_deref()
        .map(|value| parse_date("referencia", value))
        .transpose()?;

    let (mapa, auditoria) = if args.auditoria {
        let (mapa, logs) =
            gerar_mapa_com_auditoria(&nome, nascimento, referencia, config.profile())?;
        (mapa, Some(logs))
    } else {
        (gerar_mapa_numerologico(&nome, nascimento, referencia)?, None)
    };
    tracing::info!("🗺️ Map computed for '{}'", mapa.nome);

    let mut output = serde_json::json!({ "mapa": mapa });
    if let Some(logs) = auditoria {
        output["auditoria"] = serde_json::to_value(logs)?;
    }
    if args.interpretar {
        let interpretacoes = resolver(config)?.interpret_map(&mapa).await;
        output["interpretacoes"] = serde_json::to_value(interpretacoes)?;
    }

    print_json(&output)
}

async fn run_vibracao(args: VibracaoArgs, config: &TomlConfig) -> Result<()> {
    let kind: DerivedKind = args.tipo.parse()?;
    let vibration = string_vibration(&args.texto)?;

    let mut output = serde_json::json!({
        "tipo": kind,
        "texto": args.texto,
        "vibracao": vibration,
    });
    if args.interpretar {
        let lookup = resolver(config)?
            .lookup(kind.topic(), vibration.reduced, None)
            .await;
        output["interpretacao"] = serde_json::to_value(lookup)?;
    }

    print_json(&output)
}

fn run_compatibilidade(args: CompatibilidadeArgs) -> Result<()> {
    let (nome_a, nascimento_a) = pessoa(&args.nome_a, &args.nascimento_a)?;
    let (nome_b, nascimento_b) = pessoa(&args.nome_b, &args.nascimento_b)?;
    let a: MapaNumerologico = gerar_mapa_numerologico(&nome_a, nascimento_a, None)?;
    let b: MapaNumerologico = gerar_mapa_numerologico(&nome_b, nascimento_b, None)?;

    print_json(&serde_json::json!({
        "compatibilidade": map_compatibility(&a, &b),
        "destino": compatibility_score(a.destino, b.destino),
        "expressao": compatibility_score(a.expressao, b.expressao),
        "motivacao": compatibility_score(a.motivacao, b.motivacao),
        "mapaA": a,
        "mapaB": b,
    }))
}

fn run_lote(args: LoteArgs) -> Result<()> {
    validate_file_extension("entrada", &args.entrada, &["csv"])?;
    tracing::info!("📁 Processing batch file: {}", args.entrada);

    let summary = BatchRunner::new(today()).run_files(&args.entrada, &args.saida)?;

    println!("✅ {} mapas gravados em {}", summary.processed, args.saida);
    for rejection in &summary.rejections {
        println!("⚠️ linha {}: {}", rejection.line, rejection.reason);
    }
    Ok(())
}
