#![forbid(unsafe_code)]
use anyhow::Result;
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use garde::{
    audit, build_model, generate_roster, io, render_stats, render_summary, GridRenderer,
    MicroLpBackend, RosterConfig, RosterError, TextGrid,
};
#[cfg(feature = "logging")]
use tracing_subscriber::{fmt::Subscriber, EnvFilter};

/// CLI de génération du roulement des pharmaciens
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    /// Active les logs (feature `logging`)
    #[arg(long, global = true)]
    log: bool,

    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Args, Debug)]
struct ConfigArgs {
    /// Configuration JSON (champs absents = valeurs par défaut)
    #[arg(long)]
    config: Option<String>,
    #[arg(long)]
    pharmacists: Option<usize>,
    #[arg(long)]
    weeks: Option<usize>,
    #[arg(long)]
    max_cont_staff: Option<u8>,
    #[arg(long)]
    max_cont_manager: Option<u8>,
    /// Demande de repos "pharmacien,semaine,jour,garde[,poids]" (répétable)
    #[arg(long = "request")]
    requests: Vec<String>,
    /// CSV de demandes: header `pharmacist,week,day,shift[,weight]`
    #[arg(long)]
    requests_csv: Option<String>,
    /// Premier samedi du roulement (YYYY-MM-DD), pour l'affichage
    #[arg(long)]
    start_date: Option<NaiveDate>,
    /// Délai maximal de résolution, en secondes
    #[arg(long)]
    time_limit: Option<u64>,
}

impl ConfigArgs {
    fn load(self) -> Result<RosterConfig> {
        let mut config = match &self.config {
            Some(path) => io::load_config(path)?,
            None => RosterConfig::default(),
        };
        if let Some(n) = self.pharmacists {
            config.num_pharmacists = n;
        }
        if let Some(w) = self.weeks {
            config.num_weeks = w;
        }
        if let Some(cap) = self.max_cont_staff {
            config.max_cont_staff = cap;
        }
        if let Some(cap) = self.max_cont_manager {
            config.max_cont_manager = cap;
        }
        if let Some(path) = &self.requests_csv {
            config.requests.extend(io::import_requests_csv(path)?);
        }
        for raw in &self.requests {
            config.requests.push(io::parse_request(raw)?);
        }
        if self.start_date.is_some() {
            config.start_date = self.start_date;
        }
        if self.time_limit.is_some() {
            config.time_limit_secs = self.time_limit;
        }
        config.validate()?;
        Ok(config)
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Générer un roulement optimal
    Solve {
        #[command(flatten)]
        input: ConfigArgs,
        #[arg(long)]
        out_json: Option<String>,
        #[arg(long)]
        out_csv: Option<String>,
        /// Affiche les compteurs par pharmacien
        #[arg(long)]
        stats: bool,
    },

    /// Vérifier un roulement exporté en JSON
    Check {
        #[command(flatten)]
        input: ConfigArgs,
        #[arg(long)]
        roster: String,
    },

    /// Afficher la taille du modèle par famille de règles
    Model {
        #[command(flatten)]
        input: ConfigArgs,
        /// Affiche chaque contrainte
        #[arg(long)]
        dump: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    #[cfg(feature = "logging")]
    if cli.log {
        let _ = Subscriber::builder()
            .with_env_filter(EnvFilter::from_default_env())
            .try_init();
    }

    let code = match cli.cmd {
        Commands::Solve {
            input,
            out_json,
            out_csv,
            stats,
        } => {
            let config = input.load()?;
            match generate_roster(&config, &MicroLpBackend) {
                Ok(solved) => {
                    print!("{}", TextGrid.render(&solved.roster, &config));
                    println!();
                    print!("{}", render_summary(&solved));
                    if stats {
                        print!("{}", render_stats(&solved.roster.stats()));
                    }
                    if let Some(path) = out_json {
                        io::export_roster_json(path, &solved.roster)?;
                    }
                    if let Some(path) = out_csv {
                        io::export_roster_csv(path, &solved.roster, &config)?;
                    }
                    0
                }
                Err(err @ RosterError::Inconclusive { .. }) => {
                    eprintln!("{err}");
                    // Code 2 = WARNING/INCOMPLETE
                    2
                }
                Err(err) => return Err(err.into()),
            }
        }
        Commands::Check { input, roster } => {
            let config = input.load()?;
            let roster = io::load_roster_json(roster)?;
            let violations = audit(&roster, &config);
            if violations.is_empty() {
                let model = build_model(&config)?;
                let assignment = roster.to_assignment(model.vars())?;
                println!(
                    "OK: no violations (objective value {})",
                    model.objective_value(assignment.values())
                );
                0
            } else {
                eprintln!("Found {} violation(s)", violations.len());
                for v in &violations {
                    eprintln!("  - {v}");
                }
                2
            }
        }
        Commands::Model { input, dump } => {
            let config = input.load()?;
            let model = build_model(&config)?;
            let bounds = model.bounds();
            println!("variables   : {}", model.vars().len());
            println!("constraints : {}", model.constraints().len());
            for (kind, count) in model.count_by_kind() {
                println!("  {kind:<22} {count}");
            }
            println!(
                "shifts per staff: {}..={}, weekends off: {}..={}",
                bounds.min_shifts, bounds.max_shifts, bounds.min_weekends, bounds.max_weekends
            );
            if dump {
                for c in model.constraints() {
                    println!("{c}");
                }
            }
            0
        }
    };

    std::process::exit(code);
}
