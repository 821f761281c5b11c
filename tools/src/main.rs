//! kds-runner: headless dashboard runner for the KDS scoring core.
//!
//! Usage:
//!   kds-runner --demo 25 --seed 42 --panel all
//!   kds-runner --db kds.db --import dataset.json --panel entrepreneurs --ref-women 40
//!   kds-runner --db kds.db --ipc-mode
//!
//! Every response is a JSON envelope: `{"ok":true,"data":...}` or
//! `{"ok":false,"error":"...","where":"..."}`.

use anyhow::Result;
use kds_core::{
    config::KdsConfig,
    dashboard::{parse_firm_id, Dashboard},
    dataset::Dataset,
    demo,
    error::KdsResult,
    store::KdsStore,
    types::{FirmId, ScoringParameters},
};
use serde::{Deserialize, Serialize};
use std::env;
use std::io::{self, BufRead, Write};

#[derive(Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum IpcCommand {
    Panel {
        panel: String,
        #[serde(default)]
        firm_id: Option<FirmId>,
        #[serde(default)]
        params: ParamsInput,
    },
    Quit,
}

/// Scoring parameters as a caller sends them; omitted values take the
/// configured defaults.
#[derive(Debug, Default, Deserialize)]
struct ParamsInput {
    ref_women: Option<f64>,
    ref_disabled: Option<f64>,
    ref_min_year: Option<i32>,
}

impl ParamsInput {
    fn resolve(&self, defaults: &ScoringParameters) -> ScoringParameters {
        ScoringParameters {
            ref_women_ratio: self.ref_women.unwrap_or(defaults.ref_women_ratio),
            ref_disabled_ratio: self.ref_disabled.unwrap_or(defaults.ref_disabled_ratio),
            ref_min_year: self.ref_min_year.unwrap_or(defaults.ref_min_year),
        }
    }
}

#[derive(Serialize)]
struct Envelope {
    ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
    #[serde(rename = "where", skip_serializing_if = "Option::is_none")]
    location: Option<String>,
}

impl Envelope {
    fn failure(location: &str, error: impl ToString) -> Self {
        Self {
            ok: false,
            data: None,
            error: Some(error.to_string()),
            location: Some(location.to_string()),
        }
    }
}

fn respond<T: Serialize>(panel: &str, result: KdsResult<T>) -> Envelope {
    let location = format!("panel/{panel}");
    match result.map_err(anyhow::Error::from).and_then(|data| {
        serde_json::to_value(data).map_err(anyhow::Error::from)
    }) {
        Ok(data) => Envelope {
            ok: true,
            data: Some(data),
            error: None,
            location: None,
        },
        Err(e) => {
            log::error!("[{location}] {e}");
            Envelope::failure(&location, e)
        }
    }
}

fn run_panel(
    dashboard: &Dashboard<'_>,
    panel: &str,
    firm_id: Option<FirmId>,
    params: &ScoringParameters,
) -> Envelope {
    match panel {
        "firms" => respond(panel, dashboard.firm_directory()),
        "kpis" => respond(panel, dashboard.kpis(firm_id)),
        "sustainability" => respond(panel, dashboard.sustainability_top7()),
        "recycling" => respond(panel, dashboard.recycling_top10()),
        "entrepreneurs" => respond(panel, dashboard.entrepreneur_top10(params)),
        "returns" => respond(panel, dashboard.all_returns()),
        "all" => respond(panel, dashboard.snapshot(params, firm_id)),
        other => Envelope::failure(&format!("panel/{other}"), format!("Unknown panel: {other}")),
    }
}

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let db = arg_value(&args, "--db").unwrap_or(":memory:");
    let data_dir = arg_value(&args, "--data-dir").unwrap_or("./data");
    let panel = arg_value(&args, "--panel").unwrap_or("all");
    let ipc_mode = args.iter().any(|a| a == "--ipc-mode");
    let seed = parse_arg(&args, "--seed", 42u64);

    let config = match KdsConfig::load(data_dir) {
        Ok(config) => config,
        Err(e) => {
            log::warn!("Using built-in settings: {e}");
            KdsConfig::default()
        }
    };

    let store = match prepare_store(&args, db, seed) {
        Ok(store) => store,
        Err(e) => {
            log::error!("[import] {e}");
            return print_envelope(&Envelope::failure("import", e));
        }
    };

    let dashboard = Dashboard::new(&store, &config);
    let params = ParamsInput {
        ref_women: arg_value(&args, "--ref-women").and_then(|v| v.parse().ok()),
        ref_disabled: arg_value(&args, "--ref-disabled").and_then(|v| v.parse().ok()),
        ref_min_year: arg_value(&args, "--ref-min-year").and_then(|v| v.parse().ok()),
    }
    .resolve(&config.default_parameters);

    if ipc_mode {
        return run_ipc_loop(&dashboard, &config);
    }

    let envelope = match arg_value(&args, "--firm-id").map(parse_firm_id).transpose() {
        Ok(firm_id) => run_panel(&dashboard, panel, firm_id, &params),
        Err(e) => Envelope::failure(&format!("panel/{panel}"), e),
    };
    print_envelope(&envelope)
}

fn print_envelope(envelope: &Envelope) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(envelope)?);
    Ok(())
}

/// Open, migrate, and load any requested data. Demo data only seeds an
/// empty store, so re-running against the same file is safe.
fn prepare_store(args: &[String], db: &str, seed: u64) -> Result<KdsStore> {
    let store = KdsStore::open(db)?;
    store.migrate()?;

    if let Some(path) = arg_value(args, "--import") {
        store.import(&Dataset::from_path(path)?)?;
    }
    if let Some(firm_count) = arg_value(args, "--demo").and_then(|v| v.parse::<usize>().ok()) {
        let entrepreneurs = parse_arg(args, "--demo-entrepreneurs", firm_count * 2);
        store.seed_if_empty(&demo::generate(seed, firm_count, entrepreneurs))?;
    }
    Ok(store)
}

fn run_ipc_loop(dashboard: &Dashboard<'_>, config: &KdsConfig) -> Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let mut handle = stdin.lock();
    let mut buffer = String::new();

    loop {
        buffer.clear();
        let bytes_read = handle.read_line(&mut buffer)?;
        if bytes_read == 0 {
            break; // EOF
        }
        if buffer.trim().is_empty() {
            continue;
        }

        let envelope = match serde_json::from_str::<IpcCommand>(&buffer) {
            Ok(IpcCommand::Quit) => break,
            Ok(IpcCommand::Panel {
                panel,
                firm_id,
                params,
            }) => {
                let params = params.resolve(&config.default_parameters);
                run_panel(dashboard, &panel, firm_id, &params)
            }
            Err(e) => Envelope::failure("ipc", e),
        };
        writeln!(stdout, "{}", serde_json::to_string(&envelope)?)?;
        stdout.flush()?;
    }
    Ok(())
}

fn arg_value<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    args.windows(2)
        .find(|w| w[0] == flag)
        .map(|w| w[1].as_str())
}

fn parse_arg<T: std::str::FromStr + Copy>(args: &[String], flag: &str, default: T) -> T {
    arg_value(args, flag)
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
