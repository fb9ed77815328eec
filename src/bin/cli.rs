//! Volarb CLI
//!
//! Inspect the dashboard panels from a terminal: surface grid, detector scan,
//! metric cards, option chain, alerts and trade ideas.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing::info;

use volarb::core::{DashError, DashResult, DataMode, ExpiryTenor};
use volarb::prelude::*;
use volarb::views;

/// Volarb: volatility surface arbitrage dashboard
#[derive(Parser, Debug)]
#[command(name = "volarb")]
#[command(about = "Inspect volatility surface, anomalies and trade ideas")]
struct Args {
    /// Dashboard config (JSON); defaults apply when omitted
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Snapshot file to read instead of the bundled sample
    #[arg(short, long)]
    snapshot: Option<PathBuf>,

    /// Print JSON instead of text
    #[arg(long)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Implied-vol grid, or the painted display list with --json
    Surface {
        #[arg(long, default_value = "800")]
        width: f64,
        #[arg(long, default_value = "400")]
        height: f64,
    },
    /// Run the dislocation detector over the surface
    Scan {
        /// Override the detector threshold
        #[arg(short, long)]
        threshold: Option<f64>,
    },
    /// Metric cards for a data mode
    Metrics {
        #[arg(short, long, default_value = "live")]
        mode: String,
    },
    /// Option chain for an underlying
    Chain {
        #[arg(short, long)]
        underlying: Option<String>,
        /// 7d, 14d, 30d, 60d or 90d
        #[arg(short, long)]
        tenor: Option<String>,
        /// Strike prefix filter
        #[arg(long, default_value = "")]
        search: String,
    },
    /// Volatility anomaly alerts
    Anomalies,
    /// Trade recommendations
    Trades,
    /// Risk metrics and factor exposures
    Risk,
    /// Monthly strategy vs benchmark returns
    Performance,
    /// Underlyings matching a symbol or sector query
    Underlyings {
        #[arg(default_value = "")]
        query: String,
    },
    /// Save the current snapshot to a file or to the snapshot store
    Export {
        /// Target file
        #[arg(short, long)]
        out: Option<PathBuf>,
        /// Name in the snapshot store
        #[arg(short, long)]
        name: Option<String>,
    },
    /// List snapshots in the store
    List,
}

fn main() -> DashResult<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args = Args::parse();

    let config = match &args.config {
        Some(path) => DashboardConfig::load(path)?,
        None => DashboardConfig::default(),
    };
    let snapshot = match &args.snapshot {
        Some(path) => DashboardSnapshot::load(path)?,
        None => sample_snapshot(),
    };

    match &args.command {
        Command::Surface { width, height } => surface(&config, *width, *height, args.json),
        Command::Scan { threshold } => scan(&config, *threshold, args.json),
        Command::Metrics { mode } => {
            let mode = DataMode::parse(mode)
                .ok_or_else(|| DashError::invalid_input(format!("unknown mode {}", mode)))?;
            let cards = views::metric_cards(&snapshot.fetch_metrics(mode)?);
            if args.json {
                return print_json(&cards);
            }
            println!("{} metrics", mode.label());
            for card in cards {
                let change = card
                    .change
                    .map(|c| format!("{} {}", c.arrow.glyph(), c.text))
                    .unwrap_or_default();
                println!("  {:<20} {:>12}  {}", card.name, card.value, change);
            }
            Ok(())
        }
        Command::Chain {
            underlying,
            tenor,
            search,
        } => {
            let symbol = underlying
                .clone()
                .unwrap_or_else(|| config.default_underlying.clone());
            let tenor = match tenor {
                Some(code) => ExpiryTenor::from_code(code)
                    .ok_or_else(|| DashError::invalid_input(format!("unknown tenor {}", code)))?,
                None => config.default_tenor,
            };
            let chain = snapshot.fetch_option_chain(&symbol, tenor)?;
            let view = views::chain_view(&chain, search);
            if args.json {
                return print_json(&view);
            }
            println!("{} ({})", view.badge, view.tenor.label());
            println!("{}", views::CHAIN_COLUMNS.join("\t"));
            for row in &view.rows {
                let marker = if row.highlighted { " *" } else { "" };
                println!("{}{}", row.cells().join("\t"), marker);
            }
            if view.rows.is_empty() {
                println!("(no quotes)");
            }
            Ok(())
        }
        Command::Anomalies => {
            let anomalies = snapshot.fetch_anomalies()?;
            let cards = views::anomaly_cards(&anomalies);
            if args.json {
                return print_json(&cards);
            }
            println!("{}", views::active_badge(&anomalies));
            for card in cards {
                println!("[{}] {} - {}", card.severity, card.title, card.age);
                println!(
                    "    IV {} vs {} expected ({} {})  -> {}",
                    card.implied_vol,
                    card.expected_vol,
                    card.difference_arrow.glyph(),
                    card.difference,
                    card.action
                );
            }
            Ok(())
        }
        Command::Trades => {
            let cards = views::trade_cards(&snapshot.fetch_trades()?);
            if args.json {
                return print_json(&cards);
            }
            for card in cards {
                println!("{} [{}]", card.strategy, card.status);
                println!("    {}", card.description);
                for leg in &card.legs {
                    println!("    {}", leg.text);
                }
                println!(
                    "    Premium {}  Return {}  Probability {}",
                    card.premium, card.expected_return, card.probability
                );
            }
            Ok(())
        }
        Command::Risk => {
            let view = views::risk_view(&snapshot.fetch_risk()?);
            if args.json {
                return print_json(&view);
            }
            for bar in &view.metrics {
                println!("  {:<20} {:>10}  {:>5.1}%  {}", bar.name, bar.value, bar.progress, bar.description);
            }
            println!("Factor exposure");
            for bar in &view.exposures {
                println!("  {:<20} {:>10}", bar.factor, bar.value);
            }
            Ok(())
        }
        Command::Performance => {
            let view = views::performance_view(&snapshot.fetch_performance()?);
            if args.json {
                return print_json(&view);
            }
            for (i, period) in view.periods.iter().enumerate() {
                println!(
                    "  {:<6} {:>8} {:>8}",
                    period,
                    views::percent_tick(view.strategy[i][1]),
                    views::percent_tick(view.benchmark[i][1])
                );
            }
            println!("{}", view.strategy_summary);
            println!("{}", view.benchmark_summary);
            Ok(())
        }
        Command::Underlyings { query } => {
            let underlyings = snapshot.underlyings()?;
            let items = views::selector_items(&underlyings, &config.default_underlying, query);
            if args.json {
                return print_json(&items);
            }
            for item in items {
                let mark = if item.selected { "*" } else { " " };
                println!("{} {:<6} {:>8}  {}", mark, item.symbol, item.market_cap, item.sector);
            }
            Ok(())
        }
        Command::Export { out, name } => {
            if let Some(path) = out {
                snapshot.save(path)?;
                info!("Saved snapshot to {:?}", path);
            }
            if let Some(name) = name {
                let store = SnapshotStore::new(config.snapshots.clone())?;
                store.save(name, &snapshot)?;
            }
            if out.is_none() && name.is_none() {
                println!("{}", snapshot.to_json()?);
            }
            Ok(())
        }
        Command::List => {
            let store = SnapshotStore::new(config.snapshots.clone())?;
            for name in store.list()? {
                let state = if store.is_valid(&name) { "fresh" } else { "stale" };
                println!("{} ({})", name, state);
            }
            Ok(())
        }
    }
}

fn surface(config: &DashboardConfig, width: f64, height: f64, json: bool) -> DashResult<()> {
    if json {
        let mut rt = Runtime::new();
        let mut renderer = SurfaceRenderer::new(config.surface.clone(), config.style.clone());
        renderer.set_predicate(config.highlight.predicate(&config.detection));
        let mut list = DisplayList::new();
        let outcome = renderer.mount(&mut rt, Some(Size::new(width, height)), Some(&mut list));
        renderer.unmount(&mut rt);
        info!(?outcome, "Surface painted");
        return print_json(&list);
    }

    let grid = SurfaceGrid::generate(&config.surface);
    let flagged = scan_surface(&grid, &config.detection);
    let steps = grid.steps();

    print!("strike\\mat");
    for m in 0..=steps {
        print!("{:>7}", m);
    }
    println!();
    for s in 0..=steps {
        print!("{:>10}", s);
        for m in 0..=steps {
            let vol = grid.vol(s, m).unwrap_or(f64::NAN);
            let hit = flagged
                .iter()
                .any(|d| d.strike_idx == s && d.maturity_idx == m);
            print!("{:>6.1}{}", vol * 100.0, if hit { "*" } else { " " });
        }
        println!();
    }
    Ok(())
}

fn scan(config: &DashboardConfig, threshold: Option<f64>, json: bool) -> DashResult<()> {
    let mut detection = config.detection.clone();
    if let Some(t) = threshold {
        detection.threshold = t;
    }
    detection.validate()?;

    let grid = SurfaceGrid::generate(&config.surface);
    let found = scan_surface(&grid, &detection);
    if json {
        return print_json(&found);
    }
    if found.is_empty() {
        println!("No dislocations above |z| = {}", detection.threshold);
    }
    for d in found {
        println!(
            "{:<6} strike {:>2} maturity {:>2}  vol {:.2}%  baseline {:.2}%  z {:+.2}",
            d.kind.label(),
            d.strike_idx,
            d.maturity_idx,
            d.vol * 100.0,
            d.baseline * 100.0,
            d.z_score
        );
    }
    Ok(())
}

fn print_json<T: serde::Serialize>(value: &T) -> DashResult<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
