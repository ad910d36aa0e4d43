//! sortvis entrypoint.
use anyhow::Result;
use clap::Parser;
use core_actions::AnimationDriver;
use core_config::{Config, ConfigOverrides, load_from};
use core_events::{EVENT_CHANNEL_CAP, Event, EventSourceRegistry, TickEventSource};
use core_keymap::Keymap;
use core_model::{Algorithm, ListGenerator, SortDirection, Viewport};
use core_render::{Palette, TerminalSurface};
use core_terminal::{CrosstermBackend, TerminalBackend, TerminalCapabilities, WINDOW_TITLE};
use std::path::{Path, PathBuf};
use std::sync::Once;
use tokio::sync::mpsc;
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;

mod runtime;

use runtime::SortvisRuntime;

const LOG_FILE_NAME: &str = "sortvis.log";

/// CLI arguments.
#[derive(Parser, Debug, Default)]
#[command(name = "sortvis", version, about = "Step-by-step sorting algorithm visualizer")]
struct Args {
    /// Configuration file path (overrides discovery of `sortvis.toml`).
    #[arg(long = "config")]
    pub config: Option<PathBuf>,
    /// Seed for the list generator; the same seed replays the same lists.
    #[arg(long)]
    pub seed: Option<u64>,
    /// Number of bars.
    #[arg(long)]
    pub len: Option<usize>,
    /// Algorithm selected at startup (bubble, insertion, selection, merge, quick, heap).
    #[arg(long)]
    pub algorithm: Option<Algorithm>,
    /// Start in descending order.
    #[arg(long)]
    pub descending: bool,
}

impl Args {
    fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            len: self.len,
            algorithm: self.algorithm,
            direction: self.descending.then_some(SortDirection::Descending),
        }
    }
}

/// Everything the event loop owns, built before the terminal is touched.
struct Bootstrap {
    driver: AnimationDriver,
    keymap: Keymap,
    tick_rate: u32,
}

impl Bootstrap {
    fn build(args: &Args, mut config: Config, viewport: Viewport) -> Self {
        config.apply_overrides(args.overrides());
        let generator = match args.seed {
            Some(seed) => ListGenerator::seeded(config.list, seed),
            None => ListGenerator::from_os(config.list),
        };
        let driver = AnimationDriver::new(generator, viewport)
            .with_algorithm(config.algorithm())
            .with_direction(config.direction());

        let mut keymap = Keymap::default();
        for err in keymap.apply_overrides(config.key_overrides()) {
            warn!(target: "config", error = %err, "key_override_rejected");
        }

        info!(
            target: "runtime.startup",
            len = config.list.len,
            min = config.list.min,
            max = config.list.max,
            tick_rate = config.tick_rate,
            algorithm = config.algorithm().as_str(),
            direction = config.direction().label(),
            seeded = args.seed.is_some(),
            "bootstrap_complete"
        );
        Self {
            driver,
            keymap,
            tick_rate: config.tick_rate,
        }
    }
}

struct AppStartup {
    backend: CrosstermBackend,
    log_guard: Option<WorkerGuard>,
}

struct RuntimeContext<'a> {
    bootstrap: Bootstrap,
    viewport: Viewport,
    terminal_guard: core_terminal::TerminalGuard<'a>,
}

impl AppStartup {
    fn new() -> Self {
        Self {
            backend: CrosstermBackend::new(),
            log_guard: None,
        }
    }

    fn run<'a>(&'a mut self, args: &Args) -> Result<RuntimeContext<'a>> {
        self.configure_logging()?;
        Self::install_panic_hook();

        info!(target: "runtime", "startup");
        let config = load_from(args.config.clone())?;

        self.backend.set_title(WINDOW_TITLE)?;
        let guard = self.backend.enter_guard()?;
        let (columns, rows) = guard.size()?;
        let viewport = Viewport::new(columns, rows);

        Ok(RuntimeContext {
            bootstrap: Bootstrap::build(args, config, viewport),
            viewport,
            terminal_guard: guard,
        })
    }

    fn configure_logging(&mut self) -> Result<()> {
        let log_dir = Path::new(".");
        let log_path = log_dir.join(LOG_FILE_NAME);
        if log_path.exists() {
            let _ = std::fs::remove_file(&log_path);
        }

        let file_appender = tracing_appender::rolling::never(log_dir, LOG_FILE_NAME);
        let (nb_writer, guard) = tracing_appender::non_blocking(file_appender);
        if tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_writer(nb_writer)
            .with_ansi(false)
            .try_init()
            .is_ok()
        {
            self.log_guard = Some(guard);
        }
        Ok(())
    }

    fn install_panic_hook() {
        static HOOK: Once = Once::new();
        HOOK.call_once(|| {
            let default_panic = std::panic::take_hook();
            std::panic::set_hook(Box::new(move |info| {
                tracing::error!(target: "runtime.panic", ?info, "panic");
                default_panic(info);
            }));
        });
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let mut startup = AppStartup::new();
    let RuntimeContext {
        bootstrap,
        viewport,
        terminal_guard,
    } = startup.run(&args)?;

    let palette = Palette::from_capabilities(&TerminalCapabilities::detect());
    let surface = TerminalSurface::stdout(palette, viewport.columns, viewport.rows);

    let (tx, rx) = mpsc::channel::<Event>(EVENT_CHANNEL_CAP);
    let (input_task, input_shutdown) = core_input::spawn_async_input(tx.clone());
    let mut registry = EventSourceRegistry::new();
    registry.register(TickEventSource::per_second(bootstrap.tick_rate));
    let source_handles = registry.spawn_all(&tx);

    let mut runtime = SortvisRuntime::new(bootstrap.driver, bootstrap.keymap, surface, tx, rx)
        .with_input(input_task, input_shutdown)
        .with_sources(source_handles);
    let result = runtime.run().await;
    let restored = terminal_guard.restore();
    result.and(restored)
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_events::{CommandEvent, KeyCode, KeyEvent};
    use std::io::Write;

    fn config_from(toml: &str) -> Config {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(toml.as_bytes()).unwrap();
        load_from(Some(file.path().to_path_buf())).unwrap()
    }

    #[test]
    fn cli_parses_all_flags() {
        let args = Args::try_parse_from([
            "sortvis",
            "--seed",
            "7",
            "--len",
            "30",
            "--algorithm",
            "heap",
            "--descending",
        ])
        .unwrap();
        assert_eq!(args.seed, Some(7));
        assert_eq!(args.len, Some(30));
        assert_eq!(args.algorithm, Some(Algorithm::Heap));
        assert!(args.descending);
    }

    #[test]
    fn cli_rejects_unknown_algorithm() {
        assert!(Args::try_parse_from(["sortvis", "--algorithm", "bogo"]).is_err());
    }

    #[test]
    fn cli_values_override_config() {
        let config = config_from("[list]\nlen = 80\n[startup]\nalgorithm = \"merge\"\n");
        let args = Args {
            len: Some(12),
            descending: true,
            seed: Some(1),
            ..Args::default()
        };
        let b = Bootstrap::build(&args, config, Viewport::new(100, 40));
        assert_eq!(b.driver.array().len(), 12);
        assert_eq!(b.driver.algorithm(), Algorithm::Merge);
        assert_eq!(b.driver.direction(), SortDirection::Descending);
        assert_eq!(b.tick_rate, 120);
    }

    #[test]
    fn seeded_bootstraps_are_reproducible() {
        let args = Args {
            seed: Some(99),
            ..Args::default()
        };
        let a = Bootstrap::build(&args, Config::default(), Viewport::new(100, 40));
        let b = Bootstrap::build(&args, Config::default(), Viewport::new(100, 40));
        assert_eq!(a.driver.array().values(), b.driver.array().values());
    }

    #[test]
    fn key_overrides_reach_keymap() {
        let config = config_from("[keys]\nstart = \"enter\"\nbogus = \"x\"\n");
        let b = Bootstrap::build(&Args::default(), config, Viewport::new(100, 40));
        assert_eq!(
            b.keymap.resolve(&KeyEvent::plain(KeyCode::Enter)),
            Some(CommandEvent::Start)
        );
        assert_eq!(b.keymap.resolve(&KeyEvent::plain(KeyCode::Char(' '))), None);
    }
}
