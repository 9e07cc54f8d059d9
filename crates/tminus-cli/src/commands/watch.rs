use std::io::Write;

use clap::Args;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tminus_core::{
    Category, Config, Dashboard, Event, GeoLocator, NetworkStatus, SpaProvider, SystemClock,
    Ticker, TickerCommand,
};

use crate::display;

#[derive(Args)]
pub struct WatchArgs {
    /// Event id to start with (defaults to `display.default_event`)
    id: Option<String>,
    /// Skip the IP geolocation lookup and stay on the configured location
    #[arg(long)]
    no_locate: bool,
    /// Print events as JSON lines
    #[arg(long)]
    json: bool,
}

pub fn run(args: WatchArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;
    super::runtime()?.block_on(watch(args, config))
}

async fn watch(args: WatchArgs, config: Config) -> Result<(), Box<dyn std::error::Error>> {
    let json = args.json || config.display.json;
    let first = args
        .id
        .unwrap_or_else(|| config.display.default_event.clone());

    let mut fallback = config.location_fallback();
    let location = if config.location.lookup_enabled && !args.no_locate {
        Some(GeoLocator::new(&config.location.lookup_url)?.spawn())
    } else {
        fallback.status = NetworkStatus::Offline;
        None
    };

    let ticker = Ticker::new(Dashboard::new(fallback), SystemClock, SpaProvider::new())
        .with_period(config.tick_interval());
    let (cmd_tx, cmd_rx) = mpsc::channel(16);
    let (ev_tx, mut ev_rx) = mpsc::channel(64);

    cmd_tx.send(TickerCommand::Select(first)).await?;
    let ticker = tokio::spawn(ticker.run(cmd_rx, location, ev_tx));
    // Closing stdin drops the sender, which stops the ticker.
    tokio::spawn(read_commands(cmd_tx));

    let mut renderer = Renderer::new(json);
    while let Some(event) = ev_rx.recv().await {
        renderer.render(&event)?;
        if matches!(event, Event::TickerStopped { .. }) {
            break;
        }
    }

    let dashboard = ticker.await?;
    tracing::debug!(selection = ?dashboard.selection().map(|s| &s.event_id), "watch finished");
    Ok(())
}

async fn read_commands(commands: mpsc::Sender<TickerCommand>) {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Ok(Some(line)) = lines.next_line().await {
        let command = match line.trim() {
            "" => continue,
            "q" | "quit" => TickerCommand::Stop,
            id => TickerCommand::Select(id.to_string()),
        };
        let stop = command == TickerCommand::Stop;
        if commands.send(command).await.is_err() || stop {
            break;
        }
    }
}

struct Renderer {
    json: bool,
    category: Option<Category>,
    frame: u64,
}

impl Renderer {
    fn new(json: bool) -> Self {
        Self {
            json,
            category: None,
            frame: 0,
        }
    }

    fn render(&mut self, event: &Event) -> Result<(), Box<dyn std::error::Error>> {
        if let Event::EventSelected { category, .. } = event {
            self.category = Some(*category);
        }

        let mut out = std::io::stdout().lock();
        if self.json {
            writeln!(out, "{}", serde_json::to_string(event)?)?;
            return Ok(out.flush()?);
        }

        match event {
            Event::EventSelected {
                title,
                category,
                target,
                ..
            } => {
                writeln!(out, "== {title} [{category}]")?;
                writeln!(out, "   next: {}", display::target(target.as_ref()))?;
            }
            Event::SelectionRejected { event_id, .. } => {
                eprintln!("unknown event '{event_id}'");
            }
            Event::CountdownTick {
                countdown,
                progress,
                ..
            } => {
                self.frame = self.frame.wrapping_add(1);
                let gauge = self
                    .category
                    .map(|c| display::gauge(c.visualization(), *progress, self.frame))
                    .unwrap_or_default();
                writeln!(
                    out,
                    "   T-{:<26} {} {gauge}",
                    countdown.to_string(),
                    display::percent(*progress)
                )?;
            }
            Event::LocationResolved {
                label,
                coordinates,
                status,
                ..
            } => {
                writeln!(
                    out,
                    "-- location: {label} ({coordinates}) [{}]",
                    display::status(*status)
                )?;
            }
            Event::TickerStopped { .. } => writeln!(out, "-- stopped")?,
        }
        Ok(out.flush()?)
    }
}
