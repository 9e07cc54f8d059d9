//! Text rendering shared by `events` and `watch`.

use chrono::{DateTime, Local, Utc};
use tminus_core::{NetworkStatus, Visualization};

const GAUGE_WIDTH: usize = 24;

pub fn status(status: NetworkStatus) -> &'static str {
    match status {
        NetworkStatus::Pending => "pending",
        NetworkStatus::Online => "online",
        NetworkStatus::Offline => "offline",
    }
}

/// Target in the observer's local time.
pub fn target(target: Option<&DateTime<Utc>>) -> String {
    match target {
        Some(t) => t
            .with_timezone(&Local)
            .format("%Y-%m-%d %H:%M:%S %:z")
            .to_string(),
        None => "TEMPORAL ERROR".to_string(),
    }
}

pub fn percent(progress: Option<f64>) -> String {
    match progress {
        Some(p) => format!("{:5.1}%", p * 100.0),
        None => "    -".to_string(),
    }
}

/// One-line gauge in the style of the event's category.
///
/// `frame` only animates the anomalous field; every other style is a pure
/// function of the progress.
pub fn gauge(visualization: Visualization, progress: Option<f64>, frame: u64) -> String {
    let p = progress.unwrap_or(0.0).clamp(0.0, 1.0);
    let filled = (p * GAUGE_WIDTH as f64).round() as usize;

    match visualization {
        Visualization::SolarArc => {
            let pos = filled.min(GAUGE_WIDTH - 1);
            let arc: String = (0..GAUGE_WIDTH)
                .map(|i| if i == pos { '*' } else { '.' })
                .collect();
            format!("({arc})")
        }
        Visualization::CalendarGrid => {
            let months = (p * 12.0).floor() as usize;
            let cells: Vec<&str> = (0..12)
                .map(|i| if i < months { "#" } else { "." })
                .collect();
            format!("[{}]", cells.join(" "))
        }
        Visualization::OrbitRing => {
            let pos = filled % GAUGE_WIDTH;
            let ring: String = (0..GAUGE_WIDTH)
                .map(|i| if i == pos { 'o' } else { '-' })
                .collect();
            format!("<{ring}>")
        }
        Visualization::GlitchField => {
            const NOISE: &[u8] = b"#%&*+=?@";
            let field: String = (0..GAUGE_WIDTH as u64)
                .map(|i| {
                    let seed = i.wrapping_mul(31).wrapping_add(frame.wrapping_mul(17)) ^ (filled as u64);
                    NOISE[(seed % NOISE.len() as u64) as usize] as char
                })
                .collect();
            format!("{{{field}}}")
        }
        Visualization::StrataBars => {
            let bars: String = (0..GAUGE_WIDTH)
                .map(|i| if i < filled { '|' } else { ' ' })
                .collect();
            format!("[{bars}]")
        }
    }
}
