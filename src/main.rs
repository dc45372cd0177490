use clap::Parser;
use serde_json::Value;

use citypedia::{article, coords, infobox};

/// Citypedia — city fact sheets from Wikipedia geography infoboxes.
///
/// Fetches the article for a city, extracts population, elevation, area,
/// founding year, website and administrative region from its infobox,
/// normalizes the coordinate pair to signed decimal degrees, and prints
/// the result as indented JSON.
///
/// Examples:
///   citypedia Zurich
///   citypedia "New York City"
///   citypedia Nairobi -1.2921 36.8219
#[derive(Parser)]
#[command(name = "citypedia", version, about, long_about = None)]
struct Cli {
    /// City name / article title. "help" or "h" prints usage.
    #[arg(index = 1)]
    city: String,

    /// Latitude override (1°0′0″S, 1.0000S or -1.0000).
    #[arg(index = 2, allow_hyphen_values = true)]
    lat: Option<String>,

    /// Longitude override (1°0′0″E, 1.0000E or 1.0000).
    #[arg(index = 3, allow_hyphen_values = true)]
    lon: Option<String>,
}

const USAGE: &str = "Usage:\n  citypedia <city name>\n  citypedia <city name> <latitude> <longitude>";

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if cli.lat.is_none() && matches!(cli.city.as_str(), "help" | "h") {
        println!("{}", USAGE);
        return;
    }

    // A latitude without a longitude (or vice versa) is a usage error.
    let override_tokens = match (&cli.lat, &cli.lon) {
        (Some(lat), Some(lon)) => Some((lat.clone(), lon.clone())),
        (None, None) => None,
        _ => {
            eprintln!("{}", USAGE);
            std::process::exit(1);
        }
    };

    let html = article::fetch_article(&cli.city).unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    });

    let page = article::ArticlePage::parse(&html);
    let mut record = infobox::extract(&page.infobox_rows()).unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    });

    let (lat_token, lon_token) = match override_tokens {
        Some((lat, lon)) => (Some(lat), Some(lon)),
        None => page.coordinate_tokens(),
    };
    record.set("latitude", normalize_or_exit(lat_token));
    record.set("longitude", normalize_or_exit(lon_token));

    println!("{}", serde_json::to_string_pretty(&record).unwrap());
}

/// Normalize a coordinate token. An absent token degrades to null; a
/// malformed one is fatal.
fn normalize_or_exit(token: Option<String>) -> Value {
    match token {
        Some(token) => match coords::normalize(&token) {
            Ok(degrees) => Value::from(degrees),
            Err(e) => {
                eprintln!("Error: {}", e);
                std::process::exit(1);
            }
        },
        None => Value::Null,
    }
}
