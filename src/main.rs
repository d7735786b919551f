// Favicon discovery CLI
//
// Prints every icon found for each URL given on the command line, plus the
// best pick, as JSON. `RUST_LOG=debug` shows the attempts.

use anyhow::Result;
use clap::Parser;
use kodegen_tools_favicon::ranker::rank;
use kodegen_tools_favicon::{
    FaviconFinder, FaviconServiceGateway, FinderConfig, IconRanker, RankCriteria, ReqwestWebClient,
};
use serde_json::json;

#[derive(Debug, Parser)]
#[command(
    name = "kodegen-favicon",
    version,
    about = "Find the favicons of web pages and pick the best one"
)]
struct Cli {
    /// Pages to inspect; a missing scheme is tried as https with and without www
    #[arg(value_name = "URL", required = true)]
    urls: Vec<String>,

    /// Largest acceptable edge length of the best icon
    #[arg(long, value_name = "N")]
    max_size: Option<u32>,

    /// Prefer icons with equal width and height
    #[arg(long, default_value_t = false)]
    square: bool,

    /// Also probe the android-chrome and apple-touch icon paths
    #[arg(long, default_value_t = false)]
    touch_icons: bool,
}

impl Cli {
    fn criteria(&self) -> RankCriteria {
        let criteria = RankCriteria::default().require_square(self.square);

        match self.max_size {
            Some(max_size) => criteria.max_size(max_size),
            None => criteria,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let criteria = cli.criteria();

    let config = FinderConfig::builder()
        .probe_touch_icons(cli.touch_icons)
        .build()?;
    let client = ReqwestWebClient::new(&config)?;
    let finder = FaviconFinder::new(client.clone(), config.clone());
    let ranker = IconRanker::new(client.clone(), &config);
    let gateway = FaviconServiceGateway::new(client, &config);

    for url in cli.urls {
        let favicons = finder.extract_measured_favicons(&url, &ranker).await;
        let best = rank(&favicons, &criteria).cloned();

        // Nothing on the site itself, ask the services
        let service_icon = match best {
            Some(_) => None,
            None => gateway
                .first_matching(&url, criteria.max_size)
                .await
                .map(|icon| json!({ "service": icon.service.name(), "url": icon.url })),
        };

        let output = json!({
            "url": url,
            "favicons": favicons,
            "best": best,
            "service_fallback": service_icon,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
    }

    Ok(())
}
