use std::path::PathBuf;

use clap::Parser;
use glasstris_engine::{BagSeed, GameConfig};
use ratatui_runtime::Runtime;

use crate::{app::GameApp, score_store::ScoreStore};

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    /// Player name recorded in the high-score table
    #[clap(long, default_value = "player")]
    player: String,
    /// Seed for the piece sequence (random when omitted)
    #[clap(long)]
    seed: Option<u128>,
    /// Frame rate of the TUI loop
    #[clap(long, default_value_t = 60.0)]
    fps: f64,
    /// Path to the high-score file
    #[clap(long, default_value = "./glasstris-scores.json")]
    scores_file: PathBuf,
}

pub fn run() -> anyhow::Result<()> {
    let args = CommandArgs::parse();
    let mut store = ScoreStore::load(&args.scores_file)?;

    let mut app = GameApp::new(GameConfig::default(), args.seed.map(BagSeed::from), args.fps);
    Runtime::new().run(&mut app)?;

    store.record(&args.player, app.best_score());
    store.save()?;

    println!("Final score for {}: {}", args.player, app.best_score());
    println!();
    println!("High scores ({})", store.path().display());
    for (rank, entry) in store.entries().iter().take(10).enumerate() {
        println!("{:>2}. {:<16} {:>9}", rank + 1, entry.name, entry.score);
    }

    Ok(())
}
