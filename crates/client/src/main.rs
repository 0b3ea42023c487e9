//! Quiz battle demo binary.
//!
//! Composition root: loads `.env`, initialises logging, loads battle content,
//! builds a [`BattleService`], and plays one scripted battle, printing every
//! snapshot to stdout as JSON. Logs go to stderr (`RUST_LOG` overrides the
//! default `info` level).
//!
//! ```bash
//! BATTLE_MONSTER=7 BATTLE_SEED=42 cargo run -p battle-client
//! ```

mod autoplay;
mod config;

use std::sync::Arc;

use anyhow::Result;
use battle_content::{ConfigLoader, ContentFactory};
use battle_core::{ErrorSeverity, GameError, SessionSnapshot, UserId};
use battle_runtime::{
    BattleService, InMemoryCharacterRepo, MonsterCatalog, QuestionBank, RuntimeConfig,
    RuntimeError,
};
use tracing_subscriber::EnvFilter;

use autoplay::{Autoplayer, Move};
use config::ClientConfig;

const PLAYER: UserId = UserId(1);

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let config = ClientConfig::from_env();
    tracing::info!("Loading content from {}", config.content_dir.display());

    let factory = ContentFactory::new(&config.content_dir);
    let battle = match &config.battle_config {
        Some(path) => ConfigLoader::load(path)?,
        None => factory.load_config()?,
    };
    let monsters = factory.load_monsters()?;
    let questions = factory.load_questions()?;
    let characters = factory.load_characters()?;
    tracing::info!(
        "Loaded {} monsters, {} questions, {} characters",
        monsters.len(),
        questions.len(),
        characters.len()
    );

    let answers = questions
        .iter()
        .map(|card| (card.id, card.answer.clone()))
        .collect();
    let mut autoplayer = Autoplayer::new(answers, battle.costs);

    let mut runtime_config = RuntimeConfig::with_battle(battle.clone());
    if let Some(seed) = config.seed {
        runtime_config = runtime_config.seed(seed);
    }

    let repository = Arc::new(InMemoryCharacterRepo::with_profiles(
        battle.leveling,
        characters,
    ));
    let service = BattleService::builder(
        repository.clone(),
        Arc::new(MonsterCatalog::new(monsters)),
        Arc::new(QuestionBank::new(questions)),
    )
    .config(runtime_config)
    .build();

    let mut snapshot = service
        .start_battle(PLAYER, config.character, config.monster, config.difficulty)
        .await?;
    print_snapshot(&snapshot)?;

    for _ in 0..config.max_steps {
        let Some(next) = autoplayer.next_move(&snapshot) else {
            break;
        };
        snapshot = match play(&service, &next).await {
            Ok(snapshot) => snapshot,
            Err(err) if err.severity() == ErrorSeverity::Validation => {
                tracing::warn!("{:?} rejected: {}", next, err);
                let Some(question) = snapshot.question.as_ref() else {
                    break;
                };
                play(&service, &autoplayer.answer(question)).await?
            }
            Err(err) => return Err(err.into()),
        };
        print_snapshot(&snapshot)?;
    }

    if !snapshot.finished {
        tracing::warn!("Step limit reached, abandoning battle");
        service.abandon_battle(PLAYER).await?;
    }

    if let Some(record) = repository.record(config.character)? {
        tracing::info!(
            "{} is level {} with {} XP and {} gold ({} won, {} lost)",
            record.profile.name,
            record.profile.level,
            record.profile.xp,
            record.gold,
            record.stats.battles_won,
            record.stats.battles_lost
        );
    }

    Ok(())
}

async fn play(service: &BattleService, next: &Move) -> Result<SessionSnapshot, RuntimeError> {
    match next {
        Move::Attack => service.attack(PLAYER).await,
        Move::Defend => service.defend(PLAYER).await,
        Move::Skill => service.use_skill(PLAYER).await,
        Move::Resolve => service.resolve_monster_turn(PLAYER).await,
        Move::Skip => service.skip_stunned_turn(PLAYER).await,
        Move::Answer(question, answer) => service.answer_question(PLAYER, *question, answer).await,
    }
}

fn print_snapshot(snapshot: &SessionSnapshot) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(snapshot)?);
    Ok(())
}
