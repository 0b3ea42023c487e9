//! Battle action surface.
//!
//! [`BattleService`] is the single entry point clients drive battles through.
//! Every action is one atomic read-modify-write of the caller's session:
//!
//! 1. lock the user's slot in the [`BattleSessionStore`]
//! 2. run the engine on a copy of the session
//! 3. report progress facts to the quest hook, then the character repository
//! 4. write the copy back, or clear the slot once the battle is finished
//!
//! A rejection at any step drops the copy, so the stored session is only
//! replaced by a fully processed one. Quest hooks are consulted before the
//! character repository is written, so a critical hook failure leaves both
//! untouched.

mod builder;

pub use builder::BattleServiceBuilder;

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use battle_core::{
    BattleEngine, BattleEnv, BattleEvent, BattleSession, BattleSetup, CharacterId,
    Difficulty, MonsterId, MonsterOracle, MonsterTemplate, PlayerAction, QuestionId,
    QuestionOracle, RngOracle, SessionId, SessionSnapshot, TurnReport, UserId, compute_seed,
    merge_quest_progress,
};
use tokio::sync::broadcast;
use tracing::{debug, info, warn};

use crate::config::RuntimeConfig;
use crate::error::{Result, RuntimeError};
use crate::events::{EventBus, SessionEvent};
use crate::hooks::{HookCriticality, HookError, QuestHook};
use crate::repository::{BattleSessionStore, CharacterRepository};
use crate::utils::Clock;

/// One state-machine step requested by a client.
#[derive(Debug, Clone, Copy)]
enum Command<'a> {
    Perform(PlayerAction),
    Answer {
        question_id: QuestionId,
        answer: &'a str,
    },
    ResolveMonsterTurn,
    SkipTurn,
}

impl Command<'_> {
    fn label(&self) -> String {
        match self {
            Self::Perform(action) => action.to_string(),
            Self::Answer { .. } => "answer".to_string(),
            Self::ResolveMonsterTurn => "resolve_monster_turn".to_string(),
            Self::SkipTurn => "skip_turn".to_string(),
        }
    }
}

pub struct BattleService {
    config: RuntimeConfig,
    store: BattleSessionStore,
    characters: Arc<dyn CharacterRepository>,
    monsters: Arc<dyn MonsterOracle>,
    questions: Arc<dyn QuestionOracle>,
    quests: Arc<dyn QuestHook>,
    rng: Arc<dyn RngOracle>,
    clock: Arc<dyn Clock>,
    events: EventBus,
    next_session: AtomicU64,
}

impl BattleService {
    pub fn builder(
        characters: Arc<dyn CharacterRepository>,
        monsters: Arc<dyn MonsterOracle>,
        questions: Arc<dyn QuestionOracle>,
    ) -> BattleServiceBuilder {
        BattleServiceBuilder::new(characters, monsters, questions)
    }

    pub fn config(&self) -> &RuntimeConfig {
        &self.config
    }

    /// Monsters a battle can be started against.
    pub fn monsters(&self) -> Vec<MonsterTemplate> {
        self.monsters.all()
    }

    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.events.subscribe()
    }

    /// Opens a battle for `user`, replacing any unfinished one.
    pub async fn start_battle(
        &self,
        user: UserId,
        character: CharacterId,
        monster: MonsterId,
        difficulty: Difficulty,
    ) -> Result<SessionSnapshot> {
        let profile = self
            .characters
            .profile(character)?
            .ok_or(RuntimeError::CharacterNotFound(character))?;
        let template = self
            .monsters
            .template(monster)
            .ok_or(RuntimeError::MonsterNotFound(monster))?;

        let mut slot = self.store.lock(user).await;

        let session_id = SessionId(self.next_session.fetch_add(1, Ordering::Relaxed));
        let setup = BattleSetup {
            session_id,
            seed: self.session_seed(user),
            difficulty,
            character: profile,
            monster: template,
        };
        let session = BattleSession::start(setup, &self.env())?;
        let snapshot = SessionSnapshot::from_session(&session);

        if let Some(previous) = slot.replace(session) {
            debug!(
                "{} replaced unfinished {} with {}",
                user, previous.id, session_id
            );
            self.events.publish(SessionEvent::BattleAbandoned {
                user,
                session: previous.id,
            });
        }
        drop(slot);

        info!(
            %user,
            session = %session_id,
            %character,
            %monster,
            %difficulty,
            "battle started"
        );
        self.events.publish(SessionEvent::BattleStarted {
            user,
            session: session_id,
            character,
            monster,
        });

        Ok(snapshot)
    }

    pub async fn attack(&self, user: UserId) -> Result<SessionSnapshot> {
        self.act(user, Command::Perform(PlayerAction::Attack)).await
    }

    pub async fn defend(&self, user: UserId) -> Result<SessionSnapshot> {
        self.act(user, Command::Perform(PlayerAction::Defend)).await
    }

    pub async fn use_skill(&self, user: UserId) -> Result<SessionSnapshot> {
        self.act(user, Command::Perform(PlayerAction::UseSkill)).await
    }

    /// Dispatches a player declaration by name (`"attack"`, `"defend"`,
    /// `"skill"`, `"useskill"`), case-insensitively.
    pub async fn perform_action(&self, user: UserId, name: &str) -> Result<SessionSnapshot> {
        let action: PlayerAction = name
            .trim()
            .parse()
            .map_err(|_| RuntimeError::InvalidAction(name.to_string()))?;
        self.act(user, Command::Perform(action)).await
    }

    pub async fn answer_question(
        &self,
        user: UserId,
        question_id: QuestionId,
        answer: &str,
    ) -> Result<SessionSnapshot> {
        self.act(
            user,
            Command::Answer {
                question_id,
                answer,
            },
        )
        .await
    }

    pub async fn resolve_monster_turn(&self, user: UserId) -> Result<SessionSnapshot> {
        self.act(user, Command::ResolveMonsterTurn).await
    }

    pub async fn skip_stunned_turn(&self, user: UserId) -> Result<SessionSnapshot> {
        self.act(user, Command::SkipTurn).await
    }

    pub async fn current_session(&self, user: UserId) -> Option<SessionSnapshot> {
        self.store
            .get(user)
            .await
            .map(|session| SessionSnapshot::from_session(&session))
    }

    /// Ends `user`'s battle without rewards or statistics.
    pub async fn abandon_battle(&self, user: UserId) -> Result<()> {
        let session = self
            .store
            .remove(user)
            .await
            .ok_or(RuntimeError::NoActiveBattle { user })?;

        info!(%user, session = %session.id, "battle abandoned");
        self.events.publish(SessionEvent::BattleAbandoned {
            user,
            session: session.id,
        });
        Ok(())
    }

    async fn act(&self, user: UserId, command: Command<'_>) -> Result<SessionSnapshot> {
        let mut slot = self.store.lock(user).await;
        let mut session = (*slot)
            .clone()
            .ok_or(RuntimeError::NoActiveBattle { user })?;

        let report = self.run_engine(&mut session, command)?;
        self.dispatch(&mut session, &report).await?;

        let label = command.label();
        debug!(
            %user,
            session = %session.id,
            action = %label,
            phase = %report.phase,
            round = session.round,
            "action resolved"
        );

        let snapshot = SessionSnapshot::from_session(&session);
        let session_id = session.id;

        match report.outcome() {
            Some(outcome) => {
                *slot = None;
                drop(slot);
                info!(%user, session = %session_id, %outcome, "battle finished");
                self.events.publish(SessionEvent::ActionResolved {
                    user,
                    session: session_id,
                    action: label,
                    phase: report.phase,
                    events: report.events,
                });
                self.events.publish(SessionEvent::BattleFinished {
                    user,
                    session: session_id,
                    outcome,
                    reward: session.reward,
                });
            }
            None => {
                *slot = Some(session);
                drop(slot);
                self.events.publish(SessionEvent::ActionResolved {
                    user,
                    session: session_id,
                    action: label,
                    phase: report.phase,
                    events: report.events,
                });
            }
        }

        Ok(snapshot)
    }

    fn run_engine(&self, session: &mut BattleSession, command: Command<'_>) -> Result<TurnReport> {
        let env = self.env();
        let mut engine = BattleEngine::new(session);
        let report = match command {
            Command::Perform(action) => engine.perform(action, &env),
            Command::Answer {
                question_id,
                answer,
            } => engine.answer(question_id, answer, &env),
            Command::ResolveMonsterTurn => engine.resolve_monster_turn(&env),
            Command::SkipTurn => engine.skip_turn(&env),
        }?;
        Ok(report)
    }

    /// Reports the engine's progress facts.
    ///
    /// Quest hooks run first so a critical hook failure rejects the action
    /// before anything reaches the character repository. Repository failures
    /// are critical; quest hook failures follow the hook's criticality.
    async fn dispatch(&self, session: &mut BattleSession, report: &TurnReport) -> Result<()> {
        let character = session.player.character_id;

        let mut quest_updates = Vec::new();
        for event in &report.events {
            let update = match event {
                BattleEvent::QuestionAnswered { correct } => {
                    self.quests.on_question_answered(character, *correct).await
                }
                BattleEvent::MonsterDefeated { monster_id } => {
                    self.quests.on_monster_defeated(character, *monster_id).await
                }
                BattleEvent::BattleWon { .. } => self.quests.on_battle_won(character).await,
                BattleEvent::BattleLost => continue,
            };

            match update {
                Ok(progress) => quest_updates.push(progress),
                Err(err) => self.quest_hook_failed(err)?,
            }
        }

        for event in &report.events {
            match event {
                BattleEvent::QuestionAnswered { correct } => {
                    self.characters.record_answer(character, *correct)?;
                }
                BattleEvent::BattleWon { reward } => {
                    let progress = self.characters.record_victory(character, *reward)?;
                    session.player.level = progress.level;
                    session.player.xp = progress.xp;
                    if progress.levels_gained > 0 {
                        session
                            .log
                            .push(format!("Level up! You reached level {}.", progress.level));
                    }
                }
                BattleEvent::BattleLost => self.characters.record_defeat(character)?,
                BattleEvent::MonsterDefeated { .. } => {}
            }
        }

        for progress in quest_updates {
            merge_quest_progress(&mut session.quests, progress);
        }
        Ok(())
    }

    fn quest_hook_failed(&self, err: HookError) -> Result<()> {
        let name = self.quests.name();
        match self.quests.criticality() {
            HookCriticality::Critical => Err(RuntimeError::Hook {
                name,
                message: err.to_string(),
            }),
            HookCriticality::Important => {
                warn!(hook = name, error = %err, "quest hook failed");
                Ok(())
            }
            HookCriticality::Optional => {
                debug!(hook = name, error = %err, "optional quest hook failed");
                Ok(())
            }
        }
    }

    fn env(&self) -> BattleEnv<'_> {
        BattleEnv::new(
            &self.config.battle,
            self.rng.as_ref(),
            self.questions.as_ref(),
            self.clock.now_ms(),
        )
    }

    fn session_seed(&self, user: UserId) -> u64 {
        match self.config.seed {
            Some(base) => compute_seed(base, user.get(), 0, 0),
            None => rand::random(),
        }
    }
}
