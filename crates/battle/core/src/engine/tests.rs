use std::sync::atomic::{AtomicUsize, Ordering};

use proptest::prelude::*;

use super::*;
use crate::config::BattleConfig;
use crate::env::{FixedRng, MonsterTemplate, OracleError, PcgRng, QuestionOracle, QuestionRequest, RngOracle};
use crate::snapshot::SessionSnapshot;
use crate::state::{
    Attributes, BattleOutcome, BattleSetup, CharacterClass, CharacterId, CharacterProfile,
    Difficulty, Effect, EffectKind, MonsterId, MonsterKind, QuestionCard, Reward, SessionId,
};

/// Every card's correct answer is "yes".
struct Deck(Vec<QuestionCard>);

impl Deck {
    fn new(size: u64) -> Self {
        Self(
            (1..=size)
                .map(|id| QuestionCard {
                    id: QuestionId(id),
                    prompt: format!("Is sentence number {id} grammatically correct"),
                    options: vec!["yes".into(), "no".into(), "maybe".into()],
                    answer: "yes".into(),
                    hint: None,
                    difficulty: Difficulty::Easy,
                    min_level: 1,
                })
                .collect(),
        )
    }
}

impl QuestionOracle for Deck {
    fn draw(&self, request: &QuestionRequest, seed: u64) -> Result<QuestionCard, OracleError> {
        let eligible: Vec<&QuestionCard> = self
            .0
            .iter()
            .filter(|card| card.difficulty == request.difficulty && card.min_level <= request.level)
            .filter(|card| Some(card.id) != request.exclude)
            .collect();
        if eligible.is_empty() {
            return Err(OracleError::NoQuestionFor {
                difficulty: request.difficulty,
                level: request.level,
            });
        }
        Ok(eligible[(seed % eligible.len() as u64) as usize].clone())
    }
}

/// Replays a fixed list of values, cycling when exhausted.
struct Script {
    values: Vec<u32>,
    cursor: AtomicUsize,
}

impl Script {
    fn new(values: &[u32]) -> Self {
        Self {
            values: values.to_vec(),
            cursor: AtomicUsize::new(0),
        }
    }
}

impl RngOracle for Script {
    fn next_u32(&self, _seed: u64) -> u32 {
        let index = self.cursor.fetch_add(1, Ordering::SeqCst);
        self.values[index % self.values.len()]
    }
}

struct Fixture<R: RngOracle> {
    config: BattleConfig,
    rng: R,
    deck: Deck,
    now_ms: u64,
}

impl<R: RngOracle> Fixture<R> {
    fn new(rng: R) -> Self {
        Self {
            config: BattleConfig::new(),
            rng,
            deck: Deck::new(4),
            now_ms: 1_000,
        }
    }

    fn env(&self) -> BattleEnv<'_> {
        BattleEnv::new(&self.config, &self.rng, &self.deck, self.now_ms)
    }

    fn start(&self, class: CharacterClass, kind: MonsterKind) -> BattleSession {
        let setup = BattleSetup {
            session_id: SessionId(1),
            seed: 42,
            difficulty: Difficulty::Easy,
            character: CharacterProfile {
                id: CharacterId(7),
                name: "Ada".into(),
                class,
                level: 1,
                xp: 0,
                max_hp: 100,
                max_energy: Some(10),
                attributes: Attributes {
                    strength: 8,
                    intelligence: 6,
                    defense: 4,
                },
            },
            monster: MonsterTemplate {
                id: MonsterId(3),
                name: kind.to_string(),
                kind,
                max_hp: 50,
                damage: 10,
                defense: 0,
            },
        };
        BattleSession::start(setup, &self.env()).expect("deck has questions")
    }
}

fn answer_correctly<R: RngOracle>(fx: &Fixture<R>, session: &mut BattleSession) -> TurnReport {
    let id = session.question.id;
    BattleEngine::new(session)
        .answer(id, "yes", &fx.env())
        .expect("answer accepted")
}

fn answer_wrong<R: RngOracle>(fx: &Fixture<R>, session: &mut BattleSession) -> TurnReport {
    let id = session.question.id;
    BattleEngine::new(session)
        .answer(id, "no", &fx.env())
        .expect("answer accepted")
}

#[test]
fn start_fills_both_sides() {
    let fx = Fixture::new(FixedRng(0));
    let session = fx.start(CharacterClass::Fighter, MonsterKind::DementedZombie);
    let snapshot = SessionSnapshot::from_session(&session);

    assert_eq!((snapshot.player.hp, snapshot.player.max_hp), (100, 100));
    assert_eq!((snapshot.player.energy, snapshot.player.max_energy), (10, 10));
    assert_eq!((snapshot.monster.hp, snapshot.monster.max_hp), (50, 50));
    assert!(snapshot.is_player_turn);
    assert!(!snapshot.waiting_for_monster_resolution);
    assert!(snapshot.question.is_some());
}

#[test]
fn attack_spends_energy_and_queues_strike() {
    let fx = Fixture::new(FixedRng(0));
    let mut session = fx.start(CharacterClass::Fighter, MonsterKind::DementedZombie);

    let report = BattleEngine::new(&mut session).attack(&fx.env()).unwrap();

    assert_eq!(report.phase, BattlePhase::AwaitingMonsterResolution);
    assert_eq!(session.player.energy.current(), 8);
    assert_eq!(
        session.pending,
        Some(PendingStrike {
            damage: 8,
            charge: false
        })
    );
    let snapshot = SessionSnapshot::from_session(&session);
    assert_eq!(snapshot.pending_damage, 8);
    assert!(snapshot.waiting_for_monster_resolution);
    assert!(!snapshot.is_player_turn);
}

#[test]
fn resolution_lands_both_blows_once() {
    let fx = Fixture::new(FixedRng(0));
    let mut session = fx.start(CharacterClass::Fighter, MonsterKind::DementedZombie);
    let env = fx.env();

    BattleEngine::new(&mut session).attack(&env).unwrap();
    let report = BattleEngine::new(&mut session)
        .resolve_monster_turn(&env)
        .unwrap();

    assert_eq!(report.phase, BattlePhase::AwaitingPlayerAction);
    assert_eq!(session.log.monster_action, Some(crate::combat::MonsterAction::Attack));
    assert_eq!(session.player.hp.current(), 91);
    assert_eq!(session.monster.hp.current(), 42);
    assert_eq!(session.pending, None);
    assert_eq!(session.round, 1);

    let err = BattleEngine::new(&mut session)
        .resolve_monster_turn(&env)
        .unwrap_err();
    assert!(matches!(err, BattleError::WrongPhase { .. }));
    assert_eq!(session.monster.hp.current(), 42);
}

#[test]
fn wrong_answer_drains_corruption_then_resolves_inline() {
    let fx = Fixture::new(FixedRng(0));
    let mut session = fx.start(CharacterClass::Fighter, MonsterKind::DementedZombie);
    session
        .player
        .effects
        .add(Effect::new(EffectKind::Corruption, 5, 3, "corrupted"));
    let previous_question = session.question.id;

    let report = answer_wrong(&fx, &mut session);

    assert_eq!(report.events, vec![BattleEvent::QuestionAnswered { correct: false }]);
    assert_eq!(session.player.hp.current(), 100 - 5 - 9);
    assert_eq!(report.phase, BattlePhase::AwaitingPlayerAction);
    assert_ne!(session.question.id, previous_question);
}

#[test]
fn disabled_skill_is_rejected_without_mutation() {
    let fx = Fixture::new(FixedRng(0));
    let mut session = fx.start(CharacterClass::Paladin, MonsterKind::DementedZombie);
    session
        .player
        .effects
        .add(Effect::new(EffectKind::DisableSkill, 0, 1, "amnesia"));
    let before = session.clone();

    let err = BattleEngine::new(&mut session).use_skill(&fx.env()).unwrap_err();

    assert_eq!(err, BattleError::SkillDisabled);
    assert_eq!(session, before);
}

#[test]
fn bard_challenge_won_pays_double() {
    let fx = Fixture::new(FixedRng(0));
    let mut session = fx.start(CharacterClass::Bard, MonsterKind::Malak);
    let opening = session.question.id;

    let report = BattleEngine::new(&mut session).use_skill(&fx.env()).unwrap();
    assert_eq!(report.phase, BattlePhase::AwaitingChallengeAnswer);
    assert_ne!(session.question.id, opening);
    let snapshot = SessionSnapshot::from_session(&session);
    assert!(snapshot.bard_challenge_active);
    assert!(!snapshot.is_player_turn && !snapshot.waiting_for_monster_resolution);

    let report = answer_correctly(&fx, &mut session);
    let reward = Reward {
        xp: 100,
        gold: 40,
        challenge: true,
    };
    assert_eq!(report.outcome(), Some(BattleOutcome::Victory));
    assert_eq!(
        report.events,
        vec![
            BattleEvent::QuestionAnswered { correct: true },
            BattleEvent::MonsterDefeated {
                monster_id: MonsterId(3)
            },
            BattleEvent::BattleWon { reward },
        ]
    );
    assert_eq!(session.reward, Some(reward));
}

#[test]
fn bard_challenge_lost_costs_hp_and_the_battle() {
    let fx = Fixture::new(FixedRng(0));
    let mut session = fx.start(CharacterClass::Bard, MonsterKind::Malak);
    BattleEngine::new(&mut session).use_skill(&fx.env()).unwrap();

    let report = answer_wrong(&fx, &mut session);

    assert_eq!(report.outcome(), Some(BattleOutcome::Defeat));
    assert_eq!(session.player.hp.current(), 70);
    assert_eq!(report.events.last(), Some(&BattleEvent::BattleLost));
    assert_eq!(
        BattleEngine::new(&mut session).attack(&fx.env()).unwrap_err(),
        BattleError::BattleFinished
    );
}

#[test]
fn stun_lasts_exactly_one_player_turn() {
    // skill on the first resolution, defend on the second
    let fx = Fixture::new(Script::new(&[2, 0, 1, 0]));
    let mut session = fx.start(CharacterClass::Fighter, MonsterKind::SyntaxSkeleton);
    let env = fx.env();

    BattleEngine::new(&mut session).attack(&env).unwrap();
    BattleEngine::new(&mut session).resolve_monster_turn(&env).unwrap();
    assert!(session.player.is_stunned());
    assert_eq!(session.player.hp.current(), 91);

    let before = session.clone();
    assert_eq!(
        BattleEngine::new(&mut session).attack(&env).unwrap_err(),
        BattleError::Stunned
    );
    let id = session.question.id;
    assert_eq!(
        BattleEngine::new(&mut session).answer(id, "yes", &env).unwrap_err(),
        BattleError::Stunned
    );
    assert_eq!(session, before);

    BattleEngine::new(&mut session).skip_turn(&env).unwrap();
    assert!(!session.player.is_stunned());
    assert_eq!(
        BattleEngine::new(&mut session).skip_turn(&env).unwrap_err(),
        BattleError::NotStunned
    );
    assert!(BattleEngine::new(&mut session).attack(&env).is_ok());
}

#[test]
fn imp_streak_forces_two_buffed_attacks() {
    let fx = Fixture::new(Script::new(&[2, 0, 1, 1]));
    let mut session = fx.start(CharacterClass::Fighter, MonsterKind::ErrantImp);
    let env = fx.env();
    let round = |session: &mut BattleSession| {
        BattleEngine::new(session).attack(&env).unwrap();
        BattleEngine::new(session).resolve_monster_turn(&env).unwrap();
        SessionSnapshot::from_session(session)
    };

    let after_skill = round(&mut session);
    assert_eq!(after_skill.player.hp, 100);
    assert_eq!(after_skill.monster.guaranteed_attacks, 2);

    let first = round(&mut session);
    assert_eq!(first.player.hp, 86);
    assert_eq!(first.monster.guaranteed_attacks, 1);

    let second = round(&mut session);
    assert_eq!(second.player.hp, 72);
    assert_eq!(second.monster.guaranteed_attacks, 0);
    assert!(session.monster.streak.is_none());

    let free = round(&mut session);
    assert_eq!(free.player.hp, 72);
    assert_eq!(session.log.monster_action, Some(crate::combat::MonsterAction::Defend));
}

#[test]
fn zombie_ignorance_absorbs_the_next_strike() {
    let fx = Fixture::new(Script::new(&[2, 0]));
    let mut session = fx.start(CharacterClass::Fighter, MonsterKind::DementedZombie);
    let env = fx.env();

    BattleEngine::new(&mut session).attack(&env).unwrap();
    BattleEngine::new(&mut session).resolve_monster_turn(&env).unwrap();

    assert_eq!(session.monster.hp.current(), 46);
    assert!(!session.monster.effects.has(EffectKind::DamageReduction));
}

#[test]
fn charge_is_amplified_and_ignores_guard() {
    // monster defends
    let fx = Fixture::new(Script::new(&[1, 0]));
    let mut session = fx.start(CharacterClass::Fighter, MonsterKind::DementedZombie);
    let env = fx.env();

    BattleEngine::new(&mut session).use_skill(&env).unwrap();
    assert_eq!(session.player.energy.current(), 7);
    BattleEngine::new(&mut session).resolve_monster_turn(&env).unwrap();

    assert_eq!(session.monster.hp.current(), 50 - 9);
}

#[test]
fn centaur_volley_times_the_next_answer() {
    let mut fx = Fixture::new(Script::new(&[2, 0, 1, 0]));
    let mut session = fx.start(CharacterClass::Fighter, MonsterKind::QuestioningCentaur);

    BattleEngine::new(&mut session).defend(&fx.env()).unwrap();
    BattleEngine::new(&mut session).resolve_monster_turn(&fx.env()).unwrap();
    assert_eq!(session.question.deadline_ms, Some(16_000));
    assert!(session.player.effects.has(EffectKind::ExtraQuestion));

    fx.now_ms = 20_000;
    let report = answer_correctly(&fx, &mut session);
    assert_eq!(report.events, vec![BattleEvent::QuestionAnswered { correct: false }]);
    assert_eq!(session.question.deadline_ms, None);
}

#[test]
fn malak_blocks_energy_recovery() {
    let fx = Fixture::new(Script::new(&[2, 1, 1, 0]));
    let mut session = fx.start(CharacterClass::Fighter, MonsterKind::Malak);
    let env = fx.env();

    BattleEngine::new(&mut session).attack(&env).unwrap();
    BattleEngine::new(&mut session).resolve_monster_turn(&env).unwrap();
    assert!(session.player.effects.has(EffectKind::BlockEnergyRecovery));

    answer_correctly(&fx, &mut session);
    assert_eq!(session.player.energy.current(), 8);
}

#[test]
fn correct_answer_restores_energy_and_keeps_turn() {
    let fx = Fixture::new(FixedRng(0));
    let mut session = fx.start(CharacterClass::Fighter, MonsterKind::DementedZombie);
    session.player.energy.spend(5);
    let opening = session.question.id;

    let report = answer_correctly(&fx, &mut session);

    assert_eq!(report.phase, BattlePhase::AwaitingPlayerAction);
    assert_eq!(session.player.energy.current(), 6);
    assert_ne!(session.question.id, opening);
    assert_eq!(session.player.hp.current(), 100);
}

#[test]
fn lexical_blindness_hides_the_prompt() {
    let fx = Fixture::new(Script::new(&[2, 2]));
    let mut session = fx.start(CharacterClass::Fighter, MonsterKind::Malak);
    let env = fx.env();

    BattleEngine::new(&mut session).attack(&env).unwrap();
    BattleEngine::new(&mut session).resolve_monster_turn(&env).unwrap();

    let view = SessionSnapshot::from_session(&session).question.unwrap();
    assert_eq!(view.prompt, None);
    assert_eq!(view.options.len(), 3);
}

#[test]
fn harpy_may_scramble_the_question() {
    let fx = Fixture::new(Script::new(&[2, 0, 0]));
    let mut session = fx.start(CharacterClass::Fighter, MonsterKind::InquiringHarpy);
    let env = fx.env();

    BattleEngine::new(&mut session).attack(&env).unwrap();
    BattleEngine::new(&mut session).resolve_monster_turn(&env).unwrap();

    assert_eq!(session.player.hp.current(), 91);
    let view = SessionSnapshot::from_session(&session).question.unwrap();
    assert!(view.scrambled);
}

#[test]
fn clairvoyance_needs_an_incorrect_option() {
    let fx = Fixture::new(FixedRng(0));
    let mut session = fx.start(CharacterClass::Mage, MonsterKind::DementedZombie);
    let env = fx.env();

    BattleEngine::new(&mut session).use_skill(&env).unwrap();
    assert_eq!(session.question.options.len(), 2);
    assert_eq!(session.player.energy.current(), 7);

    session.phase = BattlePhase::AwaitingPlayerAction;
    session.question.options.retain(|option| option == "yes");
    let before = session.clone();
    assert_eq!(
        BattleEngine::new(&mut session).use_skill(&env).unwrap_err(),
        BattleError::NothingToReveal
    );
    assert_eq!(session, before);
}

#[test]
fn insight_reveals_first_letter_without_hint() {
    let fx = Fixture::new(FixedRng(0));
    let mut session = fx.start(CharacterClass::Rogue, MonsterKind::DementedZombie);

    BattleEngine::new(&mut session).use_skill(&fx.env()).unwrap();

    let view = SessionSnapshot::from_session(&session).question.unwrap();
    assert_eq!(view.hint.as_deref(), Some("The answer starts with the letter 'Y'."));
}

#[test]
fn heal_is_capped_at_max_hp() {
    let fx = Fixture::new(FixedRng(0));
    let mut session = fx.start(CharacterClass::Paladin, MonsterKind::DementedZombie);
    session.player.hp.drain(4);

    BattleEngine::new(&mut session).use_skill(&fx.env()).unwrap();
    assert_eq!(session.player.hp.current(), 100);
}

#[test]
fn insufficient_energy_is_rejected() {
    let fx = Fixture::new(FixedRng(0));
    let mut session = fx.start(CharacterClass::Tank, MonsterKind::DementedZombie);
    session.player.energy.spend(9);

    assert_eq!(
        BattleEngine::new(&mut session).attack(&fx.env()).unwrap_err(),
        BattleError::InsufficientEnergy {
            required: 2,
            available: 1
        }
    );
    assert!(BattleEngine::new(&mut session).defend(&fx.env()).is_ok());
}

#[test]
fn answering_a_stale_question_is_rejected() {
    let fx = Fixture::new(FixedRng(0));
    let mut session = fx.start(CharacterClass::Fighter, MonsterKind::DementedZombie);
    let current = session.question.id;

    let err = BattleEngine::new(&mut session)
        .answer(QuestionId(999), "yes", &fx.env())
        .unwrap_err();
    assert_eq!(
        err,
        BattleError::QuestionMismatch {
            expected: current,
            provided: QuestionId(999)
        }
    );
}

#[test]
fn monster_death_wins_the_battle() {
    let fx = Fixture::new(FixedRng(0));
    let mut session = fx.start(CharacterClass::Fighter, MonsterKind::DementedZombie);
    session.monster.hp.drain(45);
    session.player.hp.drain(95);
    let env = fx.env();

    BattleEngine::new(&mut session).attack(&env).unwrap();
    let report = BattleEngine::new(&mut session)
        .resolve_monster_turn(&env)
        .unwrap();

    // both fall in the same resolution; the monster is checked first
    assert_eq!(report.outcome(), Some(BattleOutcome::Victory));
    assert_eq!(
        session.reward,
        Some(Reward {
            xp: 50,
            gold: 20,
            challenge: false
        })
    );
    assert!(SessionSnapshot::from_session(&session).question.is_none());
}

#[test]
fn player_death_loses_the_battle() {
    let fx = Fixture::new(FixedRng(0));
    let mut session = fx.start(CharacterClass::Fighter, MonsterKind::DementedZombie);
    session.player.hp.drain(95);

    let report = answer_wrong(&fx, &mut session);

    assert_eq!(report.outcome(), Some(BattleOutcome::Defeat));
    assert_eq!(report.events.last(), Some(&BattleEvent::BattleLost));
}

#[test]
fn actions_parse_by_name() {
    use core::str::FromStr;
    assert_eq!(PlayerAction::from_str("Attack"), Ok(PlayerAction::Attack));
    assert_eq!(PlayerAction::from_str("useSkill"), Ok(PlayerAction::UseSkill));
    assert_eq!(PlayerAction::from_str("skill"), Ok(PlayerAction::UseSkill));
    assert!(PlayerAction::from_str("flee").is_err());
}

proptest! {
    #[test]
    fn invariants_hold_across_random_play(
        seed in any::<u64>(),
        class in 0usize..6,
        kind in 0usize..7,
        steps in proptest::collection::vec(0u8..6, 1..40),
    ) {
        use strum::IntoEnumIterator;
        let fx = Fixture::new(PcgRng);
        let class = CharacterClass::iter().nth(class).unwrap();
        let kind = MonsterKind::iter().nth(kind).unwrap();
        let mut session = fx.start(class, kind);
        session.seed = seed;
        let env = fx.env();

        for step in steps {
            let monster_hp = session.monster.hp.current();
            let pending = session.pending;
            let id = session.question.id;
            let mut engine = BattleEngine::new(&mut session);
            let result = match step {
                0 => engine.attack(&env),
                1 => engine.defend(&env),
                2 => engine.use_skill(&env),
                3 => engine.answer(id, "yes", &env),
                4 => engine.answer(id, "no", &env),
                _ => engine
                    .resolve_monster_turn(&env)
                    .or_else(|_| engine.skip_turn(&env)),
            };

            prop_assert!(session.player.energy.current() <= session.player.energy.maximum());
            if session.pending.is_some() {
                prop_assert_eq!(session.phase, BattlePhase::AwaitingMonsterResolution);
            }
            // the monster only loses hp through a pending strike that is then cleared
            if session.monster.hp.current() < monster_hp {
                prop_assert!(pending.is_some() || result.as_ref().is_ok_and(|r| r.is_finished()));
                prop_assert!(session.pending.is_none());
            }
            let snapshot = SessionSnapshot::from_session(&session);
            let owners = [
                snapshot.is_player_turn,
                snapshot.waiting_for_monster_resolution,
                snapshot.bard_challenge_active,
                snapshot.finished,
            ];
            prop_assert_eq!(owners.iter().filter(|flag| **flag).count(), 1);
            if session.is_finished() {
                break;
            }
        }
    }
}
