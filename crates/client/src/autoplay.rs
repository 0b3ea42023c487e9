//! Scripted player that drives a battle to completion.

use std::collections::HashMap;

use battle_core::{ActionCosts, EffectKind, PlayerView, QuestionId, QuestionView, SessionSnapshot};

/// Next call the autoplayer wants to make.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Move {
    Attack,
    Defend,
    Skill,
    Resolve,
    Skip,
    Answer(QuestionId, String),
}

/// Knows the question bank and plays a simple aggressive line: attack while
/// energy allows, guard when low on hp, use the class skill every third turn,
/// and answer questions to regain energy.
pub struct Autoplayer {
    answers: HashMap<QuestionId, String>,
    costs: ActionCosts,
    turns: u32,
}

impl Autoplayer {
    pub fn new(answers: HashMap<QuestionId, String>, costs: ActionCosts) -> Self {
        Self {
            answers,
            costs,
            turns: 0,
        }
    }

    pub fn next_move(&mut self, snapshot: &SessionSnapshot) -> Option<Move> {
        if snapshot.finished {
            return None;
        }
        if snapshot.waiting_for_monster_resolution {
            return Some(Move::Resolve);
        }
        let question = snapshot.question.as_ref()?;
        if snapshot.bard_challenge_active {
            return Some(self.answer(question));
        }

        let player = &snapshot.player;
        if has(player, EffectKind::Stun) {
            return Some(Move::Skip);
        }

        self.turns += 1;
        if player.energy < self.costs.attack {
            return Some(self.answer(question));
        }
        if player.hp.saturating_mul(4) < player.max_hp && player.energy >= self.costs.defend {
            return Some(Move::Defend);
        }
        if self.turns % 3 == 0
            && player.energy >= self.costs.skill
            && !has(player, EffectKind::DisableSkill)
        {
            return Some(Move::Skill);
        }
        Some(Move::Attack)
    }

    /// Answer for the current question. Falls back to the first option for
    /// cards missing from the bank.
    pub fn answer(&self, question: &QuestionView) -> Move {
        let answer = self
            .answers
            .get(&question.id)
            .cloned()
            .or_else(|| question.options.first().cloned())
            .unwrap_or_default();
        Move::Answer(question.id, answer)
    }
}

fn has(player: &PlayerView, kind: EffectKind) -> bool {
    player.effects.iter().any(|effect| effect.kind == kind)
}

#[cfg(test)]
mod tests {
    use super::*;
    use battle_core::{
        Attributes, BattleConfig, BattleEnv, BattleSession, BattleSetup, CharacterClass,
        CharacterId, CharacterProfile, Difficulty, Effect, FixedRng, MonsterId, MonsterKind,
        MonsterTemplate, OracleError, QuestionCard, QuestionOracle, QuestionRequest, SessionId,
    };

    struct OneCard;

    impl QuestionOracle for OneCard {
        fn draw(&self, _: &QuestionRequest, _: u64) -> Result<QuestionCard, OracleError> {
            Ok(QuestionCard {
                id: QuestionId(9),
                prompt: "Pick b".into(),
                options: vec!["a".into(), "b".into()],
                answer: "b".into(),
                hint: None,
                difficulty: Difficulty::Easy,
                min_level: 1,
            })
        }
    }

    fn snapshot() -> SessionSnapshot {
        let config = BattleConfig::default();
        let rng = FixedRng(0);
        let env = BattleEnv::new(&config, &rng, &OneCard, 0);
        let setup = BattleSetup {
            session_id: SessionId(1),
            seed: 1,
            difficulty: Difficulty::Easy,
            character: CharacterProfile {
                id: CharacterId(1),
                name: "Aldric".into(),
                class: CharacterClass::Paladin,
                level: 1,
                xp: 0,
                max_hp: 100,
                max_energy: None,
                attributes: Attributes::default(),
            },
            monster: MonsterTemplate {
                id: MonsterId(1),
                name: "Zombie".into(),
                kind: MonsterKind::DementedZombie,
                max_hp: 30,
                damage: 5,
                defense: 0,
            },
        };
        let session = BattleSession::start(setup, &env).unwrap();
        SessionSnapshot::from_session(&session)
    }

    fn player() -> Autoplayer {
        let answers = HashMap::from([(QuestionId(9), "b".to_string())]);
        Autoplayer::new(answers, ActionCosts::default())
    }

    #[test]
    fn attacks_then_skills_on_third_turn() {
        let mut bot = player();
        let view = snapshot();
        assert_eq!(bot.next_move(&view), Some(Move::Attack));
        assert_eq!(bot.next_move(&view), Some(Move::Attack));
        assert_eq!(bot.next_move(&view), Some(Move::Skill));
    }

    #[test]
    fn answers_when_out_of_energy() {
        let mut bot = player();
        let mut view = snapshot();
        view.player.energy = 1;
        assert_eq!(
            bot.next_move(&view),
            Some(Move::Answer(QuestionId(9), "b".into()))
        );
    }

    #[test]
    fn defends_when_low_and_skips_when_stunned() {
        let mut bot = player();
        let mut view = snapshot();
        view.player.hp = view.player.max_hp / 5;
        assert_eq!(bot.next_move(&view), Some(Move::Defend));

        view.player
            .effects
            .push(Effect::new(EffectKind::Stun, 0, 1, "Stunned"));
        assert_eq!(bot.next_move(&view), Some(Move::Skip));
    }

    #[test]
    fn resolves_and_stops() {
        let mut bot = player();
        let mut view = snapshot();
        view.waiting_for_monster_resolution = true;
        assert_eq!(bot.next_move(&view), Some(Move::Resolve));

        view.finished = true;
        assert_eq!(bot.next_move(&view), None);
    }

    #[test]
    fn unknown_cards_fall_back_to_first_option() {
        let bot = Autoplayer::new(HashMap::new(), ActionCosts::default());
        let view = snapshot();
        let question = view.question.as_ref().unwrap();
        assert_eq!(bot.answer(question), Move::Answer(QuestionId(9), "a".into()));
    }
}
