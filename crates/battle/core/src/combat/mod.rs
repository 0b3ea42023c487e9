//! Damage calculation and skill dispatch.
pub mod damage;
pub mod skills;

pub use damage::{
    charge_damage, incoming_damage, mitigate, monster_outgoing_damage, percent_of,
    player_base_damage, strike_damage,
};
pub use skills::{
    ClassSkill, MonsterAction, MonsterSkill, SkillProfile, apply_class_skill, apply_monster_skill,
    check_class_skill, land_monster_attack,
};
