//! End-to-end battle scenarios through the public API.
//!
//! All scenarios inject stub RNG oracles, so every asserted figure is exact:
//! `ConstRng(u32::MAX)` fails every sub-certain chance roll and draws maximal
//! uniforms (rolls land at the buffed maximum, certain effects still fire);
//! `ConstRng(0)` succeeds every chance roll and draws minimal uniforms.

use battle_core::{
    ActionError, AttackDefinition, Battle, BattleEnv, BattlePhase, CardDefinition, Combatant,
    Control, DamageCap, DamageRange, DefenseKind, EffectKind, EffectSpec, PlayerId, RngOracle,
    RoundAction, Side, SubEvent, TurnRange,
};

struct ConstRng(u32);

impl RngOracle for ConstRng {
    fn next_u32(&self, _seed: u64) -> u32 {
        self.0
    }
}

fn plain_card(hp: u32) -> CardDefinition {
    CardDefinition::new("Gegner", hp).with_attack(AttackDefinition::direct("Hieb", 10, 10))
}

fn start(a: CardDefinition, b: CardDefinition) -> Battle {
    let a = Combatant::new(Control::Human(PlayerId(1)), a, 0, [0; 4]);
    let b = Combatant::new(Control::Ai, b, 0, [0; 4]);
    Battle::start(a, b, 1234)
}

#[test]
fn fixed_damage_attack_reduces_hp_and_renders_the_round() {
    let rng = ConstRng(u32::MAX);
    let env = BattleEnv::with_rng(&rng);
    let card = CardDefinition::new("Feuerdrache", 140)
        .with_attack(AttackDefinition::direct("Krallenhieb", 20, 20));
    let mut battle = start(card, plain_card(140));

    let result = battle.submit_action(&env, Side::A, 0).unwrap();

    assert_eq!(battle.combatant(Side::B).hp, 120);
    assert!(result.log_fragment.contains("Runde 1"));
    assert!(result.log_fragment.contains("Krallenhieb"));
    assert!(result.log_fragment.contains("20 Schaden"));
    assert!(!result.log_fragment.contains("VOLLTREFFER"));
}

#[test]
fn evade_dodges_the_attack_and_counters() {
    let rng = ConstRng(u32::MAX);
    let env = BattleEnv::with_rng(&rng);
    let card = CardDefinition::new("Schattenwolf", 100).with_attack(
        AttackDefinition::utility("Tarnung").with_effect(EffectSpec::new(EffectKind::Evade {
            counter: 10,
            uses: 1,
        })),
    );
    let mut battle = start(card, plain_card(100));

    battle.submit_action(&env, Side::A, 0).unwrap();
    let result = battle.submit_action(&env, Side::B, 0).unwrap();

    assert!(result.entry.dodged);
    assert_eq!(result.entry.damage, 0);
    assert!(result.entry.events.contains(&SubEvent::Dodged));
    assert!(result.entry.events.contains(&SubEvent::Counter { damage: 10 }));
    // The dodger is untouched; the attacker took the counter.
    assert_eq!(battle.combatant(Side::A).hp, 100);
    assert_eq!(battle.combatant(Side::B).hp, 90);
    assert!(result.log_fragment.contains("weicht aus!"));
}

#[test]
fn cap_damage_bounds_the_roll_to_the_attack_minimum() {
    let rng = ConstRng(u32::MAX);
    let env = BattleEnv::with_rng(&rng);
    let card = CardDefinition::new("Kanonenkrebs", 100).with_attack(
        AttackDefinition::direct("Präzisionsschuss", 15, 30).with_effect(EffectSpec::new(
            EffectKind::CapDamage {
                cap: DamageCap::AttackMin,
            },
        )),
    );
    let mut battle = start(card, plain_card(100));

    let result = battle.submit_action(&env, Side::A, 0).unwrap();

    // The max roll of 30 is clamped to the attack's own minimum.
    assert_eq!(result.entry.damage, 15);
    assert_eq!(battle.combatant(Side::B).hp, 85);
}

#[test]
fn delayed_defense_waits_for_a_landing_hit() {
    let rng = ConstRng(u32::MAX);
    let env = BattleEnv::with_rng(&rng);
    let card = CardDefinition::new("Schattenwolf", 100)
        .with_attack(
            AttackDefinition::direct("Hinterhalt", 20, 30).with_effect(EffectSpec::new(
                EffectKind::DelayedDefense {
                    defense: DefenseKind::Evade { counter: 12 },
                },
            )),
        )
        .with_attack(AttackDefinition::utility("Finte"))
        .with_attack(AttackDefinition::direct("Stoß", 10, 10));
    let mut battle = start(card, plain_card(100));

    // Queues the defense; it cannot activate off the attack that queued it.
    let result = battle.submit_action(&env, Side::A, 0).unwrap();
    assert!(result.entry.events.contains(&SubEvent::DefenseQueued));
    assert!(!result.entry.events.contains(&SubEvent::DefenseActivated));
    assert_eq!(battle.combatant(Side::B).hp, 70);

    // The queued defense does not protect yet.
    battle.submit_action(&env, Side::B, 0).unwrap();
    assert_eq!(battle.combatant(Side::A).hp, 90);

    // A zero-intent attack defers activation.
    let result = battle.submit_action(&env, Side::A, 1).unwrap();
    assert!(result.entry.events.contains(&SubEvent::DefenseDeferred));

    battle.submit_action(&env, Side::B, 0).unwrap();
    assert_eq!(battle.combatant(Side::A).hp, 80);

    // A landing hit with damage intent activates it.
    let result = battle.submit_action(&env, Side::A, 2).unwrap();
    assert!(result.entry.events.contains(&SubEvent::DefenseActivated));
    assert_eq!(battle.combatant(Side::B).hp, 60);

    // Now the next incoming attack is dodged and countered.
    let result = battle.submit_action(&env, Side::B, 0).unwrap();
    assert!(result.entry.dodged);
    assert_eq!(battle.combatant(Side::A).hp, 80);
    assert_eq!(battle.combatant(Side::B).hp, 48);
}

#[test]
fn airborne_two_phase_attack_misses_then_lands() {
    let rng = ConstRng(u32::MAX);
    let env = BattleEnv::with_rng(&rng);
    let card = CardDefinition::new("Sturmadler", 100).with_attack(
        AttackDefinition::utility("Sturzflug").with_effect(EffectSpec::new(EffectKind::Airborne {
            landing: DamageRange::new(35, 40),
            landing_cooldown: Some(2),
        })),
    );
    let mut battle = start(card, plain_card(100));

    // Takeoff: no damage, the cooldown is deferred to the landing.
    let result = battle.submit_action(&env, Side::A, 0).unwrap();
    assert!(result.entry.events.contains(&SubEvent::AirborneEntered));
    assert!(!result
        .entry
        .events
        .iter()
        .any(|e| matches!(e, SubEvent::CooldownStarted { .. })));
    assert!(result.status_a.contains(&"in der Luft".to_string()));

    // The opponent's attack auto-misses while the owner is airborne.
    let result = battle.submit_action(&env, Side::B, 0).unwrap();
    assert!(result.entry.events.contains(&SubEvent::ForcedMiss));
    assert_eq!(battle.combatant(Side::A).hp, 100);

    // The owner's next action is the forced landing, whatever was submitted.
    let result = battle.submit_action(&env, Side::A, 0).unwrap();
    assert_eq!(
        result.entry.action,
        RoundAction::ForcedLanding {
            name: "Sturzflug".to_string()
        }
    );
    assert_eq!(result.entry.damage, 40);
    assert!(result.entry.events.contains(&SubEvent::AirborneLanded));
    assert!(result
        .entry
        .events
        .contains(&SubEvent::CooldownStarted {
            attack: "Sturzflug".to_string(),
            turns: 2
        }));
    assert_eq!(battle.combatant(Side::B).hp, 60);

    // The takeoff attack is now cooling down.
    battle.submit_action(&env, Side::B, 0).unwrap();
    let err = battle.submit_action(&env, Side::A, 0).unwrap_err();
    assert_eq!(
        err,
        ActionError::OnCooldown {
            name: "Sturzflug".to_string(),
            remaining: 1
        }
    );
}

#[test]
fn confusion_turns_the_next_action_into_a_self_hit() {
    // ConstRng(0): every chance roll succeeds (confusion applies, the 77%
    // self-hit branch fires) and every range draw is its minimum.
    let rng = ConstRng(0);
    let env = BattleEnv::with_rng(&rng);
    let card = CardDefinition::new("Nebelhexe", 100).with_attack(
        AttackDefinition::direct("Fluchstrahl", 10, 10)
            .with_effect(EffectSpec::with_chance(EffectKind::Confusion, 1.0)),
    );
    let opponent =
        CardDefinition::new("Gegner", 100).with_attack(AttackDefinition::direct("Hieb", 20, 40));
    let mut battle = start(card, opponent);

    let result = battle.submit_action(&env, Side::A, 0).unwrap();
    assert!(result.entry.events.contains(&SubEvent::ConfusionApplied));
    assert!(result.status_b.contains(&"verwirrt".to_string()));

    // Max potential 40 selects the light self-hit band; minimum draw is 15.
    let result = battle.submit_action(&env, Side::B, 0).unwrap();
    assert_eq!(result.entry.action, RoundAction::ConfusedSelfHit);
    assert_eq!(result.entry.self_damage, 15);
    assert_eq!(battle.combatant(Side::A).hp, 100);
    assert_eq!(battle.combatant(Side::B).hp, 100 - 10 - 15);
    assert!(result.log_fragment.contains("verwirrt"));
}

#[test]
fn burning_ticks_before_the_appliers_next_attack() {
    let rng = ConstRng(u32::MAX);
    let env = BattleEnv::with_rng(&rng);
    let card = CardDefinition::new("Feuerdrache", 100).with_attack(
        AttackDefinition::direct("Feuerball", 10, 10).with_effect(EffectSpec::with_chance(
            EffectKind::Burning {
                damage: 5,
                duration: TurnRange::new(2, 2),
            },
            1.0,
        )),
    );
    let mut battle = start(card, plain_card(100));

    let result = battle.submit_action(&env, Side::A, 0).unwrap();
    assert!(result
        .entry
        .events
        .contains(&SubEvent::BurningApplied { damage: 5, turns: 2 }));
    assert!(result.status_b.iter().any(|s| s.starts_with("brennt")));

    // The burn belongs to A, so B's own attack does not tick it.
    let result = battle.submit_action(&env, Side::B, 0).unwrap();
    assert!(!result.entry.events.iter().any(|e| matches!(e, SubEvent::BurnTick { .. })));

    // A's next attack ticks the burn first, then deals its own damage.
    let result = battle.submit_action(&env, Side::A, 0).unwrap();
    assert!(result.entry.events.contains(&SubEvent::BurnTick { damage: 5 }));
    assert_eq!(battle.combatant(Side::B).hp, 100 - 10 - 5 - 10);
}

#[test]
fn outgoing_reduction_overflow_hits_the_attacker() {
    let rng = ConstRng(u32::MAX);
    let env = BattleEnv::with_rng(&rng);
    let card = CardDefinition::new("Blitzmaus", 100).with_attack(
        AttackDefinition::direct("Blitzschlag", 10, 10).with_effect(EffectSpec::with_chance(
            EffectKind::EnemyAttackReductionFlat { amount: 15, uses: 1 },
            1.0,
        )),
    );
    let mut battle = start(card, plain_card(100));

    let result = battle.submit_action(&env, Side::A, 0).unwrap();
    assert!(result.entry.events.contains(&SubEvent::EnemyAttackReduced {
        amount: 15,
        percent: false
    }));

    // B rolls 10; the 15-point reduction zeroes it and 5 points overflow
    // back onto B itself.
    let result = battle.submit_action(&env, Side::B, 0).unwrap();
    assert_eq!(result.entry.damage, 0);
    assert_eq!(result.entry.self_damage, 5);
    assert!(result.entry.events.contains(&SubEvent::OutgoingReduced {
        amount: 10,
        overflow: 5
    }));
    assert_eq!(battle.combatant(Side::A).hp, 100);
    assert_eq!(battle.combatant(Side::B).hp, 85);
}

#[test]
fn reflect_returns_half_while_the_hit_still_lands() {
    let rng = ConstRng(u32::MAX);
    let env = BattleEnv::with_rng(&rng);
    let card = CardDefinition::new("Feuerdrache", 100).with_attack(
        AttackDefinition::utility("Glutpanzer").with_effect(EffectSpec::new(EffectKind::Reflect {
            fraction: 0.5,
            uses: 1,
        })),
    );
    let opponent =
        CardDefinition::new("Gegner", 100).with_attack(AttackDefinition::direct("Hieb", 20, 20));
    let mut battle = start(card, opponent);

    battle.submit_action(&env, Side::A, 0).unwrap();
    let result = battle.submit_action(&env, Side::B, 0).unwrap();

    assert_eq!(result.entry.damage, 20);
    assert!(result.entry.events.contains(&SubEvent::Reflected { damage: 10 }));
    assert_eq!(battle.combatant(Side::A).hp, 80);
    assert_eq!(battle.combatant(Side::B).hp, 90);
}

#[test]
fn absorb_diverts_damage_into_the_stored_counter() {
    let rng = ConstRng(u32::MAX);
    let env = BattleEnv::with_rng(&rng);
    let card = CardDefinition::new("Eisgolem", 100).with_attack(
        AttackDefinition::utility("Eiswall")
            .with_effect(EffectSpec::new(EffectKind::Absorb { uses: 1 })),
    );
    let opponent =
        CardDefinition::new("Gegner", 100).with_attack(AttackDefinition::direct("Hieb", 20, 20));
    let mut battle = start(card, opponent);

    battle.submit_action(&env, Side::A, 0).unwrap();
    let result = battle.submit_action(&env, Side::B, 0).unwrap();

    assert_eq!(result.entry.damage, 0);
    assert!(result.entry.events.contains(&SubEvent::Absorbed { amount: 20 }));
    assert_eq!(battle.combatant(Side::A).hp, 100);
    assert!(battle
        .combatant(Side::A)
        .status_summary()
        .contains(&"20 Schaden absorbiert".to_string()));
}

#[test]
fn strong_attack_triggers_the_automatic_cooldown() {
    let rng = ConstRng(u32::MAX);
    let env = BattleEnv::with_rng(&rng);
    let card = CardDefinition::new("Eisgolem", 100)
        .with_attack(AttackDefinition::direct("Gletscherschlag", 95, 110));
    let mut battle = start(card, plain_card(200));

    let result = battle.submit_action(&env, Side::A, 0).unwrap();
    // The 110 roll is clamped by the hard damage ceiling.
    assert_eq!(result.entry.damage, 50);
    assert!(result
        .entry
        .events
        .contains(&SubEvent::CooldownStarted {
            attack: "Gletscherschlag".to_string(),
            turns: 3
        }));

    battle.submit_action(&env, Side::B, 0).unwrap();
    let err = battle.submit_action(&env, Side::A, 0).unwrap_err();
    assert_eq!(
        err,
        ActionError::OnCooldown {
            name: "Gletscherschlag".to_string(),
            remaining: 2
        }
    );
}

#[test]
fn heal_restores_hp_and_renders_as_the_primary_line() {
    let rng = ConstRng(u32::MAX);
    let env = BattleEnv::with_rng(&rng);
    let card = CardDefinition::new("Sturmadler", 100)
        .with_attack(AttackDefinition::direct("Schnabelhieb", 20, 20))
        .with_attack(AttackDefinition::utility("Aufwind").with_heal(10, 10));
    let opponent =
        CardDefinition::new("Gegner", 100).with_attack(AttackDefinition::direct("Hieb", 20, 20));
    let mut battle = start(card, opponent);

    battle.submit_action(&env, Side::A, 0).unwrap();
    battle.submit_action(&env, Side::B, 0).unwrap();
    assert_eq!(battle.combatant(Side::A).hp, 80);

    let result = battle.submit_action(&env, Side::A, 1).unwrap();
    assert_eq!(result.entry.heal, 10);
    assert!(result.log_fragment.contains("+10 HP Heilung"));
    assert_eq!(battle.combatant(Side::A).hp, 90);
}

#[test]
fn defeat_ends_the_battle_with_the_attacker_winning() {
    let rng = ConstRng(u32::MAX);
    let env = BattleEnv::with_rng(&rng);
    let card = CardDefinition::new("Eisgolem", 100)
        .with_attack(AttackDefinition::direct("Frostfaust", 40, 40));
    let mut battle = start(card, plain_card(80));

    battle.submit_action(&env, Side::A, 0).unwrap();
    battle.submit_action(&env, Side::B, 0).unwrap();
    let result = battle.submit_action(&env, Side::A, 0).unwrap();

    assert!(result.finished);
    assert_eq!(result.winner, Some(Side::A));
    assert_eq!(battle.phase(), BattlePhase::Finished { winner: Side::A });
    assert_eq!(battle.combatant(Side::B).hp, 0);
}

#[test]
fn ai_turn_runs_through_the_same_pipeline() {
    let rng = ConstRng(u32::MAX);
    let env = BattleEnv::with_rng(&rng);
    let card = CardDefinition::new("Spieler", 100)
        .with_attack(AttackDefinition::direct("Hieb", 10, 10));
    let opponent = CardDefinition::new("Gegner", 100)
        .with_attack(AttackDefinition::direct("Kratzer", 5, 8))
        .with_attack(AttackDefinition::direct("Biss", 15, 25));
    let mut battle = start(card, opponent);

    battle.submit_action(&env, Side::A, 0).unwrap();
    let result = battle.ai_take_turn(&env).unwrap();

    // The heuristic picks the hardest usable attack.
    assert_eq!(
        result.entry.action,
        RoundAction::Attack {
            name: "Biss".to_string()
        }
    );
    assert_eq!(battle.combatant(Side::A).hp, 75);
    assert_eq!(battle.phase(), BattlePhase::AwaitingAction(Side::A));
}

#[test]
fn burning_scaled_cooldown_counts_the_defenders_stacks() {
    let rng = ConstRng(u32::MAX);
    let env = BattleEnv::with_rng(&rng);
    let card = CardDefinition::new("Feuerdrache", 100)
        .with_attack(
            AttackDefinition::direct("Feuerball", 10, 10).with_effect(EffectSpec::with_chance(
                EffectKind::Burning {
                    damage: 5,
                    duration: TurnRange::new(2, 2),
                },
                1.0,
            )),
        )
        .with_attack(AttackDefinition::direct("Flammensturm", 10, 10).with_burning_cooldown(1));
    let mut battle = start(card, plain_card(100));

    battle.submit_action(&env, Side::A, 0).unwrap();
    battle.submit_action(&env, Side::B, 0).unwrap();

    // One burning stack on the defender plus the constant gives two turns.
    let result = battle.submit_action(&env, Side::A, 1).unwrap();
    assert!(result
        .entry
        .events
        .contains(&SubEvent::CooldownStarted {
            attack: "Flammensturm".to_string(),
            turns: 2
        }));

    battle.submit_action(&env, Side::B, 0).unwrap();
    let err = battle.submit_action(&env, Side::A, 1).unwrap_err();
    assert_eq!(
        err,
        ActionError::OnCooldown {
            name: "Flammensturm".to_string(),
            remaining: 1
        }
    );
}

#[test]
fn percent_reduction_halves_the_enemys_next_attack() {
    let rng = ConstRng(u32::MAX);
    let env = BattleEnv::with_rng(&rng);
    let card = CardDefinition::new("Sturmadler", 100).with_attack(
        AttackDefinition::direct("Windschnitt", 10, 10).with_effect(EffectSpec::with_chance(
            EffectKind::EnemyAttackReductionPercent {
                percent: 50,
                uses: 1,
            },
            1.0,
        )),
    );
    let opponent =
        CardDefinition::new("Gegner", 100).with_attack(AttackDefinition::direct("Hieb", 20, 20));
    let mut battle = start(card, opponent);

    let result = battle.submit_action(&env, Side::A, 0).unwrap();
    assert!(result.entry.events.contains(&SubEvent::EnemyAttackReduced {
        amount: 50,
        percent: true
    }));

    // B rolls 20; half of it is shaved off with no overflow.
    let result = battle.submit_action(&env, Side::B, 0).unwrap();
    assert_eq!(result.entry.damage, 10);
    assert_eq!(result.entry.self_damage, 0);
    assert!(result.entry.events.contains(&SubEvent::OutgoingReduced {
        amount: 10,
        overflow: 0
    }));
    assert_eq!(battle.combatant(Side::A).hp, 90);
    assert_eq!(battle.combatant(Side::B).hp, 90);
}

#[test]
fn guaranteed_hit_pierces_a_queued_evade() {
    let rng = ConstRng(u32::MAX);
    let env = BattleEnv::with_rng(&rng);
    let card = CardDefinition::new("Blitzmaus", 100).with_attack(
        AttackDefinition::direct("Donnerpfeil", 10, 10)
            .with_effect(EffectSpec::new(EffectKind::GuaranteedHit)),
    );
    let opponent = CardDefinition::new("Schattenwolf", 100).with_attack(
        AttackDefinition::utility("Tarnung").with_effect(EffectSpec::new(EffectKind::Evade {
            counter: 10,
            uses: 1,
        })),
    );
    let mut battle = start(card, opponent);

    battle.submit_action(&env, Side::A, 0).unwrap();
    battle.submit_action(&env, Side::B, 0).unwrap();

    // The evade is consumed but the hit goes through; the counter still
    // retaliates.
    let result = battle.submit_action(&env, Side::A, 0).unwrap();
    assert!(!result.entry.dodged);
    assert_eq!(result.entry.damage, 10);
    assert!(result.entry.events.contains(&SubEvent::EvadePierced));
    assert!(result.entry.events.contains(&SubEvent::Counter { damage: 10 }));
    assert_eq!(battle.combatant(Side::A).hp, 90);
    assert_eq!(battle.combatant(Side::B).hp, 80);
}

#[test]
fn heavy_attacks_select_the_heavy_confusion_band() {
    let rng = ConstRng(0);
    let env = BattleEnv::with_rng(&rng);
    let card = CardDefinition::new("Nebelhexe", 100).with_attack(
        AttackDefinition::direct("Fluchstrahl", 10, 10)
            .with_effect(EffectSpec::with_chance(EffectKind::Confusion, 1.0)),
    );
    let opponent = CardDefinition::new("Eisgolem", 100)
        .with_attack(AttackDefinition::direct("Gletscherschlag", 50, 110));
    let mut battle = start(card, opponent);

    battle.submit_action(&env, Side::A, 0).unwrap();

    // Max potential 110 exceeds the band split; minimum heavy draw is 40.
    let result = battle.submit_action(&env, Side::B, 0).unwrap();
    assert_eq!(result.entry.action, RoundAction::ConfusedSelfHit);
    assert_eq!(result.entry.self_damage, 40);
    assert_eq!(battle.combatant(Side::B).hp, 100 - 10 - 40);
}

#[test]
fn armed_multiplier_doubles_exactly_one_attack() {
    let rng = ConstRng(u32::MAX);
    let env = BattleEnv::with_rng(&rng);
    let card = CardDefinition::new("Nebelhexe", 100)
        .with_attack(
            AttackDefinition::utility("Hexenritual").with_effect(EffectSpec::new(
                EffectKind::DamageMultiplier {
                    multiplier: 2.0,
                    uses: 1,
                },
            )),
        )
        .with_attack(AttackDefinition::direct("Schattenblitz", 20, 20));
    let mut battle = start(card, plain_card(100));

    let result = battle.submit_action(&env, Side::A, 0).unwrap();
    assert!(result
        .entry
        .events
        .contains(&SubEvent::MultiplierArmed { multiplier: 2.0 }));

    battle.submit_action(&env, Side::B, 0).unwrap();

    let result = battle.submit_action(&env, Side::A, 1).unwrap();
    assert_eq!(result.entry.damage, 40);
    assert_eq!(battle.combatant(Side::B).hp, 60);

    // The single use is spent; the next attack rolls unmultiplied.
    battle.submit_action(&env, Side::B, 0).unwrap();
    let result = battle.submit_action(&env, Side::A, 1).unwrap();
    assert_eq!(result.entry.damage, 20);
    assert_eq!(battle.combatant(Side::B).hp, 40);
}

#[test]
fn double_ko_through_reflect_falls_to_the_attacker() {
    let rng = ConstRng(u32::MAX);
    let env = BattleEnv::with_rng(&rng);
    let card = CardDefinition::new("Sterblicher", 10)
        .with_attack(AttackDefinition::utility("Warten"))
        .with_attack(AttackDefinition::direct("Schlag", 20, 20));
    let opponent = CardDefinition::new("Spiegelwicht", 20).with_attack(
        AttackDefinition::utility("Spiegelpanzer").with_effect(EffectSpec::new(
            EffectKind::Reflect {
                fraction: 0.5,
                uses: 1,
            },
        )),
    );
    let mut battle = start(card, opponent);

    battle.submit_action(&env, Side::A, 0).unwrap();
    battle.submit_action(&env, Side::B, 0).unwrap();

    // The 20-point hit fells the defender before the 10-point reflection
    // fells the attacker, so the attacker takes the win.
    let result = battle.submit_action(&env, Side::A, 1).unwrap();
    assert!(result.entry.events.contains(&SubEvent::Reflected { damage: 10 }));
    assert_eq!(battle.combatant(Side::A).hp, 0);
    assert_eq!(battle.combatant(Side::B).hp, 0);
    assert!(result.finished);
    assert_eq!(result.winner, Some(Side::A));
}

#[test]
fn lethal_counter_wins_for_the_dodging_defender() {
    let rng = ConstRng(u32::MAX);
    let env = BattleEnv::with_rng(&rng);
    let card = CardDefinition::new("Sterblicher", 10)
        .with_attack(AttackDefinition::utility("Warten"))
        .with_attack(AttackDefinition::direct("Schlag", 20, 20));
    let opponent = CardDefinition::new("Schattenwolf", 30).with_attack(
        AttackDefinition::utility("Tarnung").with_effect(EffectSpec::new(EffectKind::Evade {
            counter: 10,
            uses: 1,
        })),
    );
    let mut battle = start(card, opponent);

    battle.submit_action(&env, Side::A, 0).unwrap();
    battle.submit_action(&env, Side::B, 0).unwrap();

    let result = battle.submit_action(&env, Side::A, 1).unwrap();
    assert!(result.entry.dodged);
    assert_eq!(battle.combatant(Side::A).hp, 0);
    assert_eq!(battle.combatant(Side::B).hp, 30);
    assert!(result.finished);
    assert_eq!(result.winner, Some(Side::B));
}

#[test]
fn ai_passes_when_every_attack_is_blocked() {
    let rng = ConstRng(u32::MAX);
    let env = BattleEnv::with_rng(&rng);
    let card = CardDefinition::new("Spieler", 100)
        .with_attack(AttackDefinition::direct("Hieb", 10, 10));
    let opponent = CardDefinition::new("Gegner", 100)
        .with_attack(AttackDefinition::direct("Kanone", 20, 30).with_reload("Magazin"));
    let mut battle = start(card, opponent);

    battle.submit_action(&env, Side::A, 0).unwrap();
    battle.ai_take_turn(&env).unwrap();

    battle.submit_action(&env, Side::A, 0).unwrap();
    // The only attack now needs a reload; the AI has to pass.
    let result = battle.ai_take_turn(&env).unwrap();
    assert_eq!(result.entry.action, RoundAction::Pass);
    assert_eq!(battle.phase(), BattlePhase::AwaitingAction(Side::A));
    assert_eq!(battle.combatant(Side::A).hp, 100 - 30);
}
