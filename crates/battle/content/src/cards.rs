//! Built-in card roster.
//!
//! A small playable set covering every engine mechanic. Deployments that
//! load their roster from data files use [`crate::loaders`] instead; the
//! built-in set doubles as fixture data for integration tests.

use battle_core::{
    AttackDefinition, ButtonStyle, CardDefinition, DamageCap, DamageRange, DefenseKind,
    EffectKind, EffectSpec, MultiHitSpec, TurnRange,
};

use crate::StaticCatalog;

/// The built-in catalog.
pub fn builtin_catalog() -> StaticCatalog {
    StaticCatalog::new(vec![
        feuerdrache(),
        blitzmaus(),
        schattenwolf(),
        kanonenkrebs(),
        sturmadler(),
        nebelhexe(),
        eisgolem(),
    ])
}

/// Burning specialist with a burning-scaled cooldown on its payoff attack.
fn feuerdrache() -> CardDefinition {
    CardDefinition::new("Feuerdrache", 140)
        .with_attack(
            AttackDefinition::direct("Krallenhieb", 15, 25).with_button_style(ButtonStyle::Primary),
        )
        .with_attack(
            AttackDefinition::direct("Feuerball", 18, 28)
                .with_effect(EffectSpec::with_chance(
                    EffectKind::Burning {
                        damage: 5,
                        duration: TurnRange::new(2, 4),
                    },
                    0.8,
                ))
                .with_button_style(ButtonStyle::Danger),
        )
        .with_attack(
            AttackDefinition::direct("Flammensturm", 28, 36)
                .with_burning_cooldown(1)
                .with_button_style(ButtonStyle::Danger),
        )
        .with_attack(
            AttackDefinition::utility("Glutpanzer").with_effect(EffectSpec::new(
                EffectKind::Reflect {
                    fraction: 0.5,
                    uses: 1,
                },
            )),
        )
}

/// Multi-hit chip damage plus a guaranteed-hit finisher.
fn blitzmaus() -> CardDefinition {
    CardDefinition::new("Blitzmaus", 110)
        .with_attack(AttackDefinition::utility("Nadelstich").with_multi_hit(MultiHitSpec {
            hits: 4,
            hit_chance: 0.75,
            per_hit: DamageRange::new(4, 8),
            guaranteed_min_per_hit: Some(2),
        }))
        .with_attack(
            AttackDefinition::direct("Blitzschlag", 12, 22).with_effect(EffectSpec::with_chance(
                EffectKind::EnemyAttackReductionFlat { amount: 8, uses: 1 },
                0.6,
            )),
        )
        .with_attack(
            AttackDefinition::direct("Donnerpfeil", 10, 18)
                .with_effect(EffectSpec::new(EffectKind::GuaranteedHit)),
        )
        .with_attack(AttackDefinition::utility("Statikfeld").with_effect(EffectSpec::with_chance(
            EffectKind::Stun,
            0.35,
        )))
}

/// Stealth: a delayed evade that snaps active after the next landing hit.
fn schattenwolf() -> CardDefinition {
    CardDefinition::new("Schattenwolf", 120)
        .with_attack(AttackDefinition::direct("Reißzahn", 14, 24))
        .with_attack(
            AttackDefinition::utility("Tarnung").with_effect(EffectSpec::new(
                EffectKind::Evade {
                    counter: 10,
                    uses: 1,
                },
            )),
        )
        .with_attack(
            AttackDefinition::direct("Hinterhalt", 20, 30).with_effect(EffectSpec::new(
                EffectKind::DelayedDefense {
                    defense: DefenseKind::Evade { counter: 12 },
                },
            )),
        )
        .with_attack(
            AttackDefinition::utility("Mondheulen")
                .with_heal(18, 26)
                .with_button_style(ButtonStyle::Success),
        )
}

/// Reload-gated heavy hitter with a self-capping precision shot.
fn kanonenkrebs() -> CardDefinition {
    CardDefinition::new("Kanonenkrebs", 150)
        .with_attack(AttackDefinition::direct("Scherenschlag", 10, 20))
        .with_attack(
            AttackDefinition::direct("Wasserkanone", 30, 45)
                .with_reload("Munitionskammer")
                .with_button_style(ButtonStyle::Danger),
        )
        .with_attack(
            AttackDefinition::direct("Präzisionsschuss", 15, 35).with_effect(EffectSpec::new(
                EffectKind::CapDamage {
                    cap: DamageCap::AttackMin,
                },
            )),
        )
        .with_attack(
            AttackDefinition::utility("Panzerung").with_effect(EffectSpec::new(
                EffectKind::Absorb { uses: 2 },
            )),
        )
}

/// Two-phase diver; the takeoff attack's cooldown starts at landing.
fn sturmadler() -> CardDefinition {
    CardDefinition::new("Sturmadler", 125)
        .with_attack(AttackDefinition::direct("Schnabelhieb", 12, 20))
        .with_attack(
            AttackDefinition::utility("Sturzflug").with_effect(EffectSpec::new(
                EffectKind::Airborne {
                    landing: DamageRange::new(35, 50),
                    landing_cooldown: Some(2),
                },
            )),
        )
        .with_attack(
            AttackDefinition::direct("Windschnitt", 16, 26).with_effect(EffectSpec::with_chance(
                EffectKind::EnemyAttackReductionPercent {
                    percent: 30,
                    uses: 1,
                },
                0.5,
            )),
        )
        .with_attack(
            AttackDefinition::utility("Aufwind")
                .with_heal(12, 20)
                .with_button_style(ButtonStyle::Success),
        )
}

/// Confusion and a multiplier setup into a strong payoff.
fn nebelhexe() -> CardDefinition {
    CardDefinition::new("Nebelhexe", 115)
        .with_attack(
            AttackDefinition::direct("Fluchstrahl", 10, 18)
                .with_effect(EffectSpec::new(EffectKind::Confusion)),
        )
        .with_attack(
            AttackDefinition::utility("Hexenritual").with_effect(EffectSpec::new(
                EffectKind::DamageMultiplier {
                    multiplier: 2.0,
                    uses: 1,
                },
            )),
        )
        .with_attack(AttackDefinition::direct("Schattenblitz", 18, 30))
        .with_attack(
            AttackDefinition::utility("Nebelheilung")
                .with_heal(20, 30)
                .with_button_style(ButtonStyle::Success),
        )
}

/// Slow tank whose heavy slam triggers the strong-attack cooldown rule.
fn eisgolem() -> CardDefinition {
    CardDefinition::new("Eisgolem", 170)
        .with_attack(AttackDefinition::direct("Frostfaust", 12, 22))
        .with_attack(
            AttackDefinition::direct("Gletscherschlag", 95, 110)
                .with_button_style(ButtonStyle::Danger),
        )
        .with_attack(
            AttackDefinition::direct("Eissplitter", 8, 14).with_effect(EffectSpec::with_chance(
                EffectKind::DamageBoost { amount: 15, uses: 1 },
                0.9,
            )),
        )
        .with_attack(
            AttackDefinition::utility("Eiswall")
                .with_effect(EffectSpec::new(EffectKind::Absorb { uses: 1 }))
                .with_cooldown(2),
        )
}
