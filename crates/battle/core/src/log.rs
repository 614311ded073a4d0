//! Battle log builder.
//!
//! The pipeline emits structured [`RoundEntry`] values; this module stores
//! them append-only and renders the two transcript forms: a bounded recent
//! view for space-constrained display and the full transcript for export.
//! Recency bounding is purely a view concern; storage always keeps every
//! round.

use std::fmt::Write as _;

/// What the acting side did this round.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RoundAction {
    /// Regular attack selection.
    Attack { name: String },
    /// Airborne landing: selection was locked to the stored attack.
    ForcedLanding { name: String },
    /// Stun consumed the whole action.
    Stunned,
    /// Confusion redirected the attack into self-damage.
    ConfusedSelfHit,
    /// Reload action; does not consume the turn.
    Reload { name: String },
    /// The side passed (AI with every attack on cooldown).
    Pass,
}

/// Secondary effect events listed under the round's primary line.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SubEvent {
    /// Burning ticked against the defender before the attack landed.
    BurnTick { damage: u32 },
    BurningApplied { damage: u32, turns: u8 },
    ConfusionApplied,
    /// Confused attacker proceeded normally anyway.
    ConfusionResisted,
    StunApplied,
    Dodged,
    /// A guaranteed-hit attack went through a queued evade.
    EvadePierced,
    Counter { damage: u32 },
    Reflected { damage: u32 },
    Absorbed { amount: u32 },
    /// Own outgoing damage was reduced; overflow hit the attacker itself.
    OutgoingReduced { amount: u32, overflow: u32 },
    /// Reduction queued onto the enemy's next outgoing attack.
    EnemyAttackReduced { amount: u32, percent: bool },
    MultiplierArmed { multiplier: f32 },
    BoostArmed { amount: u32 },
    /// Delayed defense queued, waiting for the owner's next landing hit.
    DefenseQueued,
    /// Direct defense queued onto the caster's next incoming attack.
    DefenseQueuedDirect,
    DefenseActivated,
    /// Owner's attack missed, the delayed defense stays queued.
    DefenseDeferred,
    AirborneEntered,
    AirborneLanded,
    /// Attack auto-missed because the target is airborne.
    ForcedMiss,
    Healed { amount: u32 },
    CooldownStarted { attack: String, turns: u8 },
}

impl SubEvent {
    fn render(&self) -> String {
        match self {
            SubEvent::BurnTick { damage } => format!("Verbrennung: {damage} Schaden"),
            SubEvent::BurningApplied { damage, turns } => {
                format!("Gegner brennt: {damage} Schaden pro Runde ({turns} Runden)")
            }
            SubEvent::ConfusionApplied => "Gegner ist verwirrt".to_string(),
            SubEvent::ConfusionResisted => "widersteht der Verwirrung".to_string(),
            SubEvent::StunApplied => "Gegner ist betäubt".to_string(),
            SubEvent::Dodged => "Angriff ausgewichen".to_string(),
            SubEvent::EvadePierced => "Ausweichen durchbrochen, garantierter Treffer".to_string(),
            SubEvent::Counter { damage } => format!("Konter: {damage} Schaden"),
            SubEvent::Reflected { damage } => format!("{damage} Schaden reflektiert"),
            SubEvent::Absorbed { amount } => format!("{amount} Schaden absorbiert"),
            SubEvent::OutgoingReduced { amount, overflow } => {
                if *overflow > 0 {
                    format!("Angriff um {amount} geschwächt, {overflow} Rückstoßschaden")
                } else {
                    format!("Angriff um {amount} geschwächt")
                }
            }
            SubEvent::EnemyAttackReduced { amount, percent } => {
                if *percent {
                    format!("nächster gegnerischer Angriff um {amount}% geschwächt")
                } else {
                    format!("nächster gegnerischer Angriff um {amount} geschwächt")
                }
            }
            SubEvent::MultiplierArmed { multiplier } => {
                format!("Schadensbonus x{multiplier} bereit")
            }
            SubEvent::BoostArmed { amount } => format!("Schadensbonus +{amount} bereit"),
            SubEvent::DefenseQueued => "Verteidigung vorbereitet".to_string(),
            SubEvent::DefenseQueuedDirect => "Verteidigung aktiv".to_string(),
            SubEvent::DefenseActivated => "Verteidigung aktiviert".to_string(),
            SubEvent::DefenseDeferred => "Verteidigung bleibt vorbereitet".to_string(),
            SubEvent::AirborneEntered => "steigt in die Luft".to_string(),
            SubEvent::AirborneLanded => "landet".to_string(),
            SubEvent::ForcedMiss => "verfehlt, Ziel ist in der Luft".to_string(),
            SubEvent::Healed { amount } => format!("+{amount} HP Heilung"),
            SubEvent::CooldownStarted { attack, turns } => {
                format!("{attack}: {turns} Runden Abklingzeit")
            }
        }
    }
}

/// One resolved action as a structured log entry.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RoundEntry {
    pub round: u32,
    pub attacker: String,
    pub defender: String,
    pub action: RoundAction,
    /// Final damage dealt to the defender.
    pub damage: u32,
    /// HP restored to the attacker.
    pub heal: u32,
    /// Damage the attacker inflicted on itself (confusion, overflow).
    pub self_damage: u32,
    pub critical: bool,
    pub dodged: bool,
    pub events: Vec<SubEvent>,
}

impl RoundEntry {
    pub(crate) fn new(round: u32, attacker: &str, defender: &str, action: RoundAction) -> Self {
        Self {
            round,
            attacker: attacker.to_string(),
            defender: defender.to_string(),
            action,
            damage: 0,
            heal: 0,
            self_damage: 0,
            critical: false,
            dodged: false,
            events: Vec::new(),
        }
    }

    /// Renders this entry as its transcript fragment.
    pub fn render(&self) -> String {
        let mut out = String::new();
        match &self.action {
            RoundAction::Attack { name } | RoundAction::ForcedLanding { name } => {
                let _ = writeln!(
                    out,
                    "Runde {}: {} greift {} mit {} an.",
                    self.round, self.attacker, self.defender, name
                );
                let _ = writeln!(out, "{}", self.primary_line());
            }
            RoundAction::Stunned => {
                let _ = writeln!(
                    out,
                    "Runde {}: {} ist betäubt und setzt aus.",
                    self.round, self.attacker
                );
            }
            RoundAction::ConfusedSelfHit => {
                let _ = writeln!(
                    out,
                    "Runde {}: {} ist verwirrt und verletzt sich selbst: {} Schaden.",
                    self.round, self.attacker, self.self_damage
                );
            }
            RoundAction::Reload { name } => {
                let _ = writeln!(out, "Runde {}: {} lädt nach ({name}).", self.round, self.attacker);
            }
            RoundAction::Pass => {
                let _ = writeln!(out, "Runde {}: {} setzt aus.", self.round, self.attacker);
            }
        }
        for event in &self.events {
            let _ = writeln!(out, "• {}", event.render());
        }
        out
    }

    /// Primary figure: either damage or a net-heal phrase, never both.
    /// The crit marker is suppressed whenever the final damage is zero.
    fn primary_line(&self) -> String {
        if self.dodged {
            return format!("{} weicht aus!", self.defender);
        }
        if self.damage == 0 && self.heal > 0 {
            return format!("+{} HP Heilung", self.heal);
        }
        if self.critical && self.damage > 0 {
            return format!("VOLLTREFFER! {} Schaden", self.damage);
        }
        format!("{} Schaden", self.damage)
    }
}

/// Append-only battle log with a bounded recent view.
#[derive(Clone, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BattleLog {
    entries: Vec<RoundEntry>,
    recent_rounds: usize,
}

impl BattleLog {
    pub fn new(recent_rounds: usize) -> Self {
        Self {
            entries: Vec::new(),
            recent_rounds,
        }
    }

    pub(crate) fn push(&mut self, entry: RoundEntry) {
        self.entries.push(entry);
    }

    pub fn entries(&self) -> &[RoundEntry] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Full transcript since battle start.
    pub fn render_full(&self) -> String {
        self.entries.iter().map(RoundEntry::render).collect()
    }

    /// Bounded view: the last `recent_rounds` rounds, whole rounds only.
    pub fn render_recent(&self) -> String {
        let skip = self.entries.len().saturating_sub(self.recent_rounds);
        self.entries[skip..].iter().map(RoundEntry::render).collect()
    }

    /// Recent view further bounded by a character budget. Oldest whole
    /// rounds are dropped first; a round is never cut in the middle.
    pub fn render_recent_within(&self, max_chars: usize) -> String {
        let skip = self.entries.len().saturating_sub(self.recent_rounds);
        let mut rendered: Vec<String> = self.entries[skip..].iter().map(RoundEntry::render).collect();

        let mut total: usize = rendered.iter().map(|s| s.len()).sum();
        let mut drop = 0;
        while drop < rendered.len() && total > max_chars {
            total -= rendered[drop].len();
            drop += 1;
        }
        rendered.drain(..drop);
        rendered.concat()
    }
}
