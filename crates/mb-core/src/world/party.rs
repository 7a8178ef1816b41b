//! Parties and player-versus-player hostility

use super::World;
use crate::config::PvpMode;
use crate::player::{PartyId, PlayerId};

impl World {
    pub fn join_party(&mut self, player: PlayerId, party: PartyId) {
        if let Some(p) = self.players.get_mut(player) {
            p.party = Some(party);
        }
    }

    pub fn same_party(&self, a: PlayerId, b: PlayerId) -> bool {
        match (self.players.get(a), self.players.get(b)) {
            (Some(pa), Some(pb)) => pa.party.is_some() && pa.party == pb.party,
            _ => false,
        }
    }

    /// `attacker` declares hostility towards `target`
    pub fn declare_hostility(&mut self, attacker: PlayerId, target: PlayerId) {
        if attacker != target {
            self.hostility.insert((attacker, target));
        }
    }

    pub fn clear_hostility(&mut self, attacker: PlayerId, target: PlayerId) {
        self.hostility.remove(&(attacker, target));
    }

    pub fn is_hostile(&self, attacker: PlayerId, target: PlayerId) -> bool {
        self.hostility.contains(&(attacker, target))
    }

    /// May `attacker` hurt `target` with a projection?
    pub fn pvp_okay(&self, attacker: PlayerId, target: PlayerId) -> bool {
        if attacker == target || self.same_party(attacker, target) {
            return false;
        }
        match self.config.pvp_mode {
            PvpMode::Never => false,
            PvpMode::Hostile => self.is_hostile(attacker, target),
            PvpMode::Always => true,
        }
    }
}
