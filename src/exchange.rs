//! Two-party resource exchange
//!
//! Offers are not escrowed: the sender keeps its goods until someone accepts,
//! and both sides are checked again at that moment. Acceptance claims the
//! offer before anything else so two acceptances can never both succeed.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::colony::{Colony, ResourceBundle};
use crate::core::error::{ActionError, ExchangeError};
use crate::core::types::{ColonyId, OfferId};
use crate::events::EventKind;
use crate::world::World;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OfferStatus {
    Open,
    /// Someone is accepting right now
    Claimed,
    Accepted,
    Rejected,
    Expired,
    Cancelled,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TradeOffer {
    pub id: OfferId,
    pub sender: ColonyId,
    /// `None` is a public offer anyone may accept
    pub receiver: Option<ColonyId>,
    /// What the sender gives
    pub offer: ResourceBundle,
    /// What the sender wants back
    pub request: ResourceBundle,
    pub status: OfferStatus,
}

impl TradeOffer {
    pub fn involves(&self, colony: ColonyId) -> bool {
        self.sender == colony || self.receiver == Some(colony)
    }
}

/// Which side made an acceptance fail
enum Failure {
    Acceptor(ExchangeError),
    Sender(ExchangeError),
}

impl World {
    pub fn offer(&self, id: OfferId) -> Option<&TradeOffer> {
        self.store.offers.iter().find(|o| o.id == id)
    }

    fn offer_mut(&mut self, id: OfferId) -> Option<&mut TradeOffer> {
        self.store.offers.iter_mut().find(|o| o.id == id)
    }

    pub fn open_offers(&self) -> impl Iterator<Item = &TradeOffer> {
        self.store.offers.iter().filter(|o| o.status == OfferStatus::Open)
    }

    /// Post an offer. The sender must hold what it offers now.
    pub fn create_offer(
        &mut self,
        sender: ColonyId,
        receiver: Option<ColonyId>,
        offer: ResourceBundle,
        request: ResourceBundle,
    ) -> Result<OfferId, ExchangeError> {
        if offer.is_empty() || request.is_empty() {
            return Err(ExchangeError::Rejected("an offer must give and ask for something".into()));
        }
        if receiver == Some(sender) {
            return Err(ActionError::InvalidTarget("cannot trade with yourself".into()).into());
        }
        if let Some(r) = receiver {
            if !self.store.is_active(r) {
                return Err(ActionError::InvalidTarget(format!("{} cannot trade", r)).into());
            }
        }
        let colony = live(self, sender)?;
        if !colony.has_resources(&offer) {
            return Err(ExchangeError::Rejected(format!("{} cannot cover its own offer", colony.name)));
        }
        let turn = colony.turn_count;

        let id = self.store.next_offer_id();
        self.store.offers.push(TradeOffer {
            id,
            sender,
            receiver,
            offer,
            request,
            status: OfferStatus::Open,
        });
        let message = format!("Trade offer #{} posted.", id.0);
        self.store.events.add_event(sender, turn, EventKind::Trade, message);
        Ok(id)
    }

    /// Withdraw an open offer; only its sender may
    pub fn cancel_offer(&mut self, id: OfferId, by: ColonyId) -> Result<(), ExchangeError> {
        let offer = self.offer_mut(id).ok_or(ExchangeError::UnknownOffer(id))?;
        if offer.sender != by {
            return Err(ExchangeError::Rejected("only the sender can cancel an offer".into()));
        }
        if offer.status != OfferStatus::Open {
            return Err(ExchangeError::NotOpen(id));
        }
        offer.status = OfferStatus::Cancelled;
        Ok(())
    }

    /// Turn down an offer addressed to `by`
    pub fn reject_offer(&mut self, id: OfferId, by: ColonyId) -> Result<(), ExchangeError> {
        let offer = self.offer_mut(id).ok_or(ExchangeError::UnknownOffer(id))?;
        if offer.receiver != Some(by) {
            return Err(ExchangeError::Rejected("offer is not addressed to you".into()));
        }
        if offer.status != OfferStatus::Open {
            return Err(ExchangeError::NotOpen(id));
        }
        offer.status = OfferStatus::Rejected;
        Ok(())
    }

    /// Accept an offer and swap both bundles in one unit.
    ///
    /// The offer is claimed first. A problem on the acceptor's side puts it
    /// back up; a sender that is gone or can no longer pay expires it.
    pub fn accept_offer(&mut self, id: OfferId, acceptor: ColonyId) -> Result<(), ExchangeError> {
        let offer = self.offer_mut(id).ok_or(ExchangeError::UnknownOffer(id))?;
        if offer.status != OfferStatus::Open {
            return Err(ExchangeError::NotOpen(id));
        }
        offer.status = OfferStatus::Claimed;
        let offer = offer.clone();

        let result = self.transaction(|world| swap(world, &offer, acceptor));

        let (status, result) = match result {
            Ok(()) => (OfferStatus::Accepted, Ok(())),
            Err(Failure::Acceptor(e)) => (OfferStatus::Open, Err(e)),
            Err(Failure::Sender(e)) => (OfferStatus::Expired, Err(e)),
        };
        if let Some(o) = self.offer_mut(id) {
            o.status = status;
        }
        debug!(offer = id.0, acceptor = %acceptor, ?status, "trade settled");
        result
    }
}

fn live(world: &World, id: ColonyId) -> Result<&Colony, ExchangeError> {
    match world.store.colony(id) {
        None => Err(ActionError::UnknownColony(id).into()),
        Some(c) if c.destroyed => Err(ActionError::AlreadyDestroyed(id).into()),
        Some(c) => Ok(c),
    }
}

fn swap(world: &mut World, offer: &TradeOffer, acceptor: ColonyId) -> Result<(), Failure> {
    if offer.sender == acceptor {
        return Err(Failure::Acceptor(
            ActionError::InvalidTarget("cannot accept your own offer".into()).into(),
        ));
    }
    if offer.receiver.is_some_and(|r| r != acceptor) {
        return Err(Failure::Acceptor(ExchangeError::Rejected(
            "offer is addressed to someone else".into(),
        )));
    }
    let mut buyer = live(world, acceptor).map_err(Failure::Acceptor)?.clone();
    let mut seller = live(world, offer.sender).map_err(Failure::Sender)?.clone();

    if !seller.has_resources(&offer.offer) {
        return Err(Failure::Sender(ExchangeError::Rejected(format!(
            "{} can no longer cover the offer",
            seller.name
        ))));
    }
    if !buyer.has_resources(&offer.request) {
        return Err(Failure::Acceptor(ExchangeError::Rejected(
            "you cannot cover what is requested".into(),
        )));
    }

    transfer(&mut seller, &mut buyer, &offer.offer);
    transfer(&mut buyer, &mut seller, &offer.request);

    let events = &mut world.store.events;
    events.add_event(
        buyer.id,
        buyer.turn_count,
        EventKind::Trade,
        format!("Trade with {} completed.", seller.name),
    );
    events.add_event(
        seller.id,
        seller.turn_count,
        EventKind::Trade,
        format!("{} accepted our trade offer.", buyer.name),
    );
    world.store.colonies.insert(buyer.id, buyer);
    world.store.colonies.insert(seller.id, seller);
    Ok(())
}

/// Move a bundle; the receiver's caps clip what arrives
fn transfer(from: &mut Colony, to: &mut Colony, bundle: &ResourceBundle) {
    for (resource, amount) in bundle.entries() {
        let taken = from.remove_resource(resource, amount);
        to.add_resource(resource, taken);
    }
}
