use soroban_sdk::{contracttype, Address, Env, String};

const INSTANCE_TTL_THRESHOLD: u32 = 17_280 * 7;
pub(crate) const INSTANCE_TTL_EXTEND: u32 = 17_280 * 30;
const PERSISTENT_TTL_THRESHOLD: u32 = 17_280 * 30;
const PERSISTENT_TTL_EXTEND: u32 = 17_280 * 90;

#[contracttype]
#[derive(Clone)]
pub enum DataKey {
    Token,                 // -> Address
    NextCampaignId,        // -> u64
    Campaign(u64),         // -> Campaign
    Pledge(u64, Address),  // (campaign_id, contributor) -> i128
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Campaign {
    pub id: u64,
    pub creator: Address,
    pub goal: i128,
    pub deadline: u64,
    pub raised: i128,
    pub withdrawn: bool,
    pub metadata: String,
}

/// Lifecycle phase of a campaign. Never stored; always computed from the
/// campaign record and the ledger clock.
#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum CampaignStatus {
    /// Accepting pledges, goal not yet reached.
    Open,
    /// Goal reached and pool still held. Pledges are accepted until the deadline.
    Succeeded,
    /// Deadline passed below goal; each contributor may reclaim their pledge.
    Failed,
    /// Pool released to the creator.
    Withdrawn,
}

impl Campaign {
    pub fn goal_reached(&self) -> bool {
        self.raised >= self.goal
    }

    pub fn is_open(&self, now: u64) -> bool {
        now < self.deadline
    }

    pub fn status(&self, now: u64) -> CampaignStatus {
        if self.withdrawn {
            CampaignStatus::Withdrawn
        } else if self.goal_reached() {
            CampaignStatus::Succeeded
        } else if self.is_open(now) {
            CampaignStatus::Open
        } else {
            CampaignStatus::Failed
        }
    }
}

// --- Token ---

pub fn get_token(env: &Env) -> Option<Address> {
    env.storage().instance().get(&DataKey::Token)
}

pub fn set_token(env: &Env, token: &Address) {
    env.storage().instance().set(&DataKey::Token, token);
    extend_instance_ttl(env);
}

// --- Campaign counter ---

pub fn get_next_campaign_id(env: &Env) -> u64 {
    env.storage()
        .instance()
        .get(&DataKey::NextCampaignId)
        .unwrap_or(0)
}

pub fn set_next_campaign_id(env: &Env, next_id: u64) {
    env.storage()
        .instance()
        .set(&DataKey::NextCampaignId, &next_id);
    extend_instance_ttl(env);
}

// --- Campaign ---

pub fn get_campaign(env: &Env, campaign_id: u64) -> Option<Campaign> {
    env.storage()
        .persistent()
        .get(&DataKey::Campaign(campaign_id))
}

pub fn set_campaign(env: &Env, campaign: &Campaign) {
    let key = DataKey::Campaign(campaign.id);
    env.storage().persistent().set(&key, campaign);
    extend_persistent_ttl(env, &key);
    extend_instance_ttl(env);
}

// --- Pledge ---

pub fn get_pledge(env: &Env, campaign_id: u64, contributor: &Address) -> i128 {
    env.storage()
        .persistent()
        .get(&DataKey::Pledge(campaign_id, contributor.clone()))
        .unwrap_or(0)
}

/// Writes a pledge record. A zero amount removes the entry, so an absent
/// record and a refunded one read the same.
pub fn set_pledge(env: &Env, campaign_id: u64, contributor: &Address, amount: i128) {
    let key = DataKey::Pledge(campaign_id, contributor.clone());
    if amount == 0 {
        env.storage().persistent().remove(&key);
    } else {
        env.storage().persistent().set(&key, &amount);
        extend_persistent_ttl(env, &key);
    }
    extend_instance_ttl(env);
}

// --- TTL Management ---

fn extend_instance_ttl(env: &Env) {
    env.storage()
        .instance()
        .extend_ttl(INSTANCE_TTL_THRESHOLD, INSTANCE_TTL_EXTEND);
}

fn extend_persistent_ttl(env: &Env, key: &DataKey) {
    env.storage()
        .persistent()
        .extend_ttl(key, PERSISTENT_TTL_THRESHOLD, PERSISTENT_TTL_EXTEND);
}
