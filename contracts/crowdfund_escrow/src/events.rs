use soroban_sdk::{contractevent, Address, String};

/// Carries the full initial record so read models can build campaign state
/// without querying the contract.
#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CampaignCreatedEvent {
    #[topic]
    pub creator: Address,
    #[topic]
    pub campaign_id: u64,
    pub goal: i128,
    pub deadline: u64,
    pub raised: i128,
    pub metadata: String,
}

#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ContributionReceivedEvent {
    #[topic]
    pub contributor: Address,
    #[topic]
    pub campaign_id: u64,
    pub amount: i128,
    pub total: i128,
}

#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct WithdrawalEvent {
    #[topic]
    pub creator: Address,
    #[topic]
    pub campaign_id: u64,
    pub amount: i128,
}

#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RefundEvent {
    #[topic]
    pub contributor: Address,
    #[topic]
    pub campaign_id: u64,
    pub amount: i128,
}
