#![no_std]

mod errors;
mod events;
mod storage;
mod token;

pub use errors::CrowdfundError;
pub use storage::{Campaign, CampaignStatus};

use events::{
    CampaignCreatedEvent, ContributionReceivedEvent, RefundEvent, WithdrawalEvent,
};
use soroban_sdk::{contract, contractimpl, log, Address, Env, String};

#[contract]
pub struct CrowdfundEscrowContract;

#[contractimpl]
impl CrowdfundEscrowContract {
    /// Bind the escrow to the single token it holds pledges in.
    pub fn __constructor(env: Env, token: Address) {
        storage::set_token(&env, &token);
        storage::set_next_campaign_id(&env, 0);
    }

    /// Create a new campaign owned by `creator`
    pub fn create_campaign(
        env: Env,
        creator: Address,
        goal: i128,
        duration: u64,
        metadata: String,
    ) -> Result<u64, CrowdfundError> {
        creator.require_auth();

        if goal <= 0 {
            return Err(CrowdfundError::InvalidGoal);
        }
        if duration == 0 {
            return Err(CrowdfundError::InvalidDuration);
        }

        let deadline = env
            .ledger()
            .timestamp()
            .checked_add(duration)
            .ok_or(CrowdfundError::InvalidDuration)?;

        let campaign_id = storage::get_next_campaign_id(&env);
        let next_id = campaign_id
            .checked_add(1)
            .ok_or(CrowdfundError::ArithmeticOverflow)?;

        let campaign = Campaign {
            id: campaign_id,
            creator: creator.clone(),
            goal,
            deadline,
            raised: 0,
            withdrawn: false,
            metadata: metadata.clone(),
        };

        storage::set_campaign(&env, &campaign);
        storage::set_next_campaign_id(&env, next_id);

        CampaignCreatedEvent {
            creator,
            campaign_id,
            goal,
            deadline,
            raised: 0,
            metadata,
        }
        .publish(&env);

        Ok(campaign_id)
    }

    /// Pledge `amount` to a campaign while its window is open.
    ///
    /// The contributor must have approved this contract for at least `amount`
    /// on the escrow token. A withdrawn campaign no longer accepts pledges.
    /// Returns the contributor's cumulative pledge.
    pub fn contribute(
        env: Env,
        contributor: Address,
        campaign_id: u64,
        amount: i128,
    ) -> Result<i128, CrowdfundError> {
        let campaign =
            storage::get_campaign(&env, campaign_id).ok_or(CrowdfundError::CampaignNotFound)?;

        contributor.require_auth();

        if amount <= 0 {
            return Err(CrowdfundError::InvalidAmount);
        }
        if !campaign.is_open(env.ledger().timestamp()) {
            return Err(CrowdfundError::CampaignClosed);
        }
        if campaign.withdrawn {
            return Err(CrowdfundError::AlreadyWithdrawn);
        }

        let previous = storage::get_pledge(&env, campaign_id, &contributor);
        let total = previous
            .checked_add(amount)
            .ok_or(CrowdfundError::ArithmeticOverflow)?;
        let mut updated = campaign.clone();
        updated.raised = campaign
            .raised
            .checked_add(amount)
            .ok_or(CrowdfundError::ArithmeticOverflow)?;

        let token_address = escrow_token(&env)?;

        // Bookkeeping lands before the pull so a callback sees the new totals.
        storage::set_pledge(&env, campaign_id, &contributor, total);
        storage::set_campaign(&env, &updated);

        if let Err(err) = token::pull(&env, &token_address, &contributor, &amount) {
            log!(&env, "pull failed, restoring pledge", campaign_id, contributor);
            storage::set_pledge(&env, campaign_id, &contributor, previous);
            storage::set_campaign(&env, &campaign);
            return Err(err);
        }

        ContributionReceivedEvent {
            contributor,
            campaign_id,
            amount,
            total,
        }
        .publish(&env);

        Ok(total)
    }

    /// Release the whole pool to the creator once the goal is met.
    /// Not gated on the deadline.
    pub fn withdraw(env: Env, caller: Address, campaign_id: u64) -> Result<i128, CrowdfundError> {
        let mut campaign =
            storage::get_campaign(&env, campaign_id).ok_or(CrowdfundError::CampaignNotFound)?;

        if caller != campaign.creator {
            return Err(CrowdfundError::Unauthorized);
        }
        caller.require_auth();

        if campaign.withdrawn {
            return Err(CrowdfundError::AlreadyWithdrawn);
        }
        if !campaign.goal_reached() {
            return Err(CrowdfundError::GoalNotReached);
        }

        let amount = campaign.raised;
        let token_address = escrow_token(&env)?;

        // Settled flag is committed before any value leaves the escrow.
        campaign.withdrawn = true;
        storage::set_campaign(&env, &campaign);

        if let Err(err) = token::push(&env, &token_address, &campaign.creator, &amount) {
            log!(&env, "withdrawal push failed, reopening", campaign_id);
            campaign.withdrawn = false;
            storage::set_campaign(&env, &campaign);
            return Err(err);
        }

        WithdrawalEvent {
            creator: campaign.creator,
            campaign_id,
            amount,
        }
        .publish(&env);

        Ok(amount)
    }

    /// Return the caller's full pledge from a campaign that missed its goal.
    pub fn refund(env: Env, contributor: Address, campaign_id: u64) -> Result<i128, CrowdfundError> {
        let campaign =
            storage::get_campaign(&env, campaign_id).ok_or(CrowdfundError::CampaignNotFound)?;

        contributor.require_auth();

        if campaign.is_open(env.ledger().timestamp()) {
            return Err(CrowdfundError::DeadlineNotReached);
        }
        if campaign.goal_reached() {
            return Err(CrowdfundError::GoalReached);
        }

        let amount = storage::get_pledge(&env, campaign_id, &contributor);
        if amount <= 0 {
            return Err(CrowdfundError::NothingToRefund);
        }

        // raised only shrinks here, so a failed campaign stays below its goal.
        let mut updated = campaign.clone();
        updated.raised = campaign
            .raised
            .checked_sub(amount)
            .ok_or(CrowdfundError::ArithmeticOverflow)?;

        let token_address = escrow_token(&env)?;

        storage::set_pledge(&env, campaign_id, &contributor, 0);
        storage::set_campaign(&env, &updated);

        if let Err(err) = token::push(&env, &token_address, &contributor, &amount) {
            log!(&env, "refund push failed, restoring pledge", campaign_id, contributor);
            storage::set_pledge(&env, campaign_id, &contributor, amount);
            storage::set_campaign(&env, &campaign);
            return Err(err);
        }

        RefundEvent {
            contributor,
            campaign_id,
            amount,
        }
        .publish(&env);

        Ok(amount)
    }

    /// Get campaign data
    pub fn get_campaign(env: Env, campaign_id: u64) -> Result<Campaign, CrowdfundError> {
        storage::get_campaign(&env, campaign_id).ok_or(CrowdfundError::CampaignNotFound)
    }

    /// Cumulative pledge of `contributor` to a campaign, net of refunds.
    /// Zero for unknown campaigns and contributors.
    pub fn contribution_of(env: Env, campaign_id: u64, contributor: Address) -> i128 {
        storage::get_pledge(&env, campaign_id, &contributor)
    }

    /// Current lifecycle phase, derived from the record and the ledger clock
    pub fn campaign_status(env: Env, campaign_id: u64) -> Result<CampaignStatus, CrowdfundError> {
        let campaign =
            storage::get_campaign(&env, campaign_id).ok_or(CrowdfundError::CampaignNotFound)?;
        Ok(campaign.status(env.ledger().timestamp()))
    }

    /// Number of campaigns created so far. Ids run from 0 to count - 1.
    pub fn campaign_count(env: Env) -> u64 {
        storage::get_next_campaign_id(&env)
    }

    /// Get the escrowed token address
    pub fn get_token(env: Env) -> Result<Address, CrowdfundError> {
        escrow_token(&env)
    }
}

fn escrow_token(env: &Env) -> Result<Address, CrowdfundError> {
    storage::get_token(env).ok_or(CrowdfundError::NotInitialized)
}
