#![cfg(test)]
extern crate std;

use soroban_sdk::{
    testutils::{Address as _, Ledger},
    token::{StellarAssetClient, TokenClient},
    Address, Env, String,
};

use crowdfund_escrow::{
    CampaignStatus, CrowdfundError, CrowdfundEscrowContract,
    CrowdfundEscrowContractClient as EscrowClient,
};

struct Protocol<'a> {
    env: Env,
    escrow: EscrowClient<'a>,
    token: TokenClient<'a>,
    token_admin: StellarAssetClient<'a>,
}

impl<'a> Protocol<'a> {
    fn deploy() -> Self {
        let env = Env::default();
        env.mock_all_auths();

        let issuer = Address::generate(&env);
        let asset = env.register_stellar_asset_contract_v2(issuer);
        let token = TokenClient::new(&env, &asset.address());
        let token_admin = StellarAssetClient::new(&env, &asset.address());

        let escrow_id = env.register(CrowdfundEscrowContract, (asset.address(),));
        let escrow = EscrowClient::new(&env, &escrow_id);

        Protocol {
            env,
            escrow,
            token,
            token_admin,
        }
    }

    /// A wallet holding `balance` tokens with the escrow approved to pull all of it.
    fn backer(&self, balance: i128) -> Address {
        let wallet = Address::generate(&self.env);
        self.token_admin.mint(&wallet, &balance);
        self.token.approve(
            &wallet,
            &self.escrow.address,
            &balance,
            &(self.env.ledger().sequence() + 10_000),
        );
        wallet
    }

    fn metadata(&self, title: &str) -> String {
        String::from_str(&self.env, title)
    }

    fn advance_to(&self, timestamp: u64) {
        self.env.ledger().set_timestamp(timestamp);
    }

    /// Escrow custody must equal every pool that has not been paid out yet.
    fn assert_conserved(&self) {
        let mut held = 0i128;
        for id in 0..self.escrow.campaign_count() {
            let campaign = self.escrow.get_campaign(&id);
            if !campaign.withdrawn {
                held += campaign.raised;
            }
        }
        assert_eq!(self.token.balance(&self.escrow.address), held);
    }
}

#[test]
fn test_goal_met_then_withdrawn_once() {
    let p = Protocol::deploy();
    let creator = Address::generate(&p.env);
    let backer = p.backer(100);

    let id = p
        .escrow
        .create_campaign(&creator, &100, &3_600, &p.metadata("Library books"));

    p.escrow.contribute(&backer, &id, &50);
    p.assert_conserved();
    p.escrow.contribute(&backer, &id, &50);
    p.assert_conserved();

    let campaign = p.escrow.get_campaign(&id);
    assert_eq!(campaign.raised, 100);
    assert_eq!(p.escrow.campaign_status(&id), CampaignStatus::Succeeded);

    assert_eq!(p.escrow.withdraw(&creator, &id), 100);
    assert_eq!(p.token.balance(&creator), 100);
    p.assert_conserved();

    let second = p.escrow.try_withdraw(&creator, &id);
    assert_eq!(second, Err(Ok(CrowdfundError::AlreadyWithdrawn)));
    assert_eq!(p.token.balance(&creator), 100);
    p.assert_conserved();
}

#[test]
fn test_goal_missed_then_refunded_once() {
    let p = Protocol::deploy();
    let creator = Address::generate(&p.env);
    let backer = p.backer(40);

    let id = p
        .escrow
        .create_campaign(&creator, &100, &100, &p.metadata("Community art"));
    p.escrow.contribute(&backer, &id, &40);
    assert_eq!(p.token.balance(&backer), 0);

    p.advance_to(101);
    assert_eq!(p.escrow.campaign_status(&id), CampaignStatus::Failed);

    assert_eq!(p.escrow.refund(&backer, &id), 40);
    assert_eq!(p.token.balance(&backer), 40);
    p.assert_conserved();

    let second = p.escrow.try_refund(&backer, &id);
    assert_eq!(second, Err(Ok(CrowdfundError::NothingToRefund)));
    assert_eq!(p.token.balance(&backer), 40);
    p.assert_conserved();
}

#[test]
fn test_partial_funding_is_not_yet_settleable() {
    let p = Protocol::deploy();
    let creator = Address::generate(&p.env);
    let first = p.backer(30);
    let second = p.backer(20);

    let id = p
        .escrow
        .create_campaign(&creator, &100, &3_600, &p.metadata("Public park"));
    p.escrow.contribute(&first, &id, &30);
    p.escrow.contribute(&second, &id, &20);

    assert_eq!(p.escrow.get_campaign(&id).raised, 50);
    assert_eq!(p.escrow.contribution_of(&id, &first), 30);
    assert_eq!(p.escrow.contribution_of(&id, &second), 20);

    assert_eq!(
        p.escrow.try_withdraw(&creator, &id),
        Err(Ok(CrowdfundError::GoalNotReached))
    );
    assert_eq!(
        p.escrow.try_refund(&first, &id),
        Err(Ok(CrowdfundError::DeadlineNotReached))
    );
    assert_eq!(
        p.escrow.try_refund(&second, &id),
        Err(Ok(CrowdfundError::DeadlineNotReached))
    );
    p.assert_conserved();
}

#[test]
fn test_independent_campaigns_share_one_pool() {
    let p = Protocol::deploy();
    let alice = Address::generate(&p.env);
    let bob = Address::generate(&p.env);
    let backer = p.backer(1_000);
    let other_backer = p.backer(1_000);

    let garden = p
        .escrow
        .create_campaign(&alice, &500, &1_000, &p.metadata("Garden"));
    let studio = p
        .escrow
        .create_campaign(&bob, &800, &2_000, &p.metadata("Studio"));

    p.escrow.contribute(&backer, &garden, &300);
    p.escrow.contribute(&other_backer, &garden, &250);
    p.escrow.contribute(&backer, &studio, &400);
    p.escrow.contribute(&other_backer, &studio, &100);
    p.assert_conserved();

    // Garden reached its goal; the creator is paid without touching studio funds
    assert_eq!(p.escrow.withdraw(&alice, &garden), 550);
    assert_eq!(p.token.balance(&p.escrow.address), 500);
    p.assert_conserved();

    // Studio fails at its deadline and each backer gets their own pledge back
    p.advance_to(2_000);
    assert_eq!(p.escrow.campaign_status(&studio), CampaignStatus::Failed);
    assert_eq!(p.escrow.refund(&backer, &studio), 400);
    p.assert_conserved();
    assert_eq!(p.escrow.refund(&other_backer, &studio), 100);
    p.assert_conserved();

    assert_eq!(p.token.balance(&p.escrow.address), 0);
    assert_eq!(p.token.balance(&alice), 550);
    assert_eq!(p.token.balance(&bob), 0);
    assert_eq!(p.token.balance(&backer), 1_000 - 300);
    assert_eq!(p.token.balance(&other_backer), 1_000 - 250);

    std::println!(
        "settled {} campaigns, escrow balance {}",
        p.escrow.campaign_count(),
        p.token.balance(&p.escrow.address)
    );
}
