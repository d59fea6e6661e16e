use soroban_sdk::contracterror;

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum CrowdfundError {
    NotInitialized = 1,
    InvalidGoal = 2,
    InvalidDuration = 3,
    InvalidAmount = 4,
    CampaignNotFound = 5,
    Unauthorized = 6,
    CampaignClosed = 7,
    DeadlineNotReached = 8,
    GoalNotReached = 9,
    GoalReached = 10,
    NothingToRefund = 11,
    AlreadyWithdrawn = 12,
    TransferFailed = 13,
    ArithmeticOverflow = 14,
}
